// engine.rs - Owned identifier-checking engine.
//
// An Engine bundles the immutable configuration, the chosen class
// predicates, every context and the diagnostic formatter. Nothing is
// global: two engines never share state.

use log::debug;

use crate::context::{Context, ContextManager};
use crate::error::IdentError;
use crate::identifier::*;
use crate::messages::{DefaultFormatter, Diagnostic, ErrorFormatter};
use crate::mixed_script::{Checked, Validator};
use crate::normalize;
use crate::unicode::{self, get_script, script_by_name};

/// Successful check of one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// `EOK` or a combination of `EOK_NORM` and `EOK_WARN_CONFUS`.
    pub code: i32,
    /// Normalized spelling, present when the input was not normalized.
    pub normalized: Option<String>,
}

impl Verdict {
    #[inline]
    pub fn needs_normalization(&self) -> bool {
        needs_normalization(self.code)
    }

    #[inline]
    pub fn has_confusable_warning(&self) -> bool {
        has_confusable_warning(self.code)
    }
}

/// Identifier checker for one configuration.
///
/// # Examples
///
/// ```
/// use ferrident::prelude::*;
///
/// let mut engine = Engine::builder()
///     .profile(Profile::ModeratelyRestrictive)
///     .build();
/// assert_eq!(engine.check_buf("café".as_bytes()), EOK);
/// assert_eq!(engine.check_buf("\u{430}lpha".as_bytes()), ERR_SCRIPTS);
/// ```
pub struct Engine {
    validator: Validator,
    contexts: ContextManager,
    max_len: usize,
    formatter: Box<dyn ErrorFormatter>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("profile", self.validator.profile())
            .field("contexts", &self.contexts.len())
            .field("max_len", &self.max_len)
            .finish_non_exhaustive()
    }
}

impl Default for Engine {
    fn default() -> Self {
        EngineBuilder::new().build()
    }
}

impl Engine {
    /// Create an engine from raw profile, normalization-form and option
    /// values. Out-of-range values are the only failure.
    pub fn init(profile: i32, form: i32, options: u32) -> Result<Engine, IdentError> {
        let profile = Profile::from_i32(profile).ok_or(IdentError::InvalidArgument)?;
        let form = NormForm::from_i32(form).ok_or(IdentError::InvalidArgument)?;
        let options = Options::from_bits(options).ok_or(IdentError::InvalidArgument)?;
        if options.id_class().is_none() {
            return Err(IdentError::InvalidArgument);
        }
        Ok(Engine::with_profile(IdentifierProfile::new(profile, form, options)))
    }

    /// Create a [`EngineBuilder`] for typed configuration.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub fn with_profile(profile: IdentifierProfile) -> Engine {
        debug!(
            "engine: profile {}, {}, class {}",
            profile.profile, profile.norm, profile.class
        );
        Engine {
            validator: Validator::new(profile),
            contexts: ContextManager::new(),
            max_len: DEFAULT_MAX_IDENTIFIER_LENGTH,
            formatter: Box::new(DefaultFormatter),
        }
    }

    #[inline]
    pub fn profile(&self) -> &IdentifierProfile {
        self.validator.profile()
    }

    /// Longest identifier accepted, in bytes.
    pub fn set_max_identifier_length(&mut self, len: usize) {
        self.max_len = len;
    }

    #[inline]
    pub fn max_identifier_length(&self) -> usize {
        self.max_len
    }

    // === Contexts ===

    pub fn new_context(&mut self) -> Result<usize, IdentError> {
        self.contexts.new_context()
    }

    pub fn set_context(&mut self, handle: usize) -> Result<(), IdentError> {
        self.contexts.set_context(handle)
    }

    pub fn delete_context(&mut self, handle: usize) -> Result<(), IdentError> {
        self.contexts.delete_context(handle)
    }

    #[inline]
    pub fn current_context(&self) -> usize {
        self.contexts.current_handle()
    }

    pub fn context(&self, handle: usize) -> Option<&Context> {
        self.contexts.get(handle)
    }

    /// Destroy every context; context 0 starts over empty.
    pub fn free(&mut self) {
        self.contexts.free();
    }

    /// Allow a Limited-Use (or Recommended) script in the active context.
    pub fn declare_script(&mut self, sc: ScriptIdx) -> Result<(), IdentError> {
        self.contexts.current_mut().declare_script(sc)
    }

    /// Like [`Engine::declare_script`], by long name or ISO 15924 code.
    pub fn declare_script_by_name(&mut self, name: &str) -> Result<(), IdentError> {
        let sc = script_by_name(name).ok_or(IdentError::InvalidArgument)?;
        self.declare_script(sc)
    }

    // === Checks ===

    fn run(&mut self, buf: &[u8], want_normalized: bool) -> Checked {
        if buf.len() > self.max_len {
            return Checked {
                code: ERR_TOO_LONG,
                normalized: None,
            };
        }
        let ctx = self.contexts.current_mut();
        self.validator.check(ctx, buf, want_normalized)
    }

    /// Check a NUL-terminated identifier; bytes after the first NUL are
    /// ignored.
    pub fn check(&mut self, cstr: &[u8]) -> i32 {
        let end = memchr::memchr(0, cstr).unwrap_or(cstr.len());
        self.check_buf(&cstr[..end])
    }

    /// Check one identifier in the active context.
    pub fn check_buf(&mut self, buf: &[u8]) -> i32 {
        self.run(buf, false).code
    }

    /// Check one identifier and return its normalized spelling when it was
    /// not already normalized.
    pub fn check_buf_normalized(&mut self, buf: &[u8]) -> (i32, Option<String>) {
        let checked = self.run(buf, true);
        (checked.code, checked.normalized)
    }

    /// Check one identifier, splitting success from failure.
    pub fn validate(&mut self, ident: &str) -> Result<Verdict, IdentError> {
        let checked = self.run(ident.as_bytes(), true);
        let code = IdentError::check_code(checked.code)?;
        Ok(Verdict {
            code,
            normalized: checked.normalized,
        })
    }

    /// Record `buf` in the active context's confusable index.
    ///
    /// `EOK` for a new skeleton or a repeat of the first spelling,
    /// `ERR_CONFUS` for a different spelling of a known skeleton.
    pub fn check_confusable(&mut self, buf: &[u8]) -> i32 {
        if buf.len() > self.max_len {
            return ERR_TOO_LONG;
        }
        self.contexts.current_mut().confusables.check(buf)
    }

    /// Normalize with the engine's normalization form.
    pub fn normalize(&self, buf: &[u8]) -> Result<String, IdentError> {
        Ok(normalize::normalize(buf, self.profile().norm)?)
    }

    // === Diagnostics ===

    /// Codepoint behind the last failure in context `handle`.
    pub fn failed_codepoint(&self, handle: usize) -> Option<CodePoint> {
        self.contexts
            .get(handle)
            .map(|ctx| ctx.last_failed_cp)
            .filter(|&cp| cp != 0)
    }

    pub fn failed_script_name(&self, handle: usize) -> Option<&'static str> {
        self.failed_codepoint(handle)
            .map(|cp| unicode::script_name(get_script(cp)))
    }

    /// Scripts recorded in context `handle`, joined for display.
    pub fn existing_scripts(&self, handle: usize) -> Option<String> {
        self.contexts.get(handle).map(Context::existing_scripts)
    }

    pub fn script_name(sc: ScriptIdx) -> &'static str {
        unicode::script_name(sc)
    }

    /// Message for `code` in the active context, through the installed
    /// formatter.
    pub fn error_message(&self, code: i32) -> String {
        let ctx = self.contexts.current();
        let existing = ctx.existing_scripts();
        let codepoint = Some(ctx.last_failed_cp).filter(|&cp| cp != 0 && code < 0);
        let diag = Diagnostic {
            code,
            codepoint,
            script: codepoint.map(|cp| unicode::script_name(get_script(cp))),
            existing_scripts: &existing,
        };
        self.formatter.format(&diag)
    }
}

// === EngineBuilder ===

/// Builder for an [`Engine`] with typed options.
///
/// # Examples
///
/// ```
/// use ferrident::prelude::*;
///
/// let mut engine = Engine::builder()
///     .profile(Profile::SafeC23)
///     .normalization(NormForm::Nfkc)
///     .warn_confusables(true)
///     .build();
/// assert_eq!(engine.profile().class, IdClass::SafeC23);
/// assert!(is_ok_code(engine.check_buf(b"counter")));
/// ```
pub struct EngineBuilder {
    profile: Profile,
    norm: NormForm,
    options: Options,
    max_len: usize,
    formatter: Box<dyn ErrorFormatter>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        EngineBuilder::new()
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        EngineBuilder {
            profile: Profile::default(),
            norm: NormForm::default(),
            options: Options::empty(),
            max_len: DEFAULT_MAX_IDENTIFIER_LENGTH,
            formatter: Box::new(DefaultFormatter),
        }
    }

    /// Restriction profile (default: moderately restrictive).
    pub fn profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Normalization form (default: NFC).
    pub fn normalization(mut self, norm: NormForm) -> Self {
        self.norm = norm;
        self
    }

    /// Identifier class. Without this the profile picks one.
    pub fn id_class(mut self, class: IdClass) -> Self {
        self.options = self.options.with_class(class);
        self
    }

    fn flag(mut self, flag: Options, yes: bool) -> Self {
        self.options.set(flag, yes);
        self
    }

    pub fn warn_confusables(self, yes: bool) -> Self {
        self.flag(Options::WARN_CONFUSABLE, yes)
    }

    pub fn error_confusables(self, yes: bool) -> Self {
        self.flag(Options::ERROR_CONFUSABLE, yes)
    }

    /// Also require XID_Start/XID_Continue on top of the class.
    pub fn check_xid(self, yes: bool) -> Self {
        self.flag(Options::CHECK_XID, yes)
    }

    pub fn max_identifier_length(mut self, len: usize) -> Self {
        self.max_len = len;
        self
    }

    /// Install a custom diagnostic formatter.
    pub fn formatter(mut self, formatter: impl ErrorFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    pub fn build(self) -> Engine {
        let mut engine = Engine::with_profile(IdentifierProfile::new(self.profile, self.norm, self.options));
        engine.max_len = self.max_len;
        engine.formatter = self.formatter;
        engine
    }
}
