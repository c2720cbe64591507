// identifier.rs - Public types, result codes, profiles and option flags.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::error::IdentError;

// === Basic types ===
pub type CodePoint = u32;
pub type ScriptIdx = u8;

pub const MAX_CODE_POINT: CodePoint = 0x10FFFF;

/// Default upper bound for one identifier, in bytes.
pub const DEFAULT_MAX_IDENTIFIER_LENGTH: usize = 1024;

// === Result codes ===
// Success codes are bit-combinable, errors are negative.
pub const EOK: i32 = 0;
pub const EOK_NORM: i32 = 1;
pub const EOK_WARN_CONFUS: i32 = 2;
pub const EOK_NORM_WARN_CONFUS: i32 = EOK_NORM | EOK_WARN_CONFUS;

pub const ERR_XID: i32 = -1;
pub const ERR_SCRIPT: i32 = -2;
pub const ERR_SCRIPTS: i32 = -3;
pub const ERR_ENCODING: i32 = -4;
pub const ERR_COMBINE: i32 = -5;
pub const ERR_CONFUS: i32 = -6;
pub const ERR_MEMORY: i32 = -7;
pub const ERR_TOO_LONG: i32 = -8;

/// Returned by configuration and context calls on bad arguments.
pub const ERR_INVALID_ARGUMENT: i32 = -30;

#[inline]
pub fn is_ok_code(code: i32) -> bool {
    code >= 0
}

#[inline]
pub fn needs_normalization(code: i32) -> bool {
    code > 0 && (code & EOK_NORM) != 0
}

#[inline]
pub fn has_confusable_warning(code: i32) -> bool {
    code > 0 && (code & EOK_WARN_CONFUS) != 0
}

// === Restriction profiles ===

/// TR39 restriction level plus the two C-language variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(i32)]
pub enum Profile {
    /// Only ASCII codepoints.
    Ascii = 1,
    /// One script, including the Han/Hiragana/Katakana, Han/Bopomofo and
    /// Han/Hangul unions.
    SingleScript = 2,
    /// Single script, or Latin with one of the CJK unions.
    HighlyRestrictive = 3,
    /// Highly restrictive, or Latin plus one other Recommended script except
    /// Greek and Cyrillic.
    #[default]
    ModeratelyRestrictive = 4,
    /// Any mix of Recommended (and declared Limited-Use) scripts.
    MinimallyRestrictive = 5,
    /// No script checks at all.
    Unrestricted = 6,
    /// Moderately restrictive with Greek allowed next to Latin, at most two
    /// non-Latin scripts and no Cyrillic mixing.
    SafeC23 = 7,
    /// C11 Annex D identifiers, no script checks.
    C11 = 8,
}

impl Profile {
    pub const ALL: [Profile; 8] = [
        Profile::Ascii,
        Profile::SingleScript,
        Profile::HighlyRestrictive,
        Profile::ModeratelyRestrictive,
        Profile::MinimallyRestrictive,
        Profile::Unrestricted,
        Profile::SafeC23,
        Profile::C11,
    ];

    pub fn from_i32(value: i32) -> Option<Profile> {
        Profile::ALL.iter().copied().find(|p| *p as i32 == value)
    }

    /// Does this profile run the per-codepoint script state machine?
    #[inline]
    pub fn checks_scripts(self) -> bool {
        !matches!(self, Profile::Unrestricted | Profile::C11)
    }

    pub fn name(self) -> &'static str {
        match self {
            Profile::Ascii => "ascii",
            Profile::SingleScript => "single-script",
            Profile::HighlyRestrictive => "highly-restrictive",
            Profile::ModeratelyRestrictive => "moderately-restrictive",
            Profile::MinimallyRestrictive => "minimally-restrictive",
            Profile::Unrestricted => "unrestricted",
            Profile::SafeC23 => "safec23",
            Profile::C11 => "c11",
        }
    }

    /// Identifier class implied by the profile when none was chosen.
    pub fn default_class(self) -> IdClass {
        match self {
            Profile::Ascii => IdClass::Ascii,
            Profile::SafeC23 => IdClass::SafeC23,
            Profile::C11 => IdClass::C11,
            _ => IdClass::Xid,
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Profile {
    type Err = IdentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.trim().parse::<i32>() {
            return Profile::from_i32(n).ok_or(IdentError::InvalidArgument);
        }
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        match key.as_str() {
            "ascii" => Ok(Profile::Ascii),
            "single" | "single-script" => Ok(Profile::SingleScript),
            "highly" | "highly-restrictive" => Ok(Profile::HighlyRestrictive),
            "moderately" | "moderately-restrictive" => Ok(Profile::ModeratelyRestrictive),
            "minimally" | "minimally-restrictive" => Ok(Profile::MinimallyRestrictive),
            "unrestricted" => Ok(Profile::Unrestricted),
            "safec23" | "c23" | "safec" => Ok(Profile::SafeC23),
            "c11" => Ok(Profile::C11),
            _ => Err(IdentError::InvalidArgument),
        }
    }
}

// === Normalization forms ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum NormForm {
    Nfd = 0,
    #[default]
    Nfc = 1,
    Nfkd = 2,
    Nfkc = 3,
    /// Canonical decomposition without reordering; a pre-test only.
    Fcd = 4,
    /// NFC restricted to contiguous compositions.
    Fcc = 5,
}

impl NormForm {
    pub const ALL: [NormForm; 6] = [
        NormForm::Nfd,
        NormForm::Nfc,
        NormForm::Nfkd,
        NormForm::Nfkc,
        NormForm::Fcd,
        NormForm::Fcc,
    ];

    pub fn from_i32(value: i32) -> Option<NormForm> {
        NormForm::ALL.iter().copied().find(|f| *f as i32 == value)
    }

    #[inline]
    pub fn is_compat(self) -> bool {
        matches!(self, NormForm::Nfkd | NormForm::Nfkc)
    }

    #[inline]
    pub fn reorders(self) -> bool {
        self != NormForm::Fcd
    }

    #[inline]
    pub fn composes(self) -> bool {
        matches!(self, NormForm::Nfc | NormForm::Nfkc | NormForm::Fcc)
    }

    pub fn name(self) -> &'static str {
        match self {
            NormForm::Nfd => "NFD",
            NormForm::Nfc => "NFC",
            NormForm::Nfkd => "NFKD",
            NormForm::Nfkc => "NFKC",
            NormForm::Fcd => "FCD",
            NormForm::Fcc => "FCC",
        }
    }
}

impl fmt::Display for NormForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NormForm {
    type Err = IdentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NormForm::ALL
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(IdentError::InvalidArgument)
    }
}

// === Identifier classes ===

/// Which Start/Continue predicate pair gates each codepoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum IdClass {
    #[default]
    Xid = 0,
    Id = 1,
    Allowed = 2,
    SafeC23 = 3,
    C11 = 4,
    AllUtf8 = 5,
    Ascii = 6,
}

impl IdClass {
    pub const ALL: [IdClass; 7] = [
        IdClass::Xid,
        IdClass::Id,
        IdClass::Allowed,
        IdClass::SafeC23,
        IdClass::C11,
        IdClass::AllUtf8,
        IdClass::Ascii,
    ];

    pub fn from_u32(value: u32) -> Option<IdClass> {
        IdClass::ALL.iter().copied().find(|c| *c as u32 == value)
    }

    pub fn name(self) -> &'static str {
        match self {
            IdClass::Xid => "xid",
            IdClass::Id => "id",
            IdClass::Allowed => "allowed",
            IdClass::SafeC23 => "safec23",
            IdClass::C11 => "c11",
            IdClass::AllUtf8 => "allutf8",
            IdClass::Ascii => "ascii",
        }
    }
}

impl fmt::Display for IdClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IdClass {
    type Err = IdentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', '_'], "");
        let key = match key.as_str() {
            "utf8" | "none" => "allutf8",
            "c23" => "safec23",
            other => other,
        };
        IdClass::ALL
            .iter()
            .copied()
            .find(|c| c.name() == key)
            .ok_or(IdentError::InvalidArgument)
    }
}

// === Option flags ===

bitflags! {
    /// Option bitmask accepted by `Engine::init`.
    ///
    /// Bits 8..=10 hold the identifier class selector (see [`IdClass`]);
    /// zero selects XID.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Options: u32 {
        /// Additionally require XID_Start/XID_Continue on top of the
        /// selected class.
        const CHECK_XID = 1 << 3;
        /// Confusable codepoints downgrade the result with a warning bit.
        const WARN_CONFUSABLE = 1 << 4;
        /// Confusable codepoints are an error.
        const ERROR_CONFUSABLE = 1 << 5;
        const CLASS_ID = (IdClass::Id as u32) << Options::CLASS_SHIFT;
        const CLASS_ALLOWED = (IdClass::Allowed as u32) << Options::CLASS_SHIFT;
        const CLASS_SAFEC23 = (IdClass::SafeC23 as u32) << Options::CLASS_SHIFT;
        const CLASS_C11 = (IdClass::C11 as u32) << Options::CLASS_SHIFT;
        const CLASS_ALLUTF8 = (IdClass::AllUtf8 as u32) << Options::CLASS_SHIFT;
        const CLASS_ASCII = (IdClass::Ascii as u32) << Options::CLASS_SHIFT;
        const CLASS_MASK = 0x7 << Options::CLASS_SHIFT;
    }
}

impl Options {
    pub const CLASS_SHIFT: u32 = 8;

    /// Decode the class selector field; `None` for an out-of-range value.
    pub fn id_class(self) -> Option<IdClass> {
        IdClass::from_u32((self.bits() & Options::CLASS_MASK.bits()) >> Options::CLASS_SHIFT)
    }

    pub fn with_class(self, class: IdClass) -> Options {
        let bits = (self.bits() & !Options::CLASS_MASK.bits())
            | ((class as u32) << Options::CLASS_SHIFT);
        Options::from_bits_retain(bits)
    }

    pub fn has_explicit_class(self) -> bool {
        self.intersects(Options::CLASS_MASK)
    }
}

/// Immutable configuration of one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierProfile {
    pub profile: Profile,
    pub norm: NormForm,
    pub class: IdClass,
    pub options: Options,
}

impl IdentifierProfile {
    pub fn new(profile: Profile, norm: NormForm, options: Options) -> Self {
        let class = if options.has_explicit_class() {
            options.id_class().unwrap_or_default()
        } else {
            profile.default_class()
        };
        IdentifierProfile {
            profile,
            norm,
            class,
            options: options.with_class(class),
        }
    }

    #[inline]
    pub fn warn_confusables(&self) -> bool {
        self.options.contains(Options::WARN_CONFUSABLE)
    }

    #[inline]
    pub fn error_confusables(&self) -> bool {
        self.options.contains(Options::ERROR_CONFUSABLE)
    }

    #[inline]
    pub fn check_xid(&self) -> bool {
        self.options.contains(Options::CHECK_XID)
    }
}

impl Default for IdentifierProfile {
    fn default() -> Self {
        IdentifierProfile::new(Profile::default(), NormForm::default(), Options::empty())
    }
}
