// context.rs - Validation scopes: scripts seen so far and derived flags.
//
// One context per compilation unit, file or directory. Contexts never see
// each other's scripts. Context 0 always exists.

use log::debug;
use smallvec::SmallVec;

use crate::confusable::ConfusableIndex;
use crate::error::IdentError;
use crate::identifier::*;
use crate::unicode::*;

/// Small set of script indices: 8 inline, spills to the heap, never shrinks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptSet {
    scripts: SmallVec<[ScriptIdx; 8]>,
}

impl ScriptSet {
    pub fn new() -> Self {
        ScriptSet::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    #[inline]
    pub fn contains(&self, sc: ScriptIdx) -> bool {
        self.scripts.contains(&sc)
    }

    /// Add `sc`; false if it was already present.
    pub fn insert(&mut self, sc: ScriptIdx) -> bool {
        if self.contains(sc) {
            return false;
        }
        self.scripts.push(sc);
        true
    }

    /// Scripts in insertion order.
    pub fn as_slice(&self) -> &[ScriptIdx] {
        &self.scripts
    }

    pub fn iter(&self) -> impl Iterator<Item = ScriptIdx> + '_ {
        self.scripts.iter().copied()
    }

    /// Has the set outgrown its inline storage?
    pub fn spilled(&self) -> bool {
        self.scripts.spilled()
    }
}

/// Accumulated state of one validation scope.
#[derive(Debug, Clone, Default)]
pub struct Context {
    scripts: ScriptSet,
    declared: ScriptSet,
    pub has_han: bool,
    pub is_japanese: bool,
    pub is_korean: bool,
    pub is_chinese: bool,
    pub is_rtl: bool,
    /// Codepoint that caused the last failure, 0 if none.
    pub last_failed_cp: CodePoint,
    pub confusables: ConfusableIndex,
}

impl Context {
    pub fn new() -> Self {
        Context::default()
    }

    /// Distinct scripts seen, Common and Inherited excluded.
    #[inline]
    pub fn count(&self) -> usize {
        self.scripts.len()
    }

    #[inline]
    pub fn scripts(&self) -> &ScriptSet {
        &self.scripts
    }

    #[inline]
    pub fn has_script(&self, sc: ScriptIdx) -> bool {
        self.scripts.contains(sc)
    }

    #[inline]
    pub fn is_declared(&self, sc: ScriptIdx) -> bool {
        self.declared.contains(sc)
    }

    /// Record a Recommended script.
    pub fn add_script(&mut self, sc: ScriptIdx) -> Result<(), IdentError> {
        if sc < SC_LATIN || sc >= FIRST_LIMITED_USE {
            return Err(IdentError::InvalidArgument);
        }
        self.record(sc);
        Ok(())
    }

    /// Record any non-ignored script and update the flags. Callers check
    /// the tier (Limited-Use scripts must be declared first).
    pub(crate) fn record(&mut self, sc: ScriptIdx) {
        if sc < SC_LATIN || !self.scripts.insert(sc) {
            return;
        }
        match sc {
            SC_HAN => self.has_han = true,
            SC_HIRAGANA | SC_KATAKANA => self.is_japanese = true,
            SC_HANGUL => self.is_korean = true,
            SC_BOPOMOFO => self.is_chinese = true,
            _ => {}
        }
        if is_rtl_script(sc) {
            self.is_rtl = true;
        }
    }

    /// Pre-authorize a Recommended or Limited-Use script for this scope.
    pub fn declare_script(&mut self, sc: ScriptIdx) -> Result<(), IdentError> {
        if sc < SC_LATIN || sc >= FIRST_EXCLUDED {
            return Err(IdentError::InvalidArgument);
        }
        self.declared.insert(sc);
        debug!("declared script {} ({})", script_name(sc), sc);
        Ok(())
    }

    /// Script names joined with ", ", in order of first use.
    pub fn existing_scripts(&self) -> String {
        self.scripts
            .iter()
            .map(script_name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Owns all contexts and tracks the active one.
///
/// Handle 0 is the default context; handles from `new_context` index the
/// extra slots, offset by one.
#[derive(Debug, Clone, Default)]
pub struct ContextManager {
    default: Context,
    extra: Vec<Option<Context>>,
    current: usize,
}

impl ContextManager {
    pub fn new() -> Self {
        ContextManager::default()
    }

    /// Create a context and return its handle. Freed handles are reused.
    pub fn new_context(&mut self) -> Result<usize, IdentError> {
        let slot = match self.extra.iter().position(Option::is_none) {
            Some(i) => i,
            None => {
                self.extra.try_reserve(1).map_err(|_| IdentError::Memory)?;
                self.extra.push(None);
                self.extra.len() - 1
            }
        };
        self.extra[slot] = Some(Context::new());
        debug!("new context {}", slot + 1);
        Ok(slot + 1)
    }

    pub fn set_context(&mut self, handle: usize) -> Result<(), IdentError> {
        if self.get(handle).is_none() {
            return Err(IdentError::InvalidArgument);
        }
        self.current = handle;
        Ok(())
    }

    /// Delete a context. The default context 0 cannot be deleted; deleting
    /// the active context makes context 0 active.
    pub fn delete_context(&mut self, handle: usize) -> Result<(), IdentError> {
        if handle == 0 {
            return Err(IdentError::InvalidArgument);
        }
        match self.extra.get_mut(handle - 1) {
            Some(slot @ Some(_)) => {
                *slot = None;
                if self.current == handle {
                    self.current = 0;
                }
                while matches!(self.extra.last(), Some(None)) {
                    self.extra.pop();
                }
                debug!("deleted context {}", handle);
                Ok(())
            }
            _ => Err(IdentError::InvalidArgument),
        }
    }

    /// Drop every context and start over with a fresh context 0.
    pub fn free(&mut self) {
        debug!("freeing {} contexts", self.len());
        *self = ContextManager::default();
    }

    /// Number of live contexts, the default one included.
    pub fn len(&self) -> usize {
        1 + self.extra.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn current_handle(&self) -> usize {
        self.current
    }

    pub fn get(&self, handle: usize) -> Option<&Context> {
        match handle {
            0 => Some(&self.default),
            h => self.extra.get(h - 1).and_then(Option::as_ref),
        }
    }

    pub fn get_mut(&mut self, handle: usize) -> Option<&mut Context> {
        match handle {
            0 => Some(&mut self.default),
            h => self.extra.get_mut(h - 1).and_then(Option::as_mut),
        }
    }

    pub fn current(&self) -> &Context {
        match self.current {
            0 => &self.default,
            h => match self.extra.get(h - 1) {
                Some(Some(ctx)) => ctx,
                _ => &self.default,
            },
        }
    }

    pub fn current_mut(&mut self) -> &mut Context {
        match self.current {
            0 => &mut self.default,
            h => match self.extra.get_mut(h - 1) {
                Some(Some(ctx)) => ctx,
                _ => &mut self.default,
            },
        }
    }
}
