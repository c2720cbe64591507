// confusable.rs - Skeleton-based confusable identifier detection.
//
// skeleton(s) = NFC(map(NFD(s))), where map replaces every codepoint that
// has a prototype in UTS #39 confusables.txt (unicode-security ships the
// full table). Two different spellings with one skeleton in the same scope
// are confusable.

use log::trace;

use crate::error::IdentError;
use crate::hash::FnvTable;
use crate::identifier::*;
use crate::normalize::{self, NormalizeError};

/// Skeleton of a decoded identifier.
pub fn skeleton_cps(input: &[CodePoint]) -> Result<Vec<CodePoint>, NormalizeError> {
    let text = normalize::to_string(input)?;
    let mut mapped = Vec::new();
    mapped.try_reserve(input.len())?;
    // unicode-security yields NFD(map(NFD(s)))
    for ch in unicode_security::skeleton(&text) {
        mapped.try_reserve(1)?;
        mapped.push(ch as CodePoint);
    }
    normalize::normalize_cps(&mapped, NormForm::Nfc)
}

/// Skeleton of a UTF-8 identifier.
pub fn skeleton(buf: &[u8]) -> Result<String, NormalizeError> {
    let cps = normalize::decode(buf)?;
    normalize::to_string(&skeleton_cps(&cps)?)
}

/// Do two identifiers share a skeleton?
pub fn is_confusable_with(a: &str, b: &str) -> Result<bool, NormalizeError> {
    Ok(skeleton(a.as_bytes())? == skeleton(b.as_bytes())?)
}

/// Per-scope record of identifier spellings and their skeletons.
#[derive(Debug, Clone, Default)]
pub struct ConfusableIndex {
    /// raw spelling -> skeleton
    skeletons: FnvTable<Box<[u8]>>,
    /// skeleton -> first spelling seen
    first_seen: FnvTable<Box<[u8]>>,
}

impl ConfusableIndex {
    pub fn new() -> Self {
        ConfusableIndex::default()
    }

    /// Number of distinct spellings recorded.
    pub fn len(&self) -> usize {
        self.skeletons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skeletons.is_empty()
    }

    fn skeleton_of(&mut self, buf: &[u8]) -> Result<Box<[u8]>, IdentError> {
        if let Some(skel) = self.skeletons.get(buf) {
            return Ok(skel.clone());
        }
        let skel: Box<[u8]> = skeleton(buf)?.into_bytes().into_boxed_slice();
        self.skeletons
            .insert(buf, skel.clone())
            .map_err(|_| IdentError::Memory)?;
        Ok(skel)
    }

    fn register(&mut self, buf: &[u8]) -> Result<(), IdentError> {
        let skel = self.skeleton_of(buf)?;
        match self.first_seen.get(&skel) {
            Some(first) if **first == *buf => Ok(()),
            Some(first) => {
                trace!(
                    "confusable: {:?} collides with {:?}",
                    String::from_utf8_lossy(buf),
                    String::from_utf8_lossy(first)
                );
                Err(IdentError::Confusable)
            }
            None => {
                let mut owned = Vec::new();
                owned.try_reserve_exact(buf.len()).map_err(|_| IdentError::Memory)?;
                owned.extend_from_slice(buf);
                self.first_seen
                    .insert(&skel, owned.into_boxed_slice())
                    .map_err(|_| IdentError::Memory)?;
                Ok(())
            }
        }
    }

    /// Record `buf` and compare it with earlier spellings.
    ///
    /// Returns `EOK`, `ERR_CONFUS` when a different spelling with the same
    /// skeleton was seen first, `ERR_ENCODING` or `ERR_MEMORY`.
    pub fn check(&mut self, buf: &[u8]) -> i32 {
        match self.register(buf) {
            Ok(()) => EOK,
            Err(err) => err.code(),
        }
    }

    /// First spelling recorded with the same skeleton as `buf`.
    pub fn first_spelling(&self, buf: &[u8]) -> Option<&[u8]> {
        let skel = self.skeletons.get(buf)?;
        self.first_seen.get(skel).map(|raw| &**raw)
    }
}
