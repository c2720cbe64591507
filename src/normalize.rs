// normalize.rs - Unicode normalization: NFD, NFC, NFKD, NFKC, FCD and FCC.
//
// Three passes over a codepoint buffer: decompose, canonical reorder and
// compose. Decomposition mappings, combining classes and primary composites
// come from unicode-normalization's per-char API; Hangul is arithmetic.

use std::collections::TryReserveError;
use std::fmt;

use smallvec::SmallVec;
use unicode_normalization::char as ucd;
use unicode_normalization::{is_nfc_quick, is_nfkc_quick, IsNormalized};

use crate::encodings::utf8;
use crate::error::IdentError;
use crate::identifier::*;

/// Why a buffer could not be normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeError {
    Encoding,
    Memory,
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NormalizeError::Encoding => "invalid UTF-8 encoding",
            NormalizeError::Memory => "memory allocation failed",
        })
    }
}

impl std::error::Error for NormalizeError {}

impl From<TryReserveError> for NormalizeError {
    fn from(_: TryReserveError) -> Self {
        NormalizeError::Memory
    }
}

impl From<NormalizeError> for IdentError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::Encoding => IdentError::Encoding,
            NormalizeError::Memory => IdentError::Memory,
        }
    }
}

impl NormalizeError {
    pub fn code(self) -> i32 {
        match self {
            NormalizeError::Encoding => ERR_ENCODING,
            NormalizeError::Memory => ERR_MEMORY,
        }
    }
}

// === Hangul ===

const S_BASE: CodePoint = 0xAC00;
const L_BASE: CodePoint = 0x1100;
const V_BASE: CodePoint = 0x1161;
const T_BASE: CodePoint = 0x11A7;
const L_COUNT: CodePoint = 19;
const V_COUNT: CodePoint = 21;
const T_COUNT: CodePoint = 28;
const N_COUNT: CodePoint = V_COUNT * T_COUNT;
const S_COUNT: CodePoint = L_COUNT * N_COUNT;

#[inline]
fn is_hangul_syllable(cp: CodePoint) -> bool {
    cp.wrapping_sub(S_BASE) < S_COUNT
}

/// Push with doubling growth; allocation failure is reported, not aborted.
#[inline]
fn push(buf: &mut Vec<CodePoint>, cp: CodePoint) -> Result<(), NormalizeError> {
    if buf.len() == buf.capacity() {
        let grow = buf.capacity().max(8);
        buf.try_reserve_exact(grow)?;
    }
    buf.push(cp);
    Ok(())
}

/// Canonical combining class; 0 for starters and non-scalar values.
#[inline]
pub fn combining_class(cp: CodePoint) -> u8 {
    char::from_u32(cp).map_or(0, ucd::canonical_combining_class)
}

// === Pass 1: decompose ===

fn decompose_cp(cp: CodePoint, compat: bool, out: &mut Vec<CodePoint>) -> Result<(), NormalizeError> {
    if is_hangul_syllable(cp) {
        let s = cp - S_BASE;
        push(out, L_BASE + s / N_COUNT)?;
        push(out, V_BASE + (s % N_COUNT) / T_COUNT)?;
        let t = s % T_COUNT;
        if t != 0 {
            push(out, T_BASE + t)?;
        }
        return Ok(());
    }
    let ch = match char::from_u32(cp) {
        Some(ch) if cp >= 0xA0 => ch,
        _ => return push(out, cp),
    };
    let mut parts: SmallVec<[char; 8]> = SmallVec::new();
    if compat {
        ucd::decompose_compatible(ch, |c| parts.push(c));
    } else {
        ucd::decompose_canonical(ch, |c| parts.push(c));
    }
    for c in parts {
        push(out, c as CodePoint)?;
    }
    Ok(())
}

/// Full (recursive) decomposition of every codepoint, without reordering.
pub fn decompose(input: &[CodePoint], compat: bool) -> Result<Vec<CodePoint>, NormalizeError> {
    let mut out = Vec::new();
    out.try_reserve_exact(input.len().saturating_mul(2).max(8))?;
    for &cp in input {
        decompose_cp(cp, compat, &mut out)?;
    }
    Ok(out)
}

// === Pass 2: canonical reorder ===

/// Stable sort of every run of non-starters by combining class.
pub fn reorder(buf: &mut [CodePoint]) {
    let mut i = 0;
    while i < buf.len() {
        if combining_class(buf[i]) == 0 {
            i += 1;
            continue;
        }
        let start = i;
        while i < buf.len() && combining_class(buf[i]) != 0 {
            i += 1;
        }
        // Runs are short; insertion sort keeps equal classes in order.
        let run = &mut buf[start..i];
        for j in 1..run.len() {
            let mut k = j;
            while k > 0 && combining_class(run[k - 1]) > combining_class(run[k]) {
                run.swap(k - 1, k);
                k -= 1;
            }
        }
    }
}

// === Pass 3: compose ===

/// Primary composite of a starter and a following codepoint.
pub fn compose_pair(a: CodePoint, b: CodePoint) -> Option<CodePoint> {
    // L + V
    let l = a.wrapping_sub(L_BASE);
    let v = b.wrapping_sub(V_BASE);
    if l < L_COUNT && v < V_COUNT {
        return Some(S_BASE + (l * V_COUNT + v) * T_COUNT);
    }
    // LV + T
    let t = b.wrapping_sub(T_BASE);
    if is_hangul_syllable(a) && (a - S_BASE) % T_COUNT == 0 && t > 0 && t < T_COUNT {
        return Some(a + t);
    }
    let ca = char::from_u32(a)?;
    let cb = char::from_u32(b)?;
    ucd::compose(ca, cb).map(|c| c as CodePoint)
}

/// Canonical composition in place.
///
/// A candidate is blocked when an intervening character has class 0 or a
/// class not lower than its own; with `contiguous` (FCC) any intervening
/// character blocks.
pub fn compose(buf: &mut Vec<CodePoint>, contiguous: bool) {
    let mut starter: Option<usize> = None;
    // Class of the last character kept after the starter, None if the
    // starter is the last kept character.
    let mut last_cc: Option<u8> = None;
    let mut len = 0;

    for i in 0..buf.len() {
        let cp = buf[i];
        let cc = combining_class(cp);
        if let Some(sp) = starter {
            let blocked = match last_cc {
                None => false,
                Some(prev) => contiguous || prev == 0 || prev >= cc,
            };
            if !blocked {
                if let Some(composite) = compose_pair(buf[sp], cp) {
                    buf[sp] = composite;
                    continue;
                }
            }
        }
        if cc == 0 {
            starter = Some(len);
            last_cc = None;
        } else {
            last_cc = Some(cc);
        }
        buf[len] = cp;
        len += 1;
    }
    buf.truncate(len);
}

// === Entry points ===

/// Normalize a codepoint sequence.
pub fn normalize_cps(input: &[CodePoint], form: NormForm) -> Result<Vec<CodePoint>, NormalizeError> {
    let mut buf = decompose(input, form.is_compat())?;
    if form.reorders() {
        reorder(&mut buf);
    }
    if form.composes() {
        compose(&mut buf, form == NormForm::Fcc);
    }
    Ok(buf)
}

/// Decode a UTF-8 buffer, keeping encoding and allocation failures apart.
pub(crate) fn decode(buf: &[u8]) -> Result<Vec<CodePoint>, NormalizeError> {
    utf8::decode_all(buf).map_err(|err| match err {
        IdentError::Memory => NormalizeError::Memory,
        _ => NormalizeError::Encoding,
    })
}

pub(crate) fn to_string(cps: &[CodePoint]) -> Result<String, NormalizeError> {
    let mut len = 0usize;
    for &cp in cps {
        len += char::from_u32(cp).ok_or(NormalizeError::Encoding)?.len_utf8();
    }
    let mut out = String::new();
    out.try_reserve_exact(len)?;
    for &cp in cps {
        if !utf8::push_utf8(&mut out, cp) {
            return Err(NormalizeError::Encoding);
        }
    }
    Ok(out)
}

/// Normalize a UTF-8 buffer into an owned string.
pub fn normalize(buf: &[u8], form: NormForm) -> Result<String, NormalizeError> {
    let cps = decode(buf)?;
    let out = normalize_cps(&cps, form)?;
    to_string(&out)
}

pub fn normalize_str(s: &str, form: NormForm) -> Result<String, NormalizeError> {
    normalize(s.as_bytes(), form)
}

/// Is the buffer already in `form`?
pub fn is_normalized(buf: &[u8], form: NormForm) -> Result<bool, NormalizeError> {
    let cps = decode(buf)?;
    if !cps.iter().any(|&cp| maybe_unnormalized(cp, form)) {
        return Ok(true);
    }
    Ok(normalize_cps(&cps, form)? == cps)
}

fn has_decomposition(cp: CodePoint, compat: bool) -> bool {
    if is_hangul_syllable(cp) {
        return true;
    }
    let ch = match char::from_u32(cp) {
        Some(ch) => ch,
        None => return false,
    };
    let mut count = 0;
    let mut same = true;
    let mut emit = |c: char| {
        count += 1;
        same &= c == ch;
    };
    if compat {
        ucd::decompose_compatible(ch, &mut emit);
    } else {
        ucd::decompose_canonical(ch, &mut emit);
    }
    !(count == 1 && same)
}

/// Quick check: false means `cp` cannot make a string unnormalized in
/// `form`; true means the whole string has to be checked.
pub fn maybe_unnormalized(cp: CodePoint, form: NormForm) -> bool {
    if cp < 0x80 {
        return false;
    }
    if combining_class(cp) != 0 {
        return true;
    }
    if form.composes() {
        // Starters that compose with a preceding character are Maybe too.
        let ch = match char::from_u32(cp) {
            Some(ch) => std::iter::once(ch),
            None => return false,
        };
        let quick = if form.is_compat() {
            is_nfkc_quick(ch)
        } else {
            is_nfc_quick(ch)
        };
        return quick != IsNormalized::Yes;
    }
    has_decomposition(cp, form.is_compat())
}

/// Is the single codepoint unchanged by `form`?
pub fn is_stable_cp(cp: CodePoint, form: NormForm) -> bool {
    if cp < 0x80 || !has_decomposition(cp, form.is_compat()) {
        return true;
    }
    matches!(normalize_cps(&[cp], form), Ok(v) if v.as_slice() == [cp])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(s: &str, form: NormForm) -> String {
        normalize_str(s, form).unwrap()
    }

    #[test]
    fn to_string_reserves_every_byte_up_front() {
        let cps = [0x61, 0xE9, 0x4E00, 0x1F600, 0x10FFFF];
        let s = to_string(&cps).unwrap();
        assert_eq!(s, "a\u{E9}\u{4E00}\u{1F600}\u{10FFFF}");
        assert_eq!(s.len(), 1 + 2 + 3 + 4 + 4);
        assert_eq!(s.capacity(), s.len());
        assert_eq!(to_string(&[0x61, 0xD800]), Err(NormalizeError::Encoding));
    }

    #[test]
    fn decode_reports_encoding_errors() {
        assert_eq!(decode("a\u{E9}".as_bytes()), Ok(vec![0x61, 0xE9]));
        assert_eq!(decode(&[0x61, 0xC3]), Err(NormalizeError::Encoding));
    }

    #[test]
    fn compose_and_decompose_latin() {
        assert_eq!(norm("e\u{301}", NormForm::Nfc), "\u{E9}");
        assert_eq!(norm("\u{E9}", NormForm::Nfd), "e\u{301}");
        assert_eq!(norm("caf\u{E9}", NormForm::Nfc), "caf\u{E9}");
    }

    #[test]
    fn hangul_arithmetic() {
        // GA + jamo trailing K
        assert_eq!(norm("\u{AC01}", NormForm::Nfd), "\u{1100}\u{1161}\u{11A8}");
        assert_eq!(norm("\u{1100}\u{1161}\u{11A8}", NormForm::Nfc), "\u{AC01}");
        assert_eq!(norm("\u{1100}\u{1161}", NormForm::Nfc), "\u{AC00}");
        assert_eq!(compose_pair(0xAC01, 0x11A8), None);
    }

    #[test]
    fn reorder_by_class() {
        // ogonek (202) sorts before acute (230)
        assert_eq!(norm("a\u{301}\u{328}", NormForm::Nfd), "a\u{328}\u{301}");
        // FCD keeps the original order
        assert_eq!(norm("a\u{301}\u{328}", NormForm::Fcd), "a\u{301}\u{328}");
    }

    #[test]
    fn exclusions_stay_decomposed() {
        // DEVANAGARI LETTER QA is a composition exclusion
        assert_eq!(norm("\u{958}", NormForm::Nfc), "\u{915}\u{93C}");
    }

    #[test]
    fn fcc_requires_contiguous() {
        // horn (216) does not compose with 'a', acute (230) behind it does
        assert_eq!(norm("a\u{31B}\u{301}", NormForm::Nfc), "\u{E1}\u{31B}");
        assert_eq!(norm("a\u{31B}\u{301}", NormForm::Fcc), "a\u{31B}\u{301}");
    }

    #[test]
    fn blocked_by_equal_class() {
        // second acute is blocked by the first
        assert_eq!(norm("a\u{301}\u{301}", NormForm::Nfc), "\u{E1}\u{301}");
        assert_eq!(norm("a\u{300}\u{301}", NormForm::Nfc), "\u{E0}\u{301}");
    }

    #[test]
    fn compatibility_forms() {
        assert_eq!(norm("\u{FB01}", NormForm::Nfkc), "fi");
        assert_eq!(norm("\u{FB01}", NormForm::Nfc), "\u{FB01}");
        assert_eq!(norm("\u{2460}", NormForm::Nfkd), "1");
    }

    #[test]
    fn encoding_errors() {
        assert_eq!(normalize(&[0x61, 0xFF], NormForm::Nfc), Err(NormalizeError::Encoding));
        assert_eq!(IdentError::from(NormalizeError::Memory), IdentError::Memory);
        assert_eq!(NormalizeError::Encoding.code(), ERR_ENCODING);
    }

    #[test]
    fn quick_check() {
        assert!(!maybe_unnormalized('a' as u32, NormForm::Nfc));
        assert!(maybe_unnormalized(0x301, NormForm::Nfc));
        assert!(!maybe_unnormalized(0xE9, NormForm::Nfc));
        assert!(maybe_unnormalized(0xE9, NormForm::Nfd));
        assert!(maybe_unnormalized(0x1161, NormForm::Nfc));
        // Bengali AU length mark composes with a preceding vowel sign
        assert!(maybe_unnormalized(0x9D7, NormForm::Nfc));
        assert!(maybe_unnormalized(0xFB01, NormForm::Nfkc));
        assert!(!maybe_unnormalized(0xFB01, NormForm::Nfc));
        assert!(is_normalized("caf\u{E9}".as_bytes(), NormForm::Nfc).unwrap());
        assert!(!is_normalized("cafe\u{301}".as_bytes(), NormForm::Nfc).unwrap());
    }

    #[test]
    fn stable_codepoints() {
        assert!(is_stable_cp(0xE9, NormForm::Nfc));
        assert!(!is_stable_cp(0xE9, NormForm::Nfd));
        assert!(!is_stable_cp(0xFB01, NormForm::Nfkc));
        assert!(!is_stable_cp(0x958, NormForm::Nfc));
    }
}
