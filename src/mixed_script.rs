// mixed_script.rs - Per-identifier mixed-script state machine.
//
// Walks the codepoints of one identifier, gates each through the selected
// identifier class and enforces the restriction profile against the
// scripts already recorded in the active context. First failure wins.

use log::trace;
use smallvec::SmallVec;

use crate::context::Context;
use crate::encodings::utf8;
use crate::identifier::*;
use crate::normalize;
use crate::unicode::*;

/// At most this many consecutive non-spacing marks (UTS #39 5.4).
pub const MAX_NONSPACING_MARKS: u32 = 4;

/// Outcome of one check: a result code plus the normalized spelling when
/// the identifier needed normalization and the caller asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checked {
    pub code: i32,
    pub normalized: Option<String>,
}

impl Checked {
    fn code(code: i32) -> Self {
        Checked {
            code,
            normalized: None,
        }
    }
}

/// Track the run of non-spacing marks. A spacing mark ends the run.
/// False once the run grows past `MAX_NONSPACING_MARKS`.
#[inline]
fn count_mark(run: &mut u32, nonspacing: bool) -> bool {
    if nonspacing {
        *run += 1;
        *run <= MAX_NONSPACING_MARKS
    } else {
        *run = 0;
        true
    }
}

// === Script sets ===

const JAPANESE: [ScriptIdx; 3] = [SC_HAN, SC_HIRAGANA, SC_KATAKANA];
const CHINESE: [ScriptIdx; 2] = [SC_HAN, SC_BOPOMOFO];
const KOREAN: [ScriptIdx; 2] = [SC_HAN, SC_HANGUL];
const KANA: [ScriptIdx; 2] = [SC_HIRAGANA, SC_KATAKANA];
const CJK: [ScriptIdx; 5] = [SC_BOPOMOFO, SC_HAN, SC_HANGUL, SC_HIRAGANA, SC_KATAKANA];

type Scripts = SmallVec<[ScriptIdx; 8]>;

fn subset_of(set: &[ScriptIdx], of: &[ScriptIdx]) -> bool {
    set.iter().all(|sc| of.contains(sc))
}

/// One script, or one of the Han unions (Japanese, Chinese, Korean).
fn is_single_script(set: &[ScriptIdx]) -> bool {
    set.len() <= 1 || subset_of(set, &JAPANESE) || subset_of(set, &CHINESE) || subset_of(set, &KOREAN)
}

fn without_latin(set: &[ScriptIdx]) -> Scripts {
    set.iter().copied().filter(|&sc| sc != SC_LATIN).collect()
}

fn is_highly_restrictive(set: &[ScriptIdx]) -> bool {
    if is_single_script(set) {
        return true;
    }
    let others = without_latin(set);
    others.len() < set.len() && subset_of(&others, &CJK) && is_single_script(&others)
}

fn is_moderately_restrictive(set: &[ScriptIdx]) -> bool {
    if is_highly_restrictive(set) {
        return true;
    }
    let others = without_latin(set);
    others.len() + 1 == set.len()
        && others.len() == 1
        && others[0] != SC_GREEK
        && others[0] != SC_CYRILLIC
}

// === Validator ===

/// Restriction profile plus the class predicates chosen for it.
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    profile: IdentifierProfile,
    start: ClassPredicate,
    cont: ClassPredicate,
}

impl Validator {
    pub fn new(profile: IdentifierProfile) -> Self {
        let (start, cont) = class_predicates(profile.class);
        Validator {
            profile,
            start,
            cont,
        }
    }

    #[inline]
    pub fn profile(&self) -> &IdentifierProfile {
        &self.profile
    }

    fn gate(&self, cp: CodePoint, first: bool) -> bool {
        let ok = if first {
            (self.start)(cp)
        } else {
            (self.cont)(cp) || (self.start)(cp)
        };
        if !ok {
            return false;
        }
        if self.profile.check_xid() {
            let (xs, xc) = class_predicates(IdClass::Xid);
            return if first { xs(cp) } else { xc(cp) };
        }
        true
    }

    /// Judge a script that is new to the context. `EOK` or an error code.
    fn admit(&self, ctx: &Context, sc: ScriptIdx, cp: CodePoint) -> i32 {
        if is_limited_use(sc) && !ctx.is_declared(sc) {
            return ERR_SCRIPT;
        }
        if ctx.count() == 0 {
            return EOK;
        }
        let latin = ctx.has_script(SC_LATIN);
        let cjk_ok = match sc {
            SC_BOPOMOFO => ctx.has_han || latin,
            SC_HAN => ctx.is_chinese || ctx.is_japanese || ctx.is_korean || latin,
            SC_HIRAGANA | SC_KATAKANA => ctx.is_japanese || ctx.has_han || latin,
            _ => true,
        };
        if !cjk_ok {
            return ERR_SCRIPTS;
        }

        let mut set: Scripts = ctx.scripts().iter().collect();
        set.push(sc);
        let allowed = match self.profile.profile {
            Profile::Ascii | Profile::SingleScript => is_single_script(&set),
            Profile::HighlyRestrictive => is_highly_restrictive(&set),
            Profile::ModeratelyRestrictive => is_moderately_restrictive(&set),
            Profile::MinimallyRestrictive | Profile::Unrestricted | Profile::C11 => true,
            Profile::SafeC23 => {
                if set.contains(&SC_CYRILLIC) {
                    false
                } else if without_latin(&set).len() > 2 {
                    false
                } else if set.contains(&SC_GREEK)
                    && set.contains(&SC_LATIN)
                    && is_greek_latin_confusable(cp)
                {
                    return ERR_CONFUS;
                } else {
                    true
                }
            }
        };
        if allowed {
            EOK
        } else {
            ERR_SCRIPTS
        }
    }

    /// Check one identifier against the profile and the active context.
    pub fn check(&self, ctx: &mut Context, buf: &[u8], want_normalized: bool) -> Checked {
        let result = self.walk(ctx, buf);
        let (code, maybe_unnormalized) = match result {
            Ok(state) => state,
            Err((code, cp)) => {
                ctx.last_failed_cp = cp;
                trace!("rejected identifier (code {}, U+{:04X})", code, cp);
                return Checked::code(code);
            }
        };
        if !maybe_unnormalized {
            return Checked::code(code);
        }
        match normalize::normalize(buf, self.profile.norm) {
            Ok(norm) if norm.as_bytes() != buf => Checked {
                code: code | EOK_NORM,
                normalized: want_normalized.then_some(norm),
            },
            Ok(_) => Checked::code(code),
            Err(err) => Checked::code(err.code()),
        }
    }

    /// The codepoint walk. Ok carries the success code so far and whether
    /// any codepoint may need normalization; Err carries the error code and
    /// the offending codepoint.
    fn walk(&self, ctx: &mut Context, buf: &[u8]) -> Result<(i32, bool), (i32, CodePoint)> {
        let profile = self.profile;
        let mut code = EOK;
        let mut maybe_norm = false;
        let mut pos = 0;
        let mut first = true;
        let mut last: CodePoint = 0;
        let mut base_sc = SC_UNKNOWN;
        let mut last_mark: CodePoint = 0;
        let mut mark_run = 0u32;

        if buf.is_empty() {
            return Err((ERR_XID, 0));
        }

        while pos < buf.len() {
            let cp = utf8::decode(buf, &mut pos);
            if cp == 0 {
                return Err((ERR_ENCODING, 0));
            }
            if profile.profile == Profile::Ascii && cp >= 0x80 {
                return Err((ERR_SCRIPT, cp));
            }
            if !self.gate(cp, first) {
                return Err((ERR_XID, cp));
            }
            first = false;
            last = cp;
            if !maybe_norm && normalize::maybe_unnormalized(cp, profile.norm) {
                maybe_norm = true;
            }
            if !profile.profile.checks_scripts() {
                continue;
            }

            if cp > 0x7F
                && (profile.error_confusables() || profile.warn_confusables())
                && is_confusable(cp)
            {
                if profile.error_confusables() {
                    return Err((ERR_CONFUS, cp));
                }
                code |= EOK_WARN_CONFUS;
            }

            let mut sc = get_script(cp);
            if is_excluded(sc) {
                return Err((ERR_SCRIPT, cp));
            }
            if is_bidi_control(cp) && !ctx.is_rtl {
                return Err((ERR_SCRIPT, cp));
            }

            let gc = get_general_category(cp);
            let nonspacing = matches!(gc, GeneralCategory::Mn | GeneralCategory::Me);

            if sc == SC_COMMON || sc == SC_INHERITED {
                let scx = match get_scx(cp) {
                    Some(scx) => scx,
                    None => {
                        if gc.is_mark() {
                            if !count_mark(&mut mark_run, nonspacing) {
                                return Err((ERR_COMBINE, cp));
                            }
                            last_mark = cp;
                        } else {
                            mark_run = 0;
                            last_mark = 0;
                            base_sc = sc;
                        }
                        continue;
                    }
                };
                if subset_of(&scx, &KANA) {
                    if !ctx.is_japanese {
                        return Err((ERR_SCRIPTS, cp));
                    }
                } else if subset_of(&scx, &CJK) && !(ctx.has_han || ctx.is_japanese || ctx.is_korean) {
                    return Err((ERR_SCRIPTS, cp));
                }
                if gc.is_mark() {
                    if base_sc == SC_UNKNOWN || !scx.contains(&base_sc) || cp == last_mark {
                        return Err((ERR_COMBINE, cp));
                    }
                    if !count_mark(&mut mark_run, nonspacing) {
                        return Err((ERR_COMBINE, cp));
                    }
                    last_mark = cp;
                    continue;
                }
                mark_run = 0;
                last_mark = 0;
                match scx.iter().copied().find(|&s| ctx.has_script(s)) {
                    Some(seen) => {
                        base_sc = seen;
                        continue;
                    }
                    None => match scx.iter().copied().find(|&s| !is_excluded(s)) {
                        Some(first) => sc = first,
                        None => return Err((ERR_SCRIPT, cp)),
                    },
                }
            } else if gc.is_mark() {
                if !count_mark(&mut mark_run, nonspacing) {
                    return Err((ERR_COMBINE, cp));
                }
                last_mark = cp;
            } else {
                mark_run = 0;
                last_mark = 0;
            }
            if !gc.is_mark() {
                base_sc = sc;
            }

            if ctx.has_script(sc) {
                if profile.profile == Profile::SafeC23
                    && sc == SC_GREEK
                    && ctx.has_script(SC_LATIN)
                    && is_greek_latin_confusable(cp)
                {
                    return Err((ERR_CONFUS, cp));
                }
                continue;
            }
            match self.admit(ctx, sc, cp) {
                EOK => ctx.record(sc),
                err => return Err((err, cp)),
            }
        }

        if is_medial(last) {
            return Err((ERR_XID, last));
        }
        Ok((code, maybe_norm))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator(profile: Profile) -> Validator {
        Validator::new(IdentifierProfile::new(profile, NormForm::Nfc, Options::empty()))
    }

    fn run(v: &Validator, ctx: &mut Context, s: &str) -> i32 {
        v.check(ctx, s.as_bytes(), false).code
    }

    #[test]
    fn set_predicates() {
        assert!(is_single_script(&[SC_HAN, SC_KATAKANA]));
        assert!(!is_single_script(&[SC_HANGUL, SC_KATAKANA]));
        assert!(is_highly_restrictive(&[SC_LATIN, SC_HAN, SC_HIRAGANA]));
        assert!(!is_highly_restrictive(&[SC_LATIN, SC_GREEK]));
        assert!(is_moderately_restrictive(&[SC_LATIN, SC_ARABIC]));
        assert!(!is_moderately_restrictive(&[SC_LATIN, SC_CYRILLIC]));
        assert!(!is_moderately_restrictive(&[SC_LATIN, SC_ARABIC, SC_HEBREW]));
    }

    #[test]
    fn latin_is_fine() {
        let v = validator(Profile::ModeratelyRestrictive);
        let mut ctx = Context::new();
        assert_eq!(run(&v, &mut ctx, "caf\u{E9}"), EOK);
        assert!(ctx.has_script(SC_LATIN));
    }

    #[test]
    fn empty_and_bad_utf8() {
        let v = validator(Profile::ModeratelyRestrictive);
        let mut ctx = Context::new();
        assert_eq!(v.check(&mut ctx, b"", false).code, ERR_XID);
        assert_eq!(v.check(&mut ctx, &[b'a', 0xC3], false).code, ERR_ENCODING);
    }

    #[test]
    fn needs_normalization() {
        let v = validator(Profile::ModeratelyRestrictive);
        let mut ctx = Context::new();
        let out = v.check(&mut ctx, "cafe\u{301}".as_bytes(), true);
        assert_eq!(out.code, EOK_NORM);
        assert_eq!(out.normalized.as_deref(), Some("caf\u{E9}"));
        let out = v.check(&mut ctx, "cafe\u{301}".as_bytes(), false);
        assert_eq!(out, Checked { code: EOK_NORM, normalized: None });
    }

    #[test]
    fn mark_run_limit() {
        let v = validator(Profile::ModeratelyRestrictive);
        let mut ctx = Context::new();
        assert_eq!(run(&v, &mut ctx, "a\u{300}\u{301}\u{302}\u{303}"), EOK_NORM);
        assert_eq!(run(&v, &mut ctx, "a\u{301}\u{301}\u{301}\u{301}\u{301}"), ERR_COMBINE);
        assert_eq!(ctx.last_failed_cp, 0x301);
    }

    #[test]
    fn spacing_mark_ends_mark_run() {
        let v = validator(Profile::MinimallyRestrictive);
        let mut ctx = Context::new();
        // ka, candrabindu x2, visarga, candrabindu x3
        let split = "\u{915}\u{901}\u{901}\u{903}\u{901}\u{901}\u{901}";
        assert_eq!(run(&v, &mut ctx, split), EOK);
        let long = "\u{915}\u{901}\u{903}\u{901}\u{901}\u{901}\u{901}\u{901}";
        assert_eq!(run(&v, &mut ctx, long), ERR_COMBINE);
        let mut run_len = 0;
        assert!(count_mark(&mut run_len, true));
        assert!(count_mark(&mut run_len, false));
        assert_eq!(run_len, 0);
    }

    #[test]
    fn excluded_script_extension_rejected() {
        let v = validator(Profile::MinimallyRestrictive);
        let mut ctx = Context::new();
        // VEDIC SIGN DOUBLE ANUSVARA ANTARGOMUKHA: Common, scx Nandinagari
        assert_eq!(run(&v, &mut ctx, "a\u{1CFA}"), ERR_SCRIPT);
        assert_eq!(ctx.last_failed_cp, 0x1CFA);
        assert!(!ctx.has_script(script_by_name("Nandinagari").unwrap()));
        assert_eq!(ctx.existing_scripts(), "Latin");
    }

    #[test]
    fn medial_not_last() {
        let v = validator(Profile::MinimallyRestrictive);
        let mut ctx = Context::new();
        assert_eq!(run(&v, &mut ctx, "l\u{B7}l"), EOK);
        assert_eq!(run(&v, &mut ctx, "l\u{B7}"), ERR_XID);
    }

    #[test]
    fn unrestricted_skips_scripts() {
        let v = validator(Profile::Unrestricted);
        let mut ctx = Context::new();
        assert_eq!(run(&v, &mut ctx, "\u{430}lpha"), EOK);
        assert_eq!(ctx.count(), 0);
    }
}
