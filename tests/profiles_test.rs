// profiles_test.rs - Restriction profiles, identifier classes and mark rules.

use ferrident::prelude::*;

fn engine(profile: Profile) -> Engine {
    Engine::builder().profile(profile).build()
}

fn check(engine: &mut Engine, s: &str) -> i32 {
    engine.check_buf(s.as_bytes())
}

const GREEK_BETA: &str = "\u{3B2}\u{3B7}\u{3C4}\u{3B1}";
const CYRILLIC_BE: &str = "\u{431}\u{435}";
const HAN: &str = "\u{6F22}\u{5B57}";
const HIRAGANA: &str = "\u{3072}\u{3089}";
const KATAKANA: &str = "\u{30AB}\u{30BF}";
const HANGUL: &str = "\u{D55C}";
const ARABIC: &str = "\u{628}";
const HEBREW: &str = "\u{5D0}";

// === ASCII ===

#[test]
fn ascii_profile() {
    let mut e = engine(Profile::Ascii);
    assert_eq!(e.profile().class, IdClass::Ascii);
    assert_eq!(check(&mut e, "cafe"), EOK);
    assert_eq!(check(&mut e, "caf\u{E9}"), ERR_SCRIPT);
    assert_eq!(e.failed_codepoint(0), Some(0xE9));
    assert_eq!(check(&mut e, "a$"), ERR_XID);
}

// === Single script ===

#[test]
fn single_script_rejects_second_script() {
    let mut e = engine(Profile::SingleScript);
    assert_eq!(check(&mut e, "alpha"), EOK);
    assert_eq!(check(&mut e, HAN), ERR_SCRIPTS);
    assert_eq!(check(&mut e, GREEK_BETA), ERR_SCRIPTS);
}

#[test]
fn single_script_accepts_japanese_union() {
    let mut e = engine(Profile::SingleScript);
    assert_eq!(check(&mut e, HAN), EOK);
    assert_eq!(check(&mut e, HIRAGANA), EOK);
    assert_eq!(check(&mut e, KATAKANA), EOK);
    assert_eq!(check(&mut e, HANGUL), ERR_SCRIPTS);
}

#[test]
fn single_script_within_one_identifier() {
    let mut e = engine(Profile::SingleScript);
    assert_eq!(check(&mut e, "\u{430}lpha"), ERR_SCRIPTS);
    assert_eq!(e.failed_codepoint(0), Some(u32::from('l')));
}

// === Highly restrictive ===

#[test]
fn highly_restrictive_latin_plus_cjk() {
    let mut e = engine(Profile::HighlyRestrictive);
    assert_eq!(check(&mut e, "alpha"), EOK);
    assert_eq!(check(&mut e, HAN), EOK);
    assert_eq!(check(&mut e, HIRAGANA), EOK);
    assert_eq!(check(&mut e, HANGUL), ERR_SCRIPTS);
}

#[test]
fn highly_restrictive_rejects_arabic_next_to_latin() {
    let mut e = engine(Profile::HighlyRestrictive);
    assert_eq!(check(&mut e, "alpha"), EOK);
    assert_eq!(check(&mut e, ARABIC), ERR_SCRIPTS);
}

// === Moderately restrictive ===

#[test]
fn moderately_restrictive_basics() {
    let mut e = engine(Profile::ModeratelyRestrictive);
    assert_eq!(check(&mut e, "caf\u{E9}"), EOK);
    assert_eq!(check(&mut e, ARABIC), EOK);
    assert_eq!(check(&mut e, HEBREW), ERR_SCRIPTS);
}

#[test]
fn moderately_restrictive_rejects_greek_and_cyrillic() {
    let mut e = engine(Profile::ModeratelyRestrictive);
    assert_eq!(check(&mut e, "alpha"), EOK);
    assert_eq!(check(&mut e, GREEK_BETA), ERR_SCRIPTS);
    assert_eq!(check(&mut e, CYRILLIC_BE), ERR_SCRIPTS);
    assert_eq!(e.existing_scripts(0).as_deref(), Some("Latin"));
}

#[test]
fn cyrillic_a_in_latin_word() {
    let mut e = engine(Profile::ModeratelyRestrictive);
    assert_eq!(check(&mut e, "\u{430}lpha"), ERR_SCRIPTS);
}

#[test]
fn failed_identifier_still_records_earlier_scripts() {
    let mut e = engine(Profile::ModeratelyRestrictive);
    assert_eq!(check(&mut e, "\u{430}lpha"), ERR_SCRIPTS);
    assert!(e.context(0).unwrap().has_script(ferrident::unicode::SC_CYRILLIC));
}

// === Minimally restrictive ===

#[test]
fn minimally_restrictive_mixes_recommended_scripts() {
    let mut e = engine(Profile::MinimallyRestrictive);
    assert_eq!(check(&mut e, "alpha"), EOK);
    assert_eq!(check(&mut e, GREEK_BETA), EOK);
    assert_eq!(check(&mut e, CYRILLIC_BE), EOK);
    assert_eq!(check(&mut e, ARABIC), EOK);
    assert_eq!(e.existing_scripts(0).as_deref(), Some("Latin, Greek, Cyrillic, Arabic"));
}

#[test]
fn minimally_restrictive_still_rejects_excluded() {
    let mut e = engine(Profile::MinimallyRestrictive);
    assert_eq!(check(&mut e, "\u{16A0}"), ERR_SCRIPT);
}

#[test]
fn excluded_script_extension_is_rejected() {
    let mut e = engine(Profile::MinimallyRestrictive);
    // Common codepoint used only by Nandinagari
    assert_eq!(check(&mut e, "a\u{1CFA}"), ERR_SCRIPT);
    assert_eq!(e.failed_codepoint(0), Some(0x1CFA));
    assert_eq!(e.existing_scripts(0).as_deref(), Some("Latin"));
}

// === Unrestricted and C11 ===

#[test]
fn unrestricted_only_gates_the_class() {
    let mut e = engine(Profile::Unrestricted);
    assert_eq!(check(&mut e, "\u{430}lpha"), EOK);
    assert_eq!(check(&mut e, "\u{16A0}"), EOK);
    assert_eq!(check(&mut e, "1x"), ERR_XID);
}

#[test]
fn c11_profile() {
    let mut e = engine(Profile::C11);
    assert_eq!(e.profile().class, IdClass::C11);
    assert_eq!(check(&mut e, "\u{430}lpha"), EOK);
    assert_eq!(check(&mut e, "\u{301}x"), ERR_XID);
    assert_eq!(check(&mut e, "e\u{301}"), EOK_NORM);
    assert_eq!(check(&mut e, "x\u{301}"), EOK);
}

// === SafeC23 ===

#[test]
fn safec23_greek_confusable_next_to_latin() {
    let mut e = engine(Profile::SafeC23);
    assert_eq!(check(&mut e, "alpha"), EOK);
    // Greek omicron looks like Latin o
    assert_eq!(check(&mut e, "\u{3BF}mega"), ERR_CONFUS);
    assert_eq!(e.failed_codepoint(0), Some(0x3BF));
}

#[test]
fn safec23_allows_greek_with_latin() {
    let mut e = engine(Profile::SafeC23);
    assert_eq!(check(&mut e, "alpha"), EOK);
    assert_eq!(check(&mut e, "\u{3B2}\u{3B4}"), EOK);
    // Greek is known now; a confusable letter is still caught
    assert_eq!(check(&mut e, "\u{3B2}\u{3BF}"), ERR_CONFUS);
}

#[test]
fn safec23_rejects_cyrillic_mixing() {
    let mut e = engine(Profile::SafeC23);
    assert_eq!(check(&mut e, "alpha"), EOK);
    assert_eq!(check(&mut e, CYRILLIC_BE), ERR_SCRIPTS);
}

#[test]
fn safec23_at_most_two_other_scripts() {
    let mut e = engine(Profile::SafeC23);
    assert_eq!(check(&mut e, "\u{3B2}\u{3B4}"), EOK);
    assert_eq!(check(&mut e, ARABIC), EOK);
    assert_eq!(check(&mut e, HEBREW), ERR_SCRIPTS);
}

// === Identifier classes ===

#[test]
fn digit_start_fails_for_every_class() {
    for class in IdClass::ALL {
        let mut e = Engine::builder()
            .profile(Profile::MinimallyRestrictive)
            .id_class(class)
            .build();
        assert_eq!(check(&mut e, "1abc"), ERR_XID, "class {}", class);
        assert_eq!(check(&mut e, "abc1"), EOK, "class {}", class);
    }
}

#[test]
fn underscore_start_for_every_class() {
    for class in IdClass::ALL {
        let mut e = Engine::builder().id_class(class).build();
        assert_eq!(check(&mut e, "_x"), EOK, "class {}", class);
    }
}

#[test]
fn allutf8_accepts_symbols_unless_xid_checked() {
    let mut e = Engine::builder().id_class(IdClass::AllUtf8).build();
    assert_eq!(check(&mut e, "a\u{A9}"), EOK);
    let mut e = Engine::builder()
        .id_class(IdClass::AllUtf8)
        .check_xid(true)
        .build();
    assert_eq!(check(&mut e, "a\u{A9}"), ERR_XID);
}

#[test]
fn allowed_class_rejects_restricted_letters() {
    let mut e = Engine::builder().id_class(IdClass::Allowed).build();
    assert_eq!(check(&mut e, "a\u{E9}"), EOK);
    // b with stroke: Technical
    assert_eq!(check(&mut e, "a\u{180}"), ERR_XID);
    assert_eq!(e.failed_codepoint(0), Some(0x180));
    // Cyrillic omega: Obsolete
    assert_eq!(check(&mut e, "\u{460}"), ERR_XID);
    assert_eq!(check(&mut e, "a-b"), ERR_XID);
    assert_eq!(check(&mut e, "a\u{B7}b"), EOK);

    let mut e = engine(Profile::SafeC23);
    assert_eq!(check(&mut e, "x\u{18D}"), ERR_XID);

    let mut e = Engine::builder().id_class(IdClass::Xid).build();
    assert_eq!(check(&mut e, "a\u{180}"), EOK);
}

#[test]
fn bidi_controls_need_rtl_context() {
    let mut e = Engine::builder().id_class(IdClass::AllUtf8).build();
    assert_eq!(check(&mut e, "a\u{202E}b"), ERR_SCRIPT);
    let mut e = Engine::builder().id_class(IdClass::AllUtf8).build();
    assert_eq!(check(&mut e, ARABIC), EOK);
    assert_eq!(check(&mut e, "\u{628}\u{200F}"), EOK);
}

#[test]
fn kana_extension_needs_japanese() {
    let mut e = engine(Profile::ModeratelyRestrictive);
    // prolonged sound mark, shared by Hiragana and Katakana
    assert_eq!(check(&mut e, "\u{30FC}"), ERR_SCRIPTS);
    let mut e = engine(Profile::ModeratelyRestrictive);
    assert_eq!(check(&mut e, "\u{30AB}\u{30FC}"), EOK);
}

// === Combining marks ===

#[test]
fn five_acute_accents() {
    let mut e = engine(Profile::ModeratelyRestrictive);
    assert_eq!(check(&mut e, "a\u{301}\u{301}\u{301}\u{301}\u{301}"), ERR_COMBINE);
}

#[test]
fn four_distinct_marks_are_fine() {
    let mut e = engine(Profile::ModeratelyRestrictive);
    assert_eq!(check(&mut e, "a\u{300}\u{301}\u{302}\u{303}"), EOK_NORM);
}

#[test]
fn spacing_mark_splits_nonspacing_run() {
    let mut e = engine(Profile::ModeratelyRestrictive);
    // ka, two candrabindu, visarga, three candrabindu
    assert_eq!(check(&mut e, "\u{915}\u{901}\u{901}\u{903}\u{901}\u{901}\u{901}"), EOK);
    assert_eq!(
        check(&mut e, "\u{915}\u{903}\u{901}\u{901}\u{901}\u{901}\u{901}"),
        ERR_COMBINE
    );
}

// === Confusable options ===

#[test]
fn confusable_codepoints_warn_or_fail() {
    let mut e = Engine::builder()
        .profile(Profile::MinimallyRestrictive)
        .warn_confusables(true)
        .build();
    assert_eq!(check(&mut e, "p\u{430}ypal"), EOK_WARN_CONFUS);
    assert_eq!(check(&mut e, "cafe\u{301}"), EOK_NORM);

    let mut e = Engine::builder()
        .profile(Profile::MinimallyRestrictive)
        .error_confusables(true)
        .build();
    assert_eq!(check(&mut e, "p\u{430}ypal"), ERR_CONFUS);
    assert_eq!(e.failed_codepoint(0), Some(0x430));
}

#[test]
fn nfkc_form_flags_compat_characters() {
    let mut e = Engine::builder()
        .profile(Profile::MinimallyRestrictive)
        .normalization(NormForm::Nfkc)
        .id_class(IdClass::Id)
        .build();
    let (code, norm) = e.check_buf_normalized("\u{FB01}le".as_bytes());
    assert_eq!(code, EOK_NORM);
    assert_eq!(norm.as_deref(), Some("file"));
}
