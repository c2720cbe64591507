// unicode/mod.rs - Property store.
// Script, script extensions, general category, identifier types and the
// identifier-class predicates, all keyed by codepoint.

pub mod scripts;
pub mod tables;

use bitflags::bitflags;
use smallvec::SmallVec;
use unicode_normalization::UnicodeNormalization;
use unicode_script::UnicodeScript;
use unicode_security::GeneralSecurityProfile;

use crate::identifier::*;
use crate::normalize;
pub use scripts::*;
use tables::*;

// === Interval search ===

/// Single-comparison bounds test; `cp - from` wraps for `cp < from`.
#[inline]
fn in_range(cp: CodePoint, from: CodePoint, to: CodePoint) -> bool {
    cp.wrapping_sub(from) <= to - from
}

/// Look up `cp` in a sorted table of disjoint `[from, to] -> value` ranges.
pub fn range_search<V: Copy>(cp: CodePoint, table: &[(CodePoint, CodePoint, V)]) -> Option<V> {
    let mut low = 0usize;
    let mut high = table.len();
    while low < high {
        let mid = (low + high) / 2;
        if cp > table[mid].1 {
            low = mid + 1;
        } else {
            high = mid;
        }
    }
    match table.get(low) {
        Some(&(from, to, value)) if in_range(cp, from, to) => Some(value),
        _ => None,
    }
}

/// Membership test on a sorted table of disjoint `[from, to]` ranges.
pub fn range_contains(cp: CodePoint, table: &[CodeRange]) -> bool {
    let mut low = 0usize;
    let mut high = table.len();
    while low < high {
        let mid = (low + high) / 2;
        if cp > table[mid].1 {
            low = mid + 1;
        } else {
            high = mid;
        }
    }
    match table.get(low) {
        Some(&(from, to)) => in_range(cp, from, to),
        None => false,
    }
}

// === Scripts ===

/// Script extension list: sorted, deduplicated script indices.
pub type ScxList = SmallVec<[ScriptIdx; 4]>;

/// Primary script of `cp`; `SC_UNKNOWN` for unassigned codepoints,
/// surrogates and scripts missing from the index table.
pub fn get_script(cp: CodePoint) -> ScriptIdx {
    match char::from_u32(cp) {
        Some(ch) => script_by_iso(ch.script().short_name()).unwrap_or(SC_UNKNOWN),
        None => SC_UNKNOWN,
    }
}

/// Script extensions of `cp`, or `None` when the script is unambiguous.
pub fn get_scx(cp: CodePoint) -> Option<ScxList> {
    let ch = char::from_u32(cp)?;
    let ext = ch.script_extension();
    if ext.is_empty() || ext.is_common() || ext.is_inherited() {
        return None;
    }
    let mut list: ScxList = ext
        .iter()
        .filter_map(|sc| script_by_iso(sc.short_name()))
        .collect();
    list.sort_unstable();
    list.dedup();
    if list.is_empty() || (list.len() == 1 && list[0] == get_script(cp)) {
        return None;
    }
    Some(list)
}

// === General category ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneralCategory {
    Lu,
    Ll,
    Lt,
    Lm,
    Lo,
    Mn,
    Mc,
    Me,
    Nd,
    Nl,
    No,
    Pc,
    Pd,
    Ps,
    Pe,
    Pi,
    Pf,
    Po,
    Sm,
    Sc,
    Sk,
    So,
    Zs,
    Zl,
    Zp,
    Cc,
    Cf,
    Cs,
    Co,
    Cn,
}

impl GeneralCategory {
    #[inline]
    pub fn is_mark(self) -> bool {
        matches!(self, GeneralCategory::Mn | GeneralCategory::Mc | GeneralCategory::Me)
    }

    #[inline]
    pub fn is_letter(self) -> bool {
        matches!(
            self,
            GeneralCategory::Lu
                | GeneralCategory::Ll
                | GeneralCategory::Lt
                | GeneralCategory::Lm
                | GeneralCategory::Lo
        )
    }
}

#[allow(unreachable_patterns)]
pub fn get_general_category(cp: CodePoint) -> GeneralCategory {
    use unicode_general_category::GeneralCategory as G;

    let ch = match char::from_u32(cp) {
        Some(ch) => ch,
        None if (0xD800..=0xDFFF).contains(&cp) => return GeneralCategory::Cs,
        None => return GeneralCategory::Cn,
    };
    match unicode_general_category::get_general_category(ch) {
        G::UppercaseLetter => GeneralCategory::Lu,
        G::LowercaseLetter => GeneralCategory::Ll,
        G::TitlecaseLetter => GeneralCategory::Lt,
        G::ModifierLetter => GeneralCategory::Lm,
        G::OtherLetter => GeneralCategory::Lo,
        G::NonspacingMark => GeneralCategory::Mn,
        G::SpacingMark => GeneralCategory::Mc,
        G::EnclosingMark => GeneralCategory::Me,
        G::DecimalNumber => GeneralCategory::Nd,
        G::LetterNumber => GeneralCategory::Nl,
        G::OtherNumber => GeneralCategory::No,
        G::ConnectorPunctuation => GeneralCategory::Pc,
        G::DashPunctuation => GeneralCategory::Pd,
        G::OpenPunctuation => GeneralCategory::Ps,
        G::ClosePunctuation => GeneralCategory::Pe,
        G::InitialPunctuation => GeneralCategory::Pi,
        G::FinalPunctuation => GeneralCategory::Pf,
        G::OtherPunctuation => GeneralCategory::Po,
        G::MathSymbol => GeneralCategory::Sm,
        G::CurrencySymbol => GeneralCategory::Sc,
        G::ModifierSymbol => GeneralCategory::Sk,
        G::OtherSymbol => GeneralCategory::So,
        G::SpaceSeparator => GeneralCategory::Zs,
        G::LineSeparator => GeneralCategory::Zl,
        G::ParagraphSeparator => GeneralCategory::Zp,
        G::Control => GeneralCategory::Cc,
        G::Format => GeneralCategory::Cf,
        G::Surrogate => GeneralCategory::Cs,
        G::PrivateUse => GeneralCategory::Co,
        G::Unassigned => GeneralCategory::Cn,
        _ => GeneralCategory::Cn,
    }
}

// === Identifier types (UTS #39) ===

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct IdTypes: u16 {
        const RECOMMENDED = 1 << 0;
        const INCLUSION = 1 << 1;
        const LIMITED_USE = 1 << 2;
        const TECHNICAL = 1 << 3;
        const UNCOMMON_USE = 1 << 4;
        const OBSOLETE = 1 << 5;
        const EXCLUSION = 1 << 6;
        const NOT_XID = 1 << 7;
        const NOT_NFKC = 1 << 8;
        const DEFAULT_IGNORABLE = 1 << 9;
        const DEPRECATED = 1 << 10;
        const NOT_CHARACTER = 1 << 11;
    }
}

const IDTYPE_NAMES: [(IdTypes, &str); 12] = [
    (IdTypes::RECOMMENDED, "Recommended"),
    (IdTypes::INCLUSION, "Inclusion"),
    (IdTypes::LIMITED_USE, "Limited_Use"),
    (IdTypes::TECHNICAL, "Technical"),
    (IdTypes::UNCOMMON_USE, "Uncommon_Use"),
    (IdTypes::OBSOLETE, "Obsolete"),
    (IdTypes::EXCLUSION, "Exclusion"),
    (IdTypes::NOT_XID, "Not_XID"),
    (IdTypes::NOT_NFKC, "Not_NFKC"),
    (IdTypes::DEFAULT_IGNORABLE, "Default_Ignorable"),
    (IdTypes::DEPRECATED, "Deprecated"),
    (IdTypes::NOT_CHARACTER, "Not_Character"),
];

/// Identifier type of `cp` from the UTS #39 IdentifierType data.
///
/// unicode-security keeps one type per codepoint, so exactly one flag is
/// set. Codepoints the data does not list (unassigned, surrogates,
/// noncharacters) are Not_Character.
pub fn get_idtypes(cp: CodePoint) -> IdTypes {
    use unicode_security::general_security_profile::IdentifierType as T;

    match char::from_u32(cp).and_then(|ch| ch.identifier_type()) {
        None | Some(T::Not_Character) => IdTypes::NOT_CHARACTER,
        Some(T::Deprecated) => IdTypes::DEPRECATED,
        Some(T::Default_Ignorable) => IdTypes::DEFAULT_IGNORABLE,
        Some(T::Not_NFKC) => IdTypes::NOT_NFKC,
        Some(T::Not_XID) => IdTypes::NOT_XID,
        Some(T::Exclusion) => IdTypes::EXCLUSION,
        Some(T::Obsolete) => IdTypes::OBSOLETE,
        Some(T::Technical) => IdTypes::TECHNICAL,
        Some(T::Uncommon_Use) => IdTypes::UNCOMMON_USE,
        Some(T::Limited_Use) => IdTypes::LIMITED_USE,
        Some(T::Inclusion) => IdTypes::INCLUSION,
        Some(T::Recommended) => IdTypes::RECOMMENDED,
    }
}

/// Space-separated type names, in UTS #39 order.
pub fn idtype_names(types: IdTypes) -> String {
    IDTYPE_NAMES
        .iter()
        .filter(|(flag, _)| types.contains(*flag))
        .map(|(_, name)| *name)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Identifier_Status=Allowed, i.e. Recommended or Inclusion.
#[inline]
pub fn is_allowed_identifier_char(cp: CodePoint) -> bool {
    char::from_u32(cp).is_some_and(|ch| ch.identifier_allowed())
}

// === Identifier classes ===

pub type ClassPredicate = fn(CodePoint) -> bool;

#[inline]
fn is_underscore(cp: CodePoint) -> bool {
    cp == 0x5F
}

fn xid_start(cp: CodePoint) -> bool {
    is_underscore(cp) || char::from_u32(cp).is_some_and(unicode_ident::is_xid_start)
}

fn xid_continue(cp: CodePoint) -> bool {
    char::from_u32(cp).is_some_and(unicode_ident::is_xid_continue)
}

fn id_start(cp: CodePoint) -> bool {
    xid_start(cp) || range_contains(cp, &ID_START_EXTRA)
}

fn id_continue(cp: CodePoint) -> bool {
    xid_continue(cp) || range_contains(cp, &ID_CONTINUE_EXTRA) || range_contains(cp, &ID_START_EXTRA)
}

fn allowed_start(cp: CodePoint) -> bool {
    xid_start(cp) && is_allowed_identifier_char(cp)
}

// Inclusion also admits punctuation such as `-`, `.` and `:`; only the
// medial ones may continue an identifier.
fn allowed_continue(cp: CodePoint) -> bool {
    is_allowed_identifier_char(cp) && (xid_continue(cp) || is_medial(cp))
}

fn safec23_start(cp: CodePoint) -> bool {
    allowed_start(cp) && normalize::is_stable_cp(cp, NormForm::Nfc)
}

fn safec23_continue(cp: CodePoint) -> bool {
    allowed_continue(cp) && normalize::is_stable_cp(cp, NormForm::Nfc)
}

fn c11_start(cp: CodePoint) -> bool {
    range_contains(cp, &C11_START)
}

fn c11_continue(cp: CodePoint) -> bool {
    range_contains(cp, &C11_CONTINUE)
}

fn allutf8_start(cp: CodePoint) -> bool {
    if cp < 0x80 {
        return range_contains(cp, &ASCII_START);
    }
    get_general_category(cp) != GeneralCategory::Nd
}

fn allutf8_continue(cp: CodePoint) -> bool {
    cp >= 0x80 || range_contains(cp, &ASCII_CONTINUE)
}

fn ascii_start(cp: CodePoint) -> bool {
    range_contains(cp, &ASCII_START)
}

fn ascii_continue(cp: CodePoint) -> bool {
    range_contains(cp, &ASCII_CONTINUE)
}

/// Start and Continue predicates for a class, resolved once per engine.
pub fn class_predicates(class: IdClass) -> (ClassPredicate, ClassPredicate) {
    match class {
        IdClass::Xid => (xid_start, xid_continue),
        IdClass::Id => (id_start, id_continue),
        IdClass::Allowed => (allowed_start, allowed_continue),
        IdClass::SafeC23 => (safec23_start, safec23_continue),
        IdClass::C11 => (c11_start, c11_continue),
        IdClass::AllUtf8 => (allutf8_start, allutf8_continue),
        IdClass::Ascii => (ascii_start, ascii_continue),
    }
}

#[inline]
pub fn is_start(class: IdClass, cp: CodePoint) -> bool {
    (class_predicates(class).0)(cp)
}

#[inline]
pub fn is_continue(class: IdClass, cp: CodePoint) -> bool {
    (class_predicates(class).1)(cp)
}

/// Allowed inside an identifier but not at its end.
#[inline]
pub fn is_medial(cp: CodePoint) -> bool {
    range_contains(cp, &MEDIAL)
}

#[inline]
pub fn is_bidi_control(cp: CodePoint) -> bool {
    range_contains(cp, &BIDI_CONTROLS)
}

#[inline]
pub fn is_greek_latin_confusable(cp: CodePoint) -> bool {
    range_contains(cp, &GREEK_LATIN_CONFUS)
}

// === Confusable prototypes ===

pub type Prototype = SmallVec<[CodePoint; 4]>;

/// Prototype sequence (in NFD) that `cp` maps to in a skeleton, if
/// confusables.txt lists one for it.
pub fn confusable_prototype(cp: CodePoint) -> Option<Prototype> {
    let ch = char::from_u32(cp)?;
    let mut utf8 = [0u8; 4];
    let text: &str = ch.encode_utf8(&mut utf8);
    let proto: Prototype = unicode_security::skeleton(text).map(|c| c as CodePoint).collect();
    // canonical decomposition alone is not a confusable mapping
    let unchanged = proto.iter().copied().eq(text.nfd().map(|c| c as CodePoint));
    (!unchanged).then_some(proto)
}

#[inline]
pub fn is_confusable(cp: CodePoint) -> bool {
    confusable_prototype(cp).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_edges() {
        let table: [(u32, u32, u8); 3] = [(10, 20, 1), (30, 30, 2), (40, 50, 3)];
        assert_eq!(range_search(9, &table), None);
        assert_eq!(range_search(10, &table), Some(1));
        assert_eq!(range_search(20, &table), Some(1));
        assert_eq!(range_search(21, &table), None);
        assert_eq!(range_search(30, &table), Some(2));
        assert_eq!(range_search(50, &table), Some(3));
        assert_eq!(range_search(51, &table), None);
        assert_eq!(range_search(u32::MAX, &table), None);
        assert_eq!(range_search::<u8>(5, &[]), None);
    }

    #[test]
    fn scripts_of_letters() {
        assert_eq!(get_script('a' as u32), SC_LATIN);
        assert_eq!(get_script(0x0430), SC_CYRILLIC);
        assert_eq!(get_script(0x03B1), SC_GREEK);
        assert_eq!(get_script(0x4E00), SC_HAN);
        assert_eq!(get_script('_' as u32), SC_COMMON);
        assert_eq!(get_script(0x0301), SC_INHERITED);
        assert_eq!(get_script(0xD800), SC_UNKNOWN);
        assert_eq!(get_script(0x110000), SC_UNKNOWN);
    }

    #[test]
    fn scx_of_shared_marks() {
        assert_eq!(get_scx('a' as u32), None);
        // KATAKANA-HIRAGANA PROLONGED SOUND MARK
        let scx = get_scx(0x30FC).unwrap();
        assert!(scx.contains(&SC_HIRAGANA));
        assert!(scx.contains(&SC_KATAKANA));
        assert!(scx.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn categories() {
        assert_eq!(get_general_category('A' as u32), GeneralCategory::Lu);
        assert_eq!(get_general_category('7' as u32), GeneralCategory::Nd);
        assert_eq!(get_general_category(0x0301), GeneralCategory::Mn);
        assert_eq!(get_general_category(0xDC00), GeneralCategory::Cs);
        assert!(GeneralCategory::Me.is_mark());
    }

    #[test]
    fn identifier_types() {
        assert_eq!(get_idtypes('a' as u32), IdTypes::RECOMMENDED);
        assert_eq!(get_idtypes('$' as u32), IdTypes::NOT_XID);
        assert_eq!(get_idtypes(0x13A0), IdTypes::LIMITED_USE); // Cherokee
        assert_eq!(get_idtypes(0x00B7), IdTypes::INCLUSION);
        assert_eq!(get_idtypes(0xFB01), IdTypes::NOT_NFKC); // fi ligature
        assert_eq!(get_idtypes(0x0180), IdTypes::TECHNICAL); // b with stroke
        assert_eq!(get_idtypes(0x0460), IdTypes::OBSOLETE); // Cyrillic omega
        assert_eq!(get_idtypes(0x0378), IdTypes::NOT_CHARACTER);
        assert!(is_allowed_identifier_char(0x00E9));
        assert!(!is_allowed_identifier_char(0x13A0));
        assert!(!is_allowed_identifier_char(0x0180));
        assert!(!is_allowed_identifier_char(0x018D));
        assert_eq!(idtype_names(IdTypes::TECHNICAL | IdTypes::OBSOLETE), "Technical Obsolete");
    }

    #[test]
    fn allowed_class_follows_identifier_status() {
        for class in [IdClass::Allowed, IdClass::SafeC23] {
            assert!(is_start(class, 0x00E9), "{}", class);
            assert!(!is_start(class, 0x0180), "{}", class);
            assert!(!is_continue(class, 0x0180), "{}", class);
            assert!(!is_continue(class, 0x018D), "{}", class);
            // Inclusion punctuation that is not medial
            assert!(!is_continue(class, '-' as u32), "{}", class);
            assert!(!is_continue(class, ':' as u32), "{}", class);
        }
        assert!(is_start(IdClass::Xid, 0x0180));
        assert!(is_continue(IdClass::Allowed, 0x00B7));
    }

    #[test]
    fn digits_never_start() {
        for class in IdClass::ALL {
            assert!(!is_start(class, '4' as u32), "{}", class);
            assert!(is_continue(class, '4' as u32), "{}", class);
            assert!(is_start(class, '_' as u32), "{}", class);
        }
    }

    #[test]
    fn id_wider_than_xid() {
        assert!(!is_start(IdClass::Xid, 0x037A));
        assert!(is_start(IdClass::Id, 0x037A));
        assert!(is_start(IdClass::C11, 0x00E9));
        assert!(!is_start(IdClass::C11, 0x0301));
        assert!(is_continue(IdClass::C11, 0x0301));
        assert!(!is_start(IdClass::Ascii, 0x00E9));
    }

    #[test]
    fn confusable_lookups() {
        assert_eq!(confusable_prototype(0x0430).as_deref(), Some(&[0x61][..]));
        assert_eq!(confusable_prototype(0xFF41).as_deref(), Some(&[0x61][..]));
        assert_eq!(confusable_prototype(0x0585).as_deref(), Some(&[0x6F][..]));
        assert_eq!(confusable_prototype(0x0180).as_deref(), Some(&[0x62, 0x335][..]));
        assert_eq!(confusable_prototype('a' as u32), None);
        // precomposed, not confusable
        assert_eq!(confusable_prototype(0x00E9), None);
        assert!(is_greek_latin_confusable(0x03BF));
        assert!(!is_greek_latin_confusable(0x03B1 + 1));
        assert!(is_medial(0x00B7));
        assert!(is_bidi_control(0x202E));
    }
}
