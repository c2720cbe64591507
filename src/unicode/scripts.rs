// unicode/scripts.rs - Script index table, tiers and name lookup.
//
// Scripts are indexed by tier so "is Limited-Use or worse" and "is Excluded"
// are single comparisons against FIRST_LIMITED_USE / FIRST_EXCLUDED.
// Tier assignment follows UAX #31 tables 4, 5 and 7.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::identifier::ScriptIdx;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScriptTier {
    Recommended,
    LimitedUse,
    Excluded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptInfo {
    /// Long property value alias, e.g. `Canadian_Aboriginal`.
    pub name: &'static str,
    /// ISO 15924 code, e.g. `Cans`.
    pub iso: &'static str,
}

const fn s(name: &'static str, iso: &'static str) -> ScriptInfo {
    ScriptInfo { name, iso }
}

// === Well-known indices ===
pub const SC_COMMON: ScriptIdx = 0;
pub const SC_INHERITED: ScriptIdx = 1;
pub const SC_LATIN: ScriptIdx = 2;
pub const SC_ARABIC: ScriptIdx = 3;
pub const SC_BOPOMOFO: ScriptIdx = 6;
pub const SC_CYRILLIC: ScriptIdx = 7;
pub const SC_GREEK: ScriptIdx = 11;
pub const SC_HAN: ScriptIdx = 14;
pub const SC_HANGUL: ScriptIdx = 15;
pub const SC_HEBREW: ScriptIdx = 16;
pub const SC_HIRAGANA: ScriptIdx = 17;
pub const SC_KATAKANA: ScriptIdx = 19;
pub const SC_THAANA: ScriptIdx = 28;
pub const SC_ADLAM: ScriptIdx = 31;
pub const SC_CHEROKEE: ScriptIdx = 38;
pub const SC_HANIFI_ROHINGYA: ScriptIdx = 39;
pub const SC_MANDAIC: ScriptIdx = 45;
pub const SC_NKO: ScriptIdx = 51;
pub const SC_SYRIAC: ScriptIdx = 58;
pub const SC_UNKNOWN: ScriptIdx = 255;

pub const FIRST_LIMITED_USE: ScriptIdx = 31;
pub const FIRST_EXCLUDED: ScriptIdx = 66;

pub static SCRIPTS: [ScriptInfo; 170] = [
    // Recommended
    s("Common", "Zyyy"),
    s("Inherited", "Zinh"),
    s("Latin", "Latn"),
    s("Arabic", "Arab"),
    s("Armenian", "Armn"),
    s("Bengali", "Beng"),
    s("Bopomofo", "Bopo"),
    s("Cyrillic", "Cyrl"),
    s("Devanagari", "Deva"),
    s("Ethiopic", "Ethi"),
    s("Georgian", "Geor"),
    s("Greek", "Grek"),
    s("Gujarati", "Gujr"),
    s("Gurmukhi", "Guru"),
    s("Han", "Hani"),
    s("Hangul", "Hang"),
    s("Hebrew", "Hebr"),
    s("Hiragana", "Hira"),
    s("Kannada", "Knda"),
    s("Katakana", "Kana"),
    s("Khmer", "Khmr"),
    s("Lao", "Laoo"),
    s("Malayalam", "Mlym"),
    s("Myanmar", "Mymr"),
    s("Oriya", "Orya"),
    s("Sinhala", "Sinh"),
    s("Tamil", "Taml"),
    s("Telugu", "Telu"),
    s("Thaana", "Thaa"),
    s("Thai", "Thai"),
    s("Tibetan", "Tibt"),
    // Limited-Use
    s("Adlam", "Adlm"),
    s("Balinese", "Bali"),
    s("Bamum", "Bamu"),
    s("Batak", "Batk"),
    s("Canadian_Aboriginal", "Cans"),
    s("Chakma", "Cakm"),
    s("Cham", "Cham"),
    s("Cherokee", "Cher"),
    s("Hanifi_Rohingya", "Rohg"),
    s("Javanese", "Java"),
    s("Kayah_Li", "Kali"),
    s("Lepcha", "Lepc"),
    s("Limbu", "Limb"),
    s("Lisu", "Lisu"),
    s("Mandaic", "Mand"),
    s("Meetei_Mayek", "Mtei"),
    s("Miao", "Plrd"),
    s("Mongolian", "Mong"),
    s("Newa", "Newa"),
    s("New_Tai_Lue", "Talu"),
    s("Nko", "Nkoo"),
    s("Nyiakeng_Puachue_Hmong", "Hmnp"),
    s("Ol_Chiki", "Olck"),
    s("Osage", "Osge"),
    s("Saurashtra", "Saur"),
    s("Sundanese", "Sund"),
    s("Syloti_Nagri", "Sylo"),
    s("Syriac", "Syrc"),
    s("Tai_Le", "Tale"),
    s("Tai_Tham", "Lana"),
    s("Tai_Viet", "Tavt"),
    s("Tifinagh", "Tfng"),
    s("Vai", "Vaii"),
    s("Wancho", "Wcho"),
    s("Yi", "Yiii"),
    // Excluded
    s("Ahom", "Ahom"),
    s("Anatolian_Hieroglyphs", "Hluw"),
    s("Avestan", "Avst"),
    s("Bassa_Vah", "Bass"),
    s("Bhaiksuki", "Bhks"),
    s("Brahmi", "Brah"),
    s("Braille", "Brai"),
    s("Buginese", "Bugi"),
    s("Buhid", "Buhd"),
    s("Carian", "Cari"),
    s("Caucasian_Albanian", "Aghb"),
    s("Chorasmian", "Chrs"),
    s("Coptic", "Copt"),
    s("Cuneiform", "Xsux"),
    s("Cypriot", "Cprt"),
    s("Cypro_Minoan", "Cpmn"),
    s("Deseret", "Dsrt"),
    s("Dives_Akuru", "Diak"),
    s("Dogra", "Dogr"),
    s("Duployan", "Dupl"),
    s("Egyptian_Hieroglyphs", "Egyp"),
    s("Elbasan", "Elba"),
    s("Elymaic", "Elym"),
    s("Garay", "Gara"),
    s("Glagolitic", "Glag"),
    s("Gothic", "Goth"),
    s("Grantha", "Gran"),
    s("Gunjala_Gondi", "Gong"),
    s("Gurung_Khema", "Gukh"),
    s("Hanunoo", "Hano"),
    s("Hatran", "Hatr"),
    s("Imperial_Aramaic", "Armi"),
    s("Inscriptional_Pahlavi", "Phli"),
    s("Inscriptional_Parthian", "Prti"),
    s("Kaithi", "Kthi"),
    s("Kawi", "Kawi"),
    s("Kharoshthi", "Khar"),
    s("Khitan_Small_Script", "Kits"),
    s("Khojki", "Khoj"),
    s("Khudawadi", "Sind"),
    s("Kirat_Rai", "Krai"),
    s("Linear_A", "Lina"),
    s("Linear_B", "Linb"),
    s("Lycian", "Lyci"),
    s("Lydian", "Lydi"),
    s("Mahajani", "Mahj"),
    s("Makasar", "Maka"),
    s("Manichaean", "Mani"),
    s("Marchen", "Marc"),
    s("Masaram_Gondi", "Gonm"),
    s("Medefaidrin", "Medf"),
    s("Mende_Kikakui", "Mend"),
    s("Meroitic_Cursive", "Merc"),
    s("Meroitic_Hieroglyphs", "Mero"),
    s("Modi", "Modi"),
    s("Mro", "Mroo"),
    s("Multani", "Mult"),
    s("Nabataean", "Nbat"),
    s("Nag_Mundari", "Nagm"),
    s("Nandinagari", "Nand"),
    s("Nushu", "Nshu"),
    s("Ogham", "Ogam"),
    s("Ol_Onal", "Onao"),
    s("Old_Hungarian", "Hung"),
    s("Old_Italic", "Ital"),
    s("Old_North_Arabian", "Narb"),
    s("Old_Permic", "Perm"),
    s("Old_Persian", "Xpeo"),
    s("Old_Sogdian", "Sogo"),
    s("Old_South_Arabian", "Sarb"),
    s("Old_Turkic", "Orkh"),
    s("Old_Uyghur", "Ougr"),
    s("Osmanya", "Osma"),
    s("Pahawh_Hmong", "Hmng"),
    s("Palmyrene", "Palm"),
    s("Pau_Cin_Hau", "Pauc"),
    s("Phags_Pa", "Phag"),
    s("Phoenician", "Phnx"),
    s("Psalter_Pahlavi", "Phlp"),
    s("Rejang", "Rjng"),
    s("Runic", "Runr"),
    s("Samaritan", "Samr"),
    s("Sharada", "Shrd"),
    s("Shavian", "Shaw"),
    s("Siddham", "Sidd"),
    s("SignWriting", "Sgnw"),
    s("Sogdian", "Sogd"),
    s("Sora_Sompeng", "Sora"),
    s("Soyombo", "Soyo"),
    s("Sunuwar", "Sunu"),
    s("Tagalog", "Tglg"),
    s("Tagbanwa", "Tagb"),
    s("Takri", "Takr"),
    s("Tangsa", "Tnsa"),
    s("Tangut", "Tang"),
    s("Tirhuta", "Tirh"),
    s("Todhri", "Todr"),
    s("Toto", "Toto"),
    s("Tulu_Tigalari", "Tutg"),
    s("Ugaritic", "Ugar"),
    s("Vithkuqi", "Vith"),
    s("Warang_Citi", "Wara"),
    s("Yezidi", "Yezi"),
    s("Zanabazar_Square", "Zanb"),
];

#[inline]
pub fn script_tier(sc: ScriptIdx) -> ScriptTier {
    if sc >= FIRST_EXCLUDED {
        // Unknown (255) is treated as Excluded.
        ScriptTier::Excluded
    } else if sc >= FIRST_LIMITED_USE {
        ScriptTier::LimitedUse
    } else {
        ScriptTier::Recommended
    }
}

#[inline]
pub fn is_excluded(sc: ScriptIdx) -> bool {
    sc >= FIRST_EXCLUDED
}

#[inline]
pub fn is_limited_use(sc: ScriptIdx) -> bool {
    (FIRST_LIMITED_USE..FIRST_EXCLUDED).contains(&sc)
}

/// Right-to-left scripts which unlock bidi formatting characters.
#[inline]
pub fn is_rtl_script(sc: ScriptIdx) -> bool {
    matches!(
        sc,
        SC_ARABIC | SC_HEBREW | SC_THAANA | SC_SYRIAC | SC_NKO | SC_ADLAM | SC_MANDAIC
            | SC_HANIFI_ROHINGYA
    )
}

/// Long name of a script index; "Unknown" for out-of-table indices.
pub fn script_name(sc: ScriptIdx) -> &'static str {
    SCRIPTS.get(sc as usize).map(|s| s.name).unwrap_or("Unknown")
}

fn iso_index() -> &'static HashMap<&'static str, ScriptIdx> {
    static INDEX: OnceLock<HashMap<&'static str, ScriptIdx>> = OnceLock::new();
    INDEX.get_or_init(|| {
        SCRIPTS
            .iter()
            .enumerate()
            .map(|(i, info)| (info.iso, i as ScriptIdx))
            .collect()
    })
}

/// Map an ISO 15924 code (exact case) to our index.
pub fn script_by_iso(iso: &str) -> Option<ScriptIdx> {
    iso_index().get(iso).copied()
}

/// Find a script by long name or ISO code, ignoring case, spaces, hyphens
/// and underscores.
pub fn script_by_name(name: &str) -> Option<ScriptIdx> {
    let key: String = name
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if key.is_empty() {
        return None;
    }
    SCRIPTS
        .iter()
        .position(|info| {
            info.iso.eq_ignore_ascii_case(&key)
                || info
                    .name
                    .chars()
                    .filter(|c| *c != '_')
                    .map(|c| c.to_ascii_lowercase())
                    .eq(key.chars())
        })
        .map(|i| i as ScriptIdx)
}
