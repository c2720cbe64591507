// unicode/tables.rs - Static interval tables for the property store.
//
// Every table is sorted by `from`, pairwise disjoint, and keeps a gap of
// at least one codepoint between ranges. tests/tables_test.rs checks this
// for all of them.
//
// Script, script-extension, general-category, XID, decomposition,
// identifier-type and confusable data come from the unicode-* crates; the
// tables here cover what those crates do not publish.

use crate::identifier::CodePoint;

pub type CodeRange = (CodePoint, CodePoint);

// === ASCII class ===

pub static ASCII_START: [CodeRange; 3] = [(0x0041, 0x005A), (0x005F, 0x005F), (0x0061, 0x007A)];

pub static ASCII_CONTINUE: [CodeRange; 4] = [
    (0x0030, 0x0039),
    (0x0041, 0x005A),
    (0x005F, 0x005F),
    (0x0061, 0x007A),
];

// === C11 class (ISO/IEC 9899:2011 Annex D) ===
// D.1 allowed ranges, with the D.2 ranges removed from the start table.

pub static C11_START: [CodeRange; 46] = [
    (0x0041, 0x005A),
    (0x005F, 0x005F),
    (0x0061, 0x007A),
    (0x00A8, 0x00A8),
    (0x00AA, 0x00AA),
    (0x00AD, 0x00AD),
    (0x00AF, 0x00AF),
    (0x00B2, 0x00B5),
    (0x00B7, 0x00BA),
    (0x00BC, 0x00BE),
    (0x00C0, 0x00D6),
    (0x00D8, 0x00F6),
    (0x00F8, 0x02FF),
    (0x0370, 0x167F),
    (0x1681, 0x180D),
    (0x180F, 0x1DBF),
    (0x1E00, 0x1FFF),
    (0x200B, 0x200D),
    (0x202A, 0x202E),
    (0x203F, 0x2040),
    (0x2054, 0x2054),
    (0x2060, 0x20CF),
    (0x2100, 0x218F),
    (0x2460, 0x24FF),
    (0x2776, 0x2793),
    (0x2C00, 0x2DFF),
    (0x2E80, 0x2FFF),
    (0x3004, 0x3007),
    (0x3021, 0x302F),
    (0x3031, 0xD7FF),
    (0xF900, 0xFD3D),
    (0xFD40, 0xFDCF),
    (0xFDF0, 0xFE1F),
    (0xFE30, 0xFE44),
    (0xFE47, 0xFFFD),
    (0x10000, 0x1FFFD),
    (0x20000, 0x2FFFD),
    (0x30000, 0x3FFFD),
    (0x40000, 0x4FFFD),
    (0x50000, 0x5FFFD),
    (0x60000, 0x6FFFD),
    (0x70000, 0x7FFFD),
    (0x80000, 0x8FFFD),
    (0x90000, 0x9FFFD),
    (0xA0000, 0xAFFFD),
    (0xB0000, 0xBFFFD),
];

pub static C11_CONTINUE: [CodeRange; 44] = [
    (0x0030, 0x0039),
    (0x0041, 0x005A),
    (0x005F, 0x005F),
    (0x0061, 0x007A),
    (0x00A8, 0x00A8),
    (0x00AA, 0x00AA),
    (0x00AD, 0x00AD),
    (0x00AF, 0x00AF),
    (0x00B2, 0x00B5),
    (0x00B7, 0x00BA),
    (0x00BC, 0x00BE),
    (0x00C0, 0x00D6),
    (0x00D8, 0x00F6),
    (0x00F8, 0x167F),
    (0x1681, 0x180D),
    (0x180F, 0x1FFF),
    (0x200B, 0x200D),
    (0x202A, 0x202E),
    (0x203F, 0x2040),
    (0x2054, 0x2054),
    (0x2060, 0x218F),
    (0x2460, 0x24FF),
    (0x2776, 0x2793),
    (0x2C00, 0x2DFF),
    (0x2E80, 0x2FFF),
    (0x3004, 0x3007),
    (0x3021, 0x302F),
    (0x3031, 0xD7FF),
    (0xF900, 0xFD3D),
    (0xFD40, 0xFDCF),
    (0xFDF0, 0xFE44),
    (0xFE47, 0xFFFD),
    (0x10000, 0x1FFFD),
    (0x20000, 0x2FFFD),
    (0x30000, 0x3FFFD),
    (0x40000, 0x4FFFD),
    (0x50000, 0x5FFFD),
    (0x60000, 0x6FFFD),
    (0x70000, 0x7FFFD),
    (0x80000, 0x8FFFD),
    (0x90000, 0x9FFFD),
    (0xA0000, 0xAFFFD),
    (0xB0000, 0xBFFFD),
    (0xC0000, 0xEFFFD),
];

// === ID class ===
// Codepoints in ID_Start / ID_Continue but not in the XID variants
// (the NFKC-unstable ones).

pub static ID_START_EXTRA: [CodeRange; 15] = [
    (0x037A, 0x037A),
    (0x0E33, 0x0E33),
    (0x0EB3, 0x0EB3),
    (0x309B, 0x309C),
    (0xFC5E, 0xFC63),
    (0xFDFA, 0xFDFB),
    (0xFE70, 0xFE70),
    (0xFE72, 0xFE72),
    (0xFE74, 0xFE74),
    (0xFE76, 0xFE76),
    (0xFE78, 0xFE78),
    (0xFE7A, 0xFE7A),
    (0xFE7C, 0xFE7C),
    (0xFE7E, 0xFE7E),
    (0xFF9E, 0xFF9F),
];

pub static ID_CONTINUE_EXTRA: [CodeRange; 12] = [
    (0x037A, 0x037A),
    (0x309B, 0x309C),
    (0xFC5E, 0xFC63),
    (0xFDFA, 0xFDFB),
    (0xFE70, 0xFE70),
    (0xFE72, 0xFE72),
    (0xFE74, 0xFE74),
    (0xFE76, 0xFE76),
    (0xFE78, 0xFE78),
    (0xFE7A, 0xFE7A),
    (0xFE7C, 0xFE7C),
    (0xFE7E, 0xFE7E),
];

// === Medial-only characters ===
// Allowed inside an identifier but never as its last codepoint.

pub static MEDIAL: [CodeRange; 8] = [
    (0x00B7, 0x00B7),
    (0x0387, 0x0387),
    (0x05F3, 0x05F4),
    (0x0F0B, 0x0F0B),
    (0x200C, 0x200D),
    (0x2027, 0x2027),
    (0x30FB, 0x30FB),
    (0xFF65, 0xFF65),
];

// === Bidi formatting controls ===

pub static BIDI_CONTROLS: [CodeRange; 4] = [
    (0x061C, 0x061C),
    (0x200E, 0x200F),
    (0x202A, 0x202E),
    (0x2066, 0x2069),
];

// === Greek letters confusable with Latin ===
// Rejected next to Latin under the SafeC23 profile.

pub static GREEK_LATIN_CONFUS: [CodeRange; 15] = [
    (0x037F, 0x037F),
    (0x0391, 0x0392),
    (0x0395, 0x0397),
    (0x0399, 0x039A),
    (0x039C, 0x039D),
    (0x039F, 0x039F),
    (0x03A1, 0x03A1),
    (0x03A4, 0x03A5),
    (0x03A7, 0x03A7),
    (0x03B9, 0x03BA),
    (0x03BD, 0x03BD),
    (0x03BF, 0x03BF),
    (0x03C1, 0x03C1),
    (0x03C5, 0x03C5),
    (0x03F2, 0x03F3),
];
