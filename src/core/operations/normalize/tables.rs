//! Code point range tables for the Freeform string class.
//!
//! Each table is a sorted, non-overlapping list of inclusive intervals.

/// An immutable sorted set of inclusive code point intervals.
#[derive(Debug, Clone, Copy)]
pub struct RangeTable {
    ranges: &'static [(u32, u32)],
}

impl RangeTable {
    /// Wraps a sorted, non-overlapping list of inclusive ranges.
    #[must_use]
    pub const fn new(ranges: &'static [(u32, u32)]) -> Self {
        Self { ranges }
    }

    /// Whether `code_point` falls inside any interval.
    #[must_use]
    pub fn contains(&self, code_point: u32) -> bool {
        self.ranges
            .binary_search_by(|&(low, high)| {
                if high < code_point {
                    core::cmp::Ordering::Less
                } else if low > code_point {
                    core::cmp::Ordering::Greater
                } else {
                    core::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    /// The underlying intervals.
    #[must_use]
    pub const fn ranges(&self) -> &'static [(u32, u32)] {
        self.ranges
    }
}

/// RFC 5892 §2.6 exceptions that are always PVALID.
pub static PVALID_EXCEPTIONS: RangeTable = RangeTable::new(&[
    (0x00DF, 0x00DF), // LATIN SMALL LETTER SHARP S
    (0x03C2, 0x03C2), // GREEK SMALL LETTER FINAL SIGMA
    (0x06FD, 0x06FE), // ARABIC SIGN SINDHI AMPERSAND, ARABIC SIGN SINDHI POSTPOSITION MEN
    (0x0F0B, 0x0F0B), // TIBETAN MARK INTERSYLLABIC TSHEG
    (0x3007, 0x3007), // IDEOGRAPHIC NUMBER ZERO
]);

/// RFC 5892 exceptions that are DISALLOWED, plus the CONTEXTO and CONTEXTJ
/// code points. Contextual rules are not evaluated; these are rejected outright.
pub static EXCEPTIONS_DISALLOWED: RangeTable = RangeTable::new(&[
    (0x00B7, 0x00B7), // MIDDLE DOT (CONTEXTO)
    (0x0375, 0x0375), // GREEK LOWER NUMERAL SIGN (CONTEXTO)
    (0x05F3, 0x05F4), // HEBREW PUNCTUATION GERESH, GERSHAYIM (CONTEXTO)
    (0x0640, 0x0640), // ARABIC TATWEEL
    (0x0660, 0x0669), // ARABIC-INDIC DIGITS (CONTEXTO)
    (0x06F0, 0x06F9), // EXTENDED ARABIC-INDIC DIGITS (CONTEXTO)
    (0x07FA, 0x07FA), // NKO LAJANYALAN
    (0x200C, 0x200D), // ZERO WIDTH NON-JOINER, ZERO WIDTH JOINER (CONTEXTJ)
    (0x302E, 0x302F), // HANGUL SINGLE/DOUBLE DOT TONE MARK
    (0x3031, 0x3035), // VERTICAL KANA REPEAT MARKS
    (0x303B, 0x303B), // VERTICAL IDEOGRAPHIC ITERATION MARK
    (0x30FB, 0x30FB), // KATAKANA MIDDLE DOT (CONTEXTO)
]);

/// Conjoining Hangul Jamo (Hangul_Syllable_Type L, V or T).
pub static OLD_HANGUL_JAMO: RangeTable = RangeTable::new(&[
    (0x1100, 0x11FF),
    (0xA960, 0xA97C),
    (0xD7B0, 0xD7C6),
    (0xD7CB, 0xD7FB),
]);

/// Default_Ignorable_Code_Point and Noncharacter_Code_Point.
pub static DEFAULT_IGNORABLE: RangeTable = RangeTable::new(&[
    (0x00AD, 0x00AD),
    (0x034F, 0x034F),
    (0x061C, 0x061C),
    (0x115F, 0x1160),
    (0x17B4, 0x17B5),
    (0x180B, 0x180F),
    (0x200B, 0x200F),
    (0x202A, 0x202E),
    (0x2060, 0x206F),
    (0x3164, 0x3164),
    (0xFDD0, 0xFDEF),
    (0xFE00, 0xFE0F),
    (0xFEFF, 0xFEFF),
    (0xFFA0, 0xFFA0),
    (0xFFF0, 0xFFF8),
    (0xFFFE, 0xFFFF),
    (0x1BCA0, 0x1BCA3),
    (0x1D173, 0x1D17A),
    (0x1FFFE, 0x1FFFF),
    (0x2FFFE, 0x2FFFF),
    (0x3FFFE, 0x3FFFF),
    (0x4FFFE, 0x4FFFF),
    (0x5FFFE, 0x5FFFF),
    (0x6FFFE, 0x6FFFF),
    (0x7FFFE, 0x7FFFF),
    (0x8FFFE, 0x8FFFF),
    (0x9FFFE, 0x9FFFF),
    (0xAFFFE, 0xAFFFF),
    (0xBFFFE, 0xBFFFF),
    (0xCFFFE, 0xCFFFF),
    (0xDFFFE, 0xDFFFF),
    (0xE0000, 0xE0FFF),
    (0xEFFFE, 0xEFFFF),
    (0xFFFFE, 0xFFFFF),
    (0x10FFFE, 0x10FFFF),
]);
