//! 8x8 glyph table
//!
//! 37 glyphs: a blank fallback, `A`-`Z` and `0`-`9`. Each glyph is 8 bytes,
//! one per column, bit 0 at the top, so a glyph drops straight into one
//! page of a [`Frame`](crate::Frame). The visible shape is 5x7 with a blank
//! column on the left and two on the right, giving 1 pixel of spacing
//! between characters and a blank bottom row.

/// Glyph width and height in pixels
pub const GLYPH_SIZE: usize = 8;

/// Number of glyphs in [`FONT_8X8`]
pub const GLYPH_COUNT: usize = 37;

/// Index of the blank glyph used for unsupported characters
pub const FALLBACK_GLYPH: usize = 0;

/// The glyph table, indexed by [`glyph_index`]
pub static FONT_8X8: [[u8; GLYPH_SIZE]; GLYPH_COUNT] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // fallback
    [0x00, 0x7C, 0x12, 0x11, 0x12, 0x7C, 0x00, 0x00], // A
    [0x00, 0x7F, 0x49, 0x49, 0x49, 0x36, 0x00, 0x00], // B
    [0x00, 0x3E, 0x41, 0x41, 0x41, 0x22, 0x00, 0x00], // C
    [0x00, 0x7F, 0x41, 0x41, 0x22, 0x1C, 0x00, 0x00], // D
    [0x00, 0x7F, 0x49, 0x49, 0x49, 0x41, 0x00, 0x00], // E
    [0x00, 0x7F, 0x09, 0x09, 0x09, 0x01, 0x00, 0x00], // F
    [0x00, 0x3E, 0x41, 0x49, 0x49, 0x7A, 0x00, 0x00], // G
    [0x00, 0x7F, 0x08, 0x08, 0x08, 0x7F, 0x00, 0x00], // H
    [0x00, 0x00, 0x41, 0x7F, 0x41, 0x00, 0x00, 0x00], // I
    [0x00, 0x20, 0x40, 0x41, 0x3F, 0x01, 0x00, 0x00], // J
    [0x00, 0x7F, 0x08, 0x14, 0x22, 0x41, 0x00, 0x00], // K
    [0x00, 0x7F, 0x40, 0x40, 0x40, 0x40, 0x00, 0x00], // L
    [0x00, 0x7F, 0x02, 0x0C, 0x02, 0x7F, 0x00, 0x00], // M
    [0x00, 0x7F, 0x04, 0x08, 0x10, 0x7F, 0x00, 0x00], // N
    [0x00, 0x3E, 0x41, 0x41, 0x41, 0x3E, 0x00, 0x00], // O
    [0x00, 0x7F, 0x09, 0x09, 0x09, 0x06, 0x00, 0x00], // P
    [0x00, 0x3E, 0x41, 0x51, 0x21, 0x5E, 0x00, 0x00], // Q
    [0x00, 0x7F, 0x09, 0x19, 0x29, 0x46, 0x00, 0x00], // R
    [0x00, 0x26, 0x49, 0x49, 0x49, 0x32, 0x00, 0x00], // S
    [0x00, 0x01, 0x01, 0x7F, 0x01, 0x01, 0x00, 0x00], // T
    [0x00, 0x3F, 0x40, 0x40, 0x40, 0x3F, 0x00, 0x00], // U
    [0x00, 0x1F, 0x20, 0x40, 0x20, 0x1F, 0x00, 0x00], // V
    [0x00, 0x3F, 0x40, 0x38, 0x40, 0x3F, 0x00, 0x00], // W
    [0x00, 0x63, 0x14, 0x08, 0x14, 0x63, 0x00, 0x00], // X
    [0x00, 0x03, 0x04, 0x78, 0x04, 0x03, 0x00, 0x00], // Y
    [0x00, 0x61, 0x51, 0x49, 0x45, 0x43, 0x00, 0x00], // Z
    [0x00, 0x3E, 0x51, 0x49, 0x45, 0x3E, 0x00, 0x00], // 0
    [0x00, 0x00, 0x42, 0x7F, 0x40, 0x00, 0x00, 0x00], // 1
    [0x00, 0x42, 0x61, 0x51, 0x49, 0x46, 0x00, 0x00], // 2
    [0x00, 0x21, 0x41, 0x45, 0x4B, 0x31, 0x00, 0x00], // 3
    [0x00, 0x18, 0x14, 0x12, 0x7F, 0x10, 0x00, 0x00], // 4
    [0x00, 0x27, 0x45, 0x45, 0x45, 0x39, 0x00, 0x00], // 5
    [0x00, 0x3C, 0x4A, 0x49, 0x49, 0x30, 0x00, 0x00], // 6
    [0x00, 0x01, 0x71, 0x09, 0x05, 0x03, 0x00, 0x00], // 7
    [0x00, 0x36, 0x49, 0x49, 0x49, 0x36, 0x00, 0x00], // 8
    [0x00, 0x06, 0x49, 0x49, 0x29, 0x1E, 0x00, 0x00], // 9
];

/// Map a character to its index in [`FONT_8X8`]
///
/// Letters are matched case-insensitively. Anything that is not an ASCII
/// letter or digit maps to [`FALLBACK_GLYPH`].
pub fn glyph_index(ch: char) -> usize {
    match ch.to_ascii_uppercase() {
        c @ 'A'..='Z' => c as usize - 'A' as usize + 1,
        c @ '0'..='9' => c as usize - '0' as usize + 27,
        _ => FALLBACK_GLYPH,
    }
}

/// Get the 8x8 glyph for a character
pub fn glyph(ch: char) -> &'static [u8; GLYPH_SIZE] {
    &FONT_8X8[glyph_index(ch)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_indices() {
        assert_eq!(glyph_index('A'), 1);
        assert_eq!(glyph_index('Z'), 26);
        assert_eq!(glyph_index('a'), 1);
        assert_eq!(glyph_index('m'), glyph_index('M'));
    }

    #[test]
    fn test_digit_indices() {
        assert_eq!(glyph_index('0'), 27);
        assert_eq!(glyph_index('9'), 36);
    }

    #[test]
    fn test_unsupported_falls_back() {
        for ch in [' ', '!', '@', '[', '`', '{', 'é', '\n'] {
            assert_eq!(glyph_index(ch), FALLBACK_GLYPH, "{:?}", ch);
        }
        assert_eq!(glyph('?'), &[0u8; GLYPH_SIZE]);
    }

    #[test]
    fn test_glyphs_are_distinct() {
        for a in 1..GLYPH_COUNT {
            for b in (a + 1)..GLYPH_COUNT {
                assert_ne!(FONT_8X8[a], FONT_8X8[b], "glyphs {} and {}", a, b);
            }
        }
    }

    #[test]
    fn test_bottom_row_is_blank() {
        // Keeps one pixel of line spacing when strings are stacked by page
        for g in FONT_8X8.iter() {
            assert!(g.iter().all(|col| col & 0x80 == 0));
        }
    }
}
