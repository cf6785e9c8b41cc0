//! Glyph tables for text composition
//!
//! A [`GlyphTable`] maps a symbol to a rectangular bitmap region inside a
//! shared glyph atlas. Offsets are byte positions into the atlas, never
//! pixel coordinates, and every glyph occupies exactly
//! `width * height / 8` bytes packed row-major, MSB-first — the same
//! packing as the framebuffer itself.
//!
//! The built-in [`CLOCK_FONT`] carries the compact symbol set needed for a
//! clock and numeric weather readouts: digits 0-9, colon, the A/P/M
//! letters for an AM/PM suffix, minus, and percent. Atlas bit 1 is ink
//! (black); bit 0 is background (white).

/// Number of glyphs in the compact clock atlas
const CLOCK_GLYPH_COUNT: usize = 16;

/// An immutable symbol-to-bitmap lookup over a shared glyph atlas
///
/// All glyphs in a table share one fixed width and height; text
/// composition advances by the fixed width per glyph.
pub struct GlyphTable {
    /// Glyph width in pixels
    width: u16,
    /// Glyph height in pixels
    height: u16,
    /// Packed bitmap atlas, `glyph count * width * height / 8` bytes
    atlas: &'static [u8],
    /// Symbol to glyph index lookup
    index_of: fn(char) -> Option<usize>,
}

impl GlyphTable {
    /// Glyph width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Glyph height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Bytes occupied by one glyph in the atlas
    pub fn bytes_per_glyph(&self) -> usize {
        (self.width as usize * self.height as usize) / 8
    }

    /// Byte offset of a symbol's bitmap within the atlas
    ///
    /// Returns `None` for symbols the table does not define.
    pub fn offset_of(&self, symbol: char) -> Option<usize> {
        (self.index_of)(symbol).map(|index| index * self.bytes_per_glyph())
    }

    /// The packed bitmap region for a symbol
    ///
    /// Returns `None` for symbols the table does not define.
    pub fn bitmap(&self, symbol: char) -> Option<&'static [u8]> {
        let offset = self.offset_of(symbol)?;
        self.atlas.get(offset..offset + self.bytes_per_glyph())
    }

    /// Whether the glyph pixel at (gx, gy) is ink
    ///
    /// Coordinates are relative to the glyph's top-left corner. Out-of-range
    /// coordinates read as background.
    pub fn is_ink(&self, bitmap: &[u8], gx: u16, gy: u16) -> bool {
        if gx >= self.width || gy >= self.height {
            return false;
        }
        let bit_index = gy as usize * self.width as usize + gx as usize;
        let byte = bitmap[bit_index / 8];
        byte & (0x80 >> (bit_index % 8)) != 0
    }
}

fn clock_index(symbol: char) -> Option<usize> {
    match symbol {
        '0'..='9' => Some(symbol as usize - '0' as usize),
        ':' => Some(10),
        'A' => Some(11),
        'P' => Some(12),
        'M' => Some(13),
        '-' => Some(14),
        '%' => Some(15),
        _ => None,
    }
}

/// Compact 8x12 clock font: digits, colon, A/P/M, minus, percent
///
/// 12 bytes per glyph, one byte per row, MSB is the leftmost pixel.
pub static CLOCK_FONT: GlyphTable = GlyphTable {
    width: 8,
    height: 12,
    atlas: &CLOCK_ATLAS,
    index_of: clock_index,
};

#[rustfmt::skip]
static CLOCK_ATLAS: [u8; CLOCK_GLYPH_COUNT * 12] = [
    // '0'
    0x00, 0x3C, 0x66, 0x66, 0x6E, 0x76, 0x66, 0x66, 0x66, 0x3C, 0x00, 0x00,
    // '1'
    0x00, 0x18, 0x38, 0x78, 0x18, 0x18, 0x18, 0x18, 0x18, 0x7E, 0x00, 0x00,
    // '2'
    0x00, 0x3C, 0x66, 0x06, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x7E, 0x00, 0x00,
    // '3'
    0x00, 0x3C, 0x66, 0x06, 0x06, 0x1C, 0x06, 0x06, 0x66, 0x3C, 0x00, 0x00,
    // '4'
    0x00, 0x0C, 0x1C, 0x2C, 0x4C, 0x4C, 0x7E, 0x0C, 0x0C, 0x1E, 0x00, 0x00,
    // '5'
    0x00, 0x7E, 0x60, 0x60, 0x7C, 0x06, 0x06, 0x06, 0x66, 0x3C, 0x00, 0x00,
    // '6'
    0x00, 0x1C, 0x30, 0x60, 0x7C, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x00, 0x00,
    // '7'
    0x00, 0x7E, 0x06, 0x06, 0x0C, 0x0C, 0x18, 0x18, 0x30, 0x30, 0x00, 0x00,
    // '8'
    0x00, 0x3C, 0x66, 0x66, 0x66, 0x3C, 0x66, 0x66, 0x66, 0x3C, 0x00, 0x00,
    // '9'
    0x00, 0x3C, 0x66, 0x66, 0x66, 0x3E, 0x06, 0x06, 0x0C, 0x38, 0x00, 0x00,
    // ':'
    0x00, 0x00, 0x00, 0x18, 0x18, 0x00, 0x00, 0x18, 0x18, 0x00, 0x00, 0x00,
    // 'A'
    0x00, 0x18, 0x3C, 0x66, 0x66, 0x66, 0x7E, 0x66, 0x66, 0x66, 0x00, 0x00,
    // 'P'
    0x00, 0x7C, 0x66, 0x66, 0x66, 0x7C, 0x60, 0x60, 0x60, 0x60, 0x00, 0x00,
    // 'M'
    0x00, 0x63, 0x77, 0x7F, 0x6B, 0x6B, 0x63, 0x63, 0x63, 0x63, 0x00, 0x00,
    // '-'
    0x00, 0x00, 0x00, 0x00, 0x00, 0x7E, 0x7E, 0x00, 0x00, 0x00, 0x00, 0x00,
    // '%'
    0x00, 0x62, 0x66, 0x0C, 0x0C, 0x18, 0x30, 0x30, 0x66, 0x46, 0x00, 0x00,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atlas_length_matches_glyph_layout() {
        assert_eq!(
            CLOCK_FONT.atlas.len(),
            CLOCK_GLYPH_COUNT * CLOCK_FONT.bytes_per_glyph()
        );
    }

    #[test]
    fn test_every_clock_symbol_is_defined() {
        for symbol in ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', 'A', 'P', 'M', '-', '%'] {
            assert!(CLOCK_FONT.bitmap(symbol).is_some(), "missing {symbol:?}");
        }
    }

    #[test]
    fn test_undefined_symbol_has_no_offset() {
        assert_eq!(CLOCK_FONT.offset_of('x'), None);
        assert_eq!(CLOCK_FONT.bitmap('!'), None);
    }

    #[test]
    fn test_offsets_are_byte_positions() {
        assert_eq!(CLOCK_FONT.offset_of('0'), Some(0));
        assert_eq!(CLOCK_FONT.offset_of('1'), Some(12));
        assert_eq!(CLOCK_FONT.offset_of(':'), Some(120));
        assert_eq!(CLOCK_FONT.offset_of('M'), Some(156));
    }

    #[test]
    fn test_is_ink_reads_msb_first() {
        let bitmap = CLOCK_FONT.bitmap('1').unwrap();
        // Row 1 of '1' is 0x18 = 0b0001_1000: pixels 3 and 4 are ink
        assert!(!CLOCK_FONT.is_ink(bitmap, 2, 1));
        assert!(CLOCK_FONT.is_ink(bitmap, 3, 1));
        assert!(CLOCK_FONT.is_ink(bitmap, 4, 1));
        assert!(!CLOCK_FONT.is_ink(bitmap, 5, 1));
    }

    #[test]
    fn test_is_ink_out_of_range_is_background() {
        let bitmap = CLOCK_FONT.bitmap('8').unwrap();
        assert!(!CLOCK_FONT.is_ink(bitmap, 8, 0));
        assert!(!CLOCK_FONT.is_ink(bitmap, 0, 12));
    }
}
