//! Packed bi-level framebuffer and text composition
//!
//! A [`Framebuffer`] is a bit-per-pixel image of the full display: bit 0 is
//! black, bit 1 is white, rows packed most-significant-bit-first. The byte
//! count is exactly `(width * height) / 8`; both axes must be multiples
//! of 8 (enforced by [`Dimensions`]).
//!
//! The buffer is allocated once, mutated by drawing operations, and
//! consumed wholesale by [`Display::write_frame`](crate::Display::write_frame).
//!
//! ## Example
//!
//! ```
//! use uc8179::{font::CLOCK_FONT, Color, Dimensions, Framebuffer};
//!
//! let dims = match Dimensions::new(80, 48) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let mut fb = match Framebuffer::new(dims, [0u8; 80 * 48 / 8]) {
//!     Ok(fb) => fb,
//!     Err(_) => return,
//! };
//! fb.fill(Color::White);
//! let _ = fb.compose_clock_text(0, 0, 14, 5, &CLOCK_FONT);
//! ```

use crate::color::Color;
use crate::config::Dimensions;
use crate::error::DrawError;
use crate::font::GlyphTable;

type DrawResult<T> = core::result::Result<T, DrawError>;

/// Packed 1-bit-per-pixel framebuffer
///
/// Generic over the backing storage so it works with a borrowed slice, a
/// fixed array in a static, or a heap buffer (with the `alloc` feature).
pub struct Framebuffer<B> {
    /// Buffer dimensions
    dimensions: Dimensions,
    /// Packed pixel storage, exactly `dimensions.buffer_size()` bytes
    buffer: B,
}

impl<B> Framebuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Wrap an existing buffer
    ///
    /// # Errors
    ///
    /// Returns `DrawError::BufferSizeMismatch` unless the buffer length is
    /// exactly `(width * height) / 8` bytes. A partial buffer is never used.
    pub fn new(dimensions: Dimensions, buffer: B) -> DrawResult<Self> {
        let expected = dimensions.buffer_size();
        let provided = buffer.as_ref().len();
        if provided != expected {
            return Err(DrawError::BufferSizeMismatch { expected, provided });
        }
        Ok(Self { dimensions, buffer })
    }

    /// Buffer dimensions
    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    /// The packed pixel bytes, in frame-transfer address order
    pub fn data(&self) -> &[u8] {
        self.buffer.as_ref()
    }

    /// Fill the entire buffer with one color
    pub fn fill(&mut self, color: Color) {
        let byte = color.fill_byte();
        for slot in self.buffer.as_mut() {
            *slot = byte;
        }
    }

    /// Set a single pixel
    ///
    /// # Errors
    ///
    /// Returns `DrawError::OutOfBounds` for coordinates outside the buffer;
    /// the buffer is left untouched.
    pub fn set_pixel(&mut self, x: u16, y: u16, color: Color) -> DrawResult<()> {
        let (index, mask) = self.address(x, y)?;
        let byte = &mut self.buffer.as_mut()[index];
        match color {
            Color::White => *byte |= mask,
            Color::Black => *byte &= !mask,
        }
        Ok(())
    }

    /// Read a single pixel
    ///
    /// # Errors
    ///
    /// Returns `DrawError::OutOfBounds` for coordinates outside the buffer.
    pub fn pixel(&self, x: u16, y: u16) -> DrawResult<Color> {
        let (index, mask) = self.address(x, y)?;
        Ok(Color::from_bit(self.buffer.as_ref()[index] & mask != 0))
    }

    /// Copy a glyph's bitmap into the buffer at the given top-left origin
    ///
    /// Both ink and background pixels of the glyph rectangle are written;
    /// pixels outside the rectangle are untouched.
    ///
    /// # Errors
    ///
    /// - `DrawError::UndefinedGlyph` if the table has no bitmap for `symbol`
    /// - `DrawError::OutOfBounds` if any part of the glyph rectangle falls
    ///   outside the buffer
    pub fn draw_glyph(
        &mut self,
        x: u16,
        y: u16,
        symbol: char,
        table: &GlyphTable,
    ) -> DrawResult<()> {
        let bitmap = table
            .bitmap(symbol)
            .ok_or(DrawError::UndefinedGlyph { symbol })?;

        // Validate the whole rectangle before mutating anything
        if x.saturating_add(table.width()) > self.dimensions.width
            || y.saturating_add(table.height()) > self.dimensions.height
        {
            return Err(DrawError::OutOfBounds { x, y });
        }

        for gy in 0..table.height() {
            for gx in 0..table.width() {
                let color = if table.is_ink(bitmap, gx, gy) {
                    Color::Black
                } else {
                    Color::White
                };
                self.set_pixel(x + gx, y + gy, color)?;
            }
        }
        Ok(())
    }

    /// Lay out a run of glyphs left to right with fixed-width advance
    ///
    /// Returns the total advance in pixels (glyph count * glyph width).
    pub fn compose_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        table: &GlyphTable,
    ) -> DrawResult<u16> {
        let mut advance = 0u16;
        for symbol in text.chars() {
            self.draw_glyph(x + advance, y, symbol, table)?;
            advance += table.width();
        }
        Ok(advance)
    }

    /// Compose an HH:MM clock readout with AM/PM suffix
    ///
    /// Uses a 12-hour convention: the hour is converted from the 0-23
    /// input, zero-padded to two digits, and followed by `AM` or `PM`
    /// (hour 0 displays as `12` AM, hour 12 as `12` PM). Glyphs advance
    /// left to right by the table's fixed width.
    ///
    /// Returns the total advance in pixels.
    ///
    /// # Errors
    ///
    /// Propagates glyph and bounds errors from [`draw_glyph`](Self::draw_glyph).
    pub fn compose_clock_text(
        &mut self,
        x: u16,
        y: u16,
        hours: u8,
        minutes: u8,
        table: &GlyphTable,
    ) -> DrawResult<u16> {
        let hours = hours % 24;
        let minutes = minutes % 60;
        let (display_hours, suffix) = match hours {
            0 => (12, 'A'),
            1..=11 => (hours, 'A'),
            12 => (12, 'P'),
            _ => (hours - 12, 'P'),
        };

        let glyphs = [
            digit(display_hours / 10),
            digit(display_hours % 10),
            ':',
            digit(minutes / 10),
            digit(minutes % 10),
            suffix,
            'M',
        ];

        let mut advance = 0u16;
        for symbol in glyphs {
            self.draw_glyph(x + advance, y, symbol, table)?;
            advance += table.width();
        }
        Ok(advance)
    }

    fn address(&self, x: u16, y: u16) -> DrawResult<(usize, u8)> {
        if x >= self.dimensions.width || y >= self.dimensions.height {
            return Err(DrawError::OutOfBounds { x, y });
        }
        let bit_index = y as usize * self.dimensions.width as usize + x as usize;
        Ok((bit_index / 8, 0x80 >> (bit_index % 8)))
    }
}

fn digit(value: u8) -> char {
    char::from(b'0' + (value % 10))
}

#[cfg(any(test, feature = "alloc"))]
impl Framebuffer<alloc::vec::Vec<u8>> {
    /// Allocate a zero-initialized (all-black) framebuffer on the heap
    /// (requires the `alloc` feature)
    pub fn allocate(dimensions: Dimensions) -> Self {
        Self {
            buffer: alloc::vec![0u8; dimensions.buffer_size()],
            dimensions,
        }
    }
}

#[cfg(feature = "graphics")]
mod graphics {
    use super::Framebuffer;
    use crate::color::Color;
    use core::convert::Infallible;
    use embedded_graphics_core::{
        draw_target::DrawTarget,
        geometry::{OriginDimensions, Point, Size},
        prelude::Pixel,
    };

    impl<B> DrawTarget for Framebuffer<B>
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        type Color = Color;
        type Error = Infallible;

        fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
        where
            Iter: IntoIterator<Item = Pixel<Self::Color>>,
        {
            let sz = self.size();

            for Pixel(Point { x, y }, color) in pixels {
                if x < 0 || y < 0 {
                    continue;
                }

                let x = x as u32;
                let y = y as u32;

                if x >= sz.width || y >= sz.height {
                    continue;
                }

                // In bounds, cannot fail
                let _ = self.set_pixel(x as u16, y as u16, color);
            }

            Ok(())
        }
    }

    impl<B> OriginDimensions for Framebuffer<B>
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        fn size(&self) -> Size {
            Size::new(
                self.dimensions().width as u32,
                self.dimensions().height as u32,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::CLOCK_FONT;

    fn test_framebuffer() -> Framebuffer<alloc::vec::Vec<u8>> {
        Framebuffer::allocate(Dimensions::new(80, 48).unwrap())
    }

    #[test]
    fn test_allocate_is_exactly_sized_and_zeroed() {
        let fb = test_framebuffer();
        assert_eq!(fb.data().len(), 80 * 48 / 8);
        assert!(fb.data().iter().all(|byte| *byte == 0));
    }

    #[test]
    fn test_new_rejects_wrong_buffer_size() {
        let dims = Dimensions::new(80, 48).unwrap();
        let result = Framebuffer::new(dims, alloc::vec![0u8; 479]);
        assert!(matches!(
            result,
            Err(DrawError::BufferSizeMismatch {
                expected: 480,
                provided: 479
            })
        ));
    }

    #[test]
    fn test_set_pixel_roundtrip() {
        let mut fb = test_framebuffer();
        fb.set_pixel(13, 7, Color::White).unwrap();
        assert_eq!(fb.pixel(13, 7).unwrap(), Color::White);
        fb.set_pixel(13, 7, Color::Black).unwrap();
        assert_eq!(fb.pixel(13, 7).unwrap(), Color::Black);
    }

    #[test]
    fn test_set_pixel_msb_first_addressing() {
        let mut fb = test_framebuffer();
        fb.set_pixel(0, 0, Color::White).unwrap();
        assert_eq!(fb.data()[0], 0x80);
        fb.set_pixel(7, 0, Color::White).unwrap();
        assert_eq!(fb.data()[0], 0x81);
        fb.set_pixel(8, 0, Color::White).unwrap();
        assert_eq!(fb.data()[1], 0x80);
        // Second row starts at byte width/8
        fb.set_pixel(0, 1, Color::White).unwrap();
        assert_eq!(fb.data()[80 / 8], 0x80);
    }

    #[test]
    fn test_set_pixel_out_of_range_does_not_mutate() {
        let mut fb = test_framebuffer();
        let before = fb.data().to_vec();
        assert!(matches!(
            fb.set_pixel(80, 0, Color::White),
            Err(DrawError::OutOfBounds { x: 80, y: 0 })
        ));
        assert!(matches!(
            fb.set_pixel(0, 48, Color::White),
            Err(DrawError::OutOfBounds { .. })
        ));
        assert_eq!(fb.data(), &before[..]);
    }

    #[test]
    fn test_fill_white() {
        let mut fb = test_framebuffer();
        fb.fill(Color::White);
        assert!(fb.data().iter().all(|byte| *byte == 0xFF));
    }

    #[test]
    fn test_draw_glyph_matches_table_bitmap() {
        let mut fb = test_framebuffer();
        fb.fill(Color::White);
        fb.draw_glyph(16, 8, '7', &CLOCK_FONT).unwrap();

        let bitmap = CLOCK_FONT.bitmap('7').unwrap();
        for gy in 0..CLOCK_FONT.height() {
            for gx in 0..CLOCK_FONT.width() {
                let expected = if CLOCK_FONT.is_ink(bitmap, gx, gy) {
                    Color::Black
                } else {
                    Color::White
                };
                assert_eq!(fb.pixel(16 + gx, 8 + gy).unwrap(), expected);
            }
        }
    }

    #[test]
    fn test_draw_glyph_leaves_surroundings_untouched() {
        let mut fb = test_framebuffer();
        fb.fill(Color::White);
        fb.draw_glyph(16, 8, '8', &CLOCK_FONT).unwrap();

        // Column just left and right of the glyph, row just above and below
        for gy in 0..CLOCK_FONT.height() {
            assert_eq!(fb.pixel(15, 8 + gy).unwrap(), Color::White);
            assert_eq!(fb.pixel(16 + CLOCK_FONT.width(), 8 + gy).unwrap(), Color::White);
        }
        for gx in 0..CLOCK_FONT.width() {
            assert_eq!(fb.pixel(16 + gx, 7).unwrap(), Color::White);
            assert_eq!(fb.pixel(16 + gx, 8 + CLOCK_FONT.height()).unwrap(), Color::White);
        }
    }

    #[test]
    fn test_draw_glyph_undefined_symbol() {
        let mut fb = test_framebuffer();
        assert!(matches!(
            fb.draw_glyph(0, 0, 'x', &CLOCK_FONT),
            Err(DrawError::UndefinedGlyph { symbol: 'x' })
        ));
    }

    #[test]
    fn test_draw_glyph_overflowing_rectangle_fails_without_mutating() {
        let mut fb = test_framebuffer();
        let before = fb.data().to_vec();
        let result = fb.draw_glyph(76, 0, '1', &CLOCK_FONT);
        assert!(matches!(result, Err(DrawError::OutOfBounds { .. })));
        assert_eq!(fb.data(), &before[..]);
    }

    #[test]
    fn test_compose_clock_text_afternoon() {
        let mut fb = test_framebuffer();
        fb.fill(Color::White);
        // 14:05 displays as 02:05 PM
        let advance = fb.compose_clock_text(0, 0, 14, 5, &CLOCK_FONT).unwrap();
        assert_eq!(advance, 7 * CLOCK_FONT.width());

        let mut expected = test_framebuffer();
        expected.fill(Color::White);
        let w = CLOCK_FONT.width();
        for (i, symbol) in ['0', '2', ':', '0', '5', 'P', 'M'].into_iter().enumerate() {
            expected
                .draw_glyph(i as u16 * w, 0, symbol, &CLOCK_FONT)
                .unwrap();
        }
        assert_eq!(fb.data(), expected.data());
    }

    #[test]
    fn test_compose_clock_text_midnight_is_twelve_am() {
        let mut fb = test_framebuffer();
        fb.fill(Color::White);
        fb.compose_clock_text(0, 0, 0, 0, &CLOCK_FONT).unwrap();

        let mut expected = test_framebuffer();
        expected.fill(Color::White);
        let w = CLOCK_FONT.width();
        for (i, symbol) in ['1', '2', ':', '0', '0', 'A', 'M'].into_iter().enumerate() {
            expected
                .draw_glyph(i as u16 * w, 0, symbol, &CLOCK_FONT)
                .unwrap();
        }
        assert_eq!(fb.data(), expected.data());
    }

    #[test]
    fn test_compose_clock_text_noon_is_twelve_pm() {
        let mut fb = test_framebuffer();
        fb.fill(Color::White);
        fb.compose_clock_text(0, 0, 12, 30, &CLOCK_FONT).unwrap();

        let mut expected = test_framebuffer();
        expected.fill(Color::White);
        let w = CLOCK_FONT.width();
        for (i, symbol) in ['1', '2', ':', '3', '0', 'P', 'M'].into_iter().enumerate() {
            expected
                .draw_glyph(i as u16 * w, 0, symbol, &CLOCK_FONT)
                .unwrap();
        }
        assert_eq!(fb.data(), expected.data());
    }

    #[test]
    fn test_compose_text_advance_is_cumulative_glyph_width() {
        let mut fb = test_framebuffer();
        let advance = fb.compose_text(8, 8, "12:34", &CLOCK_FONT).unwrap();
        assert_eq!(advance, 5 * CLOCK_FONT.width());
    }

    #[cfg(feature = "graphics")]
    #[test]
    fn test_draw_target_renders_filled_rectangle() {
        use embedded_graphics::{
            prelude::*,
            primitives::{PrimitiveStyle, Rectangle},
        };

        let mut fb = test_framebuffer();
        Rectangle::new(Point::new(8, 8), Size::new(16, 4))
            .into_styled(PrimitiveStyle::with_fill(Color::White))
            .draw(&mut fb)
            .unwrap();

        assert_eq!(fb.pixel(8, 8).unwrap(), Color::White);
        assert_eq!(fb.pixel(23, 11).unwrap(), Color::White);
        assert_eq!(fb.pixel(7, 8).unwrap(), Color::Black);
        assert_eq!(fb.pixel(24, 8).unwrap(), Color::Black);
        assert_eq!(fb.pixel(8, 12).unwrap(), Color::Black);
    }

    #[cfg(feature = "graphics")]
    #[test]
    fn test_draw_target_ignores_out_of_bounds() {
        use embedded_graphics_core::draw_target::DrawTarget;
        use embedded_graphics_core::geometry::Point;
        use embedded_graphics_core::prelude::Pixel;

        let mut fb = test_framebuffer();
        let pixels = [
            Pixel(Point::new(-1, 0), Color::White),
            Pixel(Point::new(0, 0), Color::White),
            Pixel(Point::new(1000, 1000), Color::White),
        ];
        fb.draw_iter(pixels).unwrap();
        assert_eq!(fb.pixel(0, 0).unwrap(), Color::White);
    }
}
