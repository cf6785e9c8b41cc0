//! Color type for bi-level e-paper panels
//!
//! The UC8179 panels driven by this crate are black/white only. Each pixel
//! is one bit in the packed framebuffer:
//!
//! | Color | Bit value |
//! |-------|-----------|
//! | Black | 0         |
//! | White | 1         |
//!
//! ## Example
//!
//! ```
//! use uc8179::Color;
//!
//! assert_eq!(Color::Black.bit(), 0);
//! assert_eq!(Color::White.bit(), 1);
//! assert_eq!(Color::White.fill_byte(), 0xFF);
//! ```

/// Colors supported by the bi-level panel
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Color {
    /// Black pixels (bit = 0)
    Black,
    /// White pixels (bit = 1)
    White,
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::prelude::PixelColor for Color {
    type Raw = embedded_graphics_core::pixelcolor::raw::RawU1;
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::BinaryColor> for Color {
    fn from(color: embedded_graphics_core::pixelcolor::BinaryColor) -> Self {
        match color {
            embedded_graphics_core::pixelcolor::BinaryColor::On => Self::Black,
            embedded_graphics_core::pixelcolor::BinaryColor::Off => Self::White,
        }
    }
}

impl Color {
    /// Get the framebuffer bit value for this color
    pub fn bit(self) -> u8 {
        match self {
            Self::Black => 0,
            Self::White => 1,
        }
    }

    /// Get the byte value that fills 8 pixels of this color
    ///
    /// ## Example
    ///
    /// ```
    /// use uc8179::Color;
    ///
    /// assert_eq!(Color::Black.fill_byte(), 0x00);
    /// assert_eq!(Color::White.fill_byte(), 0xFF);
    /// ```
    pub fn fill_byte(self) -> u8 {
        match self {
            Self::Black => 0x00,
            Self::White => 0xFF,
        }
    }

    /// Construct a color from a framebuffer bit value
    pub fn from_bit(bit: bool) -> Self {
        if bit { Self::White } else { Self::Black }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_values() {
        assert_eq!(Color::Black.bit(), 0);
        assert_eq!(Color::White.bit(), 1);
    }

    #[test]
    fn test_from_bit_roundtrip() {
        assert_eq!(Color::from_bit(false), Color::Black);
        assert_eq!(Color::from_bit(true), Color::White);
    }
}
