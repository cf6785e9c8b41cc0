//! UC8179 E-Paper Display Driver
//!
//! A driver for the UC8179 e-paper display controller supporting displays
//! up to 800x600 pixels, with a packed 1-bpp framebuffer, partial-window
//! updates, and a low-power clock-refresh coordinator for battery-powered
//! always-on displays.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Configurable display dimensions
//! - Hardware SPI or bit-banged serial interface
//! - Lock-free shared state for a secondary low-power execution context
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use uc8179::{Builder, Dimensions, Display, SpiInterface};
//!
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl InputPin for MockPin {
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(true) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let busy = MockPin;
//! # let mut delay = MockDelay;
//! let interface = SpiInterface::new(spi, dc, rst, busy);
//! let dims = match Dimensions::new(800, 480) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(interface, config);
//! let _ = display.initialize(&mut delay);
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Color type for bi-level e-paper panels
pub mod color;
/// UC8179 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Periodic clock-refresh pass for a low-power execution context
pub mod coordinator;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Compact glyph tables for the clock readout
pub mod font;
/// Packed bi-level framebuffer and text composition
pub mod framebuffer;
/// Hardware interface abstraction
pub mod interface;
/// Word-sized state shared between two execution contexts
pub mod shared;
/// Weather observation records and numeric summary rendering
pub mod weather;

pub use color::Color;
pub use config::{Builder, Config, Dimensions, MAX_GATE_OUTPUTS, MAX_SOURCE_OUTPUTS};
pub use coordinator::{RefreshCoordinator, WakeupOutcome};
pub use display::{Display, PanelState, Region};
pub use error::{BuilderError, DrawError, Error};
pub use font::{CLOCK_FONT, GlyphTable};
pub use framebuffer::Framebuffer;
pub use interface::{
    BitBangInterface, DEFAULT_BUSY_TIMEOUT_MS, DisplayInterface, InterfaceError, SpiInterface,
};
pub use shared::SharedClockState;
pub use weather::{CurrentConditions, ForecastDay};
