//! Error types for the driver
//!
//! This module defines error types for configuration building
//! ([`BuilderError`]) and display/framebuffer operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during display and framebuffer operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//!
//! ## Example
//!
//! ```
//! use uc8179::{Builder, Dimensions, BuilderError};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Invalid dimensions (height not a multiple of 8)
//! let result = Dimensions::new(800, 481);
//! assert!(result.is_err());
//! ```

use crate::display::PanelState;
use crate::interface::DisplayInterface;

/// Maximum source outputs (columns) supported by the UC8179 controller
///
/// The UC8179 drives up to 800 source outputs.
///
/// NOTE: Some panels wire fewer sources; configure [`crate::Dimensions`] accordingly.
pub const MAX_SOURCE_OUTPUTS: u16 = 800;

/// Maximum gate outputs (rows) supported by the UC8179 controller
///
/// The UC8179 drives up to 600 gate outputs.
///
/// NOTE: Some panels wire fewer gates; configure [`crate::Dimensions`] accordingly.
pub const MAX_GATE_OUTPUTS: u16 = 600;

/// Errors that can occur when interacting with the display or framebuffer
///
/// Generic over the interface type to preserve the specific error type.
/// This allows error handling code to match on the underlying hardware error.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (serial bus / GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
    /// Invalid dimensions provided
    ///
    /// Dimensions must satisfy:
    /// - 8 <= width <= MAX_SOURCE_OUTPUTS (800), multiple of 8
    /// - 8 <= height <= MAX_GATE_OUTPUTS (600), multiple of 8
    InvalidDimensions {
        /// Width in pixels requested
        width: u16,
        /// Height in pixels requested
        height: u16,
    },
    /// Frame buffer length does not match the panel exactly
    ///
    /// A full-frame transfer requires exactly `(width * height) / 8` bytes;
    /// a partial transfer requires exactly `region.buffer_size()` bytes.
    /// This is a caller programming error and no bus command is issued.
    FrameSizeMismatch {
        /// Required buffer length in bytes
        expected: usize,
        /// Provided buffer length in bytes
        provided: usize,
    },
    /// Invalid partial-window region parameters
    ///
    /// The region must have non-zero width and height, fit within the panel,
    /// and have byte-aligned x and width (multiples of 8).
    InvalidRegion {
        /// X coordinate
        x: u16,
        /// Y coordinate
        y: u16,
        /// Width
        w: u16,
        /// Height
        h: u16,
    },
    /// Framebuffer drawing or composition error
    Draw(DrawError),
    /// Operation is not legal in the panel's current state
    ///
    /// For example `write_frame` requires `Idle` and fails in `Asleep`;
    /// only `reset` can leave `Asleep`.
    InvalidState {
        /// The operation that was attempted
        operation: &'static str,
        /// The state the panel was in
        state: PanelState,
    },
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "Invalid dimensions: {width}x{height}")
            }
            Self::FrameSizeMismatch { expected, provided } => {
                write!(
                    f,
                    "Frame size mismatch: expected {expected} bytes, provided {provided}"
                )
            }
            Self::InvalidRegion { x, y, w, h } => {
                write!(f, "Invalid region: x={x}, y={y}, w={w}, h={h}")
            }
            Self::Draw(e) => write!(f, "{e}"),
            Self::InvalidState { operation, state } => {
                write!(f, "Cannot {operation} while panel is {state:?}")
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

impl<I: DisplayInterface> From<DrawError> for Error<I> {
    fn from(e: DrawError) -> Self {
        Self::Draw(e)
    }
}

/// Errors from framebuffer drawing and text composition
///
/// Independent of any hardware interface; these are local
/// programming-contract violations detected before any bus traffic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawError {
    /// Pixel coordinates outside the framebuffer
    ///
    /// Out-of-range writes are rejected, never silently clamped, and the
    /// buffer is left untouched.
    OutOfBounds {
        /// X coordinate
        x: u16,
        /// Y coordinate
        y: u16,
    },
    /// Symbol is not defined in the glyph table
    UndefinedGlyph {
        /// The character that had no glyph
        symbol: char,
    },
    /// Backing buffer length does not match the dimensions exactly
    ///
    /// A framebuffer requires exactly `(width * height) / 8` bytes.
    BufferSizeMismatch {
        /// Required buffer length in bytes
        expected: usize,
        /// Provided buffer length in bytes
        provided: usize,
    },
}

impl core::fmt::Display for DrawError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfBounds { x, y } => write!(f, "Pixel out of bounds: ({x}, {y})"),
            Self::UndefinedGlyph { symbol } => write!(f, "No glyph defined for {symbol:?}"),
            Self::BufferSizeMismatch { expected, provided } => write!(
                f,
                "Buffer size mismatch: expected {expected} bytes, provided {provided}"
            ),
        }
    }
}

impl core::error::Error for DrawError {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is created.
#[derive(Debug)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Width in pixels requested
        width: u16,
        /// Height in pixels requested
        height: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (max {MAX_SOURCE_OUTPUTS}x{MAX_GATE_OUTPUTS}, both must be multiples of 8)"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
