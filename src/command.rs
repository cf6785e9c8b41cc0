//! UC8179 command definitions
//!
//! This module defines the command bytes used to control the UC8179
//! e-paper display controller. Commands are sent over the serial bus with
//! the DC pin low for the command byte and high for parameter bytes.
//!
//! ## Command Structure
//!
//! All commands follow the pattern:
//! 1. Assert CS (Chip Select)
//! 2. Set DC low (command mode)
//! 3. Send command byte
//! 4. Set DC high (data mode)
//! 5. Send parameter bytes (if any)
//! 6. Deassert CS
//!
//! ## Example
//!
//! ```rust,ignore
//! use uc8179::command;
//!
//! interface.send_command(command::POWER_ON)?;
//! interface.busy_wait(&mut delay)?;
//! ```

// Power and panel configuration commands

/// Panel setting command (0x00)
///
/// Configures resolution source, LUT source, gate scan direction, and
/// booster switch. Requires 1 byte of data.
pub const PANEL_SETTING: u8 = 0x00;

/// Power setting command (0x01)
///
/// Configures the internal power rails (VDS/VDG source, VDH/VDL/VGH/VGL
/// levels). Requires 4 bytes of data.
pub const POWER_SETTING: u8 = 0x01;

/// Power off command (0x02)
///
/// Turns off the panel power rails. Must wait for BUSY after issuing.
pub const POWER_OFF: u8 = 0x02;

/// Power on command (0x04)
///
/// Turns on the panel power rails. BUSY is asserted until the rails are
/// stable; always follow with a busy wait.
pub const POWER_ON: u8 = 0x04;

/// Booster soft-start command (0x06)
///
/// Controls the power-on ramp of the booster circuit.
/// Requires 4 bytes of data.
pub const BOOSTER_SOFT_START: u8 = 0x06;

/// Deep sleep command (0x07)
///
/// Enters the lowest-power state. Requires the check byte
/// [`DEEP_SLEEP_CHECK`]; only a hardware reset can wake the controller.
pub const DEEP_SLEEP: u8 = 0x07;

/// Check byte required by the deep sleep command
pub const DEEP_SLEEP_CHECK: u8 = 0xA5;

// Frame data and refresh commands

/// Transfer frame data to the preliminary (old) plane (0x10)
///
/// Streams one bit per pixel, MSB-first, (width * height / 8) bytes.
pub const TRANSFER_FRAME_OLD: u8 = 0x10;

/// Transfer frame data to the final (new) plane (0x13)
///
/// Streams one bit per pixel, MSB-first, (width * height / 8) bytes.
/// This is the plane committed by [`DISPLAY_REFRESH`].
pub const TRANSFER_FRAME: u8 = 0x13;

/// Display refresh command (0x12)
///
/// Commits the transferred frame to the visible display. BUSY is asserted
/// for the duration of the refresh waveform.
pub const DISPLAY_REFRESH: u8 = 0x12;

// Timing and interface configuration commands

/// Dual SPI mode command (0x15)
///
/// Selects single or dual data-line operation. Requires 1 byte
/// (0x00 = single line).
pub const DUAL_SPI: u8 = 0x15;

/// VCOM and data interval setting command (0x50)
///
/// Controls border output and the VCOM/data interval timing.
/// Requires 2 bytes of data.
pub const VCOM_DATA_INTERVAL: u8 = 0x50;

/// TCON (gate/source non-overlap timing) setting command (0x60)
///
/// Requires 1 byte of data.
pub const TCON_SETTING: u8 = 0x60;

/// Resolution setting command (0x61)
///
/// Sets the active source and gate counts. Requires 4 bytes:
/// [width MSB, width LSB, height MSB, height LSB]
pub const RESOLUTION_SETTING: u8 = 0x61;

/// VCM_DC setting command (0x82)
///
/// Sets the VCOM_DC voltage. Requires 1 byte of data.
pub const VCM_DC: u8 = 0x82;

// Partial window commands

/// Partial window command (0x90)
///
/// Declares the rectangle affected by partial transfers. Requires 9 bytes:
/// horizontal start/end, vertical start/end (each as two bytes), and a
/// scan-mode byte.
pub const PARTIAL_WINDOW: u8 = 0x90;

/// Partial-in command (0x91)
///
/// Enters partial update mode; subsequent frame transfers are scoped to
/// the declared window.
pub const PARTIAL_IN: u8 = 0x91;

/// Partial-out command (0x92)
///
/// Leaves partial update mode.
pub const PARTIAL_OUT: u8 = 0x92;
