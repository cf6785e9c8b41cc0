//! Core display operations
//!
//! [`Display`] owns the panel's logical state machine and the command
//! sequencing that brings the UC8179 from power-off to ready, transfers a
//! frame, triggers a refresh, and returns the panel to deep sleep.

use embedded_hal::delay::DelayNs;
use log::{debug, trace};

use crate::command::{
    BOOSTER_SOFT_START, DEEP_SLEEP, DEEP_SLEEP_CHECK, DISPLAY_REFRESH, DUAL_SPI, PANEL_SETTING,
    PARTIAL_IN, PARTIAL_OUT, PARTIAL_WINDOW, POWER_OFF, POWER_ON, POWER_SETTING,
    RESOLUTION_SETTING, TCON_SETTING, TRANSFER_FRAME, VCM_DC, VCOM_DATA_INTERVAL,
};
use crate::config::Config;
use crate::error::Error;
use crate::interface::DisplayInterface;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Logical state of the panel
///
/// Mutated only by [`Display`] operations. `Resetting`,
/// `TransferringFrame`, and `Refreshing` are transient passages observable
/// if an operation fails partway through; a completed operation always
/// leaves the panel in `PoweredOn`, `Idle`, or `Asleep`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelState {
    /// Power applied, no reset performed yet
    Uninitialized,
    /// Hardware reset pulse in progress
    Resetting,
    /// Hardware reset complete, configuration not sent
    PoweredOn,
    /// Configured and ready to accept frame data
    Idle,
    /// Frame bytes streaming to the controller
    TransferringFrame,
    /// Refresh waveform running
    Refreshing,
    /// Deep sleep; only [`Display::reset`] can leave this state
    Asleep,
}

/// Region specification for partial updates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    /// X coordinate in pixels (must be byte-aligned, i.e., multiple of 8)
    pub x: u16,
    /// Y coordinate in pixels
    pub y: u16,
    /// Width in pixels (must be multiple of 8)
    pub w: u16,
    /// Height in pixels
    pub h: u16,
}

impl Region {
    /// Create a new region
    #[allow(clippy::many_single_char_names)]
    pub fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    /// Calculate the buffer size in bytes for this region
    pub fn buffer_size(&self) -> usize {
        (self.w as usize / 8) * self.h as usize
    }
}

/// Core display driver for the UC8179
///
/// This struct provides the protocol-level operations for the controller.
/// Drawing is done separately into a [`Framebuffer`](crate::Framebuffer)
/// which is then consumed wholesale by [`write_frame`](Self::write_frame).
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Logical panel state
    state: PanelState,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// The panel starts `Uninitialized`; call
    /// [`initialize`](Self::initialize) before any frame operation.
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            state: PanelState::Uninitialized,
        }
    }

    /// Perform a hardware reset
    ///
    /// Drives the reset line high, low, then high with the panel's dwell
    /// times, forcing a known hardware-reset state. This is the only
    /// operation that can leave `Asleep`.
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        trace!("panel reset");
        self.state = PanelState::Resetting;
        self.interface.reset(delay);
        self.state = PanelState::PoweredOn;
        Ok(())
    }

    /// Reset and configure the controller, leaving the panel `Idle`
    ///
    /// Issues the full power-up sequence: booster soft-start, power rail
    /// settings, power on (with busy wait), panel setting, resolution,
    /// interface mode, gate/source timing, and VCOM timing.
    pub fn initialize<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.reset(delay)?;

        debug!("panel init");
        let booster = self.config.booster_soft_start;
        self.send_command(BOOSTER_SOFT_START)?;
        self.send_data(&booster)?;

        let power = self.config.power_setting;
        self.send_command(POWER_SETTING)?;
        self.send_data(&power)?;

        self.send_command(POWER_ON)?;
        self.wait_until_idle(delay)?;

        self.send_command(PANEL_SETTING)?;
        self.send_data(&[self.config.panel_setting])?;

        let resolution = self.config.dimensions.resolution_data();
        self.send_command(RESOLUTION_SETTING)?;
        self.send_data(&resolution)?;

        self.send_command(DUAL_SPI)?;
        self.send_data(&[self.config.dual_spi])?;

        self.send_command(TCON_SETTING)?;
        self.send_data(&[self.config.tcon])?;

        let vcom = self.config.vcom_data_interval;
        self.send_command(VCOM_DATA_INTERVAL)?;
        self.send_data(&vcom)?;

        if let Some(vcm_dc) = self.config.vcm_dc {
            self.send_command(VCM_DC)?;
            self.send_data(&[vcm_dc])?;
        }

        self.state = PanelState::Idle;
        debug!("panel idle");
        Ok(())
    }

    /// Block until the panel deasserts its busy line
    ///
    /// The only suspension point in the driver. Bounded by the interface's
    /// configured timeout; with the timeout disabled this waits as long as
    /// the hardware does.
    pub fn wait_until_idle<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.interface.busy_wait(delay).map_err(Error::Interface)
    }

    /// Transfer a full frame and refresh the display
    ///
    /// Streams every byte of `buffer` in address order, then triggers the
    /// refresh waveform and waits for it to complete.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidState` unless the panel is `Idle`
    /// - `Error::FrameSizeMismatch` unless `buffer.len()` equals exactly
    ///   `(width * height) / 8`; no bus command is issued in either case.
    pub fn write_frame<D: DelayNs>(&mut self, buffer: &[u8], delay: &mut D) -> DisplayResult<I> {
        self.require_idle("write_frame")?;
        let expected = self.config.dimensions.buffer_size();
        if buffer.len() != expected {
            return Err(Error::FrameSizeMismatch {
                expected,
                provided: buffer.len(),
            });
        }

        self.wait_until_idle(delay)?;
        trace!("frame transfer: {} bytes", buffer.len());
        self.state = PanelState::TransferringFrame;
        self.send_command(TRANSFER_FRAME)?;
        self.send_data(buffer)?;

        self.refresh(delay)
    }

    /// Write an all-black frame without a caller-supplied buffer
    ///
    /// Identical to [`write_frame`](Self::write_frame) with a synthesized
    /// all-zero buffer.
    pub fn clear<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.require_idle("clear")?;

        self.wait_until_idle(delay)?;
        trace!("clear frame");
        self.state = PanelState::TransferringFrame;
        self.send_command(TRANSFER_FRAME)?;
        let zeros = [0u8; 64];
        let mut remaining = self.config.dimensions.buffer_size();
        while remaining > 0 {
            let chunk = remaining.min(zeros.len());
            self.send_data(&zeros[..chunk])?;
            remaining -= chunk;
        }

        self.refresh(delay)
    }

    /// Transfer a rectangular sub-region and refresh
    ///
    /// Enters partial mode, declares the window, streams the region bytes,
    /// leaves partial mode, and refreshes.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidState` unless the panel is `Idle`
    /// - `Error::InvalidRegion` if the region is empty, exceeds the panel,
    ///   or has x or width not a multiple of 8
    /// - `Error::FrameSizeMismatch` unless `buffer.len()` equals exactly
    ///   `region.buffer_size()`
    pub fn write_partial_frame<D: DelayNs>(
        &mut self,
        region: Region,
        buffer: &[u8],
        delay: &mut D,
    ) -> DisplayResult<I> {
        self.require_idle("write_partial_frame")?;
        self.validate_region(&region)?;
        let expected = region.buffer_size();
        if buffer.len() != expected {
            return Err(Error::FrameSizeMismatch {
                expected,
                provided: buffer.len(),
            });
        }

        self.wait_until_idle(delay)?;
        trace!(
            "partial transfer: {}x{} at ({}, {})",
            region.w, region.h, region.x, region.y
        );
        self.state = PanelState::TransferringFrame;
        self.send_command(PARTIAL_IN)?;
        self.send_command(PARTIAL_WINDOW)?;
        let x_end = region.x + region.w - 1;
        let y_end = region.y + region.h - 1;
        self.send_data(&[
            (region.x >> 8) as u8,
            (region.x & 0xF8) as u8,
            (x_end >> 8) as u8,
            (x_end & 0xFF) as u8,
            (region.y >> 8) as u8,
            (region.y & 0xFF) as u8,
            (y_end >> 8) as u8,
            (y_end & 0xFF) as u8,
            0x01,
        ])?;

        self.send_command(TRANSFER_FRAME)?;
        self.send_data(buffer)?;
        self.send_command(PARTIAL_OUT)?;

        self.refresh(delay)
    }

    /// Power off and enter deep sleep
    ///
    /// Terminal state: only [`reset`](Self::reset) (followed by
    /// [`initialize`](Self::initialize)) can wake the panel again.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidState` unless the panel is `Idle`.
    pub fn sleep<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.require_idle("sleep")?;

        debug!("panel entering deep sleep");
        self.send_command(POWER_OFF)?;
        self.wait_until_idle(delay)?;
        self.send_command(DEEP_SLEEP)?;
        self.send_data(&[DEEP_SLEEP_CHECK])?;
        self.state = PanelState::Asleep;
        Ok(())
    }

    /// Get the panel's logical state
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Get display dimensions
    pub fn dimensions(&self) -> &crate::config::Dimensions {
        &self.config.dimensions
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Access the underlying hardware interface
    pub fn interface(&self) -> &I {
        &self.interface
    }

    /// Trigger the refresh waveform and wait for completion
    fn refresh<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.state = PanelState::Refreshing;
        self.send_command(DISPLAY_REFRESH)?;
        self.wait_until_idle(delay)?;
        self.state = PanelState::Idle;
        trace!("refresh complete");
        Ok(())
    }

    fn require_idle(&self, operation: &'static str) -> DisplayResult<I> {
        if self.state != PanelState::Idle {
            return Err(Error::InvalidState {
                operation,
                state: self.state,
            });
        }
        Ok(())
    }

    fn validate_region(&self, region: &Region) -> DisplayResult<I> {
        let Region { x, y, w, h } = *region;
        if w == 0 || h == 0 {
            return Err(Error::InvalidRegion { x, y, w, h });
        }
        if x.saturating_add(w) > self.config.dimensions.width
            || y.saturating_add(h) > self.config.dimensions.height
        {
            return Err(Error::InvalidRegion { x, y, w, h });
        }
        if x % 8 != 0 || w % 8 != 0 {
            return Err(Error::InvalidRegion { x, y, w, h });
        }
        Ok(())
    }

    /// Send a command to the display controller
    fn send_command(&mut self, cmd: u8) -> DisplayResult<I> {
        self.interface.send_command(cmd).map_err(Error::Interface)
    }

    /// Send data to the display controller
    fn send_data(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.interface.send_data(data).map_err(Error::Interface)
    }
}
