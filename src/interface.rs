//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and two concrete
//! implementations for communicating with the UC8179 controller:
//!
//! - [`SpiInterface`] drives the bus through an `embedded-hal`
//!   [`SpiDevice`], for use on the main processor where a hardware SPI
//!   peripheral is available.
//! - [`BitBangInterface`] clocks each byte out by toggling GPIO lines
//!   directly, for use in execution contexts with no SPI peripheral
//!   (such as a low-power coprocessor).
//!
//! ## Hardware Requirements
//!
//! The UC8179 requires:
//! - Serial bus (SDIN + SCK), hardware or bit-banged
//! - 4 GPIO pins:
//!   - **CS**: Chip select (output, active low; owned by the SPI device
//!     for [`SpiInterface`], explicit for [`BitBangInterface`])
//!   - **DC**: Data/Command select (output, low=command, high=data)
//!   - **RST**: Reset (output, active low)
//!   - **BUSY**: Busy status (input)
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use uc8179::{BitBangInterface, DisplayInterface};
//! # use core::convert::Infallible;
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
//! # let mut delay = MockDelay;
//! // sck, sdin, cs, dc, rst, busy
//! let mut interface =
//!     BitBangInterface::new(MockPin, MockPin, MockPin, MockPin, MockPin, MockPin);
//!
//! // Send command
//! let _ = interface.send_command(0x04); // Power on
//!
//! // Wait for display ready
//! let _ = interface.busy_wait(&mut delay);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for hardware interface to the UC8179 controller
///
/// This trait abstracts over different hardware implementations, allowing
/// the [`Display`](crate::display::Display) to work with a hardware SPI
/// peripheral, a bit-banged GPIO bus, or a mock in tests.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send a command byte to the controller
    ///
    /// The implementation must:
    /// 1. Set DC pin low (command mode)
    /// 2. Send the command byte, CS asserted for the byte
    ///
    /// # Errors
    ///
    /// Returns an error if bus communication or GPIO fails.
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error>;

    /// Send data bytes to the controller
    ///
    /// The implementation must:
    /// 1. Set DC pin high (data mode)
    /// 2. Send the data bytes, CS asserted per byte
    ///
    /// # Errors
    ///
    /// Returns an error if bus communication or GPIO fails.
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Perform hardware reset
    ///
    /// Drives RST high, low, then high again with the panel's required
    /// dwell times, forcing the controller into a known hardware-reset
    /// state. This is the only way to leave deep sleep.
    fn reset<D: DelayNs>(&mut self, delay: &mut D);

    /// Wait until the panel deasserts its busy line
    ///
    /// Polls the BUSY pin in bounded increments until the panel reports
    /// ready or the configured timeout expires.
    ///
    /// # Errors
    ///
    /// Returns [`InterfaceError::Timeout`] if BUSY doesn't deassert within
    /// the configured timeout period (unless the timeout is disabled).
    fn busy_wait<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Generic over bus and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<BusErr, PinErr> {
    /// Serial bus communication error
    Bus(BusErr),
    /// GPIO pin error
    Pin(PinErr),
    /// Timeout waiting for busy pin
    Timeout,
}

impl<BusErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<BusErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "Bus error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
            Self::Timeout => write!(f, "Timeout waiting for display"),
        }
    }
}

impl<BusErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<BusErr, PinErr> {}

/// Default timeout for busy-wait in milliseconds
///
/// A full refresh of an 800x480 panel takes several seconds; 30 s leaves
/// generous margin. Set 0 to wait indefinitely (hardware-faithful).
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 30_000;

/// Busy-wait polling interval in milliseconds
pub const BUSY_POLL_INTERVAL_MS: u32 = 10;

/// Reset pulse dwell times in milliseconds (high, low, high)
pub const RESET_DWELL_MS: [u32; 3] = [200, 40, 200];

fn poll_busy<BUSY, D, BusErr, PinErr>(
    busy: &mut BUSY,
    active_high: bool,
    timeout_ms: u32,
    delay: &mut D,
) -> InterfaceResult<(), InterfaceError<BusErr, PinErr>>
where
    BUSY: InputPin<Error = PinErr>,
    D: DelayNs,
{
    let mut waited_ms = 0u32;

    loop {
        let is_busy = if active_high {
            busy.is_high()
        } else {
            busy.is_low()
        };

        let is_busy = match is_busy {
            Ok(value) => value,
            Err(e) => return Err(InterfaceError::Pin(e)),
        };

        if !is_busy {
            return Ok(());
        }

        delay.delay_ms(BUSY_POLL_INTERVAL_MS);
        waited_ms = waited_ms.saturating_add(BUSY_POLL_INTERVAL_MS);
        if timeout_ms > 0 && waited_ms >= timeout_ms {
            return Err(InterfaceError::Timeout);
        }
    }
}

fn pulse_reset<RST, D>(rst: &mut RST, delay: &mut D)
where
    RST: OutputPin,
    D: DelayNs,
{
    let _ = rst.set_high();
    delay.delay_ms(RESET_DWELL_MS[0]);
    let _ = rst.set_low();
    delay.delay_ms(RESET_DWELL_MS[1]);
    let _ = rst.set_high();
    delay.delay_ms(RESET_DWELL_MS[2]);
}

/// Hardware-SPI interface implementation for the UC8179
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 SPI and GPIO traits.
/// CS is managed by the [`SpiDevice`].
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
/// * `BUSY` - Busy pin implementing [`InputPin`]
pub struct SpiInterface<SPI, DC, RST, BUSY> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: RST,
    /// Busy pin
    busy: BUSY,
    /// Timeout for busy-wait in milliseconds (0 = no timeout)
    busy_timeout_ms: u32,
    /// Busy pin polarity (true = active high)
    busy_active_high: bool,
}

impl<SPI, DC, RST, BUSY> SpiInterface<SPI, DC, RST, BUSY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
{
    /// Create a new SpiInterface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI device (must implement [`SpiDevice`])
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `rst` - Reset pin (output, active low)
    /// * `busy` - Busy pin (input)
    pub fn new(spi: SPI, dc: DC, rst: RST, busy: BUSY) -> Self {
        Self {
            spi,
            dc,
            rst,
            busy,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            busy_active_high: true,
        }
    }

    /// Set the busy-wait timeout in milliseconds
    ///
    /// Default is 30,000ms (30 seconds). Set to 0 to wait indefinitely.
    pub fn set_busy_timeout(&mut self, timeout_ms: u32) -> &mut Self {
        self.busy_timeout_ms = timeout_ms;
        self
    }

    /// Get the current busy-wait timeout in milliseconds
    pub fn busy_timeout(&self) -> u32 {
        self.busy_timeout_ms
    }

    /// Set busy pin polarity
    ///
    /// Default is active-high. Set to false for active-low panels.
    pub fn set_busy_active_high(&mut self, active_high: bool) -> &mut Self {
        self.busy_active_high = active_high;
        self
    }

    /// Get busy pin polarity (true = active high)
    pub fn busy_active_high(&self) -> bool {
        self.busy_active_high
    }
}

impl<SPI, DC, RST, BUSY, PinErr> DisplayInterface for SpiInterface<SPI, DC, RST, BUSY>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    BUSY: InputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(&[command]).map_err(InterfaceError::Bus)?;
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Bus)?;
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) {
        pulse_reset(&mut self.rst, delay);
    }

    fn busy_wait<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        poll_busy(
            &mut self.busy,
            self.busy_active_high,
            self.busy_timeout_ms,
            delay,
        )
    }
}

/// Bit-banged interface implementation for the UC8179
///
/// Clocks each byte MSB-first onto the data line, pulsing the clock line
/// high-then-low once per bit, with CS asserted (low) for the duration of
/// the byte and deasserted between bytes. This matches the controller's
/// byte-serial framing and keeps the bus quiet for any other listener
/// whenever a byte is not actively being clocked.
///
/// Intended for execution contexts without an SPI peripheral, such as an
/// ultra-low-power coprocessor that only has GPIO toggling available.
///
/// ## Type Parameters
///
/// * `SCK`, `SDIN`, `CS`, `DC`, `RST` - Output pins
/// * `BUSY` - Input pin
pub struct BitBangInterface<SCK, SDIN, CS, DC, RST, BUSY> {
    /// Serial clock line
    sck: SCK,
    /// Serial data line
    sdin: SDIN,
    /// Chip select line (active low)
    cs: CS,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: RST,
    /// Busy pin
    busy: BUSY,
    /// Timeout for busy-wait in milliseconds (0 = no timeout)
    busy_timeout_ms: u32,
    /// Busy pin polarity (true = active high)
    busy_active_high: bool,
}

impl<SCK, SDIN, CS, DC, RST, BUSY, PinErr> BitBangInterface<SCK, SDIN, CS, DC, RST, BUSY>
where
    SCK: OutputPin<Error = PinErr>,
    SDIN: OutputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    BUSY: InputPin<Error = PinErr>,
{
    /// Create a new BitBangInterface
    ///
    /// # Arguments
    ///
    /// * `sck` - Serial clock (output)
    /// * `sdin` - Serial data (output)
    /// * `cs` - Chip select (output, active low)
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `rst` - Reset pin (output, active low)
    /// * `busy` - Busy pin (input)
    pub fn new(sck: SCK, sdin: SDIN, cs: CS, dc: DC, rst: RST, busy: BUSY) -> Self {
        Self {
            sck,
            sdin,
            cs,
            dc,
            rst,
            busy,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            busy_active_high: true,
        }
    }

    /// Set the busy-wait timeout in milliseconds
    ///
    /// Default is 30,000ms (30 seconds). Set to 0 to wait indefinitely.
    pub fn set_busy_timeout(&mut self, timeout_ms: u32) -> &mut Self {
        self.busy_timeout_ms = timeout_ms;
        self
    }

    /// Get the current busy-wait timeout in milliseconds
    pub fn busy_timeout(&self) -> u32 {
        self.busy_timeout_ms
    }

    /// Set busy pin polarity
    ///
    /// Default is active-high. Set to false for active-low panels.
    pub fn set_busy_active_high(&mut self, active_high: bool) -> &mut Self {
        self.busy_active_high = active_high;
        self
    }

    /// Get busy pin polarity (true = active high)
    pub fn busy_active_high(&self) -> bool {
        self.busy_active_high
    }

    /// Clock one byte MSB-first, then release CS
    ///
    /// CS is left deasserted (high) on return; the caller asserts it
    /// before the byte.
    fn write_byte(
        &mut self,
        byte: u8,
    ) -> InterfaceResult<(), InterfaceError<core::convert::Infallible, PinErr>> {
        let mut byte = byte;
        for _ in 0..8 {
            if byte & 0x80 != 0 {
                self.sdin.set_high().map_err(InterfaceError::Pin)?;
            } else {
                self.sdin.set_low().map_err(InterfaceError::Pin)?;
            }
            byte <<= 1;
            self.sck.set_high().map_err(InterfaceError::Pin)?;
            self.sck.set_low().map_err(InterfaceError::Pin)?;
        }
        self.cs.set_high().map_err(InterfaceError::Pin)?;
        Ok(())
    }
}

impl<SCK, SDIN, CS, DC, RST, BUSY, PinErr> DisplayInterface
    for BitBangInterface<SCK, SDIN, CS, DC, RST, BUSY>
where
    SCK: OutputPin<Error = PinErr>,
    SDIN: OutputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    BUSY: InputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<core::convert::Infallible, PinErr>;

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.cs.set_low().map_err(InterfaceError::Pin)?;
        self.write_byte(command)
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        for &byte in data {
            self.cs.set_low().map_err(InterfaceError::Pin)?;
            self.write_byte(byte)?;
        }
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) {
        pulse_reset(&mut self.rst, delay);
    }

    fn busy_wait<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        poll_busy(
            &mut self.busy,
            self.busy_active_high,
            self.busy_timeout_ms,
            delay,
        )
    }
}
