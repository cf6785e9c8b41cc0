//! Periodic clock-refresh pass for a low-power execution context
//!
//! The host context keeps wall-clock time and publishes it through
//! [`SharedClockState`], then powers down. A hardware timer wakes this
//! coordinator, which renders the published time into its framebuffer and
//! drives the panel through a full update, recording progress markers as
//! each stage completes.
//!
//! The first wakeup is a handshake: the host uses it to seed the shared
//! fields before any real work, so the coordinator only counts it and
//! returns ([`WakeupOutcome::Seeded`]) without touching the panel. Every
//! later wakeup runs a full pass.
//!
//! There is no error channel back to the host other than the shared
//! progress markers. The wait flag is deliberately left raised when a
//! panel operation fails mid-wait: the host diagnoses a stall by seeing
//! the same marker frozen across wake cycles.

use embedded_hal::delay::DelayNs;

use crate::display::Display;
use crate::error::Error;
use crate::font::GlyphTable;
use crate::framebuffer::Framebuffer;
use crate::interface::DisplayInterface;
use crate::shared::SharedClockState;

/// What a wakeup did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WakeupOutcome {
    /// First-ever wakeup: shared state counted as seeded, panel untouched
    Seeded,
    /// Full pass: clock rendered, frame written, panel refreshed and asleep
    Refreshed,
}

/// Drives one panel update per timer wakeup
///
/// Owns the panel handle and framebuffer for the duration of the host's
/// sleep period; the host must not touch the panel while the coordinator
/// holds it.
pub struct RefreshCoordinator<'a, I, B>
where
    I: DisplayInterface,
{
    display: Display<I>,
    framebuffer: Framebuffer<B>,
    shared: &'a SharedClockState,
    font: &'static GlyphTable,
    /// Top-left origin of the clock readout, in pixels
    origin: (u16, u16),
}

impl<'a, I, B> RefreshCoordinator<'a, I, B>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Take ownership of the panel and framebuffer
    ///
    /// `origin` is the top-left pixel position of the clock readout. The
    /// framebuffer must match the display's configured dimensions; the
    /// mismatch surfaces from [`on_wakeup`](Self::on_wakeup) as a frame
    /// size error.
    pub fn new(
        display: Display<I>,
        framebuffer: Framebuffer<B>,
        shared: &'a SharedClockState,
        font: &'static GlyphTable,
        origin: (u16, u16),
    ) -> Self {
        Self {
            display,
            framebuffer,
            shared,
            font,
            origin,
        }
    }

    /// Handle one timer wakeup
    ///
    /// The first call only counts the wakeup and returns; subsequent calls
    /// run a full render-transfer-refresh-sleep pass, publishing progress
    /// markers as each stage completes.
    ///
    /// # Errors
    ///
    /// Propagates panel and drawing errors. On error the progress markers
    /// are left exactly as far as the pass got.
    pub fn on_wakeup<D: DelayNs>(&mut self, delay: &mut D) -> Result<WakeupOutcome, Error<I>> {
        if self.shared.record_wakeup() == 1 {
            log::debug!("first wakeup, seeding only");
            return Ok(WakeupOutcome::Seeded);
        }

        self.shared.reset_progress();
        self.shared.set_launched();
        log::debug!("wakeup {}: starting refresh pass", self.shared.wakeups());

        self.shared.set_waiting(true);
        self.display.initialize(delay)?;
        self.shared.set_waiting(false);
        self.shared.set_reset_done();

        let (hours, minutes) = self.shared.time();
        self.framebuffer.fill(crate::Color::White);
        self.framebuffer.compose_clock_text(
            self.origin.0,
            self.origin.1,
            hours,
            minutes,
            self.font,
        )?;

        self.shared.set_transfer_started();
        self.shared.set_waiting(true);
        self.display.write_frame(self.framebuffer.data(), delay)?;
        self.shared.set_waiting(false);
        self.shared
            .set_bytes_written(self.framebuffer.data().len() as u32);

        self.display.sleep(delay)?;
        self.shared.set_refresh_done();
        log::debug!("refresh pass complete, panel asleep");

        Ok(WakeupOutcome::Refreshed)
    }

    /// Hand the panel and framebuffer back to the host context
    pub fn release(self) -> (Display<I>, Framebuffer<B>) {
        (self.display, self.framebuffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command;
    use crate::config::{Builder, Dimensions};
    use crate::display::tests::{MockDelay, MockInterface};
    use crate::font::CLOCK_FONT;
    use crate::Color;

    fn test_coordinator(
        shared: &SharedClockState,
    ) -> RefreshCoordinator<'_, MockInterface, alloc::vec::Vec<u8>> {
        let dims = Dimensions::new(80, 48).unwrap();
        let config = Builder::new().dimensions(dims).build().unwrap();
        let display = Display::new(MockInterface::new(), config);
        let framebuffer = Framebuffer::allocate(dims);
        RefreshCoordinator::new(display, framebuffer, shared, &CLOCK_FONT, (8, 12))
    }

    #[test]
    fn test_first_wakeup_touches_nothing() {
        let shared = SharedClockState::new();
        let mut coordinator = test_coordinator(&shared);

        let outcome = coordinator.on_wakeup(&mut MockDelay).unwrap();
        assert_eq!(outcome, WakeupOutcome::Seeded);

        let (display, _) = coordinator.release();
        assert!(display.interface().commands.is_empty());
        assert_eq!(shared.wakeups(), 1);
        assert!(!shared.launched());
        assert!(!shared.reset_done());
        assert!(!shared.transfer_started());
        assert!(!shared.refresh_done());
    }

    #[test]
    fn test_second_wakeup_runs_full_pass() {
        let shared = SharedClockState::new();
        shared.set_time(14, 5);
        let mut coordinator = test_coordinator(&shared);

        coordinator.on_wakeup(&mut MockDelay).unwrap();
        let outcome = coordinator.on_wakeup(&mut MockDelay).unwrap();
        assert_eq!(outcome, WakeupOutcome::Refreshed);

        assert_eq!(shared.wakeups(), 2);
        assert!(shared.launched());
        assert!(shared.reset_done());
        assert!(shared.transfer_started());
        assert!(shared.refresh_done());
        assert!(!shared.waiting());
        assert_eq!(shared.bytes_written(), 80 * 48 / 8);

        let (display, _) = coordinator.release();
        let commands = &display.interface().commands;
        assert!(commands.contains(&command::TRANSFER_FRAME));
        assert!(commands.contains(&command::DISPLAY_REFRESH));
        assert!(commands.contains(&command::DEEP_SLEEP));
    }

    #[test]
    fn test_pass_streams_composed_clock_frame() {
        let shared = SharedClockState::new();
        shared.set_time(9, 30);
        let mut coordinator = test_coordinator(&shared);

        coordinator.on_wakeup(&mut MockDelay).unwrap();
        coordinator.on_wakeup(&mut MockDelay).unwrap();

        let mut expected = Framebuffer::allocate(Dimensions::new(80, 48).unwrap());
        expected.fill(Color::White);
        expected
            .compose_clock_text(8, 12, 9, 30, &CLOCK_FONT)
            .unwrap();

        let (display, _) = coordinator.release();
        let streamed: alloc::vec::Vec<u8> = display
            .interface()
            .command_data
            .iter()
            .filter(|(cmd, _)| *cmd == command::TRANSFER_FRAME)
            .flat_map(|(_, data)| data.iter().copied())
            .collect();
        assert_eq!(streamed.as_slice(), expected.data());
    }

    /// Fails the first refresh command it sees, leaving everything else
    /// working
    #[derive(Debug)]
    struct RefreshFailure {
        inner: MockInterface,
    }

    #[derive(Debug)]
    struct RefreshFault;

    impl crate::interface::DisplayInterface for RefreshFailure {
        type Error = RefreshFault;

        fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
            if command == command::DISPLAY_REFRESH {
                return Err(RefreshFault);
            }
            // MockInterface is infallible
            let _ = self.inner.send_command(command);
            Ok(())
        }

        fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            let _ = self.inner.send_data(data);
            Ok(())
        }

        fn reset<D: embedded_hal::delay::DelayNs>(&mut self, _delay: &mut D) {}

        fn busy_wait<D: embedded_hal::delay::DelayNs>(
            &mut self,
            _delay: &mut D,
        ) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_pass_freezes_markers_where_it_stopped() {
        let shared = SharedClockState::new();
        let dims = Dimensions::new(80, 48).unwrap();
        let config = Builder::new().dimensions(dims).build().unwrap();
        let display = Display::new(
            RefreshFailure {
                inner: MockInterface::new(),
            },
            config,
        );
        let framebuffer = Framebuffer::allocate(dims);
        let mut coordinator =
            RefreshCoordinator::new(display, framebuffer, &shared, &CLOCK_FONT, (0, 0));

        coordinator.on_wakeup(&mut MockDelay).unwrap();
        let result = coordinator.on_wakeup(&mut MockDelay);
        assert!(result.is_err());

        // Stages completed before the fault are marked, later ones are not
        assert!(shared.launched());
        assert!(shared.reset_done());
        assert!(shared.transfer_started());
        assert!(!shared.refresh_done());
        // The wait flag stays raised so the host can spot the stall
        assert!(shared.waiting());
    }

    #[test]
    fn test_repeated_wakeups_reinitialize_from_sleep() {
        let shared = SharedClockState::new();
        let mut coordinator = test_coordinator(&shared);

        coordinator.on_wakeup(&mut MockDelay).unwrap();
        coordinator.on_wakeup(&mut MockDelay).unwrap();
        // Panel is asleep now; the next pass must come back up via reset
        let outcome = coordinator.on_wakeup(&mut MockDelay).unwrap();
        assert_eq!(outcome, WakeupOutcome::Refreshed);
        assert_eq!(shared.wakeups(), 3);
        assert!(shared.refresh_done());
    }
}
