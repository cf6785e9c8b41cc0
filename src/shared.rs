//! Word-sized state shared between two execution contexts
//!
//! A battery-powered clock splits work between a host context that keeps
//! wall-clock time and a display context that wakes periodically to redraw
//! the panel. The two contexts exchange nothing but whole 32-bit words, so
//! every field here is an [`AtomicU32`] and every access is a single
//! word-sized load or store.
//!
//! Each field has exactly one writer. The host context writes the clock
//! fields ([`set_time`](SharedClockState::set_time)) and reads the progress
//! fields; the display context does the reverse. Because no field is ever
//! written from both sides, `Relaxed` ordering is sufficient: readers only
//! ever observe a value the single writer actually stored, never a torn
//! mixture of two writes.

use core::sync::atomic::{AtomicU32, Ordering};

/// Shared clock and refresh-progress state
///
/// Intended to live in a `static` reachable from both contexts:
///
/// ```
/// use uc8179::SharedClockState;
///
/// static SHARED: SharedClockState = SharedClockState::new();
/// SHARED.set_time(14, 5);
/// assert_eq!(SHARED.time(), (14, 5));
/// ```
pub struct SharedClockState {
    /// Hour of day, 0-23. Written by the host context.
    hours: AtomicU32,
    /// Minute of hour, 0-59. Written by the host context.
    minutes: AtomicU32,
    /// Number of times the display context has woken. Written by the
    /// display context.
    wakeups: AtomicU32,
    /// Nonzero once the display context has started a refresh pass.
    /// Written by the display context.
    launched: AtomicU32,
    /// Nonzero while the display context is blocked on the panel's busy
    /// line. Written by the display context.
    wait_flag: AtomicU32,
    /// Bytes of frame data pushed to the panel so far in the current
    /// pass. Written by the display context.
    bytes_written: AtomicU32,
    /// Nonzero once the panel reset and init sequence has completed.
    /// Written by the display context.
    reset_done: AtomicU32,
    /// Nonzero once the frame transfer has begun. Written by the display
    /// context.
    transfer_started: AtomicU32,
    /// Nonzero once the refresh has been issued and the panel put back to
    /// sleep. Written by the display context.
    refresh_done: AtomicU32,
}

impl SharedClockState {
    /// All fields zero: midnight, no wakeups, no progress
    pub const fn new() -> Self {
        Self {
            hours: AtomicU32::new(0),
            minutes: AtomicU32::new(0),
            wakeups: AtomicU32::new(0),
            launched: AtomicU32::new(0),
            wait_flag: AtomicU32::new(0),
            bytes_written: AtomicU32::new(0),
            reset_done: AtomicU32::new(0),
            transfer_started: AtomicU32::new(0),
            refresh_done: AtomicU32::new(0),
        }
    }

    /// Publish the current wall-clock time (host context)
    ///
    /// Values are stored modulo 24 and 60.
    pub fn set_time(&self, hours: u8, minutes: u8) {
        self.hours.store(u32::from(hours % 24), Ordering::Relaxed);
        self.minutes.store(u32::from(minutes % 60), Ordering::Relaxed);
    }

    /// The last published wall-clock time as `(hours, minutes)`
    pub fn time(&self) -> (u8, u8) {
        // Stored values are already range-reduced; the casts cannot truncate
        let hours = (self.hours.load(Ordering::Relaxed) % 24) as u8;
        let minutes = (self.minutes.load(Ordering::Relaxed) % 60) as u8;
        (hours, minutes)
    }

    /// Count one wakeup of the display context and return the new total
    pub fn record_wakeup(&self) -> u32 {
        self.wakeups.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Total wakeups of the display context so far
    pub fn wakeups(&self) -> u32 {
        self.wakeups.load(Ordering::Relaxed)
    }

    /// Mark the start of a refresh pass
    pub fn set_launched(&self) {
        self.launched.store(1, Ordering::Relaxed);
    }

    /// Whether a refresh pass has started
    pub fn launched(&self) -> bool {
        self.launched.load(Ordering::Relaxed) != 0
    }

    /// Raise or clear the busy-wait flag
    pub fn set_waiting(&self, waiting: bool) {
        self.wait_flag.store(u32::from(waiting), Ordering::Relaxed);
    }

    /// Whether the display context is blocked on the panel's busy line
    pub fn waiting(&self) -> bool {
        self.wait_flag.load(Ordering::Relaxed) != 0
    }

    /// Publish frame-transfer progress in bytes
    pub fn set_bytes_written(&self, bytes: u32) {
        self.bytes_written.store(bytes, Ordering::Relaxed);
    }

    /// Bytes of frame data pushed so far in the current pass
    pub fn bytes_written(&self) -> u32 {
        self.bytes_written.load(Ordering::Relaxed)
    }

    /// Mark panel reset and init complete
    pub fn set_reset_done(&self) {
        self.reset_done.store(1, Ordering::Relaxed);
    }

    /// Whether panel reset and init have completed
    pub fn reset_done(&self) -> bool {
        self.reset_done.load(Ordering::Relaxed) != 0
    }

    /// Mark the frame transfer as begun
    pub fn set_transfer_started(&self) {
        self.transfer_started.store(1, Ordering::Relaxed);
    }

    /// Whether the frame transfer has begun
    pub fn transfer_started(&self) -> bool {
        self.transfer_started.load(Ordering::Relaxed) != 0
    }

    /// Mark the refresh issued and the panel asleep
    pub fn set_refresh_done(&self) {
        self.refresh_done.store(1, Ordering::Relaxed);
    }

    /// Whether the refresh completed
    pub fn refresh_done(&self) -> bool {
        self.refresh_done.load(Ordering::Relaxed) != 0
    }

    /// Clear the per-pass progress fields for a fresh refresh
    ///
    /// The wakeup counter and published time are left alone.
    pub fn reset_progress(&self) {
        self.launched.store(0, Ordering::Relaxed);
        self.wait_flag.store(0, Ordering::Relaxed);
        self.bytes_written.store(0, Ordering::Relaxed);
        self.reset_done.store(0, Ordering::Relaxed);
        self.transfer_started.store(0, Ordering::Relaxed);
        self.refresh_done.store(0, Ordering::Relaxed);
    }
}

impl Default for SharedClockState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_zeroed() {
        let state = SharedClockState::new();
        assert_eq!(state.time(), (0, 0));
        assert_eq!(state.wakeups(), 0);
        assert!(!state.launched());
        assert!(!state.waiting());
        assert_eq!(state.bytes_written(), 0);
        assert!(!state.reset_done());
        assert!(!state.transfer_started());
        assert!(!state.refresh_done());
    }

    #[test]
    fn test_set_time_range_reduces() {
        let state = SharedClockState::new();
        state.set_time(25, 61);
        assert_eq!(state.time(), (1, 1));
        state.set_time(23, 59);
        assert_eq!(state.time(), (23, 59));
    }

    #[test]
    fn test_record_wakeup_counts_up() {
        let state = SharedClockState::new();
        assert_eq!(state.record_wakeup(), 1);
        assert_eq!(state.record_wakeup(), 2);
        assert_eq!(state.wakeups(), 2);
    }

    #[test]
    fn test_reset_progress_keeps_time_and_wakeups() {
        let state = SharedClockState::new();
        state.set_time(7, 45);
        state.record_wakeup();
        state.set_launched();
        state.set_waiting(true);
        state.set_bytes_written(480);
        state.set_reset_done();
        state.set_transfer_started();
        state.set_refresh_done();

        state.reset_progress();

        assert_eq!(state.time(), (7, 45));
        assert_eq!(state.wakeups(), 1);
        assert!(!state.launched());
        assert!(!state.waiting());
        assert_eq!(state.bytes_written(), 0);
        assert!(!state.reset_done());
        assert!(!state.transfer_started());
        assert!(!state.refresh_done());
    }
}
