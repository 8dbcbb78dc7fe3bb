//! Timer event contract for subscribers.
//!
//! # Responsibility
//! - Define the callback interface a timer drives and the event payload it
//!   carries.
//! - Provide the shared `H:MM:SS` formatting used by events and displays.
//!
//! # Invariants
//! - Minutes and seconds are zero-padded to two digits; hours are not
//!   padded and may exceed one digit.

use uuid::Uuid;

/// Subscription handle returned by `WorkTimer::subscribe`.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ListenerId = Uuid;

/// Snapshot of remaining time carried by every timer event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerEvent {
    /// Remaining whole seconds after this event (zero for time-up).
    pub remaining_seconds: u64,
    /// The same value formatted as `H:MM:SS`.
    pub display: String,
}

impl TimerEvent {
    pub(crate) fn new(remaining_seconds: u64) -> Self {
        Self {
            remaining_seconds,
            display: format_remaining(remaining_seconds),
        }
    }
}

/// Formats whole seconds as `H:MM:SS`.
pub fn format_remaining(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}

/// Observer of one timer's countdown.
///
/// Callbacks run on the timer's driver thread. Implementations marshal to
/// their own context as needed and should return quickly; a slow callback
/// delays subsequent ticks of the same timer but no other timer.
pub trait TimerListener: Send + Sync {
    /// One interval elapsed and the remaining time was decremented.
    fn on_tick(&self, event: &TimerEvent);

    /// The countdown reached zero. Always the final event of a run.
    fn on_time_up(&self, event: &TimerEvent);
}
