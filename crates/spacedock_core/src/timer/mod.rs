//! Concurrent countdown engine.
//!
//! # Responsibility
//! - Drive one background thread per running timer that decrements the
//!   remaining time once per interval and notifies subscribed listeners.
//! - Guarantee race-free cancellation and exactly-once time-up delivery.
//!
//! # Invariants
//! - At most one driver thread is active per timer instance; `run` while
//!   running fails instead of stacking drivers.
//! - Ticks arrive in strictly decreasing remaining-time order; time-up is
//!   always the final event of a run.
//! - Once an external `cancel` returns, no further event is delivered for
//!   that run.
//! - A panicking listener never affects other listeners or timer state.

mod listener;

pub use listener::{format_remaining, ListenerId, TimerEvent, TimerListener};

use log::{info, warn};
use std::any::Any;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Default tick interval: one wall-clock second.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

pub type TimerResult<T> = Result<T, TimerError>;

/// Lifecycle errors from countdown control calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// The operation requires the timer to not be running.
    AlreadyRunning,
    /// `pause` requires a running timer.
    NotRunning,
    /// `resume` requires a paused timer.
    NotPaused,
}

impl Display for TimerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyRunning => write!(f, "timer is already running"),
            Self::NotRunning => write!(f, "timer is not running"),
            Self::NotPaused => write!(f, "timer is not paused"),
        }
    }
}

impl Error for TimerError {}

/// Countdown phase. Expiry is not a phase of its own: a timer that fired
/// time-up is back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running,
    Paused,
}

struct TimerState {
    remaining_seconds: u64,
    phase: Phase,
    stop_requested: bool,
    /// Bumped on every driver start so a superseded driver can tell it has
    /// been replaced even after `stop_requested` was cleared for the next run.
    epoch: u64,
}

struct ListenerEntry {
    id: ListenerId,
    listener: Arc<dyn TimerListener>,
}

struct Shared {
    state: Mutex<TimerState>,
    wake: Condvar,
    listeners: Mutex<Vec<ListenerEntry>>,
    interval: Duration,
}

/// Countdown work timer with listener-based tick and time-up delivery.
///
/// Control methods take `&self`; the timer synchronizes internally so a
/// listener callback may call back into its own timer.
pub struct WorkTimer {
    shared: Arc<Shared>,
    driver: Mutex<Option<JoinHandle<()>>>,
}

impl WorkTimer {
    /// Creates an idle timer for `hours` and `minutes` at the default
    /// one-second interval. Minutes above 59 carry over into hours.
    pub fn new(hours: u32, minutes: u32) -> Self {
        Self::with_interval(hours, minutes, DEFAULT_TICK_INTERVAL)
    }

    /// Creates an idle timer with an explicit tick interval.
    ///
    /// Short intervals keep countdown tests fast; the remaining time still
    /// decrements by one logical second per tick.
    pub fn with_interval(hours: u32, minutes: u32, interval: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(TimerState {
                    remaining_seconds: total_seconds(hours, minutes),
                    phase: Phase::Idle,
                    stop_requested: false,
                    epoch: 0,
                }),
                wake: Condvar::new(),
                listeners: Mutex::new(Vec::new()),
                interval,
            }),
            driver: Mutex::new(None),
        }
    }

    /// Starts the countdown driver.
    ///
    /// The first tick fires one interval after this call. Fails with
    /// `AlreadyRunning` when a driver is already active; running a paused
    /// timer continues from its remembered remaining time.
    pub fn run(&self) -> TimerResult<()> {
        // Phase gate before reaping: only a stopped or expired driver may be
        // joined here, never a live one.
        if self.is_running() {
            return Err(TimerError::AlreadyRunning);
        }
        self.reap_driver();
        let mut driver = lock(&self.driver);
        let mut state = lock(&self.shared.state);
        if state.phase == Phase::Running {
            return Err(TimerError::AlreadyRunning);
        }
        info!(
            "event=timer_run module=timer status=ok remaining={}",
            format_remaining(state.remaining_seconds)
        );
        self.start_driver(&mut driver, &mut state);
        Ok(())
    }

    /// Stops the countdown without firing time-up.
    ///
    /// Synchronous and idempotent. When called from outside the timer's own
    /// callbacks, the driver thread is joined and no tick or time-up is
    /// delivered after this returns. A cancel issued from inside a callback
    /// cannot join its own thread; the run still ends before the next event.
    pub fn cancel(&self) {
        let was_running = {
            let mut state = lock(&self.shared.state);
            let was_running = state.phase == Phase::Running;
            state.phase = Phase::Idle;
            state.stop_requested = true;
            was_running
        };
        self.shared.wake.notify_all();
        self.reap_driver();
        if was_running {
            info!(
                "event=timer_cancel module=timer status=ok remaining={}",
                self.display()
            );
        }
    }

    /// Stops the driver but keeps the remaining time for `resume`.
    pub fn pause(&self) -> TimerResult<()> {
        {
            let mut state = lock(&self.shared.state);
            if state.phase != Phase::Running {
                return Err(TimerError::NotRunning);
            }
            state.phase = Phase::Paused;
            state.stop_requested = true;
        }
        self.shared.wake.notify_all();
        self.reap_driver();
        info!(
            "event=timer_pause module=timer status=ok remaining={}",
            self.display()
        );
        Ok(())
    }

    /// Restarts a paused countdown from its remembered remaining time.
    pub fn resume(&self) -> TimerResult<()> {
        if !self.is_paused() {
            return Err(TimerError::NotPaused);
        }
        self.reap_driver();
        let mut driver = lock(&self.driver);
        let mut state = lock(&self.shared.state);
        if state.phase != Phase::Paused {
            return Err(TimerError::NotPaused);
        }
        info!(
            "event=timer_resume module=timer status=ok remaining={}",
            format_remaining(state.remaining_seconds)
        );
        self.start_driver(&mut driver, &mut state);
        Ok(())
    }

    /// Sets the remaining time. Rejected while the countdown is running.
    pub fn set_time(&self, hours: u32, minutes: u32) -> TimerResult<()> {
        let mut state = lock(&self.shared.state);
        if state.phase == Phase::Running {
            return Err(TimerError::AlreadyRunning);
        }
        state.remaining_seconds = total_seconds(hours, minutes);
        Ok(())
    }

    /// Extends the countdown by whole minutes.
    ///
    /// Allowed in every phase; while running, the extension is picked up on
    /// the next tick.
    pub fn add_time(&self, minutes: u32) {
        let mut state = lock(&self.shared.state);
        state.remaining_seconds += u64::from(minutes) * 60;
    }

    /// Registers a listener; events arrive on the driver thread.
    ///
    /// Safe to call at any time, including from inside a callback of this
    /// same timer. A listener subscribed mid-dispatch sees events from the
    /// next one onward.
    pub fn subscribe(&self, listener: Arc<dyn TimerListener>) -> ListenerId {
        let id = Uuid::new_v4();
        lock(&self.shared.listeners).push(ListenerEntry { id, listener });
        id
    }

    /// Removes a subscription; returns whether it existed.
    ///
    /// Safe to call from inside a callback; removal takes effect from the
    /// next event.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = lock(&self.shared.listeners);
        let before = listeners.len();
        listeners.retain(|entry| entry.id != id);
        listeners.len() != before
    }

    pub fn remaining_seconds(&self) -> u64 {
        lock(&self.shared.state).remaining_seconds
    }

    /// Remaining time formatted as `H:MM:SS`.
    pub fn display(&self) -> String {
        format_remaining(self.remaining_seconds())
    }

    pub fn is_running(&self) -> bool {
        lock(&self.shared.state).phase == Phase::Running
    }

    pub fn is_paused(&self) -> bool {
        lock(&self.shared.state).phase == Phase::Paused
    }

    fn start_driver(&self, driver: &mut Option<JoinHandle<()>>, state: &mut TimerState) {
        state.phase = Phase::Running;
        state.stop_requested = false;
        state.epoch += 1;
        let epoch = state.epoch;
        let shared = Arc::clone(&self.shared);
        *driver = Some(thread::spawn(move || drive(shared, epoch)));
    }

    /// Takes the stored driver handle and joins it.
    ///
    /// The join happens with no lock held, so a driver blocked on one of our
    /// mutexes (a callback calling back into the timer) can always make
    /// progress. A thread cannot join itself; in that case the handle is
    /// dropped and the epoch check ends the run.
    fn reap_driver(&self) {
        let handle = lock(&self.driver).take();
        let Some(handle) = handle else { return };
        if handle.thread().id() == thread::current().id() {
            return;
        }
        if handle.join().is_err() {
            warn!("event=timer_driver module=timer status=error reason=driver_panic");
        }
    }
}

impl Drop for WorkTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for WorkTimer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let state = lock(&self.shared.state);
        f.debug_struct("WorkTimer")
            .field("remaining_seconds", &state.remaining_seconds)
            .field("phase", &state.phase)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy)]
enum EventKind {
    Tick,
    TimeUp,
}

fn total_seconds(hours: u32, minutes: u32) -> u64 {
    u64::from(hours) * 3600 + u64::from(minutes) * 60
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Poison only occurs if a holder panicked; the state behind these locks
    // stays consistent across plain field updates, so recover the guard
    // instead of cascading the panic into control calls.
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn run_ended(state: &TimerState, epoch: u64) -> bool {
    state.stop_requested || state.epoch != epoch
}

/// Driver loop: wait one interval, advance, deliver, repeat.
///
/// Deadlines are absolute (`next_deadline += interval`) so slow listener
/// callbacks do not stretch the cadence of later ticks.
fn drive(shared: Arc<Shared>, epoch: u64) {
    let interval = shared.interval;
    let mut next_deadline = Instant::now() + interval;
    loop {
        if wait_for_deadline(&shared, epoch, next_deadline) {
            return;
        }
        next_deadline += interval;

        let event;
        let timed_up;
        {
            let mut state = lock(&shared.state);
            if run_ended(&state, epoch) {
                return;
            }
            if state.remaining_seconds == 0 {
                state.phase = Phase::Idle;
                timed_up = true;
                event = TimerEvent::new(0);
            } else {
                state.remaining_seconds -= 1;
                timed_up = false;
                event = TimerEvent::new(state.remaining_seconds);
            }
        }

        if timed_up {
            info!("event=timer_time_up module=timer status=ok");
            deliver(&shared, epoch, EventKind::TimeUp, &event);
            return;
        }
        deliver(&shared, epoch, EventKind::Tick, &event);
    }
}

/// Blocks until `deadline`, waking early on stop or epoch change.
///
/// Returns `true` when the run should end without firing.
fn wait_for_deadline(shared: &Shared, epoch: u64, deadline: Instant) -> bool {
    let mut state = lock(&shared.state);
    loop {
        if run_ended(&state, epoch) {
            return true;
        }
        let now = Instant::now();
        if now >= deadline {
            return false;
        }
        let (guard, _timed_out) = shared
            .wake
            .wait_timeout(state, deadline - now)
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        state = guard;
    }
}

/// Dispatches one event to a snapshot of the listener registry.
///
/// The snapshot lets callbacks subscribe or unsubscribe on this same timer
/// without deadlocking; registry changes apply from the next event. Time-up
/// always reaches every snapshotted listener; tick dispatch re-checks for a
/// cancel issued mid-loop (necessarily by a callback on this thread) and
/// drops the remaining deliveries.
fn deliver(shared: &Shared, epoch: u64, kind: EventKind, event: &TimerEvent) {
    let snapshot: Vec<(ListenerId, Arc<dyn TimerListener>)> = lock(&shared.listeners)
        .iter()
        .map(|entry| (entry.id, Arc::clone(&entry.listener)))
        .collect();
    for (id, listener) in snapshot {
        if matches!(kind, EventKind::Tick) && run_ended(&lock(&shared.state), epoch) {
            return;
        }
        let delivery = catch_unwind(AssertUnwindSafe(|| match kind {
            EventKind::Tick => listener.on_tick(event),
            EventKind::TimeUp => listener.on_time_up(event),
        }));
        if let Err(payload) = delivery {
            warn!(
                "event=timer_listener module=timer status=error listener={id} reason=listener_panic payload={}",
                panic_summary(payload.as_ref())
            );
        }
    }
}

fn panic_summary(payload: &(dyn Any + Send)) -> String {
    let message = if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        return "<non-string panic payload>".to_string();
    };
    let mut summary: String = message
        .replace(['\n', '\r'], " ")
        .chars()
        .take(160)
        .collect();
    if summary.len() < message.len() {
        summary.push_str("...");
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_seconds_carries_minutes_into_hours() {
        assert_eq!(total_seconds(0, 0), 0);
        assert_eq!(total_seconds(2, 30), 9000);
        assert_eq!(total_seconds(0, 75), 4500);
    }

    #[test]
    fn panic_summary_flattens_and_caps_payloads() {
        assert_eq!(panic_summary(&"boom"), "boom");
        assert_eq!(
            panic_summary(&String::from("line one\nline two")),
            "line one line two"
        );
        let long = "x".repeat(500);
        let summary = panic_summary(&long);
        assert!(summary.ends_with("..."));
        assert!(summary.chars().count() <= 163);
    }

    #[test]
    fn fresh_timer_is_idle_with_full_remaining() {
        let timer = WorkTimer::new(1, 15);
        assert!(!timer.is_running());
        assert!(!timer.is_paused());
        assert_eq!(timer.remaining_seconds(), 4500);
        assert_eq!(timer.display(), "1:15:00");
    }
}
