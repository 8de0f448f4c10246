#![forbid(unsafe_code)]

//! Autoplay timers.
//!
//! The controller starts and cancels interval timers through a
//! [`Scheduler`]; the environment delivers each tick back with the
//! [`TimerHandle`] it belongs to. Two schedulers ship with the runtime:
//!
//! - [`ManualScheduler`]: a virtual clock advanced by the caller. Used by the
//!   replay harness and by every deterministic test.
//! - [`ThreadScheduler`](crate::thread_scheduler::ThreadScheduler): one
//!   background thread per timer, ticks delivered over a channel.
//!
//! # Invariants
//!
//! 1. Handles are never reused by one scheduler.
//! 2. Cancelling an unknown or already-cancelled handle is a no-op.
//! 3. A cancelled timer never produces another tick.

use web_time::Duration;

/// Opaque identifier of one running interval timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimerHandle(u64);

impl TimerHandle {
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Interval timer capability consumed by the controller.
pub trait Scheduler {
    /// Start a repeating timer. Ticks are delivered by the environment.
    fn start(&mut self, interval: Duration) -> TimerHandle;

    /// Stop a timer. Idempotent.
    fn cancel(&mut self, handle: TimerHandle);
}

// ---------------------------------------------------------------------------
// ManualScheduler
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct ManualTimer {
    handle: TimerHandle,
    interval: Duration,
    next_due: Duration,
}

/// Virtual-clock scheduler advanced explicitly by its owner.
///
/// ```ignore
/// let mut scheduler = ManualScheduler::new();
/// let handle = scheduler.start(Duration::from_secs(5));
/// assert!(scheduler.advance(Duration::from_secs(4)).is_empty());
/// assert_eq!(scheduler.advance(Duration::from_secs(1)), vec![handle]);
/// ```
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    issued: u64,
    timers: Vec<ManualTimer>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since construction.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers currently running.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    /// Advance the clock by `dt`, returning every tick that fell due in
    /// chronological order. A timer due several times yields several ticks.
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerHandle> {
        let target = self.now + dt;
        let mut due: Vec<(Duration, TimerHandle)> = Vec::new();

        for timer in &mut self.timers {
            // Zero intervals would never leave this loop.
            if timer.interval.is_zero() {
                continue;
            }
            while timer.next_due <= target {
                due.push((timer.next_due, timer.handle));
                timer.next_due += timer.interval;
            }
        }

        self.now = target;
        due.sort_by_key(|&(at, handle)| (at, handle));
        due.into_iter().map(|(_, handle)| handle).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn start(&mut self, interval: Duration) -> TimerHandle {
        self.issued += 1;
        let handle = TimerHandle(self.issued);
        self.timers.push(ManualTimer {
            handle,
            interval,
            next_due: self.now + interval,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|t| t.handle != handle);
    }
}
