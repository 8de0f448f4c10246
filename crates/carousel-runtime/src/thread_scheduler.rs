#![forbid(unsafe_code)]

//! Real-time autoplay timers backed by background threads.
//!
//! Each started timer runs on its own thread and sends its [`TimerHandle`]
//! through a channel every interval. The controller stays single-threaded:
//! the owner drains pending ticks with [`ThreadScheduler::drain`] (or blocks
//! in [`ThreadScheduler::recv_timeout`]) and forwards each handle to
//! `CarouselController::on_autoplay_tick`.
//!
//! # How it works
//!
//! 1. `start()` spawns a thread that waits on a stop signal with the
//!    interval as timeout.
//! 2. A timeout sends a tick; a triggered signal ends the loop.
//! 3. `cancel()` triggers the signal and joins the thread, so no tick from a
//!    cancelled timer can be sent afterwards.

use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread;

use web_time::Duration;

use crate::autoplay::{Scheduler, TimerHandle};

/// Signal for stopping a timer thread.
struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    /// Create a new stop signal pair (signal, trigger).
    fn new() -> (Self, StopTrigger) {
        let inner = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = Self {
            inner: Arc::clone(&inner),
        };
        (signal, StopTrigger { inner })
    }

    /// Wait for either the stop signal or a timeout.
    ///
    /// Returns `true` if stopped, `false` if timed out.
    fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        if *stopped {
            return true;
        }
        let (stopped, _) = cvar
            .wait_timeout_while(stopped, duration, |stopped| !*stopped)
            .unwrap_or_else(PoisonError::into_inner);
        *stopped
    }
}

/// Trigger to stop a timer from the owning side.
struct StopTrigger {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopTrigger {
    fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        *stopped = true;
        cvar.notify_all();
    }
}

/// A running timer thread.
struct RunningTimer {
    handle: TimerHandle,
    trigger: StopTrigger,
    thread: Option<thread::JoinHandle<()>>,
}

impl RunningTimer {
    /// Stop the timer and join its thread.
    fn stop(mut self) {
        self.trigger.stop();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for RunningTimer {
    fn drop(&mut self) {
        self.trigger.stop();
        // Don't join in drop to avoid blocking
    }
}

/// Scheduler running one background thread per interval timer.
pub struct ThreadScheduler {
    issued: u64,
    running: Vec<RunningTimer>,
    sender: mpsc::Sender<TimerHandle>,
    receiver: mpsc::Receiver<TimerHandle>,
}

impl std::fmt::Debug for ThreadScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadScheduler")
            .field("issued", &self.issued)
            .field("running", &self.running.len())
            .finish()
    }
}

impl Default for ThreadScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadScheduler {
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            issued: 0,
            running: Vec::new(),
            sender,
            receiver,
        }
    }

    /// Number of timer threads currently running.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.running.len()
    }

    /// Drain every tick delivered so far without blocking.
    pub fn drain(&self) -> Vec<TimerHandle> {
        self.receiver.try_iter().collect()
    }

    /// Block until the next tick or until `timeout` elapses.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<TimerHandle> {
        self.receiver.recv_timeout(timeout).ok()
    }

    /// Stop all running timers.
    pub fn stop_all(&mut self) {
        for running in self.running.drain(..) {
            running.stop();
        }
    }
}

impl Scheduler for ThreadScheduler {
    fn start(&mut self, interval: Duration) -> TimerHandle {
        self.issued += 1;
        let handle = TimerHandle::from_raw(self.issued);
        let (signal, trigger) = StopSignal::new();
        let sender = self.sender.clone();

        tracing::debug!(timer = handle.id(), ?interval, "Starting autoplay timer thread");
        let thread = thread::spawn(move || {
            loop {
                if signal.wait_timeout(interval) {
                    break;
                }
                if sender.send(handle).is_err() {
                    break;
                }
            }
        });

        self.running.push(RunningTimer {
            handle,
            trigger,
            thread: Some(thread),
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(pos) = self.running.iter().position(|r| r.handle == handle) {
            tracing::debug!(timer = handle.id(), "Stopping autoplay timer thread");
            self.running.swap_remove(pos).stop();
        }
    }
}

impl Drop for ThreadScheduler {
    fn drop(&mut self) {
        self.stop_all();
    }
}
