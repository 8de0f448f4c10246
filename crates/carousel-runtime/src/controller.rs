#![forbid(unsafe_code)]

//! The carousel controller: gesture-to-pane state machine.
//!
//! [`CarouselController`] owns the navigational state of one carousel (the
//! committed pane, the user pause flag, the autoplay timer, and the pending
//! transition). It consumes three interleaved event sources on a single
//! thread:
//!
//! 1. classified gestures ([`handle_gesture`](CarouselController::handle_gesture)),
//! 2. autoplay ticks ([`on_autoplay_tick`](CarouselController::on_autoplay_tick)),
//! 3. settle reports from the surface ([`settle`](CarouselController::settle)).
//!
//! # State Machine
//!
//! ```text
//!                 to / next / prev / release / swipe
//!   ┌──────┐  ─────────────────────────────────────▶  ┌─────────┐
//!   │ Idle │                                          │ Pending │
//!   └──────┘  ◀─────────────────────────────────────  └─────────┘
//!      ▲ │              settle(ticket)                  drops gestures and
//!      └─┘ drag: track finger, no commit                ticks; to / next /
//!                                                       prev supersede
//! ```
//!
//! # Invariants
//!
//! 1. `current_pane` is always in `[0, pane_count - 1]`.
//! 2. The indicator never shows a pane whose transition has not settled.
//! 3. At most one autoplay timer is outstanding; ticks from any other handle
//!    are ignored.
//! 4. While a transition is pending, gestures and autoplay ticks are dropped
//!    without state change or notification. Programmatic navigation replaces
//!    the pending transition; the superseded ticket becomes stale.
//! 5. A carousel with one pane or fewer is disabled at construction and
//!    ignores every operation.
//!
//! # Failure Modes
//!
//! Nothing here fails. Out-of-range targets are ignored or clamped, and
//! degenerate geometry produces zero movement.

use std::time::Duration;

use carousel_core::{CarouselConfig, Direction, GestureEvent, GestureKind, Measurements, PaneGeometry};

use crate::autoplay::{ManualScheduler, Scheduler, TimerHandle};
use crate::notify::{CarouselListener, ListenerId, Listeners, Notification, SlideEvent};
use crate::surface::{Animate, OffsetRequest, PaneSurface};
use crate::transition::{SettleTicket, TransitionPhase, TransitionState};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Whether the controller accepts operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Lifecycle {
    #[default]
    Active,
    /// Permanently static; indicators hidden, every operation a no-op.
    Disabled,
}

/// Sentinel returned by [`CarouselController::disable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct Disabled;

/// Snapshot of the navigational state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarouselState {
    /// Intended pane; visually committed once `sliding` is false.
    pub current_pane: usize,
    pub pane_count: usize,
    /// User-initiated pause in effect.
    pub paused: bool,
    /// A controller-initiated transition is being processed.
    pub sliding: bool,
    /// An animated transition has not settled yet.
    pub on_gesture: bool,
    pub autoplay_active: bool,
    pub lifecycle: Lifecycle,
}

/// What the controller did with a gesture event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// Dropped: a transition was in flight or the carousel is disabled.
    Ignored,
    /// Finger tracked; `offset` is the applied track offset in percent.
    Tracked { offset: f64 },
    /// A swipe committed a pane change.
    Swiped { direction: Direction },
    /// A release past the threshold committed a pane change.
    Committed { direction: Direction },
    /// A release short of the threshold snapped back to the current pane.
    SnappedBack,
}

impl GestureOutcome {
    /// Whether the recognizer should stop classifying the current gesture.
    #[must_use]
    pub const fn stops_detection(self) -> bool {
        matches!(self, Self::Swiped { .. })
    }

    /// Whether the event was dropped.
    #[must_use]
    pub const fn is_ignored(self) -> bool {
        matches!(self, Self::Ignored)
    }
}

// ---------------------------------------------------------------------------
// CarouselController
// ---------------------------------------------------------------------------

/// Gesture-driven pane controller for one carousel.
#[derive(Debug)]
pub struct CarouselController<S, T = ManualScheduler> {
    measurements: Measurements,
    geometry: PaneGeometry,
    config: CarouselConfig,

    surface: S,
    scheduler: T,

    current: usize,
    paused: bool,
    autoplay: Option<TimerHandle>,
    transition: TransitionState,
    lifecycle: Lifecycle,

    listeners: Listeners,
}

impl<S: PaneSurface, T: Scheduler> CarouselController<S, T> {
    /// Attach a controller to a measured carousel.
    ///
    /// Sizes the track, marks pane 0 active, and starts autoplay when an
    /// interval is configured. With one pane or fewer the controller is
    /// disabled immediately.
    pub fn new(measurements: Measurements, config: CarouselConfig, surface: S, scheduler: T) -> Self {
        let geometry = measurements.geometry();
        let mut controller = Self {
            measurements,
            geometry,
            config: config.sanitized(),
            surface,
            scheduler,
            current: 0,
            paused: false,
            autoplay: None,
            transition: TransitionState::new(),
            lifecycle: Lifecycle::Active,
            listeners: Listeners::new(),
        };

        if geometry.pane_count <= 1 {
            tracing::debug!(
                pane_count = geometry.pane_count,
                "Carousel has too few panes; disabling"
            );
            let Disabled = controller.disable();
            return controller;
        }

        controller.size_track();
        controller.show_pane(0, false);
        controller.cycle(false);
        controller
    }

    // --- Accessors ---

    #[inline]
    #[must_use]
    pub fn current_pane(&self) -> usize {
        self.current
    }

    #[inline]
    #[must_use]
    pub fn pane_count(&self) -> usize {
        self.geometry.pane_count
    }

    #[inline]
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// A controller-initiated transition is being processed.
    #[inline]
    #[must_use]
    pub fn is_sliding(&self) -> bool {
        self.transition.is_pending()
    }

    /// An animated transition has not settled yet.
    #[inline]
    #[must_use]
    pub fn is_on_gesture(&self) -> bool {
        self.transition.is_pending()
    }

    #[inline]
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.lifecycle == Lifecycle::Disabled
    }

    #[must_use]
    pub fn transition_phase(&self) -> TransitionPhase {
        self.transition.phase()
    }

    /// Handle of the running autoplay timer, if any.
    #[must_use]
    pub fn autoplay_handle(&self) -> Option<TimerHandle> {
        self.autoplay
    }

    #[must_use]
    pub fn geometry(&self) -> &PaneGeometry {
        &self.geometry
    }

    /// Effective (sanitized) configuration.
    #[must_use]
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut T {
        &mut self.scheduler
    }

    #[must_use]
    pub fn state(&self) -> CarouselState {
        CarouselState {
            current_pane: self.current,
            pane_count: self.geometry.pane_count,
            paused: self.paused,
            sliding: self.is_sliding(),
            on_gesture: self.is_on_gesture(),
            autoplay_active: self.autoplay.is_some(),
            lifecycle: self.lifecycle,
        }
    }

    // --- Listeners ---

    /// Subscribe to lifecycle notifications.
    ///
    /// Listeners on a disabled carousel are accepted but never notified.
    pub fn subscribe(&mut self, listener: impl CarouselListener + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // --- Navigation ---

    /// Move to pane `index`. Out-of-range indices are ignored.
    pub fn to(&mut self, index: usize) {
        if index >= self.geometry.pane_count || !self.accepts_navigation("to") {
            return;
        }
        self.show_pane(to_signed(index), true);
    }

    /// Move one pane forward (the track slides left).
    pub fn next(&mut self) {
        if !self.accepts_navigation("next") {
            return;
        }
        let from = self.current;
        let related_target = Some(from + 1).filter(|&i| i < self.geometry.pane_count);
        self.slide(Direction::Left, related_target, to_signed(from) + 1);
    }

    /// Move one pane back (the track slides right).
    pub fn prev(&mut self) {
        if !self.accepts_navigation("prev") {
            return;
        }
        let from = self.current;
        self.slide(Direction::Right, from.checked_sub(1), to_signed(from) - 1);
    }

    /// Stop autoplay. A user-initiated pause also suppresses restarts until
    /// a programmatic `cycle(false)`.
    pub fn pause(&mut self, user_initiated: bool) {
        if self.is_disabled() {
            return;
        }
        if user_initiated {
            self.paused = true;
        }
        self.stop_timer();
    }

    /// (Re)start autoplay. A programmatic call clears a user pause first.
    pub fn cycle(&mut self, user_initiated: bool) {
        if self.is_disabled() {
            return;
        }
        if !user_initiated {
            self.paused = false;
        }
        self.stop_timer();

        if let Some(interval) = self.config.interval
            && !self.paused
        {
            let handle = self.scheduler.start(interval);
            tracing::debug!(timer = handle.id(), ?interval, "Autoplay started");
            self.autoplay = Some(handle);
        }
    }

    /// Permanently disable the carousel.
    ///
    /// Hides indicators, stops autoplay, abandons any pending transition,
    /// and detaches every listener.
    pub fn disable(&mut self) -> Disabled {
        self.stop_timer();
        self.transition.abandon();
        self.surface.hide_indicators();
        self.listeners.clear();
        self.lifecycle = Lifecycle::Disabled;
        Disabled
    }

    // --- Event sources ---

    /// Feed one classified gesture event.
    pub fn handle_gesture(&mut self, event: &GestureEvent) -> GestureOutcome {
        if self.is_disabled() {
            return GestureOutcome::Ignored;
        }
        let _span = tracing::debug_span!(
            "carousel_gesture",
            kind = %event.kind,
            delta_x = event.delta_x,
            pane = self.current
        )
        .entered();

        if self.transition.is_pending() {
            tracing::trace!("Transition in flight; gesture dropped");
            return GestureOutcome::Ignored;
        }

        self.pause(false);

        match event.kind {
            GestureKind::DragLeft | GestureKind::DragRight => {
                let offset = self.tracking_offset(event);
                tracing::trace!(offset, "Tracking drag");
                self.surface.apply_offset(OffsetRequest::tracking(offset));
                GestureOutcome::Tracked { offset }
            }
            GestureKind::SwipeLeft => {
                self.next();
                GestureOutcome::Swiped {
                    direction: Direction::Left,
                }
            }
            GestureKind::SwipeRight => {
                self.prev();
                GestureOutcome::Swiped {
                    direction: Direction::Right,
                }
            }
            GestureKind::Release => {
                if self.geometry.exceeds_release_threshold(event.delta_x) {
                    match event.direction {
                        Direction::Right => self.prev(),
                        Direction::Left => self.next(),
                    }
                    GestureOutcome::Committed {
                        direction: event.direction,
                    }
                } else {
                    self.show_pane(to_signed(self.current), true);
                    GestureOutcome::SnappedBack
                }
            }
        }
    }

    /// Deliver an autoplay tick. Ticks from stale handles are ignored.
    pub fn on_autoplay_tick(&mut self, handle: TimerHandle) {
        if self.is_disabled() || self.autoplay != Some(handle) {
            tracing::trace!(timer = handle.id(), "Stale autoplay tick ignored");
            return;
        }
        if self.transition.is_pending() {
            tracing::trace!(timer = handle.id(), "Transition in flight; tick dropped");
            return;
        }
        self.next();
    }

    /// Report that the animated transition identified by `ticket` settled.
    ///
    /// Returns true if the ticket committed a pane.
    pub fn settle(&mut self, ticket: SettleTicket) -> bool {
        if self.is_disabled() {
            return false;
        }
        match self.transition.settle(ticket) {
            Some(index) => {
                self.commit(index);
                true
            }
            None => {
                tracing::trace!(ticket = ticket.id(), "Stale settle ignored");
                false
            }
        }
    }

    /// Re-measure after a viewport resize or orientation change.
    ///
    /// The committed pane and any pending transition are untouched: offsets
    /// are percentages of the track, so only the track sizing changes.
    pub fn resize(&mut self, viewport_width: f64) {
        if self.is_disabled() {
            return;
        }
        self.measurements.viewport_width = viewport_width;
        self.geometry = self.measurements.geometry();
        tracing::debug!(
            pane_width = self.geometry.pane_width,
            item_width = self.geometry.item_width,
            "Carousel resized"
        );
        self.size_track();
    }

    // --- Internals ---

    fn accepts_navigation(&self, op: &'static str) -> bool {
        if self.is_disabled() {
            return false;
        }
        if let TransitionPhase::Pending { target, .. } = self.transition.phase() {
            tracing::trace!(op, superseded = target, "Replacing pending transition");
        }
        true
    }

    fn slide(&mut self, direction: Direction, related_target: Option<usize>, requested: isize) {
        let from = self.current;
        self.listeners.emit(Notification::Slide(SlideEvent {
            direction,
            related_target,
            from,
        }));
        self.show_pane(requested, true);
        self.listeners.emit(Notification::Slid {
            index: self.current,
        });
    }

    /// Pane transition: clear marker, pause past the end, clamp, apply.
    fn show_pane(&mut self, requested: isize, animate: bool) {
        let Some(last) = self.geometry.last_index() else {
            return;
        };

        self.surface.set_active(self.current, false);

        // Overshooting the last pane (autoplay's own next()) halts autoplay
        // before the index is clamped.
        if requested >= to_signed(self.geometry.pane_count) {
            self.pause(false);
        }

        let index = usize::try_from(requested.max(0)).unwrap_or(0).min(last);
        self.current = index;
        let offset = self.geometry.pane_offset(index);

        if animate {
            let ticket = self.transition.begin(index);
            tracing::debug!(pane = index, offset, ticket = ticket.id(), "Pane transition issued");
            self.surface
                .apply_offset(OffsetRequest::animated(offset, index, ticket));
        } else {
            self.surface
                .apply_offset(OffsetRequest::immediate(offset, index));
            self.commit(index);
        }
    }

    fn commit(&mut self, index: usize) {
        tracing::debug!(pane = index, "Pane committed");
        self.surface.set_active(index, true);
        self.surface.show_indicator(index);
        self.listeners
            .emit(Notification::IndicatorsSynced { index });
    }

    fn tracking_offset(&self, event: &GestureEvent) -> f64 {
        let mut drag = self.geometry.drag_offset(event.delta_x);
        let last = self.geometry.last_index().unwrap_or(0);
        let past_first = self.current == 0 && event.direction == Direction::Right;
        let past_last = self.current == last && event.direction == Direction::Left;
        if past_first || past_last {
            drag *= self.config.toughness;
        }
        drag + self.geometry.pane_offset(self.current)
    }

    fn size_track(&mut self) {
        self.surface.size_track(
            self.geometry.track_width(),
            self.geometry.item_width,
            self.geometry.pane_count,
        );
    }

    fn stop_timer(&mut self) {
        if let Some(handle) = self.autoplay.take() {
            self.scheduler.cancel(handle);
            tracing::debug!(timer = handle.id(), "Autoplay stopped");
        }
    }
}

impl<S: PaneSurface + Animate, T: Scheduler> CarouselController<S, T> {
    /// Advance surface animations by `dt`, forwarding any settle.
    ///
    /// Returns true if a pane was committed.
    pub fn advance_surface(&mut self, dt: Duration) -> bool {
        match self.surface.advance(dt) {
            Some(ticket) => self.settle(ticket),
            None => false,
        }
    }
}

impl<S: PaneSurface> CarouselController<S, ManualScheduler> {
    /// Advance the virtual autoplay clock by `dt`, delivering due ticks.
    ///
    /// Returns the number of ticks delivered (stale ones included).
    pub fn advance_timers(&mut self, dt: Duration) -> usize {
        let due = self.scheduler.advance(dt);
        let delivered = due.len();
        for handle in due {
            self.on_autoplay_tick(handle);
        }
        delivered
    }
}

fn to_signed(index: usize) -> isize {
    isize::try_from(index).unwrap_or(isize::MAX)
}
