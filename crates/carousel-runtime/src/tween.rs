#![forbid(unsafe_code)]

//! Headless, tick-driven pane surface.
//!
//! [`TweenSurface`] keeps the rendered state of a carousel in memory: track
//! sizing, the displayed offset, the active marker, and indicators. Animated
//! offsets ease from the displayed value to the target as the owner calls
//! [`Animate::advance`], and the settle ticket is yielded exactly once when
//! the tween completes.
//!
//! # Example
//!
//! ```ignore
//! let mut surface = TweenSurface::new(Duration::from_millis(600));
//! surface.apply_offset(OffsetRequest::animated(-25.0, 1, ticket));
//! while let None = surface.advance(Duration::from_millis(16)) {}
//! assert_eq!(surface.offset(), -25.0);
//! ```
//!
//! # Invariants
//!
//! - Tween progress is always in [0.0, 1.0].
//! - A ticket is returned by `advance` at most once and never by the same
//!   call that started its tween.
//! - An unanimated offset cancels any running tween; its ticket is dropped.
//!
//! # Failure Modes
//!
//! - Zero-duration transitions complete on the next `advance`, whatever `dt`.

use std::collections::BTreeSet;
use std::time::Duration;

use crate::surface::{Animate, OffsetRequest, PaneSurface};
use crate::transition::SettleTicket;

// ============================================================================
// Easing
// ============================================================================

/// Easing curve for animated pane changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Smooth ease-out (decelerating).
    #[default]
    EaseOut,
    /// Smooth S-curve.
    EaseInOut,
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

// ============================================================================
// TweenSurface
// ============================================================================

/// Absorbs rounding when frame deltas sum to the full duration.
const PROGRESS_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy)]
struct Tween {
    from: f64,
    to: f64,
    progress: f64,
    ticket: Option<SettleTicket>,
}

/// In-memory pane surface with eased, tick-driven transitions.
#[derive(Debug, Clone)]
pub struct TweenSurface {
    duration: Duration,
    easing: Easing,

    track_width: f64,
    item_width: f64,
    pane_count: usize,

    offset: f64,
    tween: Option<Tween>,
    /// Ticket of a zero-length transition, reported on the next advance.
    ready: Option<SettleTicket>,

    active: BTreeSet<usize>,
    indicator: Option<usize>,
    indicators_visible: bool,

    last_request: Option<OffsetRequest>,
    applied: usize,
}

impl Default for TweenSurface {
    fn default() -> Self {
        Self::new(carousel_core::config::DEFAULT_TRANSITION)
    }
}

impl TweenSurface {
    /// Create a surface whose animated transitions last `duration`.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            easing: Easing::default(),
            track_width: 0.0,
            item_width: 0.0,
            pane_count: 0,
            offset: 0.0,
            tween: None,
            ready: None,
            active: BTreeSet::new(),
            indicator: None,
            indicators_visible: true,
            last_request: None,
            applied: 0,
        }
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Displayed track offset in percent.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[must_use]
    pub fn track_width(&self) -> f64 {
        self.track_width
    }

    #[must_use]
    pub fn item_width(&self) -> f64 {
        self.item_width
    }

    #[must_use]
    pub fn pane_count(&self) -> usize {
        self.pane_count
    }

    /// Panes currently carrying the active marker.
    #[must_use]
    pub fn active_panes(&self) -> Vec<usize> {
        self.active.iter().copied().collect()
    }

    /// Indicator currently marked, if indicators are shown.
    #[must_use]
    pub fn indicator(&self) -> Option<usize> {
        if self.indicators_visible {
            self.indicator
        } else {
            None
        }
    }

    #[must_use]
    pub fn indicators_visible(&self) -> bool {
        self.indicators_visible
    }

    /// Most recent offset command.
    #[must_use]
    pub fn last_request(&self) -> Option<OffsetRequest> {
        self.last_request
    }

    /// Number of offset commands received.
    #[must_use]
    pub fn applied_count(&self) -> usize {
        self.applied
    }
}

impl PaneSurface for TweenSurface {
    fn size_track(&mut self, track_width: f64, item_width: f64, pane_count: usize) {
        self.track_width = track_width;
        self.item_width = item_width;
        self.pane_count = pane_count;
    }

    fn apply_offset(&mut self, request: OffsetRequest) {
        self.last_request = Some(request);
        self.applied += 1;

        if !request.animate {
            self.tween = None;
            self.ready = None;
            self.offset = request.percent;
            return;
        }

        if self.duration.is_zero() {
            self.tween = None;
            self.offset = request.percent;
            self.ready = request.ticket;
            return;
        }

        self.ready = None;
        self.tween = Some(Tween {
            from: self.offset,
            to: request.percent,
            progress: 0.0,
            ticket: request.ticket,
        });
    }

    fn set_active(&mut self, index: usize, active: bool) {
        if active {
            self.active.insert(index);
        } else {
            self.active.remove(&index);
        }
    }

    fn show_indicator(&mut self, index: usize) {
        self.indicator = Some(index);
    }

    fn hide_indicators(&mut self) {
        self.indicators_visible = false;
    }
}

impl Animate for TweenSurface {
    fn advance(&mut self, dt: Duration) -> Option<SettleTicket> {
        if let Some(ticket) = self.ready.take() {
            return Some(ticket);
        }

        let tween = self.tween.as_mut()?;
        tween.progress =
            (tween.progress + dt.as_secs_f64() / self.duration.as_secs_f64()).min(1.0);
        let eased = self.easing.apply(tween.progress);
        self.offset = tween.from + (tween.to - tween.from) * eased;

        if tween.progress >= 1.0 - PROGRESS_EPSILON {
            self.offset = tween.to;
            let ticket = tween.ticket;
            self.tween = None;
            return ticket;
        }
        None
    }

    fn is_animating(&self) -> bool {
        self.tween.is_some() || self.ready.is_some()
    }
}

// ============================================================================
// Tests
// ============================================================================
