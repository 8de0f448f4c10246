#![forbid(unsafe_code)]

//! The visual-apply seam between the controller and whatever renders panes.
//!
//! The controller never touches rendering directly. It sizes the track,
//! translates it by a percentage offset, and toggles the active marker and
//! indicators through a [`PaneSurface`]. One implementation is selected by
//! the embedding environment (CSS transforms, a GPU layer, a headless tween
//! for tests); the controller is agnostic to which one is active.
//!
//! # Settle contract
//!
//! - An unanimated [`OffsetRequest`] takes effect immediately and carries no
//!   ticket. Nothing is reported back.
//! - An animated request carries a [`SettleTicket`]. The surface (or its
//!   owner) must hand that ticket back to the controller exactly once, after
//!   the visual transition completes, never before.

use std::time::Duration;

use crate::transition::SettleTicket;

/// One offset command issued by the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OffsetRequest {
    /// Track translation in percent of the track width (0 shows pane 0).
    pub percent: f64,
    /// Whether the change should be animated.
    pub animate: bool,
    /// Pane being settled on, or `None` for drag tracking.
    pub target: Option<usize>,
    /// Present exactly when `animate` is true.
    pub ticket: Option<SettleTicket>,
}

impl OffsetRequest {
    /// Continuous, unanimated finger-tracking offset.
    #[must_use]
    pub const fn tracking(percent: f64) -> Self {
        Self {
            percent,
            animate: false,
            target: None,
            ticket: None,
        }
    }

    /// Unanimated jump to a pane.
    #[must_use]
    pub const fn immediate(percent: f64, target: usize) -> Self {
        Self {
            percent,
            animate: false,
            target: Some(target),
            ticket: None,
        }
    }

    /// Animated move to a pane, settled by `ticket`.
    #[must_use]
    pub const fn animated(percent: f64, target: usize, ticket: SettleTicket) -> Self {
        Self {
            percent,
            animate: true,
            target: Some(target),
            ticket: Some(ticket),
        }
    }
}

/// Rendering capability consumed by the controller.
pub trait PaneSurface {
    /// Fix the track and item widths so panes sit edge to edge in one row.
    fn size_track(&mut self, track_width: f64, item_width: f64, pane_count: usize);

    /// Translate the track.
    fn apply_offset(&mut self, request: OffsetRequest);

    /// Add or remove the active marker on one pane.
    fn set_active(&mut self, index: usize, active: bool);

    /// Mark indicator `index` as current.
    fn show_indicator(&mut self, index: usize);

    /// Hide the pane indicators entirely.
    fn hide_indicators(&mut self);
}

/// A surface that animates itself when advanced by the caller's clock.
pub trait Animate {
    /// Advance animations by `dt`, returning the ticket of a transition that
    /// settled during this step.
    fn advance(&mut self, dt: Duration) -> Option<SettleTicket>;

    /// Whether an animated transition is still running.
    fn is_animating(&self) -> bool;
}
