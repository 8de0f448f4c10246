#![forbid(unsafe_code)]

//! Classified gesture events consumed by the carousel controller.
//!
//! An upstream recognizer turns raw touch or pointer input into
//! [`GestureEvent`]s. The controller never sees raw coordinates: each event
//! carries its classification, the accumulated horizontal movement since the
//! gesture began, and the dominant direction.
//!
//! # Invariants
//!
//! 1. `delta_x` is measured from the start of the gesture, not from the
//!    previous event.
//! 2. A drag sequence ends with exactly one `Release`, unless a swipe
//!    resolved it first and the recognizer was told to stop detection.
//!
//! # Failure Modes
//!
//! - Payloads are not validated. A non-finite `delta_x` produces a zero drag
//!   offset and never crosses the release threshold.

use std::fmt;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Horizontal direction of finger movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Direction implied by the sign of a horizontal delta.
    ///
    /// Zero maps to `Left`, matching how a release without movement is
    /// treated as a request for the next pane.
    #[must_use]
    pub fn from_delta(delta_x: f64) -> Self {
        if delta_x > 0.0 { Self::Right } else { Self::Left }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// GestureKind
// ---------------------------------------------------------------------------

/// Classification assigned by the upstream recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum GestureKind {
    /// Continuous finger tracking towards the left.
    DragLeft,
    /// Continuous finger tracking towards the right.
    DragRight,
    /// Fast flick towards the left.
    SwipeLeft,
    /// Fast flick towards the right.
    SwipeRight,
    /// Finger lifted; the gesture is over.
    Release,
}

impl GestureKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DragLeft => "drag-left",
            Self::DragRight => "drag-right",
            Self::SwipeLeft => "swipe-left",
            Self::SwipeRight => "swipe-right",
            Self::Release => "release",
        }
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// GestureEvent
// ---------------------------------------------------------------------------

/// One classified gesture event.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureEvent {
    pub kind: GestureKind,
    /// Horizontal movement in pixels since the gesture began (right is positive).
    pub delta_x: f64,
    pub direction: Direction,
}

impl GestureEvent {
    /// Create an event with an explicit direction.
    #[must_use]
    pub const fn new(kind: GestureKind, delta_x: f64, direction: Direction) -> Self {
        Self {
            kind,
            delta_x,
            direction,
        }
    }

    /// Drag event; the kind and direction follow the sign of `delta_x`.
    #[must_use]
    pub fn drag(delta_x: f64) -> Self {
        let direction = Direction::from_delta(delta_x);
        let kind = match direction {
            Direction::Left => GestureKind::DragLeft,
            Direction::Right => GestureKind::DragRight,
        };
        Self::new(kind, delta_x, direction)
    }

    /// Swipe event in the given direction.
    #[must_use]
    pub fn swipe(direction: Direction, delta_x: f64) -> Self {
        let kind = match direction {
            Direction::Left => GestureKind::SwipeLeft,
            Direction::Right => GestureKind::SwipeRight,
        };
        Self::new(kind, delta_x, direction)
    }

    /// Release event; the direction follows the sign of `delta_x`.
    #[must_use]
    pub fn release(delta_x: f64) -> Self {
        Self::new(GestureKind::Release, delta_x, Direction::from_delta(delta_x))
    }
}
