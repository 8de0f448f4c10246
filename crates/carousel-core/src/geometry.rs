#![forbid(unsafe_code)]

//! Pane geometry: viewport measurements and the offset math built on them.
//!
//! [`PaneGeometry`] is a leaf value recomputed from layout measurements
//! whenever the viewport resizes or the orientation changes. All offsets are
//! expressed as a percentage of the *track* (the row holding every pane edge
//! to edge), which is what the rendering layer translates.
//!
//! # Invariants
//!
//! 1. `pane_width >= 0` and `item_width >= 0`, both finite.
//! 2. `item_width <= pane_width`.
//! 3. `recompute` is pure: the same inputs always yield the same geometry.
//! 4. `pane_offset(0) == 0.0` and offsets decrease monotonically with the
//!    pane index.
//!
//! # Failure Modes
//!
//! - A zero, negative, or non-finite viewport degenerates to zero-width
//!   panes. Drag offsets then collapse to `0.0` instead of dividing by zero.
//! - A zero pane count yields zero offsets everywhere.

/// Raw layout measurements supplied by the embedding environment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurements {
    /// Visible viewport width in pixels.
    pub viewport_width: f64,
    /// Number of items in the carousel.
    pub item_count: usize,
    /// Horizontal padding inside each item, both sides combined.
    pub item_padding: f64,
}

impl Measurements {
    #[must_use]
    pub const fn new(viewport_width: f64, item_count: usize, item_padding: f64) -> Self {
        Self {
            viewport_width,
            item_count,
            item_padding,
        }
    }

    /// Geometry derived from these measurements.
    #[must_use]
    pub fn geometry(&self) -> PaneGeometry {
        PaneGeometry::recompute(self.viewport_width, self.item_count, self.item_padding)
    }
}

/// Derived measurements for one carousel viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaneGeometry {
    /// Visible viewport width in pixels.
    pub pane_width: f64,
    /// Content width of one item (`pane_width` minus horizontal padding).
    pub item_width: f64,
    /// Number of navigable panes.
    pub pane_count: usize,
}

impl PaneGeometry {
    /// Recompute geometry from layout measurements.
    #[must_use]
    pub fn recompute(viewport_width: f64, item_count: usize, item_horizontal_padding: f64) -> Self {
        let pane_width = non_negative(viewport_width);
        let padding = non_negative(item_horizontal_padding);
        let item_width = (pane_width - padding).max(0.0);

        #[cfg(feature = "tracing")]
        tracing::trace!(pane_width, item_width, item_count, "pane geometry recomputed");

        Self {
            pane_width,
            item_width,
            pane_count: item_count,
        }
    }

    /// Width the track must be sized to so panes lay out in a single row.
    #[inline]
    #[must_use]
    pub fn track_width(&self) -> f64 {
        self.pane_width * self.pane_count as f64
    }

    /// Index of the last pane, or `None` for an empty carousel.
    #[inline]
    #[must_use]
    pub fn last_index(&self) -> Option<usize> {
        self.pane_count.checked_sub(1)
    }

    /// Share of the track occupied by one pane, in percent.
    #[inline]
    #[must_use]
    pub fn pane_percent(&self) -> f64 {
        if self.pane_count == 0 {
            return 0.0;
        }
        100.0 / self.pane_count as f64
    }

    /// Track offset (percent) that brings pane `index` into view.
    #[inline]
    #[must_use]
    pub fn pane_offset(&self, index: usize) -> f64 {
        -(self.pane_percent() * index as f64)
    }

    /// Track offset (percent) equivalent to a horizontal finger movement of
    /// `delta_x` pixels.
    #[must_use]
    pub fn drag_offset(&self, delta_x: f64) -> f64 {
        if self.pane_width <= 0.0 || self.pane_count == 0 || !delta_x.is_finite() {
            return 0.0;
        }
        (100.0 / self.pane_width) * delta_x / self.pane_count as f64
    }

    /// Minimum release distance (pixels) that commits a pane change.
    #[inline]
    #[must_use]
    pub fn release_threshold(&self) -> f64 {
        self.pane_width / 2.0
    }

    /// Whether a release after moving `delta_x` pixels should change pane.
    #[inline]
    #[must_use]
    pub fn exceeds_release_threshold(&self, delta_x: f64) -> bool {
        delta_x.abs() > self.release_threshold()
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
