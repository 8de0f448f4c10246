#![forbid(unsafe_code)]

//! JSON-lines replay scripts.
//!
//! One step per line, tagged by `op`. Blank lines and lines starting with
//! `#` are skipped.
//!
//! ```text
//! {"op": "gesture", "kind": "drag-left", "delta_x": -80}
//! {"op": "gesture", "kind": "release", "delta_x": -220}
//! {"op": "advance", "ms": 600}
//! {"op": "to", "index": 0}
//! {"op": "pause", "user": true}
//! {"op": "resize", "width": 480}
//! ```

use carousel_core::{Direction, GestureEvent, GestureKind};
use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, Result};

/// One replay step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum ScriptStep {
    /// Classified gesture event. Without `direction`, swipes take theirs
    /// from the kind and drags and releases from the sign of `delta_x`.
    Gesture {
        kind: GestureKind,
        #[serde(default)]
        delta_x: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        direction: Option<Direction>,
    },
    To {
        index: usize,
    },
    Next,
    Prev,
    Pause {
        #[serde(default)]
        user: bool,
    },
    Cycle {
        #[serde(default)]
        user: bool,
    },
    /// Let `ms` milliseconds of virtual time pass.
    Advance {
        ms: u64,
    },
    Resize {
        width: f64,
    },
}

impl ScriptStep {
    /// The gesture event for a `gesture` step.
    #[must_use]
    pub fn gesture_event(&self) -> Option<GestureEvent> {
        let Self::Gesture {
            kind,
            delta_x,
            direction,
        } = *self
        else {
            return None;
        };
        let direction = direction.unwrap_or(match kind {
            GestureKind::SwipeLeft => Direction::Left,
            GestureKind::SwipeRight => Direction::Right,
            _ => Direction::from_delta(delta_x),
        });
        Some(GestureEvent::new(kind, delta_x, direction))
    }
}

/// Parse a whole script, reporting the first bad line (1-based).
pub fn parse_script(source: &str) -> Result<Vec<ScriptStep>> {
    let mut steps = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let step = serde_json::from_str::<ScriptStep>(line)
            .map_err(|err| HarnessError::script(idx + 1, err.to_string()))?;
        steps.push(step);
    }
    Ok(steps)
}
