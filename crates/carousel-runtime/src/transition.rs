#![forbid(unsafe_code)]

//! Two-phase pane transitions.
//!
//! A controller-initiated pane change is *requested* (the intended pane is
//! known immediately) and later *committed* when the rendering layer reports
//! that the visual transition settled. [`TransitionState`] tracks that gap
//! explicitly:
//!
//! ```text
//! Idle ──begin(target)──▶ Pending { target, ticket } ──settle(ticket)──▶ Idle
//! ```
//!
//! # Invariants
//!
//! 1. At most one transition is pending at any time.
//! 2. Every [`SettleTicket`] is accepted at most once; stale, foreign, or
//!    repeated tickets are rejected without changing state.
//! 3. Tickets are never reused within one `TransitionState`.

/// Single-use token identifying one animated transition.
///
/// Handed to the rendering layer with an animated offset and returned to
/// the controller once the animation settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SettleTicket(u64);

impl SettleTicket {
    /// Raw ticket id.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Phase of the pane transition state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPhase {
    /// No transition in flight; the committed pane is on screen.
    #[default]
    Idle,
    /// An animated transition towards `target` has been issued and has not
    /// settled yet.
    Pending { target: usize, ticket: SettleTicket },
}

/// Owner of the transition phase and the ticket counter.
#[derive(Debug, Default)]
pub struct TransitionState {
    phase: TransitionPhase,
    issued: u64,
}

impl TransitionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Whether an animated transition is in flight.
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.phase, TransitionPhase::Pending { .. })
    }

    /// Enter `Pending` for `target`, returning the ticket that settles it.
    ///
    /// Beginning over an in-flight transition supersedes it; its ticket goes
    /// stale.
    pub fn begin(&mut self, target: usize) -> SettleTicket {
        self.issued += 1;
        let ticket = SettleTicket(self.issued);
        self.phase = TransitionPhase::Pending { target, ticket };
        ticket
    }

    /// Commit the pending transition if `ticket` matches it.
    ///
    /// Returns the committed target, or `None` when the ticket is stale.
    pub fn settle(&mut self, ticket: SettleTicket) -> Option<usize> {
        match self.phase {
            TransitionPhase::Pending {
                target,
                ticket: pending,
            } if pending == ticket => {
                self.phase = TransitionPhase::Idle;
                Some(target)
            }
            _ => None,
        }
    }

    /// Drop any in-flight transition without committing it.
    pub fn abandon(&mut self) {
        self.phase = TransitionPhase::Idle;
    }
}
