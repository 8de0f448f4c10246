#![forbid(unsafe_code)]

//! Lifecycle notifications emitted by the controller.
//!
//! Collaborators (indicator widgets, analytics, a declarative activation
//! layer) subscribe a [`CarouselListener`] and receive typed
//! [`Notification`]s in emission order:
//!
//! ```text
//! next()/prev():  Slide ──▶ Slid ──(settle)──▶ IndicatorsSynced
//! to()/snap-back:           ──(settle)──▶ IndicatorsSynced
//! ```
//!
//! `IndicatorsSynced` is only ever emitted for a pane whose transition has
//! visually settled.

use carousel_core::Direction;

/// Payload of the pre-transition notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlideEvent {
    /// `Left` for `next()`, `Right` for `prev()`.
    pub direction: Direction,
    /// The neighbouring pane being revealed, or `None` past an edge.
    pub related_target: Option<usize>,
    /// Committed pane when the slide was requested.
    pub from: usize,
}

/// One lifecycle notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "kebab-case"))]
pub enum Notification {
    /// A `next()`/`prev()` transition is about to start.
    Slide(SlideEvent),
    /// The intended pane has been set; the visual transition may still run.
    Slid { index: usize },
    /// Indicators now reflect the settled pane.
    IndicatorsSynced { index: usize },
}

/// Observer of controller notifications.
pub trait CarouselListener {
    fn notify(&mut self, notification: &Notification);
}

impl<F> CarouselListener for F
where
    F: FnMut(&Notification),
{
    fn notify(&mut self, notification: &Notification) {
        self(notification);
    }
}

/// Identifier returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered set of subscribed listeners.
#[derive(Default)]
pub struct Listeners {
    issued: u64,
    entries: Vec<(ListenerId, Box<dyn CarouselListener>)>,
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

impl Listeners {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl CarouselListener + 'static) -> ListenerId {
        self.issued += 1;
        let id = ListenerId(self.issued);
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deliver a notification to every listener in subscription order.
    pub fn emit(&mut self, notification: Notification) {
        for (_, listener) in &mut self.entries {
            listener.notify(&notification);
        }
    }
}
