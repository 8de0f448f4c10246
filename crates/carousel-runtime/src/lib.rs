#![forbid(unsafe_code)]

//! Carousel Runtime
//!
//! This crate ties the pure geometry and gesture types of `carousel-core`
//! into a stateful controller that navigates panes, runs autoplay, and
//! commits indicator state once transitions settle.
//!
//! # Key Components
//!
//! - [`CarouselController`] - Gesture-to-pane state machine
//! - [`PaneSurface`] - Trait for the rendering layer that translates the track
//! - [`TweenSurface`] - Headless surface with eased, frame-stepped transitions
//! - [`Scheduler`] - Trait for autoplay interval timers
//! - [`ManualScheduler`] - Virtual-clock scheduler for deterministic replay
//! - [`ThreadScheduler`] - Real-time scheduler backed by timer threads
//! - [`Notification`] - Typed lifecycle events delivered to listeners
//!
//! # Role in the carousel
//! `carousel-runtime` is the orchestrator. It consumes classified gestures
//! from an upstream recognizer, autoplay ticks from a [`Scheduler`], and
//! settle reports from a [`PaneSurface`], and serializes all three into one
//! consistent navigational state.
//!
//! # How it fits in the system
//! Input types come from `carousel-core`. Output goes through the
//! [`PaneSurface`] seam, so the same controller drives a headless test
//! surface, a terminal widget, or a DOM adapter.

pub mod autoplay;
pub mod controller;
pub mod notify;
pub mod surface;
pub mod thread_scheduler;
pub mod transition;
pub mod tween;

pub use autoplay::{ManualScheduler, Scheduler, TimerHandle};
pub use controller::{CarouselController, CarouselState, Disabled, GestureOutcome, Lifecycle};
pub use notify::{CarouselListener, ListenerId, Listeners, Notification, SlideEvent};
pub use surface::{Animate, OffsetRequest, PaneSurface};
pub use thread_scheduler::ThreadScheduler;
pub use transition::{SettleTicket, TransitionPhase, TransitionState};
pub use tween::{Easing, TweenSurface};
