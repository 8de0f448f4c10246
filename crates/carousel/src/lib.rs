#![forbid(unsafe_code)]

//! Carousel public facade crate.
//!
//! This crate provides the stable surface area for embedders. It re-exports
//! the common types from the internal crates and offers a prelude plus a
//! constructor for the headless configuration used in tests and replay.

// --- Core re-exports -------------------------------------------------------

pub use carousel_core::{
    CarouselConfig, ConfigError, Direction, GestureEvent, GestureKind, Measurements, PaneGeometry,
};

// --- Runtime re-exports ----------------------------------------------------

pub use carousel_runtime::{
    Animate, CarouselController, CarouselListener, CarouselState, Easing, GestureOutcome,
    Lifecycle, ListenerId, ManualScheduler, Notification, OffsetRequest, PaneSurface, Scheduler,
    SettleTicket, SlideEvent, ThreadScheduler, TimerHandle, TransitionPhase, TweenSurface,
};

/// Controller over the in-memory tween surface and the virtual clock.
pub type HeadlessCarousel = CarouselController<TweenSurface, ManualScheduler>;

/// Build a [`HeadlessCarousel`] whose transitions last `config.transition`.
#[must_use]
pub fn headless(measurements: Measurements, config: CarouselConfig) -> HeadlessCarousel {
    let config = config.sanitized();
    let surface = TweenSurface::new(config.transition);
    CarouselController::new(measurements, config, surface, ManualScheduler::new())
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Animate, CarouselConfig, CarouselController, Direction, GestureEvent, GestureOutcome,
        HeadlessCarousel, Measurements, Notification, PaneSurface, Scheduler, headless,
    };

    pub use crate::{core, runtime};
}

pub use carousel_core as core;
pub use carousel_runtime as runtime;
