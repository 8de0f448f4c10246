#![forbid(unsafe_code)]

//! Core: pane geometry, classified gesture events, and configuration.
//!
//! # Role in the carousel
//! `carousel-core` is the input and measurement layer. It owns the pure
//! offset math over the viewport ([`geometry::PaneGeometry`]), the typed
//! gesture stream produced by an upstream recognizer
//! ([`gesture::GestureEvent`]), and the tunables that shape drag feel and
//! autoplay ([`config::CarouselConfig`]).
//!
//! # How it fits in the system
//! The runtime (`carousel-runtime`) consumes these types and drives the
//! navigational state machine. Nothing here holds state across calls, so
//! every type in this crate is cheap to copy and trivially testable.

pub mod config;
pub mod geometry;
pub mod gesture;

pub use config::{CarouselConfig, ConfigError};
pub use geometry::{Measurements, PaneGeometry};
pub use gesture::{Direction, GestureEvent, GestureKind};
