#![forbid(unsafe_code)]

//! Carousel configuration.
//!
//! [`CarouselConfig`] groups the tunables that shape autoplay and drag feel.
//! Behind the `config` feature it can be loaded from TOML or JSON:
//!
//! ```toml
//! # carousel.toml
//! interval = 5000      # milliseconds between autoplay ticks, or `false`
//! toughness = 0.25     # drag resistance at the first/last pane, in (0, 1]
//! transition_ms = 600  # length of an animated pane change
//! ```
//!
//! ```rust,ignore
//! let config = CarouselConfig::from_toml_file("carousel.toml")?.validated()?;
//! ```
//!
//! # Defaults
//!
//! Absent keys fall back to [`CarouselConfig::default`]: no autoplay,
//! toughness 0.25, 600ms transitions. A default carousel only moves when
//! navigated. The controller
//! never fails on configuration: it runs on [`CarouselConfig::sanitized`],
//! which replaces out-of-range values with their defaults.

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

/// Default edge-drag resistance multiplier.
pub const DEFAULT_TOUGHNESS: f64 = 0.25;
/// Default length of an animated pane change.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(600);

/// Tunables for one carousel instance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct CarouselConfig {
    /// Autoplay tick period; `None` disables autoplay.
    #[cfg_attr(
        feature = "config",
        serde(
            serialize_with = "serialize_interval",
            deserialize_with = "deserialize_interval"
        )
    )]
    pub interval: Option<Duration>,

    /// Multiplier applied to drag movement past the first or last pane.
    pub toughness: f64,

    /// Length of an animated pane change.
    #[cfg_attr(
        feature = "config",
        serde(
            rename = "transition_ms",
            serialize_with = "serialize_millis",
            deserialize_with = "deserialize_millis"
        )
    )]
    pub transition: Duration,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval: None,
            toughness: DEFAULT_TOUGHNESS,
            transition: DEFAULT_TRANSITION,
        }
    }
}

impl CarouselConfig {
    /// Set the autoplay interval (builder pattern). `None` disables autoplay.
    #[must_use]
    pub fn with_interval(mut self, interval: Option<Duration>) -> Self {
        self.interval = interval;
        self
    }

    /// Set the edge resistance multiplier (builder pattern).
    #[must_use]
    pub fn with_toughness(mut self, toughness: f64) -> Self {
        self.toughness = toughness;
        self
    }

    /// Set the animated transition length (builder pattern).
    #[must_use]
    pub fn with_transition(mut self, transition: Duration) -> Self {
        self.transition = transition;
        self
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(self.toughness.is_finite() && self.toughness > 0.0 && self.toughness <= 1.0) {
            errors.push(format!(
                "toughness must be in (0, 1], got {}",
                self.toughness
            ));
        }

        if self.interval.is_some_and(|d| d.is_zero()) {
            errors.push("interval must be > 0 ms (use false to disable autoplay)".into());
        }

        errors
    }

    /// Return `self` if valid, otherwise every validation error at once.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Copy with every out-of-range value replaced by its default.
    ///
    /// A zero interval disables autoplay rather than ticking continuously.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let toughness =
            if self.toughness.is_finite() && self.toughness > 0.0 && self.toughness <= 1.0 {
                self.toughness
            } else {
                DEFAULT_TOUGHNESS
            };
        Self {
            interval: self.interval.filter(|d| !d.is_zero()),
            toughness,
            transition: self.transition,
        }
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Serialize to a TOML document.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(ConfigError::TomlSerialize)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a carousel configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// TOML encode error.
    #[cfg(feature = "config")]
    TomlSerialize(toml::ser::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::TomlSerialize(e) => write!(f, "TOML encode error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::TomlSerialize(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

#[cfg(feature = "config")]
fn serialize_interval<S>(interval: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match interval {
        Some(d) => serializer.serialize_u64(duration_millis(*d)),
        None => serializer.serialize_bool(false),
    }
}

#[cfg(feature = "config")]
fn deserialize_interval<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntervalRepr {
        Millis(u64),
        Flag(bool),
    }

    match IntervalRepr::deserialize(deserializer)? {
        IntervalRepr::Millis(ms) => Ok(Some(Duration::from_millis(ms))),
        IntervalRepr::Flag(false) => Ok(None),
        IntervalRepr::Flag(true) => Err(serde::de::Error::custom(
            "interval must be a number of milliseconds or false",
        )),
    }
}

#[cfg(feature = "config")]
fn serialize_millis<S>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(duration_millis(*d))
}

#[cfg(feature = "config")]
fn deserialize_millis<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    u64::deserialize(deserializer).map(Duration::from_millis)
}

#[cfg(feature = "config")]
fn duration_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
