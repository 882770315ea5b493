//! # Chart configuration
//!
//! [`ChartConfig`] is the JSON document accepted by the load entry point. It describes the
//! drawing surface, the sky rotation, the fonts, where the catalog and the ephemeris
//! tables live and how long one animation cycle lasts.
//!
//! ## Example
//!
//! ```json
//! {
//!   "width": 800, "height": 400,
//!   "margin": { "top": 20, "right": 20, "bottom": 20, "left": 20 },
//!   "offset": { "ra": 180 },
//!   "stars": { "src": "stars.tsv", "map": ["Leo", "Vir"] },
//!   "planets": [
//!     { "src": "mars.txt", "style": "mars" },
//!     { "src": "jupiter.txt", "style": "jupiter" }
//!   ],
//!   "duration": 20
//! }
//! ```
//!
//! ## Defaults
//! -----------------
//! `width`, `height`, `stars.src`, `stars.map`, `planets` and `duration` are required.
//! Margins default to `0`, `offset.ra` to `0°`, fonts to the values of [`FontConfig::default`],
//! body styles to a white dot and `fps` to [`DEFAULT_FPS`].
//!
//! ## Validation
//! -----------------
//! [`ChartConfig::validate`] runs after deserialization and rejects non-finite or
//! non-positive sizes and durations, timings a [`Duration`] cannot hold (a cycle too
//! long, a frame interval under one nanosecond), margins that leave no drawing area and
//! an empty planet list.
use std::{collections::HashSet, time::Duration};

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{Degree, Pixel, DEFAULT_FPS},
    starpath_errors::StarpathError,
    style::BodyStyle,
};

/// Empty space kept around the plotted area.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: Pixel,
    pub right: Pixel,
    pub bottom: Pixel,
    pub left: Pixel,
}

/// Sky rotation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Offset {
    /// Degrees added to every right ascension before wrapping.
    pub ra: Degree,
}

/// Inline CSS of the three kinds of text on a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub constellation: String,
    pub star: String,
    pub time: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        FontConfig {
            constellation: "font-family: sans-serif;".to_string(),
            star: "font-size: 80%; font-family: sans-serif;".to_string(),
            time: "font-size: 90%; font-family: sans-serif;".to_string(),
        }
    }
}

/// Catalog location and the constellations to keep from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarSource {
    pub src: Utf8PathBuf,
    pub map: Vec<String>,
}

impl StarSource {
    pub fn membership(&self) -> HashSet<String> {
        self.map.iter().cloned().collect()
    }
}

/// Ephemeris location and marker style of one tracked body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetSource {
    pub src: Utf8PathBuf,
    #[serde(default)]
    pub style: BodyStyle,
}

fn default_fps() -> f64 {
    DEFAULT_FPS
}

/// Convert a length in seconds into a non-zero [`Duration`].
///
/// Return
/// ----------
/// * The duration, or [`StarpathError::InvalidConfig`] when `seconds` is not finite, not
///   positive, too large for a [`Duration`] or shorter than one nanosecond.
pub fn positive_duration(name: &str, seconds: f64) -> Result<Duration, StarpathError> {
    match Duration::try_from_secs_f64(seconds) {
        Ok(duration) if !duration.is_zero() => Ok(duration),
        _ => Err(StarpathError::InvalidConfig(format!(
            "{name} must be a positive number of seconds representable in nanoseconds, got {seconds}"
        ))),
    }
}

/// Full description of one chart.
///
/// Fields
/// -----------------
/// * `width`, `height` – Size of the drawing surface (viewBox units).
/// * `margin` – Space kept free on each side.
/// * `offset` – Sky rotation applied to right ascension.
/// * `font` – Inline styles of constellation, star and time labels.
/// * `stars` – Catalog source and constellation membership.
/// * `planets` – Tracked bodies; the first one is the primary body.
/// * `duration` – Length of one animation cycle, in seconds.
/// * `fps` – Frames per second of the animation loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub width: Pixel,
    pub height: Pixel,
    #[serde(default)]
    pub margin: Margin,
    #[serde(default)]
    pub offset: Offset,
    #[serde(default)]
    pub font: FontConfig,
    pub stars: StarSource,
    pub planets: Vec<PlanetSource>,
    pub duration: f64,
    #[serde(default = "default_fps")]
    pub fps: f64,
}

impl ChartConfig {
    /// Deserialize and validate a configuration.
    ///
    /// Return
    /// ----------
    /// * The configuration, [`StarpathError::ConfigFormat`] for malformed JSON or a
    ///   missing required field, [`StarpathError::InvalidConfig`] when validation fails.
    pub fn from_json_str(json: &str) -> Result<Self, StarpathError> {
        let config: ChartConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, deserialize and validate a configuration file.
    pub fn from_file(path: &Utf8Path) -> Result<Self, StarpathError> {
        let json = std::fs::read_to_string(path)?;
        ChartConfig::from_json_str(&json)
    }

    /// Check the invariants the chart relies on.
    pub fn validate(&self) -> Result<(), StarpathError> {
        let invalid = |msg: String| Err(StarpathError::InvalidConfig(msg));

        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !(value.is_finite() && value > 0.0) {
                return invalid(format!("{name} must be a positive number, got {value}"));
            }
        }
        let m = &self.margin;
        for (name, value) in [
            ("margin.top", m.top),
            ("margin.right", m.right),
            ("margin.bottom", m.bottom),
            ("margin.left", m.left),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(format!("{name} must be a non-negative number, got {value}"));
            }
        }
        if m.left + m.right >= self.width || m.top + m.bottom >= self.height {
            return invalid("margins leave no drawing area".to_string());
        }
        if !self.offset.ra.is_finite() {
            return invalid(format!("offset.ra must be finite, got {}", self.offset.ra));
        }
        self.cycle_duration()?;
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return invalid(format!("fps must be a positive number, got {}", self.fps));
        }
        self.frame_interval()?;
        if self.planets.is_empty() {
            return invalid("at least one planet is required".to_string());
        }
        Ok(())
    }

    /// Length of one animation cycle.
    pub fn cycle_duration(&self) -> Result<Duration, StarpathError> {
        positive_duration("duration", self.duration)
    }

    /// Delay between two animation frames.
    ///
    /// Return
    /// ----------
    /// * The interval, [`StarpathError::InvalidConfig`] when `fps` is so high that the
    ///   interval rounds down to zero nanoseconds.
    pub fn frame_interval(&self) -> Result<Duration, StarpathError> {
        positive_duration("frame interval (1 / fps)", 1.0 / self.fps)
    }

    /// Width over height of the drawing surface.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}
