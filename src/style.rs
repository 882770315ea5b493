//! Marker styles of the tracked bodies.
//!
//! Each planet entry of a chart configuration names a [`BodyStyle`]. The named
//! variants resolve through a small style table; `Custom` carries its own radius and
//! color. In JSON a named style is a plain string (`"mars"`) and a custom one an object
//! (`{"custom": {"radius": 4, "color": "#88f"}}`).
use serde::{Deserialize, Serialize};

use crate::constants::Pixel;

/// Resolved appearance of a body marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub radius: Pixel,
    pub fill: String,
}

impl MarkerStyle {
    pub fn new(radius: Pixel, fill: impl Into<String>) -> Self {
        MarkerStyle {
            radius,
            fill: fill.into(),
        }
    }
}

/// Appearance of a tracked body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyStyle {
    Mars,
    Jupiter,
    Saturn,
    Custom { radius: Pixel, color: String },
}

impl Default for BodyStyle {
    fn default() -> Self {
        BodyStyle::Custom {
            radius: 5.0,
            color: "white".to_string(),
        }
    }
}

/// Style table of the named bodies: `(radius, fill)`.
const MARS_STYLE: (Pixel, &str) = (5.0, "red");
const JUPITER_STYLE: (Pixel, &str) = (7.0, "#e36e4b");
const SATURN_STYLE: (Pixel, &str) = (6.0, "#f8f8d8");

impl BodyStyle {
    pub fn marker_style(&self) -> MarkerStyle {
        let (radius, fill) = match self {
            BodyStyle::Mars => MARS_STYLE,
            BodyStyle::Jupiter => JUPITER_STYLE,
            BodyStyle::Saturn => SATURN_STYLE,
            BodyStyle::Custom { radius, color } => return MarkerStyle::new(*radius, color.as_str()),
        };
        MarkerStyle::new(radius, fill)
    }
}

#[cfg(test)]
mod style_test {
    use super::*;

    #[test]
    fn test_style_table() {
        assert_eq!(BodyStyle::Mars.marker_style(), MarkerStyle::new(5.0, "red"));
        assert_eq!(
            BodyStyle::Jupiter.marker_style(),
            MarkerStyle::new(7.0, "#e36e4b")
        );
        assert_eq!(
            BodyStyle::Saturn.marker_style(),
            MarkerStyle::new(6.0, "#f8f8d8")
        );
        assert_eq!(
            BodyStyle::Custom {
                radius: 2.5,
                color: "#0f0".into()
            }
            .marker_style(),
            MarkerStyle::new(2.5, "#0f0")
        );
    }

    #[test]
    fn test_style_json() {
        let named: BodyStyle = serde_json::from_str("\"jupiter\"").unwrap();
        assert_eq!(named, BodyStyle::Jupiter);

        let custom: BodyStyle =
            serde_json::from_str(r##"{"custom": {"radius": 4.0, "color": "#88f"}}"##).unwrap();
        assert_eq!(
            custom,
            BodyStyle::Custom {
                radius: 4.0,
                color: "#88f".into()
            }
        );

        assert!(serde_json::from_str::<BodyStyle>("\"pluto\"").is_err());
    }
}
