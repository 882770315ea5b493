//! # Constants and type definitions for starpath
//!
//! This module centralizes the **angular conversion factors**, the **chart palette** and the
//! **common type aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Sexagesimal and angular unit conversions (hours ↔ degrees ↔ arcseconds)
//! - Right ascension wraparound period
//! - Core type aliases used across the crate
//! - Colors and stroke settings of the static scene

// -------------------------------------------------------------------------------------------------
// Angular constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// Arcseconds in one degree (also seconds in one hour)
pub const ARCSEC_PER_DEGREE: f64 = 3_600.0;

/// Arcseconds in one arcminute
pub const ARCSEC_PER_ARCMIN: f64 = 60.0;

/// Degrees swept by one hour of right ascension
pub const DEGREES_PER_HOUR: f64 = 15.0;

/// A full turn of right ascension in arcseconds (360° = 24h)
pub const FULL_CIRCLE_ARCSEC: f64 = 360.0 * ARCSEC_PER_DEGREE;

/// Frame rate used when the configuration does not set one
pub const DEFAULT_FPS: f64 = 60.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Length on the rendering surface
pub type Pixel = f64;
/// Fraction of an animation cycle, in `[0, 1]`
pub type Ratio = f64;

// -------------------------------------------------------------------------------------------------
// Palette of the static scene
// -------------------------------------------------------------------------------------------------

pub const BACKGROUND_COLOR: &str = "black";
pub const LINK_COLOR: &str = "lightblue";
pub const CONSTELLATION_COLOR: &str = "lightblue";
pub const STAR_LABEL_COLOR: &str = "grey";
pub const STAR_COLOR: &str = "white";
pub const TRAIL_COLOR: &str = "white";
pub const TIME_LABEL_COLOR: &str = "white";

/// Radius of a catalog star dot
pub const STAR_RADIUS: Pixel = 3.0;

/// Offset of a star note from its dot
pub const STAR_LABEL_OFFSET: (Pixel, Pixel) = (5.0, 5.0);

/// Dash pattern of the primary body trail
pub const TRAIL_DASH: &str = "5 3";

/// Position of the time label, measured back from the bottom-right corner
pub const TIME_LABEL_INSET: (Pixel, Pixel) = (60.0, 20.0);
