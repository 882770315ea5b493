//! Celestial coordinate value type.
//!
//! Overview
//! -----------------
//! [`CelestialCoord`] is the `(ra, dec)` pair shared by catalog stars, constellation
//! anchors and ephemeris samples. Both components are stored in **arcseconds**;
//! right ascension is already converted from hours, so one arcsecond of RA and one
//! arcsecond of declination are the same angle.
//!
//! Arithmetic semantics
//! -----------------
//! Addition/subtraction are component-wise and multiplication by a scalar scales
//! both components. These operations are what the interpolator uses to blend two
//! adjacent ephemeris samples (`lo + (hi - lo) * w`).
//!
//! See also
//! -----------------
//! * [`Positioned`] – implemented by every record that sits on the sky.
//! * [`crate::projection::Projection::project`] – maps a coordinate to the screen.

use std::ops::{Add, Mul, Sub};

use crate::constants::{ArcSec, Degree, ARCSEC_PER_DEGREE, FULL_CIRCLE_ARCSEC};

/// A position on the celestial sphere, in arcseconds.
///
/// Fields
/// -----------------
/// * `ra` – Right ascension (arcseconds of arc, `0 ..= 1_296_000` for catalog data).
/// * `dec` – Declination (arcseconds).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CelestialCoord {
    pub ra: ArcSec,
    pub dec: ArcSec,
}

impl CelestialCoord {
    pub fn new(ra: ArcSec, dec: ArcSec) -> Self {
        CelestialCoord { ra, dec }
    }

    /// Build a coordinate from decimal degrees.
    pub fn from_degrees(ra: Degree, dec: Degree) -> Self {
        CelestialCoord {
            ra: ra * ARCSEC_PER_DEGREE,
            dec: dec * ARCSEC_PER_DEGREE,
        }
    }

    /// Right ascension shifted by `offset` degrees and wrapped into `[0, 1_296_000)`.
    ///
    /// Arguments
    /// -----------------
    /// * `offset` – Sky rotation in degrees (may be negative).
    ///
    /// Return
    /// ----------
    /// * The rotated right ascension in arcseconds. Non-finite inputs stay non-finite.
    pub fn rotated_ra(&self, offset: Degree) -> ArcSec {
        (self.ra + offset * ARCSEC_PER_DEGREE).rem_euclid(FULL_CIRCLE_ARCSEC)
    }

    /// `true` when both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.ra.is_finite() && self.dec.is_finite()
    }
}

impl Add for CelestialCoord {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        CelestialCoord {
            ra: self.ra + other.ra,
            dec: self.dec + other.dec,
        }
    }
}

impl Sub for CelestialCoord {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        CelestialCoord {
            ra: self.ra - other.ra,
            dec: self.dec - other.dec,
        }
    }
}

impl Mul<f64> for CelestialCoord {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        CelestialCoord {
            ra: self.ra * rhs,
            dec: self.dec * rhs,
        }
    }
}

/// Anything that can be placed on the sky.
pub trait Positioned {
    fn coord(&self) -> CelestialCoord;
}

impl Positioned for CelestialCoord {
    fn coord(&self) -> CelestialCoord {
        *self
    }
}

impl<T: Positioned + ?Sized> Positioned for &T {
    fn coord(&self) -> CelestialCoord {
        (**self).coord()
    }
}

impl<T: Positioned + ?Sized> Positioned for std::sync::Arc<T> {
    fn coord(&self) -> CelestialCoord {
        (**self).coord()
    }
}

#[cfg(test)]
mod celestial_coord_test {
    use super::*;

    #[test]
    fn test_rotated_ra_wraps() {
        let c = CelestialCoord::new(1_290_000.0, 0.0);
        assert_eq!(c.rotated_ra(0.0), 1_290_000.0);
        assert_eq!(c.rotated_ra(2.0), 1_290_000.0 + 7_200.0 - FULL_CIRCLE_ARCSEC);

        let c = CelestialCoord::new(3_600.0, 0.0);
        assert_eq!(c.rotated_ra(-2.0), FULL_CIRCLE_ARCSEC - 3_600.0);
        assert_eq!(CelestialCoord::new(FULL_CIRCLE_ARCSEC, 0.0).rotated_ra(0.0), 0.0);
    }

    #[test]
    fn test_rotated_ra_nan() {
        assert!(CelestialCoord::new(f64::NAN, 0.0).rotated_ra(10.0).is_nan());
    }

    #[test]
    fn test_blend_ops() {
        let lo = CelestialCoord::new(100.0, -50.0);
        let hi = CelestialCoord::new(200.0, 50.0);
        assert_eq!(lo + (hi - lo) * 0.5, CelestialCoord::new(150.0, 0.0));
        assert_eq!(lo + (hi - lo) * 0.0, lo);
    }

    #[test]
    fn test_from_degrees() {
        assert_eq!(
            CelestialCoord::from_degrees(10.0, 5.0),
            CelestialCoord::new(36_000.0, 18_000.0)
        );
    }
}
