//! # Sky → screen projection
//!
//! Maps celestial coordinates onto the 2D drawing surface with two independent linear
//! scales, one per axis.
//!
//! ## Overview
//! -----------------
//! 1. Right ascension is rotated by the configured offset and wrapped into
//!    `[0, 1_296_000)` arcseconds ([`CelestialCoord::rotated_ra`]). Changing the offset
//!    turns the sky under the chart.
//! 2. The [`ViewportDomain`] is the extent of the rotated right ascension and of the
//!    declination over every catalog star and every sample of the **primary** body.
//!    Secondary bodies are left out so they cannot stretch the frame.
//! 3. Right ascension grows to the left on a sky chart: the horizontal range runs from
//!    `width - margin.right` down to `margin.left`. Declination grows upward: the vertical
//!    range runs from `height - margin.bottom` up to `margin.top`.
//!
//! The domain is computed once; a [`Projection`] is immutable and cheap to share, so the
//! animation loop projects every frame without synchronization.
//!
//! ## See also
//! ------------
//! * [`crate::chart::StarChart`] – builds the projection from a catalog and the primary track.
use itertools::{Itertools, MinMaxResult};
use nalgebra::Point2;

use crate::{
    celestial_coord::{CelestialCoord, Positioned},
    config::{ChartConfig, Margin},
    constants::{ArcSec, Degree, Pixel},
};

/// Position on the drawing surface.
pub type ScreenPoint = Point2<Pixel>;

/// Linear map from a numeric domain onto a pixel range.
///
/// A degenerate domain (both bounds equal) maps every value onto the range start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (Pixel, Pixel),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (Pixel, Pixel)) -> Self {
        LinearScale { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (Pixel, Pixel) {
        self.range
    }

    /// Map `value` onto the range. Values outside the domain extrapolate linearly.
    pub fn apply(&self, value: f64) -> Pixel {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 { 0.0 } else { (value - d0) / span };
        // r0·(1−t) + r1·t hits both range ends exactly at t = 0 and t = 1
        r0 * (1.0 - t) + r1 * t
    }
}

/// Extent of the framed coordinates, right ascension already rotated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportDomain {
    pub ra: (ArcSec, ArcSec),
    pub dec: (ArcSec, ArcSec),
}

/// `(min, max)` of the finite values of an iterator.
fn finite_extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    match values.filter(|v| v.is_finite()).minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(v) => Some((v, v)),
        MinMaxResult::MinMax(min, max) => Some((min, max)),
    }
}

impl ViewportDomain {
    /// Compute the domain framing `coords` under a sky rotation.
    ///
    /// Arguments
    /// -----------------
    /// * `coords` – Everything that must fit in the frame (stars + primary track).
    /// * `offset` – Sky rotation in degrees.
    ///
    /// Return
    /// ----------
    /// * The domain, or `None` when no coordinate is finite. Non-finite values are
    ///   skipped axis by axis.
    pub fn from_coords<I, P>(coords: I, offset: Degree) -> Option<Self>
    where
        I: IntoIterator<Item = P>,
        P: Positioned,
    {
        let coords: Vec<CelestialCoord> = coords.into_iter().map(|p| p.coord()).collect();
        let ra = finite_extent(coords.iter().map(|c| c.rotated_ra(offset)))?;
        let dec = finite_extent(coords.iter().map(|c| c.dec))?;
        Some(ViewportDomain { ra, dec })
    }
}

/// Pixel area coordinates are projected into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: Pixel,
    pub height: Pixel,
    pub margin: Margin,
}

impl Viewport {
    pub fn from_config(config: &ChartConfig) -> Self {
        Viewport {
            width: config.width,
            height: config.height,
            margin: config.margin,
        }
    }

    /// Horizontal range, inverted: right ascension grows right to left.
    pub fn x_range(&self) -> (Pixel, Pixel) {
        (self.width - self.margin.right, self.margin.left)
    }

    /// Vertical range, inverted: declination grows bottom to top.
    pub fn y_range(&self) -> (Pixel, Pixel) {
        (self.height - self.margin.bottom, self.margin.top)
    }
}

/// Frozen sky → screen mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    offset: Degree,
    domain: ViewportDomain,
    x_scale: LinearScale,
    y_scale: LinearScale,
}

impl Projection {
    pub fn new(domain: ViewportDomain, viewport: &Viewport, offset: Degree) -> Self {
        Projection {
            offset,
            domain,
            x_scale: LinearScale::new(domain.ra, viewport.x_range()),
            y_scale: LinearScale::new(domain.dec, viewport.y_range()),
        }
    }

    pub fn domain(&self) -> &ViewportDomain {
        &self.domain
    }

    pub fn offset(&self) -> Degree {
        self.offset
    }

    pub fn x_scale(&self) -> &LinearScale {
        &self.x_scale
    }

    pub fn y_scale(&self) -> &LinearScale {
        &self.y_scale
    }

    /// Horizontal position of a right ascension.
    pub fn x(&self, coord: &CelestialCoord) -> Pixel {
        self.x_scale.apply(coord.rotated_ra(self.offset))
    }

    /// Vertical position of a declination.
    pub fn y(&self, coord: &CelestialCoord) -> Pixel {
        self.y_scale.apply(coord.dec)
    }

    /// Project anything positioned on the sky.
    pub fn project<P: Positioned + ?Sized>(&self, item: &P) -> ScreenPoint {
        let coord = item.coord();
        ScreenPoint::new(self.x(&coord), self.y(&coord))
    }

    /// Project, returning `None` instead of a non-finite point.
    pub fn project_finite<P: Positioned + ?Sized>(&self, item: &P) -> Option<ScreenPoint> {
        let p = self.project(item);
        (p.x.is_finite() && p.y.is_finite()).then_some(p)
    }
}

#[cfg(test)]
mod projection_test {
    use super::*;
    use crate::constants::FULL_CIRCLE_ARCSEC;
    use approx::assert_relative_eq;

    fn viewport() -> Viewport {
        Viewport {
            width: 800.0,
            height: 400.0,
            margin: Margin {
                top: 10.0,
                right: 20.0,
                bottom: 30.0,
                left: 40.0,
            },
        }
    }

    fn sample_coords() -> Vec<CelestialCoord> {
        vec![
            CelestialCoord::new(54_000.0, 36_000.0),
            CelestialCoord::new(108_000.0, 72_000.0),
            CelestialCoord::new(90_000.0, -18_000.0),
        ]
    }

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new((0.0, 10.0), (100.0, 0.0));
        assert_eq!(scale.apply(0.0), 100.0);
        assert_eq!(scale.apply(10.0), 0.0);
        assert_eq!(scale.apply(5.0), 50.0);
        assert_eq!(scale.apply(20.0), -100.0);

        let flat = LinearScale::new((3.0, 3.0), (100.0, 0.0));
        assert_eq!(flat.apply(3.0), 100.0);
        assert_eq!(flat.apply(7.0), 100.0);
    }

    #[test]
    fn test_domain_extent() {
        let domain = ViewportDomain::from_coords(sample_coords(), 0.0).unwrap();
        assert_eq!(domain.ra, (54_000.0, 108_000.0));
        assert_eq!(domain.dec, (-18_000.0, 72_000.0));

        let nan = CelestialCoord::new(f64::NAN, f64::NAN);
        let mut coords = sample_coords();
        coords.push(nan);
        assert_eq!(ViewportDomain::from_coords(coords, 0.0), Some(domain));

        assert_eq!(ViewportDomain::from_coords(vec![nan], 0.0), None);
        assert_eq!(
            ViewportDomain::from_coords(Vec::<CelestialCoord>::new(), 0.0),
            None
        );
    }

    #[test]
    fn test_domain_uses_rotated_ra() {
        // a 340° rotation wraps the 30° and 25° stars past 360° but not the 15° one
        let domain = ViewportDomain::from_coords(sample_coords(), 340.0).unwrap();
        let rotated: Vec<f64> = sample_coords().iter().map(|c| c.rotated_ra(340.0)).collect();
        assert_eq!(rotated, [1_278_000.0, 36_000.0, 18_000.0]);
        assert_eq!(domain.ra, (18_000.0, 1_278_000.0));
    }

    #[test]
    fn test_domain_extremes_hit_range_ends() {
        let vp = viewport();
        let domain = ViewportDomain::from_coords(sample_coords(), 0.0).unwrap();
        let projection = Projection::new(domain, &vp, 0.0);

        let min = CelestialCoord::new(domain.ra.0, domain.dec.0);
        let max = CelestialCoord::new(domain.ra.1, domain.dec.1);

        assert_eq!(projection.project(&min), ScreenPoint::new(780.0, 370.0));
        assert_eq!(projection.project(&max), ScreenPoint::new(40.0, 10.0));
    }

    #[test]
    fn test_in_domain_points_stay_in_viewport() {
        let vp = viewport();
        let domain = ViewportDomain::from_coords(sample_coords(), 0.0).unwrap();
        let projection = Projection::new(domain, &vp, 0.0);

        for coord in sample_coords() {
            let p = projection.project(&coord);
            assert!((40.0..=780.0).contains(&p.x), "{p:?}");
            assert!((10.0..=370.0).contains(&p.y), "{p:?}");
        }
        let mid = CelestialCoord::new(81_000.0, 27_000.0);
        let p = projection.project(&mid);
        assert_relative_eq!(p.x, 410.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 190.0, epsilon = 1e-9);
    }

    #[test]
    fn test_wraparound_is_exact() {
        let vp = viewport();
        for offset in [0.0, 12.5, 180.0, -45.0, 359.0] {
            let domain = ViewportDomain::from_coords(sample_coords(), offset).unwrap();
            let projection = Projection::new(domain, &vp, offset);
            for x in [0.0, 1.0, 54_000.0, 648_000.0, 1_295_999.0] {
                let a = projection.project(&CelestialCoord::new(x, 0.0));
                let b = projection.project(&CelestialCoord::new(FULL_CIRCLE_ARCSEC + x, 0.0));
                assert_eq!(a, b, "offset {offset}, ra {x}");
            }
        }
    }

    #[test]
    fn test_project_finite() {
        let domain = ViewportDomain::from_coords(sample_coords(), 0.0).unwrap();
        let projection = Projection::new(domain, &viewport(), 0.0);
        assert!(projection
            .project_finite(&CelestialCoord::new(f64::NAN, 0.0))
            .is_none());
        assert!(projection
            .project_finite(&CelestialCoord::new(60_000.0, 0.0))
            .is_some());
    }
}
