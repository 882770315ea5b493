//! # Sampling an ephemeris at an animation ratio
//!
//! The animation sweeps a ratio `r ∈ [0, 1]` over one cycle. A track of `n` samples is
//! addressed by the fractional index `r · (n − 1)`; two readings are available:
//!
//! * [`ratio_of`] – **discrete pick**: the sample at `floor(r · (n − 1))`, returned as-is.
//!   Secondary bodies and the time label use it, so labels always show a sample's exact
//!   text.
//! * [`interpolate_ratio_of`] – **continuous blend**: right ascension and declination
//!   linearly interpolated between the floor sample and the next one. Only the primary
//!   body marker uses it.
//!
//! ## Edge cases
//! -----------------
//! * The ratio is clamped into `[0, 1]`; `NaN` reads as `0`.
//! * When `r` is exactly the float `k / (n − 1)`, the index is snapped onto `k`, so both
//!   readings return sample `k` despite rounding in the product `r · (n − 1)`. Any other
//!   ratio takes the plain floor, however close it is to a sample.
//! * At the last index there is nothing to blend toward; the last sample is returned.
//! * A single-sample track returns that sample for every ratio.
//!
//! Tracks are never empty ([`EphemerisTrack::new`] rejects that), so both readings are total.
use crate::{
    celestial_coord::{CelestialCoord, Positioned},
    constants::Ratio,
    ephemeris::{EphemerisSample, EphemerisTrack},
};

/// Result of a continuous blend.
///
/// Fields
/// -----------------
/// * `time` – Label of the floor sample; labels are never blended.
/// * `coord` – Interpolated position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolatedSample<'a> {
    pub time: &'a str,
    pub coord: CelestialCoord,
}

impl<'a> From<&'a EphemerisSample> for InterpolatedSample<'a> {
    fn from(sample: &'a EphemerisSample) -> Self {
        InterpolatedSample {
            time: &sample.time,
            coord: sample.coord,
        }
    }
}

impl Positioned for InterpolatedSample<'_> {
    fn coord(&self) -> CelestialCoord {
        self.coord
    }
}

/// Split `ratio · last_index` into a floor index and a blend weight in `[0, 1)`.
///
/// Arguments
/// -----------------
/// * `ratio` – Animation ratio, clamped into `[0, 1]`.
/// * `last_index` – Index of the last sample (`n − 1`).
///
/// Return
/// ----------
/// * `(lo, weight)` with `lo ≤ last_index`.
pub fn fractional_index(ratio: Ratio, last_index: usize) -> (usize, f64) {
    let ratio = if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    };
    let mut idx = ratio * last_index as f64;
    let nearest = idx.round();
    if nearest / last_index as f64 == ratio {
        idx = nearest;
    }
    let lo = (idx.floor() as usize).min(last_index);
    (lo, idx - lo as f64)
}

/// Discrete pick: the sample at `floor(ratio · (n − 1))`.
pub fn ratio_of(track: &EphemerisTrack, ratio: Ratio) -> &EphemerisSample {
    let (lo, _) = fractional_index(ratio, track.last_index());
    &track[lo]
}

/// Continuous blend between the two samples surrounding `ratio · (n − 1)`.
///
/// Return
/// ----------
/// * The floor sample unchanged when the index is exact or is the last one, otherwise
///   `lo + (hi − lo) · weight` with the floor sample's time label.
pub fn interpolate_ratio_of(track: &EphemerisTrack, ratio: Ratio) -> InterpolatedSample<'_> {
    let (lo, weight) = fractional_index(ratio, track.last_index());
    let lo_sample = &track[lo];
    if lo >= track.last_index() || weight == 0.0 {
        return lo_sample.into();
    }
    let hi_sample = &track[lo + 1];
    InterpolatedSample {
        time: &lo_sample.time,
        coord: lo_sample.coord + (hi_sample.coord - lo_sample.coord) * weight,
    }
}
