//! # Ephemeris tables
//!
//! A tracked body is described by a time-ordered list of [`EphemerisSample`]s. The
//! first table of a chart belongs to the **primary** body (drawn with a dashed trail and
//! blended smoothly between samples); the others are **secondary** bodies that jump from
//! sample to sample.
//!
//! ## Overview
//! -----------------
//! * [`EphemerisSample`] – one row: a time label and a position in arcseconds.
//! * [`EphemerisTrack`] – a non-empty sequence of samples; the only shape the
//!   interpolator accepts.
//! * [`ephemeris_reader::parse_ephemeris`] – whitespace-separated text → samples.
//!
//! An empty table cannot be animated and is rejected when the track is built.
use std::ops::Deref;

use crate::{
    celestial_coord::{CelestialCoord, Positioned},
    starpath_errors::StarpathError,
};

pub mod ephemeris_reader;

/// A body position at a labelled instant.
///
/// Fields
/// -----------------
/// * `time` – Label displayed while this sample is current; never interpolated.
/// * `coord` – Position in arcseconds. May hold `NaN` when the source row was malformed.
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisSample {
    pub time: String,
    pub coord: CelestialCoord,
}

impl EphemerisSample {
    pub fn new(time: impl Into<String>, coord: CelestialCoord) -> Self {
        EphemerisSample {
            time: time.into(),
            coord,
        }
    }
}

impl Positioned for EphemerisSample {
    fn coord(&self) -> CelestialCoord {
        self.coord
    }
}

/// Non-empty, chronologically ordered ephemeris of one body.
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisTrack {
    samples: Vec<EphemerisSample>,
}

impl EphemerisTrack {
    /// Wrap a sample list, rejecting an empty one.
    ///
    /// Arguments
    /// -----------------
    /// * `body` – Index of the body in the chart, reported on error.
    /// * `samples` – Samples in chronological order.
    ///
    /// Return
    /// ----------
    /// * The track, or [`StarpathError::EmptyEphemeris`] when `samples` is empty.
    pub fn new(body: usize, samples: Vec<EphemerisSample>) -> Result<Self, StarpathError> {
        if samples.is_empty() {
            return Err(StarpathError::EmptyEphemeris(body));
        }
        Ok(EphemerisTrack { samples })
    }

    /// Parse an ephemeris table and wrap it.
    pub fn parse(body: usize, text: &str) -> Result<Self, StarpathError> {
        EphemerisTrack::new(body, ephemeris_reader::parse_ephemeris(text))
    }

    pub fn samples(&self) -> &[EphemerisSample] {
        &self.samples
    }

    pub fn first(&self) -> &EphemerisSample {
        &self.samples[0]
    }

    pub fn last(&self) -> &EphemerisSample {
        &self.samples[self.samples.len() - 1]
    }

    /// Index of the last sample (`len - 1`), the span the animation ratio is scaled to.
    pub fn last_index(&self) -> usize {
        self.samples.len() - 1
    }

    /// Number of samples holding a non-finite coordinate.
    pub fn non_finite_count(&self) -> usize {
        self.samples.iter().filter(|s| !s.coord.is_finite()).count()
    }
}

impl Deref for EphemerisTrack {
    type Target = [EphemerisSample];

    fn deref(&self) -> &Self::Target {
        &self.samples
    }
}

#[cfg(test)]
mod ephemeris_test {
    use super::*;

    #[test]
    fn test_empty_track_rejected() {
        assert_eq!(
            EphemerisTrack::new(2, vec![]),
            Err(StarpathError::EmptyEphemeris(2))
        );
        assert_eq!(
            EphemerisTrack::parse(0, "\n\n"),
            Err(StarpathError::EmptyEphemeris(0))
        );
    }

    #[test]
    fn test_track_accessors() {
        let track = EphemerisTrack::parse(
            0,
            "2013-JAN-01 00:00 10.0 5.0\n2013-JAN-02 00:00 11.0 x\n",
        )
        .unwrap();
        assert_eq!(track.len(), 2);
        assert_eq!(track.last_index(), 1);
        assert_eq!(track.first().time, "2013-JAN-01");
        assert_eq!(track.last().time, "2013-JAN-02");
        assert_eq!(track.non_finite_count(), 1);
    }
}
