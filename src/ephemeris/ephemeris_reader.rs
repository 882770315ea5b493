//! Whitespace-separated ephemeris reader.
//!
//! Each row describes one sample:
//!
//! ```text
//! 2013-JAN-01 00:00 312.45678 -17.12345
//! time        (unused) ra[deg] dec[deg]
//! ```
//!
//! Columns are separated by runs of spaces or tabs. Degrees are converted to
//! arcseconds. There is no validation layer: a missing or malformed angle becomes
//! `NaN` and the row is still emitted, so sample indices keep matching the file.
//! Blank rows carry no sample and are skipped.
use log::debug;

use crate::{
    celestial_coord::CelestialCoord, conversion::degree_token_to_arcsec,
    ephemeris::EphemerisSample,
};

/// Parse a single non-blank row (crate-private helper).
///
/// Field Layout
/// -----------------
/// * `0` – Time label, kept verbatim.
/// * `1` – Ignored (time of day in generated tables).
/// * `2` – Right ascension, decimal degrees.
/// * `3` – Declination, decimal degrees.
fn from_row(row: &str) -> Option<EphemerisSample> {
    let tokens: Vec<&str> = row.split_whitespace().collect();
    let time = tokens.first()?;
    Some(EphemerisSample::new(
        *time,
        CelestialCoord::new(
            degree_token_to_arcsec(tokens.get(2).copied()),
            degree_token_to_arcsec(tokens.get(3).copied()),
        ),
    ))
}

/// Parse a whole ephemeris table, preserving row order.
pub fn parse_ephemeris(text: &str) -> Vec<EphemerisSample> {
    let samples: Vec<EphemerisSample> = text.lines().filter_map(from_row).collect();
    debug!("ephemeris parsed: {} samples", samples.len());
    samples
}

#[cfg(test)]
mod ephemeris_reader_test {
    use super::*;

    #[test]
    fn test_documented_field_order() {
        let samples = parse_ephemeris("2024-01-01 00:00 10.0 5.0");
        assert_eq!(
            samples,
            vec![EphemerisSample::new(
                "2024-01-01",
                CelestialCoord::new(36000.0, 18000.0)
            )]
        );
    }

    #[test]
    fn test_whitespace_runs() {
        let samples = parse_ephemeris("  2013-JAN-01   00:00\t\t312.5   -17.25  \n");
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].time, "2013-JAN-01");
        assert_eq!(samples[0].coord, CelestialCoord::new(1_125_000.0, -62_100.0));
    }

    #[test]
    fn test_malformed_numbers_become_nan() {
        // token[1] is the ignored column, so "ignored" lands in the declination slot
        let samples = parse_ephemeris("2024-01-01  10.0 5.0 ignored");
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].time, "2024-01-01");
        assert_eq!(samples[0].coord.ra, 18000.0);
        assert!(samples[0].coord.dec.is_nan());

        let samples = parse_ephemeris("2024-01-02");
        assert!(samples[0].coord.ra.is_nan());
        assert!(samples[0].coord.dec.is_nan());
    }

    #[test]
    fn test_order_and_blank_rows() {
        let text = "d1 00:00 1 1\n\nd2 00:00 2 2\n   \nd3 00:00 3 3\n";
        let times: Vec<String> = parse_ephemeris(text).into_iter().map(|s| s.time).collect();
        assert_eq!(times, ["d1", "d2", "d3"]);
    }
}
