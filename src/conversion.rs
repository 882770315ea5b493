use crate::constants::{ArcSec, ARCSEC_PER_ARCMIN, ARCSEC_PER_DEGREE, DEGREES_PER_HOUR};

/// Convert a sexagesimal triple to arcseconds.
///
/// Arguments
/// ---------
/// * `s`: a string in the format `D M S` (or `H M S`), fields separated by whitespace.
///   `D` and `M` are usually integers, `S` may carry a fractional part. A leading `-`
///   on the first field negates the whole angle, so `-0 30 0` is `-1800`.
///
/// Returns
/// -------
/// * `Option<ArcSec>`: `D·3600 + M·60 + S`, or `None` if the input is not three numbers.
pub fn from_base60(s: &str) -> Option<ArcSec> {
    let parts: Vec<&str> = s.split_whitespace().collect();
    if parts.len() != 3 {
        return None;
    }

    let sign = if parts[0].starts_with('-') { -1.0 } else { 1.0 };
    let d: f64 = parts[0].trim_start_matches(&['-', '+'][..]).parse().ok()?;
    let m: f64 = parts[1].parse().ok()?;
    let sec: f64 = parts[2].parse().ok()?;

    Some(sign * (d * ARCSEC_PER_DEGREE + m * ARCSEC_PER_ARCMIN + sec))
}

/// Parse a catalog right ascension (`H M S`) into arcseconds of arc.
///
/// The hour-based value is scaled by 15 so that right ascension and declination
/// share the same unit.
pub(crate) fn parse_catalog_ra(ra: &str) -> Option<ArcSec> {
    from_base60(ra).map(|v| v * DEGREES_PER_HOUR)
}

/// Parse a catalog declination (`±D M S`) into arcseconds.
pub(crate) fn parse_catalog_dec(dec: &str) -> Option<ArcSec> {
    from_base60(dec)
}

/// Convert an optional decimal-degree token into arcseconds.
///
/// Missing or malformed tokens become `NaN`; ephemeris tables carry no validation
/// layer and downstream code filters non-finite positions.
pub(crate) fn degree_token_to_arcsec(token: Option<&str>) -> ArcSec {
    token
        .and_then(|t| t.parse::<f64>().ok())
        .map_or(f64::NAN, |deg| deg * ARCSEC_PER_DEGREE)
}
