#![allow(dead_code)]
use approx::assert_relative_eq;
use camino::Utf8PathBuf;
use starpath::{chart::StarChart, config::ChartConfig, projection::ScreenPoint};

pub fn data_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data")
}

/// Chart of the test data set, built from in-memory texts.
pub fn test_chart() -> StarChart {
    let config = ChartConfig::from_json_str(include_str!("../data/chart.json")).unwrap();
    let ephemerides = vec![
        include_str!("../data/mars.txt").to_string(),
        include_str!("../data/jupiter.txt").to_string(),
    ];
    StarChart::build(config, include_str!("../data/stars.tsv"), &ephemerides).unwrap()
}

pub fn assert_point_close(actual: ScreenPoint, expected: ScreenPoint, epsilon: f64) {
    assert_relative_eq!(actual.x, expected.x, epsilon = epsilon);
    assert_relative_eq!(actual.y, expected.y, epsilon = epsilon);
}
