use camino::Utf8Path;
use starpath::{
    catalog::Star,
    chart::StarChart,
    config::ChartConfig,
    loader::load_sources,
    projection::ScreenPoint,
    render::frame_export::{export_frames, frame_file_name},
    starpath_errors::StarpathError,
};

mod common;

async fn load() -> StarChart {
    let dir = common::data_dir();
    let config = ChartConfig::from_file(&dir.join("chart.json")).unwrap();
    let sources = load_sources(&config, &dir).await.unwrap();
    assert_eq!(sources.ephemerides.len(), 2);
    StarChart::from_sources(config, &sources).unwrap()
}

fn star<'a>(chart: &'a StarChart, name: &str) -> &'a Star {
    chart.catalog().star(name).unwrap()
}

#[tokio::test]
async fn test_catalog_blocks() {
    let chart = load().await;
    let catalog = chart.catalog();

    assert_eq!(catalog.constellations.len(), 1);
    assert_eq!(catalog.constellations[0].label(), "ORI");

    let names: Vec<&str> = catalog.stars.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Betelgeuse", "Rigel", "Bellatrix"]);
    assert!(catalog.star("Deneb").is_none());

    // the annotation star still anchors the first link
    assert_eq!(catalog.links.len(), 2);
    assert_eq!(catalog.links[0].missing_count(), 0);
    assert_eq!(catalog.links[0].len(), 4);
    assert_eq!(catalog.links[1].missing_count(), 1);
    assert!(catalog.links[1].resolved_runs().is_empty());
}

#[tokio::test]
async fn test_projection_of_the_data_set() {
    let chart = load().await;
    let projection = chart.projection();

    // Rigel holds both the lowest right ascension and the lowest declination
    let rigel = star(&chart, "Rigel");
    assert_eq!(rigel.coord.ra, 283_080.0);
    assert_eq!(rigel.coord.dec, -29_526.0);
    assert_eq!(projection.project(rigel), ScreenPoint::new(780.0, 380.0));

    // Betelgeuse holds the highest right ascension
    assert_eq!(projection.project(star(&chart, "Betelgeuse")).x, 20.0);

    // the last Mars sample holds the highest declination
    let end = chart.frame_at(1.0);
    assert_eq!(end.time_label, "2024-01-05");
    let mars_end = end.primary_position().unwrap();
    assert_eq!(mars_end.y, 20.0);
    let t = (316_800.0 - 283_080.0) / (319_650.0 - 283_080.0);
    common::assert_point_close(
        mars_end,
        ScreenPoint::new(780.0 * (1.0 - t) + 20.0 * t, 20.0),
        1e-9,
    );
}

#[tokio::test]
async fn test_snapshot_content() {
    let chart = load().await;
    let svg = chart.snapshot_svg(0.5).unwrap();

    assert!(svg.contains(">2024-01-03<"));
    assert!(svg.contains(">ORI<"));
    assert!(svg.contains(">α Ori<"));
    assert!(!svg.contains(">belt<"));
    assert!(!svg.contains("α Cyg"));
    // one link polyline and the trail
    assert_eq!(svg.matches("<path").count(), 2);
    // three star dots and two body markers
    assert_eq!(svg.matches("<circle").count(), 5);
}

#[tokio::test]
async fn test_export_frames() {
    let chart = load().await;
    let out = std::env::temp_dir().join(format!("starpath-frames-{}", std::process::id()));
    let out = Utf8Path::from_path(&out).unwrap();

    let written = export_frames(&chart, out, 3).unwrap();
    assert_eq!(written.len(), 3);
    assert_eq!(written[2], out.join(frame_file_name(2)));

    let first = std::fs::read_to_string(&written[0]).unwrap();
    let last = std::fs::read_to_string(&written[2]).unwrap();
    assert!(first.contains(">2024-01-01<"));
    assert!(last.contains(">2024-01-05<"));

    std::fs::remove_dir_all(out).unwrap();
}

#[tokio::test]
async fn test_missing_ephemeris_file() {
    let mut config = ChartConfig::from_file(&common::data_dir().join("chart.json")).unwrap();
    config.planets[1].src = "saturn.txt".into();
    let err = load_sources(&config, &common::data_dir()).await.unwrap_err();
    assert!(matches!(err, StarpathError::SourceNotFound(path) if path.ends_with("saturn.txt")));
}
