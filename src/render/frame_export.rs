//! Export of one animation cycle as a numbered series of SVG snapshots.
//!
//! Frame `i` of `n` is rendered at ratio `i / (n − 1)`, so the series starts on the first
//! sample and ends on the last one. Files are named `frame_0000.svg`, `frame_0001.svg`, …
//!
//! With the `progress` feature a progress bar reports the frame count, the export rate
//! and the SVG serialization rate.
use camino::{Utf8Path, Utf8PathBuf};
use log::info;

#[cfg(feature = "progress")]
use super::progress_bar::{frame_bar, ExportStats};
use crate::{chart::StarChart, constants::Ratio, starpath_errors::StarpathError};

/// Ratio of frame `index` in a series of `count` frames.
pub fn frame_ratio(index: usize, count: usize) -> Ratio {
    if count <= 1 {
        0.0
    } else {
        index as f64 / (count - 1) as f64
    }
}

pub fn frame_file_name(index: usize) -> String {
    format!("frame_{index:04}.svg")
}

/// Write `count` snapshots of `chart` into `out_dir`, creating it if needed.
///
/// Return
/// ----------
/// * The written paths in frame order.
pub fn export_frames(
    chart: &StarChart,
    out_dir: &Utf8Path,
    count: usize,
) -> Result<Vec<Utf8PathBuf>, StarpathError> {
    std::fs::create_dir_all(out_dir)?;

    #[cfg(feature = "progress")]
    let (pb, mut stats) = (frame_bar(count), ExportStats::default());

    let mut written = Vec::with_capacity(count);
    for index in 0..count {
        #[cfg(feature = "progress")]
        let started = std::time::Instant::now();
        let svg = chart.snapshot_svg(frame_ratio(index, count))?;
        #[cfg(feature = "progress")]
        {
            stats.record(started.elapsed(), svg.len());
            pb.set_message(stats.message());
        }

        let path = out_dir.join(frame_file_name(index));
        std::fs::write(&path, svg)?;
        written.push(path);

        #[cfg(feature = "progress")]
        pb.inc(1);
    }

    #[cfg(feature = "progress")]
    pb.finish_and_clear();

    info!("{count} frames written to {out_dir}");
    Ok(written)
}
