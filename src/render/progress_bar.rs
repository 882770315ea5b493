//! Export statistics shown next to the frame progress bar (feature `progress`).
//!
//! The bar itself reports position, rate and elapsed time through the `indicatif`
//! template keys. [`ExportStats`] adds what the template cannot see: how fast the chart
//! is serialized to SVG, apart from the file writes, and how large a frame is.
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str =
    "{bar:40.cyan/blue} {pos}/{len} frames ({per_sec}) | {elapsed_precise} | {msg}";

pub(crate) fn frame_bar(count: usize) -> ProgressBar {
    let pb = ProgressBar::new(count.max(1) as u64);
    pb.set_style(
        ProgressStyle::with_template(TEMPLATE).unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}

/// Running totals over the exported frames.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct ExportStats {
    frames: u64,
    serialize: Duration,
    bytes: u64,
}

impl ExportStats {
    /// Account one frame serialized in `serialize` into `bytes` of SVG.
    pub(crate) fn record(&mut self, serialize: Duration, bytes: usize) {
        self.frames += 1;
        self.serialize += serialize;
        self.bytes += bytes as u64;
    }

    /// Frames serialized per second of serialization work, `None` before any timed frame.
    pub(crate) fn serialize_rate(&self) -> Option<f64> {
        let secs = self.serialize.as_secs_f64();
        (self.frames > 0 && secs > 0.0).then(|| self.frames as f64 / secs)
    }

    pub(crate) fn mean_frame_size(&self) -> u64 {
        self.bytes.checked_div(self.frames).unwrap_or(0)
    }

    pub(crate) fn message(&self) -> String {
        let size = fmt_size(self.mean_frame_size());
        match self.serialize_rate() {
            Some(rate) => format!("svg {rate:.1} frames/s, {size}/frame"),
            None => format!("{size}/frame"),
        }
    }
}

fn fmt_size(bytes: u64) -> String {
    match bytes {
        b if b < 1024 => format!("{b} B"),
        b if b < 1024 * 1024 => format!("{:.1} KiB", b as f64 / 1024.0),
        b => format!("{:.1} MiB", b as f64 / (1024.0 * 1024.0)),
    }
}
