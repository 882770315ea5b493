//! # Source loading
//!
//! A chart needs the text of one catalog file and of one ephemeris file per tracked
//! body. [`load_sources`] reads all of them concurrently and only returns once every
//! read has finished, so the chart is built from a complete set of texts.
//!
//! Relative paths in the configuration are resolved against `base_dir` (usually the
//! directory holding the configuration file).
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use tokio::task::JoinSet;

use crate::{config::ChartConfig, starpath_errors::StarpathError};

/// Raw texts of every source a chart reads.
///
/// Fields
/// -----------------
/// * `catalog` – Catalog file content.
/// * `ephemerides` – One ephemeris text per planet, in configuration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartSources {
    pub catalog: String,
    pub ephemerides: Vec<String>,
}

fn resolve(base_dir: &Utf8Path, src: &Utf8Path) -> Utf8PathBuf {
    if src.is_absolute() {
        src.to_path_buf()
    } else {
        base_dir.join(src)
    }
}

async fn read_source(path: Utf8PathBuf) -> Result<String, StarpathError> {
    tokio::fs::read_to_string(&path).await.map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            StarpathError::SourceNotFound(path.to_string())
        } else {
            StarpathError::IoError(err)
        }
    })
}

/// Read the catalog and every ephemeris table named by `config`.
///
/// Arguments
/// -----------------
/// * `config` – Chart configuration naming the sources.
/// * `base_dir` – Directory relative source paths are resolved against.
///
/// Return
/// ----------
/// * The texts, ephemerides in planet order. The first failing read is returned as
///   [`StarpathError::SourceNotFound`] or [`StarpathError::IoError`]; the remaining
///   reads are cancelled.
pub async fn load_sources(
    config: &ChartConfig,
    base_dir: &Utf8Path,
) -> Result<ChartSources, StarpathError> {
    let paths: Vec<Utf8PathBuf> = std::iter::once(&config.stars.src)
        .chain(config.planets.iter().map(|p| &p.src))
        .map(|src| resolve(base_dir, src))
        .collect();

    let mut reads = JoinSet::new();
    for (index, path) in paths.iter().cloned().enumerate() {
        reads.spawn(async move { (index, read_source(path).await) });
    }

    let mut texts: Vec<Option<String>> = vec![None; paths.len()];
    while let Some(joined) = reads.join_next().await {
        let (index, text) = joined?;
        texts[index] = Some(text?);
    }

    let mut texts = texts.into_iter().flatten();
    let catalog = texts.next().unwrap_or_default();
    let ephemerides: Vec<String> = texts.collect();
    debug!(
        "loaded catalog ({} bytes) and {} ephemeris tables",
        catalog.len(),
        ephemerides.len()
    );
    Ok(ChartSources {
        catalog,
        ephemerides,
    })
}
