use thiserror::Error;

use crate::catalog::catalog_reader::ParseCatalogError;

#[derive(Error, Debug)]
pub enum StarpathError {
    #[error("Invalid chart configuration: {0}")]
    InvalidConfig(String),

    #[error("Unable to read chart configuration: {0}")]
    ConfigFormat(#[from] serde_json::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Source file not found at: {0}")]
    SourceNotFound(String),

    #[error("Error during the catalog parsing: {0}")]
    ParsingCatalogError(ParseCatalogError),

    #[error("Ephemeris of body {0} has no sample")]
    EmptyEphemeris(usize),

    #[error("Expected {expected} ephemeris tables, got {found}")]
    EphemerisCountMismatch { expected: usize, found: usize },

    #[error("Unknown marker handle: {0}")]
    UnknownMarker(usize),

    #[error("Unknown label handle: {0}")]
    UnknownLabel(usize),

    #[error("SVG serialization error: {0}")]
    SvgWriteError(String),

    #[error("Background task failed: {0}")]
    TaskJoinError(#[from] tokio::task::JoinError),

    #[error("Animation loop is already running")]
    AnimationAlreadyRunning,

    #[error("Animation loop is not running")]
    AnimationNotRunning,

    #[error("Animation task failed earlier, its frame sink is gone")]
    SinkLost,
}

impl From<ParseCatalogError> for StarpathError {
    fn from(err: ParseCatalogError) -> Self {
        StarpathError::ParsingCatalogError(err)
    }
}

impl PartialEq for StarpathError {
    fn eq(&self, other: &Self) -> bool {
        use StarpathError::*;
        match (self, other) {
            (InvalidConfig(a), InvalidConfig(b)) => a == b,
            (SourceNotFound(a), SourceNotFound(b)) => a == b,
            (ParsingCatalogError(a), ParsingCatalogError(b)) => a == b,
            (EmptyEphemeris(a), EmptyEphemeris(b)) => a == b,
            (
                EphemerisCountMismatch {
                    expected: e1,
                    found: f1,
                },
                EphemerisCountMismatch {
                    expected: e2,
                    found: f2,
                },
            ) => e1 == e2 && f1 == f2,
            (UnknownMarker(a), UnknownMarker(b)) => a == b,
            (UnknownLabel(a), UnknownLabel(b)) => a == b,
            (SvgWriteError(a), SvgWriteError(b)) => a == b,

            // Opaque sources: same variant is enough
            (ConfigFormat(_), ConfigFormat(_)) => true,
            (IoError(_), IoError(_)) => true,
            (TaskJoinError(_), TaskJoinError(_)) => true,

            (AnimationAlreadyRunning, AnimationAlreadyRunning) => true,
            (AnimationNotRunning, AnimationNotRunning) => true,
            (SinkLost, SinkLost) => true,

            _ => false,
        }
    }
}
