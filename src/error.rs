// src/error.rs

//! Error type shared by every discograph module.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DiscographError>;

/// Everything that can go wrong while loading a discography or rendering it.
///
/// In practice only the input-side variants occur: a graph built from a
/// well-formed dataset always renders.
#[derive(Error, Debug)]
pub enum DiscographError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The dataset header lacks one of the `Album`/`Artist` columns.
    #[error("column '{column}' not found in {}", path.display())]
    MissingColumn { column: &'static str, path: PathBuf },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Spacing constant outside `[0, 1]` or not a number.
    #[error("spacing K must be a number between 0.0 and 1.0, got {0}")]
    InvalidSpacing(f64),

    #[error("render error: {0}")]
    Render(String),
}
