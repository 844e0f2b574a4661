#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// JSON pose documents.
pub mod json;

/// Record layout of a pose in a JSON document.
pub mod record;

pub use json::*;
pub use record::PoseRecord;

use std::path::PathBuf;

/// Error types for loading poses and storing offsets.
#[derive(Debug, thiserror::Error)]
pub enum PoseIoError {
    /// The input document does not exist
    #[error("Pose source unavailable: {0}")]
    SourceUnavailable(PathBuf),

    /// Error reading or writing file
    #[error("error reading or writing file")]
    Io(#[from] std::io::Error),

    /// Failed to parse or serialize a JSON document
    #[error("Failed to parse or serialize JSON document")]
    Json(#[from] serde_json::Error),
}
