use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// An error raised while reading or writing record files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReconcileError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// The file is valid JSON but not an array of objects.
    #[error("The file {} does not contain records: {reason}", path.display())]
    MalformedInput { path: PathBuf, reason: String },
}
