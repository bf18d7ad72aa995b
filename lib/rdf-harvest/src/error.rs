use rdf_harvest_reconcile::ReconcileError;
use std::io;
use std::path::PathBuf;

/// An error raised by the end-to-end extraction.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum HarvestError {
    /// The input could not be opened.
    #[error("Could not open the input {}: {error}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        error: io::Error,
    },
    /// An error raised while reading the input.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// An error raised while writing the records.
    #[error(transparent)]
    Output(#[from] ReconcileError),
}
