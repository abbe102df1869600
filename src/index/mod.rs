pub mod types;

pub use types::{PrIndex, PrRecord};

use std::fs::File;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Failed to access index file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse index file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write the index to `path` as a single compact JSON document, overwriting
/// any existing content.
#[instrument(skip(index), fields(records = index.len(), path = %path.display()))]
pub fn save(index: &PrIndex, path: &Path) -> Result<(), IndexError> {
    debug!("writing index snapshot");
    let file = File::create(path)?;
    serde_json::to_writer(file, index)?;
    Ok(())
}

/// Load a previously saved index document. A missing or unreadable path and
/// malformed content both surface here, at the point of access.
#[instrument(fields(path = %path.display()))]
pub fn load(path: &Path) -> Result<PrIndex, IndexError> {
    debug!("loading index snapshot");
    let file = File::open(path)?;
    let index: PrIndex = serde_json::from_reader(file)?;
    debug!(records = index.len(), "index snapshot loaded");
    Ok(index)
}
