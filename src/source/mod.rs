//! Catalogue input.
//!
//! Reads a local JSON catalogue once, at startup, and hands the core a fully
//! built [`RecordStore`]. Sorting by date happens here, at load time, never
//! during filtering.

pub mod catalogue;

pub use catalogue::parse_catalogue;

use crate::model::{RecordStore, StoreError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors while loading a catalogue.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The catalogue file does not exist.
    #[error("Catalogue file not found: {path}")]
    FileNotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// I/O failure while reading the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid catalogue JSON.
    #[error("Invalid catalogue JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// One entry could not be turned into a record.
    #[error("Invalid record at position {index}: {reason}")]
    InvalidRecord {
        /// Zero-based position in the file.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// Two entries share an identifier.
    #[error("Duplicate record identifier: {0}")]
    DuplicateId(String),
}

impl From<StoreError> for LoadError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateId(id) => LoadError::DuplicateId(id.to_string()),
        }
    }
}

/// Build a store from catalogue JSON text.
pub fn store_from_json(json: &str) -> Result<RecordStore, LoadError> {
    let records = parse_catalogue(json)?;
    Ok(RecordStore::new(records)?)
}

/// Load and sort a catalogue file.
///
/// # Errors
///
/// Returns [`LoadError::FileNotFound`] if `path` does not exist, and the
/// other [`LoadError`] variants for unreadable or malformed content.
pub fn load_catalogue(path: impl AsRef<Path>) -> Result<RecordStore, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let json = std::fs::read_to_string(path)?;
    let store = store_from_json(&json)?;

    info!(
        path = %path.display(),
        records = store.len(),
        categories = store.categories().len(),
        "Catalogue loaded"
    );
    Ok(store)
}
