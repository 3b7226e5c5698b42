//! Course batch persistence and indexing
//!
//! This module handles:
//! - Writing crawl results as JSON batch files
//! - Reading every batch in a data directory
//! - Indexing the loaded courses by term, subject and course key

mod files;
mod index;

pub use files::{list_batch_files, read_batch, write_batch};
pub use index::{CourseStore, IndexStatistics};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing batches
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed batch {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
