//! Course Crawler: hierarchical course catalog extraction and indexing
//!
//! This crate walks a link-only course catalog five levels deep (term,
//! school, subject, section, detail page), extracts typed course records
//! from the detail pages, and indexes persisted batches of those records
//! by term, subject and cross-term course key.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod parse;
pub mod store;
pub mod url;

use thiserror::Error;

/// Main error type for course crawler operations
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for course crawler operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlOutcome, CrawlSession, Level};
pub use model::{Course, Instructor, MeetingTime, SubjectSummary};
pub use store::CourseStore;
