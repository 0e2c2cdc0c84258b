// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a scrape-and-push run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Browser launch failed, or a page/element was not reachable within the wait bound.
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// The scraped table is empty or malformed.
    #[error("data integrity check failed: {0}")]
    DataIntegrity(String),

    /// An expected column is missing from the scraped table.
    #[error("column `{0}` not found in the scraped table")]
    Schema(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    /// Google authentication or API failure.
    #[error("publishing to Google Sheets failed: {0}")]
    Publish(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ScrapeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScrapeError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
