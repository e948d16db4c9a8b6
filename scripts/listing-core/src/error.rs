use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ListingError>;

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unsupported dataset layout in {path:?}: {reason}")]
    Layout { path: PathBuf, reason: String },

    /// The misspelling word list is a hard prerequisite of the analysis.
    #[error("word list not found at {0:?} (run scrape-misspell first)")]
    WordListMissing(PathBuf),

    #[error("word list {0:?} has a header but no word pairs")]
    EmptyWordList(PathBuf),

    #[error("{path:?}: missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("{path:?}, line {line}: {reason}")]
    MalformedRow {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("cohort '{0}' has no pairs")]
    EmptyCohort(String),
}

impl ListingError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
