//! Error types for guessle

use std::path::PathBuf;
use thiserror::Error;

/// A string could not be turned into a [`crate::word::Word`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("word must be exactly {expected} letters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("word may only contain the letters A-Z, got {0:?}")]
    InvalidCharacters(String),
}

/// Loading or validating a word list failed
#[derive(Debug, Error)]
pub enum WordListError {
    #[error("word list contains no usable {length}-letter words")]
    Empty { length: usize },

    #[error("failed to read word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse word list: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("embedded word list {0} not found")]
    MissingEmbedded(String),
}

/// Persisting statistics failed
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("stats I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stats serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("stats store lock poisoned")]
    Poisoned,
}

/// Reading or appending the game history failed
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("history CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Configuration values that cannot produce a playable game
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("word length must be at least 1")]
    ZeroWordLength,

    #[error("max attempts must be at least 1")]
    ZeroAttempts,
}
