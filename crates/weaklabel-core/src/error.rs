//! Error types for the weak labeling engine.
//!
//! Scoring itself never fails: out-of-vocabulary lemmas, missing term
//! frequencies and empty hierarchical labels all resolve to a defined
//! fallback. Everything in this module is raised while loading resources
//! (configuration, vocabularies, word vectors, term-frequency tables), so a
//! bad input is reported once at startup instead of corrupting every ranking.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for weaklabel operations.
#[derive(Error, Debug)]
pub enum WeakLabelError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Vocabulary loading errors
    #[error("Vocabulary error: {0}")]
    Vocabulary(#[from] VocabularyError),

    /// Word vector loading errors
    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    /// Term-frequency or candidate table loading errors
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// A post record could not be parsed
    #[error("Invalid post at {path}:{line}: {message}")]
    Input {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised while parsing vocabulary files.
#[derive(Error, Debug)]
pub enum VocabularyError {
    /// A vocabulary file could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line failed to parse into a label
    #[error("Malformed vocabulary entry at {path}:{line}: {message}")]
    Malformed {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

/// Errors raised while loading a word-vector table.
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// The vectors file could not be read
    #[error("Failed to read word vectors from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The `<count> <dim>` header line is missing or invalid
    #[error("Invalid word vector header: {0}")]
    Header(String),

    /// A row has the wrong number of components or a non-numeric value
    #[error("Invalid word vector at line {line}: {message}")]
    Row { line: usize, message: String },
}

/// Errors raised while loading per-post JSON resources.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The resource file could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The resource file is not valid JSON of the expected shape
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A weight or confidence is negative or not finite
    #[error("Invalid value in {path} for {key:?}: {value}")]
    InvalidValue {
        path: PathBuf,
        key: String,
        value: f64,
    },
}

/// Convenience type alias for weaklabel results.
pub type Result<T> = std::result::Result<T, WeakLabelError>;
