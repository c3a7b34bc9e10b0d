//! Error types for the qlearn crate

use thiserror::Error;

/// Main error type for the qlearn crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid parameter '{name}' = {value} (expected {constraint})")]
    InvalidParameter {
        name: String,
        value: String,
        constraint: String,
    },

    #[error("invalid action {action}: action space has {num_actions} actions")]
    InvalidAction { action: usize, num_actions: usize },

    #[error("episode {episode} exceeded the step limit of {max_steps} without terminating")]
    EpisodeTruncated { episode: usize, max_steps: usize },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build an `InvalidParameter` error from displayable parts.
    pub fn invalid_parameter(
        name: impl Into<String>,
        value: impl std::fmt::Display,
        constraint: impl Into<String>,
    ) -> Self {
        Error::InvalidParameter {
            name: name.into(),
            value: value.to_string(),
            constraint: constraint.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
