//! Custom error types for translation operations

use thiserror::Error;

/// Which half of a split translation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitSide {
    /// The leading chunk, translated in a single request
    Left,
    /// The remainder, translated recursively
    Right,
}

impl std::fmt::Display for SplitSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SplitSide::Left => write!(f, "left"),
            SplitSide::Right => write!(f, "right"),
        }
    }
}

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Request token could not be derived
    #[error("Token generation failed: {message}")]
    TokenGenerationFailure {
        message: String,
    },

    /// Transport-level failure (connect, timeout, body read)
    #[error("Network error: {message}")]
    NetworkFailure {
        message: String,
    },

    /// Provider answered with a non-success status
    #[error("API error: {status} - {message}")]
    ApiError {
        status: u16,
        message: String,
    },

    /// Response body could not be repaired, parsed or walked
    #[error("Invalid response: {message}")]
    ResponseParseFailure {
        message: String,
    },

    /// One branch of a split translation failed
    #[error("Split translation failed on the {side} branch: {source}")]
    SplitMergeFailure {
        side: SplitSide,
        #[source]
        source: Box<TranslationError>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    /// History or phrasebook store error
    #[error("Store error: {path} - {message}")]
    StoreError {
        path: String,
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl TranslationError {
    /// Wrap a branch failure of the split path
    pub fn split(side: SplitSide, source: TranslationError) -> Self {
        TranslationError::SplitMergeFailure {
            side,
            source: Box::new(source),
        }
    }

    /// The innermost error behind any number of split wrappers
    pub fn root_cause(&self) -> &TranslationError {
        match self {
            TranslationError::SplitMergeFailure { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_cause_unwraps_nested_splits() {
        let err = TranslationError::split(
            SplitSide::Right,
            TranslationError::split(
                SplitSide::Left,
                TranslationError::NetworkFailure {
                    message: "connection reset".to_string(),
                },
            ),
        );

        assert!(matches!(
            err.root_cause(),
            TranslationError::NetworkFailure { .. }
        ));
        assert!(err.to_string().starts_with("Split translation failed on the right branch"));
    }
}
