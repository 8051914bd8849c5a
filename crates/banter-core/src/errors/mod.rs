//! Error types shared across the banter crates.

use thiserror::Error;

/// Unified error type for storage, matching, and engine operations.
#[derive(Debug, Error)]
pub enum BanterError {
    /// No statement with known responses exists, so no answer can be
    /// grounded. Train the bot to populate its storage.
    #[error("the dataset contains no statements with known responses; train the bot to populate its storage")]
    EmptyDataset,

    /// A serialized response link did not have the expected shape.
    #[error("invalid response link: {reason}")]
    InvalidLink { reason: String },

    /// A storage backend failed.
    #[error("storage error: {message}")]
    Storage { message: String },

    /// Configuration could not be read or parsed.
    #[error("configuration error: {reason}")]
    Config { reason: String },

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used throughout the banter crates.
pub type BanterResult<T> = Result<T, BanterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = BanterError::InvalidLink {
            reason: "text must be a string".to_string(),
        };
        assert!(err.to_string().contains("text must be a string"));

        let err = BanterError::Storage {
            message: "disk full".to_string(),
        };
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn empty_dataset_suggests_training() {
        assert!(BanterError::EmptyDataset.to_string().contains("train"));
    }
}
