//! Error types for matching and emission.

use thiserror::Error;
use wellink_model::{MatchMethod, ModelError};

/// Failure while evaluating a single well or unit.
///
/// Strategies log these, count them and move on; they never abort a run.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("composite score {total} exceeds 100 for {permit_number}")]
    ScoreOverflow { permit_number: String, total: u32 },

    #[error("{method} proposed without a score")]
    MissingScore { method: MatchMethod },
}

/// Failure reported by a link sink for one batch.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode link {permit_number} -> {unit_number}: {message}")]
    Encode {
        permit_number: String,
        unit_number: String,
        message: String,
    },

    #[error("sink rejected batch: {0}")]
    Rejected(String),
}

/// Emission stopped because a batch kept failing.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("batch {index} failed after {attempts} attempts: {source}")]
    Batch {
        index: usize,
        attempts: usize,
        #[source]
        source: SinkError,
    },

    #[error("failed to finish sink: {0}")]
    Finish(#[source] SinkError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = EmitError::Batch {
            index: 2,
            attempts: 3,
            source: SinkError::Rejected("locked".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "batch 2 failed after 3 attempts: sink rejected batch: locked"
        );

        let err = LinkError::from(ModelError::ScoreOutOfRange(1.5));
        assert!(err.to_string().contains("1.5"));
    }
}
