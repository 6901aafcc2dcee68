//! Error types for the grading pipeline.

use rust_decimal::Decimal;

/// Grading errors.
///
/// Every variant is a local failure with no automatic recovery. Callers own
/// user-facing messaging and any decision to re-run the evaluation call.
#[derive(Debug, thiserror::Error)]
pub enum GradingError {
    /// Evaluation output is not a JSON object after fence stripping.
    #[error("malformed grading response: {message}")]
    MalformedResponse { message: String },

    /// Evaluation output parsed but a mandated field is missing.
    #[error("missing required field in grading response: {field}")]
    IncompleteResponse { field: &'static str },

    /// A score references a criterion that is not part of the rubric.
    #[error("unknown criterion: {name}")]
    UnknownCriterion { name: String },

    /// A score falls outside `[0, max]` for its criterion.
    #[error("score for {name} must be between 0 and {max}, got {value}")]
    ScoreOutOfRange {
        name: String,
        value: Decimal,
        max: u32,
    },

    /// Conversation has no turns or has not reached the completed state.
    #[error("conversation is not gradable: {reason}")]
    NotGradable { reason: String },

    /// Rubric definition violates its invariants.
    #[error("invalid rubric: {message}")]
    InvalidRubric { message: String },

    /// Caller-facing override request checks failed.
    #[error("invalid override request: {message}")]
    InvalidOverride { message: String },

    /// The external evaluation call failed.
    #[error("evaluation call failed: {message}")]
    Provider { message: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl GradingError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Bad input / config
            Self::Config { .. } => 1,
            Self::InvalidRubric { .. } => 1,
            Self::InvalidOverride { .. } => 1,
            Self::NotGradable { .. } => 1,

            // Rejected score updates
            Self::UnknownCriterion { .. } => 3,
            Self::ScoreOutOfRange { .. } => 3,

            // Evaluator output problems
            Self::MalformedResponse { .. } => 4,
            Self::IncompleteResponse { .. } => 4,

            // Network/transient
            Self::Provider { .. } => 5,
        }
    }

    /// Whether re-running the evaluation call could plausibly succeed.
    ///
    /// The core never retries; this only informs the caller's policy.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::MalformedResponse { .. } | Self::Provider { .. }
        )
    }
}

impl From<anyhow::Error> for GradingError {
    fn from(err: anyhow::Error) -> Self {
        Self::Provider {
            message: format!("{:#}", err),
        }
    }
}

/// Result type for grading operations.
pub type GradingResult<T> = Result<T, GradingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(GradingError::MalformedResponse {
            message: "eof".into()
        }
        .is_retryable());
        assert!(GradingError::Provider {
            message: "timeout".into()
        }
        .is_retryable());
        assert!(!GradingError::IncompleteResponse { field: "confidence" }.is_retryable());
        assert!(!GradingError::UnknownCriterion { name: "x".into() }.is_retryable());
    }

    #[test]
    fn test_score_out_of_range_message() {
        let err = GradingError::ScoreOutOfRange {
            name: "clarity".into(),
            value: Decimal::new(30, 0),
            max: 25,
        };
        assert_eq!(
            err.to_string(),
            "score for clarity must be between 0 and 25, got 30"
        );
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_anyhow_maps_to_provider() {
        let err: GradingError = anyhow::anyhow!("connection refused").into();
        assert!(matches!(err, GradingError::Provider { .. }));
        assert!(err.to_string().contains("connection refused"));
    }
}
