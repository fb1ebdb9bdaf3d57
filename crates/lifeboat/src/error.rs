//! Top-level error type for predictions.

use crate::features::ValidationError;
use crate::repr::MalformedModelError;

/// Why a prediction could not be produced.
///
/// Validation errors are the caller's to fix; model errors mean the loaded
/// ensemble is unusable and no further predictions should be attempted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
    #[error("malformed model: {0}")]
    Model(#[from] MalformedModelError),
}

impl PredictError {
    /// Whether correcting the input could make the prediction succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PredictError::Validation(_))
    }
}
