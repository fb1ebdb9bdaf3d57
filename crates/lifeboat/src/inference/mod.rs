//! Survival inference.
//!
//! [`SurvivalPredictor`] ties the pieces together: raw inputs are validated
//! into a [`FeatureRecord`](crate::FeatureRecord), scored by the forest and
//! mapped to a [`PredictionResult`] by the output transform and threshold.
//! [`global`] holds an optional process-wide instance.

mod config;
mod decision;
pub mod global;
mod predictor;

pub use config::{ConfigError, PredictorConfig};
pub use decision::{DEFAULT_THRESHOLD, PredictionResult, Survival};
pub use predictor::SurvivalPredictor;
