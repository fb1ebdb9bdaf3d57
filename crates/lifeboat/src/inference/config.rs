//! Predictor configuration with builder pattern.
//!
//! # Example
//!
//! ```
//! use lifeboat::inference::PredictorConfig;
//! use lifeboat::{OutputTransform, Parallelism};
//!
//! // All defaults
//! let config = PredictorConfig::builder().build().unwrap();
//! assert_eq!(config.threshold, 0.5);
//!
//! let config = PredictorConfig::builder()
//!     .threshold(0.6)
//!     .output_transform(OutputTransform::Sigmoid)
//!     .parallelism(Parallelism::Parallel)
//!     .build()
//!     .unwrap();
//! ```

use bon::Builder;

use super::decision::DEFAULT_THRESHOLD;
use crate::model::OutputTransform;
use crate::utils::Parallelism;

// =============================================================================
// ConfigError
// =============================================================================

/// Errors that can occur during configuration validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Threshold must be finite and strictly between 0 and 1.
    InvalidThreshold(f32),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidThreshold(v) => {
                write!(f, "threshold must be in (0, 1), got {}", v)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// PredictorConfig
// =============================================================================

/// Configuration for a [`SurvivalPredictor`](super::SurvivalPredictor).
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct PredictorConfig {
    /// Decision threshold applied to the transformed score. Default: 0.5.
    ///
    /// A score equal to the threshold counts as survived.
    #[builder(default = DEFAULT_THRESHOLD)]
    pub threshold: f32,

    /// Override for the transform stored in the model. `None` keeps the
    /// model's own transform.
    pub output_transform: Option<OutputTransform>,

    /// Execution mode for batch predictions. Default: `Sequential`.
    #[builder(default)]
    pub parallelism: Parallelism,
}

impl<S: predictor_config_builder::IsComplete> PredictorConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidThreshold`] if the threshold is not
    /// finite or not strictly between 0 and 1.
    pub fn build(self) -> Result<PredictorConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl PredictorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        // NaN fails both comparisons.
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            output_transform: None,
            parallelism: Parallelism::default(),
        }
    }
}
