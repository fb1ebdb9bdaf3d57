//! lifeboat: boosted-tree survival inference for passenger manifests.
//!
//! Encodes a handful of passenger attributes into the fixed eleven-feature
//! vector a pre-trained tree ensemble expects, then walks the ensemble to
//! predict survival.
//!
//! # Key Types
//!
//! - [`PassengerInputs`] / [`PassengerForm`] - Raw form values and the form state helpers
//! - [`FeatureRecord`] - Validated, derived feature vector
//! - [`Forest`] / [`Tree`] - Tree ensemble representation and traversal
//! - [`SurvivalPredictor`] - Build → score → decide orchestration
//! - [`PredictionResult`] - Label, raw score and optional probability
//!
//! # Loading Models
//!
//! Use [`persist::load_path`] for JSON or binary artifacts, or
//! [`SurvivalPredictor::bundled`] for the model compiled into the crate.
//! See the [`persist`] module for the artifact layout.

pub mod error;
pub mod features;
pub mod inference;
pub mod model;
pub mod persist;
pub mod repr;
pub mod testing;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use error::PredictError;

pub use features::{
    FeatureName, FeatureRecord, PassengerClass, PassengerForm, PassengerInputs, Port,
    ValidationError,
};

pub use model::{GbdtModel, ModelMeta, OutputTransform};

pub use repr::{Forest, MalformedModelError, SplitComparator, Tree, TreeBuilder};

pub use inference::{ConfigError, PredictionResult, PredictorConfig, Survival, SurvivalPredictor};

pub use persist::LoadError;

pub use utils::Parallelism;
