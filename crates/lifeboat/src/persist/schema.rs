//! Schema types for the JSON model artifact.
//!
//! These types provide a stable serialization format independent of runtime
//! types, so the artifact can evolve without touching traversal code and
//! every load goes through validation in [`super::convert`].
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "model": {
//!     "meta": { "feature_names": ["Age", "SibSp", ...] },
//!     "forest": {
//!       "base_score": -0.4,
//!       "comparator": "less_or_equal",
//!       "trees": [{ "num_nodes": 3, "split_indices": [6, 0, 0], ... }]
//!     },
//!     "output_transform": "sigmoid"
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Versioned top-level envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactSchema {
    /// Schema version; only [`super::FORMAT_VERSION`] is understood.
    pub format_version: u32,
    pub model: GbdtModelSchema,
}

/// Model metadata schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetaSchema {
    /// Feature names; index `i` is split feature index `i`.
    pub feature_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Threshold comparison convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparatorSchema {
    #[default]
    LessOrEqual,
    Less,
}

/// Output transform schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputTransformSchema {
    /// No transformation (the model outputs the class score).
    #[default]
    Identity,
    /// Sigmoid for logit margins.
    Sigmoid,
}

/// Tree schema (SoA layout, one entry per node in every array).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeSchema {
    /// Number of nodes (internal + leaves).
    pub num_nodes: u32,
    /// Split feature index (ignored for leaves).
    pub split_indices: Vec<u32>,
    /// Split threshold (ignored for leaves).
    pub thresholds: Vec<f64>,
    /// Left child index (ignored for leaves).
    pub children_left: Vec<u32>,
    /// Right child index (ignored for leaves).
    pub children_right: Vec<u32>,
    /// Default direction for missing values (true = left).
    pub default_left: Vec<bool>,
    /// Whether each node is a leaf.
    pub is_leaf: Vec<bool>,
    /// Leaf contribution (ignored for internal nodes).
    pub leaf_values: Vec<f64>,
}

/// Forest schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestSchema {
    /// Trees in summation order.
    pub trees: Vec<TreeSchema>,
    /// Bias added to every score.
    pub base_score: f64,
    #[serde(default)]
    pub comparator: ComparatorSchema,
}

/// Full GBDT model schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GbdtModelSchema {
    pub meta: ModelMetaSchema,
    pub forest: ForestSchema,
    #[serde(default)]
    pub output_transform: OutputTransformSchema,
}
