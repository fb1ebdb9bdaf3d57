//! Payload structures for the binary artifact.
//!
//! These structs are specifically designed for serialization with Postcard.
//! They mirror the runtime types but store `f32` directly, and carry no
//! optional-skipping attributes since Postcard is not self-describing.

use serde::{Deserialize, Serialize};

use super::schema::{ComparatorSchema, OutputTransformSchema};

/// Version-tagged payload enum for forward compatibility.
///
/// New format versions add new variants rather than modifying existing ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Payload {
    /// Version 1 payload format.
    V1(PayloadV1),
}

/// Version 1 payload structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadV1 {
    pub metadata: ModelMetadata,
    pub forest: ForestPayload,
    pub output_transform: OutputTransformSchema,
}

/// Model metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub feature_names: Vec<String>,
    pub description: Option<String>,
}

/// Forest of decision trees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestPayload {
    pub base_score: f32,
    pub comparator: ComparatorSchema,
    pub trees: Vec<TreePayload>,
}

/// Single decision tree payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreePayload {
    /// Number of nodes.
    pub num_nodes: u32,
    /// Split feature indices (one per node).
    pub split_features: Vec<u32>,
    /// Split thresholds (one per node, 0.0 for leaves).
    pub thresholds: Vec<f32>,
    /// Left child indices (one per node, 0 for leaves).
    pub left_children: Vec<u32>,
    /// Right child indices (one per node, 0 for leaves).
    pub right_children: Vec<u32>,
    /// Default direction for missing values (one per node).
    pub default_left: Vec<bool>,
    /// Whether each node is a leaf.
    pub is_leaf: Vec<bool>,
    /// Leaf values (one per node, 0.0 for internal nodes).
    pub leaf_values: Vec<f32>,
}
