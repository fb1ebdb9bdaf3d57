//! Conversion between runtime types and persisted types.
//!
//! Schema → runtime conversions are `TryFrom` and validate structure;
//! runtime → schema conversions are infallible `From`. JSON thresholds are
//! `f64` and narrow to `f32` in the direction set by the forest comparator.

use crate::model::{GbdtModel, ModelMeta, OutputTransform};
use crate::repr::{Forest, MalformedModelError, SplitComparator, Tree, TreeValidationError};

use super::payload::{ForestPayload, ModelMetadata, PayloadV1, TreePayload};
use super::schema::{
    ComparatorSchema, ForestSchema, GbdtModelSchema, ModelMetaSchema, OutputTransformSchema,
    TreeSchema,
};

// =============================================================================
// Enum conversions
// =============================================================================

impl From<ComparatorSchema> for SplitComparator {
    fn from(c: ComparatorSchema) -> Self {
        match c {
            ComparatorSchema::LessOrEqual => SplitComparator::LessOrEqual,
            ComparatorSchema::Less => SplitComparator::Less,
        }
    }
}

impl From<SplitComparator> for ComparatorSchema {
    fn from(c: SplitComparator) -> Self {
        match c {
            SplitComparator::LessOrEqual => ComparatorSchema::LessOrEqual,
            SplitComparator::Less => ComparatorSchema::Less,
        }
    }
}

impl From<OutputTransformSchema> for OutputTransform {
    fn from(t: OutputTransformSchema) -> Self {
        match t {
            OutputTransformSchema::Identity => OutputTransform::Identity,
            OutputTransformSchema::Sigmoid => OutputTransform::Sigmoid,
        }
    }
}

impl From<OutputTransform> for OutputTransformSchema {
    fn from(t: OutputTransform) -> Self {
        match t {
            OutputTransform::Identity => OutputTransformSchema::Identity,
            OutputTransform::Sigmoid => OutputTransformSchema::Sigmoid,
        }
    }
}

fn check_num_nodes(num_nodes: u32, is_leaf: &[bool]) -> Result<(), TreeValidationError> {
    if is_leaf.len() != num_nodes as usize {
        return Err(TreeValidationError::LengthMismatch {
            field: "is_leaf",
            expected: num_nodes as usize,
            got: is_leaf.len(),
        });
    }
    Ok(())
}

// =============================================================================
// JSON schema <-> runtime
// =============================================================================

fn next_f32_up(x: f32) -> f32 {
    if x.is_nan() || x == f32::INFINITY {
        x
    } else if x == f32::NEG_INFINITY {
        f32::MIN
    } else if x == 0.0 {
        f32::from_bits(1)
    } else if x > 0.0 {
        f32::from_bits(x.to_bits() + 1)
    } else {
        f32::from_bits(x.to_bits() - 1)
    }
}

fn next_f32_down(x: f32) -> f32 {
    -next_f32_up(-x)
}

/// Narrow an `f64` threshold to the `f32` that splits every `f32` value
/// the same way under `comparator`.
///
/// `LessOrEqual` takes the largest `f32 <= t`, `Less` the smallest `f32 >= t`.
/// Thresholds that are already `f32` values pass through unchanged.
fn narrow_threshold(t: f64, comparator: SplitComparator) -> f32 {
    let nearest = t as f32;
    match comparator {
        SplitComparator::LessOrEqual if f64::from(nearest) > t => next_f32_down(nearest),
        SplitComparator::Less if f64::from(nearest) < t => next_f32_up(nearest),
        _ => nearest,
    }
}

fn tree_from_schema(
    schema: TreeSchema,
    comparator: SplitComparator,
) -> Result<Tree, TreeValidationError> {
    check_num_nodes(schema.num_nodes, &schema.is_leaf)?;
    Tree::new(
        schema.split_indices,
        schema
            .thresholds
            .into_iter()
            .map(|t| narrow_threshold(t, comparator))
            .collect(),
        schema.children_left,
        schema.children_right,
        schema.default_left,
        schema.is_leaf,
        schema.leaf_values.into_iter().map(|v| v as f32).collect(),
    )
}

impl From<&Tree> for TreeSchema {
    fn from(tree: &Tree) -> Self {
        let parts = tree.parts();
        TreeSchema {
            num_nodes: tree.n_nodes() as u32,
            split_indices: parts.split_indices.to_vec(),
            thresholds: parts.split_thresholds.iter().map(|&t| t as f64).collect(),
            children_left: parts.left_children.to_vec(),
            children_right: parts.right_children.to_vec(),
            default_left: parts.default_left.to_vec(),
            is_leaf: parts.is_leaf.to_vec(),
            leaf_values: parts.leaf_values.iter().map(|&v| v as f64).collect(),
        }
    }
}

impl TryFrom<GbdtModelSchema> for GbdtModel {
    type Error = MalformedModelError;

    fn try_from(schema: GbdtModelSchema) -> Result<Self, Self::Error> {
        let comparator = SplitComparator::from(schema.forest.comparator);
        let mut forest = Forest::new()
            .with_base_score(schema.forest.base_score as f32)
            .with_comparator(comparator);

        for (tree_idx, tree) in schema.forest.trees.into_iter().enumerate() {
            let tree = tree_from_schema(tree, comparator)
                .map_err(|error| MalformedModelError::InvalidTree { tree_idx, error })?;
            forest.push_tree(tree);
        }

        let meta = ModelMeta {
            feature_names: schema.meta.feature_names,
            description: schema.meta.description,
        };

        GbdtModel::new(meta, forest, schema.output_transform.into())
    }
}

impl From<&GbdtModel> for GbdtModelSchema {
    fn from(model: &GbdtModel) -> Self {
        let forest = model.forest();
        GbdtModelSchema {
            meta: ModelMetaSchema {
                feature_names: model.meta().feature_names.clone(),
                description: model.meta().description.clone(),
            },
            forest: ForestSchema {
                trees: forest.trees().map(TreeSchema::from).collect(),
                base_score: forest.base_score() as f64,
                comparator: forest.comparator().into(),
            },
            output_transform: model.output_transform().into(),
        }
    }
}

// =============================================================================
// Binary payload <-> runtime
// =============================================================================

impl TryFrom<TreePayload> for Tree {
    type Error = TreeValidationError;

    fn try_from(payload: TreePayload) -> Result<Self, Self::Error> {
        check_num_nodes(payload.num_nodes, &payload.is_leaf)?;
        Tree::new(
            payload.split_features,
            payload.thresholds,
            payload.left_children,
            payload.right_children,
            payload.default_left,
            payload.is_leaf,
            payload.leaf_values,
        )
    }
}

impl From<&Tree> for TreePayload {
    fn from(tree: &Tree) -> Self {
        let parts = tree.parts();
        TreePayload {
            num_nodes: tree.n_nodes() as u32,
            split_features: parts.split_indices.to_vec(),
            thresholds: parts.split_thresholds.to_vec(),
            left_children: parts.left_children.to_vec(),
            right_children: parts.right_children.to_vec(),
            default_left: parts.default_left.to_vec(),
            is_leaf: parts.is_leaf.to_vec(),
            leaf_values: parts.leaf_values.to_vec(),
        }
    }
}

impl TryFrom<PayloadV1> for GbdtModel {
    type Error = MalformedModelError;

    fn try_from(payload: PayloadV1) -> Result<Self, Self::Error> {
        let mut forest = Forest::new()
            .with_base_score(payload.forest.base_score)
            .with_comparator(payload.forest.comparator.into());

        for (tree_idx, tree) in payload.forest.trees.into_iter().enumerate() {
            let tree = Tree::try_from(tree)
                .map_err(|error| MalformedModelError::InvalidTree { tree_idx, error })?;
            forest.push_tree(tree);
        }

        let meta = ModelMeta {
            feature_names: payload.metadata.feature_names,
            description: payload.metadata.description,
        };

        GbdtModel::new(meta, forest, payload.output_transform.into())
    }
}

impl From<&GbdtModel> for PayloadV1 {
    fn from(model: &GbdtModel) -> Self {
        let forest = model.forest();
        PayloadV1 {
            metadata: ModelMetadata {
                feature_names: model.meta().feature_names.clone(),
                description: model.meta().description.clone(),
            },
            forest: ForestPayload {
                base_score: forest.base_score(),
                comparator: forest.comparator().into(),
                trees: forest.trees().map(TreePayload::from).collect(),
            },
            output_transform: model.output_transform().into(),
        }
    }
}
