//! Canonical tree representation (SoA) and structural validation.
//!
//! This module provides:
//! - [`Tree`]: Immutable SoA tree storage for traversal
//! - [`TreeBuilder`]: Node-by-node construction in index order
//! - [`TreeValidationError`]: Structural validation errors

use super::node::{SplitComparator, SplitCondition};
use super::NodeId;

// ============================================================================
// TreeValidationError
// ============================================================================

/// Structural validation errors for [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeValidationError {
    /// Tree has no nodes.
    #[error("tree has no nodes")]
    EmptyTree,
    /// A per-node array does not have one entry per node.
    #[error("{field} has {got} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        got: usize,
    },
    /// A child pointer references an out-of-bounds node.
    #[error("node {node}: {side} child {child} is out of bounds ({n_nodes} nodes)")]
    ChildOutOfBounds {
        node: NodeId,
        side: &'static str,
        child: NodeId,
        n_nodes: usize,
    },
    /// A node references itself as a child.
    #[error("node {node} references itself as a child")]
    SelfLoop { node: NodeId },
    /// A node was reached by more than one path.
    #[error("node {node} is reachable by more than one path")]
    DuplicateVisit { node: NodeId },
    /// A cycle was detected during traversal.
    #[error("cycle detected at node {node}")]
    CycleDetected { node: NodeId },
    /// A node exists in storage but is unreachable from the root.
    #[error("node {node} is unreachable from the root")]
    UnreachableNode { node: NodeId },
    /// A split tests a feature the model does not have.
    #[error("node {node} splits on feature {feature}, but only {n_features} features exist")]
    FeatureIndexOutOfRange {
        node: NodeId,
        feature: u32,
        n_features: usize,
    },
    /// A split threshold is NaN.
    #[error("node {node} has a NaN threshold")]
    NanThreshold { node: NodeId },
    /// A leaf contribution is NaN or infinite.
    #[error("leaf {node} has non-finite value {value}")]
    NonFiniteLeaf { node: NodeId, value: String },
}

// ============================================================================
// Tree
// ============================================================================

/// Structure-of-Arrays tree storage.
///
/// Stores tree nodes in flat arrays. Child indices are local to this tree
/// (0 = root). Split fields of leaves and leaf values of splits are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    split_indices: Box<[u32]>,
    split_thresholds: Box<[f32]>,
    left_children: Box<[u32]>,
    right_children: Box<[u32]>,
    default_left: Box<[bool]>,
    is_leaf: Box<[bool]>,
    leaf_values: Box<[f32]>,
}

impl Tree {
    /// Create a new tree from parallel arrays.
    ///
    /// All arrays must have the same length (number of nodes). Only lengths
    /// are checked here; call [`Tree::validate`] for the structural checks.
    pub fn new(
        split_indices: Vec<u32>,
        split_thresholds: Vec<f32>,
        left_children: Vec<u32>,
        right_children: Vec<u32>,
        default_left: Vec<bool>,
        is_leaf: Vec<bool>,
        leaf_values: Vec<f32>,
    ) -> Result<Self, TreeValidationError> {
        let n_nodes = is_leaf.len();
        let lengths = [
            ("split_indices", split_indices.len()),
            ("thresholds", split_thresholds.len()),
            ("children_left", left_children.len()),
            ("children_right", right_children.len()),
            ("default_left", default_left.len()),
            ("leaf_values", leaf_values.len()),
        ];
        for (field, got) in lengths {
            if got != n_nodes {
                return Err(TreeValidationError::LengthMismatch {
                    field,
                    expected: n_nodes,
                    got,
                });
            }
        }

        Ok(Self {
            split_indices: split_indices.into_boxed_slice(),
            split_thresholds: split_thresholds.into_boxed_slice(),
            left_children: left_children.into_boxed_slice(),
            right_children: right_children.into_boxed_slice(),
            default_left: default_left.into_boxed_slice(),
            is_leaf: is_leaf.into_boxed_slice(),
            leaf_values: leaf_values.into_boxed_slice(),
        })
    }

    /// A tree consisting of a single leaf.
    pub fn constant(value: f32) -> Self {
        let mut builder = TreeBuilder::new();
        builder.add_leaf(value);
        builder.build()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of nodes in the tree.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.is_leaf.len()
    }

    /// Number of leaf nodes.
    pub fn n_leaves(&self) -> usize {
        self.is_leaf.iter().filter(|&&leaf| leaf).count()
    }

    #[inline]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.is_leaf[node as usize]
    }

    #[inline]
    pub fn split_index(&self, node: NodeId) -> u32 {
        self.split_indices[node as usize]
    }

    #[inline]
    pub fn split_threshold(&self, node: NodeId) -> f32 {
        self.split_thresholds[node as usize]
    }

    #[inline]
    pub fn left_child(&self, node: NodeId) -> NodeId {
        self.left_children[node as usize]
    }

    #[inline]
    pub fn right_child(&self, node: NodeId) -> NodeId {
        self.right_children[node as usize]
    }

    #[inline]
    pub fn default_left(&self, node: NodeId) -> bool {
        self.default_left[node as usize]
    }

    #[inline]
    pub fn leaf_value(&self, node: NodeId) -> f32 {
        self.leaf_values[node as usize]
    }

    #[inline]
    pub fn split_condition(&self, node: NodeId) -> SplitCondition {
        SplitCondition::new(
            self.split_index(node),
            self.split_threshold(node),
            self.default_left(node),
        )
    }

    /// Raw SoA arrays, in constructor order.
    pub(crate) fn parts(&self) -> TreeParts<'_> {
        TreeParts {
            split_indices: &self.split_indices,
            split_thresholds: &self.split_thresholds,
            left_children: &self.left_children,
            right_children: &self.right_children,
            default_left: &self.default_left,
            is_leaf: &self.is_leaf,
            leaf_values: &self.leaf_values,
        }
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Validate the structural invariants of this tree.
    ///
    /// Checks that the tree is a proper rooted binary tree (every node
    /// reachable from the root exactly once, no cycles, children in bounds),
    /// that every split tests a feature below `n_features`, thresholds are
    /// not NaN and leaf values are finite.
    pub fn validate(&self, n_features: usize) -> Result<(), TreeValidationError> {
        let n_nodes = self.n_nodes();
        if n_nodes == 0 {
            return Err(TreeValidationError::EmptyTree);
        }

        // Iterative DFS with color marking.
        // 0 = unvisited, 1 = visiting, 2 = done
        let mut color = vec![0u8; n_nodes];
        let mut stack: Vec<(NodeId, u8)> = vec![(0, 0)];

        while let Some((node, phase)) = stack.pop() {
            let node_usize = node as usize;

            if phase == 1 {
                color[node_usize] = 2;
                continue;
            }

            match color[node_usize] {
                0 => {}
                1 => return Err(TreeValidationError::CycleDetected { node }),
                _ => return Err(TreeValidationError::DuplicateVisit { node }),
            }
            color[node_usize] = 1;
            stack.push((node, 1));

            if self.is_leaf(node) {
                let value = self.leaf_value(node);
                if !value.is_finite() {
                    return Err(TreeValidationError::NonFiniteLeaf {
                        node,
                        value: value.to_string(),
                    });
                }
                continue;
            }

            let feature = self.split_index(node);
            if feature as usize >= n_features {
                return Err(TreeValidationError::FeatureIndexOutOfRange {
                    node,
                    feature,
                    n_features,
                });
            }
            if self.split_threshold(node).is_nan() {
                return Err(TreeValidationError::NanThreshold { node });
            }

            let left = self.left_child(node);
            let right = self.right_child(node);
            if left == node || right == node {
                return Err(TreeValidationError::SelfLoop { node });
            }
            for (side, child) in [("left", left), ("right", right)] {
                if child as usize >= n_nodes {
                    return Err(TreeValidationError::ChildOutOfBounds {
                        node,
                        side,
                        child,
                        n_nodes,
                    });
                }
            }

            // Visit children
            stack.push((right, 0));
            stack.push((left, 0));
        }

        if let Some(i) = color.iter().position(|&c| c == 0) {
            return Err(TreeValidationError::UnreachableNode { node: i as NodeId });
        }

        Ok(())
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// Traverse the tree to find the leaf for a row of features.
    ///
    /// `row` is indexed by the split feature indices. Missing values (NaN)
    /// follow the node's default direction. Traversal never panics: a
    /// feature beyond the row, a dangling child or a walk longer than the
    /// node count (only possible with a cycle) is reported as an error.
    pub fn traverse_to_leaf(
        &self,
        row: &[f32],
        comparator: SplitComparator,
    ) -> Result<NodeId, TreeValidationError> {
        let n_nodes = self.n_nodes();
        if n_nodes == 0 {
            return Err(TreeValidationError::EmptyTree);
        }

        let mut node: NodeId = 0;
        let mut steps = 0usize;

        while !self.is_leaf(node) {
            if steps >= n_nodes {
                return Err(TreeValidationError::CycleDetected { node });
            }
            steps += 1;

            let condition = self.split_condition(node);
            let fvalue = *row.get(condition.feature_index as usize).ok_or(
                TreeValidationError::FeatureIndexOutOfRange {
                    node,
                    feature: condition.feature_index,
                    n_features: row.len(),
                },
            )?;

            let (side, next) = if condition.go_left(fvalue, comparator) {
                ("left", self.left_child(node))
            } else {
                ("right", self.right_child(node))
            };
            if next as usize >= n_nodes {
                return Err(TreeValidationError::ChildOutOfBounds {
                    node,
                    side,
                    child: next,
                    n_nodes,
                });
            }
            node = next;
        }

        Ok(node)
    }

    /// Leaf contribution of this tree for a row of features.
    #[inline]
    pub fn predict_row(
        &self,
        row: &[f32],
        comparator: SplitComparator,
    ) -> Result<f32, TreeValidationError> {
        let leaf = self.traverse_to_leaf(row, comparator)?;
        Ok(self.leaf_value(leaf))
    }
}

/// Borrowed SoA arrays of a [`Tree`], used by the persist conversions.
pub(crate) struct TreeParts<'a> {
    pub split_indices: &'a [u32],
    pub split_thresholds: &'a [f32],
    pub left_children: &'a [u32],
    pub right_children: &'a [u32],
    pub default_left: &'a [bool],
    pub is_leaf: &'a [bool],
    pub leaf_values: &'a [f32],
}

// ============================================================================
// TreeBuilder
// ============================================================================

/// Builds a [`Tree`] node by node.
///
/// Nodes receive ids in insertion order, so the first node added is the
/// root. Split nodes may reference children that are added later.
///
/// ```
/// use lifeboat::TreeBuilder;
///
/// let mut builder = TreeBuilder::new();
/// builder.add_split(0, 0.5, true, 1, 2);
/// builder.add_leaf(-1.0);
/// builder.add_leaf(1.0);
/// let tree = builder.build();
/// assert_eq!(tree.n_nodes(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    split_indices: Vec<u32>,
    split_thresholds: Vec<f32>,
    left_children: Vec<u32>,
    right_children: Vec<u32>,
    default_left: Vec<bool>,
    is_leaf: Vec<bool>,
    leaf_values: Vec<f32>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> NodeId {
        self.is_leaf.len() as NodeId
    }

    /// Append a numeric split node and return its id.
    pub fn add_split(
        &mut self,
        feature_index: u32,
        threshold: f32,
        default_left: bool,
        left: NodeId,
        right: NodeId,
    ) -> NodeId {
        let id = self.next_id();
        self.split_indices.push(feature_index);
        self.split_thresholds.push(threshold);
        self.left_children.push(left);
        self.right_children.push(right);
        self.default_left.push(default_left);
        self.is_leaf.push(false);
        self.leaf_values.push(0.0);
        id
    }

    /// Append a leaf node and return its id.
    pub fn add_leaf(&mut self, value: f32) -> NodeId {
        let id = self.next_id();
        self.split_indices.push(0);
        self.split_thresholds.push(0.0);
        self.left_children.push(0);
        self.right_children.push(0);
        self.default_left.push(false);
        self.is_leaf.push(true);
        self.leaf_values.push(value);
        id
    }

    pub fn build(self) -> Tree {
        Tree {
            split_indices: self.split_indices.into_boxed_slice(),
            split_thresholds: self.split_thresholds.into_boxed_slice(),
            left_children: self.left_children.into_boxed_slice(),
            right_children: self.right_children.into_boxed_slice(),
            default_left: self.default_left.into_boxed_slice(),
            is_leaf: self.is_leaf.into_boxed_slice(),
            leaf_values: self.leaf_values.into_boxed_slice(),
        }
    }
}
