//! Canonical forest representation (ordered collection of trees plus bias).

use super::node::SplitComparator;
use super::tree::{Tree, TreeValidationError};

/// Structural problems found in an ensemble, at load time or while scoring.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MalformedModelError {
    /// Forest has no trees.
    #[error("forest has no trees")]
    NoTrees,
    /// A tree failed validation or traversal.
    #[error("tree {tree_idx}: {error}")]
    InvalidTree {
        tree_idx: usize,
        #[source]
        error: TreeValidationError,
    },
    /// Base score is NaN or infinite.
    #[error("base score {0} is not finite")]
    NonFiniteBaseScore(f32),
    /// Summation produced NaN.
    #[error("ensemble produced a NaN score")]
    NonFiniteScore,
}

/// Forest of decision trees for a single output.
///
/// The raw score for a row is `base_score + Σ tree leaf`, summed in tree
/// order so results are bit-for-bit reproducible.
#[derive(Debug, Clone, PartialEq)]
pub struct Forest {
    trees: Vec<Tree>,
    base_score: f32,
    comparator: SplitComparator,
}

impl Default for Forest {
    fn default() -> Self {
        Self::new()
    }
}

impl Forest {
    /// Create an empty forest with zero bias and the default comparator.
    pub fn new() -> Self {
        Self {
            trees: Vec::new(),
            base_score: 0.0,
            comparator: SplitComparator::default(),
        }
    }

    /// Set the base score (bias / intercept).
    pub fn with_base_score(mut self, base_score: f32) -> Self {
        self.base_score = base_score;
        self
    }

    /// Set the split comparator used by every tree.
    pub fn with_comparator(mut self, comparator: SplitComparator) -> Self {
        self.comparator = comparator;
        self
    }

    /// Add a tree to the forest.
    pub fn push_tree(&mut self, tree: Tree) {
        self.trees.push(tree);
    }

    /// Number of trees.
    #[inline]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    #[inline]
    pub fn base_score(&self) -> f32 {
        self.base_score
    }

    #[inline]
    pub fn comparator(&self) -> SplitComparator {
        self.comparator
    }

    /// Get a reference to a specific tree.
    #[inline]
    pub fn tree(&self, idx: usize) -> &Tree {
        &self.trees[idx]
    }

    /// Iterate over trees.
    pub fn trees(&self) -> impl Iterator<Item = &Tree> {
        self.trees.iter()
    }

    /// Validate every tree against `n_features` and the base score.
    pub fn validate(&self, n_features: usize) -> Result<(), MalformedModelError> {
        if self.trees.is_empty() {
            return Err(MalformedModelError::NoTrees);
        }
        if !self.base_score.is_finite() {
            return Err(MalformedModelError::NonFiniteBaseScore(self.base_score));
        }

        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(n_features)
                .map_err(|e| MalformedModelError::InvalidTree { tree_idx: i, error: e })?;
        }

        Ok(())
    }

    /// Raw score for a single row of features (in the model's feature order).
    pub fn score(&self, row: &[f32]) -> Result<f32, MalformedModelError> {
        let mut total = self.base_score;

        for (i, tree) in self.trees.iter().enumerate() {
            total += tree
                .predict_row(row, self.comparator)
                .map_err(|e| MalformedModelError::InvalidTree { tree_idx: i, error: e })?;
        }

        if total.is_nan() {
            return Err(MalformedModelError::NonFiniteScore);
        }
        Ok(total)
    }
}
