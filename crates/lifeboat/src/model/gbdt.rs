//! Validated GBDT model: metadata, forest and output transform.

use crate::repr::{Forest, MalformedModelError};

use super::meta::ModelMeta;
use super::transform::OutputTransform;

/// A tree ensemble ready for inference.
///
/// Construction validates the forest against the metadata, so every split
/// of a `GbdtModel` tests a feature the metadata names.
#[derive(Debug, Clone, PartialEq)]
pub struct GbdtModel {
    meta: ModelMeta,
    forest: Forest,
    output_transform: OutputTransform,
}

impl GbdtModel {
    /// Create a model, validating the forest against `meta`.
    pub fn new(
        meta: ModelMeta,
        forest: Forest,
        output_transform: OutputTransform,
    ) -> Result<Self, MalformedModelError> {
        forest.validate(meta.n_features())?;
        Ok(Self {
            meta,
            forest,
            output_transform,
        })
    }

    #[inline]
    pub fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    #[inline]
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    #[inline]
    pub fn output_transform(&self) -> OutputTransform {
        self.output_transform
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.meta.n_features()
    }
}
