//! Model metadata.

/// Introspection data about a model's inputs.
///
/// `feature_names[i]` names the column that split feature index `i` refers
/// to. Names follow the training data's column names (`Age`, `Sex_male`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelMeta {
    /// Feature names, in model feature order.
    pub feature_names: Vec<String>,
    /// Free-form description (training data, date, exporter).
    pub description: Option<String>,
}

impl ModelMeta {
    pub fn new(feature_names: Vec<String>) -> Self {
        Self {
            feature_names,
            description: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Number of features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }
}
