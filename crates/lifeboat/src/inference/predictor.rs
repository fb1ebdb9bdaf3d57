//! Build → score → decide orchestration.

use std::path::Path;

use ndarray::ArrayView2;

use super::config::PredictorConfig;
use super::decision::PredictionResult;
use crate::error::PredictError;
use crate::features::{FEATURE_COUNT, FeatureName, FeatureRecord, PassengerInputs, ValidationError};
use crate::model::{GbdtModel, OutputTransform};
use crate::persist::{self, LoadError};
use crate::repr::MalformedModelError;

/// Survival predictor over a validated model.
///
/// Immutable after construction and `Send + Sync`, so a single instance can
/// serve concurrent callers.
///
/// # Example
///
/// ```
/// use lifeboat::{PassengerForm, PredictorConfig, SurvivalPredictor};
///
/// let predictor = SurvivalPredictor::bundled(PredictorConfig::default()).unwrap();
/// let form = PassengerForm::new();
/// let result = predictor.predict(&form.inputs()).unwrap();
/// assert!(result.probability().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct SurvivalPredictor {
    model: GbdtModel,
    /// Record slot feeding each model feature index.
    columns: [FeatureName; FEATURE_COUNT],
    transform: OutputTransform,
    config: PredictorConfig,
}

impl SurvivalPredictor {
    /// Create a predictor, resolving the model's feature names once.
    ///
    /// # Errors
    ///
    /// The model must name each of the eleven record features exactly once,
    /// in any order. Otherwise returns [`LoadError::UnknownFeature`],
    /// [`LoadError::DuplicateFeature`] or [`LoadError::MissingFeature`].
    pub fn new(model: GbdtModel, config: PredictorConfig) -> Result<Self, LoadError> {
        let columns = resolve_columns(&model.meta().feature_names)?;
        let transform = config
            .output_transform
            .unwrap_or_else(|| model.output_transform());

        Ok(Self {
            model,
            columns,
            transform,
            config,
        })
    }

    /// Predictor with the default configuration.
    pub fn from_model(model: GbdtModel) -> Result<Self, LoadError> {
        Self::new(model, PredictorConfig::default())
    }

    /// Predictor over the demonstration model compiled into the crate.
    pub fn bundled(config: PredictorConfig) -> Result<Self, LoadError> {
        Self::new(persist::bundled_model()?, config)
    }

    /// Load a model artifact from disk; see [`persist::load_path`].
    pub fn load(path: impl AsRef<Path>, config: PredictorConfig) -> Result<Self, LoadError> {
        Self::new(persist::load_path(path)?, config)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn model(&self) -> &GbdtModel {
        &self.model
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// Transform in effect (the override if configured, else the model's).
    pub fn output_transform(&self) -> OutputTransform {
        self.transform
    }

    // =========================================================================
    // Prediction
    // =========================================================================

    /// Raw ensemble score for a record, before transform and threshold.
    pub fn score_record(&self, record: &FeatureRecord) -> Result<f32, MalformedModelError> {
        let mut row = [0.0f32; FEATURE_COUNT];
        for (slot, name) in row.iter_mut().zip(self.columns) {
            *slot = record[name];
        }
        self.model.forest().score(&row)
    }

    /// Predict from raw inputs.
    ///
    /// Invalid inputs are rejected before the ensemble is consulted.
    pub fn predict(&self, inputs: &PassengerInputs) -> Result<PredictionResult, PredictError> {
        let record = FeatureRecord::build(inputs).inspect_err(|error| {
            tracing::warn!(%error, "rejected passenger input");
        })?;
        self.predict_record(&record)
    }

    /// Predict from an already validated record.
    pub fn predict_record(&self, record: &FeatureRecord) -> Result<PredictionResult, PredictError> {
        let raw = self.score_record(record)?;
        let result = self.transform.decide(raw, self.config.threshold)?;
        tracing::trace!(
            raw_score = raw,
            probability = ?result.probability(),
            outcome = %result.outcome(),
            "prediction"
        );
        Ok(result)
    }

    /// Predict every record, in order.
    ///
    /// Runs on the rayon pool when the configured parallelism allows it; the
    /// output is identical either way.
    pub fn predict_batch(
        &self,
        records: &[FeatureRecord],
    ) -> Result<Vec<PredictionResult>, PredictError> {
        self.config
            .parallelism
            .maybe_par_map(records, |record| self.predict_record(record))
            .into_iter()
            .collect()
    }

    /// Predict every row of a design matrix in record column order
    /// (as produced by [`FeatureRecord::stack`]).
    ///
    /// Each row is validated as a record first.
    pub fn predict_matrix(
        &self,
        matrix: ArrayView2<'_, f32>,
    ) -> Result<Vec<PredictionResult>, PredictError> {
        if matrix.ncols() != FEATURE_COUNT {
            return Err(ValidationError::WrongWidth {
                expected: FEATURE_COUNT,
                got: matrix.ncols(),
            }
            .into());
        }

        let records = matrix
            .rows()
            .into_iter()
            .map(|row| {
                let mut values = [0.0f32; FEATURE_COUNT];
                for (slot, &value) in values.iter_mut().zip(row.iter()) {
                    *slot = value;
                }
                FeatureRecord::from_values(values)
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.predict_batch(&records)
    }
}

/// Map each model feature index to the record slot with the same name.
fn resolve_columns(names: &[String]) -> Result<[FeatureName; FEATURE_COUNT], LoadError> {
    let mut seen = [false; FEATURE_COUNT];
    let mut columns = FeatureName::ALL;

    for (i, raw) in names.iter().enumerate() {
        let name: FeatureName = raw
            .parse()
            .map_err(|_| LoadError::UnknownFeature(raw.clone()))?;
        if std::mem::replace(&mut seen[name.index()], true) {
            return Err(LoadError::DuplicateFeature(name));
        }
        // Unique known names bound `i` below FEATURE_COUNT.
        columns[i] = name;
    }

    if let Some(missing) = FeatureName::ALL.into_iter().find(|n| !seen[n.index()]) {
        return Err(LoadError::MissingFeature(missing));
    }
    Ok(columns)
}
