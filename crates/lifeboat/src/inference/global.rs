//! Process-wide predictor.
//!
//! The first successful initialization wins. Later calls return the
//! predictor already installed without touching their arguments, and a
//! failed initialization leaves the slot empty so it can be retried.

use std::path::Path;

use once_cell::sync::OnceCell;

use super::config::PredictorConfig;
use super::predictor::SurvivalPredictor;
use crate::persist::LoadError;

static PREDICTOR: OnceCell<SurvivalPredictor> = OnceCell::new();

/// Install the predictor produced by `init`, unless one is already installed.
pub fn init_with<F>(init: F) -> Result<&'static SurvivalPredictor, LoadError>
where
    F: FnOnce() -> Result<SurvivalPredictor, LoadError>,
{
    PREDICTOR.get_or_try_init(|| {
        let predictor = init()?;
        tracing::debug!(
            n_trees = predictor.model().forest().n_trees(),
            threshold = predictor.config().threshold,
            "installed global predictor"
        );
        Ok(predictor)
    })
}

/// Install a predictor loaded from a model artifact.
pub fn init_from_path(
    path: impl AsRef<Path>,
    config: PredictorConfig,
) -> Result<&'static SurvivalPredictor, LoadError> {
    init_with(|| SurvivalPredictor::load(path, config))
}

/// Install a predictor over the bundled demonstration model.
pub fn init_bundled(config: PredictorConfig) -> Result<&'static SurvivalPredictor, LoadError> {
    init_with(|| SurvivalPredictor::bundled(config))
}

/// The installed predictor, if any.
pub fn get() -> Option<&'static SurvivalPredictor> {
    PREDICTOR.get()
}
