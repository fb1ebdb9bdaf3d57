//! Errors for reading and writing model artifacts.

use std::path::PathBuf;

use crate::features::FeatureName;
use crate::repr::MalformedModelError;

/// A model artifact could not be turned into a usable model.
///
/// Fatal at startup: without a model no prediction can be served.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot open model artifact {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error while reading model: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON model: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid binary model: {0}")]
    Binary(#[from] postcard::Error),
    #[error("not a binary model artifact (bad magic bytes)")]
    BadMagic,
    #[error("binary model has {0} trailing bytes after the payload")]
    TrailingBytes(usize),
    #[error("unsupported artifact format version {0}")]
    UnsupportedVersion(u32),
    #[error("malformed model: {0}")]
    Malformed(#[from] MalformedModelError),
    #[error("model uses unknown feature {0:?}")]
    UnknownFeature(String),
    #[error("model lists feature {0} more than once")]
    DuplicateFeature(FeatureName),
    #[error("model does not use required feature {0}")]
    MissingFeature(FeatureName),
}

/// A model could not be written out.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("I/O error while writing model: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("binary serialization failed: {0}")]
    Binary(#[from] postcard::Error),
}
