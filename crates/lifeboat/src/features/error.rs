use super::name::FeatureName;

/// Raw input that cannot be turned into a [`FeatureRecord`](super::FeatureRecord).
///
/// Always recoverable: the caller should surface it and let the user correct
/// the offending field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A numeric field is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: FeatureName, value: f32 },
    /// A numeric field is outside its declared range.
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: FeatureName,
        value: f64,
        min: f64,
        max: f64,
    },
    /// An integer field holds a fractional value.
    #[error("{field} must be a whole number, got {value}")]
    NotInteger { field: FeatureName, value: f32 },
    /// An indicator field holds something other than 0 or 1.
    #[error("{field} must be 0 or 1, got {value}")]
    NotIndicator { field: FeatureName, value: f32 },
    /// Class selector is not 1, 2 or 3.
    #[error("unknown passenger class {0}, expected 1, 2 or 3")]
    UnknownClass(u8),
    /// Port selector is not C, Q or S.
    #[error("unknown embarkation port {0:?}, expected C, Q or S")]
    UnknownPort(String),
    /// Fields that must agree with each other don't.
    #[error("inconsistent record: {0}")]
    Inconsistent(&'static str),
    /// A feature matrix does not have one column per feature.
    #[error("expected {expected} feature columns, got {got}")]
    WrongWidth { expected: usize, got: usize },
}
