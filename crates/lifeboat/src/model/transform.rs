//! Output transformation for inference.
//!
//! The [`OutputTransform`] enum defines how the raw ensemble score is
//! converted to the value that gets thresholded. It is persisted with the
//! model so that inference doesn't need to know how the model was trained.
//!
//! # Variants
//!
//! - [`Identity`](OutputTransform::Identity): The model already outputs the class score
//! - [`Sigmoid`](OutputTransform::Sigmoid): Raw score is a logit margin

/// Inference-time output transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputTransform {
    /// No transformation; output = raw score.
    #[default]
    Identity,

    /// Logistic sigmoid: output = 1 / (1 + exp(-margin)).
    Sigmoid,
}

impl OutputTransform {
    /// Apply the transformation to a single raw score.
    ///
    /// NaN propagates; infinities saturate to 0 or 1 under `Sigmoid`.
    #[inline]
    pub fn apply(self, raw: f32) -> f32 {
        match self {
            OutputTransform::Identity => raw,
            OutputTransform::Sigmoid => sigmoid(raw),
        }
    }

    /// Whether the transformed output is a probability.
    #[inline]
    pub fn is_probability(self) -> bool {
        matches!(self, OutputTransform::Sigmoid)
    }
}

/// Numerically stable sigmoid.
/// Clamps input to [-500, 500] to prevent overflow.
#[inline]
fn sigmoid(x: f32) -> f32 {
    let clamped = x.clamp(-500.0, 500.0);
    if clamped >= 0.0 {
        1.0 / (1.0 + (-clamped).exp())
    } else {
        let e = clamped.exp();
        e / (1.0 + e)
    }
}
