//! Mapping raw ensemble scores to survival decisions.

use std::fmt;

use crate::model::OutputTransform;
use crate::repr::MalformedModelError;

/// Default decision threshold.
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Binary survival outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Survival {
    Survived,
    DidNotSurvive,
}

impl Survival {
    #[inline]
    pub fn is_survived(self) -> bool {
        matches!(self, Survival::Survived)
    }

    /// Class label as used in training data: 1 for survived, 0 otherwise.
    #[inline]
    pub fn as_label(self) -> u8 {
        match self {
            Survival::Survived => 1,
            Survival::DidNotSurvive => 0,
        }
    }
}

impl fmt::Display for Survival {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Survival::Survived => f.write_str("Survived"),
            Survival::DidNotSurvive => f.write_str("Did not survive"),
        }
    }
}

/// Outcome of a single prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    outcome: Survival,
    raw_score: f32,
    probability: Option<f32>,
}

impl PredictionResult {
    pub fn outcome(&self) -> Survival {
        self.outcome
    }

    #[inline]
    pub fn survived(&self) -> bool {
        self.outcome.is_survived()
    }

    /// Bias plus the sum of leaf contributions, before any transform.
    pub fn raw_score(&self) -> f32 {
        self.raw_score
    }

    /// Survival probability, present only for probabilistic transforms.
    pub fn probability(&self) -> Option<f32> {
        self.probability
    }
}

impl OutputTransform {
    /// Turn a raw score into a decision.
    ///
    /// The transformed output is compared against `threshold`; a value equal
    /// to the threshold counts as survived.
    ///
    /// # Errors
    ///
    /// [`MalformedModelError::NonFiniteScore`] if `raw_score` is NaN.
    pub fn decide(
        self,
        raw_score: f32,
        threshold: f32,
    ) -> Result<PredictionResult, MalformedModelError> {
        if raw_score.is_nan() {
            return Err(MalformedModelError::NonFiniteScore);
        }

        let output = self.apply(raw_score);
        let outcome = if output >= threshold {
            Survival::Survived
        } else {
            Survival::DidNotSurvive
        };
        let probability = self.is_probability().then_some(output);

        Ok(PredictionResult {
            outcome,
            raw_score,
            probability,
        })
    }
}
