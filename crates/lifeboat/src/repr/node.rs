//! Split tests evaluated at internal nodes.

/// Rule deciding which side a value equal to the threshold goes.
///
/// The comparator is a property of the whole ensemble: it must match the
/// convention of the exporter that produced the thresholds, otherwise values
/// landing exactly on a threshold route differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SplitComparator {
    /// Go left if `value <= threshold`.
    #[default]
    LessOrEqual,
    /// Go left if `value < threshold` (XGBoost / LightGBM convention).
    Less,
}

impl SplitComparator {
    #[inline]
    pub fn goes_left(self, value: f32, threshold: f32) -> bool {
        match self {
            SplitComparator::LessOrEqual => value <= threshold,
            SplitComparator::Less => value < threshold,
        }
    }
}

/// Split condition for a decision node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitCondition {
    /// Feature index to split on
    pub feature_index: u32,
    /// Threshold value
    pub threshold: f32,
    /// Direction for missing values (true = left, false = right)
    pub default_left: bool,
}

impl SplitCondition {
    pub fn new(feature_index: u32, threshold: f32, default_left: bool) -> Self {
        Self {
            feature_index,
            threshold,
            default_left,
        }
    }

    /// Evaluate which direction to go for a feature value.
    /// Returns true for left, false for right.
    #[inline]
    pub fn go_left(&self, feature_value: f32, comparator: SplitComparator) -> bool {
        if feature_value.is_nan() {
            self.default_left
        } else {
            comparator.goes_left(feature_value, self.threshold)
        }
    }
}
