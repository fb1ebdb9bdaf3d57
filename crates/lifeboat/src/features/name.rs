//! Canonical feature names, in the column order the model was trained on.

use std::fmt;
use std::str::FromStr;

/// Number of features in a [`FeatureRecord`](super::FeatureRecord).
pub const FEATURE_COUNT: usize = 11;

/// Column names the model was trained on, in canonical record order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureName {
    Age = 0,
    SibSp = 1,
    Parch = 2,
    Fare = 3,
    FamilySize = 4,
    IsAlone = 5,
    SexMale = 6,
    EmbarkedQ = 7,
    EmbarkedS = 8,
    Pclass2 = 9,
    Pclass3 = 10,
}

impl FeatureName {
    /// All features in canonical order.
    pub const ALL: [FeatureName; FEATURE_COUNT] = [
        FeatureName::Age,
        FeatureName::SibSp,
        FeatureName::Parch,
        FeatureName::Fare,
        FeatureName::FamilySize,
        FeatureName::IsAlone,
        FeatureName::SexMale,
        FeatureName::EmbarkedQ,
        FeatureName::EmbarkedS,
        FeatureName::Pclass2,
        FeatureName::Pclass3,
    ];

    /// Position in a [`FeatureRecord`](super::FeatureRecord).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Training column name.
    pub fn as_str(self) -> &'static str {
        match self {
            FeatureName::Age => "Age",
            FeatureName::SibSp => "SibSp",
            FeatureName::Parch => "Parch",
            FeatureName::Fare => "Fare",
            FeatureName::FamilySize => "FamilySize",
            FeatureName::IsAlone => "IsAlone",
            FeatureName::SexMale => "Sex_male",
            FeatureName::EmbarkedQ => "Embarked_Q",
            FeatureName::EmbarkedS => "Embarked_S",
            FeatureName::Pclass2 => "Pclass_2",
            FeatureName::Pclass3 => "Pclass_3",
        }
    }

    /// Canonical column names, in record order.
    pub fn column_names() -> Vec<String> {
        Self::ALL.iter().map(|f| f.as_str().to_string()).collect()
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized column name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown feature name {0:?}")]
pub struct UnknownFeature(pub String);

impl FromStr for FeatureName {
    type Err = UnknownFeature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownFeature(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_canonical_order() {
        for (i, f) in FeatureName::ALL.iter().enumerate() {
            assert_eq!(f.index(), i);
        }
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for f in FeatureName::ALL {
            assert_eq!(f.as_str().parse::<FeatureName>().unwrap(), f);
        }
        assert_eq!(FeatureName::SexMale.to_string(), "Sex_male");
        assert!("sex_male".parse::<FeatureName>().is_err());
    }

    #[test]
    fn column_names_in_order() {
        let names = FeatureName::column_names();
        assert_eq!(names.len(), FEATURE_COUNT);
        assert_eq!(names[0], "Age");
        assert_eq!(names[10], "Pclass_3");
    }
}
