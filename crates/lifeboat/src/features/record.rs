//! Raw inputs and the validated feature record built from them.

use std::ops::{Index, RangeInclusive};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::name::{FEATURE_COUNT, FeatureName};
use super::selectors::{PassengerClass, Port};

/// Accepted passenger ages, in years.
pub const AGE_RANGE: RangeInclusive<f32> = 0.0..=80.0;
/// Largest accepted number of siblings and spouses aboard.
pub const MAX_SIB_SP: u32 = 8;
/// Largest accepted number of parents and children aboard.
pub const MAX_PARCH: u32 = 6;

// =============================================================================
// PassengerInputs
// =============================================================================

/// The raw values a form collects, before validation.
///
/// Selectors are kept untyped (`pclass` as the ticket class number,
/// `embarked` as the port code) so that a bad selection is reported as a
/// [`ValidationError`] rather than being impossible to represent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerInputs {
    pub age: f32,
    pub sib_sp: u32,
    pub parch: u32,
    pub fare: f32,
    pub sex_male: bool,
    /// Ticket class number: 1, 2 or 3.
    pub pclass: u8,
    /// Port code (`C`, `Q`, `S`) or port name.
    pub embarked: String,
}

impl PassengerInputs {
    /// Inputs from already-typed selectors.
    pub fn new(
        age: f32,
        sib_sp: u32,
        parch: u32,
        fare: f32,
        sex_male: bool,
        pclass: PassengerClass,
        embarked: Port,
    ) -> Self {
        Self {
            age,
            sib_sp,
            parch,
            fare,
            sex_male,
            pclass: pclass.number(),
            embarked: embarked.code().to_string(),
        }
    }
}

// =============================================================================
// FeatureRecord
// =============================================================================

/// Validated model input, in canonical [`FeatureName`] order.
///
/// A record always satisfies:
/// - `FamilySize == SibSp + Parch + 1` and `IsAlone == 1` iff `FamilySize == 1`
/// - at most one of `Embarked_Q`, `Embarked_S` is 1
/// - at most one of `Pclass_2`, `Pclass_3` is 1
/// - every field is finite and within its declared range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRecord {
    values: [f32; FEATURE_COUNT],
}

impl FeatureRecord {
    /// Validate raw inputs and derive the full record.
    ///
    /// ```
    /// use lifeboat::{FeatureName, FeatureRecord, PassengerClass, PassengerInputs, Port};
    ///
    /// let inputs = PassengerInputs::new(30.0, 1, 2, 30.0, false, PassengerClass::First, Port::Cherbourg);
    /// let record = FeatureRecord::build(&inputs).unwrap();
    /// assert_eq!(record.get(FeatureName::FamilySize), 4.0);
    /// assert_eq!(record.get(FeatureName::IsAlone), 0.0);
    /// ```
    pub fn build(inputs: &PassengerInputs) -> Result<Self, ValidationError> {
        let age = check_age(inputs.age)?;
        let fare = check_fare(inputs.fare)?;
        let sib_sp = check_count(FeatureName::SibSp, inputs.sib_sp, MAX_SIB_SP)?;
        let parch = check_count(FeatureName::Parch, inputs.parch, MAX_PARCH)?;
        let class = PassengerClass::try_from(inputs.pclass)?;
        let port: Port = inputs.embarked.parse()?;

        Ok(Self::encode(age, sib_sp, parch, fare, inputs.sex_male, class, port))
    }

    /// Derive the record from values already known to be in range.
    fn encode(
        age: f32,
        sib_sp: u32,
        parch: u32,
        fare: f32,
        sex_male: bool,
        class: PassengerClass,
        port: Port,
    ) -> Self {
        let family_size = sib_sp + parch + 1;
        let (embarked_q, embarked_s) = port.one_hot();
        let (pclass_2, pclass_3) = class.one_hot();

        Self {
            values: [
                age,
                sib_sp as f32,
                parch as f32,
                fare,
                family_size as f32,
                indicator(family_size == 1),
                indicator(sex_male),
                embarked_q,
                embarked_s,
                pclass_2,
                pclass_3,
            ],
        }
    }

    /// Accept an externally assembled vector in canonical order.
    ///
    /// Every range and invariant that [`FeatureRecord::build`] guarantees is
    /// checked, so a record obtained here is indistinguishable from a built one.
    pub fn from_values(values: [f32; FEATURE_COUNT]) -> Result<Self, ValidationError> {
        for name in FeatureName::ALL {
            let value = values[name.index()];
            if !value.is_finite() {
                return Err(ValidationError::NotFinite { field: name, value });
            }
        }

        let get = |name: FeatureName| values[name.index()];

        check_age(get(FeatureName::Age))?;
        check_fare(get(FeatureName::Fare))?;
        let sib_sp = whole_count(FeatureName::SibSp, get(FeatureName::SibSp), MAX_SIB_SP)?;
        let parch = whole_count(FeatureName::Parch, get(FeatureName::Parch), MAX_PARCH)?;

        let family_size = get(FeatureName::FamilySize);
        if family_size != (sib_sp + parch + 1) as f32 {
            return Err(ValidationError::Inconsistent(
                "FamilySize must equal SibSp + Parch + 1",
            ));
        }

        let is_alone = check_indicator(FeatureName::IsAlone, get(FeatureName::IsAlone))?;
        if is_alone != (family_size == 1.0) {
            return Err(ValidationError::Inconsistent(
                "IsAlone must be 1 exactly when FamilySize is 1",
            ));
        }

        check_indicator(FeatureName::SexMale, get(FeatureName::SexMale))?;
        let embarked_q = check_indicator(FeatureName::EmbarkedQ, get(FeatureName::EmbarkedQ))?;
        let embarked_s = check_indicator(FeatureName::EmbarkedS, get(FeatureName::EmbarkedS))?;
        if Port::from_one_hot(embarked_q, embarked_s).is_none() {
            return Err(ValidationError::Inconsistent(
                "Embarked_Q and Embarked_S are mutually exclusive",
            ));
        }
        let pclass_2 = check_indicator(FeatureName::Pclass2, get(FeatureName::Pclass2))?;
        let pclass_3 = check_indicator(FeatureName::Pclass3, get(FeatureName::Pclass3))?;
        if PassengerClass::from_one_hot(pclass_2, pclass_3).is_none() {
            return Err(ValidationError::Inconsistent(
                "Pclass_2 and Pclass_3 are mutually exclusive",
            ));
        }

        Ok(Self { values })
    }

    /// Value of a single feature.
    #[inline]
    pub fn get(&self, name: FeatureName) -> f32 {
        self.values[name.index()]
    }

    /// All values in canonical order.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn to_array(&self) -> [f32; FEATURE_COUNT] {
        self.values
    }

    /// `(name, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (FeatureName, f32)> + '_ {
        FeatureName::ALL.into_iter().zip(self.values.iter().copied())
    }

    pub fn age(&self) -> f32 {
        self.get(FeatureName::Age)
    }

    pub fn fare(&self) -> f32 {
        self.get(FeatureName::Fare)
    }

    pub fn sib_sp(&self) -> u32 {
        self.get(FeatureName::SibSp) as u32
    }

    pub fn parch(&self) -> u32 {
        self.get(FeatureName::Parch) as u32
    }

    pub fn family_size(&self) -> u32 {
        self.get(FeatureName::FamilySize) as u32
    }

    pub fn is_alone(&self) -> bool {
        self.get(FeatureName::IsAlone) == 1.0
    }

    pub fn sex_male(&self) -> bool {
        self.get(FeatureName::SexMale) == 1.0
    }

    pub fn passenger_class(&self) -> PassengerClass {
        if self.get(FeatureName::Pclass2) == 1.0 {
            PassengerClass::Second
        } else if self.get(FeatureName::Pclass3) == 1.0 {
            PassengerClass::Third
        } else {
            PassengerClass::First
        }
    }

    pub fn port(&self) -> Port {
        if self.get(FeatureName::EmbarkedQ) == 1.0 {
            Port::Queenstown
        } else if self.get(FeatureName::EmbarkedS) == 1.0 {
            Port::Southampton
        } else {
            Port::Cherbourg
        }
    }

    /// Stack records into a `(n_records, FEATURE_COUNT)` row-major matrix.
    pub fn stack(records: &[FeatureRecord]) -> Array2<f32> {
        Array2::from_shape_fn((records.len(), FEATURE_COUNT), |(row, col)| {
            records[row].values[col]
        })
    }
}

impl Index<FeatureName> for FeatureRecord {
    type Output = f32;

    fn index(&self, name: FeatureName) -> &f32 {
        &self.values[name.index()]
    }
}

impl TryFrom<&PassengerInputs> for FeatureRecord {
    type Error = ValidationError;

    fn try_from(inputs: &PassengerInputs) -> Result<Self, Self::Error> {
        Self::build(inputs)
    }
}

// =============================================================================
// Field checks
// =============================================================================

#[inline]
fn indicator(flag: bool) -> f32 {
    if flag { 1.0 } else { 0.0 }
}

fn check_age(age: f32) -> Result<f32, ValidationError> {
    if !age.is_finite() {
        return Err(ValidationError::NotFinite {
            field: FeatureName::Age,
            value: age,
        });
    }
    if !AGE_RANGE.contains(&age) {
        return Err(ValidationError::OutOfRange {
            field: FeatureName::Age,
            value: age as f64,
            min: *AGE_RANGE.start() as f64,
            max: *AGE_RANGE.end() as f64,
        });
    }
    Ok(age)
}

fn check_fare(fare: f32) -> Result<f32, ValidationError> {
    if !fare.is_finite() {
        return Err(ValidationError::NotFinite {
            field: FeatureName::Fare,
            value: fare,
        });
    }
    if fare < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: FeatureName::Fare,
            value: fare as f64,
            min: 0.0,
            max: f64::INFINITY,
        });
    }
    Ok(fare)
}

fn check_count(field: FeatureName, value: u32, max: u32) -> Result<u32, ValidationError> {
    if value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value: value as f64,
            min: 0.0,
            max: max as f64,
        });
    }
    Ok(value)
}

fn whole_count(field: FeatureName, value: f32, max: u32) -> Result<u32, ValidationError> {
    if value < 0.0 || value > max as f32 {
        return Err(ValidationError::OutOfRange {
            field,
            value: value as f64,
            min: 0.0,
            max: max as f64,
        });
    }
    if value.fract() != 0.0 {
        return Err(ValidationError::NotInteger { field, value });
    }
    Ok(value as u32)
}

fn check_indicator(field: FeatureName, value: f32) -> Result<bool, ValidationError> {
    if value == 0.0 {
        Ok(false)
    } else if value == 1.0 {
        Ok(true)
    } else {
        Err(ValidationError::NotIndicator { field, value })
    }
}
