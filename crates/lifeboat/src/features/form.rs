//! Editable form state for a single passenger.
//!
//! A form holds what the user has entered so far. Class and port are kept as
//! single typed selectors, so the one-hot pairs of the record can never both
//! be set; family size and the alone flag are never stored, only derived.

use super::error::ValidationError;
use super::record::{FeatureRecord, PassengerInputs};
use super::selectors::{PassengerClass, Port};

/// Form state with the data-shaping helpers a UI needs.
///
/// Defaults match a fresh form: a 30 year old woman travelling alone in
/// third class from Cherbourg, fare 30.
#[derive(Debug, Clone, PartialEq)]
pub struct PassengerForm {
    age: f32,
    sib_sp: u32,
    parch: u32,
    fare: f32,
    sex_male: bool,
    class: PassengerClass,
    embarked: Port,
}

impl Default for PassengerForm {
    fn default() -> Self {
        Self {
            age: 30.0,
            sib_sp: 0,
            parch: 0,
            fare: 30.0,
            sex_male: false,
            class: PassengerClass::Third,
            embarked: Port::Cherbourg,
        }
    }
}

impl PassengerForm {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    pub fn toggle_sex(&mut self) {
        self.sex_male = !self.sex_male;
    }

    pub fn set_sex_male(&mut self, sex_male: bool) {
        self.sex_male = sex_male;
    }

    pub fn set_class(&mut self, class: PassengerClass) {
        self.class = class;
    }

    /// Set the class from a raw selector. An unknown value leaves the form unchanged.
    pub fn set_class_selector(&mut self, selector: u8) -> Result<(), ValidationError> {
        self.class = PassengerClass::try_from(selector)?;
        Ok(())
    }

    pub fn set_embarked(&mut self, port: Port) {
        self.embarked = port;
    }

    /// Set the port from a raw selector. An unknown value leaves the form unchanged.
    pub fn set_embarked_selector(&mut self, selector: &str) -> Result<(), ValidationError> {
        self.embarked = selector.parse()?;
        Ok(())
    }

    // Numeric fields are range-checked when the record is built.

    pub fn set_age(&mut self, age: f32) {
        self.age = age;
    }

    pub fn set_sib_sp(&mut self, sib_sp: u32) {
        self.sib_sp = sib_sp;
    }

    pub fn set_parch(&mut self, parch: u32) {
        self.parch = parch;
    }

    pub fn set_fare(&mut self, fare: f32) {
        self.fare = fare;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn age(&self) -> f32 {
        self.age
    }

    pub fn sib_sp(&self) -> u32 {
        self.sib_sp
    }

    pub fn parch(&self) -> u32 {
        self.parch
    }

    pub fn fare(&self) -> f32 {
        self.fare
    }

    pub fn sex_male(&self) -> bool {
        self.sex_male
    }

    pub fn class(&self) -> PassengerClass {
        self.class
    }

    pub fn embarked(&self) -> Port {
        self.embarked
    }

    /// `SibSp + Parch + 1`, saturating.
    pub fn family_size(&self) -> u32 {
        self.sib_sp.saturating_add(self.parch).saturating_add(1)
    }

    pub fn is_alone(&self) -> bool {
        self.family_size() == 1
    }

    /// Snapshot of the current values as raw inputs.
    pub fn inputs(&self) -> PassengerInputs {
        PassengerInputs::new(
            self.age,
            self.sib_sp,
            self.parch,
            self.fare,
            self.sex_male,
            self.class,
            self.embarked,
        )
    }

    /// Validate the current values into a record.
    pub fn record(&self) -> Result<FeatureRecord, ValidationError> {
        FeatureRecord::build(&self.inputs())
    }
}
