//! Feature encoding: raw passenger attributes into the model's input vector.
//!
//! The model was trained on eleven columns, one-hot encoded with the first
//! level dropped:
//!
//! | Index | Name         | Meaning                              |
//! |-------|--------------|--------------------------------------|
//! | 0     | `Age`        | years, 0 to 80                       |
//! | 1     | `SibSp`      | siblings and spouses aboard, 0 to 8  |
//! | 2     | `Parch`      | parents and children aboard, 0 to 6  |
//! | 3     | `Fare`       | ticket fare, non-negative            |
//! | 4     | `FamilySize` | `SibSp + Parch + 1`                  |
//! | 5     | `IsAlone`    | 1 iff `FamilySize == 1`              |
//! | 6     | `Sex_male`   | 1 for male                           |
//! | 7     | `Embarked_Q` | 1 for Queenstown                     |
//! | 8     | `Embarked_S` | 1 for Southampton (both 0: Cherbourg)|
//! | 9     | `Pclass_2`   | 1 for second class                   |
//! | 10    | `Pclass_3`   | 1 for third class (both 0: first)    |
//!
//! [`FeatureRecord::build`] is the only way raw inputs become a record; the
//! derived columns and one-hot pairs are computed there, never supplied.

mod error;
pub mod form;
mod name;
mod record;
mod selectors;

pub use error::ValidationError;
pub use form::PassengerForm;
pub use name::{FEATURE_COUNT, FeatureName, UnknownFeature};
pub use record::{AGE_RANGE, FeatureRecord, MAX_PARCH, MAX_SIB_SP, PassengerInputs};
pub use selectors::{PassengerClass, Port};
