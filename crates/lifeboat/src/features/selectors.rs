//! Typed categorical selectors and their one-hot encodings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// Ticket class. First class is the dropped one-hot level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PassengerClass {
    First,
    Second,
    #[default]
    Third,
}

impl PassengerClass {
    /// Class number as printed on the ticket (1, 2 or 3).
    pub fn number(self) -> u8 {
        match self {
            PassengerClass::First => 1,
            PassengerClass::Second => 2,
            PassengerClass::Third => 3,
        }
    }

    /// `(Pclass_2, Pclass_3)` indicators.
    #[inline]
    pub fn one_hot(self) -> (f32, f32) {
        match self {
            PassengerClass::First => (0.0, 0.0),
            PassengerClass::Second => (1.0, 0.0),
            PassengerClass::Third => (0.0, 1.0),
        }
    }

    /// Decode `(Pclass_2, Pclass_3)` indicators, `None` if both are set.
    pub fn from_one_hot(pclass_2: bool, pclass_3: bool) -> Option<Self> {
        match (pclass_2, pclass_3) {
            (false, false) => Some(PassengerClass::First),
            (true, false) => Some(PassengerClass::Second),
            (false, true) => Some(PassengerClass::Third),
            (true, true) => None,
        }
    }
}

impl TryFrom<u8> for PassengerClass {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PassengerClass::First),
            2 => Ok(PassengerClass::Second),
            3 => Ok(PassengerClass::Third),
            other => Err(ValidationError::UnknownClass(other)),
        }
    }
}

impl fmt::Display for PassengerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class {}", self.number())
    }
}

/// Port of embarkation. Cherbourg is the dropped one-hot level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Port {
    #[default]
    Cherbourg,
    Queenstown,
    Southampton,
}

impl Port {
    /// Single-letter code used in the manifest (`C`, `Q`, `S`).
    pub fn code(self) -> char {
        match self {
            Port::Cherbourg => 'C',
            Port::Queenstown => 'Q',
            Port::Southampton => 'S',
        }
    }

    /// `(Embarked_Q, Embarked_S)` indicators.
    #[inline]
    pub fn one_hot(self) -> (f32, f32) {
        match self {
            Port::Cherbourg => (0.0, 0.0),
            Port::Queenstown => (1.0, 0.0),
            Port::Southampton => (0.0, 1.0),
        }
    }

    /// Decode `(Embarked_Q, Embarked_S)` indicators, `None` if both are set.
    pub fn from_one_hot(embarked_q: bool, embarked_s: bool) -> Option<Self> {
        match (embarked_q, embarked_s) {
            (false, false) => Some(Port::Cherbourg),
            (true, false) => Some(Port::Queenstown),
            (false, true) => Some(Port::Southampton),
            (true, true) => None,
        }
    }
}

/// Accepts the manifest code or the port name, case-insensitively.
impl FromStr for Port {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "cherbourg" => Ok(Port::Cherbourg),
            "q" | "queenstown" => Ok(Port::Queenstown),
            "s" | "southampton" => Ok(Port::Southampton),
            _ => Err(ValidationError::UnknownPort(s.to_string())),
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Port::Cherbourg => "Cherbourg",
            Port::Queenstown => "Queenstown",
            Port::Southampton => "Southampton",
        };
        write!(f, "{name} ({})", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, PassengerClass::First, (0.0, 0.0))]
    #[case(2, PassengerClass::Second, (1.0, 0.0))]
    #[case(3, PassengerClass::Third, (0.0, 1.0))]
    fn class_selector_encodes(
        #[case] selector: u8,
        #[case] class: PassengerClass,
        #[case] one_hot: (f32, f32),
    ) {
        let parsed = PassengerClass::try_from(selector).unwrap();
        assert_eq!(parsed, class);
        assert_eq!(parsed.number(), selector);
        assert_eq!(parsed.one_hot(), one_hot);
        assert_eq!(
            PassengerClass::from_one_hot(one_hot.0 == 1.0, one_hot.1 == 1.0),
            Some(class)
        );
    }

    #[rstest]
    #[case(0)]
    #[case(4)]
    #[case(255)]
    fn class_selector_rejects_unknown(#[case] selector: u8) {
        assert_eq!(
            PassengerClass::try_from(selector),
            Err(ValidationError::UnknownClass(selector))
        );
    }

    #[rstest]
    #[case("C", Port::Cherbourg)]
    #[case("q", Port::Queenstown)]
    #[case(" S ", Port::Southampton)]
    #[case("Southampton", Port::Southampton)]
    fn port_selector_parses(#[case] input: &str, #[case] port: Port) {
        assert_eq!(input.parse::<Port>().unwrap(), port);
    }

    #[rstest]
    #[case("")]
    #[case("X")]
    #[case("CQ")]
    fn port_selector_rejects_unknown(#[case] input: &str) {
        assert_eq!(
            input.parse::<Port>(),
            Err(ValidationError::UnknownPort(input.to_string()))
        );
    }

    #[test]
    fn one_hot_pairs_are_exclusive() {
        for class in [PassengerClass::First, PassengerClass::Second, PassengerClass::Third] {
            let (a, b) = class.one_hot();
            assert!(a + b <= 1.0);
        }
        for port in [Port::Cherbourg, Port::Queenstown, Port::Southampton] {
            let (a, b) = port.one_hot();
            assert!(a + b <= 1.0);
        }
        assert_eq!(PassengerClass::from_one_hot(true, true), None);
        assert_eq!(Port::from_one_hot(true, true), None);
    }

    #[test]
    fn display() {
        assert_eq!(Port::Queenstown.to_string(), "Queenstown (Q)");
        assert_eq!(PassengerClass::Second.to_string(), "class 2");
    }
}
