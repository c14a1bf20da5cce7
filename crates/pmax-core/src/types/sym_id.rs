//! Symmetrix array identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A validated Symmetrix array identifier.
///
/// Array ids are twelve decimal digits, e.g. `000197900046`.
///
/// # Example
///
/// ```
/// use pmax_core::SymId;
///
/// let sym = SymId::new("000197900046").unwrap();
/// assert_eq!(sym.as_str(), "000197900046");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SymId(String);

impl SymId {
    /// Create a new array id from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not twelve decimal digits.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Returns the array id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        if s.len() != 12 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidInputError::SymId {
                value: s.to_string(),
                reason: "must be twelve decimal digits".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl fmt::Display for SymId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SymId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for SymId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<SymId> for String {
    fn from(sym: SymId) -> Self {
        sym.0
    }
}

impl AsRef<str> for SymId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_sym_id() {
        assert!(SymId::new("000197900046").is_ok());
    }

    #[test]
    fn rejects_short_id() {
        assert!(SymId::new("0001979").is_err());
    }

    #[test]
    fn rejects_non_numeric() {
        assert!(SymId::new("00019790004X").is_err());
    }

    #[test]
    fn serde_round_trip() {
        let sym = SymId::new("000197900046").unwrap();
        let json = serde_json::to_string(&sym).unwrap();
        assert_eq!(json, "\"000197900046\"");
        let back: SymId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sym);
    }
}
