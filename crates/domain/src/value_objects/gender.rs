//! Voice gender value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Gender of a synthesized voice
///
/// Encoded on the wire as the ISO/IEC 5218 integer codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum Gender {
    /// Gender is not known
    #[default]
    NotKnown,
    /// Male voice
    Male,
    /// Female voice
    Female,
    /// Gender does not apply
    NotApplicable,
}

impl Gender {
    /// Get the wire code
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::NotKnown => 0,
            Self::Male => 1,
            Self::Female => 2,
            Self::NotApplicable => 9,
        }
    }
}

impl TryFrom<u8> for Gender {
    type Error = DomainError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::NotKnown),
            1 => Ok(Self::Male),
            2 => Ok(Self::Female),
            9 => Ok(Self::NotApplicable),
            other => Err(DomainError::ValidationError(format!(
                "unknown gender code {other}"
            ))),
        }
    }
}

impl From<Gender> for u8 {
    fn from(gender: Gender) -> Self {
        gender.code()
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotKnown => "not known",
            Self::Male => "male",
            Self::Female => "female",
            Self::NotApplicable => "not applicable",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for Gender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" | "m" | "1" => Ok(Self::Male),
            "female" | "f" | "2" => Ok(Self::Female),
            "unknown" | "not_known" | "0" => Ok(Self::NotKnown),
            "not_applicable" | "n/a" | "9" => Ok(Self::NotApplicable),
            other => Err(DomainError::ValidationError(format!(
                "unknown gender '{other}'"
            ))),
        }
    }
}
