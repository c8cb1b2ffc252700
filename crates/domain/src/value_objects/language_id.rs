//! Language identifier value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Numeric language identifier from the service's language catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct LanguageId(u32);

impl LanguageId {
    /// English (United States), the service's default source language
    pub const ENGLISH_US: Self = Self(1);

    /// Highest language id accepted by text-to-speech
    pub const MAX_TTS: u32 = 148;

    /// Create a language id
    ///
    /// # Errors
    ///
    /// Returns an error if the id is zero.
    pub fn new(raw: u32) -> Result<Self, DomainError> {
        if raw == 0 {
            return Err(DomainError::InvalidLanguage(raw));
        }
        Ok(Self(raw))
    }

    /// Get the raw id
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Check whether text-to-speech supports this language
    #[must_use]
    pub const fn supports_tts(&self) -> bool {
        self.0 >= 1 && self.0 <= Self::MAX_TTS
    }
}

impl Default for LanguageId {
    fn default() -> Self {
        Self::ENGLISH_US
    }
}

impl TryFrom<u32> for LanguageId {
    type Error = DomainError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<LanguageId> for u32 {
    fn from(id: LanguageId) -> Self {
        id.0
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_rejected() {
        assert!(LanguageId::new(0).is_err());
    }

    #[test]
    fn tts_range_is_inclusive() {
        assert!(LanguageId::new(1).unwrap().supports_tts());
        assert!(LanguageId::new(148).unwrap().supports_tts());
        assert!(!LanguageId::new(149).unwrap().supports_tts());
    }

    #[test]
    fn default_is_english_us() {
        assert_eq!(LanguageId::default().value(), 1);
    }
}
