//! Language and voice catalogue entries

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which language list to query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageKind {
    /// Languages accepted as input
    Source,
    /// Languages available as output
    Target,
}

impl LanguageKind {
    /// Get the lowercase name used in endpoint paths and file names
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Target => "target",
        }
    }
}

impl fmt::Display for LanguageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LanguageKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "source" | "src" => Ok(Self::Source),
            "target" | "tgt" => Ok(Self::Target),
            _ => Err("Invalid language kind, expected 'source' or 'target'"),
        }
    }
}

/// A language offered by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Numeric id used in task requests
    pub id: u32,
    /// Display name, e.g. "english (united states)"
    pub language: String,
    /// Locale code, e.g. "en-us"
    pub short_name: String,
}

/// A voice available for text-to-speech
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    /// Numeric id used in TTS requests
    pub id: u64,
    /// Display name
    pub voice_name: String,
    /// Gender code, if the voice declares one
    #[serde(default)]
    pub gender: Option<u8>,
    /// Apparent speaker age
    #[serde(default)]
    pub age: Option<u32>,
    /// Primary language id
    #[serde(default)]
    pub language: Option<u32>,
}
