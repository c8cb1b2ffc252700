//! Task kind value object

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four job types the service runs asynchronously
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Text-to-speech synthesis
    Tts,
    /// End-to-end video dubbing
    Dubbing,
    /// Text translation
    Translation,
    /// Audio transcription
    Transcription,
}

impl TaskKind {
    /// All task kinds
    pub const ALL: [Self; 4] = [
        Self::Tts,
        Self::Dubbing,
        Self::Translation,
        Self::Transcription,
    ];

    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Tts => "TTS",
            Self::Dubbing => "Dubbing",
            Self::Translation => "Translation",
            Self::Transcription => "Transcription",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for TaskKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tts" | "text_to_speech" => Ok(Self::Tts),
            "dubbing" | "dub" => Ok(Self::Dubbing),
            "translation" | "translate" => Ok(Self::Translation),
            "transcription" | "transcribe" => Ok(Self::Transcription),
            _ => Err("Invalid task kind"),
        }
    }
}
