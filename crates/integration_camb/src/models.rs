//! Request and response bodies for the Camb AI REST API

use domain::{Gender, LanguageId, TaskId};
use serde::{Deserialize, Serialize};

use crate::error::CambError;

/// Parameters for a text-to-speech task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TtsRequest {
    /// Text to synthesize
    pub text: String,
    /// Voice from the voice catalogue
    pub voice_id: u64,
    /// Language of the text
    pub language: LanguageId,
    /// Voice gender
    pub gender: Gender,
    /// Voice age; the service picks one when absent
    pub age: Option<u32>,
}

impl TtsRequest {
    /// Create a TTS request with no explicit age
    #[must_use]
    pub fn new(text: impl Into<String>, voice_id: u64, language: LanguageId, gender: Gender) -> Self {
        Self {
            text: text.into(),
            voice_id,
            language,
            gender,
            age: None,
        }
    }

    /// Set the voice age
    #[must_use]
    pub const fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    /// Validate before submission
    ///
    /// # Errors
    ///
    /// Returns `CambError::InvalidInput` for empty text or a language
    /// outside the TTS range.
    pub fn validate(&self) -> Result<(), CambError> {
        if self.text.trim().is_empty() {
            return Err(CambError::InvalidInput("TTS text must not be empty".to_string()));
        }
        if !self.language.supports_tts() {
            return Err(CambError::InvalidInput(format!(
                "Language ID must be between 1 and {}, got {}",
                LanguageId::MAX_TTS,
                self.language
            )));
        }
        Ok(())
    }
}

/// Parameters for an end-to-end dubbing task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DubbingRequest {
    /// Publicly reachable URL of the video to dub
    pub video_url: String,
    /// Spoken language of the video
    pub source_language: LanguageId,
    /// Language to dub into
    pub target_language: LanguageId,
}

impl DubbingRequest {
    /// Create a dubbing request from English (US)
    #[must_use]
    pub fn new(video_url: impl Into<String>, target_language: LanguageId) -> Self {
        Self {
            video_url: video_url.into(),
            source_language: LanguageId::ENGLISH_US,
            target_language,
        }
    }

    /// Override the source language
    #[must_use]
    pub const fn with_source_language(mut self, source_language: LanguageId) -> Self {
        self.source_language = source_language;
        self
    }

    /// Validate before submission
    ///
    /// # Errors
    ///
    /// Returns `CambError::InvalidInput` if the video URL is empty.
    pub fn validate(&self) -> Result<(), CambError> {
        if self.video_url.trim().is_empty() {
            return Err(CambError::InvalidInput("video_url must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Parameters for a translation task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationRequest {
    /// Language of the input texts
    pub source_language: LanguageId,
    /// Language to translate into
    pub target_language: LanguageId,
    /// Text segments to translate
    pub texts: Vec<String>,
}

impl TranslationRequest {
    /// Create a translation request
    #[must_use]
    pub const fn new(
        source_language: LanguageId,
        target_language: LanguageId,
        texts: Vec<String>,
    ) -> Self {
        Self {
            source_language,
            target_language,
            texts,
        }
    }

    /// Validate before submission
    ///
    /// # Errors
    ///
    /// Returns `CambError::InvalidInput` if there is nothing to translate.
    pub fn validate(&self) -> Result<(), CambError> {
        if self.texts.iter().all(|t| t.trim().is_empty()) {
            return Err(CambError::InvalidInput(
                "translation needs at least one non-empty text".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parameters for a transcription task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionRequest {
    /// Encoded audio to transcribe
    pub audio: Vec<u8>,
    /// File name sent with the upload, e.g. "interview.mp3"
    pub file_name: String,
    /// Spoken language of the audio
    pub language: LanguageId,
}

impl TranscriptionRequest {
    /// Create a transcription request
    #[must_use]
    pub fn new(audio: Vec<u8>, file_name: impl Into<String>, language: LanguageId) -> Self {
        Self {
            audio,
            file_name: file_name.into(),
            language,
        }
    }

    /// MIME type guessed from the file extension
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        let extension = std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("mp3") => "audio/mpeg",
            Some("wav") => "audio/wav",
            Some("flac") => "audio/flac",
            Some("ogg" | "opus") => "audio/ogg",
            Some("m4a" | "aac") => "audio/mp4",
            Some("mp4") => "video/mp4",
            Some("webm") => "audio/webm",
            _ => "application/octet-stream",
        }
    }

    /// Validate before submission
    ///
    /// # Errors
    ///
    /// Returns `CambError::InvalidInput` if the audio is empty.
    pub fn validate(&self) -> Result<(), CambError> {
        if self.audio.is_empty() {
            return Err(CambError::InvalidInput("audio data is empty".to_string()));
        }
        Ok(())
    }
}

/// Response of every create endpoint
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TaskCreated {
    pub task_id: TaskId,
}
