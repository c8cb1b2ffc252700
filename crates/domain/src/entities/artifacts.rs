//! Result artifacts fetched once a run succeeds

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::value_objects::RunId;

/// Output locations of a finished dubbing run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DubbedRun {
    /// URL of the dubbed video
    pub video_url: String,
    /// URL of the dubbed audio track
    pub audio_url: String,
}

/// Synthesized speech written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtsAudio {
    /// Run that produced the audio
    pub run_id: RunId,
    /// File the audio stream was written to
    pub path: PathBuf,
    /// Number of bytes written
    pub size_bytes: u64,
}

/// Translated text segments, in the order they were submitted
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Translation {
    /// Translated segments
    #[serde(default)]
    pub texts: Vec<String>,
}

impl Translation {
    /// Join all segments with newlines
    #[must_use]
    pub fn joined(&self) -> String {
        self.texts.join("\n")
    }
}

/// One timed segment of a transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Segment start in seconds
    #[serde(default)]
    pub start: f64,
    /// Segment end in seconds
    #[serde(default)]
    pub end: f64,
    /// Transcribed text
    pub text: String,
    /// Speaker label, when diarization is available
    #[serde(default)]
    pub speaker: Option<String>,
}

/// A transcript assembled from timed segments
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    /// Segments in playback order
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    /// Full transcript text with segments separated by spaces
    #[must_use]
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// End time of the last segment, in seconds
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        self.segments.last().map_or(0.0, |s| s.end)
    }
}
