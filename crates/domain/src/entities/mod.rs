//! Entities - objects the service hands back while a job runs

mod artifacts;
mod catalog;
mod task;

pub use artifacts::{DubbedRun, Transcript, TranscriptSegment, Translation, TtsAudio};
pub use catalog::{Language, LanguageKind, Voice};
pub use task::{Run, Task};
