//! Submit-poll-fetch workflows, one per task kind

use std::path::Path;

use async_trait::async_trait;
use domain::{DubbedRun, Language, LanguageKind, Transcript, Translation, TtsAudio, Voice};
use tracing::{info, instrument};

use crate::client::HttpCambClient;
use crate::error::CambError;
use crate::models::{DubbingRequest, TranscriptionRequest, TranslationRequest, TtsRequest};
use crate::poller::poll_until_complete;

/// Trait for Camb AI clients
///
/// Each job method submits a task, polls it to a terminal status and
/// fetches the result artifact exactly once, after SUCCESS.
#[async_trait]
pub trait CambClient: Send + Sync {
    /// List all voices available to the account
    async fn voices(&self) -> Result<Vec<Voice>, CambError>;

    /// List source or target languages
    async fn languages(&self, kind: LanguageKind) -> Result<Vec<Language>, CambError>;

    /// Synthesize speech and write it under `output_directory`
    ///
    /// Falls back to the configured output directory when `None`.
    async fn tts(
        &self,
        request: &TtsRequest,
        output_directory: Option<&Path>,
    ) -> Result<TtsAudio, CambError>;

    /// Dub a video and return the output URLs
    async fn dub(&self, request: &DubbingRequest) -> Result<DubbedRun, CambError>;

    /// Translate text segments
    async fn translate(&self, request: &TranslationRequest) -> Result<Translation, CambError>;

    /// Transcribe uploaded audio
    async fn transcribe(&self, request: TranscriptionRequest) -> Result<Transcript, CambError>;

    /// Check if the service is reachable
    async fn is_healthy(&self) -> bool;
}

#[async_trait]
impl CambClient for HttpCambClient {
    async fn voices(&self) -> Result<Vec<Voice>, CambError> {
        self.list_voices().await
    }

    async fn languages(&self, kind: LanguageKind) -> Result<Vec<Language>, CambError> {
        self.list_languages(kind).await
    }

    #[instrument(skip_all)]
    async fn tts(
        &self,
        request: &TtsRequest,
        output_directory: Option<&Path>,
    ) -> Result<TtsAudio, CambError> {
        let task = self.create_tts(request).await?;
        let run_id =
            poll_until_complete(self, task.kind, &task.task_id, &self.poll_settings()).await?;

        let directory = output_directory.unwrap_or(self.config().output_directory.as_path());
        self.tts_result(run_id, directory).await
    }

    #[instrument(skip_all)]
    async fn dub(&self, request: &DubbingRequest) -> Result<DubbedRun, CambError> {
        let task = self.start_dubbing(request).await?;
        let run_id =
            poll_until_complete(self, task.kind, &task.task_id, &self.poll_settings()).await?;

        let dubbed = self.dubbed_run_info(run_id).await?;
        info!(%run_id, video_url = %dubbed.video_url, "Dubbing finished");
        Ok(dubbed)
    }

    #[instrument(skip_all)]
    async fn translate(&self, request: &TranslationRequest) -> Result<Translation, CambError> {
        let task = self.create_translation(request).await?;
        let run_id =
            poll_until_complete(self, task.kind, &task.task_id, &self.poll_settings()).await?;

        let translation = self.translation_result(run_id).await?;
        info!(%run_id, segments = translation.texts.len(), "Translation finished");
        Ok(translation)
    }

    #[instrument(skip_all)]
    async fn transcribe(&self, request: TranscriptionRequest) -> Result<Transcript, CambError> {
        let task = self.create_transcription(request).await?;
        let run_id =
            poll_until_complete(self, task.kind, &task.task_id, &self.poll_settings()).await?;

        let transcript = self.transcription_result(run_id).await?;
        info!(%run_id, segments = transcript.segments.len(), "Transcription finished");
        Ok(transcript)
    }

    async fn is_healthy(&self) -> bool {
        Self::is_healthy(self).await
    }
}
