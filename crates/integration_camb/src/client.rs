//! HTTP client for the Camb AI REST API
//!
//! One method per endpoint. The poll-to-completion workflows built on top
//! of these live in [`crate::workflows`].

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use domain::{
    DubbedRun, Language, LanguageKind, Run, RunId, Task, TaskId, TaskKind, Transcript,
    Translation, TtsAudio, Voice,
};
use futures::StreamExt;
use reqwest::header::RETRY_AFTER;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::config::{CambConfig, PollSettings};
use crate::error::CambError;
use crate::models::{
    DubbingRequest, TaskCreated, TranscriptionRequest, TranslationRequest, TtsRequest,
};
use crate::output;
use crate::poller::TaskStatusSource;

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-api-key";

/// Path of the create endpoint for a task kind
const fn create_path(kind: TaskKind) -> &'static str {
    match kind {
        TaskKind::Tts => "tts",
        TaskKind::Dubbing => "end_to_end_dubbing",
        TaskKind::Translation => "translate",
        TaskKind::Transcription => "transcribe",
    }
}

/// Path of the status endpoint for a submitted task
fn status_path(kind: TaskKind, task_id: &TaskId) -> String {
    format!("{}/{task_id}", create_path(kind))
}

/// Path of the result endpoint for a finished run
fn result_path(kind: TaskKind, run_id: RunId) -> String {
    let prefix = match kind {
        TaskKind::Tts => "tts_result",
        TaskKind::Dubbing => "dubbed_run_info",
        TaskKind::Translation => "translation_result",
        TaskKind::Transcription => "transcription_result",
    };
    format!("{prefix}/{run_id}")
}

/// Camb AI client over HTTPS
pub struct HttpCambClient {
    client: Client,
    config: CambConfig,
    api_key: SecretString,
}

impl std::fmt::Debug for HttpCambClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCambClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HttpCambClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns `CambError::ApiKeyMissing` if the configuration has no API key,
    /// `CambError::Configuration` if it is otherwise invalid or the HTTP
    /// client cannot be initialized.
    pub fn new(config: CambConfig) -> Result<Self, CambError> {
        config.validate().map_err(CambError::Configuration)?;

        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.expose_secret().trim().is_empty())
            .ok_or(CambError::ApiKeyMissing)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("cambai/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CambError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Create a client from `cambai.toml` and `CAMB_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or has no API key.
    pub fn from_env() -> Result<Self, CambError> {
        let config = CambConfig::load()
            .map_err(|e| CambError::Configuration(e.to_string()))?
            .with_env_api_key();
        Self::new(config)
    }

    /// The configuration this client was built with
    #[must_use]
    pub const fn config(&self) -> &CambConfig {
        &self.config
    }

    /// Polling pacing used by the workflows
    #[must_use]
    pub const fn poll_settings(&self) -> PollSettings {
        self.config.poll_settings()
    }

    /// Build the absolute URL of an endpoint
    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.config.normalized_base_url())
    }

    fn get(&self, endpoint: &str) -> RequestBuilder {
        self.client
            .get(self.endpoint_url(endpoint))
            .header(API_KEY_HEADER, self.api_key.expose_secret())
    }

    fn post(&self, endpoint: &str) -> RequestBuilder {
        self.client
            .post(self.endpoint_url(endpoint))
            .header(API_KEY_HEADER, self.api_key.expose_secret())
    }

    /// Send a request and turn non-success statuses into classified errors
    async fn execute(&self, request: RequestBuilder) -> Result<Response, CambError> {
        let response = request
            .send()
            .await
            .map_err(|e| CambError::from_transport(&e, self.config.timeout_secs))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let body = response.text().await.unwrap_or_default();

        warn!(%status, "Camb AI request failed");
        Err(CambError::from_status(status, retry_after, body))
    }

    async fn read_text(response: Response) -> Result<String, CambError> {
        response
            .text()
            .await
            .map_err(|e| CambError::ParseError(e.to_string()))
    }

    fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, CambError> {
        serde_json::from_str(body).map_err(|e| CambError::ParseError(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, CambError> {
        let response = self.execute(self.get(endpoint)).await?;
        let body = Self::read_text(response).await?;
        Self::parse_json(&body)
    }

    async fn submit<B: Serialize + Sync>(&self, kind: TaskKind, body: &B) -> Result<Task, CambError> {
        let response = self
            .execute(self.post(create_path(kind)).json(body))
            .await?;
        let body = Self::read_text(response).await?;
        let created: TaskCreated = Self::parse_json(&body)?;

        info!(kind = %kind, task_id = %created.task_id, "Task submitted");
        Ok(Task::new(created.task_id, kind))
    }

    // ---------- Catalogue ----------

    /// List all voices available to the account
    #[instrument(skip(self))]
    pub async fn list_voices(&self) -> Result<Vec<Voice>, CambError> {
        let voices: Vec<Voice> = self.get_json("list_voices").await?;
        debug!(count = voices.len(), "Voices listed");
        Ok(voices)
    }

    /// List source or target languages
    #[instrument(skip(self))]
    pub async fn list_languages(&self, kind: LanguageKind) -> Result<Vec<Language>, CambError> {
        let languages: Vec<Language> = self.get_json(&format!("{kind}_languages")).await?;
        debug!(count = languages.len(), "Languages listed");
        Ok(languages)
    }

    /// Fetch the voice list and write the raw JSON to `voices.json` in `directory`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the body is not a voice list,
    /// or the file cannot be written.
    #[instrument(skip(self))]
    pub async fn save_voices(&self, directory: &Path) -> Result<Vec<Voice>, CambError> {
        let response = self.execute(self.get("list_voices")).await?;
        let body = Self::read_text(response).await?;
        let voices = Self::parse_json(&body)?;
        let path = output::write_listing(directory, "voices.json", &body).await?;
        info!(path = %path.display(), "Voices written");
        Ok(voices)
    }

    /// Fetch a language list and write the raw JSON to `{kind}_languages.json` in `directory`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the body is not a language
    /// list, or the file cannot be written.
    #[instrument(skip(self))]
    pub async fn save_languages(
        &self,
        kind: LanguageKind,
        directory: &Path,
    ) -> Result<Vec<Language>, CambError> {
        let endpoint = format!("{kind}_languages");
        let response = self.execute(self.get(&endpoint)).await?;
        let body = Self::read_text(response).await?;
        let languages = Self::parse_json(&body)?;
        let path = output::write_listing(directory, &format!("{endpoint}.json"), &body).await?;
        info!(path = %path.display(), "Languages written");
        Ok(languages)
    }

    // ---------- Task submission ----------

    /// Submit a text-to-speech task
    #[instrument(skip(self, request), fields(voice_id = request.voice_id, language = %request.language))]
    pub async fn create_tts(&self, request: &TtsRequest) -> Result<Task, CambError> {
        request.validate()?;
        self.submit(TaskKind::Tts, request).await
    }

    /// Submit an end-to-end dubbing task
    #[instrument(skip(self, request), fields(target_language = %request.target_language))]
    pub async fn start_dubbing(&self, request: &DubbingRequest) -> Result<Task, CambError> {
        request.validate()?;
        self.submit(TaskKind::Dubbing, request).await
    }

    /// Submit a translation task
    #[instrument(skip(self, request), fields(segments = request.texts.len()))]
    pub async fn create_translation(&self, request: &TranslationRequest) -> Result<Task, CambError> {
        request.validate()?;
        self.submit(TaskKind::Translation, request).await
    }

    /// Upload audio and submit a transcription task
    #[instrument(skip(self, request), fields(file_name = %request.file_name, audio_size = request.audio.len()))]
    pub async fn create_transcription(
        &self,
        request: TranscriptionRequest,
    ) -> Result<Task, CambError> {
        request.validate()?;

        let mime_type = request.mime_type();
        let language = request.language.to_string();
        let part = Part::bytes(request.audio)
            .file_name(request.file_name)
            .mime_str(mime_type)
            .map_err(|e| CambError::InvalidInput(format!("Invalid MIME type: {e}")))?;
        let form = Form::new().part("file", part).text("language", language);

        let response = self
            .execute(self.post(create_path(TaskKind::Transcription)).multipart(form))
            .await?;
        let body = Self::read_text(response).await?;
        let created: TaskCreated = Self::parse_json(&body)?;

        info!(task_id = %created.task_id, "Transcription submitted");
        Ok(Task::new(created.task_id, TaskKind::Transcription))
    }

    // ---------- Status ----------

    /// Fetch the current run observation of a task
    #[instrument(skip(self))]
    pub async fn run_status(&self, kind: TaskKind, task_id: &TaskId) -> Result<Run, CambError> {
        self.get_json(&status_path(kind, task_id)).await
    }

    // ---------- Results ----------

    /// Fetch the output URLs of a finished dubbing run
    #[instrument(skip(self))]
    pub async fn dubbed_run_info(&self, run_id: RunId) -> Result<DubbedRun, CambError> {
        self.get_json(&result_path(TaskKind::Dubbing, run_id)).await
    }

    /// Fetch the translated texts of a finished translation run
    #[instrument(skip(self))]
    pub async fn translation_result(&self, run_id: RunId) -> Result<Translation, CambError> {
        self.get_json(&result_path(TaskKind::Translation, run_id))
            .await
    }

    /// Fetch the transcript of a finished transcription run
    #[instrument(skip(self))]
    pub async fn transcription_result(&self, run_id: RunId) -> Result<Transcript, CambError> {
        self.get_json(&result_path(TaskKind::Transcription, run_id))
            .await
    }

    /// Stream the audio of a finished TTS run into `tts_stream_{run_id}.wav`
    ///
    /// The directory is created if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the file cannot be written.
    #[instrument(skip(self))]
    pub async fn tts_result(
        &self,
        run_id: RunId,
        output_directory: &Path,
    ) -> Result<TtsAudio, CambError> {
        let response = self
            .execute(self.get(&result_path(TaskKind::Tts, run_id)))
            .await?;

        output::ensure_directory(output_directory).await?;
        let path = output::tts_file_path(output_directory, run_id);
        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| CambError::ConnectionFailed(e.to_string())));
        let size_bytes = output::write_stream(&path, stream).await?;

        info!(path = %path.display(), size_bytes, "TTS audio written");
        Ok(TtsAudio {
            run_id,
            path,
            size_bytes,
        })
    }

    /// Check if the service is reachable with the configured key
    pub async fn is_healthy(&self) -> bool {
        self.execute(self.get("source_languages")).await.is_ok()
    }
}

#[async_trait]
impl TaskStatusSource for HttpCambClient {
    async fn task_status(&self, kind: TaskKind, task_id: &TaskId) -> Result<Run, CambError> {
        self.run_status(kind, task_id).await
    }
}
