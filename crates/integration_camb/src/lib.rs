//! Camb AI integration for cambai
//!
//! Client for the [Camb AI](https://camb.ai) speech API: text-to-speech,
//! end-to-end dubbing, translation and transcription. Every job runs
//! asynchronously on the service: it is submitted, polled until a terminal
//! status, and its result artifact is fetched once after SUCCESS.
//!
//! # Architecture
//!
//! [`HttpCambClient`] exposes one method per REST endpoint. The
//! submit-poll-fetch workflows are defined by the [`CambClient`] trait,
//! and the polling loop itself ([`poll_until_complete`]) only depends on
//! the [`TaskStatusSource`] port.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::{Gender, LanguageId};
//! use integration_camb::{CambClient, CambConfig, HttpCambClient, TtsRequest};
//!
//! let client = HttpCambClient::new(CambConfig::load()?)?;
//!
//! let request = TtsRequest::new("Hello, World!", 20303, LanguageId::ENGLISH_US, Gender::Male)
//!     .with_age(25);
//! let audio = client.tts(&request, None).await?;
//! println!("Wrote {}", audio.path.display());
//! ```

mod client;
mod config;
mod error;
mod models;
pub mod output;
mod poller;
mod workflows;

pub use client::HttpCambClient;
pub use config::{API_KEY_ENV, CambConfig, PollSettings};
pub use error::CambError;
pub use models::{DubbingRequest, TranscriptionRequest, TranslationRequest, TtsRequest};
pub use poller::{TaskStatusSource, poll_until_complete};
pub use workflows::CambClient;
