//! cambai CLI
//!
//! Command-line front end for the Camb AI speech API.

#![allow(clippy::print_stdout)]

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use domain::{Gender, LanguageId, LanguageKind};
use integration_camb::{
    API_KEY_ENV, CambClient, CambConfig, DubbingRequest, HttpCambClient, TranscriptionRequest,
    TranslationRequest, TtsRequest,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// cambai CLI
#[derive(Debug, Parser)]
#[command(name = "cambai-cli")]
#[command(author, version, about = "Camb AI speech API client", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ./cambai.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Camb AI API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Override the API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Delay between status polls in milliseconds
    #[arg(long, global = true)]
    poll_interval_ms: Option<u64>,

    /// Maximum number of status polls per task
    #[arg(long, global = true)]
    max_attempts: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List available voices
    Voices {
        /// Also write the raw listing to voices.json in this directory
        #[arg(short, long)]
        write: Option<PathBuf>,
    },

    /// List source or target languages
    Languages {
        /// Which list to fetch: source or target
        kind: LanguageKind,

        /// Also write the raw listing to {kind}_languages.json in this directory
        #[arg(short, long)]
        write: Option<PathBuf>,
    },

    /// Synthesize speech into tts_stream_{run_id}.wav
    ///
    /// Example: cambai-cli tts "Hello, World!" --voice-id 20303 --age 25
    Tts {
        /// Text to synthesize
        text: String,

        /// Voice from the voice catalogue
        #[arg(long, default_value = "20303")]
        voice_id: u64,

        /// Language id (1-148)
        #[arg(short, long, default_value = "1", value_parser = parse_language)]
        language: LanguageId,

        /// Voice gender: male, female, unknown or not_applicable
        #[arg(short, long, default_value = "male")]
        gender: Gender,

        /// Voice age
        #[arg(long)]
        age: Option<u32>,

        /// Output directory (default: from configuration)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Dub a video into another language
    ///
    /// Example: cambai-cli dub https://youtu.be/jNQXAC9IVRw --target-language 76
    Dub {
        /// Publicly reachable video URL
        video_url: String,

        /// Language to dub into
        #[arg(short, long, value_parser = parse_language)]
        target_language: LanguageId,

        /// Spoken language of the video
        #[arg(short, long, default_value = "1", value_parser = parse_language)]
        source_language: LanguageId,
    },

    /// Translate one or more text segments
    Translate {
        /// Segments to translate
        #[arg(required = true)]
        texts: Vec<String>,

        /// Language to translate into
        #[arg(short, long, value_parser = parse_language)]
        target_language: LanguageId,

        /// Language of the input
        #[arg(short, long, default_value = "1", value_parser = parse_language)]
        source_language: LanguageId,
    },

    /// Transcribe an audio file
    Transcribe {
        /// Audio file to upload
        file: PathBuf,

        /// Spoken language of the audio
        #[arg(short, long, default_value = "1", value_parser = parse_language)]
        language: LanguageId,
    },

    /// Check that the API is reachable with the configured key
    Health,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn parse_language(raw: &str) -> Result<LanguageId, String> {
    let id: u32 = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a language id"))?;
    LanguageId::new(id).map_err(|e| e.to_string())
}

/// Apply command-line overrides on top of the loaded configuration
fn apply_overrides(mut config: CambConfig, cli: &Cli) -> CambConfig {
    config = config.with_env_api_key();
    if let Some(api_key) = &cli.api_key {
        config = config.with_api_key(api_key.clone());
    }
    if let Some(base_url) = &cli.base_url {
        config.base_url.clone_from(base_url);
    }
    if let Some(interval) = cli.poll_interval_ms {
        config.poll_interval_ms = interval;
    }
    if let Some(max_attempts) = cli.max_attempts {
        config.max_attempts = max_attempts;
    }
    config
}

async fn read_audio(file: &Path) -> anyhow::Result<(Vec<u8>, String)> {
    let audio = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let file_name = file
        .file_name()
        .map_or_else(|| "audio".to_string(), |n| n.to_string_lossy().into_owned());
    Ok((audio, file_name))
}

#[tokio::main]
#[allow(clippy::too_many_lines)]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CambConfig::load_from(cli.config.as_deref()).context("Failed to load configuration")?;
    let config = apply_overrides(config, &cli);
    tracing::debug!(?config, "Configuration loaded");
    let client = HttpCambClient::new(config)?;

    match cli.command {
        Commands::Voices { write } => {
            let voices = match write {
                Some(directory) => {
                    let voices = client.save_voices(&directory).await?;
                    println!("📁 Wrote {}", directory.join("voices.json").display());
                    voices
                },
                None => client.voices().await?,
            };

            println!("🎙️  {} voices:", voices.len());
            for voice in &voices {
                println!("   {:>8}  {}", voice.id, voice.voice_name);
            }
        },

        Commands::Languages { kind, write } => {
            let languages = match write {
                Some(directory) => {
                    let languages = client.save_languages(kind, &directory).await?;
                    println!(
                        "📁 Wrote {}",
                        directory.join(format!("{kind}_languages.json")).display()
                    );
                    languages
                },
                None => client.languages(kind).await?,
            };

            println!("🌐 {} {kind} languages:", languages.len());
            for language in &languages {
                println!(
                    "   {:>4}  {:<8} {}",
                    language.id, language.short_name, language.language
                );
            }
        },

        Commands::Tts {
            text,
            voice_id,
            language,
            gender,
            age,
            output,
        } => {
            let mut request = TtsRequest::new(text, voice_id, language, gender);
            if let Some(age) = age {
                request = request.with_age(age);
            }

            println!("🗣️  Synthesizing speech...");
            let audio = client.tts(&request, output.as_deref()).await?;
            println!("✅ TTS finished (run {})", audio.run_id);
            println!("   📁 File: {}", audio.path.display());
            println!("   📊 Size: {} bytes", audio.size_bytes);
        },

        Commands::Dub {
            video_url,
            target_language,
            source_language,
        } => {
            let request =
                DubbingRequest::new(video_url, target_language).with_source_language(source_language);

            println!("🎬 Dubbing {}...", request.video_url);
            let dubbed = client.dub(&request).await?;
            println!("✅ Dubbing finished");
            println!("   🎞️  Video: {}", dubbed.video_url);
            println!("   🔊 Audio: {}", dubbed.audio_url);
        },

        Commands::Translate {
            texts,
            target_language,
            source_language,
        } => {
            let request = TranslationRequest::new(source_language, target_language, texts);
            let translation = client.translate(&request).await?;
            println!("{}", translation.joined());
        },

        Commands::Transcribe { file, language } => {
            let (audio, file_name) = read_audio(&file).await?;
            let request = TranscriptionRequest::new(audio, file_name, language);

            println!("📝 Transcribing {}...", file.display());
            let transcript = client.transcribe(request).await?;
            for segment in &transcript.segments {
                println!(
                    "[{:>7.2} - {:>7.2}] {}",
                    segment.start, segment.end, segment.text
                );
            }
        },

        Commands::Health => {
            if CambClient::is_healthy(&client).await {
                println!("✅ Healthy");
            } else {
                println!("❌ Unhealthy");
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
