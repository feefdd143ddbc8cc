//! Generation orchestrator.
//!
//! This module wires request validation, narration, audio packaging and
//! question generation into one call, and reports progress as it goes.
//!
//! # Architecture
//!
//! ```text
//! GenerationRequest ──▶ QuizPipeline::run() ──▶ QuizSession
//!                              │
//!                              ├─ SpeechSynthesizer  (narrated scripts)
//!                              ├─ audio::pcm_base64_to_wav_data_uri
//!                              ├─ QuizGenerator
//!                              └─ quiz::shuffle_all
//!
//! GenerationStage (mpsc) ◀── published on every transition
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//! use language_quiz::config::AppConfig;
//! use language_quiz::genai::GeminiClient;
//! use language_quiz::pipeline::{GenerationRequest, GenerationStage, QuizPipeline, QuizSource};
//! use language_quiz::quiz::{Difficulty, TestType};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load()?;
//!     let client = Arc::new(GeminiClient::from_config(&config.genai)?);
//!
//!     let (progress_tx, mut progress_rx) = mpsc::channel::<GenerationStage>(16);
//!     tokio::spawn(async move {
//!         while let Some(stage) = progress_rx.recv().await {
//!             println!("{}", stage.label());
//!         }
//!     });
//!
//!     let mut pipeline = QuizPipeline::new(client.clone(), client, config.audio.wav_format())
//!         .with_progress(progress_tx);
//!     let session = pipeline
//!         .run(GenerationRequest {
//!             title: "Bees".into(),
//!             author: String::new(),
//!             test_type: TestType::Reading,
//!             difficulty: Difficulty::Hard,
//!             num_questions: 4,
//!             source: QuizSource::Script("Bees make honey.".into()),
//!         })
//!         .await?;
//!     session.save_to("bees.json".as_ref())?;
//!     Ok(())
//! }
//! ```

pub mod request;
pub mod runner;
pub mod session;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use request::{GenerationRequest, QuizSource, ValidationError, DEFAULT_UPLOAD_MIME};
pub use runner::{PipelineError, QuizPipeline};
pub use session::QuizSession;
pub use state::GenerationStage;
