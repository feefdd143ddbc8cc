//! Pipeline orchestrator: drives one request from source content to an
//! editable quiz session.
//!
//! # Pipeline flow
//!
//! ```text
//! GenerationRequest
//!   └─▶ validate
//!         ├─ Narrated  → speech.synthesize        [SynthesizingAudio]
//!         │              └─▶ pack PCM as WAV URI  [ConvertingAudio]
//!         ├─ AudioFile → base64 + data URI        [ProcessingUpload]
//!         └─ Script    → (as-is)
//!   └─▶ generator.generate_quiz                   [GeneratingQuestions]
//!   └─▶ shuffle options, assign ids               [Editing]
//! ```
//!
//! Any failure publishes `Error` followed by `Input`; nothing from the failed
//! attempt is kept.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::audio::{self, codec, AudioError, WavFormat};
use crate::genai::{GenAiError, GeneratedQuiz, QuizContent, QuizGenerator, QuizParams, SpeechSynthesizer};
use crate::quiz::{shuffle_all, Question, Quiz, TestType};

use super::request::{GenerationRequest, QuizSource, ValidationError, DEFAULT_UPLOAD_MIME};
use super::session::QuizSession;
use super::state::GenerationStage;

// ---------------------------------------------------------------------------
// PipelineError
// ---------------------------------------------------------------------------

/// Errors that can end a generation attempt.
///
/// The `Display` form is the one message shown to the educator.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to generate quiz: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to generate quiz: {0}")]
    Speech(GenAiError),

    #[error("Failed to generate quiz: {0}")]
    Audio(#[from] AudioError),

    #[error("Failed to generate quiz: {0}")]
    Generation(GenAiError),
}

// ---------------------------------------------------------------------------
// QuizPipeline
// ---------------------------------------------------------------------------

/// Runs generation requests against the injected collaborators.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use language_quiz::config::AppConfig;
/// use language_quiz::genai::GeminiClient;
/// use language_quiz::pipeline::{GenerationRequest, QuizPipeline, QuizSource};
/// use language_quiz::quiz::{Difficulty, TestType};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = AppConfig::load()?;
/// let client = Arc::new(GeminiClient::from_config(&config.genai)?);
/// let mut pipeline = QuizPipeline::new(client.clone(), client, config.audio.wav_format());
///
/// let session = pipeline
///     .run(GenerationRequest {
///         title: "Unit 5".into(),
///         author: String::new(),
///         test_type: TestType::Listening,
///         difficulty: Difficulty::Easy,
///         num_questions: 3,
///         source: QuizSource::Script("A: Hello!\nB: Hi there.".into()),
///     })
///     .await?;
/// println!("{}", session.quiz.title);
/// # Ok(())
/// # }
/// ```
pub struct QuizPipeline {
    generator: Arc<dyn QuizGenerator>,
    speech: Arc<dyn SpeechSynthesizer>,
    audio_format: WavFormat,
    rng: StdRng,
    progress: Option<mpsc::Sender<GenerationStage>>,
}

impl QuizPipeline {
    /// Create a pipeline.
    ///
    /// # Arguments
    ///
    /// * `generator`   : writes the questions (e.g. `GeminiClient`).
    /// * `speech`      : narrates scripts (e.g. `GeminiClient`).
    /// * `audio_format`: the PCM format `speech` returns.
    pub fn new(generator: Arc<dyn QuizGenerator>, speech: Arc<dyn SpeechSynthesizer>, audio_format: WavFormat) -> Self {
        Self {
            generator,
            speech,
            audio_format,
            rng: StdRng::from_entropy(),
            progress: None,
        }
    }

    /// Replace the shuffle RNG, e.g. with a seeded one.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Publish stage changes on `tx`.
    pub fn with_progress(mut self, tx: mpsc::Sender<GenerationStage>) -> Self {
        self.progress = Some(tx);
        self
    }

    // -----------------------------------------------------------------------
    // Main entry point
    // -----------------------------------------------------------------------

    /// Run one request to completion.
    pub async fn run(&mut self, request: GenerationRequest) -> Result<QuizSession, PipelineError> {
        match self.generate(request).await {
            Ok(session) => {
                self.publish(GenerationStage::Editing).await;
                Ok(session)
            }
            Err(e) => {
                log::error!("pipeline error: {e}");
                self.publish(GenerationStage::Error).await;
                self.publish(GenerationStage::Input).await;
                Err(e)
            }
        }
    }

    async fn generate(&mut self, request: GenerationRequest) -> Result<QuizSession, PipelineError> {
        request.validate()?;

        let GenerationRequest {
            title,
            author,
            test_type,
            difficulty,
            num_questions,
            source,
        } = request;

        let (content, audio_data_uri) = self.prepare_content(source).await?;
        let passage = match (&content, test_type) {
            (QuizContent::Text(text), TestType::Reading) => Some(text.clone()),
            _ => None,
        };

        self.publish(GenerationStage::GeneratingQuestions).await;
        let params = QuizParams {
            title,
            author,
            difficulty,
            num_questions,
            test_type,
        };
        let generated = self
            .generator
            .generate_quiz(&content, &params)
            .await
            .map_err(PipelineError::Generation)?;

        let quiz = self.finalize(generated, params, passage);
        log::info!("pipeline: generated {} question(s) for {:?}", quiz.questions.len(), quiz.title);
        Ok(QuizSession::new(quiz, audio_data_uri))
    }

    /// Turn the source into request content plus the audio to embed, if any.
    async fn prepare_content(&self, source: QuizSource) -> Result<(QuizContent, Option<String>), PipelineError> {
        match source {
            QuizSource::Script(text) => Ok((QuizContent::Text(text), None)),

            QuizSource::Narrated { script, speakers } => {
                self.publish(GenerationStage::SynthesizingAudio).await;
                let pcm_base64 = self
                    .speech
                    .synthesize(&script, &speakers)
                    .await
                    .map_err(PipelineError::Speech)?;

                self.publish(GenerationStage::ConvertingAudio).await;
                let uri = audio::pcm_base64_to_wav_data_uri(&pcm_base64, &self.audio_format)?;
                Ok((QuizContent::Text(script), Some(uri)))
            }

            QuizSource::AudioFile { bytes, mime_type } => {
                self.publish(GenerationStage::ProcessingUpload).await;
                let mime_type = mime_type
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_UPLOAD_MIME.to_string());
                log::debug!("pipeline: upload is {} bytes ({mime_type})", bytes.len());

                let uri = codec::to_data_uri(&mime_type, &bytes);
                let content = QuizContent::InlineAudio {
                    mime_type,
                    data_base64: codec::encode(&bytes),
                };
                Ok((content, Some(uri)))
            }
        }
    }

    /// Shuffle options, assign ids and fill in what the model may leave blank.
    fn finalize(&mut self, generated: GeneratedQuiz, params: QuizParams, passage: Option<String>) -> Quiz {
        let questions: Vec<Question> = generated
            .questions
            .into_iter()
            .map(|q| {
                let question = Question {
                    id: Uuid::new_v4().to_string(),
                    question_text: q.question_text,
                    options: q.options,
                    correct_answer_index: q.correct_answer_index,
                    explanation: q.explanation,
                };
                if !question.is_well_formed() {
                    log::warn!(
                        "pipeline: question {:?} has {} option(s), answer index {}",
                        question.question_text,
                        question.options.len(),
                        question.correct_answer_index
                    );
                }
                question
            })
            .collect();
        let questions = shuffle_all(questions, &mut self.rng);

        Quiz {
            title: non_blank_or(generated.title, params.title),
            author: non_blank_or(generated.author, params.author),
            questions,
            test_type: params.test_type,
            passage,
        }
    }

    async fn publish(&self, stage: GenerationStage) {
        log::info!("pipeline: {}", stage.label());
        if let Some(tx) = &self.progress {
            // A dropped receiver only means nobody is watching.
            let _ = tx.send(stage).await;
        }
    }
}

fn non_blank_or(preferred: String, fallback: String) -> String {
    if preferred.trim().is_empty() {
        fallback
    } else {
        preferred
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
