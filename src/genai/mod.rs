//! Generative-API boundary.
//!
//! This module provides:
//! * [`QuizGenerator`], [`SpeechSynthesizer`], [`GenderClassifier`]: async
//!   traits the pipeline depends on.
//! * [`GeminiClient`]: the REST implementation of all three, constructed
//!   once from [`GenAiConfig`](crate::config::GenAiConfig).
//! * [`QuizPromptBuilder`]: builds the quiz instructions.
//! * [`wire`]: request/response JSON shapes.
//! * [`GenAiError`]: error variants for API calls.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use language_quiz::config::AppConfig;
//! use language_quiz::genai::{GeminiClient, QuizContent, QuizGenerator, QuizParams};
//! use language_quiz::quiz::{Difficulty, TestType};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::load().unwrap();
//!     let client = Arc::new(GeminiClient::from_config(&config.genai).unwrap());
//!
//!     let params = QuizParams {
//!         title: "Unit 5".into(),
//!         author: String::new(),
//!         difficulty: Difficulty::Medium,
//!         num_questions: 5,
//!         test_type: TestType::Reading,
//!     };
//!     let raw = client
//!         .generate_quiz(&QuizContent::Text("Bees make honey.".into()), &params)
//!         .await
//!         .unwrap();
//!     println!("{} questions", raw.questions.len());
//! }
//! ```

pub mod client;
pub mod prompt;
pub mod service;
pub mod wire;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{parse_generated_quiz, GeminiClient};
pub use prompt::QuizPromptBuilder;
pub use service::{
    GenAiError, GenderClassifier, NameGender, QuizContent, QuizGenerator, QuizParams, SpeechSynthesizer,
};
pub use wire::{GeneratedQuestion, GeneratedQuiz};
