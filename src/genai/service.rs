//! Collaborator traits for the generative API and the errors they return.
//!
//! The pipeline only ever talks to these traits, so tests drive it with
//! in-process doubles and production wires in [`GeminiClient`](crate::genai::GeminiClient).

use async_trait::async_trait;
use thiserror::Error;

use crate::genai::wire::GeneratedQuiz;
use crate::quiz::{Difficulty, TestType};
use crate::speech::SpeakerConfig;

// ---------------------------------------------------------------------------
// GenAiError
// ---------------------------------------------------------------------------

/// Errors that can occur while calling the generative API.
#[derive(Debug, Error)]
pub enum GenAiError {
    /// No API key in the config file or the environment.
    #[error("no API key configured (set genai.api_key or GEMINI_API_KEY)")]
    MissingApiKey,

    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The API answered with a non-success status.
    #[error("API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body or the model's JSON answer could not be parsed.
    #[error("failed to parse API response: {0}")]
    Parse(String),

    /// The response carried no text part.
    #[error("API returned an empty response")]
    EmptyResponse,

    /// The speech response carried no inline audio.
    #[error("Failed to generate audio. No audio data received from API.")]
    MissingAudio,
}

impl From<reqwest::Error> for GenAiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GenAiError::Timeout
        } else {
            GenAiError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Request inputs
// ---------------------------------------------------------------------------

/// Source material the questions are written from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizContent {
    /// A listening script or a reading passage.
    Text(String),
    /// Uploaded audio sent inline.
    InlineAudio { mime_type: String, data_base64: String },
}

/// Instructions that accompany the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizParams {
    pub title: String,
    pub author: String,
    pub difficulty: Difficulty,
    pub num_questions: u32,
    pub test_type: TestType,
}

/// Answer to "is this name typically male or female?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameGender {
    Male,
    Female,
    Unknown,
}

impl NameGender {
    /// Interpret a one-word model reply. Anything but `male`/`female` is unknown.
    pub fn from_reply(reply: &str) -> Self {
        match reply.trim().trim_matches(|c: char| c == '"' || c == '.').to_lowercase().as_str() {
            "male" => NameGender::Male,
            "female" => NameGender::Female,
            _ => NameGender::Unknown,
        }
    }
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Writes multiple-choice questions from source content.
///
/// The returned quiz is the model's raw answer: options are in the order the
/// model chose and question ids are not yet assigned.
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    async fn generate_quiz(&self, content: &QuizContent, params: &QuizParams) -> Result<GeneratedQuiz, GenAiError>;
}

/// Turns a narration script into base64-encoded raw PCM.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, script: &str, speakers: &SpeakerConfig) -> Result<String, GenAiError>;
}

/// Guesses the usual gender of a first name.
#[async_trait]
pub trait GenderClassifier: Send + Sync {
    async fn classify_name(&self, name: &str) -> Result<NameGender, GenAiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_parsing_is_lenient_about_case_and_punctuation() {
        assert_eq!(NameGender::from_reply("Male"), NameGender::Male);
        assert_eq!(NameGender::from_reply("  female.\n"), NameGender::Female);
        assert_eq!(NameGender::from_reply("\"male\""), NameGender::Male);
        assert_eq!(NameGender::from_reply("unknown"), NameGender::Unknown);
        assert_eq!(NameGender::from_reply("It is probably male"), NameGender::Unknown);
    }

    #[test]
    fn missing_audio_message_is_user_facing() {
        assert_eq!(
            GenAiError::MissingAudio.to_string(),
            "Failed to generate audio. No audio data received from API."
        );
    }
}
