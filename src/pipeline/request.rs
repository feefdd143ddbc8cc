//! What the educator asks for, and the checks it must pass before any API call.

use thiserror::Error;

use crate::quiz::{Difficulty, TestType};
use crate::speech::SpeakerConfig;

/// MIME type assumed for uploads whose type could not be determined.
pub const DEFAULT_UPLOAD_MIME: &str = "audio/mp3";

/// Where the quiz content comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizSource {
    /// A listening script or reading passage used as-is.
    Script(String),
    /// A script that is narrated first; the narration becomes the quiz audio.
    Narrated { script: String, speakers: SpeakerConfig },
    /// A pre-recorded audio file.
    AudioFile { bytes: Vec<u8>, mime_type: Option<String> },
}

/// One generation attempt's inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub title: String,
    pub author: String,
    pub test_type: TestType,
    pub difficulty: Difficulty,
    pub num_questions: u32,
    pub source: QuizSource,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("a test title is required")]
    MissingTitle,

    #[error("the script is empty")]
    EmptyScript,

    #[error("both speakers need a name for dialogue narration")]
    MissingSpeakerName,

    #[error("the audio file is empty")]
    EmptyAudio,

    #[error("at least one question is required")]
    NoQuestions,

    #[error("reading tests are generated from a text passage only")]
    ReadingRequiresText,
}

impl GenerationRequest {
    /// Check the request is complete enough to send.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.num_questions == 0 {
            return Err(ValidationError::NoQuestions);
        }
        if self.test_type == TestType::Reading && !matches!(self.source, QuizSource::Script(_)) {
            return Err(ValidationError::ReadingRequiresText);
        }

        match &self.source {
            QuizSource::Script(script) => {
                if script.trim().is_empty() {
                    return Err(ValidationError::EmptyScript);
                }
            }
            QuizSource::Narrated { script, speakers } => {
                if script.trim().is_empty() {
                    return Err(ValidationError::EmptyScript);
                }
                if let SpeakerConfig::Multi { speakers } = speakers {
                    if speakers.iter().any(|s| s.name.trim().is_empty()) {
                        return Err(ValidationError::MissingSpeakerName);
                    }
                }
            }
            QuizSource::AudioFile { bytes, .. } => {
                if bytes.is_empty() {
                    return Err(ValidationError::EmptyAudio);
                }
            }
        }
        Ok(())
    }
}
