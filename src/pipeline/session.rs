//! The result of a generation attempt, persisted between CLI invocations.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::quiz::Quiz;

/// A quiz plus the audio that goes with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSession {
    pub quiz: Quiz,
    /// Listening audio as a `data:` URI, ready to embed in the export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_data_uri: Option<String>,
}

impl QuizSession {
    pub fn new(quiz: Quiz, audio_data_uri: Option<String>) -> Self {
        Self { quiz, audio_data_uri }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading session {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("parsing session {}", path.display()))
    }

    /// Write pretty JSON, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("writing session {}", path.display()))?;
        Ok(())
    }
}
