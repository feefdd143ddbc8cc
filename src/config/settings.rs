//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files. Every section is
//! `#[serde(default)]`, so a partial `settings.toml` fills the gaps with
//! defaults.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::audio::WavFormat;
use crate::export::DEFAULT_STYLESHEET_URL;
use crate::quiz::{Difficulty, TestType};
use crate::speech::TtsVoice;

/// Environment variables consulted, in order, when `genai.api_key` is unset.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

// ---------------------------------------------------------------------------
// GenAiConfig
// ---------------------------------------------------------------------------

/// Connection settings for the generative API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenAiConfig {
    /// Base URL of the API, without a trailing path.
    pub base_url: String,
    /// API key. `None` falls back to [`API_KEY_ENV_VARS`].
    pub api_key: Option<String>,
    /// Model that writes the quiz questions.
    pub quiz_model: String,
    /// Model that synthesizes narration audio.
    pub speech_model: String,
    /// Maximum seconds to wait for one API response.
    pub timeout_secs: u64,
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".into(),
            api_key: None,
            quiz_model: "gemini-2.5-flash".into(),
            speech_model: "gemini-2.5-flash-preview-tts".into(),
            timeout_secs: 120,
        }
    }
}

impl GenAiConfig {
    /// The configured key, or the first non-empty key found in the environment.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                API_KEY_ENV_VARS
                    .iter()
                    .filter_map(|var| std::env::var(var).ok())
                    .find(|k| !k.trim().is_empty())
            })
    }
}

// ---------------------------------------------------------------------------
// AudioConfig
// ---------------------------------------------------------------------------

/// Layout of the raw PCM returned by the speech model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl Default for AudioConfig {
    fn default() -> Self {
        let f = WavFormat::SPEECH;
        Self {
            sample_rate: f.sample_rate,
            channels: f.channels,
            bits_per_sample: f.bits_per_sample,
        }
    }
}

impl AudioConfig {
    pub fn wav_format(&self) -> WavFormat {
        WavFormat::new(self.sample_rate, self.channels, self.bits_per_sample)
    }
}

// ---------------------------------------------------------------------------
// GenerationConfig
// ---------------------------------------------------------------------------

/// Defaults for a new quiz when the command line does not say otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub num_questions: u32,
    pub difficulty: Difficulty,
    pub test_type: TestType,
    /// Narrator voice for single-speaker synthesis.
    pub default_voice: TtsVoice,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            num_questions: 5,
            difficulty: Difficulty::default(),
            test_type: TestType::default(),
            default_voice: TtsVoice::Kore,
        }
    }
}

// ---------------------------------------------------------------------------
// ExportConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// CSS toolkit script referenced by exported pages.
    pub stylesheet_url: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            stylesheet_url: DEFAULT_STYLESHEET_URL.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use language_quiz::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub genai: GenAiConfig,
    pub audio: AudioConfig,
    pub generation: GenerationConfig,
    pub export: ExportConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.genai.base_url, loaded.genai.base_url);
        assert_eq!(original.genai.api_key, loaded.genai.api_key);
        assert_eq!(original.genai.quiz_model, loaded.genai.quiz_model);
        assert_eq!(original.genai.speech_model, loaded.genai.speech_model);
        assert_eq!(original.genai.timeout_secs, loaded.genai.timeout_secs);

        assert_eq!(original.audio.wav_format(), loaded.audio.wav_format());

        assert_eq!(original.generation.num_questions, loaded.generation.num_questions);
        assert_eq!(original.generation.difficulty, loaded.generation.difficulty);
        assert_eq!(original.generation.test_type, loaded.generation.test_type);
        assert_eq!(original.generation.default_voice, loaded.generation.default_voice);

        assert_eq!(original.export.stylesheet_url, loaded.export.stylesheet_url);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        assert_eq!(config.genai.quiz_model, "gemini-2.5-flash");
        assert_eq!(config.generation.num_questions, 5);
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.genai.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(cfg.genai.speech_model, "gemini-2.5-flash-preview-tts");
        assert_eq!(cfg.genai.timeout_secs, 120);
        assert!(cfg.genai.api_key.is_none());
        assert_eq!(cfg.audio.wav_format(), WavFormat::new(24_000, 1, 16));
        assert_eq!(cfg.generation.difficulty, Difficulty::Medium);
        assert_eq!(cfg.generation.test_type, TestType::Listening);
        assert_eq!(cfg.generation.default_voice, TtsVoice::Kore);
        assert_eq!(cfg.export.stylesheet_url, "https://cdn.tailwindcss.com");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("partial.toml");
        std::fs::write(
            &path,
            "[genai]\napi_key = \"k-123\"\n\n[generation]\nnum_questions = 8\ndifficulty = \"Hard\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path).expect("load");
        assert_eq!(cfg.genai.api_key.as_deref(), Some("k-123"));
        assert_eq!(cfg.genai.quiz_model, "gemini-2.5-flash");
        assert_eq!(cfg.generation.num_questions, 8);
        assert_eq!(cfg.generation.difficulty, Difficulty::Hard);
        assert_eq!(cfg.generation.test_type, TestType::Listening);
        assert_eq!(cfg.audio.sample_rate, 24_000);
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.genai.base_url = "http://localhost:8080".into();
        cfg.genai.timeout_secs = 30;
        cfg.audio.sample_rate = 16_000;
        cfg.generation.test_type = TestType::Reading;
        cfg.generation.default_voice = TtsVoice::Fenrir;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.genai.base_url, "http://localhost:8080");
        assert_eq!(loaded.genai.timeout_secs, 30);
        assert_eq!(loaded.audio.sample_rate, 16_000);
        assert_eq!(loaded.generation.test_type, TestType::Reading);
        assert_eq!(loaded.generation.default_voice, TtsVoice::Fenrir);
    }

    #[test]
    fn configured_key_wins_over_environment() {
        let cfg = GenAiConfig {
            api_key: Some("from-file".into()),
            ..GenAiConfig::default()
        };
        assert_eq!(cfg.resolved_api_key().as_deref(), Some("from-file"));
    }
}
