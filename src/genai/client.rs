//! `GeminiClient`, the one HTTP client for every generative-API call.
//!
//! Built once at startup from [`GenAiConfig`] and shared behind an `Arc`; it
//! implements [`QuizGenerator`], [`SpeechSynthesizer`] and
//! [`GenderClassifier`]. All connection details come from the config;
//! nothing is read from globals after construction.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::GenAiConfig;
use crate::genai::prompt::QuizPromptBuilder;
use crate::genai::service::{
    GenAiError, GenderClassifier, NameGender, QuizContent, QuizGenerator, QuizParams, SpeechSynthesizer,
};
use crate::genai::wire::{
    ErrorEnvelope, GenerateContentRequest, GenerateContentResponse, GeneratedQuiz, GenerationConfig, Part,
};
use crate::speech::SpeakerConfig;

/// Calls the `models/{model}:generateContent` REST endpoint.
pub struct GeminiClient {
    client: reqwest::Client,
    config: GenAiConfig,
    api_key: String,
    prompt_builder: QuizPromptBuilder,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.config.base_url)
            .field("quiz_model", &self.config.quiz_model)
            .field("speech_model", &self.config.speech_model)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Build a client from config, resolving the API key from the config
    /// file or the environment.
    ///
    /// # Errors
    ///
    /// [`GenAiError::MissingApiKey`] when no key is available.
    pub fn from_config(config: &GenAiConfig) -> Result<Self, GenAiError> {
        let api_key = config.resolved_api_key().ok_or(GenAiError::MissingApiKey)?;
        Ok(Self::with_api_key(config, api_key))
    }

    /// Build a client with an explicit key.
    ///
    /// The HTTP client carries the per-request timeout from
    /// `config.timeout_secs`; a default client is used if the builder fails.
    pub fn with_api_key(config: &GenAiConfig, api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
            api_key: api_key.into(),
            prompt_builder: QuizPromptBuilder::new(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenAiError> {
        let url = self.endpoint(model);
        log::debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenAiError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GenAiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl QuizGenerator for GeminiClient {
    async fn generate_quiz(&self, content: &QuizContent, params: &QuizParams) -> Result<GeneratedQuiz, GenAiError> {
        let mut parts = vec![Part::text(self.prompt_builder.build(content, params))];
        if let QuizContent::InlineAudio { mime_type, data_base64 } = content {
            parts.push(Part::inline(mime_type.as_str(), data_base64.as_str()));
        }

        let request = GenerateContentRequest::new(parts).with_config(GenerationConfig::quiz_json());
        let response = self.generate_content(&self.config.quiz_model, &request).await?;
        let text = response.text().ok_or(GenAiError::EmptyResponse)?;

        parse_generated_quiz(&text)
    }
}

#[async_trait]
impl SpeechSynthesizer for GeminiClient {
    async fn synthesize(&self, script: &str, speakers: &SpeakerConfig) -> Result<String, GenAiError> {
        let request =
            GenerateContentRequest::new(vec![Part::text(script)]).with_config(GenerationConfig::speech(speakers));
        let response = self.generate_content(&self.config.speech_model, &request).await?;

        let audio = response.inline_data().ok_or(GenAiError::MissingAudio)?;
        if audio.data.is_empty() {
            return Err(GenAiError::MissingAudio);
        }
        log::debug!("speech payload: {} base64 chars ({})", audio.data.len(), audio.mime_type);
        Ok(audio.data.clone())
    }
}

#[async_trait]
impl GenderClassifier for GeminiClient {
    async fn classify_name(&self, name: &str) -> Result<NameGender, GenAiError> {
        let request = GenerateContentRequest::new(vec![Part::text(self.prompt_builder.name_gender(name))]);
        let response = self.generate_content(&self.config.quiz_model, &request).await?;
        let reply = response.text().ok_or(GenAiError::EmptyResponse)?;
        Ok(NameGender::from_reply(&reply))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse the model's JSON answer, tolerating a surrounding Markdown code fence.
pub fn parse_generated_quiz(text: &str) -> Result<GeneratedQuiz, GenAiError> {
    serde_json::from_str(strip_code_fence(text)).map_err(|e| GenAiError::Parse(e.to_string()))
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an info string such as `json` on the opening line.
    let body = rest.split_once('\n').map(|(_, b)| b).unwrap_or(rest);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Pull `error.message` out of an error body, or fall back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.trim().to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
