//! Generation stage machine.
//!
//! [`GenerationStage`] is what the orchestrator reports while it works; the
//! front end shows [`GenerationStage::label`] as the progress message.

/// States of one generation attempt.
///
/// The transitions are:
///
/// ```text
/// Input ──narrated script──▶ SynthesizingAudio ──▶ ConvertingAudio ──▶ GeneratingQuestions
///       ──audio file───────▶ ProcessingUpload ─────────────────────▶ GeneratingQuestions
///       ──text─────────────────────────────────────────────────────▶ GeneratingQuestions
/// GeneratingQuestions ──▶ Editing
/// any state ──error──▶ Error ──start over──▶ Input
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationStage {
    /// Collecting title, content and options.
    #[default]
    Input,

    /// Narration is being synthesized from the script.
    SynthesizingAudio,

    /// Synthesized PCM is being wrapped as WAV.
    ConvertingAudio,

    /// An uploaded audio file is being encoded for the request.
    ProcessingUpload,

    /// The question generator is running.
    GeneratingQuestions,

    /// The quiz is ready to review, edit and export.
    Editing,

    /// The attempt failed; the next attempt starts from `Input`.
    Error,
}

impl GenerationStage {
    /// Returns `true` while an API call or conversion is in flight.
    ///
    /// ```
    /// use language_quiz::pipeline::GenerationStage;
    ///
    /// assert!(!GenerationStage::Input.is_busy());
    /// assert!(GenerationStage::SynthesizingAudio.is_busy());
    /// assert!(GenerationStage::GeneratingQuestions.is_busy());
    /// assert!(!GenerationStage::Editing.is_busy());
    /// assert!(!GenerationStage::Error.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            GenerationStage::SynthesizingAudio
                | GenerationStage::ConvertingAudio
                | GenerationStage::ProcessingUpload
                | GenerationStage::GeneratingQuestions
        )
    }

    /// Progress message for the stage.
    pub fn label(&self) -> &'static str {
        match self {
            GenerationStage::Input => "Waiting for input",
            GenerationStage::SynthesizingAudio => "Generating audio from script...",
            GenerationStage::ConvertingAudio => "Converting audio to WAV format...",
            GenerationStage::ProcessingUpload => "Processing uploaded audio...",
            GenerationStage::GeneratingQuestions => "Generating quiz questions...",
            GenerationStage::Editing => "Quiz generated successfully",
            GenerationStage::Error => "Generation failed",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stage_is_input() {
        assert_eq!(GenerationStage::default(), GenerationStage::Input);
    }

    #[test]
    fn conversion_stages_are_busy() {
        assert!(GenerationStage::ConvertingAudio.is_busy());
        assert!(GenerationStage::ProcessingUpload.is_busy());
    }

    #[test]
    fn labels_match_progress_messages() {
        assert_eq!(GenerationStage::SynthesizingAudio.label(), "Generating audio from script...");
        assert_eq!(GenerationStage::ConvertingAudio.label(), "Converting audio to WAV format...");
        assert_eq!(GenerationStage::ProcessingUpload.label(), "Processing uploaded audio...");
        assert_eq!(GenerationStage::GeneratingQuestions.label(), "Generating quiz questions...");
    }
}
