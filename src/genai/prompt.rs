//! Prompt builder for quiz generation.
//!
//! [`QuizPromptBuilder`] assembles the instruction text sent alongside the
//! content. The wording depends on two things:
//! * the test type (Listening vs. Reading), which names the quiz and adds a
//!   reading-skills rule for reading tests;
//! * whether the content is attached audio or inline text, which decides
//!   whether the text is embedded between content markers.

use crate::genai::service::{QuizContent, QuizParams};
use crate::quiz::{TestType, OPTIONS_PER_QUESTION};

// ---------------------------------------------------------------------------
// Fixed text
// ---------------------------------------------------------------------------

const CONTENT_START: &str = "--- CONTENT START ---";
const CONTENT_END: &str = "--- CONTENT END ---";

const AUDIO_ATTACHED: &str = "The audio content is attached to this request.";

const READING_SKILLS_RULE: &str = "- Since this is a reading test, focus on reading skills like inference, \
vocabulary in context, and main idea identification.";

// ---------------------------------------------------------------------------
// QuizPromptBuilder
// ---------------------------------------------------------------------------

/// Builds quiz-generation prompts.
///
/// # Example
/// ```rust
/// use language_quiz::genai::{QuizContent, QuizParams, QuizPromptBuilder};
/// use language_quiz::quiz::{Difficulty, TestType};
///
/// let params = QuizParams {
///     title: "At the bakery".into(),
///     author: "R. Khan".into(),
///     difficulty: Difficulty::Easy,
///     num_questions: 3,
///     test_type: TestType::Listening,
/// };
/// let prompt = QuizPromptBuilder::new().build(&QuizContent::Text("A: Hello!".into()), &params);
/// assert!(prompt.contains("Listening comprehension quiz"));
/// assert!(prompt.contains("A: Hello!"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct QuizPromptBuilder;

impl QuizPromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the instruction text for `content` under `params`.
    ///
    /// Structure (in order):
    /// 1. Role line naming the test type
    /// 2. Task line naming the content kind
    /// 3. Quiz requirements (title, author, difficulty, count)
    /// 4. Per-question rules (+ reading-skills rule for reading tests)
    /// 5. Delimited text content, or a note that audio is attached
    pub fn build(&self, content: &QuizContent, params: &QuizParams) -> String {
        let is_reading = params.test_type == TestType::Reading;
        let kind = match (content, is_reading) {
            (QuizContent::InlineAudio { .. }, _) => "audio file",
            (QuizContent::Text(_), true) => "reading passage",
            (QuizContent::Text(_), false) => "script",
        };

        let mut prompt = String::with_capacity(1024);
        prompt.push_str(&format!(
            "You are an expert language educator creating a {} comprehension quiz.\n",
            params.test_type
        ));
        prompt.push_str(&format!(
            "Your task is to generate a quiz based on the provided {kind}.\n\n"
        ));

        prompt.push_str("Quiz requirements:\n");
        prompt.push_str(&format!("- Title: \"{}\"\n", params.title));
        prompt.push_str(&format!("- Author: \"{}\"\n", params.author));
        prompt.push_str(&format!("- Difficulty Level: {}\n", params.difficulty));
        prompt.push_str(&format!("- Number of questions: {}\n\n", params.num_questions));

        prompt.push_str("For each question:\n");
        prompt.push_str(&format!(
            "- It must be a multiple-choice question with exactly {OPTIONS_PER_QUESTION} options.\n"
        ));
        prompt.push_str("- One option must be the correct answer.\n");
        prompt.push_str(&format!(
            "- The other {} options must be plausible but incorrect distractors.\n",
            OPTIONS_PER_QUESTION - 1
        ));
        prompt.push_str(
            "- Provide a brief explanation for the correct answer, intended for the teacher's reference.\n",
        );
        prompt.push_str("- The question, options, and explanation must be based directly on the provided content.\n");
        if is_reading {
            prompt.push_str(READING_SKILLS_RULE);
            prompt.push('\n');
        }
        prompt.push('\n');

        match content {
            QuizContent::Text(text) => {
                prompt.push_str(&format!("Here is the {kind} to use:\n"));
                prompt.push_str(CONTENT_START);
                prompt.push('\n');
                prompt.push_str(text);
                prompt.push('\n');
                prompt.push_str(CONTENT_END);
                prompt.push('\n');
            }
            QuizContent::InlineAudio { .. } => {
                prompt.push_str(AUDIO_ATTACHED);
                prompt.push('\n');
            }
        }

        prompt
    }

    /// One-word gender question for a speaker name.
    pub fn name_gender(&self, name: &str) -> String {
        format!(
            "Is the name \"{name}\" typically male or female? \
             Respond with only one word: \"male\", \"female\", or \"unknown\"."
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::Difficulty;

    fn params(test_type: TestType) -> QuizParams {
        QuizParams {
            title: "Trip to Lisbon".into(),
            author: "M. Costa".into(),
            difficulty: Difficulty::Hard,
            num_questions: 7,
            test_type,
        }
    }

    #[test]
    fn listening_script_prompt() {
        let prompt = QuizPromptBuilder::new().build(
            &QuizContent::Text("Guide: Welcome aboard.".into()),
            &params(TestType::Listening),
        );

        assert!(prompt.contains("creating a Listening comprehension quiz"));
        assert!(prompt.contains("based on the provided script."));
        assert!(prompt.contains("- Title: \"Trip to Lisbon\""));
        assert!(prompt.contains("- Author: \"M. Costa\""));
        assert!(prompt.contains("- Difficulty Level: Hard"));
        assert!(prompt.contains("- Number of questions: 7"));
        assert!(prompt.contains("exactly 4 options"));
        assert!(prompt.contains("other 3 options"));
        assert!(prompt.contains("--- CONTENT START ---\nGuide: Welcome aboard.\n--- CONTENT END ---"));
        assert!(!prompt.contains("reading skills"));
        assert!(!prompt.contains("attached"));
    }

    #[test]
    fn reading_passage_prompt() {
        let prompt = QuizPromptBuilder::new().build(
            &QuizContent::Text("Rivers carve valleys.".into()),
            &params(TestType::Reading),
        );

        assert!(prompt.contains("creating a Reading comprehension quiz"));
        assert!(prompt.contains("provided reading passage."));
        assert!(prompt.contains("Here is the reading passage to use:"));
        assert!(prompt.contains("inference, vocabulary in context, and main idea identification"));
    }

    #[test]
    fn audio_prompt_does_not_embed_content() {
        let prompt = QuizPromptBuilder::new().build(
            &QuizContent::InlineAudio {
                mime_type: "audio/mpeg".into(),
                data_base64: "SUQz".into(),
            },
            &params(TestType::Listening),
        );

        assert!(prompt.contains("provided audio file."));
        assert!(prompt.contains(AUDIO_ATTACHED));
        assert!(!prompt.contains(CONTENT_START));
        assert!(!prompt.contains("SUQz"));
    }

    #[test]
    fn gender_prompt_names_the_person() {
        let prompt = QuizPromptBuilder::new().name_gender("Yusuf");
        assert!(prompt.contains("\"Yusuf\""));
        assert!(prompt.contains("\"male\", \"female\", or \"unknown\""));
    }
}
