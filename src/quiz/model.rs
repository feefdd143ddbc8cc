//! Quiz data model.
//!
//! Field names serialize in camelCase because the same JSON is embedded in
//! the exported page and read back by its grading script.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Options every generated question is asked to carry.
pub const OPTIONS_PER_QUESTION: usize = 4;

// ---------------------------------------------------------------------------
// TestType / Difficulty
// ---------------------------------------------------------------------------

/// Which comprehension skill a quiz tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TestType {
    #[default]
    Listening,
    Reading,
}

impl TestType {
    pub fn label(&self) -> &'static str {
        match self {
            TestType::Listening => "Listening",
            TestType::Reading => "Reading",
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "listening" => Ok(TestType::Listening),
            "reading" => Ok(TestType::Reading),
            other => Err(format!("unknown test type `{other}` (expected listening or reading)")),
        }
    }
}

/// Difficulty level passed through to the question generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty `{other}` (expected easy, medium or hard)")),
        }
    }
}

// ---------------------------------------------------------------------------
// Question
// ---------------------------------------------------------------------------

/// One multiple-choice question.
///
/// `options` is normally exactly [`OPTIONS_PER_QUESTION`] long, but generator
/// output is carried through as-is, so consumers must not index blindly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer_index: usize,
    pub explanation: String,
}

impl Question {
    /// Text of the option marked correct, if the index is in range.
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_answer_index).map(String::as_str)
    }

    /// `true` when the question has the expected option count and a valid answer.
    pub fn is_well_formed(&self) -> bool {
        self.options.len() == OPTIONS_PER_QUESTION && self.correct_option().is_some()
    }
}

// ---------------------------------------------------------------------------
// Quiz
// ---------------------------------------------------------------------------

/// A generated (and possibly edited) quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub title: String,
    /// Empty when no author was given.
    #[serde(default)]
    pub author: String,
    pub questions: Vec<Question>,
    pub test_type: TestType,
    /// Reading passage; only set for reading quizzes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passage: Option<String>,
}

impl Quiz {
    pub fn question_mut(&mut self, id: &str) -> Option<&mut Question> {
        self.questions.iter_mut().find(|q| q.id == id)
    }

    pub fn has_author(&self) -> bool {
        !self.author.trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_question() -> Question {
        Question {
            id: "q1".into(),
            question_text: "Where does the speaker live?".into(),
            options: vec!["Cairo".into(), "Paris".into(), "Lima".into(), "Oslo".into()],
            correct_answer_index: 1,
            explanation: "Stated in the first line.".into(),
        }
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let quiz = Quiz {
            title: "Unit 1".into(),
            author: String::new(),
            questions: vec![sample_question()],
            test_type: TestType::Listening,
            passage: None,
        };
        let json = serde_json::to_value(&quiz).unwrap();

        assert_eq!(json["testType"], "Listening");
        assert_eq!(json["questions"][0]["questionText"], "Where does the speaker live?");
        assert_eq!(json["questions"][0]["correctAnswerIndex"], 1);
        assert!(json.get("passage").is_none());
    }

    #[test]
    fn reading_quiz_keeps_passage() {
        let json = r#"{
            "title": "Reading 3",
            "questions": [],
            "testType": "Reading",
            "passage": "Once upon a time."
        }"#;
        let quiz: Quiz = serde_json::from_str(json).unwrap();
        assert_eq!(quiz.test_type, TestType::Reading);
        assert_eq!(quiz.passage.as_deref(), Some("Once upon a time."));
        assert!(!quiz.has_author());
    }

    #[test]
    fn correct_option_is_bounds_checked() {
        let mut q = sample_question();
        assert_eq!(q.correct_option(), Some("Paris"));
        assert!(q.is_well_formed());

        q.correct_answer_index = 7;
        assert_eq!(q.correct_option(), None);
        assert!(!q.is_well_formed());
    }

    #[test]
    fn parses_labels_case_insensitively() {
        assert_eq!("READING".parse::<TestType>().unwrap(), TestType::Reading);
        assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("speaking".parse::<TestType>().is_err());
    }

    #[test]
    fn defaults() {
        assert_eq!(TestType::default(), TestType::Listening);
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }
}
