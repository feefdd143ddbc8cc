//! Editing stage: field-level replacement on a generated quiz.
//!
//! Every setter replaces exactly one field and leaves the rest of the quiz
//! untouched. Questions are addressed by their id, which survives reordering.

use thiserror::Error;

use super::model::{Question, Quiz};

/// Reasons an edit could not be applied.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("no question with id `{0}`")]
    UnknownQuestion(String),

    #[error("question {id} has {len} options; index {index} is out of range")]
    OptionOutOfRange { id: String, index: usize, len: usize },

    #[error("question number {number} is out of range (quiz has {len} questions)")]
    QuestionNumberOutOfRange { number: usize, len: usize },
}

/// Owns a [`Quiz`] for the duration of an editing session.
///
/// ```rust
/// use language_quiz::quiz::{Question, Quiz, QuizEditor, TestType};
///
/// let quiz = Quiz {
///     title: "Draft".into(),
///     author: String::new(),
///     questions: vec![Question {
///         id: "q1".into(),
///         question_text: "2 + 2?".into(),
///         options: vec!["3".into(), "4".into(), "5".into(), "22".into()],
///         correct_answer_index: 1,
///         explanation: String::new(),
///     }],
///     test_type: TestType::Listening,
///     passage: None,
/// };
///
/// let mut editor = QuizEditor::new(quiz);
/// editor.set_title("Week 2 check");
/// editor.set_option("q1", 3, "four").unwrap();
/// assert_eq!(editor.quiz().questions[0].options[3], "four");
/// ```
#[derive(Debug, Clone)]
pub struct QuizEditor {
    quiz: Quiz,
}

impl QuizEditor {
    pub fn new(quiz: Quiz) -> Self {
        Self { quiz }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn into_quiz(self) -> Quiz {
        self.quiz
    }

    // -----------------------------------------------------------------------
    // Quiz-level fields
    // -----------------------------------------------------------------------

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.quiz.title = title.into();
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.quiz.author = author.into();
    }

    /// Replace the reading passage. An empty string clears it.
    pub fn set_passage(&mut self, passage: impl Into<String>) {
        let passage = passage.into();
        self.quiz.passage = if passage.is_empty() { None } else { Some(passage) };
    }

    // -----------------------------------------------------------------------
    // Question-level fields
    // -----------------------------------------------------------------------

    pub fn set_question_text(&mut self, id: &str, text: impl Into<String>) -> Result<(), EditError> {
        self.question_mut(id)?.question_text = text.into();
        Ok(())
    }

    pub fn set_option(&mut self, id: &str, index: usize, text: impl Into<String>) -> Result<(), EditError> {
        let question = self.question_mut(id)?;
        let len = question.options.len();
        let slot = question
            .options
            .get_mut(index)
            .ok_or_else(|| EditError::OptionOutOfRange {
                id: id.to_string(),
                index,
                len,
            })?;
        *slot = text.into();
        Ok(())
    }

    /// Mark the option at `index` as the correct one.
    pub fn set_correct_answer(&mut self, id: &str, index: usize) -> Result<(), EditError> {
        let question = self.question_mut(id)?;
        if index >= question.options.len() {
            return Err(EditError::OptionOutOfRange {
                id: id.to_string(),
                index,
                len: question.options.len(),
            });
        }
        question.correct_answer_index = index;
        Ok(())
    }

    pub fn set_explanation(&mut self, id: &str, text: impl Into<String>) -> Result<(), EditError> {
        self.question_mut(id)?.explanation = text.into();
        Ok(())
    }

    /// Resolve a 1-based question number (as shown to the educator) to its id.
    pub fn id_for_number(&self, number: usize) -> Result<String, EditError> {
        number
            .checked_sub(1)
            .and_then(|i| self.quiz.questions.get(i))
            .map(|q| q.id.clone())
            .ok_or(EditError::QuestionNumberOutOfRange {
                number,
                len: self.quiz.questions.len(),
            })
    }

    fn question_mut(&mut self, id: &str) -> Result<&mut Question, EditError> {
        self.quiz
            .question_mut(id)
            .ok_or_else(|| EditError::UnknownQuestion(id.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
