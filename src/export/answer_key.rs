//! Plain-text answer key for the teacher.

use std::fmt::Write;

use crate::quiz::Quiz;

const RULE: &str = "====================================";

/// Shown when a question's answer index does not point at an option.
const MISSING_OPTION: &str = "(no option at the marked answer index)";

/// Render the answer key: a short header, then one block per question with the
/// correct option's text and the explanation.
pub fn render_answer_key(quiz: &Quiz) -> String {
    let mut out = String::with_capacity(256 + quiz.questions.len() * 160);

    // Writing into a String is infallible.
    let _ = writeln!(out, "Answer Key for: {}", quiz.title);
    if quiz.has_author() {
        let _ = writeln!(out, "Author: {}", quiz.author);
    }
    let _ = writeln!(out, "Type: {}", quiz.test_type);
    let _ = writeln!(out, "{RULE}\n");

    for (i, q) in quiz.questions.iter().enumerate() {
        let _ = writeln!(out, "Question {}: {}", i + 1, q.question_text);
        let _ = writeln!(
            out,
            "Correct Answer: {}",
            q.correct_option().unwrap_or(MISSING_OPTION)
        );
        let _ = writeln!(out, "Explanation: {}\n", q.explanation);
    }

    out
}
