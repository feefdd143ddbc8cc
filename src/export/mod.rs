//! Export artifacts: the self-grading HTML page and the teacher's answer key.
//!
//! [`write_exports`] renders both files into a directory using names derived
//! from the quiz title.

pub mod answer_key;
pub mod filename;
pub mod html;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::quiz::Quiz;

pub use answer_key::render_answer_key;
pub use filename::{answer_key_file_name, file_stem, html_file_name};
pub use html::{escape_html, render_html, HtmlOptions, DEFAULT_STYLESHEET_URL, QUIZ_DATA_ELEMENT_ID};

/// Paths written by [`write_exports`].
#[derive(Debug, Clone)]
pub struct ExportedFiles {
    pub html: PathBuf,
    pub answer_key: PathBuf,
}

/// Write `<stem>.html` and `<stem>_answer_key.txt` into `dir`, creating it if needed.
pub fn write_exports(quiz: &Quiz, options: &HtmlOptions<'_>, dir: &Path) -> Result<ExportedFiles> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating export directory {}", dir.display()))?;

    let html = dir.join(html_file_name(&quiz.title));
    std::fs::write(&html, render_html(quiz, options))
        .with_context(|| format!("writing {}", html.display()))?;

    let answer_key = dir.join(answer_key_file_name(&quiz.title));
    std::fs::write(&answer_key, render_answer_key(quiz))
        .with_context(|| format!("writing {}", answer_key.display()))?;

    log::info!("exported {} and {}", html.display(), answer_key.display());
    Ok(ExportedFiles { html, answer_key })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{Question, TestType};
    use tempfile::tempdir;

    fn one_question_quiz(title: &str) -> Quiz {
        Quiz {
            title: title.into(),
            author: String::new(),
            questions: vec![Question {
                id: "x".into(),
                question_text: "Q?".into(),
                options: vec!["w".into(), "x".into(), "y".into(), "z".into()],
                correct_answer_index: 2,
                explanation: "E".into(),
            }],
            test_type: TestType::Listening,
            passage: None,
        }
    }

    #[test]
    fn slash_in_title_still_exports() {
        let dir = tempdir().expect("temp dir");
        let out_dir = dir.path().join("out");

        let out = write_exports(&one_question_quiz("Unit 1/2 Review"), &HtmlOptions::default(), &out_dir).unwrap();

        assert_eq!(out.html, out_dir.join("Unit_1_2_Review.html"));
        assert!(out.html.is_file());
        assert!(out.answer_key.is_file());
    }

    #[test]
    fn parent_directory_title_stays_inside_out_dir() {
        let dir = tempdir().expect("temp dir");
        let out_dir = dir.path().join("out");

        for title in ["../escaped", "..", "a/../../b"] {
            let out = write_exports(&one_question_quiz(title), &HtmlOptions::default(), &out_dir).unwrap();
            assert_eq!(out.html.parent(), Some(out_dir.as_path()));
            assert_eq!(out.answer_key.parent(), Some(out_dir.as_path()));
        }
        assert!(!dir.path().join("escaped.html").exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn writes_both_files_named_after_the_title() {
        let dir = tempdir().expect("temp dir");
        let quiz = Quiz {
            title: "Final  Review".into(),
            author: String::new(),
            questions: vec![Question {
                id: "x".into(),
                question_text: "Q?".into(),
                options: vec!["w".into(), "x".into(), "y".into(), "z".into()],
                correct_answer_index: 2,
                explanation: "E".into(),
            }],
            test_type: TestType::Reading,
            passage: Some("text".into()),
        };

        let out = write_exports(&quiz, &HtmlOptions::default(), &dir.path().join("out")).unwrap();

        assert_eq!(out.html.file_name().unwrap(), "Final_Review.html");
        assert_eq!(out.answer_key.file_name().unwrap(), "Final_Review_answer_key.txt");

        let key = std::fs::read_to_string(&out.answer_key).unwrap();
        assert!(key.contains("Question 1: Q?\nCorrect Answer: y\nExplanation: E\n"));

        let html = std::fs::read_to_string(&out.html).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
    }
}
