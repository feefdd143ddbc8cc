//! Quiz model, option shuffling and the editing stage.
//!
//! * [`Quiz`] / [`Question`]: the data every other stage passes around.
//! * [`shuffle_options`]: unbiased reordering that keeps the answer pointer right.
//! * [`QuizEditor`]: field-level edits after generation.

pub mod editor;
pub mod model;
pub mod shuffle;

pub use editor::{EditError, QuizEditor};
pub use model::{Difficulty, Question, Quiz, TestType, OPTIONS_PER_QUESTION};
pub use shuffle::{shuffle_all, shuffle_options};
