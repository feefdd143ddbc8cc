//! Download file names derived from the quiz title.

/// Stem used when the title is empty.
const FALLBACK_STEM: &str = "quiz";

/// Characters that cannot appear in a file name on common platforms.
const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Turn `title` into a single path component.
///
/// Whitespace runs collapse to one `_`; path separators, reserved and
/// control characters each become `_`. An empty stem, or one made only of
/// dots, is replaced by `quiz`.
///
/// ```rust
/// use language_quiz::export::file_stem;
///
/// assert_eq!(file_stem("Unit 3   Listening"), "Unit_3_Listening");
/// assert_eq!(file_stem("Unit 1/2 Review"), "Unit_1_2_Review");
/// assert_eq!(file_stem(""), "quiz");
/// ```
pub fn file_stem(title: &str) -> String {
    let mut stem = String::with_capacity(title.len());
    let mut in_space = false;
    for c in title.chars() {
        if c.is_whitespace() {
            if !in_space {
                stem.push('_');
            }
            in_space = true;
        } else {
            stem.push(if c.is_control() || RESERVED.contains(&c) { '_' } else { c });
            in_space = false;
        }
    }

    if stem.chars().all(|c| c == '.') {
        FALLBACK_STEM.to_string()
    } else {
        stem
    }
}

/// `<stem>.html`
pub fn html_file_name(title: &str) -> String {
    format!("{}.html", file_stem(title))
}

/// `<stem>_answer_key.txt`
pub fn answer_key_file_name(title: &str) -> String {
    format!("{}_answer_key.txt", file_stem(title))
}
