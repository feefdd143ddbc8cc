//! Standalone interactive HTML export.
//!
//! The page is a single file: the quiz travels as inline JSON, audio travels as
//! a data URI, and a small inline script renders one radio group per question
//! and grades the submission in the browser. The only external reference is the
//! stylesheet toolkit loaded from a CDN.
//!
//! Substitution slots in the template are written `{{NAME}}` and filled in one
//! pass, so quiz text that happens to contain a slot name is never re-expanded.

use crate::quiz::Quiz;

/// Default CSS toolkit the page's class names are written against.
pub const DEFAULT_STYLESHEET_URL: &str = "https://cdn.tailwindcss.com";

/// `id` of the `<script type="application/json">` block holding the quiz.
pub const QUIZ_DATA_ELEMENT_ID: &str = "quiz-data";

/// Inputs to one export beyond the quiz itself.
#[derive(Debug, Clone, Copy)]
pub struct HtmlOptions<'a> {
    /// Audio to embed, already in `data:` URI form.
    pub audio_data_uri: Option<&'a str>,
    pub stylesheet_url: &'a str,
}

impl Default for HtmlOptions<'_> {
    fn default() -> Self {
        Self {
            audio_data_uri: None,
            stylesheet_url: DEFAULT_STYLESHEET_URL,
        }
    }
}

/// Render `quiz` as a self-grading HTML document.
pub fn render_html(quiz: &Quiz, options: &HtmlOptions<'_>) -> String {
    let title = if quiz.title.is_empty() { "Quiz" } else { quiz.title.as_str() };

    let quiz_json = script_safe(
        &serde_json::to_string(quiz).unwrap_or_else(|e| {
            log::error!("quiz serialization failed: {e}");
            "null".to_string()
        }),
    );
    let audio_src = match options.audio_data_uri {
        Some(uri) => script_safe(&serde_json::Value::from(uri).to_string()),
        None => "null".to_string(),
    };

    let html = fill(
        PAGE_TEMPLATE,
        &[
            ("TITLE", escape_html(title)),
            ("STYLESHEET", escape_html(options.stylesheet_url)),
            ("DATA_ID", QUIZ_DATA_ELEMENT_ID.to_string()),
            ("QUIZ_JSON", quiz_json),
            ("AUDIO_SRC", audio_src),
        ],
    );

    log::debug!(
        "rendered HTML export: {} questions, {} bytes, audio={}",
        quiz.questions.len(),
        html.len(),
        options.audio_data_uri.is_some()
    );
    html
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Escape text for an HTML text node or quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Keep JSON inert inside a `<script>` element.
///
/// `<`, `>` and `&` only occur inside JSON strings, where `\u003c`, `\u003e`
/// and `\u0026` parse to the same value. With no `<` left, neither `</script>`
/// nor `<!--<script>` can change how the element ends.
fn script_safe(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            _ => out.push(c),
        }
    }
    out
}

/// Single-pass `{{NAME}}` substitution. Unknown slots are left as written.
fn fill(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match values.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(key);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{TITLE}}</title>
    <script src="{{STYLESHEET}}"></script>
</head>
<body class="bg-gradient-to-br from-indigo-50 via-purple-50 to-blue-100 flex items-center justify-center min-h-screen p-4 font-sans text-slate-800">
    <div id="quiz-container" class="bg-white/90 backdrop-blur-sm p-6 md:p-8 rounded-2xl shadow-lg w-full max-w-3xl border border-slate-200 my-8"></div>

    <script id="{{DATA_ID}}" type="application/json">{{QUIZ_JSON}}</script>

    <script>
        document.addEventListener('DOMContentLoaded', () => {
            const quizContainer = document.getElementById('quiz-container');
            const quizData = JSON.parse(document.getElementById('{{DATA_ID}}').textContent);
            const audioSrc = {{AUDIO_SRC}};

            const escapeHtml = (value) => String(value).replace(/[&<>"']/g, (c) => ({
                '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;'
            })[c]);

            let content = `<h1 class="text-4xl font-bold text-indigo-900 text-center mb-2">${escapeHtml(quizData.title)}</h1>`;

            if (quizData.author) {
                content += `<p class="text-center text-slate-600 mb-8 text-lg">By ${escapeHtml(quizData.author)}</p>`;
            }

            if (audioSrc) {
                content += `<div class="mb-8"><audio controls class="w-full" src="${escapeHtml(audioSrc)}"></audio></div>`;
            }

            if (quizData.passage) {
                content += `
                    <div class="mb-8 p-6 bg-slate-50 border border-slate-200 rounded-xl">
                        <h3 class="text-xl font-bold text-slate-700 mb-3 border-b pb-2">Reading Passage</h3>
                        <div class="prose max-w-none text-slate-800 font-serif leading-relaxed whitespace-pre-wrap">${escapeHtml(quizData.passage)}</div>
                    </div>`;
            }

            content += '<form id="quiz-form" class="space-y-8">';

            quizData.questions.forEach((q, qIndex) => {
                content += `
                    <div class="question-block" id="question-${qIndex}">
                        <p class="text-xl font-semibold text-slate-800 mb-4">${qIndex + 1}. ${escapeHtml(q.questionText)}</p>
                        <div class="space-y-3 pl-2">`;
                q.options.forEach((opt, oIndex) => {
                    content += `
                        <label class="flex items-center p-4 rounded-lg border border-slate-200 cursor-pointer hover:bg-slate-50 transition-colors has-[:checked]:bg-purple-50 has-[:checked]:border-purple-400">
                            <input type="radio" name="question-${qIndex}" value="${oIndex}" class="h-5 w-5 text-purple-600 border-slate-400 focus:ring-purple-500 mr-4">
                            <span class="text-slate-800 text-base">${escapeHtml(opt)}</span>
                        </label>`;
                });
                content += '</div></div>';
            });

            content += `
                <button type="submit" class="w-full bg-purple-600 text-white font-bold py-3 px-4 rounded-lg hover:bg-purple-700 focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-purple-500 transition-colors text-lg">
                    Submit Answers
                </button>`;
            content += '</form>';
            content += '<div id="final-score" class="text-center mt-8 p-6 bg-indigo-100 text-indigo-900 rounded-lg text-3xl font-bold hidden"></div>';

            quizContainer.innerHTML = content;

            document.getElementById('quiz-form').addEventListener('submit', (e) => {
                e.preventDefault();
                const form = e.target;
                const submitButton = form.querySelector('button[type="submit"]');
                if (submitButton.disabled) return;

                let score = 0;
                quizData.questions.forEach((q, qIndex) => {
                    const selected = form.querySelector(`input[name="question-${qIndex}"]:checked`);
                    const labels = document.getElementById(`question-${qIndex}`).querySelectorAll('label');

                    labels.forEach((label, oIndex) => {
                        label.classList.remove('cursor-pointer', 'hover:bg-slate-50');
                        const input = label.querySelector('input');
                        if (input) input.disabled = true;

                        if (q.correctAnswerIndex === oIndex) {
                            label.classList.remove('bg-purple-50', 'border-purple-400');
                            label.classList.add('bg-green-100', 'border-green-400');
                        }
                    });

                    if (selected) {
                        if (parseInt(selected.value, 10) === q.correctAnswerIndex) {
                            score++;
                        } else {
                            const selectedLabel = selected.parentElement;
                            selectedLabel.classList.remove('bg-purple-50', 'border-purple-400');
                            selectedLabel.classList.add('bg-red-100', 'border-red-400');
                        }
                    }
                });

                const finalScoreEl = document.getElementById('final-score');
                finalScoreEl.textContent = `You got ${score} out of ${quizData.questions.length} correct!`;
                finalScoreEl.classList.remove('hidden');

                submitButton.disabled = true;
                submitButton.classList.add('bg-slate-400', 'cursor-not-allowed', 'hover:bg-slate-400');
            });
        });
    </script>
</body>
</html>
"#;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{Question, TestType};

    fn quiz() -> Quiz {
        Quiz {
            title: "Café <Week 1>".into(),
            author: "J. Doe".into(),
            questions: vec![Question {
                id: "q-1".into(),
                question_text: "What closes a script? </script>".into(),
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                correct_answer_index: 3,
                explanation: "trick".into(),
            }],
            test_type: TestType::Listening,
            passage: None,
        }
    }

    /// Pull the embedded JSON back out of the page the way the browser would.
    fn embedded_quiz(html: &str) -> Quiz {
        let open = format!(r#"<script id="{QUIZ_DATA_ELEMENT_ID}" type="application/json">"#);
        let start = html.find(&open).expect("data block") + open.len();
        let end = start + html[start..].find("</script>").expect("end of data block");
        serde_json::from_str(&html[start..end]).expect("valid JSON")
    }

    #[test]
    fn embedded_data_parses_back_to_the_same_quiz() {
        let q = quiz();
        let html = render_html(&q, &HtmlOptions::default());
        assert_eq!(embedded_quiz(&html), q);
    }

    #[test]
    fn script_terminator_in_text_cannot_break_out() {
        let html = render_html(&quiz(), &HtmlOptions::default());
        assert!(html.contains(r"\u003c/script\u003e"));
        // One closing tag each: stylesheet, data, logic.
        assert_eq!(html.matches("</script>").count(), 3);
    }

    #[test]
    fn comment_opener_in_text_cannot_swallow_the_page_script() {
        let mut q = quiz();
        q.questions[0].explanation = "see <!--<script> & more".into();
        q.passage = Some("<!-- unclosed".into());
        let html = render_html(&q, &HtmlOptions::default());

        assert!(!html.contains("<!--"));
        assert!(html.contains(r"\u003c!--\u003cscript\u003e \u0026 more"));
        assert_eq!(html.matches("</script>").count(), 3);
        assert_eq!(embedded_quiz(&html), q);
    }

    #[test]
    fn audio_literal_is_escaped_like_the_data() {
        let html = render_html(
            &quiz(),
            &HtmlOptions {
                audio_data_uri: Some("data:audio/wav;base64,</script>"),
                ..HtmlOptions::default()
            },
        );
        assert!(html.contains(r#"const audioSrc = "data:audio/wav;base64,\u003c/script\u003e";"#));
    }

    #[test]
    fn title_is_escaped() {
        let html = render_html(&quiz(), &HtmlOptions::default());
        assert!(html.contains("<title>Café &lt;Week 1&gt;</title>"));
    }

    #[test]
    fn empty_title_falls_back_to_quiz() {
        let mut q = quiz();
        q.title.clear();
        let html = render_html(&q, &HtmlOptions::default());
        assert!(html.contains("<title>Quiz</title>"));
    }

    #[test]
    fn audio_is_embedded_as_data_uri() {
        let uri = "data:audio/wav;base64,UklGRiQAAABXQVZF";
        let html = render_html(
            &quiz(),
            &HtmlOptions {
                audio_data_uri: Some(uri),
                ..HtmlOptions::default()
            },
        );
        assert!(html.contains(&format!("const audioSrc = \"{uri}\";")));
    }

    #[test]
    fn no_audio_renders_null_source() {
        let html = render_html(&quiz(), &HtmlOptions::default());
        assert!(html.contains("const audioSrc = null;"));
        assert!(!html.contains("data:audio"));
    }

    #[test]
    fn stylesheet_is_the_only_external_reference() {
        let html = render_html(&quiz(), &HtmlOptions::default());
        assert!(html.contains(r#"<script src="https://cdn.tailwindcss.com"></script>"#));
        assert_eq!(html.matches("https://").count(), 1);
    }

    #[test]
    fn page_contains_grading_logic() {
        let html = render_html(&quiz(), &HtmlOptions::default());
        assert!(html.contains(r#"type="radio" name="question-${qIndex}""#));
        assert!(html.contains("input.disabled = true"));
        assert!(html.contains("bg-green-100"));
        assert!(html.contains("bg-red-100"));
        assert!(html.contains("You got ${score} out of ${quizData.questions.length} correct!"));
        assert!(html.contains("submitButton.disabled = true"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn reading_passage_travels_in_the_data() {
        let mut q = quiz();
        q.test_type = TestType::Reading;
        q.passage = Some("The fox ran.\nThe end.".into());
        let html = render_html(&q, &HtmlOptions::default());
        assert_eq!(embedded_quiz(&html).passage.as_deref(), Some("The fox ran.\nThe end."));
        assert!(html.contains("Reading Passage"));
    }

    #[test]
    fn fill_is_single_pass() {
        let out = fill(
            "{{A}} and {{B}} and {{C}}",
            &[("A", "{{B}}".to_string()), ("B", "b".to_string())],
        );
        assert_eq!(out, "{{B}} and b and {{C}}");
    }

    #[test]
    fn fill_keeps_unterminated_braces() {
        assert_eq!(fill("x {{open", &[]), "x {{open");
    }

    #[test]
    fn escape_html_covers_attribute_quotes() {
        assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }
}
