//! Turns the gateway's question blob into `Question`s.

use super::question::{Question, QuestionId};

/// Markers the model puts in front of each question. Longest first so
/// `Question:` is not read as `Q` + `uestion:`.
const LABELS: &[&str] = &["question", "질문", "q"];

/// Splits `raw` into one question per non-blank line, in order, with ids 1..N.
pub fn parse_questions(raw: &str) -> Vec<Question> {
    raw.lines()
        .map(|line| strip_label(line.trim()).trim())
        .filter(|line| !line.is_empty())
        .zip(1u32..)
        .map(|(text, n)| Question::new(QuestionId::new(n), text))
        .collect()
}

/// Removes a leading `<label>[ <number>]:` marker. Lines without one are returned unchanged.
fn strip_label(line: &str) -> &str {
    for label in LABELS {
        let Some(rest) = strip_prefix_ignore_ascii_case(line, label) else {
            continue;
        };
        let rest = rest
            .trim_start()
            .trim_start_matches(|c: char| c.is_ascii_digit())
            .trim_start();
        if let Some(body) = rest.strip_prefix(':').or_else(|| rest.strip_prefix('：')) {
            return body.trim_start();
        }
    }
    line
}

fn strip_prefix_ignore_ascii_case<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &line[prefix.len()..])
}
