// Shared prompt fragments.
// Each feature module keeps its own prompts.rs alongside its handlers;
// this file holds the pieces they all reuse.

/// Appended to every prompt so replies match the language of the UI.
pub const RESPOND_IN_KOREAN: &str = "답변은 한국어로 작성하세요.";

/// Renders optional profile lines (`label: value`), skipping blank values.
pub fn profile_lines(fields: &[(&str, Option<&str>)]) -> String {
    fields
        .iter()
        .filter_map(|(label, value)| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| format!("{label}: {v}\n"))
        })
        .collect()
}
