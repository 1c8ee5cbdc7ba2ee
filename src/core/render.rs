//! Token sequence to display string.

use crate::schema::request::GenerationResult;

/// Join tokens and apply French typography.
///
/// Spaces go away before commas and around hyphens and after apostrophes.
/// A final `.` is added unless the text already ends in `?` or `.`, and the
/// first letter is capitalized. Rendering rendered text changes nothing.
pub fn render_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    let joined = tokens
        .iter()
        .map(|t| t.as_ref())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let mut text = joined
        .replace(" , ", ", ")
        .replace("' ", "'")
        .replace(" -t- ", "-t-")
        .replace(" - ", "-");
    if !text.ends_with('?') && !text.ends_with('.') {
        text.push('.');
    }
    capitalize(&text)
}

/// Render a generated sentence.
pub fn render(result: &GenerationResult) -> String {
    render_tokens(&result.token_texts())
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
