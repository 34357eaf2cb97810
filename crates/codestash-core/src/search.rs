use crate::models::Snippet;

const PREVIEW_WIDTH: usize = 60;

/// Case-insensitive substring match against id, title, description, tags,
/// code and language.
pub fn matches_query(snippet: &Snippet, query: &str) -> bool {
    let query = query.to_lowercase();

    contains(&snippet.id, &query)
        || contains(&snippet.title, &query)
        || contains(&snippet.description, &query)
        || snippet.tags.iter().any(|tag| contains(tag, &query))
        || contains(&snippet.code, &query)
        || contains(&snippet.language, &query)
}

fn contains(field: &str, lowered_query: &str) -> bool {
    field.to_lowercase().contains(lowered_query)
}

/// Snippets matching `query`, optionally restricted to executable ones.
pub fn search<'a>(snippets: &'a [Snippet], query: &str, executable_only: bool) -> Vec<&'a Snippet> {
    snippets
        .iter()
        .filter(|s| !executable_only || s.executable)
        .filter(|s| matches_query(s, query))
        .collect()
}

/// Snippets with exactly `language` and carrying `tag`, when given.
pub fn filter_snippets<'a>(
    snippets: &'a [Snippet],
    language: Option<&str>,
    tag: Option<&str>,
) -> Vec<&'a Snippet> {
    snippets
        .iter()
        .filter(|s| language.map_or(true, |lang| s.language == lang))
        .filter(|s| tag.map_or(true, |tag| s.has_tag(tag)))
        .collect()
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_WIDTH) {
        Some((cut, _)) => format!("{}...", text[..cut].trim()),
        None => text.trim().to_string(),
    }
}

/// The first code line containing `query`, trimmed and cut to 60 characters.
/// Falls back to the start of the code when no single line matches.
pub fn code_preview(code: &str, query: &str) -> String {
    let query = query.to_lowercase();
    code.lines()
        .map(str::trim)
        .find(|line| line.to_lowercase().contains(&query))
        .map(truncate)
        .unwrap_or_else(|| truncate(code))
}
