//! Token lookup: a snippet is named either by its id or by its title.
//!
//! The first snippet in collection order wins, so two snippets sharing a
//! title can only be told apart by id.

use crate::error::{CodestashError, Result};
use crate::models::Snippet;

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

fn matches(snippet: &Snippet, token: &str) -> bool {
    snippet.id == token || eq_ignore_case(&snippet.title, token)
}

/// Position of the first snippet matching `token`.
pub fn resolve_index(snippets: &[Snippet], token: &str) -> Result<usize> {
    snippets
        .iter()
        .position(|s| matches(s, token))
        .ok_or_else(|| CodestashError::NotFound(token.to_string()))
}

/// Find a snippet by id or title
pub fn resolve<'a>(snippets: &'a [Snippet], token: &str) -> Result<&'a Snippet> {
    resolve_index(snippets, token).map(|i| &snippets[i])
}

/// Mutable variant of [`resolve`]; the caller persists any change.
pub fn resolve_mut<'a>(snippets: &'a mut [Snippet], token: &str) -> Result<&'a mut Snippet> {
    let index = resolve_index(snippets, token)?;
    Ok(&mut snippets[index])
}
