use crate::error::{CodestashError, Result};
use chrono::{SecondsFormat, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A stored code fragment and its metadata.
///
/// Field names match the on-disk JSON layout.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Snippet {
    pub id: String,
    pub title: String,
    pub code: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    pub executable: bool,
    pub language: String,
    pub description: String,
    pub usage_count: u64,
    pub last_used: String,
    pub created_at: String,
}

// Older stores wrote a missing tag list as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Current UTC time as an RFC 3339 string with second precision.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Eight lowercase hex characters drawn from 4 bytes of OS randomness.
pub fn generate_id() -> String {
    let mut bytes = [0u8; 4];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

impl Snippet {
    pub fn new(
        title: String,
        code: String,
        description: String,
        language: String,
        tags: Vec<String>,
        executable: bool,
    ) -> Self {
        Self {
            id: generate_id(),
            title,
            code,
            tags,
            executable,
            language,
            description,
            usage_count: 0,
            last_used: String::new(),
            created_at: now_timestamp(),
        }
    }

    /// Like [`Snippet::new`], but re-rolls the id until it is not taken by
    /// any snippet in `existing`.
    pub fn new_unique(
        existing: &[Snippet],
        title: String,
        code: String,
        description: String,
        language: String,
        tags: Vec<String>,
        executable: bool,
    ) -> Self {
        let mut snippet = Self::new(title, code, description, language, tags, executable);
        while existing.iter().any(|s| s.id == snippet.id) {
            log::debug!("id {} already taken, re-rolling", snippet.id);
            snippet.id = generate_id();
        }
        snippet
    }

    /// Bump the usage counter and stamp `last_used`. Call once per print,
    /// copy or execute.
    pub fn record_use(&mut self) {
        self.usage_count += 1;
        self.last_used = now_timestamp();
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn tags_joined(&self) -> String {
        self.tags.join(", ")
    }

    /// Update a single field from raw user input.
    ///
    /// An empty value leaves the field alone, except for the title, which
    /// must stay non-empty and is rejected instead.
    pub fn apply_field_edit(&mut self, field: EditField, value: &str) -> Result<EditOutcome> {
        let trimmed = value.trim();
        match field {
            EditField::Title => {
                if trimmed.is_empty() {
                    return Err(CodestashError::Validation(
                        "title cannot be empty".to_string(),
                    ));
                }
                Ok(replace(&mut self.title, trimmed.to_string()))
            }
            EditField::Description => Ok(replace_unless_empty(&mut self.description, trimmed)),
            EditField::Language => Ok(replace_unless_empty(&mut self.language, trimmed)),
            EditField::Code => {
                if value.is_empty() {
                    Ok(EditOutcome::Unchanged)
                } else {
                    Ok(replace(&mut self.code, value.to_string()))
                }
            }
            // A lone "," clears the list.
            EditField::Tags => {
                if trimmed.is_empty() {
                    Ok(EditOutcome::Unchanged)
                } else {
                    Ok(replace(&mut self.tags, parse_tags(trimmed)))
                }
            }
            EditField::Executable => match parse_yes_no(trimmed) {
                Some(flag) => Ok(replace(&mut self.executable, flag)),
                None => Ok(EditOutcome::Unchanged),
            },
        }
    }

    /// Apply a whole-record edit where every empty answer keeps the old
    /// value, the title included.
    pub fn apply_interactive_edit(&mut self, edit: &SnippetEdit) -> EditOutcome {
        let mut outcome = EditOutcome::Unchanged;
        for field in EditField::ALL {
            let value = edit.get(field);
            if field == EditField::Title && value.trim().is_empty() {
                continue;
            }
            if let Ok(EditOutcome::Changed) = self.apply_field_edit(field, value) {
                outcome = EditOutcome::Changed;
            }
        }
        outcome
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> EditOutcome {
    if *slot == value {
        EditOutcome::Unchanged
    } else {
        *slot = value;
        EditOutcome::Changed
    }
}

fn replace_unless_empty(slot: &mut String, value: &str) -> EditOutcome {
    if value.is_empty() {
        EditOutcome::Unchanged
    } else {
        replace(slot, value.to_string())
    }
}

/// Split a comma separated list, trimming parts and dropping empty ones.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// `None` for an empty answer, `Some(true)` for y/yes, `Some(false)` otherwise.
pub fn parse_yes_no(raw: &str) -> Option<bool> {
    let answer = raw.trim();
    if answer.is_empty() {
        return None;
    }
    Some(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

/// The editable fields of a snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Title,
    Description,
    Language,
    Tags,
    Executable,
    Code,
}

impl EditField {
    /// Every field, in interactive prompt order.
    pub const ALL: [EditField; 6] = [
        EditField::Title,
        EditField::Description,
        EditField::Language,
        EditField::Tags,
        EditField::Executable,
        EditField::Code,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EditField::Title => "title",
            EditField::Description => "description",
            EditField::Language => "language",
            EditField::Tags => "tags",
            EditField::Executable => "executable",
            EditField::Code => "code",
        }
    }

    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(EditField::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for EditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EditField {
    type Err = CodestashError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CodestashError::UnknownField {
                field: s.to_string(),
                valid: Self::valid_names(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Changed,
    Unchanged,
}

/// Raw answers collected for a whole-record edit. Empty strings mean "keep".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetEdit {
    pub title: String,
    pub description: String,
    pub language: String,
    pub tags: String,
    pub executable: String,
    pub code: String,
}

impl SnippetEdit {
    pub fn get(&self, field: EditField) -> &str {
        match field {
            EditField::Title => &self.title,
            EditField::Description => &self.description,
            EditField::Language => &self.language,
            EditField::Tags => &self.tags,
            EditField::Executable => &self.executable,
            EditField::Code => &self.code,
        }
    }
}
