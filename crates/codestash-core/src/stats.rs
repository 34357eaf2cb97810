use crate::models::Snippet;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

const TOP_USED: usize = 5;
const RECENT: usize = 3;

/// Usage and composition figures for a snippet collection.
#[derive(Debug)]
pub struct Stats<'a> {
    pub total: usize,
    pub executable: usize,
    pub total_usage: u64,
    pub most_used: Vec<&'a Snippet>,
    /// Language counts, most common first.
    pub languages: Vec<(String, usize)>,
    /// Tag counts, most common first.
    pub tags: Vec<(String, usize)>,
    pub recently_created: Vec<&'a Snippet>,
    pub recently_used: Vec<&'a Snippet>,
    pub unused: Vec<&'a Snippet>,
}

fn ranked(counts: HashMap<&str, usize>) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

impl<'a> Stats<'a> {
    pub fn compute(snippets: &'a [Snippet]) -> Self {
        let mut languages: HashMap<&str, usize> = HashMap::new();
        let mut tags: HashMap<&str, usize> = HashMap::new();
        for snippet in snippets {
            *languages.entry(snippet.language.as_str()).or_default() += 1;
            for tag in &snippet.tags {
                *tags.entry(tag.as_str()).or_default() += 1;
            }
        }

        let mut most_used: Vec<&Snippet> = snippets.iter().collect();
        most_used.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));
        most_used.truncate(TOP_USED);

        let mut recently_created: Vec<&Snippet> = snippets.iter().collect();
        recently_created.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recently_created.truncate(RECENT);

        let mut recently_used: Vec<&Snippet> =
            snippets.iter().filter(|s| !s.last_used.is_empty()).collect();
        recently_used.sort_by(|a, b| b.last_used.cmp(&a.last_used));
        recently_used.truncate(RECENT);

        Self {
            total: snippets.len(),
            executable: snippets.iter().filter(|s| s.executable).count(),
            total_usage: snippets.iter().map(|s| s.usage_count).sum(),
            most_used,
            languages: ranked(languages),
            tags: ranked(tags),
            recently_created,
            recently_used,
            unused: snippets.iter().filter(|s| s.usage_count == 0).collect(),
        }
    }

    pub fn non_executable(&self) -> usize {
        self.total - self.executable
    }

    pub fn average_usage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.total_usage as f64 / self.total as f64
        }
    }

    /// Share of the collection written in a language, as a percentage.
    pub fn language_share(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64 * 100.0
        }
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// Human readable age of an RFC 3339 timestamp, or `None` if it does not parse.
pub fn format_time_ago(timestamp: &str, now: DateTime<Utc>) -> Option<String> {
    let then = DateTime::parse_from_rfc3339(timestamp)
        .ok()?
        .with_timezone(&Utc);
    let duration = now.signed_duration_since(then);

    let formatted = if duration.num_hours() < 1 {
        let minutes = duration.num_minutes();
        if minutes <= 1 {
            "just now".to_string()
        } else {
            format!("{} minutes ago", minutes)
        }
    } else if duration.num_hours() < 24 {
        plural(duration.num_hours(), "hour")
    } else if duration.num_days() < 7 {
        plural(duration.num_days(), "day")
    } else if duration.num_days() < 30 {
        plural(duration.num_weeks(), "week")
    } else {
        plural(duration.num_days() / 30, "month")
    };
    Some(formatted)
}
