//! Merging of externally suggested tasks into the timeline input set.
//!
//! An external AI collaborator turns a free-text scenario into structured
//! task descriptions. The engine treats them as pre-resolved input: the
//! duration is already a plain integer and no questionnaire lookup runs.
//! Malformed entries are dropped with a log line and never abort the
//! merge of the remaining valid ones.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{ActivityDraft, Category};

/// One raw task description as returned by the suggestion collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSuggestion {
    /// Display title; required
    #[serde(default)]
    pub title: String,
    /// Optional longer description, kept as activity notes
    #[serde(default)]
    pub description: Option<String>,
    /// Suggested duration in minutes; required and positive
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    /// Suggested category name; unknown values fall back to custom
    #[serde(default)]
    pub category: Option<String>,
    /// Suggested priority; suggestions are merged in priority order
    /// (highest first) but the value is not persisted
    #[serde(default)]
    pub priority: Option<i64>,
}

/// Parse a JSON array of suggestions.
///
/// # Errors
///
/// * `TimelineError::Serialization` - when the payload is not a JSON
///   array of suggestion objects
pub fn suggestions_from_json(payload: &str) -> Result<Vec<RawSuggestion>> {
    Ok(serde_json::from_str(payload)?)
}

/// Filter and convert raw suggestions into activity drafts.
///
/// A suggestion needs a non-empty title and a positive duration; anything
/// else is dropped and logged. Unknown category names become
/// [`Category::Custom`] rather than dropping the entry. Suggested
/// durations and categories are otherwise trusted as given.
pub fn merge_suggestions(suggestions: Vec<RawSuggestion>) -> Vec<ActivityDraft> {
    let mut suggestions = suggestions;
    suggestions.sort_by_key(|suggestion| std::cmp::Reverse(suggestion.priority.unwrap_or(0)));

    let mut drafts = Vec::new();
    for suggestion in suggestions {
        let title = suggestion.title.trim();
        if title.is_empty() {
            warn!("dropping suggestion without a title");
            continue;
        }
        let Some(duration) = suggestion.duration_minutes.filter(|minutes| *minutes > 0) else {
            warn!("dropping suggestion '{title}' without a positive duration");
            continue;
        };

        let category = suggestion
            .category
            .as_deref()
            .and_then(|name| name.parse::<Category>().ok())
            .unwrap_or(Category::Custom);

        let mut draft = ActivityDraft::new(title, category, duration);
        draft.notes = suggestion.description.clone();
        drafts.push(draft);
    }

    drafts
}
