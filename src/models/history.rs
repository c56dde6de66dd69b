//! Saved review history types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Persona, ReviewResult};

/// Maximum length of a generated entry title, in characters.
const TITLE_MAX_CHARS: usize = 80;

/// A stored review plus the metadata needed to list it.
///
/// Entries are immutable once created; the only lifecycle operations are
/// save and delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,
    pub persona: Persona,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_area: Option<String>,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub result: ReviewResult,
}

impl HistoryEntry {
    /// Create a new entry with a fresh id and the current timestamp.
    ///
    /// The persona is taken from the result so the two can never disagree.
    /// When no title is given, the result's verdict is used.
    pub fn new(
        result: ReviewResult,
        language: Option<String>,
        focus_area: Option<String>,
        title: Option<String>,
    ) -> Self {
        let title = title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| default_title(&result));
        Self {
            id: Uuid::new_v4(),
            persona: result.persona(),
            language,
            focus_area,
            title,
            created_at: Utc::now(),
            result,
        }
    }
}

fn default_title(result: &ReviewResult) -> String {
    let verdict = result.verdict().trim();
    if verdict.is_empty() {
        return format!("{} review", result.persona());
    }
    if verdict.chars().count() <= TITLE_MAX_CHARS {
        return verdict.to_string();
    }
    let mut title: String = verdict.chars().take(TITLE_MAX_CHARS - 1).collect();
    title.push('…');
    title
}

/// Body of a "save to history" request.
///
/// `result` stays raw JSON until it has been checked against the schema
/// selected by `persona`. Without a persona the shape of `result` decides.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveHistoryRequest {
    #[serde(default)]
    pub persona: Option<Persona>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub focus_area: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub result: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JuniorReview;

    fn junior(verdict: &str) -> ReviewResult {
        ReviewResult::Junior(JuniorReview {
            verdict: verdict.to_string(),
            score: 90,
            summary: "Good".into(),
            tips: vec![],
        })
    }

    #[test]
    fn save_request_persona_is_optional() {
        let absent: SaveHistoryRequest =
            serde_json::from_str(r#"{"result": {"verdict": "ok"}}"#).unwrap();
        assert_eq!(absent.persona, None);

        let senior: SaveHistoryRequest =
            serde_json::from_str(r#"{"persona": "Senior", "result": {}}"#).unwrap();
        assert_eq!(senior.persona, Some(Persona::Senior));
    }

    #[test]
    fn new_entry_takes_persona_from_result() {
        let entry = HistoryEntry::new(junior("Looks good"), Some("rust".into()), None, None);
        assert_eq!(entry.persona, Persona::Junior);
        assert_eq!(entry.title, "Looks good");
        assert_eq!(entry.language.as_deref(), Some("rust"));
    }

    #[test]
    fn explicit_title_wins_unless_blank() {
        let entry = HistoryEntry::new(junior("v"), None, None, Some("My review".into()));
        assert_eq!(entry.title, "My review");

        let entry = HistoryEntry::new(junior("v"), None, None, Some("   ".into()));
        assert_eq!(entry.title, "v");
    }

    #[test]
    fn long_verdict_is_truncated() {
        let entry = HistoryEntry::new(junior(&"a".repeat(200)), None, None, None);
        assert_eq!(entry.title.chars().count(), TITLE_MAX_CHARS);
        assert!(entry.title.ends_with('…'));
    }

    #[test]
    fn empty_verdict_falls_back_to_persona() {
        let entry = HistoryEntry::new(junior(""), None, None, None);
        assert_eq!(entry.title, "junior review");
    }

    #[test]
    fn entries_get_unique_ids() {
        let a = HistoryEntry::new(junior("a"), None, None, None);
        let b = HistoryEntry::new(junior("b"), None, None, None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn entry_serializes_camel_case() {
        let entry = HistoryEntry::new(junior("v"), None, Some("Security".into()), None);
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["focusArea"], "Security");
        assert!(value.get("language").is_none());
        let back: HistoryEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }
}
