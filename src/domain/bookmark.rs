use chrono::Utc;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// One entry in the bookmark collection.
///
/// `id` is the uniqueness key; everything else is display data. `added_at`
/// is epoch milliseconds, set once at creation and never mutated. Entries
/// persisted without a timestamp deserialize as 0 and sort as the oldest
/// possible value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub score: String,
    #[serde(default)]
    pub media_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub added_at: i64,
}

/// Candidate data for a new bookmark, as supplied by the caller.
///
/// Every persisted entry is constructed through [`Bookmark::from_draft`],
/// which is the single place field defaults are applied.
#[derive(Debug, Clone, Default)]
pub struct BookmarkDraft {
    pub id: String,
    pub title: Option<String>,
    pub poster: Option<String>,
    pub score: Option<String>,
    pub media_type: Option<String>,
    pub status: Option<String>,
}

impl BookmarkDraft {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

impl Bookmark {
    /// Normalize a draft into a persisted entry, stamping `added_at`.
    pub fn from_draft(draft: BookmarkDraft) -> Self {
        Self {
            id: draft.id,
            title: draft
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            poster: draft.poster.unwrap_or_default(),
            score: draft.score.unwrap_or_default(),
            media_type: draft.media_type.unwrap_or_default(),
            status: draft.status.unwrap_or_default(),
            added_at: Utc::now().timestamp_millis(),
        }
    }

    /// A whitespace-only id is treated as empty and thus invalid.
    pub fn is_valid_id(id: &str) -> bool {
        !id.trim().is_empty()
    }

    pub fn has_valid_id(&self) -> bool {
        Self::is_valid_id(&self.id)
    }

    pub fn status_kind(&self) -> StatusKind {
        match self.status.as_str() {
            "Ongoing" => StatusKind::Ongoing,
            "Completed" => StatusKind::Completed,
            _ => StatusKind::Other,
        }
    }
}

/// Display classification of the lifecycle label; drives badge styling
/// only, never store behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Ongoing,
    Completed,
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_draft_applies_defaults() {
        let before = Utc::now().timestamp_millis();
        let bookmark = Bookmark::from_draft(BookmarkDraft::new("one-piece"));

        assert_eq!(bookmark.id, "one-piece");
        assert_eq!(bookmark.title, UNKNOWN_TITLE);
        assert_eq!(bookmark.poster, "");
        assert_eq!(bookmark.score, "");
        assert_eq!(bookmark.media_type, "");
        assert_eq!(bookmark.status, "");
        assert!(bookmark.added_at >= before);
    }

    #[test]
    fn test_from_draft_keeps_supplied_fields() {
        let draft = BookmarkDraft {
            id: "frieren".into(),
            title: Some("Frieren".into()),
            poster: Some("https://example.com/frieren.jpg".into()),
            score: Some("9.1".into()),
            media_type: Some("TV".into()),
            status: Some("Completed".into()),
        };
        let bookmark = Bookmark::from_draft(draft);

        assert_eq!(bookmark.title, "Frieren");
        assert_eq!(bookmark.poster, "https://example.com/frieren.jpg");
        assert_eq!(bookmark.score, "9.1");
        assert_eq!(bookmark.media_type, "TV");
        assert_eq!(bookmark.status, "Completed");
    }

    #[test]
    fn test_empty_title_falls_back_to_placeholder() {
        let mut draft = BookmarkDraft::new("x");
        draft.title = Some(String::new());
        assert_eq!(Bookmark::from_draft(draft).title, UNKNOWN_TITLE);
    }

    #[test]
    fn test_id_validity() {
        assert!(Bookmark::is_valid_id("abc"));
        assert!(!Bookmark::is_valid_id(""));
        assert!(!Bookmark::is_valid_id("   "));
        assert!(!Bookmark::is_valid_id("\t\n"));
    }

    #[test]
    fn test_status_kind_mapping() {
        let mut bookmark = Bookmark::from_draft(BookmarkDraft::new("x"));
        assert_eq!(bookmark.status_kind(), StatusKind::Other);

        bookmark.status = "Ongoing".into();
        assert_eq!(bookmark.status_kind(), StatusKind::Ongoing);

        bookmark.status = "Completed".into();
        assert_eq!(bookmark.status_kind(), StatusKind::Completed);

        bookmark.status = "Hiatus".into();
        assert_eq!(bookmark.status_kind(), StatusKind::Other);
    }

    #[test]
    fn test_serialized_field_names_are_camel_case() {
        let bookmark = Bookmark::from_draft(BookmarkDraft::new("x"));
        let json = serde_json::to_value(&bookmark).unwrap();

        assert!(json.get("mediaType").is_some());
        assert!(json.get("addedAt").is_some());
        assert!(json.get("media_type").is_none());
    }

    #[test]
    fn test_missing_added_at_deserializes_as_zero() {
        let json = r#"{"id":"x","title":"X"}"#;
        let bookmark: Bookmark = serde_json::from_str(json).unwrap();
        assert_eq!(bookmark.added_at, 0);
    }
}
