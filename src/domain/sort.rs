use std::cmp::Ordering;

use crate::domain::Bookmark;

/// Sort criteria for the collection. Applying one is a durable mutation:
/// the resulting order is persisted and survives reload in every context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Newest,
    Oldest,
    TitleAsc,
    TitleDesc,
}

impl SortOrder {
    /// Parse a criterion name. Unknown names yield `None`; callers skip
    /// the store call, so an unrecognized criterion is a no-op.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "newest" => Some(SortOrder::Newest),
            "oldest" => Some(SortOrder::Oldest),
            "title" | "title-asc" => Some(SortOrder::TitleAsc),
            "title-desc" => Some(SortOrder::TitleDesc),
            _ => None,
        }
    }

    pub fn apply(self, bookmarks: &mut [Bookmark]) {
        match self {
            SortOrder::Newest => bookmarks.sort_by_key(|b| std::cmp::Reverse(b.added_at)),
            SortOrder::Oldest => bookmarks.sort_by_key(|b| b.added_at),
            SortOrder::TitleAsc => bookmarks.sort_by(|a, b| compare_titles(&a.title, &b.title)),
            SortOrder::TitleDesc => bookmarks.sort_by(|a, b| compare_titles(&b.title, &a.title)),
        }
    }
}

/// Case-insensitive title comparison, original strings as tie-break so
/// the order stays deterministic.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookmarkDraft;

    fn bookmark(id: &str, title: &str, added_at: i64) -> Bookmark {
        let mut draft = BookmarkDraft::new(id);
        draft.title = Some(title.to_string());
        let mut b = Bookmark::from_draft(draft);
        b.added_at = added_at;
        b
    }

    #[test]
    fn test_parse_known_criteria() {
        assert_eq!(SortOrder::parse("newest"), Some(SortOrder::Newest));
        assert_eq!(SortOrder::parse("oldest"), Some(SortOrder::Oldest));
        assert_eq!(SortOrder::parse("title"), Some(SortOrder::TitleAsc));
        assert_eq!(SortOrder::parse("title-asc"), Some(SortOrder::TitleAsc));
        assert_eq!(SortOrder::parse("title-desc"), Some(SortOrder::TitleDesc));
    }

    #[test]
    fn test_parse_unknown_criterion() {
        assert_eq!(SortOrder::parse("score"), None);
        assert_eq!(SortOrder::parse(""), None);
    }

    #[test]
    fn test_newest_orders_by_timestamp_descending() {
        let mut items = vec![
            bookmark("a", "A", 100),
            bookmark("b", "B", 300),
            bookmark("c", "C", 200),
        ];
        SortOrder::Newest.apply(&mut items);
        let ids: Vec<&str> = items.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
    }

    #[test]
    fn test_oldest_puts_missing_timestamps_first() {
        let mut items = vec![bookmark("a", "A", 100), bookmark("b", "B", 0)];
        SortOrder::Oldest.apply(&mut items);
        assert_eq!(items[0].id, "b");
    }

    #[test]
    fn test_title_asc_is_case_insensitive() {
        let mut items = vec![
            bookmark("1", "Banana", 0),
            bookmark("2", "apple", 0),
            bookmark("3", "Cherry", 0),
        ];
        SortOrder::TitleAsc.apply(&mut items);
        let titles: Vec<&str> = items.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["apple", "Banana", "Cherry"]);
    }

    #[test]
    fn test_title_desc_reverses_order() {
        let mut items = vec![
            bookmark("1", "Banana", 0),
            bookmark("2", "apple", 0),
            bookmark("3", "Cherry", 0),
        ];
        SortOrder::TitleDesc.apply(&mut items);
        let titles: Vec<&str> = items.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["Cherry", "Banana", "apple"]);
    }
}
