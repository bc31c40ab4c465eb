pub mod bookmark;
pub mod sort;

pub use bookmark::{Bookmark, BookmarkDraft, StatusKind, UNKNOWN_TITLE};
pub use sort::SortOrder;
