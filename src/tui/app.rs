use crate::domain::{Bookmark, SortOrder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Filter,
    ConfirmRemove,
    ConfirmClear,
}

pub struct TuiApp {
    pub bookmarks: Vec<Bookmark>,
    pub selected: usize,
    pub mode: Mode,
    pub filter: String,
    pub sort_order: Option<SortOrder>,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl TuiApp {
    pub fn new() -> Self {
        Self {
            bookmarks: Vec::new(),
            selected: 0,
            mode: Mode::Browse,
            filter: String::new(),
            sort_order: None,
            should_quit: false,
            status_message: None,
        }
    }

    /// Replace the collection after a (re)load, keeping the selection in
    /// range.
    pub fn set_bookmarks(&mut self, bookmarks: Vec<Bookmark>) {
        self.bookmarks = bookmarks;
        let visible = self.visible().len();
        if self.selected >= visible && visible > 0 {
            self.selected = visible - 1;
        }
        if visible == 0 {
            self.selected = 0;
        }
    }

    /// The filtered view of the collection. Filtering is display-only:
    /// it never touches the persisted order.
    pub fn visible(&self) -> Vec<&Bookmark> {
        if self.filter.is_empty() {
            return self.bookmarks.iter().collect();
        }
        let query = self.filter.to_lowercase();
        self.bookmarks
            .iter()
            .filter(|b| b.title.to_lowercase().contains(&query))
            .collect()
    }

    pub fn selected_bookmark(&self) -> Option<&Bookmark> {
        self.visible().get(self.selected).copied()
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self) {
        let visible = self.visible().len();
        if visible > 0 && self.selected < visible - 1 {
            self.selected += 1;
        }
    }

    /// Advance to the next sort criterion in the cycle.
    pub fn next_sort_order(&mut self) -> SortOrder {
        let next = match self.sort_order {
            None | Some(SortOrder::TitleDesc) => SortOrder::Newest,
            Some(SortOrder::Newest) => SortOrder::Oldest,
            Some(SortOrder::Oldest) => SortOrder::TitleAsc,
            Some(SortOrder::TitleAsc) => SortOrder::TitleDesc,
        };
        self.sort_order = Some(next);
        next
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter.push(c);
        self.selected = 0;
    }

    pub fn pop_filter_char(&mut self) {
        self.filter.pop();
        self.selected = 0;
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
        self.selected = 0;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

impl Default for TuiApp {
    fn default() -> Self {
        Self::new()
    }
}
