use std::sync::{Arc, Mutex};

use tracing::{debug, error, warn};

use crate::app::Result;
use crate::backend::Backend;
use crate::domain::{Bookmark, BookmarkDraft, SortOrder};

/// Notification that the collection under a backend key changed.
///
/// Carries only the affected key. Consumers must re-`load()` from the
/// backend rather than trust any payload; the same notice is emitted for
/// every kind of mutation and the expected reaction is an idempotent full
/// refresh.
#[derive(Debug, Clone)]
pub struct ChangeNotice {
    pub key: String,
}

/// Outcome of [`BookmarkStore::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
    Invalid,
}

/// Outcome of [`BookmarkStore::remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
}

/// Outcome of [`BookmarkStore::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    Invalid,
}

type ChangeListener = Arc<dyn Fn(&ChangeNotice) + Send + Sync>;

/// The canonical bookmark collection over a shared key-value slot.
///
/// Every mutation re-derives from a fresh `load()` and re-validates before
/// writing back (read-validate-write); the store never mutates a cached
/// in-memory copy. Contexts sharing the slot race with last-write-wins
/// semantics; the window between read and write inside one mutation is a
/// known, accepted race.
pub struct BookmarkStore {
    backend: Arc<dyn Backend>,
    key: String,
    listeners: Mutex<Vec<ChangeListener>>,
}

impl BookmarkStore {
    pub fn new(backend: Arc<dyn Backend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Register a listener invoked after every persisted mutation.
    pub fn on_changed(&self, listener: impl Fn(&ChangeNotice) + Send + Sync + 'static) {
        let mut listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        listeners.push(Arc::new(listener));
    }

    fn notify(&self) {
        let notice = ChangeNotice {
            key: self.key.clone(),
        };
        // Snapshot under the lock, invoke outside it: a listener may call
        // back into the store (load, even on_changed) without deadlocking.
        let snapshot: Vec<ChangeListener> = {
            let listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
            listeners.clone()
        };
        for listener in snapshot.iter() {
            listener(&notice);
        }
    }

    /// Read the collection from the backend.
    ///
    /// Never fails: a missing slot is an empty collection, a corrupt or
    /// unreadable blob is recovered to an empty collection and logged.
    /// Entries with a blank id are dropped (the slot may contain strays
    /// from partial writes; the store self-heals on every read).
    pub fn load(&self) -> Vec<Bookmark> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read bookmark slot, treating as empty");
                return Vec::new();
            }
        };

        let parsed: Vec<Bookmark> = match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(key = %self.key, error = %e, "corrupt bookmark blob, treating as empty");
                return Vec::new();
            }
        };

        let total = parsed.len();
        let valid: Vec<Bookmark> = parsed.into_iter().filter(Bookmark::has_valid_id).collect();
        if valid.len() < total {
            debug!(
                key = %self.key,
                dropped = total - valid.len(),
                "dropped entries with blank ids on load"
            );
        }
        valid
    }

    /// Persist the collection, then notify listeners.
    ///
    /// Blank-id entries are filtered out before serialization. A rejected
    /// write is logged and returned as an error; callers treat it as a
    /// non-fatal failed save and do not retry.
    pub fn save(&self, bookmarks: &[Bookmark]) -> Result<()> {
        let valid: Vec<&Bookmark> = bookmarks.iter().filter(|b| b.has_valid_id()).collect();
        let raw = serde_json::to_string(&valid)?;

        if let Err(e) = self.backend.set(&self.key, &raw) {
            error!(key = %self.key, error = %e, "failed to persist bookmarks");
            return Err(e);
        }

        self.notify();
        Ok(())
    }

    /// Membership test against a fresh load. Blank ids are never present.
    pub fn is_bookmarked(&self, id: &str) -> bool {
        if !Bookmark::is_valid_id(id) {
            return false;
        }
        self.load().iter().any(|b| b.id == id)
    }

    /// Validate and insert a new bookmark at the head of the collection.
    ///
    /// Returns `Invalid` for a blank id and `AlreadyPresent` for a known
    /// one, mutating nothing in either case. `Err` means the entry was
    /// accepted but the write was rejected by the backend.
    pub fn add(&self, draft: BookmarkDraft) -> Result<AddOutcome> {
        if !Bookmark::is_valid_id(&draft.id) {
            warn!("refusing to bookmark entry with blank id");
            return Ok(AddOutcome::Invalid);
        }

        let mut bookmarks = self.load();
        if bookmarks.iter().any(|b| b.id == draft.id) {
            return Ok(AddOutcome::AlreadyPresent);
        }

        bookmarks.insert(0, Bookmark::from_draft(draft));
        self.save(&bookmarks)?;
        Ok(AddOutcome::Added)
    }

    /// Remove the bookmark with the given id, if present.
    pub fn remove(&self, id: &str) -> Result<RemoveOutcome> {
        if !Bookmark::is_valid_id(id) {
            return Ok(RemoveOutcome::NotFound);
        }

        let bookmarks = self.load();
        let filtered: Vec<Bookmark> = bookmarks.iter().filter(|b| b.id != id).cloned().collect();
        if filtered.len() == bookmarks.len() {
            return Ok(RemoveOutcome::NotFound);
        }

        self.save(&filtered)?;
        Ok(RemoveOutcome::Removed)
    }

    /// Flip membership: remove the entry if its id is bookmarked, add it
    /// otherwise. The selection-path equivalent of a bookmark button.
    pub fn toggle(&self, draft: BookmarkDraft) -> Result<ToggleOutcome> {
        if !Bookmark::is_valid_id(&draft.id) {
            return Ok(ToggleOutcome::Invalid);
        }

        if self.is_bookmarked(&draft.id) {
            self.remove(&draft.id)?;
            Ok(ToggleOutcome::Removed)
        } else {
            self.add(draft)?;
            Ok(ToggleOutcome::Added)
        }
    }

    /// Delete the backend slot, emptying the collection everywhere.
    pub fn clear(&self) -> Result<()> {
        self.backend.remove(&self.key)?;
        self.notify();
        Ok(())
    }

    /// Reorder the collection and persist the new order.
    ///
    /// Sorting is a durable mutation: the order survives reload in every
    /// context until the next add puts a fresh entry at the head.
    pub fn sort(&self, order: SortOrder) -> Result<Vec<Bookmark>> {
        let mut bookmarks = self.load();
        order.apply(&mut bookmarks);
        self.save(&bookmarks)?;
        Ok(bookmarks)
    }
}
