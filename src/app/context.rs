use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::app::error::{Result, ShioriError};
use crate::backend::{Backend, FileBackend, MemoryBackend};
use crate::config::Config;
use crate::store::BookmarkStore;
use crate::sync::ChangeWatcher;

/// Wires one context together: the shared backend slot, the store over
/// it, and the watcher that observes other contexts' writes to it.
pub struct AppContext {
    pub store: Arc<BookmarkStore>,
    pub watcher: Arc<ChangeWatcher>,
    pub config: Config,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let data_dir = match config.storage.dir.clone() {
            Some(dir) => dir,
            None => Self::default_data_dir()?,
        };
        let backend: Arc<dyn Backend> = Arc::new(FileBackend::new(data_dir)?);
        Ok(Self::with_backend(backend, config))
    }

    pub fn in_memory() -> Self {
        Self::with_backend(Arc::new(MemoryBackend::new()), Config::default())
    }

    fn with_backend(backend: Arc<dyn Backend>, config: Config) -> Self {
        let key = config.storage.key.clone();
        let store = Arc::new(BookmarkStore::new(backend.clone(), key.clone()));
        let watcher = Arc::new(ChangeWatcher::new(
            backend,
            key,
            Duration::from_millis(config.sync.poll_ms),
        ));
        Self {
            store,
            watcher,
            config,
        }
    }

    fn default_data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| ShioriError::Config("Could not find data directory".into()))?;
        Ok(data_dir.join("shiori"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookmarkDraft;

    #[test]
    fn test_in_memory_context_round_trips() {
        let ctx = AppContext::in_memory();
        ctx.store.add(BookmarkDraft::new("x")).unwrap();
        assert!(ctx.store.is_bookmarked("x"));
    }

    #[test]
    fn test_store_and_watcher_share_the_slot() {
        let ctx = AppContext::in_memory();
        assert!(ctx.watcher.poll().is_none());

        ctx.store.add(BookmarkDraft::new("x")).unwrap();
        // The watcher sees the store's write as a slot change.
        assert!(ctx.watcher.poll().is_some());
    }
}
