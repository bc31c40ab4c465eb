use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use sha2::{Digest, Sha256};
use tokio::time::interval;
use tracing::{debug, warn};

use crate::backend::Backend;
use crate::store::ChangeNotice;

pub const DEFAULT_POLL_MS: u64 = 500;

/// Detects collection changes made outside the current context.
///
/// Other contexts bound to the same backend slot write to it directly;
/// the watcher observes a SHA-256 fingerprint of the stored blob and
/// emits a [`ChangeNotice`] whenever the fingerprint diverges from the
/// last observed value. Slot absence is its own fingerprint state, so a
/// remote `clear` is observable. The notice carries no content; consumers
/// re-load from the backend as the source of truth.
pub struct ChangeWatcher {
    backend: Arc<dyn Backend>,
    key: String,
    poll_interval: Duration,
    last_seen: Mutex<Option<String>>,
    running: Arc<AtomicBool>,
}

impl ChangeWatcher {
    pub fn new(backend: Arc<dyn Backend>, key: impl Into<String>, poll_interval: Duration) -> Self {
        let key = key.into();
        let watcher = Self {
            backend,
            key,
            poll_interval,
            last_seen: Mutex::new(None),
            running: Arc::new(AtomicBool::new(true)),
        };
        watcher.mark_seen();
        watcher
    }

    fn fingerprint(&self) -> Option<String> {
        let raw = match self.backend.get(&self.key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to fingerprint bookmark slot");
                return None;
            }
        };
        let mut hasher = Sha256::new();
        hasher.update(raw.as_bytes());
        Some(hex::encode(hasher.finalize()))
    }

    /// One fingerprint comparison. Returns a notice exactly once per
    /// observed change, `None` while the slot is unchanged.
    pub fn poll(&self) -> Option<ChangeNotice> {
        let current = self.fingerprint();
        let mut last_seen = self.last_seen.lock().unwrap_or_else(|e| e.into_inner());
        if *last_seen == current {
            return None;
        }
        *last_seen = current;
        debug!(key = %self.key, "bookmark slot changed");
        Some(ChangeNotice {
            key: self.key.clone(),
        })
    }

    /// Record the current slot state as seen, suppressing the notice a
    /// local write would otherwise produce on the next poll.
    pub fn mark_seen(&self) {
        let current = self.fingerprint();
        let mut last_seen = self.last_seen.lock().unwrap_or_else(|e| e.into_inner());
        *last_seen = current;
    }

    /// Poll on an interval until [`stop`](Self::stop) is called, invoking
    /// `on_change` for every detected change.
    pub async fn run(&self, on_change: impl Fn(&ChangeNotice)) {
        let mut timer = interval(self.poll_interval);
        timer.tick().await; // skip the immediate first tick

        while self.running.load(Ordering::SeqCst) {
            timer.tick().await;
            if let Some(notice) = self.poll() {
                on_change(&notice);
            }
        }
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    const KEY: &str = "bookmarks";

    fn watcher(backend: Arc<MemoryBackend>) -> ChangeWatcher {
        ChangeWatcher::new(backend, KEY, Duration::from_millis(10))
    }

    #[test]
    fn test_no_change_no_notice() {
        let backend = Arc::new(MemoryBackend::new());
        let w = watcher(backend);
        assert!(w.poll().is_none());
        assert!(w.poll().is_none());
    }

    #[test]
    fn test_external_write_fires_exactly_once() {
        let backend = Arc::new(MemoryBackend::new());
        let w = watcher(backend.clone());

        backend.set(KEY, r#"[{"id":"a","title":"A"}]"#).unwrap();

        let notice = w.poll().expect("change should be detected");
        assert_eq!(notice.key, KEY);
        assert!(w.poll().is_none());
    }

    #[test]
    fn test_each_distinct_write_fires() {
        let backend = Arc::new(MemoryBackend::new());
        let w = watcher(backend.clone());

        backend.set(KEY, "one").unwrap();
        assert!(w.poll().is_some());

        backend.set(KEY, "two").unwrap();
        assert!(w.poll().is_some());
        assert!(w.poll().is_none());
    }

    #[test]
    fn test_rewriting_identical_blob_is_not_a_change() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set(KEY, "same").unwrap();
        let w = watcher(backend.clone());

        backend.set(KEY, "same").unwrap();
        assert!(w.poll().is_none());
    }

    #[test]
    fn test_remote_clear_is_observable() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set(KEY, "data").unwrap();
        let w = watcher(backend.clone());

        backend.remove(KEY).unwrap();
        assert!(w.poll().is_some());
        assert!(w.poll().is_none());
    }

    #[test]
    fn test_mark_seen_suppresses_own_write() {
        let backend = Arc::new(MemoryBackend::new());
        let w = watcher(backend.clone());

        backend.set(KEY, "local write").unwrap();
        w.mark_seen();
        assert!(w.poll().is_none());
    }

    #[tokio::test]
    async fn test_run_invokes_refresh_hook() {
        let backend = Arc::new(MemoryBackend::new());
        let w = Arc::new(watcher(backend.clone()));

        let fired = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let task = {
            let w = w.clone();
            let fired = fired.clone();
            tokio::spawn(async move {
                w.run(|_| {
                    fired.fetch_add(1, Ordering::SeqCst);
                })
                .await;
            })
        };

        backend.set(KEY, "remote write").unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        w.stop();
        task.await.unwrap();

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
