pub mod file;
pub mod memory;

use crate::app::Result;

pub use file::FileBackend;
pub use memory::MemoryBackend;

/// Key-value persistence primitive: one string blob per key.
///
/// The backend makes no ordering guarantees across contexts sharing the
/// same slot; the last write wins. Reads and writes are synchronous and
/// complete (or fail) immediately.
pub trait Backend: Send + Sync {
    /// Read the blob stored under `key`. Absence is not an error.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write the blob stored under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the slot. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> Result<()>;
}
