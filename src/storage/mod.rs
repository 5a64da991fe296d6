pub mod database;
pub mod error;
pub mod guestbook;
pub mod slots;
pub mod sqlite_slots;

pub use error::{StorageError, StorageResult};
pub use guestbook::GuestbookStore;
pub use slots::{MemorySlots, SlotStorage};
pub use sqlite_slots::SqliteSlots;

use std::fs;
use std::path::Path;

/// Ensure the directory holding `path` exists
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
