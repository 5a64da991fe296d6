use std::collections::HashMap;

use super::error::{StorageError, StorageResult};

/// A persistent key-value medium with `localStorage` semantics: string values
/// under named slots, whole-value reads and overwrites.
pub trait SlotStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()>;
    fn remove_item(&mut self, key: &str) -> StorageResult<()>;
}

impl<T: SlotStorage + ?Sized> SlotStorage for Box<T> {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }
}

/// Reject `value` when it would not fit into `quota` bytes.
pub(crate) fn check_quota(key: &str, value: &str, quota: Option<usize>) -> StorageResult<()> {
    match quota {
        Some(quota) if value.len() > quota => Err(StorageError::QuotaExceeded {
            key: key.to_string(),
            size: value.len(),
            quota,
        }),
        _ => Ok(()),
    }
}

/// In-process medium; contents live as long as the value does.
#[derive(Debug, Default, Clone)]
pub struct MemorySlots {
    items: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: Option<usize>) -> Self {
        Self {
            items: HashMap::new(),
            quota_bytes,
        }
    }
}

impl SlotStorage for MemorySlots {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        check_quota(key, value, self.quota_bytes)?;
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        self.items.remove(key);
        Ok(())
    }
}
