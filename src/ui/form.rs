use crate::common::{Clock, GuestMessage};
use crate::storage::{GuestbookStore, SlotStorage, StorageResult};

/// Guestbook submission fields.
#[derive(Debug, Clone, Default)]
pub struct GuestbookForm {
    pub name: String,
    pub message: String,
}

impl GuestbookForm {
    /// Form with the name field filled in, e.g. from the invitation link.
    pub fn prefilled(name: Option<&str>) -> Self {
        Self {
            name: name.unwrap_or_default().to_string(),
            message: String::new(),
        }
    }

    /// Characters typed into the message field so far.
    pub fn char_count(&self) -> usize {
        self.message.chars().count()
    }

    /// Submit to `store` when both fields have text after trimming.
    ///
    /// Blank submissions are dropped without touching the store. On success
    /// the message field is cleared and the name is kept for the next entry.
    pub fn submit<S, C>(
        &mut self,
        store: &mut GuestbookStore<S, C>,
    ) -> StorageResult<Option<GuestMessage>>
    where
        S: SlotStorage,
        C: Clock,
    {
        let name = self.name.trim();
        let message = self.message.trim();
        if name.is_empty() || message.is_empty() {
            log::debug!("Ignoring guestbook submission with a blank field");
            return Ok(None);
        }

        let created = store.add(name, message)?;
        self.message.clear();
        Ok(Some(created))
    }
}
