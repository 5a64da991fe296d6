use crate::common::{Clock, GuestMessage, SystemClock};

use super::error::{StorageError, StorageResult};
use super::slots::SlotStorage;

/// Slot key used by the invitation page.
pub const DEFAULT_STORE_KEY: &str = "INV_GUESTBOOK_V1";

/// Owns the guestbook collection. Every UI handler goes through this type;
/// nothing else reads or writes the slot.
///
/// Writes are read-modify-write on the whole collection: two stores pointed at
/// the same slot race, and the last writer wins.
pub struct GuestbookStore<S, C = SystemClock> {
    slots: S,
    key: String,
    clock: C,
}

impl<S: SlotStorage> GuestbookStore<S> {
    pub fn new(slots: S, key: impl Into<String>) -> Self {
        Self::with_clock(slots, key, SystemClock)
    }
}

impl<S: SlotStorage, C: Clock> GuestbookStore<S, C> {
    pub fn with_clock(slots: S, key: impl Into<String>, clock: C) -> Self {
        Self {
            slots,
            key: key.into(),
            clock,
        }
    }

    /// Read the collection, reporting unreadable slot contents as
    /// [`StorageError::Corrupt`].
    pub fn try_load(&self) -> StorageResult<Vec<GuestMessage>> {
        let Some(raw) = self.slots.get_item(&self.key)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str::<Vec<GuestMessage>>(&raw).map_err(|source| StorageError::Corrupt {
            key: self.key.clone(),
            source,
        })
    }

    /// Read the collection in storage order. Never fails: a missing slot,
    /// unreadable contents, or a read error all yield an empty collection.
    pub fn load(&self) -> Vec<GuestMessage> {
        match self.try_load() {
            Ok(messages) => messages,
            Err(err) => {
                log::warn!("Discarding guestbook contents: {err}");
                Vec::new()
            }
        }
    }

    /// Overwrite the slot with `messages`.
    pub fn save(&mut self, messages: &[GuestMessage]) -> StorageResult<()> {
        let json = serde_json::to_string(messages)?;
        self.slots.set_item(&self.key, &json)?;
        log::debug!("Saved {} guestbook entries to `{}`", messages.len(), self.key);
        Ok(())
    }

    /// Append a new entry stamped with the current time and persist the
    /// whole collection. Callers are expected to pass trimmed, non-empty text.
    ///
    /// Unreadable contents are replaced, but a failed read aborts before
    /// anything is written so earlier entries are never overwritten.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> StorageResult<GuestMessage> {
        let entry = GuestMessage::new(name, message, self.clock.now_millis());
        let mut messages = match self.try_load() {
            Ok(messages) => messages,
            Err(err @ StorageError::Corrupt { .. }) => {
                log::warn!("Discarding guestbook contents: {err}");
                Vec::new()
            }
            Err(err) => return Err(err),
        };
        messages.push(entry.clone());
        self.save(&messages)?;
        log::info!("Guestbook entry added by {}", entry.name);
        Ok(entry)
    }

    /// Entries newest first. Equal timestamps keep their storage order.
    pub fn list(&self) -> Vec<GuestMessage> {
        let mut messages = self.load();
        messages.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        messages
    }

    /// Delete the slot.
    pub fn clear(&mut self) -> StorageResult<()> {
        self.slots.remove_item(&self.key)?;
        log::info!("Guestbook `{}` cleared", self.key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::clock::testing::ManualClock;
    use crate::storage::{MemorySlots, SqliteSlots};

    const T0: i64 = 1_774_000_000_000;

    /// Wraps `MemorySlots`; reads fail while `fail_reads` is set.
    #[derive(Default)]
    struct FlakySlots {
        inner: MemorySlots,
        fail_reads: std::cell::Cell<bool>,
    }

    impl SlotStorage for FlakySlots {
        fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
            if self.fail_reads.get() {
                return Err(StorageError::Io(std::io::Error::other("database is locked")));
            }
            self.inner.get_item(key)
        }

        fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
            self.inner.set_item(key, value)
        }

        fn remove_item(&mut self, key: &str) -> StorageResult<()> {
            self.inner.remove_item(key)
        }
    }

    fn store(clock: &ManualClock) -> GuestbookStore<MemorySlots, &ManualClock> {
        GuestbookStore::with_clock(MemorySlots::new(), DEFAULT_STORE_KEY, clock)
    }

    #[test]
    fn empty_slot_loads_as_empty() {
        let clock = ManualClock::starting_at(T0);
        let store = store(&clock);
        assert!(store.load().is_empty());
        assert!(store.list().is_empty());
        assert!(store.try_load().unwrap().is_empty());
    }

    #[test]
    fn add_then_list_grows_by_one() {
        let clock = ManualClock::starting_at(T0);
        let mut store = store(&clock);
        store.add("Ana", "Selamat!").unwrap();
        let before = store.list().len();

        clock.advance(5);
        let call_time = clock.now_millis();
        let created = store.add("Citra", "Bahagia selalu").unwrap();
        let after = store.list();

        assert_eq!(after.len(), before + 1);
        assert_eq!(created.name, "Citra");
        assert_eq!(created.message, "Bahagia selalu");
        assert!(created.timestamp >= call_time);
        assert!(after.contains(&created));
    }

    #[test]
    fn list_is_newest_first() {
        let clock = ManualClock::starting_at(T0);
        let mut store = store(&clock);

        store.add("Ana", "Selamat!").unwrap();
        clock.advance(1_000);
        store.add("Budi", "Hi").unwrap();

        let names: Vec<_> = store.list().into_iter().map(|m| m.name).collect();
        assert_eq!(names, ["Budi", "Ana"]);
    }

    #[test]
    fn list_sorts_unordered_storage_and_keeps_ties_stable() {
        let clock = ManualClock::starting_at(T0);
        let mut store = store(&clock);
        let stored = vec![
            GuestMessage::new("a", "x", 10),
            GuestMessage::new("b", "x", 30),
            GuestMessage::new("c", "x", 20),
            GuestMessage::new("d", "x", 30),
        ];
        store.save(&stored).unwrap();

        let names: Vec<_> = store.list().into_iter().map(|m| m.name).collect();
        assert_eq!(names, ["b", "d", "c", "a"]);
        // storage order is untouched by reads
        assert_eq!(store.load(), stored);
    }

    #[test]
    fn clear_empties_any_state() {
        let clock = ManualClock::starting_at(T0);
        let mut store = store(&clock);
        store.clear().unwrap();
        assert!(store.list().is_empty());

        store.add("Ana", "Selamat!").unwrap();
        store.add("Budi", "Hi").unwrap();
        store.clear().unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn save_then_load_returns_the_same_sequence() {
        let clock = ManualClock::starting_at(T0);
        let mut store = store(&clock);
        let messages = vec![
            GuestMessage::new("Ana", "Selamat! <3", T0),
            GuestMessage::new("Budi", "Semoga \"sakinah\"", T0 - 60_000),
        ];

        store.save(&messages).unwrap();
        assert_eq!(store.load(), messages);
    }

    #[test]
    fn malformed_slot_contents_load_as_empty() {
        let clock = ManualClock::starting_at(T0);
        for raw in [
            r#"{"name":"Ana","message":"Hi","ts":1}"#,
            "not json at all",
            "[1, 2, 3]",
            r#"[{"name":"Ana"}]"#,
            "",
        ] {
            let mut slots = MemorySlots::new();
            slots.set_item(DEFAULT_STORE_KEY, raw).unwrap();
            let store = GuestbookStore::with_clock(slots, DEFAULT_STORE_KEY, &clock);

            assert!(store.load().is_empty(), "{raw:?} should load as empty");
            assert!(store.list().is_empty());
            assert!(matches!(
                store.try_load(),
                Err(StorageError::Corrupt { .. })
            ));
        }
    }

    #[test]
    fn add_over_corrupt_slot_starts_fresh() {
        let clock = ManualClock::starting_at(T0);
        let mut slots = MemorySlots::new();
        slots.set_item(DEFAULT_STORE_KEY, "{oops").unwrap();
        let mut store = GuestbookStore::with_clock(slots, DEFAULT_STORE_KEY, &clock);

        store.add("Ana", "Selamat!").unwrap();
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn read_errors_load_as_empty() {
        let clock = ManualClock::starting_at(T0);
        let mut store = GuestbookStore::with_clock(FlakySlots::default(), DEFAULT_STORE_KEY, &clock);
        store.add("Ana", "Selamat!").unwrap();

        store.slots.fail_reads.set(true);
        assert!(store.load().is_empty());
        assert!(store.list().is_empty());
        assert!(matches!(store.try_load(), Err(StorageError::Io(_))));
    }

    #[test]
    fn failed_read_during_add_keeps_existing_entries() {
        let clock = ManualClock::starting_at(T0);
        let mut store = GuestbookStore::with_clock(FlakySlots::default(), DEFAULT_STORE_KEY, &clock);
        store.add("Ana", "Selamat!").unwrap();
        clock.advance(1_000);
        store.add("Citra", "Bahagia selalu").unwrap();

        store.slots.fail_reads.set(true);
        clock.advance(1_000);
        let err = store.add("Budi", "Hi").unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));

        store.slots.fail_reads.set(false);
        let names: Vec<_> = store.list().into_iter().map(|m| m.name).collect();
        assert_eq!(names, ["Citra", "Ana"]);

        store.add("Budi", "Hi").unwrap();
        assert_eq!(store.list().len(), 3);
    }

    #[test]
    fn write_failures_reach_the_caller() {
        let clock = ManualClock::starting_at(T0);
        let slots = MemorySlots::with_quota(Some(64));
        let mut store = GuestbookStore::with_clock(slots, DEFAULT_STORE_KEY, &clock);

        store.add("Ana", "Hi").unwrap();
        let err = store.add("Budi", "x".repeat(100)).unwrap_err();

        assert!(matches!(err, StorageError::QuotaExceeded { .. }));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn end_to_end_on_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guestbook.db");
        let clock = ManualClock::starting_at(T0);

        {
            let slots = SqliteSlots::open(&path, "local", None).unwrap();
            let mut store = GuestbookStore::with_clock(slots, DEFAULT_STORE_KEY, &clock);
            let ana = store.add("Ana", "Selamat!").unwrap();

            let listed = store.list();
            assert_eq!(listed.len(), 1);
            assert_eq!(listed[0].name, "Ana");
            assert_eq!(listed[0].message, "Selamat!");
            assert_eq!(listed[0].timestamp, ana.timestamp);
        }

        clock.advance(1_000);
        let slots = SqliteSlots::open(&path, "local", None).unwrap();
        let mut store = GuestbookStore::with_clock(slots, DEFAULT_STORE_KEY, &clock);
        store.add("Budi", "Hi").unwrap();

        let listed: Vec<_> = store
            .list()
            .into_iter()
            .map(|m| (m.name, m.message))
            .collect();
        assert_eq!(
            listed,
            [
                ("Budi".to_string(), "Hi".to_string()),
                ("Ana".to_string(), "Selamat!".to_string())
            ]
        );
    }
}
