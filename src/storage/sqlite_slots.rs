use chrono::Utc;
use rusqlite::{OptionalExtension, params};
use std::path::Path;

use super::database::Database;
use super::error::StorageResult;
use super::slots::{SlotStorage, check_quota};

/// Slot medium backed by SQLite. Every slot is scoped to an origin, so two
/// invitations sharing one database file never see each other's data.
pub struct SqliteSlots {
    db: Database,
    origin: String,
    quota_bytes: Option<usize>,
}

impl SqliteSlots {
    /// Open slots for `origin` in the database at `path`
    pub fn open<P: AsRef<Path>>(
        path: P,
        origin: &str,
        quota_bytes: Option<usize>,
    ) -> StorageResult<Self> {
        Self::from_database(Database::open(path)?, origin, quota_bytes)
    }

    fn from_database(db: Database, origin: &str, quota_bytes: Option<usize>) -> StorageResult<Self> {
        let slots = Self {
            db,
            origin: origin.to_string(),
            quota_bytes,
        };
        slots.init_schema()?;
        Ok(slots)
    }

    fn init_schema(&self) -> StorageResult<()> {
        let conn = self.db.connection();
        conn.execute(
            "CREATE TABLE IF NOT EXISTS slots (
                origin TEXT NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL,
                PRIMARY KEY (origin, key)
            )",
            [],
        )?;
        Ok(())
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }
}

impl SlotStorage for SqliteSlots {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let conn = self.db.connection();
        let value = conn
            .query_row(
                "SELECT value FROM slots WHERE origin = ?1 AND key = ?2",
                params![self.origin, key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        check_quota(key, value, self.quota_bytes)?;
        let conn = self.db.connection();
        conn.execute(
            "INSERT OR REPLACE INTO slots (origin, key, value, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![self.origin, key, value, Utc::now().timestamp_millis()],
        )?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        let conn = self.db.connection();
        conn.execute(
            "DELETE FROM slots WHERE origin = ?1 AND key = ?2",
            params![self.origin, key],
        )?;
        Ok(())
    }
}
