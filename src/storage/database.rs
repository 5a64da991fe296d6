use rusqlite::{Connection, Result as SqlResult};
use std::path::Path;

use super::error::StorageResult;
use super::ensure_parent_dir;

/// Base database connection wrapper
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database file, creating its directory first.
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let path = path.as_ref();
        ensure_parent_dir(path)?;
        let conn = Connection::open(path)?;
        Self::configure(&conn)?;
        log::debug!("Opened slot database at {}", path.display());
        Ok(Self { conn })
    }

    fn configure(conn: &Connection) -> SqlResult<()> {
        // Writes are synchronous; a second process holding the file waits briefly.
        conn.busy_timeout(std::time::Duration::from_millis(500))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
