use thiserror::Error;

/// Failures surfaced by the slot medium and the guestbook store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to encode guestbook: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("slot `{key}` holds unreadable data: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("slot `{key}` would hold {size} bytes, quota is {quota}")]
    QuotaExceeded { key: String, size: usize, quota: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;
