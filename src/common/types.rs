use serde::{Deserialize, Serialize};

/// One submitted greeting in the guestbook.
///
/// Field names match the persisted layout: `{"name", "message", "ts"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestMessage {
    pub name: String,
    pub message: String,
    /// Milliseconds since the Unix epoch, assigned by the store.
    #[serde(rename = "ts")]
    pub timestamp: i64,
}

impl GuestMessage {
    pub fn new(name: impl Into<String>, message: impl Into<String>, timestamp: i64) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            timestamp,
        }
    }
}
