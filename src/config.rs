use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::storage::guestbook::DEFAULT_STORE_KEY;

pub const DEFAULT_CONFIG_PATH: &str = "config/invitation.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite file holding the slots
    pub database_path: String,
    /// Scope of the slots inside the database
    pub origin: String,
    pub store_key: String,
    /// Largest value a slot may hold; unlimited when absent
    pub quota_bytes: Option<usize>,
    /// RFC 3339 start of the event
    pub event_time: String,
    pub account_number: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: "data/guestbook.db".to_string(),
            origin: "local".to_string(),
            store_key: DEFAULT_STORE_KEY.to_string(),
            quota_bytes: None,
            event_time: "2026-03-28T18:30:00+07:00".to_string(),
            account_number: "1440417341".to_string(),
        }
    }
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}
