use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunables of the page bindings. Every field falls back to its default when
/// omitted from a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub debounce_ms: u64,
    pub reload_delay_ms: u64,
    pub notification_timeout_ms: u64,
    pub remote_min_input_len: usize,
    pub search_param: String,
    pub bulk_delete_suffix: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            reload_delay_ms: 1000,
            notification_timeout_ms: 5000,
            remote_min_input_len: 1,
            search_param: "q".to_string(),
            bulk_delete_suffix: "/bulk-delete".to_string(),
        }
    }
}

impl UiSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn reload_delay(&self) -> Duration {
        Duration::from_millis(self.reload_delay_ms)
    }

    pub fn notification_timeout(&self) -> Duration {
        Duration::from_millis(self.notification_timeout_ms)
    }
}
