//! Console host configuration, read from a RON file.
//!
//! Every section and field is optional; a missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use admin_core::UiSettings;
use admin_engine::ClientSettings;
use admin_logging::{LogDestination, DEFAULT_LOG_FILE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV: &str = "ADMIN_KIT_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "admin.ron";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ui: UiSettings,
    pub client: ClientConfig,
    pub widgets: WidgetConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_body_bytes: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let defaults = ClientSettings::default();
        Self {
            connect_timeout_ms: defaults.connect_timeout.as_millis() as u64,
            request_timeout_ms: defaults.request_timeout.as_millis() as u64,
            max_body_bytes: defaults.max_body_bytes,
        }
    }
}

impl ClientConfig {
    pub fn settings(&self) -> ClientSettings {
        ClientSettings {
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_body_bytes: self.max_body_bytes,
        }
    }
}

/// Which widget libraries the page provides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub dropdowns: bool,
    pub date_pickers: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            dropdowns: true,
            date_pickers: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `terminal`, `file` or `both`.
    pub destination: String,
    pub level: String,
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            destination: "file".to_string(),
            level: "info".to_string(),
            file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl LogConfig {
    /// Unknown destinations fall back to the log file.
    pub fn destination(&self) -> LogDestination {
        match LogDestination::from_name(&self.destination) {
            Some(LogDestination::Terminal) => LogDestination::Terminal,
            Some(LogDestination::Both(_)) => LogDestination::Both(self.file.clone()),
            _ => LogDestination::File(self.file.clone()),
        }
    }

    pub fn level(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

/// Explicit path, then `$ADMIN_KIT_CONFIG`, then `./admin.ron`.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {:?}", path));
        }
    };
    ron::from_str(&content).with_context(|| format!("failed to parse config {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.ui.debounce(), Duration::from_millis(500));
        assert_eq!(config.client.settings().request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("admin.ron");
        fs::write(
            &path,
            r#"(
                ui: (debounce_ms: 300, search_param: "search"),
                widgets: (date_pickers: false),
                log: (destination: "terminal", level: "debug"),
            )"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.ui.debounce_ms, 300);
        assert_eq!(config.ui.search_param, "search");
        assert_eq!(config.ui.reload_delay_ms, 1000);
        assert!(config.widgets.dropdowns);
        assert!(!config.widgets.date_pickers);
        assert_eq!(config.log.destination(), LogDestination::Terminal);
        assert_eq!(config.log.level(), log::LevelFilter::Debug);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("admin.ron");
        fs::write(&path, "(ui: [").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn explicit_path_wins() {
        let explicit = PathBuf::from("/etc/admin/site.ron");
        assert_eq!(config_path(Some(&explicit)), explicit);
    }
}
