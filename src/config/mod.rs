use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{AppError, AppResult};
use crate::models::epoch::WeekStart;
use crate::utils::path::expand_tilde;

pub mod migrate;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/graphql";
pub const DEFAULT_AUTH_URL: &str = "http://localhost:8000/auth/login";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default)]
    pub week_start: WeekStart,
    /// Drop every cached task list on any update, not only on schedule changes.
    #[serde(default)]
    pub invalidate_on_any_update: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_auth_url() -> String {
    DEFAULT_AUTH_URL.to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_timeout() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            endpoint: default_endpoint(),
            auth_url: default_auth_url(),
            week_start: WeekStart::default(),
            invalidate_on_any_update: false,
            log_level: default_log_level(),
            request_timeout_secs: default_timeout(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rtasks")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rtasks")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtasks.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rtasks.sqlite")
    }

    pub fn log_dir() -> PathBuf {
        Self::config_dir().join("logs")
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        Self::from_yaml(&content)
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml).map_err(|_| AppError::ConfigSave)
    }

    /// Database path with `~` expanded.
    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    /// Initialize the configuration file. Returns the database path.
    ///
    /// An existing config keeps its settings; only `database` is replaced
    /// when a custom one is given. Test mode never writes the config file.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let mut config = Self::load()?;
        if let Some(name) = custom_db {
            let p = expand_tilde(&name);
            let p = if p.is_absolute() { p } else { dir.join(p) };
            config.database = p.to_string_lossy().to_string();
        }

        if !is_test {
            config.save_to(&Self::config_file())?;
        }

        Ok(config.database_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let cfg = Config::from_yaml("endpoint: http://example.test/graphql\nweek_start: sunday\n").unwrap();
        assert_eq!(cfg.endpoint, "http://example.test/graphql");
        assert_eq!(cfg.week_start, WeekStart::Sunday);
        assert_eq!(cfg.auth_url, DEFAULT_AUTH_URL);
        assert!(!cfg.invalidate_on_any_update);
        assert_eq!(cfg.request_timeout_secs, 10);
    }

    #[test]
    fn bad_yaml_is_a_config_error() {
        let err = Config::from_yaml("week_start: [").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rtasks.conf");
        let cfg = Config {
            invalidate_on_any_update: true,
            ..Config::default()
        };
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }
}
