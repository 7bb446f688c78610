//! Config file upgrades: detect keys the file lacks and write them back
//! with their default values, leaving existing values untouched.

use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

use super::Config;
use crate::errors::{AppError, AppResult};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ConfigReport {
    pub missing: Vec<String>,
    pub unknown: Vec<String>,
}

impl ConfigReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.unknown.is_empty()
    }
}

fn default_mapping() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default())? {
        Value::Mapping(m) => Ok(m),
        _ => Err(AppError::Config("default config is not a mapping".into())),
    }
}

fn read_mapping(content: &str) -> AppResult<Mapping> {
    match serde_yaml::from_str::<Value>(content)? {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config("config file is not a YAML mapping".into())),
    }
}

fn key_name(k: &Value) -> String {
    k.as_str().map(str::to_string).unwrap_or_else(|| format!("{:?}", k))
}

pub fn check_content(content: &str) -> AppResult<ConfigReport> {
    let defaults = default_mapping()?;
    let current = read_mapping(content)?;

    let missing = defaults
        .keys()
        .filter(|k| !current.contains_key(*k))
        .map(key_name)
        .collect();
    let unknown = current
        .keys()
        .filter(|k| !defaults.contains_key(*k))
        .map(key_name)
        .collect();

    Ok(ConfigReport { missing, unknown })
}

/// Fill missing keys. Returns the updated YAML and the keys added.
pub fn migrate_content(content: &str) -> AppResult<(String, Vec<String>)> {
    let defaults = default_mapping()?;
    let mut current = read_mapping(content)?;

    let mut added = Vec::new();
    for (k, v) in defaults {
        if !current.contains_key(&k) {
            added.push(key_name(&k));
            current.insert(k, v);
        }
    }

    Ok((serde_yaml::to_string(&Value::Mapping(current))?, added))
}

pub fn check_file(path: &Path) -> AppResult<ConfigReport> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    check_content(&content)
}

/// Rewrite the file only when something was added.
pub fn migrate_file(path: &Path) -> AppResult<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let (updated, added) = migrate_content(&content)?;
    if !added.is_empty() {
        fs::write(path, updated).map_err(|_| AppError::ConfigSave)?;
        log::info!("config migrated, added keys: {}", added.join(", "));
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_missing_and_unknown_keys() {
        let report = check_content("endpoint: http://x/graphql\nshow_weekday: None\n").unwrap();
        assert!(report.missing.contains(&"auth_url".to_string()));
        assert!(!report.missing.contains(&"endpoint".to_string()));
        assert_eq!(report.unknown, vec!["show_weekday".to_string()]);
        assert!(!report.is_clean());
    }

    #[test]
    fn migration_keeps_existing_values() {
        let (yaml, added) = migrate_content("endpoint: http://x/graphql\n").unwrap();
        assert!(added.contains(&"week_start".to_string()));

        let cfg = Config::from_yaml(&yaml).unwrap();
        assert_eq!(cfg.endpoint, "http://x/graphql");
        assert!(check_content(&yaml).unwrap().is_clean());

        let (_, again) = migrate_content(&yaml).unwrap();
        assert!(again.is_empty());
    }
}
