use std::{
    cmp::Reverse,
    fs,
    path::{Path, PathBuf},
};

use chrono::Utc;

use crate::{Config, ConfigError};

const BACKUP_PREFIX: &str = "config-";
// Fixed-width and lexicographically sortable, so backup names order
// chronologically without parsing.
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M";

/// Handles persistence and backup management for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
    backups_dir: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf, backups_dir: PathBuf) -> Self {
        Self {
            config_path,
            backups_dir,
        }
    }

    /// Lays out `<base>/config/config.json` with a `backups/` directory next
    /// to it.
    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        let config_dir = base.join("config");
        let backups_dir = config_dir.join("backups");
        fs::create_dir_all(&backups_dir)?;
        Ok(Self::new(config_dir.join("config.json"), backups_dir))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    /// Loads the stored configuration, falling back to defaults when no file
    /// exists yet.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }
        read_config(&self.config_path)
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        write_config(&self.config_path, config)
    }

    /// Writes a backup named `config-<timestamp>[-<note>].json` and returns
    /// the file name.
    pub fn backup(&self, config: &Config, note: Option<&str>) -> Result<String, ConfigError> {
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT);
        let name = match note.and_then(note_slug) {
            Some(slug) => format!("{}{}-{}.json", BACKUP_PREFIX, timestamp, slug),
            None => format!("{}{}.json", BACKUP_PREFIX, timestamp),
        };
        write_config(&self.backups_dir.join(&name), config)?;
        Ok(name)
    }

    pub fn restore(&self, backup_name: &str) -> Result<Config, ConfigError> {
        let path = self.backups_dir.join(backup_name);
        if !path.exists() {
            return Err(ConfigError::BackupNotFound(backup_name.to_string()));
        }
        read_config(&path)
    }

    /// Backup file names, newest first. The timestamp embedded in each name
    /// is fixed-width, so a reverse name sort is a reverse time sort.
    pub fn list_backups(&self) -> Result<Vec<String>, ConfigError> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut names: Vec<String> = fs::read_dir(&self.backups_dir)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.starts_with(BACKUP_PREFIX) && name.ends_with(".json"))
            .collect();
        names.sort_by_key(|name| Reverse(name.clone()));
        Ok(names)
    }
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
}

/// Serializes through a sibling tmp file and renames it into place, so a
/// failed write never truncates the previous file.
fn write_config(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)
        .map_err(|err| ConfigError::Serde(err.to_string()))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Reduces a free-form note to a dash-separated slug usable in a file name.
fn note_slug(note: &str) -> Option<String> {
    let mapped: String = note
        .to_ascii_lowercase()
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { ' ' })
        .collect();
    let slug = mapped.split_whitespace().collect::<Vec<_>>().join("-");
    if slug.is_empty() {
        None
    } else {
        Some(slug)
    }
}

#[cfg(test)]
mod tests {
    use super::note_slug;

    #[test]
    fn note_slug_collapses_punctuation_and_spaces() {
        assert_eq!(note_slug("Before reset"), Some("before-reset".into()));
        assert_eq!(note_slug("  v2 -- final!! "), Some("v2-final".into()));
        assert_eq!(note_slug("***"), None);
        assert_eq!(note_slug(""), None);
    }
}
