use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::db::DEFAULT_STORAGE_KEY;
use crate::utils::date::CHINA_OFFSET_MINUTES;

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}
fn default_quota_bytes() -> usize {
    5 * 1024 * 1024
}
fn default_timezone_offset() -> i32 {
    CHINA_OFFSET_MINUTES
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// When false, nothing is read or written: every run starts empty.
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_storage_key")]
    pub key: String,
    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            key: default_storage_key(),
            quota_bytes: default_quota_bytes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Question directory; defaults to `questions/` in the data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    #[serde(default)]
    pub include_drafts: bool,
    /// Minutes east of UTC used to decide which day's question is shown
    #[serde(default = "default_timezone_offset")]
    pub timezone_offset: i32,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: None,
            include_drafts: false,
            timezone_offset: default_timezone_offset(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "dailyq").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("dailyq.db"))
    }

    pub fn questions_dir(&self) -> Result<PathBuf> {
        match &self.content.dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::data_dir()?.join("questions")),
        }
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(config.storage.enabled);
        assert_eq!(config.storage.key, "daily-question-data");
        assert_eq!(config.content.timezone_offset, 480);
        assert!(!config.content.include_drafts);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[content]\ninclude_drafts = true\ndir = \"/tmp/q\"\n").unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert!(config.content.include_drafts);
        assert_eq!(config.content.dir, Some(PathBuf::from("/tmp/q")));
        assert_eq!(config.questions_dir().unwrap(), PathBuf::from("/tmp/q"));
        assert_eq!(config.storage.quota_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.storage.key = "other".to_string();
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap().storage.key, "other");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage\nenabled = ").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }
}
