//! Settings Storage
//!
//! File-backed storage for the theme preference. The stored value is read
//! leniently: a missing file, malformed JSON or an unknown theme literal all
//! fall back to the dark theme instead of failing startup.

use super::UserSettings;
use crate::models::ThemeMode;
use crate::types::AppResult;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

const SETTINGS_FILE: &str = "settings.json";
const THEME_KEY: &str = "theme";

/// Settings storage manager
#[derive(Debug, Clone)]
pub struct SettingsStorage {
    settings_path: PathBuf,
}

impl SettingsStorage {
    /// Create storage rooted at `base_dir`
    pub fn with_path(base_dir: impl AsRef<Path>) -> Self {
        Self {
            settings_path: base_dir.as_ref().join(SETTINGS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.settings_path
    }

    /// Ensure the storage directory exists
    async fn ensure_dir(&self) -> AppResult<()> {
        if let Some(parent) = self.settings_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Load settings from disk, defaulting anything unreadable
    pub async fn load(&self) -> UserSettings {
        if !self.settings_path.exists() {
            info!("No settings file found, using defaults");
            return UserSettings::default();
        }

        let content = match fs::read_to_string(&self.settings_path).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read settings file {:?}: {}", self.settings_path, e);
                return UserSettings::default();
            }
        };

        let theme = match serde_json::from_str::<serde_json::Value>(&content) {
            Ok(value) => value
                .get(THEME_KEY)
                .and_then(|v| v.as_str())
                .map(ThemeMode::from_stored)
                .unwrap_or_default(),
            Err(e) => {
                warn!("Settings file is not valid JSON, using defaults: {}", e);
                ThemeMode::default()
            }
        };

        info!(theme = %theme, "Loaded settings from {:?}", self.settings_path);
        UserSettings { theme }
    }

    /// Save settings to disk
    pub async fn save(&self, settings: &UserSettings) -> AppResult<()> {
        self.ensure_dir().await?;
        let content = serde_json::to_string_pretty(settings)?;
        fs::write(&self.settings_path, content).await?;
        info!(theme = %settings.theme, "Saved settings to {:?}", self.settings_path);
        Ok(())
    }

    /// Persist just the theme, logging instead of failing
    pub async fn save_theme(&self, theme: ThemeMode) {
        if let Err(e) = self.save(&UserSettings { theme }).await {
            warn!("Failed to save theme preference: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_settings_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SettingsStorage::with_path(temp_dir.path());

        storage
            .save(&UserSettings {
                theme: ThemeMode::Light,
            })
            .await
            .unwrap();
        assert_eq!(storage.load().await.theme, ThemeMode::Light);

        storage.save_theme(ThemeMode::Dark).await;
        assert_eq!(storage.load().await.theme, ThemeMode::Dark);
    }

    #[tokio::test]
    async fn test_stored_format() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SettingsStorage::with_path(temp_dir.path());
        storage.save_theme(ThemeMode::Light).await;

        let raw = std::fs::read_to_string(storage.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["theme"], "light");
    }

    #[tokio::test]
    async fn test_missing_file_defaults_to_dark() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SettingsStorage::with_path(temp_dir.path().join("nested"));
        assert_eq!(storage.load().await.theme, ThemeMode::Dark);
    }

    #[tokio::test]
    async fn test_unknown_values_default_to_dark() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SettingsStorage::with_path(temp_dir.path());

        for raw in [
            r#"{"theme":"sepia"}"#,
            r#"{"theme":42}"#,
            r#"{"other":"light"}"#,
            "light",
            "",
        ] {
            std::fs::write(storage.path(), raw).unwrap();
            assert_eq!(storage.load().await.theme, ThemeMode::Dark, "input {:?}", raw);
        }
    }

    #[tokio::test]
    async fn test_save_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SettingsStorage::with_path(temp_dir.path().join("a").join("b"));
        storage.save_theme(ThemeMode::Light).await;
        assert!(storage.path().exists());
    }
}
