//! Cross-platform application paths and settings loading.

use std::fs;
use std::path::{Path, PathBuf};

use reconcile_lab::Settings;
use tracing::{info, warn};

use crate::error::PlayerError;

pub const LOOP_MS_ENV: &str = "RECONCILE_LOOP_MS";
pub const ONE_SHOT_MS_ENV: &str = "RECONCILE_ONE_SHOT_MS";

#[derive(Debug, Clone)]
pub struct AppPaths {
    config_dir: PathBuf,
}

impl AppPaths {
    pub fn new() -> Result<Self, PlayerError> {
        let base = dirs::config_dir().ok_or(PlayerError::NoConfigDir)?;
        Ok(Self::at(base.join("reconcile_lab")))
    }

    pub fn at(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    #[allow(dead_code)]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    /// Reads `settings.json`. A missing file means defaults.
    pub fn load_settings(&self) -> Result<Settings, PlayerError> {
        let path = self.settings_file();
        match fs::read_to_string(&path) {
            Ok(raw) => {
                let settings = Settings::from_json(&raw)?;
                info!(path = %path.display(), "settings loaded");
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<PathBuf, PlayerError> {
        fs::create_dir_all(&self.config_dir)?;
        let path = self.settings_file();
        fs::write(&path, settings.to_json()?)?;
        Ok(path)
    }
}

/// Applies `RECONCILE_LOOP_MS` / `RECONCILE_ONE_SHOT_MS` on top of `settings`.
pub fn apply_env_overrides(
    mut settings: Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Settings {
    let read = |key: &str| -> Option<u32> {
        let raw = lookup(key)?;
        match raw.trim().parse() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(key, value = %raw, "ignoring non-numeric override");
                None
            }
        }
    };
    if let Some(ms) = read(LOOP_MS_ENV) {
        settings.loop_period_ms = ms;
    }
    if let Some(ms) = read(ONE_SHOT_MS_ENV) {
        settings.one_shot_period_ms = ms;
    }
    settings.sanitized()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> AppPaths {
        let dir = std::env::temp_dir().join(format!("reconcile_player_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        AppPaths::at(dir)
    }

    #[test]
    fn missing_file_means_defaults() {
        let paths = scratch("missing");
        assert_eq!(paths.load_settings().expect("defaults"), Settings::default());
    }

    #[test]
    fn saved_settings_load_back() {
        let paths = scratch("saved");
        let settings = Settings {
            loop_period_ms: 800,
            ..Settings::default()
        };
        paths.save_settings(&settings).expect("save");
        assert_eq!(paths.load_settings().expect("load"), settings);
        let _ = fs::remove_dir_all(paths.config_dir());
    }

    #[test]
    fn env_overrides_are_clamped_and_bad_values_skipped() {
        let s = apply_env_overrides(Settings::default(), |key| match key {
            LOOP_MS_ENV => Some("50".into()),
            ONE_SHOT_MS_ENV => Some("soon".into()),
            _ => None,
        });
        assert_eq!(s.loop_period_ms, 200);
        assert_eq!(s.one_shot_period_ms, 2000);
    }
}
