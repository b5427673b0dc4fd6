use reconcile_lab::Settings;
use serde::{Deserialize, Serialize};

use crate::ui_model::PageTab;

const SETTINGS_KEY: &str = "reconcile_lab.settings.v1";
const LAST_TAB_KEY: &str = "reconcile_lab.last_tab.v1";
const SETTINGS_VERSION: u32 = 1;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub(super) fn local_storage_get_string(key: &str) -> Option<String> {
    local_storage().and_then(|s| s.get_item(key).ok().flatten())
}

pub(super) fn local_storage_set_string(key: &str, value: &str) {
    if let Some(s) = local_storage() {
        let _ = s.set_item(key, value);
    }
}

pub(super) fn local_storage_remove(key: &str) {
    if let Some(s) = local_storage() {
        let _ = s.remove_item(key);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct PersistedSettings {
    #[serde(default = "default_version")]
    pub(super) version: u32,
    #[serde(default)]
    pub(super) settings: Settings,
}

fn default_version() -> u32 {
    SETTINGS_VERSION
}

/// Stored settings, sanitized. Anything unreadable falls back to defaults.
pub(super) fn load_settings() -> Settings {
    local_storage_get_string(SETTINGS_KEY)
        .and_then(|raw| serde_json::from_str::<PersistedSettings>(&raw).ok())
        .filter(|p| p.version == SETTINGS_VERSION)
        .map(|p| p.settings.sanitized())
        .unwrap_or_default()
}

pub(super) fn save_settings(settings: &Settings) {
    let persisted = PersistedSettings {
        version: SETTINGS_VERSION,
        settings: *settings,
    };
    if let Ok(raw) = serde_json::to_string(&persisted) {
        local_storage_set_string(SETTINGS_KEY, &raw);
    }
}

pub(super) fn clear_settings() {
    local_storage_remove(SETTINGS_KEY);
}

pub(super) fn load_last_tab() -> PageTab {
    local_storage_get_string(LAST_TAB_KEY)
        .and_then(|k| PageTab::from_key(&k))
        .unwrap_or_default()
}

pub(super) fn save_last_tab(tab: PageTab) {
    local_storage_set_string(LAST_TAB_KEY, tab.key());
}
