//! Game settings and preferences
//!
//! Persisted as one JSON blob, separate from the high score slots.

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::i18n::Language;
use crate::platform::KeyValueStore;
use crate::sim::GameMode;

/// Game settings/preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Selected rule set
    pub mode: GameMode,
    /// Language for on-canvas text
    pub language: Language,
    /// Narrow/touch screen: touch prompts, larger text, classic mode only
    pub touch_layout: bool,
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "shovel-run-settings";

    /// The mode actually played; touch layouts have no fire key, so they
    /// always play classic
    pub fn effective_mode(&self) -> GameMode {
        if self.touch_layout {
            GameMode::Basic
        } else {
            self.mode
        }
    }

    /// Load settings, falling back to defaults when missing or corrupt
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let Some(json) = store.get(Self::STORAGE_KEY) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring corrupt settings: {e}");
                Self::default()
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), GameError> {
        let json = serde_json::to_string(self)?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.mode, GameMode::Basic);
        assert_eq!(settings.language, Language::Es);
        assert!(!settings.touch_layout);
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            mode: GameMode::Advanced,
            language: Language::En,
            touch_layout: false,
        };
        settings.save(&mut store).unwrap();
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_corrupt_blob_uses_defaults() {
        let mut store = MemoryStore::new();
        store.set(Settings::STORAGE_KEY, "{not json").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_partial_blob_fills_defaults() {
        let mut store = MemoryStore::new();
        store.set(Settings::STORAGE_KEY, r#"{"language":"En"}"#).unwrap();
        let settings = Settings::load(&store);
        assert_eq!(settings.language, Language::En);
        assert_eq!(settings.mode, GameMode::Basic);
    }

    #[test]
    fn test_touch_layout_forces_classic() {
        let settings = Settings {
            mode: GameMode::Advanced,
            touch_layout: true,
            ..Settings::default()
        };
        assert_eq!(settings.effective_mode(), GameMode::Basic);
    }
}
