use leptos::prelude::*;
use tracing::warn;

/// Preference key holding `"dark"` or `"light"`.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "dark" => Some(ThemeMode::Dark),
            "light" => Some(ThemeMode::Light),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }
}

/// Durable key-value storage for user preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), String>;
}

/// Sole owner of the persisted theme preference.
#[derive(Debug)]
pub struct ThemeController<S> {
    store: S,
    mode: ThemeMode,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Read the saved preference; anything missing or unrecognized is light.
    pub fn load(store: S) -> Self {
        let mode = store
            .get(THEME_KEY)
            .and_then(|v| ThemeMode::parse(&v))
            .unwrap_or_default();
        Self { store, mode }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn set_dark(&mut self, dark: bool) -> ThemeMode {
        self.mode = ThemeMode::from_dark(dark);
        if let Err(e) = self.store.set(THEME_KEY, self.mode.as_str()) {
            warn!("Failed to persist theme preference: {}", e);
        }
        self.mode
    }

    pub fn toggle(&mut self) -> ThemeMode {
        self.set_dark(!self.mode.is_dark())
    }
}

#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub dark: Signal<bool>,
    pub toggle: Callback<()>,
}

/// Set the `data-theme` attribute on `<html>`, the one global style flag.
pub fn apply_theme(mode: ThemeMode) {
    if let Some(window) = web_sys::window() {
        if let Some(doc) = window.document() {
            if let Some(html) = doc.document_element() {
                let _ = html.set_attribute("data-theme", mode.as_str());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MemoryStore {
        values: Rc<RefCell<HashMap<String, String>>>,
        fail_writes: bool,
    }

    impl PreferenceStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.values.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> Result<(), String> {
            if self.fail_writes {
                return Err("quota exceeded".into());
            }
            self.values.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_absent_preference_defaults_to_light() {
        let controller = ThemeController::load(MemoryStore::default());
        assert_eq!(controller.mode(), ThemeMode::Light);
    }

    #[test]
    fn test_unrecognized_preference_defaults_to_light() {
        let store = MemoryStore::default();
        store.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(ThemeController::load(store).mode(), ThemeMode::Light);
    }

    #[test]
    fn test_saved_dark_preference_is_restored() {
        let store = MemoryStore::default();
        store.set(THEME_KEY, "dark").unwrap();
        assert!(ThemeController::load(store).mode().is_dark());
    }

    #[test]
    fn test_every_change_is_persisted() {
        let store = MemoryStore::default();
        let mut controller = ThemeController::load(store.clone());

        assert_eq!(controller.toggle(), ThemeMode::Dark);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));

        assert_eq!(controller.set_dark(false), ThemeMode::Light);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));

        let reloaded = ThemeController::load(store);
        assert_eq!(reloaded.mode(), ThemeMode::Light);
    }

    #[test]
    fn test_failed_write_still_switches_mode() {
        let store = MemoryStore {
            fail_writes: true,
            ..Default::default()
        };
        let mut controller = ThemeController::load(store.clone());
        assert_eq!(controller.toggle(), ThemeMode::Dark);
        assert_eq!(store.get(THEME_KEY), None);
    }
}
