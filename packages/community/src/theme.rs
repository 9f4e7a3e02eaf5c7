//! Light/dark display preference.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::StoreError;
use crate::store::KeyValueStore;

/// Store key holding the theme name.
pub const THEME_KEY: &str = "scs-theme";

/// Display theme.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Theme preference kept in a [`KeyValueStore`].
pub struct ThemeState<'a, S: KeyValueStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: KeyValueStore + ?Sized> ThemeState<'a, S> {
    /// Wraps `store`.
    pub const fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// The stored theme. Missing or unrecognised values yield the default.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read.
    pub fn current(&self) -> Result<Theme, StoreError> {
        Ok(match self.store.get(THEME_KEY)? {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Unrecognised theme '{raw}', using {}", Theme::default());
                Theme::default()
            }),
            None => Theme::default(),
        })
    }

    /// Stores `theme`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be written.
    pub fn set(&mut self, theme: Theme) -> Result<(), StoreError> {
        self.store.set(THEME_KEY, theme.to_string())
    }

    /// Switches to the other theme and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read or written.
    pub fn toggle(&mut self) -> Result<Theme, StoreError> {
        let next = self.current()?.toggled();
        self.set(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn defaults_to_light() {
        let mut store = MemoryStore::new();
        assert_eq!(ThemeState::new(&mut store).current().unwrap(), Theme::Light);
    }

    #[test]
    fn toggle_persists() {
        let mut store = MemoryStore::new();
        let mut state = ThemeState::new(&mut store);
        assert_eq!(state.toggle().unwrap(), Theme::Dark);
        assert_eq!(state.current().unwrap(), Theme::Dark);
        assert_eq!(state.toggle().unwrap(), Theme::Light);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn garbage_value_falls_back() {
        let mut store = MemoryStore::new();
        store.set(THEME_KEY, "sepia".to_string()).unwrap();
        assert_eq!(ThemeState::new(&mut store).current().unwrap(), Theme::Light);
    }
}
