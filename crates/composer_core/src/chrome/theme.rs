use shared::domain::ThemeMode;
use tracing::{debug, warn};

use super::preferences::PreferenceStore;
use crate::error::PreferenceError;

pub const THEME_PREFERENCE_KEY: &str = "theme";

/// Current light/dark mode backed by a single persisted preference.
#[derive(Debug)]
pub struct ThemeController<S: PreferenceStore> {
    mode: ThemeMode,
    store: S,
}

impl<S: PreferenceStore> ThemeController<S> {
    pub fn load(store: S) -> Self {
        let mode = ThemeMode::from_preference(store.get(THEME_PREFERENCE_KEY).as_deref());
        debug!(?mode, "theme preference loaded");
        Self { mode, store }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }

    /// The new mode applies even when it could not be saved.
    pub fn set(&mut self, mode: ThemeMode) -> Result<(), PreferenceError> {
        self.mode = mode;
        self.store
            .set(THEME_PREFERENCE_KEY, mode.as_preference())
            .inspect_err(|error| warn!(%error, "failed to persist theme preference"))
    }

    pub fn toggle(&mut self) -> Result<ThemeMode, PreferenceError> {
        let next = self.mode.toggled();
        self.set(next)?;
        Ok(next)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
