//! User session state: favorite cities, theme, units and API key
//!
//! A `Session` is owned by the caller and passed to whatever renders the
//! dashboard. Nothing here is global.

use crate::config::DefaultsConfig;
use crate::models::Units;
use crate::{Result, WeatherDashError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dashboard colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Anything other than "dark" is treated as light
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("dark") {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Session {
    favorites: Vec<String>,
    selected: Option<String>,
    pub theme: Theme,
    pub units: Units,
    #[serde(skip)]
    api_key: Option<String>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("favorites", &self.favorites)
            .field("selected", &self.selected)
            .field("theme", &self.theme)
            .field("units", &self.units)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Session {
    /// Start a session from configured defaults
    #[must_use]
    pub fn from_defaults(defaults: &DefaultsConfig, api_key: Option<String>) -> Self {
        let mut session = Self {
            theme: Theme::from_name(&defaults.theme),
            units: defaults.units,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            ..Self::default()
        };
        for city in &defaults.favorites {
            // invalid entries in the config are skipped
            let _ = session.add_favorite(city);
        }
        session
    }

    #[must_use]
    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    /// Add a city to the favorites.
    ///
    /// Returns `Ok(false)` if it is already present (case-insensitive).
    pub fn add_favorite(&mut self, city: &str) -> Result<bool> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherDashError::validation("City name cannot be empty"));
        }
        if self.position(city).is_some() {
            return Ok(false);
        }
        self.favorites.push(city.to_string());
        Ok(true)
    }

    /// Remove a city from the favorites, clearing the selection if it was selected
    pub fn remove_favorite(&mut self, city: &str) -> bool {
        let Some(index) = self.position(city.trim()) else {
            return false;
        };
        let removed = self.favorites.remove(index);
        if self
            .selected
            .as_deref()
            .is_some_and(|selected| selected.eq_ignore_ascii_case(&removed))
        {
            self.selected = None;
        }
        true
    }

    /// Select a city to show. It does not have to be a favorite.
    pub fn select(&mut self, city: &str) -> Result<()> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherDashError::validation("City name cannot be empty"));
        }
        self.selected = Some(city.to_string());
        Ok(())
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) -> Result<()> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(WeatherDashError::validation("API key cannot be empty"));
        }
        self.api_key = Some(api_key);
        Ok(())
    }

    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn position(&self, city: &str) -> Option<usize> {
        self.favorites
            .iter()
            .position(|favorite| favorite.eq_ignore_ascii_case(city))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_from_defaults() {
        let session = Session::from_defaults(&DefaultsConfig::default(), None);
        assert_eq!(session.favorites(), ["London", "New York", "Tokyo"]);
        assert_eq!(session.theme, Theme::Light);
        assert_eq!(session.units, Units::Metric);
        assert!(session.api_key().is_none());
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_add_favorite_trims_and_skips_duplicates() {
        let mut session = Session::default();
        assert!(session.add_favorite("  Paris ").unwrap());
        assert!(!session.add_favorite("paris").unwrap());
        assert_eq!(session.favorites(), ["Paris"]);
        assert!(session.add_favorite("   ").is_err());
    }

    #[test]
    fn test_remove_favorite_clears_selection() {
        let mut session = Session::from_defaults(&DefaultsConfig::default(), None);
        session.select("tokyo").unwrap();
        assert!(session.remove_favorite("Tokyo"));
        assert!(session.selected().is_none());
        assert!(!session.remove_favorite("Tokyo"));
        assert_eq!(session.favorites().len(), 2);
    }

    #[test]
    fn test_toggle_theme() {
        let mut session = Session::default();
        assert_eq!(session.toggle_theme(), Theme::Dark);
        assert_eq!(session.toggle_theme(), Theme::Light);
        assert_eq!(Theme::from_name("DARK"), Theme::Dark);
        assert_eq!(Theme::from_name("sepia"), Theme::Light);
    }

    #[test]
    fn test_api_key_is_never_printed_or_serialized() {
        let mut session = Session::default();
        session.set_api_key("secret_key_42").unwrap();
        assert_eq!(session.api_key(), Some("secret_key_42"));
        assert!(!format!("{session:?}").contains("secret_key_42"));
        assert!(!serde_json::to_string(&session).unwrap().contains("secret_key_42"));
        assert!(session.set_api_key(" ").is_err());
    }
}
