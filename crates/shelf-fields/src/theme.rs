//! Theme selector field.

use serde::Serialize;

use shelf_config::{Config, ThemeConfig};

use crate::error::FieldError;

/// Theme option offered to editors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub name: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}

impl From<&ThemeConfig> for Theme {
    fn from(config: &ThemeConfig) -> Self {
        Self {
            name: config.name.clone(),
            label: config.label.clone(),
            primary: config.primary.clone(),
            accent: config.accent.clone(),
        }
    }
}

/// Selects among the configured themes.
#[derive(Clone, Debug)]
pub struct ThemeSelector {
    themes: Vec<Theme>,
    default: String,
}

impl ThemeSelector {
    /// Create a selector.
    ///
    /// # Errors
    ///
    /// Returns `FieldError::UnknownTheme` if `default` is not among `themes`.
    pub fn new(themes: Vec<Theme>, default: impl Into<String>) -> Result<Self, FieldError> {
        let default = default.into();
        if !themes.iter().any(|t| t.name == default) {
            return Err(FieldError::UnknownTheme(default));
        }
        Ok(Self { themes, default })
    }

    /// Create a selector from the site configuration.
    ///
    /// # Errors
    ///
    /// Returns `FieldError::UnknownTheme` if the default theme is not configured.
    pub fn from_config(config: &Config) -> Result<Self, FieldError> {
        Self::new(
            config.themes.iter().map(Theme::from).collect(),
            config.site_resolved.default_theme.clone(),
        )
    }

    /// Available themes in configuration order.
    #[must_use]
    pub fn options(&self) -> &[Theme] {
        &self.themes
    }

    /// Name of the default theme.
    #[must_use]
    pub fn default_name(&self) -> &str {
        &self.default
    }

    /// Resolve a selection. No selection (or an empty one) yields the default.
    ///
    /// # Errors
    ///
    /// Returns `FieldError::UnknownTheme` for a name that is not configured.
    pub fn select(&self, name: Option<&str>) -> Result<&Theme, FieldError> {
        let name = match name.map(str::trim) {
            Some(n) if !n.is_empty() => n,
            _ => self.default.as_str(),
        };
        self.themes
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| FieldError::UnknownTheme(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn theme(name: &str) -> Theme {
        Theme {
            name: name.to_owned(),
            label: name.to_uppercase(),
            primary: None,
            accent: None,
        }
    }

    fn selector() -> ThemeSelector {
        ThemeSelector::new(vec![theme("default"), theme("blue")], "default").unwrap()
    }

    #[test]
    fn test_select_known_theme() {
        assert_eq!(selector().select(Some("blue")).unwrap().name, "blue");
    }

    #[test]
    fn test_select_none_returns_default() {
        let s = selector();

        assert_eq!(s.select(None).unwrap().name, "default");
        assert_eq!(s.select(Some("  ")).unwrap().name, "default");
    }

    #[test]
    fn test_select_unknown_is_rejected() {
        let err = selector().select(Some("neon")).unwrap_err();

        assert_eq!(err.to_string(), "Unknown theme 'neon'");
    }

    #[test]
    fn test_default_must_exist() {
        assert!(ThemeSelector::new(vec![theme("blue")], "default").is_err());
    }

    #[test]
    fn test_from_config_defaults() {
        let config = Config::default();
        let s = ThemeSelector::from_config(&config).unwrap();

        assert_eq!(s.default_name(), "default");
        assert_eq!(
            s.options().iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
            vec!["default", "blue", "orange", "green"]
        );
    }
}
