//! The light/dark preference value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The user's preferred color mode.
///
/// The string forms (`"light"`, `"dark"`) are what gets persisted in the
/// preference cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    /// Returns the persisted string form.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    /// Returns the opposite mode.
    pub fn flipped(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    /// Maps a media-query match (`prefers-color-scheme: dark`) to a mode.
    pub fn from_dark_flag(is_dark: bool) -> Self {
        if is_dark {
            ThemePreference::Dark
        } else {
            ThemePreference::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemePreference::Dark
    }

    /// Checked state of the toggle control for this mode.
    ///
    /// The control is inverted: checked shows the sun (light),
    /// unchecked shows the moon (dark).
    pub fn toggle_checked(self) -> bool {
        self == ThemePreference::Light
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known preference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme preference '{0}', expected 'light' or 'dark'")]
pub struct ParsePreferenceError(pub String);

impl FromStr for ThemePreference {
    type Err = ParsePreferenceError;

    /// Parses the exact persisted forms. Matching is case-sensitive, so a
    /// cookie holding `Dark` is treated as invalid.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            other => Err(ParsePreferenceError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_values() {
        assert_eq!("light".parse(), Ok(ThemePreference::Light));
        assert_eq!("dark".parse(), Ok(ThemePreference::Dark));
    }

    #[test]
    fn test_parse_rejects_other_values() {
        let err = "Dark".parse::<ThemePreference>().unwrap_err();
        assert_eq!(err, ParsePreferenceError("Dark".to_string()));
        assert!(err.to_string().contains("'Dark'"));
        assert!("".parse::<ThemePreference>().is_err());
    }

    #[test]
    fn test_toggle_checked_is_inverted() {
        assert!(ThemePreference::Light.toggle_checked());
        assert!(!ThemePreference::Dark.toggle_checked());
    }

    #[test]
    fn test_flipped() {
        assert_eq!(ThemePreference::Light.flipped(), ThemePreference::Dark);
        assert_eq!(ThemePreference::Dark.flipped().flipped(), ThemePreference::Dark);
    }

    #[test]
    fn test_default_is_light() {
        assert_eq!(ThemePreference::default(), ThemePreference::Light);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ThemePreference::Dark).unwrap();
        assert_eq!(json, "\"dark\"");
        let back: ThemePreference = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(back, ThemePreference::Light);
    }
}
