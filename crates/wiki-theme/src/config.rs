//! Theme switch settings.
//!
//! Every field has a default, so an empty `theme_switch:` block (or none at
//! all) yields the standard cookie, class and control names.
//!
//! ```yaml
//! theme_switch:
//!   cookie_name: theme_preference
//!   dark_class: dark-mode
//!   toggle_id: theme-toggle-checkbox
//!   lifetime_days: 365
//!   same_site: Lax
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_COOKIE_NAME: &str = "theme_preference";
pub const DEFAULT_DARK_CLASS: &str = "dark-mode";
pub const DEFAULT_TOGGLE_ID: &str = "theme-toggle-checkbox";
pub const DEFAULT_MEDIA_QUERY: &str = "(prefers-color-scheme: dark)";
pub const DEFAULT_ENTRY_POINT: &str = "toggleTheme";
pub const DEFAULT_LIFETIME_DAYS: u32 = 365;
/// Upper bound for `lifetime_days` (one hundred years).
pub const MAX_LIFETIME_DAYS: u32 = 36_500;

/// The `SameSite` attribute of the preference cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SameSitePolicy {
    Strict,
    #[default]
    Lax,
    None,
}

impl From<SameSitePolicy> for cookie::SameSite {
    fn from(policy: SameSitePolicy) -> Self {
        match policy {
            SameSitePolicy::Strict => cookie::SameSite::Strict,
            SameSitePolicy::Lax => cookie::SameSite::Lax,
            SameSitePolicy::None => cookie::SameSite::None,
        }
    }
}

/// Names and cookie attributes used by the theme controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Cookie holding the persisted preference.
    pub cookie_name: String,
    /// Class token put on the root element in dark mode.
    pub dark_class: String,
    /// Element id of the checkbox control.
    pub toggle_id: String,
    /// Media query consulted for the system preference.
    pub media_query: String,
    /// Name of the global toggle function published on `window`.
    pub entry_point: String,
    pub cookie_path: String,
    pub same_site: SameSitePolicy,
    /// How long a written preference lives.
    pub lifetime_days: u32,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            dark_class: DEFAULT_DARK_CLASS.to_string(),
            toggle_id: DEFAULT_TOGGLE_ID.to_string(),
            media_query: DEFAULT_MEDIA_QUERY.to_string(),
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            cookie_path: "/".to_string(),
            same_site: SameSitePolicy::Lax,
            lifetime_days: DEFAULT_LIFETIME_DAYS,
        }
    }
}

impl ThemeConfig {
    /// Returns every problem found, not just the first.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let tokens = [
            ("cookie_name", &self.cookie_name),
            ("dark_class", &self.dark_class),
            ("toggle_id", &self.toggle_id),
            ("entry_point", &self.entry_point),
        ];
        for (field, value) in tokens {
            if value.is_empty() {
                problems.push(format!("theme_switch.{field} is empty"));
            } else if value.chars().any(|c| c.is_whitespace() || c == ';' || c == '=') {
                problems.push(format!("theme_switch.{field} '{value}' contains whitespace, ';' or '='"));
            }
        }

        if self.media_query.trim().is_empty() {
            problems.push("theme_switch.media_query is empty".to_string());
        }
        if !self.cookie_path.starts_with('/') {
            problems.push(format!(
                "theme_switch.cookie_path '{}' must start with '/'",
                self.cookie_path
            ));
        }
        if self.lifetime_days == 0 {
            problems.push("theme_switch.lifetime_days must be at least 1".to_string());
        } else if self.lifetime_days > MAX_LIFETIME_DAYS {
            problems.push(format!(
                "theme_switch.lifetime_days {} exceeds {MAX_LIFETIME_DAYS}",
                self.lifetime_days
            ));
        }

        problems
    }

    pub fn validate(&self) -> Result<()> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(Error::Invalid(problems))
        }
    }
}
