//! The theme preference controller.
//!
//! [`ThemePreferenceController`] keeps three things in agreement:
//!
//! 1. the **persisted preference** (a cookie, written only on user toggle)
//! 2. the **applied theme** (a class on the root element)
//! 3. the **toggle control** (a checkbox, checked = light)
//!
//! # Resolution
//!
//! On page load the theme is resolved in this order:
//!
//! 1. A valid persisted preference (`light` or `dark`)
//! 2. The system preference, when the host reports one
//! 3. [`ThemePreference::Light`]
//!
//! # Triggers
//!
//! | Trigger | Method | Writes cookie |
//! |---------|--------|---------------|
//! | Page load | [`start`](ThemePreferenceController::start) | no |
//! | Document ready | [`document_ready`](ThemePreferenceController::document_ready) | no |
//! | User toggle | [`toggle_preference`](ThemePreferenceController::toggle_preference) | yes |
//! | OS change | [`on_system_preference_change`](ThemePreferenceController::on_system_preference_change) | no |
//!
//! The controller itself holds only configuration and the store handles.
//! Every decision is re-derived from the stores when a trigger fires.
//!
//! # Example
//!
//! ```rust
//! use wiki_theme::surface::memory::{FixedPreference, MemoryCookieJar, MemoryDocument};
//! use wiki_theme::{ReadyStep, ThemeConfig, ThemePreference, ThemePreferenceController};
//!
//! let controller = ThemePreferenceController::new(
//!     ThemeConfig::default(),
//!     MemoryCookieJar::new(),
//!     MemoryDocument::new().with_toggle("theme-toggle-checkbox"),
//!     FixedPreference::dark(),
//! );
//!
//! let startup = controller.start();
//! assert_eq!(startup.theme, ThemePreference::Dark);
//! assert!(matches!(startup.ready, ReadyStep::Done(_)));
//!
//! assert_eq!(controller.toggle_preference(), ThemePreference::Light);
//! assert_eq!(controller.persisted_preference(), Some(ThemePreference::Light));
//! ```

use time::OffsetDateTime;

use crate::config::ThemeConfig;
use crate::error::Result;
use crate::cookie::{read_cookie, PreferenceCookie};
use crate::surface::{CookieJar, DocumentSurface, SystemPreference};
use crate::theme::ThemePreference;

/// Whether the toggle control was found when the document became ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlBinding {
    /// The control exists; the host should attach its `change` listener.
    Bound,
    /// The page has no toggle control.
    Absent,
}

/// What remains of page-load initialization after the theme is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyStep {
    /// The document was already interactive and the control has been synced.
    Done(ControlBinding),
    /// The document is still loading. Call
    /// [`ThemePreferenceController::document_ready`] with [`Startup::theme`]
    /// once it is interactive.
    Deferred,
}

/// Result of [`ThemePreferenceController::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Startup {
    /// The theme resolved and applied at load.
    pub theme: ThemePreference,
    pub ready: ReadyStep,
}

/// Synchronizes the persisted preference, the applied theme and the toggle control.
#[derive(Debug)]
pub struct ThemePreferenceController<C, D, S> {
    config: ThemeConfig,
    cookies: C,
    document: D,
    system: S,
}

impl<C, D, S> ThemePreferenceController<C, D, S>
where
    C: CookieJar,
    D: DocumentSurface,
    S: SystemPreference,
{
    pub fn new(config: ThemeConfig, cookies: C, document: D, system: S) -> Self {
        Self {
            config,
            cookies,
            document,
            system,
        }
    }

    /// Like [`new`](Self::new), but rejects a configuration that hosts would
    /// refuse later (class tokens with whitespace, oversized lifetimes, ...).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`](crate::Error::Invalid) listing every problem.
    pub fn try_new(config: ThemeConfig, cookies: C, document: D, system: S) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config, cookies, document, system))
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    pub fn cookies(&self) -> &C {
        &self.cookies
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn system(&self) -> &S {
        &self.system
    }

    /// The persisted preference, if the cookie holds a valid value.
    pub fn persisted_preference(&self) -> Option<ThemePreference> {
        let header = self.cookies.cookie_header();
        read_cookie(&header, &self.config.cookie_name)?.parse().ok()
    }

    /// Whether the preference cookie holds any value at all.
    ///
    /// This is what gates system preference changes. A malformed value still
    /// counts as an explicit choice here, even though it is ignored when
    /// resolving the initial theme.
    pub fn has_persisted_value(&self) -> bool {
        let header = self.cookies.cookie_header();
        read_cookie(&header, &self.config.cookie_name).is_some()
    }

    /// Resolves the theme to show at page load.
    pub fn resolve_initial_preference(&self) -> ThemePreference {
        if let Some(saved) = self.persisted_preference() {
            return saved;
        }
        match self.system.prefers_dark() {
            Some(true) => ThemePreference::Dark,
            _ => ThemePreference::Light,
        }
    }

    /// The theme currently shown, read from the root element.
    pub fn applied_preference(&self) -> ThemePreference {
        ThemePreference::from_dark_flag(self.document.has_root_class(&self.config.dark_class))
    }

    /// Adds or removes the dark class. Never touches the cookie.
    pub fn apply_preference(&self, pref: ThemePreference) {
        match pref {
            ThemePreference::Dark => self.document.add_root_class(&self.config.dark_class),
            ThemePreference::Light => self.document.remove_root_class(&self.config.dark_class),
        }
    }

    /// Sets the control's checked state for `pref` (checked = light).
    ///
    /// Returns `false`, without complaint, when the page has no control.
    pub fn sync_toggle_control(&self, pref: ThemePreference) -> bool {
        self.document
            .set_toggle_checked(&self.config.toggle_id, pref.toggle_checked())
    }

    /// Flips the applied theme, persists it and syncs the control.
    ///
    /// The current theme is read from the document, not the cookie, so a theme
    /// that followed the system preference toggles from what the user sees.
    pub fn toggle_preference(&self) -> ThemePreference {
        let next = self.applied_preference().flipped();
        self.apply_preference(next);
        self.persist(next);
        self.sync_toggle_control(next);
        tracing::debug!(theme = %next, "theme toggled by user");
        next
    }

    /// Handles a `prefers-color-scheme` change notification.
    ///
    /// Returns the applied theme, or `None` when the event was ignored because
    /// the user has an explicit preference.
    pub fn on_system_preference_change(&self, matches_dark: bool) -> Option<ThemePreference> {
        if self.has_persisted_value() {
            tracing::trace!(matches_dark, "system theme change ignored, explicit preference set");
            return None;
        }
        let theme = ThemePreference::from_dark_flag(matches_dark);
        self.apply_preference(theme);
        self.sync_toggle_control(theme);
        tracing::debug!(theme = %theme, "theme follows system preference");
        Some(theme)
    }

    /// Runs page-load initialization.
    ///
    /// The theme is applied before anything else so the page never shows the
    /// wrong theme. If the document is already interactive the control is
    /// synced right away; otherwise the caller finishes with
    /// [`document_ready`](Self::document_ready).
    pub fn start(&self) -> Startup {
        let theme = self.resolve_initial_preference();
        self.apply_preference(theme);
        tracing::debug!(theme = %theme, "initial theme applied");

        let ready = if self.document.is_loading() {
            ReadyStep::Deferred
        } else {
            ReadyStep::Done(self.document_ready(theme))
        };
        Startup { theme, ready }
    }

    /// Syncs the control to the theme resolved at load.
    pub fn document_ready(&self, initial: ThemePreference) -> ControlBinding {
        if self.sync_toggle_control(initial) {
            ControlBinding::Bound
        } else {
            tracing::debug!(id = %self.config.toggle_id, "no theme toggle control on page");
            ControlBinding::Absent
        }
    }

    fn persist(&self, pref: ThemePreference) {
        let cookie = PreferenceCookie::new(&self.config, pref, OffsetDateTime::now_utc());
        self.cookies.set_cookie(&cookie.to_string());
    }
}
