//! # wiki-theme
//!
//! Light/dark theme switching and site configuration for a documentation wiki.
//!
//! The theme switch keeps three things in step: a cookie holding the user's
//! explicit choice, a class on the page's root element, and a checkbox
//! toggle. It reacts to page load, to the user flipping the toggle, and to
//! the operating system changing its color scheme.
//!
//! ## Quick start
//!
//! ```rust
//! use wiki_theme::surface::memory::{FixedPreference, MemoryCookieJar, MemoryDocument};
//! use wiki_theme::{ThemeConfig, ThemePreference, ThemePreferenceController};
//!
//! let controller = ThemePreferenceController::new(
//!     ThemeConfig::default(),
//!     MemoryCookieJar::with_header("theme_preference=light"),
//!     MemoryDocument::new().with_toggle("theme-toggle-checkbox"),
//!     FixedPreference::dark(),
//! );
//!
//! // The explicit choice wins over the system preference.
//! assert_eq!(controller.start().theme, ThemePreference::Light);
//!
//! // ...and system changes are ignored while it exists.
//! assert_eq!(controller.on_system_preference_change(true), None);
//! ```
//!
//! ## Hosts
//!
//! The controller talks to its environment through the traits in
//! [`surface`]. In-memory implementations live in [`surface::memory`];
//! native hosts can read the OS theme with [`OsPreference`]. With the `web`
//! feature on wasm32, `web::install` binds everything to the live page and
//! publishes `window.toggleTheme`.
//!
//! ## Site configuration
//!
//! [`SiteConfig`] is the navigation and theme-switch configuration consumed
//! by the static-site generator, and [`ToggleRenderer`] renders the toggle
//! widget for its templates.

pub mod config;
pub mod controller;
pub mod cookie;
pub mod error;
pub mod markup;
pub mod site;
pub mod surface;
pub mod theme;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use config::{SameSitePolicy, ThemeConfig};
pub use controller::{ControlBinding, ReadyStep, Startup, ThemePreferenceController};
pub use crate::cookie::{read_cookie, PreferenceCookie};
pub use error::{Error, Result};
pub use markup::ToggleRenderer;
pub use site::{NavDiff, NavItem, NavLink, NavPage, NavSection, SiteConfig};
pub use theme::{reset_theme_detector, set_theme_detector, OsPreference, ParsePreferenceError, ThemePreference};
