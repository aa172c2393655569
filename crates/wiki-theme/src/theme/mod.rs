//! Theme preference values and system color-mode detection.
//!
//! This module provides:
//!
//! - [`ThemePreference`]: The light/dark enum persisted in the preference cookie
//! - [`OsPreference`]: A [`SystemPreference`](crate::surface::SystemPreference)
//!   backed by the operating system theme
//! - [`set_theme_detector`]: Process-wide override for the OS detector

mod preference;
mod system;

pub use preference::{ParsePreferenceError, ThemePreference};
pub use system::{reset_theme_detector, set_theme_detector, OsPreference};
