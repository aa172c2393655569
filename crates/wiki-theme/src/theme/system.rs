//! Operating system color-mode detection for native hosts.

use once_cell::sync::Lazy;
use std::sync::Mutex;

use super::preference::ThemePreference;
use crate::surface::SystemPreference;

type ThemeDetector = fn() -> Option<ThemePreference>;

static THEME_DETECTOR: Lazy<Mutex<ThemeDetector>> = Lazy::new(|| Mutex::new(os_theme_detector));

/// Overrides the detector used to determine whether the user prefers a light or dark theme.
///
/// This is useful for testing or when you want to force a specific color mode.
/// Returning `None` simulates a platform with no color-mode signal.
pub fn set_theme_detector(detector: ThemeDetector) {
    let mut guard = THEME_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = detector;
}

/// Restores the built-in OS detector.
pub fn reset_theme_detector() {
    set_theme_detector(os_theme_detector);
}

pub(crate) fn detect_color_mode() -> Option<ThemePreference> {
    let detector = THEME_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    (*detector)()
}

#[cfg(not(target_arch = "wasm32"))]
fn os_theme_detector() -> Option<ThemePreference> {
    use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};

    match detect_os_theme() {
        OsThemeMode::Dark => Some(ThemePreference::Dark),
        OsThemeMode::Light => Some(ThemePreference::Light),
    }
}

#[cfg(target_arch = "wasm32")]
fn os_theme_detector() -> Option<ThemePreference> {
    None
}

/// System preference source backed by the operating system theme.
///
/// Native hosts (server-side rendering, previews, tests) use this in place
/// of the browser's `prefers-color-scheme` media query.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsPreference;

impl SystemPreference for OsPreference {
    fn prefers_dark(&self) -> Option<bool> {
        detect_color_mode().map(ThemePreference::is_dark)
    }
}
