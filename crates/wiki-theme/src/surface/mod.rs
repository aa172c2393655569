//! Host surfaces the controller reads and writes.
//!
//! The controller keeps no state of its own. Everything it knows comes from
//! three external stores, each behind a trait:
//!
//! - [`CookieJar`]: the browser cookie store (`document.cookie`)
//! - [`DocumentSurface`]: the root element's class list, the toggle control,
//!   and the document ready state
//! - [`SystemPreference`]: the `prefers-color-scheme: dark` media query
//!
//! All methods take `&self`. Hosts are single threaded and handlers run to
//! completion, so implementations holding state use `Cell`/`RefCell`.
//!
//! [`memory`] has in-memory implementations for tests and native previews.
//! The browser implementations live in `crate::web` behind the `web` feature.

pub mod memory;

/// Read/write access to the document cookie string.
pub trait CookieJar {
    /// The full cookie header, e.g. `a=1; theme_preference=dark`.
    fn cookie_header(&self) -> String;

    /// Applies one assignment, e.g. `theme_preference=dark; path=/`.
    fn set_cookie(&self, assignment: &str);
}

/// The parts of the page the theme touches.
pub trait DocumentSurface {
    /// Whether the root element carries `class`.
    fn has_root_class(&self, class: &str) -> bool;

    fn add_root_class(&self, class: &str);

    fn remove_root_class(&self, class: &str);

    /// Whether the document is still parsing (`readyState == "loading"`).
    fn is_loading(&self) -> bool;

    /// Checked state of the control with `id`, or `None` if the page has no such control.
    fn toggle_checked(&self, id: &str) -> Option<bool>;

    /// Sets the checked state of the control with `id`.
    ///
    /// Returns `false` when the control does not exist.
    fn set_toggle_checked(&self, id: &str, checked: bool) -> bool;
}

/// The ambient (OS or browser) dark-mode signal.
pub trait SystemPreference {
    /// `Some(true)` when dark content is preferred, `None` when the host
    /// cannot tell (no media-query support).
    fn prefers_dark(&self) -> Option<bool>;
}
