//! In-memory host surfaces.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;

use time::OffsetDateTime;

use super::{CookieJar, DocumentSurface, SystemPreference};
use crate::cookie::parse_assignment;

/// A cookie store that behaves like `document.cookie`.
///
/// Assignments replace the previous value for the same name, keep insertion
/// order otherwise, and remove the cookie when they carry a past expiry.
/// Every assignment is also recorded so callers can check what was written.
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    cookies: RefCell<Vec<(String, String)>>,
    writes: RefCell<Vec<String>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a jar pre-populated from a header such as `a=1; b=2`.
    pub fn with_header(header: &str) -> Self {
        let cookies = header
            .split(';')
            .filter_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                Some((name.to_string(), value.to_string()))
            })
            .collect();
        Self {
            cookies: RefCell::new(cookies),
            writes: RefCell::new(Vec::new()),
        }
    }

    /// Assignments written through [`CookieJar::set_cookie`], oldest first.
    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }

    /// Current value of `name`, if set.
    pub fn get(&self, name: &str) -> Option<String> {
        self.cookies
            .borrow()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }
}

impl CookieJar for MemoryCookieJar {
    fn cookie_header(&self) -> String {
        self.cookies
            .borrow()
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn set_cookie(&self, assignment: &str) {
        self.writes.borrow_mut().push(assignment.to_string());

        let Some(parsed) = parse_assignment(assignment, OffsetDateTime::now_utc()) else {
            return;
        };
        let mut cookies = self.cookies.borrow_mut();
        let existing = cookies.iter().position(|(n, _)| *n == parsed.name);
        match (existing, parsed.expired) {
            (Some(idx), true) => {
                cookies.remove(idx);
            }
            (Some(idx), false) => cookies[idx].1 = parsed.value,
            (None, true) => {}
            (None, false) => cookies.push((parsed.name, parsed.value)),
        }
    }
}

/// A document with a root class list and an optional checkbox.
#[derive(Debug)]
pub struct MemoryDocument {
    root_classes: RefCell<BTreeSet<String>>,
    toggle: Option<(String, Cell<bool>)>,
    loading: Cell<bool>,
}

impl MemoryDocument {
    /// A fully parsed document without a toggle control.
    pub fn new() -> Self {
        Self {
            root_classes: RefCell::new(BTreeSet::new()),
            toggle: None,
            loading: Cell::new(false),
        }
    }

    /// Adds a checkbox with the given id, initially unchecked.
    pub fn with_toggle(mut self, id: impl Into<String>) -> Self {
        self.toggle = Some((id.into(), Cell::new(false)));
        self
    }

    /// Starts the document in the `loading` ready state.
    pub fn loading(self) -> Self {
        self.loading.set(true);
        self
    }

    /// Moves the document out of the `loading` state.
    pub fn finish_loading(&self) {
        self.loading.set(false);
    }

    /// Simulates the user clicking the checkbox; returns the new checked state.
    ///
    /// Does nothing and returns `None` when there is no control.
    pub fn click_toggle(&self) -> Option<bool> {
        let (_, checked) = self.toggle.as_ref()?;
        checked.set(!checked.get());
        Some(checked.get())
    }

    /// Root element classes in sorted order.
    pub fn root_classes(&self) -> Vec<String> {
        self.root_classes.borrow().iter().cloned().collect()
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSurface for MemoryDocument {
    fn has_root_class(&self, class: &str) -> bool {
        self.root_classes.borrow().contains(class)
    }

    fn add_root_class(&self, class: &str) {
        self.root_classes.borrow_mut().insert(class.to_string());
    }

    fn remove_root_class(&self, class: &str) {
        self.root_classes.borrow_mut().remove(class);
    }

    fn is_loading(&self) -> bool {
        self.loading.get()
    }

    fn toggle_checked(&self, id: &str) -> Option<bool> {
        match &self.toggle {
            Some((toggle_id, checked)) if toggle_id == id => Some(checked.get()),
            _ => None,
        }
    }

    fn set_toggle_checked(&self, id: &str, checked: bool) -> bool {
        match &self.toggle {
            Some((toggle_id, state)) if toggle_id == id => {
                state.set(checked);
                true
            }
            _ => false,
        }
    }
}

/// A settable system preference.
///
/// `FixedPreference::unavailable()` models a host without media-query support.
#[derive(Debug, Default)]
pub struct FixedPreference {
    dark: Cell<Option<bool>>,
}

impl FixedPreference {
    pub fn dark() -> Self {
        Self::reporting(Some(true))
    }

    pub fn light() -> Self {
        Self::reporting(Some(false))
    }

    pub fn unavailable() -> Self {
        Self::reporting(None)
    }

    pub fn reporting(dark: Option<bool>) -> Self {
        Self {
            dark: Cell::new(dark),
        }
    }

    /// Changes the reported preference, as the OS would before firing a change event.
    pub fn set(&self, dark: Option<bool>) {
        self.dark.set(dark);
    }
}

impl SystemPreference for FixedPreference {
    fn prefers_dark(&self) -> Option<bool> {
        self.dark.get()
    }
}
