//! Browser binding (feature `web`, wasm32 only).
//!
//! [`install`] connects a [`ThemePreferenceController`] to the live page:
//!
//! - cookies through `document.cookie`
//! - the dark class on `document.documentElement`
//! - the checkbox found by id, plus its `change` listener
//! - `matchMedia(...)` and its `change` event
//! - `window.toggleTheme` (or the configured name) for markup handlers
//!
//! Listeners live as long as the page, so their closures are leaked with
//! `Closure::forget`.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlDocument, HtmlInputElement, MediaQueryList, MediaQueryListEvent};

use crate::config::ThemeConfig;
use crate::controller::{ControlBinding, ReadyStep, ThemePreferenceController};
use crate::surface::{CookieJar, DocumentSurface, SystemPreference};

/// `document.cookie`.
#[derive(Debug, Clone)]
pub struct BrowserCookies {
    document: HtmlDocument,
}

impl CookieJar for BrowserCookies {
    fn cookie_header(&self) -> String {
        self.document.cookie().unwrap_or_default()
    }

    fn set_cookie(&self, assignment: &str) {
        if self.document.set_cookie(assignment).is_err() {
            tracing::warn!("cookie write rejected by the browser");
        }
    }
}

/// The live DOM.
#[derive(Debug, Clone)]
pub struct BrowserDocument {
    document: Document,
}

impl BrowserDocument {
    fn toggle(&self, id: &str) -> Option<HtmlInputElement> {
        self.document
            .get_element_by_id(id)?
            .dyn_into::<HtmlInputElement>()
            .ok()
    }
}

impl DocumentSurface for BrowserDocument {
    fn has_root_class(&self, class: &str) -> bool {
        self.document
            .document_element()
            .is_some_and(|root| root.class_list().contains(class))
    }

    fn add_root_class(&self, class: &str) {
        if let Some(root) = self.document.document_element() {
            if let Err(err) = root.class_list().add_1(class) {
                tracing::warn!(class, ?err, "failed to add root class");
            }
        }
    }

    fn remove_root_class(&self, class: &str) {
        if let Some(root) = self.document.document_element() {
            if let Err(err) = root.class_list().remove_1(class) {
                tracing::warn!(class, ?err, "failed to remove root class");
            }
        }
    }

    fn is_loading(&self) -> bool {
        self.document.ready_state() == "loading"
    }

    fn toggle_checked(&self, id: &str) -> Option<bool> {
        self.toggle(id).map(|input| input.checked())
    }

    fn set_toggle_checked(&self, id: &str, checked: bool) -> bool {
        match self.toggle(id) {
            Some(input) => {
                input.set_checked(checked);
                true
            }
            None => false,
        }
    }
}

/// `window.matchMedia(query)`; `None` when the browser lacks support.
#[derive(Debug, Clone)]
pub struct MediaQuery {
    list: Option<MediaQueryList>,
}

impl SystemPreference for MediaQuery {
    fn prefers_dark(&self) -> Option<bool> {
        self.list.as_ref().map(MediaQueryList::matches)
    }
}

pub type BrowserController = ThemePreferenceController<BrowserCookies, BrowserDocument, MediaQuery>;

/// Installs the theme switch with the default names.
#[wasm_bindgen(js_name = installThemeSwitch)]
pub fn install_default() -> Result<(), JsValue> {
    install(ThemeConfig::default()).map(|_| ())
}

/// Applies the theme immediately and wires every listener.
///
/// Call this from a script in `<head>` so the theme lands before first paint.
/// An invalid configuration is rejected before the page is touched.
pub fn install(config: ThemeConfig) -> Result<Rc<BrowserController>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let html_document = document
        .clone()
        .dyn_into::<HtmlDocument>()
        .map_err(|_| JsValue::from_str("document is not an HTML document"))?;
    let media = window.match_media(&config.media_query).ok().flatten();

    let controller = ThemePreferenceController::try_new(
        config,
        BrowserCookies {
            document: html_document,
        },
        BrowserDocument {
            document: document.clone(),
        },
        MediaQuery {
            list: media.clone(),
        },
    )
    .map_err(|err| JsValue::from_str(&err.to_string()))?;
    let controller = Rc::new(controller);

    let startup = controller.start();
    match startup.ready {
        ReadyStep::Done(binding) => bind_toggle(&controller, binding)?,
        ReadyStep::Deferred => {
            let ctrl = Rc::clone(&controller);
            let theme = startup.theme;
            let on_ready = Closure::<dyn FnMut()>::new(move || {
                let binding = ctrl.document_ready(theme);
                if let Err(err) = bind_toggle(&ctrl, binding) {
                    tracing::warn!(?err, "failed to attach theme toggle listener");
                }
            });
            document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
            on_ready.forget();
        }
    }

    if let Some(list) = media {
        let ctrl = Rc::clone(&controller);
        let on_change = Closure::<dyn FnMut(MediaQueryListEvent)>::new(move |event: MediaQueryListEvent| {
            ctrl.on_system_preference_change(event.matches());
        });
        list.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
        on_change.forget();
    }

    let ctrl = Rc::clone(&controller);
    let entry_point = Closure::<dyn FnMut()>::new(move || {
        ctrl.toggle_preference();
    });
    js_sys::Reflect::set(
        &window,
        &JsValue::from_str(&controller.config().entry_point),
        entry_point.as_ref(),
    )?;
    entry_point.forget();

    Ok(controller)
}

fn bind_toggle(controller: &Rc<BrowserController>, binding: ControlBinding) -> Result<(), JsValue> {
    if binding == ControlBinding::Absent {
        return Ok(());
    }
    let Some(toggle) = controller.document().toggle(&controller.config().toggle_id) else {
        return Ok(());
    };

    let ctrl = Rc::clone(controller);
    let on_change = Closure::<dyn FnMut()>::new(move || {
        ctrl.toggle_preference();
    });
    toggle.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
    on_change.forget();
    Ok(())
}
