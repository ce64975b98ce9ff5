//! Browser bindings (WASM only)

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, HtmlFormElement, HtmlSelectElement};

use super::{ElementSource, bootstrap};
use crate::controller::{SelectControl, SubmitSource};
use crate::ready::{DocumentReadiness, ReadyState};
use crate::storage::LocalStore;
use crate::{AutofillError, Result};

#[derive(Clone)]
pub struct WebDocument(pub web_sys::Document);

impl WebDocument {
    pub fn current() -> Result<Self> {
        let window = web_sys::window().ok_or(AutofillError::NoWindow)?;
        let document = window.document().ok_or(AutofillError::NoDocument)?;
        Ok(Self(document))
    }
}

impl DocumentReadiness for WebDocument {
    fn ready_state(&self) -> ReadyState {
        ReadyState::from_str(&self.0.ready_state())
    }

    fn on_content_loaded(&self, callback: Box<dyn FnOnce()>) {
        let closure = Closure::once(move |_event: web_sys::Event| callback());
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        if self
            .0
            .add_event_listener_with_callback_and_add_event_listener_options(
                "DOMContentLoaded",
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .is_err()
        {
            log::error!("Failed to listen for DOMContentLoaded");
        }
        closure.forget();
    }
}

impl ElementSource for WebDocument {
    type Form = WebForm;
    type Select = WebSelect;

    fn form(&self, id: &str) -> Result<WebForm> {
        self.0
            .get_element_by_id(id)
            .ok_or_else(|| AutofillError::missing(id))?
            .dyn_into::<HtmlFormElement>()
            .map(WebForm)
            .map_err(|_| AutofillError::wrong_type(id, "<form>"))
    }

    fn select(&self, id: &str) -> Result<WebSelect> {
        self.0
            .get_element_by_id(id)
            .ok_or_else(|| AutofillError::missing(id))?
            .dyn_into::<HtmlSelectElement>()
            .map(WebSelect)
            .map_err(|_| AutofillError::wrong_type(id, "<select>"))
    }

    fn text_content(&self, id: &str) -> Option<String> {
        self.0.get_element_by_id(id)?.text_content()
    }
}

pub struct WebForm(pub HtmlFormElement);

impl SubmitSource for WebForm {
    fn on_submit(&self, mut handler: Box<dyn FnMut()>) {
        // Listener lives as long as the page; never calls preventDefault
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| handler());
        if self
            .0
            .add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::error!("Failed to listen for form submit");
        }
        closure.forget();
    }

    fn mark_attached(&self) -> bool {
        if self.0.has_attribute(Self::ATTACHED_ATTR) {
            return false;
        }
        let _ = self.0.set_attribute(Self::ATTACHED_ATTR, "");
        true
    }
}

impl WebForm {
    const ATTACHED_ATTR: &'static str = "data-login-autofill";
}

pub struct WebSelect(pub HtmlSelectElement);

impl SelectControl for WebSelect {
    fn value(&self) -> String {
        self.0.value()
    }

    fn set_value(&self, value: &str) {
        self.0.set_value(value);
    }
}

/// Wire up login autofill on the current page.
///
/// `config_json` overrides the page's inline `#autofill-config` block.
/// Calling this on a page that already started autofill leaves the existing
/// submit handler as the only one.
pub fn start(config_json: Option<String>) -> Result<bool> {
    let document = WebDocument::current()?;
    let store = Rc::new(LocalStore::open()?);
    Ok(bootstrap(document, store, config_json))
}

/// JS entry point for pages that drive setup themselves
#[wasm_bindgen(js_name = startAutofill)]
pub fn start_autofill(config_json: Option<String>) -> std::result::Result<(), JsValue> {
    start(config_json)
        .map(|_| ())
        .map_err(|err| JsValue::from_str(&err.to_string()))
}
