//! Browser bindings.
//!
//! Exposes the row operations to the page under the global names the
//! request form markup calls (`addAdditionalEnrollmentRow` and
//! `removeAdditionalEnrollmentRow`).

use wasm_bindgen::prelude::*;
use web_sys::{Element, Window};

use crate::config::{EnrollmentConfig, PageContext, PAGE_CONTEXT_GLOBAL};
use crate::dom::{self, Dom, DomError};
use crate::enrollment::{EnrollmentRows, Notifier};

fn script_error(e: JsValue) -> DomError {
    DomError::Script(format!("{e:?}"))
}

/// [`Dom`] over the live browser document.
pub struct WebDom {
    document: web_sys::Document,
}

impl WebDom {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    pub fn current() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }
}

impl Dom for WebDom {
    type Node = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn create_element(&mut self, tag_name: &str) -> dom::Result<Element> {
        self.document.create_element(tag_name).map_err(script_error)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) -> dom::Result<()> {
        node.set_attribute(name, value).map_err(script_error)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn append_text(&mut self, parent: &Element, text: &str) -> dom::Result<()> {
        parent.append_with_str_1(text).map_err(script_error)
    }

    fn append_child(&mut self, parent: &Element, child: &Element) -> dom::Result<()> {
        parent.append_child(child).map(|_| ()).map_err(script_error)
    }

    fn remove_child(&mut self, parent: &Element, child: &Element) -> dom::Result<()> {
        parent.remove_child(child).map(|_| ()).map_err(script_error)
    }

    fn children(&self, node: &Element) -> Vec<Element> {
        let collection = node.children();
        (0..collection.length())
            .filter_map(|i| collection.item(i))
            .collect()
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn same_node(&self, a: &Element, b: &Element) -> bool {
        let other: &web_sys::Node = b;
        a.is_same_node(Some(other))
    }

    fn child_element_count(&self, node: &Element) -> usize {
        node.child_element_count() as usize
    }
}

/// Shows notifications with `window.alert`.
pub struct AlertNotifier {
    window: Window,
}

impl Notifier for AlertNotifier {
    fn notify(&mut self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            tracing::error!(error = ?e, "alert failed");
        }
    }
}

/// Config the page was rendered with, or the defaults when the page
/// carries no `window.__ENROLL_CONTEXT__`.
fn page_config(window: &Window) -> EnrollmentConfig {
    let raw = match js_sys::Reflect::get(window, &JsValue::from_str(PAGE_CONTEXT_GLOBAL)) {
        Ok(raw) if !raw.is_undefined() && !raw.is_null() => raw,
        _ => return EnrollmentConfig::default(),
    };
    match serde_wasm_bindgen::from_value::<PageContext>(raw) {
        Ok(context) => EnrollmentConfig::default().with_page_context(context),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring malformed page context");
            EnrollmentConfig::default()
        }
    }
}

fn page_rows() -> Result<EnrollmentRows<WebDom, AlertNotifier>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let dom = WebDom::current().ok_or_else(|| JsValue::from_str("no document"))?;
    let config = page_config(&window);
    Ok(EnrollmentRows::new(dom, config, AlertNotifier { window }))
}

#[wasm_bindgen(js_name = addAdditionalEnrollmentRow)]
pub fn add_additional_enrollment_row() -> Result<(), JsValue> {
    let mut rows = page_rows()?;
    rows.add()
        .map(|_| ())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Returns `false` when nothing was removed.
#[wasm_bindgen(js_name = removeAdditionalEnrollmentRow)]
pub fn remove_additional_enrollment_row(parent_div: &str, child_div: &str) -> bool {
    match page_rows() {
        Ok(mut rows) => rows.remove(parent_div, child_div).is_ok(),
        Err(e) => {
            tracing::error!(error = ?e, "page unavailable");
            false
        }
    }
}
