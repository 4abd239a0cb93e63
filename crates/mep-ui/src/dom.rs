//! DOM access helpers
//!
//! Thin, panic-free wrappers over `web_sys`. Lookups return `Option` because a
//! missing element is a routing signal, not a failure.

use mep_core::PageQuery;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, NodeList, Window};

use crate::error::{UiError, UiResult};

/// Get window object
///
/// # Errors
///
/// Returns `UiError::WindowNotAvailable` outside a browser context.
pub fn window() -> UiResult<Window> {
    web_sys::window().ok_or(UiError::WindowNotAvailable)
}

/// Get document from window
///
/// # Errors
///
/// Returns an error if either the window or its document is missing.
pub fn document() -> UiResult<Document> {
    window()?.document().ok_or(UiError::DocumentNotAvailable)
}

/// First element matching `selector`. Invalid selectors count as absent.
#[must_use]
pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

#[must_use]
pub fn query_html(document: &Document, selector: &str) -> Option<HtmlElement> {
    query(document, selector).and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Every element matching `selector`, in document order.
#[must_use]
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    document
        .query_selector_all(selector)
        .map(|list| elements(&list))
        .unwrap_or_default()
}

/// Every descendant of `root` matching `selector`.
#[must_use]
pub fn query_within(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(|list| elements(&list))
        .unwrap_or_default()
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Sets one inline style property, logging failures.
pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = element.style().set_property(property, value) {
        tracing::warn!("failed to set style {property}: {}", UiError::js(&e));
    }
}

/// Removes one inline style property, logging failures.
pub fn clear_style(element: &HtmlElement, property: &str) {
    if let Err(e) = element.style().remove_property(property) {
        tracing::warn!("failed to clear style {property}: {}", UiError::js(&e));
    }
}

/// Adds a class, logging failures.
pub fn add_class(element: &Element, class: &str) {
    if let Err(e) = element.class_list().add_1(class) {
        tracing::warn!("failed to add class {class}: {}", UiError::js(&e));
    }
}

/// Attaches a listener for the lifetime of the page.
///
/// # Errors
///
/// Returns `UiError::Js` if the browser rejects the listener.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> UiResult<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Runs `f` once the document has been parsed.
///
/// # Errors
///
/// Returns an error if the document is missing or the listener cannot be
/// attached.
pub fn on_ready<F>(f: F) -> UiResult<()>
where
    F: FnOnce() + 'static,
{
    let document = document()?;
    if document.ready_state() != "loading" {
        f();
        return Ok(());
    }

    let mut f = Some(f);
    listen(&document, "DOMContentLoaded", move |_| {
        if let Some(f) = f.take() {
            f();
        }
    })
}

/// Answers selector queries against the live document.
#[derive(Debug, Clone)]
pub struct DocumentQuery {
    document: Document,
}

impl DocumentQuery {
    #[must_use]
    pub const fn new(document: Document) -> Self {
        Self { document }
    }
}

impl PageQuery for DocumentQuery {
    fn has(&self, selector: &str) -> bool {
        query(&self.document, selector).is_some()
    }
}
