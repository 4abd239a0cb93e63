//! IntersectionObserver effects
//!
//! Class-toggle reveals that run without the animation engine: the
//! why-choose-us and quick-connect fallbacks, the quote typewriter and the
//! legacy `.service-box` reveal. Every observer fires once per target and then
//! unobserves it.

use gloo_timers::callback::Timeout;
use js_sys::Array;
use mep_core::entrance::ObserverFallback;
use mep_core::entrance::effects::{
    QUOTE_SELECTOR, QUOTE_STEP_MS, QUOTE_THRESHOLD, QUOTE_VISIBLE_CLASS, RevealOnScroll,
    typewriter_glyphs,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::dom;
use crate::error::{UiError, UiResult};

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Calls `on_visible` the first time each target intersects.
///
/// # Errors
///
/// Returns `UiError::Js` if the observer cannot be created.
pub fn observe_once<F>(
    targets: &[Element],
    threshold: f64,
    root_margin: Option<&str>,
    mut on_visible: F,
) -> UiResult<()>
where
    F: FnMut(&Element) + 'static,
{
    let callback: ObserverCallback = Closure::wrap(Box::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                on_visible(&target);
                observer.unobserve(&target);
            }
        },
    ) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        init.set_root_margin(margin);
    }

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    for target in targets {
        observer.observe(target);
    }

    // The observer holds the callback for the rest of the page's life.
    callback.forget();
    Ok(())
}

/// Marks a section ready, then visible once it scrolls into view.
///
/// # Errors
///
/// Returns `ElementNotFound` if the section is missing, or a JS error from the
/// observer.
pub fn class_reveal(document: &Document, fallback: &ObserverFallback) -> UiResult<()> {
    let section = dom::query(document, &fallback.target)
        .ok_or_else(|| UiError::ElementNotFound(fallback.target.clone()))?;

    dom::add_class(&section, &fallback.ready_class);

    let visible = fallback.visible_class.clone();
    observe_once(
        &[section],
        fallback.threshold,
        fallback.root_margin.as_deref(),
        move |el| dom::add_class(el, &visible),
    )?;

    tracing::debug!(selector = %fallback.target, "observer fallback armed");
    Ok(())
}

/// Adds `reveal.class` to each matching element as it enters the viewport.
///
/// # Errors
///
/// Returns a JS error from the observer.
pub fn reveal_on_scroll(document: &Document, reveal: RevealOnScroll) -> UiResult<()> {
    let targets = dom::query_all(document, reveal.selector);
    if targets.is_empty() {
        return Ok(());
    }

    observe_once(&targets, reveal.threshold, None, move |el| {
        dom::add_class(el, reveal.class);
    })
}

/// Splits the quote into per-character spans and types it out once half of it
/// is visible.
///
/// # Errors
///
/// Returns a JS error if spans cannot be created or observed.
pub fn typewriter(document: &Document) -> UiResult<()> {
    let Some(quote) = dom::query(document, QUOTE_SELECTOR) else {
        return Ok(());
    };

    let text = quote.text_content().unwrap_or_default();
    quote.set_text_content(Some(""));

    let mut spans = Vec::new();
    for glyph in typewriter_glyphs(&text, QUOTE_STEP_MS) {
        let span = document.create_element("span")?;
        span.set_text_content(Some(glyph.text.encode_utf8(&mut [0; 4])));
        quote.append_child(&span)?;
        spans.push((span, glyph.delay_ms));
    }

    observe_once(&[quote], QUOTE_THRESHOLD, None, move |_| {
        for (span, delay_ms) in std::mem::take(&mut spans) {
            Timeout::new(delay_ms, move || dom::add_class(&span, QUOTE_VISIBLE_CLASS)).forget();
        }
    })
}
