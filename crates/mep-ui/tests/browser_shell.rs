#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use mep_core::carousel::{CarouselEvent, RenderCommand, TrackLayout, TrackRenderer};
use mep_core::config::CarouselConfig;
use mep_core::entrance::ReplayPolicy;
use mep_ui::carousel::{CarouselShell, DomRenderer, GestureListeners, GestureSink};
use mep_ui::dom;
use mep_ui::engine::GsapEngine;
use mep_ui::services::{fetch_text, render_home_outcome};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Document, Event, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

const FIXTURE: &str = r#"
<div class="srv-carousel-wrapper" style="width: 320px">
  <div id="services-track">
    <article class="srv-card"></article>
    <article class="srv-card"></article>
    <article class="srv-card"></article>
  </div>
</div>
<button class="srv-carousel-btn prev"></button>
<button class="srv-carousel-btn next"></button>
<div class="srv-carousel-dots">
  <span class="srv-dot active" data-index="0"></span>
  <span class="srv-dot" data-index="1"></span>
  <span class="srv-dot" data-index="2"></span>
</div>
"#;

fn js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn fixture() -> Result<(Document, HtmlElement), JsValue> {
    let document = dom::document().map_err(js)?;
    let body = document.body().ok_or_else(|| js("no body"))?;
    body.set_inner_html(FIXTURE);
    let track = dom::query_html(&document, "#services-track").ok_or_else(|| js("no track"))?;
    Ok((document, track))
}

fn click(document: &Document, selector: &str) -> Result<(), JsValue> {
    dom::query_html(document, selector)
        .ok_or_else(|| js(format!("missing {selector}")))?
        .click();
    Ok(())
}

fn style(element: &HtmlElement, property: &str) -> Result<String, JsValue> {
    element.style().get_property_value(property)
}

fn renderer(track: &HtmlElement) -> Result<DomRenderer, JsValue> {
    let window = dom::window().map_err(js)?;
    let sink = GestureSink::new(|_| {}, || false);
    Ok(DomRenderer::new(window, track.clone(), RwSignal::new(0), sink, None))
}

fn start_slider(
    document: &Document,
    track: HtmlElement,
) -> Result<(Rc<CarouselShell>, RwSignal<usize>), JsValue> {
    let active = RwSignal::new(0);
    let shell = CarouselShell::start(document, track, 3, CarouselConfig::default(), active, None)
        .map_err(js)?;
    shell.send(CarouselEvent::Viewport {
        viewport_width: 500.0,
        wrapper_width: 320.0,
    });
    Ok((shell, active))
}

const TWO_SERVICES: &str = r#"{"homeServices": [
  {"title": "Air Conditioning", "homePageDescription": "Cooling", "icon": "fa-solid fa-fan"},
  {"title": "Plumbing", "description": "Pipes"}
]}"#;

fn render(
    document: &Document,
    track: &HtmlElement,
    outcome: mep_core::Result<String>,
) -> Result<Option<Rc<CarouselShell>>, JsValue> {
    render_home_outcome(
        document,
        track,
        outcome,
        CarouselConfig::default(),
        GsapEngine::detect(),
        ReplayPolicy::default(),
    )
    .map_err(js)
}

fn count(document: &Document, selector: &str) -> usize {
    dom::query_all(document, selector).len()
}

#[wasm_bindgen_test]
fn fetched_services_replace_the_static_cards() -> Result<(), JsValue> {
    let (document, track) = fixture()?;

    let shell = render(&document, &track, Ok(TWO_SERVICES.to_owned()))?;
    assert!(shell.is_some());

    assert_eq!(count(&document, "#services-track .srv-card"), 2);
    assert_eq!(count(&document, ".srv-carousel-dots .srv-dot"), 2);
    let active: Vec<String> = dom::query_all(&document, ".srv-dot")
        .into_iter()
        .filter(|dot| dot.class_list().contains("active"))
        .filter_map(|dot| dot.get_attribute("data-index"))
        .collect();
    assert_eq!(active, vec!["0".to_owned()]);
    Ok(())
}

#[wasm_bindgen_test]
fn detached_track_is_left_alone() -> Result<(), JsValue> {
    let (document, track) = fixture()?;
    track.remove();

    let shell = render(&document, &track, Ok(TWO_SERVICES.to_owned()))?;
    assert!(shell.is_none());

    assert_eq!(track.query_selector_all(".srv-card")?.length(), 3);
    assert_eq!(count(&document, ".srv-carousel-dots .srv-dot"), 3);
    Ok(())
}

#[wasm_bindgen_test]
fn failed_fetch_clears_cards_and_dots() -> Result<(), JsValue> {
    let (document, track) = fixture()?;

    let outcome = Err(mep_core::Error::http_status("/data/services.json", 500));
    assert!(render(&document, &track, outcome)?.is_none());

    assert_eq!(count(&document, ".srv-card"), 0);
    assert_eq!(count(&document, ".srv-dot"), 0);
    Ok(())
}

#[wasm_bindgen_test]
fn empty_service_list_clears_cards_and_dots() -> Result<(), JsValue> {
    let (document, track) = fixture()?;

    let shell = render(&document, &track, Ok(r#"{"homeServices": []}"#.to_owned()))?;
    assert!(shell.is_none());

    assert_eq!(count(&document, ".srv-card"), 0);
    assert_eq!(count(&document, ".srv-dot"), 0);
    Ok(())
}

#[wasm_bindgen_test]
fn grid_layout_is_written_to_the_track() -> Result<(), JsValue> {
    let (_document, track) = fixture()?;
    let mut renderer = renderer(&track)?;

    renderer.apply(&RenderCommand::Layout(TrackLayout::Grid {
        min_column_px: 300,
        gap_px: 20,
    }));

    assert_eq!(style(&track, "display")?, "grid");
    assert_eq!(style(&track, "gap")?, "20px");
    assert_eq!(
        style(&track, "grid-template-columns")?,
        "repeat(auto-fit, minmax(300px, 1fr))"
    );
    Ok(())
}

#[wasm_bindgen_test]
fn card_widths_are_set_and_cleared() -> Result<(), JsValue> {
    let (document, track) = fixture()?;
    let mut renderer = renderer(&track)?;

    renderer.apply(&RenderCommand::CardWidth(Some(320.0)));
    for card in dom::query_all(&document, ".srv-card") {
        let card: HtmlElement = card.dyn_into()?;
        assert_eq!(style(&card, "min-width")?, "320px");
    }

    renderer.apply(&RenderCommand::CardWidth(None));
    for card in dom::query_all(&document, ".srv-card") {
        let card: HtmlElement = card.dyn_into()?;
        assert_eq!(style(&card, "min-width")?, "");
    }
    Ok(())
}

#[wasm_bindgen_test]
fn eased_transform_is_written_immediately() -> Result<(), JsValue> {
    let (_document, track) = fixture()?;
    let mut renderer = renderer(&track)?;

    renderer.apply(&RenderCommand::Transform {
        offset: -320.0,
        transition: mep_core::carousel::Transition::Ease { duration_ms: 500 },
    });
    assert_eq!(style(&track, "transform")?, "translateX(-320px)");

    renderer.apply(&RenderCommand::ClearTransform);
    assert_eq!(style(&track, "transform")?, "none");
    Ok(())
}

#[wasm_bindgen_test]
fn buttons_step_and_wrap() -> Result<(), JsValue> {
    let (document, track) = fixture()?;
    let (shell, active) = start_slider(&document, track)?;

    click(&document, ".srv-carousel-btn.next")?;
    assert_eq!(shell.current_index(), Some(1));

    click(&document, ".srv-carousel-btn.prev")?;
    click(&document, ".srv-carousel-btn.prev")?;
    assert_eq!(shell.current_index(), Some(2));
    assert_eq!(active.get_untracked(), 2);
    Ok(())
}

#[wasm_bindgen_test]
fn dot_clicks_are_delegated() -> Result<(), JsValue> {
    let (document, track) = fixture()?;
    let (shell, active) = start_slider(&document, track)?;

    click(&document, ".srv-dot[data-index=\"2\"]")?;
    assert_eq!(shell.current_index(), Some(2));
    assert_eq!(active.get_untracked(), 2);

    // Clicking the container itself is not a dot.
    click(&document, ".srv-carousel-dots")?;
    assert_eq!(shell.current_index(), Some(2));
    Ok(())
}

#[wasm_bindgen_test]
fn drag_listeners_stop_on_drop() -> Result<(), JsValue> {
    let (_document, track) = fixture()?;
    let seen = Rc::new(RefCell::new(Vec::new()));

    let record = Rc::clone(&seen);
    let sink = GestureSink::new(move |event| record.borrow_mut().push(event), || false);
    let listeners = GestureListeners::attach(&track, &sink).map_err(js)?;

    track.dispatch_event(&Event::new("mouseup")?)?;
    track.dispatch_event(&Event::new("touchend")?)?;
    assert_eq!(
        *seen.borrow(),
        vec![CarouselEvent::DragEnd, CarouselEvent::DragEnd]
    );

    drop(listeners);
    track.dispatch_event(&Event::new("mouseleave")?)?;
    assert_eq!(seen.borrow().len(), 2);
    Ok(())
}

#[wasm_bindgen_test]
async fn missing_data_file_is_an_error() {
    let result = fetch_text("/does-not-exist/services.json").await;
    assert!(matches!(
        result,
        Err(mep_core::Error::HttpStatus { .. } | mep_core::Error::FetchFailed { .. })
    ));
}
