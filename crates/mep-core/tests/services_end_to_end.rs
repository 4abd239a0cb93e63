//! End-to-end behaviors from a fetched services document to a rendered carousel

#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]

use mep_core::carousel::{
    CarouselController, CarouselEvent, Direction, TrackRenderer, TrackSnapshot, VirtualScheduler,
};
use mep_core::config::CarouselConfig;
use mep_core::services::{FALLBACK_ICON, HomeSection, READ_MORE_HREF, listing_cards};
use mep_core::{Error, PageLayout, PageMode, SectionId};

const TWO_SERVICES: &str = r#"{"homeServices":[
    {"title":"A","homePageDescription":"d1"},
    {"title":"B","homePageDescription":"d2"}
]}"#;

// ============================================================================
// HOME SERVICES
// ============================================================================

#[test]
fn given_two_home_services_when_rendered_then_two_cards_two_dots_first_active() {
    let section = HomeSection::from_fetch(Ok(TWO_SERVICES.to_string()));

    assert_eq!(section.cards.len(), 2);
    assert_eq!(section.dots.len(), 2);
    assert!(section.dots[0].active);
    assert!(!section.dots[1].active);

    assert_eq!(section.cards[0].title, "A");
    assert_eq!(section.cards[1].description, "d2");
    assert_eq!(section.cards[0].icon, FALLBACK_ICON);
    assert_eq!(section.cards[0].href, READ_MORE_HREF);
}

#[test]
fn given_http_error_when_rendered_then_zero_cards_and_zero_dots() {
    let section = HomeSection::from_fetch(Err(Error::http_status("data/services.json", 500)));
    assert!(section.is_empty());
    assert!(section.dots.is_empty());
}

#[test]
fn given_malformed_json_when_rendered_then_section_stays_empty() {
    let section = HomeSection::from_fetch(Ok("{not json".to_string()));
    assert!(section.is_empty());
}

#[test]
fn given_document_without_home_key_when_rendered_then_section_stays_empty() {
    let section = HomeSection::from_fetch(Ok(r#"{"servicesPage":[]}"#.to_string()));
    assert!(section.is_empty());
}

#[test]
fn given_fetched_cards_when_carousel_starts_then_dots_track_the_index() {
    let section = HomeSection::from_fetch(Ok(TWO_SERVICES.to_string()));
    let mut track = TrackSnapshot::new(section.dots.len());
    let mut controller =
        CarouselController::new(section.len(), CarouselConfig::default(), VirtualScheduler::new())
            .unwrap();

    track.apply_all(&controller.dispatch(CarouselEvent::Viewport {
        viewport_width: 390.0,
        wrapper_width: 350.0,
    }));
    assert_eq!(track.active_dots(), vec![0]);

    track.apply_all(&controller.dispatch(CarouselEvent::Step(Direction::Next)));
    assert_eq!(track.active_dots(), vec![1]);

    track.apply_all(&controller.dispatch(CarouselEvent::Step(Direction::Next)));
    assert_eq!(track.active_dots(), vec![0]);
}

// ============================================================================
// SERVICES LISTING
// ============================================================================

#[test]
fn given_listing_document_when_rendered_then_every_third_card_is_purple() {
    let body = r#"{"servicesPage":[
        {"title":"One","description":"a","image":"1.png"},
        {"title":"Two","description":"b"},
        {"title":"Three","description":"c","image":"3.png"},
        {"title":"Four","description":"d"}
    ]}"#;

    let cards = listing_cards(Ok(body.to_string())).unwrap();
    let classes: Vec<String> = cards.iter().map(|c| c.class()).collect();

    assert_eq!(
        classes,
        vec![
            "srv-card srv-bg-pink",
            "srv-card srv-bg-pink",
            "srv-card srv-bg-purple",
            "srv-card srv-bg-pink",
        ]
    );
    assert_eq!(cards[1].image, "");
}

#[test]
fn given_listing_fetch_failure_when_rendered_then_error_is_reported() {
    let err = listing_cards(Err(Error::fetch_failed("data/services.json", "offline")));
    assert!(matches!(err, Err(Error::FetchFailed { .. })));
}

// ============================================================================
// PAGE ROUTING
// ============================================================================

#[test]
fn given_track_and_container_when_detecting_then_home_wins() {
    let page = |selector: &str| matches!(selector, "#services-track" | ".srv-container");
    let layout = PageLayout::detect(&page);

    assert_eq!(layout.mode(), PageMode::Home);
    assert!(layout.has(SectionId::HomeServices));
    assert!(!layout.has(SectionId::ServicesListing));
}

#[test]
fn given_container_without_track_when_detecting_then_listing_page() {
    let page = |selector: &str| selector == ".srv-container";
    let layout = PageLayout::detect(&page);

    assert_eq!(layout.mode(), PageMode::ServicesListing);
    assert!(layout.has(SectionId::ServicesListing));
}

#[test]
fn given_empty_page_when_detecting_then_no_sections() {
    let page = |_: &str| false;
    let layout = PageLayout::detect(&page);

    assert_eq!(layout.mode(), PageMode::Other);
    assert!(layout.sections().is_empty());
}
