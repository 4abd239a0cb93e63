//! Services data rendering
//!
//! Both services sections fetch the same JSON document. The home page renders
//! carousel cards and pagination dots, then starts the carousel. The listing
//! page renders its cards and animates them. Cards are mounted as Leptos views
//! into the containers the static page provides.

use std::rc::Rc;

use gloo_net::http::Request;
use leptos::mount::mount_to;
use leptos::prelude::*;
use mep_core::config::{CarouselConfig, SiteConfig};
use mep_core::entrance::{ReplayPolicy, catalog};
use mep_core::page::{SERVICES_CONTAINER, SERVICES_TRACK, SectionId};
use mep_core::services::{Dot, HomeCard, HomeSection, ListingCard, listing_cards};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlElement};

use crate::carousel::{CarouselShell, DOTS_SELECTOR};
use crate::dom;
use crate::engine::GsapEngine;
use crate::error::{UiError, UiResult, UiResultExt};
use crate::sections;

/// GETs `url` and returns the body of a 2xx response.
///
/// # Errors
///
/// Returns `Error::FetchFailed` on network or body errors and
/// `Error::HttpStatus` on a non-2xx status.
pub async fn fetch_text(url: &str) -> mep_core::Result<String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| mep_core::Error::fetch_failed(url, e.to_string()))?;

    if !response.ok() {
        return Err(mep_core::Error::http_status(url, response.status()));
    }

    response
        .text()
        .await
        .map_err(|e| mep_core::Error::fetch_failed(url, e.to_string()))
}

#[component]
pub fn HomeCardView(card: HomeCard) -> impl IntoView {
    view! {
        <article class="srv-card">
            <div class="srv-icon-box">
                <i class=card.icon></i>
            </div>
            <h3 class="srv-card-title">{card.title}</h3>
            <p class="srv-card-desc">{card.description}</p>
            <a href=card.href class="srv-btn">
                "Read More "
                <i class="fa-solid fa-arrow-right" style="margin-left:5px; font-size:12px;"></i>
            </a>
        </article>
    }
}

/// One dot per card. Exactly one dot carries `active`, following `active`.
#[component]
pub fn PaginationDots(dots: Vec<Dot>, active: RwSignal<usize>) -> impl IntoView {
    dots.into_iter()
        .map(|dot| {
            let index = dot.index;
            view! {
                <span
                    class="srv-dot"
                    class:active=move || active.get() == index
                    data-index=index.to_string()
                ></span>
            }
        })
        .collect::<Vec<_>>()
}

#[component]
pub fn ListingCardView(card: ListingCard) -> impl IntoView {
    let alt = card.title.clone();
    let class = card.class();
    view! {
        <article class=class>
            <div class="srv-text-content">
                <h3>{card.title}</h3>
                <p>{card.description}</p>
            </div>
            <div class="srv-img-wrapper">
                <img src=card.image alt=alt />
            </div>
        </article>
    }
}

/// Fetches home services, renders them and starts the carousel.
pub fn init_home_services(document: &Document, config: &SiteConfig, engine: GsapEngine) {
    let Some(track) = dom::query_html(document, SERVICES_TRACK) else {
        tracing::debug!("no services track on this page");
        return;
    };

    let document = document.clone();
    let url = config.data_url.clone();
    let carousel = config.carousel;
    let replay = config.replay_for(SectionId::HomeServices);

    spawn_local(async move {
        let outcome = fetch_text(&url).await;
        render_home_outcome(&document, &track, outcome, carousel, engine, replay)
            .warn_on_error("failed to start services carousel");
    });
}

/// Renders a finished home services fetch into `track` and starts the
/// carousel. Returns the running shell, or `None` when there was nothing to
/// start.
///
/// A track detached while the request was in flight is left alone. A failed
/// fetch or an empty list clears the track and the dots container.
///
/// # Errors
///
/// Returns an error if the carousel listeners cannot be attached.
pub fn render_home_outcome(
    document: &Document,
    track: &HtmlElement,
    outcome: mep_core::Result<String>,
    carousel: CarouselConfig,
    engine: GsapEngine,
    replay: ReplayPolicy,
) -> UiResult<Option<Rc<CarouselShell>>> {
    if !track.is_connected() {
        tracing::debug!("services track detached before data arrived");
        return Ok(None);
    }

    let section = HomeSection::from_fetch(outcome);
    if section.is_empty() {
        track.set_inner_html("");
        if let Some(container) = dom::query_html(document, DOTS_SELECTOR) {
            container.set_inner_html("");
        }
        return Ok(None);
    }

    render_home(document, track, section, carousel, engine, replay).map(Some)
}

fn render_home(
    document: &Document,
    track: &HtmlElement,
    section: HomeSection,
    carousel: CarouselConfig,
    engine: GsapEngine,
    replay: ReplayPolicy,
) -> UiResult<Rc<CarouselShell>> {
    let card_count = section.len();
    let initial = section
        .dots
        .iter()
        .position(|dot| dot.active)
        .unwrap_or_default();
    let active = RwSignal::new(initial);

    track.set_inner_html("");
    let cards = section.cards;
    mount_to(track.clone(), move || {
        cards
            .into_iter()
            .map(|card| view! { <HomeCardView card=card /> })
            .collect::<Vec<_>>()
    })
    .forget();

    if let Some(container) = dom::query_html(document, DOTS_SELECTOR) {
        container.set_inner_html("");
        let dots = section.dots;
        mount_to(container, move || view! { <PaginationDots dots=dots active=active /> })
            .forget();
    }

    let reveal_document = document.clone();
    let reveal: Box<dyn Fn()> = Box::new(move || {
        sections::play_animation(&reveal_document, engine, &catalog::services_grid_reveal(replay));
    });

    CarouselShell::start(
        document,
        track.clone(),
        card_count,
        carousel,
        active,
        Some(reveal),
    )
}

/// Fetches the services listing, renders it and animates the cards in.
pub fn init_services_listing(document: &Document, config: &SiteConfig, engine: GsapEngine) {
    let Some(container) = dom::query_html(document, SERVICES_CONTAINER) else {
        return;
    };

    let document = document.clone();
    let url = config.data_url.clone();
    let replay = config.replay_for(SectionId::ServicesListing);

    spawn_local(async move {
        let Some(cards) = listing_cards(fetch_text(&url).await)
            .map_err(UiError::from)
            .into_option_logged("Services Page Load Error")
        else {
            return;
        };
        if !container.is_connected() {
            return;
        }

        let count = cards.len();
        container.set_inner_html("");
        mount_to(container, move || {
            cards
                .into_iter()
                .map(|card| view! { <ListingCardView card=card /> })
                .collect::<Vec<_>>()
        })
        .forget();

        if !engine.capabilities().has_engine() {
            return;
        }
        sections::play_animation(&document, engine, &catalog::services_listing_title());
        for index in 0..count {
            sections::play_animation(
                &document,
                engine,
                &catalog::services_listing_card(index, replay),
            );
        }
    });
}
