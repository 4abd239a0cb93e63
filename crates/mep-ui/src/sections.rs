//! Per-section initialisation
//!
//! Each section detected on the page is set up on its own. A section whose
//! markup is incomplete, or whose setup fails, is logged and skipped without
//! affecting the others.

use mep_core::config::SiteConfig;
use mep_core::entrance::effects::{
    CLIENT_LOGO_SELECTOR, LEGACY_SERVICE_BOXES, TESTIMONIAL_HOVER, client_name,
};
use mep_core::entrance::{Playback, SectionAnimation, catalog};
use mep_core::page::{PageLayout, SectionId};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlImageElement};

use crate::dom;
use crate::engine::GsapEngine;
use crate::error::{UiResult, UiResultExt};
use crate::observer;
use crate::services;

/// Initialises every section in `layout`.
pub fn init_all(document: &Document, layout: &PageLayout, config: &SiteConfig, engine: GsapEngine) {
    tracing::info!(mode = ?layout.mode(), sections = layout.sections().len(), "page detected");

    for &section in layout.sections() {
        let _span = tracing::debug_span!("section", %section).entered();
        init_section(document, section, config, engine);
    }
}

fn init_section(document: &Document, section: SectionId, config: &SiteConfig, engine: GsapEngine) {
    for animation in catalog::for_section(section, &config.animations) {
        play_animation(document, engine, &animation);
    }

    match section {
        SectionId::HomeServices => services::init_home_services(document, config, engine),
        SectionId::ServicesListing => services::init_services_listing(document, config, engine),
        SectionId::Testimonials => {
            bind_hover_scale(document, engine).warn_on_error("testimonial hover");
        }
        SectionId::Clients => bind_client_logos(document).warn_on_error("client logos"),
        SectionId::Quote => observer::typewriter(document).warn_on_error("quote typewriter"),
        SectionId::LegacyScroll => {
            observer::reveal_on_scroll(document, LEGACY_SERVICE_BOXES)
                .warn_on_error("service box reveal");
        }
        SectionId::Hero
        | SectionId::About
        | SectionId::WhyChooseUs
        | SectionId::QuickConnect
        | SectionId::AboutPage => {}
    }
}

/// Plays `animation` with the engine, its observer fallback, or not at all.
/// Skipped quietly when its first target is not on the page.
pub fn play_animation(document: &Document, engine: GsapEngine, animation: &SectionAnimation) {
    if let Some(anchor) = animation.anchor() {
        if dom::query(document, anchor).is_none() {
            tracing::debug!(section = %animation.section, anchor, "animation target missing");
            return;
        }
    }

    match animation.playback(engine.capabilities()) {
        Playback::Engine => engine
            .play(animation)
            .warn_on_error(&format!("{} animation", animation.section)),
        Playback::Observer(fallback) => observer::class_reveal(document, &fallback)
            .warn_on_error(&format!("{} fallback", animation.section)),
        Playback::Skip => {
            tracing::debug!(section = %animation.section, "animation skipped");
        }
    }
}

fn bind_hover_scale(document: &Document, engine: GsapEngine) -> UiResult<()> {
    if !engine.capabilities().has_engine() {
        return Ok(());
    }

    let hover = TESTIMONIAL_HOVER;
    for card in dom::query_all(document, hover.selector) {
        let target = card.clone();
        dom::listen(&card, "mouseenter", move |_| {
            engine
                .scale(&target, hover.hover_scale, hover.duration)
                .warn_on_error("hover scale");
        })?;

        let target = card.clone();
        dom::listen(&card, "mouseleave", move |_| {
            engine
                .scale(&target, hover.rest_scale, hover.duration)
                .warn_on_error("hover scale");
        })?;
    }
    Ok(())
}

fn bind_client_logos(document: &Document) -> UiResult<()> {
    for logo in dom::query_all(document, CLIENT_LOGO_SELECTOR) {
        let Ok(image) = logo.dyn_into::<HtmlImageElement>() else {
            continue;
        };
        let name = client_name(&image.alt());
        dom::listen(&image, "click", move |_| {
            tracing::info!("Clicked client: {name}");
        })?;
    }
    Ok(())
}
