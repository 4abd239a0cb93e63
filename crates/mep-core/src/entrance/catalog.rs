//! Per-section entrance animations

use super::{
    Ease, ObserverFallback, Props, ReplayPolicy, ScrollTrigger, SectionAnimation, Tween,
};
use crate::config::AnimationConfig;
use crate::page::{SERVICES_CONTAINER, SERVICES_TRACK, SectionId};

/// Animations that start as soon as `section` is initialised.
///
/// The home services grid reveal is absent here because the carousel plays
/// it on its first grid layout, see [`services_grid_reveal`]. The services
/// listing animates once its cards are fetched, see [`services_listing_title`]
/// and [`services_listing_card`].
#[must_use]
pub fn for_section(section: SectionId, config: &AnimationConfig) -> Vec<SectionAnimation> {
    let replay = config.replay_for(section);
    match section {
        SectionId::Hero => vec![hero()],
        SectionId::About => vec![about(replay)],
        SectionId::WhyChooseUs => vec![why_choose_us(replay)],
        SectionId::QuickConnect => vec![quick_connect(replay)],
        SectionId::Testimonials => testimonials(replay),
        SectionId::AboutPage => about_page(replay),
        SectionId::HomeServices
        | SectionId::ServicesListing
        | SectionId::Clients
        | SectionId::Quote
        | SectionId::LegacyScroll => Vec::new(),
    }
}

/// Hero timeline, played on load.
#[must_use]
pub fn hero() -> SectionAnimation {
    SectionAnimation::new(SectionId::Hero)
        .default_ease(Ease::Power3Out)
        .step(Tween::from(".mep-hero__title", Props::hidden().y(50.0), 1.0).delay(0.2))
        .step(Tween::from(".mep-hero__description", Props::hidden().y(30.0), 0.8).at("-=0.4"))
        .step(
            Tween::from(".mep-hero__btn", Props::hidden().scale(0.8), 0.6)
                .ease(Ease::BackOut(1.7))
                .at("-=0.2"),
        )
}

#[must_use]
pub fn about(replay: ReplayPolicy) -> SectionAnimation {
    SectionAnimation::new(SectionId::About)
        .scroll(ScrollTrigger::new("#au-about-section", "top 80%", replay).end("bottom 20%"))
        .step(
            Tween::to(".au-content-card", Props::new().y(0.0).opacity(1.0), 1.0)
                .ease(Ease::Power3Out),
        )
        .step(
            Tween::from(".au-heading, .au-text, .au-btn-wrapper", Props::hidden().y(20.0), 0.8)
                .stagger(0.2)
                .ease(Ease::BackOut(1.7))
                .at("-=0.5"),
        )
}

#[must_use]
pub fn why_choose_us(replay: ReplayPolicy) -> SectionAnimation {
    SectionAnimation::new(SectionId::WhyChooseUs)
        .scroll(ScrollTrigger::new("#why-choose-us", "top 78%", replay))
        .step(
            Tween::from("#why-choose-us .wcu-main-heading", Props::hidden().y(30.0), 0.6)
                .ease(Ease::Power2Out),
        )
        .step(
            Tween::from("#why-choose-us .wcu-image-frame", Props::hidden().x(-45.0), 0.8)
                .ease(Ease::Power3Out)
                .at("-=0.2"),
        )
        .step(
            Tween::from("#why-choose-us .wcu-feature-card", Props::hidden().y(28.0), 0.55)
                .stagger(0.12)
                .ease(Ease::BackOut(1.3))
                .at("-=0.45"),
        )
        .fallback(ObserverFallback {
            target: "#why-choose-us".to_string(),
            ready_class: "wcu-animate-ready".to_string(),
            visible_class: "wcu-visible".to_string(),
            threshold: 0.2,
            root_margin: None,
        })
}

#[must_use]
pub fn quick_connect(replay: ReplayPolicy) -> SectionAnimation {
    SectionAnimation::new(SectionId::QuickConnect)
        .scroll(ScrollTrigger::new(".connect-section", "top 92%", replay))
        .step(Tween::from(".connect-form", Props::hidden().y(48.0), 0.9).ease(Ease::Power3Out))
        .step(
            Tween::from(
                ".connect-form h2, .connect-form input, .connect-form select, \
                 .connect-form textarea, .connect-form button",
                Props::hidden().y(20.0),
                0.5,
            )
            .stagger(0.08)
            .ease(Ease::Power2Out)
            .at("-=0.45"),
        )
        .fallback(ObserverFallback {
            target: ".connect-section".to_string(),
            ready_class: "qc-animate-ready".to_string(),
            visible_class: "qc-visible".to_string(),
            threshold: 0.35,
            root_margin: Some("0px 0px -10% 0px".to_string()),
        })
}

/// Staggered reveal of the home services cards in grid mode.
#[must_use]
pub fn services_grid_reveal(replay: ReplayPolicy) -> SectionAnimation {
    SectionAnimation::new(SectionId::HomeServices)
        .scroll(ScrollTrigger::new(SERVICES_TRACK, "top 80%", replay))
        .step(
            Tween::from(format!("{SERVICES_TRACK} .srv-card"), Props::hidden().y(50.0), 0.8)
                .stagger(0.1)
                .ease(Ease::Power2Out),
        )
}

#[must_use]
pub fn services_listing_title() -> SectionAnimation {
    SectionAnimation::new(SectionId::ServicesListing).step(
        Tween::from(".srv-main-title", Props::hidden().y(-50.0), 1.2).ease(Ease::Power3Out),
    )
}

/// Slide-in for the listing card at `index`. Even cards come from the left.
#[must_use]
pub fn services_listing_card(index: usize, replay: ReplayPolicy) -> SectionAnimation {
    let x = if index % 2 == 0 { -50.0 } else { 50.0 };
    let selector = format!(
        "{SERVICES_CONTAINER} .srv-card:nth-child({})",
        index.saturating_add(1)
    );

    SectionAnimation::new(SectionId::ServicesListing)
        .scroll(ScrollTrigger::new(selector.clone(), "top 85%", replay))
        .step(
            Tween::from_to(
                selector,
                Props::hidden().x(x).y(30.0),
                Props::new().opacity(1.0).x(0.0).y(0.0),
                1.0,
            )
            .ease(Ease::Power3Out),
        )
}

#[must_use]
pub fn testimonials(replay: ReplayPolicy) -> Vec<SectionAnimation> {
    vec![
        SectionAnimation::new(SectionId::Testimonials)
            .scroll(ScrollTrigger::new(".section-title-unique", "top 85%", replay))
            .step(
                Tween::from(".section-title-unique", Props::hidden().y(-50.0), 1.0)
                    .ease(Ease::Power3Out),
            ),
        SectionAnimation::new(SectionId::Testimonials)
            .scroll(ScrollTrigger::new(".testimonial-card-unique", "top 85%", replay))
            .step(
                Tween::from(".testimonial-card-unique", Props::hidden().y(50.0), 0.8)
                    .ease(Ease::Power2Out)
                    .stagger(0.2),
            ),
    ]
}

#[must_use]
pub fn about_page(replay: ReplayPolicy) -> Vec<SectionAnimation> {
    vec![
        SectionAnimation::new(SectionId::AboutPage).step(
            Tween::from(".about-hero__title", Props::hidden().y(50.0), 1.2).ease(Ease::Power3Out),
        ),
        SectionAnimation::new(SectionId::AboutPage)
            .scroll(ScrollTrigger::new("#who-we-are", "top 80%", replay))
            .step(
                Tween::from(
                    "#who-we-are .section-title, #who-we-are .section-desc",
                    Props::hidden().y(30.0),
                    0.8,
                )
                .stagger(0.2)
                .ease(Ease::Power2Out),
            ),
        SectionAnimation::new(SectionId::AboutPage)
            .scroll(ScrollTrigger::new("#mission-vision", "top 75%", replay))
            .step(Tween::from(".mission-card", Props::hidden().x(-50.0), 0.8).ease(Ease::Power2Out))
            .step(
                Tween::from(".vision-card", Props::hidden().x(50.0), 0.8)
                    .ease(Ease::Power2Out)
                    .at("-=0.6"),
            ),
        SectionAnimation::new(SectionId::AboutPage)
            .scroll(ScrollTrigger::new("#what-we-offer", "top 80%", replay))
            .step(
                Tween::from(".offer-item", Props::hidden().y(40.0), 0.6)
                    .stagger(0.15)
                    .ease(Ease::BackOut(1.7)),
            ),
    ]
}
