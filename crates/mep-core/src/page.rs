//! Page-mode resolution
//!
//! The site ships several static HTML pages that all load the same bundle. Which
//! initializers run is decided by which elements a page contains. That check
//! happens exactly once at startup and the result is threaded through as
//! configuration.

use serde::{Deserialize, Serialize};

/// Selector of the home-page carousel track.
pub const SERVICES_TRACK: &str = "#services-track";
/// Selector of the services listing container.
pub const SERVICES_CONTAINER: &str = ".srv-container";

/// Answers "does this page contain an element matching `selector`?"
pub trait PageQuery {
    fn has(&self, selector: &str) -> bool;
}

impl<F> PageQuery for F
where
    F: Fn(&str) -> bool,
{
    fn has(&self, selector: &str) -> bool {
        self(selector)
    }
}

/// Which services variant the page carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    /// Carousel track present: home-page cards from `homeServices`
    Home,
    /// Listing container without a track: cards from `servicesPage`
    ServicesListing,
    /// No services section
    Other,
}

/// Independently guarded page sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionId {
    Hero,
    About,
    WhyChooseUs,
    QuickConnect,
    HomeServices,
    ServicesListing,
    Testimonials,
    Clients,
    Quote,
    LegacyScroll,
    AboutPage,
}

impl SectionId {
    /// Initialization order.
    pub const ALL: [Self; 11] = [
        Self::Hero,
        Self::About,
        Self::WhyChooseUs,
        Self::QuickConnect,
        Self::HomeServices,
        Self::ServicesListing,
        Self::Testimonials,
        Self::Clients,
        Self::Quote,
        Self::LegacyScroll,
        Self::AboutPage,
    ];

    /// Whether the page carries the markup this section animates.
    pub fn is_present(self, page: &impl PageQuery) -> bool {
        match self {
            Self::Hero => page.has(".mep-hero__title"),
            Self::About => page.has("#au-about-section"),
            Self::WhyChooseUs => page.has("#why-choose-us"),
            Self::QuickConnect => page.has(".connect-section") && page.has(".connect-form"),
            Self::HomeServices => page.has(SERVICES_TRACK),
            Self::ServicesListing => page.has(SERVICES_CONTAINER) && !page.has(SERVICES_TRACK),
            Self::Testimonials => {
                page.has(".section-title-unique") || page.has(".testimonial-card-unique")
            }
            Self::Clients => page.has(".slide img"),
            Self::Quote => page.has(".quote-text"),
            Self::LegacyScroll => page.has(".service-box"),
            Self::AboutPage => page.has("#about-hero"),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::About => "about",
            Self::WhyChooseUs => "why-choose-us",
            Self::QuickConnect => "quick-connect",
            Self::HomeServices => "home-services",
            Self::ServicesListing => "services-listing",
            Self::Testimonials => "testimonials",
            Self::Clients => "clients",
            Self::Quote => "quote",
            Self::LegacyScroll => "legacy-scroll",
            Self::AboutPage => "about-page",
        }
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The resolved shape of the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    mode: PageMode,
    sections: Vec<SectionId>,
}

impl PageLayout {
    /// Queries the page once and records every section it carries.
    pub fn detect(page: &impl PageQuery) -> Self {
        let sections: Vec<SectionId> = SectionId::ALL
            .into_iter()
            .filter(|section| section.is_present(page))
            .collect();

        let mode = if sections.contains(&SectionId::HomeServices) {
            PageMode::Home
        } else if sections.contains(&SectionId::ServicesListing) {
            PageMode::ServicesListing
        } else {
            PageMode::Other
        };

        tracing::debug!(?mode, ?sections, "page layout resolved");
        Self { mode, sections }
    }

    #[must_use]
    pub const fn mode(&self) -> PageMode {
        self.mode
    }

    #[must_use]
    pub fn sections(&self) -> &[SectionId] {
        &self.sections
    }

    #[must_use]
    pub fn has(&self, section: SectionId) -> bool {
        self.sections.contains(&section)
    }
}
