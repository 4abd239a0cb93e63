//! Browser shell for the MEP marketing site
//!
//! Enhances the static HTML pages with a responsive services carousel,
//! data-driven service cards and scroll-triggered entrance animations. All
//! decisions live in `mep_core`; this crate reads the DOM, forwards events and
//! applies the answers.
//!
//! ## Architecture
//! - Leptos 0.7 CSR views mounted into the page's existing containers
//! - WASM compilation target (wasm32-unknown-unknown)
//! - GSAP and ScrollTrigger reached through `wasm_bindgen` externs
//! - IntersectionObserver fallbacks when GSAP is missing
//! - `tracing` events routed to the browser console
//!
//! ## Module Structure
//! - `carousel`: Carousel shell, DOM renderer, drag listeners, interval clock
//! - `dom`: Panic-free DOM helpers
//! - `engine`: GSAP bridge
//! - `error`: Error types and handling
//! - `logging`: Console tracing subscriber
//! - `observer`: IntersectionObserver effects
//! - `sections`: Per-section initialisation
//! - `services`: Services fetch and card views

#![forbid(unsafe_code)]

pub mod carousel;
pub mod dom;
pub mod engine;
pub mod error;
pub mod logging;
pub mod observer;
pub mod sections;
pub mod services;

use mep_core::{PageLayout, SiteConfig};

use crate::dom::DocumentQuery;
use crate::engine::GsapEngine;
use crate::error::UiResult;

/// Site configuration compiled into the bundle.
pub const SITE_TOML: &str = include_str!("../site.toml");

/// Parses `source`, falling back to defaults when it is invalid. The error is
/// handed back rather than logged, since logging is configured from the result.
#[must_use]
pub fn load_config(source: &str) -> (SiteConfig, Option<mep_core::Error>) {
    match SiteConfig::from_toml_str(source) {
        Ok(config) => (config, None),
        Err(e) => (SiteConfig::default(), Some(e)),
    }
}

/// Initialises the page. Call once the document has been parsed.
///
/// # Errors
///
/// Returns an error only if there is no document to work on. Failures inside
/// individual sections are logged and skipped.
pub fn boot() -> UiResult<()> {
    let (config, invalid) = load_config(SITE_TOML);
    logging::init(&config.log_level);
    if let Some(e) = invalid {
        tracing::error!("invalid site.toml, using defaults: {e}");
    }

    let document = dom::document()?;
    let engine = GsapEngine::detect();
    let layout = PageLayout::detect(&DocumentQuery::new(document.clone()));

    sections::init_all(&document, &layout, &config, engine);
    Ok(())
}

/// Runs [`boot`] as soon as the DOM is ready.
///
/// # Errors
///
/// Returns an error if the document is missing or the ready listener cannot
/// be attached.
pub fn start() -> UiResult<()> {
    dom::on_ready(|| {
        if let Err(e) = boot() {
            web_sys::console::error_1(&format!("MEP site failed to start: {e}").into());
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_config_parses() {
        let config = SiteConfig::from_toml_str(SITE_TOML);
        assert!(config.is_ok(), "site.toml is invalid: {config:?}");
    }

    #[test]
    fn test_bundled_config_matches_defaults() {
        assert_eq!(load_config(SITE_TOML), (SiteConfig::default(), None));
    }

    #[test]
    fn test_invalid_config_falls_back_and_reports() {
        let (config, invalid) = load_config("[carousel]\nswipe_threshold_ratio = 7.0\n");
        assert_eq!(config, SiteConfig::default());
        assert!(matches!(invalid, Some(mep_core::Error::InvalidConfig { .. })));

        let (_, invalid) = load_config("data_url = ");
        assert!(matches!(invalid, Some(mep_core::Error::TomlParseFailed { .. })));
    }
}
