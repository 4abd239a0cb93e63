//! Site configuration.
//!
//! Loaded from TOML embedded in the browser bundle. Every field has a default, so
//! an empty document is a valid configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entrance::ReplayPolicy;
use crate::error::Error;
use crate::page::SectionId;
use crate::result::Result;
use crate::viewport::{Breakpoint, DEFAULT_MOBILE_MAX_WIDTH};

/// Top-level configuration for the enhancement layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Relative URL of the services JSON document.
    pub data_url: String,
    /// `tracing` filter directive, e.g. `info` or `mep_core=debug`.
    pub log_level: String,
    pub carousel: CarouselConfig,
    pub animations: AnimationConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data_url: "assets/data/services.json".to_string(),
            log_level: "info".to_string(),
            carousel: CarouselConfig::default(),
            animations: AnimationConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlParseFailed` for malformed TOML and
    /// `Error::InvalidConfig` when a value is out of range.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.data_url.trim().is_empty() {
            return Err(Error::invalid_config("data_url must not be empty"));
        }
        self.carousel.validate()
    }

    /// Replay policy for one section, falling back to the global default.
    #[must_use]
    pub fn replay_for(&self, section: SectionId) -> ReplayPolicy {
        self.animations.replay_for(section)
    }
}

/// Tuning for the services carousel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    pub mobile_max_width: f64,
    pub autoplay_interval_ms: u32,
    /// Fraction of the wrapper width a drag must cover to change slides.
    pub swipe_threshold_ratio: f64,
    pub slide_duration_ms: u32,
    pub grid_min_column_px: u32,
    pub grid_gap_px: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            mobile_max_width: DEFAULT_MOBILE_MAX_WIDTH,
            autoplay_interval_ms: 3000,
            swipe_threshold_ratio: 0.3,
            slide_duration_ms: 500,
            grid_min_column_px: 300,
            grid_gap_px: 20,
        }
    }
}

impl CarouselConfig {
    /// Builds the layout breakpoint.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the width is not a positive number.
    pub fn breakpoint(&self) -> Result<Breakpoint> {
        Breakpoint::new(self.mobile_max_width).map_err(Error::invalid_config)
    }

    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        self.breakpoint()?;
        if self.autoplay_interval_ms == 0 {
            return Err(Error::invalid_config(
                "carousel.autoplay_interval_ms must be positive",
            ));
        }
        if !(self.swipe_threshold_ratio > 0.0 && self.swipe_threshold_ratio <= 1.0) {
            return Err(Error::invalid_config(format!(
                "carousel.swipe_threshold_ratio must be in (0, 1], got {}",
                self.swipe_threshold_ratio
            )));
        }
        if self.grid_min_column_px == 0 {
            return Err(Error::invalid_config(
                "carousel.grid_min_column_px must be positive",
            ));
        }
        Ok(())
    }
}

/// Replay behaviour of scroll-triggered entrance animations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    pub default_replay: ReplayPolicy,
    /// Per-section overrides, keyed by section name (`about`, `why-choose-us`, ...).
    pub replay: BTreeMap<SectionId, ReplayPolicy>,
}

impl AnimationConfig {
    #[must_use]
    pub fn replay_for(&self, section: SectionId) -> ReplayPolicy {
        self.replay
            .get(&section)
            .copied()
            .unwrap_or(self.default_replay)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = SiteConfig::from_toml_str("").unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.data_url, "assets/data/services.json");
        assert_eq!(config.carousel.autoplay_interval_ms, 3000);
        assert!((config.carousel.swipe_threshold_ratio - 0.3).abs() < f64::EPSILON);
        assert!((config.carousel.mobile_max_width - 767.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_per_section_replay_override() {
        let source = r#"
            [animations]
            default_replay = "play-once"

            [animations.replay]
            about = "play-and-reverse"
        "#;
        let config = SiteConfig::from_toml_str(source).unwrap();
        assert_eq!(
            config.replay_for(SectionId::About),
            ReplayPolicy::PlayAndReverse
        );
        assert_eq!(config.replay_for(SectionId::Hero), ReplayPolicy::PlayOnce);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let source = "[carousel]\nswipe_threshold_ratio = 1.5\n";
        let err = SiteConfig::from_toml_str(source).err();
        assert!(matches!(err, Some(Error::InvalidConfig { .. })));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let source = "[carousel]\nautoplay_interval_ms = 0\n";
        assert!(SiteConfig::from_toml_str(source).is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = SiteConfig::from_toml_str("colour = \"red\"\n").err();
        assert!(matches!(err, Some(Error::TomlParseFailed { .. })));
    }

    #[test]
    fn test_breakpoint_override() {
        let config = SiteConfig::from_toml_str("[carousel]\nmobile_max_width = 992.0\n").unwrap();
        let bp = config.carousel.breakpoint().unwrap();
        assert!(bp.is_mobile(992.0));
    }
}
