//! Viewport classification for the services section
//!
//! Decides whether the track renders as a grid (desktop, tablet) or as a
//! single-row slider (phones). The breakpoint is inclusive and mirrors the
//! `(max-width: 767px)` media query used by the stylesheet.

use serde::{Deserialize, Serialize};

/// Widest viewport, in CSS pixels, that still gets the slider.
pub const DEFAULT_MOBILE_MAX_WIDTH: f64 = 767.0;

/// How the services track is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Multi-column CSS grid, no gestures, no autoplay
    Grid,
    /// Single-row flex slider with gestures and autoplay
    Slider,
}

impl LayoutMode {
    /// Returns true for the slider layout.
    #[must_use]
    pub const fn is_slider(self) -> bool {
        matches!(self, Self::Slider)
    }
}

/// A validated layout breakpoint.
///
/// # Examples
///
/// ```
/// use mep_core::viewport::{Breakpoint, LayoutMode};
///
/// let bp = Breakpoint::default();
/// assert!(bp.is_mobile(767.0));
/// assert!(!bp.is_mobile(768.0));
/// assert_eq!(bp.classify(1024.0), LayoutMode::Grid);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    mobile_max_width: f64,
}

impl Breakpoint {
    /// Creates a breakpoint from the widest mobile width.
    ///
    /// # Errors
    ///
    /// Returns an error if the width is not finite or not positive.
    pub fn new(mobile_max_width: f64) -> Result<Self, String> {
        if !mobile_max_width.is_finite() || mobile_max_width <= 0.0 {
            return Err(format!("Invalid mobile breakpoint: {mobile_max_width}"));
        }
        Ok(Self { mobile_max_width })
    }

    /// Returns the widest width that still counts as mobile.
    #[must_use]
    pub const fn mobile_max_width(&self) -> f64 {
        self.mobile_max_width
    }

    /// Pure mobile check. Non-finite widths are treated as desktop.
    #[must_use]
    pub fn is_mobile(&self, width: f64) -> bool {
        width.is_finite() && width <= self.mobile_max_width
    }

    /// Maps a viewport width to the layout mode it requires.
    #[must_use]
    pub fn classify(&self, width: f64) -> LayoutMode {
        if self.is_mobile(width) {
            LayoutMode::Slider
        } else {
            LayoutMode::Grid
        }
    }
}

impl Default for Breakpoint {
    fn default() -> Self {
        Self {
            mobile_max_width: DEFAULT_MOBILE_MAX_WIDTH,
        }
    }
}
