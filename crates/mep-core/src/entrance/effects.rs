//! Small page effects outside the timeline engine.

/// Non-breaking space, keeps per-character spans from collapsing.
pub const NBSP: char = '\u{a0}';

/// Quote typewriter: one span per character revealed in sequence.
pub const QUOTE_SELECTOR: &str = ".quote-text";
pub const QUOTE_STEP_MS: u32 = 30;
pub const QUOTE_THRESHOLD: f64 = 0.5;
pub const QUOTE_VISIBLE_CLASS: &str = "visible";

/// One character of the typewriter quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub text: char,
    /// Milliseconds after the quote enters the viewport
    pub delay_ms: u32,
}

/// Splits `text` into glyphs revealed `step_ms` apart.
///
/// # Examples
///
/// ```
/// use mep_core::entrance::effects::typewriter_glyphs;
///
/// let glyphs = typewriter_glyphs("a b", 30);
/// assert_eq!(glyphs[1].text, '\u{a0}');
/// assert_eq!(glyphs[2].delay_ms, 60);
/// ```
#[must_use]
pub fn typewriter_glyphs(text: &str, step_ms: u32) -> Vec<Glyph> {
    let mut delay_ms = 0u32;
    text.chars()
        .map(|c| {
            let glyph = Glyph {
                text: if c == ' ' { NBSP } else { c },
                delay_ms,
            };
            delay_ms = delay_ms.saturating_add(step_ms);
            glyph
        })
        .collect()
}

/// Client logos inside the marquee.
pub const CLIENT_LOGO_SELECTOR: &str = ".slide img";

/// Client name shown in the click log, taken from the logo's alt text.
#[must_use]
pub fn client_name(alt: &str) -> String {
    alt.replacen(" Logo", "", 1)
}

/// Pointer-hover scale on a group of elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverScale {
    pub selector: &'static str,
    pub hover_scale: f64,
    pub rest_scale: f64,
    /// Seconds
    pub duration: f64,
}

pub const TESTIMONIAL_HOVER: HoverScale = HoverScale {
    selector: ".testimonial-card-unique",
    hover_scale: 1.02,
    rest_scale: 1.0,
    duration: 0.2,
};

/// Adds a class to each matching element the first time it scrolls into view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOnScroll {
    pub selector: &'static str,
    pub class: &'static str,
    pub threshold: f64,
}

pub const LEGACY_SERVICE_BOXES: RevealOnScroll = RevealOnScroll {
    selector: ".service-box",
    class: "animate-in",
    threshold: 0.1,
};
