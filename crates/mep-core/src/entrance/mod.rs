//! Scroll-triggered entrance animations
//!
//! Animations are data. Each section declares a [`SectionAnimation`]: an
//! optional scroll trigger, timeline steps and an optional observer fallback.
//! The browser shell hands the plan to the animation engine, which owns all
//! timing and easing.

pub mod catalog;
pub mod effects;

use serde::{Deserialize, Serialize};

use crate::page::SectionId;

/// Whether an entrance animation replays when scrolling back up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplayPolicy {
    #[default]
    PlayOnce,
    PlayAndReverse,
}

impl ReplayPolicy {
    /// GSAP `toggleActions` value.
    #[must_use]
    pub const fn toggle_actions(self) -> &'static str {
        match self {
            Self::PlayOnce => "play none none none",
            Self::PlayAndReverse => "play none none reverse",
        }
    }
}

/// Named easing curves understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    Power2Out,
    Power3Out,
    BackOut(f64),
}

impl Ease {
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Power2Out => "power2.out".to_string(),
            Self::Power3Out => "power3.out".to_string(),
            Self::BackOut(overshoot) => format!("back.out({overshoot})"),
        }
    }
}

/// Animated property values. Unset properties are left alone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Props {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub opacity: Option<f64>,
    pub scale: Option<f64>,
}

impl Props {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            x: None,
            y: None,
            opacity: None,
            scale: None,
        }
    }

    #[must_use]
    pub const fn x(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    #[must_use]
    pub const fn y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    #[must_use]
    pub const fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    #[must_use]
    pub const fn scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Faded out, the usual starting point of a reveal.
    #[must_use]
    pub const fn hidden() -> Self {
        Self::new().opacity(0.0)
    }
}

/// Direction of a tween relative to the element's current style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenKind {
    /// Animate from these values to the current ones
    From(Props),
    /// Animate between explicit values
    FromTo(Props, Props),
    /// Animate from the current values to these
    To(Props),
}

/// One step of a timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub targets: String,
    pub kind: TweenKind,
    /// Seconds
    pub duration: f64,
    pub ease: Option<Ease>,
    /// Seconds between consecutive targets
    pub stagger: Option<f64>,
    /// Seconds
    pub delay: Option<f64>,
    /// Timeline position parameter, e.g. `-=0.4`
    pub position: Option<String>,
}

impl Tween {
    fn new(targets: impl Into<String>, kind: TweenKind, duration: f64) -> Self {
        Self {
            targets: targets.into(),
            kind,
            duration,
            ease: None,
            stagger: None,
            delay: None,
            position: None,
        }
    }

    #[must_use]
    pub fn from(targets: impl Into<String>, props: Props, duration: f64) -> Self {
        Self::new(targets, TweenKind::From(props), duration)
    }

    #[must_use]
    pub fn from_to(targets: impl Into<String>, from: Props, to: Props, duration: f64) -> Self {
        Self::new(targets, TweenKind::FromTo(from, to), duration)
    }

    #[must_use]
    pub fn to(targets: impl Into<String>, props: Props, duration: f64) -> Self {
        Self::new(targets, TweenKind::To(props), duration)
    }

    #[must_use]
    pub const fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    #[must_use]
    pub const fn stagger(mut self, seconds: f64) -> Self {
        self.stagger = Some(seconds);
        self
    }

    #[must_use]
    pub const fn delay(mut self, seconds: f64) -> Self {
        self.delay = Some(seconds);
        self
    }

    #[must_use]
    pub fn at(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }
}

/// Scroll-intersection trigger of a timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollTrigger {
    pub trigger: String,
    /// e.g. `top 80%`: element top meets 80% of the viewport height
    pub start: String,
    pub end: Option<String>,
    pub replay: ReplayPolicy,
}

impl ScrollTrigger {
    #[must_use]
    pub fn new(trigger: impl Into<String>, start: impl Into<String>, replay: ReplayPolicy) -> Self {
        Self {
            trigger: trigger.into(),
            start: start.into(),
            end: None,
            replay,
        }
    }

    #[must_use]
    pub fn end(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self
    }
}

/// Class-toggle reveal used when the engine cannot watch the scroll position.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverFallback {
    /// Selector of the observed element
    pub target: String,
    /// Added immediately so the stylesheet can hide the content
    pub ready_class: String,
    /// Added once the element intersects
    pub visible_class: String,
    pub threshold: f64,
    pub root_margin: Option<String>,
}

/// Everything the engine needs to reveal one part of a section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionAnimation {
    pub section: SectionId,
    pub scroll: Option<ScrollTrigger>,
    pub default_ease: Option<Ease>,
    pub steps: Vec<Tween>,
    pub fallback: Option<ObserverFallback>,
}

impl SectionAnimation {
    #[must_use]
    pub const fn new(section: SectionId) -> Self {
        Self {
            section,
            scroll: None,
            default_ease: None,
            steps: Vec::new(),
            fallback: None,
        }
    }

    #[must_use]
    pub fn scroll(mut self, trigger: ScrollTrigger) -> Self {
        self.scroll = Some(trigger);
        self
    }

    #[must_use]
    pub const fn default_ease(mut self, ease: Ease) -> Self {
        self.default_ease = Some(ease);
        self
    }

    #[must_use]
    pub fn step(mut self, tween: Tween) -> Self {
        self.steps.push(tween);
        self
    }

    #[must_use]
    pub fn fallback(mut self, fallback: ObserverFallback) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Element whose presence gates this animation.
    #[must_use]
    pub fn anchor(&self) -> Option<&str> {
        self.scroll
            .as_ref()
            .map(|s| s.trigger.as_str())
            .or_else(|| self.steps.first().map(|t| t.targets.as_str()))
    }

    /// Decides how this animation can run with the engine at hand.
    #[must_use]
    pub fn playback(&self, engine: EngineCapabilities) -> Playback {
        match (engine, &self.scroll, &self.fallback) {
            (EngineCapabilities::Full, _, _)
            | (EngineCapabilities::TweensOnly, None, _) => Playback::Engine,
            (_, Some(_), Some(fallback)) | (EngineCapabilities::Absent, None, Some(fallback)) => {
                Playback::Observer(fallback.clone())
            }
            _ => Playback::Skip,
        }
    }
}

/// What the animation engine on the page can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCapabilities {
    /// No engine loaded
    Absent,
    /// Engine loaded without its scroll-trigger plugin
    TweensOnly,
    Full,
}

impl EngineCapabilities {
    /// Warning to log once at startup, if any.
    #[must_use]
    pub const fn warning(self) -> Option<&'static str> {
        match self {
            Self::Absent => Some("GSAP is not loaded. Animations will not run."),
            Self::TweensOnly => Some("GSAP loaded, but ScrollTrigger is missing."),
            Self::Full => None,
        }
    }

    #[must_use]
    pub const fn has_engine(self) -> bool {
        !matches!(self, Self::Absent)
    }
}

/// How a [`SectionAnimation`] will be played.
#[derive(Debug, Clone, PartialEq)]
pub enum Playback {
    Engine,
    Observer(ObserverFallback),
    Skip,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fallback() -> ObserverFallback {
        ObserverFallback {
            target: "#why-choose-us".to_string(),
            ready_class: "wcu-animate-ready".to_string(),
            visible_class: "wcu-visible".to_string(),
            threshold: 0.2,
            root_margin: None,
        }
    }

    #[test]
    fn test_toggle_actions() {
        assert_eq!(ReplayPolicy::PlayOnce.toggle_actions(), "play none none none");
        assert_eq!(
            ReplayPolicy::PlayAndReverse.toggle_actions(),
            "play none none reverse"
        );
    }

    #[test]
    fn test_ease_names() {
        assert_eq!(Ease::Power3Out.name(), "power3.out");
        assert_eq!(Ease::BackOut(1.7).name(), "back.out(1.7)");
    }

    #[test]
    fn test_playback_with_full_engine() {
        let anim = SectionAnimation::new(SectionId::About)
            .scroll(ScrollTrigger::new("#a", "top 80%", ReplayPolicy::PlayOnce));
        assert_eq!(anim.playback(EngineCapabilities::Full), Playback::Engine);
    }

    #[test]
    fn test_scroll_animation_without_plugin_uses_fallback() {
        let anim = SectionAnimation::new(SectionId::WhyChooseUs)
            .scroll(ScrollTrigger::new("#why-choose-us", "top 78%", ReplayPolicy::PlayOnce))
            .fallback(fallback());
        assert_eq!(
            anim.playback(EngineCapabilities::TweensOnly),
            Playback::Observer(fallback())
        );
        assert_eq!(
            anim.playback(EngineCapabilities::Absent),
            Playback::Observer(fallback())
        );
    }

    #[test]
    fn test_scroll_animation_without_plugin_or_fallback_is_skipped() {
        let anim = SectionAnimation::new(SectionId::About)
            .scroll(ScrollTrigger::new("#a", "top 80%", ReplayPolicy::PlayOnce));
        assert_eq!(anim.playback(EngineCapabilities::TweensOnly), Playback::Skip);
    }

    #[test]
    fn test_load_animation_needs_only_tweens() {
        let anim = SectionAnimation::new(SectionId::Hero)
            .step(Tween::from(".mep-hero__title", Props::hidden(), 1.0));
        assert_eq!(anim.playback(EngineCapabilities::TweensOnly), Playback::Engine);
        assert_eq!(anim.playback(EngineCapabilities::Absent), Playback::Skip);
    }

    #[test]
    fn test_anchor_prefers_trigger() {
        let anim = SectionAnimation::new(SectionId::About)
            .scroll(ScrollTrigger::new("#au-about-section", "top 80%", ReplayPolicy::PlayOnce))
            .step(Tween::to(".au-content-card", Props::new().opacity(1.0), 1.0));
        assert_eq!(anim.anchor(), Some("#au-about-section"));

        let hero = SectionAnimation::new(SectionId::Hero)
            .step(Tween::from(".mep-hero__title", Props::hidden(), 1.0));
        assert_eq!(hero.anchor(), Some(".mep-hero__title"));
    }

    #[test]
    fn test_engine_warnings() {
        assert!(EngineCapabilities::Absent.warning().is_some());
        assert!(EngineCapabilities::TweensOnly.warning().is_some());
        assert!(EngineCapabilities::Full.warning().is_none());
    }
}
