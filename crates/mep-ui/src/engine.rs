//! GSAP bridge
//!
//! `mep_core::entrance` describes animations as data; this module turns each
//! [`SectionAnimation`] into a GSAP timeline. GSAP and its ScrollTrigger plugin
//! are page globals loaded from a CDN, so their presence is checked at startup
//! and every call goes through a `catch` binding.

use js_sys::Reflect;
use mep_core::entrance::{
    EngineCapabilities, Props, ScrollTrigger, SectionAnimation, Tween, TweenKind,
};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::error::{UiError, UiResult};

#[wasm_bindgen]
extern "C" {
    /// A GSAP timeline instance.
    pub type Timeline;

    #[wasm_bindgen(js_namespace = gsap, js_name = timeline, catch)]
    fn gsap_timeline(vars: &JsValue) -> Result<Timeline, JsValue>;

    #[wasm_bindgen(js_namespace = gsap, js_name = to, catch)]
    fn gsap_to(targets: &JsValue, vars: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = gsap, js_name = registerPlugin, catch)]
    fn gsap_register_plugin(plugin: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = from)]
    fn add_from(
        this: &Timeline,
        targets: &str,
        vars: &JsValue,
        position: &JsValue,
    ) -> Result<Timeline, JsValue>;

    #[wasm_bindgen(method, catch, js_name = fromTo)]
    fn add_from_to(
        this: &Timeline,
        targets: &str,
        from: &JsValue,
        to: &JsValue,
        position: &JsValue,
    ) -> Result<Timeline, JsValue>;

    #[wasm_bindgen(method, catch, js_name = to)]
    fn add_to(
        this: &Timeline,
        targets: &str,
        vars: &JsValue,
        position: &JsValue,
    ) -> Result<Timeline, JsValue>;
}

/// Property and timing vars of one tween.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TweenVars {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ease: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stagger: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
}

impl TweenVars {
    #[must_use]
    pub const fn props(props: &Props) -> Self {
        Self {
            x: props.x,
            y: props.y,
            opacity: props.opacity,
            scale: props.scale,
            duration: None,
            ease: None,
            stagger: None,
            delay: None,
        }
    }

    /// Props plus the tween's duration, ease, stagger and delay.
    #[must_use]
    pub fn timed(props: &Props, tween: &Tween) -> Self {
        Self {
            duration: Some(tween.duration),
            ease: tween.ease.map(|e| e.name()),
            stagger: tween.stagger,
            delay: tween.delay,
            ..Self::props(props)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollTriggerVars {
    pub trigger: String,
    pub start: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    pub toggle_actions: &'static str,
}

impl From<&ScrollTrigger> for ScrollTriggerVars {
    fn from(trigger: &ScrollTrigger) -> Self {
        Self {
            trigger: trigger.trigger.clone(),
            start: trigger.start.clone(),
            end: trigger.end.clone(),
            toggle_actions: trigger.replay.toggle_actions(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineDefaults {
    pub ease: String,
}

/// Vars passed to `gsap.timeline`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineVars {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<TimelineDefaults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_trigger: Option<ScrollTriggerVars>,
}

impl TimelineVars {
    /// Timeline vars for `animation`. The scroll trigger is left out when the
    /// plugin is not available.
    #[must_use]
    pub fn for_animation(animation: &SectionAnimation, capabilities: EngineCapabilities) -> Self {
        let scroll_trigger = match capabilities {
            EngineCapabilities::Full => animation.scroll.as_ref().map(ScrollTriggerVars::from),
            EngineCapabilities::TweensOnly | EngineCapabilities::Absent => None,
        };

        Self {
            defaults: animation.default_ease.map(|ease| TimelineDefaults { ease: ease.name() }),
            scroll_trigger,
        }
    }
}

/// Hover scale tween vars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleVars {
    pub scale: f64,
    pub duration: f64,
}

fn to_js<T: Serialize>(value: &T) -> UiResult<JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(|e| UiError::Js(e.to_string()))
}

fn position(tween: &Tween) -> JsValue {
    tween
        .position
        .as_deref()
        .map_or(JsValue::UNDEFINED, JsValue::from_str)
}

fn global(name: &str) -> Option<JsValue> {
    Reflect::get(&js_sys::global(), &JsValue::from_str(name))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

/// Handle to the page's GSAP install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GsapEngine {
    capabilities: EngineCapabilities,
}

impl GsapEngine {
    /// Looks for GSAP and registers ScrollTrigger when both are present.
    #[must_use]
    pub fn detect() -> Self {
        let capabilities = match (global("gsap"), global("ScrollTrigger")) {
            (None, _) => EngineCapabilities::Absent,
            (Some(_), None) => EngineCapabilities::TweensOnly,
            (Some(_), Some(plugin)) => match gsap_register_plugin(&plugin) {
                Ok(()) => EngineCapabilities::Full,
                Err(e) => {
                    tracing::warn!("failed to register ScrollTrigger: {}", UiError::js(&e));
                    EngineCapabilities::TweensOnly
                }
            },
        };

        if let Some(warning) = capabilities.warning() {
            tracing::warn!("{warning}");
        }
        Self { capabilities }
    }

    #[must_use]
    pub const fn capabilities(&self) -> EngineCapabilities {
        self.capabilities
    }

    /// Builds and starts the timeline for `animation`.
    ///
    /// # Errors
    ///
    /// Returns `EngineUnavailable` without GSAP, or `UiError::Js` if GSAP throws.
    pub fn play(&self, animation: &SectionAnimation) -> UiResult<()> {
        self.ensure_loaded()?;

        let vars = TimelineVars::for_animation(animation, self.capabilities);
        let timeline = gsap_timeline(&to_js(&vars)?)?;

        for tween in &animation.steps {
            let at = position(tween);
            match &tween.kind {
                TweenKind::From(props) => {
                    timeline.add_from(&tween.targets, &to_js(&TweenVars::timed(props, tween))?, &at)?;
                }
                TweenKind::To(props) => {
                    timeline.add_to(&tween.targets, &to_js(&TweenVars::timed(props, tween))?, &at)?;
                }
                TweenKind::FromTo(from, to) => {
                    timeline.add_from_to(
                        &tween.targets,
                        &to_js(&TweenVars::props(from))?,
                        &to_js(&TweenVars::timed(to, tween))?,
                        &at,
                    )?;
                }
            }
        }

        tracing::debug!(section = %animation.section, steps = animation.steps.len(), "timeline started");
        Ok(())
    }

    /// Tweens `target` to `scale` over `duration` seconds.
    ///
    /// # Errors
    ///
    /// Returns `EngineUnavailable` without GSAP, or `UiError::Js` if GSAP throws.
    pub fn scale(&self, target: &Element, scale: f64, duration: f64) -> UiResult<()> {
        self.ensure_loaded()?;
        gsap_to(target.as_ref(), &to_js(&ScaleVars { scale, duration })?)?;
        Ok(())
    }

    fn ensure_loaded(&self) -> UiResult<()> {
        if self.capabilities.has_engine() {
            Ok(())
        } else {
            Err(mep_core::Error::engine_unavailable("GSAP is not loaded").into())
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use mep_core::entrance::catalog;
    use mep_core::entrance::{Ease, ReplayPolicy};

    fn json<T: Serialize>(value: &T) -> serde_json::Value {
        serde_json::to_value(value).expect("serializable")
    }

    #[test]
    fn test_tween_vars_skip_unset_fields() {
        let tween = Tween::from(".x", Props::hidden().y(50.0), 1.0).delay(0.2);
        let vars = json(&TweenVars::timed(&Props::hidden().y(50.0), &tween));
        assert_eq!(
            vars,
            serde_json::json!({"y": 50.0, "opacity": 0.0, "duration": 1.0, "delay": 0.2})
        );
    }

    #[test]
    fn test_tween_vars_carry_ease_name() {
        let tween = Tween::from(".x", Props::hidden(), 0.6).ease(Ease::BackOut(1.7));
        let vars = TweenVars::timed(&Props::hidden(), &tween);
        assert_eq!(vars.ease.as_deref(), Some("back.out(1.7)"));
    }

    #[test]
    fn test_timeline_vars_include_trigger_with_plugin() {
        let anim = catalog::about(ReplayPolicy::PlayAndReverse);
        let vars = json(&TimelineVars::for_animation(&anim, EngineCapabilities::Full));
        assert_eq!(
            vars["scrollTrigger"],
            serde_json::json!({
                "trigger": "#au-about-section",
                "start": "top 80%",
                "end": "bottom 20%",
                "toggleActions": "play none none reverse"
            })
        );
    }

    #[test]
    fn test_timeline_vars_drop_trigger_without_plugin() {
        let anim = catalog::about(ReplayPolicy::PlayOnce);
        let vars = TimelineVars::for_animation(&anim, EngineCapabilities::TweensOnly);
        assert!(vars.scroll_trigger.is_none());
    }

    #[test]
    fn test_hero_timeline_defaults() {
        let vars = json(&TimelineVars::for_animation(&catalog::hero(), EngineCapabilities::Full));
        assert_eq!(vars, serde_json::json!({"defaults": {"ease": "power3.out"}}));
    }
}
