//! DOM renderer for carousel commands
//!
//! Drag frames are coalesced: while a drag moves, only the latest offset is
//! written, once per animation frame. Eased transforms (snap-back, button
//! navigation, autoplay) cancel any pending frame and are written at once.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use mep_core::carousel::render::translate_x;
use mep_core::carousel::{RenderCommand, TrackLayout, TrackRenderer, Transition};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlElement, Window};

use super::listeners::{GestureListeners, GestureSink};
use crate::dom;
use crate::error::{UiError, UiResultExt};

/// Selector for the cards inside the track.
pub const CARD_SELECTOR: &str = ".srv-card";

#[derive(Debug, Default)]
struct PendingFrame {
    id: Option<i32>,
    offset: Option<f64>,
}

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Applies [`RenderCommand`]s to the live services track.
pub struct DomRenderer {
    window: Window,
    track: HtmlElement,
    active_dot: RwSignal<usize>,
    frame: Rc<RefCell<PendingFrame>>,
    on_frame: FrameCallback,
    sink: GestureSink,
    gestures: Option<GestureListeners>,
    reveal: Option<Box<dyn Fn()>>,
}

impl DomRenderer {
    /// `active_dot` drives the pagination view; `reveal` plays the grid
    /// entrance when the track first lays out as a grid.
    pub fn new(
        window: Window,
        track: HtmlElement,
        active_dot: RwSignal<usize>,
        sink: GestureSink,
        reveal: Option<Box<dyn Fn()>>,
    ) -> Self {
        let frame = Rc::new(RefCell::new(PendingFrame::default()));

        let pending = Rc::clone(&frame);
        let target = track.clone();
        let on_frame: FrameCallback = Closure::wrap(Box::new(move |_timestamp: f64| {
            let offset = {
                let mut pending = pending.borrow_mut();
                pending.id = None;
                pending.offset.take()
            };
            if let Some(offset) = offset {
                dom::set_style(&target, "transition", Transition::None.css().as_str());
                dom::set_style(&target, "transform", &translate_x(offset));
            }
        }) as Box<dyn FnMut(f64)>);

        Self {
            window,
            track,
            active_dot,
            frame,
            on_frame,
            sink,
            gestures: None,
            reveal,
        }
    }

    fn cancel_frame(&self) {
        let mut pending = self.frame.borrow_mut();
        pending.offset = None;
        if let Some(id) = pending.id.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                tracing::warn!("failed to cancel animation frame: {}", UiError::js(&e));
            }
        }
    }

    fn queue_offset(&self, offset: f64) {
        let mut pending = self.frame.borrow_mut();
        pending.offset = Some(offset);
        if pending.id.is_some() {
            return;
        }
        match self
            .window
            .request_animation_frame(self.on_frame.as_ref().unchecked_ref())
        {
            Ok(id) => pending.id = Some(id),
            Err(e) => tracing::warn!("failed to request animation frame: {}", UiError::js(&e)),
        }
    }

    fn transform(&self, offset: f64, transition: &Transition) {
        if *transition == Transition::None {
            self.queue_offset(offset);
            return;
        }
        self.cancel_frame();
        dom::set_style(&self.track, "transition", &transition.css());
        dom::set_style(&self.track, "transform", &translate_x(offset));
    }

    fn layout(&self, layout: &TrackLayout) {
        match layout.grid_template_columns() {
            Some(columns) => {
                dom::set_style(&self.track, "display", "grid");
                dom::set_style(&self.track, "grid-template-columns", &columns);
            }
            None => {
                dom::set_style(&self.track, "display", "flex");
                dom::clear_style(&self.track, "grid-template-columns");
            }
        }
        dom::set_style(&self.track, "gap", &format!("{}px", layout.gap_px()));
    }

    fn card_width(&self, width: Option<f64>) {
        for card in dom::query_within(&self.track, CARD_SELECTOR) {
            let Ok(card) = card.dyn_into::<HtmlElement>() else {
                continue;
            };
            match width {
                Some(width) => {
                    dom::set_style(&card, "min-width", &format!("{width}px"));
                    dom::set_style(&card, "margin-right", "0");
                }
                None => {
                    dom::clear_style(&card, "min-width");
                    dom::clear_style(&card, "margin-right");
                }
            }
        }
    }

    fn gestures(&mut self, attach: bool) {
        if !attach {
            // Dropping the listeners unbinds them.
            self.gestures = None;
            return;
        }
        if self.gestures.is_none() {
            self.gestures = GestureListeners::attach(&self.track, &self.sink)
                .into_option_logged("failed to attach drag listeners");
        }
    }
}

impl TrackRenderer for DomRenderer {
    fn apply(&mut self, command: &RenderCommand) {
        match command {
            RenderCommand::Layout(layout) => self.layout(layout),
            RenderCommand::CardWidth(width) => self.card_width(*width),
            RenderCommand::Transform { offset, transition } => self.transform(*offset, transition),
            RenderCommand::ClearTransform => {
                self.cancel_frame();
                dom::set_style(&self.track, "transform", "none");
                dom::set_style(&self.track, "transition", "none");
            }
            RenderCommand::Cursor(cursor) => dom::set_style(&self.track, "cursor", cursor.css()),
            RenderCommand::ActiveDot(index) => self.active_dot.set(*index),
            RenderCommand::Gestures(attach) => self.gestures(*attach),
            RenderCommand::CancelFrame => self.cancel_frame(),
            RenderCommand::RevealGrid => {
                if let Some(reveal) = &self.reveal {
                    reveal();
                }
            }
        }
    }
}

impl Drop for DomRenderer {
    fn drop(&mut self) {
        self.cancel_frame();
    }
}
