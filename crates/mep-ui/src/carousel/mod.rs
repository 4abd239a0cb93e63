//! Services carousel shell
//!
//! Binds a [`CarouselController`] to the live page. Buttons, dots, drags,
//! resizes and autoplay ticks all become [`CarouselEvent`]s sent through
//! [`CarouselShell::send`], and the resulting commands go to a
//! [`DomRenderer`].
//!
//! Handlers hold a `Weak` back-reference, except the window resize listener,
//! which keeps the shell alive for the rest of the page's life.

pub mod listeners;
pub mod renderer;
pub mod scheduler;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use leptos::prelude::*;
use mep_core::carousel::{CarouselController, CarouselEvent, Direction, TrackRenderer};
use mep_core::config::CarouselConfig;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, HtmlElement, Window};

pub use listeners::{GestureListeners, GestureSink};
pub use renderer::DomRenderer;
pub use scheduler::GlooScheduler;

use crate::dom;
use crate::error::{UiError, UiResult};

pub const WRAPPER_SELECTOR: &str = ".srv-carousel-wrapper";
pub const DOTS_SELECTOR: &str = ".srv-carousel-dots";
pub const NEXT_SELECTOR: &str = ".srv-carousel-btn.next";
pub const PREV_SELECTOR: &str = ".srv-carousel-btn.prev";
pub const DOT_CLASS: &str = "srv-dot";

type ShellSlot = Rc<RefCell<Weak<CarouselShell>>>;

fn upgrade(slot: &ShellSlot) -> Option<Rc<CarouselShell>> {
    slot.borrow().upgrade()
}

/// A running carousel.
pub struct CarouselShell {
    window: Window,
    wrapper: Option<HtmlElement>,
    controller: RefCell<CarouselController<GlooScheduler>>,
    renderer: RefCell<DomRenderer>,
    resize_frame: Cell<Option<i32>>,
}

impl CarouselShell {
    /// Wires up `track` with `card_count` rendered cards and schedules the
    /// first layout pass.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the window is
    /// unavailable or a control listener cannot be bound.
    pub fn start(
        document: &Document,
        track: HtmlElement,
        card_count: usize,
        config: CarouselConfig,
        active_dot: RwSignal<usize>,
        reveal: Option<Box<dyn Fn()>>,
    ) -> UiResult<Rc<Self>> {
        let window = dom::window()?;
        let slot: ShellSlot = Rc::new(RefCell::new(Weak::new()));

        let tick = Rc::clone(&slot);
        let scheduler = GlooScheduler::new(move || {
            if let Some(shell) = upgrade(&tick) {
                shell.send(CarouselEvent::AutoplayTick);
            }
        });
        let controller = CarouselController::new(card_count, config, scheduler)?;

        let to_shell = Rc::clone(&slot);
        let drag_state = Rc::clone(&slot);
        let sink = GestureSink::new(
            move |event| {
                if let Some(shell) = upgrade(&to_shell) {
                    shell.send(event);
                }
            },
            move || upgrade(&drag_state).is_some_and(|shell| shell.is_dragging()),
        );

        let renderer = DomRenderer::new(window.clone(), track, active_dot, sink, reveal);
        let shell = Rc::new(Self {
            window,
            wrapper: dom::query_html(document, WRAPPER_SELECTOR),
            controller: RefCell::new(controller),
            renderer: RefCell::new(renderer),
            resize_frame: Cell::new(None),
        });
        *slot.borrow_mut() = Rc::downgrade(&shell);

        shell.bind_controls(document)?;
        shell.bind_resize()?;
        shell.schedule_measure();

        tracing::info!(cards = card_count, "services carousel started");
        Ok(shell)
    }

    /// Dispatches one event and renders the outcome. Events arriving while
    /// another is being handled are dropped.
    pub fn send(&self, event: CarouselEvent) {
        let commands = match self.controller.try_borrow_mut() {
            Ok(mut controller) => controller.dispatch(event),
            Err(_) => {
                tracing::warn!(?event, "carousel busy, event dropped");
                return;
            }
        };

        match self.renderer.try_borrow_mut() {
            Ok(mut renderer) => renderer.apply_all(&commands),
            Err(_) => tracing::warn!(count = commands.len(), "renderer busy, commands dropped"),
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.controller
            .try_borrow()
            .is_ok_and(|controller| controller.is_dragging())
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.controller
            .try_borrow()
            .ok()
            .map(|controller| controller.current_index())
    }

    fn measure(&self) -> Option<CarouselEvent> {
        let viewport_width = match self.window.inner_width() {
            Ok(width) => width.as_f64()?,
            Err(e) => {
                tracing::warn!("failed to read viewport width: {}", UiError::js(&e));
                return None;
            }
        };
        let wrapper_width = self
            .wrapper
            .as_ref()
            .map_or(0.0, |wrapper| f64::from(wrapper.offset_width()));

        Some(CarouselEvent::Viewport {
            viewport_width,
            wrapper_width,
        })
    }

    /// Measures on the next animation frame, after the browser has reflowed.
    /// Repeated calls before that frame share it.
    fn schedule_measure(self: &Rc<Self>) {
        if self.resize_frame.get().is_some() {
            return;
        }

        let weak = Rc::downgrade(self);
        let callback = Closure::once_into_js(move || {
            let Some(shell) = weak.upgrade() else {
                return;
            };
            shell.resize_frame.set(None);
            if let Some(event) = shell.measure() {
                shell.send(event);
            }
        });

        match self.window.request_animation_frame(callback.unchecked_ref()) {
            Ok(id) => self.resize_frame.set(Some(id)),
            Err(e) => tracing::warn!("failed to request animation frame: {}", UiError::js(&e)),
        }
    }

    fn bind_resize(self: &Rc<Self>) -> UiResult<()> {
        let shell = Rc::clone(self);
        dom::listen(&self.window, "resize", move |_| shell.schedule_measure())
    }

    fn bind_controls(self: &Rc<Self>, document: &Document) -> UiResult<()> {
        for (selector, direction) in [
            (NEXT_SELECTOR, Direction::Next),
            (PREV_SELECTOR, Direction::Prev),
        ] {
            let Some(button) = dom::query(document, selector) else {
                tracing::debug!(selector, "carousel button missing");
                continue;
            };
            let weak = Rc::downgrade(self);
            dom::listen(&button, "click", move |_| {
                if let Some(shell) = weak.upgrade() {
                    shell.send(CarouselEvent::Step(direction));
                }
            })?;
        }

        if let Some(dots) = dom::query(document, DOTS_SELECTOR) {
            let weak = Rc::downgrade(self);
            dom::listen(&dots, "click", move |event| {
                let index = event
                    .target()
                    .and_then(|target| target.dyn_into::<Element>().ok())
                    .and_then(|el| dot_index(&el));
                if let (Some(index), Some(shell)) = (index, weak.upgrade()) {
                    shell.send(CarouselEvent::DotSelected(index));
                }
            })?;
        }

        Ok(())
    }
}

/// The `data-index` of a pagination dot, `None` for anything else.
fn dot_index(element: &Element) -> Option<usize> {
    if !element.class_list().contains(DOT_CLASS) {
        return None;
    }
    element.get_attribute("data-index")?.parse().ok()
}
