//! Drag listeners on the services track
//!
//! Attached only in slider mode. Touch start and move are registered
//! non-passive so a horizontal drag can cancel page scrolling.

use std::rc::Rc;

use mep_core::carousel::{CarouselEvent, PointerSource};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, HtmlElement, MouseEvent, TouchEvent};

use crate::error::{UiError, UiResult};

/// Where drag listeners send their events, plus a query for the drag state.
#[derive(Clone)]
pub struct GestureSink {
    send: Rc<dyn Fn(CarouselEvent)>,
    dragging: Rc<dyn Fn() -> bool>,
}

impl GestureSink {
    pub fn new(send: impl Fn(CarouselEvent) + 'static, dragging: impl Fn() -> bool + 'static) -> Self {
        Self {
            send: Rc::new(send),
            dragging: Rc::new(dragging),
        }
    }

    fn send(&self, event: CarouselEvent) {
        (self.send)(event);
    }

    fn is_dragging(&self) -> bool {
        (self.dragging)()
    }
}

fn touch_x(event: &Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some(f64::from(touch.client_x()))
}

fn mouse_x(event: &Event) -> Option<f64> {
    event
        .dyn_ref::<MouseEvent>()
        .map(|mouse| f64::from(mouse.client_x()))
}

type Handler = Closure<dyn FnMut(Event)>;

/// Drag listeners bound to one track. Dropping the value removes them.
pub struct GestureListeners {
    target: HtmlElement,
    bound: Vec<(&'static str, Handler)>,
}

impl GestureListeners {
    /// Binds touch and mouse drag handlers to `track`.
    ///
    /// # Errors
    ///
    /// Returns `UiError::Js` if a listener is rejected. Handlers bound before
    /// the failure are removed again.
    pub fn attach(track: &HtmlElement, sink: &GestureSink) -> UiResult<Self> {
        let mut listeners = Self {
            target: track.clone(),
            bound: Vec::new(),
        };

        let start = sink.clone();
        listeners.bind("touchstart", true, move |event| {
            if let Some(x) = touch_x(&event) {
                start.send(CarouselEvent::DragStart {
                    x,
                    source: PointerSource::Touch,
                });
            }
        })?;

        let moved = sink.clone();
        listeners.bind("touchmove", true, move |event| {
            if !moved.is_dragging() {
                return;
            }
            event.prevent_default();
            if let Some(x) = touch_x(&event) {
                moved.send(CarouselEvent::DragMove { x });
            }
        })?;

        let end = sink.clone();
        listeners.bind("touchend", false, move |_| end.send(CarouselEvent::DragEnd))?;

        let start = sink.clone();
        listeners.bind("mousedown", false, move |event| {
            if let Some(x) = mouse_x(&event) {
                start.send(CarouselEvent::DragStart {
                    x,
                    source: PointerSource::Mouse,
                });
            }
        })?;

        let moved = sink.clone();
        listeners.bind("mousemove", false, move |event| {
            if !moved.is_dragging() {
                return;
            }
            event.prevent_default();
            if let Some(x) = mouse_x(&event) {
                moved.send(CarouselEvent::DragMove { x });
            }
        })?;

        for name in ["mouseup", "mouseleave"] {
            let end = sink.clone();
            listeners.bind(name, false, move |_| end.send(CarouselEvent::DragEnd))?;
        }

        tracing::debug!("drag listeners attached");
        Ok(listeners)
    }

    fn bind<F>(&mut self, event: &'static str, non_passive: bool, handler: F) -> UiResult<()>
    where
        F: FnMut(Event) + 'static,
    {
        let closure: Handler = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let callback = closure.as_ref().unchecked_ref();

        if non_passive {
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            self.target
                .add_event_listener_with_callback_and_add_event_listener_options(
                    event, callback, &options,
                )
                .map_err(|e| UiError::js(&e))?;
        } else {
            self.target
                .add_event_listener_with_callback(event, callback)
                .map_err(|e| UiError::js(&e))?;
        }

        self.bound.push((event, closure));
        Ok(())
    }
}

impl Drop for GestureListeners {
    fn drop(&mut self) {
        for (event, closure) in self.bound.drain(..) {
            if let Err(e) = self
                .target
                .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            {
                tracing::warn!("failed to remove {event} listener: {}", UiError::js(&e));
            }
        }
        tracing::debug!("drag listeners detached");
    }
}
