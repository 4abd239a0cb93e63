//! Browser clock for the autoplay timer

use std::rc::Rc;

use gloo_timers::callback::Interval;
use mep_core::carousel::IntervalScheduler;

/// Schedules autoplay ticks with `setInterval`.
#[derive(Clone)]
pub struct GlooScheduler {
    on_tick: Rc<dyn Fn()>,
}

impl GlooScheduler {
    pub fn new(on_tick: impl Fn() + 'static) -> Self {
        Self {
            on_tick: Rc::new(on_tick),
        }
    }
}

impl IntervalScheduler for GlooScheduler {
    type Handle = Interval;

    fn schedule(&mut self, period_ms: u32) -> Interval {
        let on_tick = Rc::clone(&self.on_tick);
        Interval::new(period_ms, move || on_tick())
    }

    fn cancel(&mut self, handle: Interval) {
        // Dropping an `Interval` clears it.
        drop(handle);
    }
}
