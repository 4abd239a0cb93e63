//! Autoplay timer
//!
//! Advances the carousel on a fixed period while nobody is interacting with
//! it. User interaction restarts the countdown instead of pausing it. The
//! timer owns the only interval handle and always cancels it before setting a
//! new one, so two intervals can never run at once.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Something that can run a periodic tick.
///
/// The browser shell backs this with `gloo_timers::callback::Interval`; tests
/// use [`VirtualScheduler`].
pub trait IntervalScheduler {
    type Handle;

    /// Starts a new interval firing every `period_ms`.
    fn schedule(&mut self, period_ms: u32) -> Self::Handle;

    /// Stops an interval for good.
    fn cancel(&mut self, handle: Self::Handle);
}

/// The carousel's autoplay interval.
pub struct AutoplayTimer<S: IntervalScheduler> {
    scheduler: S,
    period_ms: u32,
    handle: Option<S::Handle>,
}

impl<S: IntervalScheduler> AutoplayTimer<S> {
    pub fn new(scheduler: S, period_ms: u32) -> Self {
        Self {
            scheduler,
            period_ms,
            handle: None,
        }
    }

    /// Starts, or restarts, the countdown from zero.
    pub fn restart(&mut self) {
        self.stop();
        self.handle = Some(self.scheduler.schedule(self.period_ms));
    }

    /// Restarts only if the timer is currently running.
    pub fn restart_if_running(&mut self) {
        if self.is_running() {
            self.restart();
        }
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.scheduler.cancel(handle);
        }
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    #[must_use]
    pub const fn period_ms(&self) -> u32 {
        self.period_ms
    }
}

impl<S: IntervalScheduler> Drop for AutoplayTimer<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Handle of a [`VirtualScheduler`] interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct VirtualHandle(u64);

#[derive(Debug, Default)]
struct VirtualClock {
    now_ms: u64,
    next_id: u64,
    live: BTreeMap<u64, (u64, u64)>,
}

/// A deterministic interval scheduler driven by hand.
///
/// Clones share one clock, so a test can keep a clone while the carousel owns
/// the other.
///
/// # Examples
///
/// ```
/// use mep_core::carousel::autoplay::{AutoplayTimer, VirtualScheduler};
///
/// let clock = VirtualScheduler::new();
/// let mut timer = AutoplayTimer::new(clock.clone(), 3000);
/// timer.restart();
///
/// assert_eq!(clock.advance(2999), 0);
/// assert_eq!(clock.advance(1), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct VirtualScheduler {
    clock: Rc<RefCell<VirtualClock>>,
}

impl VirtualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward and returns how many ticks fell due.
    #[must_use]
    pub fn advance(&self, ms: u64) -> usize {
        let mut clock = self.clock.borrow_mut();
        let target = clock.now_ms.saturating_add(ms);
        let mut fired = 0usize;

        for (period, next_due) in clock.live.values_mut() {
            while *next_due <= target {
                fired = fired.saturating_add(1);
                *next_due = next_due.saturating_add(*period);
            }
        }

        clock.now_ms = target;
        fired
    }

    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.clock.borrow().now_ms
    }

    /// Number of intervals that have been scheduled and not cancelled.
    #[must_use]
    pub fn live_intervals(&self) -> usize {
        self.clock.borrow().live.len()
    }
}

impl IntervalScheduler for VirtualScheduler {
    type Handle = VirtualHandle;

    fn schedule(&mut self, period_ms: u32) -> Self::Handle {
        let mut clock = self.clock.borrow_mut();
        let id = clock.next_id;
        clock.next_id = id.saturating_add(1);

        // A zero period would never let `advance` return.
        let period = u64::from(period_ms.max(1));
        let due = clock.now_ms.saturating_add(period);
        clock.live.insert(id, (period, due));
        VirtualHandle(id)
    }

    fn cancel(&mut self, handle: Self::Handle) {
        self.clock.borrow_mut().live.remove(&handle.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restart_cancels_previous_interval() {
        let clock = VirtualScheduler::new();
        let mut timer = AutoplayTimer::new(clock.clone(), 3000);

        timer.restart();
        timer.restart();
        timer.restart();

        assert_eq!(clock.live_intervals(), 1);
    }

    #[test]
    fn test_restart_resets_countdown() {
        let clock = VirtualScheduler::new();
        let mut timer = AutoplayTimer::new(clock.clone(), 3000);
        timer.restart();

        assert_eq!(clock.advance(2500), 0);
        timer.restart();
        // 3000ms after the first start, but only 500ms into the new countdown
        assert_eq!(clock.advance(500), 0);
        assert_eq!(clock.advance(2499), 0);
        assert_eq!(clock.advance(1), 1);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let clock = VirtualScheduler::new();
        let mut timer = AutoplayTimer::new(clock.clone(), 3000);
        timer.restart();
        timer.stop();
        timer.stop();

        assert!(!timer.is_running());
        assert_eq!(clock.live_intervals(), 0);
        assert_eq!(clock.advance(10_000), 0);
    }

    #[test]
    fn test_restart_if_running_leaves_stopped_timer_alone() {
        let clock = VirtualScheduler::new();
        let mut timer = AutoplayTimer::new(clock.clone(), 3000);
        timer.restart_if_running();
        assert!(!timer.is_running());
        assert_eq!(clock.live_intervals(), 0);
    }

    #[test]
    fn test_drop_cancels() {
        let clock = VirtualScheduler::new();
        {
            let mut timer = AutoplayTimer::new(clock.clone(), 3000);
            timer.restart();
            assert_eq!(clock.live_intervals(), 1);
        }
        assert_eq!(clock.live_intervals(), 0);
    }

    #[test]
    fn test_ticks_repeat() {
        let clock = VirtualScheduler::new();
        let mut timer = AutoplayTimer::new(clock.clone(), 3000);
        timer.restart();
        assert_eq!(clock.advance(9000), 3);
        assert_eq!(clock.now_ms(), 9000);
    }
}
