//! Carousel controller
//!
//! Owns the carousel state and the autoplay timer. Input handlers feed it
//! [`CarouselEvent`]s; it answers with the [`RenderCommand`]s that bring the
//! track in line with the new state.
//!
//! Buttons and autoplay wrap around the ends of the card list while drags
//! clamp. Swiping past the last card is a physical gesture against an edge,
//! the buttons are a loop.

use super::autoplay::{AutoplayTimer, IntervalScheduler};
use super::gesture::{GestureState, PointerSource, drag_offset, resolve_release};
use super::render::{Cursor, RenderCommand, TrackLayout, Transition};
use super::state::{CarouselState, Direction, wrap_index};
use crate::config::CarouselConfig;
use crate::result::Result;
use crate::viewport::{Breakpoint, LayoutMode};

/// Input to the carousel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselEvent {
    /// Initial load or resize, measured after reflow
    Viewport { viewport_width: f64, wrapper_width: f64 },
    DragStart { x: f64, source: PointerSource },
    DragMove { x: f64 },
    DragEnd,
    /// Prev/next buttons
    Step(Direction),
    DotSelected(usize),
    AutoplayTick,
}

/// The carousel state machine.
pub struct CarouselController<S: IntervalScheduler> {
    state: CarouselState,
    config: CarouselConfig,
    breakpoint: Breakpoint,
    autoplay: AutoplayTimer<S>,
}

impl<S: IntervalScheduler> CarouselController<S> {
    /// Creates a controller for `card_count` cards. Nothing is rendered until
    /// the first [`CarouselEvent::Viewport`].
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the carousel configuration is invalid.
    pub fn new(card_count: usize, config: CarouselConfig, scheduler: S) -> Result<Self> {
        config.validate()?;
        let breakpoint = config.breakpoint()?;

        Ok(Self {
            state: CarouselState::new(card_count),
            config,
            breakpoint,
            autoplay: AutoplayTimer::new(scheduler, config.autoplay_interval_ms),
        })
    }

    #[must_use]
    pub const fn state(&self) -> &CarouselState {
        &self.state
    }

    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.state.current_index
    }

    #[must_use]
    pub const fn mode(&self) -> Option<LayoutMode> {
        self.state.mode
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.state.gesture.is_dragging()
    }

    #[must_use]
    pub const fn is_autoplaying(&self) -> bool {
        self.state.autoplaying
    }

    /// Routes one event to the matching operation.
    pub fn dispatch(&mut self, event: CarouselEvent) -> Vec<RenderCommand> {
        match event {
            CarouselEvent::Viewport {
                viewport_width,
                wrapper_width,
            } => self.set_layout_mode(viewport_width, wrapper_width),
            CarouselEvent::DragStart { x, source } => self.drag_start(x, source),
            CarouselEvent::DragMove { x } => self.drag_move(x),
            CarouselEvent::DragEnd => self.drag_end(),
            CarouselEvent::Step(direction) => self.step(direction),
            CarouselEvent::DotSelected(index) => self.select_dot(index),
            CarouselEvent::AutoplayTick => self.autoplay_tick(),
        }
    }

    /// Layout switcher. Safe to call on every resize: repeating the current
    /// mode only re-measures the slides.
    pub fn set_layout_mode(&mut self, viewport_width: f64, wrapper_width: f64) -> Vec<RenderCommand> {
        let mode = self.breakpoint.classify(viewport_width);
        self.state.wrapper_width = if wrapper_width.is_finite() {
            wrapper_width.max(0.0)
        } else {
            0.0
        };

        if self.state.mode == Some(mode) {
            return self.remeasure();
        }

        tracing::debug!(?mode, viewport_width, "carousel layout switch");
        self.state.mode = Some(mode);
        self.state.gesture = GestureState::Idle;

        match mode {
            LayoutMode::Grid => self.enter_grid(),
            LayoutMode::Slider => self.enter_slider(),
        }
    }

    /// Steps the index, wrapping at both ends, and renders it.
    ///
    /// No-op outside slider mode, without cards, or while the wrapper has no
    /// measured width.
    pub fn move_to(&mut self, direction: Direction) -> Vec<RenderCommand> {
        if !self.can_navigate() {
            return Vec::new();
        }
        self.state.current_index =
            wrap_index(self.state.current_index, direction, self.state.card_count);
        self.commit(Transition::Ease {
            duration_ms: self.config.slide_duration_ms,
        })
    }

    /// Jumps to the card of a pagination dot.
    pub fn select_dot(&mut self, index: usize) -> Vec<RenderCommand> {
        if index >= self.state.card_count || !self.can_navigate() {
            return Vec::new();
        }
        self.state.current_index = index;
        let commands = self.move_to(Direction::Stay);
        self.restart_autoplay_if_running();
        commands
    }

    /// Prev/next buttons: navigate and restart the autoplay countdown.
    pub fn step(&mut self, direction: Direction) -> Vec<RenderCommand> {
        let commands = self.move_to(direction);
        if !commands.is_empty() {
            self.restart_autoplay_if_running();
        }
        commands
    }

    /// Pointer down on the track.
    pub fn drag_start(&mut self, x: f64, source: PointerSource) -> Vec<RenderCommand> {
        if !self.state.is_slider() || self.state.card_count == 0 || self.is_dragging() {
            return Vec::new();
        }

        self.autoplay.stop();
        self.state.autoplaying = false;
        self.state.gesture = GestureState::Dragging { start_x: x, source };
        self.state.current_offset = self.state.committed_offset;

        let mut commands = vec![RenderCommand::CancelFrame];
        if source == PointerSource::Mouse {
            commands.push(RenderCommand::Cursor(Cursor::Grabbing));
        }
        commands
    }

    /// Pointer moved; the track follows without easing.
    pub fn drag_move(&mut self, x: f64) -> Vec<RenderCommand> {
        let GestureState::Dragging { start_x, .. } = self.state.gesture else {
            return Vec::new();
        };

        self.state.current_offset = drag_offset(self.state.committed_offset, start_x, x);
        vec![RenderCommand::Transform {
            offset: self.state.current_offset,
            transition: Transition::None,
        }]
    }

    /// Pointer released: step or snap back, then resume autoplay.
    pub fn drag_end(&mut self) -> Vec<RenderCommand> {
        if !self.is_dragging() {
            return Vec::new();
        }
        self.state.gesture = GestureState::Idle;

        let moved_by = self.state.current_offset - self.state.committed_offset;
        self.state.current_index = resolve_release(
            self.state.current_index,
            self.state.card_count,
            moved_by,
            self.state.wrapper_width,
            self.config.swipe_threshold_ratio,
        );

        let mut commands = vec![RenderCommand::Cursor(Cursor::Grab)];
        commands.extend(self.commit(Transition::Snap {
            duration_ms: self.config.slide_duration_ms,
        }));

        self.autoplay.restart();
        self.state.autoplaying = true;
        commands
    }

    /// One autoplay period elapsed.
    pub fn autoplay_tick(&mut self) -> Vec<RenderCommand> {
        if self.is_dragging() {
            return Vec::new();
        }
        self.move_to(Direction::Next)
    }

    fn can_navigate(&self) -> bool {
        self.state.is_slider() && self.state.card_count > 0 && self.state.wrapper_width > 0.0
    }

    fn restart_autoplay_if_running(&mut self) {
        self.autoplay.restart_if_running();
        self.state.autoplaying = self.autoplay.is_running();
    }

    fn commit(&mut self, transition: Transition) -> Vec<RenderCommand> {
        let offset = self.state.settle();
        vec![
            RenderCommand::Transform { offset, transition },
            RenderCommand::ActiveDot(self.state.current_index),
        ]
    }

    fn enter_grid(&mut self) -> Vec<RenderCommand> {
        self.autoplay.stop();
        self.state.autoplaying = false;
        self.state.current_index = 0;
        self.state.committed_offset = 0.0;
        self.state.current_offset = 0.0;

        let mut commands = vec![
            RenderCommand::Layout(TrackLayout::Grid {
                min_column_px: self.config.grid_min_column_px,
                gap_px: self.config.grid_gap_px,
            }),
            RenderCommand::ClearTransform,
            RenderCommand::Cursor(Cursor::Default),
            RenderCommand::CardWidth(None),
            RenderCommand::Gestures(false),
            RenderCommand::ActiveDot(0),
        ];

        if !self.state.grid_revealed && self.state.card_count > 0 {
            self.state.grid_revealed = true;
            commands.push(RenderCommand::RevealGrid);
        }
        commands
    }

    fn enter_slider(&mut self) -> Vec<RenderCommand> {
        self.state.current_index = 0;
        let mut commands = vec![
            RenderCommand::Layout(TrackLayout::Slider),
            RenderCommand::Cursor(Cursor::Grab),
        ];

        if self.state.card_count == 0 {
            return commands;
        }

        commands.push(RenderCommand::CardWidth(Some(self.state.wrapper_width)));
        commands.extend(self.commit(Transition::Ease {
            duration_ms: self.config.slide_duration_ms,
        }));
        commands.push(RenderCommand::Gestures(true));

        self.autoplay.restart();
        self.state.autoplaying = true;
        commands
    }

    fn remeasure(&mut self) -> Vec<RenderCommand> {
        if !self.state.is_slider() || self.state.card_count == 0 {
            return Vec::new();
        }
        let offset = self.state.settle();
        vec![
            RenderCommand::CardWidth(Some(self.state.wrapper_width)),
            RenderCommand::Transform {
                offset,
                transition: Transition::None,
            },
        ]
    }
}
