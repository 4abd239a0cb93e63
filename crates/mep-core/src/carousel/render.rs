//! Render instructions
//!
//! The controller never touches the DOM. It returns a list of instructions and
//! a renderer applies them in order. `TrackSnapshot` is the in-memory renderer
//! used by tests and by anyone who wants to inspect what the track looks like.

/// CSS easing of the eased slide transition.
pub const EASE: &str = "ease";
/// CSS easing used when a drag is released.
pub const SNAP_EASE: &str = "cubic-bezier(0.25, 0.46, 0.45, 0.94)";

/// Track layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackLayout {
    /// `display: grid` with auto-fit columns
    Grid { min_column_px: u32, gap_px: u32 },
    /// `display: flex`, no gap
    Slider,
}

impl TrackLayout {
    /// `grid-template-columns` value for grid layouts.
    #[must_use]
    pub fn grid_template_columns(&self) -> Option<String> {
        match self {
            Self::Grid { min_column_px, .. } => {
                Some(format!("repeat(auto-fit, minmax({min_column_px}px, 1fr))"))
            }
            Self::Slider => None,
        }
    }

    /// Gap between cards. Sliders run flush.
    #[must_use]
    pub const fn gap_px(&self) -> u32 {
        match self {
            Self::Grid { gap_px, .. } => *gap_px,
            Self::Slider => 0,
        }
    }
}

/// How a transform change is animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Applied immediately, e.g. while the finger is down
    None,
    /// Programmatic navigation
    Ease { duration_ms: u32 },
    /// Release of a drag
    Snap { duration_ms: u32 },
}

impl Transition {
    /// The CSS `transition` value.
    #[must_use]
    pub fn css(&self) -> String {
        match self {
            Self::None => "none".to_string(),
            Self::Ease { duration_ms } => {
                format!("transform {} {EASE}", seconds(*duration_ms))
            }
            Self::Snap { duration_ms } => {
                format!("transform {} {SNAP_EASE}", seconds(*duration_ms))
            }
        }
    }
}

fn seconds(duration_ms: u32) -> String {
    format!("{}s", f64::from(duration_ms) / 1000.0)
}

/// Pointer cursor over the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Grab,
    Grabbing,
}

impl Cursor {
    #[must_use]
    pub const fn css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
        }
    }
}

/// One mutation of the carousel's visual state.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    Layout(TrackLayout),
    /// Fix every card to this width, or clear the inline width with `None`
    CardWidth(Option<f64>),
    /// `translateX(offset px)` with the given transition
    Transform { offset: f64, transition: Transition },
    /// `transform: none; transition: none`
    ClearTransform,
    Cursor(Cursor),
    /// Mark this dot active and every other dot inactive
    ActiveDot(usize),
    /// Attach (`true`) or detach (`false`) drag listeners on the track
    Gestures(bool),
    /// Drop any pending animation frame
    CancelFrame,
    /// Play the one-shot staggered grid reveal
    RevealGrid,
}

/// `translateX` value for a transform offset.
#[must_use]
pub fn translate_x(offset: f64) -> String {
    format!("translateX({offset}px)")
}

/// Applies render instructions.
pub trait TrackRenderer {
    fn apply(&mut self, command: &RenderCommand);

    fn apply_all(&mut self, commands: &[RenderCommand]) {
        for command in commands {
            self.apply(command);
        }
    }
}

/// In-memory picture of the track and its pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSnapshot {
    pub layout: Option<TrackLayout>,
    pub card_width: Option<f64>,
    pub offset: Option<f64>,
    pub transition: Option<Transition>,
    pub cursor: Cursor,
    pub dots: Vec<bool>,
    pub gestures_attached: bool,
    pub frames_cancelled: usize,
    pub reveals_played: usize,
}

impl TrackSnapshot {
    /// A track with `dot_count` dots, the first one active.
    #[must_use]
    pub fn new(dot_count: usize) -> Self {
        Self {
            layout: None,
            card_width: None,
            offset: None,
            transition: None,
            cursor: Cursor::Default,
            dots: (0..dot_count).map(|i| i == 0).collect(),
            gestures_attached: false,
            frames_cancelled: 0,
            reveals_played: 0,
        }
    }

    /// Indices of every active dot.
    #[must_use]
    pub fn active_dots(&self) -> Vec<usize> {
        self.dots
            .iter()
            .enumerate()
            .filter_map(|(i, active)| active.then_some(i))
            .collect()
    }

    /// Whether slider-only inline styles are gone.
    #[must_use]
    pub const fn slider_styles_cleared(&self) -> bool {
        self.card_width.is_none() && self.offset.is_none()
    }
}

impl TrackRenderer for TrackSnapshot {
    fn apply(&mut self, command: &RenderCommand) {
        match command {
            RenderCommand::Layout(layout) => self.layout = Some(*layout),
            RenderCommand::CardWidth(width) => self.card_width = *width,
            RenderCommand::Transform { offset, transition } => {
                self.offset = Some(*offset);
                self.transition = Some(*transition);
            }
            RenderCommand::ClearTransform => {
                self.offset = None;
                self.transition = Some(Transition::None);
            }
            RenderCommand::Cursor(cursor) => self.cursor = *cursor,
            RenderCommand::ActiveDot(index) => {
                for (i, dot) in self.dots.iter_mut().enumerate() {
                    *dot = i == *index;
                }
            }
            RenderCommand::Gestures(attached) => self.gestures_attached = *attached,
            RenderCommand::CancelFrame => {
                self.frames_cancelled = self.frames_cancelled.saturating_add(1);
            }
            RenderCommand::RevealGrid => {
                self.reveals_played = self.reveals_played.saturating_add(1);
            }
        }
    }
}
