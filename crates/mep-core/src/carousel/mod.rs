//! Responsive services carousel
//!
//! - `state`: index arithmetic and the state record
//! - `gesture`: drag tracking and release resolution
//! - `autoplay`: the periodic advance and its scheduler seam
//! - `controller`: the state machine tying them together
//! - `render`: instructions the controller emits for a renderer

pub mod autoplay;
pub mod controller;
pub mod gesture;
pub mod render;
pub mod state;

pub use autoplay::{AutoplayTimer, IntervalScheduler, VirtualScheduler};
pub use controller::{CarouselController, CarouselEvent};
pub use gesture::{GestureState, PointerSource};
pub use render::{Cursor, RenderCommand, TrackLayout, TrackRenderer, TrackSnapshot, Transition};
pub use state::{CarouselState, Direction};
