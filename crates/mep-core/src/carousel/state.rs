//! Carousel state and index arithmetic

use super::gesture::GestureState;
use crate::viewport::LayoutMode;

/// Navigation direction for buttons and autoplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Stay,
    Next,
}

impl Direction {
    /// -1, 0 or +1.
    #[must_use]
    pub const fn step(self) -> i8 {
        match self {
            Self::Prev => -1,
            Self::Stay => 0,
            Self::Next => 1,
        }
    }

    /// Inverse of [`Direction::step`].
    #[must_use]
    pub const fn from_step(step: i8) -> Option<Self> {
        match step {
            -1 => Some(Self::Prev),
            0 => Some(Self::Stay),
            1 => Some(Self::Next),
            _ => None,
        }
    }
}

/// Index after moving one step, wrapping at both ends.
///
/// # Examples
///
/// ```
/// use mep_core::carousel::state::{wrap_index, Direction};
///
/// assert_eq!(wrap_index(2, Direction::Next, 3), 0);
/// assert_eq!(wrap_index(0, Direction::Prev, 3), 2);
/// assert_eq!(wrap_index(1, Direction::Stay, 3), 1);
/// ```
#[must_use]
pub fn wrap_index(index: usize, direction: Direction, card_count: usize) -> usize {
    let Some(last) = card_count.checked_sub(1) else {
        return 0;
    };
    let index = index.min(last);

    match direction {
        Direction::Stay => index,
        Direction::Next => {
            if index >= last {
                0
            } else {
                index.saturating_add(1)
            }
        }
        Direction::Prev => index.checked_sub(1).unwrap_or(last),
    }
}

/// Track offset that shows card `index` inside a wrapper of `width` pixels.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn slide_offset(index: usize, width: f64) -> f64 {
    // `+ 0.0` turns -0.0 into 0.0 so index 0 renders as `translateX(0px)`
    -(index as f64 * width) + 0.0
}

/// Everything the carousel remembers between events.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselState {
    pub current_index: usize,
    pub card_count: usize,
    pub wrapper_width: f64,
    /// `None` until the first layout pass
    pub mode: Option<LayoutMode>,
    pub gesture: GestureState,
    /// Offset of the settled slide
    pub committed_offset: f64,
    /// Offset currently shown, differs from `committed_offset` mid-drag
    pub current_offset: f64,
    pub autoplaying: bool,
    /// The grid reveal plays once per page lifetime
    pub grid_revealed: bool,
}

impl CarouselState {
    #[must_use]
    pub const fn new(card_count: usize) -> Self {
        Self {
            current_index: 0,
            card_count,
            wrapper_width: 0.0,
            mode: None,
            gesture: GestureState::Idle,
            committed_offset: 0.0,
            current_offset: 0.0,
            autoplaying: false,
            grid_revealed: false,
        }
    }

    #[must_use]
    pub fn is_slider(&self) -> bool {
        self.mode.is_some_and(LayoutMode::is_slider)
    }

    /// Moves both offsets to the current slide.
    pub fn settle(&mut self) -> f64 {
        let offset = slide_offset(self.current_index, self.wrapper_width);
        self.committed_offset = offset;
        self.current_offset = offset;
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_both_directions() {
        assert_eq!(wrap_index(0, Direction::Next, 3), 1);
        assert_eq!(wrap_index(2, Direction::Next, 3), 0);
        assert_eq!(wrap_index(0, Direction::Prev, 3), 2);
        assert_eq!(wrap_index(2, Direction::Prev, 3), 1);
    }

    #[test]
    fn test_wrap_single_card() {
        assert_eq!(wrap_index(0, Direction::Next, 1), 0);
        assert_eq!(wrap_index(0, Direction::Prev, 1), 0);
    }

    #[test]
    fn test_wrap_no_cards() {
        assert_eq!(wrap_index(0, Direction::Next, 0), 0);
    }

    #[test]
    fn test_direction_steps() {
        for direction in [Direction::Prev, Direction::Stay, Direction::Next] {
            assert_eq!(Direction::from_step(direction.step()), Some(direction));
        }
        assert_eq!(Direction::from_step(2), None);
    }

    #[test]
    fn test_slide_offset() {
        assert!((slide_offset(2, 320.0) - -640.0).abs() < f64::EPSILON);
        assert!(slide_offset(0, 320.0).is_sign_positive());
    }

    #[test]
    fn test_settle() {
        let mut state = CarouselState::new(3);
        state.wrapper_width = 400.0;
        state.current_index = 1;
        state.current_offset = -123.0;
        let offset = state.settle();
        assert!((offset - -400.0).abs() < f64::EPSILON);
        assert!((state.current_offset - state.committed_offset).abs() < f64::EPSILON);
    }
}
