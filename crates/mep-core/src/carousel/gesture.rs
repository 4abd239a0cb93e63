//! Drag/swipe gesture tracking
//!
//! A gesture is `Idle -> Dragging -> Idle`. While dragging, the track follows
//! the pointer 1:1. On release the displacement decides whether the carousel
//! steps to a neighbour or snaps back.

/// Where pointer samples come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Touch,
    Mouse,
}

/// Gesture tracker state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging { start_x: f64, source: PointerSource },
}

impl GestureState {
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Source of the active drag, if any.
    #[must_use]
    pub const fn source(&self) -> Option<PointerSource> {
        match self {
            Self::Idle => None,
            Self::Dragging { source, .. } => Some(*source),
        }
    }
}

/// Offset of the track while the pointer is at `pointer_x`.
#[must_use]
pub fn drag_offset(committed_offset: f64, start_x: f64, pointer_x: f64) -> f64 {
    committed_offset + (pointer_x - start_x)
}

/// Index the carousel settles on when a drag is released.
///
/// Displacements of at least `threshold_ratio * wrapper_width` step by one,
/// clamped at both ends. A rightward drag (positive displacement) goes back.
/// The boundary is inclusive: a drag of exactly the threshold steps.
///
/// # Examples
///
/// ```
/// use mep_core::carousel::gesture::resolve_release;
///
/// // 100px of a 300px wrapper is past the 30% threshold
/// assert_eq!(resolve_release(1, 3, -100.0, 300.0, 0.3), 2);
/// // exactly 30% still steps
/// assert_eq!(resolve_release(1, 3, 90.0, 300.0, 0.3), 0);
/// // small drags snap back
/// assert_eq!(resolve_release(1, 3, -50.0, 300.0, 0.3), 1);
/// // clamped, not wrapped
/// assert_eq!(resolve_release(0, 3, 200.0, 300.0, 0.3), 0);
/// ```
#[must_use]
pub fn resolve_release(
    current_index: usize,
    card_count: usize,
    moved_by: f64,
    wrapper_width: f64,
    threshold_ratio: f64,
) -> usize {
    let last = card_count.saturating_sub(1);
    let threshold = wrapper_width * threshold_ratio;

    if card_count == 0 || wrapper_width <= 0.0 || moved_by.abs() < threshold {
        return current_index.min(last);
    }

    if moved_by > 0.0 {
        current_index.saturating_sub(1)
    } else {
        current_index.saturating_add(1).min(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_offset_follows_pointer() {
        assert!((drag_offset(-300.0, 200.0, 150.0) - -350.0).abs() < f64::EPSILON);
        assert!((drag_offset(0.0, 100.0, 160.0) - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(resolve_release(1, 3, 90.0, 300.0, 0.3), 0);
        assert_eq!(resolve_release(1, 3, -90.0, 300.0, 0.3), 2);
        assert_eq!(resolve_release(1, 3, 89.9, 300.0, 0.3), 1);
    }

    #[test]
    fn test_clamped_at_last_card() {
        assert_eq!(resolve_release(2, 3, -250.0, 300.0, 0.3), 2);
    }

    #[test]
    fn test_zero_width_never_steps() {
        assert_eq!(resolve_release(1, 3, -250.0, 0.0, 0.3), 1);
    }

    #[test]
    fn test_gesture_state() {
        assert!(!GestureState::Idle.is_dragging());
        let dragging = GestureState::Dragging {
            start_x: 10.0,
            source: PointerSource::Mouse,
        };
        assert!(dragging.is_dragging());
        assert_eq!(dragging.source(), Some(PointerSource::Mouse));
    }
}
