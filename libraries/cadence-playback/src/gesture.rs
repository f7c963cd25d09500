//! Swipe gesture recognition
//!
//! Front-ends feed raw drag deltas in logical pixels and get back the
//! action to perform when the drag ends.

use serde::{Deserialize, Serialize};

/// Distance a drag must travel before it counts as a swipe
pub const SWIPE_THRESHOLD: f32 = 100.0;

/// Cap on how far the full-screen player follows a downward drag
pub const MAX_DISMISS_OFFSET: f32 = 2000.0;

/// Action resolved from a finished swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwipeAction {
    /// Swipe left
    Next,
    /// Swipe right
    Previous,
    /// Swipe down (full-screen player only)
    Dismiss,
}

/// Two-axis drag tracker for the full-screen player
///
/// Upward movement is ignored; a downward swipe past the threshold wins
/// over any horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragTracker {
    threshold: f32,
    total_x: f32,
    total_y: f32,
    dragging: bool,
}

impl DragTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            total_x: 0.0,
            total_y: 0.0,
            dragging: false,
        }
    }

    /// Accumulate one drag delta
    pub fn drag(&mut self, dx: f32, dy: f32) {
        if dy > 0.0 {
            self.total_y += dy;
            self.dragging = true;
        }
        self.total_x += dx;
    }

    /// Finish the drag and resolve it
    pub fn end(&mut self) -> Option<SwipeAction> {
        let action = if self.total_y > self.threshold {
            Some(SwipeAction::Dismiss)
        } else if self.total_x > self.threshold {
            Some(SwipeAction::Previous)
        } else if self.total_x < -self.threshold {
            Some(SwipeAction::Next)
        } else {
            None
        };
        self.reset();
        action
    }

    /// Abort the drag without an action
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Whether a downward drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// How far the player view should follow the finger downwards
    pub fn offset_y(&self) -> f32 {
        if self.dragging {
            self.total_y.min(MAX_DISMISS_OFFSET)
        } else {
            0.0
        }
    }

    fn reset(&mut self) {
        self.total_x = 0.0;
        self.total_y = 0.0;
        self.dragging = false;
    }
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new(SWIPE_THRESHOLD)
    }
}

/// Horizontal-only swipe tracker for the mini player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalSwipe {
    threshold: f32,
    total_x: f32,
}

impl HorizontalSwipe {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            total_x: 0.0,
        }
    }

    /// Accumulate one horizontal delta
    pub fn drag(&mut self, dx: f32) {
        self.total_x += dx;
    }

    /// Finish the drag; never yields [`SwipeAction::Dismiss`]
    pub fn end(&mut self) -> Option<SwipeAction> {
        let action = if self.total_x > self.threshold {
            Some(SwipeAction::Previous)
        } else if self.total_x < -self.threshold {
            Some(SwipeAction::Next)
        } else {
            None
        };
        self.total_x = 0.0;
        action
    }
}

impl Default for HorizontalSwipe {
    fn default() -> Self {
        Self::new(SWIPE_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_drag_does_nothing() {
        let mut tracker = DragTracker::default();
        tracker.drag(60.0, 40.0);
        assert_eq!(tracker.end(), None);
    }

    #[test]
    fn downward_swipe_dismisses_even_with_horizontal_motion() {
        let mut tracker = DragTracker::default();
        tracker.drag(-300.0, 150.0);
        assert_eq!(tracker.end(), Some(SwipeAction::Dismiss));
    }

    #[test]
    fn upward_motion_is_ignored() {
        let mut tracker = DragTracker::default();
        tracker.drag(0.0, -500.0);
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.offset_y(), 0.0);
        assert_eq!(tracker.end(), None);
    }

    #[test]
    fn right_swipe_is_previous_left_is_next() {
        let mut tracker = DragTracker::default();
        tracker.drag(60.0, 0.0);
        tracker.drag(60.0, 0.0);
        assert_eq!(tracker.end(), Some(SwipeAction::Previous));

        tracker.drag(-101.0, 0.0);
        assert_eq!(tracker.end(), Some(SwipeAction::Next));
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut tracker = DragTracker::default();
        tracker.drag(100.0, 0.0);
        assert_eq!(tracker.end(), None);
    }

    #[test]
    fn end_resets_totals() {
        let mut tracker = DragTracker::default();
        tracker.drag(150.0, 0.0);
        tracker.end();
        tracker.drag(10.0, 0.0);
        assert_eq!(tracker.end(), None);
    }

    #[test]
    fn cancel_discards_drag() {
        let mut tracker = DragTracker::default();
        tracker.drag(0.0, 500.0);
        assert_eq!(tracker.offset_y(), 500.0);
        tracker.cancel();
        assert_eq!(tracker.offset_y(), 0.0);
        assert_eq!(tracker.end(), None);
    }

    #[test]
    fn offset_is_capped() {
        let mut tracker = DragTracker::default();
        tracker.drag(0.0, 5000.0);
        assert_eq!(tracker.offset_y(), MAX_DISMISS_OFFSET);
    }

    #[test]
    fn mini_player_swipes() {
        let mut swipe = HorizontalSwipe::default();
        swipe.drag(120.0);
        assert_eq!(swipe.end(), Some(SwipeAction::Previous));
        swipe.drag(-120.0);
        assert_eq!(swipe.end(), Some(SwipeAction::Next));
        swipe.drag(30.0);
        assert_eq!(swipe.end(), None);
    }
}
