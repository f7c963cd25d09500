//! Property-based tests for navigation and gestures

use cadence_core::Song;
use cadence_playback::navigation::{next_in, previous_in};
use cadence_playback::{Carousel, Direction, DragTracker, HorizontalSwipe, SwipeAction, SWIPE_THRESHOLD};
use proptest::prelude::*;

fn songs(n: usize) -> Vec<Song> {
    (0..n)
        .map(|i| Song::new(i.to_string(), format!("Song {i}"), "Artist", format!("https://cdn.test/{i}.mp3")))
        .collect()
}

proptest! {
    #[test]
    fn carousel_full_cycle_returns_home(len in 1usize..50, start in 0usize..50) {
        let start = start % len;
        let mut carousel = Carousel::new(len, Some(start));
        for _ in 0..len {
            carousel.step(Direction::Next);
        }
        prop_assert_eq!(carousel.page(), start);
    }

    #[test]
    fn carousel_step_is_reversible(len in 1usize..50, start in 0usize..50) {
        let start = start % len;
        let mut carousel = Carousel::new(len, Some(start));
        carousel.step(Direction::Next);
        prop_assert_eq!(carousel.step(Direction::Previous), start);
    }

    #[test]
    fn carousel_page_stays_in_range(len in 0usize..20, steps in prop::collection::vec(any::<bool>(), 0..40)) {
        let mut carousel = Carousel::new(len, None);
        for forward in steps {
            let page = carousel.step(if forward { Direction::Next } else { Direction::Previous });
            prop_assert!(len == 0 || page < len);
        }
    }

    #[test]
    fn linear_next_is_index_plus_one(len in 1usize..30, at in 0usize..30) {
        let list = songs(len);
        let at = at % len;
        match next_in(&list, &list[at]) {
            Some(song) => prop_assert_eq!(&song.id, &list[at + 1].id),
            None => prop_assert_eq!(at, len - 1),
        }
        match previous_in(&list, &list[at]) {
            Some(song) => prop_assert_eq!(&song.id, &list[at - 1].id),
            None => prop_assert_eq!(at, 0),
        }
    }

    #[test]
    fn horizontal_swipe_respects_threshold(dx in -400.0f32..400.0) {
        let mut swipe = HorizontalSwipe::default();
        swipe.drag(dx);
        let expected = if dx > SWIPE_THRESHOLD {
            Some(SwipeAction::Previous)
        } else if dx < -SWIPE_THRESHOLD {
            Some(SwipeAction::Next)
        } else {
            None
        };
        prop_assert_eq!(swipe.end(), expected);
    }

    #[test]
    fn downward_drag_past_threshold_always_dismisses(dx in -1000.0f32..1000.0, dy in 101.0f32..1000.0) {
        let mut tracker = DragTracker::default();
        tracker.drag(dx, dy);
        prop_assert_eq!(tracker.end(), Some(SwipeAction::Dismiss));
    }

    #[test]
    fn tracker_is_idle_after_end(dx in -500.0f32..500.0, dy in -500.0f32..500.0) {
        let mut tracker = DragTracker::default();
        tracker.drag(dx, dy);
        tracker.end();
        prop_assert!(!tracker.is_dragging());
        prop_assert_eq!(tracker.end(), None);
    }
}
