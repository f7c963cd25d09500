//! Next/previous track selection
//!
//! Two flavors exist: list navigation stops at both ends, while the
//! full-screen carousel wraps around.

use cadence_core::Song;
use serde::{Deserialize, Serialize};

/// Direction of a track change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Next,
    Previous,
}

/// Index of `song` in `list`, matched by id
pub fn index_of(list: &[Song], song: &Song) -> Option<usize> {
    list.iter().position(|s| s.id == song.id)
}

/// Song after `current`, or `None` at the end of the list or when `current` is absent
pub fn next_in<'a>(list: &'a [Song], current: &Song) -> Option<&'a Song> {
    let index = index_of(list, current)?;
    list.get(index + 1)
}

/// Song before `current`, or `None` at the start of the list or when `current` is absent
pub fn previous_in<'a>(list: &'a [Song], current: &Song) -> Option<&'a Song> {
    let index = index_of(list, current)?;
    index.checked_sub(1).and_then(|i| list.get(i))
}

/// Page position of the full-screen cover carousel
///
/// Stepping past either end wraps to the other. A carousel that is not
/// placed on any page steps onto the first page going forward and the last
/// page going back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    page: Option<usize>,
}

impl Carousel {
    /// Create a carousel over `len` pages starting at `initial`
    ///
    /// An out-of-range start (including a song that was not found) leaves
    /// the carousel unplaced; it reports page 0 until the first step.
    pub fn new(len: usize, initial: Option<usize>) -> Self {
        let page = initial.filter(|i| *i < len);
        Self { len, page }
    }

    /// Carousel positioned on `current` within `list`
    pub fn over(list: &[Song], current: &Song) -> Self {
        Self::new(list.len(), index_of(list, current))
    }

    /// Current page
    pub fn page(&self) -> usize {
        self.page.unwrap_or(0)
    }

    /// Number of pages
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no pages
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Move one page, wrapping at the ends; returns the new page
    pub fn step(&mut self, direction: Direction) -> usize {
        if self.len == 0 {
            return 0;
        }
        let page = match (direction, self.page) {
            (Direction::Next, None) => 0,
            (Direction::Next, Some(page)) if page + 1 >= self.len => 0,
            (Direction::Next, Some(page)) => page + 1,
            (Direction::Previous, None | Some(0)) => self.len - 1,
            (Direction::Previous, Some(page)) => page - 1,
        };
        self.page = Some(page);
        page
    }

    /// Jump to a page; out-of-range pages are ignored
    pub fn set_page(&mut self, page: usize) -> bool {
        if page < self.len {
            self.page = Some(page);
            true
        } else {
            false
        }
    }
}
