//! Single-item-visible carousel used for image cycling inside popups.
//!
//! Exactly one item is active at a time; `next`/`prev` wrap at both
//! ends and dot/thumbnail jumps go through [`Carousel::go_to`]. The
//! index starts at 0. Carousels with zero or one item never move.

/// Rotating index over an ordered list of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Carousel {
    len: usize,
    current: usize,
}

impl Carousel {
    /// Create a carousel over `len` items, with item 0 active.
    pub fn new(len: usize) -> Self {
        Self { len, current: 0 }
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the carousel has no items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The active item index.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Advance to the next item, wrapping to 0 after the last.
    ///
    /// Returns the new active index. Carousels with fewer than two
    /// items stay put.
    pub fn next(&mut self) -> usize {
        if self.len > 1 {
            self.current = if self.current + 1 < self.len {
                self.current + 1
            } else {
                0
            };
        }
        self.current
    }

    /// Step to the previous item, wrapping to the last from 0.
    ///
    /// Returns the new active index. Carousels with fewer than two
    /// items stay put.
    pub fn prev(&mut self) -> usize {
        if self.len > 1 {
            self.current = if self.current > 0 {
                self.current - 1
            } else {
                self.len - 1
            };
        }
        self.current
    }

    /// Jump to a specific item (dot or thumbnail click).
    ///
    /// Out-of-range indices are ignored and logged.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index < self.len {
            self.current = index;
            true
        } else {
            tracing::debug!(index, len = self.len, "carousel jump out of range");
            false
        }
    }

    /// Return to item 0 (used when the owning popup resets).
    pub fn rewind(&mut self) {
        self.current = 0;
    }
}
