//! Shuffle order
//!
//! A shuffle order is a permutation of the track indices plus a cursor. Every
//! index is visited once before any repeats; the engine regenerates the order
//! (current track first) when the cursor runs off either end.

use rand::seq::SliceRandom;
use rand::Rng;

/// Permutation of track indices with a cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShuffleOrder {
    order: Vec<usize>,
    cursor: usize,
}

impl ShuffleOrder {
    /// Empty order (shuffle off)
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh Fisher-Yates permutation of `0..len`
    ///
    /// If `first` is a valid index it is moved to the front and the cursor
    /// points at it, so enabling shuffle never jumps away from the current
    /// track.
    pub fn generate<R: Rng + ?Sized>(len: usize, first: Option<usize>, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(rng);

        if let Some(first) = first.filter(|&i| i < len) {
            if let Some(pos) = order.iter().position(|&i| i == first) {
                order.swap(0, pos);
            }
        }

        Self { order, cursor: 0 }
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// True if this order is a permutation of a list of length `len`
    pub fn covers(&self, len: usize) -> bool {
        self.order.len() == len
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index under the cursor
    pub fn current(&self) -> Option<usize> {
        self.order.get(self.cursor).copied()
    }

    /// Step forward; `None` when the order is exhausted
    pub fn advance(&mut self) -> Option<usize> {
        if self.cursor + 1 < self.order.len() {
            self.cursor += 1;
            self.current()
        } else {
            None
        }
    }

    /// Step backward; `None` at the start of the order
    pub fn retreat(&mut self) -> Option<usize> {
        if self.cursor > 0 && !self.order.is_empty() {
            self.cursor -= 1;
            self.current()
        } else {
            None
        }
    }

    /// Move the cursor to the last entry
    pub fn jump_to_end(&mut self) -> Option<usize> {
        self.cursor = self.order.len().checked_sub(1)?;
        self.current()
    }

    /// Make `index` the entry under the cursor, as for a track picked by hand
    ///
    /// The entry is moved rather than the cursor, so everything not yet
    /// played stays ahead of the cursor. Returns false if `index` is not in
    /// the order.
    pub fn pick(&mut self, index: usize) -> bool {
        let Some(pos) = self.order.iter().position(|&i| i == index) else {
            return false;
        };
        if pos == self.cursor {
            return true;
        }

        self.order.remove(pos);
        if pos > self.cursor {
            self.cursor += 1;
        }
        self.order.insert(self.cursor, index);
        true
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.cursor = 0;
    }
}
