//! Component C4 (part 2): [`KMargin`], the running gain budget that prunes
//! the Finder's search. `total_margin` must never go negative; that
//! invariant is what keeps the recursion bounded.

use crate::primitives::Length;
use smallvec::SmallVec;

const INLINE_CAPACITY: usize = 12;

/// The running difference between removed and added edge lengths for a
/// partial move, with a per-operation history stack for O(1) undo.
#[derive(Debug, Clone, Default)]
pub struct KMargin {
    total_margin: Length,
    increase_history: SmallVec<[Length; INLINE_CAPACITY]>,
    decrease_history: SmallVec<[Length; INLINE_CAPACITY]>,
}

impl KMargin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_margin(&self) -> Length {
        self.total_margin
    }

    /// Adds `len` to the margin (used when a removal increases the gain
    /// budget). Always succeeds.
    pub fn increase(&mut self, len: Length) {
        self.total_margin += len;
        self.increase_history.push(len);
    }

    /// Undoes the most recent [`KMargin::increase`].
    pub fn pop_increase(&mut self) {
        if let Some(len) = self.increase_history.pop() {
            self.total_margin -= len;
        }
    }

    /// Attempts to subtract `len` from the margin. Rejects (returns
    /// `false`, leaving state unchanged) if that would drive the margin
    /// negative.
    pub fn decrease(&mut self, len: Length) -> bool {
        if self.total_margin - len < 0 {
            return false;
        }
        self.total_margin -= len;
        self.decrease_history.push(len);
        true
    }

    /// Undoes the most recent successful [`KMargin::decrease`].
    pub fn pop_decrease(&mut self) {
        if let Some(len) = self.decrease_history.pop() {
            self.total_margin += len;
        }
    }

    pub fn clear(&mut self) {
        self.total_margin = 0;
        self.increase_history.clear();
        self.decrease_history.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.increase_history.is_empty() && self.decrease_history.is_empty()
    }
}
