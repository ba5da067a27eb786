//! Component C4 (part 1): [`KMove`], the accumulating record of a partial
//! k-opt move under construction.

use crate::primitives::PointId;
use smallvec::SmallVec;

/// Inline capacity for the three parallel stacks. `kmax` is small in
/// practice (typically <= 10), so a fixed-capacity inline array avoids a
/// heap allocation per search branch.
const INLINE_CAPACITY: usize = 12;

/// Three equal-length stacks of point ids. Entry `i` represents: add edge
/// `(starts[i], ends[i])`; remove edge `(removes[i], next(removes[i]))`.
#[derive(Debug, Clone, Default)]
pub struct KMove {
    starts: SmallVec<[PointId; INLINE_CAPACITY]>,
    ends: SmallVec<[PointId; INLINE_CAPACITY]>,
    removes: SmallVec<[PointId; INLINE_CAPACITY]>,
}

impl KMove {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a deletion: `start` gains a pending new edge, `remove_anchor`
    /// marks the edge `(remove_anchor, next(remove_anchor))` as removed.
    /// Must be completed later by a matching [`KMove::push_addition`].
    pub fn push_deletion(&mut self, start: PointId, remove_anchor: PointId) {
        self.starts.push(start);
        self.removes.push(remove_anchor);
    }

    /// Undoes the most recent [`KMove::push_deletion`].
    pub fn pop_deletion(&mut self) {
        self.starts.pop();
        self.removes.pop();
    }

    /// Completes the most recent pending deletion with its new edge's end.
    pub fn push_addition(&mut self, end: PointId) {
        self.ends.push(end);
    }

    /// Undoes the most recent [`KMove::push_addition`].
    pub fn pop_addition(&mut self) {
        self.ends.pop();
    }

    /// Pushes a complete `(start, end, remove_anchor)` triple in one call.
    pub fn push_all(&mut self, start: PointId, end: PointId, remove_anchor: PointId) {
        self.starts.push(start);
        self.ends.push(end);
        self.removes.push(remove_anchor);
    }

    /// Undoes the most recent [`KMove::push_all`].
    pub fn pop_all(&mut self) {
        self.starts.pop();
        self.ends.pop();
        self.removes.pop();
    }

    /// True iff `p` is not already an anchor in `removes`.
    pub fn removable(&self, p: PointId) -> bool {
        !self.removes.contains(&p)
    }

    pub fn has_start(&self, p: PointId) -> bool {
        self.starts.contains(&p)
    }

    pub fn has_end(&self, p: PointId) -> bool {
        self.ends.contains(&p)
    }

    /// The last element pushed onto `ends`.
    pub fn newest_point(&self) -> Option<PointId> {
        self.ends.last().copied()
    }

    /// The anchor of the most recently pushed deletion.
    pub fn newest_remove(&self) -> Option<PointId> {
        self.removes.last().copied()
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    pub fn clear(&mut self) {
        self.starts.clear();
        self.ends.clear();
        self.removes.clear();
    }

    pub fn starts(&self) -> &[PointId] {
        &self.starts
    }

    pub fn ends(&self) -> &[PointId] {
        &self.ends
    }

    pub fn removes(&self) -> &[PointId] {
        &self.removes
    }

    /// Checks the `|starts| = |ends| = |removes|` invariant.
    pub fn is_well_formed(&self) -> bool {
        self.starts.len() == self.ends.len() && self.starts.len() == self.removes.len()
    }
}
