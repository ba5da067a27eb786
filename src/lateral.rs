//! Component A6: the lateral finder.
//!
//! A plain [`crate::finder::Finder`] only accepts strictly improving moves,
//! so it can stall on a tour that is a local optimum for 2-opt but not for
//! a deeper exchange. [`LateralFinder`] searches for zero-gain moves — ones
//! that leave the tour's total length unchanged — and, for each candidate,
//! tentatively applies it and runs a nested [`crate::finder::Finder`] pass
//! to see whether the new tour shape opens up a strict improvement. Only
//! lateral moves that unlock a follow-up improvement are reported; a
//! lateral move with no payoff is discarded and the next candidate tried.

use crate::finder::Finder;
use crate::geometry::PointSet;
use crate::kmargin::KMargin;
use crate::kmove::KMove;
use crate::primitives::{Length, PointId};
use crate::quadtree::PointIndex;
use crate::tour::Tour;

/// Searches for a zero-gain move that unlocks a strictly improving
/// follow-up move.
pub struct LateralFinder<'a> {
    tour: &'a Tour,
    points: &'a PointSet,
    index: &'a PointIndex,
    kmax: usize,
}

impl<'a> LateralFinder<'a> {
    pub fn new(tour: &'a Tour, points: &'a PointSet, index: &'a PointIndex, kmax: usize) -> Self {
        Self { tour, points, index, kmax }
    }

    /// Returns `(lateral_move, follow_up_move)`, in the order they must be
    /// applied, or `None` if no lateral move unlocks an improvement.
    pub fn find_best(&self) -> Option<(KMove, KMove)> {
        for i in 0..self.tour.size() {
            if let Some(pair) = self.try_seed(i) {
                return Some(pair);
            }
        }
        None
    }

    fn try_seed(&self, i: PointId) -> Option<(KMove, KMove)> {
        if let found @ Some(_) = self.seed(self.tour.prev(i), i) {
            return found;
        }
        self.seed(i, self.tour.next(i))
    }

    fn seed(&self, a: PointId, b: PointId) -> Option<(KMove, KMove)> {
        let removed = self.points.length(a, b);

        let mut kmove = KMove::new();
        let mut kmargin = KMargin::new();

        kmove.push_deletion(b, a);
        kmargin.increase(removed);
        let radius = kmargin.total_margin() + 1;
        let found = self.add_new_edge_extension(b, a, radius, &mut kmove, &mut kmargin, 1);
        kmargin.pop_increase();
        kmove.pop_deletion();
        found
    }

    fn add_new_edge_extension(
        &self,
        s: PointId,
        swap_end: PointId,
        radius: Length,
        kmove: &mut KMove,
        kmargin: &mut KMargin,
        depth: usize,
    ) -> Option<(KMove, KMove)> {
        let query = self.tour.search_box(s, radius, self.points);
        let candidates = self.index.get_points(s, &query, self.points);

        for t in candidates {
            if t == s
                || (t != swap_end && (t == self.tour.next(s) || t == self.tour.prev(s)))
                || Some(t) == kmove.newest_point()
                || (kmove.has_start(s) && kmove.has_end(t))
            {
                continue;
            }
            let length_st = self.points.length(s, t);
            if length_st >= radius {
                continue;
            }
            if !kmargin.decrease(length_st) {
                continue;
            }
            kmove.push_addition(t);

            let found = if t == swap_end {
                let adjacent_in_tour =
                    s == self.tour.next(swap_end) || s == self.tour.prev(swap_end);
                if adjacent_in_tour {
                    None
                } else {
                    self.try_close(kmove, kmargin)
                }
            } else if depth < self.kmax {
                self.delete_edge_extension(t, swap_end, kmove, kmargin, depth)
            } else {
                None
            };

            kmove.pop_addition();
            kmargin.pop_decrease();

            if found.is_some() {
                return found;
            }
        }
        None
    }

    fn delete_edge_extension(
        &self,
        t: PointId,
        swap_end: PointId,
        kmove: &mut KMove,
        kmargin: &mut KMargin,
        depth: usize,
    ) -> Option<(KMove, KMove)> {
        if !kmove.removable(t) {
            return None;
        }
        for other in [self.tour.next(t), self.tour.prev(t)] {
            let removed = self.points.length(t, other);
            kmargin.increase(removed);
            kmove.push_deletion(other, t);
            let radius = kmargin.total_margin() + 1;

            let found =
                self.add_new_edge_extension(other, swap_end, radius, kmove, kmargin, depth + 1);

            kmove.pop_deletion();
            kmargin.pop_increase();

            if found.is_some() {
                return found;
            }
        }
        None
    }

    /// A candidate move has just closed with zero margin. Applies it to a
    /// scratch copy of the tour and runs a nested improving search; only a
    /// nested success makes this lateral move worth reporting.
    fn try_close(&self, kmove: &KMove, kmargin: &KMargin) -> Option<(KMove, KMove)> {
        if kmargin.total_margin() != 0 {
            return None;
        }
        if !crate::feasibility::is_feasible(self.tour, kmove) {
            return None;
        }
        let mut trial = self.tour.clone();
        if trial.swap(kmove).is_err() {
            return None;
        }
        let nested = Finder::new(&trial, self.points, self.index, self.kmax);
        nested.find_best().map(|follow_up| (kmove.clone(), follow_up))
    }
}
