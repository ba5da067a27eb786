//! Component C5 (part 2): the [`Finder`], a variable-depth k-opt local
//! search over the tour's edge-exchange move space.
//!
//! The search is a margin-pruned depth-first walk: at each level it adds
//! one new edge (querying the spatial index for candidates within the
//! remaining gain budget) and, unless that edge closes the tour, removes
//! one of the new edge's tour edges and recurses. [`std::ops::ControlFlow`]
//! carries the first improving move straight out of the recursion without
//! a separate stop-flag.

use crate::feasibility::is_feasible;
use crate::geometry::PointSet;
use crate::kmargin::KMargin;
use crate::kmove::KMove;
use crate::primitives::{Length, PointId};
use crate::quadtree::PointIndex;
use crate::tour::Tour;
use std::ops::ControlFlow;

/// Searches a fixed tour for an improving k-opt move, without mutating it.
pub struct Finder<'a> {
    tour: &'a Tour,
    points: &'a PointSet,
    index: &'a PointIndex,
    kmax: usize,
}

impl<'a> Finder<'a> {
    pub fn new(tour: &'a Tour, points: &'a PointSet, index: &'a PointIndex, kmax: usize) -> Self {
        Self { tour, points, index, kmax }
    }

    /// Tries every point as a seed, in tour order, and returns the first
    /// improving move found.
    pub fn find_best(&self) -> Option<KMove> {
        for i in 0..self.tour.size() {
            if let ControlFlow::Break(kmove) = self.search(i) {
                return Some(kmove);
            }
        }
        None
    }

    /// Tries both edges incident to `i` as deletion seeds: `(prev(i), i)`
    /// and `(i, next(i))`.
    pub fn search(&self, i: PointId) -> ControlFlow<KMove, ()> {
        if let result @ ControlFlow::Break(_) = self.seed(self.tour.prev(i), i) {
            return result;
        }
        self.seed(i, self.tour.next(i))
    }

    /// Seeds a search by removing tour edge `(a, b)`: records `swap_end =
    /// a`, the point the move must eventually close back to, and extends a
    /// new edge from `b`.
    fn seed(&self, a: PointId, b: PointId) -> ControlFlow<KMove, ()> {
        let removed = self.points.length(a, b);

        let mut kmove = KMove::new();
        let mut kmargin = KMargin::new();

        kmove.push_deletion(b, a);
        kmargin.increase(removed);
        let radius = kmargin.total_margin() + 1;
        let result = self.add_new_edge_extension(b, a, radius, &mut kmove, &mut kmargin, 1);
        kmargin.pop_increase();
        kmove.pop_deletion();
        result
    }

    /// Tries to add a new edge out of `s`, ending the currently pending
    /// [`KMove`] triple. `radius` bounds candidate distance by the gain
    /// still available. `swap_end` is the point that would close the tour
    /// if reached; `depth` is the number of edges removed so far.
    fn add_new_edge_extension(
        &self,
        s: PointId,
        swap_end: PointId,
        radius: Length,
        kmove: &mut KMove,
        kmargin: &mut KMargin,
        depth: usize,
    ) -> ControlFlow<KMove, ()> {
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

            let result = if t == swap_end {
                let adjacent_in_tour =
                    s == self.tour.next(swap_end) || s == self.tour.prev(swap_end);
                if !adjacent_in_tour
                    && kmargin.total_margin() > 0
                    && is_feasible(self.tour, kmove)
                {
                    ControlFlow::Break(kmove.clone())
                } else {
                    ControlFlow::Continue(())
                }
            } else if depth < self.kmax {
                self.delete_edge_extension(t, swap_end, kmove, kmargin, depth)
            } else {
                ControlFlow::Continue(())
            };

            kmove.pop_addition();
            kmargin.pop_decrease();

            if let ControlFlow::Break(_) = result {
                return result;
            }
        }
        ControlFlow::Continue(())
    }

    /// Tries removing one of `t`'s two tour edges and extending the chain
    /// from the freed neighbor. Only reached when `depth < kmax`.
    fn delete_edge_extension(
        &self,
        t: PointId,
        swap_end: PointId,
        kmove: &mut KMove,
        kmargin: &mut KMargin,
        depth: usize,
    ) -> ControlFlow<KMove, ()> {
        if !kmove.removable(t) {
            return ControlFlow::Continue(());
        }
        for other in [self.tour.next(t), self.tour.prev(t)] {
            let removed = self.points.length(t, other);
            kmargin.increase(removed);
            kmove.push_deletion(other, t);
            let radius = kmargin.total_margin() + 1;

            let result =
                self.add_new_edge_extension(other, swap_end, radius, kmove, kmargin, depth + 1);

            kmove.pop_deletion();
            kmargin.pop_increase();

            if let ControlFlow::Break(_) = result {
                return result;
            }
        }
        ControlFlow::Continue(())
    }
}
