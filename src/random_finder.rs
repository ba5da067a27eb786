//! Component A7: the random finder.
//!
//! A plain [`crate::finder::Finder`] always explores every candidate the
//! spatial index returns at every depth, which is exhaustive but can spend
//! most of its time at the deepest level, where the candidate list is
//! largest and least likely to matter. [`RandomFinder`] narrows the
//! candidate list once the search has reached its maximum depth: it keeps
//! only candidates whose new edge still fits the remaining gain margin,
//! then samples a small, fixed number of them with a seeded random number
//! generator, so repeated runs with the same seed explore the same moves.

use crate::feasibility::is_feasible;
use crate::geometry::PointSet;
use crate::kmargin::KMargin;
use crate::kmove::KMove;
use crate::primitives::{Length, PointId};
use crate::quadtree::PointIndex;
use crate::tour::Tour;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;
use std::ops::ControlFlow;

/// How many candidates survive the random sample once the search is at its
/// maximum depth.
const MAX_DEPTH_SAMPLE_SIZE: usize = 2;

/// A [`crate::finder::Finder`] variant that randomly samples its deepest
/// level's candidates instead of exploring all of them.
pub struct RandomFinder<'a> {
    tour: &'a Tour,
    points: &'a PointSet,
    index: &'a PointIndex,
    kmax: usize,
    rng: RefCell<ChaCha8Rng>,
}

impl<'a> RandomFinder<'a> {
    pub fn new(
        tour: &'a Tour,
        points: &'a PointSet,
        index: &'a PointIndex,
        kmax: usize,
        rng_seed: u64,
    ) -> Self {
        Self {
            tour,
            points,
            index,
            kmax,
            rng: RefCell::new(ChaCha8Rng::seed_from_u64(rng_seed)),
        }
    }

    pub fn find_best(&self) -> Option<KMove> {
        for i in 0..self.tour.size() {
            if let ControlFlow::Break(kmove) = self.search(i) {
                return Some(kmove);
            }
        }
        None
    }

    pub fn search(&self, i: PointId) -> ControlFlow<KMove, ()> {
        if let result @ ControlFlow::Break(_) = self.seed(self.tour.prev(i), i) {
            return result;
        }
        self.seed(i, self.tour.next(i))
    }

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

    /// Filters `candidates` to those whose new edge still fits inside the
    /// current margin, then randomly samples down to
    /// [`MAX_DEPTH_SAMPLE_SIZE`] of them. Only applied once the search has
    /// reached `kmax`; shallower levels keep the full candidate list, same
    /// as [`crate::finder::Finder`].
    fn filter_deepest_candidates(
        &self,
        s: PointId,
        candidates: Vec<PointId>,
        kmargin: &KMargin,
    ) -> Vec<PointId> {
        let mut filtered: Vec<PointId> = candidates
            .into_iter()
            .filter(|&t| {
                t != s && kmargin.total_margin() > self.points.length(s, t)
            })
            .collect();
        if filtered.len() > MAX_DEPTH_SAMPLE_SIZE {
            filtered.shuffle(&mut *self.rng.borrow_mut());
            filtered.truncate(MAX_DEPTH_SAMPLE_SIZE);
        }
        filtered
    }

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
        let mut candidates = self.index.get_points(s, &query, self.points);
        if depth >= self.kmax {
            candidates = self.filter_deepest_candidates(s, candidates, kmargin);
        }

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Domain;

    fn crossing_square() -> (Tour, PointSet, PointIndex) {
        let points = PointSet::new(vec![0.0, 10.0, 10.0, 0.0], vec![0.0, 0.0, 10.0, 10.0]);
        let tour = Tour::from_order(vec![0, 2, 1, 3]);
        let domain = Domain::from_points(&points);
        let index = PointIndex::build(&points, &domain, 8).unwrap();
        (tour, points, index)
    }

    #[test]
    fn test_random_finder_improves_crossing_square() {
        let (tour, points, index) = crossing_square();
        let finder = RandomFinder::new(&tour, &points, &index, 5, 42);
        let found = finder.find_best();
        assert!(found.is_some());
        let kmove = found.unwrap();
        let mut improved = tour.clone();
        improved.swap(&kmove).unwrap();
        assert!(improved.validate().is_ok());
    }

    #[test]
    fn test_same_seed_produces_same_result() {
        let (tour, points, index) = crossing_square();
        let a = RandomFinder::new(&tour, &points, &index, 5, 7).find_best();
        let b = RandomFinder::new(&tour, &points, &index, 5, 7).find_best();
        assert_eq!(a.is_some(), b.is_some());
    }

    #[test]
    fn test_finds_nothing_on_already_optimal_tour() {
        let points = PointSet::new(vec![0.0, 1.0, 1.0, 0.0], vec![0.0, 0.0, 1.0, 1.0]);
        let tour = Tour::from_order(vec![0, 1, 2, 3]);
        let domain = Domain::from_points(&points);
        let index = PointIndex::build(&points, &domain, 8).unwrap();
        let finder = RandomFinder::new(&tour, &points, &index, 5, 1);
        assert!(finder.find_best().is_none());
    }
}
