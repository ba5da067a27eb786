//! Component C5 (part 1): the cycle-feasibility oracle.
//!
//! Before a [`crate::tour::Tour`] is mutated by [`crate::tour::Tour::swap`],
//! the Finder must know whether the candidate [`KMove`] would still close
//! into a single cycle through all N points. This module answers that
//! question without mutating the tour: it walks the whole graph once,
//! substituting the move's pending edges for the tour's real ones only at
//! the handful of points the move actually touches.

use crate::kmove::KMove;
use crate::primitives::PointId;
use crate::tour::Tour;
use std::collections::HashMap;

/// A point's two neighbors after a hypothetical [`KMove::swap`], without
/// actually applying it.
#[derive(Debug, Clone, Copy)]
struct Override {
    a: PointId,
    b: PointId,
}

/// Builds the touched-point neighbor overrides implied by `kmove`, by
/// replaying its removals and additions against an in-memory copy of just
/// the affected adjacency entries.
fn touched_overrides(tour: &Tour, kmove: &KMove) -> HashMap<PointId, Override> {
    let mut overrides: HashMap<PointId, Override> = HashMap::new();
    let get = |overrides: &HashMap<PointId, Override>, p: PointId| -> Override {
        overrides.get(&p).copied().unwrap_or(Override {
            a: tour.prev(p),
            b: tour.next(p),
        })
    };
    let remove_edge = |overrides: &mut HashMap<PointId, Override>, anchor: PointId| {
        let other = tour.next(anchor);
        let ov = get(overrides, anchor);
        let replaced = if ov.a == other {
            Override { a: PointId::MAX, b: ov.b }
        } else {
            Override { a: ov.a, b: PointId::MAX }
        };
        overrides.insert(anchor, replaced);
        let ov_other = get(overrides, other);
        let replaced_other = if ov_other.a == anchor {
            Override { a: PointId::MAX, b: ov_other.b }
        } else {
            Override { a: ov_other.a, b: PointId::MAX }
        };
        overrides.insert(other, replaced_other);
    };
    for &anchor in kmove.removes() {
        remove_edge(&mut overrides, anchor);
    }
    let fill = |overrides: &mut HashMap<PointId, Override>, p: PointId, neighbor: PointId| {
        let ov = get(overrides, p);
        let filled = if ov.a == PointId::MAX {
            Override { a: neighbor, b: ov.b }
        } else if ov.b == PointId::MAX {
            Override { a: ov.a, b: neighbor }
        } else {
            ov
        };
        overrides.insert(p, filled);
    };
    for (&start, &end) in kmove.starts().iter().zip(kmove.ends()) {
        fill(&mut overrides, start, end);
        fill(&mut overrides, end, start);
    }
    overrides
}

/// Returns `true` iff applying `kmove` to `tour` would produce a single
/// cycle through all N points, without mutating `tour`.
///
/// Runs in O(N): a full walk of the hypothetical graph, using the small
/// `touched_overrides` map to redirect at the points the move changes and
/// the tour's real `next`/`prev` everywhere else. This is deliberately not
/// the faster O(k) sequence-jump check some k-opt implementations use —
/// see the design notes for why.
pub fn is_feasible(tour: &Tour, kmove: &KMove) -> bool {
    let n = tour.size();
    if n == 0 {
        return true;
    }
    let overrides = touched_overrides(tour, kmove);
    let neighbor = |p: PointId, coming_from: PointId| -> Option<PointId> {
        match overrides.get(&p) {
            Some(ov) => {
                if ov.a == coming_from {
                    if ov.b == PointId::MAX {
                        None
                    } else {
                        Some(ov.b)
                    }
                } else if ov.a == PointId::MAX {
                    Some(ov.b)
                } else {
                    Some(ov.a)
                }
            }
            None => {
                if tour.prev(p) == coming_from {
                    Some(tour.next(p))
                } else {
                    Some(tour.prev(p))
                }
            }
        }
    };

    let start = 0;
    let mut visited = vec![false; n];
    // Seed the walk direction using the overridden neighbor set if `start`
    // was touched, otherwise the real tour.
    let first_step = match overrides.get(&start) {
        Some(ov) => {
            if ov.a != PointId::MAX {
                ov.a
            } else {
                ov.b
            }
        }
        None => tour.next(start),
    };
    if first_step == PointId::MAX {
        return false;
    }

    visited[start] = true;
    let mut previous = start;
    let mut current = first_step;
    let mut count = 1;
    while current != start {
        if current == PointId::MAX || visited[current] {
            return false;
        }
        visited[current] = true;
        count += 1;
        if count > n {
            return false;
        }
        let next = match neighbor(current, previous) {
            Some(p) => p,
            None => return false,
        };
        previous = current;
        current = next;
    }
    count == n
}
