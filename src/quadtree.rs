//! ## Point quadtree (component C2)
//!
//! A fixed-depth quadtree over the full point set, keyed by Morton code.
//! Unlike a capacity-adaptive quadtree, every point descends exactly
//! `max_tree_depth - 1` levels from the root; the tree's only job is to
//! answer radius-bounded box queries quickly, not to balance bucket sizes.
//!
//! The tree is built once, in bulk, from the Morton-sorted point order, and
//! is read-only afterwards.

use crate::exceptions::KOptError;
use crate::geometry::{Domain, PointSet, Rectangle};
use crate::morton::{interleave_coordinates, MortonKey};
use crate::primitives::{PointId, QUADRANT_NE, QUADRANT_NW, QUADRANT_SE, QUADRANT_SW};

struct Node {
    bbox: Rectangle,
    // Non-empty only at leaves (depth == max_tree_depth).
    bucket: Vec<PointId>,
    children: [Option<Box<Node>>; 4],
}

impl Node {
    fn leaf(bbox: Rectangle, bucket: Vec<PointId>) -> Self {
        Self {
            bbox,
            bucket,
            children: [None, None, None, None],
        }
    }

    fn internal(bbox: Rectangle, children: [Option<Box<Node>>; 4]) -> Self {
        Self {
            bbox,
            bucket: Vec::new(),
            children,
        }
    }

    fn collect(&self, points: &PointSet, center: PointId, query: &Rectangle, out: &mut Vec<PointId>) {
        if !self.bbox.intersects(query) {
            return;
        }
        if self.children.iter().all(Option::is_none) {
            for &id in &self.bucket {
                if id == center {
                    continue;
                }
                let (x, y) = points.coords(id);
                if query.contains(x, y) {
                    out.push(id);
                }
            }
        } else {
            for child in self.children.iter().flatten() {
                child.collect(points, center, query, out);
            }
        }
    }
}

/// quadrant -> (x-half, y-half), matching `primitives::QUADRANT_*` and the
/// bit order `morton::interleave_coordinates` produces (x before y).
fn quadrant_halves(quadrant: u8) -> (u8, u8) {
    match quadrant {
        QUADRANT_NW => (0, 0),
        QUADRANT_SW => (0, 1),
        QUADRANT_NE => (1, 0),
        QUADRANT_SE => (1, 1),
        _ => unreachable!("quadrant codes are 2 bits"),
    }
}

fn child_bbox(parent: &Rectangle, quadrant: u8) -> Rectangle {
    let (xbit, ybit) = quadrant_halves(quadrant);
    let half_w = parent.width / 2.0;
    let half_h = parent.height / 2.0;
    Rectangle::new(
        parent.x + xbit as f64 * half_w,
        parent.y + ybit as f64 * half_h,
        half_w,
        half_h,
    )
}

fn build_node(ids: &[PointId], keys: &[MortonKey], depth: u32, max_tree_depth: u32, bbox: Rectangle) -> Node {
    if depth == max_tree_depth || ids.len() <= 1 {
        return Node::leaf(bbox, ids.to_vec());
    }
    let shift = 2 * (max_tree_depth - depth - 1);
    let code_at = |k: MortonKey| -> u8 { ((k >> shift) & 0b11) as u8 };

    let b0 = keys.partition_point(|&k| code_at(k) < 1);
    let b1 = b0 + keys[b0..].partition_point(|&k| code_at(k) < 2);
    let b2 = b1 + keys[b1..].partition_point(|&k| code_at(k) < 3);
    let b3 = keys.len();
    let bounds = [(0, b0), (b0, b1), (b1, b2), (b2, b3)];

    let mut children: [Option<Box<Node>>; 4] = [None, None, None, None];
    for (quadrant, &(start, end)) in bounds.iter().enumerate() {
        if start == end {
            continue;
        }
        let child = build_node(
            &ids[start..end],
            &keys[start..end],
            depth + 1,
            max_tree_depth,
            child_bbox(&bbox, quadrant as u8),
        );
        children[quadrant] = Some(Box::new(child));
    }
    Node::internal(bbox, children)
}

/// A fixed-depth point quadtree supporting radius-bounded neighbor queries.
pub struct PointIndex {
    root: Node,
    max_tree_depth: u32,
}

impl PointIndex {
    /// Builds an index over every point in `points`, within `domain`, to
    /// `max_tree_depth` levels.
    ///
    /// # Errors
    ///
    /// Returns [`KOptError::CoordinateOutOfDomain`] if any point's
    /// normalized coordinate falls outside `[0, 1]`.
    pub fn build(points: &PointSet, domain: &Domain, max_tree_depth: u32) -> Result<Self, KOptError> {
        let n = points.len();
        let mut ids: Vec<PointId> = (0..n).collect();
        let mut keys: Vec<MortonKey> = Vec::with_capacity(n);
        for p in 0..n {
            let (x, y) = points.coords(p);
            let (nx, ny) = domain.normalize(p, x, y)?;
            keys.push(interleave_coordinates(nx, ny, max_tree_depth));
        }
        ids.sort_by_key(|&id| keys[id]);
        let sorted_keys: Vec<MortonKey> = ids.iter().map(|&id| keys[id]).collect();

        let root = build_node(&ids, &sorted_keys, 0, max_tree_depth, domain.bounding_rectangle());
        Ok(Self { root, max_tree_depth })
    }

    pub fn max_tree_depth(&self) -> u32 {
        self.max_tree_depth
    }

    /// Returns every point id whose coordinates lie within `query`,
    /// excluding `center`.
    pub fn get_points(&self, center: PointId, query: &Rectangle, points: &PointSet) -> Vec<PointId> {
        let mut out = Vec::new();
        self.root.collect(points, center, query, &mut out);
        out
    }
}
