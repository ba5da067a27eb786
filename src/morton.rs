//! Morton keys: bit-interleaved integer representations of normalized 2D
//! coordinates, used to bucket points into the spatial index in a single
//! sort pass.

use crate::primitives::{MortonKey, Quadrant};
use smallvec::SmallVec;

/// Interleaves two coordinates already normalized to `[0, 1]` into a single
/// Morton key, most significant bit first.
///
/// If `c1` and `c2` are x and y respectively, the resulting curve looks like
/// an "N" in typical coordinate space (+y is up, +x is right).
pub fn interleave_coordinates(normalized_c1: f64, normalized_c2: f64, max_tree_depth: u32) -> MortonKey {
    let integer_coordinate_max: u32 = 1u32 << (max_tree_depth - 1);
    let c1 = (integer_coordinate_max as f64 * normalized_c1) as u32;
    let c2 = (integer_coordinate_max as f64 * normalized_c2) as u32;

    let bits = 32;
    let mut key: MortonKey = 0;
    for i in (0..bits).rev() {
        key |= ((c1 >> i) & 1) as MortonKey;
        key <<= 1;
        key |= ((c2 >> i) & 1) as MortonKey;
        if i != 0 {
            key <<= 1;
        }
    }
    key
}

/// The sequence of 2-bit quadrant selectors describing the path from the
/// root to the deepest node a key's point belongs in. Has `max_tree_depth -
/// 1` entries: the number of steps needed to reach `max_tree_depth` from the
/// root.
pub type InsertionPath = SmallVec<[Quadrant; 20]>;

/// Extracts the per-level quadrant path encoded in a Morton key.
pub fn point_insertion_path(key: MortonKey, max_tree_depth: u32) -> InsertionPath {
    let mut path = InsertionPath::with_capacity((max_tree_depth - 1) as usize);
    for i in 1..max_tree_depth {
        let shift_bits = 2 * (max_tree_depth - i - 1);
        let quadrant = ((key >> shift_bits) & 0b11) as Quadrant;
        path.push(quadrant);
    }
    path
}
