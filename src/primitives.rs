//! Core type aliases shared across the crate.

/// A dense integer index into the point arrays, in `[0, N)`.
pub type PointId = usize;

/// An integer edge length (TSPLIB `EUC_2D` convention).
pub type Length = i64;

/// A real-valued coordinate component.
pub type Space = f64;

/// A bit-interleaved Morton key.
pub type MortonKey = u64;

/// A 2-bit quadrant selector at one tree level: `{NW, NE, SW, SE}`.
pub type Quadrant = u8;

// Bit 1 (the high bit) is the x-half (0 = west, 1 = east); bit 0 is the
// y-half (0 = north, 1 = south), matching the interleave order used by
// `morton::interleave_coordinates` (x before y).
pub const QUADRANT_NW: Quadrant = 0b00;
pub const QUADRANT_SW: Quadrant = 0b01;
pub const QUADRANT_NE: Quadrant = 0b10;
pub const QUADRANT_SE: Quadrant = 0b11;
