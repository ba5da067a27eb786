//! Search configuration shared by the library and the driver binary.

use crate::exceptions::KOptError;

/// Minimum usable `kmax`: a 2-opt move is the smallest non-trivial k-opt.
pub const MIN_KMAX: usize = 2;

/// Minimum usable quadtree depth.
pub const MIN_TREE_DEPTH: u32 = 2;

/// Default maximum move depth.
pub const DEFAULT_KMAX: usize = 5;

/// Default quadtree depth; keys fit comfortably in a `u64` at this depth.
pub const DEFAULT_MAX_TREE_DEPTH: u32 = 16;

/// Validated configuration for a search session.
///
/// Constructed via [`Settings::new`], which rejects values the Finder and
/// spatial index cannot operate on rather than panicking deep inside a
/// recursive call.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    kmax: usize,
    max_tree_depth: u32,
    iteration_budget: Option<usize>,
    rng_seed: Option<u64>,
}

impl Settings {
    /// Builds a validated [`Settings`].
    ///
    /// # Errors
    ///
    /// Returns [`KOptError::InvalidKMax`] if `kmax < 2`, or
    /// [`KOptError::InvalidTreeDepth`] if `max_tree_depth < 2`.
    pub fn new(
        kmax: usize,
        max_tree_depth: u32,
        iteration_budget: Option<usize>,
        rng_seed: Option<u64>,
    ) -> Result<Self, KOptError> {
        if kmax < MIN_KMAX {
            return Err(KOptError::InvalidKMax { requested: kmax });
        }
        if max_tree_depth < MIN_TREE_DEPTH {
            return Err(KOptError::InvalidTreeDepth {
                requested: max_tree_depth,
            });
        }
        Ok(Self {
            kmax,
            max_tree_depth,
            iteration_budget,
            rng_seed,
        })
    }

    /// The configured maximum move depth.
    pub fn kmax(&self) -> usize {
        self.kmax
    }

    /// The configured quadtree depth.
    pub fn max_tree_depth(&self) -> u32 {
        self.max_tree_depth
    }

    /// The cap, if any, on the number of `find_best` calls the driver makes.
    pub fn iteration_budget(&self) -> Option<usize> {
        self.iteration_budget
    }

    /// The RNG seed consulted by the randomized hill-climb variant.
    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            kmax: DEFAULT_KMAX,
            max_tree_depth: DEFAULT_MAX_TREE_DEPTH,
            iteration_budget: None,
            rng_seed: None,
        }
    }
}
