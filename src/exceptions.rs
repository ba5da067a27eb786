//! ## Custom Errors for kopt-tsp
//!
//! This module defines the error types used internally and returned across
//! the public API. Every variant carries the structured data needed to
//! reproduce its message; nothing here is a generic string.

use std::error::Error;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors produced while configuring, building, or driving a search.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug)]
pub enum KOptError {
    /// `kmax` was configured below the minimum usable depth of 2.
    InvalidKMax {
        /// The value that was requested.
        requested: usize,
    },
    /// `max_tree_depth` was configured below the minimum usable depth of 2.
    InvalidTreeDepth {
        /// The value that was requested.
        requested: u32,
    },
    /// A normalized coordinate fell outside `[0, 1]` while building the index.
    CoordinateOutOfDomain {
        /// The point whose coordinate failed to normalize.
        point: usize,
        /// The out-of-range normalized value.
        normalized: f64,
    },
    /// A TSPLIB input file was missing or malformed in its header.
    MalformedHeader {
        /// What the reader expected to find.
        expected: &'static str,
    },
    /// A TSPLIB coordinate file's point id did not match the expected sequence.
    MismatchedPointId {
        /// The 1-based id that was read.
        found: usize,
        /// The 1-based id that was expected next.
        expected: usize,
    },
    /// The tour or a partial move violated one of its structural invariants.
    InvariantViolation {
        /// Which invariant failed, for diagnostics.
        invariant: &'static str,
    },
    /// Wraps an I/O failure encountered while reading or writing a file.
    Io {
        /// A short description of what was being done when the I/O failed.
        context: &'static str,
        /// The underlying message from the OS/filesystem.
        message: String,
    },
}

impl fmt::Display for KOptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KOptError::InvalidKMax { requested } => {
                write!(f, "invalid kmax: {requested}. kmax must be at least 2")
            }
            KOptError::InvalidTreeDepth { requested } => {
                write!(
                    f,
                    "invalid max_tree_depth: {requested}. max_tree_depth must be at least 2"
                )
            }
            KOptError::CoordinateOutOfDomain { point, normalized } => {
                write!(
                    f,
                    "point {point} normalized to {normalized}, outside the domain [0, 1]"
                )
            }
            KOptError::MalformedHeader { expected } => {
                write!(f, "malformed header: expected {expected}")
            }
            KOptError::MismatchedPointId { found, expected } => {
                write!(f, "mismatched point id: found {found}, expected {expected}")
            }
            KOptError::InvariantViolation { invariant } => {
                write!(f, "invariant violation: {invariant}")
            }
            KOptError::Io { context, message } => {
                write!(f, "I/O error while {context}: {message}")
            }
        }
    }
}

impl Error for KOptError {}
