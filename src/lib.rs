pub mod exceptions;
pub mod feasibility;
pub mod fileio;
pub mod finder;
pub mod geometry;
pub mod kmargin;
pub mod kmove;
pub mod lateral;
#[cfg(feature = "setup_tracing")]
mod logging;
pub mod morton;
pub mod primitives;
pub mod quadtree;
pub mod random_finder;
pub mod settings;
pub mod tour;
