//! Core data structures: the counter object, its hash index, parameter
//! tuning, and result enumeration.

/// Compile-time limits, platform defaults, and parameter tuning.
pub mod params;

pub(crate) mod counter;
mod index;
mod snapshot;

pub use counter::WordTally;
pub use snapshot::{TallyEntry, TallyIter};
