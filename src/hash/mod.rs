//! Hash function used by the token index.
//!
//! TallyCraft pins its wire model to 32-bit FNV-1a: stored hashes are
//! reproducible across platforms and pointer widths, which keeps counter
//! behavior (probe sequences, growth points, static-mode failure points)
//! identical everywhere. See [`fnv`] for the algorithm and the seeding
//! scheme.

pub mod fnv;

pub use fnv::{fnv1a, fnv1a_step, seeded_basis, FNV_OFFSET_BASIS, FNV_PRIME};
