//! TallyCraft: bounded-memory word-frequency counting for Rust.
//!
//! TallyCraft ingests byte streams, extracts tokens under a strict
//! ASCII-letter model, and maintains per-token occurrence counts, all
//! under explicit memory discipline. It scales from server-side text
//! analytics down to allocator-free operation inside a caller-supplied
//! byte region.
//!
//! # Quick Start
//!
//! ```
//! use tallycraft::WordTally;
//!
//! let mut tally = WordTally::new(0).unwrap(); // 0 = default token length
//!
//! tally.scan("Hello World hello").unwrap();
//! assert_eq!(tally.total(), 3);
//! assert_eq!(tally.unique(), 2);
//!
//! // Sorted by count descending, then key ascending.
//! let top = tally.snapshot().unwrap();
//! assert_eq!(top[0].key, b"hello");
//! assert_eq!(top[0].count, 2);
//! ```
//!
//! # Tokens and Case
//!
//! A token is a maximal run of ASCII letters (`A–Z`, `a–z`); every other
//! byte separates, including digits, punctuation, whitespace, NUL, and
//! all non-ASCII bytes. The two ingestion paths treat case differently:
//!
//! - [`WordTally::scan`] extracts tokens from arbitrary text and folds
//!   them to lowercase: `"Hello"` and `"hello"` count together.
//! - [`WordTally::add`] records one caller-delimited key verbatim:
//!   `"Hello"` and `"hello"` stay distinct.
//!
//! Both truncate at the counter's `max_token_len`, so distinct words that
//! share the truncated prefix merge deliberately.
//!
//! # Memory Discipline
//!
//! Every internal allocation (the hash-index slot array, the string
//! arena that stores tokens, and, with the `heap-scan-buffer` feature,
//! the scan buffer) is routed through one budgeted allocator:
//!
//! - A **byte budget** caps total internal allocation; exceeding it turns
//!   inserts into recoverable
//!   [`OutOfMemory`](TallyCraftError::OutOfMemory) errors while the
//!   counter stays fully queryable.
//! - A **static region** replaces the heap entirely: all internal
//!   structures are bump-carved from a caller-supplied `&mut [u8]` whose
//!   base must be [`REGION_ALIGN`]-aligned. Construction performs a
//!   dry-run feasibility check, so an undersized region fails fast
//!   instead of on the first insert.
//!
//! ```
//! use tallycraft::{WordTally, REGION_ALIGN};
//!
//! let mut backing = [0u8; 4096 + REGION_ALIGN];
//! let start = backing.as_ptr().align_offset(REGION_ALIGN);
//! let region = &mut backing[start..start + 4096];
//!
//! let mut tally = WordTally::builder()
//!     .static_region(region)
//!     .build()
//!     .unwrap();
//!
//! tally.scan("counting without a heap").unwrap();
//! assert_eq!(tally.unique(), 4);
//! ```
//!
//! # Concurrency Model
//!
//! A counter is single-threaded: mutation takes `&mut self` and there is
//! no internal synchronization. Counters are `Send`, so distinct counters
//! can run on distinct threads with no coordination. Snapshots and
//! iterators borrow the counter, which statically enforces that it
//! outlives them.
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`TallyConfig`] and
//!   `Serialize` for [`BuildInfo`].
//! - `heap-scan-buffer`: replace the default per-call stack scan buffer
//!   with a per-counter buffer that is counted against the byte budget;
//!   intended for targets with tight stacks.
//!
//! # Unsafe Code Policy
//!
//! Unsafe code is confined to the internal memory modules (budgeted
//! allocator, arena, slot array) and the borrowed key views derived from
//! them. Every unsafe block carries a safety comment; the public API is
//! entirely safe.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::manual_range_contains)]

/// Construction: configuration values and the counter builder.
pub mod builder;

/// Core data structures and parameter tuning.
pub mod core;

/// Error types and result aliases.
pub mod error;

/// Hash function used by the token index.
pub mod hash;

mod mem;
mod scan;

// Re-export the working surface at the crate root.
pub use crate::builder::{TallyConfig, WordTallyBuilder};
pub use crate::core::params::{
    build_info, version, BuildInfo, DEFAULT_TOKEN_LEN, MAX_TOKEN_LEN, MIN_BLOCK_SIZE,
    MIN_INITIAL_CAPACITY, MIN_TOKEN_LEN, REGION_ALIGN, VERSION_NUMBER,
};
pub use crate::core::{TallyEntry, TallyIter, WordTally};
pub use crate::error::{Result, TallyCraftError};

/// Prelude module for convenient imports.
///
/// # Examples
///
/// ```
/// use tallycraft::prelude::*;
///
/// let mut tally = WordTally::new(0).unwrap();
/// tally.scan("words words words").unwrap();
/// assert_eq!(tally.total(), 3);
/// ```
pub mod prelude {
    pub use crate::builder::{TallyConfig, WordTallyBuilder};
    pub use crate::core::params::{build_info, version, BuildInfo};
    pub use crate::core::{TallyEntry, TallyIter, WordTally};
    pub use crate::error::{Result, TallyCraftError};
}
