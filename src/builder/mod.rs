//! Construction: configuration values and the counter builder.
//!
//! [`TallyConfig`] is the plain-data form of the tunables; every field
//! accepts 0 to mean "derive a default", so a zeroed (or `Default`)
//! config is always valid. [`WordTallyBuilder`] layers chainable setters
//! on top and is the only place a caller-supplied static region can be
//! attached, because the region is a borrow and belongs in the type, not
//! in serializable configuration.
//!
//! # Examples
//!
//! ## Budget-limited heap counter
//!
//! ```
//! use tallycraft::WordTally;
//!
//! let mut tally = WordTally::builder()
//!     .max_token_len(32)
//!     .byte_budget(64 * 1024)
//!     .build()
//!     .unwrap();
//!
//! tally.scan("fits comfortably in the budget").unwrap();
//! assert_eq!(tally.unique(), 5);
//! ```
//!
//! ## Allocator-free static region
//!
//! ```
//! use tallycraft::{WordTally, REGION_ALIGN};
//!
//! let mut backing = [0u8; 4096 + REGION_ALIGN];
//! let start = backing.as_ptr().align_offset(REGION_ALIGN);
//! let region = &mut backing[start..start + 4096];
//!
//! let mut tally = WordTally::builder().static_region(region).build().unwrap();
//! tally.scan("no heap involved").unwrap();
//! assert_eq!(tally.total(), 3);
//! ```

use crate::core::counter::WordTally;
use crate::error::Result;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Counter tunables; zero-valued fields select derived defaults.
///
/// See the crate-level documentation for how the capacity and block-size
/// defaults are derived from the budget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TallyConfig {
    /// Upper bound on internal allocations in bytes (0 = unlimited).
    ///
    /// Covers the slot array, arena blocks, and the optional heap scan
    /// buffer, but not the counter value itself or snapshot vectors.
    pub byte_budget: usize,
    /// Initial hash-index capacity (0 = platform default; rounded up to a
    /// power of two).
    pub initial_capacity: usize,
    /// First arena block payload size in bytes (0 = platform default).
    pub block_size: usize,
    /// Hash-basis perturbation (0 = plain FNV-1a basis). Not
    /// cryptographic; raises the bar for precomputed collision sets.
    pub hash_seed: u64,
}

/// Chainable builder for [`WordTally`].
///
/// Obtained from [`WordTally::builder`]. The lifetime parameter tracks
/// the optional static region; builders without one are `'static`.
#[derive(Debug)]
#[must_use = "builders do nothing unless built"]
pub struct WordTallyBuilder<'r> {
    max_token_len: usize,
    config: TallyConfig,
    region: Option<&'r mut [u8]>,
}

impl WordTallyBuilder<'static> {
    pub(crate) fn new() -> Self {
        Self {
            max_token_len: 0,
            config: TallyConfig::default(),
            region: None,
        }
    }
}

impl<'r> WordTallyBuilder<'r> {
    /// Maximum stored token length (0 = default; clamped into
    /// `[MIN_TOKEN_LEN, MAX_TOKEN_LEN]`).
    pub fn max_token_len(mut self, len: usize) -> Self {
        self.max_token_len = len;
        self
    }

    /// Upper bound on internal allocations in bytes (0 = unlimited).
    pub fn byte_budget(mut self, bytes: usize) -> Self {
        self.config.byte_budget = bytes;
        self
    }

    /// Initial hash-index capacity (0 = default; rounded up to a power of
    /// two).
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.config.initial_capacity = capacity;
        self
    }

    /// First arena block payload size (0 = default).
    pub fn block_size(mut self, bytes: usize) -> Self {
        self.config.block_size = bytes;
        self
    }

    /// Perturb the hash basis (0 = deterministic default).
    pub fn hash_seed(mut self, seed: u64) -> Self {
        self.config.hash_seed = seed;
        self
    }

    /// Replace the whole configuration at once.
    pub fn config(mut self, config: TallyConfig) -> Self {
        self.config = config;
        self
    }

    /// Carve every internal allocation from `region` instead of the heap.
    ///
    /// The region base must be aligned to
    /// [`REGION_ALIGN`](crate::REGION_ALIGN), and the region is borrowed
    /// exclusively for the counter's lifetime. An empty region selects
    /// heap mode.
    pub fn static_region<'b>(self, region: &'b mut [u8]) -> WordTallyBuilder<'b> {
        WordTallyBuilder {
            max_token_len: self.max_token_len,
            config: self.config,
            region: Some(region),
        }
    }

    /// Construct the counter.
    ///
    /// # Errors
    ///
    /// - [`InvalidArgument`](crate::TallyCraftError::InvalidArgument) for
    ///   a misaligned static region.
    /// - [`OutOfMemory`](crate::TallyCraftError::OutOfMemory) when the
    ///   initial structures do not fit the budget or region; for static
    ///   regions this is established up front by a dry run, so an
    ///   undersized region fails here rather than on the first insert.
    pub fn build(self) -> Result<WordTally<'r>> {
        WordTally::build_parts(self.max_token_len, &self.config, self.region)
    }
}

impl Default for WordTallyBuilder<'static> {
    fn default() -> Self {
        Self::new()
    }
}
