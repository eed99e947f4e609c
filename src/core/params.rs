//! Compile-time limits, platform defaults, and parameter tuning.
//!
//! Construction derives two sizes from the caller's configuration: the
//! initial hash-index capacity and the first arena block size. The
//! heuristic mirrors the crate's memory split:
//!
//! - With a budget available (byte limit, static region, or the smaller
//!   of the two when both are set), the slot array may cost at most
//!   **half** the budget and the first arena block at most a **quarter**
//!   of the remaining half.
//! - Capacity is floored at [`MIN_INITIAL_CAPACITY`] and rounded up to a
//!   power of two (the index masks hashes instead of dividing).
//! - The block size is floored at [`MIN_BLOCK_SIZE`] and then at
//!   `max_token_len + 1`, so a single full-length token plus its NUL is
//!   always storable.
//!
//! The defaults scale with the address width: small tables on 16-bit
//! targets, comfortable ones on 64-bit hosts.

use crate::core::index::Slot;
use crate::mem::budget::ALIGN;
use std::mem::size_of;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Compile-time ceiling for `max_token_len`.
///
/// Also the size of the per-call stack scan buffer in the default
/// (stack-buffer) build.
pub const MAX_TOKEN_LEN: usize = 1024;

/// Lower clamp for `max_token_len`.
pub const MIN_TOKEN_LEN: usize = 4;

/// `max_token_len` used when a caller passes 0.
pub const DEFAULT_TOKEN_LEN: usize = 64;

/// Lower bound for the initial hash-index capacity.
pub const MIN_INITIAL_CAPACITY: usize = 16;

/// Lower bound for the first arena block's payload size.
pub const MIN_BLOCK_SIZE: usize = 256;

/// Required alignment for the base of a caller-supplied static region.
///
/// The strictest alignment among pointers, native sizes, and the widest
/// integer the counter stores internally. Regions whose base is not on
/// this boundary are rejected at construction.
pub const REGION_ALIGN: usize = ALIGN;

/// Default initial capacity, scaled to the address width.
#[cfg(target_pointer_width = "16")]
pub const DEFAULT_INITIAL_CAPACITY: usize = 128;
/// Default initial capacity, scaled to the address width.
#[cfg(target_pointer_width = "32")]
pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;
/// Default initial capacity, scaled to the address width.
#[cfg(target_pointer_width = "64")]
pub const DEFAULT_INITIAL_CAPACITY: usize = 4096;

/// Default first-block payload size, scaled to the address width.
#[cfg(target_pointer_width = "16")]
pub const DEFAULT_BLOCK_SIZE: usize = 1024;
/// Default first-block payload size, scaled to the address width.
#[cfg(target_pointer_width = "32")]
pub const DEFAULT_BLOCK_SIZE: usize = 16_384;
/// Default first-block payload size, scaled to the address width.
#[cfg(target_pointer_width = "64")]
pub const DEFAULT_BLOCK_SIZE: usize = 65_536;

const _: () = assert!(MAX_TOKEN_LEN >= MIN_TOKEN_LEN);
const _: () = assert!(DEFAULT_TOKEN_LEN >= MIN_TOKEN_LEN && DEFAULT_TOKEN_LEN <= MAX_TOKEN_LEN);
const _: () = assert!(MIN_INITIAL_CAPACITY.is_power_of_two());
const _: () = assert!(DEFAULT_INITIAL_CAPACITY >= MIN_INITIAL_CAPACITY);
const _: () = assert!(DEFAULT_BLOCK_SIZE >= MIN_BLOCK_SIZE);

/// Numeric crate version: `major * 1_000_000 + minor * 1_000 + patch`.
pub const VERSION_NUMBER: u64 = 1_000;

/// Semantic version of the crate.
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Immutable description of the compile-time configuration.
///
/// There is exactly one [`BuildInfo`] per process, returned by
/// [`build_info`]; it is read-only and therefore freely shareable across
/// threads.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct BuildInfo {
    /// Numeric crate version (see [`VERSION_NUMBER`]).
    pub version_number: u64,
    /// Compile-time ceiling for `max_token_len`.
    pub max_token_ceiling: usize,
    /// Lower bound for the initial hash-index capacity.
    pub min_initial_capacity: usize,
    /// Lower bound for the first arena block size.
    pub min_block_size: usize,
    /// Whether `scan` uses a per-call stack buffer (`true`, the default)
    /// or a per-counter, budget-counted buffer (`heap-scan-buffer`
    /// feature).
    pub stack_scan_buffer: bool,
}

static BUILD_INFO: BuildInfo = BuildInfo {
    version_number: VERSION_NUMBER,
    max_token_ceiling: MAX_TOKEN_LEN,
    min_initial_capacity: MIN_INITIAL_CAPACITY,
    min_block_size: MIN_BLOCK_SIZE,
    stack_scan_buffer: cfg!(not(feature = "heap-scan-buffer")),
};

/// The process-wide compile-time configuration.
#[must_use]
pub fn build_info() -> &'static BuildInfo {
    &BUILD_INFO
}

/// Clamp a requested token length into `[MIN_TOKEN_LEN, MAX_TOKEN_LEN]`,
/// with 0 selecting [`DEFAULT_TOKEN_LEN`].
pub(crate) fn clamp_token_len(requested: usize) -> usize {
    let len = if requested == 0 { DEFAULT_TOKEN_LEN } else { requested };
    len.clamp(MIN_TOKEN_LEN, MAX_TOKEN_LEN)
}

/// Overall memory budget inferred from the configuration: the smaller of
/// the byte limit and the static region when both constrain allocations,
/// otherwise whichever is set, otherwise 0 (unconstrained).
pub(crate) fn effective_budget(byte_budget: usize, region_size: usize) -> usize {
    match (byte_budget, region_size) {
        (0, 0) => 0,
        (budget, 0) => budget,
        (0, size) => size,
        (budget, size) => budget.min(size),
    }
}

/// Largest power of two `<= x` (x must be at least 1).
fn floor_power_of_two(x: usize) -> usize {
    debug_assert!(x >= 1);
    let mut p = 1usize;
    while p <= x / 2 {
        p <<= 1;
    }
    p
}

/// Smallest power of two `>= x`, saturating at the top bit.
fn ceil_power_of_two(x: usize) -> usize {
    let mut p = 1usize;
    while p < x && p <= usize::MAX / 2 {
        p <<= 1;
    }
    p
}

/// Derive the initial index capacity and first block size.
///
/// Zero-valued caller inputs select the platform defaults. The returned
/// capacity is always a power of two `>=` [`MIN_INITIAL_CAPACITY`]; the
/// returned block size is always `>=` both [`MIN_BLOCK_SIZE`] and
/// `max_token_len + 1`.
pub(crate) fn tune(
    initial_capacity: usize,
    block_size: usize,
    byte_budget: usize,
    region_size: usize,
    max_token_len: usize,
) -> (usize, usize) {
    let slot_size = size_of::<Slot>();

    let mut capacity = if initial_capacity != 0 {
        initial_capacity
    } else {
        DEFAULT_INITIAL_CAPACITY
    };
    let mut block = if block_size != 0 { block_size } else { DEFAULT_BLOCK_SIZE };

    let budget = effective_budget(byte_budget, region_size);
    if budget != 0 {
        let table_budget = budget / 2;

        // Trim the slot array to at most half the budget. An overflowing
        // request is left alone; the allocation itself will reject it.
        if let Some(cost) = capacity.checked_mul(slot_size) {
            if cost > table_budget && table_budget > 0 {
                let max_capacity = (table_budget / slot_size).max(MIN_INITIAL_CAPACITY);
                capacity = floor_power_of_two(max_capacity);
            }
        }

        let arena_budget = budget - table_budget;
        let block_cap = arena_budget / 4;
        if block_cap > 0 && block > block_cap {
            block = block_cap;
        }
    }

    capacity = ceil_power_of_two(capacity.max(MIN_INITIAL_CAPACITY));
    block = block.max(MIN_BLOCK_SIZE).max(max_token_len + 1);
    (capacity, block)
}
