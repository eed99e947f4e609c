//! Internal memory management: budgeted allocation and the token arena.
//!
//! Every internal allocation a counter makes (the slot array, arena
//! blocks, and the optional heap scan buffer) is routed through
//! [`budget::BudgetAlloc`] so byte limits and static-region mode are
//! enforced in exactly one place. Snapshot vectors returned to the caller
//! are the deliberate exception: their lifetime is under the caller's
//! control, so they come from the global allocator and are never counted.
//!
//! # Unsafe code
//!
//! This module contains the crate's raw-pointer plumbing. The unsafe
//! blocks are sound because:
//! - Heap allocations are created and released with matching
//!   `Layout { size, ALIGN }` pairs.
//! - Static-region carving stays inside `[base, base + size)`; the bounds
//!   and alignment arithmetic is overflow-checked before any pointer math.
//! - Arena blocks are never freed individually and never moved, so key
//!   pointers handed to the index stay valid for the counter's lifetime.
//! - All unsafe blocks carry explicit safety comments.

#[allow(unsafe_code)]
pub(crate) mod arena;

#[allow(unsafe_code)]
pub(crate) mod budget;
