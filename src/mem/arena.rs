//! Bump-allocating string arena for token storage.
//!
//! The arena owns a chain of blocks carved from the budgeted allocator.
//! Each block is `{ next, cur, end }` followed by its payload; keys are
//! bump-allocated from the tail block with a trailing NUL byte (free,
//! because blocks arrive zero-initialized and are never reused).
//!
//! There is no per-key free, no reuse, and no compaction: a stored key is
//! pinned to its block for the arena's lifetime. That pinning is what lets
//! the index, snapshots, and cursors hold borrowed key pointers safely.
//!
//! In static mode the chain is exactly one block; exhausting it reports
//! `OutOfMemory` instead of chaining a second block.

use crate::error::{Result, TallyCraftError};
use crate::mem::budget::{BudgetAlloc, ALIGN};
use std::mem::size_of;
use std::ptr::{self, NonNull};

/// Intrusive block header; the payload follows at [`BLOCK_HEADER`] bytes.
#[repr(C)]
struct Block {
    next: *mut Block,
    cur: *mut u8,
    end: *mut u8,
}

/// Header size rounded up to [`ALIGN`] so the payload starts aligned on
/// every target, including those where three pointers are not a multiple
/// of the allocation alignment.
const BLOCK_HEADER: usize = (size_of::<Block>() + ALIGN - 1) / ALIGN * ALIGN;

const _: () = assert!(BLOCK_HEADER % ALIGN == 0);

/// Allocator request size for a block with `payload` bytes of capacity.
///
/// Exposed so construction can replay the exact arena allocation during
/// the static-mode dry run.
pub(crate) fn block_alloc_size(payload: usize) -> Option<usize> {
    BLOCK_HEADER.checked_add(payload)
}

/// Chain of bump-allocation blocks.
pub(crate) struct Arena {
    head: *mut Block,
    tail: *mut Block,
    block_size: usize,
}

impl Arena {
    /// An arena with no blocks; dropping it is a no-op until
    /// [`Arena::init`] succeeds.
    pub(crate) const fn unset() -> Self {
        Self {
            head: ptr::null_mut(),
            tail: ptr::null_mut(),
            block_size: 0,
        }
    }

    /// Allocate the first block of `block_size` payload bytes.
    pub(crate) fn init(&mut self, alloc: &mut BudgetAlloc<'_>, block_size: usize) -> Result<()> {
        self.block_size = block_size;
        let block = Self::new_block(alloc, block_size)?;
        self.head = block.as_ptr();
        self.tail = block.as_ptr();
        Ok(())
    }

    fn new_block(alloc: &mut BudgetAlloc<'_>, payload: usize) -> Result<NonNull<Block>> {
        let total =
            block_alloc_size(payload).ok_or(TallyCraftError::out_of_memory(payload))?;
        let raw = alloc.allocate(total)?;
        let block = raw.cast::<Block>();
        // Safety: raw is a fresh ALIGN-aligned allocation of
        // BLOCK_HEADER + payload bytes; the header fits in front and the
        // payload range [BLOCK_HEADER, BLOCK_HEADER + payload) behind it.
        unsafe {
            let payload_start = raw.as_ptr().add(BLOCK_HEADER);
            block.as_ptr().write(Block {
                next: ptr::null_mut(),
                cur: payload_start,
                end: payload_start.add(payload),
            });
        }
        Ok(block)
    }

    /// Store a NUL-terminated copy of `bytes`, returning its address.
    ///
    /// The stored region is `bytes.len() + 1` bytes, ALIGN-aligned, with
    /// the terminator supplied by the block's zero initialization. The
    /// returned pointer stays valid until [`Arena::release_all`].
    pub(crate) fn copy_key(
        &mut self,
        alloc: &mut BudgetAlloc<'_>,
        bytes: &[u8],
    ) -> Result<NonNull<u8>> {
        let size = bytes
            .len()
            .checked_add(1)
            .ok_or(TallyCraftError::out_of_memory(usize::MAX))?;

        debug_assert!(!self.tail.is_null(), "arena used before init");

        // Safety: tail points at a live block; cur and end were derived
        // from its own payload range, so the offset arithmetic is in
        // bounds and non-negative.
        unsafe {
            let tail = self.tail;
            let payload_start = tail.cast::<u8>().add(BLOCK_HEADER);
            let offset = (*tail).cur.offset_from(payload_start) as usize;
            let pad = (ALIGN - offset % ALIGN) % ALIGN;
            let avail = (*tail).end.offset_from((*tail).cur) as usize;
            if avail >= pad && avail - pad >= size {
                let dst = (*tail).cur.add(pad);
                (*tail).cur = dst.add(size);
                ptr::copy_nonoverlapping(bytes.as_ptr(), dst, bytes.len());
                return Ok(NonNull::new_unchecked(dst));
            }
        }

        // Static mode: the arena is fixed to its first block.
        if alloc.is_static() {
            return Err(TallyCraftError::out_of_memory(size));
        }

        let need = size
            .checked_add(ALIGN)
            .ok_or(TallyCraftError::out_of_memory(size))?;
        let payload = need.max(self.block_size);
        let block = Self::new_block(alloc, payload)?;

        // Safety: block is freshly initialized with cur at its aligned
        // payload start and room for at least `size` bytes; tail is live.
        unsafe {
            (*self.tail).next = block.as_ptr();
            self.tail = block.as_ptr();
            let dst = (*block.as_ptr()).cur;
            (*block.as_ptr()).cur = dst.add(size);
            ptr::copy_nonoverlapping(bytes.as_ptr(), dst, bytes.len());
            Ok(NonNull::new_unchecked(dst))
        }
    }

    /// Release every block back to the allocator and empty the chain.
    ///
    /// All key pointers previously returned by [`Arena::copy_key`] are
    /// invalid afterwards.
    pub(crate) fn release_all(&mut self, alloc: &mut BudgetAlloc<'_>) {
        let mut block = self.head;
        while !block.is_null() {
            // Safety: block came from new_block and has not been released
            // yet; next is read before the backing memory is freed.
            unsafe {
                let next = (*block).next;
                let payload_start = block.cast::<u8>().add(BLOCK_HEADER);
                let payload = (*block).end.offset_from(payload_start) as usize;
                if let Some(raw) = NonNull::new(block.cast::<u8>()) {
                    alloc.release(raw, BLOCK_HEADER + payload);
                }
                block = next;
            }
        }
        self.head = ptr::null_mut();
        self.tail = ptr::null_mut();
    }
}
