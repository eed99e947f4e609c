//! Open-addressed hash index mapping tokens to occurrence counts.
//!
//! The index is a power-of-two slot array probed linearly from
//! `hash & (capacity - 1)`. A slot is vacant while its key pointer is
//! null, which is why a zero-initialized allocation is a valid empty
//! table. Keys live in the arena; the index stores borrowed pointers plus
//! the key length and the full 32-bit hash.
//!
//! A probe matches only when the stored hash, the stored **length**, and
//! the bytes all agree. The length check runs before the byte comparison:
//! FNV-1a collisions between keys of different lengths occur in practice,
//! and comparing `key_len` bytes against a shorter stored key would read
//! past its terminator.
//!
//! Growth doubles the capacity once the load factor reaches 0.7, building
//! the new array completely before swapping it in, so a failed grow leaves
//! the table untouched. Static-mode counters never grow; reaching the
//! threshold there reports `OutOfMemory`.

use crate::error::{Result, TallyCraftError};
use crate::mem::arena::Arena;
use crate::mem::budget::{BudgetAlloc, ALIGN};
use std::mem::{align_of, size_of};
use std::ptr::{self, NonNull};
use std::slice;

/// One index slot. Vacant while `key` is null; all-zero bytes are a valid
/// vacant slot, so freshly zeroed tables need no further initialization.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub(crate) struct Slot {
    /// Borrowed pointer into the arena; null marks a vacant slot.
    key: *const u8,
    /// Stored key length in bytes (the arena adds a terminating NUL).
    key_len: usize,
    /// Occurrence count for this token.
    count: usize,
    /// Full 32-bit hash of the stored key, kept for cheap probe rejection
    /// and rehash-free growth.
    hash: u32,
}

// Slot arrays are placed in allocator memory, which is ALIGN-aligned.
const _: () = assert!(ALIGN % align_of::<Slot>() == 0);

impl Slot {
    pub(crate) fn is_occupied(&self) -> bool {
        !self.key.is_null()
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    /// Borrow the stored key bytes.
    ///
    /// # Safety
    ///
    /// The slot must be occupied, and the arena that owns the key must be
    /// live for `'a`. Callers bind `'a` to a borrow of the owning counter.
    pub(crate) unsafe fn key_bytes<'a>(&self) -> &'a [u8] {
        debug_assert!(self.is_occupied());
        slice::from_raw_parts(self.key, self.key_len)
    }
}

/// Probe outcome: where a key lives, where it would go, or nowhere.
enum Probe {
    /// The key is already stored at this slot index.
    Occupied(usize),
    /// The key is absent; this vacant slot is the insertion point.
    Vacant(usize),
    /// Every slot is occupied by other keys (static-mode pathology).
    Saturated,
}

/// The slot array plus its occupancy counters.
pub(crate) struct Index {
    slots: *mut Slot,
    capacity: usize,
    unique: usize,
    total: usize,
}

impl Index {
    /// An index with no slot array; dropping it before [`Index::init`]
    /// succeeds is a no-op.
    pub(crate) const fn unset() -> Self {
        Self {
            slots: ptr::null_mut(),
            capacity: 0,
            unique: 0,
            total: 0,
        }
    }

    /// Allocator request size for a slot array of `capacity` entries.
    ///
    /// Exposed so construction can replay the allocation during the
    /// static-mode dry run.
    pub(crate) fn table_bytes(capacity: usize) -> Option<usize> {
        capacity.checked_mul(size_of::<Slot>())
    }

    /// Allocate the initial slot array. `capacity` must be a power of two.
    pub(crate) fn init(&mut self, alloc: &mut BudgetAlloc<'_>, capacity: usize) -> Result<()> {
        debug_assert!(capacity.is_power_of_two());
        let bytes =
            Self::table_bytes(capacity).ok_or(TallyCraftError::out_of_memory(capacity))?;
        let raw = alloc.allocate(bytes)?;
        self.slots = raw.cast::<Slot>().as_ptr();
        self.capacity = capacity;
        Ok(())
    }

    /// Release the slot array back to the allocator.
    pub(crate) fn release(&mut self, alloc: &mut BudgetAlloc<'_>) {
        if let Some(raw) = NonNull::new(self.slots.cast::<u8>()) {
            // capacity was validated by init; the product cannot overflow.
            if let Some(bytes) = Self::table_bytes(self.capacity) {
                alloc.release(raw, bytes);
            }
        }
        self.slots = ptr::null_mut();
        self.capacity = 0;
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn unique(&self) -> usize {
        self.unique
    }

    pub(crate) fn total(&self) -> usize {
        self.total
    }

    /// The slot array as a slice (empty before init).
    pub(crate) fn slots(&self) -> &[Slot] {
        if self.slots.is_null() {
            return &[];
        }
        // Safety: slots points at a live allocation of exactly
        // `capacity` slots owned by this index.
        unsafe { slice::from_raw_parts(self.slots, self.capacity) }
    }

    fn probe(&self, key: &[u8], hash: u32) -> Probe {
        let mask = self.capacity - 1;
        let mut idx = (hash as usize) & mask;
        let start = idx;
        loop {
            // Safety: idx is masked into [0, capacity).
            let slot = unsafe { &*self.slots.add(idx) };
            if !slot.is_occupied() {
                return Probe::Vacant(idx);
            }
            // Length before bytes: colliding hashes across different
            // lengths must not trigger an over-long comparison.
            if slot.hash == hash && slot.key_len == key.len() {
                // Safety: the slot is occupied and its arena is live.
                if unsafe { slot.key_bytes() } == key {
                    return Probe::Occupied(idx);
                }
            }
            idx = (idx + 1) & mask;
            if idx == start {
                return Probe::Saturated;
            }
        }
    }

    /// Record one occurrence of `key` (with its precomputed hash).
    ///
    /// First occurrences copy the key into the arena; repeats only bump
    /// the slot count. On any failure the table, counters, and arena are
    /// exactly as they were before the call.
    pub(crate) fn insert(
        &mut self,
        alloc: &mut BudgetAlloc<'_>,
        arena: &mut Arena,
        key: &[u8],
        hash: u32,
    ) -> Result<()> {
        debug_assert!(!key.is_empty());

        // Grow once the load factor reaches 0.7. Static-mode counters
        // cannot grow; hitting the threshold there is an OutOfMemory.
        if self.unique * 10 >= self.capacity * 7 {
            if alloc.is_static() {
                return Err(TallyCraftError::out_of_memory(self.capacity));
            }
            self.grow(alloc)?;
        }

        match self.probe(key, hash) {
            Probe::Occupied(idx) => {
                // Safety: idx came from probe, in bounds.
                let slot = unsafe { &mut *self.slots.add(idx) };
                slot.count += 1;
                self.total += 1;
                Ok(())
            }
            Probe::Vacant(idx) => {
                let stored = arena.copy_key(alloc, key)?;
                // Safety: idx came from probe, in bounds.
                let slot = unsafe { &mut *self.slots.add(idx) };
                *slot = Slot {
                    key: stored.as_ptr(),
                    key_len: key.len(),
                    count: 1,
                    hash,
                };
                self.unique += 1;
                self.total += 1;
                Ok(())
            }
            Probe::Saturated => Err(TallyCraftError::out_of_memory(key.len())),
        }
    }

    /// Double the capacity, re-probing every occupied slot into a fresh
    /// array. All-or-nothing: the old array is released only after the
    /// new one is fully built and swapped in.
    fn grow(&mut self, alloc: &mut BudgetAlloc<'_>) -> Result<()> {
        let new_capacity = self
            .capacity
            .checked_mul(2)
            .ok_or(TallyCraftError::out_of_memory(self.capacity))?;
        let new_bytes = Self::table_bytes(new_capacity)
            .ok_or(TallyCraftError::out_of_memory(new_capacity))?;

        let raw = alloc.allocate(new_bytes)?;
        let new_slots = raw.cast::<Slot>().as_ptr();
        let mask = new_capacity - 1;

        for idx in 0..self.capacity {
            // Safety: idx < capacity; new positions are masked into the
            // new array, which has no duplicates to collide into beyond
            // linear probing.
            unsafe {
                let slot = *self.slots.add(idx);
                if !slot.is_occupied() {
                    continue;
                }
                let mut new_idx = (slot.hash as usize) & mask;
                while (*new_slots.add(new_idx)).is_occupied() {
                    new_idx = (new_idx + 1) & mask;
                }
                *new_slots.add(new_idx) = slot;
            }
        }

        let old_slots = self.slots;
        let old_capacity = self.capacity;
        self.slots = new_slots;
        self.capacity = new_capacity;

        if let Some(raw) = NonNull::new(old_slots.cast::<u8>()) {
            if let Some(bytes) = Self::table_bytes(old_capacity) {
                alloc.release(raw, bytes);
            }
        }
        Ok(())
    }
}
