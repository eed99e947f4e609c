//! Result enumeration: sorted snapshots and the streaming iterator.
//!
//! Both readers borrow the counter immutably, so the borrow checker
//! guarantees what the contract requires: the counter outlives every
//! entry, and no mutation happens while a snapshot or iterator is alive.
//!
//! A snapshot is a freshly allocated, caller-owned `Vec`, deliberately
//! *outside* the counter's byte budget, since its lifetime is under the
//! caller's control. The iterator allocates nothing at all.

use crate::core::counter::WordTally;
use crate::core::index::Slot;
use crate::error::{Result, TallyCraftError};

/// One `(key, count)` pair borrowed from a counter.
///
/// The key bytes live in the counter's arena: lowercase ASCII for tokens
/// stored by `scan`, verbatim bytes for keys stored by `add`. In storage
/// the key carries a trailing NUL, which is not part of `key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TallyEntry<'t> {
    /// Borrowed key bytes (without the storage terminator).
    pub key: &'t [u8],
    /// Number of recorded occurrences.
    pub count: usize,
}

impl<'t> TallyEntry<'t> {
    /// The key as UTF-8, when it is valid UTF-8.
    ///
    /// Always `Some` for tokens produced by `scan` (lowercase ASCII).
    /// Keys stored by `add` may be arbitrary bytes, including truncated
    /// multi-byte sequences, hence the `Option`.
    #[must_use]
    pub fn key_str(&self) -> Option<&'t str> {
        std::str::from_utf8(self.key).ok()
    }
}

impl<'r> WordTally<'r> {
    /// Build a sorted snapshot of the current counts.
    ///
    /// Entries are ordered by count descending, ties broken by key bytes
    /// ascending. Since keys are unique, the order is fully deterministic.
    /// The returned `Vec` is caller-owned and not charged against the
    /// counter's budget; the borrowed keys inside it remain valid for the
    /// counter's lifetime.
    ///
    /// # Errors
    ///
    /// [`InvariantViolation`](TallyCraftError::InvariantViolation) when
    /// the occupied-slot count disagrees with the recorded unique count.
    /// This gates the result rather than silently truncating it.
    ///
    /// # Examples
    ///
    /// ```
    /// use tallycraft::WordTally;
    ///
    /// let mut tally = WordTally::new(0).unwrap();
    /// tally.scan("b a b c b a").unwrap();
    ///
    /// let entries = tally.snapshot().unwrap();
    /// let keys: Vec<_> = entries.iter().map(|e| e.key).collect();
    /// assert_eq!(keys, [b"b".as_slice(), b"a", b"c"]);
    /// ```
    pub fn snapshot(&self) -> Result<Vec<TallyEntry<'_>>> {
        let unique = self.index.unique();
        if unique == 0 {
            return Ok(Vec::new());
        }

        let mut entries = Vec::with_capacity(unique);
        for slot in self.index.slots() {
            if slot.is_occupied() {
                entries.push(entry(slot));
            }
        }

        if entries.len() != unique {
            return Err(TallyCraftError::invariant_violation(unique, entries.len()));
        }

        entries.sort_unstable_by(|a, b| {
            b.count.cmp(&a.count).then_with(|| a.key.cmp(b.key))
        });
        Ok(entries)
    }

    /// Iterate occupied slots without allocating.
    ///
    /// The order is unspecified but stable for a given counter state;
    /// exactly [`unique`](WordTally::unique) entries are yielded and
    /// their counts sum to [`total`](WordTally::total).
    #[must_use]
    pub fn iter(&self) -> TallyIter<'_> {
        TallyIter { slots: self.index.slots(), next: 0 }
    }
}

#[allow(unsafe_code)]
fn entry<'t>(slot: &'t Slot) -> TallyEntry<'t> {
    // Safety: the slot is occupied and borrowed from a live counter whose
    // arena owns the key bytes; the returned borrow shares that lifetime.
    TallyEntry { key: unsafe { slot.key_bytes() }, count: slot.count() }
}

/// Zero-allocation cursor over a counter's occupied slots.
///
/// Created by [`WordTally::iter`] or by iterating `&WordTally`.
#[derive(Debug, Clone)]
pub struct TallyIter<'t> {
    slots: &'t [Slot],
    next: usize,
}

impl<'t> Iterator for TallyIter<'t> {
    type Item = TallyEntry<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.slots.len() {
            let slot = &self.slots[self.next];
            self.next += 1;
            if slot.is_occupied() {
                return Some(entry(slot));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.slots.len() - self.next))
    }
}

impl<'t, 'r> IntoIterator for &'t WordTally<'r> {
    type Item = TallyEntry<'t>;
    type IntoIter = TallyIter<'t>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
