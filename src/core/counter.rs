//! The counter object: construction, ingestion, and queries.
//!
//! [`WordTally`] composes the budgeted allocator, the string arena, and
//! the hash index, and owns all three for its lifetime. It is strictly
//! single-threaded: no internal synchronization exists, and no operation
//! blocks. Distinct counters are independent and may live on distinct
//! threads.

use crate::builder::{TallyConfig, WordTallyBuilder};
use crate::core::index::Index;
use crate::core::params;
use crate::error::{Result, TallyCraftError};
use crate::hash::{fnv1a, seeded_basis};
use crate::mem::arena::{self, Arena};
use crate::mem::budget::BudgetAlloc;
use crate::scan;

/// A bounded-memory word-frequency counter.
///
/// Tokens enter through [`add`](WordTally::add) (case-sensitive, one key
/// per call) or [`scan`](WordTally::scan) (case-folding, bulk extraction);
/// results come back through [`total`](WordTally::total) /
/// [`unique`](WordTally::unique), the sorted
/// [`snapshot`](WordTally::snapshot), or the allocation-free
/// [`iter`](WordTally::iter).
///
/// The lifetime parameter is the borrow of a caller-supplied static
/// region; heap-backed counters are `WordTally<'static>`. Because the
/// region is an exclusive borrow, the compiler enforces that a region
/// serves at most one counter and outlives it.
///
/// # Examples
///
/// ```
/// use tallycraft::WordTally;
///
/// let mut tally = WordTally::new(0).unwrap();
/// tally.scan("the cat and the hat").unwrap();
/// assert_eq!(tally.total(), 5);
/// assert_eq!(tally.unique(), 4);
///
/// let top = tally.snapshot().unwrap();
/// assert_eq!(top[0].key, b"the");
/// assert_eq!(top[0].count, 2);
/// ```
///
/// # Failure behavior
///
/// Inserts that hit the byte budget or exhaust a static region return
/// [`OutOfMemory`](crate::TallyCraftError::OutOfMemory) and change
/// nothing; the counter stays fully queryable and further calls are
/// permitted.
pub struct WordTally<'r> {
    pub(crate) index: Index,
    arena: Arena,
    alloc: BudgetAlloc<'r>,
    max_token_len: usize,
    basis: u32,
    #[cfg(feature = "heap-scan-buffer")]
    scan_buf: *mut u8,
}

// Safety: WordTally exclusively owns every pointer it holds (slot array,
// arena blocks, optional scan buffer), or holds them inside an exclusive
// region borrow. Nothing is shared, so moving the whole counter to
// another thread is sound. No `Sync`: a counter is single-threaded by
// contract.
#[allow(unsafe_code)]
unsafe impl Send for WordTally<'_> {}

impl WordTally<'static> {
    /// Open a heap-backed counter with default configuration.
    ///
    /// `max_token_len` of 0 selects the default
    /// ([`DEFAULT_TOKEN_LEN`](crate::DEFAULT_TOKEN_LEN)); other values are
    /// clamped into `[MIN_TOKEN_LEN, MAX_TOKEN_LEN]`.
    pub fn new(max_token_len: usize) -> Result<Self> {
        Self::build_parts(max_token_len, &TallyConfig::default(), None)
    }

    /// Open a heap-backed counter with explicit configuration.
    ///
    /// Zero-valued configuration fields select derived defaults. For a
    /// static-region counter, use [`WordTally::builder`].
    ///
    /// # Errors
    ///
    /// `OutOfMemory` when the initial structures cannot be allocated
    /// within `config.byte_budget`.
    pub fn with_config(max_token_len: usize, config: &TallyConfig) -> Result<Self> {
        Self::build_parts(max_token_len, config, None)
    }

    /// Start building a counter; the builder is the only way to attach a
    /// static region.
    #[must_use]
    pub fn builder() -> WordTallyBuilder<'static> {
        WordTallyBuilder::new()
    }
}

impl<'r> WordTally<'r> {
    /// Shared construction path for every public entry point.
    pub(crate) fn build_parts(
        max_token_len: usize,
        config: &TallyConfig,
        region: Option<&'r mut [u8]>,
    ) -> Result<WordTally<'r>> {
        let max_token_len = params::clamp_token_len(max_token_len);
        let region = region.filter(|region| !region.is_empty());
        let region_size = region.as_ref().map_or(0, |region| region.len());

        let (capacity, block_size) = params::tune(
            config.initial_capacity,
            config.block_size,
            config.byte_budget,
            region_size,
            max_token_len,
        );

        // In static mode a nonzero byte budget never exceeds the region.
        let mut bytes_limit = config.byte_budget;
        if region_size != 0 && bytes_limit > region_size {
            bytes_limit = region_size;
        }

        let alloc = match region {
            Some(region) => BudgetAlloc::with_static_region(region, bytes_limit)?,
            None => BudgetAlloc::heap(bytes_limit),
        };

        // Static-mode dry run: replay the construction allocations on a
        // scratch copy of the accounting state so an unsatisfiable budget
        // fails here instead of on the first insert.
        if alloc.is_static() {
            let mut scratch = alloc.state();
            let table_bytes = Index::table_bytes(capacity)
                .ok_or(TallyCraftError::out_of_memory(capacity))?;
            scratch.charge(table_bytes)?;
            let block_bytes = arena::block_alloc_size(block_size)
                .ok_or(TallyCraftError::out_of_memory(block_size))?;
            scratch.charge(block_bytes)?;
            #[cfg(feature = "heap-scan-buffer")]
            scratch.charge(max_token_len)?;
        }

        // From here on, Drop cleans up whatever has been allocated if a
        // later step fails.
        let mut tally = WordTally {
            index: Index::unset(),
            arena: Arena::unset(),
            alloc,
            max_token_len,
            basis: seeded_basis(config.hash_seed),
            #[cfg(feature = "heap-scan-buffer")]
            scan_buf: std::ptr::null_mut(),
        };

        tally.index.init(&mut tally.alloc, capacity)?;
        tally.arena.init(&mut tally.alloc, block_size)?;

        #[cfg(feature = "heap-scan-buffer")]
        {
            tally.scan_buf = tally.alloc.allocate(max_token_len)?.as_ptr();
        }

        Ok(tally)
    }

    /// Record one occurrence of `key`, case-sensitively.
    ///
    /// The key is truncated to [`max_token_len`](WordTally::max_token_len)
    /// bytes; an empty key is a successful no-op. Bytes are taken as
    /// given; embedded NULs and non-ASCII are stored verbatim.
    ///
    /// # Errors
    ///
    /// `OutOfMemory` when storing a first occurrence exceeds the budget
    /// or region; counts are unchanged in that case.
    pub fn add(&mut self, key: impl AsRef<[u8]>) -> Result<()> {
        let key = key.as_ref();
        let len = key.len().min(self.max_token_len);
        if len == 0 {
            return Ok(());
        }
        let key = &key[..len];
        let hash = fnv1a(key, self.basis);
        self.index.insert(&mut self.alloc, &mut self.arena, key, hash)
    }

    /// Extract and count every token in `text`, case-insensitively.
    ///
    /// Tokens are maximal runs of ASCII letters, lowercased before
    /// storage; every other byte separates. Empty input is a successful
    /// no-op.
    ///
    /// # Errors
    ///
    /// `OutOfMemory` aborts the scan at the failing token. Earlier tokens
    /// from the same call stay committed, and scanning further input
    /// afterwards is permitted.
    pub fn scan(&mut self, text: impl AsRef<[u8]>) -> Result<()> {
        let text = text.as_ref();
        if text.is_empty() {
            return Ok(());
        }

        #[cfg(not(feature = "heap-scan-buffer"))]
        {
            let mut buf = [0u8; params::MAX_TOKEN_LEN];
            self.scan_into(text, &mut buf)
        }

        #[cfg(feature = "heap-scan-buffer")]
        {
            // Safety: scan_buf is a live allocation of max_token_len
            // bytes owned by this counter, disjoint from the index and
            // arena memory the insert path touches.
            #[allow(unsafe_code)]
            let buf = unsafe {
                std::slice::from_raw_parts_mut(self.scan_buf, self.max_token_len)
            };
            self.scan_into(text, buf)
        }
    }

    fn scan_into(&mut self, text: &[u8], buf: &mut [u8]) -> Result<()> {
        let index = &mut self.index;
        let alloc = &mut self.alloc;
        let arena = &mut self.arena;
        scan::tokenize(text, self.max_token_len, self.basis, buf, |token, hash| {
            index.insert(&mut *alloc, &mut *arena, token, hash)
        })
    }

    /// Cumulative token count, duplicates included.
    #[must_use]
    pub fn total(&self) -> usize {
        self.index.total()
    }

    /// Number of distinct stored tokens.
    #[must_use]
    pub fn unique(&self) -> usize {
        self.index.unique()
    }

    /// Whether no token has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unique() == 0
    }

    /// Current hash-index capacity (always a power of two).
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.index.capacity()
    }

    /// The clamped maximum stored token length.
    #[must_use]
    pub fn max_token_len(&self) -> usize {
        self.max_token_len
    }

    /// Bytes currently charged against the budget, alignment padding
    /// included in static mode.
    #[must_use]
    pub fn bytes_used(&self) -> usize {
        self.alloc.bytes_used()
    }

    /// The configured byte budget (0 = unlimited).
    #[must_use]
    pub fn byte_budget(&self) -> usize {
        self.alloc.bytes_limit()
    }

    /// Whether this counter carves from a caller-supplied static region.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.alloc.is_static()
    }
}

impl Drop for WordTally<'_> {
    fn drop(&mut self) {
        #[cfg(feature = "heap-scan-buffer")]
        if let Some(buf) = std::ptr::NonNull::new(self.scan_buf) {
            self.alloc.release(buf, self.max_token_len);
            self.scan_buf = std::ptr::null_mut();
        }
        self.index.release(&mut self.alloc);
        self.arena.release_all(&mut self.alloc);
    }
}

impl std::fmt::Debug for WordTally<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordTally")
            .field("total", &self.total())
            .field("unique", &self.unique())
            .field("capacity", &self.capacity())
            .field("max_token_len", &self.max_token_len)
            .field("bytes_used", &self.bytes_used())
            .field("static_mode", &self.is_static())
            .finish()
    }
}
