//! Error types for TallyCraft operations.
//!
//! The error surface is deliberately small: every fallible operation in the
//! crate returns [`Result<T>`] with one of three error kinds. Errors are
//! returned, never panicked, and the counter stays fully usable after any
//! failure: a failed insert leaves counts unchanged, and queries, snapshots,
//! and iteration remain well-defined.
//!
//! # Error Propagation
//!
//! ```
//! use tallycraft::{Result, WordTally};
//!
//! fn count_words(text: &str) -> Result<usize> {
//!     let mut tally = WordTally::new(0)?;
//!     tally.scan(text)?;
//!     Ok(tally.unique())
//! }
//! # assert_eq!(count_words("one two two").unwrap(), 2);
//! ```

use std::fmt;

/// Result type alias for TallyCraft operations.
///
/// All fallible operations return [`Result<T>`] where the error type is
/// [`TallyCraftError`].
pub type Result<T> = std::result::Result<T, TallyCraftError>;

/// Errors that can occur during counter operations.
///
/// Each variant carries numeric context for diagnostics; the per-kind
/// description returned by [`TallyCraftError::as_str`] is a static string,
/// so formatting an error never allocates state of its own.
///
/// # Design Notes
/// - `Copy` + `PartialEq` enable cheap propagation and comparison in tests
/// - No variant owns heap data; diagnostics are static per-kind strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TallyCraftError {
    /// An argument violated a construction precondition.
    ///
    /// The main producer is a static region whose base address is not
    /// aligned to [`REGION_ALIGN`](crate::REGION_ALIGN). Misaligned
    /// regions are rejected deterministically at construction instead of
    /// risking unaligned internal structures later.
    InvalidArgument {
        /// Static description of the violated precondition.
        detail: &'static str,
    },

    /// An allocation failed, a size computation overflowed, or a byte or
    /// region budget was exhausted.
    ///
    /// This is the ordinary steady-state failure for budget-limited and
    /// static-region counters: the counter remains queryable, already
    /// committed tokens are retained, and further inserts may still
    /// succeed where room remains.
    OutOfMemory {
        /// Size in bytes of the request that could not be satisfied.
        requested: usize,
    },

    /// The hash index disagreed with its own bookkeeping.
    ///
    /// Surfaced by [`WordTally::snapshot`](crate::WordTally::snapshot)
    /// when the number of occupied slots does not match the recorded
    /// unique count. This should never occur; if it does, it indicates a
    /// bug in TallyCraft itself.
    InvariantViolation {
        /// Unique-token count the counter recorded.
        expected: usize,
        /// Occupied slots actually observed.
        observed: usize,
    },
}

impl TallyCraftError {
    /// Create an `InvalidArgument` error.
    #[must_use]
    pub const fn invalid_argument(detail: &'static str) -> Self {
        Self::InvalidArgument { detail }
    }

    /// Create an `OutOfMemory` error for a request of `requested` bytes.
    #[must_use]
    pub const fn out_of_memory(requested: usize) -> Self {
        Self::OutOfMemory { requested }
    }

    /// Create an `InvariantViolation` error.
    ///
    /// This should only be used for conditions that indicate bugs in
    /// TallyCraft.
    #[must_use]
    pub const fn invariant_violation(expected: usize, observed: usize) -> Self {
        Self::InvariantViolation { expected, observed }
    }

    /// Static per-kind diagnostic string.
    ///
    /// # Examples
    /// ```
    /// use tallycraft::TallyCraftError;
    ///
    /// let err = TallyCraftError::out_of_memory(4096);
    /// assert_eq!(err.as_str(), "memory allocation failed or limit reached");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "invalid argument or corrupted state",
            Self::OutOfMemory { .. } => "memory allocation failed or limit reached",
            Self::InvariantViolation { .. } => "internal invariant violated",
        }
    }

    /// Whether this error is [`TallyCraftError::OutOfMemory`].
    ///
    /// Budget-limited workloads routinely probe for this kind to decide
    /// whether to flush, shrink input, or stop.
    #[must_use]
    pub const fn is_out_of_memory(&self) -> bool {
        matches!(self, Self::OutOfMemory { .. })
    }
}

impl fmt::Display for TallyCraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { detail } => {
                write!(f, "invalid argument: {}", detail)
            }
            Self::OutOfMemory { requested } => {
                write!(
                    f,
                    "memory allocation of {} bytes failed or exceeded the configured limit",
                    requested
                )
            }
            Self::InvariantViolation { expected, observed } => {
                write!(
                    f,
                    "internal invariant violated (this is a bug in TallyCraft): \
                     expected {} occupied slots, observed {}",
                    expected, observed
                )
            }
        }
    }
}

impl std::error::Error for TallyCraftError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_argument() {
        let err = TallyCraftError::invalid_argument("static region base is misaligned");
        let display = format!("{err}");
        assert!(display.contains("invalid argument"));
        assert!(display.contains("misaligned"));
    }

    #[test]
    fn test_display_out_of_memory() {
        let err = TallyCraftError::out_of_memory(4096);
        let display = format!("{err}");
        assert!(display.contains("4096"));
        assert!(display.contains("limit"));
    }

    #[test]
    fn test_display_invariant_violation() {
        let err = TallyCraftError::invariant_violation(10, 9);
        let display = format!("{err}");
        assert!(display.contains("10"));
        assert!(display.contains("9"));
        assert!(display.contains("bug"));
    }

    #[test]
    fn test_as_str_is_static_per_kind() {
        assert_eq!(
            TallyCraftError::invalid_argument("a").as_str(),
            TallyCraftError::invalid_argument("b").as_str()
        );
        assert_eq!(
            TallyCraftError::out_of_memory(1).as_str(),
            TallyCraftError::out_of_memory(2).as_str()
        );
    }

    #[test]
    fn test_is_out_of_memory() {
        assert!(TallyCraftError::out_of_memory(0).is_out_of_memory());
        assert!(!TallyCraftError::invalid_argument("x").is_out_of_memory());
        assert!(!TallyCraftError::invariant_violation(1, 2).is_out_of_memory());
    }

    #[test]
    fn test_error_implements_std_error() {
        let _err: Box<dyn std::error::Error> = Box::new(TallyCraftError::out_of_memory(64));
    }

    #[test]
    fn test_error_copy_and_eq() {
        let err1 = TallyCraftError::invariant_violation(3, 4);
        let err2 = err1;
        assert_eq!(err1, err2);
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn inner() -> Result<()> {
            Err(TallyCraftError::out_of_memory(128))
        }

        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }

        assert_eq!(outer(), Err(TallyCraftError::out_of_memory(128)));
    }
}
