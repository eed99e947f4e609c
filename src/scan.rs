//! Byte-level tokenization: letter classification, case folding, and the
//! scan loop shared by both scan-buffer modes.
//!
//! The token alphabet is exactly ASCII `A–Z` and `a–z`. Every other byte
//! is a separator: digits, punctuation, whitespace, NUL, and all high
//! bytes including UTF-8 lead and continuation bytes. Classification and
//! folding both lean on the ASCII layout where a letter's case lives in
//! bit 5, which the assertions below pin down.

use crate::error::Result;
use crate::hash::fnv1a_step;

// The folding trick requires the ASCII layout: contiguous letter ranges
// and exactly bit 5 between cases.
const _: () = assert!(b'A' == 65 && b'Z' == 90 && b'a' == 97 && b'z' == 122);
const _: () = assert!(b'a' ^ b'A' == 0x20);

/// Whether `byte` is an ASCII letter.
#[inline]
pub(crate) fn is_letter(byte: u8) -> bool {
    (byte | 0x20).wrapping_sub(b'a') < 26
}

/// Lowercase an ASCII letter (identity is not guaranteed for non-letters).
#[inline]
pub(crate) fn fold(byte: u8) -> u8 {
    byte | 0x20
}

/// Walk `text`, extracting lowercased tokens into `buf` and flushing each
/// through `flush` together with its incrementally computed hash.
///
/// Tokens longer than `max_len` are truncated: bytes past the limit are
/// consumed but contribute neither to the buffer nor to the hash, so
/// distinct words sharing a `max_len` prefix merge. A `flush` error aborts
/// the walk at that token; earlier tokens stay committed.
///
/// `buf` must hold at least `max_len` bytes.
pub(crate) fn tokenize<F>(
    text: &[u8],
    max_len: usize,
    basis: u32,
    buf: &mut [u8],
    mut flush: F,
) -> Result<()>
where
    F: FnMut(&[u8], u32) -> Result<()>,
{
    debug_assert!(buf.len() >= max_len);

    let mut pos = 0;
    while pos < text.len() {
        while pos < text.len() && !is_letter(text[pos]) {
            pos += 1;
        }
        if pos >= text.len() {
            break;
        }

        let mut hash = basis;
        let mut len = 0;
        while pos < text.len() && is_letter(text[pos]) {
            let folded = fold(text[pos]);
            pos += 1;
            if len < max_len {
                buf[len] = folded;
                len += 1;
                hash = fnv1a_step(hash, folded);
            }
        }

        debug_assert!(len > 0 && len <= max_len);
        flush(&buf[..len], hash)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TallyCraftError;
    use crate::hash::{fnv1a, FNV_OFFSET_BASIS};

    fn collect(text: &[u8], max_len: usize) -> Vec<(Vec<u8>, u32)> {
        let mut buf = [0u8; 64];
        let mut out = Vec::new();
        tokenize(text, max_len, FNV_OFFSET_BASIS, &mut buf, |token, hash| {
            out.push((token.to_vec(), hash));
            Ok(())
        })
        .unwrap();
        out
    }

    #[test]
    fn test_is_letter_full_byte_range() {
        for byte in 0u8..=255 {
            let expected = byte.is_ascii_alphabetic();
            assert_eq!(is_letter(byte), expected, "byte {byte:#04x}");
        }
    }

    #[test]
    fn test_fold_lowercases_letters() {
        assert_eq!(fold(b'A'), b'a');
        assert_eq!(fold(b'Z'), b'z');
        assert_eq!(fold(b'm'), b'm');
    }

    #[test]
    fn test_tokenize_splits_and_folds() {
        let tokens = collect(b"Hello, World!", 64);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].0, b"hello");
        assert_eq!(tokens[1].0, b"world");
    }

    #[test]
    fn test_tokenize_hash_matches_bulk_hash() {
        for (token, hash) in collect(b"Mixed CASE tokens", 64) {
            assert_eq!(hash, fnv1a(&token, FNV_OFFSET_BASIS));
        }
    }

    #[test]
    fn test_tokenize_truncates_and_hashes_prefix_only() {
        let tokens = collect(b"abcdefghij", 4);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].0, b"abcd");
        assert_eq!(tokens[0].1, fnv1a(b"abcd", FNV_OFFSET_BASIS));
    }

    #[test]
    fn test_tokenize_separators() {
        // Digits, punctuation, NUL, and UTF-8 bytes all separate.
        let tokens = collect(b"one1two\0three\xc3\xa9four", 64);
        let words: Vec<&[u8]> = tokens.iter().map(|(t, _)| t.as_slice()).collect();
        assert_eq!(words, [b"one".as_slice(), b"two", b"three", b"four"]);
    }

    #[test]
    fn test_tokenize_empty_and_letterless() {
        assert!(collect(b"", 64).is_empty());
        assert!(collect(b"123 456 !!!", 64).is_empty());
    }

    #[test]
    fn test_tokenize_flush_error_stops_walk() {
        let mut buf = [0u8; 64];
        let mut seen = 0;
        let err = tokenize(b"one two three", 64, FNV_OFFSET_BASIS, &mut buf, |_, _| {
            seen += 1;
            if seen == 2 {
                Err(TallyCraftError::out_of_memory(1))
            } else {
                Ok(())
            }
        })
        .unwrap_err();
        assert!(err.is_out_of_memory());
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_token_at_end_of_input_is_flushed() {
        let tokens = collect(b"trailing token", 64);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].0, b"token");
    }
}
