//! Shared data generation for the benchmark suites.
//!
//! All generators are seeded, so runs are reproducible and comparisons
//! between revisions measure the code, not the data.

// Each bench target compiles this module and uses a subset of it.
#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Unique-token counts covered by scaling benchmarks.
pub const UNIQUE_COUNTS: &[usize] = &[1_000, 10_000, 100_000];

fn rng() -> StdRng {
    StdRng::seed_from_u64(0x7a11_9c4a_f7ed_0001)
}

/// Random lowercase words of a fixed length.
pub fn generate_words(count: usize, len: usize) -> Vec<String> {
    let mut rng = rng();
    (0..count)
        .map(|_| {
            (0..len)
                .map(|_| rng.gen_range(b'a'..=b'z') as char)
                .collect()
        })
        .collect()
}

/// Prose-like text: a small vocabulary sampled with heavy repetition,
/// joined by single spaces. Approximates natural-language token reuse.
pub fn generate_prose(word_count: usize, vocabulary: usize) -> String {
    let vocab = generate_words(vocabulary, 7);
    let mut rng = rng();
    let mut text = String::with_capacity(word_count * 8);
    for i in 0..word_count {
        if i > 0 {
            text.push(' ');
        }
        // Bias toward the front of the vocabulary.
        let pick = rng.gen_range(0..vocabulary).min(rng.gen_range(0..vocabulary));
        text.push_str(&vocab[pick]);
    }
    text
}

/// Text with mixed upper/lower case and punctuation separators, for
/// exercising the folding and separator paths together.
pub fn generate_noisy_text(word_count: usize) -> String {
    let words = generate_words(word_count, 6);
    let mut rng = rng();
    let mut text = String::with_capacity(word_count * 9);
    for word in words {
        for byte in word.bytes() {
            let ch = if rng.gen_bool(0.3) {
                byte.to_ascii_uppercase() as char
            } else {
                byte as char
            };
            text.push(ch);
        }
        text.push_str(match rng.gen_range(0..4) {
            0 => ", ",
            1 => ". ",
            2 => "\t",
            _ => " ",
        });
    }
    text
}
