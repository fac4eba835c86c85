//! 32-bit MurmurHash3 helpers for hash-consing `ATNConfigSet`/`DFAState`
//! tuples (spec §2, §9). Wraps the `murmur3` crate rather than hand-rolling
//! the mixing constants, and fixes the word size at 32 bits end-to-end
//! (see `bit_set.rs` for the companion note on the same open question).

use std::io::Cursor;

const SEED: u32 = 0;

/// Hashes a sequence of already-hashed/discrete `i32` values the way the
/// reference runtimes incrementally fold fields of a config tuple
/// `(state, alt, semanticContext, context)` into one hash.
pub fn hash_i32_seq(values: impl IntoIterator<Item = i32>) -> i32 {
    let mut bytes = Vec::new();
    for v in values {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    murmur3_32(&bytes)
}

pub fn hash_str(s: &str) -> i32 {
    murmur3_32(s.as_bytes())
}

fn murmur3_32(bytes: &[u8]) -> i32 {
    let mut cursor = Cursor::new(bytes);
    murmur3::murmur3_32(&mut cursor, SEED)
        .map(|v| v as i32)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_same_input() {
        assert_eq!(hash_i32_seq([1, 2, 3]), hash_i32_seq([1, 2, 3]));
    }

    #[test]
    fn differs_for_different_input() {
        assert_ne!(hash_i32_seq([1, 2, 3]), hash_i32_seq([3, 2, 1]));
    }
}
