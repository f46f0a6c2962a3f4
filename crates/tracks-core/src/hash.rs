//! Deterministic index selection and name masking.

use sha2::{Digest, Sha256};

use crate::errors::{ErrorInfo, TracksError};

/// Number of hex characters retained by [`masked_name`].
const MASKED_NAME_LEN: usize = 7;

/// Selects a deterministic bucket for `(set_name, key)` among `buckets`
/// choices.
///
/// The digest of `set_name:key` is interpreted as an unsigned big-endian
/// integer and reduced modulo `buckets`, so the same inputs map to the same
/// bucket across runs, processes, and platforms. Changing the bucket count
/// reshuffles future assignments; that drift is inherent to modular
/// bucketing and is not a correctness bug.
pub fn bucket_index(set_name: &str, key: &str, buckets: usize) -> Result<usize, TracksError> {
    if buckets == 0 {
        return Err(TracksError::Selection(
            ErrorInfo::new("bucket-empty", "cannot select a bucket out of zero")
                .with_context("set_name", set_name),
        ));
    }
    let mut hasher = Sha256::new();
    hasher.update(set_name.as_bytes());
    hasher.update(b":");
    hasher.update(key.as_bytes());
    let digest = hasher.finalize();

    // Big-endian modular reduction of the 256-bit digest. Each step keeps
    // the accumulator below `buckets` (at most u64::MAX), so shifting in the
    // next byte cannot overflow a u128.
    let modulus = buckets as u128;
    let mut acc: u128 = 0;
    for byte in digest {
        acc = ((acc << 8) | u128::from(byte)) % modulus;
    }
    Ok(acc as usize)
}

/// Returns a short deterministic obfuscation of `name` for logging.
///
/// A truncated hex digest of the name alone: stable across runs, safe to
/// emit where the plaintext experiment name should not leak.
pub fn masked_name(name: &str) -> String {
    let digest = Sha256::digest(name.as_bytes());
    let mut masked = format!("{digest:x}");
    masked.truncate(MASKED_NAME_LEN);
    masked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_buckets_is_an_error() {
        let err = bucket_index("pricing", "user-1", 0).unwrap_err();
        assert_eq!(err.info().code, "bucket-empty");
    }

    #[test]
    fn single_bucket_always_selects_it() {
        for key in ["a", "b", "c"] {
            assert_eq!(bucket_index("pricing", key, 1).unwrap(), 0);
        }
    }

    #[test]
    fn masked_name_is_short_hex() {
        let masked = masked_name("pricing");
        assert_eq!(masked.len(), 7);
        assert!(masked.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
