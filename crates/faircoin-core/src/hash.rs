//! The 32-byte hash type and double-SHA-256.

use crate::{CodecError, CodecResult};
use sha2::{Digest, Sha256};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// SHA-256 of the input.
pub fn sha256(input: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hasher.finalize().into()
}

/// SHA-256 of SHA-256 of the input. All block and Merkle hashes use this.
pub fn hash_twice(input: &[u8]) -> [u8; 32] {
    sha256(&sha256(input))
}

/// A 32-byte hash in display (big-endian) orientation.
///
/// On the wire hashes travel byte-reversed; [`Hash256::reversed_bytes`] gives
/// the wire form and [`Hash256::wrap_reversed`] builds from it. Identity is
/// byte-equality over the display form.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Hash256([u8; 32]);

impl Hash256 {
    /// Number of bytes in a hash.
    pub const LENGTH: usize = 32;

    /// The all-zero hash, used for the genesis previous-block reference and
    /// coinbase outpoints.
    pub const ZERO: Hash256 = Hash256([0u8; 32]);

    /// Wrap raw display-orientation bytes.
    pub fn wrap(bytes: [u8; 32]) -> Self {
        Hash256(bytes)
    }

    /// Wrap wire-orientation bytes, reversing into display form.
    pub fn wrap_reversed(bytes: [u8; 32]) -> Self {
        let mut rev = bytes;
        rev.reverse();
        Hash256(rev)
    }

    /// Wrap a slice, failing if it is not exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> CodecResult<Self> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| {
            CodecError::Malformed(format!("hash must be 32 bytes, got {}", bytes.len()))
        })?;
        Ok(Hash256(arr))
    }

    /// Parse a 64-character hex string in display orientation.
    pub fn from_hex(s: &str) -> CodecResult<Self> {
        let bytes = hex::decode(s)
            .map_err(|e| CodecError::Malformed(format!("invalid hash hex: {}", e)))?;
        Self::from_slice(&bytes)
    }

    /// Double-SHA-256 of the input, kept in computation order (not reversed).
    pub fn hash_twice_of(input: &[u8]) -> Self {
        Hash256(hash_twice(input))
    }

    /// Double-SHA-256 of the input, reversed into display orientation. This
    /// is the form block hashes and txids are quoted in.
    pub fn hash_twice_reversed(input: &[u8]) -> Self {
        Hash256::wrap_reversed(hash_twice(input))
    }

    /// The display-orientation bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// A byte-reversed copy, i.e. the wire form.
    pub fn reversed_bytes(&self) -> [u8; 32] {
        let mut rev = self.0;
        rev.reverse();
        rev
    }

    /// Hex in display orientation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({})", self.to_hex())
    }
}

impl Hash for Hash256 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // The last 4 bytes, not the first 4 which trend to zero in hashes
        // that have been ground against a target.
        state.write(&self.0[28..32]);
    }
}

impl Ord for Hash256 {
    fn cmp(&self, other: &Self) -> Ordering {
        // Most-significant byte first over the reversed orientation, i.e.
        // scan the stored array from the tail.
        for i in (0..32).rev() {
            match self.0[i].cmp(&other.0[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Hash256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_twice_known_vector() {
        // double-SHA-256 of "hello"
        assert_eq!(
            hex::encode(hash_twice(b"hello")),
            "9595c9df90075148eb06860365df33584b75bff782a510c6cd4883a419833d50"
        );
    }

    #[test]
    fn wrap_reversed_round_trips() {
        let h = Hash256::from_hex(
            "beed44fa5e96150d95d56ebd5d2625781825a9407a5215dd7eda723373a0a1d7",
        )
        .unwrap();
        assert_eq!(Hash256::wrap_reversed(h.reversed_bytes()), h);
    }

    #[test]
    fn from_slice_rejects_wrong_length() {
        assert!(matches!(
            Hash256::from_slice(&[0u8; 31]),
            Err(CodecError::Malformed(_))
        ));
    }

    #[test]
    fn ordering_uses_most_significant_byte() {
        let mut lo = [0u8; 32];
        let mut hi = [0u8; 32];
        // Stored arrays are display-orientation; index 31 is the wire MSB.
        lo[31] = 1;
        hi[31] = 2;
        assert!(Hash256::wrap(lo) < Hash256::wrap(hi));
    }
}
