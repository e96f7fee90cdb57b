//! Schnorr signature, nonce and public key value types.
//!
//! These are opaque fixed-length byte wrappers; actual signature verification
//! lives above this core. Identity is byte-equality, hashing uses the last
//! four bytes, and ordering is most-significant-byte first over the reversed
//! (wire) orientation, matching the hash type.

use crate::{CodecError, CodecResult};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

macro_rules! schnorr_64 {
    ($name:ident, $what:literal) => {
        #[doc = concat!("A 64-byte Schnorr ", $what, ".")]
        #[derive(Clone, Copy, PartialEq, Eq)]
        pub struct $name([u8; 64]);

        impl $name {
            /// Number of bytes in the value.
            pub const LENGTH: usize = 64;

            /// The all-zero value.
            pub const ALL_ZERO: $name = $name([0u8; 64]);

            /// Wrap raw bytes in display orientation.
            pub fn wrap(bytes: [u8; 64]) -> Self {
                $name(bytes)
            }

            /// Wrap wire-orientation bytes, reversing into display form.
            pub fn wrap_reversed(bytes: [u8; 64]) -> Self {
                let mut rev = bytes;
                rev.reverse();
                $name(rev)
            }

            /// Wrap a slice, failing unless it is exactly 64 bytes.
            pub fn from_slice(bytes: &[u8]) -> CodecResult<Self> {
                let arr: [u8; 64] = bytes.try_into().map_err(|_| {
                    CodecError::Malformed(format!(
                        concat!($what, " must be 64 bytes, got {}"),
                        bytes.len()
                    ))
                })?;
                Ok($name(arr))
            }

            /// Parse a 128-character hex string.
            pub fn from_hex(s: &str) -> CodecResult<Self> {
                let bytes = hex::decode(s).map_err(|e| {
                    CodecError::Malformed(format!(concat!("invalid ", $what, " hex: {}"), e))
                })?;
                Self::from_slice(&bytes)
            }

            /// The raw bytes.
            pub fn as_bytes(&self) -> &[u8; 64] {
                &self.0
            }

            /// A byte-reversed copy, i.e. the wire form.
            pub fn reversed_bytes(&self) -> [u8; 64] {
                let mut rev = self.0;
                rev.reverse();
                rev
            }

            /// Hex of the raw bytes.
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.to_hex())
            }
        }

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                state.write(&self.0[60..64]);
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                for i in (0..64).rev() {
                    match self.0[i].cmp(&other.0[i]) {
                        Ordering::Equal => continue,
                        ord => return ord,
                    }
                }
                Ordering::Equal
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }
    };
}

schnorr_64!(SchnorrSignature, "signature");
schnorr_64!(SchnorrNonce, "nonce");

/// A Schnorr public key: 32 bytes (x-only) or 33 bytes (compressed point).
///
/// The block wire format carries the 32-byte x-only form; the 33-byte form is
/// accepted at the type level for callers that handle compressed points.
#[derive(Clone, PartialEq, Eq)]
pub struct SchnorrPublicKey(Vec<u8>);

impl SchnorrPublicKey {
    /// Wrap key bytes, failing unless the length is 32 or 33.
    pub fn from_slice(bytes: &[u8]) -> CodecResult<Self> {
        if bytes.len() != 32 && bytes.len() != 33 {
            return Err(CodecError::Malformed(format!(
                "public key must be 32 or 33 bytes, got {}",
                bytes.len()
            )));
        }
        Ok(SchnorrPublicKey(bytes.to_vec()))
    }

    /// Wrap 32 wire-orientation bytes, reversing into display form.
    pub fn wrap_reversed(bytes: [u8; 32]) -> Self {
        let mut rev = bytes;
        rev.reverse();
        SchnorrPublicKey(rev.to_vec())
    }

    /// Parse a hex string.
    pub fn from_hex(s: &str) -> CodecResult<Self> {
        let bytes = hex::decode(s)
            .map_err(|e| CodecError::Malformed(format!("invalid public key hex: {}", e)))?;
        Self::from_slice(&bytes)
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// A byte-reversed copy of the key.
    pub fn reversed_bytes(&self) -> Vec<u8> {
        let mut rev = self.0.clone();
        rev.reverse();
        rev
    }

    /// Hex of the raw bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Display for SchnorrPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for SchnorrPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SchnorrPublicKey({})", self.to_hex())
    }
}

impl Hash for SchnorrPublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let n = self.0.len();
        state.write(&self.0[n - 4..]);
    }
}
