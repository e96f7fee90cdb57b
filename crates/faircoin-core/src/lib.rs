//! # faircoin-core
//!
//! Primitive wire codecs and crypto value types for the FairCoin client.
//!
//! This crate provides:
//! - Fixed-length hash and Schnorr value types (`Hash256`, `SchnorrSignature`,
//!   `SchnorrNonce`, `SchnorrPublicKey`)
//! - The CompactSize varint codec
//! - A bounds-checked byte reader plus little-endian write helpers
//! - The compact-bits difficulty target codec
//! - Double-SHA-256 (`hash_twice`), the hash used for all block and Merkle
//!   hashing
//!
//! On-wire hashes, signatures and nonces are little-endian while the display
//! form is big-endian; the reader/writer pair reverses at the wire boundary so
//! the in-memory types always hold the display orientation.

mod compact;
mod error;
mod hash;
mod reader;
mod schnorr;
mod varint;
mod writer;

pub use compact::{decode_compact_bits, encode_compact_bits};
pub use error::{CodecError, CodecResult};
pub use hash::{hash_twice, sha256, Hash256};
pub use reader::ByteReader;
pub use schnorr::{SchnorrNonce, SchnorrPublicKey, SchnorrSignature};
pub use varint::VarInt;
pub use writer::{put_i64_le, put_u16_be, put_u32_le, put_u64_le};

/// A constant shared by the entire network: how large in bytes a serialized
/// block (and therefore any single wire message payload) is allowed to be.
pub const MAX_BLOCK_SIZE: usize = 1_000_000;
