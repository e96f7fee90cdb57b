//! The nonce-pool broadcast message.
//!
//! CVNs pre-announce pools of signing nonces so partial signatures can be
//! aggregated without an extra round trip. The pool is bound to a root
//! block and signed by the announcing CVN.

use crate::NetworkResult;
use faircoin_core::{
    put_u32_le, ByteReader, CodecError, Hash256, SchnorrNonce, SchnorrSignature, VarInt,
    MAX_BLOCK_SIZE,
};

/// Wire layout: `cvn_id u32 || hash_root_block(32) || creation_time u32 ||
/// varint n || n nonces(64) || msg_sig(64)`.
#[derive(Debug, Clone)]
pub struct NoncePoolMessage {
    cvn_id: u32,
    hash_root_block: Hash256,
    creation_time: u32,
    nonces: Vec<SchnorrNonce>,
    msg_sig: SchnorrSignature,

    /// Original payload bytes; dropped on any mutation.
    cached_bytes: Option<Vec<u8>>,
    /// Serialized length, kept current across nonce add/remove.
    length: usize,
}

impl PartialEq for NoncePoolMessage {
    fn eq(&self, other: &Self) -> bool {
        self.cvn_id == other.cvn_id
            && self.hash_root_block == other.hash_root_block
            && self.creation_time == other.creation_time
            && self.nonces == other.nonces
            && self.msg_sig == other.msg_sig
    }
}

impl Eq for NoncePoolMessage {}

impl NoncePoolMessage {
    /// Build a pool message from typed fields.
    pub fn new(
        cvn_id: u32,
        hash_root_block: Hash256,
        creation_time: u32,
        nonces: Vec<SchnorrNonce>,
        msg_sig: SchnorrSignature,
    ) -> Self {
        let length = Self::length_for(nonces.len());
        NoncePoolMessage {
            cvn_id,
            hash_root_block,
            creation_time,
            nonces,
            msg_sig,
            cached_bytes: None,
            length,
        }
    }

    fn length_for(nonce_count: usize) -> usize {
        4 + 32 + 4 + VarInt::size_of(nonce_count as u64) + 64 * nonce_count + 64
    }

    /// Parse from a message payload.
    pub fn parse(payload: &[u8], retain: bool) -> NetworkResult<Self> {
        let mut reader = ByteReader::new(payload);
        let cvn_id = reader.read_u32_le()?;
        let hash_root_block = reader.read_hash()?;
        let creation_time = reader.read_u32_le()?;
        let count = reader.read_count(MAX_BLOCK_SIZE / 64)?;
        let mut nonces = Vec::with_capacity(count);
        for _ in 0..count {
            nonces.push(reader.read_nonce()?);
        }
        let msg_sig = reader.read_signature()?;
        if reader.remaining() != 0 {
            return Err(crate::NetworkError::Codec(CodecError::Malformed(format!(
                "{} trailing bytes after nonce pool",
                reader.remaining()
            ))));
        }
        Ok(NoncePoolMessage {
            cvn_id,
            hash_root_block,
            creation_time,
            nonces,
            msg_sig,
            cached_bytes: retain.then(|| payload.to_vec()),
            length: payload.len(),
        })
    }

    /// The payload bytes; the retained buffer is reused until a mutation.
    pub fn serialize(&self) -> Vec<u8> {
        if let Some(cached) = &self.cached_bytes {
            return cached.clone();
        }
        let mut out = Vec::with_capacity(self.length);
        put_u32_le(&mut out, self.cvn_id);
        out.extend_from_slice(&self.hash_root_block.reversed_bytes());
        put_u32_le(&mut out, self.creation_time);
        VarInt(self.nonces.len() as u64).encode_into(&mut out);
        for nonce in &self.nonces {
            out.extend_from_slice(&nonce.reversed_bytes());
        }
        out.extend_from_slice(&self.msg_sig.reversed_bytes());
        out
    }

    pub fn cvn_id(&self) -> u32 {
        self.cvn_id
    }

    pub fn hash_root_block(&self) -> Hash256 {
        self.hash_root_block
    }

    pub fn creation_time(&self) -> u32 {
        self.creation_time
    }

    pub fn nonces(&self) -> &[SchnorrNonce] {
        &self.nonces
    }

    pub fn msg_sig(&self) -> &SchnorrSignature {
        &self.msg_sig
    }

    /// Current serialized length, tracked across mutations.
    pub fn serialized_length(&self) -> usize {
        self.length
    }

    /// Whether the retained payload bytes are still valid.
    pub fn is_cached(&self) -> bool {
        self.cached_bytes.is_some()
    }

    /// Append a nonce, growing the tracked length by one nonce and
    /// invalidating the byte cache.
    pub fn add_nonce(&mut self, nonce: SchnorrNonce) {
        self.cached_bytes = None;
        self.nonces.push(nonce);
        self.length += SchnorrNonce::LENGTH;
    }

    /// Remove the nonce at `index`, shrinking the tracked length by one
    /// nonce and invalidating the byte cache.
    pub fn remove_nonce(&mut self, index: usize) -> SchnorrNonce {
        self.cached_bytes = None;
        let nonce = self.nonces.remove(index);
        self.length -= SchnorrNonce::LENGTH;
        nonce
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nonce(seed: u8) -> SchnorrNonce {
        SchnorrNonce::wrap([seed; 64])
    }

    fn sample_pool() -> NoncePoolMessage {
        NoncePoolMessage::new(
            0xC001_D00D,
            Hash256::hash_twice_reversed(b"root"),
            1_555_000_000,
            vec![nonce(1), nonce(2)],
            SchnorrSignature::wrap([7u8; 64]),
        )
    }

    #[test]
    fn round_trip() {
        let pool = sample_pool();
        let bytes = pool.serialize();
        assert_eq!(bytes.len(), pool.serialized_length());
        let reparsed = NoncePoolMessage::parse(&bytes, true).unwrap();
        assert_eq!(reparsed, pool);
        assert_eq!(reparsed.serialize(), bytes);
    }

    #[test]
    fn add_nonce_adjusts_length_and_uncaches() {
        let bytes = sample_pool().serialize();
        let mut pool = NoncePoolMessage::parse(&bytes, true).unwrap();
        assert!(pool.is_cached());
        let length_before = pool.serialized_length();

        pool.add_nonce(nonce(3));
        assert!(!pool.is_cached());
        assert_eq!(pool.serialized_length(), length_before + 64);
        assert_eq!(pool.serialize().len(), pool.serialized_length());
    }

    #[test]
    fn remove_nonce_adjusts_length() {
        let bytes = sample_pool().serialize();
        let mut pool = NoncePoolMessage::parse(&bytes, true).unwrap();
        let length_before = pool.serialized_length();

        let removed = pool.remove_nonce(0);
        assert_eq!(removed, nonce(1));
        assert_eq!(pool.serialized_length(), length_before - 64);
        assert_eq!(pool.serialize().len(), pool.serialized_length());
        assert_eq!(pool.nonces(), &[nonce(2)]);
    }

    #[test]
    fn truncated_pool_fails() {
        let mut bytes = sample_pool().serialize();
        bytes.truncate(bytes.len() - 1);
        assert!(NoncePoolMessage::parse(&bytes, false).is_err());
    }
}
