//! Bounds-checked cursor over wire bytes.

use crate::{
    CodecError, CodecResult, Hash256, SchnorrNonce, SchnorrPublicKey, SchnorrSignature, VarInt,
};

/// A reading cursor over a byte slice.
///
/// Every read is bounds-checked and fails with [`CodecError::Truncated`]
/// rather than panicking; counts read from the wire must go through
/// [`ByteReader::read_count`] so oversize declarations are rejected before
/// any allocation happens.
#[derive(Debug)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a reader over the whole slice.
    pub fn new(buf: &'a [u8]) -> Self {
        ByteReader { buf, pos: 0 }
    }

    /// Current cursor position from the start of the slice.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// The slice consumed so far.
    pub fn consumed(&self) -> &'a [u8] {
        &self.buf[..self.pos]
    }

    /// Take `n` raw bytes.
    pub fn read_bytes(&mut self, n: usize) -> CodecResult<&'a [u8]> {
        if self.remaining() < n {
            return Err(CodecError::Truncated {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn read_array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        Ok(self.read_bytes(N)?.try_into().expect("length checked"))
    }

    /// Read a little-endian u16.
    pub fn read_u16_le(&mut self) -> CodecResult<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Read a big-endian u16 (port numbers in address records).
    pub fn read_u16_be(&mut self) -> CodecResult<u16> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    /// Read a little-endian u32.
    pub fn read_u32_le(&mut self) -> CodecResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u64.
    pub fn read_u64_le(&mut self) -> CodecResult<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian i64.
    pub fn read_i64_le(&mut self) -> CodecResult<i64> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    /// Read a CompactSize varint.
    pub fn read_varint(&mut self) -> CodecResult<u64> {
        let (value, consumed) = VarInt::decode(&self.buf[self.pos..])?;
        self.pos += consumed;
        Ok(value)
    }

    /// Read a varint that will be used as an element count, rejecting it
    /// with [`CodecError::Oversize`] if it exceeds `max`. This must be used
    /// for every wire-supplied count before sizing an allocation.
    pub fn read_count(&mut self, max: usize) -> CodecResult<usize> {
        let value = self.read_varint()?;
        if value > max as u64 {
            return Err(CodecError::Oversize {
                declared: value,
                max: max as u64,
            });
        }
        Ok(value as usize)
    }

    /// Read a 32-byte hash, reversing from wire to display orientation.
    pub fn read_hash(&mut self) -> CodecResult<Hash256> {
        Ok(Hash256::wrap_reversed(self.read_array()?))
    }

    /// Read a 64-byte Schnorr signature, reversing from wire orientation.
    pub fn read_signature(&mut self) -> CodecResult<SchnorrSignature> {
        Ok(SchnorrSignature::wrap_reversed(self.read_array()?))
    }

    /// Read a 64-byte Schnorr nonce, reversing from wire orientation.
    pub fn read_nonce(&mut self) -> CodecResult<SchnorrNonce> {
        Ok(SchnorrNonce::wrap_reversed(self.read_array()?))
    }

    /// Read a 32-byte Schnorr public key, reversing from wire orientation.
    pub fn read_pubkey(&mut self) -> CodecResult<SchnorrPublicKey> {
        Ok(SchnorrPublicKey::wrap_reversed(self.read_array()?))
    }

    /// Read a varint-length-prefixed UTF-8 string.
    pub fn read_string(&mut self, max_len: usize) -> CodecResult<String> {
        let len = self.read_count(max_len)?;
        let bytes = self.read_bytes(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| CodecError::Malformed(format!("invalid UTF-8 string: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_fixed_width_integers() {
        let buf = [0x01, 0x00, 0x00, 0x00, 0xFF, 0xFF];
        let mut r = ByteReader::new(&buf);
        assert_eq!(r.read_u32_le().unwrap(), 1);
        assert_eq!(r.read_u16_be().unwrap(), 0xFFFF);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn truncated_read_reports_remaining() {
        let mut r = ByteReader::new(&[0u8; 3]);
        match r.read_u32_le() {
            Err(CodecError::Truncated { needed, remaining }) => {
                assert_eq!(needed, 4);
                assert_eq!(remaining, 3);
            }
            other => panic!("expected Truncated, got {:?}", other),
        }
    }

    #[test]
    fn read_count_rejects_oversize_before_reading_elements() {
        // 0xFE prefix declares a u32 count of 0x7FFFFFFF.
        let buf = [0xFE, 0xFF, 0xFF, 0xFF, 0x7F];
        let mut r = ByteReader::new(&buf);
        assert!(matches!(
            r.read_count(1000),
            Err(CodecError::Oversize { declared, .. }) if declared == 0x7FFF_FFFF
        ));
    }

    #[test]
    fn read_hash_reverses_wire_bytes() {
        let mut wire = [0u8; 32];
        wire[0] = 0xAB;
        let mut r = ByteReader::new(&wire);
        let h = r.read_hash().unwrap();
        assert_eq!(h.as_bytes()[31], 0xAB);
        assert_eq!(h.reversed_bytes(), wire);
    }

    #[test]
    fn read_string_rejects_bad_utf8() {
        let buf = [0x02, 0xFF, 0xFE];
        let mut r = ByteReader::new(&buf);
        assert!(matches!(r.read_string(16), Err(CodecError::Malformed(_))));
    }
}
