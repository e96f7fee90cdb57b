//! The CompactSize variable-length integer codec.

use crate::{CodecError, CodecResult};

/// A CompactSize varint as used for every count and length prefix on the
/// wire: values below `0xFD` are a single byte, then `0xFD` + u16 LE,
/// `0xFE` + u32 LE, `0xFF` + u64 LE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInt(pub u64);

impl VarInt {
    /// Encoded size in bytes of the given value: 1, 3, 5 or 9.
    pub fn size_of(value: u64) -> usize {
        match value {
            0..=0xFC => 1,
            0xFD..=0xFFFF => 3,
            0x1_0000..=0xFFFF_FFFF => 5,
            _ => 9,
        }
    }

    /// Encoded size of this value.
    pub fn size(&self) -> usize {
        Self::size_of(self.0)
    }

    /// Append the encoding to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        match self.0 {
            v @ 0..=0xFC => out.push(v as u8),
            v @ 0xFD..=0xFFFF => {
                out.push(0xFD);
                out.extend_from_slice(&(v as u16).to_le_bytes());
            }
            v @ 0x1_0000..=0xFFFF_FFFF => {
                out.push(0xFE);
                out.extend_from_slice(&(v as u32).to_le_bytes());
            }
            v => {
                out.push(0xFF);
                out.extend_from_slice(&v.to_le_bytes());
            }
        }
    }

    /// The encoding as a fresh vector.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size());
        self.encode_into(&mut out);
        out
    }

    /// Decode from the front of `buf`, returning the value and the number of
    /// bytes consumed.
    pub fn decode(buf: &[u8]) -> CodecResult<(u64, usize)> {
        let tag = *buf.first().ok_or(CodecError::Truncated {
            needed: 1,
            remaining: 0,
        })?;
        let (value, consumed) = match tag {
            0..=0xFC => (tag as u64, 1),
            0xFD => {
                let b = take::<2>(buf, 1)?;
                (u16::from_le_bytes(b) as u64, 3)
            }
            0xFE => {
                let b = take::<4>(buf, 1)?;
                (u32::from_le_bytes(b) as u64, 5)
            }
            0xFF => {
                let b = take::<8>(buf, 1)?;
                (u64::from_le_bytes(b), 9)
            }
        };
        Ok((value, consumed))
    }
}

fn take<const N: usize>(buf: &[u8], at: usize) -> CodecResult<[u8; N]> {
    buf.get(at..at + N)
        .and_then(|s| s.try_into().ok())
        .ok_or(CodecError::Truncated {
            needed: N,
            remaining: buf.len().saturating_sub(at),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_match_encodings() {
        for v in [0u64, 0xFC, 0xFD, 0xFFFF, 0x1_0000, 0xFFFF_FFFF, u64::MAX] {
            assert_eq!(VarInt(v).encode().len(), VarInt::size_of(v));
        }
    }

    #[test]
    fn boundary_encodings() {
        assert_eq!(VarInt(0xFC).encode(), vec![0xFC]);
        assert_eq!(VarInt(0xFD).encode(), vec![0xFD, 0xFD, 0x00]);
        assert_eq!(VarInt(0x1_0000).encode(), vec![0xFE, 0x00, 0x00, 0x01, 0x00]);
    }

    #[test]
    fn decode_round_trips() {
        for v in [0u64, 1, 0xFC, 0xFD, 0x1234, 0xFFFF, 0x7FFF_FFFF, u64::MAX] {
            let enc = VarInt(v).encode();
            let (decoded, consumed) = VarInt::decode(&enc).unwrap();
            assert_eq!(decoded, v);
            assert_eq!(consumed, enc.len());
        }
    }

    #[test]
    fn decode_truncated() {
        assert!(matches!(
            VarInt::decode(&[]),
            Err(CodecError::Truncated { .. })
        ));
        assert!(matches!(
            VarInt::decode(&[0xFE, 0x01]),
            Err(CodecError::Truncated { .. })
        ));
    }
}
