//! Magic-prefixed packet framing.

use crate::message::{Command, Message};
use crate::{NetworkError, NetworkResult};
use bytes::{Buf, Bytes};
use faircoin_core::{hash_twice, put_u32_le, CodecError, MAX_BLOCK_SIZE};
use tracing::trace;

/// Envelope header size: magic (4) + command (12) + length (4) +
/// checksum (4).
pub const ENVELOPE_HEADER_SIZE: usize = 24;

/// A decoded packet header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketHeader {
    /// The dispatch command.
    pub command: Command,
    /// Declared payload length.
    pub length: u32,
    /// First four bytes of double-SHA-256 over the payload.
    pub checksum: [u8; 4],
}

/// Frames and unframes peer messages for one network.
///
/// In retain mode, child objects parsed out of payloads keep their original
/// bytes for zero-copy re-serialization.
#[derive(Debug, Clone)]
pub struct MessageSerializer {
    magic: u32,
    retain_mode: bool,
}

impl MessageSerializer {
    /// Create a serializer for the given packet magic.
    pub fn new(magic: u32) -> Self {
        MessageSerializer {
            magic,
            retain_mode: false,
        }
    }

    /// Create a serializer whose parsed messages retain their original
    /// bytes.
    pub fn with_retain_mode(magic: u32) -> Self {
        MessageSerializer {
            magic,
            retain_mode: true,
        }
    }

    /// Whether parsed messages retain their original bytes.
    pub fn is_parse_retain_mode(&self) -> bool {
        self.retain_mode
    }

    /// The network magic this serializer frames with.
    pub fn magic(&self) -> u32 {
        self.magic
    }

    /// Advance the buffer until it is positioned at the start of the
    /// network magic, discarding garbage. Fails with `Truncated` when the
    /// buffer runs out without a match.
    pub fn seek_past_magic(&self, src: &mut Bytes) -> NetworkResult<()> {
        let magic = self.magic.to_be_bytes();
        while src.remaining() >= 4 {
            if src[..4] == magic {
                return Ok(());
            }
            src.advance(1);
        }
        Err(NetworkError::Codec(CodecError::Truncated {
            needed: 4,
            remaining: src.remaining(),
        }))
    }

    /// Read the 24-byte envelope header, including the magic.
    pub fn read_header(&self, src: &mut Bytes) -> NetworkResult<PacketHeader> {
        if src.remaining() < ENVELOPE_HEADER_SIZE {
            return Err(NetworkError::Codec(CodecError::Truncated {
                needed: ENVELOPE_HEADER_SIZE,
                remaining: src.remaining(),
            }));
        }
        src.advance(4); // magic, already matched by seek_past_magic

        let mut command_bytes = [0u8; 12];
        src.copy_to_slice(&mut command_bytes);
        let command = Command::from_wire(&command_bytes)?;

        let length = src.get_u32_le();
        if length as usize > MAX_BLOCK_SIZE {
            return Err(NetworkError::Codec(CodecError::Oversize {
                declared: length as u64,
                max: MAX_BLOCK_SIZE as u64,
            }));
        }

        let mut checksum = [0u8; 4];
        src.copy_to_slice(&mut checksum);

        Ok(PacketHeader {
            command,
            length,
            checksum,
        })
    }

    /// Read one complete message: seek to the magic, read the header,
    /// validate the checksum and dispatch on the command.
    pub fn deserialize(&self, src: &mut Bytes) -> NetworkResult<Message> {
        self.seek_past_magic(src)?;
        let header = self.read_header(src)?;

        if src.remaining() < header.length as usize {
            return Err(NetworkError::Codec(CodecError::Truncated {
                needed: header.length as usize,
                remaining: src.remaining(),
            }));
        }
        let payload = src.copy_to_bytes(header.length as usize);

        let computed = &hash_twice(&payload)[..4];
        if computed != header.checksum {
            return Err(NetworkError::ChecksumMismatch {
                expected: hex::encode(header.checksum),
                got: hex::encode(computed),
            });
        }

        trace!(command = %header.command, length = header.length, "frame accepted");
        Message::decode(header.command, &payload, self.retain_mode)
    }

    /// Frame a message: header plus payload with a freshly computed
    /// checksum.
    pub fn serialize(&self, message: &Message) -> Vec<u8> {
        let payload = message.encode_payload();
        let mut out = Vec::with_capacity(ENVELOPE_HEADER_SIZE + payload.len());
        out.extend_from_slice(&self.magic.to_be_bytes());
        out.extend_from_slice(&message.command().to_wire());
        put_u32_le(&mut out, payload.len() as u32);
        out.extend_from_slice(&hash_twice(&payload)[..4]);
        out.extend_from_slice(&payload);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAGIC: u32 = 0xFABF_B5DA;

    fn frame(command: &[u8], payload: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&MAGIC.to_be_bytes());
        let mut cmd = [0u8; 12];
        cmd[..command.len()].copy_from_slice(command);
        bytes.extend_from_slice(&cmd);
        put_u32_le(&mut bytes, payload.len() as u32);
        bytes.extend_from_slice(&hash_twice(payload)[..4]);
        bytes.extend_from_slice(payload);
        bytes
    }

    #[test]
    fn seek_past_magic_skips_garbage() {
        let serializer = MessageSerializer::new(MAGIC);
        let mut bytes = vec![0x00, 0x11, 0x22];
        bytes.extend_from_slice(&frame(b"addr", &[0x00]));
        let mut src = Bytes::from(bytes);
        serializer.seek_past_magic(&mut src).unwrap();
        assert_eq!(src[..4], MAGIC.to_be_bytes());
    }

    #[test]
    fn seek_past_magic_underflows_on_garbage_only() {
        let serializer = MessageSerializer::new(MAGIC);
        let mut src = Bytes::from_static(&[0x00, 0x00, 0x00]);
        assert!(matches!(
            serializer.seek_past_magic(&mut src),
            Err(NetworkError::Codec(CodecError::Truncated { .. }))
        ));
    }

    #[test]
    fn short_header_is_truncated() {
        let serializer = MessageSerializer::new(MAGIC);
        let mut src = Bytes::from(MAGIC.to_be_bytes().to_vec());
        assert!(matches!(
            serializer.read_header(&mut src),
            Err(NetworkError::Codec(CodecError::Truncated { .. }))
        ));
    }

    #[test]
    fn oversize_length_is_rejected() {
        // Declared length one past the cap.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&MAGIC.to_be_bytes());
        bytes.extend_from_slice(&[0u8; 12]);
        put_u32_le(&mut bytes, (MAX_BLOCK_SIZE + 1) as u32);
        bytes.extend_from_slice(&[0u8; 4]);
        let serializer = MessageSerializer::new(MAGIC);
        let mut src = Bytes::from(bytes);
        assert!(matches!(
            serializer.read_header(&mut src),
            Err(NetworkError::Codec(CodecError::Oversize { .. }))
        ));
    }

    #[test]
    fn bad_checksum_is_rejected() {
        let serializer = MessageSerializer::new(MAGIC);
        let mut bytes = frame(b"wtfmessage", &[1, 2, 3]);
        let payload_start = bytes.len() - 3;
        bytes[payload_start] ^= 0xFF;
        let mut src = Bytes::from(bytes);
        assert!(matches!(
            serializer.deserialize(&mut src),
            Err(NetworkError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn unknown_command_round_trips_payload() {
        let serializer = MessageSerializer::new(MAGIC);
        let original = frame(b"wtfmessage", &[1, 2, 3]);
        let mut src = Bytes::from(original.clone());
        let message = serializer.deserialize(&mut src).unwrap();
        match &message {
            Message::Unknown(unknown) => {
                assert_eq!(unknown.command, "wtfmessage");
                assert_eq!(unknown.payload, vec![1, 2, 3]);
            }
            other => panic!("expected Unknown, got {:?}", other),
        }
        assert_eq!(serializer.serialize(&message), original);
    }
}
