//! Typed peer messages and command dispatch.

use crate::addr::AddressMessage;
use crate::nonce_pool::NoncePoolMessage;
use crate::{NetworkError, NetworkResult};
use faircoin_consensus::{Block, FilteredBlock, HEADER_SIZE};
use faircoin_core::{ByteReader, CodecError, VarInt, MAX_BLOCK_SIZE};
use std::fmt;

/// A wire command: 12 bytes of NUL-padded ASCII in the envelope header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Block,
    Headers,
    MerkleBlock,
    Addr,
    NoncePool,
    /// Any command this client does not dispatch on; the original string is
    /// preserved so the frame can round-trip.
    Unknown(String),
}

impl Command {
    /// Decode the 12-byte header field.
    pub fn from_wire(bytes: &[u8; 12]) -> NetworkResult<Self> {
        let end = bytes.iter().position(|b| *b == 0).unwrap_or(12);
        if bytes[end..].iter().any(|b| *b != 0) {
            return Err(NetworkError::Codec(CodecError::Malformed(
                "command field has bytes after the NUL padding".to_string(),
            )));
        }
        let name = std::str::from_utf8(&bytes[..end])
            .map_err(|_| CodecError::Malformed("command field is not ASCII".to_string()))?;
        if !name.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(NetworkError::Codec(CodecError::Malformed(format!(
                "command field contains non-printable bytes: {:?}",
                name
            ))));
        }
        Ok(match name {
            "block" => Command::Block,
            "headers" => Command::Headers,
            "merkleblock" => Command::MerkleBlock,
            "addr" => Command::Addr,
            "noncepool" => Command::NoncePool,
            other => Command::Unknown(other.to_string()),
        })
    }

    /// The command name as sent on the wire.
    pub fn name(&self) -> &str {
        match self {
            Command::Block => "block",
            Command::Headers => "headers",
            Command::MerkleBlock => "merkleblock",
            Command::Addr => "addr",
            Command::NoncePool => "noncepool",
            Command::Unknown(name) => name,
        }
    }

    /// Encode as the NUL-padded 12-byte header field.
    pub fn to_wire(&self) -> [u8; 12] {
        let mut out = [0u8; 12];
        let name = self.name().as_bytes();
        out[..name.len().min(12)].copy_from_slice(&name[..name.len().min(12)]);
        out
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A `headers` message: a varint count of header-only block records, each
/// exactly 108 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadersMessage {
    pub headers: Vec<Block>,
}

impl HeadersMessage {
    /// Parse from a message payload.
    pub fn parse(payload: &[u8], retain: bool) -> NetworkResult<Self> {
        let mut reader = ByteReader::new(payload);
        let count = reader.read_count(MAX_BLOCK_SIZE / HEADER_SIZE)?;
        let mut headers = Vec::with_capacity(count);
        for _ in 0..count {
            let header_bytes = reader.read_bytes(HEADER_SIZE)?;
            headers.push(Block::parse(header_bytes, retain)?);
        }
        if reader.remaining() != 0 {
            return Err(NetworkError::Codec(CodecError::Malformed(format!(
                "{} trailing bytes after headers",
                reader.remaining()
            ))));
        }
        Ok(HeadersMessage { headers })
    }

    /// The message payload.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            VarInt::size_of(self.headers.len() as u64) + HEADER_SIZE * self.headers.len(),
        );
        VarInt(self.headers.len() as u64).encode_into(&mut out);
        for header in &self.headers {
            header.write_header(&mut out);
        }
        out
    }
}

/// A frame whose command this client does not understand. The raw payload
/// is preserved so the frame re-serializes byte-exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMessage {
    pub command: String,
    pub payload: Vec<u8>,
}

/// A decoded peer message.
#[derive(Debug, Clone)]
pub enum Message {
    Block(Block),
    Headers(HeadersMessage),
    MerkleBlock(FilteredBlock),
    Addr(AddressMessage),
    NoncePool(NoncePoolMessage),
    Unknown(UnknownMessage),
}

impl Message {
    /// Decode a payload according to its command.
    pub fn decode(command: Command, payload: &[u8], retain: bool) -> NetworkResult<Self> {
        Ok(match command {
            Command::Block => Message::Block(Block::parse(payload, retain)?),
            Command::Headers => Message::Headers(HeadersMessage::parse(payload, retain)?),
            Command::MerkleBlock => {
                Message::MerkleBlock(FilteredBlock::parse_bytes(payload, retain)?)
            }
            Command::Addr => Message::Addr(AddressMessage::parse(payload, retain)?),
            Command::NoncePool => Message::NoncePool(NoncePoolMessage::parse(payload, retain)?),
            Command::Unknown(name) => Message::Unknown(UnknownMessage {
                command: name,
                payload: payload.to_vec(),
            }),
        })
    }

    /// The command this message travels under.
    pub fn command(&self) -> Command {
        match self {
            Message::Block(_) => Command::Block,
            Message::Headers(_) => Command::Headers,
            Message::MerkleBlock(_) => Command::MerkleBlock,
            Message::Addr(_) => Command::Addr,
            Message::NoncePool(_) => Command::NoncePool,
            Message::Unknown(unknown) => Command::Unknown(unknown.command.clone()),
        }
    }

    /// The message payload bytes.
    pub fn encode_payload(&self) -> Vec<u8> {
        match self {
            Message::Block(block) => block.serialize(),
            Message::Headers(headers) => headers.encode(),
            Message::MerkleBlock(filtered) => filtered.serialize(),
            Message::Addr(addr) => addr.serialize(),
            Message::NoncePool(pool) => pool.serialize(),
            Message::Unknown(unknown) => unknown.payload.clone(),
        }
    }
}
