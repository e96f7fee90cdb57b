//! The address broadcast message.

use crate::NetworkResult;
use faircoin_core::{
    put_u16_be, put_u32_le, put_u64_le, ByteReader, CodecError, VarInt, MAX_BLOCK_SIZE,
};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Serialized size of one address record: time (4) + services (8) +
/// ip (16) + port (2).
const PEER_ADDRESS_SIZE: usize = 30;

/// One peer address entry: last-seen time, service bits, IP and port.
/// IPv4 addresses travel IPv6-mapped on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerAddress {
    /// Last-seen timestamp, seconds since the UNIX epoch.
    pub time: u32,
    /// Service flags advertised by the peer.
    pub services: u64,
    /// The peer's IP address.
    pub addr: IpAddr,
    /// The peer's TCP port.
    pub port: u16,
}

impl PeerAddress {
    /// Build an IPv4 entry.
    pub fn ipv4(time: u32, services: u64, addr: Ipv4Addr, port: u16) -> Self {
        PeerAddress {
            time,
            services,
            addr: IpAddr::V4(addr),
            port,
        }
    }

    fn parse(reader: &mut ByteReader<'_>) -> NetworkResult<Self> {
        let time = reader.read_u32_le()?;
        let services = reader.read_u64_le()?;
        let ip_bytes: [u8; 16] = reader.read_bytes(16)?.try_into().expect("length checked");
        let v6 = Ipv6Addr::from(ip_bytes);
        let addr = match v6.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(v6),
        };
        let port = reader.read_u16_be()?;
        Ok(PeerAddress {
            time,
            services,
            addr,
            port,
        })
    }

    fn serialize_into(&self, out: &mut Vec<u8>) {
        put_u32_le(out, self.time);
        put_u64_le(out, self.services);
        let v6 = match self.addr {
            IpAddr::V4(v4) => v4.to_ipv6_mapped(),
            IpAddr::V6(v6) => v6,
        };
        out.extend_from_slice(&v6.octets());
        put_u16_be(out, self.port);
    }
}

/// An `addr` message: a varint-prefixed list of peer address records.
#[derive(Debug, Clone)]
pub struct AddressMessage {
    addresses: Vec<PeerAddress>,

    /// Original payload bytes; dropped on any mutation.
    cached_bytes: Option<Vec<u8>>,
    /// Serialized length, kept current across add/remove.
    length: usize,
}

impl PartialEq for AddressMessage {
    fn eq(&self, other: &Self) -> bool {
        self.addresses == other.addresses
    }
}

impl Eq for AddressMessage {}

impl AddressMessage {
    /// Build from typed entries.
    pub fn new(addresses: Vec<PeerAddress>) -> Self {
        let length = Self::length_for(addresses.len());
        AddressMessage {
            addresses,
            cached_bytes: None,
            length,
        }
    }

    fn length_for(count: usize) -> usize {
        VarInt::size_of(count as u64) + PEER_ADDRESS_SIZE * count
    }

    /// Parse from a message payload.
    pub fn parse(payload: &[u8], retain: bool) -> NetworkResult<Self> {
        let mut reader = ByteReader::new(payload);
        let count = reader.read_count(MAX_BLOCK_SIZE / PEER_ADDRESS_SIZE)?;
        let mut addresses = Vec::with_capacity(count);
        for _ in 0..count {
            addresses.push(PeerAddress::parse(&mut reader)?);
        }
        if reader.remaining() != 0 {
            return Err(crate::NetworkError::Codec(CodecError::Malformed(format!(
                "{} trailing bytes after addresses",
                reader.remaining()
            ))));
        }
        Ok(AddressMessage {
            addresses,
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
        VarInt(self.addresses.len() as u64).encode_into(&mut out);
        for address in &self.addresses {
            address.serialize_into(&mut out);
        }
        out
    }

    /// The address entries.
    pub fn addresses(&self) -> &[PeerAddress] {
        &self.addresses
    }

    /// Current serialized length, tracked across mutations.
    pub fn serialized_length(&self) -> usize {
        self.length
    }

    /// Whether the retained payload bytes are still valid.
    pub fn is_cached(&self) -> bool {
        self.cached_bytes.is_some()
    }

    /// Append an entry, growing the tracked length by one record and
    /// invalidating the byte cache.
    pub fn add_address(&mut self, address: PeerAddress) {
        self.cached_bytes = None;
        let count_growth =
            VarInt::size_of(self.addresses.len() as u64 + 1) - VarInt::size_of(self.addresses.len() as u64);
        self.addresses.push(address);
        self.length += PEER_ADDRESS_SIZE + count_growth;
    }

    /// Remove the entry at `index`, shrinking the tracked length by one
    /// record and invalidating the byte cache.
    pub fn remove_address(&mut self, index: usize) -> PeerAddress {
        self.cached_bytes = None;
        let count_shrink =
            VarInt::size_of(self.addresses.len() as u64) - VarInt::size_of(self.addresses.len() as u64 - 1);
        let address = self.addresses.remove(index);
        self.length -= PEER_ADDRESS_SIZE + count_shrink;
        address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(last_octet: u8, port: u16) -> PeerAddress {
        PeerAddress::ipv4(1_292_899_810, 1, Ipv4Addr::new(10, 0, 0, last_octet), port)
    }

    #[test]
    fn single_entry_payload_is_31_bytes() {
        let message = AddressMessage::new(vec![entry(1, 8333)]);
        assert_eq!(message.serialized_length(), 31);
        assert_eq!(message.serialize().len(), 31);
    }

    #[test]
    fn round_trip() {
        let message = AddressMessage::new(vec![entry(1, 8333), entry(2, 40404)]);
        let bytes = message.serialize();
        let reparsed = AddressMessage::parse(&bytes, true).unwrap();
        assert_eq!(reparsed, message);
        assert_eq!(reparsed.serialize(), bytes);
    }

    #[test]
    fn add_and_remove_adjust_length() {
        let bytes = AddressMessage::new(vec![entry(1, 8333)]).serialize();
        let mut message = AddressMessage::parse(&bytes, true).unwrap();
        assert!(message.is_cached());
        assert_eq!(message.serialized_length(), 31);

        message.add_address(entry(2, 40404));
        assert!(!message.is_cached());
        assert_eq!(message.serialized_length(), 61);
        assert_eq!(message.serialize().len(), 61);

        message.remove_address(0);
        assert_eq!(message.serialized_length(), 31);
        assert_eq!(message.serialize().len(), 31);
        assert_eq!(message.addresses()[0].port, 40404);
    }

    #[test]
    fn ipv4_travels_mapped() {
        let bytes = AddressMessage::new(vec![entry(1, 8333)]).serialize();
        // varint + time + services, then the 12-byte IPv6-mapped prefix.
        assert_eq!(&bytes[13..25], &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xFF, 0xFF]);
        let reparsed = AddressMessage::parse(&bytes, false).unwrap();
        assert_eq!(
            reparsed.addresses()[0].addr,
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1))
        );
    }

    #[test]
    fn ipv6_round_trips() {
        let v6 = PeerAddress {
            time: 1_292_899_810,
            services: 5,
            addr: IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1)),
            port: 41404,
        };
        let message = AddressMessage::new(vec![v6.clone()]);
        let reparsed = AddressMessage::parse(&message.serialize(), false).unwrap();
        assert_eq!(reparsed.addresses()[0], v6);
    }

    #[test]
    fn oversize_count_rejected_before_allocation() {
        let payload = [0xFE, 0xFF, 0xFF, 0xFF, 0x7F];
        assert!(matches!(
            AddressMessage::parse(&payload, false),
            Err(crate::NetworkError::Codec(CodecError::Oversize { .. }))
        ));
    }
}
