//! Envelope framing and message dispatch tests over real frames.

use crate::vectors::*;
use bytes::Bytes;
use faircoin_network::{Message, MessageSerializer, NetworkError, PeerAddress};
use std::net::{IpAddr, Ipv4Addr};

const MAINNET_MAGIC: u32 = 0xFABF_B5DA;

fn serializer() -> MessageSerializer {
    MessageSerializer::with_retain_mode(MAINNET_MAGIC)
}

#[test]
fn addr_frame_decodes() {
    let mut src = Bytes::from(decode(ADDRESS_MESSAGE_HEX));
    let message = serializer().deserialize(&mut src).unwrap();
    let Message::Addr(addr) = &message else {
        panic!("expected addr message");
    };
    assert_eq!(addr.addresses().len(), 1);
    let peer = &addr.addresses()[0];
    assert_eq!(peer.port, 8333);
    assert_eq!(peer.addr, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));
    assert_eq!(peer.services, 1);
    assert_eq!(addr.serialized_length(), 31);
}

#[test]
fn addr_frame_reserializes_byte_exactly() {
    let original = decode(ADDRESS_MESSAGE_HEX);
    let mut src = Bytes::from(original.clone());
    let message = serializer().deserialize(&mut src).unwrap();
    assert_eq!(serializer().serialize(&message), original);
}

#[test]
fn addr_size_accounting_across_mutation() {
    let mut src = Bytes::from(decode(ADDRESS_MESSAGE_HEX));
    let Message::Addr(mut addr) = serializer().deserialize(&mut src).unwrap() else {
        panic!("expected addr message");
    };
    assert_eq!(addr.serialized_length(), 31);
    addr.add_address(PeerAddress::ipv4(0, 1, Ipv4Addr::LOCALHOST, 40404));
    assert_eq!(addr.serialized_length(), 61);
    addr.remove_address(0);
    assert_eq!(addr.serialized_length(), 31);
    assert_eq!(addr.serialize().len(), 31);
}

#[test]
fn headers_frame_with_one_header() {
    let original = decode(HEADERS_MESSAGE_1_HEX);
    let mut src = Bytes::from(original.clone());
    let message = serializer().deserialize(&mut src).unwrap();
    let Message::Headers(headers) = &message else {
        panic!("expected headers message");
    };
    assert_eq!(headers.headers.len(), 1);
    assert_eq!(
        headers.headers[0].hash().to_hex(),
        HEADERS_MESSAGE_6_HASH_0
    );
    assert!(headers.headers[0].transactions().is_none());
    assert_eq!(serializer().serialize(&message), original);
}

#[test]
fn headers_frame_with_six_headers() {
    let original = decode(HEADERS_MESSAGE_6_HEX);
    let mut src = Bytes::from(original.clone());
    let message = serializer().deserialize(&mut src).unwrap();
    let Message::Headers(headers) = &message else {
        panic!("expected headers message");
    };
    assert_eq!(headers.headers.len(), 6);
    assert_eq!(
        headers.headers[0].hash().to_hex(),
        HEADERS_MESSAGE_6_HASH_0
    );
    assert_eq!(
        headers.headers[3].hash().to_hex(),
        HEADERS_MESSAGE_6_HASH_3
    );
    // Every record is a pure header.
    assert!(headers.headers.iter().all(|h| h.transactions().is_none()));
    assert_eq!(serializer().serialize(&message), original);
}

#[test]
fn block_frame_round_trips() {
    let payload = decode(BLOCK_81891_HEX);
    let mut src = Bytes::from(serializer().serialize(&Message::Block(
        faircoin_consensus::Block::parse(&payload, true).unwrap(),
    )));
    let framed = src.clone();
    let message = serializer().deserialize(&mut src).unwrap();
    let Message::Block(block) = &message else {
        panic!("expected block message");
    };
    assert_eq!(block.hash().to_hex(), BLOCK_81891_HASH);
    assert_eq!(Bytes::from(serializer().serialize(&message)), framed);
}

#[test]
fn merkleblock_frame_round_trips() {
    let filtered =
        faircoin_consensus::FilteredBlock::parse_bytes(&decode(FILTERED_BLOCK_81891_HEX), true)
            .unwrap();
    let framed = serializer().serialize(&Message::MerkleBlock(filtered));
    let mut src = Bytes::from(framed.clone());
    let message = serializer().deserialize(&mut src).unwrap();
    let Message::MerkleBlock(reparsed) = &message else {
        panic!("expected merkleblock message");
    };
    assert_eq!(reparsed.hash().to_hex(), BLOCK_81891_HASH);
    assert_eq!(serializer().serialize(&message), framed);
}

#[test]
fn wrong_magic_never_matches() {
    let testnet = MessageSerializer::new(0x0C12_0A08);
    let mut src = Bytes::from(decode(ADDRESS_MESSAGE_HEX));
    assert!(matches!(
        testnet.seek_past_magic(&mut src),
        Err(NetworkError::Codec(_))
    ));
}

#[test]
fn truncated_frame_is_rejected() {
    let mut bytes = decode(ADDRESS_MESSAGE_HEX);
    bytes.truncate(bytes.len() - 1);
    let mut src = Bytes::from(bytes);
    assert!(matches!(
        serializer().deserialize(&mut src),
        Err(NetworkError::Codec(_))
    ));
}
