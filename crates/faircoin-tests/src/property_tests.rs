//! Property-based round-trip tests using proptest.

use faircoin_consensus::{merkle_root_of, Block, PartialMerkleTree};
use faircoin_core::{ByteReader, Hash256, VarInt};
use proptest::prelude::*;

fn arb_hash() -> impl Strategy<Value = Hash256> {
    prop::array::uniform32(any::<u8>()).prop_map(Hash256::wrap)
}

fn arb_leaves() -> impl Strategy<Value = Vec<Hash256>> {
    prop::collection::vec(arb_hash(), 1..=24)
}

proptest! {
    #[test]
    fn varint_round_trips(value in any::<u64>()) {
        let encoded = VarInt(value).encode();
        prop_assert_eq!(encoded.len(), VarInt::size_of(value));
        let (decoded, consumed) = VarInt::decode(&encoded).unwrap();
        prop_assert_eq!(decoded, value);
        prop_assert_eq!(consumed, encoded.len());
    }

    #[test]
    fn hash_reversal_is_an_involution(bytes in prop::array::uniform32(any::<u8>())) {
        let hash = Hash256::wrap(bytes);
        prop_assert_eq!(Hash256::wrap_reversed(hash.reversed_bytes()), hash);
    }

    #[test]
    fn reader_round_trips_integers(a in any::<u32>(), b in any::<u64>(), c in any::<i64>()) {
        let mut buf = Vec::new();
        faircoin_core::put_u32_le(&mut buf, a);
        faircoin_core::put_u64_le(&mut buf, b);
        faircoin_core::put_i64_le(&mut buf, c);
        let mut reader = ByteReader::new(&buf);
        prop_assert_eq!(reader.read_u32_le().unwrap(), a);
        prop_assert_eq!(reader.read_u64_le().unwrap(), b);
        prop_assert_eq!(reader.read_i64_le().unwrap(), c);
        prop_assert_eq!(reader.remaining(), 0);
    }

    /// Building a proof over any include mask and verifying it reproduces
    /// the direct Merkle root and exactly the selected leaves.
    #[test]
    fn pmt_build_then_verify(
        leaves in arb_leaves(),
        mask_seed in any::<u32>(),
    ) {
        let include: Vec<bool> = (0..leaves.len())
            .map(|i| (mask_seed >> (i % 32)) & 1 == 1)
            .collect();
        let pmt = PartialMerkleTree::from_leaves(&include, &leaves);

        let mut matched = Vec::new();
        let root = pmt.extract_matches(&mut matched).unwrap();
        prop_assert_eq!(root, merkle_root_of(&leaves));

        let expected: Vec<Hash256> = leaves
            .iter()
            .zip(&include)
            .filter(|(_, inc)| **inc)
            .map(|(leaf, _)| *leaf)
            .collect();
        prop_assert_eq!(matched, expected);
    }

    /// A proof survives a wire round trip bit-for-bit.
    #[test]
    fn pmt_wire_round_trips(leaves in arb_leaves(), mask_seed in any::<u32>()) {
        let include: Vec<bool> = (0..leaves.len())
            .map(|i| (mask_seed >> (i % 32)) & 1 == 1)
            .collect();
        let pmt = PartialMerkleTree::from_leaves(&include, &leaves);
        let bytes = pmt.serialize();
        let mut reader = ByteReader::new(&bytes);
        let reparsed = PartialMerkleTree::parse(&mut reader).unwrap();
        prop_assert_eq!(reader.remaining(), 0);
        prop_assert_eq!(&reparsed, &pmt);
        prop_assert_eq!(reparsed.serialize(), bytes);
    }

    /// Synthetic blocks round-trip through parse and re-serialize.
    #[test]
    fn block_round_trips(spends in 0u8..12) {
        let block = crate::generators::block_with_transactions(spends);
        let bytes = block.serialize();
        let reparsed = Block::parse(&bytes, true).unwrap();
        prop_assert_eq!(reparsed.serialize(), bytes.clone());
        prop_assert_eq!(reparsed.hash(), block.hash());

        let rebuilt = Block::parse(&bytes, false).unwrap();
        prop_assert_eq!(rebuilt.serialize(), bytes);
    }
}
