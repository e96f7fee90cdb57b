//! Filtered-block and partial Merkle tree tests over real wire data.

use crate::generators::leaf_ids;
use crate::vectors::*;
use faircoin_consensus::{
    merkle_root_of, Block, ConsensusError, FilteredBlock, PartialMerkleTree,
};
use faircoin_core::Hash256;

#[test]
fn filtered_block_with_two_matches() {
    let filtered = FilteredBlock::parse_bytes(&decode(FILTERED_BLOCK_2TX_HEX), true).unwrap();
    assert_eq!(filtered.hash().to_hex(), FILTERED_BLOCK_2TX_HASH);
    assert_eq!(filtered.transaction_count(), 2);

    let matched = filtered.transaction_hashes().unwrap();
    let matched_hex: Vec<String> = matched.iter().map(|h| h.to_hex()).collect();
    assert_eq!(matched_hex, FILTERED_BLOCK_2TX_MATCHED);
}

#[test]
fn filtered_block_round_trips() {
    for hex_str in [FILTERED_BLOCK_2TX_HEX, FILTERED_BLOCK_81891_HEX] {
        let bytes = decode(hex_str);
        let filtered = FilteredBlock::parse_bytes(&bytes, true).unwrap();
        assert_eq!(filtered.serialize(), bytes);
        let reparsed = FilteredBlock::parse_bytes(&filtered.serialize(), true).unwrap();
        assert_eq!(reparsed, filtered);
    }
}

#[test]
fn filtered_block_81891_pairs_with_its_block() {
    let block = Block::parse(&decode(BLOCK_81891_HEX), true).unwrap();
    let filtered = FilteredBlock::parse_bytes(&decode(FILTERED_BLOCK_81891_HEX), true).unwrap();

    assert_eq!(filtered.hash(), block.hash());
    assert_eq!(filtered.transaction_count(), 12);

    let matched = filtered.transaction_hashes().unwrap();
    assert_eq!(matched.len(), 4);
    let matched_hex: Vec<String> = matched.iter().map(|h| h.to_hex()).collect();
    assert_eq!(matched_hex, BLOCK_81891_MATCHED);

    // Every matched id really is a transaction of the block.
    let txs = block.transactions().unwrap();
    for id in &matched {
        assert!(txs.iter().any(|tx| tx.txid() == *id));
    }
}

#[test]
fn full_inclusion_proof_reproduces_direct_root() {
    let block = Block::parse(&decode(BLOCK_81891_HEX), true).unwrap();
    let ids: Vec<Hash256> = block
        .transactions()
        .unwrap()
        .iter()
        .map(|tx| tx.txid())
        .collect();
    let include = vec![true; ids.len()];
    let pmt = PartialMerkleTree::from_leaves(&include, &ids);

    let mut matched = Vec::new();
    let root = pmt.extract_matches(&mut matched).unwrap();
    assert_eq!(root, merkle_root_of(&ids));
    assert_eq!(root, block.merkle_root());
    assert_eq!(matched, ids);
}

#[test]
fn duplicated_tail_is_malleable() {
    // Ten leaves plus the last two repeated, selecting into the duplicated
    // region: the root matches the honest tree but the proof must fail.
    let mut leaves = leaf_ids(10);
    leaves.push(leaves[8]);
    leaves.push(leaves[9]);
    let mut include = vec![false; 12];
    include[9] = true;
    include[10] = true;
    let pmt = PartialMerkleTree::from_leaves(&include, &leaves);

    let mut matched = Vec::new();
    assert_eq!(
        pmt.extract_matches(&mut matched),
        Err(ConsensusError::MalleableMerkleProof)
    );
}

#[test]
fn proof_against_wrong_header_is_rejected() {
    let filtered = FilteredBlock::parse_bytes(&decode(FILTERED_BLOCK_81891_HEX), true).unwrap();
    let mut header = filtered.header().clone();
    header.set_merkle_root(Hash256::hash_twice_reversed(b"not the root"));
    let mismatched = FilteredBlock::new(header, filtered.partial_merkle_tree().clone());
    assert!(matches!(
        mismatched.transaction_hashes(),
        Err(ConsensusError::MerkleMismatch { .. })
    ));
}
