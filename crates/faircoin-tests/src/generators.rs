//! Generators for synthetic blocks and transactions.

use faircoin_consensus::{
    version_bits, Block, Transaction, TransactionInput, TransactionOutPoint, TransactionOutput,
    COIN,
};
use faircoin_core::{Hash256, SchnorrSignature};

/// A coinbase paying fifty coins, with `tag` making it unique.
pub fn coinbase_transaction(tag: u8) -> Transaction {
    Transaction::new(
        1,
        vec![TransactionInput {
            outpoint: TransactionOutPoint::null(),
            script_sig: vec![0x01, tag],
            sequence: u32::MAX,
        }],
        vec![TransactionOutput {
            value: 50 * COIN,
            script_pubkey: vec![0x51],
        }],
        0,
    )
}

/// A one-in one-out spend with a unique fake outpoint derived from `seed`.
pub fn spend_transaction(seed: u8) -> Transaction {
    Transaction::new(
        1,
        vec![TransactionInput {
            outpoint: TransactionOutPoint {
                hash: Hash256::hash_twice_reversed(&[seed]),
                index: 0,
            },
            script_sig: vec![0x00],
            sequence: u32::MAX,
        }],
        vec![TransactionOutput {
            value: COIN,
            script_pubkey: vec![0x51],
        }],
        0,
    )
}

/// A transaction-payload block with a coinbase plus `spends` unique spends.
pub fn block_with_transactions(spends: u8) -> Block {
    let mut block = Block::new_with_version(1 + version_bits::TX_PAYLOAD);
    block.set_time(1_555_000_000);
    block.set_creator_id(0xC001_D00D);
    block
        .add_transaction(coinbase_transaction(1))
        .expect("coinbase first");
    for seed in 0..spends {
        block
            .add_transaction(spend_transaction(seed))
            .expect("spend after coinbase");
    }
    block.set_chain_multi_sig(SchnorrSignature::ALL_ZERO);
    block.set_creator_signature(SchnorrSignature::ALL_ZERO);
    block
}

/// Distinct synthetic transaction ids, numbered from one.
pub fn leaf_ids(count: u8) -> Vec<Hash256> {
    (1..=count)
        .map(|n| {
            let mut bytes = [0u8; 32];
            bytes[0] = n;
            Hash256::wrap(bytes)
        })
        .collect()
}
