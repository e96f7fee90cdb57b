//! # faircoin-consensus
//!
//! Block engine and consensus verifier core for the FairCoin client.
//!
//! This crate provides:
//! - The byte-exact transaction and block codecs, with lazy original-bytes
//!   caching for zero-copy re-serialization
//! - The Merkle engine: full root construction and partial Merkle tree
//!   (SPV proof) build/verify, including the odd-duplication malleability
//!   check
//! - Block-level verification: header drift cap, coinbase uniqueness,
//!   Merkle-root match, sigop cap and per-transaction structural checks
//! - The per-network parameter registry with genesis-hash cross-checks
//!
//! Block authorship on this chain is attested by certified validator nodes
//! (CVNs) with Schnorr signatures rather than proof-of-work; signature
//! verification itself lives above this core, which only encodes, decodes
//! and structurally verifies.

pub mod block;
pub mod chain_params;
mod error;
pub mod merkle;
pub mod params;
pub mod transaction;

pub use block::{
    version_bits, Block, VerifyFlags, ALLOWED_TIME_DRIFT, BLOCK_HEIGHT_GENESIS,
    BLOCK_HEIGHT_UNKNOWN, BLOCK_VERSION_GENESIS, HEADER_SIZE, MAX_BLOCK_SIGOPS,
};
pub use chain_params::{ChainAdmin, CvnInfo, DynamicChainParameters};
pub use error::{ConsensusError, ConsensusResult};
pub use merkle::{merkle_root_of, FilteredBlock, PartialMerkleTree};
pub use params::{mainnet, regtest, testnet, HttpSeed, NetworkParams};
pub use transaction::{
    Transaction, TransactionInput, TransactionOutPoint, TransactionOutput, COIN, MAX_MONEY,
};

pub use faircoin_core::MAX_BLOCK_SIZE;
