//! Error types for consensus validation.

use faircoin_core::CodecError;
use thiserror::Error;

/// Consensus validation errors.
///
/// A consensus violation is terminal for the block being verified; callers
/// discard the block. The verifier never mutates the block on failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsensusError {
    /// Block had no transactions.
    #[error("Block had no transactions")]
    EmptyBlock,

    /// Serialized block exceeds the network size cap.
    #[error("Block too large: {size} bytes, max {max} bytes")]
    TooLarge { size: usize, max: usize },

    /// The first transaction is not a coinbase.
    #[error("First transaction is not coinbase")]
    FirstNotCoinbase,

    /// A transaction after the first is a coinbase.
    #[error("Transaction {index} is coinbase when it should not be")]
    MultipleCoinbases { index: usize },

    /// The recomputed Merkle root does not match the header.
    #[error("Merkle hashes do not match: computed {computed}, header {header}")]
    MerkleMismatch { computed: String, header: String },

    /// Signature-operation count exceeds the block cap.
    #[error("Block had too many signature operations: {count}, max {max}")]
    TooManySigops { count: usize, max: usize },

    /// Block timestamp is beyond the allowed forward drift.
    #[error("Block too far in future: {time} vs allowed {allowed}")]
    TimestampTooFarInFuture { time: u32, allowed: u32 },

    /// Coinbase input script does not encode the expected height (BIP-34).
    #[error("Block height mismatch in coinbase at height {height}")]
    BadCoinbaseHeight { height: u32 },

    /// A transaction failed its own structural validation.
    #[error("Invalid transaction: {0}")]
    TransactionInvalid(String),

    /// A partial Merkle proof paired a hash with itself at a non-final
    /// position, the signature of the odd-duplication malleability attack.
    #[error("Malleable partial Merkle proof: duplicated hash pair")]
    MalleableMerkleProof,

    /// A registry entry's constructed genesis block hashed to the wrong
    /// value. Fatal; raised during registry initialization only.
    #[error("Genesis hash mismatch for {network}: computed {computed}, expected {expected}")]
    GenesisHashMismatch {
        network: String,
        computed: String,
        expected: String,
    },

    /// Wire-level decoding error.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Result type for consensus operations.
pub type ConsensusResult<T> = Result<T, ConsensusError>;
