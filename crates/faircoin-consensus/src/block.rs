//! Block model and wire codec.
//!
//! A block is a fixed 108-byte header followed by optional payload sections
//! gated by bits of the version word. The parser retains the original bytes
//! (in retain mode) so an unmutated block re-serializes verbatim; any setter
//! invalidates the affected half of the cache.
//!
//! Blocks are single-owner, single-threaded values: the lazy hash and Merkle
//! root caches are not synchronized, and concurrent readers of one instance
//! are a race by contract.

use crate::chain_params::{ChainAdmin, CvnInfo, DynamicChainParameters};
use crate::merkle::merkle_root_of;
use crate::transaction::Transaction;
use crate::{ConsensusError, ConsensusResult};
use faircoin_core::{
    put_u32_le, ByteReader, CodecError, CodecResult, Hash256, SchnorrSignature, VarInt,
    MAX_BLOCK_SIZE,
};
use std::sync::OnceLock as OnceCell;
use std::collections::BTreeSet;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, instrument};

/// Bytes in a serialized block header.
pub const HEADER_SIZE: usize = 108;

/// Signature-operation cap per block.
pub const MAX_BLOCK_SIGOPS: usize = MAX_BLOCK_SIZE / 50;

/// Allowed forward clock drift for block timestamps, in seconds.
pub const ALLOWED_TIME_DRIFT: u32 = 2 * 60 * 60;

/// Block height value meaning "unknown".
pub const BLOCK_HEIGHT_UNKNOWN: i32 = -1;

/// Height of the genesis block.
pub const BLOCK_HEIGHT_GENESIS: i32 = 0;

/// Smallest plausible serialized transaction, used to cap wire-declared
/// transaction counts.
pub(crate) const MIN_TX_SIZE: usize = 60;

/// Version-word payload bits. The low byte of the version word is an
/// ordinary protocol version number; bits 8..12 gate the payload sections.
pub mod version_bits {
    /// Transactions section present.
    pub const TX_PAYLOAD: u32 = 1 << 8;
    /// CVN list present.
    pub const CVN_PAYLOAD: u32 = 1 << 9;
    /// Dynamic chain parameters present.
    pub const CHAIN_PARAMETERS_PAYLOAD: u32 = 1 << 10;
    /// Chain admin list present.
    pub const CHAIN_ADMINS_PAYLOAD: u32 = 1 << 11;
    /// Coin supply section present.
    pub const COIN_SUPPLY_PAYLOAD: u32 = 1 << 12;
    /// Any governance payload.
    pub const ADMIN_PAYLOAD_MASK: u32 =
        CVN_PAYLOAD | CHAIN_PARAMETERS_PAYLOAD | CHAIN_ADMINS_PAYLOAD | COIN_SUPPLY_PAYLOAD;
    /// Any payload at all.
    pub const PAYLOAD_MASK: u32 = TX_PAYLOAD | ADMIN_PAYLOAD_MASK;
}

/// The version word genesis blocks carry: protocol version 1 plus every
/// payload bit except coin supply.
pub const BLOCK_VERSION_GENESIS: u32 = 1
    + (version_bits::TX_PAYLOAD
        | version_bits::CVN_PAYLOAD
        | version_bits::CHAIN_PARAMETERS_PAYLOAD
        | version_bits::CHAIN_ADMINS_PAYLOAD);

/// Flags selecting which optional verification rules run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerifyFlags {
    /// Check that the block height is encoded in the coinbase input script
    /// (BIP-34).
    pub height_in_coinbase: bool,
}

/// A block: 108-byte header plus version-gated payload sections.
#[derive(Debug, Clone)]
pub struct Block {
    version: u32,
    prev_block_hash: Hash256,
    payload_hash: Hash256,
    time: u32,
    creator_id: u32,

    /// `None` means this value holds only a header.
    transactions: Option<Vec<Transaction>>,

    chain_multi_sig: Option<SchnorrSignature>,
    missing_signer_ids: BTreeSet<u32>,
    admin_multi_sig: Option<SchnorrSignature>,
    admin_ids: BTreeSet<u32>,
    creator_signature: Option<SchnorrSignature>,
    cvns: Vec<CvnInfo>,
    chain_admins: Vec<ChainAdmin>,
    dynamic_chain_params: Option<DynamicChainParameters>,

    /// Merkle root; parsed from the wire or recomputed on demand.
    merkle_root: OnceCell<Hash256>,
    /// Block hash over the 108 header bytes; recomputed on demand.
    hash: OnceCell<Hash256>,

    /// Original wire bytes, retained while the validity flags allow.
    original_bytes: Option<Vec<u8>>,
    header_bytes_valid: bool,
    transaction_bytes_valid: bool,
}

impl Block {
    /// Construct an empty block carrying the given version word. Used by the
    /// registry for genesis construction, by `clone_as_header` and by tests.
    pub fn new_with_version(version: u32) -> Self {
        Block {
            version,
            prev_block_hash: Hash256::ZERO,
            payload_hash: Hash256::ZERO,
            time: 0,
            creator_id: 0,
            transactions: None,
            chain_multi_sig: None,
            missing_signer_ids: BTreeSet::new(),
            admin_multi_sig: None,
            admin_ids: BTreeSet::new(),
            creator_signature: None,
            cvns: Vec::new(),
            chain_admins: Vec::new(),
            dynamic_chain_params: None,
            merkle_root: OnceCell::new(),
            hash: OnceCell::new(),
            original_bytes: None,
            header_bytes_valid: false,
            transaction_bytes_valid: false,
        }
    }

    /// Parse a block from a complete buffer. In retain mode the buffer is
    /// kept so serialization reproduces it verbatim until a mutation.
    pub fn parse(bytes: &[u8], retain: bool) -> CodecResult<Self> {
        let mut reader = ByteReader::new(bytes);
        let mut block = Self::parse_from(&mut reader, bytes.len(), retain)?;
        if reader.remaining() != 0 {
            return Err(CodecError::Malformed(format!(
                "{} trailing bytes after block",
                reader.remaining()
            )));
        }
        if retain {
            block.original_bytes = Some(bytes.to_vec());
        }
        Ok(block)
    }

    /// Parse a block occupying exactly `length` bytes from the reader's
    /// current position. Callers that need the retained-buffer guarantee go
    /// through [`Block::parse`], which owns the whole buffer.
    fn parse_from(reader: &mut ByteReader<'_>, length: usize, retain: bool) -> CodecResult<Self> {
        let start = reader.position();
        let end = start + length;

        let mut block = Self::new_with_version(0);
        block.version = reader.read_u32_le()?;
        block.prev_block_hash = reader.read_hash()?;
        let wire_merkle_root = reader.read_hash()?;
        block.merkle_root.set(wire_merkle_root).ok();
        block.payload_hash = reader.read_hash()?;
        block.time = reader.read_u32_le()?;
        block.creator_id = reader.read_u32_le()?;
        block
            .hash
            .set(Hash256::hash_twice_reversed(
                &reader.consumed()[start..start + HEADER_SIZE],
            ))
            .ok();
        block.header_bytes_valid = retain;

        // A buffer that ends with the header is a header-only record.
        if reader.position() >= end {
            return Ok(block);
        }

        let n_tx = reader.read_count(MAX_BLOCK_SIZE / MIN_TX_SIZE)?;
        let mut txs = Vec::with_capacity(n_tx);
        for _ in 0..n_tx {
            txs.push(Transaction::parse(reader, retain)?);
        }
        let empty = txs.is_empty();
        block.transactions = Some(txs);
        block.transaction_bytes_valid = retain;
        if empty {
            return Ok(block);
        }

        block.chain_multi_sig = Some(reader.read_signature()?);
        block.missing_signer_ids = parse_ids(reader)?;

        if block.has_admin_payload() {
            block.admin_multi_sig = Some(reader.read_signature()?);
            block.admin_ids = parse_ids(reader)?;
        }

        block.creator_signature = Some(reader.read_signature()?);

        if block.has_cvn_info() {
            let n = reader.read_count(MAX_BLOCK_SIZE / 40)?;
            block.cvns.reserve(n);
            for _ in 0..n {
                block.cvns.push(CvnInfo::parse(reader)?);
            }
        }

        if block.has_chain_admins() {
            let n = reader.read_count(MAX_BLOCK_SIZE / 40)?;
            block.chain_admins.reserve(n);
            for _ in 0..n {
                block.chain_admins.push(ChainAdmin::parse(reader)?);
            }
        }

        if block.has_chain_parameters() {
            block.dynamic_chain_params = Some(DynamicChainParameters::parse(reader)?);
        }

        Ok(block)
    }

    // ------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------

    /// Append the 108 header bytes, copying the retained slice when valid.
    pub fn write_header(&self, out: &mut Vec<u8>) {
        if self.header_bytes_valid {
            if let Some(original) = &self.original_bytes {
                if original.len() >= HEADER_SIZE {
                    out.extend_from_slice(&original[..HEADER_SIZE]);
                    return;
                }
            }
        }
        put_u32_le(out, self.version);
        out.extend_from_slice(&self.prev_block_hash.reversed_bytes());
        out.extend_from_slice(&self.merkle_root().reversed_bytes());
        out.extend_from_slice(&self.payload_hash.reversed_bytes());
        put_u32_le(out, self.time);
        put_u32_le(out, self.creator_id);
    }

    /// Append everything after the header, copying the retained slice when
    /// valid.
    pub fn write_transactions(&self, out: &mut Vec<u8>) {
        let Some(txs) = &self.transactions else {
            return;
        };
        if self.transaction_bytes_valid {
            if let Some(original) = &self.original_bytes {
                out.extend_from_slice(&original[HEADER_SIZE..]);
                return;
            }
        }

        VarInt(txs.len() as u64).encode_into(out);
        for tx in txs {
            tx.serialize_into(out);
        }
        if txs.is_empty() {
            return;
        }

        write_signature(out, &self.chain_multi_sig);
        write_ids(out, &self.missing_signer_ids);

        if self.has_admin_payload() {
            write_signature(out, &self.admin_multi_sig);
            write_ids(out, &self.admin_ids);
        }

        write_signature(out, &self.creator_signature);

        if self.has_cvn_info() {
            VarInt(self.cvns.len() as u64).encode_into(out);
            for cvn in &self.cvns {
                cvn.serialize_into(out);
            }
        }

        if self.has_chain_admins() {
            VarInt(self.chain_admins.len() as u64).encode_into(out);
            for admin in &self.chain_admins {
                admin.serialize_into(out);
            }
        }

        if self.has_chain_parameters() {
            if let Some(params) = &self.dynamic_chain_params {
                params.serialize_into(out);
            }
        }
    }

    /// The full wire encoding. When both halves of the byte cache are valid
    /// the retained buffer is returned verbatim.
    pub fn serialize(&self) -> Vec<u8> {
        if self.header_bytes_valid && self.transaction_bytes_valid {
            if let Some(original) = &self.original_bytes {
                return original.clone();
            }
        }
        let mut out = Vec::with_capacity(self.optimal_encoding_size());
        self.write_header(&mut out);
        self.write_transactions(&mut out);
        out
    }

    /// Size of the canonical encoding, computed from fields so the block
    /// size cap is checked against the optimal encoding rather than whatever
    /// padding the wire happened to carry.
    pub fn optimal_encoding_size(&self) -> usize {
        let mut size = HEADER_SIZE;
        let Some(txs) = &self.transactions else {
            return size;
        };
        size += VarInt::size_of(txs.len() as u64);
        size += txs.iter().map(|t| t.optimal_encoding_size()).sum::<usize>();
        if txs.is_empty() {
            return size;
        }
        size += 64 + ids_size(&self.missing_signer_ids);
        if self.has_admin_payload() {
            size += 64 + ids_size(&self.admin_ids);
        }
        size += 64;
        if self.has_cvn_info() {
            size += VarInt::size_of(self.cvns.len() as u64) + 40 * self.cvns.len();
        }
        if self.has_chain_admins() {
            size += VarInt::size_of(self.chain_admins.len() as u64) + 40 * self.chain_admins.len();
        }
        if self.has_chain_parameters() {
            if let Some(p) = &self.dynamic_chain_params {
                let mut buf = Vec::new();
                p.serialize_into(&mut buf);
                size += buf.len();
            }
        }
        size
    }

    // ------------------------------------------------------------------
    // Hashing
    // ------------------------------------------------------------------

    /// The block hash: reversed double-SHA-256 over the 108 header bytes
    /// only. Cached until a header field is mutated.
    pub fn hash(&self) -> Hash256 {
        *self.hash.get_or_init(|| {
            let mut header = Vec::with_capacity(HEADER_SIZE);
            self.write_header(&mut header);
            Hash256::hash_twice_reversed(&header)
        })
    }

    /// The Merkle root, recomputed from the transaction ids when not cached
    /// from the wire. A block with no transactions and no cached root yields
    /// the zero hash.
    pub fn merkle_root(&self) -> Hash256 {
        *self.merkle_root.get_or_init(|| {
            match &self.transactions {
                Some(txs) if !txs.is_empty() => {
                    let ids: Vec<Hash256> = txs.iter().map(|t| t.txid()).collect();
                    merkle_root_of(&ids)
                }
                _ => Hash256::ZERO,
            }
        })
    }

    /// The scalar work surrogate used by the chain selector: the full
    /// signer-set size minus the signers missing from this block.
    pub fn work(&self) -> u64 {
        20u64.saturating_sub(self.missing_signer_ids.len() as u64)
    }

    /// New coin created by the block at the given height: fifty coins,
    /// halved every `subsidy_decrease_block_count` blocks.
    pub fn block_inflation(height: u32, subsidy_decrease_block_count: u32) -> i64 {
        let halvings = height / subsidy_decrease_block_count;
        if halvings >= 63 {
            return 0;
        }
        (50 * crate::transaction::COIN) >> halvings
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn prev_block_hash(&self) -> Hash256 {
        self.prev_block_hash
    }

    pub fn payload_hash(&self) -> Hash256 {
        self.payload_hash
    }

    /// Seconds since the UNIX epoch at which the block was created.
    pub fn time(&self) -> u32 {
        self.time
    }

    pub fn creator_id(&self) -> u32 {
        self.creator_id
    }

    /// The transactions, or `None` for a header-only record.
    pub fn transactions(&self) -> Option<&[Transaction]> {
        self.transactions.as_deref()
    }

    pub fn chain_multi_sig(&self) -> Option<&SchnorrSignature> {
        self.chain_multi_sig.as_ref()
    }

    pub fn missing_signer_ids(&self) -> &BTreeSet<u32> {
        &self.missing_signer_ids
    }

    pub fn admin_multi_sig(&self) -> Option<&SchnorrSignature> {
        self.admin_multi_sig.as_ref()
    }

    pub fn admin_ids(&self) -> &BTreeSet<u32> {
        &self.admin_ids
    }

    pub fn creator_signature(&self) -> Option<&SchnorrSignature> {
        self.creator_signature.as_ref()
    }

    pub fn cvns(&self) -> &[CvnInfo] {
        &self.cvns
    }

    pub fn chain_admins(&self) -> &[ChainAdmin] {
        &self.chain_admins
    }

    pub fn dynamic_chain_params(&self) -> Option<&DynamicChainParameters> {
        self.dynamic_chain_params.as_ref()
    }

    pub fn is_header_bytes_valid(&self) -> bool {
        self.header_bytes_valid
    }

    pub fn is_transaction_bytes_valid(&self) -> bool {
        self.transaction_bytes_valid
    }

    /// Whether this block holds any transactions (is not purely a header).
    pub fn has_transactions(&self) -> bool {
        self.transactions.as_ref().is_some_and(|t| !t.is_empty())
    }

    pub fn has_tx(&self) -> bool {
        self.version & version_bits::TX_PAYLOAD != 0
    }

    pub fn has_cvn_info(&self) -> bool {
        self.version & version_bits::CVN_PAYLOAD != 0
    }

    pub fn has_chain_parameters(&self) -> bool {
        self.version & version_bits::CHAIN_PARAMETERS_PAYLOAD != 0
    }

    pub fn has_chain_admins(&self) -> bool {
        self.version & version_bits::CHAIN_ADMINS_PAYLOAD != 0
    }

    pub fn has_coin_supply_payload(&self) -> bool {
        self.version & version_bits::COIN_SUPPLY_PAYLOAD != 0
    }

    pub fn has_admin_payload(&self) -> bool {
        self.version & version_bits::ADMIN_PAYLOAD_MASK != 0
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    pub fn set_prev_block_hash(&mut self, hash: Hash256) {
        self.uncache_header();
        self.prev_block_hash = hash;
    }

    pub fn set_merkle_root(&mut self, root: Hash256) {
        self.uncache_header();
        self.merkle_root = OnceCell::new();
        self.merkle_root.set(root).ok();
    }

    pub fn set_payload_hash(&mut self, hash: Hash256) {
        self.uncache_header();
        self.payload_hash = hash;
    }

    pub fn set_time(&mut self, time: u32) {
        self.uncache_header();
        self.time = time;
    }

    pub fn set_creator_id(&mut self, creator_id: u32) {
        self.uncache_header();
        self.creator_id = creator_id;
    }

    pub fn set_chain_multi_sig(&mut self, sig: SchnorrSignature) {
        self.uncache_body();
        self.chain_multi_sig = Some(sig);
    }

    pub fn set_missing_signer_ids(&mut self, ids: BTreeSet<u32>) {
        self.uncache_body();
        self.missing_signer_ids = ids;
    }

    pub fn set_admin_multi_sig(&mut self, sig: SchnorrSignature) {
        self.uncache_body();
        self.admin_multi_sig = Some(sig);
    }

    pub fn set_admin_ids(&mut self, ids: BTreeSet<u32>) {
        self.uncache_body();
        self.admin_ids = ids;
    }

    pub fn set_creator_signature(&mut self, sig: SchnorrSignature) {
        self.uncache_body();
        self.creator_signature = Some(sig);
    }

    pub fn set_cvns(&mut self, cvns: Vec<CvnInfo>) {
        self.uncache_body();
        self.cvns = cvns;
    }

    pub fn set_chain_admins(&mut self, admins: Vec<ChainAdmin>) {
        self.uncache_body();
        self.chain_admins = admins;
    }

    pub fn set_dynamic_chain_params(&mut self, params: DynamicChainParameters) {
        self.uncache_body();
        self.dynamic_chain_params = Some(params);
    }

    /// Replace the whole transaction list. The Merkle root and hash caches
    /// are invalidated.
    pub fn set_transactions(&mut self, transactions: Vec<Transaction>) {
        self.uncache_transactions();
        self.transactions = Some(transactions);
    }

    /// Mutable access to the transactions. Conservatively invalidates the
    /// byte caches, the Merkle root and the hash, since any child mutation
    /// must propagate up to this block.
    pub fn transactions_mut(&mut self) -> Option<&mut Vec<Transaction>> {
        self.uncache_transactions();
        self.transactions.as_mut()
    }

    /// Add a transaction, enforcing that exactly the first one is a
    /// coinbase.
    pub fn add_transaction(&mut self, tx: Transaction) -> ConsensusResult<()> {
        self.uncache_transactions();
        let txs = self.transactions.get_or_insert_with(Vec::new);
        if txs.is_empty() && !tx.is_coinbase() {
            return Err(ConsensusError::FirstNotCoinbase);
        }
        if !txs.is_empty() && tx.is_coinbase() {
            return Err(ConsensusError::MultipleCoinbases { index: txs.len() });
        }
        txs.push(tx);
        Ok(())
    }

    fn uncache_header(&mut self) {
        self.header_bytes_valid = false;
        if !self.transaction_bytes_valid {
            self.original_bytes = None;
        }
        self.hash = OnceCell::new();
    }

    /// Invalidate the body byte cache without touching the Merkle root: the
    /// tail sections share the cached byte range with the transactions but
    /// do not feed the root or the block hash.
    fn uncache_body(&mut self) {
        self.transaction_bytes_valid = false;
        if !self.header_bytes_valid {
            self.original_bytes = None;
        }
    }

    fn uncache_transactions(&mut self) {
        self.uncache_body();
        // Any transaction change alters the Merkle root, so the header bytes
        // and hash go stale as well.
        self.uncache_header();
        self.merkle_root = OnceCell::new();
    }

    /// A copy of the block without any transactions or payload sections.
    pub fn clone_as_header(&self) -> Block {
        let mut header = Block::new_with_version(self.version);
        header.prev_block_hash = self.prev_block_hash;
        header.payload_hash = self.payload_hash;
        header.time = self.time;
        header.creator_id = self.creator_id;
        header.merkle_root.set(self.merkle_root()).ok();
        header.hash.set(self.hash()).ok();
        header
    }

    // ------------------------------------------------------------------
    // Verification
    // ------------------------------------------------------------------

    /// Header checks against the current system clock.
    pub fn verify_header(&self) -> ConsensusResult<()> {
        self.verify_header_at(current_time_seconds())
    }

    /// Header checks against an explicit "now". The only chain-independent
    /// header rule on this chain is the forward drift cap; block authorship
    /// is proven by creator signatures checked above this core.
    pub fn verify_header_at(&self, now: u32) -> ConsensusResult<()> {
        let allowed = now.saturating_add(ALLOWED_TIME_DRIFT);
        if self.time > allowed {
            return Err(ConsensusError::TimestampTooFarInFuture {
                time: self.time,
                allowed,
            });
        }
        Ok(())
    }

    /// Body checks: the transactions must actually match the header.
    ///
    /// `height` is the block height if known, or [`BLOCK_HEIGHT_UNKNOWN`];
    /// when known and the flag is set, the coinbase must encode it.
    #[instrument(skip(self, flags))]
    pub fn verify_transactions(&self, height: i32, flags: VerifyFlags) -> ConsensusResult<()> {
        let txs = match &self.transactions {
            Some(txs) if !txs.is_empty() => txs,
            _ => return Err(ConsensusError::EmptyBlock),
        };

        let size = self.optimal_encoding_size();
        if size > MAX_BLOCK_SIZE {
            return Err(ConsensusError::TooLarge {
                size,
                max: MAX_BLOCK_SIZE,
            });
        }

        if !txs[0].is_coinbase() {
            return Err(ConsensusError::FirstNotCoinbase);
        }
        if flags.height_in_coinbase && height >= BLOCK_HEIGHT_GENESIS {
            txs[0].check_coinbase_height(height as u32)?;
        }
        for (index, tx) in txs.iter().enumerate().skip(1) {
            if tx.is_coinbase() {
                return Err(ConsensusError::MultipleCoinbases { index });
            }
        }

        let ids: Vec<Hash256> = txs.iter().map(|t| t.txid()).collect();
        let computed = merkle_root_of(&ids);
        let header_root = self.merkle_root();
        if computed != header_root {
            debug!(
                computed = %computed,
                header = %header_root,
                "Merkle tree did not verify"
            );
            return Err(ConsensusError::MerkleMismatch {
                computed: computed.to_hex(),
                header: header_root.to_hex(),
            });
        }

        let sigops: usize = txs.iter().map(|t| t.sig_op_count()).sum();
        if sigops > MAX_BLOCK_SIGOPS {
            return Err(ConsensusError::TooManySigops {
                count: sigops,
                max: MAX_BLOCK_SIGOPS,
            });
        }

        for tx in txs {
            tx.verify()?;
        }
        debug!(hash = %self.hash(), "block transactions verified");
        Ok(())
    }

    /// Verify both the header and the body.
    pub fn verify(&self, height: i32, flags: VerifyFlags) -> ConsensusResult<()> {
        self.verify_header()?;
        self.verify_transactions(height, flags)
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.hash() == other.hash()
    }
}

impl Eq for Block {}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "block:")?;
        writeln!(f, "   hash: {}", self.hash())?;
        writeln!(
            f,
            "   version: {} ({})",
            self.version & 0xFF,
            self.payload_description()
        )?;
        writeln!(f, "   previous block: {}", self.prev_block_hash)?;
        writeln!(f, "   merkle root: {}", self.merkle_root())?;
        writeln!(f, "   payload hash: {}", self.payload_hash)?;
        writeln!(f, "   time: {}", self.time)?;
        writeln!(f, "   creator ID: 0x{:08x}", self.creator_id)?;
        if let Some(txs) = &self.transactions {
            writeln!(f, "   with {} transaction(s)", txs.len())?;
        }
        Ok(())
    }
}

/// `missingSignerIds` / `adminIds` wire shape: varint count plus u32 LE
/// entries. Semantically a set; every parsed id is retained.
fn parse_ids(reader: &mut ByteReader<'_>) -> CodecResult<BTreeSet<u32>> {
    let n = reader.read_count(MAX_BLOCK_SIZE / 4)?;
    let mut ids = BTreeSet::new();
    for _ in 0..n {
        ids.insert(reader.read_u32_le()?);
    }
    Ok(ids)
}

/// Canonical id serialization: ascending numeric order, so round-trip bytes
/// are stable.
fn write_ids(out: &mut Vec<u8>, ids: &BTreeSet<u32>) {
    VarInt(ids.len() as u64).encode_into(out);
    for id in ids {
        put_u32_le(out, *id);
    }
}

fn ids_size(ids: &BTreeSet<u32>) -> usize {
    VarInt::size_of(ids.len() as u64) + 4 * ids.len()
}

fn write_signature(out: &mut Vec<u8>, sig: &Option<SchnorrSignature>) {
    let sig = sig.unwrap_or(SchnorrSignature::ALL_ZERO);
    out.extend_from_slice(&sig.reversed_bytes());
}

fn current_time_seconds() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or(0)
}

impl Block {
    fn payload_description(&self) -> String {
        let mut parts = Vec::new();
        if self.has_tx() {
            parts.push("tx");
        }
        if self.has_cvn_info() {
            parts.push("cvninfo");
        }
        if self.has_chain_parameters() {
            parts.push("params");
        }
        if self.has_chain_admins() {
            parts.push("admins");
        }
        if self.has_coin_supply_payload() {
            parts.push("supply");
        }
        parts.join("|")
    }
}
