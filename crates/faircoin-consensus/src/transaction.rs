//! Byte-exact transaction codec.
//!
//! The chain keeps the classic pre-witness transaction wire format:
//! `version || varint n_in || inputs || varint n_out || outputs ||
//! lock_time`. A transaction parsed in retain mode keeps its original bytes
//! and re-serializes them verbatim until a field is mutated.

use crate::{ConsensusError, ConsensusResult};
use faircoin_core::{
    put_i64_le, put_u32_le, ByteReader, CodecResult, Hash256, VarInt, MAX_BLOCK_SIZE,
};
use std::sync::OnceLock as OnceCell;
use std::collections::HashSet;
use std::fmt;

/// One base currency unit in its smallest denomination.
pub const COIN: i64 = 100_000_000;

/// Upper bound on coin values a transaction output may carry.
pub const MAX_MONEY: i64 = 21_000_000 * COIN;

/// Smallest plausible serialized transaction: version + counts + one empty
/// input + one empty output + lock time.
const MIN_INPUT_SIZE: usize = 41;
const MIN_OUTPUT_SIZE: usize = 9;

const OP_CHECKSIG: u8 = 0xAC;
const OP_CHECKSIGVERIFY: u8 = 0xAD;
const OP_CHECKMULTISIG: u8 = 0xAE;
const OP_CHECKMULTISIGVERIFY: u8 = 0xAF;
const OP_PUSHDATA1: u8 = 0x4C;
const OP_PUSHDATA2: u8 = 0x4D;
const OP_PUSHDATA4: u8 = 0x4E;

/// Reference to an output of a previous transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionOutPoint {
    /// Txid of the transaction holding the output.
    pub hash: Hash256,
    /// Index of the output within that transaction.
    pub index: u32,
}

impl TransactionOutPoint {
    /// The null outpoint that marks a coinbase input.
    pub fn null() -> Self {
        TransactionOutPoint {
            hash: Hash256::ZERO,
            index: u32::MAX,
        }
    }

    /// Whether this is the coinbase marker outpoint.
    pub fn is_null(&self) -> bool {
        self.hash == Hash256::ZERO && self.index == u32::MAX
    }

    fn parse(reader: &mut ByteReader<'_>) -> CodecResult<Self> {
        Ok(TransactionOutPoint {
            hash: reader.read_hash()?,
            index: reader.read_u32_le()?,
        })
    }

    fn serialize_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.hash.reversed_bytes());
        put_u32_le(out, self.index);
    }
}

/// A transaction input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionInput {
    /// The output being spent, or the null outpoint for coinbases.
    pub outpoint: TransactionOutPoint,
    /// The unlocking script.
    pub script_sig: Vec<u8>,
    /// Sequence number.
    pub sequence: u32,
}

impl TransactionInput {
    fn parse(reader: &mut ByteReader<'_>) -> CodecResult<Self> {
        let outpoint = TransactionOutPoint::parse(reader)?;
        let script_len = reader.read_count(MAX_BLOCK_SIZE)?;
        let script_sig = reader.read_bytes(script_len)?.to_vec();
        let sequence = reader.read_u32_le()?;
        Ok(TransactionInput {
            outpoint,
            script_sig,
            sequence,
        })
    }

    fn serialize_into(&self, out: &mut Vec<u8>) {
        self.outpoint.serialize_into(out);
        VarInt(self.script_sig.len() as u64).encode_into(out);
        out.extend_from_slice(&self.script_sig);
        put_u32_le(out, self.sequence);
    }

    fn serialized_size(&self) -> usize {
        36 + VarInt::size_of(self.script_sig.len() as u64) + self.script_sig.len() + 4
    }
}

/// A transaction output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionOutput {
    /// Value in the smallest denomination.
    pub value: i64,
    /// The locking script.
    pub script_pubkey: Vec<u8>,
}

impl TransactionOutput {
    fn parse(reader: &mut ByteReader<'_>) -> CodecResult<Self> {
        let value = reader.read_i64_le()?;
        let script_len = reader.read_count(MAX_BLOCK_SIZE)?;
        let script_pubkey = reader.read_bytes(script_len)?.to_vec();
        Ok(TransactionOutput {
            value,
            script_pubkey,
        })
    }

    fn serialize_into(&self, out: &mut Vec<u8>) {
        put_i64_le(out, self.value);
        VarInt(self.script_pubkey.len() as u64).encode_into(out);
        out.extend_from_slice(&self.script_pubkey);
    }

    fn serialized_size(&self) -> usize {
        8 + VarInt::size_of(self.script_pubkey.len() as u64) + self.script_pubkey.len()
    }
}

/// A transaction, with lazy original-bytes and txid caches.
#[derive(Debug, Clone)]
pub struct Transaction {
    version: u32,
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
    lock_time: u32,

    /// Original wire bytes, retained only while no field has been mutated.
    cached_bytes: Option<Vec<u8>>,
    /// Lazily computed txid; cleared on any mutation.
    cached_txid: OnceCell<Hash256>,
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.inputs == other.inputs
            && self.outputs == other.outputs
            && self.lock_time == other.lock_time
    }
}

impl Eq for Transaction {}

impl Transaction {
    /// Build a transaction from typed fields.
    pub fn new(
        version: u32,
        inputs: Vec<TransactionInput>,
        outputs: Vec<TransactionOutput>,
        lock_time: u32,
    ) -> Self {
        Transaction {
            version,
            inputs,
            outputs,
            lock_time,
            cached_bytes: None,
            cached_txid: OnceCell::new(),
        }
    }

    /// Parse one transaction from the reader. In retain mode the consumed
    /// slice is kept so serialization can reproduce it verbatim.
    pub fn parse(reader: &mut ByteReader<'_>, retain: bool) -> CodecResult<Self> {
        let start = reader.position();
        let version = reader.read_u32_le()?;
        let n_in = reader.read_count(MAX_BLOCK_SIZE / MIN_INPUT_SIZE)?;
        let mut inputs = Vec::with_capacity(n_in);
        for _ in 0..n_in {
            inputs.push(TransactionInput::parse(reader)?);
        }
        let n_out = reader.read_count(MAX_BLOCK_SIZE / MIN_OUTPUT_SIZE)?;
        let mut outputs = Vec::with_capacity(n_out);
        for _ in 0..n_out {
            outputs.push(TransactionOutput::parse(reader)?);
        }
        let lock_time = reader.read_u32_le()?;

        let cached_bytes = retain.then(|| reader.consumed()[start..].to_vec());
        Ok(Transaction {
            version,
            inputs,
            outputs,
            lock_time,
            cached_bytes,
            cached_txid: OnceCell::new(),
        })
    }

    /// Parse a transaction from a standalone buffer, requiring it to be
    /// consumed exactly.
    pub fn from_bytes(bytes: &[u8]) -> CodecResult<Self> {
        let mut reader = ByteReader::new(bytes);
        let tx = Self::parse(&mut reader, true)?;
        if reader.remaining() != 0 {
            return Err(faircoin_core::CodecError::Malformed(format!(
                "{} trailing bytes after transaction",
                reader.remaining()
            )));
        }
        Ok(tx)
    }

    /// Append the wire encoding. Retained original bytes are copied verbatim
    /// when no mutation has occurred.
    pub fn serialize_into(&self, out: &mut Vec<u8>) {
        if let Some(cached) = &self.cached_bytes {
            out.extend_from_slice(cached);
            return;
        }
        put_u32_le(out, self.version);
        VarInt(self.inputs.len() as u64).encode_into(out);
        for input in &self.inputs {
            input.serialize_into(out);
        }
        VarInt(self.outputs.len() as u64).encode_into(out);
        for output in &self.outputs {
            output.serialize_into(out);
        }
        put_u32_le(out, self.lock_time);
    }

    /// The wire encoding as a fresh vector.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.optimal_encoding_size());
        self.serialize_into(&mut out);
        out
    }

    /// Size of the canonical encoding, independent of any retained bytes.
    pub fn optimal_encoding_size(&self) -> usize {
        4 + VarInt::size_of(self.inputs.len() as u64)
            + self.inputs.iter().map(|i| i.serialized_size()).sum::<usize>()
            + VarInt::size_of(self.outputs.len() as u64)
            + self.outputs.iter().map(|o| o.serialized_size()).sum::<usize>()
            + 4
    }

    /// The transaction id: reversed double-SHA-256 of the serialization.
    pub fn txid(&self) -> Hash256 {
        *self
            .cached_txid
            .get_or_init(|| Hash256::hash_twice_reversed(&self.serialize()))
    }

    /// Whether the retained original bytes are still valid.
    pub fn is_cached(&self) -> bool {
        self.cached_bytes.is_some()
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn lock_time(&self) -> u32 {
        self.lock_time
    }

    pub fn inputs(&self) -> &[TransactionInput] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[TransactionOutput] {
        &self.outputs
    }

    /// Set the lock time, invalidating the byte and txid caches.
    pub fn set_lock_time(&mut self, lock_time: u32) {
        self.uncache();
        self.lock_time = lock_time;
    }

    /// Mutable access to the inputs; conservatively invalidates the caches.
    pub fn inputs_mut(&mut self) -> &mut Vec<TransactionInput> {
        self.uncache();
        &mut self.inputs
    }

    /// Mutable access to the outputs; conservatively invalidates the caches.
    pub fn outputs_mut(&mut self) -> &mut Vec<TransactionOutput> {
        self.uncache();
        &mut self.outputs
    }

    fn uncache(&mut self) {
        self.cached_bytes = None;
        self.cached_txid = OnceCell::new();
    }

    /// Whether this transaction is a coinbase: a single input spending the
    /// null outpoint.
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].outpoint.is_null()
    }

    /// Count signature operations over all input and output scripts.
    pub fn sig_op_count(&self) -> usize {
        self.inputs
            .iter()
            .map(|i| count_script_sigops(&i.script_sig))
            .sum::<usize>()
            + self
                .outputs
                .iter()
                .map(|o| count_script_sigops(&o.script_pubkey))
                .sum::<usize>()
    }

    /// Check that the coinbase input script starts with the expected BIP-34
    /// height push.
    pub fn check_coinbase_height(&self, height: u32) -> ConsensusResult<()> {
        let expected = encode_height_push(height);
        let script = self
            .inputs
            .first()
            .map(|i| i.script_sig.as_slice())
            .unwrap_or(&[]);
        if script.len() < expected.len() || script[..expected.len()] != expected[..] {
            return Err(ConsensusError::BadCoinbaseHeight { height });
        }
        Ok(())
    }

    /// Structural validation of a single transaction, independent of the
    /// chain and of any transaction index.
    pub fn verify(&self) -> ConsensusResult<()> {
        if self.inputs.is_empty() {
            return Err(ConsensusError::TransactionInvalid(
                "transaction has no inputs".to_string(),
            ));
        }
        if self.outputs.is_empty() {
            return Err(ConsensusError::TransactionInvalid(
                "transaction has no outputs".to_string(),
            ));
        }
        if self.optimal_encoding_size() > MAX_BLOCK_SIZE {
            return Err(ConsensusError::TransactionInvalid(
                "transaction larger than the block size cap".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(self.inputs.len());
        for input in &self.inputs {
            if !seen.insert(&input.outpoint) {
                return Err(ConsensusError::TransactionInvalid(format!(
                    "duplicated outpoint {}:{}",
                    input.outpoint.hash, input.outpoint.index
                )));
            }
        }

        let mut total: i64 = 0;
        for output in &self.outputs {
            if output.value < 0 {
                return Err(ConsensusError::TransactionInvalid(
                    "negative output value".to_string(),
                ));
            }
            if output.value > MAX_MONEY {
                return Err(ConsensusError::TransactionInvalid(
                    "output value exceeds the money supply cap".to_string(),
                ));
            }
            total = total.checked_add(output.value).ok_or_else(|| {
                ConsensusError::TransactionInvalid("output value sum overflows".to_string())
            })?;
            if total > MAX_MONEY {
                return Err(ConsensusError::TransactionInvalid(
                    "total output value exceeds the money supply cap".to_string(),
                ));
            }
        }

        if self.is_coinbase() {
            let len = self.inputs[0].script_sig.len();
            if !(2..=100).contains(&len) {
                return Err(ConsensusError::TransactionInvalid(format!(
                    "coinbase script size out of range: {}",
                    len
                )));
            }
        } else {
            for input in &self.inputs {
                if input.outpoint.is_null() {
                    return Err(ConsensusError::TransactionInvalid(
                        "coinbase outpoint on a non-coinbase transaction".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tx {} ({} inputs, {} outputs{})",
            self.txid(),
            self.inputs.len(),
            self.outputs.len(),
            if self.is_coinbase() { ", coinbase" } else { "" }
        )
    }
}

/// Count sigops in one script, skipping over push data.
fn count_script_sigops(script: &[u8]) -> usize {
    let mut count = 0;
    let mut i = 0;
    while i < script.len() {
        let op = script[i];
        i += 1;
        match op {
            0x01..=0x4B => i += op as usize,
            OP_PUSHDATA1 => {
                if i >= script.len() {
                    break;
                }
                i += 1 + script[i] as usize;
            }
            OP_PUSHDATA2 => {
                if i + 2 > script.len() {
                    break;
                }
                let len = u16::from_le_bytes([script[i], script[i + 1]]) as usize;
                i += 2 + len;
            }
            OP_PUSHDATA4 => {
                if i + 4 > script.len() {
                    break;
                }
                let len = u32::from_le_bytes([
                    script[i],
                    script[i + 1],
                    script[i + 2],
                    script[i + 3],
                ]) as usize;
                i += 4 + len;
            }
            OP_CHECKSIG | OP_CHECKSIGVERIFY => count += 1,
            OP_CHECKMULTISIG | OP_CHECKMULTISIGVERIFY => count += 20,
            _ => {}
        }
    }
    count
}

/// The minimal script push of a block height, as BIP-34 requires at the
/// front of coinbase input scripts.
fn encode_height_push(height: u32) -> Vec<u8> {
    match height {
        0 => vec![0x00],
        1..=16 => vec![0x50 + height as u8],
        _ => {
            let mut bytes = Vec::with_capacity(5);
            let mut v = height;
            while v > 0 {
                bytes.push((v & 0xFF) as u8);
                v >>= 8;
            }
            if bytes.last().is_some_and(|b| b & 0x80 != 0) {
                bytes.push(0x00);
            }
            let mut push = Vec::with_capacity(1 + bytes.len());
            push.push(bytes.len() as u8);
            push.extend_from_slice(&bytes);
            push
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coinbase_tx(height_script: Vec<u8>) -> Transaction {
        Transaction::new(
            1,
            vec![TransactionInput {
                outpoint: TransactionOutPoint::null(),
                script_sig: height_script,
                sequence: u32::MAX,
            }],
            vec![TransactionOutput {
                value: 50 * COIN,
                script_pubkey: vec![0x51],
            }],
            0,
        )
    }

    fn spend_tx() -> Transaction {
        Transaction::new(
            1,
            vec![TransactionInput {
                outpoint: TransactionOutPoint {
                    hash: Hash256::hash_twice_reversed(b"prev"),
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

    #[test]
    fn round_trip_preserves_bytes() {
        let bytes = spend_tx().serialize();
        let tx = Transaction::from_bytes(&bytes).unwrap();
        assert!(tx.is_cached());
        assert_eq!(tx.serialize(), bytes);
    }

    #[test]
    fn mutation_invalidates_cache_and_txid() {
        let bytes = spend_tx().serialize();
        let mut tx = Transaction::from_bytes(&bytes).unwrap();
        let txid_before = tx.txid();
        tx.set_lock_time(1);
        assert!(!tx.is_cached());
        assert_ne!(tx.serialize(), bytes);
        assert_ne!(tx.txid(), txid_before);
    }

    #[test]
    fn setting_same_value_still_uncaches() {
        let bytes = spend_tx().serialize();
        let mut tx = Transaction::from_bytes(&bytes).unwrap();
        tx.set_lock_time(tx.lock_time());
        assert!(!tx.is_cached());
        // Canonical re-serialization still reproduces the bytes.
        assert_eq!(tx.serialize(), bytes);
    }

    #[test]
    fn coinbase_predicate() {
        assert!(coinbase_tx(vec![0x01, 0x02]).is_coinbase());
        assert!(!spend_tx().is_coinbase());
    }

    #[test]
    fn coinbase_height_check() {
        // Height 300_000 encodes as a 3-byte push.
        let cb = coinbase_tx(vec![0x03, 0xE0, 0x93, 0x04, 0xFF]);
        assert!(cb.check_coinbase_height(300_000).is_ok());
        assert!(matches!(
            cb.check_coinbase_height(300_001),
            Err(ConsensusError::BadCoinbaseHeight { .. })
        ));
    }

    #[test]
    fn small_heights_use_op_n() {
        let cb = coinbase_tx(vec![0x53, 0x00]);
        assert!(cb.check_coinbase_height(3).is_ok());
    }

    #[test]
    fn sigop_counting() {
        let mut tx = spend_tx();
        tx.outputs_mut()[0].script_pubkey = vec![OP_CHECKSIG, OP_CHECKMULTISIG];
        assert_eq!(tx.sig_op_count(), 21);
        // Push data containing opcode bytes must not be counted.
        tx.outputs_mut()[0].script_pubkey = vec![0x02, OP_CHECKSIG, OP_CHECKSIG];
        assert_eq!(tx.sig_op_count(), 0);
    }

    #[test]
    fn verify_rejects_duplicate_outpoints() {
        let mut tx = spend_tx();
        let dup = tx.inputs()[0].clone();
        tx.inputs_mut().push(dup);
        assert!(matches!(
            tx.verify(),
            Err(ConsensusError::TransactionInvalid(_))
        ));
    }

    #[test]
    fn verify_rejects_coinbase_script_size() {
        let cb = coinbase_tx(vec![0x01]);
        assert!(cb.verify().is_err());
        let cb = coinbase_tx(vec![0x01, 0x02]);
        assert!(cb.verify().is_ok());
    }

    #[test]
    fn verify_rejects_null_outpoint_on_spend() {
        let mut tx = spend_tx();
        tx.inputs_mut().push(TransactionInput {
            outpoint: TransactionOutPoint::null(),
            script_sig: vec![],
            sequence: 0,
        });
        assert!(tx.verify().is_err());
    }
}
