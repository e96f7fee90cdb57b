//! Merkle tree construction and partial Merkle tree (SPV) proofs.
//!
//! The full tree pairs transaction ids left to right per level; an unpaired
//! final entry is paired with itself. That duplication rule is what admits
//! the classic malleability attack: a proof can list the duplicated pair
//! explicitly at a non-final position and still reproduce the root, so the
//! verifier rejects any adjacent identical pair it did not create itself.

use crate::block::{Block, HEADER_SIZE, MIN_TX_SIZE};
use crate::{ConsensusError, ConsensusResult};
use faircoin_core::{
    hash_twice, put_u32_le, ByteReader, CodecError, CodecResult, Hash256, VarInt, MAX_BLOCK_SIZE,
};
use tracing::trace;

/// Cap on the transaction count a partial Merkle tree may declare, derived
/// from the smallest plausible transaction.
const MAX_PMT_TX_COUNT: u32 = (MAX_BLOCK_SIZE / MIN_TX_SIZE) as u32;

/// Combine two child hashes into their parent.
fn hash_pair(left: &Hash256, right: &Hash256) -> Hash256 {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(&left.reversed_bytes());
    buf[32..].copy_from_slice(&right.reversed_bytes());
    Hash256::wrap_reversed(hash_twice(&buf))
}

/// Compute the Merkle root of an ordered sequence of transaction ids.
///
/// A single id is its own root. The root of an empty sequence is the zero
/// hash; blocks are never empty so this only arises for callers probing
/// degenerate inputs.
pub fn merkle_root_of(tx_ids: &[Hash256]) -> Hash256 {
    match tx_ids {
        [] => Hash256::ZERO,
        [only] => *only,
        _ => {
            let mut level = tx_ids.to_vec();
            while level.len() > 1 {
                let mut next = Vec::with_capacity((level.len() + 1) / 2);
                for pair in level.chunks(2) {
                    let left = &pair[0];
                    let right = pair.get(1).unwrap_or(left);
                    next.push(hash_pair(left, right));
                }
                level = next;
            }
            level[0]
        }
    }
}

/// A partial Merkle tree: enough interior hashes plus a traversal bit
/// stream to prove that a subset of a block's transactions is committed to
/// by the block's Merkle root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialMerkleTree {
    tx_count: u32,
    hashes: Vec<Hash256>,
    /// Traversal flags packed little-endian per byte, exactly as on the
    /// wire (trailing pad bits are zero).
    flag_bytes: Vec<u8>,
}

impl PartialMerkleTree {
    /// Build a proof for the leaves selected by `include`, one flag per
    /// transaction id.
    pub fn from_leaves(include: &[bool], tx_ids: &[Hash256]) -> Self {
        assert_eq!(include.len(), tx_ids.len(), "one include bit per leaf");
        let tx_count = tx_ids.len() as u32;
        let mut builder = Builder {
            tx_count,
            tx_ids,
            include,
            bits: Vec::new(),
            hashes: Vec::new(),
        };
        let height = tree_height(tx_count);
        builder.traverse(height, 0);

        let mut flag_bytes = vec![0u8; (builder.bits.len() + 7) / 8];
        for (i, bit) in builder.bits.iter().enumerate() {
            if *bit {
                flag_bytes[i / 8] |= 1 << (i % 8);
            }
        }
        PartialMerkleTree {
            tx_count,
            hashes: builder.hashes,
            flag_bytes,
        }
    }

    /// Parse from the wire: `tx_count u32 || varint n_hashes || hashes ||
    /// varint n_flag_bytes || flag bytes`. Declared counts are bounded
    /// before anything is allocated.
    pub fn parse(reader: &mut ByteReader<'_>) -> CodecResult<Self> {
        let tx_count = reader.read_u32_le()?;
        // A proof never carries more hashes than the block has transactions.
        let hash_cap = (tx_count as usize).min(MAX_PMT_TX_COUNT as usize);
        let n_hashes = reader.read_count(hash_cap)?;
        let mut hashes = Vec::with_capacity(n_hashes);
        for _ in 0..n_hashes {
            hashes.push(reader.read_hash()?);
        }
        let n_flag_bytes = reader.read_count(MAX_BLOCK_SIZE)?;
        let flag_bytes = reader.read_bytes(n_flag_bytes)?.to_vec();
        Ok(PartialMerkleTree {
            tx_count,
            hashes,
            flag_bytes,
        })
    }

    /// Append the wire encoding.
    pub fn serialize_into(&self, out: &mut Vec<u8>) {
        put_u32_le(out, self.tx_count);
        VarInt(self.hashes.len() as u64).encode_into(out);
        for hash in &self.hashes {
            out.extend_from_slice(&hash.reversed_bytes());
        }
        VarInt(self.flag_bytes.len() as u64).encode_into(out);
        out.extend_from_slice(&self.flag_bytes);
    }

    /// The wire encoding as a fresh vector.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.serialize_into(&mut out);
        out
    }

    /// Number of transactions in the block this proof covers.
    pub fn transaction_count(&self) -> u32 {
        self.tx_count
    }

    /// Recompute the root by the inverse traversal, filling `matched` with
    /// the proven transaction ids in leaf order.
    ///
    /// Fails if the proof is structurally inconsistent, leaves hashes or
    /// flag bits unconsumed, or pairs a hash with itself anywhere the
    /// builder would not have (the malleability rule).
    pub fn extract_matches(&self, matched: &mut Vec<Hash256>) -> ConsensusResult<Hash256> {
        matched.clear();
        if self.tx_count == 0 {
            return Err(ConsensusError::Codec(CodecError::Malformed(
                "partial Merkle tree has zero transactions".to_string(),
            )));
        }
        if self.tx_count > MAX_PMT_TX_COUNT {
            return Err(ConsensusError::Codec(CodecError::Oversize {
                declared: self.tx_count as u64,
                max: MAX_PMT_TX_COUNT as u64,
            }));
        }
        if self.hashes.len() as u32 > self.tx_count {
            return Err(ConsensusError::Codec(CodecError::Malformed(
                "more hashes than transactions in partial Merkle tree".to_string(),
            )));
        }

        let mut cursor = Cursor {
            tx_count: self.tx_count,
            hashes: &self.hashes,
            flag_bytes: &self.flag_bytes,
            bits_used: 0,
            hashes_used: 0,
        };
        let height = tree_height(self.tx_count);
        let root = cursor.traverse(height, 0, matched)?;

        // Everything must be consumed: at most seven zero pad bits may
        // remain in the final flag byte.
        if (cursor.bits_used + 7) / 8 != self.flag_bytes.len() {
            return Err(ConsensusError::Codec(CodecError::Malformed(
                "unconsumed flag bits in partial Merkle tree".to_string(),
            )));
        }
        if cursor.hashes_used != self.hashes.len() {
            return Err(ConsensusError::Codec(CodecError::Malformed(
                "unconsumed hashes in partial Merkle tree".to_string(),
            )));
        }
        trace!(
            tx_count = self.tx_count,
            matched = matched.len(),
            root = %root,
            "partial Merkle tree verified"
        );
        Ok(root)
    }
}

/// Width of the implicit tree at the given height (0 = leaves).
fn tree_width(tx_count: u32, height: u32) -> u32 {
    (tx_count + (1 << height) - 1) >> height
}

/// Height of the implicit tree: the level at which only the root remains.
fn tree_height(tx_count: u32) -> u32 {
    let mut height = 0;
    while tree_width(tx_count, height) > 1 {
        height += 1;
    }
    height
}

struct Builder<'a> {
    tx_count: u32,
    tx_ids: &'a [Hash256],
    include: &'a [bool],
    bits: Vec<bool>,
    hashes: Vec<Hash256>,
}

impl Builder<'_> {
    fn subtree_hash(&self, height: u32, pos: u32) -> Hash256 {
        if height == 0 {
            return self.tx_ids[pos as usize];
        }
        let left = self.subtree_hash(height - 1, pos * 2);
        let right = if pos * 2 + 1 < tree_width(self.tx_count, height - 1) {
            self.subtree_hash(height - 1, pos * 2 + 1)
        } else {
            left
        };
        hash_pair(&left, &right)
    }

    fn subtree_matches(&self, height: u32, pos: u32) -> bool {
        let first = (pos as usize) << height;
        let last = (((pos + 1) as usize) << height).min(self.tx_count as usize);
        self.include[first..last].iter().any(|b| *b)
    }

    fn traverse(&mut self, height: u32, pos: u32) {
        let descend = self.subtree_matches(height, pos);
        self.bits.push(descend);
        if height == 0 || !descend {
            self.hashes.push(self.subtree_hash(height, pos));
        } else {
            self.traverse(height - 1, pos * 2);
            if pos * 2 + 1 < tree_width(self.tx_count, height - 1) {
                self.traverse(height - 1, pos * 2 + 1);
            }
        }
    }
}

struct Cursor<'a> {
    tx_count: u32,
    hashes: &'a [Hash256],
    flag_bytes: &'a [u8],
    bits_used: usize,
    hashes_used: usize,
}

impl Cursor<'_> {
    fn next_bit(&mut self) -> ConsensusResult<bool> {
        let index = self.bits_used;
        if index / 8 >= self.flag_bytes.len() {
            return Err(ConsensusError::Codec(CodecError::Malformed(
                "ran out of flag bits in partial Merkle tree".to_string(),
            )));
        }
        self.bits_used += 1;
        Ok(self.flag_bytes[index / 8] & (1 << (index % 8)) != 0)
    }

    fn next_hash(&mut self) -> ConsensusResult<Hash256> {
        let hash = self.hashes.get(self.hashes_used).copied().ok_or_else(|| {
            ConsensusError::Codec(CodecError::Malformed(
                "ran out of hashes in partial Merkle tree".to_string(),
            ))
        })?;
        self.hashes_used += 1;
        Ok(hash)
    }

    fn traverse(
        &mut self,
        height: u32,
        pos: u32,
        matched: &mut Vec<Hash256>,
    ) -> ConsensusResult<Hash256> {
        let descend = self.next_bit()?;
        if height == 0 || !descend {
            let hash = self.next_hash()?;
            if height == 0 && descend {
                matched.push(hash);
            }
            return Ok(hash);
        }
        let left = self.traverse(height - 1, pos * 2, matched)?;
        let right = if pos * 2 + 1 < tree_width(self.tx_count, height - 1) {
            let right = self.traverse(height - 1, pos * 2 + 1, matched)?;
            // Legitimate trees only duplicate at the rightmost position of a
            // level, and the builder never emits that duplicate explicitly.
            if left == right {
                return Err(ConsensusError::MalleableMerkleProof);
            }
            right
        } else {
            left
        };
        Ok(hash_pair(&left, &right))
    }
}

/// A filtered block: a block header plus a partial Merkle tree proving the
/// transactions a bloom filter selected. This is the payload of the
/// `merkleblock` message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredBlock {
    header: Block,
    partial_merkle_tree: PartialMerkleTree,
}

impl FilteredBlock {
    /// Pair a header with its proof.
    pub fn new(header: Block, partial_merkle_tree: PartialMerkleTree) -> Self {
        FilteredBlock {
            header,
            partial_merkle_tree,
        }
    }

    /// Parse from wire bytes: a 108-byte header followed by the proof.
    pub fn parse_bytes(bytes: &[u8], retain: bool) -> CodecResult<Self> {
        let mut reader = ByteReader::new(bytes);
        let header_bytes = reader.read_bytes(HEADER_SIZE)?;
        let header = Block::parse(header_bytes, retain)?;
        let partial_merkle_tree = PartialMerkleTree::parse(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(CodecError::Malformed(format!(
                "{} trailing bytes after filtered block",
                reader.remaining()
            )));
        }
        Ok(FilteredBlock {
            header,
            partial_merkle_tree,
        })
    }

    /// The wire encoding.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.header.write_header(&mut out);
        self.partial_merkle_tree.serialize_into(&mut out);
        out
    }

    /// The block header carried by this filtered block.
    pub fn header(&self) -> &Block {
        &self.header
    }

    /// The proof carried by this filtered block.
    pub fn partial_merkle_tree(&self) -> &PartialMerkleTree {
        &self.partial_merkle_tree
    }

    /// The hash of the underlying block.
    pub fn hash(&self) -> Hash256 {
        self.header.hash()
    }

    /// Number of transactions in the underlying block.
    pub fn transaction_count(&self) -> u32 {
        self.partial_merkle_tree.transaction_count()
    }

    /// Verify the proof against the header and return the matched
    /// transaction ids in leaf order.
    pub fn transaction_hashes(&self) -> ConsensusResult<Vec<Hash256>> {
        let mut matched = Vec::new();
        let root = self.partial_merkle_tree.extract_matches(&mut matched)?;
        let header_root = self.header.merkle_root();
        if root != header_root {
            return Err(ConsensusError::MerkleMismatch {
                computed: root.to_hex(),
                header: header_root.to_hex(),
            });
        }
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(n: u8) -> Hash256 {
        // Leaf ids numbered in the display orientation's first byte.
        let mut bytes = [0u8; 32];
        bytes[0] = n;
        Hash256::wrap(bytes)
    }

    #[test]
    fn single_leaf_is_its_own_root() {
        let id = leaf(1);
        assert_eq!(merkle_root_of(&[id]), id);
    }

    #[test]
    fn odd_leaf_is_paired_with_itself() {
        let leaves = [leaf(1), leaf(2), leaf(3)];
        let ab = hash_pair(&leaves[0], &leaves[1]);
        let cc = hash_pair(&leaves[2], &leaves[2]);
        assert_eq!(merkle_root_of(&leaves), hash_pair(&ab, &cc));
    }

    #[test]
    fn full_inclusion_proof_round_trips() {
        let leaves: Vec<Hash256> = (1..=7).map(leaf).collect();
        let include = vec![true; leaves.len()];
        let pmt = PartialMerkleTree::from_leaves(&include, &leaves);

        let mut matched = Vec::new();
        let root = pmt.extract_matches(&mut matched).unwrap();
        assert_eq!(root, merkle_root_of(&leaves));
        assert_eq!(matched, leaves);
    }

    #[test]
    fn sparse_proof_matches_selected_leaves() {
        let leaves: Vec<Hash256> = (1..=10).map(leaf).collect();
        let mut include = vec![false; leaves.len()];
        include[0] = true;
        include[6] = true;
        let pmt = PartialMerkleTree::from_leaves(&include, &leaves);

        let mut matched = Vec::new();
        let root = pmt.extract_matches(&mut matched).unwrap();
        assert_eq!(root, merkle_root_of(&leaves));
        assert_eq!(matched, vec![leaves[0], leaves[6]]);
    }

    #[test]
    fn proof_wire_round_trip() {
        let leaves: Vec<Hash256> = (1..=5).map(leaf).collect();
        let include = [true, false, false, true, false];
        let pmt = PartialMerkleTree::from_leaves(&include, &leaves);
        let bytes = pmt.serialize();
        let mut reader = ByteReader::new(&bytes);
        let reparsed = PartialMerkleTree::parse(&mut reader).unwrap();
        assert_eq!(reparsed, pmt);
        assert_eq!(reparsed.serialize(), bytes);
    }

    #[test]
    fn duplicated_tail_pair_is_rejected() {
        // Ten real leaves plus the last two duplicated, with the duplicated
        // region selected: reproduces the root of the honest 10-leaf tree
        // but must be rejected as malleable.
        let mut leaves: Vec<Hash256> = (1..=10).map(leaf).collect();
        leaves.push(leaf(9));
        leaves.push(leaf(10));
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
    fn huge_declared_hash_count_fails_before_allocation() {
        // tx_count = 3, then a varint declaring 0x7FFFFFFF hashes.
        let mut bytes = Vec::new();
        put_u32_le(&mut bytes, 3);
        bytes.extend_from_slice(&[0xFE, 0xFF, 0xFF, 0xFF, 0x7F]);
        let mut reader = ByteReader::new(&bytes);
        assert!(matches!(
            PartialMerkleTree::parse(&mut reader),
            Err(CodecError::Oversize { declared, .. }) if declared == 0x7FFF_FFFF
        ));
    }

    #[test]
    fn zero_transactions_rejected() {
        let pmt = PartialMerkleTree {
            tx_count: 0,
            hashes: vec![],
            flag_bytes: vec![],
        };
        let mut matched = Vec::new();
        assert!(matches!(
            pmt.extract_matches(&mut matched),
            Err(ConsensusError::Codec(CodecError::Malformed(_)))
        ));
    }

    #[test]
    fn unconsumed_flag_bits_rejected() {
        let leaves: Vec<Hash256> = (1..=4).map(leaf).collect();
        let include = [true, false, false, false];
        let mut pmt = PartialMerkleTree::from_leaves(&include, &leaves);
        pmt.flag_bytes.push(0);
        let mut matched = Vec::new();
        assert!(matches!(
            pmt.extract_matches(&mut matched),
            Err(ConsensusError::Codec(CodecError::Malformed(_)))
        ));
    }
}
