//! Governance payload records: certified validator nodes, chain admins and
//! the dynamic chain parameters.
//!
//! These appear in blocks whose version word carries the corresponding
//! payload bits. All records are immutable once produced by the parser.

use faircoin_core::{
    put_i64_le, put_u32_le, ByteReader, CodecResult, SchnorrPublicKey, VarInt,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound for the governance description string, well under any block
/// size concern.
const MAX_DESCRIPTION_LEN: usize = 4096;

/// Information about a certified validator node (CVN).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvnInfo {
    /// The 32-bit CVN identifier.
    pub node_id: u32,
    /// Height of the block that added this CVN.
    pub height_added: u32,
    /// The node's Schnorr public key.
    pub pub_key: SchnorrPublicKey,
}

impl CvnInfo {
    pub(crate) fn parse(reader: &mut ByteReader<'_>) -> CodecResult<Self> {
        Ok(CvnInfo {
            node_id: reader.read_u32_le()?,
            height_added: reader.read_u32_le()?,
            pub_key: reader.read_pubkey()?,
        })
    }

    pub(crate) fn serialize_into(&self, out: &mut Vec<u8>) {
        put_u32_le(out, self.node_id);
        put_u32_le(out, self.height_added);
        out.extend_from_slice(&self.pub_key.reversed_bytes());
    }
}

impl fmt::Display for CvnInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cvn: 0x{:08x}, added at height {}, key {}",
            self.node_id, self.height_added, self.pub_key
        )
    }
}

/// A privileged key that co-signs governance payloads. Same wire shape as
/// [`CvnInfo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainAdmin {
    /// The 32-bit admin identifier.
    pub admin_id: u32,
    /// Height of the block that added this admin.
    pub height_added: u32,
    /// The admin's Schnorr public key.
    pub pub_key: SchnorrPublicKey,
}

impl ChainAdmin {
    pub(crate) fn parse(reader: &mut ByteReader<'_>) -> CodecResult<Self> {
        Ok(ChainAdmin {
            admin_id: reader.read_u32_le()?,
            height_added: reader.read_u32_le()?,
            pub_key: reader.read_pubkey()?,
        })
    }

    pub(crate) fn serialize_into(&self, out: &mut Vec<u8>) {
        put_u32_le(out, self.admin_id);
        put_u32_le(out, self.height_added);
        out.extend_from_slice(&self.pub_key.reversed_bytes());
    }
}

impl fmt::Display for ChainAdmin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "admin: 0x{:08x}, added at height {}, key {}",
            self.admin_id, self.height_added, self.pub_key
        )
    }
}

/// Governance-tunable chain parameters carried in CHAIN_PARAMETERS payloads.
///
/// Fee and dust values are in µ-units (10⁻⁶ of the base currency unit);
/// spacing and wait times are in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicChainParameters {
    pub version: u32,
    /// Minimum number of admin signatures for a governance change.
    pub min_admin_sigs: u32,
    /// Maximum number of admin signatures for a governance change.
    pub max_admin_sigs: u32,
    /// Target block spacing in seconds.
    pub block_spacing: u32,
    /// Grace period on top of the block spacing, in seconds.
    pub block_spacing_grace_period: u32,
    /// Mandatory transaction fee in µ-units.
    pub transaction_fee: i64,
    /// Dust threshold in µ-units.
    pub dust_threshold: i64,
    /// A node must have co-signed this many of the preceding blocks to be
    /// eligible to create the next one.
    pub min_successive_signatures: u32,
    /// Number of blocks considered when computing the signature mean.
    pub blocks_to_consider_for_sig_check: u32,
    /// Minimum percentage of the signature mean required to create a block.
    pub percentage_of_signatures_mean: u32,
    /// Maximum allowed size of a serialized block.
    pub max_block_size: u32,
    /// Seconds to wait before CVNs start creating chain signatures again.
    pub block_propagation_wait_time: u32,
    /// Retry interval, in seconds, for forming a new signature set when
    /// partial signatures went missing.
    pub retry_new_sig_set_interval: u32,
    /// A short description of the change, conventionally
    /// `#nnnnn <URI> <text>`.
    pub description: String,
}

impl DynamicChainParameters {
    pub(crate) fn parse(reader: &mut ByteReader<'_>) -> CodecResult<Self> {
        Ok(DynamicChainParameters {
            version: reader.read_u32_le()?,
            min_admin_sigs: reader.read_u32_le()?,
            max_admin_sigs: reader.read_u32_le()?,
            block_spacing: reader.read_u32_le()?,
            block_spacing_grace_period: reader.read_u32_le()?,
            transaction_fee: reader.read_i64_le()?,
            dust_threshold: reader.read_i64_le()?,
            min_successive_signatures: reader.read_u32_le()?,
            blocks_to_consider_for_sig_check: reader.read_u32_le()?,
            percentage_of_signatures_mean: reader.read_u32_le()?,
            max_block_size: reader.read_u32_le()?,
            block_propagation_wait_time: reader.read_u32_le()?,
            retry_new_sig_set_interval: reader.read_u32_le()?,
            description: reader.read_string(MAX_DESCRIPTION_LEN)?,
        })
    }

    pub(crate) fn serialize_into(&self, out: &mut Vec<u8>) {
        put_u32_le(out, self.version);
        put_u32_le(out, self.min_admin_sigs);
        put_u32_le(out, self.max_admin_sigs);
        put_u32_le(out, self.block_spacing);
        put_u32_le(out, self.block_spacing_grace_period);
        put_i64_le(out, self.transaction_fee);
        put_i64_le(out, self.dust_threshold);
        put_u32_le(out, self.min_successive_signatures);
        put_u32_le(out, self.blocks_to_consider_for_sig_check);
        put_u32_le(out, self.percentage_of_signatures_mean);
        put_u32_le(out, self.max_block_size);
        put_u32_le(out, self.block_propagation_wait_time);
        put_u32_le(out, self.retry_new_sig_set_interval);
        VarInt(self.description.len() as u64).encode_into(out);
        out.extend_from_slice(self.description.as_bytes());
    }
}

impl fmt::Display for DynamicChainParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dynamic chain parameters: version {}, adminSigs {}..{}, spacing {}s (+{}s), \
             fee {}, dust {}, minSuccessiveSigs {}, sigCheckWindow {}, sigMeanPct {}%, \
             maxBlockSize {}, propagationWait {}s, retryInterval {}s, description: {}",
            self.version,
            self.min_admin_sigs,
            self.max_admin_sigs,
            self.block_spacing,
            self.block_spacing_grace_period,
            self.transaction_fee,
            self.dust_threshold,
            self.min_successive_signatures,
            self.blocks_to_consider_for_sig_check,
            self.percentage_of_signatures_mean,
            self.max_block_size,
            self.block_propagation_wait_time,
            self.retry_new_sig_set_interval,
            self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_params() -> DynamicChainParameters {
        DynamicChainParameters {
            version: 1,
            min_admin_sigs: 1,
            max_admin_sigs: 11,
            block_spacing: 180,
            block_spacing_grace_period: 60,
            transaction_fee: 10_000,
            dust_threshold: 10_000,
            min_successive_signatures: 1,
            blocks_to_consider_for_sig_check: 1,
            percentage_of_signatures_mean: 70,
            max_block_size: 1_500_000,
            block_propagation_wait_time: 50,
            retry_new_sig_set_interval: 15,
            description: "#00001 https://fair-coin.org/ initial parameter set".to_string(),
        }
    }

    #[test]
    fn dynamic_params_round_trip() {
        let params = sample_params();
        let mut bytes = Vec::new();
        params.serialize_into(&mut bytes);
        let mut reader = ByteReader::new(&bytes);
        let reparsed = DynamicChainParameters::parse(&mut reader).unwrap();
        assert_eq!(reparsed, params);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn cvn_info_round_trip() {
        let cvn = CvnInfo {
            node_id: 0xC001_D00D,
            height_added: 42,
            pub_key: SchnorrPublicKey::from_slice(&[7u8; 32]).unwrap(),
        };
        let mut bytes = Vec::new();
        cvn.serialize_into(&mut bytes);
        assert_eq!(bytes.len(), 40);
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(CvnInfo::parse(&mut reader).unwrap(), cvn);
    }

    #[test]
    fn truncated_params_fail() {
        let params = sample_params();
        let mut bytes = Vec::new();
        params.serialize_into(&mut bytes);
        bytes.truncate(bytes.len() - 1);
        let mut reader = ByteReader::new(&bytes);
        assert!(DynamicChainParameters::parse(&mut reader).is_err());
    }
}
