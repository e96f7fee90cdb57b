//! Per-network consensus parameter records.
//!
//! One immutable record per network (main / testnet / regtest), constructed
//! once behind a lazy handle. Construction builds the network's genesis
//! block from typed fields and cross-checks its computed hash against the
//! baked literal; a mismatch is fatal and surfaces before anything else can
//! run on the wrong chain.

use crate::block::{Block, BLOCK_VERSION_GENESIS};
use crate::{ConsensusError, ConsensusResult};
use faircoin_core::{decode_compact_bits, Hash256, SchnorrSignature};
use num_bigint::BigUint;
use once_cell::sync::Lazy;

/// Difficulty-window constants kept from the Bitcoin lineage. Unused by this
/// core's verifier but part of every parameter record.
const TARGET_TIMESPAN: u32 = 14 * 24 * 60 * 60;
const TARGET_SPACING: u32 = 10 * 60;
const INTERVAL: u32 = TARGET_TIMESPAN / TARGET_SPACING;

/// The creator id the genesis blocks carry.
const GENESIS_NODE_ID: u32 = 0xC001_D00D;

/// Timestamp of the mainnet genesis block; testnet and regtest offset it so
/// the three chains can never share a block hash.
const GENESIS_BLOCK_TIMESTAMP: u32 = 1_500_364_800;

/// Merkle root of the genesis coinbase, shared by all three networks.
const GENESIS_MERKLE_ROOT: &str =
    "7c27ade2c28e67ed3077f8f77b8ea6d36d4f5eba04c099be3c9faa9a4a04c046";

/// The legacy testnet magic; treat peers using it as a distinct historical
/// network profile.
pub const TESTNET_LEGACY_PACKET_MAGIC: u32 = 0x0B11_0907;

/// An HTTP seed descriptor: an endpoint plus the key its responses are
/// signed with. Opaque to this core.
#[derive(Debug, Clone)]
pub struct HttpSeed {
    pub uri: &'static str,
    pub pub_key: &'static str,
}

/// Immutable consensus parameters for one network.
#[derive(Debug, Clone)]
pub struct NetworkParams {
    /// Canonical network identifier.
    pub id: &'static str,
    /// 4-byte wire envelope magic.
    pub packet_magic: u32,
    /// Default TCP port.
    pub port: u16,
    /// Difficulty window length in blocks.
    pub interval: u32,
    /// Difficulty window length in seconds.
    pub target_timespan: u32,
    /// Maximum allowed difficulty target.
    pub max_target: BigUint,
    /// Base58 version byte for pay-to-pubkey-hash addresses.
    pub address_header: u8,
    /// Base58 version byte for pay-to-script-hash addresses.
    pub p2sh_header: u8,
    /// Base58 version byte for dumped private keys.
    pub dumped_private_key_header: u8,
    /// BIP-32 public key serialization prefix.
    pub bip32_header_pub: u32,
    /// BIP-32 private key serialization prefix.
    pub bip32_header_priv: u32,
    /// Blocks between halvings of the block subsidy.
    pub subsidy_decrease_block_count: u32,
    /// Blocks before a coinbase output may be spent.
    pub spendable_coinbase_depth: u32,
    /// Version-signaling window length.
    pub majority_window: u32,
    /// Blocks in the window at which the new rules are enforced.
    pub majority_enforce_block_upgrade: u32,
    /// Blocks in the window at which outdated blocks are rejected.
    pub majority_reject_block_outdated: u32,
    /// DNS bootstrap hosts.
    pub dns_seeds: Vec<&'static str>,
    /// Hardcoded seed addresses as packed IPv4 words.
    pub addr_seeds: Vec<u32>,
    /// Signed HTTP discovery endpoints.
    pub http_seeds: Vec<HttpSeed>,
    /// Known good block hashes by height.
    pub checkpoints: Vec<(u32, Hash256)>,
    /// The network's fully constructed genesis block.
    pub genesis_block: Block,
    /// Public key that signs network alerts.
    pub alert_signing_key: Vec<u8>,
    /// BIP-70 network tag.
    pub payment_protocol_id: &'static str,
}

impl NetworkParams {
    /// The main production network.
    pub fn mainnet() -> ConsensusResult<Self> {
        let genesis = build_genesis(
            GENESIS_BLOCK_TIMESTAMP,
            "2b7ab86ef7189614d4bccb2576bffe834b7c0e6d3fd63539ea9fbbca45d26c0e",
            "0e663650757bd8306ecca6a572067e5d8eddc3108f934e416362de0475c6cd71\
             3da16d3735d80754b6dfe74281421b3517d2c2f923bddc43306dab6563a17bd5",
        );
        check_genesis(
            "org.faircoin.production",
            &genesis,
            "beed44fa5e96150d95d56ebd5d2625781825a9407a5215dd7eda723373a0a1d7",
        )?;

        Ok(NetworkParams {
            id: "org.faircoin.production",
            packet_magic: 0xFABF_B5DA,
            port: 40404,
            interval: INTERVAL,
            target_timespan: TARGET_TIMESPAN,
            max_target: decode_compact_bits(0x1D00_FFFF),
            address_header: 95,
            p2sh_header: 36,
            dumped_private_key_header: 223,
            bip32_header_pub: 0x0488_B21E,
            bip32_header_priv: 0x0488_ADE4,
            subsidy_decrease_block_count: 210_000,
            spendable_coinbase_depth: 100,
            majority_window: 1000,
            majority_enforce_block_upgrade: 750,
            majority_reject_block_outdated: 950,
            dns_seeds: vec!["faircoin2-seed1.fair-coin.org"],
            addr_seeds: Vec::new(),
            http_seeds: Vec::new(),
            checkpoints: vec![(
                1000,
                Hash256::from_hex(
                    "950af624ba845602404af4ebb67de0f0459e06f8399128c17c245c917871b905",
                )
                .expect("checkpoint literal"),
            )],
            genesis_block: genesis,
            alert_signing_key: hex::decode(SATOSHI_ALERT_KEY).expect("alert key literal"),
            payment_protocol_id: "main",
        })
    }

    /// The public test network.
    pub fn testnet() -> ConsensusResult<Self> {
        let genesis = build_genesis(
            GENESIS_BLOCK_TIMESTAMP + 1,
            "1c4ed40a950abbd27f4cd57e1ccb6613a956ce9edb16210cd5acb12f708389f3",
            "377599b4021c3e35a40667466734d2d1a3a1ef94cf52e1f5a6863af180ed7258\
             982869d956ff34251ef4e13d7fd341a68c3e47007b5cbc0c67860a8956df9e71",
        );
        check_genesis(
            "org.faircoin.test",
            &genesis,
            "42327d5edf3cbb75bb139ec78bd62e517f14d7cbad451e4778741b6b4c1dfbc6",
        )?;

        Ok(NetworkParams {
            id: "org.faircoin.test",
            packet_magic: 0x0C12_0A08,
            port: 41404,
            interval: INTERVAL,
            target_timespan: TARGET_TIMESPAN,
            max_target: decode_compact_bits(0x1D00_FFFF),
            address_header: 111,
            p2sh_header: 196,
            dumped_private_key_header: 239,
            bip32_header_pub: 0x0435_87CF,
            bip32_header_priv: 0x0435_8394,
            subsidy_decrease_block_count: 210_000,
            spendable_coinbase_depth: 100,
            majority_window: 100,
            majority_enforce_block_upgrade: 51,
            majority_reject_block_outdated: 75,
            dns_seeds: vec!["faircoin2-testnet-seed1.fair-coin.org"],
            addr_seeds: Vec::new(),
            http_seeds: Vec::new(),
            checkpoints: Vec::new(),
            genesis_block: genesis,
            alert_signing_key: hex::decode(
                "045894f38e9dd72b6f210c261d40003eb087030c42b102d3b238b396256d02f5a3\
                 80ff3b7444d306d9e118fa1fc7b2b7594875f4eb64bbeaa31577391d85eb5a8a",
            )
            .expect("alert key literal"),
            payment_protocol_id: "test",
        })
    }

    /// The local regression-test network.
    pub fn regtest() -> ConsensusResult<Self> {
        let genesis = build_genesis(
            GENESIS_BLOCK_TIMESTAMP + 2,
            "2b7ab86ef7189614d4bccb2576bffe834b7c0e6d3fd63539ea9fbbca45d26c0e",
            "0e663650757bd8306ecca6a572067e5d8eddc3108f934e416362de0475c6cd71\
             3da16d3735d80754b6dfe74281421b3517d2c2f923bddc43306dab6563a17bd5",
        );
        check_genesis(
            "org.faircoin.regtest",
            &genesis,
            "43fa8cbdc78c59396900c55323bcd80f2d79ad1ffc40724c677170d958d7c9b4",
        )?;

        Ok(NetworkParams {
            id: "org.faircoin.regtest",
            packet_magic: 0xFABF_B5DB,
            port: 42404,
            interval: INTERVAL,
            target_timespan: TARGET_TIMESPAN,
            max_target: decode_compact_bits(0x207F_FFFF),
            address_header: 111,
            p2sh_header: 196,
            dumped_private_key_header: 239,
            bip32_header_pub: 0x0435_87CF,
            bip32_header_priv: 0x0435_8394,
            subsidy_decrease_block_count: 150,
            spendable_coinbase_depth: 5,
            majority_window: 100,
            majority_enforce_block_upgrade: 51,
            majority_reject_block_outdated: 75,
            dns_seeds: Vec::new(),
            addr_seeds: Vec::new(),
            http_seeds: Vec::new(),
            checkpoints: Vec::new(),
            genesis_block: genesis,
            alert_signing_key: hex::decode(SATOSHI_ALERT_KEY).expect("alert key literal"),
            payment_protocol_id: "regtest",
        })
    }

    /// Look up a shared parameter record by canonical id.
    pub fn from_id(id: &str) -> Option<&'static NetworkParams> {
        match id {
            "org.faircoin.production" => Some(mainnet()),
            "org.faircoin.test" => Some(testnet()),
            "org.faircoin.regtest" => Some(regtest()),
            _ => None,
        }
    }
}

/// The historical alert key inherited from the Bitcoin lineage, used where a
/// network never published its own.
const SATOSHI_ALERT_KEY: &str =
    "04fc9702847840aaf195de8442ebecedf5b095cdbb9bc716bda9110971b28a49e0ead8564ff0db22\
     209e0374782c093bb899692d524e9d6a6956e7c5ecbcd68284";

fn build_genesis(time: u32, payload_hash_hex: &str, creator_sig_hex: &str) -> Block {
    let mut genesis = Block::new_with_version(BLOCK_VERSION_GENESIS);
    genesis.set_creator_id(GENESIS_NODE_ID);
    genesis.set_time(time);
    genesis.set_payload_hash(Hash256::from_hex(payload_hash_hex).expect("payload hash literal"));
    genesis.set_creator_signature(
        SchnorrSignature::from_hex(creator_sig_hex).expect("creator signature literal"),
    );
    genesis.set_merkle_root(Hash256::from_hex(GENESIS_MERKLE_ROOT).expect("merkle root literal"));
    genesis
}

fn check_genesis(network: &str, genesis: &Block, expected_hex: &str) -> ConsensusResult<()> {
    let computed = genesis.hash();
    if computed.to_hex() != expected_hex {
        return Err(ConsensusError::GenesisHashMismatch {
            network: network.to_string(),
            computed: computed.to_hex(),
            expected: expected_hex.to_string(),
        });
    }
    Ok(())
}

static MAINNET: Lazy<NetworkParams> =
    Lazy::new(|| NetworkParams::mainnet().expect("mainnet genesis cross-check"));
static TESTNET: Lazy<NetworkParams> =
    Lazy::new(|| NetworkParams::testnet().expect("testnet genesis cross-check"));
static REGTEST: Lazy<NetworkParams> =
    Lazy::new(|| NetworkParams::regtest().expect("regtest genesis cross-check"));

/// The shared mainnet parameter record.
pub fn mainnet() -> &'static NetworkParams {
    &MAINNET
}

/// The shared testnet parameter record.
pub fn testnet() -> &'static NetworkParams {
    &TESTNET
}

/// The shared regtest parameter record.
pub fn regtest() -> &'static NetworkParams {
    &REGTEST
}
