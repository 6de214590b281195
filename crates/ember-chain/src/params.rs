//! Network parameters.
//!
//! Static, network-specific consensus parameters consumed by stake
//! validation. `ChainParams::mainnet()` carries the verified mainnet
//! values; testnet/devnet values load through `ChainParams::from_config`
//! with per-field validation errors.

use crate::Uint256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Network identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Regtest,
}

/// Error when constructing `ChainParams` from configuration.
#[derive(Debug, Clone)]
pub struct ChainParamsError {
    /// The field that is missing or invalid.
    pub field: &'static str,
    /// Description of the error.
    pub message: String,
}

impl fmt::Display for ChainParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChainParams error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ChainParamsError {}

/// Configuration for loading `ChainParams` from TOML/JSON.
///
/// All fields are optional so partial configs can be validated with clear
/// errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChainParamsConfig {
    /// Network identifier.
    pub network: Option<Network>,
    /// Seconds between stake modifier refreshes.
    pub modifier_interval_secs: Option<i64>,
    /// Integer ratio shaping selection round widths.
    pub modifier_interval_ratio: Option<i64>,
    /// Expected block interval in seconds.
    pub target_spacing_secs: Option<i64>,
    /// Legacy modifier interval: selection lookback and minimum forward
    /// walk, in seconds.
    pub old_modifier_interval_secs: Option<i64>,
    /// Height at which the v2 modifier rules activate.
    pub modifier_upgrade_height: Option<u32>,
    /// Minimum stake age in seconds.
    pub stake_min_age_secs: Option<i64>,
    /// Minimum stake depth in blocks.
    pub stake_min_depth: Option<u32>,
    /// Genesis block hash as big-endian hex (optional "0x" prefix).
    pub genesis_hash_hex: Option<String>,
}

/// Network-specific consensus parameters.
#[derive(Debug, Clone)]
pub struct ChainParams {
    pub network: Network,

    /// Seconds between stake modifier refreshes.
    pub modifier_interval_secs: i64,

    /// Integer ratio shaping the widths of the 64 selection rounds.
    pub modifier_interval_ratio: i64,

    /// Expected block interval in seconds; only used to size the candidate
    /// window.
    pub target_spacing_secs: i64,

    /// Legacy modifier interval (seconds). Used both as the selection
    /// lookback and as the minimum forward walk for the v1 kernel modifier.
    pub old_modifier_interval_secs: i64,

    /// Height at which the v2 modifier rules replace v1.
    pub modifier_upgrade_height: u32,

    /// A stake is mature once its age exceeds this many seconds...
    pub stake_min_age_secs: i64,

    /// ...or once it is buried at least this many blocks deep.
    pub stake_min_depth: u32,

    /// Genesis block hash.
    pub genesis_hash: Uint256,
}

impl ChainParams {
    /// Mainnet parameters (stable, verified values).
    pub fn mainnet() -> Self {
        Self {
            network: Network::Mainnet,
            modifier_interval_secs: 60,
            modifier_interval_ratio: 3,
            target_spacing_secs: 60,
            old_modifier_interval_secs: 2087,
            modifier_upgrade_height: 615_800,
            stake_min_age_secs: 3 * 60 * 60,
            stake_min_depth: 600,
            genesis_hash: Uint256::from_be_hex(
                "0000006e84f5626d2838ae7078b2f78fe844ac35ea8bd2abfd320078969f457b",
            )
            .expect("valid mainnet genesis hash"),
        }
    }

    /// Testnet parameters.
    pub fn testnet() -> Self {
        Self {
            network: Network::Testnet,
            modifier_upgrade_height: 1_000,
            genesis_hash: Uint256::from_be_hex(
                "000000f9ef8a7f4fd21ebfab1116a8d79115ece16ed07a1ba245618a96189644",
            )
            .expect("valid testnet genesis hash"),
            ..Self::mainnet()
        }
    }

    /// Regtest parameters: immediate v2 rules and no real maturity so unit
    /// tests can stake at once.
    pub fn regtest() -> Self {
        Self {
            network: Network::Regtest,
            modifier_upgrade_height: 0,
            stake_min_age_secs: 0,
            stake_min_depth: 1,
            genesis_hash: Uint256::from_be_hex(
                "000000069ea66c2b6865d90a6ca88b9c5f025248ef3b78d40ef8ef349c33e3e5",
            )
            .expect("valid regtest genesis hash"),
            ..Self::mainnet()
        }
    }

    /// Create `ChainParams` from configuration.
    ///
    /// Returns an error naming the specific field if any required field is
    /// missing or invalid. `genesis_hash_hex` is trimmed and accepts an
    /// optional "0x" prefix.
    pub fn from_config(config: &ChainParamsConfig) -> Result<Self, ChainParamsError> {
        fn require<T: Copy>(
            value: Option<T>,
            field: &'static str,
        ) -> Result<T, ChainParamsError> {
            value.ok_or_else(|| ChainParamsError {
                field,
                message: "required field missing".to_string(),
            })
        }

        let hex_raw = config
            .genesis_hash_hex
            .as_ref()
            .ok_or_else(|| ChainParamsError {
                field: "genesis_hash_hex",
                message: "required field missing".to_string(),
            })?;
        let hex_cleaned = hex_raw.trim();
        let hex_cleaned = hex_cleaned
            .strip_prefix("0x")
            .or_else(|| hex_cleaned.strip_prefix("0X"))
            .unwrap_or(hex_cleaned);
        let genesis_hash =
            Uint256::from_be_hex(hex_cleaned).map_err(|e| ChainParamsError {
                field: "genesis_hash_hex",
                message: format!("invalid hex string '{hex_raw}': {e}"),
            })?;

        let modifier_interval_secs =
            require(config.modifier_interval_secs, "modifier_interval_secs")?;
        if modifier_interval_secs <= 0 {
            return Err(ChainParamsError {
                field: "modifier_interval_secs",
                message: "must be positive".to_string(),
            });
        }
        let modifier_interval_ratio =
            require(config.modifier_interval_ratio, "modifier_interval_ratio")?;
        if modifier_interval_ratio < 1 {
            return Err(ChainParamsError {
                field: "modifier_interval_ratio",
                message: "must be at least 1".to_string(),
            });
        }
        let target_spacing_secs = require(config.target_spacing_secs, "target_spacing_secs")?;
        if target_spacing_secs <= 0 {
            return Err(ChainParamsError {
                field: "target_spacing_secs",
                message: "must be positive".to_string(),
            });
        }

        Ok(Self {
            network: require(config.network, "network")?,
            modifier_interval_secs,
            modifier_interval_ratio,
            target_spacing_secs,
            old_modifier_interval_secs: require(
                config.old_modifier_interval_secs,
                "old_modifier_interval_secs",
            )?,
            modifier_upgrade_height: require(
                config.modifier_upgrade_height,
                "modifier_upgrade_height",
            )?,
            stake_min_age_secs: require(config.stake_min_age_secs, "stake_min_age_secs")?,
            stake_min_depth: require(config.stake_min_depth, "stake_min_depth")?,
            genesis_hash,
        })
    }

    /// Whether the v2 modifier rules are active at `height`.
    pub fn is_modifier_v2(&self, height: u32) -> bool {
        height >= self.modifier_upgrade_height
    }

    /// Stake maturity: old enough in time, or buried deep enough in blocks.
    pub fn has_min_age_or_depth(
        &self,
        next_height: u32,
        block_time: u32,
        origin_height: u32,
        origin_time: u32,
    ) -> bool {
        let age = i64::from(block_time) - i64::from(origin_time);
        let depth = i64::from(next_height) - i64::from(origin_height);
        age > self.stake_min_age_secs || depth >= i64::from(self.stake_min_depth)
    }
}
