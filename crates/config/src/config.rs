use std::path::PathBuf;

use alloy_primitives::Address;
use gantry_bridge_types::{BridgeId, Checkpoint, PowerThreshold, Validator, ValidatorSet};
use gantry_crypto::threshold_signature::DEFAULT_POWER_THRESHOLD;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_power_threshold() -> u32 {
    DEFAULT_POWER_THRESHOLD
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorEntry {
    pub address: Address,
    pub power: u64,
}

/// Genesis parameters of a bridge deployment, as written in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeParams {
    /// Short name or `0x`-prefixed 32-byte hex id.
    pub bridge_id: String,

    /// Basis points of total power required to authorize an action.
    #[serde(default = "default_power_threshold")]
    pub power_threshold: u32,

    pub admin: Address,

    /// Genesis validators, in checkpoint order.
    #[serde(default)]
    pub validators: Vec<ValidatorEntry>,
}

impl BridgeParams {
    /// Checks the invariants the bridge enforces at initialization.
    pub fn validate(&self) -> Result<GenesisParams, ConfigError> {
        let bridge_id: BridgeId = self.bridge_id.parse()?;
        let power_threshold = PowerThreshold::try_new(self.power_threshold)?;
        if self.admin.is_zero() {
            return Err(ConfigError::ZeroAdmin);
        }
        let validators = ValidatorSet::try_new(
            self.validators
                .iter()
                .map(|v| Validator::new(v.address, v.power))
                .collect(),
        )?;

        Ok(GenesisParams {
            bridge_id,
            power_threshold,
            admin: self.admin,
            validators,
        })
    }
}

/// Validated genesis parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisParams {
    pub bridge_id: BridgeId,
    pub power_threshold: PowerThreshold,
    pub admin: Address,
    pub validators: ValidatorSet,
}

impl GenesisParams {
    /// Checkpoint of the genesis validator set.
    pub fn genesis_checkpoint(&self) -> Checkpoint {
        Checkpoint::compute(self.bridge_id, &self.validators, 0)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Service label to append to the service name (e.g., "prod", "dev").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_label: Option<String>,

    /// Directory path for file-based logging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Prefix for log file names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file_prefix: Option<String>,

    /// Use JSON format for logs instead of compact format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_format: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub bridge: BridgeParams,

    /// Logging configuration (optional section in TOML).
    #[serde(default)]
    pub logging: LoggingConfig,
}
