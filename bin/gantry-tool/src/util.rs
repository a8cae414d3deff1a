//! Parsers for the command line value formats and logging setup.

use std::str::FromStr;

use alloy_primitives::{Address, U256};
use anyhow::Context;
use gantry_bridge_types::{BatchTransaction, BridgeId};
use gantry_common::logging::LoggingInitConfig;
use gantry_config::LoggingConfig;
use tracing::Level;

/// Default log file prefix when the config does not set one.
const DEFAULT_LOG_PREFIX: &str = "gantry-tool";

/// Builds the logging setup from a config's `[logging]` section.
///
/// `--json-logs` forces JSON output; otherwise the section decides.
pub(crate) fn logging_init_config(
    logging: &LoggingConfig,
    json_logs: bool,
    verbose: bool,
) -> LoggingInitConfig<'_> {
    LoggingInitConfig {
        service_base_name: env!("CARGO_PKG_NAME"),
        service_label: logging.service_label.as_deref(),
        log_dir: logging.log_dir.as_ref(),
        log_file_prefix: logging.log_file_prefix.as_deref(),
        json_format: if json_logs {
            Some(true)
        } else {
            logging.json_format
        },
        default_log_prefix: DEFAULT_LOG_PREFIX,
        default_level: if verbose { Level::DEBUG } else { Level::WARN },
    }
}

/// Parses an address, accepting an optional `0x` prefix.
pub(crate) fn parse_address(s: &str) -> anyhow::Result<Address> {
    Address::from_str(s).with_context(|| format!("invalid address: {s}"))
}

/// Parses a bridge id given as a name or 0x-prefixed hex.
pub(crate) fn parse_bridge_id(s: &str) -> anyhow::Result<BridgeId> {
    BridgeId::from_str(s).with_context(|| format!("invalid bridge id: {s}"))
}

/// Parses an `address:power` validator entry.
pub(crate) fn parse_validator(s: &str) -> anyhow::Result<(Address, u64)> {
    let Some((addr, power)) = s.split_once(':') else {
        anyhow::bail!("expected address:power, got {s}");
    };
    let power = power
        .parse::<u64>()
        .with_context(|| format!("invalid power in {s}"))?;
    Ok((parse_address(addr)?, power))
}

/// Parses a `destination:amount:fee` batch transaction.
///
/// Amounts and fees are decimal, or hex with a `0x` prefix.
pub(crate) fn parse_batch_tx(s: &str) -> anyhow::Result<BatchTransaction> {
    let parts: Vec<&str> = s.split(':').collect();
    let [dest, amount, fee] = parts.as_slice() else {
        anyhow::bail!("expected destination:amount:fee, got {s}");
    };
    let amount = U256::from_str(amount).with_context(|| format!("invalid amount in {s}"))?;
    let fee = U256::from_str(fee).with_context(|| format!("invalid fee in {s}"))?;
    Ok(BatchTransaction::new(parse_address(dest)?, amount, fee))
}
