//! `checkpoint` subcommand: computes a validator set checkpoint.

use alloy_primitives::{Address, B256};
use gantry_bridge_types::codec::{compute_checkpoint, compute_checkpoint_raw, signing_digest};
use gantry_config::Config;
use serde_json::json;
use tracing::debug;

use crate::{
    args::SubcCheckpoint,
    util::{parse_bridge_id, parse_validator},
};

/// Executes the `checkpoint` subcommand.
///
/// With `--config` the bridge id and validators come from the genesis file
/// and are fully validated. Otherwise the raw `--bridge-id` and
/// `--validator` values are encoded as given, so commitments for sets the
/// bridge itself would reject can still be reproduced.
pub(super) fn exec(cmd: SubcCheckpoint, config: Option<Config>) -> anyhow::Result<()> {
    let commitment = match config {
        Some(config) => {
            if cmd.bridge_id.is_some() || !cmd.validator.is_empty() {
                anyhow::bail!("--config cannot be combined with --bridge-id or --validator");
            }
            let genesis = config.bridge.validate()?;
            compute_checkpoint(&genesis.bridge_id, &genesis.validators, cmd.nonce)
        }
        None => {
            let Some(bridge_id) = cmd.bridge_id.as_deref() else {
                anyhow::bail!("either --config or --bridge-id is required");
            };
            let entries = cmd
                .validator
                .iter()
                .map(|v| parse_validator(v))
                .collect::<anyhow::Result<Vec<_>>>()?;
            raw_checkpoint(bridge_id, &entries, cmd.nonce)?
        }
    };

    debug!(%commitment, nonce = cmd.nonce, "computed checkpoint");
    let out = json!({
        "nonce": cmd.nonce,
        "checkpoint": commitment,
        "signing_digest": signing_digest(&commitment),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn raw_checkpoint(bridge_id: &str, entries: &[(Address, u64)], nonce: u64) -> anyhow::Result<B256> {
    let bridge_id = parse_bridge_id(bridge_id)?;
    let addresses: Vec<&[u8]> = entries.iter().map(|(a, _)| a.as_slice()).collect();
    let powers: Vec<u64> = entries.iter().map(|(_, p)| *p).collect();
    Ok(compute_checkpoint_raw(
        bridge_id.as_b256().as_slice(),
        &addresses,
        &powers,
        nonce,
    )?)
}
