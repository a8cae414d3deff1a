//! `check-params` subcommand: validates a genesis config file.

use gantry_bridge_types::codec::signing_digest;
use gantry_config::Config;
use serde_json::json;
use tracing::info;

use crate::args::SubcCheckParams;

/// Executes the `check-params` subcommand.
///
/// Prints a JSON summary of the validated genesis parameters, including the
/// nonce-0 checkpoint the bridge will be initialized with.
pub(super) fn exec(cmd: SubcCheckParams, config: Option<Config>) -> anyhow::Result<()> {
    let config = match config {
        Some(config) => config,
        None => gantry_config::load_config(&cmd.path)?,
    };
    let genesis = config.bridge.validate()?;
    let checkpoint = genesis.genesis_checkpoint();

    info!(
        path = %cmd.path.display(),
        validators = genesis.validators.len(),
        "genesis params are valid"
    );

    let validators: Vec<_> = genesis
        .validators
        .validators()
        .iter()
        .map(|v| json!({ "address": v.address, "power": v.power }))
        .collect();
    let out = json!({
        "bridge_id": genesis.bridge_id.as_b256(),
        "bridge_name": genesis.bridge_id.name(),
        "admin": genesis.admin,
        "power_threshold": genesis.power_threshold.get(),
        "total_power": genesis.validators.total_power(),
        "validators": validators,
        "checkpoint": checkpoint.commitment(),
        "signing_digest": signing_digest(&checkpoint.commitment()),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
