//! `batch-digest` subcommand: computes a withdrawal batch commitment.

use gantry_bridge_types::{codec::batch_preimage, WithdrawalBatch};
use serde_json::json;
use tracing::debug;

use crate::{
    args::SubcBatchDigest,
    util::{parse_address, parse_batch_tx, parse_bridge_id},
};

/// Executes the `batch-digest` subcommand.
pub(super) fn exec(cmd: SubcBatchDigest) -> anyhow::Result<()> {
    let bridge_id = parse_bridge_id(&cmd.bridge_id)?;
    let token = parse_address(&cmd.token)?;
    let transactions = cmd
        .tx
        .iter()
        .map(|tx| parse_batch_tx(tx))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let batch = WithdrawalBatch::try_new(token, transactions, cmd.nonce)?;

    let commitment = batch.commitment(&bridge_id);
    debug!(%commitment, batch_nonce = cmd.nonce, %token, "computed batch commitment");

    let out = json!({
        "token": token,
        "batch_nonce": cmd.nonce,
        "transactions": batch.transactions().len(),
        "total_amount": batch.total_amount()?,
        "total_fee": batch.total_fee()?,
        "preimage": hex::encode(batch_preimage(&bridge_id, &batch)),
        "commitment": commitment,
        "signing_digest": batch.signing_digest(&bridge_id),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
