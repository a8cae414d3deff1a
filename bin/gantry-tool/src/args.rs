//! Command line arguments for the `gantry-tool` binary.

use std::path::{Path, PathBuf};

use argh::FromArgs;

/// Args.
#[derive(FromArgs)]
pub(crate) struct Args {
    #[argh(switch, description = "log at debug level", short = 'v')]
    pub(crate) verbose: bool,

    #[argh(
        switch,
        description = "emit logs as JSON, overriding the config's logging section"
    )]
    pub(crate) json_logs: bool,

    #[argh(subcommand)]
    pub(crate) subc: Subcommand,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub(crate) enum Subcommand {
    Checkpoint(SubcCheckpoint),
    CheckParams(SubcCheckParams),
    BatchDigest(SubcBatchDigest),
}

impl Subcommand {
    /// Config file the subcommand reads, if any.
    pub(crate) fn config_path(&self) -> Option<&Path> {
        match self {
            Self::Checkpoint(subc) => subc.config.as_deref(),
            Self::CheckParams(subc) => Some(&subc.path),
            Self::BatchDigest(_) => None,
        }
    }
}

/// Compute a validator set checkpoint.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "checkpoint",
    description = "computes a validator set checkpoint and its signing digest"
)]
pub(crate) struct SubcCheckpoint {
    #[argh(
        option,
        description = "genesis config file to read the bridge id and validators from",
        short = 'c'
    )]
    pub(crate) config: Option<PathBuf>,

    #[argh(
        option,
        description = "bridge id, as a name or 0x-prefixed 32-byte hex",
        short = 'i'
    )]
    pub(crate) bridge_id: Option<String>,

    #[argh(
        option,
        description = "validator as 0xaddress:power, repeatable",
        short = 'V'
    )]
    pub(crate) validator: Vec<String>,

    #[argh(
        option,
        description = "validator set nonce (default 0)",
        short = 'n',
        default = "0"
    )]
    pub(crate) nonce: u64,
}

/// Validate a genesis config file.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "check-params",
    description = "validates a genesis config file and prints a summary"
)]
pub(crate) struct SubcCheckParams {
    #[argh(positional, description = "config file path")]
    pub(crate) path: PathBuf,
}

/// Compute a withdrawal batch commitment.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "batch-digest",
    description = "computes a withdrawal batch commitment and its signing digest"
)]
pub(crate) struct SubcBatchDigest {
    #[argh(
        option,
        description = "bridge id, as a name or 0x-prefixed 32-byte hex",
        short = 'i'
    )]
    pub(crate) bridge_id: String,

    #[argh(option, description = "token contract address", short = 't')]
    pub(crate) token: String,

    #[argh(option, description = "batch nonce", short = 'n')]
    pub(crate) nonce: u64,

    #[argh(
        option,
        description = "transaction as 0xdestination:amount:fee, repeatable"
    )]
    pub(crate) tx: Vec<String>,
}
