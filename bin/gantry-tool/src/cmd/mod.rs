//! Subcommand implementations.

mod batch_digest;
mod check_params;
mod checkpoint;

use gantry_config::Config;

use crate::args::Subcommand;

/// Executes a subcommand.
///
/// `config` is the file named by [`Subcommand::config_path`], already loaded.
pub(crate) fn exec_subc(cmd: Subcommand, config: Option<Config>) -> anyhow::Result<()> {
    match cmd {
        Subcommand::Checkpoint(subc) => checkpoint::exec(subc, config),
        Subcommand::CheckParams(subc) => check_params::exec(subc, config),
        Subcommand::BatchDigest(subc) => batch_digest::exec(subc),
    }
}
