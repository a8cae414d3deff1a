//! Offline tooling for gantry bridge deployments.
//!
//! Computes the checkpoint and batch commitments validators sign and checks
//! genesis parameter files before they are used to initialize a bridge.

mod args;
mod cmd;
mod util;

use std::process;

use gantry_common::logging::init_logging_from_config;
use gantry_config::LoggingConfig;

use crate::{cmd::exec_subc, util::logging_init_config};

fn main() {
    let args: args::Args = argh::from_env();
    let inner = || -> anyhow::Result<()> {
        // Load the config first so its `[logging]` section shapes the logger.
        let config = args
            .subc
            .config_path()
            .map(gantry_config::load_config)
            .transpose()?;
        let default_logging = LoggingConfig::default();
        let logging = config.as_ref().map_or(&default_logging, |c| &c.logging);
        init_logging_from_config(logging_init_config(logging, args.json_logs, args.verbose));

        exec_subc(args.subc, config)?;
        Ok(())
    };
    if let Err(e) = inner() {
        eprintln!("ERROR\n{e:?}");
        process::exit(1);
    }
}
