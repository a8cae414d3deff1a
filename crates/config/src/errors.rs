use std::{io, path::PathBuf};

use gantry_bridge_types::CodecError;
use gantry_crypto::threshold_signature::ThresholdSignatureError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid bridge id: {0}")]
    BridgeId(#[from] CodecError),

    #[error("invalid validator set: {0}")]
    Validators(#[from] ThresholdSignatureError),

    #[error("admin cannot be the zero address")]
    ZeroAdmin,
}
