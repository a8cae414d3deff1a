//! Admin and upgrade boundary.
//!
//! The gate owns the admin address and selects the active implementation.
//! Each [`ImplVersion`] maps to the entry points it supports through a static
//! table; the bridge consults it before running any entry point.

use alloy_primitives::Address;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::BridgeError;

/// Response of [`EntryPoint::UpgradeProbe`].
pub const UPGRADE_PROBE_RESPONSE: &str = "bridge upgrade is successful";

/// Externally callable bridge operations.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub enum EntryPoint {
    Initialize,
    SendToCosmos,
    UpdateValidatorSet,
    SubmitBatch,
    /// Reports that an upgraded implementation is live.
    UpgradeProbe,
}

const V1_ENTRY_POINTS: &[EntryPoint] = &[
    EntryPoint::Initialize,
    EntryPoint::SendToCosmos,
    EntryPoint::UpdateValidatorSet,
    EntryPoint::SubmitBatch,
];

const V2_ENTRY_POINTS: &[EntryPoint] = &[
    EntryPoint::Initialize,
    EntryPoint::SendToCosmos,
    EntryPoint::UpdateValidatorSet,
    EntryPoint::SubmitBatch,
    EntryPoint::UpgradeProbe,
];

/// Implementation the gate dispatches to.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    PartialEq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
pub enum ImplVersion {
    #[default]
    V1,
    V2,
}

impl ImplVersion {
    pub fn number(&self) -> u64 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
        }
    }

    pub fn from_number(number: u64) -> Option<Self> {
        match number {
            1 => Some(Self::V1),
            2 => Some(Self::V2),
            _ => None,
        }
    }

    pub fn entry_points(&self) -> &'static [EntryPoint] {
        match self {
            Self::V1 => V1_ENTRY_POINTS,
            Self::V2 => V2_ENTRY_POINTS,
        }
    }

    pub fn supports(&self, entry_point: EntryPoint) -> bool {
        self.entry_points().contains(&entry_point)
    }
}

/// Admin address and active implementation.
#[derive(Clone, Debug, Eq, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct AdminGate {
    admin: Address,
    implementation: ImplVersion,
}

impl AdminGate {
    pub fn new(admin: Address) -> Self {
        Self {
            admin,
            implementation: ImplVersion::default(),
        }
    }

    pub fn admin(&self) -> Address {
        self.admin
    }

    pub fn implementation(&self) -> ImplVersion {
        self.implementation
    }

    fn ensure_admin(&self, caller: Address) -> Result<(), BridgeError> {
        if caller != self.admin {
            return Err(BridgeError::Unauthorized { caller });
        }
        Ok(())
    }

    /// Fails with `UnsupportedEntryPoint` if the active implementation does
    /// not expose `entry_point`.
    pub fn ensure_supported(&self, entry_point: EntryPoint) -> Result<(), BridgeError> {
        if !self.implementation.supports(entry_point) {
            return Err(BridgeError::UnsupportedEntryPoint {
                entry_point,
                version: self.implementation,
            });
        }
        Ok(())
    }

    /// Hands the admin role to `new_admin`, returning the previous admin.
    pub fn change_admin(&mut self, caller: Address, new_admin: Address) -> Result<Address, BridgeError> {
        self.ensure_admin(caller)?;
        if new_admin.is_zero() {
            return Err(BridgeError::ZeroAdmin);
        }
        let previous = std::mem::replace(&mut self.admin, new_admin);
        info!(%previous, %new_admin, "admin changed");
        Ok(previous)
    }

    /// Switches the active implementation.
    pub fn upgrade_to(&mut self, caller: Address, version: ImplVersion) -> Result<(), BridgeError> {
        self.ensure_admin(caller)?;
        self.implementation = version;
        Ok(())
    }
}
