//! Outbound deposits locked on this chain.

use std::{fmt, str::FromStr};

use alloy_primitives::{Address, B256, U256};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::CodecError;

/// Longest destination address accepted, in bytes.
pub const MAX_DESTINATION_LEN: usize = 32;

/// Opaque address on the validator chain, 1 to 32 bytes long.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, BorshSerialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct DestinationAddress(Vec<u8>);

impl DestinationAddress {
    pub fn try_new(bytes: Vec<u8>) -> Result<Self, CodecError> {
        if bytes.is_empty() || bytes.len() > MAX_DESTINATION_LEN {
            return Err(CodecError::InvalidDestination(bytes.len()));
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Recovers an address from its event word by dropping the zero padding.
    pub fn from_bytes32(word: &B256) -> Result<Self, CodecError> {
        let start = word.iter().position(|b| *b != 0).unwrap_or(word.len());
        Self::try_new(word[start..].to_vec())
    }

    /// Left-pads the address with zeros to a full word, as emitted in events.
    pub fn to_bytes32(&self) -> B256 {
        B256::left_padding_from(&self.0)
    }
}

impl fmt::Debug for DestinationAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DestinationAddress({self})")
    }
}

impl fmt::Display for DestinationAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl FromStr for DestinationAddress {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|_| CodecError::InvalidDestination(s.len()))?;
        Self::try_new(bytes)
    }
}

impl TryFrom<Vec<u8>> for DestinationAddress {
    type Error = CodecError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<DestinationAddress> for Vec<u8> {
    fn from(value: DestinationAddress) -> Self {
        value.0
    }
}

impl BorshDeserialize for DestinationAddress {
    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        let raw = Vec::<u8>::deserialize_reader(reader)?;
        Self::try_new(raw)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }
}

/// A recorded deposit, ordered by its event nonce.
#[derive(Clone, Debug, Eq, PartialEq, BorshDeserialize, BorshSerialize, Serialize, Deserialize)]
pub struct DepositRecord {
    token: Address,
    sender: Address,
    destination: DestinationAddress,
    amount: U256,
    event_nonce: u64,
}

impl DepositRecord {
    pub fn new(
        token: Address,
        sender: Address,
        destination: DestinationAddress,
        amount: U256,
        event_nonce: u64,
    ) -> Self {
        Self {
            token,
            sender,
            destination,
            amount,
            event_nonce,
        }
    }

    pub fn token(&self) -> Address {
        self.token
    }

    pub fn sender(&self) -> Address {
        self.sender
    }

    pub fn destination(&self) -> &DestinationAddress {
        &self.destination
    }

    pub fn amount(&self) -> U256 {
        self.amount
    }

    pub fn event_nonce(&self) -> u64 {
        self.event_nonce
    }
}
