//! Identifier distinguishing bridge deployments.

use std::{fmt, str::FromStr};

use alloy_primitives::B256;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::CodecError;

/// 32-byte bridge identifier.
///
/// Commitments are bound to the bridge id so that signatures made for one
/// deployment can never be replayed against another. Short names are stored
/// right-padded with zeros, matching fixed-size string semantics. The
/// all-zero id is never valid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, BorshSerialize)]
#[serde(try_from = "B256", into = "B256")]
pub struct BridgeId(B256);

impl BridgeId {
    pub fn new(id: B256) -> Result<Self, CodecError> {
        if id.is_zero() {
            return Err(CodecError::ZeroBridgeId);
        }
        Ok(Self(id))
    }

    /// Builds an id from up to 32 raw bytes, right-padded with zeros.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() > 32 {
            return Err(CodecError::InvalidBridgeIdLength(bytes.len()));
        }
        Self::new(B256::right_padding_from(bytes))
    }

    /// Builds an id from a short ASCII name such as `"foo"`.
    pub fn from_name(name: &str) -> Result<Self, CodecError> {
        Self::from_bytes(name.as_bytes())
    }

    pub fn as_b256(&self) -> B256 {
        self.0
    }

    /// The id as a name if it is printable ASCII followed by zero padding.
    pub fn name(&self) -> Option<&str> {
        let end = self.0.iter().rposition(|b| *b != 0)? + 1;
        let bytes = &self.0[..end];
        if bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            std::str::from_utf8(bytes).ok()
        } else {
            None
        }
    }
}

impl fmt::Debug for BridgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "BridgeId({name:?})"),
            None => write!(f, "BridgeId({})", self.0),
        }
    }
}

impl fmt::Display for BridgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Parses either a `0x`-prefixed 32-byte hex string or a short name.
impl FromStr for BridgeId {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 66 && s.starts_with("0x") {
            let id = B256::from_str(s).map_err(|e| CodecError::InvalidBridgeIdHex(e.to_string()))?;
            return Self::new(id);
        }
        Self::from_name(s)
    }
}

impl TryFrom<B256> for BridgeId {
    type Error = CodecError;

    fn try_from(value: B256) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BridgeId> for B256 {
    fn from(value: BridgeId) -> Self {
        value.0
    }
}

impl BorshDeserialize for BridgeId {
    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        let raw = B256::deserialize_reader(reader)?;
        Self::new(raw)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::b256;

    use super::*;

    #[test]
    fn test_from_name_right_pads() {
        let id = BridgeId::from_name("foo").unwrap();
        assert_eq!(
            id.as_b256(),
            b256!("0x666f6f0000000000000000000000000000000000000000000000000000000000")
        );
        assert_eq!(id.name(), Some("foo"));
    }

    #[test]
    fn test_rejects_invalid() {
        assert_eq!(BridgeId::from_name(""), Err(CodecError::ZeroBridgeId));
        assert_eq!(
            BridgeId::from_bytes(&[1u8; 33]),
            Err(CodecError::InvalidBridgeIdLength(33))
        );
        assert_eq!(BridgeId::new(B256::ZERO), Err(CodecError::ZeroBridgeId));
    }

    #[test]
    fn test_parse_hex_or_name() {
        let hex = "0x666f6f0000000000000000000000000000000000000000000000000000000000";
        assert_eq!(
            hex.parse::<BridgeId>().unwrap(),
            BridgeId::from_name("foo").unwrap()
        );
        assert_eq!(
            "peggy".parse::<BridgeId>().unwrap(),
            BridgeId::from_name("peggy").unwrap()
        );
    }

    #[test]
    fn test_name_of_binary_id() {
        let id = BridgeId::new(B256::repeat_byte(0xff)).unwrap();
        assert_eq!(id.name(), None);
    }

    #[test]
    fn test_borsh_rejects_zero() {
        let bytes = borsh::to_vec(&B256::ZERO).unwrap();
        assert!(borsh::from_slice::<BridgeId>(&bytes).is_err());
    }
}
