use crate::identity::PublicKey;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::fmt;
use thiserror::Error;

const ADDRESS_PREFIX: &str = "0x";
const ADDRESS_LEN: usize = 20;

#[derive(Error, Debug)]
pub enum AddressError {
    #[error("Invalid address format: {0}")]
    InvalidFormat(String),

    #[error("Invalid address length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("Invalid hex encoding: {0}")]
    InvalidHex(String),
}

/// Account address in the format: 0x<40 hex chars>
///
/// Derived from a public key as the last 20 bytes of its Keccak-256
/// hash. The all-zero address is reserved as the null address and is
/// never a valid owner or transfer recipient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// The null address - never owns a ticket
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    /// Derive an address from a public key (Keccak-256, last 20 bytes)
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let hash = Keccak256::digest(public_key.as_bytes());
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&hash[hash.len() - ADDRESS_LEN..]);
        Self(bytes)
    }

    /// Parse an address from a 0x-prefixed hex string
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        if s.is_empty() {
            return Err(AddressError::InvalidFormat("address cannot be empty".into()));
        }

        let hex_part = s
            .strip_prefix(ADDRESS_PREFIX)
            .ok_or_else(|| AddressError::InvalidFormat("missing 0x prefix".into()))?;

        let decoded = hex::decode(hex_part).map_err(|e| AddressError::InvalidHex(e.to_string()))?;

        if decoded.len() != ADDRESS_LEN {
            return Err(AddressError::InvalidLength {
                expected: ADDRESS_LEN,
                got: decoded.len(),
            });
        }

        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&decoded);
        Ok(Self(bytes))
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Check whether this is the null address
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LEN]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ADDRESS_PREFIX, hex::encode(self.0))
    }
}
