//! Opaque account identifier.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AmmError;

/// Identifies a liquidity provider, trader, borrower or administrator.
///
/// The engine never interprets the bytes; identity verification belongs to
/// the host. Displayed and serialized as 64 lowercase hex characters so
/// it can key JSON maps.
///
/// # Examples
///
/// ```
/// use tandem_amm::domain::AccountId;
///
/// let alice = AccountId::from_bytes([0xab; 32]);
/// let parsed: AccountId = alice.to_string().parse().unwrap_or(AccountId::zero());
/// assert_eq!(parsed, alice);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// Wraps raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The all-zero account.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // first four bytes are enough to tell accounts apart in logs
        write!(f, "AccountId({}..)", hex::encode(&self.0[..4]))
    }
}

impl FromStr for AccountId {
    type Err = AmmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|_| AmmError::InvalidQuantity("account id must be 64 hex characters"))?;
        Ok(Self(bytes))
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn display_is_full_hex() {
        let id = AccountId::from_bytes([0x0f; 32]);
        assert_eq!(id.to_string(), "0f".repeat(32));
    }

    #[test]
    fn debug_is_abbreviated() {
        let id = AccountId::from_bytes([0xab; 32]);
        assert_eq!(format!("{id:?}"), "AccountId(abababab..)");
    }

    #[test]
    fn parse_round_trip() {
        let id = AccountId::from_bytes([7u8; 32]);
        let Ok(back) = id.to_string().parse::<AccountId>() else {
            panic!("expected valid hex");
        };
        assert_eq!(back, id);
    }

    #[test]
    fn parse_rejects_short_input() {
        let Err(AmmError::InvalidQuantity(_)) = "abcd".parse::<AccountId>() else {
            panic!("expected InvalidQuantity");
        };
    }

    #[test]
    fn serde_uses_hex_string() {
        let id = AccountId::from_bytes([1u8; 32]);
        let Ok(json) = serde_json::to_string(&id) else {
            panic!("serialize");
        };
        assert_eq!(json, format!("\"{}\"", "01".repeat(32)));
        let Ok(back) = serde_json::from_str::<AccountId>(&json) else {
            panic!("deserialize");
        };
        assert_eq!(back, id);
    }

    #[test]
    fn ordering_is_bytewise() {
        assert!(AccountId::zero() < AccountId::from_bytes([1u8; 32]));
    }
}
