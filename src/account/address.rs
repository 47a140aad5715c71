//! Address encoding.
//!
//! PlatON nodes may report addresses either as `0x` hex or as bech32 strings
//! with a network prefix (`lat` on mainnet, `lax` on testnets). Both forms
//! decode to the same 20-byte [`Address`].

use alloy::primitives::Address;
use bech32::{Bech32, Hrp};
use serde::{Deserialize, Deserializer};

use crate::node::types::{AideError, AideResult};

/// Default human-readable prefix when the node does not report one.
pub const DEFAULT_HRP: &str = "lat";

/// Encode an address as bech32 with the given prefix.
pub fn to_bech32(address: &Address, hrp: &str) -> AideResult<String> {
    let hrp = Hrp::parse(hrp)
        .map_err(|e| AideError::Address(format!("invalid hrp '{}': {}", hrp, e)))?;
    bech32::encode::<Bech32>(hrp, address.as_slice())
        .map_err(|e| AideError::Address(format!("bech32 encoding failed: {}", e)))
}

/// Parse an address from `0x` hex or bech32.
pub fn parse_address(s: &str) -> AideResult<Address> {
    let s = s.trim();
    if s.starts_with("0x") || s.starts_with("0X") {
        return s
            .parse::<Address>()
            .map_err(|e| AideError::Address(format!("invalid hex address '{}': {}", s, e)));
    }

    let (_, data) = bech32::decode(s)
        .map_err(|e| AideError::Address(format!("invalid bech32 address '{}': {}", s, e)))?;
    if data.len() != 20 {
        return Err(AideError::Address(format!(
            "address '{}' decodes to {} bytes, expected 20",
            s,
            data.len()
        )));
    }
    Ok(Address::from_slice(&data))
}

/// Serde helper accepting hex or bech32 addresses.
pub fn deserialize_address<'de, D>(deserializer: D) -> Result<Address, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_address(&raw).map_err(serde::de::Error::custom)
}

/// Serde helper for nullable addresses (e.g. `contractAddress`).
pub fn deserialize_opt_address<'de, D>(deserializer: D) -> Result<Option<Address>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.is_empty() => parse_address(&raw)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}
