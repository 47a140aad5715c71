//! What a transaction-producing call hands back to its caller.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::node::types::AideError;

/// Return policy for transaction-producing calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReturnMode {
    /// Return the merged intent without signing or sending it.
    Unsent,
    /// Sign, submit and return the transaction hash.
    Hash,
    /// Sign, submit and wait for the receipt.
    #[default]
    Receipt,
}

impl ReturnMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnMode::Unsent => "txn",
            ReturnMode::Hash => "hash",
            ReturnMode::Receipt => "receipt",
        }
    }

    /// Whether this mode touches the network.
    pub fn submits(&self) -> bool {
        !matches!(self, ReturnMode::Unsent)
    }
}

impl fmt::Display for ReturnMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReturnMode {
    type Err = AideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "txn" => Ok(ReturnMode::Unsent),
            "hash" => Ok(ReturnMode::Hash),
            "receipt" => Ok(ReturnMode::Receipt),
            other => Err(AideError::InvalidReturnMode(other.to_string())),
        }
    }
}

impl TryFrom<String> for ReturnMode {
    type Error = AideError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReturnMode> for String {
    fn from(mode: ReturnMode) -> Self {
        mode.as_str().to_string()
    }
}
