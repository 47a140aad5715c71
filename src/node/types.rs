//! Node-facing types and the crate-wide error definition.

use alloy::eips::BlockNumberOrTag;
use alloy::primitives::{Address, Bytes, TxHash, B256, U64};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::account::address::{deserialize_address, deserialize_opt_address};

/// Errors surfaced by every client operation.
#[derive(Debug, Error)]
pub enum AideError {
    /// Neither an explicit nor a default private key was available.
    #[error("No signing key: pass a private key or set a default account")]
    NoSigningKey,

    /// The node rejected a signed transaction.
    #[error("Transaction rejected by node: {0}")]
    Submission(String),

    /// No receipt was observed before the receipt timeout elapsed.
    #[error("Transaction {tx_hash} not confirmed after {waited_secs} seconds")]
    ConfirmationTimeout { tx_hash: TxHash, waited_secs: u64 },

    /// Unrecognized return mode string.
    #[error("Unrecognized return mode '{0}', expected one of: txn, hash, receipt")]
    InvalidReturnMode(String),

    /// URI scheme does not map to a known transport.
    #[error("Unidentifiable uri {0}")]
    UnidentifiableUri(String),

    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// A single-attempt RPC request got no answer in time. The request may
    /// still have reached the node.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Block height did not reach the target before the deadline.
    #[error("Block {target} not reached after {waited_secs} seconds")]
    WaitTimeout { target: u64, waited_secs: u64 },

    /// A polling loop was cancelled by its caller.
    #[error("Wait cancelled")]
    Cancelled,

    /// A transaction builder was given unusable arguments.
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    /// Block identifier string could not be parsed.
    #[error("Invalid block identifier: {0}")]
    InvalidBlockId(String),

    /// Invalid private key format or signing failure.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Address could not be parsed or encoded.
    #[error("Address error: {0}")]
    Address(String),

    /// Gas price exceeded maximum allowed.
    #[error("Gas price {current_gwei} gwei exceeds maximum {max_gwei} gwei")]
    GasPriceTooHigh { current_gwei: u64, max_gwei: u64 },

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// Seal signature recovery failed.
    #[error("Signature recovery failed: {0}")]
    Recover(String),

    /// Requested object does not exist on the node.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type for client operations.
pub type AideResult<T> = Result<T, AideError>;

/// Identifies a block either by height/tag or by hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockId {
    Number(BlockNumberOrTag),
    Hash(B256),
}

impl BlockId {
    pub fn latest() -> Self {
        Self::Number(BlockNumberOrTag::Latest)
    }
}

impl From<u64> for BlockId {
    fn from(number: u64) -> Self {
        Self::Number(BlockNumberOrTag::Number(number))
    }
}

impl From<B256> for BlockId {
    fn from(hash: B256) -> Self {
        Self::Hash(hash)
    }
}

impl std::str::FromStr for BlockId {
    type Err = AideError;

    /// Accepts `latest`, `earliest`, `pending`, a decimal height, a `0x` height
    /// or a 32-byte `0x` hash.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "latest" => return Ok(Self::Number(BlockNumberOrTag::Latest)),
            "earliest" => return Ok(Self::Number(BlockNumberOrTag::Earliest)),
            "pending" => return Ok(Self::Number(BlockNumberOrTag::Pending)),
            _ => {}
        }
        if let Some(hex) = s.strip_prefix("0x") {
            if hex.len() == 64 {
                return s
                    .parse::<B256>()
                    .map(Self::Hash)
                    .map_err(|e| AideError::InvalidBlockId(format!("bad block hash '{}': {}", s, e)));
            }
            return u64::from_str_radix(hex, 16)
                .map(Self::from)
                .map_err(|e| AideError::InvalidBlockId(format!("bad block number '{}': {}", s, e)));
        }
        s.parse::<u64>()
            .map(Self::from)
            .map_err(|e| AideError::InvalidBlockId(format!("unrecognized '{}': {}", s, e)))
    }
}

/// Log entry attached to a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLog {
    #[serde(deserialize_with = "deserialize_address")]
    pub address: Address,
    #[serde(default)]
    pub topics: Vec<B256>,
    #[serde(default)]
    pub data: Bytes,
    #[serde(default)]
    pub log_index: Option<U64>,
}

/// Confirmation returned by the node once a transaction is mined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub transaction_hash: TxHash,
    #[serde(default)]
    pub block_number: Option<U64>,
    #[serde(default)]
    pub block_hash: Option<B256>,
    /// 1 for success, 0 for failure.
    #[serde(default)]
    pub status: Option<U64>,
    #[serde(default)]
    pub gas_used: Option<U64>,
    #[serde(default, deserialize_with = "deserialize_opt_address")]
    pub contract_address: Option<Address>,
    #[serde(default)]
    pub logs: Vec<ReceiptLog>,
}

impl Receipt {
    /// Whether the transaction executed successfully.
    pub fn succeeded(&self) -> bool {
        self.status.map(|s| s == U64::from(1)).unwrap_or(false)
    }

    pub fn block_number(&self) -> Option<u64> {
        self.block_number.map(|n| n.to::<u64>())
    }
}

/// Identity and version data reported by the node's admin namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub node_id: String,
    pub bls_pubkey: String,
    pub bls_proof: String,
    pub version: u64,
    pub version_sign: String,
}
