//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML and default
//! every field, so an empty file is a valid configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::transaction::return_mode::ReturnMode;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AideConfig {
    /// Node endpoint settings.
    pub node: NodeConfig,

    /// Transaction return policy and fee settings.
    pub transactions: TransactionConfig,

    /// Block-height wait settings.
    pub wait: WaitConfig,

    /// Default signing identity.
    pub account: AccountConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Node endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Primary endpoint (`http(s)://`, `ws(s)://` or `ipc://`).
    pub uri: String,

    /// Endpoints tried in order when the primary fails.
    pub failover_uris: Vec<String>,

    /// Expected chain id; queried from the node when unset.
    pub chain_id: Option<u64>,

    /// Bech32 address prefix; queried from the node when unset.
    pub hrp: Option<String>,

    /// JSON-RPC namespace (`platon` or `eth`).
    pub rpc_namespace: String,

    /// Per-call timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// How long `connect` keeps probing an unreachable node.
    pub connect_timeout_secs: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            uri: "http://127.0.0.1:6789".to_string(),
            failover_uris: Vec::new(),
            chain_id: None,
            hrp: None,
            rpc_namespace: "platon".to_string(),
            rpc_timeout_secs: 10,
            connect_timeout_secs: 10,
        }
    }
}

/// Transaction configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransactionConfig {
    /// What transaction-producing calls return: `txn`, `hash` or `receipt`.
    pub returns: ReturnMode,

    /// Give up waiting for a receipt after this many seconds.
    pub receipt_timeout_secs: u64,

    /// Receipt polling interval in milliseconds.
    pub receipt_poll_interval_ms: u64,

    /// Gas price multiplier (1.0 = node price, 1.2 = 20% buffer).
    pub gas_price_multiplier: f64,

    /// Maximum gas price in gwei (protection against spikes).
    pub max_gas_price_gwei: Option<u64>,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            returns: ReturnMode::Receipt,
            receipt_timeout_secs: 120,
            receipt_poll_interval_ms: 1000,
            gas_price_multiplier: 1.0,
            max_gas_price_gwei: None,
        }
    }
}

impl TransactionConfig {
    pub fn receipt_timeout(&self) -> Duration {
        Duration::from_secs(self.receipt_timeout_secs)
    }

    pub fn receipt_poll_interval(&self) -> Duration {
        Duration::from_millis(self.receipt_poll_interval_ms)
    }
}

/// Block-height wait configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WaitConfig {
    /// Seconds between height polls.
    pub block_poll_interval_secs: u64,

    /// Upper bound on any single wait; unbounded when unset.
    pub max_wait_secs: Option<u64>,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            block_poll_interval_secs: 3,
            max_wait_secs: None,
        }
    }
}

/// Default signing identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AccountConfig {
    /// Environment variable holding the default private key.
    pub default_private_key_env: String,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            default_private_key_env: "PLATON_AIDE_PRIVATE_KEY".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
