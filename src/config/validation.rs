//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. All problems are
//! reported at once rather than stopping at the first.

use std::fmt;

use bech32::Hrp;

use crate::config::schema::AideConfig;
use crate::node::transport::Transport;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AideConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = Transport::from_uri(&config.node.uri) {
        errors.push(ValidationError::new("node.uri", e.to_string()));
    }
    for uri in &config.node.failover_uris {
        if let Err(e) = Transport::from_uri(uri) {
            errors.push(ValidationError::new("node.failover_uris", e.to_string()));
        }
    }
    if let Some(hrp) = &config.node.hrp {
        if Hrp::parse(hrp).is_err() {
            errors.push(ValidationError::new("node.hrp", format!("'{}' is not a valid bech32 prefix", hrp)));
        }
    }
    if !matches!(config.node.rpc_namespace.as_str(), "platon" | "eth") {
        errors.push(ValidationError::new(
            "node.rpc_namespace",
            format!("'{}' is not one of: platon, eth", config.node.rpc_namespace),
        ));
    }
    if config.node.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("node.rpc_timeout_secs", "must be greater than 0"));
    }
    if config.transactions.receipt_timeout_secs == 0 {
        errors.push(ValidationError::new("transactions.receipt_timeout_secs", "must be greater than 0"));
    }
    if config.transactions.receipt_poll_interval_ms == 0 {
        errors.push(ValidationError::new("transactions.receipt_poll_interval_ms", "must be greater than 0"));
    }
    if !(config.transactions.gas_price_multiplier > 0.0) {
        errors.push(ValidationError::new("transactions.gas_price_multiplier", "must be positive"));
    }
    if config.account.default_private_key_env.is_empty() {
        errors.push(ValidationError::new("account.default_private_key_env", "must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
