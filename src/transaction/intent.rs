//! Unsigned transaction descriptions.

use alloy::primitives::{Address, Bytes, U128, U256, U64};
use serde::{Deserialize, Serialize};

/// A partially specified, unsigned transaction.
///
/// Builders fill in what they know (`to`, `value`, `data`); the executor
/// completes the rest from the node before signing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionIntent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    /// `None` deploys a contract.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<u128>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Bytes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
}

impl TransactionIntent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_to(mut self, to: Address) -> Self {
        self.to = Some(to);
        self
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_gas(mut self, gas: u64) -> Self {
        self.gas = Some(gas);
        self
    }

    pub fn with_gas_price(mut self, gas_price: u128) -> Self {
        self.gas_price = Some(gas_price);
        self
    }

    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn with_data(mut self, data: Bytes) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    /// Merge a caller-supplied base into a builder's intent.
    ///
    /// Base fields win, except `to` and `data`, which stay with the builder
    /// whenever the builder set them.
    pub fn merged_with(self, base: &TransactionIntent) -> TransactionIntent {
        TransactionIntent {
            from: base.from.or(self.from),
            to: self.to.or(base.to),
            value: base.value.or(self.value),
            gas: base.gas.or(self.gas),
            gas_price: base.gas_price.or(self.gas_price),
            nonce: base.nonce.or(self.nonce),
            data: self.data.or_else(|| base.data.clone()),
            chain_id: base.chain_id.or(self.chain_id),
        }
    }

    /// Whether every field needed for signing is present.
    pub fn is_complete(&self) -> bool {
        self.from.is_some()
            && self.gas.is_some()
            && self.gas_price.is_some()
            && self.nonce.is_some()
            && self.chain_id.is_some()
    }

    /// JSON-RPC call object, as used by `estimateGas`.
    pub fn to_call_object(&self) -> serde_json::Value {
        let mut call = serde_json::Map::new();
        if let Some(from) = self.from {
            call.insert("from".into(), serde_json::json!(from));
        }
        if let Some(to) = self.to {
            call.insert("to".into(), serde_json::json!(to));
        }
        if let Some(value) = self.value {
            call.insert("value".into(), serde_json::json!(value));
        }
        if let Some(gas) = self.gas {
            call.insert("gas".into(), serde_json::json!(U64::from(gas)));
        }
        if let Some(gas_price) = self.gas_price {
            call.insert("gasPrice".into(), serde_json::json!(U128::from(gas_price)));
        }
        if let Some(data) = &self.data {
            call.insert("data".into(), serde_json::json!(data));
        }
        serde_json::Value::Object(call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    #[test]
    fn test_base_overrides_builder_fields() {
        let built = TransactionIntent::new()
            .with_to(addr(1))
            .with_value(U256::from(10))
            .with_gas(21_000);
        let base = TransactionIntent::new()
            .with_gas(50_000)
            .with_gas_price(1_000_000_000)
            .with_nonce(7);

        let merged = built.merged_with(&base);
        assert_eq!(merged.to, Some(addr(1)));
        assert_eq!(merged.value, Some(U256::from(10)));
        assert_eq!(merged.gas, Some(50_000));
        assert_eq!(merged.gas_price, Some(1_000_000_000));
        assert_eq!(merged.nonce, Some(7));
    }

    #[test]
    fn test_builder_keeps_destination_and_payload() {
        let built = TransactionIntent::new()
            .with_to(addr(1))
            .with_data(Bytes::from_static(&[0xaa]));
        let base = TransactionIntent::new()
            .with_to(addr(2))
            .with_data(Bytes::from_static(&[0xbb]));

        let merged = built.merged_with(&base);
        assert_eq!(merged.to, Some(addr(1)));
        assert_eq!(merged.data, Some(Bytes::from_static(&[0xaa])));
    }

    #[test]
    fn test_base_fills_missing_destination() {
        let merged = TransactionIntent::new().merged_with(&TransactionIntent::new().with_to(addr(3)));
        assert_eq!(merged.to, Some(addr(3)));
    }

    #[test]
    fn test_call_object_uses_hex_quantities() {
        let call = TransactionIntent::new()
            .with_to(addr(1))
            .with_gas(21_000)
            .with_value(U256::from(255))
            .to_call_object();
        assert_eq!(call["gas"], "0x5208");
        assert_eq!(call["value"], "0xff");
        assert!(call.get("data").is_none());
    }

    #[test]
    fn test_completeness() {
        let intent = TransactionIntent::new()
            .with_from(addr(1))
            .with_gas(21_000)
            .with_gas_price(1)
            .with_nonce(0);
        assert!(!intent.is_complete());
        assert!(intent.with_chain_id(100).is_complete());
    }
}
