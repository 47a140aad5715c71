//! Native token transfers.

use alloy::primitives::{Address, U256};

use crate::account::address::parse_address;
use crate::node::types::AideResult;
use crate::transaction::executor::{TxExecutor, TxOptions, TxOutcome};
use crate::transaction::intent::TransactionIntent;

/// Gas for a plain value transfer.
pub const TRANSFER_GAS: u64 = 21_000;

/// Intent moving `amount` von to `to`.
pub fn transfer_intent(to: Address, amount: U256) -> TransactionIntent {
    TransactionIntent::new()
        .with_to(to)
        .with_value(amount)
        .with_gas(TRANSFER_GAS)
}

pub struct Transfer<'a> {
    executor: TxExecutor<'a>,
}

impl<'a> Transfer<'a> {
    pub fn new(executor: TxExecutor<'a>) -> Self {
        Self { executor }
    }

    /// Send `amount` von to `to` (hex or bech32).
    pub async fn transfer(&self, to: &str, amount: U256, options: TxOptions) -> AideResult<TxOutcome> {
        self.executor
            .execute(|| Ok(transfer_intent(parse_address(to)?, amount)), options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_intent() {
        let to = Address::repeat_byte(0x42);
        let intent = transfer_intent(to, U256::from(5));
        assert_eq!(intent.to, Some(to));
        assert_eq!(intent.value, Some(U256::from(5)));
        assert_eq!(intent.gas, Some(TRANSFER_GAS));
        assert!(intent.data.is_none());
    }
}
