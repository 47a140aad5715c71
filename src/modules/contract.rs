//! Contract deployment and state-changing calls.

use alloy::primitives::{Address, Bytes, U256};

use crate::node::types::{AideError, AideResult, BlockId};
use crate::transaction::executor::{TxExecutor, TxOptions, TxOutcome};
use crate::transaction::intent::TransactionIntent;

/// Intent creating a contract from init code (bytecode + encoded constructor args).
pub fn deploy_intent(init_code: Bytes) -> AideResult<TransactionIntent> {
    if init_code.is_empty() {
        return Err(AideError::InvalidTransaction("cannot deploy empty init code".to_string()));
    }
    Ok(TransactionIntent::new().with_data(init_code))
}

/// Intent calling `to` with ABI-encoded `calldata`.
pub fn call_intent(to: Address, calldata: Bytes, value: U256) -> TransactionIntent {
    let intent = TransactionIntent::new().with_to(to).with_data(calldata);
    if value.is_zero() {
        intent
    } else {
        intent.with_value(value)
    }
}

pub struct Contract<'a> {
    executor: TxExecutor<'a>,
}

impl<'a> Contract<'a> {
    pub fn new(executor: TxExecutor<'a>) -> Self {
        Self { executor }
    }

    pub async fn deploy(&self, init_code: Bytes, options: TxOptions) -> AideResult<TxOutcome> {
        self.executor.execute(|| deploy_intent(init_code), options).await
    }

    pub async fn transact(
        &self,
        to: Address,
        calldata: Bytes,
        value: U256,
        options: TxOptions,
    ) -> AideResult<TxOutcome> {
        self.executor
            .execute(|| Ok(call_intent(to, calldata, value)), options)
            .await
    }

    /// Read-only call at the latest block. Nothing is signed or submitted.
    pub async fn call(&self, to: Address, calldata: Bytes) -> AideResult<Bytes> {
        self.call_at(to, calldata, BlockId::latest()).await
    }

    pub async fn call_at(&self, to: Address, calldata: Bytes, block: BlockId) -> AideResult<Bytes> {
        let intent = call_intent(to, calldata, U256::ZERO);
        self.executor.rpc().call(&intent, block).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deploy_has_no_destination() {
        let intent = deploy_intent(Bytes::from_static(&[0x60, 0x80])).unwrap();
        assert!(intent.to.is_none());
        assert_eq!(intent.data, Some(Bytes::from_static(&[0x60, 0x80])));
    }

    #[test]
    fn test_empty_init_code() {
        assert!(matches!(
            deploy_intent(Bytes::new()),
            Err(AideError::InvalidTransaction(_))
        ));
    }

    #[test]
    fn test_call_omits_zero_value() {
        let intent = call_intent(Address::ZERO, Bytes::from_static(&[1]), U256::ZERO);
        assert!(intent.value.is_none());
        let intent = call_intent(Address::ZERO, Bytes::new(), U256::from(9));
        assert_eq!(intent.value, Some(U256::from(9)));
    }
}
