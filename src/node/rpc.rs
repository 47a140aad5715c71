//! The node collaborator.
//!
//! Everything the client needs from a node goes through [`NodeRpc`]. The
//! production implementation is [`crate::node::NodeClient`]; tests supply
//! in-memory doubles.

use alloy::primitives::{Address, Bytes, TxHash};
use async_trait::async_trait;

use crate::node::block::PlatonBlock;
use crate::node::types::{AideResult, BlockId, NodeInfo, Receipt};
use crate::transaction::intent::TransactionIntent;

#[async_trait]
pub trait NodeRpc: Send + Sync {
    async fn chain_id(&self) -> AideResult<u64>;

    async fn block_number(&self) -> AideResult<u64>;

    /// Current gas price in von.
    async fn gas_price(&self) -> AideResult<u128>;

    /// Pending nonce of `address`.
    async fn transaction_count(&self, address: Address) -> AideResult<u64>;

    async fn estimate_gas(&self, intent: &TransactionIntent) -> AideResult<u64>;

    /// Submit a signed, encoded transaction exactly once. Node-side rejection
    /// maps to [`crate::AideError::Submission`].
    async fn send_raw_transaction(&self, raw: &Bytes) -> AideResult<TxHash>;

    /// Execute a read-only call against state at `block`.
    async fn call(&self, intent: &TransactionIntent, block: BlockId) -> AideResult<Bytes>;

    /// `Ok(None)` while the transaction is still pending.
    async fn get_transaction_receipt(&self, hash: TxHash) -> AideResult<Option<Receipt>>;

    async fn get_block(&self, id: BlockId) -> AideResult<Option<PlatonBlock>>;

    /// Bech32 prefix used by the node for addresses.
    async fn address_hrp(&self) -> AideResult<String>;

    async fn node_info(&self) -> AideResult<NodeInfo>;
}
