//! Shared test doubles for integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use alloy::primitives::{keccak256, Address, Bytes, TxHash, U64};
use async_trait::async_trait;

use platon_aide::config::AideConfig;
use platon_aide::node::{NodeInfo, PlatonBlock, Receipt};
use platon_aide::{AideError, AideResult, BlockId, NodeRpc, TransactionIntent};

/// Anvil's first development key.
pub const KEY_A: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
/// Anvil's second development key.
pub const KEY_B: &str = "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

pub const CHAIN_ID: u64 = 100;
pub const GAS_PRICE: u128 = 1_000_000_000;
pub const ESTIMATED_GAS: u64 = 21_000;

/// In-memory node that records every call it receives.
pub struct MockNode {
    heights: Mutex<VecDeque<u64>>,
    pending_polls: AtomicUsize,
    gas_price: Mutex<u128>,
    reject_with: Mutex<Option<String>>,
    block: Mutex<Option<PlatonBlock>>,
    submitted: Mutex<Vec<Bytes>>,
    nonce_queries: Mutex<Vec<Address>>,
    calls_seen: Mutex<Vec<TransactionIntent>>,
    calls: Mutex<HashMap<&'static str, usize>>,
}

impl MockNode {
    pub fn new() -> Self {
        Self {
            heights: Mutex::new(VecDeque::from([1])),
            pending_polls: AtomicUsize::new(0),
            gas_price: Mutex::new(GAS_PRICE),
            reject_with: Mutex::new(None),
            block: Mutex::new(None),
            submitted: Mutex::new(Vec::new()),
            nonce_queries: Mutex::new(Vec::new()),
            calls_seen: Mutex::new(Vec::new()),
            calls: Mutex::new(HashMap::new()),
        }
    }

    /// Heights reported by successive `block_number` calls; the last repeats.
    pub fn with_heights(self, heights: &[u64]) -> Self {
        *self.heights.lock().unwrap() = heights.iter().copied().collect();
        self
    }

    /// Number of receipt polls answered with "pending" before the receipt.
    pub fn with_pending_polls(self, polls: usize) -> Self {
        self.pending_polls.store(polls, Ordering::SeqCst);
        self
    }

    pub fn with_gas_price(self, gas_price: u128) -> Self {
        *self.gas_price.lock().unwrap() = gas_price;
        self
    }

    pub fn rejecting(self, message: &str) -> Self {
        *self.reject_with.lock().unwrap() = Some(message.to_string());
        self
    }

    pub fn with_block(self, block: PlatonBlock) -> Self {
        *self.block.lock().unwrap() = Some(block);
        self
    }

    pub fn calls(&self, method: &str) -> usize {
        self.calls.lock().unwrap().get(method).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    pub fn submitted(&self) -> Vec<Bytes> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn nonce_queries(&self) -> Vec<Address> {
        self.nonce_queries.lock().unwrap().clone()
    }

    /// Intents received by read-only `call`s.
    pub fn calls_seen(&self) -> Vec<TransactionIntent> {
        self.calls_seen.lock().unwrap().clone()
    }

    fn record(&self, method: &'static str) {
        *self.calls.lock().unwrap().entry(method).or_insert(0) += 1;
    }

    fn current_height(&self) -> u64 {
        let mut heights = self.heights.lock().unwrap();
        if heights.len() > 1 {
            heights.pop_front().unwrap_or_default()
        } else {
            heights.front().copied().unwrap_or_default()
        }
    }
}

#[async_trait]
impl NodeRpc for MockNode {
    async fn chain_id(&self) -> AideResult<u64> {
        self.record("chain_id");
        Ok(CHAIN_ID)
    }

    async fn block_number(&self) -> AideResult<u64> {
        self.record("block_number");
        Ok(self.current_height())
    }

    async fn gas_price(&self) -> AideResult<u128> {
        self.record("gas_price");
        Ok(*self.gas_price.lock().unwrap())
    }

    async fn transaction_count(&self, address: Address) -> AideResult<u64> {
        self.record("transaction_count");
        self.nonce_queries.lock().unwrap().push(address);
        Ok(7)
    }

    async fn estimate_gas(&self, _intent: &TransactionIntent) -> AideResult<u64> {
        self.record("estimate_gas");
        Ok(ESTIMATED_GAS)
    }

    async fn send_raw_transaction(&self, raw: &Bytes) -> AideResult<TxHash> {
        self.record("send_raw_transaction");
        if let Some(message) = self.reject_with.lock().unwrap().clone() {
            return Err(AideError::Submission(message));
        }
        self.submitted.lock().unwrap().push(raw.clone());
        Ok(keccak256(raw))
    }

    async fn call(&self, intent: &TransactionIntent, _block: BlockId) -> AideResult<Bytes> {
        self.record("call");
        self.calls_seen.lock().unwrap().push(intent.clone());
        Ok(Bytes::from(vec![0u8; 31].into_iter().chain([42u8]).collect::<Vec<u8>>()))
    }

    async fn get_transaction_receipt(&self, hash: TxHash) -> AideResult<Option<Receipt>> {
        self.record("get_transaction_receipt");
        let pending = self.pending_polls.load(Ordering::SeqCst);
        if pending > 0 {
            self.pending_polls.store(pending - 1, Ordering::SeqCst);
            return Ok(None);
        }
        let known = self.submitted.lock().unwrap().iter().any(|raw| keccak256(raw) == hash);
        if !known {
            return Ok(None);
        }
        Ok(Some(Receipt {
            transaction_hash: hash,
            block_number: Some(U64::from(42)),
            block_hash: None,
            status: Some(U64::from(1)),
            gas_used: Some(U64::from(ESTIMATED_GAS)),
            contract_address: None,
            logs: Vec::new(),
        }))
    }

    async fn get_block(&self, _id: BlockId) -> AideResult<Option<PlatonBlock>> {
        self.record("get_block");
        Ok(self.block.lock().unwrap().clone())
    }

    async fn address_hrp(&self) -> AideResult<String> {
        self.record("address_hrp");
        Ok("lax".to_string())
    }

    async fn node_info(&self) -> AideResult<NodeInfo> {
        self.record("node_info");
        Ok(NodeInfo {
            node_id: "ab".repeat(64),
            bls_pubkey: "cd".repeat(96),
            bls_proof: "ef".repeat(64),
            version: 66_048,
            version_sign: "0x01".to_string(),
        })
    }
}

/// Config that needs no node round-trips to resolve chain id or prefix, and
/// never picks up a default key from the environment.
pub fn offline_config() -> AideConfig {
    let mut config = AideConfig::default();
    config.node.chain_id = Some(CHAIN_ID);
    config.node.hrp = Some("lat".to_string());
    config.account.default_private_key_env = "PLATON_AIDE_TEST_KEY_NEVER_SET".to_string();
    config
}
