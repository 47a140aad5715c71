//! The transaction return policy.
//!
//! Every transaction-producing operation funnels through
//! [`TxExecutor::execute`], which receives the builder explicitly and
//! decides, from the effective [`ReturnMode`], whether the caller gets the
//! unsent intent, the submission hash or the mined receipt.
//!
//! ```text
//! builder() ─▶ merge txn ─▶ Unsent? ──yes──▶ intent
//!                              │no
//!                              ▼
//!               resolve key ─▶ fill from node ─▶ sign ─▶ sendRawTransaction
//!                                                              │
//!                                          Hash ◀──────────────┤
//!                                          Receipt ◀── poll ◀──┘
//! ```

use alloy::primitives::TxHash;
use serde::Serialize;

use crate::account::address::DEFAULT_HRP;
use crate::account::wallet::Account;
use crate::config::schema::TransactionConfig;
use crate::node::rpc::NodeRpc;
use crate::node::types::{AideError, AideResult, Receipt};
use crate::observability::metrics;
use crate::transaction::confirmation::{wait_for_receipt, ReceiptPolicy};
use crate::transaction::intent::TransactionIntent;
use crate::transaction::return_mode::ReturnMode;

/// Client-level transaction settings, passed to every execution.
#[derive(Debug, Clone)]
pub struct TxSettings {
    /// Mode used when a call does not override it.
    pub returns: ReturnMode,
    /// Key used when a call does not supply one.
    pub default_account: Option<Account>,
    /// Chain id for signing; queried from the node when unset.
    pub chain_id: Option<u64>,
    /// Prefix for accounts created from per-call keys.
    pub hrp: String,
    pub gas_price_multiplier: f64,
    pub max_gas_price_gwei: Option<u64>,
    pub receipt: ReceiptPolicy,
}

impl Default for TxSettings {
    fn default() -> Self {
        Self::from_config(&TransactionConfig::default())
    }
}

impl TxSettings {
    pub fn from_config(config: &TransactionConfig) -> Self {
        Self {
            returns: config.returns,
            default_account: None,
            chain_id: None,
            hrp: DEFAULT_HRP.to_string(),
            gas_price_multiplier: config.gas_price_multiplier,
            max_gas_price_gwei: config.max_gas_price_gwei,
            receipt: ReceiptPolicy::from(config),
        }
    }

    pub fn with_returns(mut self, returns: ReturnMode) -> Self {
        self.returns = returns;
        self
    }

    pub fn with_default_account(mut self, account: Account) -> Self {
        self.default_account = Some(account);
        self
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    pub fn with_receipt_policy(mut self, policy: ReceiptPolicy) -> Self {
        self.receipt = policy;
        self
    }

    /// Set the default mode from its string form. An unrecognized string
    /// leaves the current mode in place.
    pub fn set_returns(&mut self, returns: &str) -> AideResult<()> {
        self.returns = returns.parse()?;
        Ok(())
    }
}

/// Per-call inputs.
#[derive(Debug, Clone, Default)]
pub struct TxOptions {
    /// Base fields merged into the builder's intent.
    pub txn: TransactionIntent,
    /// Hex private key overriding the default account.
    pub private_key: Option<String>,
    /// Mode overriding [`TxSettings::returns`].
    pub returns: Option<ReturnMode>,
}

impl TxOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_txn(mut self, txn: TransactionIntent) -> Self {
        self.txn = txn;
        self
    }

    pub fn with_private_key(mut self, private_key: impl Into<String>) -> Self {
        self.private_key = Some(private_key.into());
        self
    }

    pub fn with_returns(mut self, returns: ReturnMode) -> Self {
        self.returns = Some(returns);
        self
    }
}

/// What a transaction-producing call yields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum TxOutcome {
    Unsent(TransactionIntent),
    Hash(TxHash),
    Receipt(Receipt),
}

impl TxOutcome {
    pub fn intent(&self) -> Option<&TransactionIntent> {
        match self {
            TxOutcome::Unsent(intent) => Some(intent),
            _ => None,
        }
    }

    /// Submission hash, available for both submitted variants.
    pub fn hash(&self) -> Option<TxHash> {
        match self {
            TxOutcome::Unsent(_) => None,
            TxOutcome::Hash(hash) => Some(*hash),
            TxOutcome::Receipt(receipt) => Some(receipt.transaction_hash),
        }
    }

    pub fn receipt(&self) -> Option<&Receipt> {
        match self {
            TxOutcome::Receipt(receipt) => Some(receipt),
            _ => None,
        }
    }
}

/// Applies the return policy to transaction builders.
#[derive(Clone, Copy)]
pub struct TxExecutor<'a> {
    rpc: &'a dyn NodeRpc,
    settings: &'a TxSettings,
}

impl<'a> TxExecutor<'a> {
    pub fn new(rpc: &'a dyn NodeRpc, settings: &'a TxSettings) -> Self {
        Self { rpc, settings }
    }

    pub fn settings(&self) -> &TxSettings {
        self.settings
    }

    pub fn rpc(&self) -> &'a dyn NodeRpc {
        self.rpc
    }

    /// Build, merge and then return, submit, or submit-and-confirm.
    pub async fn execute<F>(&self, builder: F, options: TxOptions) -> AideResult<TxOutcome>
    where
        F: FnOnce() -> AideResult<TransactionIntent>,
    {
        let intent = builder()?.merged_with(&options.txn);
        let mode = options.returns.unwrap_or(self.settings.returns);
        metrics::record_transaction(mode);

        if !mode.submits() {
            tracing::debug!(to = ?intent.to, "Returning unsent transaction");
            return Ok(TxOutcome::Unsent(intent));
        }

        let account = self.resolve_account(options.private_key.as_deref())?;
        self.submit(intent, &account, mode).await
    }

    /// Sign and send an already built intent.
    pub async fn send(
        &self,
        intent: TransactionIntent,
        private_key: Option<&str>,
        mode: ReturnMode,
    ) -> AideResult<TxOutcome> {
        let mut options = TxOptions::new().with_returns(mode);
        options.private_key = private_key.map(str::to_string);
        self.execute(move || Ok(intent), options).await
    }

    /// Explicit key first, then the default account.
    pub fn resolve_account(&self, private_key: Option<&str>) -> AideResult<Account> {
        match private_key {
            Some(key) => Account::from_private_key(key, &self.settings.hrp),
            None => self
                .settings
                .default_account
                .clone()
                .ok_or(AideError::NoSigningKey),
        }
    }

    /// Complete every field signing needs, asking the node for what is missing.
    pub async fn fill(
        &self,
        mut intent: TransactionIntent,
        account: &Account,
    ) -> AideResult<TransactionIntent> {
        let from = account.address();
        if let Some(explicit) = intent.from {
            if explicit != from {
                return Err(AideError::Wallet(format!(
                    "sender {} does not match signing key {}",
                    explicit, from
                )));
            }
        }
        intent.from = Some(from);

        if intent.chain_id.is_none() {
            intent.chain_id = Some(match self.settings.chain_id {
                Some(chain_id) => chain_id,
                None => self.rpc.chain_id().await?,
            });
        }
        if intent.nonce.is_none() {
            intent.nonce = Some(self.rpc.transaction_count(from).await?);
        }
        if intent.gas_price.is_none() {
            intent.gas_price = Some(self.gas_price().await?);
        }
        if intent.gas.is_none() {
            intent.gas = Some(self.rpc.estimate_gas(&intent).await?);
        }
        Ok(intent)
    }

    async fn gas_price(&self) -> AideResult<u128> {
        let gas_price = self.rpc.gas_price().await?;
        let gas_price_gwei = gas_price / 1_000_000_000;

        if let Some(max_gwei) = self.settings.max_gas_price_gwei {
            if gas_price_gwei > max_gwei as u128 {
                return Err(AideError::GasPriceTooHigh {
                    current_gwei: gas_price_gwei as u64,
                    max_gwei,
                });
            }
        }

        Ok((gas_price as f64 * self.settings.gas_price_multiplier) as u128)
    }

    async fn submit(
        &self,
        intent: TransactionIntent,
        account: &Account,
        mode: ReturnMode,
    ) -> AideResult<TxOutcome> {
        let intent = self.fill(intent, account).await?;
        let signed = account.sign(&intent).await?;

        let tx_hash = self.rpc.send_raw_transaction(&signed.raw).await?;
        if tx_hash != signed.hash {
            tracing::warn!(
                node_hash = %tx_hash,
                local_hash = %signed.hash,
                "Node reported a different transaction hash"
            );
        }
        tracing::info!(
            tx_hash = %tx_hash,
            from = %account.address(),
            nonce = ?intent.nonce,
            "Transaction submitted"
        );

        match mode {
            ReturnMode::Hash => Ok(TxOutcome::Hash(tx_hash)),
            _ => wait_for_receipt(self.rpc, tx_hash, &self.settings.receipt)
                .await
                .map(TxOutcome::Receipt),
        }
    }
}
