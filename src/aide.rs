//! The client facade.

use std::sync::Arc;
use std::time::Duration;

use crate::account::wallet::Account;
use crate::config::schema::AideConfig;
use crate::modules::{Contract, Transfer};
use crate::node::block::ec_recover;
use crate::node::client::NodeClient;
use crate::node::rpc::NodeRpc;
use crate::node::types::{AideError, AideResult, BlockId, NodeInfo};
use crate::transaction::executor::{TxExecutor, TxOutcome, TxSettings};
use crate::transaction::intent::TransactionIntent;
use crate::transaction::return_mode::ReturnMode;
use crate::wait::block::{wait_for_block, WaitOptions};
use crate::wait::cancel::Cancellation;

/// A node connection plus the settings every transaction call runs with.
pub struct PlatonAide {
    rpc: Arc<dyn NodeRpc>,
    uri: String,
    chain_id: u64,
    hrp: String,
    settings: TxSettings,
    wait: WaitOptions,
    cancel: Cancellation,
}

impl PlatonAide {
    /// Connect to the configured node and resolve chain id and address prefix.
    pub async fn connect(config: &AideConfig) -> AideResult<Self> {
        let client = NodeClient::connect(config.node.clone()).await?;
        Self::with_rpc(Arc::new(client), config).await
    }

    /// Build on an existing node collaborator. Chain id and prefix come from
    /// the config when present, otherwise from the node.
    pub async fn with_rpc(rpc: Arc<dyn NodeRpc>, config: &AideConfig) -> AideResult<Self> {
        let chain_id = match config.node.chain_id {
            Some(chain_id) => chain_id,
            None => rpc.chain_id().await?,
        };
        let hrp = match &config.node.hrp {
            Some(hrp) => hrp.clone(),
            None => rpc.address_hrp().await?,
        };

        let mut settings = TxSettings::from_config(&config.transactions).with_chain_id(chain_id);
        settings.hrp = hrp.clone();

        match Account::from_env(&config.account.default_private_key_env, &hrp) {
            Ok(account) => {
                tracing::info!(address = %account.address(), "Default account loaded");
                settings.default_account = Some(account);
            }
            Err(e) => tracing::debug!(error = %e, "No default account configured"),
        }

        tracing::debug!(chain_id = chain_id, hrp = %hrp, returns = %settings.returns, "Client ready");

        Ok(Self {
            rpc,
            uri: config.node.uri.clone(),
            chain_id,
            hrp,
            settings,
            wait: WaitOptions::from(&config.wait),
            cancel: Cancellation::new(),
        })
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn hrp(&self) -> &str {
        &self.hrp
    }

    pub fn rpc(&self) -> &dyn NodeRpc {
        self.rpc.as_ref()
    }

    pub fn settings(&self) -> &TxSettings {
        &self.settings
    }

    pub fn returns(&self) -> ReturnMode {
        self.settings.returns
    }

    /// Change the default return mode (`txn`, `hash` or `receipt`).
    pub fn set_returns(&mut self, returns: &str) -> AideResult<()> {
        self.settings.set_returns(returns)
    }

    pub fn set_default_account(&mut self, account: Account) {
        self.settings.default_account = Some(account);
    }

    /// Signal that aborts any in-flight [`PlatonAide::wait_block`].
    pub fn cancellation(&self) -> &Cancellation {
        &self.cancel
    }

    pub fn executor(&self) -> TxExecutor<'_> {
        TxExecutor::new(self.rpc.as_ref(), &self.settings)
    }

    pub fn transfer(&self) -> Transfer<'_> {
        Transfer::new(self.executor())
    }

    pub fn contract(&self) -> Contract<'_> {
        Contract::new(self.executor())
    }

    /// Create a fresh account, returning its bech32 address and raw private key.
    pub fn create_account(&self) -> AideResult<(String, String)> {
        let account = Account::create(&self.hrp);
        Ok((account.bech32_address()?, account.private_key_hex()))
    }

    /// Sign and send an intent with an explicit mode.
    pub async fn send_transaction(
        &self,
        intent: TransactionIntent,
        private_key: Option<&str>,
        returns: ReturnMode,
    ) -> AideResult<TxOutcome> {
        self.executor().send(intent, private_key, returns).await
    }

    /// Wait until the chain reaches `to_block`, polling every `interval`
    /// (the configured interval when `None`).
    pub async fn wait_block(
        &self,
        to_block: Option<u64>,
        interval: Option<Duration>,
    ) -> AideResult<Option<u64>> {
        let mut options = self.wait.clone();
        if let Some(interval) = interval {
            options.interval = interval;
        }
        wait_for_block(self.rpc.as_ref(), to_block, &options, Some(self.cancel.subscribe())).await
    }

    /// Public key of the node that sealed the given block.
    pub async fn ec_recover(&self, block: BlockId) -> AideResult<String> {
        let block = self
            .rpc
            .get_block(block)
            .await?
            .ok_or_else(|| AideError::NotFound(format!("block {:?}", block)))?;
        ec_recover(&block)
    }

    pub async fn node_info(&self) -> AideResult<NodeInfo> {
        self.rpc.node_info().await
    }

    pub async fn block_number(&self) -> AideResult<u64> {
        self.rpc.block_number().await
    }
}

impl std::fmt::Debug for PlatonAide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatonAide")
            .field("uri", &self.uri)
            .field("chain_id", &self.chain_id)
            .field("hrp", &self.hrp)
            .field("returns", &self.settings.returns)
            .finish()
    }
}
