//! Node RPC client with timeout and failover handling.
//!
//! # Responsibilities
//! - Open providers for the primary and failover endpoints
//! - Issue namespaced JSON-RPC calls (`platon_*` or `eth_*`)
//! - Bound every call by the configured timeout, trying providers in order
//! - Separate node-side rejections from transport failures

use std::borrow::Cow;
use std::sync::Arc;
use std::time::{Duration, Instant};

use alloy::eips::BlockNumberOrTag;
use alloy::primitives::{Address, Bytes, TxHash, U128, U64};
use alloy::providers::Provider;
use alloy::rpc::json_rpc::{RpcRecv, RpcSend};
use async_trait::async_trait;
use serde::Deserialize;
use tokio::time::{sleep, timeout};

use crate::account::address::DEFAULT_HRP;
use crate::config::schema::NodeConfig;
use crate::node::block::PlatonBlock;
use crate::node::rpc::NodeRpc;
use crate::node::transport::Transport;
use crate::node::types::{AideError, AideResult, BlockId, NodeInfo, Receipt};
use crate::observability::metrics;
use crate::transaction::intent::TransactionIntent;

/// Pause between connectivity probes in [`NodeClient::connect`].
const CONNECT_PROBE_INTERVAL: Duration = Duration::from_secs(2);

/// JSON-RPC client for a PlatON node.
#[derive(Clone)]
pub struct NodeClient {
    /// Primary provider followed by failovers.
    providers: Vec<Arc<dyn Provider + Send + Sync>>,
    config: NodeConfig,
    timeout_duration: Duration,
}

/// JSON-RPC error code for an unknown method.
const METHOD_NOT_FOUND: i64 = -32601;

/// Why a namespaced call produced no result.
enum CallError {
    /// The node answered with a JSON-RPC error object.
    Rejected { code: i64, message: String },
    /// The provider failed at the transport level, or every provider did.
    Unavailable(String),
    /// No answer within the per-call timeout.
    TimedOut(u64),
}

impl CallError {
    fn into_rpc(self, name: &str) -> AideError {
        match self {
            CallError::Rejected { message, .. } => AideError::Rpc(format!("{}: {}", name, message)),
            CallError::Unavailable(message) => AideError::Rpc(message),
            CallError::TimedOut(secs) => AideError::Rpc(format!("{}: timed out after {}s", name, secs)),
        }
    }
}

impl NodeClient {
    /// Open providers for every configured endpoint without probing them.
    pub async fn new(config: NodeConfig) -> AideResult<Self> {
        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);
        let mut providers = Vec::new();

        providers.push(Transport::from_uri(&config.uri)?.connect().await?);

        for uri in &config.failover_uris {
            match Transport::from_uri(uri) {
                Ok(transport) => match transport.connect().await {
                    Ok(provider) => providers.push(provider),
                    Err(e) => tracing::warn!(uri = %uri, error = %e, "Skipping unreachable failover endpoint"),
                },
                Err(e) => tracing::warn!(uri = %uri, error = %e, "Ignoring invalid failover endpoint"),
            }
        }

        Ok(Self {
            providers,
            config,
            timeout_duration,
        })
    }

    /// Open providers and wait until the node answers, bounded by
    /// `connect_timeout_secs`.
    pub async fn connect(config: NodeConfig) -> AideResult<Self> {
        let deadline = Duration::from_secs(config.connect_timeout_secs);
        let started = Instant::now();
        let client = Self::new(config).await?;

        loop {
            match client.verify_chain_id().await {
                Ok(chain_id) => {
                    metrics::record_node_health(true);
                    tracing::info!(
                        uri = %client.config.uri,
                        chain_id = chain_id,
                        providers = client.providers.len(),
                        "Node client connected"
                    );
                    return Ok(client);
                }
                Err(e @ AideError::ChainMismatch { .. }) => return Err(e),
                Err(e) if started.elapsed() + CONNECT_PROBE_INTERVAL < deadline => {
                    tracing::debug!(error = %e, "Node not reachable yet, retrying");
                    sleep(CONNECT_PROBE_INTERVAL).await;
                }
                Err(e) => {
                    metrics::record_node_health(false);
                    return Err(AideError::Rpc(format!(
                        "node at {} unreachable after {}s: {}",
                        client.config.uri,
                        deadline.as_secs(),
                        e
                    )));
                }
            }
        }
    }

    fn method(&self, name: &str) -> Cow<'static, str> {
        Cow::Owned(format!("{}_{}", self.config.rpc_namespace, name))
    }

    /// One request against one provider, bounded by the call timeout.
    async fn attempt<P, R>(
        &self,
        provider: &Arc<dyn Provider + Send + Sync>,
        method: Cow<'static, str>,
        params: P,
    ) -> Result<R, CallError>
    where
        P: RpcSend,
        R: RpcRecv,
    {
        let fut = provider.client().request(method.clone(), params);
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => {
                metrics::record_rpc_error(&method);
                match e.as_error_resp() {
                    Some(payload) => Err(CallError::Rejected {
                        code: payload.code,
                        message: payload.message.to_string(),
                    }),
                    None => Err(CallError::Unavailable(e.to_string())),
                }
            }
            Err(_) => {
                metrics::record_rpc_error(&method);
                Err(CallError::TimedOut(self.timeout_duration.as_secs()))
            }
        }
    }

    /// Read-only call, tried against each provider in order until one answers.
    async fn request<P, R>(&self, method: Cow<'static, str>, params: P) -> Result<R, CallError>
    where
        P: RpcSend + Clone,
        R: RpcRecv,
    {
        let mut last_error = String::from("no providers configured");
        for (i, provider) in self.providers.iter().enumerate() {
            match self.attempt(provider, method.clone(), params.clone()).await {
                Ok(result) => return Ok(result),
                Err(rejected @ CallError::Rejected { .. }) => return Err(rejected),
                Err(CallError::Unavailable(e)) => {
                    tracing::warn!(provider_idx = i, method = %method, error = %e, "RPC error, trying next provider");
                    last_error = e;
                }
                Err(CallError::TimedOut(secs)) => {
                    tracing::warn!(provider_idx = i, method = %method, "RPC timeout, trying next provider");
                    last_error = format!("timed out after {}s", secs);
                }
            }
        }
        Err(CallError::Unavailable(format!(
            "All providers failed for {}: {}",
            method, last_error
        )))
    }

    /// Call where a node-side error is just another RPC failure.
    async fn query<P, R>(&self, name: &str, params: P) -> AideResult<R>
    where
        P: RpcSend + Clone,
        R: RpcRecv,
    {
        self.request(self.method(name), params)
            .await
            .map_err(|e| e.into_rpc(name))
    }

    /// Admin-namespace call; these methods are not namespaced by chain.
    async fn admin<R: RpcRecv>(&self, name: &str) -> AideResult<R> {
        self.request(Cow::Owned(format!("admin_{}", name)), ())
            .await
            .map_err(|e| e.into_rpc(name))
    }

    pub async fn verify_chain_id(&self) -> AideResult<u64> {
        let actual = self.chain_id().await?;
        match self.config.chain_id {
            Some(expected) if expected != actual => Err(AideError::ChainMismatch { expected, actual }),
            _ => Ok(actual),
        }
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }
}

#[derive(Debug, Deserialize)]
struct AdminNodeInfo {
    id: String,
    #[serde(rename = "blsPubKey")]
    bls_pubkey: String,
}

#[derive(Debug, Deserialize)]
struct ProgramVersion {
    #[serde(rename = "Version")]
    version: u64,
    #[serde(rename = "Sign")]
    sign: String,
}

#[async_trait]
impl NodeRpc for NodeClient {
    async fn chain_id(&self) -> AideResult<u64> {
        let id: U64 = self.query("chainId", ()).await?;
        Ok(id.to::<u64>())
    }

    async fn block_number(&self) -> AideResult<u64> {
        let number: U64 = self.query("blockNumber", ()).await?;
        Ok(number.to::<u64>())
    }

    async fn gas_price(&self) -> AideResult<u128> {
        let price: U128 = self.query("gasPrice", ()).await?;
        Ok(price.to::<u128>())
    }

    async fn transaction_count(&self, address: Address) -> AideResult<u64> {
        let count: U64 = self
            .query("getTransactionCount", (address, BlockNumberOrTag::Pending))
            .await?;
        Ok(count.to::<u64>())
    }

    async fn estimate_gas(&self, intent: &TransactionIntent) -> AideResult<u64> {
        let gas: U64 = self.query("estimateGas", (intent.to_call_object(),)).await?;
        Ok(gas.to::<u64>())
    }

    /// Sent to the primary provider only. A timed-out broadcast may still
    /// have landed, so it is never repeated on a failover.
    async fn send_raw_transaction(&self, raw: &Bytes) -> AideResult<TxHash> {
        let provider = self
            .providers
            .first()
            .ok_or_else(|| AideError::Rpc("no providers configured".to_string()))?;
        self.attempt(provider, self.method("sendRawTransaction"), (raw.clone(),))
            .await
            .map_err(|e| match e {
                CallError::Rejected { message, .. } => AideError::Submission(message),
                CallError::Unavailable(message) => AideError::Rpc(message),
                CallError::TimedOut(secs) => AideError::Timeout(secs),
            })
    }

    async fn call(&self, intent: &TransactionIntent, block: BlockId) -> AideResult<Bytes> {
        let call = intent.to_call_object();
        match block {
            BlockId::Number(number) => self.query("call", (call, number)).await,
            BlockId::Hash(hash) => self.query("call", (call, hash)).await,
        }
    }

    async fn get_transaction_receipt(&self, hash: TxHash) -> AideResult<Option<Receipt>> {
        self.query("getTransactionReceipt", (hash,)).await
    }

    async fn get_block(&self, id: BlockId) -> AideResult<Option<PlatonBlock>> {
        match id {
            BlockId::Number(number) => self.query("getBlockByNumber", (number, false)).await,
            BlockId::Hash(hash) => self.query("getBlockByHash", (hash, false)).await,
        }
    }

    async fn address_hrp(&self) -> AideResult<String> {
        match self.request::<_, String>(self.method("getAddressHrp"), ()).await {
            Ok(hrp) => Ok(hrp),
            Err(CallError::Rejected { code: METHOD_NOT_FOUND, .. }) => {
                tracing::debug!("Node does not report an address prefix, using default");
                Ok(DEFAULT_HRP.to_string())
            }
            Err(e) => Err(e.into_rpc("getAddressHrp")),
        }
    }

    async fn node_info(&self) -> AideResult<NodeInfo> {
        let info: AdminNodeInfo = self.admin("nodeInfo").await?;
        let bls_proof: String = self.admin("getSchnorrNIZKProve").await?;
        let version: ProgramVersion = self.admin("getProgramVersion").await?;
        Ok(NodeInfo {
            node_id: info.id,
            bls_pubkey: info.bls_pubkey,
            bls_proof,
            version: version.version,
            version_sign: version.sign,
        })
    }
}

impl std::fmt::Debug for NodeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeClient")
            .field("uri", &self.config.uri)
            .field("namespace", &self.config.rpc_namespace)
            .field("providers", &self.providers.len())
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}
