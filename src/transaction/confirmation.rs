//! Waiting for a submitted transaction's receipt.

use std::time::{Duration, Instant};

use alloy::primitives::TxHash;
use tokio::time::{interval, timeout, MissedTickBehavior};

use crate::config::schema::TransactionConfig;
use crate::node::rpc::NodeRpc;
use crate::node::types::{AideError, AideResult, Receipt};
use crate::observability::metrics;

/// How long and how often to poll for a receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptPolicy {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for ReceiptPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(120),
            poll_interval: Duration::from_secs(1),
        }
    }
}

impl From<&TransactionConfig> for ReceiptPolicy {
    fn from(config: &TransactionConfig) -> Self {
        Self {
            timeout: config.receipt_timeout(),
            poll_interval: config.receipt_poll_interval(),
        }
    }
}

/// Poll until the node has a receipt for `tx_hash`. The first poll is
/// immediate.
pub async fn wait_for_receipt(
    rpc: &dyn NodeRpc,
    tx_hash: TxHash,
    policy: &ReceiptPolicy,
) -> AideResult<Receipt> {
    let started = Instant::now();

    let result = timeout(policy.timeout, async {
        let mut ticker = interval(policy.poll_interval.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            match rpc.get_transaction_receipt(tx_hash).await? {
                Some(receipt) => return Ok(receipt),
                None => tracing::debug!(tx_hash = %tx_hash, "Transaction pending"),
            }
        }
    })
    .await;

    match result {
        Ok(Ok(receipt)) => {
            metrics::record_receipt_wait(started.elapsed());
            if receipt.succeeded() {
                tracing::info!(
                    tx_hash = %tx_hash,
                    block_number = ?receipt.block_number(),
                    "Transaction confirmed"
                );
            } else {
                tracing::warn!(
                    tx_hash = %tx_hash,
                    block_number = ?receipt.block_number(),
                    "Transaction mined but failed"
                );
            }
            Ok(receipt)
        }
        Ok(Err(e)) => Err(e),
        Err(_) => Err(AideError::ConfirmationTimeout {
            tx_hash,
            waited_secs: policy.timeout.as_secs(),
        }),
    }
}
