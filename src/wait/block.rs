//! Block-height wait.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{sleep, timeout};

use crate::config::schema::WaitConfig;
use crate::node::rpc::NodeRpc;
use crate::node::types::{AideError, AideResult};
use crate::wait::cancel::cancelled;

/// Poll interval and optional deadline for [`wait_for_block`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitOptions {
    pub interval: Duration,
    /// Fail with [`AideError::WaitTimeout`] once this much time has passed.
    pub deadline: Option<Duration>,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            deadline: None,
        }
    }
}

impl From<&WaitConfig> for WaitOptions {
    fn from(config: &WaitConfig) -> Self {
        Self {
            interval: Duration::from_secs(config.block_poll_interval_secs),
            deadline: config.max_wait_secs.map(Duration::from_secs),
        }
    }
}

impl WaitOptions {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Block until the node reports a height of at least `target`.
///
/// Returns the last observed height, or `None` without touching the node
/// when there is no target.
pub async fn wait_for_block(
    rpc: &dyn NodeRpc,
    target: Option<u64>,
    options: &WaitOptions,
    cancel: Option<broadcast::Receiver<()>>,
) -> AideResult<Option<u64>> {
    let Some(target) = target else {
        tracing::debug!("No target block given, not waiting");
        return Ok(None);
    };

    let poll = poll_until(rpc, target, options.interval, cancel);
    let height = match options.deadline {
        Some(deadline) => timeout(deadline, poll).await.map_err(|_| AideError::WaitTimeout {
            target,
            waited_secs: deadline.as_secs(),
        })??,
        None => poll.await?,
    };

    Ok(Some(height))
}

async fn poll_until(
    rpc: &dyn NodeRpc,
    target: u64,
    interval: Duration,
    mut cancel: Option<broadcast::Receiver<()>>,
) -> AideResult<u64> {
    let mut current = rpc.block_number().await?;
    tracing::debug!(current = current, target = target, "Waiting for block");

    while current < target {
        tokio::select! {
            _ = sleep(interval) => {}
            _ = cancelled(&mut cancel) => {
                tracing::info!(current = current, target = target, "Block wait cancelled");
                return Err(AideError::Cancelled);
            }
        }
        current = rpc.block_number().await?;
        tracing::trace!(current = current, target = target, "Polled block height");
    }

    tracing::debug!(current = current, target = target, "Target block reached");
    Ok(current)
}
