//! Cancellation for polling loops.

use tokio::sync::broadcast;

/// Broadcast signal that aborts every wait subscribed to it.
#[derive(Debug, Clone)]
pub struct Cancellation {
    tx: broadcast::Sender<()>,
}

impl Cancellation {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe before starting a wait; signals sent earlier are not seen.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    pub fn cancel(&self) {
        let _ = self.tx.send(());
    }

    /// Number of waits currently listening.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Cancellation {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves when `rx` fires or its sender is dropped; never resolves for `None`.
pub(crate) async fn cancelled(rx: &mut Option<broadcast::Receiver<()>>) {
    match rx {
        Some(rx) => {
            let _ = rx.recv().await;
        }
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cancel_reaches_every_subscriber() {
        let cancel = Cancellation::new();
        let mut first = Some(cancel.subscribe());
        let mut second = Some(cancel.subscribe());
        assert_eq!(cancel.receiver_count(), 2);

        cancel.cancel();

        cancelled(&mut first).await;
        cancelled(&mut second).await;
    }

    #[tokio::test]
    async fn test_dropped_sender_counts_as_cancelled() {
        let cancel = Cancellation::new();
        let mut rx = Some(cancel.subscribe());
        drop(cancel);
        cancelled(&mut rx).await;
    }

    #[tokio::test]
    async fn test_none_never_resolves() {
        let mut rx = None;
        let waited = tokio::time::timeout(std::time::Duration::from_millis(10), cancelled(&mut rx)).await;
        assert!(waited.is_err());
    }
}
