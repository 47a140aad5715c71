//! Transport selection from an endpoint URI.

use std::sync::Arc;

use alloy::providers::{IpcConnect, Provider, ProviderBuilder, WsConnect};

use crate::node::types::{AideError, AideResult};

/// Transport picked from the URI scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    Http(url::Url),
    Ws(String),
    Ipc(String),
}

impl Transport {
    /// `http(s)://` → HTTP, `ws(s)://` → WebSocket, `ipc…` → IPC socket path.
    pub fn from_uri(uri: &str) -> AideResult<Self> {
        let uri = uri.trim();
        if uri.starts_with("http://") || uri.starts_with("https://") {
            let url = uri
                .parse()
                .map_err(|e| AideError::Rpc(format!("Invalid RPC URL '{}': {}", uri, e)))?;
            return Ok(Transport::Http(url));
        }
        if uri.starts_with("ws://") || uri.starts_with("wss://") {
            return Ok(Transport::Ws(uri.to_string()));
        }
        if let Some(path) = uri.strip_prefix("ipc://") {
            if !path.is_empty() {
                return Ok(Transport::Ipc(path.to_string()));
            }
        } else if uri.starts_with("ipc") {
            return Ok(Transport::Ipc(uri.to_string()));
        }
        Err(AideError::UnidentifiableUri(uri.to_string()))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Transport::Http(_) => "http",
            Transport::Ws(_) => "ws",
            Transport::Ipc(_) => "ipc",
        }
    }

    /// Open a provider over this transport.
    ///
    /// Fillers are disabled: the transaction executor fills and signs
    /// transactions itself.
    pub async fn connect(&self) -> AideResult<Arc<dyn Provider + Send + Sync>> {
        let builder = ProviderBuilder::new().disable_recommended_fillers();
        let provider: Arc<dyn Provider + Send + Sync> = match self {
            Transport::Http(url) => Arc::new(builder.connect_http(url.clone())),
            Transport::Ws(uri) => Arc::new(
                builder
                    .connect_ws(WsConnect::new(uri.clone()))
                    .await
                    .map_err(|e| AideError::Rpc(format!("WebSocket connect to {} failed: {}", uri, e)))?,
            ),
            Transport::Ipc(path) => Arc::new(
                builder
                    .connect_ipc(IpcConnect::new(path.clone()))
                    .await
                    .map_err(|e| AideError::Rpc(format!("IPC connect to {} failed: {}", path, e)))?,
            ),
        };
        tracing::debug!(transport = self.kind(), "Provider opened");
        Ok(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_schemes() {
        assert!(matches!(
            Transport::from_uri("http://127.0.0.1:6789").unwrap(),
            Transport::Http(_)
        ));
        assert_eq!(Transport::from_uri("https://openapi.platon.network/rpc").unwrap().kind(), "http");
    }

    #[test]
    fn test_ws_schemes() {
        assert_eq!(
            Transport::from_uri("ws://127.0.0.1:6790").unwrap(),
            Transport::Ws("ws://127.0.0.1:6790".into())
        );
        assert_eq!(Transport::from_uri("wss://node.example/ws").unwrap().kind(), "ws");
    }

    #[test]
    fn test_ipc_paths() {
        assert_eq!(
            Transport::from_uri("ipc:///data/platon.ipc").unwrap(),
            Transport::Ipc("/data/platon.ipc".into())
        );
        assert_eq!(
            Transport::from_uri("ipcdata/platon.ipc").unwrap(),
            Transport::Ipc("ipcdata/platon.ipc".into())
        );
    }

    #[test]
    fn test_unknown_scheme() {
        for uri in ["ftp://node", "127.0.0.1:6789", "", "ipc://"] {
            assert!(
                matches!(Transport::from_uri(uri), Err(AideError::UnidentifiableUri(_))),
                "{uri} should be rejected"
            );
        }
    }
}
