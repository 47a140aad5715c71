//! Node integration subsystem.
//!
//! # Data Flow
//! ```text
//! endpoint URI
//!     → transport.rs (scheme → HTTP / WebSocket / IPC provider)
//!     → client.rs (namespaced JSON-RPC with timeouts and failover)
//!     → rpc.rs (NodeRpc: the only surface the rest of the crate sees)
//! ```
//!
//! `block.rs` decodes block headers and recovers the sealing node's key.

pub mod block;
pub mod client;
pub mod rpc;
pub mod transport;
pub mod types;

pub use block::{ec_recover, PlatonBlock};
pub use client::NodeClient;
pub use rpc::NodeRpc;
pub use transport::Transport;
pub use types::{AideError, AideResult, BlockId, NodeInfo, Receipt, ReceiptLog};
