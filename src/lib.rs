//! PlatON node client library.
//!
//! Builds, signs and submits transactions against a PlatON node and exposes
//! read-only queries. Every transaction-producing call honours a
//! [`ReturnMode`]: the caller gets the unsent intent, the transaction hash, or
//! the mined receipt.

pub mod account;
pub mod aide;
pub mod config;
pub mod modules;
pub mod node;
pub mod observability;
pub mod transaction;
pub mod wait;

pub use account::Account;
pub use aide::PlatonAide;
pub use config::AideConfig;
pub use node::{AideError, AideResult, BlockId, NodeRpc};
pub use transaction::{ReturnMode, TransactionIntent, TxOptions, TxOutcome};
