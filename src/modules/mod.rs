//! Transaction builders for on-chain modules.
//!
//! Each builder produces a [`crate::transaction::TransactionIntent`] and hands
//! it to a [`crate::transaction::TxExecutor`], so every module honours the
//! same return policy.

pub mod contract;
pub mod transfer;

pub use contract::Contract;
pub use transfer::Transfer;
