//! Transaction building, return policy, and confirmation.
//!
//! # Data Flow
//! ```text
//! builder closure (modules/*)
//!     → intent.rs (TransactionIntent + caller's txn base)
//!     → executor.rs (return policy: txn / hash / receipt)
//!     → account::Account::sign (EIP-155 legacy encoding)
//!     → confirmation.rs (bounded receipt polling)
//! ```

pub mod confirmation;
pub mod executor;
pub mod intent;
pub mod return_mode;

pub use confirmation::{wait_for_receipt, ReceiptPolicy};
pub use executor::{TxExecutor, TxOptions, TxOutcome, TxSettings};
pub use intent::TransactionIntent;
pub use return_mode::ReturnMode;
