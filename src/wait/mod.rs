//! Polling primitives.
//!
//! Every loop here is bounded by a deadline, a [`Cancellation`], or both.

pub mod block;
pub mod cancel;

pub use block::{wait_for_block, WaitOptions};
pub use cancel::Cancellation;
