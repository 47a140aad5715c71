//! Signing identities and address formats.

pub mod address;
pub mod wallet;

pub use address::{parse_address, to_bech32, DEFAULT_HRP};
pub use wallet::{Account, SignedTransaction};
