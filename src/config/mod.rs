//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! platon-aide.toml
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AideConfig (validated, immutable)
//!     → PlatonAide::connect
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so minimal files work
//! - Validation separates syntactic (serde) from semantic checks
//! - CLI flags override file values after loading

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_str, ConfigError};
pub use schema::{AccountConfig, AideConfig, NodeConfig, ObservabilityConfig, TransactionConfig, WaitConfig};
