//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → WalletConfig (validated, immutable)
//!     → Wallet::connect / init_logging
//! ```
//!
//! All fields have defaults so an empty file is a valid config.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{BlockchainConfig, LogFormat, LoggingConfig, WalletConfig};
