//! Ethereum wallet helpers for dapp frontends and operator tools.

pub mod blockchain;
pub mod config;
pub mod observability;

pub use blockchain::{BlockchainError, BlockchainResult, Wallet};
pub use config::schema::WalletConfig;

// Encoding and signature primitives, re-exported so callers can build
// addresses, amounts and typed data without a direct alloy dependency.
pub use alloy::dyn_abi;
pub use alloy::primitives;
