//! Wallet interaction subsystem.
//!
//! # Data Flow
//! ```text
//! BlockchainConfig
//!     → client.rs (alloy provider behind the Web3Client trait)
//!     → context.rs (client / account / network id getters)
//!     → wallet.rs (facade, swappable getters)
//!         → transaction.rs (estimate, fund check, send, watch)
//!         → signing.rs (personal_sign, typed data, signer check)
//!         → balance.rs + contract.rs (ETH and ERC20 balances)
//!         → network.rs + units.rs (pure helpers)
//! ```
//!
//! # Constraints
//! - No private keys here: signing is always delegated to the provider
//! - Wei amounts stay in U256 or decimal strings, never floats
//! - No retries; each failure surfaces once

pub mod balance;
pub mod client;
pub mod context;
pub mod contract;
pub mod network;
pub mod signing;
pub mod transaction;
pub mod types;
pub mod units;
pub mod wallet;

pub use client::{RpcClient, Web3Client};
pub use context::{RuntimeVariables, VariableOverrides};
pub use network::{
    etherscan_format, network_name, network_type, supported_networks, EtherscanType,
};
pub use transaction::{SendOutcome, TransactionHandlers, TransactionSettings};
pub use types::{BlockchainError, BlockchainResult, MessageSignature, TypedDataSignature};
pub use units::{from_decimal, to_decimal};
pub use wallet::Wallet;
