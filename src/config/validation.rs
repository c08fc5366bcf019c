//! Configuration validation.
//!
//! Serde handles syntax; this checks values. Every problem is collected so a
//! bad file is reported in one pass.

use std::fmt;

use alloy::primitives::Address;

use crate::blockchain::network::get_network;
use crate::config::schema::WalletConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &WalletConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let chain = &config.blockchain;

    if let Err(e) = chain.rpc_url.parse::<url::Url>() {
        errors.push(ValidationError::new(
            "blockchain.rpc_url",
            format!("invalid URL '{}': {}", chain.rpc_url, e),
        ));
    }

    if chain.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("blockchain.rpc_timeout_secs", "must be > 0"));
    }
    if chain.receipt_poll_interval_ms == 0 {
        errors.push(ValidationError::new(
            "blockchain.receipt_poll_interval_ms",
            "must be > 0",
        ));
    }
    if chain.receipt_timeout_secs == 0 {
        errors.push(ValidationError::new("blockchain.receipt_timeout_secs", "must be > 0"));
    }

    if let Some(id) = chain.network_id {
        if get_network(id).is_err() {
            errors.push(ValidationError::new(
                "blockchain.network_id",
                format!("unrecognized network id {}", id),
            ));
        }
    }

    if let Some(account) = &chain.account {
        if Address::parse_checksummed(account, None).is_err() {
            errors.push(ValidationError::new(
                "blockchain.account",
                format!("'{}' is not a checksummed address", account),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
