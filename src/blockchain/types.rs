//! Shared result types and error definitions.

use std::time::Duration;

use alloy::primitives::{Address, Bytes, TxHash, B256, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export BlockchainConfig from config module to avoid duplication
pub use crate::config::schema::BlockchainConfig;

/// Errors that can occur during wallet operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Address could not be parsed at all.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Address parsed but its EIP-55 checksum does not verify.
    #[error("Invalid checksum address: {0}")]
    InvalidChecksum(String),

    /// Network id is not in the known network table.
    #[error("Unrecognized network id: {0}")]
    UnknownNetwork(u64),

    /// Etherscan link type is not one of transaction, address or token.
    #[error("Unrecognized etherscan type: {0}")]
    UnknownEtherscanType(String),

    /// Decimal input carries more fractional digits than the target precision.
    #[error("Fractional part of {value} exceeds {decimals} decimals")]
    FractionTooLong { value: String, decimals: usize },

    /// Decimal input is not a plain base-10 number.
    #[error("Invalid decimal string: {0}")]
    InvalidDecimal(String),

    /// Signature bytes returned by the provider are malformed or unrecoverable.
    #[error("Signature error: {0}")]
    Signature(String),

    /// Recovered signer differs from the account that was asked to sign.
    #[error("Signer mismatch: expected {expected}, recovered {recovered}")]
    SignerMismatch { expected: Address, recovered: Address },

    /// One of the pre-send lookups (gas price, estimate, balance) failed.
    #[error("Could not fetch gas price, gas estimate or balance: {0}")]
    Preflight(String),

    /// Sender cannot cover gas price times padded gas limit.
    #[error("Insufficient balance. Ensure you have at least {required} ETH")]
    InsufficientBalance { required: String },

    /// Transaction was mined but reverted on-chain.
    #[error("Transaction reverted: {0}")]
    Reverted(TxHash),

    /// No receipt showed up within the configured window.
    #[error("Transaction was not mined within {0:?}")]
    ReceiptTimeout(Duration),

    /// Client does not expose what the operation needs.
    #[error("Blockchain not available: {0}")]
    NotAvailable(String),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// A verified `personal_sign` signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSignature {
    /// Raw 65-byte signature as returned by the provider.
    pub signature: Bytes,
    pub r: U256,
    pub s: U256,
    /// Recovery byte in the 27/28 form.
    pub v: u8,
    /// Signer recovered from the signature, equal to the active account.
    pub from: Address,
}

/// A verified EIP-712 typed-data signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedDataSignature {
    pub signature: Bytes,
    pub r: U256,
    pub s: U256,
    pub v: u8,
    pub from: Address,
    /// EIP-712 signing hash the signature commits to.
    pub message_hash: B256,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BlockchainError::UnknownNetwork(99);
        assert_eq!(err.to_string(), "Unrecognized network id: 99");

        let err = BlockchainError::FractionTooLong {
            value: "1.234".to_string(),
            decimals: 2,
        };
        assert!(err.to_string().contains("exceeds 2 decimals"));
    }

    #[test]
    fn test_receipt_timeout_keeps_sub_second_precision() {
        let err = BlockchainError::ReceiptTimeout(Duration::from_millis(200));
        assert_eq!(err.to_string(), "Transaction was not mined within 200ms");
    }

    #[test]
    fn test_insufficient_balance_message() {
        let err = BlockchainError::InsufficientBalance {
            required: "0.0021".to_string(),
        };
        let message = err.to_string();
        assert!(message.starts_with("Insufficient balance"));
        assert!(message.contains("0.0021 ETH"));
    }

    #[test]
    fn test_signature_serde() {
        let sig = MessageSignature {
            signature: Bytes::from(vec![0u8; 65]),
            r: U256::from(1),
            s: U256::from(2),
            v: 27,
            from: Address::ZERO,
        };
        let json = serde_json::to_string(&sig).unwrap();
        let decoded: MessageSignature = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, sig);
    }
}
