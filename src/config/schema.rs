//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WalletConfig {
    /// JSON-RPC client and transaction settings.
    pub blockchain: BlockchainConfig,

    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Blockchain client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlockchainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Active account. When unset the node's first account is used.
    pub account: Option<String>,

    /// Active network id. When unset it is read from `net_version`.
    pub network_id: Option<u64>,

    /// Per-request RPC timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Confirmations forwarded to the confirmation handler after the receipt.
    pub confirmation_blocks: u32,

    /// Receipt polling interval in milliseconds.
    pub receipt_poll_interval_ms: u64,

    /// Give up waiting for a receipt after this many seconds.
    pub receipt_timeout_secs: u64,
}

impl Default for BlockchainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            account: None,
            network_id: None,
            rpc_timeout_secs: 30,
            confirmation_blocks: 24,
            receipt_poll_interval_ms: 1000,
            receipt_timeout_secs: 750,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,

    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WalletConfig::default();
        assert_eq!(config.blockchain.rpc_url, "http://localhost:8545");
        assert_eq!(config.blockchain.confirmation_blocks, 24);
        assert_eq!(config.blockchain.receipt_timeout_secs, 750);
        assert!(config.blockchain.account.is_none());
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_toml() {
        let config: WalletConfig = toml::from_str(
            r#"
            [blockchain]
            rpc_url = "https://rinkeby.example.org"
            network_id = 4

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.blockchain.rpc_url, "https://rinkeby.example.org");
        assert_eq!(config.blockchain.network_id, Some(4));
        assert_eq!(config.blockchain.rpc_timeout_secs, 30);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
    }
}
