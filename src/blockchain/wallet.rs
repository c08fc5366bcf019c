//! Wallet interaction facade.
//!
//! `Wallet` is the single entry point for frontend code: it owns the runtime
//! variables and the transaction settings, and the other blockchain modules
//! add their operations to it (`send_transaction`, `sign_message`,
//! `get_balance`, ...).

use std::str::FromStr;
use std::sync::Arc;

use alloy::primitives::Address;
use arc_swap::ArcSwap;

use crate::blockchain::client::{RpcClient, Web3Client};
use crate::blockchain::context::{RuntimeVariables, VariableOverrides};
use crate::blockchain::network::{self, EtherscanType};
use crate::blockchain::transaction::TransactionSettings;
use crate::blockchain::types::{BlockchainConfig, BlockchainError, BlockchainResult};

/// Wallet facade over a swappable client, account and network id.
pub struct Wallet {
    variables: ArcSwap<RuntimeVariables>,
    settings: TransactionSettings,
}

impl Wallet {
    /// Create a wallet with default transaction settings.
    pub fn new(variables: RuntimeVariables) -> Self {
        Self {
            variables: ArcSwap::from_pointee(variables),
            settings: TransactionSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: TransactionSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Connect to the node named in `config`.
    ///
    /// Missing account and network id are filled from `eth_accounts` and
    /// `net_version`.
    pub async fn connect(config: &BlockchainConfig) -> BlockchainResult<Self> {
        let client = Arc::new(RpcClient::new(config)?);

        let account = match &config.account {
            Some(account) => account.clone(),
            None => client
                .accounts()
                .await?
                .first()
                .map(|a| a.to_checksum(None))
                .ok_or_else(|| BlockchainError::NotAvailable("node reports no accounts".to_string()))?,
        };

        let network_id = match config.network_id {
            Some(id) => id,
            None => client.network_id().await?,
        };

        tracing::info!(
            rpc_url = %config.rpc_url,
            account = %account,
            network_id,
            "Wallet connected"
        );

        let variables = RuntimeVariables::fixed(client, account, network_id);
        Ok(Self::new(variables).with_settings(TransactionSettings::from(config)))
    }

    /// Replace any subset of the runtime variable getters.
    pub fn set_variable_getters(&self, overrides: VariableOverrides) {
        if overrides.is_empty() {
            return;
        }
        self.variables.rcu(|current| current.with_overrides(overrides.clone()));
        let next = self.variables.load();
        tracing::debug!(account = %next.account(), network_id = next.network_id(), "Runtime variables overridden");
    }

    pub fn client(&self) -> Arc<dyn Web3Client> {
        self.variables.load().client()
    }

    pub fn account(&self) -> String {
        self.variables.load().account()
    }

    pub fn network_id(&self) -> u64 {
        self.variables.load().network_id()
    }

    pub fn settings(&self) -> &TransactionSettings {
        &self.settings
    }

    /// Active account parsed without checksum enforcement.
    pub fn active_address(&self) -> BlockchainResult<Address> {
        let account = self.account();
        Address::from_str(&account).map_err(|e| BlockchainError::InvalidAddress(format!("{}: {}", account, e)))
    }

    /// Active account, which must carry a valid EIP-55 checksum.
    pub fn checksummed_account(&self) -> BlockchainResult<Address> {
        let account = self.account();
        Address::parse_checksummed(&account, None).map_err(|_| BlockchainError::InvalidChecksum(account))
    }

    /// Name of `network_id`, or of the active network.
    pub fn get_network_name(&self, network_id: Option<u64>) -> BlockchainResult<&'static str> {
        network::network_name(network_id.unwrap_or_else(|| self.network_id()))
    }

    /// Consensus type of `network_id`, or of the active network.
    pub fn get_network_type(&self, network_id: Option<u64>) -> BlockchainResult<&'static str> {
        network::network_type(network_id.unwrap_or_else(|| self.network_id()))
    }

    /// Etherscan URL on `network_id`, or on the active network.
    pub fn etherscan_format(
        &self,
        kind: EtherscanType,
        data: &str,
        network_id: Option<u64>,
    ) -> BlockchainResult<String> {
        network::etherscan_format(kind, data, network_id.unwrap_or_else(|| self.network_id()))
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("variables", &**self.variables.load())
            .field("settings", &self.settings)
            .finish()
    }
}
