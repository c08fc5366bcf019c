//! JSON-RPC client abstraction.
//!
//! # Responsibilities
//! - Define the calls the wallet facade needs (`Web3Client`)
//! - Implement them over an alloy HTTP provider (`RpcClient`)
//! - Apply the per-request timeout and map transport errors
//!
//! The facade only ever talks to `dyn Web3Client`, so tests and embedders
//! can substitute their own client.

use std::borrow::Cow;
use std::future::Future;
use std::time::Duration;

use alloy::dyn_abi::TypedData;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use async_trait::async_trait;
use tokio::time::timeout;

use crate::blockchain::contract::IERC20;
use crate::blockchain::types::{BlockchainConfig, BlockchainError, BlockchainResult};
use crate::observability::metrics;

/// `personal_sign` RPC method name.
pub const PERSONAL_SIGN: &str = "personal_sign";

/// Typed-data signing RPC method name.
pub const SIGN_TYPED_DATA: &str = "eth_signTypedData";

/// Calls the wallet facade makes against a node or injected provider.
#[async_trait]
pub trait Web3Client: Send + Sync {
    /// Current gas price in wei.
    async fn gas_price(&self) -> BlockchainResult<u128>;

    /// Gas the node expects `tx` to use.
    async fn estimate_gas(&self, tx: &TransactionRequest) -> BlockchainResult<u64>;

    /// Native balance in wei.
    async fn balance(&self, address: Address) -> BlockchainResult<U256>;

    /// Submit `tx` through `eth_sendTransaction`.
    async fn send_transaction(&self, tx: TransactionRequest) -> BlockchainResult<TxHash>;

    async fn transaction_receipt(&self, hash: TxHash)
        -> BlockchainResult<Option<TransactionReceipt>>;

    async fn block_number(&self) -> BlockchainResult<u64>;

    /// Accounts managed by the node or provider.
    async fn accounts(&self) -> BlockchainResult<Vec<Address>>;

    /// Network id as reported by `net_version`.
    async fn network_id(&self) -> BlockchainResult<u64>;

    /// `personal_sign` over already-encoded message bytes.
    async fn personal_sign(&self, message: Bytes, account: Address) -> BlockchainResult<Bytes>;

    async fn sign_typed_data(
        &self,
        account: Address,
        typed_data: &TypedData,
    ) -> BlockchainResult<Bytes>;

    /// ERC20 `balanceOf(owner)` on `token`.
    async fn token_balance(&self, token: Address, owner: Address) -> BlockchainResult<U256>;

    /// ERC20 `decimals()` on `token`.
    async fn token_decimals(&self, token: Address) -> BlockchainResult<u8>;

    /// Provider for building contract bindings, if this client has one.
    fn provider(&self) -> Option<DynProvider> {
        None
    }
}

/// Web3 client over an alloy HTTP provider.
#[derive(Clone)]
pub struct RpcClient {
    provider: DynProvider,
    rpc_url: String,
    timeout_duration: Duration,
}

impl RpcClient {
    /// Create a new client. No request is made until first use.
    pub fn new(config: &BlockchainConfig) -> BlockchainResult<Self> {
        let url: url::Url = config.rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        let provider = ProviderBuilder::new().connect_http(url).erased();

        Ok(Self {
            provider,
            rpc_url: config.rpc_url.clone(),
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
        })
    }

    /// Run one RPC call with timeout, logging and metrics.
    async fn call<T, E, F>(&self, method: &'static str, fut: F) -> BlockchainResult<T>
    where
        E: std::fmt::Display,
        F: Future<Output = Result<T, E>>,
    {
        let result = match timeout(self.timeout_duration, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::warn!(method, error = %e, "RPC error");
                Err(BlockchainError::Rpc(format!("{} failed: {}", method, e)))
            }
            Err(_) => {
                tracing::warn!(method, "RPC timeout");
                Err(BlockchainError::Rpc(format!(
                    "{} timed out after {} seconds",
                    method,
                    self.timeout_duration.as_secs()
                )))
            }
        };
        metrics::record_rpc_call(method, result.is_ok());
        result
    }
}

#[async_trait]
impl Web3Client for RpcClient {
    async fn gas_price(&self) -> BlockchainResult<u128> {
        self.call("eth_gasPrice", async { self.provider.get_gas_price().await })
            .await
    }

    async fn estimate_gas(&self, tx: &TransactionRequest) -> BlockchainResult<u64> {
        let tx = tx.clone();
        self.call("eth_estimateGas", async { self.provider.estimate_gas(tx).await })
            .await
    }

    async fn balance(&self, address: Address) -> BlockchainResult<U256> {
        self.call("eth_getBalance", async {
            self.provider.get_balance(address).await
        })
        .await
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> BlockchainResult<TxHash> {
        self.call("eth_sendTransaction", async {
            self.provider
                .send_transaction(tx)
                .await
                .map(|pending| *pending.tx_hash())
        })
        .await
    }

    async fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> BlockchainResult<Option<TransactionReceipt>> {
        self.call("eth_getTransactionReceipt", async {
            self.provider.get_transaction_receipt(hash).await
        })
        .await
    }

    async fn block_number(&self) -> BlockchainResult<u64> {
        self.call("eth_blockNumber", async { self.provider.get_block_number().await })
            .await
    }

    async fn accounts(&self) -> BlockchainResult<Vec<Address>> {
        self.call("eth_accounts", async { self.provider.get_accounts().await })
            .await
    }

    async fn network_id(&self) -> BlockchainResult<u64> {
        self.call("net_version", async { self.provider.get_net_version().await })
            .await
    }

    async fn personal_sign(&self, message: Bytes, account: Address) -> BlockchainResult<Bytes> {
        self.call(PERSONAL_SIGN, async {
            self.provider
                .raw_request::<_, Bytes>(Cow::Borrowed(PERSONAL_SIGN), (message, account))
                .await
        })
        .await
    }

    async fn sign_typed_data(
        &self,
        account: Address,
        typed_data: &TypedData,
    ) -> BlockchainResult<Bytes> {
        self.call(SIGN_TYPED_DATA, async {
            self.provider
                .raw_request::<_, Bytes>(Cow::Borrowed(SIGN_TYPED_DATA), (account, typed_data.clone()))
                .await
        })
        .await
    }

    async fn token_balance(&self, token: Address, owner: Address) -> BlockchainResult<U256> {
        let erc20 = IERC20::new(token, self.provider.clone());
        self.call("balanceOf", async { erc20.balanceOf(owner).call().await })
            .await
    }

    async fn token_decimals(&self, token: Address) -> BlockchainResult<u8> {
        let erc20 = IERC20::new(token, self.provider.clone());
        self.call("decimals", async { erc20.decimals().call().await })
            .await
    }

    fn provider(&self) -> Option<DynProvider> {
        Some(self.provider.clone())
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("rpc_url", &self.rpc_url)
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}
