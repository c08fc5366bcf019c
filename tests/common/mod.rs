//! Shared utilities for wallet integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::dyn_abi::TypedData;
use alloy::primitives::{Address, Bytes, TxHash, B256, U256};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;
use async_trait::async_trait;
use serde_json::json;
use web3_helpers::blockchain::{
    BlockchainError, BlockchainResult, RuntimeVariables, TransactionSettings, Wallet, Web3Client,
};

// Well-known test private keys (Anvil's first two accounts)
pub const KEY_0: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const KEY_1: &str = "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

pub const SENT_HASH: TxHash = TxHash::repeat_byte(0xab);

/// In-memory client with scripted answers and call counters.
#[derive(Default)]
pub struct MockClient {
    pub gas_price: u128,
    pub gas_estimate: u64,
    pub balance: U256,
    pub fail_gas_price: bool,
    pub fail_send: bool,
    /// Returned by every receipt poll once a transaction was sent.
    pub receipt: Option<TransactionReceipt>,
    pub signer: Option<PrivateKeySigner>,
    pub token_balance: U256,
    pub token_decimals: u8,
    /// Keep `block_number` at `block` instead of advancing on every poll.
    pub stalled: bool,

    pub block: AtomicU64,
    pub estimate_calls: AtomicU32,
    pub send_calls: AtomicU32,
    pub sign_calls: AtomicU32,
    pub sent: Mutex<Vec<TransactionRequest>>,
}

impl MockClient {
    pub fn sends(&self) -> u32 {
        self.send_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Web3Client for MockClient {
    async fn gas_price(&self) -> BlockchainResult<u128> {
        if self.fail_gas_price {
            return Err(BlockchainError::Rpc("eth_gasPrice failed: connection refused".into()));
        }
        Ok(self.gas_price)
    }

    async fn estimate_gas(&self, _tx: &TransactionRequest) -> BlockchainResult<u64> {
        self.estimate_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.gas_estimate)
    }

    async fn balance(&self, _address: Address) -> BlockchainResult<U256> {
        Ok(self.balance)
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> BlockchainResult<TxHash> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_send {
            return Err(BlockchainError::Rpc("eth_sendTransaction failed: nonce too low".into()));
        }
        self.sent.lock().unwrap().push(tx);
        Ok(SENT_HASH)
    }

    async fn transaction_receipt(
        &self,
        _hash: TxHash,
    ) -> BlockchainResult<Option<TransactionReceipt>> {
        Ok(self.receipt.clone())
    }

    async fn block_number(&self) -> BlockchainResult<u64> {
        if self.stalled {
            return Ok(self.block.load(Ordering::SeqCst));
        }
        // Each poll sees one more block.
        Ok(self.block.fetch_add(1, Ordering::SeqCst))
    }

    async fn accounts(&self) -> BlockchainResult<Vec<Address>> {
        Ok(self.signer.iter().map(|s| s.address()).collect())
    }

    async fn network_id(&self) -> BlockchainResult<u64> {
        Ok(4)
    }

    async fn personal_sign(&self, message: Bytes, _account: Address) -> BlockchainResult<Bytes> {
        self.sign_calls.fetch_add(1, Ordering::SeqCst);
        let signer = self.signer.as_ref().ok_or_else(|| BlockchainError::Rpc("no signer".into()))?;
        let sig = signer
            .sign_message_sync(&message)
            .map_err(|e| BlockchainError::Rpc(e.to_string()))?;
        Ok(Bytes::from(sig.as_bytes().to_vec()))
    }

    async fn sign_typed_data(
        &self,
        _account: Address,
        typed_data: &TypedData,
    ) -> BlockchainResult<Bytes> {
        self.sign_calls.fetch_add(1, Ordering::SeqCst);
        let signer = self.signer.as_ref().ok_or_else(|| BlockchainError::Rpc("no signer".into()))?;
        let hash = typed_data
            .eip712_signing_hash()
            .map_err(|e| BlockchainError::Rpc(e.to_string()))?;
        let sig = signer
            .sign_hash_sync(&hash)
            .map_err(|e| BlockchainError::Rpc(e.to_string()))?;
        Ok(Bytes::from(sig.as_bytes().to_vec()))
    }

    async fn token_balance(&self, _token: Address, _owner: Address) -> BlockchainResult<U256> {
        Ok(self.token_balance)
    }

    async fn token_decimals(&self, _token: Address) -> BlockchainResult<u8> {
        Ok(self.token_decimals)
    }
}

pub fn signer(key: &str) -> PrivateKeySigner {
    key.parse().unwrap()
}

/// Wallet over `client` with fast polling and the given confirmation depth.
pub fn wallet_with(client: Arc<MockClient>, account: &str, confirmations: u32) -> Wallet {
    wallet_with_timeout(client, account, confirmations, Duration::from_secs(5))
}

pub fn wallet_with_timeout(
    client: Arc<MockClient>,
    account: &str,
    confirmations: u32,
    receipt_timeout: Duration,
) -> Wallet {
    let settings = TransactionSettings {
        confirmation_blocks: confirmations,
        poll_interval: Duration::from_millis(1),
        receipt_timeout,
    };
    Wallet::new(RuntimeVariables::fixed(client, account, 4)).with_settings(settings)
}

/// A legacy receipt as a node would return it.
pub fn receipt(block: u64, success: bool) -> TransactionReceipt {
    serde_json::from_value(json!({
        "transactionHash": SENT_HASH,
        "transactionIndex": "0x0",
        "blockHash": B256::repeat_byte(0x11),
        "blockNumber": format!("{:#x}", block),
        "from": Address::repeat_byte(0x22),
        "to": Address::repeat_byte(0x33),
        "cumulativeGasUsed": "0x5208",
        "gasUsed": "0x5208",
        "effectiveGasPrice": "0x3b9aca00",
        "contractAddress": null,
        "logs": [],
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "type": "0x0",
        "status": if success { "0x1" } else { "0x0" },
    }))
    .unwrap()
}

/// Recorded handler events, in order.
#[derive(Clone, Default)]
pub struct EventLog(pub Arc<Mutex<Vec<String>>>);

impl EventLog {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}
