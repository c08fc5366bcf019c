//! Guarded transaction sending.
//!
//! # Flow
//! ```text
//! gas price ─┐
//! estimate  ─┼─ try_join ─▶ pad gas ─▶ balance check ─▶ eth_sendTransaction
//! balance   ─┘                                               │
//!                      on_transaction_hash ◀─────────────────┤
//!                      on_receipt          ◀── poll receipt ─┤
//!                      on_confirmation(n)  ◀── poll blocks ──┘
//! ```
//!
//! Every failure reaches `on_error` exactly once. Nothing is sent if a
//! pre-send lookup fails or the balance cannot cover the fee.

use std::time::Duration;

use alloy::network::{ReceiptResponse, TransactionBuilder};
use alloy::primitives::{TxHash, U256};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use tokio::time::{interval, timeout};

use crate::blockchain::client::Web3Client;
use crate::blockchain::types::{BlockchainConfig, BlockchainError};
use crate::blockchain::units::to_decimal;
use crate::blockchain::wallet::Wallet;
use crate::observability::metrics;

/// Gas limit = estimate * 11 / 10, truncated.
const GAS_PADDING_NUMERATOR: u128 = 11;
const GAS_PADDING_DENOMINATOR: u128 = 10;

const ETHER_DECIMALS: usize = 18;

/// Receipt and confirmation polling parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSettings {
    /// Confirmations forwarded after the receipt. Zero disables the watch.
    pub confirmation_blocks: u32,
    pub poll_interval: Duration,
    /// Upper bound on waiting for the receipt, and separately on the
    /// confirmation watch.
    pub receipt_timeout: Duration,
}

impl Default for TransactionSettings {
    fn default() -> Self {
        Self::from(&BlockchainConfig::default())
    }
}

impl From<&BlockchainConfig> for TransactionSettings {
    fn from(config: &BlockchainConfig) -> Self {
        Self {
            confirmation_blocks: config.confirmation_blocks,
            poll_interval: Duration::from_millis(config.receipt_poll_interval_ms),
            receipt_timeout: Duration::from_secs(config.receipt_timeout_secs),
        }
    }
}

type ErrorHandler = Box<dyn FnMut(BlockchainError) + Send>;
type HashHandler = Box<dyn FnMut(TxHash) + Send>;
type ReceiptHandler = Box<dyn FnMut(&TransactionReceipt) + Send>;
type ConfirmationHandler = Box<dyn FnMut(u32, &TransactionReceipt) + Send>;

/// Callbacks for the lifecycle of one transaction.
///
/// The error handler is required; the others default to no-ops.
pub struct TransactionHandlers {
    on_error: ErrorHandler,
    on_transaction_hash: HashHandler,
    on_receipt: ReceiptHandler,
    on_confirmation: ConfirmationHandler,
}

impl TransactionHandlers {
    pub fn new<F>(on_error: F) -> Self
    where
        F: FnMut(BlockchainError) + Send + 'static,
    {
        Self {
            on_error: Box::new(on_error),
            on_transaction_hash: Box::new(|_| {}),
            on_receipt: Box::new(|_| {}),
            on_confirmation: Box::new(|_, _| {}),
        }
    }

    pub fn on_transaction_hash<F>(mut self, handler: F) -> Self
    where
        F: FnMut(TxHash) + Send + 'static,
    {
        self.on_transaction_hash = Box::new(handler);
        self
    }

    pub fn on_receipt<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&TransactionReceipt) + Send + 'static,
    {
        self.on_receipt = Box::new(handler);
        self
    }

    /// Called with confirmation counts 1, 2, ... up to the configured depth.
    pub fn on_confirmation<F>(mut self, handler: F) -> Self
    where
        F: FnMut(u32, &TransactionReceipt) + Send + 'static,
    {
        self.on_confirmation = Box::new(handler);
        self
    }
}

/// How a `send_transaction` call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nothing was sent; the error handler was called.
    Aborted,
    /// The send was attempted and the node refused it.
    Rejected,
    /// The node accepted the transaction.
    Submitted(TxHash),
}

/// Failure inside the sender.
enum SendFailure {
    /// Already passed to `on_error` with its own context.
    Reported,
    Unexpected(BlockchainError),
}

impl From<BlockchainError> for SendFailure {
    fn from(e: BlockchainError) -> Self {
        SendFailure::Unexpected(e)
    }
}

impl SendFailure {
    fn report(self, handlers: &mut TransactionHandlers) {
        if let SendFailure::Unexpected(e) = self {
            (handlers.on_error)(e);
        }
    }
}

/// Pad a gas estimate by 10%, truncating the fractional remainder.
pub fn padded_gas_limit(estimate: u64) -> u64 {
    let padded = u128::from(estimate) * GAS_PADDING_NUMERATOR / GAS_PADDING_DENOMINATOR;
    u64::try_from(padded).unwrap_or(u64::MAX)
}

/// Wei needed to pay for `gas_limit` at `gas_price`.
pub fn required_funds(gas_price: u128, gas_limit: u64) -> U256 {
    U256::from(gas_price) * U256::from(gas_limit)
}

impl Wallet {
    /// Estimate, check funds, send, then stream lifecycle events to `handlers`.
    ///
    /// Resolves once the last event has been delivered.
    pub async fn send_transaction(
        &self,
        tx: TransactionRequest,
        mut handlers: TransactionHandlers,
    ) -> SendOutcome {
        let client = self.client();

        let tx = match self.prepare(client.as_ref(), tx, &mut handlers).await {
            Ok(tx) => tx,
            Err(failure) => {
                failure.report(&mut handlers);
                metrics::record_transaction("aborted");
                return SendOutcome::Aborted;
            }
        };

        let hash = match client.send_transaction(tx).await {
            Ok(hash) => hash,
            Err(e) => {
                (handlers.on_error)(e);
                metrics::record_transaction("rejected");
                return SendOutcome::Rejected;
            }
        };

        tracing::info!(tx_hash = %hash, "Transaction submitted");
        metrics::record_transaction("submitted");
        (handlers.on_transaction_hash)(hash);

        if let Err(failure) = self.watch(client.as_ref(), hash, &mut handlers).await {
            failure.report(&mut handlers);
        }

        SendOutcome::Submitted(hash)
    }

    /// Fill `from`, gas limit and gas price, or report why the send must not happen.
    async fn prepare(
        &self,
        client: &dyn Web3Client,
        tx: TransactionRequest,
        handlers: &mut TransactionHandlers,
    ) -> Result<TransactionRequest, SendFailure> {
        let from = self.active_address()?;
        let tx = tx.with_from(from);

        let fetched = tokio::try_join!(
            client.gas_price(),
            client.estimate_gas(&tx),
            client.balance(from)
        );
        let (gas_price, estimate, balance) = match fetched {
            Ok(values) => values,
            Err(e) => {
                (handlers.on_error)(BlockchainError::Preflight(e.to_string()));
                return Err(SendFailure::Reported);
            }
        };

        let gas_limit = padded_gas_limit(estimate);
        let required = required_funds(gas_price, gas_limit);

        tracing::debug!(
            from = %from,
            gas_price = %gas_price,
            estimate,
            gas_limit,
            required = %required,
            balance = %balance,
            "Transaction prepared"
        );

        if balance < required {
            let required = to_decimal(&required.to_string(), ETHER_DECIMALS)?;
            tracing::warn!(from = %from, required = %required, "Insufficient balance for gas");
            (handlers.on_error)(BlockchainError::InsufficientBalance { required });
            return Err(SendFailure::Reported);
        }

        Ok(tx.with_gas_limit(gas_limit).with_gas_price(gas_price))
    }

    /// Forward receipt and confirmations for a submitted transaction.
    async fn watch(
        &self,
        client: &dyn Web3Client,
        hash: TxHash,
        handlers: &mut TransactionHandlers,
    ) -> Result<(), SendFailure> {
        let receipt = self.wait_for_receipt(client, hash).await?;

        if !receipt.status() {
            metrics::record_transaction("reverted");
            return Err(BlockchainError::Reverted(hash).into());
        }

        metrics::record_transaction("mined");
        (handlers.on_receipt)(&receipt);

        let required = self.settings().confirmation_blocks;
        if required == 0 {
            return Ok(());
        }

        let tx_block = match receipt.block_number {
            Some(block) => block,
            None => client.block_number().await?,
        };

        let watch = async {
            let mut ticker = interval(self.poll_interval());
            let mut emitted = 0u32;

            while emitted < required {
                ticker.tick().await;

                let current = client.block_number().await?;
                let confirmations = current.saturating_sub(tx_block).min(u64::from(required)) as u32;

                while emitted < confirmations {
                    emitted += 1;
                    (handlers.on_confirmation)(emitted, &receipt);
                }
            }
            Ok::<_, BlockchainError>(())
        };

        match timeout(self.settings().receipt_timeout, watch).await {
            Ok(result) => result.map_err(SendFailure::from),
            Err(_) => {
                tracing::debug!(tx_hash = %hash, "Stopped watching confirmations");
                Ok(())
            }
        }
    }

    async fn wait_for_receipt(
        &self,
        client: &dyn Web3Client,
        hash: TxHash,
    ) -> Result<TransactionReceipt, BlockchainError> {
        let receipt_timeout = self.settings().receipt_timeout;

        let poll = async {
            let mut ticker = interval(self.poll_interval());
            loop {
                ticker.tick().await;
                match client.transaction_receipt(hash).await? {
                    Some(receipt) => return Ok::<_, BlockchainError>(receipt),
                    None => tracing::debug!(tx_hash = %hash, "Transaction pending"),
                }
            }
        };

        match timeout(receipt_timeout, poll).await {
            Ok(result) => result,
            Err(_) => Err(BlockchainError::ReceiptTimeout(receipt_timeout)),
        }
    }

    fn poll_interval(&self) -> Duration {
        // tokio's interval panics on a zero period.
        self.settings().poll_interval.max(Duration::from_millis(1))
    }
}
