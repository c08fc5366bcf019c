//! Metrics collection.
//!
//! # Metrics
//! - `web3_rpc_requests_total` (counter): RPC calls by method, status
//! - `web3_transactions_total` (counter): send outcomes (aborted, submitted, mined, reverted)
//! - `web3_signatures_total` (counter): signature requests by kind, status
//!
//! The library only records. Installing a recorder/exporter is up to the
//! embedding application; without one every call is a no-op.

use metrics::counter;

/// Record a single RPC call.
pub fn record_rpc_call(method: &'static str, ok: bool) {
    let status = if ok { "ok" } else { "error" };
    counter!("web3_rpc_requests_total", "method" => method, "status" => status).increment(1);
}

/// Record a transaction lifecycle outcome.
pub fn record_transaction(outcome: &'static str) {
    counter!("web3_transactions_total", "outcome" => outcome).increment(1);
}

/// Record a signature request and whether the signer verified.
pub fn record_signature(kind: &'static str, verified: bool) {
    let status = if verified { "verified" } else { "rejected" };
    counter!("web3_signatures_total", "kind" => kind, "status" => status).increment(1);
}
