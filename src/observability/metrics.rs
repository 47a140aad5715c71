//! Client metrics.
//!
//! # Metrics
//! - `aide_transactions_total` (counter): transaction calls by return mode
//! - `aide_rpc_errors_total` (counter): failed RPC calls by method
//! - `aide_node_reachable` (gauge): 1=reachable, 0=unreachable
//! - `aide_receipt_wait_seconds` (histogram): time from submission to receipt
//!
//! Only the `metrics` facade is used; embedding applications install
//! whichever recorder they export with.

use std::time::Duration;

use metrics::{counter, gauge, histogram};

use crate::transaction::return_mode::ReturnMode;

pub fn record_transaction(mode: ReturnMode) {
    counter!("aide_transactions_total", "mode" => mode.as_str()).increment(1);
}

pub fn record_rpc_error(method: &str) {
    counter!("aide_rpc_errors_total", "method" => method.to_string()).increment(1);
}

pub fn record_node_health(reachable: bool) {
    gauge!("aide_node_reachable").set(if reachable { 1.0 } else { 0.0 });
}

pub fn record_receipt_wait(elapsed: Duration) {
    histogram!("aide_receipt_wait_seconds").record(elapsed.as_secs_f64());
}
