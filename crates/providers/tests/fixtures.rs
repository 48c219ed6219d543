// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0
#![allow(missing_docs, dead_code)]

//! Shared wire-shaped response bodies for provider client tests

use alloy_primitives::{Address, B256};
use serde_json::{Value, json};

/// A well-known mainnet address for request assertions.
pub fn test_address() -> Address {
    "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"
        .parse()
        .expect("valid address")
}

/// The lowercase wire form of [`test_address`].
pub fn test_address_hex() -> String {
    format!("{:#x}", test_address())
}

/// A well-known transaction hash.
pub fn test_tx_hash() -> B256 {
    "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060"
        .parse()
        .expect("valid hash")
}

/// A JSON-RPC success envelope.
pub fn rpc_result(result: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": 1, "result": result })
}

/// A JSON-RPC error envelope.
pub fn rpc_error(code: i64, message: &str) -> Value {
    json!({ "jsonrpc": "2.0", "id": 1, "error": { "code": code, "message": message } })
}

/// An explorer success envelope wrapping `rows`.
pub fn explorer_success(rows: Value) -> Value {
    json!({ "status": "1", "message": "OK", "result": rows })
}

/// The explorer's empty-history response: status "0" but not an error.
pub fn explorer_no_transactions() -> Value {
    json!({ "status": "0", "message": "No transactions found", "result": [] })
}

/// An explorer service error with detail in the `result` field.
pub fn explorer_notok(detail: &str) -> Value {
    json!({ "status": "0", "message": "NOTOK", "result": detail })
}

/// One explorer history row with the given timestamp and wei value.
pub fn explorer_tx_row(timestamp: i64, value_wei: &str) -> Value {
    json!({
        "blockNumber": "17000000",
        "timeStamp": timestamp.to_string(),
        "hash": format!("{:#x}", test_tx_hash()),
        "from": test_address_hex(),
        "to": "0x5df9b87991262f6ba471f09758cde1c0fc1de734",
        "value": value_wei,
        "gas": "21000",
        "gasPrice": "20000000000",
        "gasUsed": "21000",
        "isError": "0",
        "confirmations": "1200000"
    })
}

/// A market-service rate-limit error body.
pub fn market_rate_limited() -> Value {
    json!({
        "status": {
            "error_code": 429,
            "error_message": "You've exceeded the Rate Limit."
        }
    })
}
