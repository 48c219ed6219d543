// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Validated query parameters for Ethereum read operations
//!
//! Every parameter a query can carry is represented by a type that cannot be
//! constructed from malformed input: addresses and transaction hashes are
//! length/prefix/alphabet checked and normalized, block tags separate symbolic
//! and numeric forms by construction, history limits are bounded, and coin and
//! currency codes are matched against the known-symbol sets. Parsing is pure;
//! nothing in this crate performs I/O.
//!
//! Each type has its own parse-error type so callers can report precisely what
//! was wrong without inspecting free-text messages.

mod address;
mod block_tag;
mod hash;
mod limit;
mod sort;
mod symbols;

pub use address::{ADDRESS_STR_LEN, AddressParseError, EthAddress};
pub use block_tag::{BlockTag, BlockTagParseError};
pub use hash::{TX_HASH_STR_LEN, TransactionHash, TransactionHashParseError};
pub use limit::{DEFAULT_HISTORY_LIMIT, HistoryLimit, LimitOutOfRange, MAX_HISTORY_LIMIT};
pub use sort::{SortOrder, SortOrderParseError};
pub use symbols::{CoinId, UnknownCoinError, UnknownCurrencyError, VsCurrency};
