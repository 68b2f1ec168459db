//! Core value types.
//!
//! Addresses, integers and byte strings come from `alloy-primitives`; this
//! module adds the call, amount and identifier types built on top of them.

mod address;
mod call;
mod random;
mod units;

pub use address::{IntoAddress, parse_address};
pub use call::{ContractCall, TransferRequest};
pub use random::{EntropySource, OsEntropy, random_uint256, random_uint256_from};
pub use units::{IntoTokenAmount, TokenAmount};

pub use alloy_primitives::{Address, B256, Bytes, U256};
