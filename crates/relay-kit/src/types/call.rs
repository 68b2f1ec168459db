//! Contract call value objects.

use alloy_primitives::{Address, Bytes, U256};
use serde::Serialize;

use crate::error::EncodeError;
use crate::tokens::Erc20Token;

/// A single call to a contract, ready to be wrapped in an account-abstraction
/// operation.
///
/// Serializes as `{ "to": "0x..", "value": "0x0", "data": "0x.." }`.
/// Serialize-only: calls are produced by this crate's builders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ContractCall {
    to: Address,
    value: U256,
    data: Bytes,
}

impl ContractCall {
    pub(crate) fn new(to: Address, value: U256, data: Bytes) -> Self {
        Self { to, value, data }
    }

    /// The contract being called.
    pub fn to(&self) -> Address {
        self.to
    }

    /// Native currency attached to the call, in wei.
    pub fn value(&self) -> U256 {
        self.value
    }

    /// The encoded call payload.
    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

/// A token transfer already scaled to smallest units.
///
/// Lowered into a [`ContractCall`] on the token contract with
/// [`into_call`](Self::into_call).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub sender: Address,
    pub recipient: Address,
    /// Raw amount in the token's smallest unit.
    pub amount: U256,
    pub token: Erc20Token,
}

impl TransferRequest {
    /// Encode this transfer as a zero-value call on the token contract.
    pub fn into_call(self) -> Result<ContractCall, EncodeError> {
        crate::tokens::erc20::transfer_call(self.token.address, self.recipient, self.amount)
    }
}
