//! Building contract calls for account-abstraction operations.
//!
//! [`build_operation`] wraps an already-encoded payload. The transfer
//! specialization scales a human amount with fixed-point arithmetic, encodes
//! `transfer(address,uint256)` and attaches no native value: the tokens move
//! through contract logic.
//!
//! # Rounding
//!
//! Amounts with more fractional digits than the token supports are truncated
//! toward zero (`"1.0000009"` USDC is `1000000` units).

use alloy_primitives::{Address, Bytes, U256};

use crate::error::Error;
use crate::tokens::Erc20Token;
use crate::types::{ContractCall, IntoAddress, IntoTokenAmount, TransferRequest};

/// Tag an encoded payload with its target contract and native value.
pub fn build_operation(to: Address, data: impl Into<Bytes>, value: U256) -> ContractCall {
    ContractCall::new(to, value, data.into())
}

/// Build an ERC-20 `transfer` of a human-scaled `amount` of `token`.
///
/// # Errors
///
/// - [`Error::Validation`] if an address is malformed, or `amount` is
///   negative, non-finite, malformed or overflows `uint256`
/// - [`Error::Encoding`] if the payload cannot be encoded
///
/// A zero amount is accepted.
///
/// # Example
///
/// ```
/// use alloy_primitives::U256;
/// use relay_kit::{build_transfer_operation, decode_call, tokens};
///
/// let call = build_transfer_operation(
///     "0x00000000000000000000000000000000000000aa",
///     "0x00000000000000000000000000000000000000bb",
///     10.5,
///     &tokens::USDC_SEPOLIA,
/// ).unwrap();
///
/// let args = decode_call(tokens::transfer_signature(), call.data()).unwrap();
/// assert_eq!(args[1].as_uint(), Some(U256::from(10_500_000u64)));
/// ```
pub fn build_transfer_operation(
    sender: impl IntoAddress,
    recipient: impl IntoAddress,
    amount: impl IntoTokenAmount,
    token: &Erc20Token,
) -> Result<ContractCall, Error> {
    let request = TransferRequest {
        sender: sender.into_address()?,
        recipient: recipient.into_address()?,
        amount: amount.into_raw_amount(token.decimals)?,
        token: token.clone(),
    };

    tracing::debug!(
        sender = %request.sender,
        recipient = %request.recipient,
        amount = %request.amount,
        token = %token.symbol,
        "building transfer"
    );

    Ok(request.into_call()?)
}
