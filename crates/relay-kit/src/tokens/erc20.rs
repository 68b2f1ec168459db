//! ERC-20 token calls.

use std::borrow::Cow;
use std::sync::OnceLock;

use alloy_primitives::{Address, U256};

use crate::abi::{DynSolType, FunctionSignature, encode_call};
use crate::error::EncodeError;
use crate::operation::build_operation;
use crate::types::ContractCall;

/// An ERC-20 token contract with its display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Erc20Token {
    pub address: Address,
    /// Number of decimal places of the smallest unit (6 for USDC).
    pub decimals: u8,
    pub symbol: Cow<'static, str>,
}

impl Erc20Token {
    pub fn new(address: Address, decimals: u8, symbol: impl Into<Cow<'static, str>>) -> Self {
        Self {
            address,
            decimals,
            symbol: symbol.into(),
        }
    }
}

/// `function transfer(address recipient, uint256 amount) returns (bool)`
pub fn transfer_signature() -> &'static FunctionSignature {
    static TRANSFER: OnceLock<FunctionSignature> = OnceLock::new();
    TRANSFER.get_or_init(|| {
        FunctionSignature::declared(
            "transfer",
            &[
                ("recipient", DynSolType::Address),
                ("amount", DynSolType::Uint(256)),
            ],
            &[("", DynSolType::Bool)],
        )
    })
}

/// Zero-value call moving `amount` smallest units of `token` to `recipient`.
pub(crate) fn transfer_call(
    token: Address,
    recipient: Address,
    amount: U256,
) -> Result<ContractCall, EncodeError> {
    let data = encode_call(transfer_signature(), &[recipient.into(), amount.into()])?;
    Ok(build_operation(token, data, U256::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::decode_call;

    #[test]
    fn test_transfer_signature_matches_declaration() {
        let parsed = FunctionSignature::parse(
            "function transfer(address recipient, uint256 amount) returns (bool)",
        )
        .unwrap();
        let declared = transfer_signature();
        assert_eq!(declared.selector(), parsed.selector());
        assert_eq!(declared.input_types(), parsed.input_types());
        assert_eq!(declared.inputs()[0].name, "recipient");
        assert_eq!(declared.outputs()[0].ty, "bool");
    }

    #[test]
    fn test_transfer_call_targets_token() {
        let token = Address::repeat_byte(0x1c);
        let recipient = Address::repeat_byte(0xbb);
        let call = transfer_call(token, recipient, U256::from(7u8)).unwrap();

        assert_eq!(call.to(), token);
        assert_eq!(call.value(), U256::ZERO);

        let args = decode_call(transfer_signature(), call.data()).unwrap();
        assert_eq!(args[0].as_address(), Some(recipient));
        assert_eq!(args[1].as_uint(), Some(U256::from(7u8)));
    }
}
