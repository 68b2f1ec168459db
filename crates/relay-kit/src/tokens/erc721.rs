//! ERC-721 mint calls.

use std::sync::OnceLock;

use alloy_primitives::{Address, Bytes, U256};

use crate::abi::{DynSolType, FunctionSignature, encode_call};
use crate::error::{EncodeError, Error};
use crate::operation::build_operation;
use crate::types::{ContractCall, EntropySource, OsEntropy, random_uint256_from};

/// `function safeMint(address to, uint256 tokenId)`
pub fn safe_mint_signature() -> &'static FunctionSignature {
    static SAFE_MINT: OnceLock<FunctionSignature> = OnceLock::new();
    SAFE_MINT.get_or_init(|| {
        FunctionSignature::declared(
            "safeMint",
            &[("to", DynSolType::Address), ("tokenId", DynSolType::Uint(256))],
            &[],
        )
    })
}

/// Encode `safeMint(to, token_id)`.
///
/// ```
/// use alloy_primitives::{Address, U256};
/// use relay_kit::tokens::encode_safe_mint;
///
/// let data = encode_safe_mint(Address::ZERO, U256::from(42u64)).unwrap();
/// assert_eq!(&data[..4], &[0xa1, 0x44, 0x81, 0x94]);
/// ```
pub fn encode_safe_mint(to: Address, token_id: U256) -> Result<Bytes, EncodeError> {
    encode_call(safe_mint_signature(), &[to.into(), token_id.into()])
}

/// Build a zero-value `safeMint` call on `nft`.
///
/// When `token_id` is `None` a fresh id is drawn from the OS CSPRNG.
pub fn build_mint_operation(
    nft: Address,
    to: Address,
    token_id: Option<U256>,
) -> Result<ContractCall, Error> {
    build_mint_operation_with(nft, to, token_id, &OsEntropy)
}

/// Like [`build_mint_operation`], drawing missing ids from `entropy`.
pub fn build_mint_operation_with(
    nft: Address,
    to: Address,
    token_id: Option<U256>,
    entropy: &(impl EntropySource + ?Sized),
) -> Result<ContractCall, Error> {
    let token_id = match token_id {
        Some(id) => id,
        None => random_uint256_from(entropy)?,
    };
    let data = encode_safe_mint(to, token_id)?;
    Ok(build_operation(nft, data, U256::ZERO))
}
