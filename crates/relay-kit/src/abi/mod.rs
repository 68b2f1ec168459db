//! Contract call encoding.
//!
//! - [`FunctionSignature`]: a declared function, parsed from a human-readable
//!   fragment or a JSON ABI item by `alloy-json-abi`
//! - [`AbiValue`]: a typed argument
//! - [`encode_call`] / [`decode_call`]: selector plus standard ABI argument
//!   encoding through `alloy-dyn-abi`, and its strict inverse
//!
//! Every call shape goes through the same encoder; only the signature varies.
//!
//! ```
//! use alloy_primitives::{Address, U256};
//! use relay_kit::{FunctionSignature, decode_call, encode_call};
//!
//! let mint = FunctionSignature::parse("function safeMint(address to, uint256 tokenId)").unwrap();
//! let data = encode_call(&mint, &[Address::ZERO.into(), U256::from(42u64).into()]).unwrap();
//!
//! let args = decode_call(&mint, &data).unwrap();
//! assert_eq!(args[1].as_uint(), Some(U256::from(42u64)));
//! ```

mod codec;
mod signature;
mod value;

pub use alloy_dyn_abi::DynSolType;
pub use codec::{decode_call, encode_call};
pub use signature::{FunctionSignature, Param, StateMutability};
pub use value::AbiValue;
