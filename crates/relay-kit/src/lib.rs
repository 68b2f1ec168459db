//! Gasless contract calls through account abstraction.
//!
//! **relay-kit** packages contract calls (NFT mints, stablecoin transfers)
//! into account-abstraction operations and hands them to a bundler with a
//! sponsoring paymaster, so the user never holds gas.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use relay_kit::*;
//!
//! # async fn example(client: impl AccountAbstractionClient + 'static) -> Result<(), relay_kit::Error> {
//! // Configure once
//! let relay = Relay::new(RelayConfig::from_env()?, client);
//! let signer = SignerCredential::passkey("q83vEjRW", "0x1f3a", "0x9c2b");
//!
//! // Send 10.5 USDC from the smart account
//! let hash = relay
//!     .send(
//!         signer,
//!         "0x00000000000000000000000000000000000000aa",
//!         "0x00000000000000000000000000000000000000bb",
//!         "10.5",
//!     )
//!     .await?;
//! println!("user operation: {hash}");
//! # Ok(())
//! # }
//! ```
//!
//! # Design Principles
//!
//! 1. **Deterministic payloads**: Same inputs, same bytes. Only token ids are random
//! 2. **Exact amounts**: Human amounts are scaled with fixed-point arithmetic, never floats
//! 3. **Injected capabilities**: The bundler SDK and the randomness source are passed in
//! 4. **Stage-tagged failures**: Client errors say whether anything may have been submitted
//!
//! # Core Types
//!
//! - [`Address`], [`U256`], [`Bytes`] - from `alloy-primitives`
//! - [`ContractCall`] - target, value and encoded payload
//! - [`TokenAmount`] - raw token amount with its decimals
//! - [`FunctionSignature`], [`AbiValue`] - declared functions and typed arguments
//!
//! # Building Calls Without A Client
//!
//! ```
//! use relay_kit::{AbiValue, FunctionSignature, U256, decode_call, encode_call, parse_address};
//!
//! let transfer = FunctionSignature::parse("function transfer(address to, uint256 amount)").unwrap();
//! let to = parse_address("0x00000000000000000000000000000000000000bb").unwrap();
//! let data = encode_call(&transfer, &[to.into(), AbiValue::from(10_500_000u64)]).unwrap();
//!
//! assert_eq!(&data[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
//! let args = decode_call(&transfer, &data).unwrap();
//! assert_eq!(args[1].as_uint(), Some(U256::from(10_500_000u64)));
//! ```

pub mod abi;
pub mod client;
pub mod error;
mod operation;
pub mod tokens;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{
    ClientError, ConfigError, EncodeError, EntropyError, Error, OperationStage, ValidationError,
};
pub use types::*;

pub use abi::{AbiValue, FunctionSignature, Param, StateMutability, decode_call, encode_call};
pub use operation::{build_operation, build_transfer_operation};

// Re-export client types
pub use client::{
    AccountAbstractionClient, AccountOptions, AccountSession, MintCall, OperationHash,
    PaymasterOptions, Relay, RelayConfig, RelayConfigBuilder, SendCall, SessionParams,
    SignedOperation, SignerCredential, UnsignedOperation,
};

// Re-export token types
pub use tokens::{Erc20Token, build_mint_operation, build_mint_operation_with};
