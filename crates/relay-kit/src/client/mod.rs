//! Workflow orchestration over an account-abstraction client.
//!
//! - [`Relay`]: entry point for minting, transferring and submitting calls
//! - [`RelayConfig`]: endpoints and contract addresses, validated up front
//! - [`AccountAbstractionClient`] / [`AccountSession`]: the injected
//!   bundler/paymaster capability
//! - [`SignerCredential`]: opaque signing capability passed to the client
//!
//! # Workflow Builders
//!
//! Workflows return builders that implement `IntoFuture`:
//!
//! - [`MintCall`]: NFT mint with a random or fixed token id
//! - [`SendCall`]: stablecoin (or other ERC-20) transfer

mod config;
mod relay;
mod session;
mod signer;

pub use config::{PaymasterOptions, RelayConfig, RelayConfigBuilder};
pub use relay::{MintCall, Relay, SendCall};
pub use session::{
    AccountAbstractionClient, AccountOptions, AccountSession, OperationHash, SessionParams,
    SignedOperation, UnsignedOperation,
};
pub use signer::SignerCredential;
