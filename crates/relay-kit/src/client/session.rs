//! The account-abstraction client seam.
//!
//! The bundler/paymaster SDK is an external capability. It is injected as an
//! [`AccountAbstractionClient`], which opens one [`AccountSession`] per
//! workflow. A session turns contract calls into an operation, signs it and
//! hands it to the bundler.
//!
//! # Example Implementation
//!
//! ```rust,ignore
//! use futures::FutureExt;
//! use futures::future::BoxFuture;
//! use relay_kit::{
//!     AccountAbstractionClient, AccountSession, ClientError, SessionParams,
//! };
//!
//! struct SafeClient { /* SDK handle */ }
//!
//! impl AccountAbstractionClient for SafeClient {
//!     fn init<'a>(
//!         &'a self,
//!         params: &'a SessionParams,
//!     ) -> BoxFuture<'a, Result<Box<dyn AccountSession>, ClientError>> {
//!         async move {
//!             let session = connect(params).await?;
//!             Ok(Box::new(session) as Box<dyn AccountSession>)
//!         }
//!         .boxed()
//!     }
//! }
//! ```

use std::sync::Arc;

use alloy_primitives::{Address, B256};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use super::config::PaymasterOptions;
use super::signer::SignerCredential;
use crate::error::ClientError;
use crate::types::ContractCall;

/// Hash the bundler assigns to a submitted user operation.
pub type OperationHash = B256;

/// Owner set of the smart account.
///
/// Left empty, the account is controlled by the session's signer alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountOptions {
    pub owners: Vec<Address>,
    pub threshold: u32,
}

impl Default for AccountOptions {
    fn default() -> Self {
        Self {
            owners: Vec::new(),
            threshold: 1,
        }
    }
}

/// Everything a client needs to open a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionParams {
    /// Blockchain RPC endpoint.
    pub provider: String,
    pub signer: SignerCredential,
    pub bundler_url: String,
    pub paymaster_options: PaymasterOptions,
    pub options: AccountOptions,
}

/// A user operation built from contract calls, not yet signed.
///
/// `payload` is whatever the client needs to carry to the signing step;
/// the relay only passes it along. Serialize-only, like
/// [`ContractCall`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnsignedOperation {
    pub calls: Vec<ContractCall>,
    pub payload: serde_json::Value,
}

/// A signed user operation, ready for the bundler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedOperation {
    pub operation: UnsignedOperation,
    pub signature: serde_json::Value,
}

/// Factory for account-abstraction sessions.
pub trait AccountAbstractionClient: Send + Sync {
    /// Open a session for the given provider, signer and bundler wiring.
    fn init<'a>(
        &'a self,
        params: &'a SessionParams,
    ) -> BoxFuture<'a, Result<Box<dyn AccountSession>, ClientError>>;
}

impl<T: AccountAbstractionClient + ?Sized> AccountAbstractionClient for Arc<T> {
    fn init<'a>(
        &'a self,
        params: &'a SessionParams,
    ) -> BoxFuture<'a, Result<Box<dyn AccountSession>, ClientError>> {
        (**self).init(params)
    }
}

/// A live session bound to one smart account.
pub trait AccountSession: Send + Sync {
    /// Build an operation that executes `calls` in order.
    fn create_transaction<'a>(
        &'a self,
        calls: &'a [ContractCall],
    ) -> BoxFuture<'a, Result<UnsignedOperation, ClientError>>;

    /// Sign the operation. May prompt the user.
    fn sign_operation(
        &self,
        operation: UnsignedOperation,
    ) -> BoxFuture<'_, Result<SignedOperation, ClientError>>;

    /// Submit the signed operation to the bundler and return its hash.
    fn execute(
        &self,
        operation: SignedOperation,
    ) -> BoxFuture<'_, Result<OperationHash, ClientError>>;
}
