//! Error types for relay-kit.
//!
//! # Error Hierarchy
//!
//! - [`Error`](enum@Error): Main error type, returned by most operations
//!   - [`ConfigError`]: Missing or invalid endpoint / address configuration
//!   - [`ValidationError`]: Malformed or out-of-range business input
//!   - [`EncodeError`]: Signature/argument mismatch during payload construction
//!   - [`EntropyError`]: Secure randomness unavailable
//!   - [`ClientError`]: Failure surfaced by the account-abstraction client,
//!     wrapped in [`Error::Operation`] together with the [`OperationStage`]
//!
//! # Deciding Whether To Resubmit
//!
//! Only a failure in the `execute` stage can leave a signed operation in the
//! bundler's hands. Everything earlier is safe to retry from scratch.
//!
//! ```rust
//! use relay_kit::Error;
//!
//! fn safe_to_retry(err: &Error) -> bool {
//!     match err {
//!         Error::Operation { .. } => !err.may_have_submitted(),
//!         _ => false,
//!     }
//! }
//! ```

use std::fmt;

use thiserror::Error;

/// Error in the relay configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required endpoint: {0}")]
    MissingEndpoint(&'static str),

    #[error("Missing required contract address: {0}")]
    MissingAddress(&'static str),

    #[error("Invalid address for {field}: '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("Environment variable {0} is not valid unicode")]
    InvalidEnv(&'static str),
}

/// Error validating a business input such as an amount or address.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Amount must not be negative: '{0}'")]
    NegativeAmount(String),

    #[error("Amount must be a finite number")]
    NonFiniteAmount,

    #[error("Invalid amount format: '{0}'")]
    InvalidAmount(String),

    #[error("Amount overflow: value does not fit in uint256")]
    AmountOverflow,

    #[error("Token decimals {0} exceed the uint256 range")]
    DecimalsTooLarge(u8),

    #[error("Invalid address: '{0}'")]
    InvalidAddress(String),

    #[error("Operation must contain at least one call")]
    EmptyOperation,
}

/// Error encoding or decoding a contract call payload.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Invalid function signature '{signature}': {reason}")]
    InvalidSignature { signature: String, reason: String },

    #[error("Unsupported parameter type: '{0}'")]
    UnsupportedType(String),

    #[error("Wrong number of arguments for {function}: expected {expected}, got {actual}")]
    Arity {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("Type mismatch for parameter {index} ('{name}'): expected {expected}, got {actual}")]
    TypeMismatch {
        index: usize,
        name: String,
        expected: String,
        actual: &'static str,
    },

    #[error("Value out of range for parameter {index} ('{name}') of type {ty}")]
    OutOfRange {
        index: usize,
        name: String,
        ty: String,
    },

    #[error("Selector mismatch: expected 0x{expected}, got 0x{actual}")]
    SelectorMismatch { expected: String, actual: String },

    #[error("Malformed payload: {0}")]
    Malformed(String),

    #[error("Invalid JSON ABI fragment: {0}")]
    Json(String),

    #[error("ABI codec error: {0}")]
    Abi(String),
}

impl From<serde_json::Error> for EncodeError {
    fn from(e: serde_json::Error) -> Self {
        EncodeError::Json(e.to_string())
    }
}

impl From<alloy_dyn_abi::Error> for EncodeError {
    fn from(e: alloy_dyn_abi::Error) -> Self {
        EncodeError::Abi(e.to_string())
    }
}

/// Error drawing bytes from a secure randomness source.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Secure randomness unavailable: {0}")]
pub struct EntropyError(pub String);

// ============================================================================
// Account-abstraction client errors
// ============================================================================

/// Stage of the account-abstraction workflow at which a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationStage {
    /// Session initialization (provider, signer, bundler, paymaster wiring).
    Init,
    /// Creating the unsigned operation from contract calls.
    Build,
    /// Signing the operation.
    Sign,
    /// Handing the signed operation to the bundler.
    Execute,
}

impl OperationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationStage::Init => "init",
            OperationStage::Build => "build",
            OperationStage::Sign => "sign",
            OperationStage::Execute => "execute",
        }
    }
}

impl fmt::Display for OperationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported by an account-abstraction client implementation.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ClientError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ClientError {
    /// Create an error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create an error wrapping an underlying cause.
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

// ============================================================================
// Main Error Type
// ============================================================================

/// Main error type for relay-kit operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Encoding failed: {0}")]
    Encoding(#[from] EncodeError),

    #[error(transparent)]
    Environment(#[from] EntropyError),

    #[error("Operation failed at {stage} stage: {source}")]
    Operation {
        stage: OperationStage,
        #[source]
        source: ClientError,
    },
}

impl Error {
    /// Wrap a client failure with the stage it happened in.
    pub fn operation(stage: OperationStage, source: ClientError) -> Self {
        Error::Operation { stage, source }
    }

    /// The workflow stage that failed, if this is an operation error.
    pub fn stage(&self) -> Option<OperationStage> {
        match self {
            Error::Operation { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Returns true if a signed operation may have reached the bundler.
    ///
    /// Failures before the `execute` stage never submit anything.
    pub fn may_have_submitted(&self) -> bool {
        matches!(
            self,
            Error::Operation {
                stage: OperationStage::Execute,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_error_display() {
        let err = Error::operation(OperationStage::Sign, ClientError::new("user rejected"));
        assert_eq!(
            err.to_string(),
            "Operation failed at sign stage: user rejected"
        );
        assert_eq!(err.stage(), Some(OperationStage::Sign));
    }

    #[test]
    fn test_may_have_submitted_only_on_execute() {
        for stage in [
            OperationStage::Init,
            OperationStage::Build,
            OperationStage::Sign,
        ] {
            let err = Error::operation(stage, ClientError::new("boom"));
            assert!(!err.may_have_submitted(), "{stage} should not submit");
        }

        let err = Error::operation(OperationStage::Execute, ClientError::new("timeout"));
        assert!(err.may_have_submitted());
    }

    #[test]
    fn test_non_operation_errors_have_no_stage() {
        let err: Error = ValidationError::NonFiniteAmount.into();
        assert_eq!(err.stage(), None);
        assert!(!err.may_have_submitted());
    }

    #[test]
    fn test_client_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = ClientError::with_source("bundler unreachable", io);
        assert_eq!(err.message(), "bundler unreachable");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_entropy_error_is_transparent() {
        let err: Error = EntropyError("no device".into()).into();
        assert_eq!(err.to_string(), "Secure randomness unavailable: no device");
    }
}
