//! Signer credentials.
//!
//! A [`SignerCredential`] is an opaque capability handed to the
//! account-abstraction client. This crate never inspects it: the client knows
//! how to turn it into a signature (for example through a WebAuthn passkey
//! prompt).
//!
//! # Example
//!
//! ```rust
//! use relay_kit::SignerCredential;
//!
//! let signer = SignerCredential::passkey("q83vEjRW", "0x1f3a", "0x9c2b");
//! let json = serde_json::to_value(&signer).unwrap();
//! assert_eq!(json["rawId"], "q83vEjRW");
//! assert_eq!(json["coordinates"]["x"], "0x1f3a");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;

/// Opaque credential that authorizes signing on behalf of a smart account.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignerCredential(serde_json::Value);

impl SignerCredential {
    /// A passkey credential: its raw id and the public key coordinates.
    pub fn passkey(raw_id: impl Into<String>, x: impl Into<String>, y: impl Into<String>) -> Self {
        Self(json!({
            "rawId": raw_id.into(),
            "coordinates": {
                "x": x.into(),
                "y": y.into(),
            },
        }))
    }

    /// Wrap any client-specific credential value.
    pub fn from_json(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// The credential as passed to the client.
    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for SignerCredential {
    fn from(value: serde_json::Value) -> Self {
        Self::from_json(value)
    }
}

// Credentials may carry private key material for non-passkey signers.
impl fmt::Debug for SignerCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SignerCredential(..)")
    }
}
