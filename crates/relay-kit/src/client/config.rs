//! Relay configuration.
//!
//! Endpoints and contract addresses are held in an explicit [`RelayConfig`]
//! handed to [`Relay::new`](super::Relay::new). Nothing is read from global
//! state unless [`RelayConfig::from_env`] is called.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error};
use crate::tokens::{Erc20Token, USDC_SEPOLIA};
use crate::types::parse_address;

/// Paymaster settings passed through to the account-abstraction client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymasterOptions {
    pub is_sponsored: bool,
    pub paymaster_address: Address,
    pub paymaster_url: String,
}

/// Validated relay configuration.
///
/// # Example
///
/// ```rust
/// use alloy_primitives::Address;
/// use relay_kit::RelayConfig;
///
/// let config = RelayConfig::builder()
///     .rpc_url("https://rpc.sepolia.example")
///     .bundler_url("https://bundler.example/v1/11155111")
///     .paymaster_url("https://paymaster.example/v1/11155111")
///     .paymaster_address(Address::repeat_byte(0x55))
///     .nft_address(Address::repeat_byte(0x0a))
///     .build()
///     .unwrap();
///
/// assert!(config.paymaster().is_sponsored);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    rpc_url: String,
    bundler_url: String,
    paymaster: PaymasterOptions,
    nft_address: Option<Address>,
    stablecoin: Erc20Token,
}

impl RelayConfig {
    /// Start building a configuration.
    pub fn builder() -> RelayConfigBuilder {
        RelayConfigBuilder::default()
    }

    /// Read the configuration from environment variables.
    ///
    /// - `RELAY_RPC_URL`, `RELAY_BUNDLER_URL`, `RELAY_PAYMASTER_URL` (required)
    /// - `RELAY_PAYMASTER_ADDRESS` (required)
    /// - `RELAY_NFT_ADDRESS` (optional, needed for minting)
    /// - `RELAY_STABLECOIN_ADDRESS` (optional, 6-decimal USDC-like token;
    ///   defaults to USDC on Sepolia)
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a required variable is missing or an
    /// address is malformed.
    pub fn from_env() -> Result<RelayConfig, Error> {
        let mut builder = RelayConfig::builder();

        if let Some(url) = env_var("RELAY_RPC_URL")? {
            builder = builder.rpc_url(url);
        }
        if let Some(url) = env_var("RELAY_BUNDLER_URL")? {
            builder = builder.bundler_url(url);
        }
        if let Some(url) = env_var("RELAY_PAYMASTER_URL")? {
            builder = builder.paymaster_url(url);
        }
        if let Some(addr) = env_var("RELAY_PAYMASTER_ADDRESS")? {
            builder = builder.paymaster_address(env_address("RELAY_PAYMASTER_ADDRESS", &addr)?);
        }
        if let Some(addr) = env_var("RELAY_NFT_ADDRESS")? {
            builder = builder.nft_address(env_address("RELAY_NFT_ADDRESS", &addr)?);
        }
        if let Some(addr) = env_var("RELAY_STABLECOIN_ADDRESS")? {
            let address = env_address("RELAY_STABLECOIN_ADDRESS", &addr)?;
            builder = builder.stablecoin(Erc20Token::new(address, 6, "USDC"));
        }

        Ok(builder.build()?)
    }

    /// Blockchain RPC endpoint.
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Bundler endpoint.
    pub fn bundler_url(&self) -> &str {
        &self.bundler_url
    }

    /// Paymaster endpoint, address and sponsorship flag.
    pub fn paymaster(&self) -> &PaymasterOptions {
        &self.paymaster
    }

    /// NFT contract used by minting, if configured.
    pub fn nft_address(&self) -> Option<Address> {
        self.nft_address
    }

    /// Token moved by [`Relay::send`](super::Relay::send) unless overridden.
    pub fn stablecoin(&self) -> &Erc20Token {
        &self.stablecoin
    }
}

fn env_var(name: &'static str) -> Result<Option<String>, ConfigError> {
    match std::env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidEnv(name)),
    }
}

fn env_address(field: &'static str, value: &str) -> Result<Address, ConfigError> {
    parse_address(value).map_err(|_| ConfigError::InvalidAddress {
        field,
        value: value.to_string(),
    })
}

// ============================================================================
// RelayConfigBuilder
// ============================================================================

/// Builder for [`RelayConfig`].
#[derive(Debug, Clone, Default)]
pub struct RelayConfigBuilder {
    rpc_url: Option<String>,
    bundler_url: Option<String>,
    paymaster_url: Option<String>,
    paymaster_address: Option<Address>,
    sponsored: Option<bool>,
    nft_address: Option<Address>,
    stablecoin: Option<Erc20Token>,
}

impl RelayConfigBuilder {
    pub fn rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = Some(url.into());
        self
    }

    pub fn bundler_url(mut self, url: impl Into<String>) -> Self {
        self.bundler_url = Some(url.into());
        self
    }

    pub fn paymaster_url(mut self, url: impl Into<String>) -> Self {
        self.paymaster_url = Some(url.into());
        self
    }

    pub fn paymaster_address(mut self, address: Address) -> Self {
        self.paymaster_address = Some(address);
        self
    }

    /// Whether the paymaster sponsors gas (default: true).
    pub fn sponsored(mut self, sponsored: bool) -> Self {
        self.sponsored = Some(sponsored);
        self
    }

    pub fn nft_address(mut self, address: Address) -> Self {
        self.nft_address = Some(address);
        self
    }

    /// Token for [`Relay::send`](super::Relay::send) (default: USDC on Sepolia).
    pub fn stablecoin(mut self, token: Erc20Token) -> Self {
        self.stablecoin = Some(token);
        self
    }

    /// Validate and build the configuration.
    ///
    /// Endpoint strings are kept exactly as given; only their presence is
    /// checked.
    pub fn build(self) -> Result<RelayConfig, ConfigError> {
        let rpc_url = required(self.rpc_url, "rpc_url")?;
        let bundler_url = required(self.bundler_url, "bundler_url")?;
        let paymaster_url = required(self.paymaster_url, "paymaster_url")?;
        let paymaster_address = self
            .paymaster_address
            .ok_or(ConfigError::MissingAddress("paymaster_address"))?;

        Ok(RelayConfig {
            rpc_url,
            bundler_url,
            paymaster: PaymasterOptions {
                is_sponsored: self.sponsored.unwrap_or(true),
                paymaster_address,
                paymaster_url,
            },
            nft_address: self.nft_address,
            stablecoin: self.stablecoin.unwrap_or(USDC_SEPOLIA),
        })
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingEndpoint(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> RelayConfigBuilder {
        RelayConfig::builder()
            .rpc_url("https://rpc.example")
            .bundler_url("https://bundler.example")
            .paymaster_url("https://paymaster.example")
            .paymaster_address(Address::repeat_byte(0x55))
    }

    #[test]
    fn test_build_complete() {
        let config = complete().build().unwrap();
        assert_eq!(config.rpc_url(), "https://rpc.example");
        assert_eq!(config.bundler_url(), "https://bundler.example");
        assert_eq!(config.paymaster().paymaster_url, "https://paymaster.example");
        assert!(config.paymaster().is_sponsored);
        assert_eq!(config.nft_address(), None);
        assert_eq!(config.stablecoin(), &USDC_SEPOLIA);
    }

    #[test]
    fn test_endpoints_are_not_rewritten() {
        let config = complete()
            .bundler_url("https://bundler.example/v2/11155111/rpc?apikey=abc ")
            .build()
            .unwrap();
        assert_eq!(
            config.bundler_url(),
            "https://bundler.example/v2/11155111/rpc?apikey=abc "
        );
    }

    #[test]
    fn test_missing_endpoints() {
        let err = RelayConfig::builder().build().unwrap_err();
        assert_eq!(err, ConfigError::MissingEndpoint("rpc_url"));

        let err = complete().bundler_url("").build().unwrap_err();
        assert_eq!(err, ConfigError::MissingEndpoint("bundler_url"));

        let err = RelayConfig::builder()
            .rpc_url("https://rpc.example")
            .bundler_url("https://bundler.example")
            .paymaster_address(Address::ZERO)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingEndpoint("paymaster_url"));
    }

    #[test]
    fn test_missing_paymaster_address() {
        let err = RelayConfig::builder()
            .rpc_url("https://rpc.example")
            .bundler_url("https://bundler.example")
            .paymaster_url("https://paymaster.example")
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingAddress("paymaster_address"));
    }

    #[test]
    fn test_sponsorship_can_be_disabled() {
        let config = complete().sponsored(false).build().unwrap();
        assert!(!config.paymaster().is_sponsored);
    }

    #[test]
    fn test_paymaster_options_serialize_camel_case() {
        let config = complete().build().unwrap();
        let json = serde_json::to_value(config.paymaster()).unwrap();
        assert_eq!(json["isSponsored"], true);
        assert_eq!(json["paymasterUrl"], "https://paymaster.example");
        assert_eq!(
            json["paymasterAddress"],
            "0x5555555555555555555555555555555555555555"
        );
    }

    #[test]
    fn test_env_address_error_names_field() {
        let err = env_address("RELAY_NFT_ADDRESS", "nope").unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidAddress {
                field: "RELAY_NFT_ADDRESS",
                value: "nope".to_string(),
            }
        );
    }
}
