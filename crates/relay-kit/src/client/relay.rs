//! The relay: builds calls and drives them through the account-abstraction
//! client.
//!
//! Every workflow opens a fresh session and walks it through
//! `Init -> Built -> Signed -> Submitted -> Confirmed`. A failure at any step
//! ends in `Failed` and is returned as [`Error::Operation`] tagged with the
//! stage that failed. Nothing is retried and no later stage runs.

use std::fmt;
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::Arc;

use alloy_primitives::{Address, U256};
use tracing::Instrument;

use super::config::RelayConfig;
use super::session::{AccountAbstractionClient, AccountOptions, OperationHash, SessionParams};
use super::signer::SignerCredential;
use crate::error::{ClientError, ConfigError, Error, OperationStage, ValidationError};
use crate::operation::build_transfer_operation;
use crate::tokens::{Erc20Token, build_mint_operation_with};
use crate::types::{ContractCall, EntropySource, IntoAddress, IntoTokenAmount, OsEntropy};

/// Lifecycle of a single submitted operation, recorded as the `state` field
/// of the relay's tracing events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum OperationState {
    Init,
    Built,
    Signed,
    Submitted,
    /// The bundler accepted the operation and returned its hash.
    /// On-chain inclusion is not awaited.
    Confirmed,
    Failed,
}

impl OperationState {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            OperationState::Init => "init",
            OperationState::Built => "built",
            OperationState::Signed => "signed",
            OperationState::Submitted => "submitted",
            OperationState::Confirmed => "confirmed",
            OperationState::Failed => "failed",
        }
    }
}

impl fmt::Display for OperationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client for relaying contract calls as sponsored account-abstraction
/// operations.
///
/// `Relay` is cheap to clone; clones share the client and configuration.
///
/// # Example
///
/// ```rust,no_run
/// use relay_kit::{Relay, RelayConfig, SignerCredential};
///
/// # async fn example(client: impl relay_kit::AccountAbstractionClient + 'static) -> Result<(), relay_kit::Error> {
/// let relay = Relay::new(RelayConfig::from_env()?, client);
/// let signer = SignerCredential::passkey("q83vEjRW", "0x1f3a", "0x9c2b");
/// let safe = "0x00000000000000000000000000000000000000aa";
///
/// let hash = relay.mint_nft(signer.clone(), safe).await?;
/// println!("mint: {hash}");
///
/// let hash = relay
///     .send(signer, safe, "0x00000000000000000000000000000000000000bb", "10.5")
///     .await?;
/// println!("transfer: {hash}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Relay {
    config: Arc<RelayConfig>,
    client: Arc<dyn AccountAbstractionClient>,
    entropy: Arc<dyn EntropySource>,
}

impl Relay {
    /// Create a relay over a validated configuration and an injected client.
    pub fn new(config: RelayConfig, client: impl AccountAbstractionClient + 'static) -> Self {
        Self {
            config: Arc::new(config),
            client: Arc::new(client),
            entropy: Arc::new(OsEntropy),
        }
    }

    /// Replace the randomness source used for token ids.
    pub fn with_entropy(mut self, entropy: impl EntropySource + 'static) -> Self {
        self.entropy = Arc::new(entropy);
        self
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Mint an NFT with a random token id to `safe_address`.
    ///
    /// The smart account mints to itself: `safe_address` is both the
    /// operation's account and the `safeMint` recipient.
    pub fn mint_nft(&self, signer: SignerCredential, safe_address: impl IntoAddress) -> MintCall {
        MintCall {
            relay: self.clone(),
            signer,
            recipient: safe_address.into_address(),
            token_id: None,
        }
    }

    /// Transfer `amount` of the configured stablecoin from `safe_address` to
    /// `to`.
    ///
    /// `amount` is in whole tokens (`"10.5"` is 10.5 USDC).
    pub fn send<A: IntoTokenAmount>(
        &self,
        signer: SignerCredential,
        safe_address: impl IntoAddress,
        to: impl IntoAddress,
        amount: A,
    ) -> SendCall<A> {
        SendCall {
            relay: self.clone(),
            signer,
            sender: safe_address.into_address(),
            recipient: to.into_address(),
            amount,
            token: self.config.stablecoin().clone(),
        }
    }

    /// Run prepared calls through a fresh session as a single operation.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if `calls` is empty
    /// - [`Error::Operation`] if the client fails; the error names the stage
    pub async fn submit(
        &self,
        signer: SignerCredential,
        calls: Vec<ContractCall>,
    ) -> Result<OperationHash, Error> {
        if calls.is_empty() {
            return Err(ValidationError::EmptyOperation.into());
        }

        let params = self.session_params(signer);
        let span = tracing::debug_span!("relay_submit", calls = calls.len());
        self.run(&params, &calls).instrument(span).await
    }

    fn session_params(&self, signer: SignerCredential) -> SessionParams {
        SessionParams {
            provider: self.config.rpc_url().to_string(),
            signer,
            bundler_url: self.config.bundler_url().to_string(),
            paymaster_options: self.config.paymaster().clone(),
            options: AccountOptions::default(),
        }
    }

    async fn run(
        &self,
        params: &SessionParams,
        calls: &[ContractCall],
    ) -> Result<OperationHash, Error> {
        tracing::debug!(state = %OperationState::Init, "opening session");
        let session = self
            .client
            .init(params)
            .await
            .map_err(|e| failed(OperationStage::Init, e))?;

        let operation = session
            .create_transaction(calls)
            .await
            .map_err(|e| failed(OperationStage::Build, e))?;
        tracing::debug!(state = %OperationState::Built, payload = %operation.payload, "operation built");

        let signed = session
            .sign_operation(operation)
            .await
            .map_err(|e| failed(OperationStage::Sign, e))?;
        tracing::debug!(state = %OperationState::Signed, "operation signed");

        tracing::debug!(state = %OperationState::Submitted, "submitting to bundler");
        let hash = session
            .execute(signed)
            .await
            .map_err(|e| failed(OperationStage::Execute, e))?;
        tracing::debug!(state = %OperationState::Confirmed, %hash, "operation accepted");

        Ok(hash)
    }
}

fn failed(stage: OperationStage, source: ClientError) -> Error {
    tracing::warn!(
        state = %OperationState::Failed,
        %stage,
        error = %source,
        "operation failed"
    );
    Error::operation(stage, source)
}

impl fmt::Debug for Relay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relay")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// A workflow builder resolved into its call and the inputs for submitting it.
struct Prepared {
    relay: Relay,
    signer: SignerCredential,
    call: Result<ContractCall, Error>,
}

impl Prepared {
    fn submit(self) -> Pin<Box<dyn Future<Output = Result<OperationHash, Error>> + Send>> {
        let Prepared {
            relay,
            signer,
            call,
        } = self;
        Box::pin(async move { relay.submit(signer, vec![call?]).await })
    }
}

// ============================================================================
// MintCall
// ============================================================================

/// Pending NFT mint. Await it to submit.
pub struct MintCall {
    relay: Relay,
    signer: SignerCredential,
    recipient: Result<Address, ValidationError>,
    token_id: Option<U256>,
}

impl MintCall {
    /// Mint a specific token id instead of a random one.
    pub fn token_id(mut self, token_id: U256) -> Self {
        self.token_id = Some(token_id);
        self
    }

    /// Build the `safeMint` call without submitting it.
    pub fn into_call(self) -> Result<ContractCall, Error> {
        self.prepare().call
    }

    fn prepare(self) -> Prepared {
        let call = mint_call(&self.relay, self.recipient, self.token_id);
        Prepared {
            relay: self.relay,
            signer: self.signer,
            call,
        }
    }
}

fn mint_call(
    relay: &Relay,
    recipient: Result<Address, ValidationError>,
    token_id: Option<U256>,
) -> Result<ContractCall, Error> {
    let nft = relay
        .config
        .nft_address()
        .ok_or(ConfigError::MissingAddress("nft_address"))?;
    let recipient = recipient?;
    let call = build_mint_operation_with(nft, recipient, token_id, &*relay.entropy)?;
    tracing::debug!(%nft, %recipient, "building mint");
    Ok(call)
}

impl IntoFuture for MintCall {
    type Output = Result<OperationHash, Error>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        self.prepare().submit()
    }
}

// ============================================================================
// SendCall
// ============================================================================

/// Pending token transfer. Await it to submit.
pub struct SendCall<A> {
    relay: Relay,
    signer: SignerCredential,
    sender: Result<Address, ValidationError>,
    recipient: Result<Address, ValidationError>,
    amount: A,
    token: Erc20Token,
}

impl<A: IntoTokenAmount> SendCall<A> {
    /// Transfer a different token than the configured stablecoin.
    pub fn token(mut self, token: Erc20Token) -> Self {
        self.token = token;
        self
    }

    /// Build the `transfer` call without submitting it.
    pub fn into_call(self) -> Result<ContractCall, Error> {
        self.prepare().call
    }

    fn prepare(self) -> Prepared {
        let call = match (self.sender, self.recipient) {
            (Ok(sender), Ok(recipient)) => {
                build_transfer_operation(sender, recipient, self.amount, &self.token)
            }
            (Err(e), _) | (_, Err(e)) => Err(e.into()),
        };
        Prepared {
            relay: self.relay,
            signer: self.signer,
            call,
        }
    }
}

impl<A: IntoTokenAmount> IntoFuture for SendCall<A> {
    type Output = Result<OperationHash, Error>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        self.prepare().submit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::session::AccountSession;
    use crate::tokens::USDC_SEPOLIA;
    use futures::future::BoxFuture;

    const SAFE: &str = "0x00000000000000000000000000000000000000aa";
    const BOB: &str = "0x00000000000000000000000000000000000000bb";

    struct Unreachable;

    impl AccountAbstractionClient for Unreachable {
        fn init<'a>(
            &'a self,
            _params: &'a SessionParams,
        ) -> BoxFuture<'a, Result<Box<dyn AccountSession>, ClientError>> {
            Box::pin(async { Err(ClientError::new("client must not be reached")) })
        }
    }

    fn config(nft: Option<Address>) -> RelayConfig {
        let builder = RelayConfig::builder()
            .rpc_url("https://rpc.example")
            .bundler_url("https://bundler.example")
            .paymaster_url("https://paymaster.example")
            .paymaster_address(Address::repeat_byte(0x55));
        match nft {
            Some(nft) => builder.nft_address(nft).build().unwrap(),
            None => builder.build().unwrap(),
        }
    }

    fn signer() -> SignerCredential {
        SignerCredential::passkey("id", "x", "y")
    }

    #[test]
    fn test_operation_state_display() {
        assert_eq!(OperationState::Submitted.to_string(), "submitted");
        assert_eq!(OperationState::Failed.as_str(), "failed");
    }

    #[test]
    fn test_session_params_from_config() {
        let relay = Relay::new(config(None), Unreachable);
        let params = relay.session_params(signer());
        assert_eq!(params.provider, "https://rpc.example");
        assert_eq!(params.bundler_url, "https://bundler.example");
        assert!(params.paymaster_options.is_sponsored);
        assert!(params.options.owners.is_empty());
        assert_eq!(params.options.threshold, 1);
    }

    #[test]
    fn test_send_defaults_to_stablecoin() {
        let relay = Relay::new(config(None), Unreachable);
        let call = relay.send(signer(), SAFE, BOB, "10.5").into_call().unwrap();
        assert_eq!(call.to(), USDC_SEPOLIA.address);
    }

    #[test]
    fn test_into_call_is_the_encoded_transfer() {
        let relay = Relay::new(config(None), Unreachable);
        let call = relay.send(signer(), SAFE, BOB, "10.5").into_call().unwrap();

        let args = crate::abi::decode_call(crate::tokens::transfer_signature(), call.data()).unwrap();
        assert_eq!(args[0].as_address(), Some(Address::with_last_byte(0xbb)));
        assert_eq!(args[1].as_uint(), Some(U256::from(10_500_000u64)));
    }

    #[test]
    fn test_into_call_surfaces_address_errors() {
        let relay = Relay::new(config(None), Unreachable);
        let err = relay.send(signer(), "safe", BOB, "1").into_call().unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_send_token_override() {
        let relay = Relay::new(config(None), Unreachable);
        let token = Erc20Token::new(Address::repeat_byte(0x18), 18, "WETH");
        let call = relay
            .send(signer(), SAFE, BOB, 1u64.to_string())
            .token(token.clone())
            .into_call()
            .unwrap();
        assert_eq!(call.to(), token.address);
    }

    #[test]
    fn test_mint_targets_configured_contract() {
        let nft = Address::repeat_byte(0x0a);
        let relay = Relay::new(config(Some(nft)), Unreachable);
        let call = relay
            .mint_nft(signer(), SAFE)
            .token_id(U256::from(7u8))
            .into_call()
            .unwrap();
        assert_eq!(call.to(), nft);
        assert_eq!(call.value(), U256::ZERO);
    }

    #[test]
    fn test_mint_without_nft_address_is_config_error() {
        let relay = Relay::new(config(None), Unreachable);
        let err = relay.mint_nft(signer(), SAFE).into_call().unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingAddress("nft_address"))
        ));
    }

    #[tokio::test]
    async fn test_invalid_recipient_fails_before_client() {
        let relay = Relay::new(config(None), Unreachable);
        let err = relay.send(signer(), SAFE, "bob", "1").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidAddress(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_submit_is_rejected() {
        let relay = Relay::new(config(None), Unreachable);
        let err = relay.submit(signer(), Vec::new()).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::EmptyOperation)
        ));
    }

    #[tokio::test]
    async fn test_client_failure_is_tagged_with_stage() {
        let relay = Relay::new(config(None), Unreachable);
        let err = relay.send(signer(), SAFE, BOB, "1").await.unwrap_err();
        assert_eq!(err.stage(), Some(OperationStage::Init));
        assert!(!err.may_have_submitted());
    }
}
