//! Token management and the Acrobat Sign REST operations.

pub mod agreement;
pub mod common;
pub mod download;
pub mod refresh;
pub mod transient_document;

pub use agreement::*;
pub use refresh::*;

// self
use crate::{
	_prelude::*,
	clock::Clock,
	error::ConfigError,
	http::{HttpSettings, ReqwestHttpClient},
	secrets::SecretsProvider,
	store::TokenCache,
};

/// Client for the Acrobat Sign REST API.
///
/// Every operation resolves an access token through the embedded [`TokenManager`], issues one
/// request against the API access point, and maps the response into an
/// [`Outcome`](crate::outcome::Outcome). Cloning is cheap; clones share the transport, cache,
/// secrets provider, and clock.
#[derive(Clone, Debug)]
pub struct SignClient {
	/// Token manager that owns the cache and refresh flow.
	pub tokens: TokenManager,
}
impl SignClient {
	/// Creates a client with a reqwest transport built from [`HttpSettings::default`].
	pub fn new(
		secrets: Arc<dyn SecretsProvider>,
		cache: Arc<dyn TokenCache>,
	) -> Result<Self, ConfigError> {
		Self::with_settings(secrets, cache, &HttpSettings::default())
	}

	/// Creates a client whose transport honors the provided timeouts and user agent.
	pub fn with_settings(
		secrets: Arc<dyn SecretsProvider>,
		cache: Arc<dyn TokenCache>,
		settings: &HttpSettings,
	) -> Result<Self, ConfigError> {
		let http_client = ReqwestHttpClient::from_settings(settings)?;

		Ok(Self::with_http_client(secrets, cache, http_client))
	}

	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(
		secrets: Arc<dyn SecretsProvider>,
		cache: Arc<dyn TokenCache>,
		http_client: ReqwestHttpClient,
	) -> Self {
		Self { tokens: TokenManager::new(secrets, cache, http_client) }
	}

	/// Replaces the clock used for token expiry checks.
	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.tokens = self.tokens.with_clock(clock);

		self
	}

	/// Convenience passthrough to [`TokenManager::access_token`].
	pub async fn access_token(&self) -> Result<crate::auth::TokenSecret> {
		self.tokens.access_token().await
	}
}
