//! Secrets provider contract plus static and environment-backed implementations.

// self
use crate::{_prelude::*, auth::SignCredentials, error::ConfigError};

/// Boxed future returned by [`SecretsProvider::credentials`].
pub type SecretsFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, SecretsError>> + 'a + Send>>;

/// Source of the OAuth client credentials and the API access point.
///
/// The token manager reads credentials on every refresh, so implementations may return rotated
/// values without restarting the client.
pub trait SecretsProvider
where
	Self: Send + Sync,
{
	/// Loads the current credential set.
	fn credentials(&self) -> SecretsFuture<'_, SignCredentials>;
}

/// Error type produced by [`SecretsProvider`] implementations.
#[derive(Debug, ThisError)]
pub enum SecretsError {
	/// A required value is absent.
	#[error("Secret `{name}` is not configured.")]
	Missing {
		/// Name of the missing value.
		name: String,
	},
	/// A value is present but invalid.
	#[error("Secret `{name}` is invalid.")]
	Invalid {
		/// Name of the invalid value.
		name: String,
		/// Validation failure.
		#[source]
		source: ConfigError,
	},
	/// Backend-level failure for the secrets store.
	#[error("Secrets backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Provider returning a fixed credential set.
#[derive(Clone, Debug)]
pub struct StaticSecrets(SignCredentials);
impl StaticSecrets {
	/// Wraps an already validated credential set.
	pub fn new(credentials: SignCredentials) -> Self {
		Self(credentials)
	}
}
impl SecretsProvider for StaticSecrets {
	fn credentials(&self) -> SecretsFuture<'_, SignCredentials> {
		let credentials = self.0.clone();

		Box::pin(async move { Ok(credentials) })
	}
}

/// Provider that reads `{PREFIX}_API_ACCESS_POINT`, `{PREFIX}_WEB_ACCESS_POINT` (optional),
/// `{PREFIX}_CLIENT_ID`, `{PREFIX}_CLIENT_SECRET`, and `{PREFIX}_REFRESH_TOKEN` on every call.
#[derive(Clone, Debug)]
pub struct EnvSecrets {
	prefix: String,
}
impl EnvSecrets {
	/// Default variable prefix.
	pub const DEFAULT_PREFIX: &'static str = "ACROBAT_SIGN";

	/// Creates a provider using a custom variable prefix.
	pub fn with_prefix(prefix: impl Into<String>) -> Self {
		Self { prefix: prefix.into() }
	}

	/// Resolves credentials through `lookup`, which maps a full variable name to its value.
	pub fn resolve<F>(&self, lookup: F) -> Result<SignCredentials, SecretsError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let read = |suffix: &str| {
			let name = format!("{}_{suffix}", self.prefix);

			(lookup(&name).filter(|value| !value.trim().is_empty()), name)
		};
		let require = |suffix: &str| match read(suffix) {
			(Some(value), _) => Ok(value),
			(None, name) => Err(SecretsError::Missing { name }),
		};
		let api_access_point = require("API_ACCESS_POINT")?;
		let client_id = require("CLIENT_ID")?;
		let client_secret = require("CLIENT_SECRET")?;
		let refresh_token = require("REFRESH_TOKEN")?;
		let mut credentials =
			SignCredentials::new(&api_access_point, client_id, client_secret, refresh_token)
				.map_err(|source| SecretsError::Invalid {
					name: format!("{}_API_ACCESS_POINT", self.prefix),
					source,
				})?;

		if let (Some(web), name) = read("WEB_ACCESS_POINT") {
			credentials = credentials
				.with_web_access_point(&web)
				.map_err(|source| SecretsError::Invalid { name, source })?;
		}

		Ok(credentials)
	}
}
impl Default for EnvSecrets {
	fn default() -> Self {
		Self::with_prefix(Self::DEFAULT_PREFIX)
	}
}
impl SecretsProvider for EnvSecrets {
	fn credentials(&self) -> SecretsFuture<'_, SignCredentials> {
		Box::pin(async move { self.resolve(|name| std::env::var(name).ok()) })
	}
}
