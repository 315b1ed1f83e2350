//! Shared HTTP transport setup.
//!
//! Every request the client issues goes through [`ReqwestHttpClient`], so timeouts and the
//! user agent are configured once via [`HttpSettings`]. Nothing here retries: a failed request is
//! handed back to the caller as-is.

// std
use std::{ops::Deref, time::Duration as StdDuration};
// self
use crate::{_prelude::*, error::ConfigError};

/// Transport configuration applied when the client builds its own [`ReqwestClient`].
///
/// The default sets no timeouts, so large contract downloads are bounded only by reqwest's own
/// defaults. Opt into limits with [`HttpSettings::with_connect_timeout`] and
/// [`HttpSettings::with_timeout`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpSettings {
	/// TCP/TLS connect timeout. `None` keeps reqwest's default.
	pub connect_timeout: Option<StdDuration>,
	/// Total per-request timeout, including reading the body. `None` keeps reqwest's default.
	pub timeout: Option<StdDuration>,
	/// `User-Agent` header value.
	pub user_agent: String,
}
impl HttpSettings {
	/// Overrides the connect timeout.
	pub fn with_connect_timeout(mut self, timeout: StdDuration) -> Self {
		self.connect_timeout = Some(timeout);

		self
	}

	/// Overrides the total request timeout.
	pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Overrides the user agent.
	pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = user_agent.into();

		self
	}
}
impl Default for HttpSettings {
	fn default() -> Self {
		Self {
			connect_timeout: None,
			timeout: None,
			user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).into(),
		}
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client from [`HttpSettings`].
	pub fn from_settings(settings: &HttpSettings) -> Result<Self, ConfigError> {
		let mut builder = ReqwestClient::builder().user_agent(settings.user_agent.as_str());

		if let Some(timeout) = settings.connect_timeout {
			builder = builder.connect_timeout(timeout);
		}
		if let Some(timeout) = settings.timeout {
			builder = builder.timeout(timeout);
		}

		builder.build().map(Self).map_err(ConfigError::http_client_build)
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
