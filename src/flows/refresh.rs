//! Access-token lookup and refresh.
//!
//! [`TokenManager::access_token`] returns the cached access token while it is unexpired and
//! otherwise performs a `grant_type=refresh_token` call against `oauth/v2/refresh`. A successful
//! refresh overwrites the cached token (TTL = `expires_in`) and best-effort caches the rotated
//! refresh token and the access points. A rejected refresh leaves the cache untouched.
//!
//! There is no singleflight guard: callers racing on an expired token may each refresh, and the
//! last write wins.

mod metrics;

pub use metrics::RefreshMetrics;

// crates.io
use reqwest::{StatusCode, header::ACCEPT};
use serde::{Deserializer, de::Error as _};
// self
use crate::{
	_prelude::*,
	auth::{AccessPoints, CachedToken, TokenSecret},
	clock::{Clock, SystemClock},
	error::{AuthError, TransportError},
	flows::common::APPLICATION_JSON,
	http::ReqwestHttpClient,
	obs::{self, OperationKind, OperationOutcome, OperationSpan},
	secrets::SecretsProvider,
	store::{CacheKey, CacheValue, TokenCache},
};

/// Owns the token cache and mints access tokens on demand.
#[derive(Clone)]
pub struct TokenManager {
	/// HTTP client used for refresh calls.
	pub http_client: ReqwestHttpClient,
	/// Cache holding the access token and auxiliary refresh state.
	pub cache: Arc<dyn TokenCache>,
	/// Source of client credentials and the API access point.
	pub secrets: Arc<dyn SecretsProvider>,
	/// Clock used for expiry checks and expiry stamps.
	pub clock: Arc<dyn Clock>,
	/// Shared counters for cache hits and refresh outcomes.
	pub metrics: Arc<RefreshMetrics>,
}
impl TokenManager {
	/// Creates a manager using the system clock.
	pub fn new(
		secrets: Arc<dyn SecretsProvider>,
		cache: Arc<dyn TokenCache>,
		http_client: ReqwestHttpClient,
	) -> Self {
		Self {
			http_client,
			cache,
			secrets,
			clock: Arc::new(SystemClock),
			metrics: Default::default(),
		}
	}

	/// Replaces the clock.
	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = clock;

		self
	}

	/// Returns a valid access token, refreshing it when the cached one is missing or expired.
	pub async fn access_token(&self) -> Result<TokenSecret> {
		let span = OperationSpan::new(OperationKind::Refresh, "access_token");

		span.instrument(async move {
			let now = self.clock.now();

			if let Some(token) = self.cached_token(now).await? {
				self.metrics.record_cache_hit();
				obs::event!(
					debug,
					remaining_secs = token.remaining_at(now).whole_seconds(),
					"Reusing cached access token."
				);

				return Ok(token.value);
			}

			obs::event!(debug, "Cached access token is missing or expired; refreshing.");

			self.refresh().await.map(|token| token.value)
		})
		.await
	}

	/// Unconditionally exchanges the refresh token for a new access token and caches it.
	pub async fn refresh(&self) -> Result<CachedToken> {
		const KIND: OperationKind = OperationKind::Refresh;

		let span = OperationSpan::new(KIND, "refresh");

		obs::record_operation_outcome(KIND, OperationOutcome::Attempt);
		self.metrics.record_attempt();

		let result = span.instrument(self.refresh_and_cache()).await;

		match &result {
			Ok(_) => {
				self.metrics.record_success();
				obs::record_operation_outcome(KIND, OperationOutcome::Success);
			},
			Err(_) => {
				self.metrics.record_failure();
				obs::record_operation_outcome(KIND, OperationOutcome::Failure);
			},
		}

		result
	}

	/// Cache-hit and refresh counters.
	pub fn metrics(&self) -> &RefreshMetrics {
		&self.metrics
	}

	/// Access points cached by the last successful refresh.
	pub async fn cached_access_points(&self) -> Result<AccessPoints> {
		let api = self.cache.read(CacheKey::ApiAccessPoint).await?;
		let web = self.cache.read(CacheKey::WebAccessPoint).await?;

		Ok(AccessPoints {
			api: api.as_ref().and_then(CacheValue::as_text).map(str::to_owned),
			web: web.as_ref().and_then(CacheValue::as_text).map(str::to_owned),
		})
	}

	/// Refresh token cached by the last refresh that returned one.
	pub async fn cached_refresh_token(&self) -> Result<Option<TokenSecret>> {
		let value = self.cache.read(CacheKey::RefreshToken).await?;

		Ok(value.as_ref().and_then(CacheValue::as_secret).cloned())
	}

	async fn cached_token(&self, now: OffsetDateTime) -> Result<Option<CachedToken>> {
		let value = self.cache.read(CacheKey::AccessToken).await?;

		Ok(value
			.as_ref()
			.and_then(CacheValue::as_token)
			.filter(|token| token.is_valid_at(now))
			.cloned())
	}

	async fn refresh_and_cache(&self) -> Result<CachedToken> {
		let credentials = self.secrets.credentials().await?;
		let url = credentials.endpoint(["oauth", "v2", "refresh"])?;
		let form = RefreshForm {
			refresh_token: credentials.refresh_token.expose(),
			client_id: &credentials.client_id,
			client_secret: credentials.client_secret.expose(),
			grant_type: "refresh_token",
		};
		let response = self
			.http_client
			.post(url)
			.header(ACCEPT, APPLICATION_JSON)
			.form(&form)
			.send()
			.await
			.map_err(|err| TransportError::from_reqwest(OperationKind::Refresh.endpoint(), err))?;
		let status = response.status();

		obs::record_response_status(OperationKind::Refresh, status.as_u16());

		let body = response
			.text()
			.await
			.map_err(|err| TransportError::from_reqwest(OperationKind::Refresh.endpoint(), err))?;

		if status != StatusCode::OK {
			obs::event!(
				error,
				status = status.as_u16(),
				body = %body,
				"Error refreshing token."
			);

			return Err(AuthError::Rejected { status: status.as_u16(), body }.into());
		}

		let payload = RefreshResponse::parse(&body)?;

		if payload.expires_in <= 0 {
			return Err(AuthError::NonPositiveExpiresIn { expires_in: payload.expires_in }.into());
		}

		let expires_in = Duration::seconds(payload.expires_in);
		let expires_at = self
			.clock
			.now()
			.checked_add(expires_in)
			.ok_or(AuthError::ExpiresInOutOfRange { expires_in: payload.expires_in })?;
		let token = CachedToken { value: payload.access_token, expires_at };

		self.cache
			.write(CacheKey::AccessToken, CacheValue::Token(token.clone()), Some(expires_in))
			.await?;

		let fallback = credentials.access_points();

		if let Some(refresh_token) = payload.refresh_token {
			self.write_best_effort(CacheKey::RefreshToken, CacheValue::Secret(refresh_token))
				.await;
		}
		if let Some(api) = payload.api_access_point.or(fallback.api) {
			self.write_best_effort(CacheKey::ApiAccessPoint, CacheValue::Text(api)).await;
		}
		if let Some(web) = payload.web_access_point.or(fallback.web) {
			self.write_best_effort(CacheKey::WebAccessPoint, CacheValue::Text(web)).await;
		}

		obs::event!(info, expires_in = payload.expires_in, "Refreshed Acrobat Sign access token.");

		Ok(token)
	}

	#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
	async fn write_best_effort(&self, key: CacheKey, value: CacheValue) {
		if let Err(err) = self.cache.write(key, value, None).await {
			obs::event!(
				warn,
				key = key.as_str(),
				error = %err,
				"Failed to cache auxiliary refresh value."
			);
		}
	}
}
impl Debug for TokenManager {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenManager")
			.field("clock", &self.clock)
			.field("metrics", &self.metrics)
			.finish()
	}
}

#[derive(Serialize)]
struct RefreshForm<'a> {
	refresh_token: &'a str,
	client_id: &'a str,
	client_secret: &'a str,
	grant_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
	access_token: TokenSecret,
	#[serde(default)]
	refresh_token: Option<TokenSecret>,
	#[serde(deserialize_with = "seconds")]
	expires_in: i64,
	#[serde(default)]
	api_access_point: Option<String>,
	#[serde(default)]
	web_access_point: Option<String>,
}
impl RefreshResponse {
	fn parse(body: &str) -> Result<Self, AuthError> {
		let mut de = serde_json::Deserializer::from_str(body);

		serde_path_to_error::deserialize(&mut de)
			.map_err(|source| AuthError::MalformedResponse { source })
	}
}

/// Accepts `expires_in` either as a JSON integer or as a numeric string.
fn seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Raw {
		Int(i64),
		Text(String),
	}

	match Raw::deserialize(deserializer)? {
		Raw::Int(value) => Ok(value),
		Raw::Text(value) => value.trim().parse().map_err(D::Error::custom),
	}
}
