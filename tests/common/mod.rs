//! Fixtures shared by the integration tests.

#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use httpmock::MockServer;
use time::{Duration, OffsetDateTime, macros};
// self
use acrobat_sign::{
	auth::{CachedToken, SignCredentials},
	clock::{Clock, ManualClock},
	flows::SignClient,
	http::HttpSettings,
	secrets::{SecretsProvider, StaticSecrets},
	store::{CacheKey, CacheValue, MemoryCache, TokenCache},
};

pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";
pub const REFRESH_TOKEN: &str = "refresh-seed";
pub const WEB_ACCESS_POINT: &str = "https://secure.na1.adobesign.com/";
pub const REFRESH_FORM: &str = "refresh_token=refresh-seed&client_id=client-id&client_secret=client-secret&grant_type=refresh_token";

/// Client wired to a mock server, an in-memory cache, and a frozen clock.
pub struct Harness {
	pub client: SignClient,
	pub cache: Arc<MemoryCache>,
	pub clock: Arc<ManualClock>,
}
impl Harness {
	pub fn new(server: &MockServer) -> Self {
		Self::with_settings(server, &HttpSettings::default())
	}

	pub fn with_settings(server: &MockServer, settings: &HttpSettings) -> Self {
		let clock = Arc::new(ManualClock::new(macros::datetime!(2025-11-10 12:00 UTC)));
		let shared_clock: Arc<dyn Clock> = clock.clone();
		let cache = Arc::new(MemoryCache::with_clock(shared_clock.clone()));
		let secrets: Arc<dyn SecretsProvider> = Arc::new(StaticSecrets::new(credentials(server)));
		let client = SignClient::with_settings(secrets, cache.clone(), settings)
			.expect("Client should build with the provided HTTP settings.")
			.with_clock(shared_clock);

		Self { client, cache, clock }
	}

	pub fn now(&self) -> OffsetDateTime {
		self.clock.now()
	}

	/// Seeds an access token that expires `expires_in` from the current clock reading.
	pub async fn seed_token(&self, value: &str, expires_in: Duration) -> CachedToken {
		let token = CachedToken::issued(value, self.now(), expires_in);

		self.cache
			.write(CacheKey::AccessToken, CacheValue::Token(token.clone()), None)
			.await
			.expect("Seeding the access token should succeed.");

		token
	}

	pub async fn cached_token(&self) -> Option<CachedToken> {
		self.cache
			.read(CacheKey::AccessToken)
			.await
			.expect("Reading the access token should succeed.")
			.and_then(|value| value.as_token().cloned())
	}
}

pub fn credentials(server: &MockServer) -> SignCredentials {
	SignCredentials::new(&server.url("/"), CLIENT_ID, CLIENT_SECRET, REFRESH_TOKEN)
		.and_then(|credentials| credentials.with_web_access_point(WEB_ACCESS_POINT))
		.expect("Mock server credentials should be valid.")
}

/// Refresh response body for the given token and lifetime.
pub fn refresh_body(access_token: &str, refresh_token: Option<&str>, expires_in: i64) -> String {
	let mut body = serde_json::json!({
		"access_token": access_token,
		"token_type": "Bearer",
		"expires_in": expires_in,
	});

	if let Some(refresh_token) = refresh_token {
		body["refresh_token"] = refresh_token.into();
	}

	body.to_string()
}
