//! Token cache contract and the built-in in-memory implementation.

pub mod memory;

pub use memory::MemoryCache;

// self
use crate::{
	_prelude::*,
	auth::{CachedToken, TokenSecret},
};

/// Boxed future returned by [`TokenCache`] operations.
pub type CacheFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CacheError>> + 'a + Send>>;

/// TTL key-value store the token manager keeps its state in.
///
/// Entries written with a TTL must stop being returned once the TTL elapses. Entries written
/// without one live until overwritten or deleted.
pub trait TokenCache
where
	Self: Send + Sync,
{
	/// Fetches the value stored under `key`, if present and not evicted.
	fn read(&self, key: CacheKey) -> CacheFuture<'_, Option<CacheValue>>;

	/// Stores or replaces the value under `key`.
	fn write(&self, key: CacheKey, value: CacheValue, ttl: Option<Duration>) -> CacheFuture<'_, ()>;

	/// Removes the value under `key`, returning it if it was present.
	fn delete(&self, key: CacheKey) -> CacheFuture<'_, Option<CacheValue>>;
}

/// Fixed cache keys used by the token manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CacheKey {
	/// Current access token plus its expiry.
	AccessToken,
	/// Refresh token returned by the last refresh.
	RefreshToken,
	/// API access point returned by (or assumed for) the last refresh.
	ApiAccessPoint,
	/// Web access point returned by (or assumed for) the last refresh.
	WebAccessPoint,
}
impl CacheKey {
	/// Returns the stable key string shared with external cache backends.
	pub const fn as_str(self) -> &'static str {
		match self {
			CacheKey::AccessToken => "acrobat_sign_access_token",
			CacheKey::RefreshToken => "acrobat_sign_refresh_token",
			CacheKey::ApiAccessPoint => "acrobat_sign_api_access_point",
			CacheKey::WebAccessPoint => "acrobat_sign_web_access_point",
		}
	}
}
impl Display for CacheKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Values stored in the token cache.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CacheValue {
	/// Access token with expiry.
	Token(CachedToken),
	/// Secret string (refresh token).
	Secret(TokenSecret),
	/// Plain string (access points).
	Text(String),
}
impl CacheValue {
	/// Returns the token payload, if this is a [`CacheValue::Token`].
	pub fn as_token(&self) -> Option<&CachedToken> {
		match self {
			Self::Token(token) => Some(token),
			_ => None,
		}
	}

	/// Returns the secret payload, if this is a [`CacheValue::Secret`].
	pub fn as_secret(&self) -> Option<&TokenSecret> {
		match self {
			Self::Secret(secret) => Some(secret),
			_ => None,
		}
	}

	/// Returns the string payload, if this is a [`CacheValue::Text`].
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			_ => None,
		}
	}
}

/// Error type produced by [`TokenCache`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum CacheError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the cache engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
