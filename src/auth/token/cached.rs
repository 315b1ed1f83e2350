//! Cached access token with its absolute expiry.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Access token as stored in the token cache.
///
/// `expires_at` is derived from the refresh response's `expires_in` at write time, so it mirrors
/// the lifetime stated by the issuing server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedToken {
	/// Access token secret; callers must avoid logging it.
	pub value: TokenSecret,
	/// Instant after which the token must not be used.
	#[serde(with = "time::serde::rfc3339")]
	pub expires_at: OffsetDateTime,
}
impl CachedToken {
	/// Creates a token that expires `expires_in` after `issued_at`.
	///
	/// The expiry saturates at the largest representable instant instead of overflowing.
	pub fn issued(
		value: impl Into<TokenSecret>,
		issued_at: OffsetDateTime,
		expires_in: Duration,
	) -> Self {
		Self { value: value.into(), expires_at: issued_at.saturating_add(expires_in) }
	}

	/// Returns `true` while `instant` is strictly before the expiry.
	pub fn is_valid_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at > instant
	}

	/// Remaining lifetime at `instant`, clamped to zero.
	pub fn remaining_at(&self, instant: OffsetDateTime) -> Duration {
		let remaining = self.expires_at - instant;

		if remaining.is_negative() { Duration::ZERO } else { remaining }
	}
}
