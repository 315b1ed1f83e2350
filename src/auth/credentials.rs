//! Refresh credentials and access-point handling.

// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Credentials handed out by a [`SecretsProvider`](crate::secrets::SecretsProvider).
///
/// The API access point is the shard-specific base URL (for example
/// `https://api.na1.adobesign.com/`). Every endpoint is resolved relative to it, which is why it
/// must end with `/`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignCredentials {
	/// Base URL for REST and OAuth endpoints.
	pub api_access_point: Url,
	/// Base URL for the Acrobat Sign web UI, if known.
	pub web_access_point: Option<Url>,
	/// OAuth client identifier.
	pub client_id: String,
	/// OAuth client secret.
	pub client_secret: TokenSecret,
	/// Long-lived refresh token used to mint access tokens.
	pub refresh_token: TokenSecret,
}
impl SignCredentials {
	/// Validates `api_access_point` and assembles the credential set.
	pub fn new(
		api_access_point: &str,
		client_id: impl Into<String>,
		client_secret: impl Into<TokenSecret>,
		refresh_token: impl Into<TokenSecret>,
	) -> Result<Self, ConfigError> {
		Ok(Self {
			api_access_point: parse_access_point(api_access_point)?,
			web_access_point: None,
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			refresh_token: refresh_token.into(),
		})
	}

	/// Attaches the web access point.
	pub fn with_web_access_point(mut self, web_access_point: &str) -> Result<Self, ConfigError> {
		self.web_access_point = Some(parse_access_point(web_access_point)?);

		Ok(self)
	}

	/// Resolves an endpoint below the API access point, percent-encoding each segment.
	pub fn endpoint<I, S>(&self, segments: I) -> Result<Url, ConfigError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut url = self.api_access_point.clone();

		url.path_segments_mut()
			.map_err(|_| ConfigError::AccessPointNotABase {
				value: self.api_access_point.to_string(),
			})?
			.pop_if_empty()
			.extend(segments);

		Ok(url)
	}

	/// Access points as they should be cached when the refresh response omits them.
	pub fn access_points(&self) -> AccessPoints {
		AccessPoints {
			api: Some(self.api_access_point.to_string()),
			web: self.web_access_point.as_ref().map(Url::to_string),
		}
	}
}

/// API and web access points as reported by the last refresh.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPoints {
	/// REST API base URL.
	pub api: Option<String>,
	/// Web UI base URL.
	pub web: Option<String>,
}

/// Parses an access point, requiring a base-capable URL that ends with `/`.
pub fn parse_access_point(value: &str) -> Result<Url, ConfigError> {
	let url = Url::parse(value)
		.map_err(|source| ConfigError::InvalidAccessPoint { value: value.to_owned(), source })?;

	if url.cannot_be_a_base() {
		return Err(ConfigError::AccessPointNotABase { value: value.to_owned() });
	}
	if !value.ends_with('/') {
		return Err(ConfigError::AccessPointMissingTrailingSlash { value: value.to_owned() });
	}

	Ok(url)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn credentials(api: &str) -> SignCredentials {
		SignCredentials::new(api, "client", "secret", "refresh")
			.expect("Credential fixture should be valid.")
	}

	#[test]
	fn access_point_requires_trailing_slash() {
		let err = SignCredentials::new("https://api.na1.adobesign.com", "c", "s", "r")
			.expect_err("Access points without a trailing slash should be rejected.");

		assert!(matches!(err, ConfigError::AccessPointMissingTrailingSlash { .. }));

		let err = SignCredentials::new("not a url/", "c", "s", "r")
			.expect_err("Unparseable access points should be rejected.");

		assert!(matches!(err, ConfigError::InvalidAccessPoint { .. }));
	}

	#[test]
	fn endpoints_resolve_below_the_access_point() {
		let creds = credentials("https://api.na1.adobesign.com/");

		assert_eq!(
			creds
				.endpoint(["oauth", "v2", "refresh"])
				.expect("Refresh endpoint should resolve.")
				.as_str(),
			"https://api.na1.adobesign.com/oauth/v2/refresh",
		);

		let nested = credentials("https://proxy.example.com/acrobat/");

		assert_eq!(
			nested
				.endpoint(["api", "rest", "v6", "transientDocuments"])
				.expect("Transient document endpoint should resolve.")
				.as_str(),
			"https://proxy.example.com/acrobat/api/rest/v6/transientDocuments",
		);
	}

	#[test]
	fn endpoint_segments_are_percent_encoded() {
		let creds = credentials("https://api.na1.adobesign.com/");
		let url = creds
			.endpoint(["api", "rest", "v6", "agreements", "CBJ/CHBCAA?x", "combinedDocument"])
			.expect("Download endpoint should resolve.");

		assert_eq!(
			url.as_str(),
			"https://api.na1.adobesign.com/api/rest/v6/agreements/CBJ%2FCHBCAA%3Fx/combinedDocument",
		);
	}

	#[test]
	fn access_points_fall_back_to_configured_values() {
		let creds = credentials("https://api.na1.adobesign.com/")
			.with_web_access_point("https://secure.na1.adobesign.com/")
			.expect("Web access point should be valid.");

		assert_eq!(
			creds.access_points(),
			AccessPoints {
				api: Some("https://api.na1.adobesign.com/".into()),
				web: Some("https://secure.na1.adobesign.com/".into()),
			},
		);
	}
}
