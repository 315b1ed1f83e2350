//! Client-level error types shared across the token manager, the cache, and API operations.
//!
//! Only fatal problems are modeled here. A non-2xx answer from an Acrobat Sign REST endpoint is
//! not an error; it is returned as [`Outcome::Failure`](crate::outcome::Outcome::Failure).

// std
use std::path::PathBuf;
// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Access token could not be obtained.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Token cache failure.
	#[error("{0}")]
	Cache(
		#[from]
		#[source]
		crate::store::CacheError,
	),
	/// Secrets provider failure.
	#[error("{0}")]
	Secrets(
		#[from]
		#[source]
		crate::secrets::SecretsError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeouts).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// A 2xx API response carried a body that is not valid JSON.
	#[error("The {operation} response body is not valid JSON.")]
	MalformedBody {
		/// Operation that received the body.
		operation: crate::obs::OperationKind,
		/// Underlying parsing failure.
		#[source]
		source: serde_json::Error,
	},
	/// Document selected for upload could not be read.
	#[error("Failed to read document {}.", .path.display())]
	Document {
		/// Path handed to the upload call.
		path: PathBuf,
		/// Underlying I/O failure.
		#[source]
		source: std::io::Error,
	},
}

/// Token refresh failures. Any of these aborts the calling operation.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// Refresh endpoint answered with anything other than `200 OK`.
	#[error(
		"Failed to refresh the Adobe Acrobat Sign access token. Response: {status} - {body}"
	)]
	Rejected {
		/// HTTP status code returned by the refresh endpoint.
		status: u16,
		/// Raw response body.
		body: String,
	},
	/// Refresh endpoint answered `200 OK` with a body that is not a token response.
	#[error("Refresh endpoint returned malformed JSON.")]
	MalformedResponse {
		/// Structured parsing failure including the offending field path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Refresh endpoint returned a non-positive `expires_in`.
	#[error("The expires_in value must be positive, got {expires_in}.")]
	NonPositiveExpiresIn {
		/// Value reported by the server.
		expires_in: i64,
	},
	/// Refresh endpoint returned an `expires_in` too large to represent as an instant.
	#[error("The expires_in value {expires_in} exceeds the supported range.")]
	ExpiresInOutOfRange {
		/// Value reported by the server.
		expires_in: i64,
	},
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Access point cannot be parsed as a URL.
	#[error("Access point `{value}` is not a valid URL.")]
	InvalidAccessPoint {
		/// Raw configured value.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Access point is a valid URL but does not end with `/`.
	#[error("Access point `{value}` must end with `/`.")]
	AccessPointMissingTrailingSlash {
		/// Raw configured value.
		value: String,
	},
	/// Access point cannot carry endpoint paths (e.g. `mailto:` or `data:` URLs).
	#[error("Access point `{value}` cannot be used as a base URL.")]
	AccessPointNotABase {
		/// Raw configured value.
		value: String,
	},
	/// Upload part could not be assembled.
	#[error("Multipart upload could not be assembled.")]
	Multipart {
		/// Underlying reqwest failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {endpoint}.")]
	Network {
		/// Endpoint label, e.g. `oauth/v2/refresh`.
		endpoint: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request timed out.
	#[error("Request timed out while calling {endpoint}.")]
	Timeout {
		/// Endpoint label.
		endpoint: &'static str,
		/// Underlying reqwest failure.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Classifies a reqwest failure raised while talking to `endpoint`.
	pub fn from_reqwest(endpoint: &'static str, err: ReqwestError) -> Self {
		if err.is_timeout() {
			Self::Timeout { endpoint, source: Box::new(err) }
		} else {
			Self::Network { endpoint, source: Box::new(err) }
		}
	}
}
