//! Tagged results returned by the REST operations.

// std
use std::io::Cursor;
// crates.io
use serde::ser::{SerializeStruct, Serializer};
// self
use crate::{_prelude::*, obs::OperationKind};

/// Result of a REST call that reached the API.
///
/// A non-2xx response is an expected outcome rather than an error, so it is carried in
/// [`Outcome::Failure`] for the caller to branch on. Serializes as
/// `{"success":true,"body":...}` or `{"success":false,"error":"..."}`.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome<T> {
	/// 2xx response.
	Success {
		/// Decoded response body.
		body: T,
	},
	/// Non-2xx response.
	Failure(ApiFailure),
}
impl<T> Outcome<T> {
	/// Returns `true` for [`Outcome::Success`].
	pub fn is_success(&self) -> bool {
		matches!(self, Self::Success { .. })
	}

	/// Borrows the success body.
	pub fn body(&self) -> Option<&T> {
		match self {
			Self::Success { body } => Some(body),
			Self::Failure(_) => None,
		}
	}

	/// Consumes the outcome, returning the success body.
	pub fn into_body(self) -> Option<T> {
		match self {
			Self::Success { body } => Some(body),
			Self::Failure(_) => None,
		}
	}

	/// Borrows the failure details.
	pub fn failure(&self) -> Option<&ApiFailure> {
		match self {
			Self::Success { .. } => None,
			Self::Failure(failure) => Some(failure),
		}
	}

	/// Rendered failure message, e.g. `Failed to create agreement: 400 - {...}`.
	pub fn error(&self) -> Option<String> {
		self.failure().map(ToString::to_string)
	}

	/// Maps the success body.
	pub fn map<U, F>(self, f: F) -> Outcome<U>
	where
		F: FnOnce(T) -> U,
	{
		match self {
			Self::Success { body } => Outcome::Success { body: f(body) },
			Self::Failure(failure) => Outcome::Failure(failure),
		}
	}

	/// Converts into a standard [`Result`](std::result::Result).
	pub fn into_result(self) -> std::result::Result<T, ApiFailure> {
		match self {
			Self::Success { body } => Ok(body),
			Self::Failure(failure) => Err(failure),
		}
	}
}
impl<T> Serialize for Outcome<T>
where
	T: Serialize,
{
	fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut state = serializer.serialize_struct("Outcome", 2)?;

		match self {
			Self::Success { body } => {
				state.serialize_field("success", &true)?;
				state.serialize_field("body", body)?;
			},
			Self::Failure(failure) => {
				state.serialize_field("success", &false)?;
				state.serialize_field("error", &failure.to_string())?;
			},
		}

		state.end()
	}
}

/// Non-2xx response details.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Failed to {}: {status} - {body}", .operation.action())]
pub struct ApiFailure {
	/// Operation that produced the response.
	pub operation: OperationKind,
	/// HTTP status code.
	pub status: u16,
	/// Raw response body.
	pub body: String,
}

/// Signed document returned by the combined-document endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct ContractDocument {
	bytes: Vec<u8>,
	content_type: Option<String>,
}
impl ContractDocument {
	/// Wraps downloaded bytes.
	pub fn new(bytes: Vec<u8>, content_type: Option<String>) -> Self {
		Self { bytes, content_type }
	}

	/// Raw document bytes, identical to the upstream response body.
	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// `Content-Type` reported by the API, usually `application/pdf`.
	pub fn content_type(&self) -> Option<&str> {
		self.content_type.as_deref()
	}

	/// Document size in bytes.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Returns `true` for an empty body.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Seekable reader over the document.
	pub fn into_reader(self) -> Cursor<Vec<u8>> {
		Cursor::new(self.bytes)
	}

	/// Consumes the document, returning its bytes.
	pub fn into_bytes(self) -> Vec<u8> {
		self.bytes
	}
}
impl Debug for ContractDocument {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ContractDocument")
			.field("len", &self.bytes.len())
			.field("content_type", &self.content_type)
			.finish()
	}
}
