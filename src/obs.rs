//! Optional observability helpers for client operations.
//!
//! # Feature Flags
//!
//! - `tracing` (default) emits structured spans named `acrobat_sign.operation` with the
//!   `operation` and `stage` (call site) fields, plus the crate's log events.
//! - `metrics` increments the `acrobat_sign_operation_total` counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
	/// `POST oauth/v2/refresh`.
	Refresh,
	/// `POST api/rest/v6/transientDocuments`.
	TransientDocument,
	/// `POST api/rest/v6/agreements`.
	Agreement,
	/// `GET api/rest/v6/agreements/{id}/combinedDocument`.
	Download,
}
impl OperationKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationKind::Refresh => "refresh",
			OperationKind::TransientDocument => "transient_document",
			OperationKind::Agreement => "agreement",
			OperationKind::Download => "download",
		}
	}

	/// Relative endpoint path, used in transport error messages.
	pub const fn endpoint(self) -> &'static str {
		match self {
			OperationKind::Refresh => "oauth/v2/refresh",
			OperationKind::TransientDocument => "api/rest/v6/transientDocuments",
			OperationKind::Agreement => "api/rest/v6/agreements",
			OperationKind::Download => "api/rest/v6/agreements/{id}/combinedDocument",
		}
	}

	/// Human-readable action used in failure messages.
	pub const fn action(self) -> &'static str {
		match self {
			OperationKind::Refresh => "refresh the Adobe Acrobat Sign access token",
			OperationKind::TransientDocument => "create transient document",
			OperationKind::Agreement => "create agreement",
			OperationKind::Download => "download contract",
		}
	}
}
impl Display for OperationKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationOutcome {
	/// Entry to an operation.
	Attempt,
	/// 2xx response (or cache hit for token lookups).
	Success,
	/// Non-2xx response or fatal error.
	Failure,
}
impl OperationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationOutcome::Attempt => "attempt",
			OperationOutcome::Success => "success",
			OperationOutcome::Failure => "failure",
		}
	}
}
impl Display for OperationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Emits a `tracing` event when the `tracing` feature is enabled; compiles to nothing otherwise.
macro_rules! event {
	($level:ident, $($arg:tt)+) => {{
		#[cfg(feature = "tracing")]
		{
			::tracing::$level!($($arg)+);
		}
	}};
}
pub(crate) use event;
