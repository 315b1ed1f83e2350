//! Counters exported through the `metrics` facade.
//!
//! - `acrobat_sign_operation_total{operation, outcome}` counts attempts, successes, and failures.
//! - `acrobat_sign_response_total{operation, status_class}` counts upstream responses by status
//!   class, so rejected refreshes and `Outcome::Failure` answers show up as `4xx`/`5xx`.
//!
//! Without the `metrics` feature every recorder compiles to a no-op.

// self
use crate::obs::{OperationKind, OperationOutcome};

const OPERATION_TOTAL: &str = "acrobat_sign_operation_total";
const RESPONSE_TOTAL: &str = "acrobat_sign_response_total";

/// Records an operation outcome via the global metrics recorder (when enabled).
pub fn record_operation_outcome(kind: OperationKind, outcome: OperationOutcome) {
	increment(OPERATION_TOTAL, [("operation", kind.as_str()), ("outcome", outcome.as_str())]);
}

/// Records the HTTP status an operation received from Acrobat Sign.
pub fn record_response_status(kind: OperationKind, status: u16) {
	increment(
		RESPONSE_TOTAL,
		[("operation", kind.as_str()), ("status_class", status_class(status))],
	);
}

/// Collapses a status code into its `Nxx` label.
pub const fn status_class(status: u16) -> &'static str {
	match status {
		100..=199 => "1xx",
		200..=299 => "2xx",
		300..=399 => "3xx",
		400..=499 => "4xx",
		500..=599 => "5xx",
		_ => "other",
	}
}

#[cfg(feature = "metrics")]
fn increment(name: &'static str, labels: [(&'static str, &'static str); 2]) {
	let labels = labels.map(|(key, value)| metrics::Label::new(key, value));

	metrics::counter!(name, labels.to_vec()).increment(1);
}

#[cfg(not(feature = "metrics"))]
fn increment(_: &'static str, _: [(&'static str, &'static str); 2]) {}
