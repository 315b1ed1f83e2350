//! Shared request plumbing for the REST operations (token resolution, sending, response mapping).

// crates.io
use reqwest::{RequestBuilder, Response};
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	auth::{SignCredentials, TokenSecret},
	error::TransportError,
	flows::SignClient,
	obs::{self, OperationKind, OperationOutcome, OperationSpan},
	outcome::{ApiFailure, Outcome},
};

/// Media type accepted by the JSON endpoints.
pub const APPLICATION_JSON: &str = "application/json";
/// Media type accepted by the combined-document endpoint.
pub const APPLICATION_PDF: &str = "application/pdf";

/// Resolves the access token (refreshing it if needed) and the credentials for one call.
///
/// The token is resolved first, so a failed refresh aborts the operation before any other work.
pub(crate) async fn authorize(client: &SignClient) -> Result<(SignCredentials, TokenSecret)> {
	let token = client.tokens.access_token().await?;
	let credentials = client.tokens.secrets.credentials().await?;

	Ok((credentials, token))
}

/// Sends a prepared request, classifying transport failures.
pub(crate) async fn send(kind: OperationKind, request: RequestBuilder) -> Result<Response> {
	let response =
		request.send().await.map_err(|err| TransportError::from_reqwest(kind.endpoint(), err))?;

	obs::record_response_status(kind, response.status().as_u16());

	Ok(response)
}

/// Reads a non-2xx response into an [`ApiFailure`].
pub(crate) async fn failure(kind: OperationKind, response: Response) -> Result<ApiFailure> {
	let status = response.status().as_u16();
	let body = read_text(kind, response).await?;

	obs::event!(
		warn,
		operation = kind.as_str(),
		status,
		"Acrobat Sign returned a failure response."
	);

	Ok(ApiFailure { operation: kind, status, body })
}

/// Maps a response from a JSON endpoint into an [`Outcome`].
pub(crate) async fn json_outcome(
	kind: OperationKind,
	response: Response,
) -> Result<Outcome<Value>> {
	if !response.status().is_success() {
		return Ok(Outcome::Failure(failure(kind, response).await?));
	}

	let body = read_text(kind, response).await?;

	Ok(Outcome::Success { body: parse_json(kind, &body)? })
}

/// Parses a success body; an empty body maps to `null`.
pub(crate) fn parse_json(kind: OperationKind, body: &str) -> Result<Value> {
	if body.trim().is_empty() {
		return Ok(Value::Null);
	}

	serde_json::from_str(body).map_err(|source| Error::MalformedBody { operation: kind, source })
}

/// Runs an operation inside its span, recording attempt and outcome metrics.
pub(crate) async fn observe<T, Fut>(
	kind: OperationKind,
	stage: &'static str,
	fut: Fut,
) -> Result<Outcome<T>>
where
	Fut: Future<Output = Result<Outcome<T>>>,
{
	let span = OperationSpan::new(kind, stage);

	obs::record_operation_outcome(kind, OperationOutcome::Attempt);

	let result = span.instrument(fut).await;
	let outcome = match &result {
		Ok(outcome) if outcome.is_success() => OperationOutcome::Success,
		_ => OperationOutcome::Failure,
	};

	obs::record_operation_outcome(kind, outcome);

	result
}

async fn read_text(kind: OperationKind, response: Response) -> Result<String> {
	response.text().await.map_err(|err| TransportError::from_reqwest(kind.endpoint(), err).into())
}
