//! Transient document uploads (`POST api/rest/v6/transientDocuments`).

// std
use std::path::Path;
// crates.io
use reqwest::{
	header::{ACCEPT, AUTHORIZATION},
	multipart::{Form, Part},
};
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	auth::{SignCredentials, TokenSecret},
	error::ConfigError,
	flows::{
		SignClient,
		common::{self, APPLICATION_JSON},
	},
	obs::OperationKind,
	outcome::Outcome,
};

/// MIME type attached to every uploaded file.
///
/// The upload always declares a Word document, whatever the file actually contains.
pub const DOCX_MIME_TYPE: &str =
	"application/vnd.openxmlformats-officedocument.wordprocessingml.document";

impl SignClient {
	/// Uploads the file at `file_path` and returns the transient document response.
	///
	/// The multipart body carries the base filename in `File-Name` and the content in `File`.
	/// A failed token refresh or an unreadable file is an `Err`; a non-2xx API response is
	/// [`Outcome::Failure`].
	pub async fn create_transient_document(
		&self,
		file_path: impl AsRef<Path>,
	) -> Result<Outcome<Value>> {
		let path = file_path.as_ref();
		let file_name = path
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_else(|| path.to_string_lossy().into_owned());

		common::observe(OperationKind::TransientDocument, "create_transient_document", async {
			let (credentials, token) = common::authorize(self).await?;
			let content = tokio::fs::read(path)
				.await
				.map_err(|source| Error::Document { path: path.to_path_buf(), source })?;

			self.send_transient_document(&credentials, &token, file_name, content).await
		})
		.await
	}

	/// Uploads in-memory document bytes under `file_name`.
	pub async fn upload_transient_document(
		&self,
		file_name: impl Into<String>,
		content: impl Into<Vec<u8>>,
	) -> Result<Outcome<Value>> {
		let file_name = file_name.into();
		let content = content.into();

		common::observe(OperationKind::TransientDocument, "upload_transient_document", async {
			let (credentials, token) = common::authorize(self).await?;

			self.send_transient_document(&credentials, &token, file_name, content).await
		})
		.await
	}

	async fn send_transient_document(
		&self,
		credentials: &SignCredentials,
		token: &TokenSecret,
		file_name: String,
		content: Vec<u8>,
	) -> Result<Outcome<Value>> {
		const KIND: OperationKind = OperationKind::TransientDocument;

		let url = credentials.endpoint(["api", "rest", "v6", "transientDocuments"])?;
		let form = transient_document_form(file_name, content)?;
		let request = self
			.tokens
			.http_client
			.post(url)
			.header(AUTHORIZATION, token.bearer())
			.header(ACCEPT, APPLICATION_JSON)
			.multipart(form);
		let response = common::send(KIND, request).await?;

		common::json_outcome(KIND, response).await
	}
}

fn transient_document_form(file_name: String, content: Vec<u8>) -> Result<Form, ConfigError> {
	let part = Part::bytes(content)
		.file_name(file_name.clone())
		.mime_str(DOCX_MIME_TYPE)
		.map_err(|err| ConfigError::Multipart { source: Box::new(err) })?;

	Ok(Form::new().text("File-Name", file_name).part("File", part))
}

