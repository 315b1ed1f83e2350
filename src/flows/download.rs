//! Signed contract downloads (`GET api/rest/v6/agreements/{id}/combinedDocument`).

// crates.io
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
// self
use crate::{
	_prelude::*,
	error::TransportError,
	flows::{
		SignClient,
		common::{self, APPLICATION_PDF},
	},
	obs::OperationKind,
	outcome::{ContractDocument, Outcome},
};

impl SignClient {
	/// Downloads the combined (signed) PDF for `agreement_id`.
	///
	/// On a 2xx response the body is returned byte-for-byte; otherwise the status and body are
	/// returned as [`Outcome::Failure`].
	pub async fn download_contract(&self, agreement_id: &str) -> Result<Outcome<ContractDocument>> {
		const KIND: OperationKind = OperationKind::Download;

		common::observe(KIND, "download_contract", async {
			let (credentials, token) = common::authorize(self).await?;
			let url = credentials.endpoint([
				"api",
				"rest",
				"v6",
				"agreements",
				agreement_id,
				"combinedDocument",
			])?;
			let request = self
				.tokens
				.http_client
				.get(url)
				.header(AUTHORIZATION, token.bearer())
				.header(ACCEPT, APPLICATION_PDF);
			let response = common::send(KIND, request).await?;

			if !response.status().is_success() {
				return Ok(Outcome::Failure(common::failure(KIND, response).await?));
			}

			let content_type = response
				.headers()
				.get(CONTENT_TYPE)
				.and_then(|value| value.to_str().ok())
				.map(str::to_owned);
			let bytes = response
				.bytes()
				.await
				.map_err(|err| TransportError::from_reqwest(KIND.endpoint(), err))?;

			Ok(Outcome::Success { body: ContractDocument::new(bytes.to_vec(), content_type) })
		})
		.await
	}
}
