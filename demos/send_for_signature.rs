//! Walks through the full signing round trip against a local mock of the Acrobat Sign API:
//! refresh an access token, upload a transient document, create an agreement for one signer,
//! and download the combined PDF.

// std
use std::{collections::HashMap, sync::Arc};
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use acrobat_sign::{
	flows::{AgreementRequest, AgreementState, SignClient, SignatureType},
	secrets::{EnvSecrets, SecretsProvider, StaticSecrets},
	store::{MemoryCache, TokenCache},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let refresh_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/v2/refresh");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"Bearer\",\"expires_in\":3600}",
			);
		})
		.await;
	let upload_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/rest/v6/transientDocuments")
				.header("authorization", "Bearer demo-access");
			then.status(201)
				.header("content-type", "application/json")
				.body("{\"transientDocumentId\":\"demo-transient\"}");
		})
		.await;
	let agreement_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/rest/v6/agreements");
			then.status(201)
				.header("content-type", "application/json")
				.body("{\"id\":\"demo-agreement\"}");
		})
		.await;
	let download_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/rest/v6/agreements/demo-agreement/combinedDocument");
			then.status(200).header("content-type", "application/pdf").body(b"%PDF-1.7\n%demo\n");
		})
		.await;
	// Same variables a deployment would export, resolved from a map instead of the process env.
	let vars = HashMap::from([
		("ACROBAT_SIGN_API_ACCESS_POINT".to_owned(), server.url("/")),
		("ACROBAT_SIGN_CLIENT_ID".to_owned(), "demo-client".to_owned()),
		("ACROBAT_SIGN_CLIENT_SECRET".to_owned(), "demo-secret".to_owned()),
		("ACROBAT_SIGN_REFRESH_TOKEN".to_owned(), "demo-refresh".to_owned()),
	]);
	let credentials = EnvSecrets::default().resolve(|name| vars.get(name).cloned())?;
	let secrets: Arc<dyn SecretsProvider> = Arc::new(StaticSecrets::new(credentials));
	let cache: Arc<dyn TokenCache> = Arc::new(MemoryCache::default());
	let client = SignClient::new(secrets, cache)?;
	let transient = client
		.upload_transient_document("services.docx", b"demo document".to_vec())
		.await?
		.into_result()?;
	let transient_id = transient["transientDocumentId"].as_str().unwrap_or_default();

	println!("Uploaded transient document: {transient_id}");

	let request = AgreementRequest::new(
		transient_id,
		"Services Agreement",
		"signer@example.com",
		SignatureType::Esign,
		AgreementState::InProcess,
	);
	let agreement = client.create_agreement(&request).await?;

	println!("Agreement outcome: {}", serde_json::to_string(&agreement)?);

	let agreement_id = agreement.into_result()?["id"].as_str().unwrap_or_default().to_owned();
	let document = client.download_contract(&agreement_id).await?.into_result()?;

	println!(
		"Downloaded {} bytes ({}).",
		document.len(),
		document.content_type().unwrap_or("unknown content type")
	);

	refresh_mock.assert_calls_async(1).await;
	upload_mock.assert_async().await;
	agreement_mock.assert_async().await;
	download_mock.assert_async().await;

	Ok(())
}
