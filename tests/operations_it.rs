mod common;

// std
use std::path::PathBuf;
// crates.io
use httpmock::prelude::*;
use serde_json::json;
use time::Duration;
// self
use acrobat_sign::{
	error::{AuthError, Error},
	flows::{
		AgreementRequest, AgreementState, SignatureType, transient_document::DOCX_MIME_TYPE,
	},
	obs::OperationKind,
	outcome::Outcome,
};
use common::{Harness, refresh_body};

const BEARER: &str = "Bearer access-live";

async fn live_harness(server: &MockServer) -> Harness {
	let harness = Harness::new(server);

	harness.seed_token("access-live", Duration::hours(1)).await;

	harness
}

fn scratch_file(name: &str) -> PathBuf {
	std::env::temp_dir().join(format!("acrobat-sign-{}-{name}", std::process::id()))
}

#[tokio::test]
async fn transient_document_upload_returns_the_response_body() {
	let server = MockServer::start_async().await;
	let upload = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/rest/v6/transientDocuments")
				.header("authorization", BEARER)
				.header("accept", "application/json");
			then.status(201)
				.header("content-type", "application/json")
				.body("{\"transientDocumentId\":\"abc\"}");
		})
		.await;
	let harness = live_harness(&server).await;
	let path = scratch_file("contract.docx");

	tokio::fs::write(&path, b"docx bytes").await.expect("Scratch document should be writable.");

	let outcome = harness
		.client
		.create_transient_document(&path)
		.await
		.expect("Upload should reach the API.");

	tokio::fs::remove_file(&path).await.expect("Scratch document should be removable.");
	upload.assert_async().await;

	assert_eq!(outcome, Outcome::Success { body: json!({ "transientDocumentId": "abc" }) });
	assert_eq!(
		serde_json::to_value(&outcome).expect("Outcome should serialize."),
		json!({ "success": true, "body": { "transientDocumentId": "abc" } }),
	);
}

#[tokio::test]
async fn transient_document_multipart_always_declares_docx() {
	let server = MockServer::start_async().await;
	let upload = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/rest/v6/transientDocuments")
				.body_includes("name=\"File-Name\"\r\n\r\ncontract.pdf")
				.body_includes("name=\"File\"; filename=\"contract.pdf\"")
				.body_includes(format!("Content-Type: {DOCX_MIME_TYPE}"))
				.body_includes("%PDF-1.7 not a word document");
			then.status(201).body("{\"id\":\"abc\"}");
		})
		.await;
	let harness = live_harness(&server).await;
	let outcome = harness
		.client
		.upload_transient_document("contract.pdf", b"%PDF-1.7 not a word document".to_vec())
		.await
		.expect("Upload should reach the API.");

	upload.assert_async().await;

	assert_eq!(outcome, Outcome::Success { body: json!({ "id": "abc" }) });
}

#[tokio::test]
async fn transient_document_upload_reports_api_failures() {
	let server = MockServer::start_async().await;
	let upload = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/rest/v6/transientDocuments");
			then.status(400).body("{\"code\":\"MISSING_REQUIRED_PARAM\"}");
		})
		.await;
	let harness = live_harness(&server).await;
	let outcome = harness
		.client
		.upload_transient_document("contract.docx", b"docx bytes".to_vec())
		.await
		.expect("A 400 is an outcome, not an error.");

	upload.assert_async().await;

	let failure = outcome.failure().expect("A 400 should produce a failure outcome.");

	assert_eq!(failure.operation, OperationKind::TransientDocument);
	assert_eq!(failure.status, 400);
	assert_eq!(
		outcome.error().as_deref(),
		Some("Failed to create transient document: 400 - {\"code\":\"MISSING_REQUIRED_PARAM\"}"),
	);
	assert_eq!(
		serde_json::to_value(&outcome).expect("Outcome should serialize."),
		json!({
			"success": false,
			"error": "Failed to create transient document: 400 - {\"code\":\"MISSING_REQUIRED_PARAM\"}",
		}),
	);
}

#[tokio::test]
async fn unreadable_documents_fail_before_uploading() {
	let server = MockServer::start_async().await;
	let upload = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/rest/v6/transientDocuments");
			then.status(201).body("{\"transientDocumentId\":\"abc\"}");
		})
		.await;
	let harness = live_harness(&server).await;
	let path = scratch_file("missing.docx");
	let err = harness
		.client
		.create_transient_document(&path)
		.await
		.expect_err("A missing file must be an error.");

	upload.assert_calls_async(0).await;

	let Error::Document { path: reported, .. } = &err else {
		panic!("Expected a document error, got {err:?}.");
	};

	assert_eq!(reported, &path);
}

#[tokio::test]
async fn failed_refresh_aborts_the_operation() {
	let server = MockServer::start_async().await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/v2/refresh");
			then.status(400).body("{\"error\":\"invalid_grant\"}");
		})
		.await;
	let upload = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/rest/v6/transientDocuments");
			then.status(201).body("{\"transientDocumentId\":\"abc\"}");
		})
		.await;
	let harness = Harness::new(&server);
	let err = harness
		.client
		.upload_transient_document("contract.docx", b"docx bytes".to_vec())
		.await
		.expect_err("A rejected refresh must abort the upload.");

	refresh.assert_async().await;
	upload.assert_calls_async(0).await;

	assert!(matches!(err, Error::Auth(AuthError::Rejected { status: 400, .. })));
}

#[tokio::test]
async fn operations_refresh_on_demand_and_share_the_token() {
	let server = MockServer::start_async().await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/v2/refresh");
			then.status(200).body(refresh_body("access-minted", None, 3600));
		})
		.await;
	let upload = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/rest/v6/transientDocuments")
				.header("authorization", "Bearer access-minted");
			then.status(201).body("{\"transientDocumentId\":\"abc\"}");
		})
		.await;
	let harness = Harness::new(&server);

	for _ in 0..2 {
		let outcome = harness
			.client
			.upload_transient_document("contract.docx", b"docx bytes".to_vec())
			.await
			.expect("Upload should succeed after refreshing.");

		assert!(outcome.is_success());
	}

	refresh.assert_calls_async(1).await;
	upload.assert_calls_async(2).await;
}

#[tokio::test]
async fn agreement_posts_the_single_signer_payload() {
	let server = MockServer::start_async().await;
	let agreement = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/rest/v6/agreements")
				.header("authorization", BEARER)
				.header("content-type", "application/json")
				.json_body(json!({
					"fileInfos": [{ "transientDocumentId": "abc" }],
					"name": "Services Agreement",
					"participantSetsInfo": [{
						"memberInfos": [{ "email": "signer@example.com" }],
						"order": 1,
						"role": "SIGNER",
					}],
					"signatureType": "ESIGN",
					"state": "IN_PROCESS",
				}));
			then.status(201).body("{\"id\":\"agreement-1\"}");
		})
		.await;
	let harness = live_harness(&server).await;
	let request = AgreementRequest::new(
		"abc",
		"Services Agreement",
		"signer@example.com",
		SignatureType::Esign,
		AgreementState::InProcess,
	);
	let outcome = harness
		.client
		.create_agreement(&request)
		.await
		.expect("Agreement creation should reach the API.");

	agreement.assert_async().await;

	assert_eq!(outcome.into_body(), Some(json!({ "id": "agreement-1" })));
}

#[tokio::test]
async fn agreement_failures_carry_status_and_body() {
	let server = MockServer::start_async().await;
	let _agreement = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/rest/v6/agreements");
			then.status(403).body("{\"code\":\"PERMISSION_DENIED\"}");
		})
		.await;
	let harness = live_harness(&server).await;
	let request = AgreementRequest::new(
		"abc",
		"Services Agreement",
		"signer@example.com",
		SignatureType::Written,
		AgreementState::Draft,
	);
	let outcome = harness
		.client
		.create_agreement(&request)
		.await
		.expect("A 403 is an outcome, not an error.");

	assert_eq!(
		outcome.error().as_deref(),
		Some("Failed to create agreement: 403 - {\"code\":\"PERMISSION_DENIED\"}"),
	);
}

#[tokio::test]
async fn empty_success_bodies_map_to_null() {
	let server = MockServer::start_async().await;
	let _agreement = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/rest/v6/agreements");
			then.status(204);
		})
		.await;
	let harness = live_harness(&server).await;
	let request = AgreementRequest::new(
		"abc",
		"Services Agreement",
		"signer@example.com",
		SignatureType::Esign,
		AgreementState::Authoring,
	);
	let outcome = harness
		.client
		.create_agreement(&request)
		.await
		.expect("An empty 2xx body should be accepted.");

	assert_eq!(outcome, Outcome::Success { body: serde_json::Value::Null });
}

#[tokio::test]
async fn download_returns_the_exact_bytes() {
	let server = MockServer::start_async().await;
	let pdf: &[u8] = b"%PDF-1.7\n\xff\xfe\x00\x9c";
	let download = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/rest/v6/agreements/agreement-1/combinedDocument")
				.header("authorization", BEARER)
				.header("accept", "application/pdf");
			then.status(200).header("content-type", "application/pdf").body(pdf);
		})
		.await;
	let harness = live_harness(&server).await;
	let outcome = harness
		.client
		.download_contract("agreement-1")
		.await
		.expect("Download should reach the API.");

	download.assert_async().await;

	let document = outcome.into_body().expect("A 200 should carry the document.");

	assert_eq!(document.as_bytes(), pdf);
	assert_eq!(document.content_type(), Some("application/pdf"));
	assert_eq!(document.into_bytes(), pdf.to_vec());
}

#[tokio::test]
async fn download_failures_are_outcomes() {
	let server = MockServer::start_async().await;
	let download = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/rest/v6/agreements/unknown/combinedDocument");
			then.status(404).body("{\"code\":\"INVALID_AGREEMENT_ID\"}");
		})
		.await;
	let harness = live_harness(&server).await;
	let outcome = harness
		.client
		.download_contract("unknown")
		.await
		.expect("A 404 is an outcome, not an error.");

	download.assert_async().await;

	let failure = outcome.failure().expect("A 404 should produce a failure outcome.");

	assert_eq!(failure.operation, OperationKind::Download);
	assert_eq!(failure.status, 404);
	assert_eq!(
		failure.to_string(),
		"Failed to download contract: 404 - {\"code\":\"INVALID_AGREEMENT_ID\"}",
	);
}
