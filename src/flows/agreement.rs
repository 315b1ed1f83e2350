//! Agreement creation (`POST api/rest/v6/agreements`).

// crates.io
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	flows::{
		SignClient,
		common::{self, APPLICATION_JSON},
	},
	obs::OperationKind,
	outcome::Outcome,
};

/// How the participant signs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignatureType {
	/// Electronic signature.
	Esign,
	/// Handwritten signature on a printed copy.
	Written,
}
impl SignatureType {
	/// Wire value.
	pub const fn as_str(self) -> &'static str {
		match self {
			SignatureType::Esign => "ESIGN",
			SignatureType::Written => "WRITTEN",
		}
	}
}
impl Display for SignatureType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for SignatureType {
	type Err = AgreementFieldError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value {
			"ESIGN" => Ok(SignatureType::Esign),
			"WRITTEN" => Ok(SignatureType::Written),
			other => Err(AgreementFieldError::SignatureType { value: other.to_owned() }),
		}
	}
}

/// State the agreement is created in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgreementState {
	/// Created for further authoring in the web UI.
	Authoring,
	/// Saved as a draft.
	Draft,
	/// Sent out for signature immediately.
	InProcess,
}
impl AgreementState {
	/// Wire value.
	pub const fn as_str(self) -> &'static str {
		match self {
			AgreementState::Authoring => "AUTHORING",
			AgreementState::Draft => "DRAFT",
			AgreementState::InProcess => "IN_PROCESS",
		}
	}
}
impl Display for AgreementState {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for AgreementState {
	type Err = AgreementFieldError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value {
			"AUTHORING" => Ok(AgreementState::Authoring),
			"DRAFT" => Ok(AgreementState::Draft),
			"IN_PROCESS" => Ok(AgreementState::InProcess),
			other => Err(AgreementFieldError::State { value: other.to_owned() }),
		}
	}
}

/// Parsing failures for agreement enums.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum AgreementFieldError {
	/// Unknown signature type.
	#[error("Unknown signature type `{value}`.")]
	SignatureType {
		/// Rejected input.
		value: String,
	},
	/// Unknown agreement state.
	#[error("Unknown agreement state `{value}`.")]
	State {
		/// Rejected input.
		value: String,
	},
}

/// Single-signer agreement built around one transient document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgreementRequest {
	/// Transient document handle returned by the upload call.
	pub transient_document_id: String,
	/// Agreement name shown to participants.
	pub name: String,
	/// Email of the only signer.
	pub participant_email: String,
	/// Signature type.
	pub signature_type: SignatureType,
	/// Initial agreement state.
	pub state: AgreementState,
}
impl AgreementRequest {
	/// Creates a request for one signer.
	pub fn new(
		transient_document_id: impl Into<String>,
		name: impl Into<String>,
		participant_email: impl Into<String>,
		signature_type: SignatureType,
		state: AgreementState,
	) -> Self {
		Self {
			transient_document_id: transient_document_id.into(),
			name: name.into(),
			participant_email: participant_email.into(),
			signature_type,
			state,
		}
	}

	fn payload(&self) -> AgreementPayload<'_> {
		AgreementPayload {
			file_infos: [FileInfo { transient_document_id: &self.transient_document_id }],
			name: &self.name,
			participant_sets_info: [ParticipantSet {
				member_infos: [MemberInfo { email: &self.participant_email }],
				order: 1,
				role: "SIGNER",
			}],
			signature_type: self.signature_type,
			state: self.state,
		}
	}
}
/// Serializes into the agreements endpoint's wire format.
impl Serialize for AgreementRequest {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		self.payload().serialize(serializer)
	}
}

impl SignClient {
	/// Creates an agreement for a previously uploaded transient document.
	pub async fn create_agreement(&self, request: &AgreementRequest) -> Result<Outcome<Value>> {
		const KIND: OperationKind = OperationKind::Agreement;

		common::observe(KIND, "create_agreement", async {
			let (credentials, token) = common::authorize(self).await?;
			let url = credentials.endpoint(["api", "rest", "v6", "agreements"])?;
			let http_request = self
				.tokens
				.http_client
				.post(url)
				.header(AUTHORIZATION, token.bearer())
				.header(ACCEPT, APPLICATION_JSON)
				.header(CONTENT_TYPE, APPLICATION_JSON)
				.json(request);
			let response = common::send(KIND, http_request).await?;

			common::json_outcome(KIND, response).await
		})
		.await
	}
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AgreementPayload<'a> {
	file_infos: [FileInfo<'a>; 1],
	name: &'a str,
	participant_sets_info: [ParticipantSet<'a>; 1],
	signature_type: SignatureType,
	state: AgreementState,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileInfo<'a> {
	transient_document_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ParticipantSet<'a> {
	member_infos: [MemberInfo<'a>; 1],
	order: u32,
	role: &'static str,
}

#[derive(Serialize)]
struct MemberInfo<'a> {
	email: &'a str,
}
