//! Async Adobe Acrobat Sign client: refresh-token auth backed by an injectable TTL token cache,
//! transient document uploads, single-signer agreements, and signed contract downloads.
//!
//! The crate is organized around two handles:
//!
//! - [`flows::TokenManager`] owns the token cache, the secrets provider, and the clock. It hands
//!   out a valid access token, refreshing it through `oauth/v2/refresh` only when the cached one
//!   is missing or expired.
//! - [`flows::SignClient`] wraps a token manager and exposes the REST operations. Non-2xx API
//!   responses come back as [`outcome::Outcome::Failure`]; only fatal problems (token refresh,
//!   transport, configuration) surface as [`error::Error`].

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod clock;
pub mod error;
pub mod flows;
pub mod http;
pub mod obs;
pub mod outcome;
pub mod secrets;
pub mod store;

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
