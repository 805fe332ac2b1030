//! Failures the proxy reports to the browser.
//!
//! Data routes answer `{"error": ...}`; the API key route answers
//! `{"detail": ...}` like the backend does.

use axum::{
	Json,
	http::StatusCode,
	response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::warn;

/// Message for API key failures that carry no usable detail.
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";
/// Answer to a signup body without both fields.
pub const MISSING_FIELDS: &str = "user_id and api_key are required";

/// Every way a proxied request can fail.
#[derive(Debug, Error)]
pub enum ProxyError {
	/// The backend answered a data request with a non-success status.
	#[error("{message}")]
	Fetch {
		/// Status mirrored to the browser.
		status: StatusCode,
		/// Backend message, or a generic one naming the data.
		message: String,
	},
	/// The backend could not be reached for a data request.
	#[error("Failed to fetch {what}: {source}")]
	Unreachable {
		/// The data that was asked for.
		what: &'static str,
		/// Transport error.
		#[source]
		source: reqwest::Error,
	},
	/// A signup body lacked a user id or key.
	#[error("user_id and api_key are required")]
	MissingFields,
	/// The backend rejected an API key.
	#[error("{message}")]
	SetApiKey {
		/// Status mirrored to the browser.
		status: StatusCode,
		/// Backend `detail`, or the generic message.
		message: String,
	},
	/// Transport failure while storing an API key.
	#[error("Failed to set API key: {0}")]
	SetApiKeyTransport(#[source] reqwest::Error),
}

impl IntoResponse for ProxyError {
	fn into_response(self) -> Response {
		warn!(error = %self, "request failed");
		let (status, body) = match &self {
			ProxyError::Fetch { status, message } => (*status, json!({ "error": message })),
			ProxyError::Unreachable { .. } => {
				(StatusCode::BAD_GATEWAY, json!({ "error": self.to_string() }))
			}
			ProxyError::MissingFields => (StatusCode::BAD_REQUEST, json!({ "detail": MISSING_FIELDS })),
			ProxyError::SetApiKey { status, message } => (*status, json!({ "detail": message })),
			ProxyError::SetApiKeyTransport(_) => (
				StatusCode::INTERNAL_SERVER_ERROR,
				json!({ "detail": INTERNAL_SERVER_ERROR }),
			),
		};
		(status, Json(body)).into_response()
	}
}

/// Human-readable message from a backend error body: FastAPI's `detail`
/// first, then an `error` field. Structured details are passed on as JSON
/// text.
pub fn backend_message(body: &[u8]) -> Option<String> {
	let value: Value = serde_json::from_slice(body).ok()?;
	let pick = |key: &str| match value.get(key)? {
		Value::String(s) if !s.is_empty() => Some(s.clone()),
		Value::Null => None,
		Value::String(_) => None,
		other => Some(other.to_string()),
	};
	pick("detail").or_else(|| pick("error"))
}
