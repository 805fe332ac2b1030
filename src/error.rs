//! Error type shared by the API client, forms, and views.

use thiserror::Error;

/// Everything that can go wrong between a user action and a rendered view.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ClientError {
	/// Input rejected before any request was made.
	#[error("{0}")]
	Validation(String),
	/// The proxy or backend answered with a non-success status.
	#[error("Request failed with status {status}: {message}")]
	Http {
		/// HTTP status code.
		status: u16,
		/// Backend `detail`/`error` text, or a generic message.
		message: String,
	},
	/// The request never completed (connection refused, CORS, aborted body).
	#[error("Network error: {0}")]
	Network(String),
	/// The response body was not the JSON shape we expected.
	#[error("Malformed response: {0}")]
	Decode(String),
	/// The backend answered 200 but reported an error in the payload.
	#[error("{0}")]
	Backend(String),
}

impl ClientError {
	/// Input rejected before any request was made.
	pub fn validation(message: impl Into<String>) -> Self {
		Self::Validation(message.into())
	}

	/// Validation errors are shown inline next to the form; everything else
	/// replaces the view with an error panel.
	pub fn is_validation(&self) -> bool {
		matches!(self, Self::Validation(_))
	}
}

impl From<serde_json::Error> for ClientError {
	fn from(err: serde_json::Error) -> Self {
		Self::Decode(err.to_string())
	}
}

impl From<gloo_net::Error> for ClientError {
	fn from(err: gloo_net::Error) -> Self {
		match err {
			gloo_net::Error::SerdeError(e) => Self::Decode(e.to_string()),
			other => Self::Network(other.to_string()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn http_error_includes_status_and_message() {
		let err = ClientError::Http {
			status: 404,
			message: "User 'bob' not found".into(),
		};
		assert_eq!(
			err.to_string(),
			"Request failed with status 404: User 'bob' not found"
		);
		assert!(!err.is_validation());
	}

	#[test]
	fn validation_displays_bare_message() {
		let err = ClientError::validation("Please fill in all fields");
		assert_eq!(err.to_string(), "Please fill in all fields");
		assert!(err.is_validation());
	}

	#[test]
	fn json_errors_become_decode_errors() {
		let err: ClientError = serde_json::from_str::<u32>("nope").unwrap_err().into();
		assert!(matches!(err, ClientError::Decode(_)));
	}
}
