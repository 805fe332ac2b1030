//! Input validation and submission for the login and signup screens.
//!
//! Validation only checks for empty or whitespace-only fields. Everything
//! else is the backend's call.

use log::info;

use crate::api::{Backend, SetApiKeyRequest};
use crate::error::ClientError;

/// Login error for an empty user id.
pub const ENTER_USER_ID: &str = "Please enter a user ID";
/// Signup error when either field is empty.
pub const FILL_ALL_FIELDS: &str = "Please fill in all fields";

/// Trimmed user id, or a validation error if nothing is left.
pub fn validate_user_id(raw: &str) -> Result<String, ClientError> {
	let id = raw.trim();
	if id.is_empty() {
		return Err(ClientError::validation(ENTER_USER_ID));
	}
	Ok(id.to_string())
}

/// Contents of the signup form's controlled inputs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SignupForm {
	/// User id as typed.
	pub user_id: String,
	/// API key as typed.
	pub api_key: String,
}

impl SignupForm {
	/// Trimmed request, or a validation error if a field is empty.
	pub fn validate(&self) -> Result<SetApiKeyRequest, ClientError> {
		let (user_id, api_key) = (self.user_id.trim(), self.api_key.trim());
		if user_id.is_empty() || api_key.is_empty() {
			return Err(ClientError::validation(FILL_ALL_FIELDS));
		}
		Ok(SetApiKeyRequest {
			user_id: user_id.to_string(),
			api_key: api_key.to_string(),
		})
	}
}

/// Validate the form and, only if it passes, store the key on the backend.
/// Returns the backend's confirmation message.
pub async fn submit_signup<B: Backend>(backend: &B, form: &SignupForm) -> Result<String, ClientError> {
	let request = form.validate()?;
	let response = backend.set_api_key(&request).await?;
	info!("common-ground: api key stored for {}", request.user_id);
	Ok(response.message)
}
