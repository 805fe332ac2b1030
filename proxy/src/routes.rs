//! Routes forwarding browser requests to the backend.

use axum::{
	Json, Router,
	body::Bytes,
	extract::{Query, State, rejection::JsonRejection},
	http::{StatusCode, header},
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::AppState;
use crate::error::{INTERNAL_SERVER_ERROR, ProxyError, backend_message};

/// The `/api` routes and `/health`.
pub fn api_routes() -> Router<AppState> {
	Router::new()
		.route("/api/graph_data", get(graph_data))
		.route("/api/map_data", get(map_data))
		.route("/api/interests_list", get(interests_list))
		.route("/api/set-api-key", post(set_api_key))
		.route("/health", get(health))
}

#[derive(Debug, Deserialize)]
struct UserQuery {
	user_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct SetApiKeyBody {
	#[serde(default)]
	user_id: String,
	#[serde(default)]
	api_key: String,
}

async fn graph_data(
	State(state): State<AppState>,
	Query(query): Query<UserQuery>,
) -> Result<Response, ProxyError> {
	forward_get(&state, "/api/graph_data", query, "graph data").await
}

async fn map_data(
	State(state): State<AppState>,
	Query(query): Query<UserQuery>,
) -> Result<Response, ProxyError> {
	forward_get(&state, "/api/map_data", query, "map data").await
}

async fn interests_list(
	State(state): State<AppState>,
	Query(query): Query<UserQuery>,
) -> Result<Response, ProxyError> {
	forward_get(&state, "/api/interests_list", query, "interests").await
}

#[inline]
async fn health() -> &'static str {
	"ok"
}

fn json_response(status: StatusCode, body: Bytes) -> Response {
	(status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn forward_get(
	state: &AppState,
	path: &str,
	query: UserQuery,
	what: &'static str,
) -> Result<Response, ProxyError> {
	let url = state.backend_url(path);
	debug!(%url, user_id = ?query.user_id, "forwarding");
	let mut request = state.client.get(&url);
	if let Some(user_id) = &query.user_id {
		request = request.query(&[("user_id", user_id)]);
	}
	let response = request
		.send()
		.await
		.map_err(|source| ProxyError::Unreachable { what, source })?;
	let status = response.status();
	let body = response
		.bytes()
		.await
		.map_err(|source| ProxyError::Unreachable { what, source })?;

	if status.is_success() {
		return Ok(json_response(status, body));
	}
	Err(ProxyError::Fetch {
		status,
		message: backend_message(&body).unwrap_or_else(|| format!("Failed to fetch {what}")),
	})
}

async fn set_api_key(
	State(state): State<AppState>,
	payload: Result<Json<SetApiKeyBody>, JsonRejection>,
) -> Result<Response, ProxyError> {
	let Json(body) = payload.map_err(|_| ProxyError::MissingFields)?;
	if body.user_id.trim().is_empty() || body.api_key.trim().is_empty() {
		return Err(ProxyError::MissingFields);
	}

	let url = state.backend_url("/set_api_key");
	let response = state
		.client
		.post(&url)
		.json(&body)
		.send()
		.await
		.map_err(ProxyError::SetApiKeyTransport)?;
	let status = response.status();
	let bytes = response
		.bytes()
		.await
		.map_err(ProxyError::SetApiKeyTransport)?;

	if status.is_success() {
		info!(user_id = %body.user_id, "api key stored");
		return Ok(json_response(status, bytes));
	}
	Err(ProxyError::SetApiKey {
		status,
		message: backend_message(&bytes).unwrap_or_else(|| INTERNAL_SERVER_ERROR.to_string()),
	})
}
