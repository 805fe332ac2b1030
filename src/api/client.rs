//! HTTP client for the local API proxy.
//!
//! Every call is one-shot: no retries, no timeout, no caching. Callers decide
//! whether to issue it again.

use gloo_net::http::{Request, Response};
use log::debug;
use serde::de::DeserializeOwned;

use super::types::{
	BackendReport, ErrorBody, GraphData, InterestsData, MapData, SetApiKeyRequest,
	SetApiKeyResponse,
};
use crate::error::ClientError;
use crate::session::{FetchRequest, ViewMode};

/// Message used when a failed response carries no usable detail.
pub const GENERIC_SERVER_ERROR: &str = "Internal server error";

/// Proxy endpoints, relative to the configured API base.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
	/// `GET /graph_data`.
	GraphData,
	/// `GET /map_data`.
	MapData,
	/// `GET /interests_list`.
	InterestsList,
	/// `POST /set-api-key`.
	SetApiKey,
}

impl Endpoint {
	/// Path below the API base.
	pub fn path(self) -> &'static str {
		match self {
			Endpoint::GraphData => "/graph_data",
			Endpoint::MapData => "/map_data",
			Endpoint::InterestsList => "/interests_list",
			Endpoint::SetApiKey => "/set-api-key",
		}
	}
}

/// Data for whichever view a [`FetchRequest`] targeted.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewPayload {
	/// Graph view data.
	Graph(GraphData),
	/// Map view data.
	Map(MapData),
	/// List view data.
	List(InterestsData),
}

impl TryFrom<ViewPayload> for GraphData {
	type Error = ClientError;

	fn try_from(payload: ViewPayload) -> Result<Self, Self::Error> {
		match payload {
			ViewPayload::Graph(data) => Ok(data),
			other => Err(mismatch("graph", &other)),
		}
	}
}

impl TryFrom<ViewPayload> for MapData {
	type Error = ClientError;

	fn try_from(payload: ViewPayload) -> Result<Self, Self::Error> {
		match payload {
			ViewPayload::Map(data) => Ok(data),
			other => Err(mismatch("map", &other)),
		}
	}
}

impl TryFrom<ViewPayload> for InterestsData {
	type Error = ClientError;

	fn try_from(payload: ViewPayload) -> Result<Self, Self::Error> {
		match payload {
			ViewPayload::List(data) => Ok(data),
			other => Err(mismatch("interests", &other)),
		}
	}
}

fn mismatch(expected: &str, got: &ViewPayload) -> ClientError {
	let got = match got {
		ViewPayload::Graph(_) => "graph",
		ViewPayload::Map(_) => "map",
		ViewPayload::List(_) => "interests",
	};
	ClientError::Decode(format!("expected {expected} data, got {got} data"))
}

/// Operations the UI needs from the backend.
///
/// Implemented by [`ApiClient`] in the browser and by in-memory fakes in tests.
#[allow(async_fn_in_trait)]
pub trait Backend {
	/// The user's ego network.
	async fn fetch_graph(&self, user_id: &str) -> Result<GraphData, ClientError>;
	/// Places where the user's interests are shared.
	async fn fetch_map(&self, user_id: &str) -> Result<MapData, ClientError>;
	/// The user's interests and who shares them.
	async fn fetch_interests(&self, user_id: &str) -> Result<InterestsData, ClientError>;
	/// Store an API key for a user. Empty fields are rejected without a call.
	async fn set_api_key(
		&self,
		request: &SetApiKeyRequest,
	) -> Result<SetApiKeyResponse, ClientError>;

	/// Fetch the data backing `request.view`.
	async fn fetch_view(&self, request: &FetchRequest) -> Result<ViewPayload, ClientError> {
		match request.view {
			ViewMode::Graph => self.fetch_graph(&request.user_id).await.map(ViewPayload::Graph),
			ViewMode::Map => self.fetch_map(&request.user_id).await.map(ViewPayload::Map),
			ViewMode::List => self
				.fetch_interests(&request.user_id)
				.await
				.map(ViewPayload::List),
		}
	}
}

/// Turn a status code and body into either the decoded payload or an error.
pub fn decode_response<T>(status: u16, body: &str) -> Result<T, ClientError>
where
	T: DeserializeOwned + BackendReport,
{
	if !(200..300).contains(&status) {
		let message = serde_json::from_str::<ErrorBody>(body)
			.ok()
			.and_then(|b| b.message())
			.unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string());
		return Err(ClientError::Http { status, message });
	}
	let payload: T = serde_json::from_str(body)?;
	if let Some(error) = payload.backend_error() {
		return Err(ClientError::Backend(error.to_string()));
	}
	Ok(payload)
}

/// [`Backend`] over `fetch`, talking to the proxy at `base`.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
	base: String,
}

impl ApiClient {
	/// Client for the proxy at `base`; a trailing slash is ignored.
	pub fn new(base: impl Into<String>) -> Self {
		Self {
			base: base.into().trim_end_matches('/').to_string(),
		}
	}

	/// Full URL of `endpoint`.
	pub fn url(&self, endpoint: Endpoint) -> String {
		format!("{}{}", self.base, endpoint.path())
	}

	async fn get_for_user<T>(&self, endpoint: Endpoint, user_id: &str) -> Result<T, ClientError>
	where
		T: DeserializeOwned + BackendReport,
	{
		let url = self.url(endpoint);
		debug!("common-ground: GET {} for {}", url, user_id);
		let response = Request::get(&url)
			.query([("user_id", user_id)])
			.send()
			.await?;
		read(response).await
	}
}

async fn read<T>(response: Response) -> Result<T, ClientError>
where
	T: DeserializeOwned + BackendReport,
{
	let status = response.status();
	let body = response.text().await?;
	decode_response(status, &body)
}

impl Backend for ApiClient {
	async fn fetch_graph(&self, user_id: &str) -> Result<GraphData, ClientError> {
		self.get_for_user(Endpoint::GraphData, user_id).await
	}

	async fn fetch_map(&self, user_id: &str) -> Result<MapData, ClientError> {
		self.get_for_user(Endpoint::MapData, user_id).await
	}

	async fn fetch_interests(&self, user_id: &str) -> Result<InterestsData, ClientError> {
		self.get_for_user(Endpoint::InterestsList, user_id).await
	}

	async fn set_api_key(
		&self,
		request: &SetApiKeyRequest,
	) -> Result<SetApiKeyResponse, ClientError> {
		if request.user_id.trim().is_empty() || request.api_key.trim().is_empty() {
			return Err(ClientError::validation(crate::forms::FILL_ALL_FIELDS));
		}
		let url = self.url(Endpoint::SetApiKey);
		debug!("common-ground: POST {} for {}", url, request.user_id);
		let response = Request::post(&url).json(request)?.send().await?;
		read(response).await
	}
}
