//! Backend access: wire types and the proxy client.

mod client;
mod types;

pub use client::{ApiClient, Backend, Endpoint, GENERIC_SERVER_ERROR, ViewPayload, decode_response};
pub use types::{
	BackendReport, Edge, ErrorBody, GraphData, InterestGroup, InterestsData, MapData, Node,
	NodeKind, Person, Place, SetApiKeyRequest, SetApiKeyResponse, Sharer,
};
