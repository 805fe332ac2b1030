//! Wire types returned by the backend, shared by all views.

use serde::{Deserialize, Serialize};

/// Kind of a node in the interest graph.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	/// A user.
	Person,
	/// An interest.
	Interest,
	/// A location.
	Place,
	/// The backend tags nodes it cannot classify as "unknown".
	#[serde(other)]
	Unknown,
}

/// A node of the user's ego network.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Node {
	/// Unique id; the user id for people.
	pub id: String,
	/// Display label.
	#[serde(default)]
	pub label: String,
	/// Backend classification, sent as `type`.
	#[serde(rename = "type")]
	pub kind: NodeKind,
	/// Set for people.
	#[serde(default)]
	pub phone_number: Option<String>,
}

/// A link between two node ids.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Edge {
	/// One endpoint.
	pub source: String,
	/// The other endpoint.
	pub target: String,
}

/// The user's ego network: their interests and the people sharing them.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct GraphData {
	/// Every node, the user included.
	#[serde(default)]
	pub nodes: Vec<Node>,
	/// Links between `nodes`; endpoints may be missing.
	#[serde(default)]
	pub edges: Vec<Edge>,
	/// Set instead of data when the backend could not answer.
	#[serde(default)]
	pub error: Option<String>,
}

/// Someone at a place.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Person {
	/// Contact number.
	pub phone_number: String,
	/// Interests they share with the user.
	#[serde(default)]
	pub shared_interests: Vec<String>,
}

/// A location with the people around it who share interests with the user.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Place {
	/// Degrees north.
	pub latitude: f64,
	/// Degrees east.
	pub longitude: f64,
	/// Number of people reported at the place.
	pub people_count: u32,
	/// The people themselves.
	#[serde(default)]
	pub people: Vec<Person>,
}

impl Place {
	/// Whether `people_count` matches the people list.
	pub fn is_consistent(&self) -> bool {
		self.people_count as usize == self.people.len()
	}
}

/// Places where the user's interests are shared.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct MapData {
	/// Every place with at least one person.
	#[serde(default)]
	pub places: Vec<Place>,
	/// Set instead of data when the backend could not answer.
	#[serde(default)]
	pub error: Option<String>,
}

/// Someone sharing an interest.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Sharer {
	/// Contact number.
	pub phone_number: String,
}

/// One of the user's interests and who shares it.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct InterestGroup {
	/// Name of the interest.
	pub interest: String,
	/// Number of people reported as sharing it.
	pub count: u32,
	/// The people themselves.
	#[serde(default)]
	pub people_sharing: Vec<Sharer>,
}

impl InterestGroup {
	/// Whether `count` matches the sharer list.
	pub fn is_consistent(&self) -> bool {
		self.count as usize == self.people_sharing.len()
	}
}

/// The user's interests, in backend order.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct InterestsData {
	/// One group per interest.
	#[serde(default)]
	pub interests: Vec<InterestGroup>,
	/// Set instead of data when the backend could not answer.
	#[serde(default)]
	pub error: Option<String>,
}

/// Body of the signup call.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SetApiKeyRequest {
	/// Account to store the key for.
	pub user_id: String,
	/// Key to store.
	pub api_key: String,
}

/// Answer to the signup call.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SetApiKeyResponse {
	/// Confirmation text; may be empty.
	#[serde(default)]
	pub message: String,
}

/// Error payload produced by the proxy (`error`) or by the backend (`detail`).
///
/// FastAPI validation failures carry a list in `detail`, so it is kept as raw
/// JSON and flattened on demand.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
	/// Proxy-style message.
	#[serde(default)]
	pub error: Option<String>,
	/// Backend-style message, a string or a validation list.
	#[serde(default)]
	pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
	/// Best human-readable message, `detail` first.
	pub fn message(&self) -> Option<String> {
		if let Some(error) = self.error.as_ref().filter(|e| !e.is_empty()) {
			return Some(error.clone());
		}
		match self.detail.as_ref()? {
			serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
			serde_json::Value::Null => None,
			other => Some(other.to_string()),
		}
	}
}

/// Payloads that may report a failure in-band next to an empty result.
pub trait BackendReport {
	/// The in-band error, if the backend reported one.
	fn backend_error(&self) -> Option<&str>;
}

impl BackendReport for GraphData {
	fn backend_error(&self) -> Option<&str> {
		self.error.as_deref()
	}
}

impl BackendReport for MapData {
	fn backend_error(&self) -> Option<&str> {
		self.error.as_deref()
	}
}

impl BackendReport for InterestsData {
	fn backend_error(&self) -> Option<&str> {
		self.error.as_deref()
	}
}

impl BackendReport for SetApiKeyResponse {
	fn backend_error(&self) -> Option<&str> {
		None
	}
}
