//! Renderer input built from a backend graph response.

use std::collections::HashSet;

use crate::api::{GraphData, Node, NodeKind};

/// Visual category of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeRole {
	/// The logged-in user.
	CurrentUser,
	/// Anyone else.
	Person,
	/// A shared interest.
	Interest,
	/// A location.
	Place,
	/// Anything the backend could not classify.
	Other,
}

impl NodeRole {
	/// Role of `node` as seen by `current_user`.
	pub fn of(node: &Node, current_user: &str) -> Self {
		match node.kind {
			_ if node.id == current_user => NodeRole::CurrentUser,
			NodeKind::Person => NodeRole::Person,
			NodeKind::Interest => NodeRole::Interest,
			NodeKind::Place => NodeRole::Place,
			NodeKind::Unknown => NodeRole::Other,
		}
	}

	/// People get a tooltip; everything else gets an on-canvas label.
	pub fn is_person(self) -> bool {
		matches!(self, NodeRole::CurrentUser | NodeRole::Person)
	}
}

/// A node accepted for simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Backend node id, unique within the input.
	pub id: String,
	/// Display label.
	pub label: String,
	/// Visual category.
	pub role: NodeRole,
	/// Phone number of a person.
	pub phone_number: Option<String>,
}

/// An undirected link between two accepted nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	/// One endpoint's id.
	pub source: String,
	/// The other endpoint's id.
	pub target: String,
}

/// Nodes and links ready for simulation. Every link references a node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphInput {
	/// Nodes in response order, duplicates removed.
	pub nodes: Vec<GraphNode>,
	/// Links whose endpoints both exist.
	pub links: Vec<GraphLink>,
	/// Links dropped because an endpoint was missing.
	pub dropped_links: usize,
	/// Nodes dropped because their id was already taken.
	pub dropped_nodes: usize,
}

impl GraphInput {
	/// Validate a backend response, dropping duplicate nodes and dangling links.
	pub fn from_response(data: &GraphData, current_user: &str) -> Self {
		let mut seen = HashSet::new();
		let mut input = GraphInput::default();

		for node in &data.nodes {
			if !seen.insert(node.id.as_str()) {
				input.dropped_nodes += 1;
				continue;
			}
			let label = if node.label.is_empty() {
				node.id.clone()
			} else {
				node.label.clone()
			};
			input.nodes.push(GraphNode {
				id: node.id.clone(),
				label,
				role: NodeRole::of(node, current_user),
				phone_number: node.phone_number.clone(),
			});
		}

		for edge in &data.edges {
			if seen.contains(edge.source.as_str()) && seen.contains(edge.target.as_str()) {
				input.links.push(GraphLink {
					source: edge.source.clone(),
					target: edge.target.clone(),
				});
			} else {
				input.dropped_links += 1;
			}
		}
		input
	}
}
