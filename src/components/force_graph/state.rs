//! Graph simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation with per-node metadata, the
//! pan/zoom transform, the active pointer gesture, and hover highlighting.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::scale::{ScaleConfig, ScaledValues};
use super::types::{GraphInput, NodeRole};

/// Radius of the ring the initial layout places non-user nodes on.
const SEED_RING: f64 = 120.0;

/// Per-node display metadata attached to each node in the simulation.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	/// Text drawn next to interests and places.
	pub label: String,
	/// Drives colour, size and label visibility.
	pub role: NodeRole,
	/// Shown in the tooltip for people.
	pub phone_number: Option<String>,
	/// Degree-based size multiplier, combined with the role size when drawn.
	pub size: f64,
}

/// Pan and zoom applied to the whole graph. `screen = world * k + (x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	/// Horizontal translation in pixels.
	pub x: f64,
	/// Vertical translation in pixels.
	pub y: f64,
	/// Zoom factor.
	pub k: f64,
}

impl ViewTransform {
	/// Identity zoom with the world origin at the canvas centre.
	pub fn centered(width: f64, height: f64) -> Self {
		Self {
			x: width / 2.0,
			y: height / 2.0,
			k: 1.0,
		}
	}

	/// Canvas pixel to world point.
	pub fn to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// World point to canvas pixel.
	pub fn to_screen(&self, wx: f64, wy: f64) -> (f64, f64) {
		(wx * self.k + self.x, wy * self.k + self.y)
	}

	/// Change the zoom to `k`, keeping the world point under `(sx, sy)` fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, k: f64) {
		let ratio = k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = k;
	}
}

/// What the pointer is currently doing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Gesture {
	#[default]
	Idle,
	/// Dragging a node; `grab` is the node position minus the pointer, in world units.
	Drag {
		node: DefaultNodeIdx,
		grab: (f64, f64),
	},
	Pan {
		start: (f64, f64),
		origin: (f64, f64),
	},
}

#[derive(Clone, Copy, Debug, Default)]
struct Glow {
	level: f64,
	/// Seconds left before the glow may start fading.
	hold: f64,
}

/// Smooth hover highlighting.
///
/// The hovered node and its neighbours fade in; everything that leaves the
/// set holds for a moment, then decays exponentially. The hold keeps the
/// highlight from flickering when the pointer skims a node's edge.
#[derive(Clone, Debug, Default)]
pub struct Highlight {
	hovered: Option<DefaultNodeIdx>,
	targets: HashSet<DefaultNodeIdx>,
	glow: HashMap<DefaultNodeIdx, Glow>,
	/// Ring around the hovered node only.
	ring: HashMap<DefaultNodeIdx, f64>,
	peak: f64,
}

const MIN_HOLD: f64 = 0.12;
const FADE_IN_SPEED: f64 = 6.0;
const FADE_OUT_SPEED: f64 = 4.0;
const VISIBLE: f64 = 0.005;

impl Highlight {
	/// Node under the pointer, if any.
	pub fn hovered(&self) -> Option<DefaultNodeIdx> {
		self.hovered
	}

	/// Hover `node`; it and `neighbors` start brightening.
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>, neighbors: &[DefaultNodeIdx]) {
		if self.hovered == node {
			return;
		}
		self.hovered = node;
		self.targets.clear();
		if let Some(idx) = node {
			self.targets.insert(idx);
			self.targets.extend(neighbors.iter().copied());
			for &idx in &self.targets {
				self.glow.entry(idx).or_default().hold = MIN_HOLD;
			}
		}
	}

	/// Advance the fades by `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		let rise = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let decay = (-FADE_OUT_SPEED * dt).exp();

		for &idx in &self.targets {
			let glow = self.glow.entry(idx).or_default();
			glow.level += (1.0 - glow.level) * rise;
		}

		let mut peak: f64 = 0.0;
		let targets = &self.targets;
		self.glow.retain(|idx, glow| {
			if !targets.contains(idx) {
				if glow.hold > 0.0 {
					glow.hold -= dt;
				} else {
					glow.level *= decay;
				}
			}
			peak = peak.max(glow.level);
			targets.contains(idx) || glow.level > VISIBLE
		});
		self.peak = peak;

		if let Some(idx) = self.hovered {
			let ring = self.ring.entry(idx).or_insert(0.0);
			*ring += (1.0 - *ring) * rise;
		}
		let hovered = self.hovered;
		self.ring.retain(|idx, level| {
			if hovered == Some(*idx) {
				return true;
			}
			*level *= decay;
			*level > VISIBLE
		});
	}

	/// Highlight of one node, `0..=1`.
	pub fn level(&self, idx: DefaultNodeIdx) -> f64 {
		self.glow.get(&idx).map_or(0.0, |g| g.level)
	}

	/// Ring intensity around the hovered node, `0..=1`.
	pub fn ring(&self, idx: DefaultNodeIdx) -> f64 {
		self.ring.get(&idx).copied().unwrap_or(0.0)
	}

	/// Geometric mean of the endpoint levels.
	pub fn edge_level(&self, a: DefaultNodeIdx, b: DefaultNodeIdx) -> f64 {
		(self.level(a) * self.level(b)).sqrt()
	}

	/// Strongest level of any node, used to dim everything else.
	pub fn peak(&self) -> f64 {
		self.peak
	}
}

/// Tooltip content for a hovered person.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
	/// Phone number, prefixed for the current user.
	pub text: String,
	/// Anchor point in canvas pixels.
	pub at: (f64, f64),
}

/// Simulation plus interaction state for one rendered graph.
///
/// Rebuilt whenever new data arrives; mutated every animation frame.
pub struct ForceGraphState {
	/// Physics simulation; node positions are world coordinates.
	pub graph: ForceGraph<NodeInfo, ()>,
	/// Current pan/zoom.
	pub transform: ViewTransform,
	/// Hover fade state.
	pub highlight: Highlight,
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
	gesture: Gesture,
	ids: HashMap<String, DefaultNodeIdx>,
	neighbors: HashMap<DefaultNodeIdx, Vec<DefaultNodeIdx>>,
	edge_count: usize,
}

impl ForceGraphState {
	/// Seed the simulation from `input` on a `width` x `height` canvas.
	pub fn new(input: &GraphInput, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});

		let mut degree: HashMap<&str, usize> = HashMap::new();
		for link in &input.links {
			*degree.entry(link.source.as_str()).or_default() += 1;
			*degree.entry(link.target.as_str()).or_default() += 1;
		}
		let max_degree = degree.values().copied().max().unwrap_or(1).max(1);

		let ring_count = input
			.nodes
			.iter()
			.filter(|n| n.role != NodeRole::CurrentUser)
			.count()
			.max(1);
		let mut ring_slot = 0;
		let mut ids = HashMap::new();

		for node in &input.nodes {
			let (x, y) = if node.role == NodeRole::CurrentUser {
				(0.0, 0.0)
			} else {
				let angle = ring_slot as f64 * 2.0 * PI / ring_count as f64;
				ring_slot += 1;
				(SEED_RING * angle.cos(), SEED_RING * angle.sin())
			};
			let node_degree = degree.get(node.id.as_str()).copied().unwrap_or(0);
			let size = 0.8 + 0.4 * (node_degree as f64 / max_degree as f64).sqrt();

			let idx = graph.add_node(NodeData {
				x: x as f32,
				y: y as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					label: node.label.clone(),
					role: node.role,
					phone_number: node.phone_number.clone(),
					size,
				},
			});
			ids.insert(node.id.clone(), idx);
		}

		let mut neighbors: HashMap<DefaultNodeIdx, Vec<DefaultNodeIdx>> = HashMap::new();
		let mut edge_count = 0;
		for link in &input.links {
			if let (Some(&src), Some(&tgt)) = (ids.get(&link.source), ids.get(&link.target)) {
				graph.add_edge(src, tgt, EdgeData::default());
				neighbors.entry(src).or_default().push(tgt);
				neighbors.entry(tgt).or_default().push(src);
				edge_count += 1;
			}
		}

		Self {
			graph,
			transform: ViewTransform::centered(width, height),
			highlight: Highlight::default(),
			width,
			height,
			gesture: Gesture::Idle,
			ids,
			neighbors,
			edge_count,
		}
	}

	/// Nodes in the simulation.
	pub fn node_count(&self) -> usize {
		self.ids.len()
	}

	/// Edges in the simulation.
	pub fn edge_count(&self) -> usize {
		self.edge_count
	}

	/// Simulation index of the node with `id`.
	pub fn index_of(&self, id: &str) -> Option<DefaultNodeIdx> {
		self.ids.get(id).copied()
	}

	/// World position of the node with `id`.
	#[cfg(test)]
	pub fn position_of(&self, id: &str) -> Option<(f64, f64)> {
		let idx = self.index_of(id)?;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((node.x() as f64, node.y() as f64));
			}
		});
		found
	}

	/// Whether the node with `id` is held by a drag.
	#[cfg(test)]
	pub fn is_pinned(&self, id: &str) -> bool {
		let Some(idx) = self.index_of(id) else {
			return false;
		};
		let mut pinned = false;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				pinned = node.data.is_anchor;
			}
		});
		pinned
	}

	/// Closest node under the screen point, within its hit radius.
	pub fn node_at(&self, sx: f64, sy: f64, config: &ScaleConfig) -> Option<DefaultNodeIdx> {
		let (wx, wy) = self.transform.to_world(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut best: Option<(DefaultNodeIdx, f64)> = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - wx, node.y() as f64 - wy);
			let dist = (dx * dx + dy * dy).sqrt();
			let reach = scale.hit_radius * node.data.user_data.size;
			if dist < reach && best.is_none_or(|(_, d)| dist < d) {
				best = Some((node.index(), dist));
			}
		});
		best.map(|(idx, _)| idx)
	}

	/// Start dragging the node under the pointer, or panning if there is none.
	pub fn pointer_down(&mut self, sx: f64, sy: f64, config: &ScaleConfig) {
		let Some(idx) = self.node_at(sx, sy, config) else {
			self.gesture = Gesture::Pan {
				start: (sx, sy),
				origin: (self.transform.x, self.transform.y),
			};
			return;
		};
		let (wx, wy) = self.transform.to_world(sx, sy);
		let mut grab = (0.0, 0.0);
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				grab = (node.data.x as f64 - wx, node.data.y as f64 - wy);
				node.data.is_anchor = true;
			}
		});
		self.gesture = Gesture::Drag { node: idx, grab };
	}

	/// Drag the grabbed node, pan, or update the hover.
	pub fn pointer_move(&mut self, sx: f64, sy: f64, config: &ScaleConfig) {
		match self.gesture {
			Gesture::Drag { node: idx, grab } => {
				let (wx, wy) = self.transform.to_world(sx, sy);
				let (nx, ny) = ((wx + grab.0) as f32, (wy + grab.1) as f32);
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = nx;
						node.data.y = ny;
					}
				});
			}
			Gesture::Pan { start, origin } => {
				self.transform.x = origin.0 + (sx - start.0);
				self.transform.y = origin.1 + (sy - start.1);
			}
			Gesture::Idle => {
				let hovered = self.node_at(sx, sy, config);
				self.set_hover(hovered);
			}
		}
	}

	/// End the gesture. A dragged node is released back to the simulation.
	pub fn pointer_up(&mut self) {
		if let Gesture::Drag { node: idx, .. } = self.gesture {
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.is_anchor = false;
				}
			});
		}
		self.gesture = Gesture::Idle;
	}

	/// Release any drag and clear the hover.
	pub fn pointer_leave(&mut self) {
		self.pointer_up();
		self.set_hover(None);
	}

	/// Zoom one wheel notch around the pointer.
	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64, config: &ScaleConfig) {
		let step = config.zoom.wheel_step;
		let factor = if delta_y > 0.0 { 1.0 / step } else { step };
		let k = config.zoom.clamp(self.transform.k * factor);
		self.transform.zoom_at(sx, sy, k);
	}

	/// Back to the centred, unzoomed transform.
	pub fn reset_view(&mut self) {
		self.transform = ViewTransform::centered(self.width, self.height);
	}

	/// Hover `node` together with its neighbours.
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		let neighbors = node
			.and_then(|idx| self.neighbors.get(&idx))
			.map(Vec::as_slice)
			.unwrap_or(&[]);
		self.highlight.set_hover(node, neighbors);
	}

	/// Phone-number tooltip while a person is hovered.
	pub fn tooltip(&self) -> Option<Tooltip> {
		let idx = self.highlight.hovered()?;
		let mut tooltip = None;
		self.graph.visit_nodes(|node| {
			if node.index() != idx {
				return;
			}
			let info = &node.data.user_data;
			if !info.role.is_person() {
				return;
			}
			let number = info.phone_number.as_deref().unwrap_or("No phone number");
			let text = if info.role == NodeRole::CurrentUser {
				format!("You ({})", number)
			} else {
				number.to_string()
			};
			tooltip = Some(Tooltip {
				text,
				at: self.transform.to_screen(node.x() as f64, node.y() as f64),
			});
		});
		tooltip
	}

	/// Step the physics and fades by `dt` seconds.
	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.recenter();
		self.highlight.tick(dt as f64);
	}

	/// Shift free nodes so their centroid sits at the world origin.
	fn recenter(&mut self) {
		let (mut sx, mut sy, mut n) = (0.0f64, 0.0f64, 0usize);
		self.graph.visit_nodes(|node| {
			if !node.data.is_anchor {
				sx += node.x() as f64;
				sy += node.y() as f64;
				n += 1;
			}
		});
		if n == 0 {
			return;
		}
		let (cx, cy) = ((sx / n as f64) as f32, (sy / n as f64) as f32);
		self.graph.visit_nodes_mut(|node| {
			if !node.data.is_anchor {
				node.data.x -= cx;
				node.data.y -= cy;
			}
		});
	}

	/// Keep the view centred on the same world point across a canvas resize.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::{Edge, GraphData, Node, NodeKind};

	const W: f64 = 800.0;
	const H: f64 = 600.0;

	fn sample() -> ForceGraphState {
		let node = |id: &str, kind, phone: Option<&str>| Node {
			id: id.into(),
			label: id.into(),
			kind,
			phone_number: phone.map(str::to_string),
		};
		let edge = |s: &str, t: &str| Edge {
			source: s.into(),
			target: t.into(),
		};
		let data = GraphData {
			nodes: vec![
				node("me", NodeKind::Person, Some("+100")),
				node("chess", NodeKind::Interest, None),
				node("jazz", NodeKind::Interest, None),
				node("ann", NodeKind::Person, Some("+200")),
			],
			edges: vec![
				edge("me", "chess"),
				edge("me", "jazz"),
				edge("chess", "ann"),
				edge("ann", "nobody"),
			],
			error: None,
		};
		ForceGraphState::new(&GraphInput::from_response(&data, "me"), W, H)
	}

	fn screen_of(state: &ForceGraphState, id: &str) -> (f64, f64) {
		let (x, y) = state.position_of(id).expect("node exists");
		state.transform.to_screen(x, y)
	}

	#[test]
	fn builds_nodes_and_valid_edges_only() {
		let state = sample();
		assert_eq!(state.node_count(), 4);
		assert_eq!(state.edge_count(), 3);
		assert_eq!(state.position_of("me"), Some((0.0, 0.0)));
	}

	#[test]
	fn empty_graph_is_fine() {
		let mut state = ForceGraphState::new(&GraphInput::default(), W, H);
		state.tick(0.016);
		assert_eq!(state.node_count(), 0);
		assert_eq!(state.tooltip(), None);
	}

	#[test]
	fn dragging_pins_then_releases() {
		let config = ScaleConfig::default();
		let mut state = sample();
		let (sx, sy) = screen_of(&state, "me");

		state.pointer_down(sx, sy, &config);
		assert!(state.is_pinned("me"));

		state.pointer_move(sx + 50.0, sy - 20.0, &config);
		assert_eq!(state.position_of("me"), Some((50.0, -20.0)));
		assert_eq!(state.transform, ViewTransform::centered(W, H));

		state.pointer_up();
		assert!(!state.is_pinned("me"));
	}

	#[test]
	fn dragging_background_pans() {
		let config = ScaleConfig::default();
		let mut state = sample();
		state.pointer_down(10.0, 10.0, &config);
		state.pointer_move(40.0, 25.0, &config);
		state.pointer_up();
		assert_eq!(state.transform.x, W / 2.0 + 30.0);
		assert_eq!(state.transform.y, H / 2.0 + 15.0);
	}

	#[test]
	fn wheel_zoom_is_clamped_and_anchored() {
		let config = ScaleConfig::default();
		let mut state = sample();
		let before = state.transform.to_world(100.0, 100.0);
		for _ in 0..100 {
			state.wheel(100.0, 100.0, -1.0, &config);
		}
		assert_eq!(state.transform.k, config.zoom.max_k);
		let after = state.transform.to_world(100.0, 100.0);
		assert!((before.0 - after.0).abs() < 1e-6);
		assert!((before.1 - after.1).abs() < 1e-6);

		for _ in 0..200 {
			state.wheel(100.0, 100.0, 1.0, &config);
		}
		assert_eq!(state.transform.k, config.zoom.min_k);
	}

	#[test]
	fn reset_view_restores_default_transform() {
		let config = ScaleConfig::default();
		let mut state = sample();
		state.wheel(10.0, 10.0, -1.0, &config);
		state.pointer_down(5.0, 5.0, &config);
		state.pointer_move(90.0, 90.0, &config);
		state.pointer_up();
		state.reset_view();
		assert_eq!(state.transform, ViewTransform::centered(W, H));
	}

	#[test]
	fn hovering_person_shows_phone_tooltip() {
		let config = ScaleConfig::default();
		let mut state = sample();
		let (sx, sy) = screen_of(&state, "ann");
		state.pointer_move(sx, sy, &config);
		let tooltip = state.tooltip().expect("tooltip for person");
		assert_eq!(tooltip.text, "+200");

		let (sx, sy) = screen_of(&state, "me");
		state.pointer_move(sx, sy, &config);
		assert_eq!(state.tooltip().map(|t| t.text), Some("You (+100)".into()));
	}

	#[test]
	fn hovering_interest_highlights_neighbors_without_tooltip() {
		let config = ScaleConfig::default();
		let mut state = sample();
		let (sx, sy) = screen_of(&state, "chess");
		state.pointer_move(sx, sy, &config);
		assert_eq!(state.tooltip(), None);

		for _ in 0..30 {
			state.highlight.tick(0.016);
		}
		let level = |id: &str| state.highlight.level(state.index_of(id).expect("node"));
		assert!(level("chess") > 0.9);
		assert!(level("me") > 0.9);
		assert!(level("ann") > 0.9);
		assert_eq!(level("jazz"), 0.0);
	}

	#[test]
	fn highlight_holds_then_fades() {
		let config = ScaleConfig::default();
		let mut state = sample();
		let chess = state.index_of("chess").expect("node");
		let (sx, sy) = screen_of(&state, "chess");
		state.pointer_move(sx, sy, &config);
		for _ in 0..30 {
			state.highlight.tick(0.016);
		}
		state.pointer_leave();

		state.highlight.tick(0.05);
		let held = state.highlight.level(chess);
		assert!(held > 0.9, "still held: {held}");

		for _ in 0..200 {
			state.highlight.tick(0.016);
		}
		assert_eq!(state.highlight.level(chess), 0.0);
		assert_eq!(state.highlight.peak(), 0.0);
	}

	#[test]
	fn tick_keeps_free_nodes_centered() {
		let mut state = sample();
		for _ in 0..20 {
			state.tick(0.016);
		}
		let (mut sx, mut sy) = (0.0, 0.0);
		for id in ["me", "chess", "jazz", "ann"] {
			let (x, y) = state.position_of(id).expect("node");
			sx += x;
			sy += y;
		}
		assert!((sx / 4.0).abs() < 1e-2);
		assert!((sy / 4.0).abs() < 1e-2);
	}

	#[test]
	fn resize_keeps_center() {
		let mut state = sample();
		state.resize(1000.0, 700.0);
		assert_eq!(state.transform.x, 500.0);
		assert_eq!(state.transform.y, 350.0);
	}
}
