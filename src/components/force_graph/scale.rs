//! Zoom-dependent sizing for graph visuals.
//!
//! Sizes are either *world-space* (they grow when zooming in) or
//! *screen-space* (constant pixels, divided by the zoom factor `k` before
//! drawing inside the transformed canvas).

/// How a visual size reacts to the zoom factor.
#[derive(Clone, Debug, PartialEq)]
pub enum ScaleBehavior {
	/// Constant world-space size.
	World,
	/// Constant screen-space size.
	Screen,
	/// World-space size whose on-screen size stays within
	/// `min_screen..=max_screen` pixels.
	Clamped {
		/// Smallest on-screen size in pixels.
		min_screen: f64,
		/// Largest on-screen size in pixels.
		max_screen: f64,
	},
}

impl ScaleBehavior {
	/// World-space value to draw with at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Node radius, hit area and label sizing.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Base radius in world units, multiplied by the role size.
	pub radius: f64,
	/// How the radius follows the zoom.
	pub radius_behavior: ScaleBehavior,
	/// Pointer hit radius in world units.
	pub hit_radius: f64,
	/// How the hit radius follows the zoom.
	pub hit_behavior: ScaleBehavior,
	/// Label font size in screen pixels.
	pub label_size: f64,
	/// Below this zoom, labels stop growing in world space.
	pub label_min_k: f64,
}

/// Edge line sizing.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// Line width in screen pixels.
	pub line_width: f64,
}

/// Limits for the pan/zoom transform.
#[derive(Clone, Debug)]
pub struct ZoomConfig {
	/// Furthest zoom out.
	pub min_k: f64,
	/// Furthest zoom in.
	pub max_k: f64,
	/// Multiplier applied per wheel notch.
	pub wheel_step: f64,
}

impl ZoomConfig {
	/// `k` within the zoom limits.
	pub fn clamp(&self, k: f64) -> f64 {
		k.clamp(self.min_k, self.max_k)
	}
}

/// All zoom-dependent sizing for the graph.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Node sizes.
	pub node: NodeScaleConfig,
	/// Edge sizes.
	pub edge: EdgeScaleConfig,
	/// Zoom limits.
	pub zoom: ZoomConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				radius: 6.0,
				radius_behavior: ScaleBehavior::Clamped {
					min_screen: 3.0,
					max_screen: f64::INFINITY,
				},
				hit_radius: 10.0,
				hit_behavior: ScaleBehavior::Clamped {
					min_screen: 6.0,
					max_screen: f64::INFINITY,
				},
				label_size: 11.0,
				label_min_k: 0.5,
			},
			edge: EdgeScaleConfig { line_width: 1.5 },
			zoom: ZoomConfig {
				min_k: 0.1,
				max_k: 4.0,
				wheel_step: 1.1,
			},
		}
	}
}

/// Scale values resolved for one zoom level. Build once per frame.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Zoom these values were resolved for.
	pub k: f64,
	/// Base node radius in world units.
	pub node_radius: f64,
	/// Hit radius in world units.
	pub hit_radius: f64,
	/// CSS font for labels.
	pub label_font: String,
	/// Edge width in world units.
	pub edge_line_width: f64,
}

impl ScaledValues {
	/// Resolve `config` at zoom `k`.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let label_px = config.node.label_size / k.max(config.node.label_min_k);
		Self {
			k,
			node_radius: config.node.radius_behavior.apply(config.node.radius, k),
			hit_radius: config.node.hit_behavior.apply(config.node.hit_radius, k),
			label_font: format!("{}px sans-serif", label_px),
			edge_line_width: ScaleBehavior::Screen.apply(config.edge.line_width, k),
		}
	}

	/// Screen-space pixels converted to world units at this zoom.
	pub fn screen_px(&self, px: f64) -> f64 {
		ScaleBehavior::Screen.apply(px, self.k)
	}
}
