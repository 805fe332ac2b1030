//! Frame construction for the force graph.
//!
//! Produces draw commands in z-order: background, edges, dimmed nodes, then
//! highlighted nodes with their rings and labels on top.

use crate::canvas::{DrawCommand, Stroke};

use super::scale::{ScaleConfig, ScaledValues};
use super::state::{ForceGraphState, NodeInfo};
use super::theme::Theme;

/// Levels below this are treated as "not highlighted".
const EPSILON: f64 = 0.01;

fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Build the command list for the current frame.
pub fn frame(state: &ForceGraphState, config: &ScaleConfig, theme: &Theme) -> Vec<DrawCommand> {
	let scale = ScaledValues::new(config, state.transform.k);
	let mut commands = vec![
		DrawCommand::Clear {
			color: theme.background.to_css(),
			width: state.width,
			height: state.height,
		},
		DrawCommand::PushTransform {
			x: state.transform.x,
			y: state.transform.y,
			k: state.transform.k,
		},
	];
	push_edges(&mut commands, state, &scale, theme);
	push_nodes(&mut commands, state, &scale, theme);
	commands.push(DrawCommand::PopTransform);
	commands
}

fn push_edges(
	commands: &mut Vec<DrawCommand>,
	state: &ForceGraphState,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let dim = smooth_step(state.highlight.peak());
	state.graph.visit_edges(|n1, n2, _| {
		let lit = smooth_step(state.highlight.edge_level(n1.index(), n2.index()));
		let (alpha, width) = if lit > EPSILON {
			(0.6 + 0.4 * lit, scale.edge_line_width * (1.0 + 0.5 * lit))
		} else {
			(0.6 - 0.45 * dim, scale.edge_line_width)
		};
		commands.push(DrawCommand::Line {
			from: (n1.x() as f64, n1.y() as f64),
			to: (n2.x() as f64, n2.y() as f64),
			color: theme.edge.with_alpha(theme.edge.a * alpha).to_css(),
			width,
		});
	});
}

struct NodeDraw<'a> {
	info: &'a NodeInfo,
	at: (f64, f64),
	level: f64,
	ring: f64,
}

fn push_nodes(
	commands: &mut Vec<DrawCommand>,
	state: &ForceGraphState,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let dim = smooth_step(state.highlight.peak());
	let node_draw = |node: &force_graph::Node<NodeInfo>| {
		let idx = node.index();
		(
			smooth_step(state.highlight.level(idx)),
			smooth_step(state.highlight.ring(idx)),
		)
	};

	// Pass 1: everything not highlighted, dimmed while something is.
	state.graph.visit_nodes(|node| {
		let (level, ring) = node_draw(node);
		if level > EPSILON {
			return;
		}
		let draw = NodeDraw {
			info: &node.data.user_data,
			at: (node.x() as f64, node.y() as f64),
			level,
			ring,
		};
		push_node(commands, &draw, scale, theme, 1.0 - 0.7 * dim, 1.0 - 0.15 * dim);
	});

	// Pass 2: highlighted nodes on top, with ring and label.
	state.graph.visit_nodes(|node| {
		let (level, ring) = node_draw(node);
		if level <= EPSILON {
			return;
		}
		let draw = NodeDraw {
			info: &node.data.user_data,
			at: (node.x() as f64, node.y() as f64),
			level,
			ring,
		};
		let base_alpha = 1.0 - 0.7 * dim;
		let alpha = base_alpha + (1.0 - base_alpha) * level;
		let grow = 1.0 + (0.2 + 0.2 * ring) * level;
		let radius = push_node(commands, &draw, scale, theme, alpha, grow);

		if ring <= EPSILON {
			return;
		}
		commands.push(DrawCommand::Circle {
			center: draw.at,
			radius: radius + scale.screen_px(3.0),
			fill: "rgba(0, 0, 0, 0)".to_string(),
			stroke: Some(Stroke {
				color: format!("rgba(255, 255, 255, {})", 0.8 * ring),
				width: scale.screen_px(1.5),
			}),
			alpha: 1.0,
		});
		// Interest and place names only appear while hovered.
		if !draw.info.role.is_person() {
			commands.push(DrawCommand::Text {
				at: (
					draw.at.0 + radius + scale.screen_px(4.0),
					draw.at.1 + scale.screen_px(3.0),
				),
				text: draw.info.label.clone(),
				font: scale.label_font.clone(),
				color: theme.label.with_alpha(ring).to_css(),
				centered: false,
			});
		}
	});
}

/// Push one node circle; returns the radius used.
fn push_node(
	commands: &mut Vec<DrawCommand>,
	draw: &NodeDraw<'_>,
	scale: &ScaledValues,
	theme: &Theme,
	alpha: f64,
	radius_mult: f64,
) -> f64 {
	let style = theme.style(draw.info.role);
	let radius = scale.node_radius * style.size * draw.info.size * radius_mult;
	let stroke = (style.stroke_width > 0.0).then(|| Stroke {
		color: style.stroke.to_css(),
		width: scale.screen_px(style.stroke_width),
	});
	commands.push(DrawCommand::Circle {
		center: draw.at,
		radius,
		fill: style.fill.lighten(0.25 * draw.level).to_css(),
		stroke,
		alpha,
	});
	radius
}
