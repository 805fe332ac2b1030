//! Draw commands shared by the graph and map renderers.
//!
//! Renderers build a `Vec<DrawCommand>` from their state without touching the
//! DOM, which keeps layout and styling testable. [`paint`] replays the list on
//! a 2D canvas context.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

/// Optional outline drawn around a filled shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
	/// CSS colour.
	pub color: String,
	/// Line width in the current space.
	pub width: f64,
}

/// One canvas operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
	/// Fill the whole canvas.
	Clear {
		/// Background colour.
		color: String,
		/// Canvas width in pixels.
		width: f64,
		/// Canvas height in pixels.
		height: f64,
	},
	/// Push a pan/zoom transform; everything until the matching
	/// [`DrawCommand::PopTransform`] is in world space.
	PushTransform {
		/// Horizontal translation.
		x: f64,
		/// Vertical translation.
		y: f64,
		/// Zoom factor.
		k: f64,
	},
	/// Back to the transform before the last push.
	PopTransform,
	/// Straight stroked segment.
	Line {
		/// Start point.
		from: (f64, f64),
		/// End point.
		to: (f64, f64),
		/// Stroke colour.
		color: String,
		/// Stroke width.
		width: f64,
	},
	/// Filled circle.
	Circle {
		/// Centre point.
		center: (f64, f64),
		/// Radius.
		radius: f64,
		/// Fill colour.
		fill: String,
		/// Outline, if any.
		stroke: Option<Stroke>,
		/// Global alpha for both fill and outline.
		alpha: f64,
	},
	/// Closed polygon ring.
	Polygon {
		/// Ring vertices; the last joins back to the first.
		points: Vec<(f64, f64)>,
		/// Fill colour.
		fill: String,
		/// Outline, if any.
		stroke: Option<Stroke>,
	},
	/// Single line of text.
	Text {
		/// Anchor point.
		at: (f64, f64),
		/// Text to draw.
		text: String,
		/// CSS font shorthand.
		font: String,
		/// Fill colour.
		color: String,
		/// Centre on `at` instead of starting there.
		centered: bool,
	},
}

/// Replay `commands` on `ctx`.
pub fn paint(ctx: &CanvasRenderingContext2d, commands: &[DrawCommand]) {
	for command in commands {
		match command {
			DrawCommand::Clear {
				color,
				width,
				height,
			} => {
				ctx.set_fill_style_str(color);
				ctx.fill_rect(0.0, 0.0, *width, *height);
			}
			DrawCommand::PushTransform { x, y, k } => {
				ctx.save();
				let _ = ctx.translate(*x, *y);
				let _ = ctx.scale(*k, *k);
			}
			DrawCommand::PopTransform => ctx.restore(),
			DrawCommand::Line {
				from,
				to,
				color,
				width,
			} => {
				ctx.set_stroke_style_str(color);
				ctx.set_line_width(*width);
				ctx.begin_path();
				ctx.move_to(from.0, from.1);
				ctx.line_to(to.0, to.1);
				ctx.stroke();
			}
			DrawCommand::Circle {
				center,
				radius,
				fill,
				stroke,
				alpha,
			} => {
				ctx.set_global_alpha(*alpha);
				ctx.begin_path();
				let _ = ctx.arc(center.0, center.1, *radius, 0.0, 2.0 * PI);
				ctx.set_fill_style_str(fill);
				ctx.fill();
				if let Some(stroke) = stroke {
					ctx.set_stroke_style_str(&stroke.color);
					ctx.set_line_width(stroke.width);
					ctx.stroke();
				}
				ctx.set_global_alpha(1.0);
			}
			DrawCommand::Polygon {
				points,
				fill,
				stroke,
			} => {
				let Some((first, rest)) = points.split_first() else {
					continue;
				};
				ctx.begin_path();
				ctx.move_to(first.0, first.1);
				for p in rest {
					ctx.line_to(p.0, p.1);
				}
				ctx.close_path();
				ctx.set_fill_style_str(fill);
				ctx.fill();
				if let Some(stroke) = stroke {
					ctx.set_stroke_style_str(&stroke.color);
					ctx.set_line_width(stroke.width);
					ctx.stroke();
				}
			}
			DrawCommand::Text {
				at,
				text,
				font,
				color,
				centered,
			} => {
				ctx.set_font(font);
				ctx.set_fill_style_str(color);
				if *centered {
					ctx.set_text_align("center");
					ctx.set_text_baseline("middle");
				}
				let _ = ctx.fill_text(text, at.0, at.1);
				if *centered {
					ctx.set_text_align("start");
					ctx.set_text_baseline("alphabetic");
				}
			}
		}
	}
}
