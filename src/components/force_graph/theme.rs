//! Colours and per-role node styles for the interest graph.

use super::types::NodeRole;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity, `0..=1`.
	pub a: f64,
}

impl Color {
	/// Opaque colour.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Colour with opacity `a`.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same colour with opacity `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Blend towards white (0.0 = unchanged, 1.0 = white).
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		let mix = |c: u8| (c as f64 + (255.0 - c as f64) * f) as u8;
		Self {
			r: mix(self.r),
			g: mix(self.g),
			b: mix(self.b),
			a: self.a,
		}
	}

	/// Hex when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// How one category of node is drawn.
#[derive(Clone, Debug)]
pub struct RoleStyle {
	/// Node fill.
	pub fill: Color,
	/// Node outline.
	pub stroke: Color,
	/// Outline width in screen pixels.
	pub stroke_width: f64,
	/// Radius multiplier relative to the base node radius.
	pub size: f64,
}

/// Colours for the whole graph view.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Canvas background.
	pub background: Color,
	/// Edge lines.
	pub edge: Color,
	/// Interest and place labels.
	pub label: Color,
	/// The logged-in user.
	pub current_user: RoleStyle,
	/// Other people.
	pub person: RoleStyle,
	/// Interests.
	pub interest: RoleStyle,
	/// Places.
	pub place: RoleStyle,
	/// Unclassified nodes.
	pub other: RoleStyle,
}

impl Theme {
	/// Style for nodes of `role`.
	pub fn style(&self, role: NodeRole) -> &RoleStyle {
		match role {
			NodeRole::CurrentUser => &self.current_user,
			NodeRole::Person => &self.person,
			NodeRole::Interest => &self.interest,
			NodeRole::Place => &self.place,
			NodeRole::Other => &self.other,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: Color::rgb(22, 27, 34),
			edge: Color::rgba(140, 160, 180, 0.6),
			label: Color::rgb(235, 240, 245),
			current_user: RoleStyle {
				fill: Color::rgb(94, 129, 172),
				stroke: Color::rgb(255, 176, 32),
				stroke_width: 3.0,
				size: 2.0,
			},
			person: RoleStyle {
				fill: Color::rgb(94, 129, 172),
				stroke: Color::rgb(255, 255, 255),
				stroke_width: 1.5,
				size: 1.2,
			},
			interest: RoleStyle {
				fill: Color::rgb(123, 180, 137),
				stroke: Color::rgba(255, 255, 255, 0.0),
				stroke_width: 0.0,
				size: 1.0,
			},
			place: RoleStyle {
				fill: Color::rgb(214, 150, 98),
				stroke: Color::rgba(255, 255, 255, 0.0),
				stroke_width: 0.0,
				size: 1.0,
			},
			other: RoleStyle {
				fill: Color::rgb(143, 163, 180),
				stroke: Color::rgba(255, 255, 255, 0.0),
				stroke_width: 0.0,
				size: 0.8,
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_uses_hex_when_opaque() {
		assert_eq!(Color::rgb(255, 0, 16).to_css(), "#ff0010");
		assert_eq!(
			Color::rgb(1, 2, 3).with_alpha(0.5).to_css(),
			"rgba(1, 2, 3, 0.5)"
		);
	}

	#[test]
	fn lighten_moves_towards_white() {
		assert_eq!(Color::rgb(0, 100, 255).lighten(1.0), Color::rgb(255, 255, 255));
		assert_eq!(Color::rgb(0, 100, 255).lighten(0.0), Color::rgb(0, 100, 255));
	}

	#[test]
	fn current_user_stands_out() {
		let theme = Theme::default();
		let me = theme.style(NodeRole::CurrentUser);
		let other = theme.style(NodeRole::Person);
		assert!(me.size > other.size);
		assert_ne!(me.stroke, other.stroke);
		assert_ne!(theme.style(NodeRole::Interest).fill, other.fill);
	}
}
