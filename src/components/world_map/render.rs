//! Frame construction for the map: ocean, land, then place markers.

use crate::canvas::{DrawCommand, Stroke};

use super::projection::{MAP_HEIGHT, MAP_WIDTH};
use super::state::{MapViewState, marker_radius};

const OCEAN: &str = "#16202b";
const LAND: &str = "#2c3a47";
const BORDER: &str = "#3f5163";
const MARKER: &str = "#e06c5a";
const MARKER_FOCUS: &str = "#ffb020";
const MARKER_TEXT: &str = "#ffffff";

/// Build the command list for the current frame. Without an outline only the
/// ocean is drawn.
pub fn frame(state: &MapViewState) -> Vec<DrawCommand> {
	let mut commands = vec![DrawCommand::Clear {
		color: OCEAN.to_string(),
		width: MAP_WIDTH,
		height: MAP_HEIGHT,
	}];
	if !state.has_outline() {
		return commands;
	}

	let t = state.transform;
	commands.push(DrawCommand::PushTransform {
		x: t.x,
		y: t.y,
		k: t.k,
	});
	for ring in &state.land {
		commands.push(DrawCommand::Polygon {
			points: ring.clone(),
			fill: LAND.to_string(),
			stroke: Some(Stroke {
				color: BORDER.to_string(),
				width: 0.5 / t.k,
			}),
		});
	}

	// Markers keep a constant on-screen size.
	for marker in &state.markers {
		let focused = state.focus == Some(marker.index);
		commands.push(DrawCommand::Circle {
			center: marker.at,
			radius: marker_radius(marker.count) / t.k,
			fill: if focused { MARKER_FOCUS } else { MARKER }.to_string(),
			stroke: Some(Stroke {
				color: MARKER_TEXT.to_string(),
				width: 1.0 / t.k,
			}),
			alpha: 0.85,
		});
		commands.push(DrawCommand::Text {
			at: marker.at,
			text: marker.count.to_string(),
			font: format!("bold {}px sans-serif", 10.0 / t.k),
			color: MARKER_TEXT.to_string(),
			centered: true,
		});
	}
	commands.push(DrawCommand::PopTransform);
	commands
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::{MapData, Place};
	use crate::components::world_map::geo::WorldOutline;

	fn state() -> MapViewState {
		let place = |lat, lon, count| Place {
			latitude: lat,
			longitude: lon,
			people_count: count,
			people: Vec::new(),
		};
		MapViewState::new(&MapData {
			places: vec![place(48.9, 2.3, 3), place(-33.9, 151.2, 12)],
			error: None,
		})
	}

	fn outline() -> WorldOutline {
		WorldOutline {
			rings: vec![vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]],
		}
	}

	#[test]
	fn nothing_but_ocean_without_outline() {
		let commands = frame(&state());
		assert_eq!(commands.len(), 1);
		assert!(matches!(commands[0], DrawCommand::Clear { .. }));
	}

	#[test]
	fn markers_are_labelled_with_people_count() {
		let mut s = state();
		s.set_outline(&outline());
		let commands = frame(&s);
		let polygons = commands
			.iter()
			.filter(|c| matches!(c, DrawCommand::Polygon { .. }))
			.count();
		assert_eq!(polygons, 1);
		let labels: Vec<_> = commands
			.iter()
			.filter_map(|c| match c {
				DrawCommand::Text { text, .. } => Some(text.as_str()),
				_ => None,
			})
			.collect();
		assert_eq!(labels, vec!["3", "12"]);
	}

	#[test]
	fn focused_marker_is_highlighted() {
		let mut s = state();
		s.set_outline(&outline());
		s.focus_prev();
		let fills: Vec<_> = frame(&s)
			.into_iter()
			.filter_map(|c| match c {
				DrawCommand::Circle { fill, .. } => Some(fill),
				_ => None,
			})
			.collect();
		assert_eq!(fills, vec![MARKER.to_string(), MARKER_FOCUS.to_string()]);
	}
}
