//! Map view state: projected places, pan/zoom transform, and fly-to
//! transitions between places.

use crate::api::MapData;

use super::geo::WorldOutline;
use super::projection::{MAP_HEIGHT, MAP_WIDTH, Mercator};

/// Widest zoom: the whole world.
pub const MIN_ZOOM: f64 = 1.0;
/// Closest zoom.
pub const MAX_ZOOM: f64 = 8.0;
/// Zoom used when flying to a place with Prev/Next.
pub const FOCUS_ZOOM: f64 = 4.0;
/// Duration of a Prev/Next transition.
pub const TRANSITION_MS: f64 = 750.0;
const WHEEL_STEP: f64 = 1.2;
/// Pointer travel below which a press counts as a click.
const CLICK_SLOP: f64 = 3.0;

/// Heading for a place's detail panel.
pub fn people_here(count: u32) -> String {
	if count == 1 {
		"1 person here".to_string()
	} else {
		format!("{} people here", count)
	}
}

/// Marker radius in screen pixels for a place with `count` people.
pub fn marker_radius(count: u32) -> f64 {
	6.0 + 2.0 * (count as f64).sqrt()
}

fn ease_cubic_in_out(t: f64) -> f64 {
	let t = t.clamp(0.0, 1.0);
	if t < 0.5 {
		4.0 * t * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
	}
}

/// Screen = world * k + (x, y).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapTransform {
	/// Horizontal translation in pixels.
	pub x: f64,
	/// Vertical translation in pixels.
	pub y: f64,
	/// Zoom factor.
	pub k: f64,
}

impl Default for MapTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl MapTransform {
	/// Map pixel to screen pixel.
	pub fn to_screen(&self, (wx, wy): (f64, f64)) -> (f64, f64) {
		(wx * self.k + self.x, wy * self.k + self.y)
	}

	/// Screen pixel to map pixel.
	pub fn to_world(&self, (sx, sy): (f64, f64)) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Keep the viewport inside `extent`, or centre it when the extent is
	/// smaller than the viewport along an axis.
	pub fn constrain(self, viewport: (f64, f64), extent: ((f64, f64), (f64, f64))) -> Self {
		let (w0, h0) = self.to_world((0.0, 0.0));
		let (w1, h1) = self.to_world(viewport);
		let shift = |d0: f64, d1: f64| {
			if d1 > d0 {
				(d0 + d1) / 2.0
			} else if d0 < 0.0 {
				d0
			} else {
				d1.max(0.0)
			}
		};
		let dx = shift(w0 - (extent.0).0, w1 - (extent.1).0);
		let dy = shift(h0 - (extent.0).1, h1 - (extent.1).1);
		Self {
			x: self.x + self.k * dx,
			y: self.y + self.k * dy,
			k: self.k,
		}
	}

	fn lerp(self, to: Self, t: f64) -> Self {
		Self {
			x: self.x + (to.x - self.x) * t,
			y: self.y + (to.y - self.y) * t,
			k: self.k + (to.k - self.k) * t,
		}
	}
}

#[derive(Clone, Copy, Debug)]
struct Transition {
	from: MapTransform,
	to: MapTransform,
	elapsed_ms: f64,
}

#[derive(Clone, Copy, Debug)]
enum Gesture {
	Idle,
	Pan {
		start: (f64, f64),
		origin: (f64, f64),
		moved: bool,
	},
}

/// A place positioned on the base map.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedMarker {
	/// Index into [`MapData::places`].
	pub index: usize,
	/// Projected position in map pixels.
	pub at: (f64, f64),
	/// People at the place.
	pub count: u32,
}

/// Everything the map needs between frames.
pub struct MapViewState {
	/// Current pan/zoom.
	pub transform: MapTransform,
	/// One per place, in data order.
	pub markers: Vec<PlacedMarker>,
	/// Projected outline rings, empty until the outline has loaded.
	pub land: Vec<Vec<(f64, f64)>>,
	/// Place last reached with Prev/Next.
	pub focus: Option<usize>,
	projection: Mercator,
	transition: Option<Transition>,
	gesture: Gesture,
}

impl MapViewState {
	/// Project every place; starts unzoomed and without an outline.
	pub fn new(data: &MapData) -> Self {
		let projection = Mercator::default();
		let markers = data
			.places
			.iter()
			.enumerate()
			.map(|(index, place)| PlacedMarker {
				index,
				at: projection.project(place.longitude, place.latitude),
				count: place.people_count,
			})
			.collect();
		Self {
			transform: MapTransform::default(),
			markers,
			land: Vec::new(),
			focus: None,
			projection,
			transition: None,
			gesture: Gesture::Idle,
		}
	}

	/// Project `outline` as the land layer.
	pub fn set_outline(&mut self, outline: &WorldOutline) {
		self.land = outline
			.rings
			.iter()
			.map(|ring| {
				ring
					.iter()
					.map(|&(lon, lat)| self.projection.project(lon, lat))
					.collect()
			})
			.collect();
	}

	/// Whether the land layer, and so the markers, can be drawn.
	pub fn has_outline(&self) -> bool {
		!self.land.is_empty()
	}

	/// Whether a Prev/Next transition is running.
	pub fn is_animating(&self) -> bool {
		self.transition.is_some()
	}

	fn constrained(&self, t: MapTransform) -> MapTransform {
		t.constrain((MAP_WIDTH, MAP_HEIGHT), self.projection.world_bounds())
	}

	/// Zoom by `factor` keeping the world point under `(sx, sy)` fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		self.transition = None;
		let k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let (wx, wy) = self.transform.to_world((sx, sy));
		let next = MapTransform {
			x: sx - wx * k,
			y: sy - wy * k,
			k,
		};
		self.transform = self.constrained(next);
	}

	/// Zoom one wheel notch at the cursor; `delta_y > 0` zooms out.
	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 {
			1.0 / WHEEL_STEP
		} else {
			WHEEL_STEP
		};
		self.zoom_at(sx, sy, factor);
	}

	/// Start a pan, or a click if the pointer barely moves.
	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		self.transition = None;
		self.gesture = Gesture::Pan {
			start: (sx, sy),
			origin: (self.transform.x, self.transform.y),
			moved: false,
		};
	}

	/// Pan with the pointer, kept inside the world.
	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		let Gesture::Pan {
			start,
			origin,
			ref mut moved,
		} = self.gesture
		else {
			return;
		};
		let (dx, dy) = (sx - start.0, sy - start.1);
		if dx.hypot(dy) > CLICK_SLOP {
			*moved = true;
		}
		let next = MapTransform {
			x: origin.0 + dx,
			y: origin.1 + dy,
			k: self.transform.k,
		};
		self.transform = self.constrained(next);
	}

	/// End the gesture. Returns the place index if it was a click on a marker.
	pub fn pointer_up(&mut self, sx: f64, sy: f64) -> Option<usize> {
		let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
		match gesture {
			Gesture::Pan { moved: false, .. } => self.marker_at(sx, sy),
			_ => None,
		}
	}

	/// Drop the gesture without selecting anything.
	pub fn pointer_leave(&mut self) {
		self.gesture = Gesture::Idle;
	}

	/// Topmost marker under the screen point. Markers are only drawn, and
	/// so only hit, once the outline is in.
	pub fn marker_at(&self, sx: f64, sy: f64) -> Option<usize> {
		if !self.has_outline() {
			return None;
		}
		self.markers
			.iter()
			.rev()
			.find(|m| {
				let (mx, my) = self.transform.to_screen(m.at);
				(mx - sx).hypot(my - sy) <= marker_radius(m.count)
			})
			.map(|m| m.index)
	}

	/// Whether Prev/Next have anything on screen to fly to.
	pub fn can_focus(&self) -> bool {
		self.has_outline() && !self.markers.is_empty()
	}

	/// Fly to the next place, wrapping to the first after the last.
	pub fn focus_next(&mut self) -> Option<usize> {
		let n = self.markers.len();
		let next = match self.focus {
			_ if !self.can_focus() => return None,
			Some(i) => (i + 1) % n,
			None => 0,
		};
		self.fly_to(next);
		Some(next)
	}

	/// Fly to the previous place, wrapping to the last before the first.
	pub fn focus_prev(&mut self) -> Option<usize> {
		let n = self.markers.len();
		let prev = match self.focus {
			_ if !self.can_focus() => return None,
			Some(i) => (i + n - 1) % n,
			None => n - 1,
		};
		self.fly_to(prev);
		Some(prev)
	}

	fn fly_to(&mut self, index: usize) {
		self.focus = Some(index);
		let (px, py) = self.markers[index].at;
		let target = self.constrained(MapTransform {
			x: MAP_WIDTH / 2.0 - px * FOCUS_ZOOM,
			y: MAP_HEIGHT / 2.0 - py * FOCUS_ZOOM,
			k: FOCUS_ZOOM,
		});
		self.transition = Some(Transition {
			from: self.transform,
			to: target,
			elapsed_ms: 0.0,
		});
	}

	/// Advance any running transition by `dt_ms`.
	pub fn tick(&mut self, dt_ms: f64) {
		let Some(mut transition) = self.transition else {
			return;
		};
		transition.elapsed_ms += dt_ms;
		let t = transition.elapsed_ms / TRANSITION_MS;
		if t >= 1.0 {
			self.transform = transition.to;
			self.transition = None;
		} else {
			self.transform = transition.from.lerp(transition.to, ease_cubic_in_out(t));
			self.transition = Some(transition);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::{Person, Place};
	use crate::components::world_map::geo::WorldOutline;

	fn place(lat: f64, lon: f64, people: usize) -> Place {
		Place {
			latitude: lat,
			longitude: lon,
			people_count: people as u32,
			people: (0..people)
				.map(|i| Person {
					phone_number: format!("+1555000{i}"),
					shared_interests: vec!["chess".into()],
				})
				.collect(),
		}
	}

	fn data() -> MapData {
		MapData {
			places: vec![
				place(40.7, -74.0, 2),
				place(51.5, -0.1, 1),
				place(35.7, 139.7, 4),
			],
			error: None,
		}
	}

	fn state() -> MapViewState {
		let mut s = MapViewState::new(&data());
		s.set_outline(&WorldOutline {
			rings: vec![vec![(-10.0, -10.0), (10.0, -10.0), (10.0, 10.0)]],
		});
		s
	}

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-6
	}

	#[test]
	fn marker_radius_grows_with_sqrt_count() {
		assert_eq!(marker_radius(0), 6.0);
		assert_eq!(marker_radius(4), 10.0);
		assert!(marker_radius(9) > marker_radius(4));
	}

	#[test]
	fn easing_hits_endpoints_and_midpoint() {
		assert_eq!(ease_cubic_in_out(0.0), 0.0);
		assert_eq!(ease_cubic_in_out(1.0), 1.0);
		assert!(close(ease_cubic_in_out(0.5), 0.5));
		assert!(ease_cubic_in_out(0.25) < 0.25);
	}

	#[test]
	fn zoom_is_clamped() {
		let mut s = state();
		for _ in 0..50 {
			s.wheel(480.0, 250.0, -1.0);
		}
		assert_eq!(s.transform.k, MAX_ZOOM);
		for _ in 0..50 {
			s.wheel(480.0, 250.0, 1.0);
		}
		assert_eq!(s.transform.k, MIN_ZOOM);
	}

	#[test]
	fn zoom_keeps_cursor_point_fixed_inside_extent() {
		let mut s = state();
		let before = s.transform.to_world((480.0, 250.0));
		s.zoom_at(480.0, 250.0, 2.0);
		let after = s.transform.to_world((480.0, 250.0));
		assert!(close(before.0, after.0) && close(before.1, after.1));
	}

	#[test]
	fn constrain_centres_small_extent_and_clamps_large_one() {
		let viewport = (100.0, 100.0);
		// Extent narrower than the viewport: centred.
		let t = MapTransform {
			x: 500.0,
			y: 0.0,
			k: 1.0,
		}
		.constrain(viewport, ((0.0, 0.0), (50.0, 100.0)));
		assert!(close(t.x, 25.0) && close(t.y, 0.0));

		// Extent wider than the viewport: no empty space at the edges.
		let extent = ((0.0, 0.0), (400.0, 400.0));
		let t = MapTransform {
			x: 80.0,
			y: -1000.0,
			k: 1.0,
		}
		.constrain(viewport, extent);
		assert!(close(t.x, 0.0) && close(t.y, -300.0));
	}

	#[test]
	fn panning_cannot_leave_the_world() {
		let mut s = state();
		s.zoom_at(480.0, 250.0, 4.0);
		s.pointer_down(0.0, 0.0);
		s.pointer_move(100_000.0, 100_000.0);
		let ((x0, y0), _) = Mercator::default().world_bounds();
		let (wx, wy) = s.transform.to_world((0.0, 0.0));
		assert!(wx >= x0 - 1e-6 && wy >= y0 - 1e-6);
	}

	#[test]
	fn prev_and_next_wrap_around() {
		let mut s = state();
		assert_eq!(s.focus_next(), Some(0));
		assert_eq!(s.focus_next(), Some(1));
		assert_eq!(s.focus_next(), Some(2));
		assert_eq!(s.focus_next(), Some(0));
		assert_eq!(s.focus_prev(), Some(2));

		let mut fresh = state();
		assert_eq!(fresh.focus_prev(), Some(2));

		let mut empty = MapViewState::new(&MapData::default());
		empty.set_outline(&WorldOutline {
			rings: vec![vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]],
		});
		assert!(!empty.can_focus());
		assert_eq!(empty.focus_next(), None);
		assert_eq!(empty.focus_prev(), None);
	}

	#[test]
	fn transition_reaches_focus_zoom_after_duration() {
		let mut s = state();
		s.focus_next();
		assert!(s.is_animating());
		s.tick(TRANSITION_MS / 2.0);
		assert!(s.transform.k > MIN_ZOOM && s.transform.k < FOCUS_ZOOM);
		s.tick(TRANSITION_MS);
		assert!(!s.is_animating());
		assert_eq!(s.transform.k, FOCUS_ZOOM);
		let (sx, sy) = s.transform.to_screen(s.markers[0].at);
		assert!(close(sx, MAP_WIDTH / 2.0) && close(sy, MAP_HEIGHT / 2.0));
	}

	#[test]
	fn user_interaction_cancels_transition() {
		let mut s = state();
		s.focus_next();
		s.pointer_down(10.0, 10.0);
		assert!(!s.is_animating());
	}

	#[test]
	fn click_on_marker_selects_it_but_drag_does_not() {
		let mut s = state();
		let (x, y) = s.transform.to_screen(s.markers[2].at);
		s.pointer_down(x, y);
		assert_eq!(s.pointer_up(x, y), Some(2));

		s.pointer_down(x, y);
		s.pointer_move(x + 40.0, y);
		assert_eq!(s.pointer_up(x + 40.0, y), None);

		s.pointer_down(1.0, 499.0);
		assert_eq!(s.pointer_up(1.0, 499.0), None);
	}

	#[test]
	fn undrawn_markers_are_neither_clickable_nor_focusable() {
		let mut s = MapViewState::new(&data());
		assert!(!s.has_outline());
		let (x, y) = s.transform.to_screen(s.markers[0].at);
		s.pointer_down(x, y);
		assert_eq!(s.pointer_up(x, y), None);
		assert!(!s.can_focus());
		assert_eq!(s.focus_next(), None);
		assert_eq!(s.focus_prev(), None);
		assert!(!s.is_animating());
		assert_eq!(s.focus, None);
	}

	#[test]
	fn detail_heading_is_singular_for_one_person() {
		assert_eq!(people_here(1), "1 person here");
		assert_eq!(people_here(3), "3 people here");
		assert_eq!(people_here(0), "0 people here");
	}
}
