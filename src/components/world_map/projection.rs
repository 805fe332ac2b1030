//! Spherical Mercator projection onto the fixed map canvas.

use std::f64::consts::PI;

/// Canvas width in pixels.
pub const MAP_WIDTH: f64 = 960.0;
/// Canvas height in pixels.
pub const MAP_HEIGHT: f64 = 500.0;
/// Latitudes beyond this are clamped; Mercator diverges at the poles.
pub const MAX_LATITUDE: f64 = 85.0;

/// Mercator projection with a scale, a centre in degrees, and a pixel
/// translation for that centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mercator {
	/// Pixels per radian.
	pub scale: f64,
	/// `(lon, lat)` in degrees mapped to `translate`.
	pub center: (f64, f64),
	/// Pixel position of `center`.
	pub translate: (f64, f64),
}

impl Default for Mercator {
	fn default() -> Self {
		Self {
			scale: 150.0,
			center: (0.0, 20.0),
			translate: (MAP_WIDTH / 2.0, MAP_HEIGHT / 2.0),
		}
	}
}

fn raw_y(lat: f64) -> f64 {
	let phi = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
	(PI / 4.0 + phi / 2.0).tan().ln()
}

impl Mercator {
	/// Pixel position of `(lon, lat)` in degrees.
	pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
		let x = self.scale * (lon - self.center.0).to_radians() + self.translate.0;
		let y = self.translate.1 - self.scale * (raw_y(lat) - raw_y(self.center.1));
		(x, y)
	}

	/// Projected bounding box of the whole world, `(min, max)` corners.
	pub fn world_bounds(&self) -> ((f64, f64), (f64, f64)) {
		(
			self.project(-180.0, MAX_LATITUDE),
			self.project(180.0, -MAX_LATITUDE),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-6
	}

	#[test]
	fn centre_projects_to_translate() {
		let m = Mercator::default();
		let (x, y) = m.project(0.0, 20.0);
		assert!(close(x, 480.0) && close(y, 250.0));
	}

	#[test]
	fn longitude_is_linear() {
		let m = Mercator::default();
		let (x, _) = m.project(180.0, 0.0);
		assert!(close(x, 480.0 + 150.0 * PI));
	}

	#[test]
	fn north_is_up_and_poles_are_clamped() {
		let m = Mercator::default();
		let (_, north) = m.project(0.0, 60.0);
		let (_, south) = m.project(0.0, -60.0);
		assert!(north < south);
		assert_eq!(m.project(10.0, 90.0), m.project(10.0, 85.0));
		assert!(m.project(0.0, -90.0).1.is_finite());
	}

	#[test]
	fn world_bounds_contain_projected_points() {
		let m = Mercator::default();
		let ((x0, y0), (x1, y1)) = m.world_bounds();
		for (lon, lat) in [(-122.4, 37.8), (151.2, -33.9), (0.0, 0.0)] {
			let (x, y) = m.project(lon, lat);
			assert!(x0 <= x && x <= x1 && y0 <= y && y <= y1);
		}
	}
}
