//! World outline GeoJSON: decoding, fetching, and the app-wide cache.

use std::sync::Arc;

use gloo_net::http::Request;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};
use serde::Deserialize;

use crate::error::ClientError;

#[derive(Deserialize)]
struct FeatureCollection {
	#[serde(default)]
	features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
	geometry: Option<Geometry>,
}

#[derive(Deserialize)]
struct Geometry {
	#[serde(rename = "type")]
	kind: String,
	#[serde(default)]
	coordinates: serde_json::Value,
}

type Polygon = Vec<Vec<Vec<f64>>>;

/// Country outlines as closed rings of `(lon, lat)` pairs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorldOutline {
	/// Rings with at least three points each.
	pub rings: Vec<Vec<(f64, f64)>>,
}

fn ring(coords: Vec<Vec<f64>>) -> Vec<(f64, f64)> {
	coords
		.into_iter()
		.filter_map(|p| match p.as_slice() {
			[lon, lat, ..] => Some((*lon, *lat)),
			_ => None,
		})
		.collect()
}

impl WorldOutline {
	/// Decode a GeoJSON `FeatureCollection`. Only polygon geometries are kept.
	pub fn from_geojson(json: &str) -> Result<Self, ClientError> {
		let collection: FeatureCollection = serde_json::from_str(json)?;
		let mut rings = Vec::new();
		for geometry in collection.features.into_iter().filter_map(|f| f.geometry) {
			match geometry.kind.as_str() {
				"Polygon" => {
					let polygon: Polygon = serde_json::from_value(geometry.coordinates)?;
					rings.extend(polygon.into_iter().map(ring));
				}
				"MultiPolygon" => {
					let polygons: Vec<Polygon> = serde_json::from_value(geometry.coordinates)?;
					rings.extend(
						polygons
							.into_iter()
							.flat_map(|polygon| polygon.into_iter().map(ring)),
					);
				}
				_ => {}
			}
		}
		rings.retain(|r| r.len() >= 3);
		Ok(Self { rings })
	}
}

/// Download and decode the outline at `url`.
pub async fn fetch_world_outline(url: &str) -> Result<WorldOutline, ClientError> {
	let response = Request::get(url).send().await?;
	if !response.ok() {
		return Err(ClientError::Http {
			status: response.status(),
			message: response.status_text(),
		});
	}
	WorldOutline::from_geojson(&response.text().await?)
}

/// Load state of the shared outline.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum OutlineState {
	/// Nobody has asked for it yet.
	#[default]
	NotRequested,
	/// Download in flight.
	Loading,
	/// Parsed and shared.
	Ready(Arc<WorldOutline>),
	/// Download or parse failed; not retried.
	Failed,
}

/// App-wide outline cache; the download happens at most once.
#[derive(Clone, Copy, Debug)]
pub struct WorldOutlineCache {
	url: StoredValue<String>,
	state: RwSignal<OutlineState>,
}

impl WorldOutlineCache {
	/// Cache for the outline at `url`; nothing is fetched yet.
	pub fn new(url: impl Into<String>) -> Self {
		Self {
			url: StoredValue::new(url.into()),
			state: RwSignal::new(OutlineState::NotRequested),
		}
	}

	/// Outline once loaded; `None` while loading or after a failure.
	pub fn outline(&self) -> Signal<Option<Arc<WorldOutline>>> {
		let state = self.state;
		Signal::derive(move || match state.get() {
			OutlineState::Ready(outline) => Some(outline),
			_ => None,
		})
	}

	/// Start the download unless it has already been requested.
	pub fn ensure_loaded(&self) {
		if self.state.get_untracked() != OutlineState::NotRequested {
			return;
		}
		self.state.set(OutlineState::Loading);
		let (url, state) = (self.url.get_value(), self.state);
		spawn_local(async move {
			match fetch_world_outline(&url).await {
				Ok(outline) => {
					info!("common-ground: world outline loaded, {} rings", outline.rings.len());
					state.set(OutlineState::Ready(Arc::new(outline)));
				}
				Err(e) => {
					warn!("common-ground: failed to load world outline: {}", e);
					state.set(OutlineState::Failed);
				}
			}
		});
	}
}

/// Provide the outline cache for the component tree below.
pub fn provide_world_outline(url: impl Into<String>) -> WorldOutlineCache {
	let cache = WorldOutlineCache::new(url);
	provide_context(cache);
	cache
}

/// The outline cache provided by the app.
pub fn use_world_outline() -> WorldOutlineCache {
	expect_context::<WorldOutlineCache>()
}
