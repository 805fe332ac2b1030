//! Map of places where people share the user's interests.
//!
//! The base map is a Mercator projection of a world outline GeoJSON that is
//! downloaded once and shared through [`WorldOutlineCache`]. Markers, pan and
//! zoom, and the Prev/Next fly-to transitions live in [`MapViewState`].

mod component;
mod geo;
mod projection;
mod render;
mod state;

pub use component::WorldMap;
pub use geo::{WorldOutline, WorldOutlineCache, provide_world_outline};
pub use projection::Mercator;
pub use state::{MapTransform, MapViewState, marker_radius};
