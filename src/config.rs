//! Client configuration.
//!
//! Defaults are compiled in. A page may override any field by embedding a
//! JSON object in `<script id="client-config" type="application/json">`.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

/// Base path of the local API proxy, relative to the page origin.
pub const DEFAULT_API_BASE: &str = "/api";

/// Public world boundary dataset used as the map base layer.
pub const DEFAULT_WORLD_GEOJSON_URL: &str =
	"https://raw.githubusercontent.com/holtzy/D3-graph-gallery/master/DATA/world.geojson";

/// How long the signup confirmation stays on screen before returning to login.
pub const DEFAULT_SIGNUP_REDIRECT_MS: u32 = 2000;

const CONFIG_ELEMENT_ID: &str = "client-config";

/// Settings the client reads once at start-up.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
	/// Prefix for every API call, without trailing slash.
	pub api_base: String,
	/// GeoJSON world outline for the map.
	pub world_geojson_url: String,
	/// Delay before a successful signup returns to login.
	pub signup_redirect_ms: u32,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			api_base: DEFAULT_API_BASE.to_string(),
			world_geojson_url: DEFAULT_WORLD_GEOJSON_URL.to_string(),
			signup_redirect_ms: DEFAULT_SIGNUP_REDIRECT_MS,
		}
	}
}

impl ClientConfig {
	/// Parse an override document. Unknown keys are ignored, missing keys keep
	/// their defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		let mut config: Self = serde_json::from_str(json)?;
		config.api_base = config.api_base.trim_end_matches('/').to_string();
		Ok(config)
	}
}

fn config_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load the configuration from the DOM, falling back to defaults.
pub fn load_client_config() -> ClientConfig {
	let Some(text) = config_text() else {
		return ClientConfig::default();
	};
	match ClientConfig::from_json(&text) {
		Ok(config) => {
			info!("common-ground: using api base {}", config.api_base);
			config
		}
		Err(e) => {
			warn!("common-ground: ignoring malformed client config: {}", e);
			ClientConfig::default()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_override_keeps_defaults() {
		let config = ClientConfig::from_json(r#"{"api_base": "http://localhost:3001/api/"}"#)
			.expect("valid config");
		assert_eq!(config.api_base, "http://localhost:3001/api");
		assert_eq!(config.world_geojson_url, DEFAULT_WORLD_GEOJSON_URL);
		assert_eq!(config.signup_redirect_ms, DEFAULT_SIGNUP_REDIRECT_MS);
	}

	#[test]
	fn malformed_override_is_an_error() {
		assert!(ClientConfig::from_json(r#"{"signup_redirect_ms": "soon"}"#).is_err());
	}
}
