//! common-ground-proxy: re-exposes the backend's JSON API to the browser.
//!
//! Successful responses are passed through byte for byte. Failures are turned
//! into JSON error payloads the client knows how to display.

use std::sync::Arc;

use axum::Router;

pub mod config;
pub mod error;
pub mod routes;

pub use config::ProxyConfig;
pub use error::ProxyError;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
	client: reqwest::Client,
	backend_url: Arc<str>,
}

impl AppState {
	/// State sharing `client` across handlers, targeting `config.backend_url`.
	pub fn new(client: reqwest::Client, config: &ProxyConfig) -> Self {
		Self {
			client,
			backend_url: Arc::from(config.backend_url.trim_end_matches('/')),
		}
	}

	fn backend_url(&self, path: &str) -> String {
		format!("{}{}", self.backend_url, path)
	}
}

/// The proxy's router.
pub fn app(state: AppState) -> Router {
	Router::new().merge(routes::api_routes()).with_state(state)
}
