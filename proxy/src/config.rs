//! Proxy settings. There is no config file; the defaults match the backend's
//! fixed port and the dev server's `/api` forwarding target.

use std::net::{Ipv4Addr, SocketAddr};

/// Port the backend service listens on.
pub const BACKEND_PORT: u16 = 1234;
/// Port the proxy listens on.
pub const LISTEN_PORT: u16 = 3001;

/// Where to listen and where the backend is.
#[derive(Clone, Debug, PartialEq)]
pub struct ProxyConfig {
	/// Local address to bind.
	pub listen: SocketAddr,
	/// Backend origin, without trailing slash.
	pub backend_url: String,
}

impl Default for ProxyConfig {
	fn default() -> Self {
		Self {
			listen: SocketAddr::from((Ipv4Addr::LOCALHOST, LISTEN_PORT)),
			backend_url: format!("http://localhost:{BACKEND_PORT}"),
		}
	}
}

impl ProxyConfig {
	/// Same settings with another backend origin.
	pub fn with_backend(mut self, url: impl Into<String>) -> Self {
		self.backend_url = url.into().trim_end_matches('/').to_string();
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_point_at_local_backend() {
		let config = ProxyConfig::default();
		assert_eq!(config.listen.to_string(), "127.0.0.1:3001");
		assert_eq!(config.backend_url, "http://localhost:1234");
	}

	#[test]
	fn backend_url_drops_trailing_slash() {
		let config = ProxyConfig::default().with_backend("http://10.0.0.2:1234/");
		assert_eq!(config.backend_url, "http://10.0.0.2:1234");
	}
}
