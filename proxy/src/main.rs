//! Proxy entrypoint.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use anyhow::{Context, Result};
use common_ground_proxy::{AppState, ProxyConfig, app};
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
	if let Err(err) = run().await {
		error!(error = %err, "Proxy crashed");
		eprintln!("Proxy crashed: {err:#}");
		std::process::exit(1);
	}
}

async fn run() -> Result<()> {
	init_tracing();
	let config = ProxyConfig::default();
	let client = reqwest::Client::builder()
		.build()
		.context("Failed to build HTTP client")?;
	let state = AppState::new(client, &config);

	let listener = TcpListener::bind(config.listen)
		.await
		.with_context(|| format!("Failed to bind TCP listener on {}", config.listen))?;
	info!(addr = %config.listen, backend = %config.backend_url, "Proxy listening");

	axum::serve(listener, app(state))
		.with_graceful_shutdown(shutdown_signal())
		.await
		.context("Server encountered a fatal error")?;
	Ok(())
}

fn init_tracing() {
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_target(false)
		.compact()
		.init();
}

async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(err) = signal::ctrl_c().await {
			error!(error = %err, "Failed to listen for Ctrl+C");
		}
	};

	#[cfg(unix)]
	let terminate = async {
		use tokio::signal::unix::{SignalKind, signal};

		match signal(SignalKind::terminate()) {
			Ok(mut stream) => {
				stream.recv().await;
			}
			Err(err) => {
				warn!(error = %err, "Failed to install SIGTERM handler");
				std::future::pending::<()>().await;
			}
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => info!("Received Ctrl+C, shutting down"),
		_ = terminate => info!("Received SIGTERM, shutting down"),
	}
}
