//! common-ground: see who shares your interests.
//!
//! A client-side rendered Leptos app compiled to WebAssembly. After logging
//! in with a user ID it shows the user's interest graph, a map of places
//! where people share those interests, or a flat list, all fetched from the
//! backend through the local API proxy.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod api;
pub mod canvas;
pub mod components;
pub mod config;
pub mod error;
pub mod fetch;
pub mod forms;
pub mod pages;
pub mod session;

pub use api::ApiClient;
pub use config::{ClientConfig, load_client_config};
pub use error::ClientError;
pub use session::{Screen, SessionStore, ViewMode};

use components::world_map::provide_world_outline;
use pages::{Dashboard, LoginPage, SignupPage};
use session::provide_session;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("common-ground: logging initialized");
}

/// Top-level page; switching views inside the dashboard does not remount it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mounted {
	Login,
	Signup,
	Dashboard,
}

/// Main application component.
/// Provides the session, API client, and world outline cache, then mounts the
/// screen the session asks for.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_client_config();
	provide_context(ApiClient::new(config.api_base.clone()));
	provide_world_outline(config.world_geojson_url.clone());
	provide_context(config);
	let session = provide_session();
	let screen = session.screen();
	let mounted = Memo::new(move |_| match screen.get() {
		Screen::Login => Mounted::Login,
		Screen::Signup => Mounted::Signup,
		Screen::Main { .. } => Mounted::Dashboard,
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Common Ground" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		{move || match mounted.get() {
			Mounted::Login => view! { <LoginPage /> }.into_any(),
			Mounted::Signup => view! { <SignupPage /> }.into_any(),
			Mounted::Dashboard => view! { <Dashboard /> }.into_any(),
		}}
	}
}
