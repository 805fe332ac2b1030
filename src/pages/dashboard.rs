//! Logged-in screen: view tabs, logout, and the active view.

use leptos::prelude::*;

use crate::api::{ApiClient, GraphData, InterestsData, MapData};
use crate::components::force_graph::ForceGraphCanvas;
use crate::components::interest_list::InterestList;
use crate::components::view_loader::{ViewLoader, view_body};
use crate::components::world_map::WorldMap;
use crate::session::{FetchRequest, ViewMode, use_session};

/// Logged-in screen with the view tabs and the active view.
#[component]
pub fn Dashboard() -> impl IntoView {
	let session = use_session();
	let active = session.active_request();
	let request = Memo::new(move |_| active.get());
	let user = move || request.get().map(|r| r.user_id).unwrap_or_default();

	let tabs = ViewMode::ALL
		.into_iter()
		.map(|mode| {
			let active = move || request.get().is_some_and(|r| r.view == mode);
			view! {
				<button
					class="view-tab"
					class:active=active
					on:click=move |_| session.switch_view(mode)
				>
					{mode.label()}
				</button>
			}
		})
		.collect_view();

	view! {
		<div class="dashboard">
			<header class="dashboard-header">
				<h1>"Common Ground"</h1>
				<nav class="view-tabs">{tabs}</nav>
				<span class="current-user">{user}</span>
				<button class="logout" on:click=move |_| session.logout()>
					"Log out"
				</button>
			</header>
			<main class="dashboard-body">
				{move || {
					request
						.get()
						.map(|request| match request.view {
							ViewMode::Graph => view! { <GraphView request=request /> }.into_any(),
							ViewMode::Map => view! { <MapView request=request /> }.into_any(),
							ViewMode::List => view! { <ListView request=request /> }.into_any(),
						})
				}}
			</main>
		</div>
	}
}

#[component]
fn RefreshBar(on_refresh: Callback<()>) -> impl IntoView {
	view! {
		<div class="refresh-bar">
			<button on:click=move |_| on_refresh.run(())>"Refresh"</button>
		</div>
	}
}

#[component]
fn GraphView(request: FetchRequest) -> impl IntoView {
	let user = request.user_id.clone();
	let loader = ViewLoader::<GraphData, ApiClient>::new(request);
	loader.reload();
	let reload = Callback::new(move |_| loader.reload());
	let data = loader.data();

	view! {
		<RefreshBar on_refresh=reload />
		{move || {
			let user = user.clone();
			view_body(
				data.get(),
				"Loading graph…",
				reload,
				move |graph| {
					view! {
						<ForceGraphCanvas data=Signal::derive(move || graph.clone()) current_user=user />
					}
				},
			)
		}}
	}
}

#[component]
fn MapView(request: FetchRequest) -> impl IntoView {
	let loader = ViewLoader::<MapData, ApiClient>::new(request);
	loader.reload();
	let reload = Callback::new(move |_| loader.reload());
	let data = loader.data();

	view! {
		<RefreshBar on_refresh=reload />
		{move || {
			view_body(
				data.get(),
				"Loading map…",
				reload,
				|map| view! { <WorldMap data=Signal::derive(move || map.clone()) /> },
			)
		}}
	}
}

#[component]
fn ListView(request: FetchRequest) -> impl IntoView {
	let loader = ViewLoader::<InterestsData, ApiClient>::new(request);
	loader.reload();
	let reload = Callback::new(move |_| loader.reload());
	let data = loader.data();

	view! {
		<RefreshBar on_refresh=reload />
		{move || {
			view_body(
				data.get(),
				"Loading interests…",
				reload,
				|interests| view! { <InterestList data=Signal::derive(move || interests.clone()) /> },
			)
		}}
	}
}
