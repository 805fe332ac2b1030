//! Loading and error placeholders shared by every view.

use leptos::prelude::*;

/// Hint shown under every fetch error.
pub const BACKEND_HINT: &str = "Make sure the backend is running on localhost:1234.";

/// Spinner with a caption.
#[component]
pub fn LoadingPanel(#[prop(into)] label: String) -> impl IntoView {
	view! {
		<div class="panel loading-panel">
			<span class="spinner"></span>
			<p>{label}</p>
		</div>
	}
}

/// Replaces a view after a failed fetch. The message is shown verbatim.
#[component]
pub fn ErrorPanel(#[prop(into)] message: String, on_retry: Callback<()>) -> impl IntoView {
	view! {
		<div class="panel error-panel">
			<h3>"Something went wrong"</h3>
			<p class="error-message">{message}</p>
			<p class="error-hint">{BACKEND_HINT}</p>
			<button on:click=move |_| on_retry.run(())>"Try again"</button>
		</div>
	}
}
