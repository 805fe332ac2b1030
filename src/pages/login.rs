//! Login screen: a single user ID field.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::session::use_session;

/// Login form taking a user id.
#[component]
pub fn LoginPage() -> impl IntoView {
	let session = use_session();
	let user_id = RwSignal::new(String::new());
	let error = RwSignal::new(None::<String>);
	let pending = RwSignal::new(false);

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		if pending.get_untracked() {
			return;
		}
		error.set(None);
		pending.set(true);
		let id = user_id.get_untracked();
		// Let the spinner render before the dashboard replaces this screen.
		spawn_local(async move {
			if let Err(e) = session.login(&id) {
				error.set(Some(e.to_string()));
				pending.set(false);
			}
		});
	};

	view! {
		<div class="auth-screen">
			<form class="auth-card" on:submit=on_submit>
				<h1>"Common Ground"</h1>
				<p class="subtitle">"See who shares your interests, and where."</p>
				<label for="login-user-id">"User ID"</label>
				<input
					id="login-user-id"
					type="text"
					autocomplete="username"
					prop:value=move || user_id.get()
					on:input=move |ev| user_id.set(event_target_value(&ev))
				/>
				{move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
				<button type="submit" disabled=move || pending.get()>
					{move || if pending.get() { "Signing in…" } else { "Sign in" }}
				</button>
				<p class="auth-switch">
					"New here? "
					<a href="#" on:click=move |ev| {
						ev.prevent_default();
						session.show_signup();
					}>"Create an account"</a>
				</p>
			</form>
		</div>
	}
}
