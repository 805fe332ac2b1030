//! Signup screen: stores the user's API key on the backend.

use gloo_timers::future::TimeoutFuture;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::forms::{SignupForm, submit_signup};
use crate::session::use_session;

const DEFAULT_CONFIRMATION: &str = "API key saved";

/// Signup form; returns to login after a successful call.
#[component]
pub fn SignupPage() -> impl IntoView {
	let session = use_session();
	let client = expect_context::<ApiClient>();
	let redirect_ms = expect_context::<ClientConfig>().signup_redirect_ms;

	let user_id = RwSignal::new(String::new());
	let api_key = RwSignal::new(String::new());
	let error = RwSignal::new(None::<String>);
	let success = RwSignal::new(None::<String>);
	let pending = RwSignal::new(false);

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		if pending.get_untracked() || success.get_untracked().is_some() {
			return;
		}
		let form = SignupForm {
			user_id: user_id.get_untracked(),
			api_key: api_key.get_untracked(),
		};
		// Empty fields are rejected here without a network call.
		if let Err(e) = form.validate() {
			error.set(Some(e.to_string()));
			return;
		}
		error.set(None);
		pending.set(true);
		let client = client.clone();
		spawn_local(async move {
			match submit_signup(&client, &form).await {
				Ok(message) => {
					let message = if message.is_empty() {
						DEFAULT_CONFIRMATION.to_string()
					} else {
						message
					};
					success.set(Some(message));
					pending.set(false);
					TimeoutFuture::new(redirect_ms).await;
					session.show_login();
				}
				Err(e) => {
					if !e.is_validation() {
						warn!("common-ground: signup failed: {}", e);
					}
					error.set(Some(e.to_string()));
					pending.set(false);
				}
			}
		});
	};

	view! {
		<div class="auth-screen">
			<form class="auth-card" on:submit=on_submit>
				<h1>"Create an account"</h1>
				<label for="signup-user-id">"User ID"</label>
				<input
					id="signup-user-id"
					type="text"
					autocomplete="username"
					prop:value=move || user_id.get()
					on:input=move |ev| user_id.set(event_target_value(&ev))
				/>
				<label for="signup-api-key">"API key"</label>
				<input
					id="signup-api-key"
					type="password"
					autocomplete="off"
					prop:value=move || api_key.get()
					on:input=move |ev| api_key.set(event_target_value(&ev))
				/>
				{move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
				{move || {
					success
						.get()
						.map(|msg| {
							view! {
								<p class="form-success">{msg} " Returning to sign in…"</p>
							}
						})
				}}
				<button type="submit" disabled=move || pending.get() || success.get().is_some()>
					{move || if pending.get() { "Creating account…" } else { "Create account" }}
				</button>
				<p class="auth-switch">
					"Already registered? "
					<a href="#" on:click=move |ev| {
						ev.prevent_default();
						session.show_login();
					}>"Sign in"</a>
				</p>
			</form>
		</div>
	}
}
