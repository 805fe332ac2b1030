//! Session and view-mode state.
//!
//! [`Session`] is plain data so transitions can be tested without a reactive
//! runtime. [`SessionStore`] wraps it in a signal and is provided as context
//! for the lifetime of the app. Nothing here is persisted: a reload starts
//! from [`Session::default`].

use leptos::prelude::*;
use log::info;

use crate::error::ClientError;

/// Top-level views available once logged in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
	/// Force-directed interest graph.
	#[default]
	Graph,
	/// Places on a world map.
	Map,
	/// Flat list of interests.
	List,
}

impl ViewMode {
	/// Every mode, in tab order.
	pub const ALL: [ViewMode; 3] = [ViewMode::Graph, ViewMode::Map, ViewMode::List];

	/// Tab caption.
	pub fn label(self) -> &'static str {
		match self {
			ViewMode::Graph => "Graph",
			ViewMode::Map => "Map",
			ViewMode::List => "List",
		}
	}
}

/// Which unauthenticated screen is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthScreen {
	/// Sign in with a user id.
	#[default]
	Login,
	/// Store an API key.
	Signup,
}

/// What the app should mount right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
	/// Login form.
	Login,
	/// Signup form.
	Signup,
	/// Logged-in dashboard.
	Main {
		/// The logged-in user.
		user_id: String,
		/// The view being shown.
		view: ViewMode,
	},
}

/// A single fetch of one view's data for one user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
	/// User whose data is fetched.
	pub user_id: String,
	/// View the data is for.
	pub view: ViewMode,
}

impl FetchRequest {
	/// Request for `view` of `user_id`.
	pub fn new(user_id: impl Into<String>, view: ViewMode) -> Self {
		Self {
			user_id: user_id.into(),
			view,
		}
	}
}

/// Who is logged in and what they are looking at.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
	current_user: Option<String>,
	view: ViewMode,
	auth_screen: AuthScreen,
}

impl Session {
	/// The logged-in user id.
	pub fn current_user(&self) -> Option<&str> {
		self.current_user.as_deref()
	}

	/// Log `id` in and return the request for the default view.
	pub fn login(&mut self, id: &str) -> Result<FetchRequest, ClientError> {
		let id = crate::forms::validate_user_id(id)?;
		self.current_user = Some(id.clone());
		self.view = ViewMode::default();
		Ok(FetchRequest::new(id, self.view))
	}

	/// Forget the user and return to the login screen.
	pub fn logout(&mut self) {
		self.reset();
	}

	/// Back to the state of a freshly loaded page.
	pub fn reset(&mut self) {
		*self = Self::default();
	}

	/// Only changes the mode; the mounted view does its own fetching.
	pub fn switch_view(&mut self, mode: ViewMode) {
		self.view = mode;
	}

	/// Switch to the signup form while logged out.
	pub fn show_signup(&mut self) {
		self.auth_screen = AuthScreen::Signup;
	}

	/// Switch to the login form while logged out.
	pub fn show_login(&mut self) {
		self.auth_screen = AuthScreen::Login;
	}

	/// What to mount for this state.
	pub fn screen(&self) -> Screen {
		match (&self.current_user, self.auth_screen) {
			(Some(user_id), _) => Screen::Main {
				user_id: user_id.clone(),
				view: self.view,
			},
			(None, AuthScreen::Login) => Screen::Login,
			(None, AuthScreen::Signup) => Screen::Signup,
		}
	}

	/// The fetch the mounted view is responsible for, if logged in.
	pub fn active_request(&self) -> Option<FetchRequest> {
		self.current_user()
			.map(|user_id| FetchRequest::new(user_id, self.view))
	}
}

/// Reactive handle to the app's single [`Session`].
#[derive(Clone, Copy, Debug)]
pub struct SessionStore(RwSignal<Session>);

impl SessionStore {
	/// A logged-out session.
	pub fn new() -> Self {
		Self(RwSignal::new(Session::default()))
	}

	/// Tracked [`Session::screen`].
	pub fn screen(&self) -> Signal<Screen> {
		let session = self.0;
		Signal::derive(move || session.with(Session::screen))
	}

	/// Tracked [`Session::active_request`].
	pub fn active_request(&self) -> Signal<Option<FetchRequest>> {
		let session = self.0;
		Signal::derive(move || session.with(Session::active_request))
	}

	/// Log in as `id`; see [`Session::login`].
	pub fn login(&self, id: &str) -> Result<FetchRequest, ClientError> {
		let mut result = Err(ClientError::validation("Session is no longer available"));
		self.0.update(|s| result = s.login(id));
		if let Ok(request) = &result {
			info!(
				"common-ground: {} logged in, loading {} view",
				request.user_id,
				request.view.label()
			);
		}
		result
	}

	/// Log out and reset everything.
	pub fn logout(&self) {
		info!("common-ground: logged out");
		self.0.update(Session::logout);
	}

	/// Show `mode`; the view fetches when it mounts.
	pub fn switch_view(&self, mode: ViewMode) {
		self.0.update(|s| s.switch_view(mode));
	}

	/// Show the signup form.
	pub fn show_signup(&self) {
		self.0.update(Session::show_signup);
	}

	/// Show the login form.
	pub fn show_login(&self) {
		self.0.update(Session::show_login);
	}
}

impl Default for SessionStore {
	fn default() -> Self {
		Self::new()
	}
}

/// Provide a fresh session for the component tree below.
pub fn provide_session() -> SessionStore {
	let store = SessionStore::new();
	provide_context(store);
	store
}

/// The session provided by the app.
pub fn use_session() -> SessionStore {
	expect_context::<SessionStore>()
}
