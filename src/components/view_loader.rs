//! Fetching a view's data into a reactive [`ViewSlot`].

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, warn};

use super::panels::{ErrorPanel, LoadingPanel};
use crate::api::{ApiClient, Backend, ViewPayload};
use crate::error::ClientError;
use crate::fetch::{ViewData, ViewSlot};
use crate::session::FetchRequest;

/// Loads the data for one [`FetchRequest`] and keeps the latest result.
pub struct ViewLoader<T: Send + Sync + 'static, B: Send + Sync + 'static = ApiClient> {
	slot: RwSignal<ViewSlot<T>>,
	request: StoredValue<FetchRequest>,
	backend: StoredValue<B>,
}

impl<T: Send + Sync + 'static, B: Send + Sync + 'static> Clone for ViewLoader<T, B> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T: Send + Sync + 'static, B: Send + Sync + 'static> Copy for ViewLoader<T, B> {}

impl<T, B> ViewLoader<T, B>
where
	T: TryFrom<ViewPayload, Error = ClientError> + Clone + Send + Sync + 'static,
	B: Backend + Clone + Send + Sync + 'static,
{
	/// Fetches through the backend provided as context.
	pub fn new(request: FetchRequest) -> Self {
		Self {
			slot: RwSignal::new(ViewSlot::new()),
			request: StoredValue::new(request),
			backend: StoredValue::new(expect_context::<B>()),
		}
	}

	/// Fetch again in the background. A response to an earlier call that
	/// arrives after this one is ignored.
	pub fn reload(&self) {
		if let Some(task) = self.start() {
			spawn_local(task);
		}
	}

	/// Mark the slot as loading and return the task that fetches and applies
	/// the response, or `None` once the owning view is gone.
	pub fn start(self) -> Option<impl Future<Output = ()> + 'static> {
		let token = self.slot.try_update(ViewSlot::begin)?;
		let slot = self.slot;
		let request = self.request.try_get_value()?;
		let backend = self.backend.try_get_value()?;
		debug!(
			"common-ground: loading {} view for {}",
			request.view.label(),
			request.user_id
		);
		Some(async move {
			let result = backend.fetch_view(&request).await.and_then(T::try_from);
			if let Err(e) = &result {
				warn!(
					"common-ground: {} view failed for {}: {}",
					request.view.label(),
					request.user_id,
					e
				);
			}
			if slot.try_update(|s| s.finish(token, result)) == Some(false) {
				debug!("common-ground: dropped stale {} response", request.view.label());
			}
		})
	}

	/// The slot's current data, tracked.
	pub fn data(&self) -> Signal<ViewData<T>> {
		let slot = self.slot;
		Signal::derive(move || slot.with(|s| s.data().clone()))
	}
}

/// Loading panel, error panel, or `ready` applied to the loaded data.
pub fn view_body<T, V>(
	data: ViewData<T>,
	loading_label: &'static str,
	on_retry: Callback<()>,
	ready: impl FnOnce(T) -> V,
) -> AnyView
where
	V: IntoView + 'static,
{
	match data {
		ViewData::Idle | ViewData::Loading => view! { <LoadingPanel label=loading_label /> }.into_any(),
		ViewData::Failed(message) => {
			view! { <ErrorPanel message=message on_retry=on_retry /> }.into_any()
		}
		ViewData::Ready(data) => ready(data).into_any(),
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::sync::atomic::{AtomicU32, Ordering};

	use futures::executor::block_on;

	use super::*;
	use crate::api::{
		GraphData, InterestsData, MapData, SetApiKeyRequest, SetApiKeyResponse,
	};
	use crate::session::{SessionStore, ViewMode};

	/// Counts calls per endpoint; fails every call when `failure` is set, or
	/// with the call's number when `numbered_failures` is.
	#[derive(Clone, Default)]
	struct CountingBackend {
		graph: Arc<AtomicU32>,
		map: Arc<AtomicU32>,
		interests: Arc<AtomicU32>,
		failure: Option<ClientError>,
		numbered_failures: bool,
	}

	impl CountingBackend {
		fn failing(err: ClientError) -> Self {
			Self {
				failure: Some(err),
				..Self::default()
			}
		}

		fn calls(&self) -> (u32, u32, u32) {
			(
				self.graph.load(Ordering::SeqCst),
				self.map.load(Ordering::SeqCst),
				self.interests.load(Ordering::SeqCst),
			)
		}

		fn answer<T: Default>(&self, counter: &AtomicU32) -> Result<T, ClientError> {
			let call = counter.fetch_add(1, Ordering::SeqCst) + 1;
			if self.numbered_failures {
				return Err(ClientError::Backend(format!("call {call}")));
			}
			match &self.failure {
				Some(err) => Err(err.clone()),
				None => Ok(T::default()),
			}
		}
	}

	impl Backend for CountingBackend {
		async fn fetch_graph(&self, _user_id: &str) -> Result<GraphData, ClientError> {
			self.answer(&self.graph)
		}

		async fn fetch_map(&self, _user_id: &str) -> Result<MapData, ClientError> {
			self.answer(&self.map)
		}

		async fn fetch_interests(&self, _user_id: &str) -> Result<InterestsData, ClientError> {
			self.answer(&self.interests)
		}

		async fn set_api_key(
			&self,
			_request: &SetApiKeyRequest,
		) -> Result<SetApiKeyResponse, ClientError> {
			Err(ClientError::validation("views never set keys"))
		}
	}

	#[test]
	fn login_then_mounting_default_view_fetches_graph_once() {
		Owner::new().with(|| {
			let backend = CountingBackend::default();
			provide_context(backend.clone());
			let session = SessionStore::new();

			let request = session.login("  alice ").expect("valid id");
			assert_eq!(request.view, ViewMode::Graph);
			assert_eq!(session.active_request().get_untracked(), Some(request.clone()));
			assert_eq!(backend.calls(), (0, 0, 0));

			let loader = ViewLoader::<GraphData, CountingBackend>::new(request);
			let task = loader.start().expect("loader is alive");
			assert_eq!(loader.data().get_untracked(), ViewData::Loading);
			block_on(task);

			assert_eq!(backend.calls(), (1, 0, 0));
			assert_eq!(
				loader.data().get_untracked(),
				ViewData::Ready(GraphData::default())
			);
		});
	}

	#[test]
	fn rejected_fetch_shows_the_error_message() {
		Owner::new().with(|| {
			let backend = CountingBackend::failing(ClientError::Http {
				status: 404,
				message: "User 'bob' not found".into(),
			});
			provide_context(backend.clone());

			let loader =
				ViewLoader::<InterestsData, CountingBackend>::new(FetchRequest::new("bob", ViewMode::List));
			block_on(loader.start().expect("loader is alive"));

			assert_eq!(backend.calls(), (0, 0, 1));
			assert_eq!(
				loader.data().get_untracked(),
				ViewData::Failed("Request failed with status 404: User 'bob' not found".into())
			);
		});
	}

	#[test]
	fn only_the_latest_refresh_is_applied() {
		Owner::new().with(|| {
			let backend = CountingBackend {
				numbered_failures: true,
				..CountingBackend::default()
			};
			provide_context(backend.clone());
			let loader =
				ViewLoader::<MapData, CountingBackend>::new(FetchRequest::new("carol", ViewMode::Map));
			let first = loader.start().expect("loader is alive");
			let second = loader.start().expect("loader is alive");

			// The later request answers first; the earlier answer lands last.
			block_on(second);
			block_on(first);

			assert_eq!(backend.calls(), (0, 2, 0));
			assert_eq!(
				loader.data().get_untracked(),
				ViewData::Failed("call 1".into())
			);
		});
	}
}
