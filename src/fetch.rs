//! Request bookkeeping for views that load data asynchronously.
//!
//! Every fetch takes a [`RequestToken`] from the view's [`RequestTracker`].
//! When responses arrive out of order, only the one holding the latest token
//! is applied; older ones are dropped.

use crate::error::ClientError;

/// Identifies one fetch; later tokens compare greater.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Hands out tokens and remembers the latest.
#[derive(Clone, Debug, Default)]
pub struct RequestTracker {
	latest: u64,
}

impl RequestTracker {
	/// Issue a new token, invalidating every token issued before it.
	pub fn issue(&mut self) -> RequestToken {
		self.latest += 1;
		RequestToken(self.latest)
	}

	/// Whether `token` is the latest issued.
	pub fn is_current(&self, token: RequestToken) -> bool {
		token.0 == self.latest
	}
}

/// What a view has to show for its data.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewData<T> {
	/// Nothing requested yet.
	Idle,
	/// A fetch is in flight.
	Loading,
	/// The latest fetch succeeded.
	Ready(T),
	/// Display string of the error. Previously loaded data is gone.
	Failed(String),
}

/// A view's data plus the tracker guarding it.
#[derive(Clone, Debug)]
pub struct ViewSlot<T> {
	tracker: RequestTracker,
	data: ViewData<T>,
}

impl<T> Default for ViewSlot<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> ViewSlot<T> {
	/// An idle slot with no request issued yet.
	pub fn new() -> Self {
		Self {
			tracker: RequestTracker::default(),
			data: ViewData::Idle,
		}
	}

	/// Current state of the view's data.
	pub fn data(&self) -> &ViewData<T> {
		&self.data
	}

	/// Start a fetch: the slot shows loading until the matching response lands.
	pub fn begin(&mut self) -> RequestToken {
		self.data = ViewData::Loading;
		self.tracker.issue()
	}

	/// Apply a response. Returns `false` if `token` was superseded and the
	/// response was discarded.
	pub fn finish(&mut self, token: RequestToken, result: Result<T, ClientError>) -> bool {
		if !self.tracker.is_current(token) {
			return false;
		}
		self.data = match result {
			Ok(data) => ViewData::Ready(data),
			Err(err) => ViewData::Failed(err.to_string()),
		};
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tokens_increase_and_supersede() {
		let mut tracker = RequestTracker::default();
		let first = tracker.issue();
		let second = tracker.issue();
		assert!(second > first);
		assert!(!tracker.is_current(first));
		assert!(tracker.is_current(second));
	}

	#[test]
	fn slot_of_non_default_data_starts_idle() {
		struct Opaque;
		let slot = ViewSlot::<Opaque>::new();
		assert!(matches!(slot.data(), ViewData::Idle));
	}

	#[test]
	fn successful_fetch_becomes_ready() {
		let mut slot = ViewSlot::<Vec<u32>>::default();
		let token = slot.begin();
		assert_eq!(slot.data(), &ViewData::Loading);
		assert!(slot.finish(token, Ok(vec![1, 2])));
		assert_eq!(slot.data(), &ViewData::Ready(vec![1, 2]));
	}

	#[test]
	fn failure_replaces_previous_data() {
		let mut slot = ViewSlot::<Vec<u32>>::default();
		let token = slot.begin();
		slot.finish(token, Ok(vec![7]));

		let token = slot.begin();
		slot.finish(token, Err(ClientError::Network("connection refused".into())));
		assert_eq!(
			slot.data(),
			&ViewData::Failed("Network error: connection refused".into())
		);
	}

	#[test]
	fn stale_response_is_discarded() {
		let mut slot = ViewSlot::<&str>::default();
		let old = slot.begin();
		let new = slot.begin();

		assert!(slot.finish(new, Ok("fresh")));
		assert!(!slot.finish(old, Ok("stale")));
		assert_eq!(slot.data(), &ViewData::Ready("fresh"));
	}

	#[test]
	fn stale_failure_does_not_clobber_newer_data() {
		let mut slot = ViewSlot::<&str>::default();
		let old = slot.begin();
		let new = slot.begin();
		slot.finish(new, Ok("fresh"));
		slot.finish(old, Err(ClientError::Backend("late".into())));
		assert_eq!(slot.data(), &ViewData::Ready("fresh"));
	}
}
