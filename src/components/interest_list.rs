//! Flat list of the user's interests and who shares them.

use leptos::prelude::*;
use log::warn;

use crate::api::InterestsData;

/// Shown instead of cards when the user has no interests.
pub const NO_INTERESTS: &str = "No interests found";
/// Shown on a card nobody else shares.
pub const NO_SHARERS: &str = "No one else shares this interest yet";

/// One rendered interest group.
#[derive(Clone, Debug, PartialEq)]
pub struct InterestCard {
	/// Name of the interest.
	pub interest: String,
	/// "`n` people sharing", singular for one.
	pub summary: String,
	/// Numbers of the people sharing it, in backend order.
	pub phone_numbers: Vec<String>,
	/// Replaces the number list when it is empty.
	pub empty_note: Option<&'static str>,
}

/// What the list view shows.
#[derive(Clone, Debug, PartialEq)]
pub enum ListContent {
	/// Message shown instead of an empty list.
	Empty(&'static str),
	/// One card per interest group.
	Cards(Vec<InterestCard>),
}

fn sharing_summary(count: u32) -> String {
	if count == 1 {
		"1 person sharing".to_string()
	} else {
		format!("{} people sharing", count)
	}
}

/// Cards in backend order.
pub fn interest_cards(data: &InterestsData) -> Vec<InterestCard> {
	data.interests
		.iter()
		.map(|group| InterestCard {
			interest: group.interest.clone(),
			summary: sharing_summary(group.count),
			phone_numbers: group
				.people_sharing
				.iter()
				.map(|p| p.phone_number.clone())
				.collect(),
			empty_note: group.people_sharing.is_empty().then_some(NO_SHARERS),
		})
		.collect()
}

/// Cards for `data`, or the empty-state message when there are none.
pub fn list_content(data: &InterestsData) -> ListContent {
	let cards = interest_cards(data);
	if cards.is_empty() {
		ListContent::Empty(NO_INTERESTS)
	} else {
		ListContent::Cards(cards)
	}
}

/// One card per interest, or the empty-state message.
#[component]
pub fn InterestList(#[prop(into)] data: Signal<InterestsData>) -> impl IntoView {
	Effect::new(move |_| {
		let inconsistent = data.with(|d| d.interests.iter().filter(|g| !g.is_consistent()).count());
		if inconsistent > 0 {
			warn!(
				"common-ground: {} interests report a count different from their sharer list",
				inconsistent
			);
		}
	});

	view! {
		<div class="interest-list">
			{move || match data.with(list_content) {
				ListContent::Empty(message) => view! { <p class="empty">{message}</p> }.into_any(),
				ListContent::Cards(cards) => {
					cards
						.into_iter()
						.map(|card| view! { <InterestCardView card=card /> })
						.collect_view()
						.into_any()
				}
			}}
		</div>
	}
}

#[component]
fn InterestCardView(card: InterestCard) -> impl IntoView {
	let people = if let Some(note) = card.empty_note {
		view! { <p class="no-sharers">{note}</p> }.into_any()
	} else {
		view! {
			<ul class="sharers">
				{card
					.phone_numbers
					.into_iter()
					.map(|number| view! { <li>{number}</li> })
					.collect_view()}
			</ul>
		}
		.into_any()
	};

	view! {
		<section class="interest-card">
			<h3>{card.interest}</h3>
			<p class="sharing-count">{card.summary}</p>
			{people}
		</section>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::{InterestGroup, Sharer};

	fn group(interest: &str, numbers: &[&str]) -> InterestGroup {
		InterestGroup {
			interest: interest.into(),
			count: numbers.len() as u32,
			people_sharing: numbers
				.iter()
				.map(|n| Sharer {
					phone_number: n.to_string(),
				})
				.collect(),
		}
	}

	#[test]
	fn group_of_three_lists_every_number() {
		let data = InterestsData {
			interests: vec![group("chess", &["+1", "+2", "+3"])],
			error: None,
		};
		let cards = interest_cards(&data);
		assert_eq!(cards.len(), 1);
		assert_eq!(cards[0].summary, "3 people sharing");
		assert_eq!(cards[0].phone_numbers, vec!["+1", "+2", "+3"]);
	}

	#[test]
	fn singular_and_empty_groups() {
		let data = InterestsData {
			interests: vec![group("go", &["+9"]), group("knitting", &[])],
			error: None,
		};
		let cards = interest_cards(&data);
		assert_eq!(cards[0].summary, "1 person sharing");
		assert_eq!(cards[0].empty_note, None);
		assert_eq!(cards[1].summary, "0 people sharing");
		assert!(cards[1].phone_numbers.is_empty());
		assert_eq!(cards[1].empty_note, Some(NO_SHARERS));
	}

	#[test]
	fn backend_order_is_preserved() {
		let data = InterestsData {
			interests: vec![group("b", &["+1", "+2"]), group("a", &["+3"])],
			error: None,
		};
		let names: Vec<_> = interest_cards(&data).into_iter().map(|c| c.interest).collect();
		assert_eq!(names, vec!["b", "a"]);
	}

	#[test]
	fn empty_data_shows_no_interests_message() {
		let data = InterestsData::default();
		assert!(interest_cards(&data).is_empty());
		assert_eq!(list_content(&data), ListContent::Empty(NO_INTERESTS));
		assert_eq!(NO_INTERESTS, "No interests found");
	}

	#[test]
	fn non_empty_data_shows_cards() {
		let data = InterestsData {
			interests: vec![group("chess", &["+1"])],
			error: None,
		};
		assert!(matches!(list_content(&data), ListContent::Cards(cards) if cards.len() == 1));
	}
}
