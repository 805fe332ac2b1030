//! Leptos component for the shared-interest map.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::geo::use_world_outline;
use super::projection::{MAP_HEIGHT, MAP_WIDTH};
use super::render;
use super::state::{MapViewState, people_here};
use crate::api::{MapData, Place};
use crate::canvas::paint;
use crate::components::frame_loop::{context_2d, run_while_attached};

struct MapContext {
	state: MapViewState,
	ctx: CanvasRenderingContext2d,
}

/// Places on a world map. Click a marker for the people there; Prev/Next
/// fly between places.
#[component]
pub fn WorldMap(#[prop(into)] data: Signal<MapData>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<MapContext>>> = Rc::new(RefCell::new(None));
	let selected = RwSignal::new(None::<usize>);
	let focused = RwSignal::new(None::<usize>);
	let started = Rc::new(RefCell::new(false));

	let outline_cache = use_world_outline();
	outline_cache.ensure_loaded();
	let outline = outline_cache.outline();

	let context_init = context.clone();
	Effect::new(move |_| {
		let data = data.get();
		let outline = outline.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas;
		let Some(ctx) = context_2d(&canvas) else {
			warn!("common-ground: map canvas has no 2d context");
			return;
		};
		canvas.set_width(MAP_WIDTH as u32);
		canvas.set_height(MAP_HEIGHT as u32);

		let inconsistent = data.places.iter().filter(|p| !p.is_consistent()).count();
		if inconsistent > 0 {
			warn!(
				"common-ground: {} places report a people_count different from their people list",
				inconsistent
			);
		}
		info!("common-ground: map has {} places", data.places.len());

		let mut state = MapViewState::new(&data);
		if let Some(outline) = outline.as_deref() {
			state.set_outline(outline);
		}
		*context_init.borrow_mut() = Some(MapContext { state, ctx });
		selected.set(None);
		focused.set(None);

		if started.replace(true) {
			return;
		}
		let context_anim = context_init.clone();
		run_while_attached(
			canvas.into(),
			move |dt_ms| {
				if let Some(ref mut c) = *context_anim.borrow_mut() {
					c.state.tick(dt_ms);
					paint(&c.ctx, &render::frame(&c.state));
				}
			},
			None,
		);
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.state.pointer_down(ev.offset_x() as f64, ev.offset_y() as f64);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.state.pointer_move(ev.offset_x() as f64, ev.offset_y() as f64);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let clicked = context_mu
			.borrow_mut()
			.as_mut()
			.and_then(|c| c.state.pointer_up(ev.offset_x() as f64, ev.offset_y() as f64));
		if clicked.is_some() {
			selected.set(clicked);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.pointer_leave();
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			c.state.wheel(ev.offset_x() as f64, ev.offset_y() as f64, ev.delta_y());
		}
	};

	let context_prev = context.clone();
	let on_prev = move |_| {
		let index = context_prev
			.borrow_mut()
			.as_mut()
			.and_then(|c| c.state.focus_prev());
		focused.set(index);
	};

	let context_next = context.clone();
	let on_next = move |_| {
		let index = context_next
			.borrow_mut()
			.as_mut()
			.and_then(|c| c.state.focus_next());
		focused.set(index);
	};

	let place_count = move || data.with(|d| d.places.len());
	let cannot_focus = move || outline.with(Option::is_none) || place_count() == 0;
	let position = move || match focused.get() {
		Some(i) => format!("{} / {}", i + 1, place_count()),
		None => format!("{} places", place_count()),
	};
	let selected_place =
		move || selected.get().and_then(|i| data.with(|d| d.places.get(i).cloned()));

	view! {
		<div class="map-stage">
			<canvas
				node_ref=canvas_ref
				class="world-map-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<div class="map-controls">
				<button on:click=on_prev disabled=cannot_focus>
					"Prev"
				</button>
				<span class="map-position">{position}</span>
				<button on:click=on_next disabled=cannot_focus>
					"Next"
				</button>
			</div>
			{move || {
				selected_place()
					.map(|place| {
						let on_close = Callback::new(move |_| selected.set(None));
						view! { <PlaceDetails place=place on_close=on_close /> }
					})
			}}
		</div>
	}
}

/// Modal listing the people at one place.
#[component]
fn PlaceDetails(place: Place, on_close: Callback<()>) -> impl IntoView {
	let people = place
		.people
		.into_iter()
		.map(|person| {
			let sms = format!("sms:{}", person.phone_number);
			let interests = if person.shared_interests.is_empty() {
				"No shared interests listed".to_string()
			} else {
				person.shared_interests.join(", ")
			};
			view! {
				<li class="place-person">
					<a href=sms>{person.phone_number}</a>
					<span class="place-interests">{interests}</span>
				</li>
			}
		})
		.collect_view();

	view! {
		<div class="modal-backdrop" on:click=move |_| on_close.run(())>
			<div class="modal" on:click=|ev: MouseEvent| ev.stop_propagation()>
				<h3>{people_here(place.people_count)}</h3>
				<p class="place-coords">
					{format!("{:.3}, {:.3}", place.latitude, place.longitude)}
				</p>
				<ul class="place-people">{people}</ul>
			</div>
		</div>
	}
}
