//! Leptos component wrapping the force-directed graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel event
//! handlers for node dragging, panning, and zooming. An animation loop runs via
//! `requestAnimationFrame`, stepping the simulation and painting each frame
//! until the canvas leaves the document.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::scale::ScaleConfig;
use super::state::{ForceGraphState, Tooltip};
use super::theme::Theme;
use super::types::GraphInput;
use crate::api::GraphData;
use crate::canvas::paint;
use crate::components::frame_loop::{context_2d, parent_size, run_while_attached};

const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);

/// Bundles graph simulation state with visual configuration.
struct GraphContext {
	state: ForceGraphState,
	scale: ScaleConfig,
	theme: Theme,
	ctx: CanvasRenderingContext2d,
	tooltip: Option<Tooltip>,
}

/// Renders the interest graph of `current_user` on a canvas sized to its
/// parent, resizing with the window.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(into)] current_user: String,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let tooltip = RwSignal::new(None::<Tooltip>);
	let started = Rc::new(RefCell::new(false));

	let context_init = context.clone();
	Effect::new(move |_| {
		let data = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas;
		let Some(ctx) = context_2d(&canvas) else {
			warn!("common-ground: canvas has no 2d context");
			return;
		};

		let (w, h) = parent_size(&canvas, FALLBACK_SIZE);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let input = GraphInput::from_response(&data, &current_user);
		if input.dropped_links > 0 || input.dropped_nodes > 0 {
			warn!(
				"common-ground: dropped {} dangling edges and {} duplicate nodes",
				input.dropped_links, input.dropped_nodes
			);
		}
		let state = ForceGraphState::new(&input, w, h);
		info!(
			"common-ground: graph has {} nodes, {} edges",
			state.node_count(),
			state.edge_count()
		);
		*context_init.borrow_mut() = Some(GraphContext {
			state,
			scale: ScaleConfig::default(),
			theme: Theme::default(),
			ctx,
			tooltip: None,
		});
		tooltip.set(None);

		if started.replace(true) {
			return;
		}

		let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
		let on_resize = move || {
			let (nw, nh) = parent_size(&canvas_resize, FALLBACK_SIZE);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.state.resize(nw, nh);
			}
		};

		let context_anim = context_init.clone();
		// Physics runs at a fixed step regardless of frame timing.
		let on_frame = move |_dt_ms: f64| {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.state.tick(0.016);
				paint(&c.ctx, &render::frame(&c.state, &c.scale, &c.theme));
				let next = c.state.tooltip();
				if next != c.tooltip {
					c.tooltip = next.clone();
					tooltip.set(next);
				}
			}
		};

		run_while_attached(canvas.into(), on_frame, Some(Box::new(on_resize)));
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let (x, y) = (ev.offset_x() as f64, ev.offset_y() as f64);
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.state.pointer_down(x, y, &c.scale);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let (x, y) = (ev.offset_x() as f64, ev.offset_y() as f64);
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.state.pointer_move(x, y, &c.scale);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.state.pointer_up();
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
		let (x, y) = (ev.offset_x() as f64, ev.offset_y() as f64);
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			c.state.wheel(x, y, ev.delta_y(), &c.scale);
		}
	};

	let context_reset = context.clone();
	let on_reset = move |_| {
		if let Some(ref mut c) = *context_reset.borrow_mut() {
			c.state.reset_view();
		}
	};

	view! {
		<div class="graph-stage">
			<canvas
				node_ref=canvas_ref
				class="force-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			{move || {
				tooltip
					.get()
					.map(|t| {
						view! {
							<div
								class="graph-tooltip"
								style:left=format!("{}px", t.at.0 + 12.0)
								style:top=format!("{}px", t.at.1 - 12.0)
							>
								{t.text}
							</div>
						}
					})
			}}
			<button class="graph-reset" on:click=on_reset>
				"Reset View"
			</button>
			<ul class="graph-legend">
				<li class="legend-you">"You"</li>
				<li class="legend-person">"Person"</li>
				<li class="legend-interest">"Interest"</li>
				<li class="legend-place">"Place"</li>
			</ul>
		</div>
	}
}
