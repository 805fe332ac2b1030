//! `requestAnimationFrame` loop bound to the lifetime of a DOM element.
//!
//! The loop and an optional window `resize` listener keep running while the
//! element is attached to the document. On the first frame after it has been
//! detached, the listener is removed and both closures are released.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::task::spawn_local;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlCanvasElement};

type JsCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Longest frame delta passed on, so a backgrounded tab does not jump ahead.
const MAX_FRAME_MS: f64 = 100.0;

/// Start calling `on_frame` with the milliseconds since the previous frame,
/// once per animation frame until `element` leaves the document. `on_resize`
/// runs on every window resize in the meantime.
pub fn run_while_attached(
	element: Element,
	mut on_frame: impl FnMut(f64) + 'static,
	on_resize: Option<Box<dyn FnMut()>>,
) {
	let Some(window) = web_sys::window() else {
		warn!("common-ground: no window, animation loop not started");
		return;
	};

	let resize: JsCallback = Rc::new(RefCell::new(on_resize.map(Closure::wrap)));
	if let Some(cb) = resize.borrow().as_ref() {
		if window
			.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
			.is_err()
		{
			warn!("common-ground: could not register resize listener");
		}
	}

	let animate: JsCallback = Rc::new(RefCell::new(None));
	let animate_inner = animate.clone();
	let mut last = js_sys::Date::now();
	*animate.borrow_mut() = Some(Closure::new(move || {
		let Some(window) = web_sys::window() else {
			return;
		};
		if !element.is_connected() {
			let frame = animate_inner.borrow_mut().take();
			let listener = resize.borrow_mut().take();
			if let Some(cb) = listener.as_ref() {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
			debug!("common-ground: element detached, animation loop stopped");
			// Still inside `frame`; release it once this call has returned.
			spawn_local(async move {
				drop(frame);
				drop(listener);
			});
			return;
		}

		let now = js_sys::Date::now();
		on_frame((now - last).clamp(0.0, MAX_FRAME_MS));
		last = now;

		if let Some(cb) = animate_inner.borrow().as_ref() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	}));

	if let Some(cb) = animate.borrow().as_ref() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

/// Size of the canvas's parent element, or `fallback` when detached.
pub fn parent_size(canvas: &HtmlCanvasElement, fallback: (f64, f64)) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|(w, h)| *w > 0.0 && *h > 0.0)
		.unwrap_or(fallback)
}

/// The 2d context of `canvas`, if the browser provides one.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<web_sys::CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into().ok())
}
