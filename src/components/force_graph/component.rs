use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use leptos::callback::{Callable, Callback};
use leptos::prelude::*;
use log::{debug, error, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::ForceGraphState;
use crate::explorer::{Corpus, Entry, ExplorerConfig};

type SharedState = Rc<RefCell<Option<ForceGraphState>>>;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Expandable lexicon graph drawn on a canvas.
///
/// Starts from one random entry of `corpus`. Clicking a node reveals the
/// entries it references and reports the clicked entry through `on_select`.
/// Dragging pins a node, the wheel zooms and dragging the background pans.
#[component]
pub fn ForceGraphCanvas(
	corpus: Arc<Corpus>,
	#[prop(optional)] config: ExplorerConfig,
	#[prop(optional)] seed: Option<u64>,
	#[prop(optional, into)] on_select: Option<Callback<Entry>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let (init_error, set_init_error) = signal(None::<String>);
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if state_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => return,
			},
			_ => {
				error!("canvas has no 2d context");
				return;
			}
		};

		let seed = seed.unwrap_or_else(|| (js_sys::Math::random() * u64::MAX as f64) as u64);
		let mut rng = SmallRng::seed_from_u64(seed);
		match ForceGraphState::new(corpus.clone(), config.clone(), &mut rng, w, h) {
			Ok(s) => *state_init.borrow_mut() = Some(s),
			Err(e) => {
				error!("cannot start exploring: {e}");
				set_init_error.set(Some(e.to_string()));
				return;
			}
		}

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Ok(mut guard) = state_anim.try_borrow_mut() {
				if let Some(ref mut s) = *guard {
					s.tick(0.016);
					render::render(s, &ctx);
				}
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			if let Some(id) = s.node_at_position(x, y) {
				s.begin_drag(id, x, y);
			} else {
				s.begin_pan(x, y);
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.drag.active {
				s.drag_to(x, y);
			} else if s.pan.active {
				s.pan_to(x, y);
			}
		}
	};

	// One selection at a time: an event arriving while the state is busy is
	// dropped instead of interleaving two expansions.
	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let Ok(mut guard) = state_mu.try_borrow_mut() else {
			debug!("selection dropped: state busy");
			return;
		};
		let Some(s) = guard.as_mut() else {
			return;
		};
		s.end_pan();
		let Some(id) = s.end_drag() else {
			return;
		};
		let selected = match s.select(&id) {
			Ok(entry) => entry,
			Err(e) => {
				warn!("selection of {id} rejected: {e}");
				return;
			}
		};
		drop(guard);
		if let Some(cb) = on_select {
			cb.run(selected);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.end_drag();
			s.pan = Default::default();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};

		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (s.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / s.transform.k;
			s.transform.x = x - (x - s.transform.x) * ratio;
			s.transform.y = y - (y - s.transform.y) * ratio;
			s.transform.k = new_k;
		}
	};

	view! {
		{move || init_error.get().map(|e| view! { <p class="graph-error">{e}</p> })}
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
	}
}
