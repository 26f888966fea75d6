use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, MouseEvent, WheelEvent, Window};

use super::render::{self, Thumbnails};
use super::state::ForceGraphState;
use crate::components::cleanup_slot;
use crate::config::GalleryConfig;
use crate::layout::{GraphData, GraphVariant};

/// Start loading a thumbnail for every node that has one. Already-requested images are
/// reused.
fn load_thumbnails(data: &GraphData, thumbnails: &mut Thumbnails) {
	thumbnails.retain(|id, _| data.nodes.iter().any(|n| &n.id == id));
	for node in &data.nodes {
		let Some(src) = &node.thumbnail else {
			continue;
		};
		if thumbnails.contains_key(&node.id) {
			continue;
		}
		if let Ok(img) = HtmlImageElement::new() {
			img.set_src(src);
			thumbnails.insert(node.id.clone(), img);
		}
	}
}

fn pointer_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Animated force-directed graph. Clicking a navigable node opens its artwork page.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	variant: GraphVariant,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let layout = use_context::<GalleryConfig>().unwrap_or_default().layout;
	let navigate = use_navigate();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<ForceGraphState>>> = Rc::new(RefCell::new(None));
	let thumbnails: Rc<RefCell<Thumbnails>> = Rc::new(RefCell::new(Thumbnails::new()));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_listener = cleanup_slot(|handle: WindowListenerHandle| {
		debug!("graph view unmounted, resize listener removed");
		handle.remove();
	});
	let alive = Arc::new(AtomicBool::new(true));
	let (state_init, thumbs_init, animate_init, alive_init) =
		(state.clone(), thumbnails.clone(), animate.clone(), alive.clone());

	let alive_cleanup = alive.clone();
	on_cleanup(move || alive_cleanup.store(false, Ordering::Relaxed));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if state_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
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
						.filter(|h| *h > 0.0)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		let initial = data.get_untracked();
		load_thumbnails(&initial, &mut thumbs_init.borrow_mut());
		*state_init.borrow_mut() = Some(ForceGraphState::new(&initial, variant, &layout, w, h));

		if fullscreen {
			let (state_resize, canvas_resize, alive_resize) =
				(state_init.clone(), canvas.clone(), alive_init.clone());
			let handle = window_event_listener(leptos::ev::resize, move |_| {
				if !alive_resize.load(Ordering::Relaxed) {
					return;
				}
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			});
			if let Ok(mut slot) = resize_listener.lock() {
				if let Some(stale) = slot.replace(handle) {
					stale.remove();
				}
			}
		}

		let (state_anim, thumbs_anim, animate_inner, alive_anim) = (
			state_init.clone(),
			thumbs_init.clone(),
			animate_init.clone(),
			alive_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !alive_anim.load(Ordering::Relaxed) {
				if let Some(ref mut s) = *state_anim.borrow_mut() {
					s.simulation.stop();
				}
				debug!("graph view unmounted, animation loop ended");
				return;
			}
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx, &thumbs_anim.borrow());
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Later data changes reuse the running simulation instead of rebuilding the canvas.
	let (state_data, thumbs_data) = (state.clone(), thumbnails.clone());
	Effect::new(move |prev: Option<()>| {
		let next = data.get();
		if prev.is_none() {
			return;
		}
		if let Some(ref mut s) = *state_data.borrow_mut() {
			load_thumbnails(&next, &mut thumbs_data.borrow_mut());
			s.replace_data(&next);
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.pointer_down(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let clicked = state_mu.borrow_mut().as_mut().and_then(|s| s.pointer_up());
		if let Some(id) = clicked {
			debug!("opening artwork {id} from graph");
			navigate(&format!("/artwork/{id}"), Default::default());
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_leave();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.zoom(x, y, ev.delta_y());
		}
	};

	view! {
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
