use std::collections::HashMap;
use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::state::ForceGraphState;
use crate::layout::{GraphNode, GraphVariant};

/// Loaded thumbnails keyed by node id.
pub type Thumbnails = HashMap<String, HtmlImageElement>;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, thumbnails: &Thumbnails) {
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx, thumbnails);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, dash, gap, arrow_size) = (1.5 / k, 8.0 / k, 4.0 / k, 8.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.hover.highlight_t);
	let arrows = state.variant == GraphVariant::Global;
	let bodies = state.simulation.bodies();

	for (s, d) in state.simulation.links() {
		let (b1, b2) = (&bodies[s], &bodies[d]);
		let (dx, dy) = (b2.x - b1.x, b2.y - b1.y);
		let dist = (dx * dx + dy * dy).sqrt();
		let (r1, r2) = (state.radius(s), state.radius(d));
		if dist < r1 + r2 {
			continue;
		}

		let is_highlighted = state.is_highlighted(s) && state.is_highlighted(d);

		// t=0: all edges at base (0.6), t=1: highlighted at 0.9, others at 0.15
		let (edge_alpha, arrow_alpha, width) = if is_highlighted {
			(0.6 + 0.3 * t, 0.8 + 0.1 * t, line_width * (1.0 + 0.3 * t))
		} else {
			(0.6 - 0.45 * t, 0.8 - 0.45 * t, line_width * (1.0 - 0.3 * t))
		};

		ctx.set_stroke_style_str(&format!("rgba(153, 153, 153, {})", edge_alpha));
		ctx.set_line_width(width);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(dash_offset);

		let (ux, uy) = (dx / dist, dy / dist);
		let head = if arrows { arrow_size } else { 0.0 };
		ctx.begin_path();
		ctx.move_to(b1.x + ux * r1, b1.y + uy * r1);
		ctx.line_to(b2.x - ux * (r2 + head), b2.y - uy * (r2 + head));
		ctx.stroke();

		if !arrows {
			continue;
		}
		let _ = ctx.set_line_dash(&js_sys::Array::new());
		ctx.set_fill_style_str(&format!("rgba(153, 153, 153, {})", arrow_alpha));
		let (tip_x, tip_y) = (b2.x - ux * r2, b2.y - uy * r2);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

/// Filled disc with the thumbnail clipped inside it once the image has loaded.
fn draw_disc(
	ctx: &CanvasRenderingContext2d,
	node: &GraphNode,
	thumbnail: Option<&HtmlImageElement>,
	x: f64,
	y: f64,
	radius: f64,
	k: f64,
) {
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&node.color);
	ctx.fill();

	if let Some(img) = thumbnail.filter(|img| img.complete() && img.natural_width() > 0) {
		ctx.save();
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.clip();
		let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
			img,
			x - radius,
			y - radius,
			radius * 2.0,
			radius * 2.0,
		);
		ctx.restore();
	}

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_stroke_style_str(if node.is_center { "#ffffff" } else { node.color.as_str() });
	ctx.set_line_width(if node.is_center { 3.0 / k } else { 1.5 / k });
	ctx.stroke();
}

fn draw_label(ctx: &CanvasRenderingContext2d, label: &str, x: f64, y: f64, radius: f64, k: f64, alpha: f64) {
	ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", alpha));
	ctx.set_font(&format!("{}px sans-serif", 11.0 / k.max(0.5)));
	ctx.set_text_align("center");
	let _ = ctx.fill_text(label, x, y + radius + 14.0 / k.max(0.5));
	ctx.set_text_align("start");
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, thumbnails: &Thumbnails) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);
	// The ego-graph is small enough to label every node; the corpus graph only labels what
	// is highlighted.
	let label_all = state.variant == GraphVariant::Local;
	let bodies = state.simulation.bodies();

	for (idx, node) in state.simulation.nodes().iter().enumerate() {
		if has_highlight && state.is_highlighted(idx) {
			continue;
		}
		let (x, y) = (bodies[idx].x, bodies[idx].y);
		let (alpha, radius) = (1.0 - 0.7 * t, state.radius(idx) * (1.0 - 0.15 * t));

		ctx.set_global_alpha(alpha);
		draw_disc(ctx, node, thumbnails.get(&node.id), x, y, radius, k);
		ctx.set_global_alpha(1.0);

		if label_all {
			draw_label(ctx, &node.label, x, y, radius, k, alpha * 0.8);
		}
	}

	if !has_highlight {
		return;
	}

	for (idx, node) in state.simulation.nodes().iter().enumerate() {
		if !state.is_highlighted(idx) {
			continue;
		}
		let (x, y) = (bodies[idx].x, bodies[idx].y);
		let base = state.radius(idx);
		let is_hovered = state.is_hovered(idx);
		let is_neighbor =
			state.hover.neighbors.contains(&idx) || state.hover.prev_neighbors.contains(&idx);

		let (radius, glow_radius) = if is_hovered {
			(base * (1.0 + 0.2 * t), base * (1.4 + 0.6 * t))
		} else if is_neighbor {
			(base * (1.0 + 0.1 * t), base * (1.2 + 0.3 * t))
		} else {
			(base, 0.0)
		};

		if glow_radius > 0.0 && t > 0.01 {
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius) {
				let alpha = if is_hovered { 0.35 * t } else { 0.2 * t };
				let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", alpha));
				let _ = gradient.add_color_stop(0.6, &format!("rgba(200, 220, 255, {})", alpha * 0.3));
				let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		draw_disc(ctx, node, thumbnails.get(&node.id), x, y, radius, k);

		if is_hovered && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		draw_label(ctx, &node.label, x, y, radius, k, 1.0);
	}
}
