use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{ForceGraphState, NODE_RADIUS};

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let positions = state.positions.borrow();
	let k = state.transform.k;
	let (line_width, dash, gap) = (1.5 / k, 8.0 / k, 4.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.highlight.highlight_t);

	for (edge, class) in &state.highlight.current.edges {
		let (Some(p1), Some(p2)) = (positions.get(&edge.source), positions.get(&edge.target))
		else {
			continue;
		};
		let (x1, y1, x2, y2) = (p1.x as f64, p1.y as f64, p2.x as f64, p2.y as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}

		// t=0: all edges at base (0.6), t=1: neighbor edges at 0.9, others at 0.15
		let highlighted = class.is_neighbor();
		let (edge_alpha, width) = if !state.has_active_highlight() {
			(0.6, line_width)
		} else if highlighted {
			(0.6 + 0.3 * t, line_width * (1.0 + 0.3 * t))
		} else {
			(0.6 - 0.45 * t, line_width * (1.0 - 0.3 * t))
		};

		ctx.set_stroke_style_str(&format!("rgba(100, 180, 255, {})", edge_alpha));
		ctx.set_line_width(width);
		if highlighted {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		}

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * NODE_RADIUS, y1 + uy * NODE_RADIUS);
		ctx.line_to(x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	}
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let positions = state.positions.borrow();
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.highlight.highlight_t),
		state.transform.k,
	);
	let selected = state.highlight.current.selected.as_deref();
	let font = format!("{}px sans-serif", 11.0 / k.max(0.5));

	// plain nodes first so neighbours are drawn on top
	for pass_neighbors in [false, true] {
		for (id, class) in &state.highlight.current.nodes {
			if class.is_neighbor() != pass_neighbors {
				continue;
			}
			let Some(pos) = positions.get(id) else {
				continue;
			};
			let (x, y) = (pos.x as f64, pos.y as f64);
			let is_selected = selected == Some(id.as_str());

			let (alpha, radius, glow_radius) = if !has_highlight {
				(1.0, NODE_RADIUS, 0.0)
			} else if is_selected {
				(1.0, NODE_RADIUS * (1.0 + 0.35 * t), NODE_RADIUS * (1.8 + 1.2 * t))
			} else if pass_neighbors {
				(1.0, NODE_RADIUS * (1.0 + 0.2 * t), NODE_RADIUS * (1.4 + 0.6 * t))
			} else {
				(1.0 - 0.7 * t, NODE_RADIUS * (1.0 - 0.15 * t), 0.0)
			};

			if glow_radius > 0.0 && t > 0.01 {
				draw_glow(ctx, x, y, radius, glow_radius, if is_selected { 0.35 * t } else { 0.2 * t });
			}

			ctx.set_global_alpha(alpha);
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(state.node_color(id));
			ctx.fill();
			ctx.set_global_alpha(1.0);

			if is_selected && t > 0.01 {
				ctx.begin_path();
				let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
				ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
				ctx.set_line_width(1.5 / k);
				ctx.stroke();
			}

			let label_alpha = if pass_neighbors || !has_highlight { 0.95 } else { alpha * 0.8 };
			ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", label_alpha));
			ctx.set_font(&font);
			let _ = ctx.fill_text(state.label(id), x + radius + 3.0, y + 3.0);
		}
	}
}

fn draw_glow(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64, glow_radius: f64, alpha: f64) {
	let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius) else {
		return;
	};
	let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", alpha));
	let _ = gradient.add_color_stop(0.6, &format!("rgba(200, 220, 255, {})", alpha * 0.3));
	let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
	ctx.begin_path();
	let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill();
}
