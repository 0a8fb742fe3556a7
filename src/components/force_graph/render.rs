use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::ForceGraphState;

const BACKGROUND: &str = "#1a1a2e";
const EDGE_RGB: &str = "100, 180, 255";
const INFERRED_RGB: &str = "180, 180, 200";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn set_dash(ctx: &CanvasRenderingContext2d, segments: &[f64]) {
	let array = js_sys::Array::new();
	for &s in segments {
		array.push(&JsValue::from_f64(s));
	}
	let _ = ctx.set_line_dash(&array);
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (dash, gap, arrow_size) = (6.0 / k, 4.0 / k, 8.0 / k);
	let t = ease_out_cubic(state.hover.highlight_t);

	state.graph.visit_edges(|n1, n2, _| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}
		let (r1, r2) = (n1.data.user_data.radius, n2.data.user_data.radius);
		let inferred = state.is_inferred(n1.index(), n2.index());
		let lit = state.is_highlighted(n1.index()) && state.is_highlighted(n2.index());
		let alpha = if lit { 0.6 + 0.35 * t } else { 0.6 - 0.45 * t };
		let rgb = if inferred { INFERRED_RGB } else { EDGE_RGB };
		let (ux, uy) = (dx / dist, dy / dist);

		ctx.set_stroke_style_str(&format!("rgba({rgb}, {alpha})"));
		ctx.set_line_width(1.5 / k);
		if inferred {
			set_dash(ctx, &[dash, gap]);
			ctx.set_line_dash_offset(-(state.flow_time * 20.0) % (dash + gap));
		}
		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		let end = if inferred { r2 } else { r2 + arrow_size };
		ctx.line_to(x2 - ux * end, y2 - uy * end);
		ctx.stroke();
		if inferred {
			set_dash(ctx, &[]);
			return;
		}

		// Arrowhead at the target end of a declared connection.
		ctx.set_fill_style_str(&format!("rgba({rgb}, {})", (alpha + 0.2).min(1.0)));
		let (tip_x, tip_y) = (x2 - ux * r2, y2 - uy * r2);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	});
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (t, k) = (ease_out_cubic(state.hover.highlight_t), state.transform.k);
	let font = format!("{}px sans-serif", 11.0 / k.max(0.5));

	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let lit = state.is_highlighted(node.index());
		let hovered = state.hover.node == Some(node.index());
		let (alpha, radius) = if lit {
			(1.0, info.radius * (1.0 + 0.25 * t))
		} else {
			(1.0 - 0.7 * t, info.radius)
		};

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();

		ctx.set_stroke_style_str(if hovered { "white" } else { "rgba(255, 255, 255, 0.6)" });
		ctx.set_line_width(info.ring_width / 2.0 / k);
		ctx.stroke();

		ctx.set_fill_style_str("white");
		ctx.set_font(&font);
		let _ = ctx.fill_text(&info.label, x + radius + 3.0, y + 3.0);
		ctx.set_global_alpha(1.0);
	});
}
