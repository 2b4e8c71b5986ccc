use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use rand::Rng;

use crate::explorer::{
	Corpus, Entry, Explorer, ExplorerConfig, Highlight, LayoutAdapter, Position,
	Result,
};

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

pub const NODE_RADIUS: f64 = 6.0;
pub const HIT_RADIUS: f64 = 12.0;
/// Pointer travel (screen px) below which a press-release counts as a click.
pub const CLICK_SLOP: f64 = 4.0;

/// Positions written by the layout callback and read by the renderer.
pub type SharedPositions = Rc<RefCell<HashMap<String, Position>>>;

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<String>,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Classification currently drawn, with its fade-in progress.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	pub current: Highlight,
	pub highlight_t: f64,
}

pub struct ForceGraphState {
	pub explorer: Explorer,
	pub layout: LayoutAdapter,
	pub positions: SharedPositions,
	pub config: ExplorerConfig,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub highlight: HighlightState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
}

impl ForceGraphState {
	pub fn new<R: Rng + ?Sized>(
		corpus: Arc<Corpus>,
		config: ExplorerConfig,
		rng: &mut R,
		width: f64,
		height: f64,
	) -> Result<Self> {
		let explorer = Explorer::new(corpus, rng, config.direction)?;
		let mut layout = LayoutAdapter::new(config.layout.clone());
		let positions: SharedPositions = Rc::default();

		let sink = positions.clone();
		layout.on_positions_updated(move |frame| {
			*sink.borrow_mut() = frame.positions.clone();
		});
		layout.sync(explorer.subgraph());
		*positions.borrow_mut() = layout.frame().positions;
		layout.reenergize(config.layout.growth_energy);

		Ok(Self {
			highlight: HighlightState {
				current: explorer.highlight(),
				highlight_t: 0.0,
			},
			explorer,
			layout,
			positions,
			config,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
			flow_time: 0.0,
		})
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<String> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		// HIT_RADIUS is in world-space, scales with zoom like nodes
		self.layout.node_at(gx as f32, gy as f32, HIT_RADIUS as f32)
	}

	/// Expand and select `id`, then resync the layout if the subgraph grew.
	/// Returns the selected entry for the details panel.
	pub fn select(&mut self, id: &str) -> Result<Entry> {
		let selection = self.explorer.select(id)?;
		if !selection.delta.is_empty() {
			self.layout.sync(self.explorer.subgraph());
			self.layout.reenergize(self.config.layout.growth_energy);
		}
		self.highlight = HighlightState {
			current: selection.highlight,
			highlight_t: 0.0,
		};
		Ok(selection.entry)
	}

	pub fn clear_selection(&mut self) {
		self.highlight = HighlightState {
			current: self.explorer.clear_selection(),
			highlight_t: 0.0,
		};
	}

	pub fn begin_pan(&mut self, sx: f64, sy: f64) {
		self.pan = PanState {
			active: true,
			moved: false,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pan_to(&mut self, sx: f64, sy: f64) {
		let (dx, dy) = (sx - self.pan.start_x, sy - self.pan.start_y);
		if (dx * dx + dy * dy).sqrt() >= CLICK_SLOP {
			self.pan.moved = true;
		}
		self.transform.x = self.pan.transform_start_x + dx;
		self.transform.y = self.pan.transform_start_y + dy;
	}

	/// Finish a background gesture; a click without travel clears the
	/// selection.
	pub fn end_pan(&mut self) {
		let pan = std::mem::take(&mut self.pan);
		if pan.active && !pan.moved && self.has_active_highlight() {
			self.clear_selection();
		}
	}

	pub fn begin_drag(&mut self, id: String, sx: f64, sy: f64) {
		let Some(start) = self.layout.position_of(&id) else {
			return;
		};
		self.layout.pin(&id, start.x, start.y);
		self.layout.hold_energy(self.config.layout.drag_energy);
		self.drag = DragState {
			active: true,
			node: Some(id),
			moved: false,
			start_x: sx,
			start_y: sy,
			node_start_x: start.x,
			node_start_y: start.y,
		};
	}

	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		let (dx, dy) = (sx - self.drag.start_x, sy - self.drag.start_y);
		if !self.drag.moved && (dx * dx + dy * dy).sqrt() < CLICK_SLOP {
			return;
		}
		self.drag.moved = true;
		let (nx, ny) = (
			self.drag.node_start_x + (dx / self.transform.k) as f32,
			self.drag.node_start_y + (dy / self.transform.k) as f32,
		);
		self.layout.drag_pinned(nx, ny);
	}

	/// Finish the gesture. Returns the node id if it was a click rather than
	/// a drag.
	pub fn end_drag(&mut self) -> Option<String> {
		self.layout.unpin();
		self.layout.release_energy();
		let drag = std::mem::take(&mut self.drag);
		if drag.active && !drag.moved {
			drag.node
		} else {
			None
		}
	}

	pub fn has_active_highlight(&self) -> bool {
		self.highlight.current.is_active()
	}

	pub fn node_color(&self, id: &str) -> &'static str {
		let order = self.explorer.subgraph().node_index(id).unwrap_or(0);
		COLORS[order % COLORS.len()]
	}

	pub fn label<'a>(&'a self, id: &'a str) -> &'a str {
		self.explorer
			.corpus()
			.get(id)
			.map(|entry| entry.name.as_str())
			.unwrap_or(id)
	}

	pub fn tick(&mut self, dt: f32) {
		self.layout.step(dt);
		self.flow_time += dt as f64;

		if self.has_active_highlight() {
			self.highlight.highlight_t += (1.0 - self.highlight.highlight_t) * 1.8 * dt as f64;
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
