use std::collections::HashSet;

use crate::config::LayoutConfig;
use crate::layout::{GraphData, GraphNode, GraphVariant, Simulation};

pub const GLOBAL_NODE_RADIUS: f64 = 20.0;
pub const LOCAL_CENTER_RADIUS: f64 = 30.0;
pub const LOCAL_NODE_RADIUS: f64 = 25.0;

/// Pointer travel, in screen pixels, below which a press on a node counts as a click.
const CLICK_SLOP: f64 = 4.0;

pub fn node_radius(variant: GraphVariant, node: &GraphNode) -> f64 {
	match variant {
		GraphVariant::Global => GLOBAL_NODE_RADIUS,
		GraphVariant::Local if node.is_center => LOCAL_CENTER_RADIUS,
		GraphVariant::Local => LOCAL_NODE_RADIUS,
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self { x: 0.0, y: 0.0, k: 1.0 }
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node_idx: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	/// Graph-space offset from the pointer to the node centre at grab time.
	pub grab_dx: f64,
	pub grab_dy: f64,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<usize>,
	pub neighbors: HashSet<usize>,
	pub highlight_t: f64,
	pub prev_node: Option<usize>,
	pub prev_neighbors: HashSet<usize>,
	delay_t: f64,
}

/// Everything the canvas needs between frames: the simulation plus viewport and pointer
/// interaction state.
pub struct ForceGraphState {
	pub simulation: Simulation,
	pub variant: GraphVariant,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, variant: GraphVariant, layout: &LayoutConfig, width: f64, height: f64) -> Self {
		let mut simulation = Simulation::new(data, variant.settings(layout), width, height);
		simulation.start();
		Self {
			simulation,
			variant,
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			flow_time: 0.0,
		}
	}

	/// Swap the node set, keeping the viewport.
	pub fn replace_data(&mut self, data: &GraphData) {
		self.drag = DragState::default();
		self.hover = HoverState::default();
		self.simulation.replace_data(data);
	}

	pub fn radius(&self, idx: usize) -> f64 {
		self.simulation
			.nodes()
			.get(idx)
			.map_or(GLOBAL_NODE_RADIUS, |n| node_radius(self.variant, n))
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let variant = self.variant;
		self.simulation.node_at(gx, gy, |n| node_radius(variant, n))
	}

	/// Press: grab the node under the pointer, or start panning.
	pub fn pointer_down(&mut self, x: f64, y: f64) {
		match self.node_at_position(x, y) {
			Some(idx) => {
				let (gx, gy) = self.screen_to_graph(x, y);
				let body = self.simulation.bodies()[idx];
				self.drag = DragState {
					node_idx: Some(idx),
					start_x: x,
					start_y: y,
					grab_dx: body.x - gx,
					grab_dy: body.y - gy,
					moved: false,
				};
				self.simulation.drag_start(idx);
			}
			None => {
				self.pan = PanState {
					active: true,
					start_x: x,
					start_y: y,
					transform_start_x: self.transform.x,
					transform_start_y: self.transform.y,
				};
			}
		}
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.drag.node_idx {
			let travelled = (x - self.drag.start_x).hypot(y - self.drag.start_y);
			if travelled > CLICK_SLOP {
				self.drag.moved = true;
			}
			if self.drag.moved {
				let (gx, gy) = self.screen_to_graph(x, y);
				self.simulation
					.drag_to(idx, gx + self.drag.grab_dx, gy + self.drag.grab_dy);
			}
			return;
		}

		let hovered = self.node_at_position(x, y);
		self.set_hover(hovered);
		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// Release. Returns the id of the node to open when the press was a click on a
	/// navigable node.
	pub fn pointer_up(&mut self) -> Option<String> {
		self.pan.active = false;
		let drag = std::mem::take(&mut self.drag);
		let idx = drag.node_idx?;
		self.simulation.drag_end(idx);
		if drag.moved {
			return None;
		}
		let node = self.simulation.nodes().get(idx)?;
		self.variant.navigates(node).then(|| node.id.clone())
	}

	pub fn pointer_leave(&mut self) {
		if let Some(idx) = std::mem::take(&mut self.drag).node_idx {
			self.simulation.drag_end(idx);
		}
		self.pan.active = false;
		self.set_hover(None);
	}

	/// Zoom about the pointer; `delta_y > 0` zooms out.
	pub fn zoom(&mut self, x: f64, y: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Keep the previous highlight around while it fades out.
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for (src, tgt) in self.simulation.links() {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: usize) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: usize) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	/// Advance one animation frame of `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		self.simulation.step();
		self.flow_time += dt;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.simulation.set_center(width, height);
	}
}
