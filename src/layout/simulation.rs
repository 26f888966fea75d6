use std::collections::HashMap;
use std::f64::consts::PI;

use log::debug;

use super::ForceSettings;
use super::forces::{self, Jiggle, Link};
use super::graph::{GraphData, GraphNode};

const INITIAL_RADIUS: f64 = 100.0;

/// Position, velocity and optional pin of one node.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Body {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// While set, the body is held at this x regardless of forces.
	pub fx: Option<f64>,
	pub fy: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationState {
	/// Built but not yet started.
	Idle,
	Simulating,
	/// Alpha has decayed below the threshold; any reheat resumes simulating.
	Settled,
	/// Disposed by the owning view. Further steps are no-ops.
	Stopped,
}

/// One owned force simulation over a node set.
pub struct Simulation {
	nodes: Vec<GraphNode>,
	bodies: Vec<Body>,
	links: Vec<Link>,
	index: HashMap<String, usize>,
	settings: ForceSettings,
	center: (f64, f64),
	alpha: f64,
	alpha_target: f64,
	state: SimulationState,
	jiggle: Jiggle,
	ticks: u64,
}

fn initial_positions(nodes: &[GraphNode], cx: f64, cy: f64) -> Vec<Body> {
	let ring = nodes.iter().filter(|n| !n.is_center).count().max(1);
	let radius = INITIAL_RADIUS * (ring as f64 / 10.0).sqrt().max(1.0);
	let mut slot = 0;
	nodes
		.iter()
		.map(|node| {
			if node.is_center {
				return Body {
					x: cx,
					y: cy,
					..Body::default()
				};
			}
			let angle = slot as f64 * 2.0 * PI / ring as f64;
			slot += 1;
			Body {
				x: cx + radius * angle.cos(),
				y: cy + radius * angle.sin(),
				..Body::default()
			}
		})
		.collect()
}

/// Resolve id-based links to body indices, dropping anything that cannot be placed.
fn resolve_links(data: &GraphData, index: &HashMap<String, usize>) -> Vec<Link> {
	let resolved: Vec<(usize, usize, f64)> = data
		.links
		.iter()
		.filter_map(|link| {
			match (index.get(&link.source), index.get(&link.target)) {
				(Some(&s), Some(&t)) if s != t => Some((s, t, link.weight)),
				_ => {
					debug!("dropping link {} -> {}", link.source, link.target);
					None
				}
			}
		})
		.collect();

	let mut degree = vec![0usize; index.len()];
	for &(s, t, _) in &resolved {
		degree[s] += 1;
		degree[t] += 1;
	}
	resolved
		.into_iter()
		.map(|(s, t, w)| Link::weighted(s, t, w, &degree))
		.collect()
}

fn build_index(nodes: &[GraphNode]) -> HashMap<String, usize> {
	nodes
		.iter()
		.enumerate()
		.map(|(i, n)| (n.id.clone(), i))
		.collect()
}

impl Simulation {
	/// Lay the nodes out around the centre of a `width` x `height` viewport. The simulation
	/// starts [`SimulationState::Idle`]; call [`Simulation::start`] to begin ticking.
	pub fn new(data: &GraphData, settings: ForceSettings, width: f64, height: f64) -> Self {
		let (cx, cy) = (width / 2.0, height / 2.0);
		let nodes = dedup_nodes(&data.nodes);
		let index = build_index(&nodes);
		let links = resolve_links(data, &index);
		let bodies = initial_positions(&nodes, cx, cy);
		Self {
			nodes,
			bodies,
			links,
			index,
			settings,
			center: (cx, cy),
			alpha: 1.0,
			alpha_target: 0.0,
			state: SimulationState::Idle,
			jiggle: Jiggle::new(0x9e37_79b9_7f4a_7c15),
			ticks: 0,
		}
	}

	/// Swap in a new node set. Nodes that survive keep their positions; the simulation is
	/// reheated.
	pub fn replace_data(&mut self, data: &GraphData) {
		if self.state == SimulationState::Stopped {
			return;
		}
		let nodes = dedup_nodes(&data.nodes);
		let index = build_index(&nodes);
		let mut bodies = initial_positions(&nodes, self.center.0, self.center.1);
		for (id, &new_idx) in &index {
			if let Some(&old_idx) = self.index.get(id) {
				bodies[new_idx] = Body {
					vx: 0.0,
					vy: 0.0,
					..self.bodies[old_idx]
				};
			}
		}
		self.links = resolve_links(data, &index);
		self.nodes = nodes;
		self.bodies = bodies;
		self.index = index;
		self.alpha = 1.0;
		self.state = SimulationState::Simulating;
		debug!("simulation reloaded with {} nodes", self.nodes.len());
	}

	pub fn start(&mut self) {
		if matches!(self.state, SimulationState::Idle | SimulationState::Settled) {
			debug!("simulation started ({} nodes, {} links)", self.nodes.len(), self.links.len());
			self.state = SimulationState::Simulating;
		}
	}

	/// Halt ticking for good. Called when the owning view is torn down.
	pub fn stop(&mut self) {
		if self.state != SimulationState::Stopped {
			debug!("simulation stopped after {} ticks", self.ticks);
			self.state = SimulationState::Stopped;
		}
	}

	/// Raise alpha and resume simulating, e.g. after a resize.
	pub fn reheat(&mut self, alpha: f64) {
		if self.state == SimulationState::Stopped {
			return;
		}
		self.alpha = self.alpha.max(alpha);
		self.state = SimulationState::Simulating;
	}

	/// Advance one tick if simulating. Returns `true` while the layout is still in motion.
	pub fn step(&mut self) -> bool {
		if self.state != SimulationState::Simulating {
			return false;
		}
		self.tick();
		if self.alpha < self.settings.alpha_min && self.alpha_target < self.settings.alpha_min {
			debug!("simulation settled after {} ticks", self.ticks);
			self.state = SimulationState::Settled;
			return false;
		}
		true
	}

	/// Apply every configured force once and integrate, regardless of state.
	pub fn tick(&mut self) {
		let s = &self.settings;
		self.alpha += (self.alpha_target - self.alpha) * s.alpha_decay;
		let (alpha, (cx, cy)) = (self.alpha, self.center);

		forces::link(&mut self.bodies, &self.links, s.link_distance, alpha, &mut self.jiggle);
		forces::many_body(&mut self.bodies, s.charge_strength, alpha, &mut self.jiggle);
		forces::center(&mut self.bodies, cx, cy);
		if let Some(strength) = s.axis_strength {
			forces::axis(&mut self.bodies, cx, cy, strength, alpha);
		}
		if let Some(radius) = s.collision_radius {
			forces::collide(&mut self.bodies, radius, &mut self.jiggle);
		}

		let keep = 1.0 - s.velocity_decay;
		for body in &mut self.bodies {
			match body.fx {
				Some(fx) => {
					body.x = fx;
					body.vx = 0.0;
				}
				None => {
					body.vx *= keep;
					body.x += body.vx;
				}
			}
			match body.fy {
				Some(fy) => {
					body.y = fy;
					body.vy = 0.0;
				}
				None => {
					body.vy *= keep;
					body.y += body.vy;
				}
			}
		}
		self.ticks += 1;
	}

	/// Step until settled or `max_ticks` elapse; returns the number of ticks taken.
	#[cfg(test)]
	pub fn run_until_settled(&mut self, max_ticks: usize) -> usize {
		self.start();
		let mut taken = 0;
		while taken < max_ticks && self.step() {
			taken += 1;
		}
		taken
	}

	/// Pin a node where it is and keep the rest of the graph moving.
	pub fn drag_start(&mut self, idx: usize) {
		if self.state == SimulationState::Stopped {
			return;
		}
		let Some(body) = self.bodies.get_mut(idx) else {
			return;
		};
		body.fx = Some(body.x);
		body.fy = Some(body.y);
		self.alpha_target = self.settings.drag_alpha_target;
		self.state = SimulationState::Simulating;
	}

	pub fn drag_to(&mut self, idx: usize, x: f64, y: f64) {
		if let Some(body) = self.bodies.get_mut(idx) {
			body.fx = Some(x);
			body.fy = Some(y);
		}
	}

	/// Release the pin and let alpha decay back toward rest.
	pub fn drag_end(&mut self, idx: usize) {
		if let Some(body) = self.bodies.get_mut(idx) {
			body.fx = None;
			body.fy = None;
		}
		self.alpha_target = 0.0;
	}

	/// Move the centering target, e.g. after the viewport is resized.
	pub fn set_center(&mut self, width: f64, height: f64) {
		self.center = (width / 2.0, height / 2.0);
		self.reheat(0.3);
	}

	/// Topmost node whose circle contains `(x, y)`.
	pub fn node_at(&self, x: f64, y: f64, radius: impl Fn(&GraphNode) -> f64) -> Option<usize> {
		self.bodies
			.iter()
			.zip(&self.nodes)
			.enumerate()
			.rev()
			.find(|(_, (b, n))| {
				let (dx, dy) = (b.x - x, b.y - y);
				dx * dx + dy * dy < radius(n).powi(2)
			})
			.map(|(i, _)| i)
	}

	#[cfg(test)]
	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	pub fn bodies(&self) -> &[Body] {
		&self.bodies
	}

	/// Resolved links as `(source, target)` body indices.
	pub fn links(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
		self.links.iter().map(|l| (l.source, l.target))
	}

	#[cfg(test)]
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	#[cfg(test)]
	pub fn state(&self) -> SimulationState {
		self.state
	}

	#[cfg(test)]
	pub fn settings(&self) -> &ForceSettings {
		&self.settings
	}
}

/// A node id may appear only once; later duplicates are ignored.
fn dedup_nodes(nodes: &[GraphNode]) -> Vec<GraphNode> {
	let mut seen = std::collections::HashSet::new();
	nodes
		.iter()
		.filter(|n| seen.insert(n.id.as_str()))
		.cloned()
		.collect()
}
