//! Force-directed layout: graph derivation from the catalog and the physics simulation.
//!
//! Nothing in here touches the DOM; the canvas component drives [`Simulation::step`] from
//! its animation frame callback and reads positions back for drawing.

mod forces;
mod graph;
mod simulation;

#[cfg(test)]
pub use graph::GraphLink;
pub use graph::{GraphData, GraphNode, GraphVariant, global_graph, local_graph};
pub use simulation::Simulation;

/// Tunables for one graph variant.
#[derive(Clone, Debug, PartialEq)]
pub struct ForceSettings {
	/// Rest length of every link.
	pub link_distance: f64,
	/// Many-body strength; negative repels.
	pub charge_strength: f64,
	/// Weak pull of every node toward the viewport centre lines.
	pub axis_strength: Option<f64>,
	/// Per-node collision radius.
	pub collision_radius: Option<f64>,
	/// Simulation settles once alpha drops below this.
	pub alpha_min: f64,
	pub alpha_decay: f64,
	/// Fraction of velocity lost every tick.
	pub velocity_decay: f64,
	/// Alpha target held while a node is being dragged.
	pub drag_alpha_target: f64,
}

const ALPHA_MIN: f64 = 0.001;
const SETTLE_TICKS: f64 = 300.0;

fn default_alpha_decay() -> f64 {
	1.0 - ALPHA_MIN.powf(1.0 / SETTLE_TICKS)
}

impl ForceSettings {
	/// Full corpus graph: stronger repulsion plus axis forces to keep a large graph compact.
	pub fn global() -> Self {
		Self {
			link_distance: 100.0,
			charge_strength: -500.0,
			axis_strength: Some(0.1),
			collision_radius: None,
			alpha_min: ALPHA_MIN,
			alpha_decay: default_alpha_decay(),
			velocity_decay: 0.4,
			drag_alpha_target: 0.3,
		}
	}

	/// Ego-graph around one artwork: collision instead of axis forces.
	pub fn local() -> Self {
		Self {
			link_distance: 120.0,
			charge_strength: -300.0,
			axis_strength: None,
			collision_radius: Some(35.0),
			..Self::global()
		}
	}
}

impl Default for ForceSettings {
	fn default() -> Self {
		Self::global()
	}
}
