use force_graph::SimulationParameters;

/// Which references count as a node's neighbourhood.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ReferenceDirection {
	/// Only entries the selected entry references.
	#[default]
	Outgoing,
	/// Outgoing references plus displayed entries that reference the
	/// selected entry.
	IncludeDisplayedReferrers,
	/// Outgoing references plus every corpus entry referencing the selected
	/// entry.
	Bidirectional,
}

/// Tuning for the layout adapter and the physics it drives.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	pub force_charge: f32,
	pub force_spring: f32,
	pub force_max: f32,
	pub node_speed: f32,
	pub damping_factor: f32,
	pub node_mass: f32,
	/// Distance from an already-placed neighbour at which new nodes spawn.
	pub spawn_radius: f32,
	/// Energy injected after the subgraph grows.
	pub growth_energy: f32,
	/// Energy target held while a node is pinned by a drag.
	pub drag_energy: f32,
	/// Fraction of the gap to the target closed on every step.
	pub energy_decay: f32,
	/// Below this (with a matching target) the engine goes idle.
	pub energy_min: f32,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			node_mass: 10.0,
			spawn_radius: 40.0,
			growth_energy: 1.0,
			drag_energy: 0.3,
			energy_decay: 0.0228,
			energy_min: 0.001,
		}
	}
}

impl LayoutConfig {
	pub(crate) fn simulation(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.force_charge,
			force_spring: self.force_spring,
			force_max: self.force_max,
			node_speed: self.node_speed,
			damping_factor: self.damping_factor,
		}
	}
}

/// Top-level configuration passed to the explorer and its canvas.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExplorerConfig {
	pub direction: ReferenceDirection,
	pub layout: LayoutConfig,
}
