//! Bridge between the [`Subgraph`] and the `force_graph` physics engine.
//!
//! The adapter mirrors displayed nodes and edges into the engine, steps it
//! while it has energy, and streams positions to registered callbacks. It
//! never mutates the subgraph.

use std::collections::{HashMap, HashSet};
use std::f32::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};
use log::debug;

use super::config::LayoutConfig;
use super::subgraph::Subgraph;
use super::types::Edge;

/// Golden angle, so consecutive spawns around one neighbour spread out.
const SPAWN_ANGLE: f32 = PI * (3.0 - 2.236_068);

/// Per-node data stored inside the engine.
#[derive(Clone, Debug, Default)]
pub struct LayoutNode {
	pub id: String,
}

/// 2D position of a node, in graph space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	pub x: f32,
	pub y: f32,
}

/// One step's worth of positions.
#[derive(Clone, Debug, Default)]
pub struct PositionFrame {
	/// Simulated time of this frame; strictly increasing across frames.
	pub time: f64,
	pub positions: HashMap<String, Position>,
}

type PositionCallback = Box<dyn FnMut(&PositionFrame)>;

/// Owns the physics engine and the energy that keeps it moving.
pub struct LayoutAdapter {
	graph: ForceGraph<LayoutNode, ()>,
	config: LayoutConfig,
	indices: HashMap<String, DefaultNodeIdx>,
	synced_edges: HashSet<Edge>,
	callbacks: Vec<PositionCallback>,
	energy: f32,
	energy_target: f32,
	time: f64,
	pinned: Option<String>,
}

impl LayoutAdapter {
	pub fn new(config: LayoutConfig) -> Self {
		Self {
			graph: ForceGraph::new(config.simulation()),
			config,
			indices: HashMap::new(),
			synced_edges: HashSet::new(),
			callbacks: Vec::new(),
			energy: 0.0,
			energy_target: 0.0,
			time: 0.0,
			pinned: None,
		}
	}

	/// Mirror every node and edge of `subgraph` into the engine. Already
	/// synced items are skipped, so calling this on an unchanged subgraph
	/// does nothing. Returns whether anything was added.
	pub fn sync(&mut self, subgraph: &Subgraph) -> bool {
		let (mut new_nodes, mut new_edges) = (0, 0);

		for (order, id) in subgraph.nodes().iter().enumerate() {
			if self.indices.contains_key(id) {
				continue;
			}
			let anchor = subgraph
				.adjacent(id)
				.find_map(|other| self.position_of(other));
			let Position { x, y } = self.spawn_point(anchor, order);
			let idx = self.graph.add_node(NodeData {
				x,
				y,
				mass: self.config.node_mass,
				is_anchor: false,
				user_data: LayoutNode { id: id.clone() },
			});
			self.indices.insert(id.clone(), idx);
			new_nodes += 1;
		}

		for edge in subgraph.edges() {
			if self.synced_edges.contains(edge) {
				continue;
			}
			let (Some(&src), Some(&tgt)) =
				(self.indices.get(&edge.source), self.indices.get(&edge.target))
			else {
				continue;
			};
			self.graph.add_edge(src, tgt, EdgeData::default());
			self.synced_edges.insert(edge.clone());
			new_edges += 1;
		}

		if new_nodes + new_edges > 0 {
			debug!("layout sync: +{new_nodes} nodes, +{new_edges} edges");
		}
		new_nodes + new_edges > 0
	}

	fn spawn_point(&self, anchor: Option<Position>, order: usize) -> Position {
		let Some(anchor) = anchor else {
			if order == 0 {
				return Position::default();
			}
			let angle = order as f32 * SPAWN_ANGLE;
			let r = self.config.spawn_radius * (order as f32).sqrt();
			return Position {
				x: r * angle.cos(),
				y: r * angle.sin(),
			};
		};
		let angle = order as f32 * SPAWN_ANGLE;
		Position {
			x: anchor.x + self.config.spawn_radius * angle.cos(),
			y: anchor.y + self.config.spawn_radius * angle.sin(),
		}
	}

	/// Resume movement with the given energy. A running settle pass is
	/// superseded, not cancelled.
	pub fn reenergize(&mut self, magnitude: f32) {
		self.energy = magnitude.max(0.0);
	}

	/// Keep the engine from settling below `target` (used while dragging).
	pub fn hold_energy(&mut self, target: f32) {
		self.energy_target = target.max(0.0);
		self.energy = self.energy.max(self.energy_target);
	}

	pub fn release_energy(&mut self) {
		self.energy_target = 0.0;
	}

	pub fn energy(&self) -> f32 {
		self.energy
	}

	pub fn is_idle(&self) -> bool {
		self.energy <= 0.0
	}

	/// Register a callback receiving positions after every step. Callbacks
	/// only observe positions; they cannot reach the subgraph.
	pub fn on_positions_updated(&mut self, callback: impl FnMut(&PositionFrame) + 'static) {
		self.callbacks.push(Box::new(callback));
	}

	/// Advance the simulation by `dt` seconds if it has energy left. Returns
	/// `false` (and notifies nobody) while idle.
	pub fn step(&mut self, dt: f32) -> bool {
		if self.is_idle() {
			return false;
		}

		self.graph.update(dt * self.energy);
		self.time += dt as f64;

		self.energy += (self.energy_target - self.energy) * self.config.energy_decay;
		if self.energy < self.config.energy_min && self.energy_target < self.config.energy_min {
			debug!("layout settled at t={:.2}", self.time);
			self.energy = 0.0;
		}

		if !self.callbacks.is_empty() {
			let frame = self.frame();
			for callback in &mut self.callbacks {
				callback(&frame);
			}
		}
		true
	}

	/// Snapshot of the current positions.
	pub fn frame(&self) -> PositionFrame {
		let mut positions = HashMap::with_capacity(self.indices.len());
		self.graph.visit_nodes(|node| {
			positions.insert(
				node.data.user_data.id.clone(),
				Position {
					x: node.x(),
					y: node.y(),
				},
			);
		});
		PositionFrame {
			time: self.time,
			positions,
		}
	}

	pub fn position_of(&self, id: &str) -> Option<Position> {
		let idx = *self.indices.get(id)?;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(Position {
					x: node.x(),
					y: node.y(),
				});
			}
		});
		found
	}

	/// Closest node within `radius` of (`x`, `y`).
	pub fn node_at(&self, x: f32, y: f32, radius: f32) -> Option<String> {
		let mut best: Option<(f32, String)> = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() - x, node.y() - y);
			let dist = (dx * dx + dy * dy).sqrt();
			if dist < radius && best.as_ref().is_none_or(|(d, _)| dist < *d) {
				best = Some((dist, node.data.user_data.id.clone()));
			}
		});
		best.map(|(_, id)| id)
	}

	/// Fix `id` at (`x`, `y`) until [`unpin`](Self::unpin). A node pinned
	/// earlier is released first.
	pub fn pin(&mut self, id: &str, x: f32, y: f32) -> bool {
		let Some(&idx) = self.indices.get(id) else {
			return false;
		};
		if self.pinned.as_deref().is_some_and(|p| p != id) {
			self.unpin();
		}
		self.set_anchor(idx, Some(Position { x, y }));
		self.pinned = Some(id.to_string());
		true
	}

	/// Move the pinned node, if any.
	pub fn drag_pinned(&mut self, x: f32, y: f32) {
		let Some(idx) = self.pinned.as_ref().and_then(|id| self.indices.get(id)).copied() else {
			return;
		};
		self.set_anchor(idx, Some(Position { x, y }));
	}

	/// Release the pinned node back to free positioning.
	pub fn unpin(&mut self) -> Option<String> {
		let id = self.pinned.take()?;
		if let Some(&idx) = self.indices.get(&id) {
			self.set_anchor(idx, None);
		}
		Some(id)
	}

	pub fn pinned(&self) -> Option<&str> {
		self.pinned.as_deref()
	}

	fn set_anchor(&mut self, idx: DefaultNodeIdx, at: Option<Position>) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() != idx {
				return;
			}
			match at {
				Some(Position { x, y }) => {
					node.data.x = x;
					node.data.y = y;
					node.data.is_anchor = true;
				}
				None => node.data.is_anchor = false,
			}
		});
	}

	pub fn node_count(&self) -> usize {
		self.indices.len()
	}

	pub fn edge_count(&self) -> usize {
		self.synced_edges.len()
	}
}
