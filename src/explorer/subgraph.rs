use std::collections::HashSet;

use log::{info, warn};
use rand::Rng;

use super::corpus::Corpus;
use super::error::Result;
use super::types::Edge;

/// The displayed, grow-only part of the corpus.
///
/// Nodes keep insertion order so rendering keys stay stable. Nothing is ever
/// removed.
#[derive(Clone, Debug, Default)]
pub struct Subgraph {
	nodes: Vec<String>,
	node_set: HashSet<String>,
	edges: Vec<Edge>,
	edge_set: HashSet<Edge>,
}

impl Subgraph {
	/// Start exploring from one uniformly random corpus entry.
	pub fn initialize<R: Rng + ?Sized>(corpus: &Corpus, rng: &mut R) -> Result<Self> {
		let seed = corpus.random_entry(rng)?;
		info!("exploration starts at {} ({})", seed.name, seed.id);
		Ok(Self::with_root(&seed.id))
	}

	/// One-node, zero-edge subgraph rooted at `id`.
	pub fn with_root(id: &str) -> Self {
		let mut subgraph = Self::default();
		subgraph.add_node(id);
		subgraph
	}

	pub fn contains_node(&self, id: &str) -> bool {
		self.node_set.contains(id)
	}

	pub fn contains_edge(&self, a: &str, b: &str) -> bool {
		self.edge_set.contains(&Edge::new(a, b))
	}

	/// Append `id` unless already present. Returns whether it was added.
	pub fn add_node(&mut self, id: &str) -> bool {
		if !self.node_set.insert(id.to_string()) {
			return false;
		}
		self.nodes.push(id.to_string());
		true
	}

	/// Insert the undirected edge `a`-`b`. Self loops, duplicates (in either
	/// direction) and edges with an endpoint outside the node set are ignored.
	pub fn add_edge(&mut self, a: &str, b: &str) -> Option<Edge> {
		if a == b {
			return None;
		}
		if !self.contains_node(a) || !self.contains_node(b) {
			warn!("ignoring edge {a} - {b}: endpoint not displayed");
			return None;
		}
		let edge = Edge::new(a, b);
		if !self.edge_set.insert(edge.clone()) {
			return None;
		}
		self.edges.push(edge.clone());
		Some(edge)
	}

	/// Node ids in insertion order.
	pub fn nodes(&self) -> &[String] {
		&self.nodes
	}

	/// Edges in insertion order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Position of `id` in insertion order.
	pub fn node_index(&self, id: &str) -> Option<usize> {
		if !self.contains_node(id) {
			return None;
		}
		self.nodes.iter().position(|n| n == id)
	}

	/// Displayed nodes connected to `id`.
	pub fn adjacent<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
		self.edges.iter().filter_map(move |edge| {
			if edge.source == id {
				Some(edge.target.as_str())
			} else if edge.target == id {
				Some(edge.source.as_str())
			} else {
				None
			}
		})
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;
	use crate::explorer::error::Error;
	use crate::explorer::types::Entry;

	#[test]
	fn initialize_picks_one_corpus_entry() {
		let corpus = Corpus::new(vec![
			Entry::new("a", "A", &["b"]),
			Entry::new("b", "B", &[]),
		]);
		let subgraph = Subgraph::initialize(&corpus, &mut SmallRng::seed_from_u64(3)).unwrap();
		assert_eq!(subgraph.nodes().len(), 1);
		assert!(subgraph.edges().is_empty());
		assert!(corpus.contains(&subgraph.nodes()[0]));
	}

	#[test]
	fn initialize_on_empty_corpus_fails() {
		let corpus = Corpus::new(Vec::new());
		let result = Subgraph::initialize(&corpus, &mut SmallRng::seed_from_u64(3));
		assert!(matches!(result, Err(Error::EmptyCorpus)));
	}

	#[test]
	fn add_node_is_idempotent_and_ordered() {
		let mut subgraph = Subgraph::with_root("a");
		assert!(subgraph.add_node("c"));
		assert!(subgraph.add_node("b"));
		assert!(!subgraph.add_node("c"));
		assert_eq!(subgraph.nodes(), ["a", "c", "b"]);
		assert_eq!(subgraph.node_index("b"), Some(2));
		assert_eq!(subgraph.node_index("x"), None);
	}

	#[test]
	fn add_edge_rejects_duplicates_loops_and_strangers() {
		let mut subgraph = Subgraph::with_root("a");
		subgraph.add_node("b");

		assert!(subgraph.add_edge("a", "b").is_some());
		assert!(subgraph.add_edge("a", "b").is_none());
		assert!(subgraph.add_edge("b", "a").is_none());
		assert!(subgraph.add_edge("a", "a").is_none());
		assert!(subgraph.add_edge("a", "x").is_none());

		assert_eq!(subgraph.edges().len(), 1);
		assert!(subgraph.contains_edge("b", "a"));
		assert_eq!(subgraph.adjacent("b").collect::<Vec<_>>(), vec!["a"]);
	}
}
