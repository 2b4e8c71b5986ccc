use std::collections::HashSet;

use super::config::ReferenceDirection;
use super::corpus::Corpus;
use super::expansion::candidate_ids;
use super::subgraph::Subgraph;
use super::types::{Classification, Edge, Entry};

/// The selected entry plus every corpus entry it references (and, depending
/// on `direction`, the entries referencing it). Empty without a selection.
pub fn neighbors_of<'a>(
	selected: Option<&'a Entry>,
	subgraph: &Subgraph,
	corpus: &'a Corpus,
	direction: ReferenceDirection,
) -> HashSet<&'a str> {
	let Some(selected) = selected else {
		return HashSet::new();
	};
	let mut neighbors: HashSet<&str> = candidate_ids(selected, subgraph, corpus, direction)
		.into_iter()
		.collect();
	neighbors.insert(&selected.id);
	neighbors
}

pub fn classify_node(id: &str, neighbors: &HashSet<&str>) -> Classification {
	if neighbors.contains(id) {
		Classification::Neighbor
	} else {
		Classification::Plain
	}
}

/// An edge is highlighted when it touches the selected node.
pub fn classify_edge(edge: &Edge, selected: Option<&str>) -> Classification {
	match selected {
		Some(id) if edge.touches(id) => Classification::Neighbor,
		_ => Classification::Plain,
	}
}

/// Classification of every displayed node and edge for one selection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Highlight {
	pub selected: Option<String>,
	/// Parallel to [`Subgraph::nodes`].
	pub nodes: Vec<(String, Classification)>,
	/// Parallel to [`Subgraph::edges`].
	pub edges: Vec<(Edge, Classification)>,
}

impl Highlight {
	/// Classify the whole subgraph against `selected`.
	pub fn resolve(
		selected: Option<&Entry>,
		subgraph: &Subgraph,
		corpus: &Corpus,
		direction: ReferenceDirection,
	) -> Self {
		let neighbors = neighbors_of(selected, subgraph, corpus, direction);
		let selected_id = selected.map(|e| e.id.as_str());

		Self {
			selected: selected_id.map(str::to_string),
			nodes: subgraph
				.nodes()
				.iter()
				.map(|id| (id.clone(), classify_node(id, &neighbors)))
				.collect(),
			edges: subgraph
				.edges()
				.iter()
				.map(|edge| (edge.clone(), classify_edge(edge, selected_id)))
				.collect(),
		}
	}

	pub fn node(&self, id: &str) -> Classification {
		self.nodes
			.iter()
			.find(|(n, _)| n == id)
			.map(|&(_, c)| c)
			.unwrap_or_default()
	}

	pub fn edge(&self, edge: &Edge) -> Classification {
		self.edges
			.iter()
			.find(|(e, _)| e == edge)
			.map(|&(_, c)| c)
			.unwrap_or_default()
	}

	pub fn is_active(&self) -> bool {
		self.selected.is_some()
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;
	use crate::explorer::expansion::expand;

	fn corpus() -> Corpus {
		Corpus::new(vec![
			Entry::new("a", "A", &["b", "c", "zz"]),
			Entry::new("b", "B", &["a", "d"]),
			Entry::new("c", "C", &[]),
			Entry::new("d", "D", &["c"]),
		])
	}

	fn grown(corpus: &Corpus) -> Subgraph {
		let mut subgraph = Subgraph::with_root("a");
		for id in ["a", "b"] {
			let entry = corpus.get(id).unwrap().clone();
			expand(&entry, &mut subgraph, corpus, ReferenceDirection::Outgoing);
		}
		subgraph
	}

	#[test]
	fn no_selection_has_no_neighbors() {
		let corpus = corpus();
		let subgraph = grown(&corpus);
		assert!(neighbors_of(None, &subgraph, &corpus, ReferenceDirection::Outgoing).is_empty());

		let highlight = Highlight::resolve(None, &subgraph, &corpus, ReferenceDirection::Outgoing);
		assert!(!highlight.is_active());
		assert!(highlight.nodes.iter().all(|(_, c)| *c == Classification::Plain));
		assert!(highlight.edges.iter().all(|(_, c)| *c == Classification::Plain));
	}

	#[test]
	fn neighbors_drop_dangling_references() {
		let corpus = corpus();
		let subgraph = grown(&corpus);
		let a = corpus.get("a").unwrap();
		let neighbors = neighbors_of(Some(a), &subgraph, &corpus, ReferenceDirection::Outgoing);
		let expected: HashSet<&str> = ["a", "b", "c"].into_iter().collect();
		assert_eq!(neighbors, expected);
	}

	#[test]
	fn resolve_classifies_everything() {
		let corpus = corpus();
		let subgraph = grown(&corpus);
		let d = corpus.get("d").unwrap();
		let highlight = Highlight::resolve(Some(d), &subgraph, &corpus, ReferenceDirection::Outgoing);

		assert_eq!(highlight.selected.as_deref(), Some("d"));
		assert_eq!(highlight.node("d"), Classification::Neighbor);
		assert_eq!(highlight.node("c"), Classification::Neighbor);
		assert_eq!(highlight.node("a"), Classification::Plain);
		assert_eq!(highlight.node("b"), Classification::Plain);
		assert_eq!(highlight.edge(&Edge::new("d", "b")), Classification::Neighbor);
		assert_eq!(highlight.edge(&Edge::new("a", "c")), Classification::Plain);
		assert_eq!(highlight.nodes.len(), subgraph.nodes().len());
		assert_eq!(highlight.edges.len(), subgraph.edges().len());
	}

	#[test]
	fn referrers_count_as_neighbors_in_bidirectional_mode() {
		let corpus = corpus();
		let subgraph = grown(&corpus);
		let c = corpus.get("c").unwrap();

		let outgoing = neighbors_of(Some(c), &subgraph, &corpus, ReferenceDirection::Outgoing);
		assert_eq!(outgoing.len(), 1);

		let both = neighbors_of(Some(c), &subgraph, &corpus, ReferenceDirection::Bidirectional);
		let expected: HashSet<&str> = ["a", "c", "d"].into_iter().collect();
		assert_eq!(both, expected);
	}

	proptest! {
		#[test]
		fn edge_classification_is_symmetric(a in "[a-e]", b in "[a-e]") {
			let edge = Edge::new(a.clone(), b.clone());
			if classify_edge(&edge, Some(a.as_str())).is_neighbor() {
				prop_assert!(classify_edge(&edge, Some(b.as_str())).is_neighbor());
			}
			prop_assert_eq!(
				classify_edge(&edge, Some(b.as_str())),
				classify_edge(&Edge::new(b.clone(), a.clone()), Some(b.as_str()))
			);
		}
	}
}
