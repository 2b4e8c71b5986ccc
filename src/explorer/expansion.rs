use std::collections::HashSet;

use log::debug;

use super::config::ReferenceDirection;
use super::corpus::Corpus;
use super::subgraph::Subgraph;
use super::types::{Edge, Entry};

/// What one expansion added to the subgraph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Delta {
	pub added_nodes: Vec<String>,
	pub added_edges: Vec<Edge>,
}

impl Delta {
	pub fn is_empty(&self) -> bool {
		self.added_nodes.is_empty() && self.added_edges.is_empty()
	}
}

/// Ids `selected` links to, deduplicated, restricted to the corpus and in
/// reference order. Referrers (when `direction` asks for them) follow in
/// corpus order.
pub fn candidate_ids<'a>(
	selected: &'a Entry,
	subgraph: &Subgraph,
	corpus: &'a Corpus,
	direction: ReferenceDirection,
) -> Vec<&'a str> {
	let mut seen = HashSet::new();
	let mut candidates = Vec::new();

	for id in &selected.references {
		if corpus.contains(id) && seen.insert(id.as_str()) {
			candidates.push(id.as_str());
		}
	}

	let displayed_only = match direction {
		ReferenceDirection::Outgoing => return candidates,
		ReferenceDirection::IncludeDisplayedReferrers => true,
		ReferenceDirection::Bidirectional => false,
	};
	for referrer in corpus.referrers_of(&selected.id) {
		if displayed_only && !subgraph.contains_node(&referrer.id) {
			continue;
		}
		if seen.insert(referrer.id.as_str()) {
			candidates.push(referrer.id.as_str());
		}
	}
	candidates
}

/// Merge the neighbours of `selected` into `subgraph`.
///
/// Nodes are appended in reference order before any edge is attempted, so
/// every edge lands between displayed nodes. Re-expanding an entry yields an
/// empty delta.
pub fn expand(
	selected: &Entry,
	subgraph: &mut Subgraph,
	corpus: &Corpus,
	direction: ReferenceDirection,
) -> Delta {
	let candidates = candidate_ids(selected, subgraph, corpus, direction);
	let mut delta = Delta::default();

	// A selection event may come from a node that is not displayed yet.
	if subgraph.add_node(&selected.id) {
		delta.added_nodes.push(selected.id.clone());
	}
	for &id in &candidates {
		if subgraph.add_node(id) {
			delta.added_nodes.push(id.to_string());
		}
	}
	for &id in &candidates {
		if let Some(edge) = subgraph.add_edge(&selected.id, id) {
			delta.added_edges.push(edge);
		}
	}

	debug!(
		"expanded {}: {} candidates, +{} nodes, +{} edges",
		selected.id,
		candidates.len(),
		delta.added_nodes.len(),
		delta.added_edges.len()
	);
	delta
}
