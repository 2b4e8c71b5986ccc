use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// One lexicon entry as supplied by the corpus provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
	/// Canonical identifier, unique across the corpus.
	#[serde(alias = "url")]
	pub id: String,
	/// Display name.
	pub name: String,
	/// Descriptive text shown when the entry is selected.
	#[serde(default)]
	pub description: Option<String>,
	/// Outgoing references, in document order. May contain duplicates and
	/// ids that are not in the corpus.
	#[serde(default, alias = "links")]
	pub references: Vec<String>,
}

impl Entry {
	/// Convenience constructor for an entry without a description.
	pub fn new(id: impl Into<String>, name: impl Into<String>, references: &[&str]) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			description: None,
			references: references.iter().map(|r| r.to_string()).collect(),
		}
	}

	/// Attach a description.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}
}

/// Undirected connection between two displayed nodes.
///
/// `source`/`target` keep the order in which the edge was discovered (useful
/// for drawing), but equality and hashing treat the pair as unordered.
#[derive(Clone, Debug)]
pub struct Edge {
	/// Endpoint the edge was discovered from.
	pub source: String,
	/// Endpoint the edge points at.
	pub target: String,
}

impl Edge {
	/// Create an edge between `source` and `target`.
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
		}
	}

	/// Endpoints in canonical (sorted) order.
	pub fn key(&self) -> (&str, &str) {
		if self.source <= self.target {
			(&self.source, &self.target)
		} else {
			(&self.target, &self.source)
		}
	}

	/// Whether `id` is one of the two endpoints.
	pub fn touches(&self, id: &str) -> bool {
		self.source == id || self.target == id
	}

	/// Whether both endpoints are the same id.
	pub fn is_loop(&self) -> bool {
		self.source == self.target
	}
}

impl PartialEq for Edge {
	fn eq(&self, other: &Self) -> bool {
		self.key() == other.key()
	}
}

impl Eq for Edge {}

impl Hash for Edge {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.key().hash(state);
	}
}

/// Presentation class of a node or edge relative to the current selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Classification {
	/// Part of the selected entry's neighbourhood.
	Neighbor,
	/// Everything else.
	#[default]
	Plain,
}

impl Classification {
	/// `true` for [`Classification::Neighbor`].
	pub fn is_neighbor(self) -> bool {
		self == Classification::Neighbor
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	#[test]
	fn edge_equality_ignores_direction() {
		assert_eq!(Edge::new("a", "b"), Edge::new("b", "a"));
		assert_ne!(Edge::new("a", "b"), Edge::new("a", "c"));

		let set: HashSet<Edge> = [Edge::new("a", "b"), Edge::new("b", "a")].into_iter().collect();
		assert_eq!(set.len(), 1);
	}

	#[test]
	fn edge_keeps_discovery_order() {
		let edge = Edge::new("z", "a");
		assert_eq!(edge.source, "z");
		assert_eq!(edge.key(), ("a", "z"));
		assert!(edge.touches("z") && edge.touches("a") && !edge.touches("m"));
	}

	#[test]
	fn entry_accepts_scraper_field_names() {
		let entry: Entry = serde_json::from_str(
			r#"{"url": "N/nybble.html", "name": "nybble", "links": ["B/byte.html"]}"#,
		)
		.unwrap();
		assert_eq!(entry.id, "N/nybble.html");
		assert_eq!(entry.references, vec!["B/byte.html".to_string()]);
		assert_eq!(entry.description, None);
	}
}
