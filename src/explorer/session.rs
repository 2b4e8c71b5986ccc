use std::sync::Arc;

use log::debug;
use rand::Rng;

use super::config::ReferenceDirection;
use super::corpus::Corpus;
use super::error::{Error, Result};
use super::expansion::{Delta, expand};
use super::highlight::Highlight;
use super::subgraph::Subgraph;
use super::types::Entry;

/// Outcome of one selection event, for the presentation layer.
#[derive(Clone, Debug)]
pub struct Selection {
	/// The selected entry, description included.
	pub entry: Entry,
	/// What the expansion added.
	pub delta: Delta,
	/// Fresh classification of the whole subgraph.
	pub highlight: Highlight,
}

/// One exploration: the corpus it walks, the trail so far and the current
/// selection.
#[derive(Clone, Debug)]
pub struct Explorer {
	corpus: Arc<Corpus>,
	subgraph: Subgraph,
	selected: Option<String>,
	direction: ReferenceDirection,
}

impl Explorer {
	/// Start from a random entry drawn from `rng`.
	pub fn new<R: Rng + ?Sized>(
		corpus: Arc<Corpus>,
		rng: &mut R,
		direction: ReferenceDirection,
	) -> Result<Self> {
		let subgraph = Subgraph::initialize(&corpus, rng)?;
		Ok(Self {
			corpus,
			subgraph,
			selected: None,
			direction,
		})
	}

	/// Start from a specific entry.
	pub fn starting_at(
		corpus: Arc<Corpus>,
		id: &str,
		direction: ReferenceDirection,
	) -> Result<Self> {
		if corpus.is_empty() {
			return Err(Error::EmptyCorpus);
		}
		if !corpus.contains(id) {
			return Err(Error::UnknownEntry(id.to_string()));
		}
		Ok(Self {
			subgraph: Subgraph::with_root(id),
			corpus,
			selected: None,
			direction,
		})
	}

	/// Handle a click on `id`: expand it, make it the selection and classify
	/// the result. Unknown ids are rejected without touching any state.
	pub fn select(&mut self, id: &str) -> Result<Selection> {
		let entry = self
			.corpus
			.get(id)
			.ok_or_else(|| Error::UnknownEntry(id.to_string()))?
			.clone();

		let delta = expand(&entry, &mut self.subgraph, &self.corpus, self.direction);
		self.selected = Some(entry.id.clone());
		debug!("selected {} ({})", entry.name, entry.id);

		Ok(Selection {
			highlight: self.highlight(),
			entry,
			delta,
		})
	}

	/// Drop the selection; everything becomes plain.
	pub fn clear_selection(&mut self) -> Highlight {
		self.selected = None;
		self.highlight()
	}

	/// Classify the subgraph against the current selection.
	pub fn highlight(&self) -> Highlight {
		let selected = self.selected_entry();
		Highlight::resolve(selected, &self.subgraph, &self.corpus, self.direction)
	}

	pub fn selected_entry(&self) -> Option<&Entry> {
		self.selected.as_deref().and_then(|id| self.corpus.get(id))
	}

	pub fn subgraph(&self) -> &Subgraph {
		&self.subgraph
	}

	pub fn corpus(&self) -> &Corpus {
		&self.corpus
	}

	/// The entry the exploration started from.
	pub fn root(&self) -> Option<&Entry> {
		self.subgraph
			.nodes()
			.first()
			.and_then(|id| self.corpus.get(id))
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;
	use crate::explorer::types::{Classification, Edge};

	fn scenario() -> Arc<Corpus> {
		Arc::new(Corpus::new(vec![
			Entry::new("a", "A", &["b", "c"]).with_description("first"),
			Entry::new("b", "B", &["a"]),
			Entry::new("c", "C", &["z"]),
		]))
	}

	#[test]
	fn empty_corpus_cannot_start() {
		let corpus = Arc::new(Corpus::new(Vec::new()));
		let mut rng = SmallRng::seed_from_u64(0);
		assert!(matches!(
			Explorer::new(corpus.clone(), &mut rng, ReferenceDirection::Outgoing),
			Err(Error::EmptyCorpus)
		));
		assert!(matches!(
			Explorer::starting_at(corpus, "a", ReferenceDirection::Outgoing),
			Err(Error::EmptyCorpus)
		));
	}

	#[test]
	fn seeded_start_is_reproducible() {
		let start = |seed| {
			let mut rng = SmallRng::seed_from_u64(seed);
			let explorer = Explorer::new(scenario(), &mut rng, ReferenceDirection::Outgoing).unwrap();
			explorer.root().map(|e| e.id.clone())
		};
		assert_eq!(start(42), start(42));
		assert!(start(42).is_some());
	}

	#[test]
	fn selection_carries_entry_delta_and_highlight() {
		let mut explorer =
			Explorer::starting_at(scenario(), "a", ReferenceDirection::Outgoing).unwrap();

		let selection = explorer.select("a").unwrap();
		assert_eq!(selection.entry.description.as_deref(), Some("first"));
		assert_eq!(selection.delta.added_nodes, vec!["b", "c"]);
		assert_eq!(
			selection.delta.added_edges,
			vec![Edge::new("a", "b"), Edge::new("a", "c")]
		);
		assert_eq!(selection.highlight.node("b"), Classification::Neighbor);
		assert_eq!(selection.highlight.edge(&Edge::new("c", "a")), Classification::Neighbor);

		let selection = explorer.select("c").unwrap();
		assert!(selection.delta.is_empty());
		assert_eq!(selection.highlight.node("c"), Classification::Neighbor);
		assert_eq!(selection.highlight.node("a"), Classification::Plain);
		assert_eq!(selection.highlight.edge(&Edge::new("a", "b")), Classification::Plain);
		assert_eq!(selection.highlight.edge(&Edge::new("a", "c")), Classification::Neighbor);

		assert!(explorer.select("b").unwrap().delta.is_empty());
		assert_eq!(explorer.selected_entry().map(|e| e.id.as_str()), Some("b"));
	}

	#[test]
	fn unknown_selection_changes_nothing() {
		let mut explorer =
			Explorer::starting_at(scenario(), "a", ReferenceDirection::Outgoing).unwrap();
		explorer.select("a").unwrap();

		assert!(matches!(explorer.select("z"), Err(Error::UnknownEntry(id)) if id == "z"));
		assert_eq!(explorer.selected_entry().map(|e| e.id.as_str()), Some("a"));
		assert_eq!(explorer.subgraph().nodes().len(), 3);
	}

	#[test]
	fn highlight_follows_selection_changes() {
		let mut explorer =
			Explorer::starting_at(scenario(), "a", ReferenceDirection::Outgoing).unwrap();
		explorer.select("a").unwrap();
		let on_a = explorer.highlight();
		explorer.select("b").unwrap();
		let on_b = explorer.highlight();

		assert_ne!(on_a, on_b);
		assert_eq!(on_b.node("c"), Classification::Plain);

		let cleared = explorer.clear_selection();
		assert!(!cleared.is_active());
		assert!(cleared.nodes.iter().all(|(_, c)| !c.is_neighbor()));
	}
}
