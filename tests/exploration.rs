use std::sync::Arc;

use jargon_graph::explorer::{
	Classification, Corpus, Edge, Entry, Explorer, LayoutAdapter, LayoutConfig, ReferenceDirection,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const ENTRIES: &str = include_str!("../assets/entries.json");

fn lexicon() -> Arc<Corpus> {
	Arc::new(Corpus::from_json(ENTRIES).unwrap())
}

#[test]
fn random_walk_over_the_lexicon() {
	let corpus = lexicon();
	let mut rng = SmallRng::seed_from_u64(2024);
	let mut explorer = Explorer::new(corpus.clone(), &mut rng, ReferenceDirection::Outgoing).unwrap();
	let mut layout = LayoutAdapter::new(LayoutConfig::default());
	layout.sync(explorer.subgraph());

	for _ in 0..40 {
		let nodes = explorer.subgraph().nodes();
		let id = nodes[rng.gen_range(0..nodes.len())].clone();
		let before = explorer.subgraph().clone();

		let selection = explorer.select(&id).unwrap();
		if !selection.delta.is_empty() {
			assert!(layout.sync(explorer.subgraph()));
			layout.reenergize(1.0);
		}
		assert!(!layout.sync(explorer.subgraph()));
		layout.step(0.016);

		let after = explorer.subgraph();
		assert!(before.nodes().iter().all(|n| after.contains_node(n)));
		assert!(before.edges().iter().all(|e| after.contains_edge(&e.source, &e.target)));
		for edge in after.edges() {
			assert!(after.contains_node(&edge.source) && after.contains_node(&edge.target));
		}
		assert_eq!(layout.node_count(), after.nodes().len());
		assert_eq!(layout.edge_count(), after.edges().len());

		assert_eq!(selection.highlight.node(&id), Classification::Neighbor);
		assert!(explorer.select(&id).unwrap().delta.is_empty());
	}
}

#[test]
fn same_seed_same_trail() {
	let trail = |seed| {
		let mut rng = SmallRng::seed_from_u64(seed);
		let mut explorer = Explorer::new(lexicon(), &mut rng, ReferenceDirection::Outgoing).unwrap();
		for _ in 0..10 {
			let nodes = explorer.subgraph().nodes();
			let id = nodes[rng.gen_range(0..nodes.len())].clone();
			explorer.select(&id).unwrap();
		}
		explorer.subgraph().nodes().to_vec()
	};
	assert_eq!(trail(9), trail(9));
}

#[test]
fn lexicon_scenario_from_hacker() {
	let mut explorer =
		Explorer::starting_at(lexicon(), "H/hacker.html", ReferenceDirection::Outgoing).unwrap();

	let selection = explorer.select("H/hacker.html").unwrap();
	assert_eq!(
		selection.delta.added_nodes,
		vec![
			"W/wizard.html",
			"G/guru.html",
			"C/cracker.html",
			"H/hack.html",
			"N/nerd.html"
		]
	);
	assert_eq!(selection.delta.added_edges.len(), 5);

	// the self reference is ignored
	let selection = explorer.select("H/hack.html").unwrap();
	assert_eq!(selection.delta.added_nodes, vec!["K/kludge.html", "C/crock.html"]);
	assert!(!selection.delta.added_edges.contains(&Edge::new("H/hack.html", "H/hack.html")));
	assert_eq!(selection.highlight.node("W/wizard.html"), Classification::Plain);
	assert_eq!(
		selection.highlight.edge(&Edge::new("H/hacker.html", "H/hack.html")),
		Classification::Neighbor
	);

	// "K/kluge.html" is not in the lexicon
	let selection = explorer.select("K/kludge.html").unwrap();
	assert!(selection.delta.added_nodes.is_empty());
	assert_eq!(selection.delta.added_edges, vec![Edge::new("K/kludge.html", "C/crock.html")]);
	assert!(!explorer.subgraph().contains_node("K/kluge.html"));
}

#[test]
fn empty_lexicon_is_fatal() {
	let corpus = Arc::new(Corpus::new(Vec::<Entry>::new()));
	let mut rng = SmallRng::seed_from_u64(0);
	assert!(Explorer::new(corpus, &mut rng, ReferenceDirection::Outgoing).is_err());
}
