use std::collections::HashMap;

use log::warn;
use rand::Rng;

use super::error::{Error, Result};
use super::types::Entry;

/// Immutable, id-indexed collection of every explorable entry.
#[derive(Clone, Debug, Default)]
pub struct Corpus {
	entries: Vec<Entry>,
	by_id: HashMap<String, usize>,
	/// id -> indices of entries whose references mention it, in corpus order.
	referrers: HashMap<String, Vec<usize>>,
}

impl Corpus {
	/// Build a corpus from provider output. Ids are expected to be unique;
	/// if one repeats, the first occurrence wins.
	pub fn new(entries: Vec<Entry>) -> Self {
		let mut kept = Vec::with_capacity(entries.len());
		let mut by_id = HashMap::with_capacity(entries.len());

		for entry in entries {
			if by_id.contains_key(&entry.id) {
				warn!("duplicate corpus id {}, keeping first occurrence", entry.id);
				continue;
			}
			by_id.insert(entry.id.clone(), kept.len());
			kept.push(entry);
		}

		let mut referrers: HashMap<String, Vec<usize>> = HashMap::new();
		for (idx, entry) in kept.iter().enumerate() {
			for target in &entry.references {
				let list = referrers.entry(target.clone()).or_default();
				if list.last() != Some(&idx) {
					list.push(idx);
				}
			}
		}

		Self {
			entries: kept,
			by_id,
			referrers,
		}
	}

	/// Parse a JSON array of entries.
	pub fn from_json(json: &str) -> Result<Self> {
		let entries: Vec<Entry> = serde_json::from_str(json)?;
		Ok(Self::new(entries))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Look up an entry by id.
	pub fn get(&self, id: &str) -> Option<&Entry> {
		self.by_id.get(id).map(|&idx| &self.entries[idx])
	}

	pub fn contains(&self, id: &str) -> bool {
		self.by_id.contains_key(id)
	}

	/// All entries, in provider order.
	pub fn entries(&self) -> &[Entry] {
		&self.entries
	}

	/// Entries whose references mention `id`, in corpus order.
	pub fn referrers_of<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Entry> + use<'a> {
		self.referrers
			.get(id)
			.into_iter()
			.flatten()
			.map(|&idx| &self.entries[idx])
	}

	/// Pick one entry uniformly at random.
	pub fn random_entry<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&Entry> {
		if self.entries.is_empty() {
			return Err(Error::EmptyCorpus);
		}
		Ok(&self.entries[rng.gen_range(0..self.entries.len())])
	}
}
