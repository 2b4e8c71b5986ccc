//! Error type for the exploration core.

use thiserror::Error;

/// Errors surfaced by the exploration core.
#[derive(Error, Debug)]
pub enum Error {
	/// The corpus has no entries, so there is no starting node.
	#[error("corpus is empty: no entry to start exploring from")]
	EmptyCorpus,

	/// A selection named an id that is not in the corpus.
	#[error("unknown entry: {0}")]
	UnknownEntry(String),

	/// The corpus document could not be parsed.
	#[error("malformed corpus: {0}")]
	CorpusFormat(#[from] serde_json::Error),
}

/// Result alias using the core [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
