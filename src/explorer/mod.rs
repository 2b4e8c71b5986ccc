//! Incremental exploration of a cross-referenced corpus.
//!
//! Pure state and functions: no DOM access happens here. The canvas
//! component drives an [`Explorer`] and a [`LayoutAdapter`] and draws what
//! they report.

mod config;
mod corpus;
mod error;
mod expansion;
mod highlight;
mod layout;
mod session;
mod subgraph;
mod types;

pub use config::{ExplorerConfig, LayoutConfig, ReferenceDirection};
pub use corpus::Corpus;
pub use error::{Error, Result};
pub use expansion::{Delta, candidate_ids, expand};
pub use highlight::{Highlight, classify_edge, classify_node, neighbors_of};
pub use layout::{LayoutAdapter, LayoutNode, Position, PositionFrame};
pub use session::{Explorer, Selection};
pub use subgraph::Subgraph;
pub use types::{Classification, Edge, Entry};
