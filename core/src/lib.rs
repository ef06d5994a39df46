//! Link-graph ranking and keyword search over a fixed document corpus.
//!
//! Data flows one way: [`graph::LinkGraph`] feeds [`rank::rank`], [`index::InvertedIndex`] is
//! built independently, and [`search::search`] borrows both at query time.
//! [`engine::SearchEngine`] bundles the three into one immutable snapshot.

pub mod corpus;
pub mod engine;
pub mod graph;
pub mod index;
pub mod ingest;
pub mod rank;
pub mod search;
pub mod tokenizer;

pub use corpus::{Corpus, Document};
pub use engine::SearchEngine;
pub use graph::LinkGraph;
pub use index::InvertedIndex;
pub use rank::{rank, RankConfig, RankTable, ZeroInflow};
pub use search::{search, SearchHit};

/// Dense id of a node in the link graph, assigned in first-seen order.
pub type NodeId = u32;
/// Dense id of a document in the inverted index, assigned in ingestion order.
pub type DocId = u32;
