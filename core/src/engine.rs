use crate::{rank, search, Corpus, InvertedIndex, LinkGraph, RankConfig, RankTable, SearchHit};
use serde::Serialize;

/// Immutable snapshot of a ranked, indexed corpus.
///
/// Built once, then shared read-only (e.g. behind an `Arc`) by any number of query callers.
#[derive(Debug)]
pub struct SearchEngine {
    corpus: Corpus,
    graph: LinkGraph,
    ranks: RankTable,
    index: InvertedIndex,
}

#[derive(Debug, Clone, Serialize)]
pub struct EngineStats {
    pub documents: usize,
    pub nodes: usize,
    pub edges: usize,
    pub ranked_nodes: usize,
    pub rank_mass: f64,
    pub terms: usize,
    pub postings: usize,
}

impl SearchEngine {
    pub fn build(corpus: Corpus, config: &RankConfig) -> Self {
        let graph = LinkGraph::build(&corpus);
        let ranks = rank(&graph, config);
        let index = InvertedIndex::build(&corpus);
        tracing::info!(
            documents = corpus.len(),
            nodes = graph.num_nodes(),
            terms = index.num_terms(),
            "search engine ready"
        );
        Self { corpus, graph, ranks, index }
    }

    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        search(query, &self.index, &self.ranks)
    }

    /// Best `k` hits only.
    pub fn search_top(&self, query: &str, k: usize) -> Vec<SearchHit> {
        let mut hits = self.search(query);
        hits.truncate(k);
        hits
    }

    pub fn content(&self, id: &str) -> Option<&str> {
        self.corpus.content(id)
    }

    pub fn corpus(&self) -> &Corpus { &self.corpus }

    pub fn graph(&self) -> &LinkGraph { &self.graph }

    pub fn ranks(&self) -> &RankTable { &self.ranks }

    pub fn index(&self) -> &InvertedIndex { &self.index }

    pub fn stats(&self) -> EngineStats {
        let index = self.index.stats();
        EngineStats {
            documents: self.corpus.len(),
            nodes: self.graph.num_nodes(),
            edges: self.graph.num_edges(),
            ranked_nodes: self.ranks.len(),
            rank_mass: self.ranks.total_mass(),
            terms: index.num_terms,
            postings: index.num_postings,
        }
    }
}
