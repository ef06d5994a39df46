//! Iterative PageRank over a [`LinkGraph`].
//!
//! Each pass is a map step (every scored document splits its score evenly across its outgoing
//! links) followed by a reduce step (each node's inflow is damped and added to the teleport
//! floor `(1 - d) / N`). The loop runs for a fixed number of passes with no convergence test.

use crate::{LinkGraph, NodeId};
use anyhow::{ensure, Result};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What happens to a node that receives no inflow during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroInflow {
    /// The node loses its score for that pass and stops contributing until something links
    /// to it again.
    #[default]
    Drop,
    /// The node keeps the teleport floor `(1 - d) / N`, as in textbook PageRank.
    Floor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    pub iterations: usize,
    pub damping: f64,
    pub zero_inflow: ZeroInflow,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self { iterations: 10, damping: 0.85, zero_inflow: ZeroInflow::Drop }
    }
}

impl RankConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.damping.is_finite() && (0.0..=1.0).contains(&self.damping),
            "damping must be within [0, 1], got {}",
            self.damping
        );
        Ok(())
    }
}

/// Score per node. A node without a score was dropped in the last pass.
#[derive(Debug, Default, Clone)]
pub struct RankTable {
    nodes: Vec<String>,
    dictionary: HashMap<String, NodeId>,
    scores: Vec<Option<f64>>,
}

impl RankTable {
    fn uniform(graph: &LinkGraph, n: f64) -> Self {
        let nodes = graph.nodes().to_vec();
        let dictionary = nodes.iter().enumerate().map(|(i, name)| (name.clone(), i as NodeId)).collect();
        let scores = vec![Some(1.0 / n); nodes.len()];
        Self { nodes, dictionary, scores }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        let id = *self.dictionary.get(name)?;
        self.get_id(id)
    }

    pub fn get_id(&self, id: NodeId) -> Option<f64> {
        self.scores.get(id as usize).copied().flatten()
    }

    /// Scored nodes in node order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.nodes.iter().zip(&self.scores).filter_map(|(name, score)| score.map(|s| (name.as_str(), s)))
    }

    /// Number of nodes currently holding a score.
    pub fn len(&self) -> usize {
        self.scores.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn total_mass(&self) -> f64 {
        self.scores.iter().flatten().sum()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for RankTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut table = RankTable::default();
        for (name, score) in iter {
            let name = name.into();
            match table.dictionary.get(&name) {
                Some(&id) => table.scores[id as usize] = Some(score),
                None => {
                    table.dictionary.insert(name.clone(), table.nodes.len() as NodeId);
                    table.nodes.push(name);
                    table.scores.push(Some(score));
                }
            }
        }
        table
    }
}

/// Run PageRank for `config.iterations` passes.
///
/// N is the number of graph nodes, floored to 1. With zero passes every node keeps `1 / N`.
pub fn rank(graph: &LinkGraph, config: &RankConfig) -> RankTable {
    let n = graph.num_nodes().max(1) as f64;
    let mut table = RankTable::uniform(graph, n);
    let teleport = (1.0 - config.damping) / n;

    for pass in 0..config.iterations {
        let inflow = reduce_inflow(graph, &map_shares(graph, &table.scores));
        table.scores = inflow
            .into_iter()
            .map(|sum| match (sum, config.zero_inflow) {
                (Some(sum), _) => Some(teleport + config.damping * sum),
                (None, ZeroInflow::Floor) => Some(teleport),
                (None, ZeroInflow::Drop) => None,
            })
            .collect();
        tracing::debug!(pass, scored = table.len(), mass = table.total_mass(), "rank pass");
    }

    tracing::info!(
        nodes = graph.num_nodes(),
        scored = table.len(),
        iterations = config.iterations,
        "ranking complete"
    );
    table
}

/// Per-source share `score / out_degree`, or `None` for a source that sends nothing.
fn share(source: NodeId, links: &[NodeId], scores: &[Option<f64>]) -> Option<f64> {
    if links.is_empty() {
        return None;
    }
    scores[source as usize].map(|score| score / links.len() as f64)
}

#[cfg(feature = "parallel")]
fn map_shares(graph: &LinkGraph, scores: &[Option<f64>]) -> Vec<Option<f64>> {
    graph.sources().par_iter().map(|(src, links)| share(*src, links, scores)).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_shares(graph: &LinkGraph, scores: &[Option<f64>]) -> Vec<Option<f64>> {
    graph.sources().iter().map(|(src, links)| share(*src, links, scores)).collect()
}

/// Sum shares per target in source order, so the result does not depend on how the map step
/// was scheduled.
fn reduce_inflow(graph: &LinkGraph, shares: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut inflow = vec![None; graph.num_nodes()];
    for ((_, links), share) in graph.sources().iter().zip(shares) {
        let Some(share) = share else { continue };
        for &target in links {
            *inflow[target as usize].get_or_insert(0.0) += share;
        }
    }
    inflow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Corpus, Document};

    fn graph(edges: &[(&str, &[&str])]) -> LinkGraph {
        let corpus: Corpus = edges
            .iter()
            .map(|(id, links)| Document::new(*id, "", links.iter().map(|s| s.to_string()).collect()))
            .collect();
        LinkGraph::build(&corpus)
    }

    #[test]
    fn dropped_node_stays_unscored() {
        // "a" has no inbound links, so it is dropped after the first pass.
        let g = graph(&[("a", &["b"]), ("b", &["c"]), ("c", &["b"])]);
        let table = rank(&g, &RankConfig { iterations: 1, ..Default::default() });
        assert!(table.get("a").is_none());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn floor_policy_keeps_every_node() {
        let g = graph(&[("a", &["b"]), ("b", &["c"]), ("c", &["b"])]);
        let config = RankConfig { zero_inflow: ZeroInflow::Floor, ..Default::default() };
        let table = rank(&g, &config);
        assert_eq!(table.len(), 3);
        let floor = 0.15 / 3.0;
        assert!((table.get("a").unwrap() - floor).abs() < 1e-12);
    }

    #[test]
    fn duplicate_links_send_repeated_shares() {
        let g = graph(&[("a", &["b", "b", "c"])]);
        let table = rank(&g, &RankConfig { iterations: 1, ..Default::default() });
        let third = 1.0 / 3.0;
        let base = 0.15 / 3.0;
        assert!((table.get("b").unwrap() - (base + 0.85 * 2.0 * third / 3.0)).abs() < 1e-12);
        assert!((table.get("c").unwrap() - (base + 0.85 * third / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn validate_rejects_bad_damping() {
        assert!(RankConfig { damping: 1.5, ..Default::default() }.validate().is_err());
        assert!(RankConfig { damping: f64::NAN, ..Default::default() }.validate().is_err());
        assert!(RankConfig::default().validate().is_ok());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let cfg: RankConfig = serde_json::from_str(r#"{"zero_inflow":"floor"}"#).unwrap();
        assert_eq!(cfg.iterations, 10);
        assert_eq!(cfg.zero_inflow, ZeroInflow::Floor);
    }
}
