use crate::{Corpus, NodeId};
use std::collections::HashMap;

/// Directed link graph over every identifier the corpus mentions.
///
/// `nodes` is the resolved set of all node names: each document id plus each link target,
/// deduplicated, in first-seen order. A target with no matching document (a dangling
/// reference) is still a node. `sources` keeps one entry per document, in corpus order, with its
/// outgoing links resolved to node ids (duplicates kept).
#[derive(Debug, Default, Clone)]
pub struct LinkGraph {
    nodes: Vec<String>,
    dictionary: HashMap<String, NodeId>,
    sources: Vec<(NodeId, Vec<NodeId>)>,
}

impl LinkGraph {
    /// Build the graph from a corpus. Never fails; an empty corpus gives an empty graph.
    pub fn build(corpus: &Corpus) -> Self {
        let mut graph = LinkGraph::default();
        for doc in corpus.iter() {
            let source = graph.intern(&doc.id);
            let targets = doc.links.iter().map(|link| graph.intern(link)).collect();
            graph.sources.push((source, targets));
        }
        tracing::debug!(
            nodes = graph.nodes.len(),
            sources = graph.sources.len(),
            edges = graph.num_edges(),
            "built link graph"
        );
        graph
    }

    fn intern(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.dictionary.get(name) {
            return id;
        }
        let id = self.nodes.len() as NodeId;
        self.nodes.push(name.to_string());
        self.dictionary.insert(name.to_string(), id);
        id
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.dictionary.get(name).copied()
    }

    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id as usize).map(String::as_str)
    }

    /// All node names in id order.
    pub fn nodes(&self) -> &[String] { &self.nodes }

    pub fn num_nodes(&self) -> usize { self.nodes.len() }

    /// Documents and their resolved outgoing links, in corpus order.
    pub fn sources(&self) -> &[(NodeId, Vec<NodeId>)] { &self.sources }

    pub fn out_links(&self, name: &str) -> Option<&[NodeId]> {
        let id = self.node_id(name)?;
        self.sources.iter().find(|(src, _)| *src == id).map(|(_, links)| links.as_slice())
    }

    pub fn num_edges(&self) -> usize {
        self.sources.iter().map(|(_, links)| links.len()).sum()
    }

    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Document;

    fn doc(id: &str, links: &[&str]) -> Document {
        Document::new(id, "", links.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn dangling_targets_become_nodes() {
        let corpus: Corpus = vec![doc("a", &["b", "ghost"]), doc("b", &["a"])].into_iter().collect();
        let graph = LinkGraph::build(&corpus);
        assert_eq!(graph.nodes(), ["a", "b", "ghost"]);
        assert_eq!(graph.num_edges(), 3);
        assert!(graph.out_links("ghost").is_none());
    }

    #[test]
    fn every_link_target_is_a_node() {
        let corpus: Corpus = vec![doc("x", &["y", "y", "z"]), doc("w", &["x", "q"])].into_iter().collect();
        let graph = LinkGraph::build(&corpus);
        for (_, links) in graph.sources() {
            for &target in links {
                assert!(graph.node_name(target).is_some());
            }
        }
        assert_eq!(graph.out_links("x").unwrap().len(), 3);
        assert_eq!(graph.num_nodes(), 5);
    }

    #[test]
    fn empty_corpus_gives_empty_graph() {
        let graph = LinkGraph::build(&Corpus::new());
        assert!(graph.is_empty());
        assert_eq!(graph.num_edges(), 0);
    }
}
