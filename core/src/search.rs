use crate::tokenizer::tokenize;
use crate::{DocId, InvertedIndex, RankTable};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub doc_id: String,
    pub score: f64,
}

/// Score documents by summing their rank once per matching posting.
///
/// Each distinct query term is looked up once. A document missing from `ranks` adds 0, and
/// only hits with a positive total are returned, highest first. Equal scores keep the order in
/// which their documents were first reached while walking the query terms.
pub fn search(query: &str, index: &InvertedIndex, ranks: &RankTable) -> Vec<SearchHit> {
    let mut seen_terms: HashSet<String> = HashSet::new();
    let mut slots: HashMap<DocId, usize> = HashMap::new();
    let mut totals: Vec<(DocId, f64)> = Vec::new();

    for term in tokenize(query) {
        if !seen_terms.insert(term.clone()) {
            continue;
        }
        let Some(postings) = index.postings(&term) else { continue };
        for &doc in postings {
            let rank = index.doc_name(doc).and_then(|name| ranks.get(name)).unwrap_or(0.0);
            let slot = *slots.entry(doc).or_insert_with(|| {
                totals.push((doc, 0.0));
                totals.len() - 1
            });
            totals[slot].1 += rank;
        }
    }

    totals.retain(|(_, score)| *score > 0.0);
    // sort_by is stable, which is what keeps first-reached order among ties
    totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    totals
        .into_iter()
        .filter_map(|(doc, score)| {
            index.doc_name(doc).map(|name| SearchHit { doc_id: name.to_string(), score })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_query_terms_count_once() {
        let index: InvertedIndex = [("a", "rust")].into_iter().collect();
        let ranks: RankTable = [("a", 0.5)].into_iter().collect();
        let hits = search("rust RUST rüst", &index, &ranks);
        assert_eq!(hits.len(), 1);
        // "rüst" folds to "rust" as well
        assert!((hits[0].score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn unranked_documents_are_filtered() {
        let index: InvertedIndex = [("ranked", "page"), ("unranked", "page")].into_iter().collect();
        let ranks: RankTable = [("ranked", 0.2)].into_iter().collect();
        let hits = search("page", &index, &ranks);
        assert_eq!(hits, [SearchHit { doc_id: "ranked".into(), score: 0.2 }]);
    }

    #[test]
    fn ties_keep_first_reached_order() {
        let index: InvertedIndex = [("x", "beta"), ("y", "alpha"), ("z", "alpha beta")].into_iter().collect();
        let ranks: RankTable = [("x", 0.1), ("y", 0.1), ("z", 0.05)].into_iter().collect();
        let hits = search("alpha beta", &index, &ranks);
        let order: Vec<&str> = hits.iter().map(|h| h.doc_id.as_str()).collect();
        assert_eq!(order, ["y", "z", "x"]);
    }
}
