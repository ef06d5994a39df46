use crate::tokenizer::tokenize;
use crate::{Corpus, DocId};
use serde::Serialize;
use std::collections::HashMap;

/// Normalized term -> posting list.
///
/// A posting list holds one entry per occurrence, so a document that uses a term five times
/// appears five times. Entries are in document order, then text order.
#[derive(Debug, Default, Clone)]
pub struct InvertedIndex {
    docs: Vec<String>,
    doc_ids: HashMap<String, DocId>,
    postings: HashMap<String, Vec<DocId>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub num_docs: usize,
    pub num_terms: usize,
    pub num_postings: usize,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Index every document's text. Never fails.
    pub fn build(corpus: &Corpus) -> Self {
        let mut index = InvertedIndex::new();
        for doc in corpus.iter() {
            index.add_document(&doc.id, &doc.text);
        }
        tracing::debug!(docs = index.docs.len(), terms = index.postings.len(), "built inverted index");
        index
    }

    /// Append a document's terms. Adding the same id twice extends its existing postings.
    pub fn add_document(&mut self, id: &str, text: &str) {
        let doc_id = match self.doc_ids.get(id) {
            Some(&doc_id) => doc_id,
            None => {
                let doc_id = self.docs.len() as DocId;
                self.docs.push(id.to_string());
                self.doc_ids.insert(id.to_string(), doc_id);
                doc_id
            }
        };
        for term in tokenize(text) {
            self.postings.entry(term).or_default().push(doc_id);
        }
    }

    /// Posting list for an already-normalized term.
    pub fn postings(&self, term: &str) -> Option<&[DocId]> {
        self.postings.get(term).map(Vec::as_slice)
    }

    pub fn doc_name(&self, id: DocId) -> Option<&str> {
        self.docs.get(id as usize).map(String::as_str)
    }

    pub fn num_docs(&self) -> usize { self.docs.len() }

    pub fn num_terms(&self) -> usize { self.postings.len() }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            num_docs: self.num_docs(),
            num_terms: self.num_terms(),
            num_postings: self.postings.values().map(Vec::len).sum(),
        }
    }
}

impl<S: AsRef<str>, T: AsRef<str>> FromIterator<(S, T)> for InvertedIndex {
    /// Build from `(document id, text)` pairs.
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut index = InvertedIndex::new();
        for (id, text) in iter {
            index.add_document(id.as_ref(), text.as_ref());
        }
        index
    }
}
