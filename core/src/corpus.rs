use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One ingested document: its stable name, extracted text and raw outgoing links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub links: Vec<String>,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>, links: Vec<String>) -> Self {
        Self { id: id.into(), text: text.into(), links }
    }
}

/// Documents in ingestion order, addressable by id.
///
/// Re-inserting an existing id replaces that document's text and links but keeps its original
/// position, so iteration order stays the order in which ids were first seen.
#[derive(Debug, Default, Clone)]
pub struct Corpus {
    docs: Vec<Document>,
    by_id: HashMap<String, usize>,
}

impl Corpus {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, doc: Document) {
        match self.by_id.get(&doc.id) {
            Some(&slot) => {
                tracing::debug!(id = %doc.id, "replacing duplicate document");
                self.docs[slot] = doc;
            }
            None => {
                self.by_id.insert(doc.id.clone(), self.docs.len());
                self.docs.push(doc);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.by_id.get(id).map(|&slot| &self.docs[slot])
    }

    /// Original text of a document, for display by whoever renders results.
    pub fn content(&self, id: &str) -> Option<&str> {
        self.get(id).map(|d| d.text.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.docs.iter()
    }

    pub fn len(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }
}

impl FromIterator<Document> for Corpus {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        let mut corpus = Corpus::new();
        for doc in iter {
            corpus.insert(doc);
        }
        corpus
    }
}

impl Extend<Document> for Corpus {
    fn extend<I: IntoIterator<Item = Document>>(&mut self, iter: I) {
        for doc in iter {
            self.insert(doc);
        }
    }
}
