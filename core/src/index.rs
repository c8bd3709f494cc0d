use crate::tokenizer::tokenize;
use crate::trie::Trie;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Normalized word, the key of both the trie and the inverted index.
pub type Term = String;
/// Stable external identifier of a document (its file name when loaded from a directory).
pub type DocumentId = String;

/// term -> (document -> occurrences of the term in that document)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvertedIndex {
    postings: HashMap<Term, HashMap<DocumentId, u32>>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Number of distinct terms.
    pub fn len(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }

    pub fn postings(&self, term: &str) -> Option<&HashMap<DocumentId, u32>> {
        self.postings.get(term)
    }

    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, HashMap::len)
    }

    pub fn term_frequency(&self, term: &str, doc: &str) -> u32 {
        self.postings
            .get(term)
            .and_then(|docs| docs.get(doc))
            .copied()
            .unwrap_or(0)
    }

    /// Index one document. Every distinct term is inserted into `trie` and its local
    /// occurrence count is stored for `doc`, replacing any count from an earlier ingest
    /// of the same id.
    pub fn ingest(&mut self, trie: &mut Trie, doc: &str, text: &str) {
        let mut tf_counts: HashMap<Term, u32> = HashMap::new();
        for term in tokenize(text) {
            *tf_counts.entry(term).or_insert(0) += 1;
        }

        for (term, count) in tf_counts {
            trie.insert(&term);
            self.postings.entry(term).or_default().insert(doc.to_string(), count);
        }
    }

    /// Drop every posting of `doc`; terms left without documents are removed.
    pub fn remove_document(&mut self, doc: &str) {
        self.postings.retain(|_, docs| {
            docs.remove(doc);
            !docs.is_empty()
        });
    }

    pub fn clear(&mut self) { self.postings.clear(); }
}
