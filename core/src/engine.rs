use crate::index::{DocumentId, InvertedIndex};
use crate::trie::Trie;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Documents in ingestion order, without duplicates. Its length is N for TF-IDF.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<DocumentId>", into = "Vec<DocumentId>")]
pub struct Corpus {
    ids: Vec<DocumentId>,
    seen: HashSet<DocumentId>,
}

impl Corpus {
    pub fn new() -> Self { Self::default() }

    /// Append `id` unless it is already present. Returns whether it was added.
    pub fn push(&mut self, id: &str) -> bool {
        if self.seen.contains(id) {
            return false;
        }
        self.seen.insert(id.to_string());
        self.ids.push(id.to_string());
        true
    }

    pub fn contains(&self, id: &str) -> bool { self.seen.contains(id) }

    pub fn len(&self) -> usize { self.ids.len() }

    pub fn is_empty(&self) -> bool { self.ids.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentId> + '_ { self.ids.iter() }

    pub fn as_slice(&self) -> &[DocumentId] { &self.ids }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.seen.clear();
    }
}

impl From<Vec<DocumentId>> for Corpus {
    fn from(ids: Vec<DocumentId>) -> Self {
        let mut corpus = Corpus::new();
        for id in &ids {
            corpus.push(id);
        }
        corpus
    }
}

impl From<Corpus> for Vec<DocumentId> {
    fn from(corpus: Corpus) -> Self { corpus.ids }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    pub documents: usize,
    pub terms: usize,
}

/// Owns everything a query needs: inverted index, autocomplete trie and corpus.
/// Built once (or restored from a snapshot), then only read.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    pub(crate) index: InvertedIndex,
    pub(crate) trie: Trie,
    pub(crate) corpus: Corpus,
}

impl SearchEngine {
    pub fn new() -> Self { Self::default() }

    pub fn index(&self) -> &InvertedIndex { &self.index }

    pub fn trie(&self) -> &Trie { &self.trie }

    pub fn corpus(&self) -> &Corpus { &self.corpus }

    pub fn stats(&self) -> EngineStats {
        EngineStats { documents: self.corpus.len(), terms: self.index.len() }
    }

    /// Index `text` under `id` and record `id` in the corpus. Re-adding a known id
    /// replaces its postings; the trie keeps terms from earlier versions.
    pub fn add_document(&mut self, id: &str, text: &str) {
        if self.corpus.contains(id) {
            self.index.remove_document(id);
        }
        self.index.ingest(&mut self.trie, id, text);
        self.corpus.push(id);
    }

    pub fn reset(&mut self) {
        self.index.clear();
        self.trie = Trie::new();
        self.corpus.clear();
    }
}
