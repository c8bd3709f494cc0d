//! Read path: boolean AND retrieval, TF-IDF ranking and autocomplete.
//!
//! None of these mutate the engine. An unknown term or an empty query is a normal
//! empty result, never an error.

use crate::engine::SearchEngine;
use crate::index::{DocumentId, Term};
use crate::tokenizer::{normalize, tokenize};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDocument {
    pub doc_id: DocumentId,
    pub score: f64,
}

impl SearchEngine {
    /// Documents containing every query term, sorted by id.
    pub fn boolean_search(&self, query: &str) -> Vec<DocumentId> {
        let terms = tokenize(query);
        let Some((first, rest)) = terms.split_first() else { return Vec::new() };

        let mut found: HashSet<&DocumentId> = match self.index.postings(first) {
            Some(docs) => docs.keys().collect(),
            None => return Vec::new(),
        };
        for term in rest {
            let Some(docs) = self.index.postings(term) else { return Vec::new() };
            found.retain(|doc| docs.contains_key(*doc));
            if found.is_empty() {
                return Vec::new();
            }
        }

        let mut out: Vec<DocumentId> = found.into_iter().cloned().collect();
        out.sort();
        out
    }

    /// TF-IDF ranking with `idf = ln(N / df)`. A term repeated in the query counts once
    /// per occurrence. Only documents with a strictly positive score are returned,
    /// highest first, ties broken by id.
    pub fn rank(&self, query: &str) -> Vec<RankedDocument> {
        let terms = tokenize(query);
        let n = self.corpus.len();
        if terms.is_empty() || n == 0 {
            return Vec::new();
        }

        let mut scores: HashMap<&DocumentId, f64> =
            self.corpus.iter().map(|id| (id, 0.0)).collect();
        for term in &terms {
            let Some(docs) = self.index.postings(term) else { continue };
            let idf = (n as f64 / docs.len() as f64).ln();
            for (doc, tf) in docs {
                *scores.entry(doc).or_insert(0.0) += *tf as f64 * idf;
            }
        }

        let mut ranked: Vec<RankedDocument> = scores
            .into_iter()
            .filter(|(_, score)| *score > 0.0)
            .map(|(doc, score)| RankedDocument { doc_id: doc.clone(), score })
            .collect();
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.doc_id.cmp(&b.doc_id))
        });
        ranked
    }

    /// [`rank`](Self::rank) truncated to the best `k` documents.
    pub fn rank_top(&self, query: &str, k: usize) -> Vec<RankedDocument> {
        let mut ranked = self.rank(query);
        ranked.truncate(k);
        ranked
    }

    /// Indexed terms starting with `prefix` (lowercased), in lexicographic order.
    pub fn autocomplete(&self, prefix: &str) -> Vec<Term> {
        self.trie.prefix_search(&normalize(prefix))
    }
}
