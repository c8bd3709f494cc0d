//! In-memory full-text search over a directory of plain-text documents.
//!
//! Documents are tokenized into an inverted index of per-document term counts and a
//! trie of every term. Queries run boolean AND retrieval, TF-IDF ranking or prefix
//! autocomplete against a [`SearchEngine`], which can be saved to and restored from a
//! single snapshot file.

pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod loader;
pub mod persist;
pub mod query;
pub mod startup;
pub mod tokenizer;
pub mod trie;

pub use config::EngineConfig;
pub use engine::{Corpus, EngineStats, SearchEngine};
pub use error::{EngineError, Result, SnapshotFault};
pub use index::{DocumentId, InvertedIndex, Term};
pub use loader::BuildReport;
pub use persist::SnapshotHeader;
pub use query::RankedDocument;
pub use startup::{open_or_build, Startup};
pub use trie::{Trie, TrieNode};
