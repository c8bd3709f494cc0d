//! Character trie over index terms, used for autocomplete.
//!
//! Nodes live in one flat arena and refer to their children by index, so cloning,
//! dropping, comparing and (de)serializing never recurse, however long a term is.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const ROOT: usize = 0;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrieNode {
    /// Child node indices into the owning trie's arena.
    pub children: BTreeMap<char, usize>,
    /// The path from the root to this node spells an inserted term.
    pub terminal: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTrie")]
pub struct Trie {
    nodes: Vec<TrieNode>,
    len: usize,
}

/// Wire shape of [`Trie`], checked before it becomes one.
#[derive(Serialize, Deserialize)]
struct RawTrie {
    nodes: Vec<TrieNode>,
    len: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self { nodes: vec![TrieNode::default()], len: 0 }
    }
}

impl TryFrom<RawTrie> for Trie {
    type Error = String;

    /// Every non-root node must be the child of exactly one node with a smaller index.
    /// That rules out dangling indices, sharing and cycles in decoded data.
    fn try_from(raw: RawTrie) -> Result<Self, Self::Error> {
        if raw.nodes.is_empty() {
            return Err("trie has no root node".into());
        }
        let mut parented = vec![false; raw.nodes.len()];
        for (at, node) in raw.nodes.iter().enumerate() {
            for &child in node.children.values() {
                if child <= at || child >= raw.nodes.len() {
                    return Err(format!("trie node {at} has invalid child {child}"));
                }
                if std::mem::replace(&mut parented[child], true) {
                    return Err(format!("trie node {child} has more than one parent"));
                }
            }
        }
        if let Some(orphan) = parented.iter().skip(1).position(|p| !p) {
            return Err(format!("trie node {} is unreachable", orphan + 1));
        }
        let terminals = raw.nodes.iter().filter(|n| n.terminal).count();
        if terminals != raw.len {
            return Err(format!("trie claims {} terms but marks {terminals}", raw.len));
        }
        Ok(Self { nodes: raw.nodes, len: raw.len })
    }
}

impl Trie {
    pub fn new() -> Self { Self::default() }

    /// Number of distinct terms inserted.
    pub fn len(&self) -> usize { self.len }

    pub fn is_empty(&self) -> bool { self.len == 0 }

    pub fn root(&self) -> &TrieNode { &self.nodes[ROOT] }

    /// Insert a term. Inserting a term that is already present changes nothing.
    pub fn insert(&mut self, term: &str) {
        let mut at = ROOT;
        for ch in term.chars() {
            let existing = self.nodes[at].children.get(&ch).copied();
            at = match existing {
                Some(next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[at].children.insert(ch, next);
                    next
                }
            };
        }
        let node = &mut self.nodes[at];
        if !node.terminal {
            node.terminal = true;
            self.len += 1;
        }
    }

    pub fn contains(&self, term: &str) -> bool {
        self.walk(term).is_some_and(|at| self.nodes[at].terminal)
    }

    /// All inserted terms starting with `prefix`, in lexicographic order.
    /// An unknown prefix yields an empty vector.
    pub fn prefix_search(&self, prefix: &str) -> Vec<String> {
        let Some(start) = self.walk(prefix) else { return Vec::new() };

        // One shared path buffer; each stack entry records the path length to rewind
        // to and the character leading into its node.
        let mut out = Vec::new();
        let mut path = prefix.to_string();
        let mut stack: Vec<(usize, usize, Option<char>)> = vec![(start, path.len(), None)];
        while let Some((at, depth, ch)) = stack.pop() {
            path.truncate(depth);
            if let Some(ch) = ch {
                path.push(ch);
            }
            let node = &self.nodes[at];
            if node.terminal {
                out.push(path.clone());
            }
            // Reversed so the smallest child is popped first.
            for (&ch, &child) in node.children.iter().rev() {
                stack.push((child, path.len(), Some(ch)));
            }
        }
        out
    }

    fn walk(&self, prefix: &str) -> Option<usize> {
        let mut at = ROOT;
        for ch in prefix.chars() {
            at = *self.nodes[at].children.get(&ch)?;
        }
        Some(at)
    }
}
