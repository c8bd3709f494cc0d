//! Single-file snapshot of the whole engine.
//!
//! Layout: a bincode [`SnapshotHeader`] followed by a bincode [`SnapshotPayload`].
//! The header is checked before the payload is decoded, so foreign or newer files
//! are rejected up front.

use crate::engine::{Corpus, SearchEngine};
use crate::error::{EngineError, Result, SnapshotFault};
use crate::index::InvertedIndex;
use crate::trie::Trie;
use bincode::Options;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const SNAPSHOT_MAGIC: [u8; 8] = *b"MOTORIDX";
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotHeader {
    pub magic: [u8; 8],
    pub version: u32,
    pub created_at: String,
    pub documents: u64,
    pub terms: u64,
}

#[derive(Serialize, Deserialize)]
struct SnapshotPayload {
    index: InvertedIndex,
    trie: Trie,
    corpus: Corpus,
}

#[derive(Serialize)]
struct SnapshotPayloadRef<'a> {
    index: &'a InvertedIndex,
    trie: &'a Trie,
    corpus: &'a Corpus,
}

impl SearchEngine {
    /// Write the index, trie and corpus to `path`, replacing any existing file.
    /// The bytes go to a sibling temp file first and are renamed into place.
    pub fn save(&self, path: &Path) -> Result<()> {
        let write_err = |source: SnapshotFault| EngineError::SnapshotWrite { path: path.to_path_buf(), source };

        let header = SnapshotHeader {
            magic: SNAPSHOT_MAGIC,
            version: SNAPSHOT_VERSION,
            created_at: time::OffsetDateTime::now_utc()
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_else(|_| "".into()),
            documents: self.corpus.len() as u64,
            terms: self.index.len() as u64,
        };
        let payload = SnapshotPayloadRef { index: &self.index, trie: &self.trie, corpus: &self.corpus };

        let mut bytes = codec().serialize(&header).map_err(|e| write_err(e.into()))?;
        codec().serialize_into(&mut bytes, &payload).map_err(|e| write_err(e.into()))?;

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| write_err(e.into()))?;
        }
        let tmp = tmp_path(path);
        let written = fs::write(&tmp, &bytes).and_then(|_| fs::rename(&tmp, path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(e.into()));
        }

        tracing::info!(
            path = %path.display(),
            bytes = bytes.len(),
            documents = header.documents,
            terms = header.terms,
            "snapshot saved"
        );
        Ok(())
    }

    /// Restore from `path`. Index and trie are replaced; decoded document ids are
    /// appended to the current corpus (ids already present are kept once).
    ///
    /// On any error the engine is left exactly as it was.
    pub fn load(&mut self, path: &Path) -> Result<SnapshotHeader> {
        if !path.exists() {
            return Err(EngineError::SnapshotMissing { path: path.to_path_buf() });
        }
        let (header, payload) =
            read_snapshot(path).map_err(|source| EngineError::SnapshotRead { path: path.to_path_buf(), source })?;

        self.index = payload.index;
        self.trie = payload.trie;
        for id in payload.corpus.iter() {
            self.corpus.push(id);
        }

        tracing::info!(
            path = %path.display(),
            created_at = %header.created_at,
            documents = self.corpus.len(),
            terms = self.index.len(),
            "snapshot loaded"
        );
        Ok(header)
    }
}

/// Read and validate only the header of a snapshot file.
pub fn read_header(path: &Path) -> Result<SnapshotHeader> {
    let bytes = fs::read(path).map_err(|e| EngineError::SnapshotRead { path: path.to_path_buf(), source: e.into() })?;
    let mut cursor: &[u8] = &bytes;
    decode_header(&mut cursor).map_err(|source| EngineError::SnapshotRead { path: path.to_path_buf(), source })
}

// Fixed-width integers, matching `bincode::serialize`.
fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
}

fn read_snapshot(path: &Path) -> Result<(SnapshotHeader, SnapshotPayload), SnapshotFault> {
    let bytes = fs::read(path)?;
    let mut cursor: &[u8] = &bytes;
    let header = decode_header(&mut cursor)?;
    // A corrupt length prefix must not make us allocate more than the file holds.
    let payload: SnapshotPayload = codec()
        .with_limit(bytes.len() as u64)
        .deserialize_from(&mut cursor)?;
    if !cursor.is_empty() {
        return Err(SnapshotFault::TrailingBytes(cursor.len()));
    }
    Ok((header, payload))
}

fn decode_header(cursor: &mut &[u8]) -> Result<SnapshotHeader, SnapshotFault> {
    if !cursor.starts_with(&SNAPSHOT_MAGIC) {
        return Err(SnapshotFault::BadMagic);
    }
    let limit = cursor.len() as u64;
    let header: SnapshotHeader = codec().with_limit(limit).deserialize_from(cursor)?;
    if header.version != SNAPSHOT_VERSION {
        return Err(SnapshotFault::UnsupportedVersion { found: header.version, expected: SNAPSHOT_VERSION });
    }
    Ok(header)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
