use crate::engine::SearchEngine;
use crate::error::{EngineError, Result};
use std::error::Error as _;
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Outcome of a directory build. Unreadable entries are skipped, not fatal.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub indexed: usize,
    pub skipped: Vec<EngineError>,
}

impl SearchEngine {
    /// Rebuild from every `*.{extension}` file directly inside `dir`, in file name order.
    /// The document id is the file name.
    ///
    /// Fails with [`EngineError::SourceNotFound`] before touching any state when `dir`
    /// is not an existing directory. Otherwise the index, trie and corpus are cleared
    /// and rebuilt.
    pub fn build_from_dir(&mut self, dir: &Path, extension: &str) -> Result<BuildReport> {
        if !dir.is_dir() {
            return Err(EngineError::SourceNotFound { path: dir.to_path_buf() });
        }
        tracing::info!(dir = %dir.display(), "building index");

        self.reset();
        let suffix = format!(".{extension}");
        let mut report = BuildReport::default();

        let entries = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    let path = e.path().unwrap_or(dir).to_path_buf();
                    skip(&mut report, EngineError::DocumentRead { path, source: e.into() });
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_name().to_string_lossy().ends_with(&suffix) || path.is_dir() {
                continue;
            }
            // Document ids are strings, so the name itself has to be valid UTF-8.
            let Some(name) = entry.file_name().to_str() else {
                let source = io::Error::new(io::ErrorKind::InvalidData, "file name is not valid UTF-8");
                skip(&mut report, EngineError::DocumentRead { path: path.to_path_buf(), source });
                continue;
            };

            match fs::read_to_string(path) {
                Ok(text) => {
                    self.add_document(name, &text);
                    report.indexed += 1;
                    tracing::debug!(doc = name, "indexed document");
                }
                Err(source) => {
                    skip(&mut report, EngineError::DocumentRead { path: path.to_path_buf(), source });
                }
            }
        }

        tracing::info!(
            documents = report.indexed,
            skipped = report.skipped.len(),
            terms = self.index.len(),
            "index build complete"
        );
        Ok(report)
    }
}

fn skip(report: &mut BuildReport, err: EngineError) {
    tracing::warn!(error = %err, cause = ?err.source(), "skipping document");
    report.skipped.push(err);
}
