use crate::config::EngineConfig;
use crate::engine::SearchEngine;
use crate::error::{EngineError, Result};
use crate::loader::BuildReport;
use crate::persist::SnapshotHeader;

/// Which path [`open_or_build`] took.
#[derive(Debug)]
pub enum Startup {
    Loaded(SnapshotHeader),
    Built { report: BuildReport, saved: bool },
}

/// Restore the engine from its snapshot, or build it from the corpus and snapshot it.
///
/// Only a missing corpus is fatal. A snapshot that cannot be written is logged and
/// the freshly built engine is still returned.
pub fn open_or_build(config: &EngineConfig) -> Result<(SearchEngine, Startup)> {
    let mut engine = SearchEngine::new();
    match engine.load(&config.snapshot_path) {
        Ok(header) => return Ok((engine, Startup::Loaded(header))),
        Err(EngineError::SnapshotMissing { path }) => {
            tracing::info!(path = %path.display(), "no snapshot found, building from corpus");
        }
        Err(e) => {
            tracing::error!(error = %e, cause = %source_of(&e), "snapshot unusable, rebuilding from corpus");
        }
    }

    let (engine, report, saved) = build_and_save(config)?;
    Ok((engine, Startup::Built { report, saved }))
}

/// Fresh build from `config.corpus_dir`, then save to `config.snapshot_path`.
/// Returns whether the save succeeded.
pub fn build_and_save(config: &EngineConfig) -> Result<(SearchEngine, BuildReport, bool)> {
    let mut engine = SearchEngine::new();
    let report = engine.build_from_dir(&config.corpus_dir, &config.extension)?;
    let saved = match engine.save(&config.snapshot_path) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %e, cause = %source_of(&e), "could not save snapshot");
            false
        }
    };
    Ok((engine, report, saved))
}

fn source_of(err: &EngineError) -> String {
    std::error::Error::source(err).map(ToString::to_string).unwrap_or_default()
}
