use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = EngineError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("corpus source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("failed to read document {}", path.display())]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot not found: {}", path.display())]
    SnapshotMissing { path: PathBuf },

    #[error("failed to read snapshot {}", path.display())]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: SnapshotFault,
    },

    #[error("failed to write snapshot {}", path.display())]
    SnapshotWrite {
        path: PathBuf,
        #[source]
        source: SnapshotFault,
    },
}

/// Why a snapshot could not be encoded, written, read or decoded.
#[derive(Debug, Error)]
pub enum SnapshotFault {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("codec: {0}")]
    Codec(#[from] bincode::Error),

    #[error("not a snapshot file (bad magic)")]
    BadMagic,

    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("{0} unexpected trailing bytes after payload")]
    TrailingBytes(usize),
}
