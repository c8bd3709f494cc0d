use std::path::PathBuf;

pub const DEFAULT_CORPUS_DIR: &str = "documentos";
pub const DEFAULT_SNAPSHOT: &str = "motor_indice.bin";
pub const DEFAULT_EXTENSION: &str = "txt";

/// Where the corpus lives and where its snapshot is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub corpus_dir: PathBuf,
    pub snapshot_path: PathBuf,
    /// File extension (without the dot) a corpus entry must carry to be indexed.
    pub extension: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            corpus_dir: PathBuf::from(DEFAULT_CORPUS_DIR),
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}
