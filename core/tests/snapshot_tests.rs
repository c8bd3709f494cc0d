use motor_core::persist::{read_header, SNAPSHOT_MAGIC, SNAPSHOT_VERSION};
use motor_core::{open_or_build, EngineConfig, EngineError, SearchEngine, SnapshotFault, Startup};
use std::fs;
use tempfile::tempdir;

const QUERIES: &[&str] = &["fox", "quick", "quick fox", "lazy dog", "a", "nothing here", ""];

fn sample_engine() -> SearchEngine {
    let mut engine = SearchEngine::new();
    engine.add_document("doc1.txt", "A quick fox jumps over the quick dog");
    engine.add_document("doc2.txt", "A lazy fox");
    engine.add_document("doc3.txt", "The lazy dog sleeps");
    engine
}

#[test]
fn save_then_load_reproduces_query_results() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("motor_indice.bin");
    let original = sample_engine();
    original.save(&path).unwrap();

    let mut restored = SearchEngine::new();
    let header = restored.load(&path).unwrap();
    assert_eq!(header.version, SNAPSHOT_VERSION);
    assert_eq!(header.documents, 3);

    for q in QUERIES {
        assert_eq!(restored.boolean_search(q), original.boolean_search(q), "boolean {q:?}");
        assert_eq!(restored.rank(q), original.rank(q), "rank {q:?}");
    }
    assert_eq!(restored.autocomplete("l"), original.autocomplete("l"));
    assert_eq!(restored.corpus(), original.corpus());
    assert_eq!(restored.trie(), original.trie());
}

#[test]
fn save_overwrites_existing_file_and_leaves_no_temp() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snap.bin");
    fs::write(&path, b"old contents").unwrap();

    sample_engine().save(&path).unwrap();
    assert!(read_header(&path).is_ok());
    let names: Vec<_> = fs::read_dir(dir.path()).unwrap().map(|e| e.unwrap().file_name()).collect();
    assert_eq!(names, vec!["snap.bin"]);
}

#[test]
fn load_missing_path_keeps_populated_engine() {
    let dir = tempdir().unwrap();
    let mut engine = sample_engine();
    let before = engine.boolean_search("fox");

    let err = engine.load(&dir.path().join("absent.bin")).unwrap_err();
    assert!(matches!(err, EngineError::SnapshotMissing { .. }));
    assert_eq!(engine.boolean_search("fox"), before);
    assert_eq!(engine.corpus().len(), 3);
}

#[test]
fn load_rejects_garbage_and_leaves_engine_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("garbage.bin");
    fs::write(&path, b"definitely not a snapshot").unwrap();

    let mut engine = SearchEngine::new();
    let err = engine.load(&path).unwrap_err();
    assert!(matches!(err, EngineError::SnapshotRead { source: SnapshotFault::BadMagic, .. }));
    assert_eq!(engine.stats().documents, 0);
    assert_eq!(engine.stats().terms, 0);
}

#[test]
fn load_rejects_truncated_snapshot() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snap.bin");
    sample_engine().save(&path).unwrap();
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() - 5]).unwrap();

    let mut engine = SearchEngine::new();
    let err = engine.load(&path).unwrap_err();
    assert!(matches!(err, EngineError::SnapshotRead { source: SnapshotFault::Codec(_), .. }));
    assert!(engine.index().is_empty());
}

#[test]
fn load_rejects_trailing_bytes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snap.bin");
    sample_engine().save(&path).unwrap();
    let mut bytes = fs::read(&path).unwrap();
    bytes.extend_from_slice(&[0, 1, 2]);
    fs::write(&path, &bytes).unwrap();

    let err = SearchEngine::new().load(&path).unwrap_err();
    assert!(matches!(err, EngineError::SnapshotRead { source: SnapshotFault::TrailingBytes(3), .. }));
}

#[test]
fn load_rejects_other_versions() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snap.bin");
    sample_engine().save(&path).unwrap();
    let mut bytes = fs::read(&path).unwrap();
    // The version is the little-endian u32 right after the magic.
    let at = SNAPSHOT_MAGIC.len();
    bytes[at..at + 4].copy_from_slice(&99u32.to_le_bytes());
    fs::write(&path, &bytes).unwrap();

    let err = SearchEngine::new().load(&path).unwrap_err();
    assert!(matches!(
        err,
        EngineError::SnapshotRead { source: SnapshotFault::UnsupportedVersion { found: 99, expected: 1 }, .. }
    ));
}

#[test]
fn load_appends_corpus_ids_without_duplicates() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snap.bin");
    sample_engine().save(&path).unwrap();

    let mut engine = SearchEngine::new();
    engine.add_document("doc2.txt", "whatever");
    engine.add_document("extra.txt", "whatever");
    engine.load(&path).unwrap();

    assert_eq!(engine.corpus().as_slice(), ["doc2.txt", "extra.txt", "doc1.txt", "doc3.txt"]);
    // The index itself was replaced wholesale.
    assert!(engine.boolean_search("whatever").is_empty());
}

#[test]
fn startup_builds_then_loads() {
    let dir = tempdir().unwrap();
    let corpus = dir.path().join("documentos");
    fs::create_dir(&corpus).unwrap();
    fs::write(corpus.join("doc1.txt"), "A quick fox").unwrap();
    fs::write(corpus.join("doc2.txt"), "A lazy fox").unwrap();
    let config = EngineConfig {
        corpus_dir: corpus.clone(),
        snapshot_path: dir.path().join("motor_indice.bin"),
        ..EngineConfig::default()
    };

    let (built, startup) = open_or_build(&config).unwrap();
    assert!(matches!(startup, Startup::Built { saved: true, ref report } if report.indexed == 2));
    assert!(config.snapshot_path.exists());

    // A second start must come from the snapshot even if the corpus is gone.
    fs::remove_dir_all(&corpus).unwrap();
    let (loaded, startup) = open_or_build(&config).unwrap();
    assert!(matches!(startup, Startup::Loaded(_)));
    assert_eq!(loaded.boolean_search("quick fox"), built.boolean_search("quick fox"));
}

#[test]
fn startup_rebuilds_over_corrupt_snapshot() {
    let dir = tempdir().unwrap();
    let corpus = dir.path().join("docs");
    fs::create_dir(&corpus).unwrap();
    fs::write(corpus.join("a.txt"), "raposa").unwrap();
    let config = EngineConfig {
        corpus_dir: corpus,
        snapshot_path: dir.path().join("snap.bin"),
        ..EngineConfig::default()
    };
    fs::write(&config.snapshot_path, b"junk").unwrap();

    let (engine, startup) = open_or_build(&config).unwrap();
    assert!(matches!(startup, Startup::Built { saved: true, .. }));
    assert_eq!(engine.boolean_search("raposa"), vec!["a.txt"]);
    assert!(read_header(&config.snapshot_path).is_ok());
}

#[test]
fn startup_without_snapshot_or_corpus_fails() {
    let dir = tempdir().unwrap();
    let config = EngineConfig {
        corpus_dir: dir.path().join("missing"),
        snapshot_path: dir.path().join("snap.bin"),
        ..EngineConfig::default()
    };
    let err = open_or_build(&config).unwrap_err();
    assert!(matches!(err, EngineError::SourceNotFound { .. }));
}

#[test]
fn very_long_term_survives_save_load_and_drop() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snap.bin");
    // A base64 blob loses `+`, `/` and `=` and becomes one huge token.
    let blob = "QUJD+/=".repeat(25_000);

    let mut engine = SearchEngine::new();
    engine.add_document("blob.txt", &blob);
    engine.add_document("doc.txt", "raposa");
    engine.save(&path).unwrap();

    let mut restored = SearchEngine::new();
    restored.load(&path).unwrap();
    assert_eq!(restored.trie(), engine.trie());
    assert_eq!(restored.boolean_search("raposa"), vec!["doc.txt"]);
    let completions = restored.autocomplete("qujd");
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].len(), 100_000);

    drop(engine);
    drop(restored);
}

#[test]
fn save_into_a_directory_path_fails_cleanly() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("snap.bin");
    fs::create_dir(&target).unwrap();

    let err = sample_engine().save(&target).unwrap_err();
    assert!(matches!(err, EngineError::SnapshotWrite { source: SnapshotFault::Io(_), .. }));
    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "{leftovers:?}");
    assert!(target.is_dir());
}

#[test]
fn startup_serves_fresh_build_when_snapshot_cannot_be_written() {
    let dir = tempdir().unwrap();
    let corpus = dir.path().join("docs");
    fs::create_dir(&corpus).unwrap();
    fs::write(corpus.join("a.txt"), "raposa rápida").unwrap();
    let snapshot = dir.path().join("snap.bin");
    fs::create_dir(&snapshot).unwrap();
    let config = EngineConfig { corpus_dir: corpus, snapshot_path: snapshot, ..EngineConfig::default() };

    let (engine, startup) = open_or_build(&config).unwrap();
    assert!(matches!(startup, Startup::Built { saved: false, ref report } if report.indexed == 1));
    assert_eq!(engine.boolean_search("raposa"), vec!["a.txt"]);
    assert_eq!(engine.autocomplete("rá"), vec!["rápida"]);
}
