//! Full session: initialize, read, close, finalize.
//!
//! Lives in its own integration binary because finalization is process-wide
//! and irreversible; nothing else may share this process.

use std::path::PathBuf;

use mocr::{Error, Reader, ReaderConfig, ensure_ready, finalize};

#[test]
#[ignore = "requires a manga-ocr installation and fixture images"]
fn full_session_reads_then_finalizes() {
    dotenvy::dotenv().ok();
    let dir = std::env::var("MOCR_FIXTURE_DIR")
        .map(PathBuf::from)
        .expect("MOCR_FIXTURE_DIR must point at the fixture image directory");

    ensure_ready();
    ensure_ready();

    let reader = Reader::new(ReaderConfig::default()).unwrap();
    let text = reader.read_path(dir.join("00.jpg")).unwrap();
    assert_eq!(text, "素直にあやまるしか");

    reader.close().unwrap();
    finalize().unwrap();

    // The session is over for good.
    let err = Reader::new(ReaderConfig::default()).unwrap_err();
    assert!(matches!(err, Error::RuntimeFinalized));
}
