// crates/scholarship-core/tests/store.rs
// ============================================================================
// Module: In-Memory Store Tests
// Description: Behavior of the in-memory submission store.
// ============================================================================
//! ## Overview
//! Validates insert/load/load_file semantics shared by every store backend.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use scholarship_core::FormValues;
use scholarship_core::InMemorySubmissionStore;
use scholarship_core::SlotIndex;
use scholarship_core::StoreError;
use scholarship_core::SubmissionId;
use scholarship_core::SubmissionRecord;
use scholarship_core::SubmissionStore;
use scholarship_core::UploadedFile;
use time::OffsetDateTime;

fn record_with_files(files: Vec<UploadedFile>) -> SubmissionRecord {
    let mut values = FormValues::new();
    values.insert("fname", "Ada");
    SubmissionRecord {
        id: SubmissionId::generate(),
        values,
        scholarships: vec!["Dean's Award".to_string()],
        files,
        submitted_at: OffsetDateTime::UNIX_EPOCH,
    }
}

#[test]
fn insert_then_load_file_by_slot() {
    let store = InMemorySubmissionStore::new();
    let record = record_with_files(vec![UploadedFile::new("essay.pdf", "application/pdf", b"%PDF".to_vec())]);
    store.insert(&record).unwrap();

    let file = store.load_file(&record.id, SlotIndex::new(0).unwrap()).unwrap().unwrap();
    assert_eq!(file.content, b"%PDF".to_vec());
    assert_eq!(file.content_type, "application/pdf");
    assert!(store.load_file(&record.id, SlotIndex::new(1).unwrap()).unwrap().is_none());
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn unknown_id_loads_nothing() {
    let store = InMemorySubmissionStore::new();
    let id = SubmissionId::generate();
    assert!(store.load(&id).unwrap().is_none());
    assert!(store.load_file(&id, SlotIndex::new(0).unwrap()).unwrap().is_none());
}

#[test]
fn duplicate_insert_is_rejected() {
    let store = InMemorySubmissionStore::new();
    let record = record_with_files(Vec::new());
    store.insert(&record).unwrap();
    assert!(matches!(store.insert(&record), Err(StoreError::Invalid(_))));
}

#[test]
fn failing_mode_surfaces_store_errors() {
    let store = InMemorySubmissionStore::new();
    store.set_failing(true);
    assert!(matches!(store.insert(&record_with_files(Vec::new())), Err(StoreError::Store(_))));
    store.set_failing(false);
    assert_eq!(store.count().unwrap(), 0);
}
