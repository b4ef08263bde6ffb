// crates/scholarship-core/src/runtime/store.rs
// ============================================================================
// Module: In-Memory Submission Store
// Description: Mutex-guarded map of submission records.
// Purpose: Provide a deterministic store without external dependencies.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! [`InMemorySubmissionStore`] keeps records in a `BTreeMap` keyed by
//! submission id. Clones share the same map. It can be switched into a
//! failing mode so callers can exercise persistence-error paths.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use crate::core::SlotIndex;
use crate::core::SubmissionId;
use crate::core::SubmissionRecord;
use crate::core::UploadedFile;
use crate::interfaces::StoreError;
use crate::interfaces::SubmissionStore;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// In-memory submission store for tests and development.
#[derive(Debug, Default, Clone)]
pub struct InMemorySubmissionStore {
    /// Records keyed by submission id.
    records: Arc<Mutex<BTreeMap<SubmissionId, SubmissionRecord>>>,
    /// When set, every operation fails with [`StoreError::Store`].
    failing: Arc<AtomicBool>,
}

impl InMemorySubmissionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles simulated backend failure.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Locks the record map, failing when simulated failure is on.
    fn records(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<SubmissionId, SubmissionRecord>>, StoreError>
    {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Store("submission store unavailable".to_string()));
        }
        self.records
            .lock()
            .map_err(|_| StoreError::Store("submission store mutex poisoned".to_string()))
    }
}

impl SubmissionStore for InMemorySubmissionStore {
    fn insert(&self, record: &SubmissionRecord) -> Result<(), StoreError> {
        let mut guard = self.records()?;
        if guard.contains_key(&record.id) {
            return Err(StoreError::Invalid(format!("duplicate submission id {}", record.id)));
        }
        guard.insert(record.id.clone(), record.clone());
        drop(guard);
        Ok(())
    }

    fn load(&self, id: &SubmissionId) -> Result<Option<SubmissionRecord>, StoreError> {
        Ok(self.records()?.get(id).cloned())
    }

    fn load_file(
        &self,
        id: &SubmissionId,
        slot: SlotIndex,
    ) -> Result<Option<UploadedFile>, StoreError> {
        Ok(self.records()?.get(id).and_then(|record| record.file(slot)).cloned())
    }

    fn count(&self) -> Result<u64, StoreError> {
        let len = self.records()?.len();
        u64::try_from(len).map_err(|_| StoreError::Corrupt("record count overflow".to_string()))
    }
}
