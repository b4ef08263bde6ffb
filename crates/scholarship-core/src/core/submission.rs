// crates/scholarship-core/src/core/submission.rs
// ============================================================================
// Module: Submission Records
// Description: Raw and persisted forms of a scholarship application.
// Purpose: Carry submitted values and uploads between handler, store, and mail.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! A [`RawSubmission`] is what the HTTP layer extracted from the request,
//! untouched. A [`SubmissionRecord`] is the validated, scrubbed value that is
//! persisted and mailed. [`FormValues`] keeps the explicit name-to-value
//! association in schema order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

use crate::core::identifiers::SlotIndex;
use crate::core::identifiers::SubmissionId;

// ============================================================================
// SECTION: Form Values
// ============================================================================

/// Ordered association of field name to submitted value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    /// Entries in insertion order.
    entries: Vec<(String, String)>,
}

impl FormValues {
    /// Creates an empty value set.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Sets a value, replacing any earlier value for the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(key, _)| *key == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Returns the value recorded for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Returns the number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no values are recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// SECTION: Uploads
// ============================================================================

/// One uploaded attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Client-supplied file name.
    pub filename: String,
    /// Content length in bytes.
    pub size: u64,
    /// Client-supplied MIME type.
    pub content_type: String,
    /// Raw file bytes.
    pub content: Vec<u8>,
}

impl UploadedFile {
    /// Builds an upload, deriving `size` from the content.
    #[must_use]
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, content: Vec<u8>) -> Self {
        let size = u64::try_from(content.len()).unwrap_or(u64::MAX);
        Self { filename: filename.into(), size, content_type: content_type.into(), content }
    }

    /// Returns true when the upload carries no bytes. Zero-byte uploads never
    /// take a file slot, whatever their filename.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Upload tagged with the file-input field it arrived under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Form field name the part was posted under.
    pub field: String,
    /// Uploaded file.
    pub file: UploadedFile,
}

// ============================================================================
// SECTION: Raw Submission
// ============================================================================

/// Request payload as extracted from the multipart body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSubmission {
    /// Text parts keyed by field name; the last occurrence wins.
    pub fields: BTreeMap<String, String>,
    /// Selected scholarship names in submission order.
    pub scholarships: Vec<String>,
    /// File parts in submission order.
    pub uploads: Vec<Upload>,
}

impl RawSubmission {
    /// Returns the raw value for `name` when it is present and not blank.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str).filter(|value| !value.trim().is_empty())
    }
}

// ============================================================================
// SECTION: Submission Record
// ============================================================================

/// Validated application as persisted and mailed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    /// Record key and download token.
    pub id: SubmissionId,
    /// Scrubbed general-info values in schema order.
    pub values: FormValues,
    /// Selected scholarship names.
    pub scholarships: Vec<String>,
    /// Attachments; the index is the slot.
    pub files: Vec<UploadedFile>,
    /// Acceptance time.
    pub submitted_at: OffsetDateTime,
}

impl SubmissionRecord {
    /// Returns the attachment stored in `slot`.
    #[must_use]
    pub fn file(&self, slot: SlotIndex) -> Option<&UploadedFile> {
        self.files.get(slot.get())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
