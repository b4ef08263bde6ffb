// crates/scholarship-core/src/interfaces/mod.rs
// ============================================================================
// Module: Scholarship Form Interfaces
// Description: Backend-agnostic interfaces for storage, mail, feed, and options.
// Purpose: Define the contract surfaces used by the submission pipeline.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how the form integrates with external systems without
//! embedding backend details. Every trait is object safe and `Send + Sync` so
//! implementations can live behind `Arc<dyn …>` in shared server state and be
//! called from blocking worker threads.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::OptionItem;
use crate::core::Scholarship;
use crate::core::SlotIndex;
use crate::core::SubmissionId;
use crate::core::SubmissionRecord;
use crate::core::UploadedFile;

// ============================================================================
// SECTION: Submission Store
// ============================================================================

/// Submission store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("submission store io error: {0}")]
    Io(String),
    /// Stored data is corrupted.
    #[error("submission store corruption: {0}")]
    Corrupt(String),
    /// Stored data version is incompatible.
    #[error("submission store version mismatch: {0}")]
    VersionMismatch(String),
    /// Record is invalid for this store.
    #[error("submission store invalid data: {0}")]
    Invalid(String),
    /// Store reported an error.
    #[error("submission store error: {0}")]
    Store(String),
}

/// Persistent store of submission records.
pub trait SubmissionStore: Send + Sync {
    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the record cannot be written, including a
    /// duplicate identifier.
    fn insert(&self, record: &SubmissionRecord) -> Result<(), StoreError>;

    /// Loads a full record by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when loading fails.
    fn load(&self, id: &SubmissionId) -> Result<Option<SubmissionRecord>, StoreError>;

    /// Loads one attachment. `Ok(None)` covers both an unknown identifier and
    /// an empty slot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when loading fails.
    fn load_file(
        &self,
        id: &SubmissionId,
        slot: SlotIndex,
    ) -> Result<Option<UploadedFile>, StoreError>;

    /// Returns the number of stored records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when counting fails.
    fn count(&self) -> Result<u64, StoreError>;
}

// ============================================================================
// SECTION: Notifier
// ============================================================================

/// Email address with optional display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailbox {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address.
    pub address: String,
}

impl Mailbox {
    /// Builds a mailbox with a display name.
    #[must_use]
    pub fn named(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self { name: Some(name.into()), address: address.into() }
    }
}

/// Composed outbound HTML email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Sender.
    pub from: Mailbox,
    /// Recipients in order.
    pub to: Vec<Mailbox>,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html_body: String,
}

/// Notification delivery errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    /// Message could not be built (bad address, empty recipients).
    #[error("notification compose error: {0}")]
    Compose(String),
    /// Transport rejected or failed to deliver the message.
    #[error("notification delivery error: {0}")]
    Delivery(String),
}

/// Outbound email sink.
pub trait Notifier: Send + Sync {
    /// Delivers a message.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] when the message cannot be delivered.
    fn notify(&self, message: &EmailMessage) -> Result<(), NotifyError>;
}

// ============================================================================
// SECTION: Scholarship Feed
// ============================================================================

/// Scholarship feed errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// Request failed or was refused by policy.
    #[error("scholarship feed request error: {0}")]
    Request(String),
    /// Response was not a valid feed document.
    #[error("scholarship feed invalid response: {0}")]
    Invalid(String),
}

/// Source of scholarships currently open for application.
pub trait ScholarshipFeed: Send + Sync {
    /// Returns open scholarships in feed order.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError`] when the feed cannot be read.
    fn open_scholarships(&self) -> Result<Vec<Scholarship>, FeedError>;
}

// ============================================================================
// SECTION: Option Providers
// ============================================================================

/// Option provider errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// No provider is registered under the name.
    #[error("unknown option provider: {0}")]
    Unknown(String),
    /// Provider failed to produce options.
    #[error("option provider {name} failed: {message}")]
    Failed {
        /// Provider name.
        name: String,
        /// Failure detail.
        message: String,
    },
}

/// Named source of select options.
pub trait OptionProvider: Send + Sync {
    /// Produces the option list.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when options cannot be produced.
    fn options(&self) -> Result<Vec<OptionItem>, ProviderError>;
}

impl<F> OptionProvider for F
where
    F: Fn() -> Result<Vec<OptionItem>, ProviderError> + Send + Sync,
{
    fn options(&self) -> Result<Vec<OptionItem>, ProviderError> {
        self()
    }
}

/// Resolves provider names referenced by select fields.
pub trait OptionResolver: Send + Sync {
    /// Resolves the option list for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Unknown`] for unregistered names and
    /// propagates provider failures.
    fn resolve(&self, name: &str) -> Result<Vec<OptionItem>, ProviderError>;

    /// Returns true when a provider is registered under `name`.
    fn contains(&self, name: &str) -> bool;
}
