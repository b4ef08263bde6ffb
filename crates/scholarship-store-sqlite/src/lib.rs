// crates/scholarship-store-sqlite/src/lib.rs
// ============================================================================
// Module: SQLite Submission Store
// Description: Durable SubmissionStore backend using SQLite.
// Purpose: Persist scholarship applications and their attachments.
// Dependencies: scholarship-core, rusqlite
// ============================================================================

//! ## Overview
//! This crate provides a SQLite-backed [`scholarship_core::SubmissionStore`]
//! that writes one row per application into a single table: a `TEXT` column
//! per general-info field, the selected scholarships, five fixed attachment
//! slots, and the submission timestamp. Every value is bound as a statement
//! parameter; column names come only from validated schema field names.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::DEFAULT_TABLE;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteSubmissionStore;
pub use store::SqliteSyncMode;
