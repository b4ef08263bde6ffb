// crates/scholarship-core/src/core/mod.rs
// ============================================================================
// Module: Scholarship Form Core Types
// Description: Canonical data model for the scholarship application form.
// Purpose: Group schema, submission, feed, and identifier types.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Core types are plain data: they carry no I/O and validate only their own
//! invariants. Everything here is safe to share read-only across requests.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod escape;
pub mod identifiers;
pub mod messages;
pub mod scholarship;
pub mod schema;
pub mod submission;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use escape::escape_html;
pub use escape::is_numeric;
pub use escape::scrub;
pub use escape::unescape_html;
pub use identifiers::FieldName;
pub use identifiers::IdentifierError;
pub use identifiers::MAX_FIELD_NAME_LENGTH;
pub use identifiers::MAX_FILE_SLOTS;
pub use identifiers::SlotIndex;
pub use identifiers::SubmissionId;
pub use identifiers::is_sql_identifier;
pub use messages::MessageKind;
pub use messages::StatusMessage;
pub use scholarship::Scholarship;
pub use scholarship::ScholarshipWire;
pub use schema::FieldKind;
pub use schema::FieldSpec;
pub use schema::FormSchema;
pub use schema::MAX_LAYOUT_WIDTH;
pub use schema::MAX_SCHEMA_BYTES;
pub use schema::NO_DEFAULT_MARKER;
pub use schema::OptionItem;
pub use schema::OptionSource;
pub use schema::ResolvedOptions;
pub use schema::ScalarValue;
pub use schema::SchemaError;
pub use submission::FormValues;
pub use submission::RawSubmission;
pub use submission::SubmissionRecord;
pub use submission::Upload;
pub use submission::UploadedFile;
