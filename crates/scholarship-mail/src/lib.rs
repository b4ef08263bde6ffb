// crates/scholarship-mail/src/lib.rs
// ============================================================================
// Module: Scholarship Form Mail
// Description: Confirmation email composition and delivery sinks.
// Purpose: Notify applicants and reviewers of accepted applications.
// Dependencies: scholarship-core, lettre, serde_json, time, url
// ============================================================================

//! ## Overview
//! [`EmailComposer`] turns an accepted [`scholarship_core::SubmissionRecord`]
//! into an [`scholarship_core::EmailMessage`]: recipients, subject, and the
//! HTML summary with download links. Delivery goes through a
//! [`scholarship_core::Notifier`]: SMTP for production, a JSON-lines outbox
//! for development, a callback for embedding, or a no-op sink.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod compose;
pub mod sinks;
pub mod smtp;
pub mod template;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use compose::ComposerConfig;
pub use compose::EmailComposer;
pub use compose::load_faculty;
pub use sinks::CallbackNotifier;
pub use sinks::NoopNotifier;
pub use sinks::OutboxNotifier;
pub use smtp::SmtpConfig;
pub use smtp::SmtpNotifier;
