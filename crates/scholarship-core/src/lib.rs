// crates/scholarship-core/src/lib.rs
// ============================================================================
// Module: Scholarship Form Core Library
// Description: Public API surface for the scholarship form core.
// Purpose: Expose form schema types, the field renderer, and contract traits.
// Dependencies: crate::{core, interfaces, render, runtime}
// ============================================================================

//! ## Overview
//! Scholarship form core owns the data model shared by every other crate:
//! the JSON form schema ([`FormSchema`], [`FieldSpec`]), submission records,
//! opaque identifiers, and the schema-driven [`FieldRenderer`] that turns a
//! field specification into Bootstrap-style HTML. Storage, mail delivery, the
//! scholarship feed, and named option providers integrate through the traits
//! in [`interfaces`] rather than concrete backends.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod render;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::EmailMessage;
pub use interfaces::FeedError;
pub use interfaces::Mailbox;
pub use interfaces::NotifyError;
pub use interfaces::Notifier;
pub use interfaces::OptionProvider;
pub use interfaces::OptionResolver;
pub use interfaces::ProviderError;
pub use interfaces::ScholarshipFeed;
pub use interfaces::StoreError;
pub use interfaces::SubmissionStore;
pub use render::FieldRenderer;
pub use render::RenderDiagnostic;
pub use render::RenderedControl;
pub use runtime::InMemorySubmissionStore;
pub use runtime::StaticScholarshipFeed;
