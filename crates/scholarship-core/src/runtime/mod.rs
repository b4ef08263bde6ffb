// crates/scholarship-core/src/runtime/mod.rs
// ============================================================================
// Module: Scholarship Form Runtime Helpers
// Description: In-process implementations of the core interfaces.
// Purpose: Back development mode and tests without external services.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! Runtime helpers implement the core traits entirely in memory. They are
//! deterministic and suitable for tests and local development only.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod feed;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use feed::StaticScholarshipFeed;
pub use store::InMemorySubmissionStore;
