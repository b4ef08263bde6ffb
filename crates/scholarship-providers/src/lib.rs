// crates/scholarship-providers/src/lib.rs
// ============================================================================
// Module: Scholarship Form Providers
// Description: Option providers, their registry, and the scholarship feed.
// Purpose: Supply the dynamic data the form renders.
// Dependencies: scholarship-core, reqwest, serde, time
// ============================================================================

//! ## Overview
//! This crate ships the built-in select-option providers (`class_years`,
//! `academic_years`), the [`OptionProviderRegistry`] that resolves provider
//! names referenced by the schema, and [`HttpScholarshipFeed`], a bounded
//! HTTP client for the list of scholarships open for application.
//! Feed responses are untrusted: requests enforce scheme and host policy,
//! disable redirects, and cap response size.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod builtin;
pub mod feed;
pub mod registry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use builtin::academic_years;
pub use builtin::academic_years_for;
pub use builtin::class_years;
pub use feed::HttpFeedConfig;
pub use feed::HttpScholarshipFeed;
pub use registry::OptionProviderRegistry;
