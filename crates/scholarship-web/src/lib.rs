// crates/scholarship-web/src/lib.rs
// ============================================================================
// Module: Scholarship Form Web Library
// Description: HTTP surface for the scholarship application form.
// Purpose: Serve the form, accept submissions, and stream attachments.
// Dependencies: axum, scholarship-core, scholarship-config, tokio
// ============================================================================

//! ## Overview
//! `scholarship-web` wires the core renderer, the submission store, the
//! scholarship feed, and the mail notifier into three routes: the form page,
//! the submission endpoint, and the attachment download endpoint. Request
//! inputs are untrusted; every failure path renders a page and is recorded in
//! the error log.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod app;
pub mod audit;
pub mod download;
pub mod multipart;
pub mod pages;
pub mod pipeline;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use app::FormApp;
pub use app::FormAppParts;
pub use audit::ErrorLogEvent;
pub use audit::ErrorLogSink;
pub use audit::ErrorLogger;
pub use audit::FileErrorLogSink;
pub use audit::LogKind;
pub use audit::NoopErrorLogSink;
pub use audit::StderrErrorLogSink;
pub use download::DownloadError;
pub use download::DownloadRequest;
pub use download::attachment_name;
pub use pipeline::SubmissionOutcome;
pub use pipeline::SubmissionPipeline;
pub use server::FormServer;
pub use server::ServerError;
pub use server::check_config;
pub use server::router;
