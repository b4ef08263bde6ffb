// crates/scholarship-config/src/lib.rs
// ============================================================================
// Module: Scholarship Form Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for scholarship-form.toml semantics.
// Dependencies: scholarship-core, scholarship-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! `scholarship-config` defines the configuration model for the scholarship
//! form server. Configuration is built once at startup, validated fail-closed,
//! and passed down explicitly; nothing reads settings from globals later.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
