//! Scholarship feed property-based tests.
//!
//! ## What is covered
//! - Unlisted hosts are rejected before any request is made.
//! - Arbitrary feed bodies never panic the parser.
// crates/scholarship-providers/tests/proptest_feed.rs
// ============================================================================
// Module: Scholarship Feed Property-Based Tests
// Description: Fuzz-like checks for feed URL policy and body parsing.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::collections::BTreeSet;

use proptest::prelude::*;
use scholarship_providers::HttpFeedConfig;
use scholarship_providers::HttpScholarshipFeed;
use scholarship_providers::feed::parse_feed;

proptest! {
    #[test]
    fn feed_rejects_unlisted_hosts(host in "[a-z][a-z0-9-]{0,20}(\\.[a-z]{2,5})?") {
        let result = HttpScholarshipFeed::new(HttpFeedConfig {
            allow_http: true,
            allowed_hosts: Some(BTreeSet::new()),
            ..HttpFeedConfig::new(format!("http://{host}/feed"))
        });
        prop_assert!(result.is_err());
    }

    #[test]
    fn parse_feed_never_panics(body in prop::collection::vec(any::<u8>(), 0 .. 256)) {
        let _ = parse_feed(&body);
    }
}
