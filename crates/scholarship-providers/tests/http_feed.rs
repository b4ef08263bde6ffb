// crates/scholarship-providers/tests/http_feed.rs
// ============================================================================
// Module: HTTP Scholarship Feed Tests
// Description: Feed fetching against a local tiny_http server.
// Purpose: Validate parsing, policy enforcement, and size limits.
// ============================================================================

//! ## Overview
//! Runs a one-shot local HTTP server per test and points the feed at it.

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
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::collections::BTreeSet;
use std::thread;

use scholarship_core::FeedError;
use scholarship_core::ScholarshipFeed;
use scholarship_providers::HttpFeedConfig;
use scholarship_providers::HttpScholarshipFeed;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// Serves one response and returns the URL plus the server thread.
fn serve_once(status: u16, body: String, location: Option<&str>) -> (String, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let location = location.map(ToString::to_string);
    let handle = thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let mut response = Response::from_string(body).with_status_code(status);
            if let Some(location) = location {
                response.add_header(Header::from_bytes("Location", location.as_bytes()).unwrap());
            }
            let _ = request.respond(response);
        }
    });
    (format!("http://{addr}/wp-json/scholarships"), handle)
}

/// Creates a feed allowed to reach the local server.
fn local_feed(url: &str, max_response_bytes: usize) -> HttpScholarshipFeed {
    let mut allowed_hosts = BTreeSet::new();
    allowed_hosts.insert("127.0.0.1".to_string());
    HttpScholarshipFeed::new(HttpFeedConfig {
        allow_http: true,
        allowed_hosts: Some(allowed_hosts),
        max_response_bytes,
        ..HttpFeedConfig::new(url)
    })
    .unwrap()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn feed_parses_entries_and_skips_bad_deadlines() {
    let body = serde_json::json!([
        {"name": "Dean's Award", "deadline": "2026-11-01", "permalink": "https://example.edu/deans"},
        {"name": "Broken", "deadline": "next week", "permalink": "https://example.edu/broken"},
        {"name": "Missing permalink", "deadline": "2026-11-01"},
        {"name": "Travel Grant", "deadline": "2027-01-15", "permalink": "https://example.edu/travel"}
    ])
    .to_string();
    let (url, handle) = serve_once(200, body, None);
    let result = local_feed(&url, 1024 * 1024).open_scholarships();
    handle.join().unwrap();

    let scholarships = result.unwrap();
    let names: Vec<&str> = scholarships.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Dean's Award", "Travel Grant"]);
    assert_eq!(scholarships[1].deadline_display(), "Jan 15, 2027");
}

#[test]
fn non_array_feed_is_invalid() {
    let (url, handle) = serve_once(200, r#"{"name": "x"}"#.to_string(), None);
    let result = local_feed(&url, 1024).open_scholarships();
    handle.join().unwrap();
    assert!(matches!(result, Err(FeedError::Invalid(_))));
}

#[test]
fn server_error_status_fails_the_feed() {
    let (url, handle) = serve_once(503, "[]".to_string(), None);
    let result = local_feed(&url, 1024).open_scholarships();
    handle.join().unwrap();
    assert!(matches!(result, Err(FeedError::Request(message)) if message.contains("503")));
}

#[test]
fn redirects_are_not_followed() {
    let (url, handle) = serve_once(302, String::new(), Some("http://127.0.0.1:9/elsewhere"));
    let result = local_feed(&url, 1024).open_scholarships();
    handle.join().unwrap();
    assert!(matches!(result, Err(FeedError::Request(message)) if message.contains("302")));
}

#[test]
fn oversized_feed_is_rejected() {
    let (url, handle) = serve_once(200, format!("[\"{}\"]", "x".repeat(4096)), None);
    let result = local_feed(&url, 1024).open_scholarships();
    handle.join().unwrap();
    assert!(matches!(result, Err(FeedError::Invalid(message)) if message.contains("size limit")));
}

#[test]
fn policy_rejects_http_and_unlisted_hosts_at_construction() {
    let plain = HttpScholarshipFeed::new(HttpFeedConfig::new("http://127.0.0.1/feed"));
    assert!(matches!(plain, Err(FeedError::Request(message)) if message.contains("scheme")));

    let mut allowed_hosts = BTreeSet::new();
    allowed_hosts.insert("cah.ucf.edu".to_string());
    let unlisted = HttpScholarshipFeed::new(HttpFeedConfig {
        allowed_hosts: Some(allowed_hosts),
        ..HttpFeedConfig::new("https://evil.example/feed")
    });
    assert!(matches!(unlisted, Err(FeedError::Request(message)) if message.contains("not allowed")));

    assert!(HttpScholarshipFeed::new(HttpFeedConfig::new("file:///etc/passwd")).is_err());
    assert!(HttpScholarshipFeed::new(HttpFeedConfig::new("not a url")).is_err());
}
