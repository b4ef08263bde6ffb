// crates/scholarship-web/tests/download.rs
// ============================================================================
// Module: Download Tests
// Description: Status codes, headers, and bodies served by the download route.
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
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use axum::body::Body;
use axum::http::Response;
use axum::http::StatusCode;
use axum::http::header::CONTENT_DISPOSITION;
use axum::http::header::CONTENT_LENGTH;
use axum::http::header::CONTENT_TYPE;
use common::Harness;
use common::UNKNOWN_ID;
use common::harness;
use common::valid_submission;
use http_body_util::BodyExt;
use scholarship_web::LogKind;

/// Stores the valid submission and returns its identifier.
fn stored(harness: &Harness) -> String {
    let (outcome, _) = harness.app.submit(&valid_submission());
    outcome.stored.expect("stored").to_string()
}

/// Collects a response body as bytes.
async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

#[tokio::test]
async fn stored_attachment_is_served_with_prefixed_name() {
    let harness = harness(false);
    let id = stored(&harness);

    let response = harness.app.download(Some(&format!("auth={id}&file=0&pre=Ada+Lovelace")));
    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[CONTENT_TYPE], "application/pdf");
    assert_eq!(headers[CONTENT_LENGTH], "15");
    assert_eq!(headers[CONTENT_DISPOSITION], "attachment; filename=\"Ada Lovelace.resume.pdf\"");
    assert_eq!(body_bytes(response).await, b"%PDF-1.7 resume".to_vec());
    assert!(harness.log.events_of(LogKind::Download).is_empty());
}

#[tokio::test]
async fn malformed_requests_are_bad_requests() {
    let harness = harness(false);
    let id = stored(&harness);

    for query in [
        None,
        Some(format!("auth={id}&file=0")),
        Some(format!("auth={id}&file=5&pre=x")),
        Some(format!("auth={id}&file=-1&pre=x")),
        Some("auth=not-an-id&file=0&pre=x".to_string()),
    ] {
        let response = harness.app.download(query.as_deref());
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "query {query:?}");
        let body = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(body.contains("<title>400 Bad Request</title>"));
        assert!(body.contains("The request was missing required query parameters."));
    }
    assert_eq!(harness.log.events_of(LogKind::Download).len(), 5);
}

#[tokio::test]
async fn unknown_identifier_and_empty_slot_are_not_found() {
    let harness = harness(false);
    let id = stored(&harness);

    for query in [format!("auth={UNKNOWN_ID}&file=0&pre=x"), format!("auth={id}&file=3&pre=x")] {
        let response = harness.app.download(Some(&query));
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "query {query}");
        let body = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(body.contains("The requested file is not in the database."));
    }
}

#[tokio::test]
async fn store_failure_is_internal_error() {
    let harness = harness(false);
    let id = stored(&harness);
    harness.store.set_failing(true);

    let response = harness.app.download(Some(&format!("auth={id}&file=0&pre=x")));
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.contains("<title>500 Internal Server Error</title>"));
    assert!(body.contains("There was a problem interacting with the database."));
}
