// crates/scholarship-providers/src/feed.rs
// ============================================================================
// Module: HTTP Scholarship Feed
// Description: Bounded HTTP client for the open-scholarship JSON feed.
// Purpose: Fetch scholarships open for application with strict limits.
// Dependencies: scholarship-core, reqwest, serde_json
// ============================================================================

//! ## Overview
//! The feed issues one GET per call and expects a JSON array of
//! `{ name, deadline, permalink }` objects. Requests enforce scheme
//! restrictions, an optional host allowlist, a timeout, disabled redirects,
//! and a response size cap. Entries with unparseable deadlines are skipped
//! rather than failing the whole feed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::io::Read;
use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use scholarship_core::FeedError;
use scholarship_core::Scholarship;
use scholarship_core::ScholarshipFeed;
use scholarship_core::ScholarshipWire;
use serde_json::Value;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the HTTP scholarship feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpFeedConfig {
    /// Feed URL.
    pub url: String,
    /// Allow cleartext HTTP (disabled by default).
    pub allow_http: bool,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum response size allowed, in bytes.
    pub max_response_bytes: usize,
    /// Optional host allowlist.
    pub allowed_hosts: Option<BTreeSet<String>>,
    /// User agent string for outbound requests.
    pub user_agent: String,
}

impl HttpFeedConfig {
    /// Creates a configuration for `url` with default limits.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            allow_http: false,
            timeout_ms: 5_000,
            max_response_bytes: 1024 * 1024,
            allowed_hosts: None,
            user_agent: "scholarship-form/0.1".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Feed Implementation
// ============================================================================

/// Scholarship feed backed by an HTTP endpoint.
pub struct HttpScholarshipFeed {
    /// Feed configuration, including limits and policy.
    config: HttpFeedConfig,
    /// Parsed and policy-checked feed URL.
    url: Url,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl HttpScholarshipFeed {
    /// Creates a feed client, validating the URL against policy up front.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Request`] when the URL is invalid or disallowed,
    /// or the HTTP client cannot be created.
    pub fn new(config: HttpFeedConfig) -> Result<Self, FeedError> {
        let url = Url::parse(&config.url)
            .map_err(|_| FeedError::Request("invalid feed url".to_string()))?;
        validate_url(&url, &config)?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|_| FeedError::Request("http client build failed".to_string()))?;
        Ok(Self { config, url, client })
    }
}

impl ScholarshipFeed for HttpScholarshipFeed {
    fn open_scholarships(&self) -> Result<Vec<Scholarship>, FeedError> {
        let mut response = self
            .client
            .get(self.url.clone())
            .send()
            .map_err(|_| FeedError::Request("feed request failed".to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Request(format!("feed returned status {}", status.as_u16())));
        }
        let body = read_response_limited(&mut response, self.config.max_response_bytes)?;
        parse_feed(&body)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses a feed document, skipping entries that do not convert.
///
/// # Errors
///
/// Returns [`FeedError::Invalid`] when the body is not a JSON array.
pub fn parse_feed(body: &[u8]) -> Result<Vec<Scholarship>, FeedError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|_| FeedError::Invalid("feed is not valid json".to_string()))?;
    let Value::Array(entries) = value else {
        return Err(FeedError::Invalid("feed must be a json array".to_string()));
    };
    Ok(entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<ScholarshipWire>(entry).ok())
        .filter_map(Scholarship::from_wire)
        .collect())
}

/// Validates URL scheme and allowlist policy.
fn validate_url(url: &Url, config: &HttpFeedConfig) -> Result<(), FeedError> {
    match url.scheme() {
        "https" => {}
        "http" if config.allow_http => {}
        _ => return Err(FeedError::Request("unsupported url scheme".to_string())),
    }
    let host =
        url.host_str().ok_or_else(|| FeedError::Request("url host required".to_string()))?;
    if let Some(allowlist) = &config.allowed_hosts
        && !allowlist.contains(host)
    {
        return Err(FeedError::Request("url host not allowed".to_string()));
    }
    Ok(())
}

/// Reads the response body while enforcing a byte limit.
fn read_response_limited(
    response: &mut reqwest::blocking::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, FeedError> {
    let max_bytes_u64 = u64::try_from(max_bytes)
        .map_err(|_| FeedError::Request("response size limit exceeds u64".to_string()))?;
    if response.content_length().is_some_and(|expected| expected > max_bytes_u64) {
        return Err(FeedError::Invalid("feed response exceeds size limit".to_string()));
    }
    let mut buf = Vec::new();
    response
        .take(max_bytes_u64.saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(|_| FeedError::Request("failed to read feed response".to_string()))?;
    if buf.len() > max_bytes {
        return Err(FeedError::Invalid("feed response exceeds size limit".to_string()));
    }
    Ok(buf)
}
