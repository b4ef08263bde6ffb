// crates/scholarship-web/src/download.rs
// ============================================================================
// Module: Attachment Download
// Description: Query parsing, lookup, and response for stored attachments.
// Purpose: Serve one slot of one submission to a holder of its identifier.
// Dependencies: axum, scholarship-core, url
// ============================================================================

//! ## Overview
//! A download is addressed by `auth` (the submission identifier), `file` (the
//! slot, 0 through 4), and `pre` (a filename prefix, normally the applicant's
//! name). Malformed requests are 400, unknown identifiers and empty slots are
//! 404, and store failures are 500. Possession of the identifier is the only
//! authorization: identifiers carry 128 random bits and are sent only in the
//! confirmation email.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::http::header::CONTENT_DISPOSITION;
use axum::http::header::CONTENT_LENGTH;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::response::Response;
use scholarship_core::SlotIndex;
use scholarship_core::SubmissionId;
use scholarship_core::SubmissionStore;
use scholarship_core::UploadedFile;
use thiserror::Error;

// ============================================================================
// SECTION: Request
// ============================================================================

/// Validated download request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    /// Submission identifier.
    pub id: SubmissionId,
    /// Attachment slot.
    pub slot: SlotIndex,
    /// Filename prefix, already stripped of unsafe characters.
    pub prefix: String,
}

impl DownloadRequest {
    /// Parses the raw query string.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::BadRequest`] when a parameter is missing,
    /// `file` is not an integer in range, or `auth` is malformed.
    pub fn from_query(query: Option<&str>) -> Result<Self, DownloadError> {
        let mut auth = None;
        let mut file = None;
        let mut pre = None;
        for (key, value) in url::form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            match key.as_ref() {
                "auth" => auth = Some(value.into_owned()),
                "file" => file = Some(value.into_owned()),
                "pre" => pre = Some(value.into_owned()),
                _ => {}
            }
        }
        let (Some(auth), Some(file), Some(pre)) = (auth, file, pre) else {
            return Err(DownloadError::BadRequest("missing query parameter".to_string()));
        };
        let slot = SlotIndex::parse(&file).map_err(|err| DownloadError::BadRequest(err.to_string()))?;
        let id = SubmissionId::parse(&auth).map_err(|err| DownloadError::BadRequest(err.to_string()))?;
        Ok(Self { id, slot, prefix: clean_prefix(&pre) })
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Download failures, each mapped to one status code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadError {
    /// Malformed or incomplete request.
    #[error("bad download request: {0}")]
    BadRequest(String),
    /// Unknown identifier or empty slot.
    #[error("download not found: {0}")]
    NotFound(String),
    /// Store failure.
    #[error("download store error: {0}")]
    Store(String),
}

impl DownloadError {
    /// Returns the HTTP status for this failure.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message shown on the error page.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "The request was missing required query parameters.",
            Self::NotFound(_) => "The requested file is not in the database.",
            Self::Store(_) => "There was a problem interacting with the database.",
        }
    }
}

// ============================================================================
// SECTION: Lookup
// ============================================================================

/// Loads the requested attachment.
///
/// # Errors
///
/// Returns [`DownloadError::NotFound`] for unknown identifiers and empty
/// slots, and [`DownloadError::Store`] when the store fails.
pub fn fetch(
    store: &dyn SubmissionStore,
    request: &DownloadRequest,
) -> Result<UploadedFile, DownloadError> {
    store
        .load_file(&request.id, request.slot)
        .map_err(|err| DownloadError::Store(err.to_string()))?
        .ok_or_else(|| {
            DownloadError::NotFound(format!("no file in slot {} for {}", request.slot, request.id))
        })
}

/// Builds the attachment filename `"{prefix}.{filename}"`.
#[must_use]
pub fn attachment_name(prefix: &str, filename: &str) -> String {
    let filename: String =
        filename.chars().filter(|ch| !ch.is_control() && *ch != '"').collect();
    format!("{}.{filename}", clean_prefix(prefix))
}

/// Builds the 200 response for a stored attachment.
#[must_use]
pub fn file_response(file: UploadedFile, prefix: &str) -> Response {
    let content_type = HeaderValue::from_str(&file.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    let disposition = format!("attachment; filename=\"{}\"", attachment_name(prefix, &file.filename));
    let disposition = HeaderValue::from_bytes(disposition.as_bytes())
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
    let length = HeaderValue::from(file.content.len());
    (
        StatusCode::OK,
        [(CONTENT_TYPE, content_type), (CONTENT_LENGTH, length), (CONTENT_DISPOSITION, disposition)],
        file.content,
    )
        .into_response()
}

/// Strips quotes, encoded quotes, and control characters from a prefix.
fn clean_prefix(value: &str) -> String {
    value
        .replace("%27", "")
        .chars()
        .filter(|ch| !ch.is_control() && *ch != '\'' && *ch != '"')
        .collect::<String>()
        .trim()
        .to_string()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::DownloadError;
    use super::DownloadRequest;
    use super::attachment_name;

    const ID: &str = "0123456789ABCDEF0123456789ABCDEF";

    fn parse(query: &str) -> Result<DownloadRequest, DownloadError> {
        DownloadRequest::from_query(Some(query))
    }

    #[test]
    fn parses_complete_query() {
        let request = parse(&format!("auth={}&file=3&pre=Ada+Lovelace", ID.to_lowercase()));
        let request = request.ok();
        assert_eq!(request.as_ref().map(|r| r.id.as_str()), Some(ID));
        assert_eq!(request.as_ref().map(|r| r.slot.get()), Some(3));
        assert_eq!(request.map(|r| r.prefix).as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn rejects_missing_and_out_of_range_parameters() {
        for query in [
            String::new(),
            format!("auth={ID}&file=1"),
            format!("auth={ID}&pre=x"),
            "file=1&pre=x".to_string(),
            format!("auth={ID}&file=5&pre=x"),
            format!("auth={ID}&file=-1&pre=x"),
            format!("auth={ID}&file=one&pre=x"),
            "auth=zzzz&file=0&pre=x".to_string(),
        ] {
            let status = parse(&query).err().map(|err| err.status());
            assert_eq!(status, Some(StatusCode::BAD_REQUEST), "query {query}");
        }
        assert!(DownloadRequest::from_query(None).is_err());
    }

    #[test]
    fn prefix_drops_quotes_and_controls() {
        let request = parse(&format!("auth={ID}&file=0&pre=O%2527Neil%27s%0A%22x%22"));
        assert_eq!(request.map(|r| r.prefix).ok().as_deref(), Some("ONeilsx"));
        assert_eq!(attachment_name("Ada O'Neil", "resume\".pdf"), "Ada ONeil.resume.pdf");
    }
}
