// crates/scholarship-web/src/multipart.rs
// ============================================================================
// Module: Multipart Reader
// Description: Converts a multipart form body into a raw submission.
// Purpose: Separate wire decoding from submission semantics.
// Dependencies: axum, scholarship-core, thiserror
// ============================================================================

//! ## Overview
//! Text parts become fields (last occurrence wins), `scholarships[]` parts
//! become the selection list, and parts carrying a filename become uploads.
//! Client-supplied filenames are reduced to their final path component.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::extract::Multipart;
use axum::http::StatusCode;
use scholarship_core::RawSubmission;
use scholarship_core::Upload;
use scholarship_core::UploadedFile;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum number of parts accepted in one submission.
const MAX_PARTS: usize = 256;
/// Part names carrying scholarship selections.
const SCHOLARSHIP_PARTS: [&str; 2] = ["scholarships[]", "scholarships"];
/// Submit button part, ignored.
const SUBMIT_PART: &str = "submit";
/// MIME type used when the client sends none.
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Multipart decoding failures.
#[derive(Debug, Error)]
pub enum FormReadError {
    /// Body is not valid multipart or exceeded the body limit.
    #[error("malformed submission: {message}")]
    Malformed {
        /// HTTP status reported by the decoder.
        status: StatusCode,
        /// Decoder detail.
        message: String,
    },
    /// Too many parts.
    #[error("submission has more than {MAX_PARTS} parts")]
    TooManyParts,
}

impl FormReadError {
    /// Returns the HTTP status for this failure.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Malformed { status, .. } => *status,
            Self::TooManyParts => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for FormReadError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        Self::Malformed { status: err.status(), message: err.body_text() }
    }
}

// ============================================================================
// SECTION: Reader
// ============================================================================

/// Reads every part of `multipart` into a [`RawSubmission`].
///
/// # Errors
///
/// Returns [`FormReadError`] when the body cannot be decoded.
pub async fn read_submission(mut multipart: Multipart) -> Result<RawSubmission, FormReadError> {
    let mut raw = RawSubmission::default();
    let mut parts = 0usize;
    while let Some(field) = multipart.next_field().await? {
        parts += 1;
        if parts > MAX_PARTS {
            return Err(FormReadError::TooManyParts);
        }
        let name = field.name().unwrap_or_default().to_string();
        if name.is_empty() || name == SUBMIT_PART {
            continue;
        }
        if let Some(file_name) = field.file_name().map(base_name) {
            let content_type =
                field.content_type().unwrap_or(DEFAULT_CONTENT_TYPE).to_string();
            let bytes = field.bytes().await?;
            if file_name.is_empty() && bytes.is_empty() {
                continue;
            }
            raw.uploads.push(Upload {
                field: name,
                file: UploadedFile::new(file_name, content_type, bytes.to_vec()),
            });
            continue;
        }
        let text = field.text().await?;
        if SCHOLARSHIP_PARTS.contains(&name.as_str()) {
            raw.scholarships.push(text);
        } else {
            raw.fields.insert(name, text);
        }
    }
    Ok(raw)
}

/// Returns the final component of a client path, without control characters.
fn base_name(file_name: &str) -> String {
    file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .chars()
        .filter(|ch| !ch.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::base_name;

    #[test]
    fn base_name_strips_client_paths() {
        assert_eq!(base_name("C:\\Users\\ada\\resume.pdf"), "resume.pdf");
        assert_eq!(base_name("/home/ada/essay.docx"), "essay.docx");
        assert_eq!(base_name("plain.txt"), "plain.txt");
        assert_eq!(base_name("bad\nname.txt"), "badname.txt");
        assert_eq!(base_name(""), "");
    }
}
