// crates/scholarship-mail/src/template.rs
// ============================================================================
// Module: Email Template
// Description: HTML body and subject of the confirmation email.
// Purpose: Summarize an accepted application for applicant and reviewers.
// Dependencies: scholarship-core, time, url
// ============================================================================

//! ## Overview
//! The body is a fixed two-level table: a timestamp line, then one row per
//! summary entry. Row values and scholarships are already entity-encoded, so
//! they are emitted as-is; the applicant name is plain text and is escaped
//! here. Schema labels are trusted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;

use scholarship_core::SubmissionId;
use scholarship_core::UploadedFile;
use scholarship_core::escape_html;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Submission timestamp format (`Mon, Oct 19, 2026 at 3:04 pm UTC-05:00`).
const SUBMITTED_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [month repr:short] [day padding:none], [year] at [hour repr:12 padding:none]:[minute] [period case:lower] UTC[offset_hour sign:mandatory]:[offset_minute]"
);

/// Table style shared by the outer and inner tables.
const TABLE_STYLE: &str =
    "border-collapse: collapse; border: none; font-family: Arial, Helvetica, sans-serif;";

/// Header cell style for summary rows.
const HEADER_STYLE: &str = "text-align: right; padding-right: 3em; width: 150px;";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Inputs for one email body.
#[derive(Debug, Clone)]
pub struct EmailSummary<'a> {
    /// Submission identifier used in download links.
    pub id: &'a SubmissionId,
    /// Acceptance time, already shifted to the display offset.
    pub submitted_at: OffsetDateTime,
    /// Applicant display name, plain text.
    pub applicant_name: &'a str,
    /// Label/value rows in display order.
    pub rows: Vec<(String, String)>,
    /// Selected scholarships.
    pub scholarships: &'a [String],
    /// Uploaded files; index is the slot.
    pub files: &'a [UploadedFile],
    /// Site base URL without trailing slash.
    pub base_url: &'a str,
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Formats the submission timestamp.
#[must_use]
pub fn format_submitted(at: OffsetDateTime) -> String {
    at.format(SUBMITTED_FORMAT).unwrap_or_else(|_| at.to_string())
}

/// Builds the subject line: `"{name} - {scholarships} Application"`.
#[must_use]
pub fn subject(applicant_name: &str, scholarships: &[String]) -> String {
    format!("{applicant_name} - {} Application", scholarships.join(", "))
}

/// Builds the download link for one attachment slot.
#[must_use]
pub fn download_link(base_url: &str, id: &SubmissionId, slot: usize, applicant_name: &str) -> String {
    let pre: String = url::form_urlencoded::byte_serialize(applicant_name.as_bytes()).collect();
    format!("{}/download/?auth={id}&file={slot}&pre={pre}", base_url.trim_end_matches('/'))
}

/// Renders the full HTML body, wrapped in `<body>`.
#[must_use]
pub fn render_body(summary: &EmailSummary<'_>) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<body><table style=\"width: 900px; {TABLE_STYLE}\">\n    <tr>\n        <td>\n            <p>The following application was submitted on {}:</p>\n        </td>\n    </tr>\n    <tr>\n        <td>\n            <table style=\"width: 100%; {TABLE_STYLE}\">\n",
        format_submitted(summary.submitted_at)
    );
    push_row(&mut out, "Name", &escape_html(summary.applicant_name), "");
    for (label, value) in &summary.rows {
        push_row(&mut out, label, value, "");
    }
    push_row(&mut out, "Scholarships", &summary.scholarships.join(",<br />"), "");
    if !summary.files.is_empty() {
        let links: Vec<String> = summary
            .files
            .iter()
            .enumerate()
            .map(|(slot, file)| {
                let href = download_link(summary.base_url, summary.id, slot, summary.applicant_name)
                    .replace('&', "&amp;");
                format!("<a href=\"{href}\">{}</a>", escape_html(&file.filename))
            })
            .collect();
        push_row(&mut out, "Submitted Files", &links.join("<br />"), " vertical-align: top;");
    }
    out.push_str("            </table>\n        </td>\n    </tr>\n</table></body>");
    out
}

/// Appends one summary row.
fn push_row(out: &mut String, label: &str, value: &str, extra_style: &str) {
    let _ = writeln!(
        out,
        "                <tr>\n                    <th style=\"{HEADER_STYLE}{extra_style}\">{label}:</th><td>{value}</td>\n                </tr>"
    );
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use scholarship_core::SubmissionId;
    use time::macros::datetime;

    use super::download_link;
    use super::format_submitted;
    use super::subject;

    #[test]
    fn timestamp_uses_twelve_hour_clock_and_offset() {
        assert_eq!(
            format_submitted(datetime!(2026-10-19 15:04:00 -5)),
            "Mon, Oct 19, 2026 at 3:04 pm UTC-05:00"
        );
    }

    #[test]
    fn subject_joins_scholarships() {
        let scholarships = vec!["Dean's Award".to_string(), "Travel Grant".to_string()];
        assert_eq!(
            subject("Ada Lovelace", &scholarships),
            "Ada Lovelace - Dean's Award, Travel Grant Application"
        );
    }

    #[test]
    fn download_link_encodes_name() {
        let id = SubmissionId::parse("0123456789ABCDEF0123456789ABCDEF").ok();
        let link = id.map(|id| download_link("https://example.edu/apply/", &id, 2, "Ada O'Neil"));
        assert_eq!(
            link.as_deref(),
            Some("https://example.edu/apply/download/?auth=0123456789ABCDEF0123456789ABCDEF&file=2&pre=Ada+O%27Neil")
        );
    }
}
