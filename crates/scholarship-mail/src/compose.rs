// crates/scholarship-mail/src/compose.rs
// ============================================================================
// Module: Email Composer
// Description: Builds the confirmation email for an accepted application.
// Purpose: Resolve sender, recipients, subject, and body from a record.
// Dependencies: scholarship-core, serde_json, time
// ============================================================================

//! ## Overview
//! The applicant always receives the confirmation. Reviewer recipients (the
//! staff list and the faculty roster) are added only when the composer is
//! configured to notify staff, which the server enables in production only.
//! Record values are stored entity-encoded; headers and download links are
//! built from their decoded text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use scholarship_core::EmailMessage;
use scholarship_core::FieldKind;
use scholarship_core::FormSchema;
use scholarship_core::Mailbox;
use scholarship_core::NotifyError;
use scholarship_core::SubmissionRecord;
use scholarship_core::unescape_html;
use serde::Deserialize;
use time::UtcOffset;

use crate::template::EmailSummary;
use crate::template::render_body;
use crate::template::subject;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum faculty roster size in bytes.
const MAX_FACULTY_BYTES: usize = 256 * 1024;

// ============================================================================
// SECTION: Faculty Roster
// ============================================================================

/// Faculty roster document.
#[derive(Debug, Deserialize)]
struct FacultyRoster {
    /// Roster entries.
    faculty: Vec<FacultyEntry>,
}

/// One roster entry.
#[derive(Debug, Deserialize)]
struct FacultyEntry {
    /// Display name.
    name: String,
    /// Email address.
    email: String,
}

/// Loads the faculty roster `{ "faculty": [{ "name", "email" }] }`.
///
/// # Errors
///
/// Returns [`NotifyError::Compose`] when the file is unreadable, oversized,
/// or malformed.
pub fn load_faculty(path: &Path) -> Result<Vec<Mailbox>, NotifyError> {
    let bytes = fs::read(path)
        .map_err(|err| NotifyError::Compose(format!("faculty roster unreadable: {err}")))?;
    if bytes.len() > MAX_FACULTY_BYTES {
        return Err(NotifyError::Compose("faculty roster exceeds size limit".to_string()));
    }
    let roster: FacultyRoster = serde_json::from_slice(&bytes)
        .map_err(|err| NotifyError::Compose(format!("faculty roster invalid: {err}")))?;
    Ok(roster
        .faculty
        .into_iter()
        .filter(|entry| !entry.email.trim().is_empty())
        .map(|entry| Mailbox::named(entry.name, entry.email.trim()))
        .collect())
}

// ============================================================================
// SECTION: Composer
// ============================================================================

/// Composer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerConfig {
    /// Sender mailbox.
    pub sender: Mailbox,
    /// Staff recipients.
    pub staff: Vec<Mailbox>,
    /// Faculty recipients.
    pub faculty: Vec<Mailbox>,
    /// Whether staff and faculty receive the email.
    pub notify_staff: bool,
    /// Site base URL for download links.
    pub base_url: String,
    /// Field holding the applicant's first name.
    pub first_name_field: String,
    /// Field holding the applicant's last name.
    pub last_name_field: String,
    /// Field holding the applicant's email address.
    pub email_field: String,
    /// Offset used for the displayed submission time.
    pub display_offset: UtcOffset,
}

/// Builds confirmation emails.
#[derive(Debug, Clone)]
pub struct EmailComposer {
    /// Composer configuration.
    config: ComposerConfig,
}

impl EmailComposer {
    /// Creates a composer.
    #[must_use]
    pub const fn new(config: ComposerConfig) -> Self {
        Self { config }
    }

    /// Returns the applicant display name for a record as plain text.
    #[must_use]
    pub fn applicant_name(&self, record: &SubmissionRecord) -> String {
        let first = record.values.get(&self.config.first_name_field).unwrap_or_default();
        let last = record.values.get(&self.config.last_name_field).unwrap_or_default();
        unescape_html(format!("{first} {last}").trim())
    }

    /// Composes the confirmation email for `record`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Compose`] when the record has no applicant
    /// email address.
    pub fn compose(
        &self,
        record: &SubmissionRecord,
        schema: &FormSchema,
    ) -> Result<EmailMessage, NotifyError> {
        let applicant_name = self.applicant_name(record);
        let address = record
            .values
            .get(&self.config.email_field)
            .map(|address| unescape_html(address.trim()))
            .filter(|address| !address.is_empty())
            .ok_or_else(|| NotifyError::Compose("applicant email address missing".to_string()))?;

        let mut to = vec![Mailbox::named(applicant_name.clone(), address)];
        if self.config.notify_staff {
            to.extend(self.config.staff.iter().cloned());
            to.extend(self.config.faculty.iter().cloned());
        }

        let rows = schema
            .general_info
            .iter()
            .filter(|spec| spec.kind != FieldKind::File)
            .filter(|spec| {
                let name = spec.name.as_str();
                name != self.config.first_name_field && name != self.config.last_name_field
            })
            .map(|spec| {
                let value = record.values.get(spec.name.as_str()).unwrap_or_default();
                (upper_first(&spec.label), value.to_string())
            })
            .collect();

        let scholarships: Vec<String> =
            record.scholarships.iter().map(|name| unescape_html(name)).collect();
        let summary = EmailSummary {
            id: &record.id,
            submitted_at: record.submitted_at.to_offset(self.config.display_offset),
            applicant_name: &applicant_name,
            rows,
            scholarships: &record.scholarships,
            files: &record.files,
            base_url: &self.config.base_url,
        };
        Ok(EmailMessage {
            from: self.config.sender.clone(),
            to,
            subject: subject(&applicant_name, &scholarships),
            html_body: render_body(&summary),
        })
    }
}

/// Upper-cases the first character of a label.
fn upper_first(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
}
