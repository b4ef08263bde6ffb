// crates/scholarship-web/src/pipeline.rs
// ============================================================================
// Module: Submission Pipeline
// Description: Validate, persist, and confirm one application.
// Purpose: Turn a raw multipart submission into user-facing status messages.
// Dependencies: scholarship-core, scholarship-mail, time
// ============================================================================

//! ## Overview
//! [`SubmissionPipeline::submit`] runs the fixed sequence: scholarship
//! selection, required fields, value scrubbing, attachment slotting,
//! persistence, then the confirmation email. Validation failures persist
//! nothing. A persistence failure shows the form again. A notification
//! failure keeps the stored record and tells the applicant the email did not
//! go out.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use scholarship_core::FieldKind;
use scholarship_core::FieldSpec;
use scholarship_core::FormSchema;
use scholarship_core::FormValues;
use scholarship_core::MAX_FILE_SLOTS;
use scholarship_core::Notifier;
use scholarship_core::RawSubmission;
use scholarship_core::StatusMessage;
use scholarship_core::SubmissionId;
use scholarship_core::SubmissionRecord;
use scholarship_core::SubmissionStore;
use scholarship_core::UploadedFile;
use scholarship_core::escape_html;
use scholarship_core::is_numeric;
use scholarship_core::scrub;
use scholarship_mail::EmailComposer;
use time::OffsetDateTime;

use crate::audit::ErrorLogger;
use crate::audit::LogKind;

// ============================================================================
// SECTION: Messages
// ============================================================================

/// Shown when no scholarship checkbox was ticked.
pub const NO_SCHOLARSHIP_MESSAGE: &str = "You must select at least one scholarship to apply for.";
/// Shown after a fully successful submission.
pub const SUCCESS_MESSAGE: &str = "Your scholarship application was submitted successfully!";

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// Result of one submission attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionOutcome {
    /// Alerts shown above the form.
    pub messages: Vec<StatusMessage>,
    /// Trimmed, unescaped values for re-rendering the form.
    pub entered: FormValues,
    /// Scholarship names the applicant ticked.
    pub selected: Vec<String>,
    /// Identifier of the stored record, when persistence succeeded.
    pub stored: Option<SubmissionId>,
}

impl SubmissionOutcome {
    /// Returns true when the form should be shown again.
    #[must_use]
    pub const fn show_form(&self) -> bool {
        self.stored.is_none()
    }
}

// ============================================================================
// SECTION: Pipeline
// ============================================================================

/// Submission handler bound to one schema, store, and notifier.
#[derive(Clone)]
pub struct SubmissionPipeline {
    /// Form schema.
    schema: Arc<FormSchema>,
    /// Record store.
    store: Arc<dyn SubmissionStore>,
    /// Email delivery.
    notifier: Arc<dyn Notifier>,
    /// Email composition.
    composer: EmailComposer,
    /// Error log.
    log: ErrorLogger,
    /// Address named in failure messages.
    support_email: String,
}

impl SubmissionPipeline {
    /// Creates a pipeline.
    #[must_use]
    pub fn new(
        schema: Arc<FormSchema>,
        store: Arc<dyn SubmissionStore>,
        notifier: Arc<dyn Notifier>,
        composer: EmailComposer,
        log: ErrorLogger,
        support_email: impl Into<String>,
    ) -> Self {
        Self { schema, store, notifier, composer, log, support_email: support_email.into() }
    }

    /// Processes one submission. Blocking: call from a blocking context.
    #[must_use]
    pub fn submit(&self, raw: &RawSubmission) -> SubmissionOutcome {
        let mut outcome = SubmissionOutcome {
            entered: self.entered_values(raw),
            selected: raw
                .scholarships
                .iter()
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect(),
            ..SubmissionOutcome::default()
        };

        if outcome.selected.is_empty() {
            self.log.emit("submission_rejected", LogKind::Validation, None, "no scholarship selected");
            outcome.messages.push(StatusMessage::danger(NO_SCHOLARSHIP_MESSAGE));
            return outcome;
        }

        let missing = self.missing_required(raw);
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|spec| spec.name.as_str()).collect();
            self.log.emit(
                "submission_rejected",
                LogKind::Validation,
                None,
                format!("missing required fields: {}", names.join(", ")),
            );
            outcome.messages.extend(
                missing.iter().map(|spec| StatusMessage::danger(required_message(spec))),
            );
            return outcome;
        }

        let files = self.slot_files(raw);
        if files.len() > MAX_FILE_SLOTS {
            self.log.emit(
                "submission_rejected",
                LogKind::Validation,
                None,
                format!("{} attachments exceed {MAX_FILE_SLOTS} slots", files.len()),
            );
            outcome.messages.push(StatusMessage::danger(format!(
                "No more than {MAX_FILE_SLOTS} files may be attached to one application."
            )));
            return outcome;
        }

        let record = SubmissionRecord {
            id: SubmissionId::generate(),
            values: self.stored_values(raw),
            scholarships: outcome.selected.iter().map(|name| scrub(name)).collect(),
            files,
            submitted_at: OffsetDateTime::now_utc(),
        };

        if let Err(err) = self.store.insert(&record) {
            self.log.emit("persistence_failed", LogKind::Persistence, Some(&record.id), err.to_string());
            outcome.messages.push(StatusMessage::danger(format!(
                "Problem communicating with the database. If this issue persists, please contact {}",
                self.support_link()
            )));
            return outcome;
        }
        outcome.stored = Some(record.id.clone());

        let delivered = self
            .composer
            .compose(&record, &self.schema)
            .and_then(|message| self.notifier.notify(&message));
        if let Err(err) = delivered {
            self.log.emit(
                "notification_failed",
                LogKind::Notification,
                Some(&record.id),
                err.to_string(),
            );
            outcome.messages.push(StatusMessage::info(format!(
                "The confirmation email failed to send, but your information was successfully entered into the database. If you require a confirmation email for your records, please contact {}",
                self.support_link()
            )));
            return outcome;
        }

        self.log.emit(
            "submission_accepted",
            LogKind::Submission,
            Some(&record.id),
            format!("{} attachment(s)", record.files.len()),
        );
        outcome.messages.push(StatusMessage::success(SUCCESS_MESSAGE));
        outcome
    }

    /// Collects trimmed values for every non-file general field.
    fn entered_values(&self, raw: &RawSubmission) -> FormValues {
        let mut values = FormValues::new();
        for spec in self.general_fields() {
            if let Some(value) = raw.value(spec.name.as_str()) {
                values.insert(spec.name.as_str(), value.trim());
            }
        }
        values
    }

    /// Collects values as persisted: numbers verbatim, text scrubbed.
    fn stored_values(&self, raw: &RawSubmission) -> FormValues {
        let mut values = FormValues::new();
        for spec in self.general_fields() {
            if let Some(value) = raw.value(spec.name.as_str()) {
                let stored = if is_numeric(value) { value.trim().to_string() } else { scrub(value) };
                values.insert(spec.name.as_str(), stored);
            }
        }
        values
    }

    /// Returns required fields with no usable value, in schema order.
    fn missing_required(&self, raw: &RawSubmission) -> Vec<&FieldSpec> {
        let general = self
            .general_fields()
            .filter(|spec| spec.required && raw.value(spec.name.as_str()).is_none());
        let files = self.schema.file_inputs.iter().filter(|spec| {
            spec.required
                && !raw.uploads.iter().any(|upload| {
                    upload.field == spec.name.as_str() && !upload.file.is_empty()
                })
        });
        general.chain(files).collect()
    }

    /// Assigns non-empty uploads to slots in schema order.
    fn slot_files(&self, raw: &RawSubmission) -> Vec<UploadedFile> {
        self.schema
            .file_inputs
            .iter()
            .flat_map(|spec| {
                raw.uploads.iter().filter(move |upload| {
                    upload.field == spec.name.as_str() && !upload.file.is_empty()
                })
            })
            .map(|upload| upload.file.clone())
            .collect()
    }

    /// Iterates general-information fields that carry values.
    fn general_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.schema.general_info.iter().filter(|spec| spec.kind != FieldKind::File)
    }

    /// Renders the support contact link.
    fn support_link(&self) -> String {
        let address = escape_html(&self.support_email);
        format!("<a href=\"mailto:{address}\">{address}</a>")
    }
}

/// Builds the message for a missing required field.
fn required_message(spec: &FieldSpec) -> String {
    let mut chars = spec.label.chars();
    let label: String =
        chars.next().map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect());
    format!("{label} is required.")
}
