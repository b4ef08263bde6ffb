// crates/scholarship-web/tests/common/mod.rs
// ============================================================================
// Module: Web Test Helpers
// Description: Application fixtures backed by in-memory collaborators.
// ============================================================================

#![allow(
    dead_code,
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test helpers are selectively used across suites."
)]

use std::sync::Arc;
use std::sync::Mutex;

use scholarship_config::SiteConfig;
use scholarship_core::EmailMessage;
use scholarship_core::FormSchema;
use scholarship_core::InMemorySubmissionStore;
use scholarship_core::Mailbox;
use scholarship_core::NotifyError;
use scholarship_core::RawSubmission;
use scholarship_core::ScholarshipWire;
use scholarship_core::StaticScholarshipFeed;
use scholarship_core::Upload;
use scholarship_core::UploadedFile;
use scholarship_mail::CallbackNotifier;
use scholarship_mail::ComposerConfig;
use scholarship_mail::EmailComposer;
use scholarship_providers::OptionProviderRegistry;
use scholarship_web::ErrorLogEvent;
use scholarship_web::ErrorLogSink;
use scholarship_web::ErrorLogger;
use scholarship_web::FormApp;
use scholarship_web::FormAppParts;
use scholarship_web::LogKind;
use time::UtcOffset;

/// Form schema used by the web suites.
pub const SCHEMA: &str = r#"{
    "generalInfo": [
        {"name": "fname", "type": "text", "label": "first name", "required": true, "baseWidth": 6},
        {"name": "lname", "type": "text", "label": "last name", "required": true, "baseWidth": 6},
        {"name": "email", "type": "email", "label": "email", "required": true},
        {"name": "gpa", "type": "number", "label": "GPA", "step": "0.01"},
        {"name": "class_year", "type": "select", "label": "class year", "options": "class_years"},
        {"name": "statement", "type": "textarea", "label": "statement"}
    ],
    "fileInputs": [
        {"name": "resume", "label": "Resume", "required": true},
        {"name": "letters", "label": "Letters", "isMulti": true}
    ]
}"#;

/// Identifier-shaped value that is never generated in practice.
pub const UNKNOWN_ID: &str = "00000000000000000000000000000000";

/// Error log sink that keeps every event.
#[derive(Default)]
pub struct RecordingLogSink {
    pub events: Mutex<Vec<ErrorLogEvent>>,
}

impl RecordingLogSink {
    /// Returns the event names recorded for `kind`.
    pub fn events_of(&self, kind: LogKind) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| event.kind == kind)
            .map(|event| event.event)
            .collect()
    }
}

impl ErrorLogSink for RecordingLogSink {
    fn record(&self, event: &ErrorLogEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Collaborators handed to an application under test.
pub struct Harness {
    pub app: FormApp,
    pub store: Arc<InMemorySubmissionStore>,
    pub sent: Arc<Mutex<Vec<EmailMessage>>>,
    pub log: Arc<RecordingLogSink>,
}

/// Site settings used in tests.
pub fn site() -> SiteConfig {
    SiteConfig {
        base_url: "https://forms.example.edu/apply".to_string(),
        program_url: "https://example.edu/".to_string(),
        program_name: "Example Program".to_string(),
        contact_email: "program@example.edu".to_string(),
        contact_phone: "407-555-0100".to_string(),
        support_email: "web@example.edu".to_string(),
    }
}

/// Builds an application; `fail_mail` makes every notification fail.
pub fn harness(fail_mail: bool) -> Harness {
    let schema = FormSchema::from_json(SCHEMA).expect("schema");
    let store = Arc::new(InMemorySubmissionStore::new());
    let sent = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::new(RecordingLogSink::default());
    let sink = Arc::clone(&sent);
    let notifier = CallbackNotifier::new(move |message: &EmailMessage| {
        if fail_mail {
            return Err(NotifyError::Delivery("relay refused".to_string()));
        }
        sink.lock().unwrap().push(message.clone());
        Ok(())
    });
    let feed = StaticScholarshipFeed::from_wire(vec![
        ScholarshipWire {
            name: "Founders Award".to_string(),
            deadline: "2026-11-15".to_string(),
            permalink: "https://example.edu/founders".to_string(),
        },
        ScholarshipWire {
            name: "Service Grant".to_string(),
            deadline: "2026-12-01".to_string(),
            permalink: "https://example.edu/service".to_string(),
        },
    ]);
    let composer = EmailComposer::new(ComposerConfig {
        sender: Mailbox::named("Example Program", "noreply@example.edu"),
        staff: vec![Mailbox { name: None, address: "staff@example.edu".to_string() }],
        faculty: Vec::new(),
        notify_staff: false,
        base_url: site().base_url,
        first_name_field: "fname".to_string(),
        last_name_field: "lname".to_string(),
        email_field: "email".to_string(),
        display_offset: UtcOffset::UTC,
    });
    let app = FormApp::new(FormAppParts {
        schema,
        options: Arc::new(OptionProviderRegistry::with_builtin_providers()),
        feed: Arc::new(feed),
        store: Arc::clone(&store) as _,
        notifier: Arc::new(notifier),
        composer,
        site: site(),
        log: ErrorLogger::new(Arc::clone(&log) as _, UtcOffset::UTC),
    });
    Harness { app, store, sent, log }
}

/// A complete, valid submission with one resume attached.
pub fn valid_submission() -> RawSubmission {
    let mut raw = RawSubmission::default();
    for (name, value) in [
        ("fname", "Ada"),
        ("lname", "Lovelace"),
        ("email", "ada@example.edu"),
        ("gpa", " 3.90 "),
        ("class_year", "Senior"),
        ("statement", "I like <b>engines</b>."),
    ] {
        raw.fields.insert(name.to_string(), value.to_string());
    }
    raw.scholarships.push("Founders Award".to_string());
    raw.uploads.push(upload("resume", "resume.pdf", b"%PDF-1.7 resume"));
    raw
}

/// Builds an upload for `field`.
pub fn upload(field: &str, filename: &str, content: &[u8]) -> Upload {
    Upload {
        field: field.to_string(),
        file: UploadedFile::new(filename, "application/pdf", content.to_vec()),
    }
}
