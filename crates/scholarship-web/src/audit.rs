// crates/scholarship-web/src/audit.rs
// ============================================================================
// Module: Error Log
// Description: Structured error and submission events for the form server.
// Purpose: Record failures as JSON lines without a logging framework.
// Dependencies: scholarship-core, serde, serde_json, time
// ============================================================================

//! ## Overview
//! Every submission failure, feed failure, render diagnostic, and non-200
//! download is recorded as one [`ErrorLogEvent`]. Sinks decide where the
//! events go: an append-only file, stderr, or nowhere. Accepted submissions
//! are recorded too so the log alone reconstructs what happened to a request.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;

use scholarship_core::SubmissionId;
use serde::Serialize;
use time::OffsetDateTime;
use time::UtcOffset;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Event classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    /// Submission rejected before persistence.
    Validation,
    /// Store write or read failed.
    Persistence,
    /// Confirmation email failed.
    Notification,
    /// Scholarship feed unavailable.
    Feed,
    /// Field renderer reported a diagnostic.
    Render,
    /// Download request did not succeed.
    Download,
    /// Submission accepted.
    Submission,
}

/// Error log event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorLogEvent {
    /// Event identifier.
    pub event: &'static str,
    /// RFC 3339 timestamp in the configured display offset.
    pub timestamp: String,
    /// Event classification.
    pub kind: LogKind,
    /// Submission identifier when one exists.
    pub submission_id: Option<String>,
    /// Human-readable detail.
    pub message: String,
}

impl ErrorLogEvent {
    /// Creates an event stamped with the current time shifted to `offset`.
    #[must_use]
    pub fn new(
        event: &'static str,
        kind: LogKind,
        submission_id: Option<&SubmissionId>,
        message: impl Into<String>,
        offset: UtcOffset,
    ) -> Self {
        let now = OffsetDateTime::now_utc().to_offset(offset);
        Self {
            event,
            timestamp: now.format(&Rfc3339).unwrap_or_default(),
            kind,
            submission_id: submission_id.map(ToString::to_string),
            message: message.into(),
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Destination for error log events.
pub trait ErrorLogSink: Send + Sync {
    /// Records one event. Sinks never fail the request that produced it.
    fn record(&self, event: &ErrorLogEvent);
}

/// Sink that writes JSON lines to stderr.
pub struct StderrErrorLogSink;

impl ErrorLogSink for StderrErrorLogSink {
    fn record(&self, event: &ErrorLogEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Sink that appends JSON lines to a file.
pub struct FileErrorLogSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileErrorLogSink {
    /// Opens the log file in append mode, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file: Mutex::new(file) })
    }
}

impl ErrorLogSink for FileErrorLogSink {
    fn record(&self, event: &ErrorLogEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op sink.
pub struct NoopErrorLogSink;

impl ErrorLogSink for NoopErrorLogSink {
    fn record(&self, _event: &ErrorLogEvent) {}
}

// ============================================================================
// SECTION: Logger
// ============================================================================

/// Sink plus the offset used to stamp events.
#[derive(Clone)]
pub struct ErrorLogger {
    /// Destination sink.
    sink: Arc<dyn ErrorLogSink>,
    /// Timestamp offset.
    offset: UtcOffset,
}

impl ErrorLogger {
    /// Creates a logger.
    #[must_use]
    pub fn new(sink: Arc<dyn ErrorLogSink>, offset: UtcOffset) -> Self {
        Self { sink, offset }
    }

    /// Returns the timestamp offset.
    #[must_use]
    pub const fn offset(&self) -> UtcOffset {
        self.offset
    }

    /// Builds and records an event.
    pub fn emit(
        &self,
        event: &'static str,
        kind: LogKind,
        submission_id: Option<&SubmissionId>,
        message: impl Into<String>,
    ) {
        self.sink.record(&ErrorLogEvent::new(event, kind, submission_id, message, self.offset));
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only assertions."
    )]

    use std::sync::Arc;

    use scholarship_core::SubmissionId;
    use tempfile::TempDir;
    use time::UtcOffset;

    use super::ErrorLogger;
    use super::FileErrorLogSink;
    use super::LogKind;

    #[test]
    fn file_sink_appends_json_lines_with_offset_timestamps() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log").join("errors.jsonl");
        let sink = Arc::new(FileErrorLogSink::new(&path).unwrap());
        let offset = UtcOffset::from_hms(-5, 0, 0).unwrap();
        let logger = ErrorLogger::new(sink, offset);
        let id = SubmissionId::parse("0123456789abcdef0123456789abcdef").unwrap();
        logger.emit("notification_failed", LogKind::Notification, Some(&id), "relay refused");
        logger.emit("feed_unavailable", LogKind::Feed, None, "timeout");

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> =
            text.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["kind"], "notification");
        assert_eq!(lines[0]["submission_id"], "0123456789ABCDEF0123456789ABCDEF");
        assert!(lines[0]["timestamp"].as_str().unwrap().ends_with("-05:00"));
        assert!(lines[1]["submission_id"].is_null());
    }
}
