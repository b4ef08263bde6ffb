// crates/scholarship-mail/src/sinks.rs
// ============================================================================
// Module: Notifier Sinks
// Description: Outbox, callback, and no-op notifiers.
// Purpose: Deliver or capture emails without an SMTP relay.
// Dependencies: scholarship-core, serde_json, std
// ============================================================================

//! ## Overview
//! [`OutboxNotifier`] appends each message as one JSON line to a writer;
//! development deployments point it at a file. [`CallbackNotifier`] hands
//! messages to a closure. [`NoopNotifier`] discards them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;

use scholarship_core::EmailMessage;
use scholarship_core::Notifier;
use scholarship_core::NotifyError;

// ============================================================================
// SECTION: Outbox
// ============================================================================

/// JSON-lines outbox notifier.
pub struct OutboxNotifier<W: Write + Send> {
    /// Output writer for outbox records.
    writer: Mutex<W>,
}

impl<W: Write + Send> OutboxNotifier<W> {
    /// Creates an outbox writing to `writer`.
    pub const fn new(writer: W) -> Self {
        Self { writer: Mutex::new(writer) }
    }

    /// Consumes the notifier and returns the writer.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Delivery`] when the writer mutex is poisoned.
    pub fn into_inner(self) -> Result<W, NotifyError> {
        self.writer
            .into_inner()
            .map_err(|_| NotifyError::Delivery("outbox mutex poisoned".to_string()))
    }
}

impl OutboxNotifier<File> {
    /// Opens an append-only outbox file, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Delivery`] when the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self, NotifyError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|err| NotifyError::Delivery(err.to_string()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|err| NotifyError::Delivery(err.to_string()))?;
        Ok(Self::new(file))
    }
}

impl<W: Write + Send> Notifier for OutboxNotifier<W> {
    fn notify(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        if message.to.is_empty() {
            return Err(NotifyError::Compose("message has no recipients".to_string()));
        }
        let mut guard = self
            .writer
            .lock()
            .map_err(|_| NotifyError::Delivery("outbox mutex poisoned".to_string()))?;
        serde_json::to_writer(&mut *guard, message)
            .map_err(|err| NotifyError::Delivery(err.to_string()))?;
        guard.write_all(b"\n").map_err(|err| NotifyError::Delivery(err.to_string()))?;
        guard.flush().map_err(|err| NotifyError::Delivery(err.to_string()))?;
        drop(guard);
        Ok(())
    }
}

// ============================================================================
// SECTION: Callback
// ============================================================================

/// Callback handler signature used by the notifier.
type CallbackHandler = dyn Fn(&EmailMessage) -> Result<(), NotifyError> + Send + Sync;

/// Notifier that invokes a closure.
#[derive(Clone)]
pub struct CallbackNotifier {
    /// Handler invoked with each message.
    handler: Arc<CallbackHandler>,
}

impl CallbackNotifier {
    /// Creates a callback notifier.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&EmailMessage) -> Result<(), NotifyError> + Send + Sync + 'static,
    {
        Self { handler: Arc::new(handler) }
    }
}

impl Notifier for CallbackNotifier {
    fn notify(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        (self.handler)(message)
    }
}

// ============================================================================
// SECTION: No-Op
// ============================================================================

/// Notifier that discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _message: &EmailMessage) -> Result<(), NotifyError> {
        Ok(())
    }
}
