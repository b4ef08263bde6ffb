// crates/scholarship-mail/src/smtp.rs
// ============================================================================
// Module: SMTP Notifier
// Description: Delivers composed emails through an SMTP relay.
// Purpose: Production delivery of confirmation emails.
// Dependencies: scholarship-core, lettre
// ============================================================================

//! ## Overview
//! [`SmtpNotifier`] relays HTML mail through a configured host with optional
//! authentication. The relay is expected to be on a trusted network; the
//! connection is plaintext, matching a campus relay without STARTTLS.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use lettre::Address;
use lettre::Message;
use lettre::SmtpTransport;
use lettre::Transport;
use lettre::message::Mailbox as LettreMailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use scholarship_core::EmailMessage;
use scholarship_core::Mailbox;
use scholarship_core::Notifier;
use scholarship_core::NotifyError;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// SMTP relay settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    /// Relay host name.
    pub host: String,
    /// Relay port.
    pub port: u16,
    /// Optional username and password.
    pub credentials: Option<(String, String)>,
    /// Connection timeout in milliseconds.
    pub timeout_ms: u64,
}

// ============================================================================
// SECTION: Notifier
// ============================================================================

/// Notifier that sends mail through SMTP.
pub struct SmtpNotifier {
    /// Pooled SMTP transport.
    transport: SmtpTransport,
}

impl SmtpNotifier {
    /// Builds the SMTP transport.
    #[must_use]
    pub fn new(config: &SmtpConfig) -> Self {
        let mut builder = SmtpTransport::builder_dangerous(config.host.as_str())
            .port(config.port)
            .timeout(Some(Duration::from_millis(config.timeout_ms)));
        if let Some((username, password)) = &config.credentials {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }
        Self { transport: builder.build() }
    }
}

impl Notifier for SmtpNotifier {
    fn notify(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        let email = build_message(message)?;
        self.transport
            .send(&email)
            .map(|_| ())
            .map_err(|err| NotifyError::Delivery(err.to_string()))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Converts a composed message into a lettre message.
///
/// # Errors
///
/// Returns [`NotifyError::Compose`] for invalid addresses or no recipients.
pub fn build_message(message: &EmailMessage) -> Result<Message, NotifyError> {
    if message.to.is_empty() {
        return Err(NotifyError::Compose("message has no recipients".to_string()));
    }
    let mut builder =
        Message::builder().from(to_lettre(&message.from)?).subject(message.subject.clone());
    for recipient in &message.to {
        builder = builder.to(to_lettre(recipient)?);
    }
    builder
        .header(ContentType::TEXT_HTML)
        .body(message.html_body.clone())
        .map_err(|err| NotifyError::Compose(err.to_string()))
}

/// Parses a mailbox into lettre's representation.
fn to_lettre(mailbox: &Mailbox) -> Result<LettreMailbox, NotifyError> {
    let address: Address = mailbox
        .address
        .parse()
        .map_err(|_| NotifyError::Compose(format!("invalid email address: {}", mailbox.address)))?;
    Ok(LettreMailbox::new(mailbox.name.clone(), address))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use scholarship_core::EmailMessage;
    use scholarship_core::Mailbox;
    use scholarship_core::NotifyError;

    use super::build_message;

    fn message(to: Vec<Mailbox>) -> EmailMessage {
        EmailMessage {
            from: Mailbox::named("Scholarships", "scholarships@example.edu"),
            to,
            subject: "Ada Lovelace - Dean's Award Application".to_string(),
            html_body: "<body><p>hi</p></body>".to_string(),
        }
    }

    #[test]
    fn builds_html_message() {
        let built = build_message(&message(vec![Mailbox::named("Ada Lovelace", "ada@example.edu")]));
        let formatted = built.map(|m| String::from_utf8_lossy(&m.formatted()).to_string());
        let text = formatted.unwrap_or_default();
        assert!(text.contains("Content-Type: text/html"));
        assert!(text.contains("ada@example.edu"));
    }

    #[test]
    fn rejects_invalid_address_and_empty_recipients() {
        assert!(matches!(
            build_message(&message(vec![Mailbox::named("Bad", "not-an-address")])),
            Err(NotifyError::Compose(_))
        ));
        assert!(matches!(build_message(&message(Vec::new())), Err(NotifyError::Compose(_))));
    }
}
