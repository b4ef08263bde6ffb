// crates/scholarship-core/src/core/messages.rs
// ============================================================================
// Module: Status Messages
// Description: Alert messages shown above the form after a submission.
// Dependencies: serde
// ============================================================================

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Alert severity; maps to a Bootstrap `alert-*` class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Submission accepted.
    Success,
    /// Accepted with a caveat.
    Info,
    /// Submission rejected or failed.
    Danger,
}

impl MessageKind {
    /// Returns the alert CSS class.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "alert-success",
            Self::Info => "alert-info",
            Self::Danger => "alert-danger",
        }
    }
}

/// Alert message; `html` is trusted markup authored by the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    /// Alert severity.
    pub kind: MessageKind,
    /// Message markup.
    pub html: String,
}

impl StatusMessage {
    /// Builds a success message.
    #[must_use]
    pub fn success(html: impl Into<String>) -> Self {
        Self { kind: MessageKind::Success, html: html.into() }
    }

    /// Builds an info message.
    #[must_use]
    pub fn info(html: impl Into<String>) -> Self {
        Self { kind: MessageKind::Info, html: html.into() }
    }

    /// Builds a danger message.
    #[must_use]
    pub fn danger(html: impl Into<String>) -> Self {
        Self { kind: MessageKind::Danger, html: html.into() }
    }
}
