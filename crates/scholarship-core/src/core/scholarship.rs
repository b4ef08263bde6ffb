// crates/scholarship-core/src/core/scholarship.rs
// ============================================================================
// Module: Scholarship Feed Entries
// Description: Open scholarship entries and their wire form.
// Purpose: Parse feed entries and format deadlines for display.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! The scholarship feed lists scholarships currently open for application.
//! Entries arrive as `{ name, deadline: "YYYY-MM-DD", permalink }`; an entry
//! whose deadline does not parse is rejected by [`Scholarship::from_wire`]
//! so the caller can skip it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

// ============================================================================
// SECTION: Formats
// ============================================================================

/// Wire format of feed deadlines.
const DEADLINE_WIRE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Display format of feed deadlines (`Oct 5, 2026`).
const DEADLINE_DISPLAY_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none], [year]");

// ============================================================================
// SECTION: Types
// ============================================================================

/// Feed entry as received over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScholarshipWire {
    /// Scholarship name; also the checkbox value.
    pub name: String,
    /// Deadline as `YYYY-MM-DD`.
    pub deadline: String,
    /// Requirements page URL.
    pub permalink: String,
}

/// Scholarship open for application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scholarship {
    /// Scholarship name.
    pub name: String,
    /// Application deadline.
    pub deadline: Date,
    /// Requirements page URL.
    pub permalink: String,
}

impl Scholarship {
    /// Converts a wire entry, returning `None` when the deadline is malformed
    /// or the name is blank.
    #[must_use]
    pub fn from_wire(wire: ScholarshipWire) -> Option<Self> {
        if wire.name.trim().is_empty() {
            return None;
        }
        let deadline = Date::parse(wire.deadline.trim(), DEADLINE_WIRE_FORMAT).ok()?;
        Some(Self { name: wire.name, deadline, permalink: wire.permalink })
    }

    /// Returns the deadline formatted for display, e.g. `Oct 5, 2026`.
    #[must_use]
    pub fn deadline_display(&self) -> String {
        self.deadline.format(DEADLINE_DISPLAY_FORMAT).unwrap_or_else(|_| self.deadline.to_string())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::Scholarship;
    use super::ScholarshipWire;

    fn wire(deadline: &str) -> ScholarshipWire {
        ScholarshipWire {
            name: "Dean's Excellence Award".to_string(),
            deadline: deadline.to_string(),
            permalink: "https://example.edu/scholarships/deans".to_string(),
        }
    }

    #[test]
    fn deadline_displays_short_month_without_padding() {
        let scholarship = Scholarship::from_wire(wire("2026-10-05"));
        assert_eq!(scholarship.map(|s| s.deadline_display()).as_deref(), Some("Oct 5, 2026"));
    }

    #[test]
    fn malformed_deadline_is_rejected() {
        assert!(Scholarship::from_wire(wire("10/05/2026")).is_none());
        assert!(Scholarship::from_wire(wire("2026-02-30")).is_none());
    }
}
