// crates/scholarship-core/src/runtime/feed.rs
// ============================================================================
// Module: Static Scholarship Feed
// Description: Fixed scholarship list used in development and tests.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::Scholarship;
use crate::core::ScholarshipWire;
use crate::interfaces::FeedError;
use crate::interfaces::ScholarshipFeed;

// ============================================================================
// SECTION: Static Feed
// ============================================================================

/// Feed that always returns the same entries.
#[derive(Debug, Clone, Default)]
pub struct StaticScholarshipFeed {
    /// Entries in display order.
    entries: Vec<Scholarship>,
}

impl StaticScholarshipFeed {
    /// Creates a feed from parsed entries.
    #[must_use]
    pub const fn new(entries: Vec<Scholarship>) -> Self {
        Self { entries }
    }

    /// Creates a feed from wire entries, skipping malformed deadlines.
    #[must_use]
    pub fn from_wire(entries: Vec<ScholarshipWire>) -> Self {
        Self { entries: entries.into_iter().filter_map(Scholarship::from_wire).collect() }
    }
}

impl ScholarshipFeed for StaticScholarshipFeed {
    fn open_scholarships(&self) -> Result<Vec<Scholarship>, FeedError> {
        Ok(self.entries.clone())
    }
}
