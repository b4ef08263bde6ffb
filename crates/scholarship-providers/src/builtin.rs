// crates/scholarship-providers/src/builtin.rs
// ============================================================================
// Module: Built-In Option Providers
// Description: Option lists available to every schema by name.
// Purpose: Provide common select lists without schema duplication.
// Dependencies: scholarship-core, time
// ============================================================================

//! ## Overview
//! `class_years` is a fixed list of student classifications. `academic_years`
//! lists the current academic year and the three that follow, computed from
//! the current date; academic years start in August.

// ============================================================================
// SECTION: Imports
// ============================================================================

use scholarship_core::OptionItem;
use scholarship_core::ProviderError;
use time::Date;
use time::Month;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Student classifications in progression order.
const CLASS_YEARS: &[&str] = &["Freshman", "Sophomore", "Junior", "Senior", "Graduate"];

/// Number of academic years listed, including the current one.
const ACADEMIC_YEAR_COUNT: i32 = 4;

// ============================================================================
// SECTION: Providers
// ============================================================================

/// Returns the student classification list.
///
/// # Errors
///
/// Never fails; the signature matches the provider contract.
pub fn class_years() -> Result<Vec<OptionItem>, ProviderError> {
    Ok(CLASS_YEARS.iter().map(|year| OptionItem::text(*year)).collect())
}

/// Returns the current and next three academic years, e.g. `2026-2027`.
///
/// # Errors
///
/// Never fails; the signature matches the provider contract.
pub fn academic_years() -> Result<Vec<OptionItem>, ProviderError> {
    Ok(academic_years_for(OffsetDateTime::now_utc().date()))
}

/// Returns the academic years starting with the one containing `today`.
#[must_use]
pub fn academic_years_for(today: Date) -> Vec<OptionItem> {
    let start = if today.month() >= Month::August { today.year() } else { today.year() - 1 };
    (start .. start + ACADEMIC_YEAR_COUNT)
        .map(|year| OptionItem::text(format!("{year}-{}", year + 1)))
        .collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
