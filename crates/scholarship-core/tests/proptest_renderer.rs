//! Field renderer property-based tests.
//!
//! ## What is covered
//! - Grid wrapping depends only on layout width.
//! - Select fields mark at most one option as selected.
// crates/scholarship-core/tests/proptest_renderer.rs
// ============================================================================
// Module: Field Renderer Property-Based Tests
// Description: Randomized checks of renderer layout and selection rules.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

mod common;

use proptest::prelude::*;
use scholarship_core::FieldRenderer;
use serde_json::json;

use crate::common::MapResolver;
use crate::common::field;

fn kind_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("text"),
        Just("email"),
        Just("number"),
        Just("tel"),
        Just("date"),
        Just("select"),
        Just("textarea"),
        Just("file"),
    ]
}

proptest! {
    #[test]
    fn row_wrapper_tracks_layout_width(width in 1u8 ..= 12, kind in kind_strategy()) {
        let resolver = MapResolver::default();
        let renderer = FieldRenderer::new(&resolver);
        let spec = field(&json!({
            "name": "field_x",
            "type": kind,
            "label": "Label",
            "layoutWidth": width,
            "options": if kind == "select" { json!(["a", "b"]) } else { json!(null) }
        }));
        let html = renderer.render(&spec, None).html;
        let wrapped = html.contains("class=\"row") ;
        prop_assert_eq!(wrapped, width > 6);
    }

    #[test]
    fn select_marks_at_most_one_option(
        values in prop::collection::vec("[a-z]{1,4}", 1 .. 8),
        pick in any::<prop::sample::Index>(),
        miss in "[0-9]{1,3}",
    ) {
        let resolver = MapResolver::default();
        let renderer = FieldRenderer::new(&resolver);
        let spec = field(&json!({
            "name": "choice",
            "type": "select",
            "label": "Choice",
            "baseWidth": 6,
            "options": values.clone()
        }));
        let chosen = pick.get(&values).clone();
        let html = renderer.render(&spec, Some(&chosen)).html;
        prop_assert_eq!(html.matches(" selected>").count(), 1);
        let selected = format!("<option value=\"{chosen}\" selected>");
        prop_assert!(html.contains(&selected));

        let html = renderer.render(&spec, Some(&miss)).html;
        prop_assert_eq!(html.matches(" selected>").count(), 0);
    }
}
