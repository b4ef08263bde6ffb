// crates/scholarship-core/tests/schema_validation.rs
// ============================================================================
// Module: Form Schema Validation Tests
// Description: Parsing and fail-closed validation of the form schema.
// ============================================================================
//! ## Overview
//! Ensures schema documents parse with their aliases and that structural
//! violations are rejected before the server starts.

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
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use scholarship_core::FieldKind;
use scholarship_core::FormSchema;
use scholarship_core::OptionSource;
use scholarship_core::SchemaError;
use serde_json::json;

use crate::common::sample_schema;

fn schema_error(general: serde_json::Value, files: serde_json::Value) -> String {
    let doc = json!({"generalInfo": general, "fileInputs": files}).to_string();
    match FormSchema::from_json(&doc) {
        Err(SchemaError::Invalid(message) | SchemaError::Parse(message)) => message,
        Err(other) => other.to_string(),
        Ok(_) => panic!("schema unexpectedly valid"),
    }
}

#[test]
fn sample_schema_parses_aliases_and_extras() {
    let schema = sample_schema();
    assert_eq!(schema.general_info.len(), 7);
    assert_eq!(schema.file_inputs.len(), 2);

    let gpa = schema.field("gpa").unwrap();
    assert_eq!(gpa.kind, FieldKind::Number);
    assert_eq!(gpa.layout_width, 6);
    assert_eq!(gpa.attributes.get("step"), Some(&json!("0.01")));
    assert!(!gpa.attributes.contains_key("baseWidth"));

    let statement = schema.field("statement").unwrap();
    assert_eq!(statement.layout_width, 12);
    assert_eq!(statement.help_text.as_deref(), Some("Tell us about yourself."));

    let class_year = schema.field("class_year").unwrap();
    assert_eq!(class_year.options, Some(OptionSource::Provider("class_years".to_string())));
}

#[test]
fn extra_attributes_keep_document_order() {
    let doc = r#"{
        "generalInfo": [
            {"name": "phone", "label": "Phone", "placeholder": "555-0100", "maxlength": 12, "autocomplete": "tel"}
        ],
        "fileInputs": []
    }"#;
    let schema = FormSchema::from_json(doc).unwrap();
    let keys: Vec<&str> = schema.field("phone").unwrap().attributes.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["placeholder", "maxlength", "autocomplete"]);
}

#[test]
fn file_inputs_default_to_file_kind() {
    let schema = sample_schema();
    assert!(schema.file_inputs.iter().all(|spec| spec.kind == FieldKind::File));
    let transcript = schema.field("transcript").unwrap();
    assert!(transcript.is_multi);
    assert!(transcript.required);
}

#[test]
fn general_field_names_follow_schema_order() {
    let names: Vec<String> =
        sample_schema().general_field_names().into_iter().map(String::from).collect();
    assert_eq!(names, vec!["fname", "lname", "email", "ucf_id", "gpa", "class_year", "statement"]);
}

#[test]
fn duplicate_names_are_rejected() {
    let message = schema_error(
        json!([{"name": "resume", "label": "A"}]),
        json!([{"name": "resume", "label": "B"}]),
    );
    assert!(message.contains("duplicate"), "{message}");
}

#[test]
fn layout_width_must_fit_grid() {
    assert!(schema_error(json!([{"name": "a", "label": "A", "layoutWidth": 0}]), json!([])).contains("layout width"));
    assert!(schema_error(json!([{"name": "a", "label": "A", "layoutWidth": 13}]), json!([])).contains("layout width"));
}

#[test]
fn select_requires_non_empty_options() {
    assert!(schema_error(json!([{"name": "a", "type": "select", "label": "A"}]), json!([])).contains("no options"));
    assert!(schema_error(json!([{"name": "a", "type": "select", "label": "A", "options": []}]), json!([])).contains("empty option list"));
    assert!(
        schema_error(json!([{"name": "a", "type": "select", "label": "A", "options": ["no-default"]}]), json!([]))
            .contains("empty option list")
    );
}

#[test]
fn file_fields_are_kept_in_their_section() {
    assert!(schema_error(json!([{"name": "a", "type": "file", "label": "A"}]), json!([])).contains("cannot be a file"));
    assert!(schema_error(json!([]), json!([{"name": "a", "type": "text", "label": "A"}])).contains("must have type file"));
    assert!(schema_error(json!([]), json!([{"name": "a", "label": "A", "defaultValue": "x"}])).contains("default value"));
}

#[test]
fn at_most_five_file_inputs() {
    let files: Vec<_> = (0 .. 6).map(|i| json!({"name": format!("doc{i}"), "label": "Doc"})).collect();
    assert!(schema_error(json!([]), json!(files)).contains("at most 5"));
}

#[test]
fn reserved_and_unsafe_names_are_rejected() {
    for name in ["guid", "Scholarships", "submitted", "filename0", "content4", "size12"] {
        let message = schema_error(json!([{"name": name, "label": "A"}]), json!([]));
        assert!(message.contains("reserved"), "{name}: {message}");
    }
    let message = schema_error(json!([{"name": "first name", "label": "A"}]), json!([]));
    assert!(message.contains("invalid field name"), "{message}");
    assert!(FormSchema::from_json(r#"{"generalInfo": [{"name": "sizeable", "label": "A"}]}"#).is_ok());
}

#[test]
fn oversized_schema_file_is_rejected() {
    let dir = std::env::temp_dir().join(format!("scholarship-schema-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("big.json");
    std::fs::write(&path, vec![b' '; scholarship_core::MAX_SCHEMA_BYTES + 1]).unwrap();
    assert!(matches!(FormSchema::load(&path), Err(SchemaError::TooLarge { .. })));
    std::fs::remove_dir_all(&dir).unwrap();
}
