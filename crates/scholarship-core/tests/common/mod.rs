// crates/scholarship-core/tests/common/mod.rs
// ============================================================================
// Module: Core Test Helpers
// Description: Shared fixtures for scholarship core integration tests.
// ============================================================================

#![allow(
    dead_code,
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only helpers may panic and are not used by every test binary."
)]

use std::collections::BTreeMap;

use scholarship_core::FieldSpec;
use scholarship_core::FormSchema;
use scholarship_core::OptionItem;
use scholarship_core::OptionResolver;
use scholarship_core::ProviderError;
use serde_json::Value;

/// Option resolver backed by a fixed map.
#[derive(Default)]
pub struct MapResolver {
    pub lists: BTreeMap<String, Vec<OptionItem>>,
}

impl MapResolver {
    pub fn with(name: &str, items: Vec<OptionItem>) -> Self {
        let mut lists = BTreeMap::new();
        lists.insert(name.to_string(), items);
        Self { lists }
    }
}

impl OptionResolver for MapResolver {
    fn resolve(&self, name: &str) -> Result<Vec<OptionItem>, ProviderError> {
        self.lists.get(name).cloned().ok_or_else(|| ProviderError::Unknown(name.to_string()))
    }

    fn contains(&self, name: &str) -> bool {
        self.lists.contains_key(name)
    }
}

/// Parses one field spec from JSON.
pub fn field(value: &Value) -> FieldSpec {
    serde_json::from_value(value.clone()).expect("field spec")
}

/// Schema document resembling the production form.
pub const SAMPLE_SCHEMA: &str = r#"{
    "generalInfo": [
        {"name": "fname", "type": "text", "label": "first name", "required": true, "baseWidth": 6},
        {"name": "lname", "type": "text", "label": "last name", "required": true, "baseWidth": 6},
        {"name": "email", "type": "email", "label": "email", "required": true, "baseWidth": 12},
        {"name": "ucf_id", "type": "number", "label": "UCF ID", "required": true, "baseWidth": 6},
        {"name": "gpa", "type": "number", "label": "GPA", "required": true, "baseWidth": 6, "step": "0.01"},
        {"name": "class_year", "type": "select", "label": "class year", "options": "class_years", "baseWidth": 6},
        {"name": "statement", "type": "textarea", "label": "statement", "formText": "Tell us about yourself."}
    ],
    "fileInputs": [
        {"name": "resume", "label": "Resume", "baseWidth": 6, "accept": ".pdf,.docx"},
        {"name": "transcript", "label": "Transcript", "required": true, "isMulti": true}
    ]
}"#;

/// Parses the sample schema.
pub fn sample_schema() -> FormSchema {
    FormSchema::from_json(SAMPLE_SCHEMA).expect("sample schema")
}
