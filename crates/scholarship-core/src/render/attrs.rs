// crates/scholarship-core/src/render/attrs.rs
// ============================================================================
// Module: Extra Attributes
// Description: Serialization of schema-supplied extra HTML attributes.
// Dependencies: serde_json
// ============================================================================

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;

use crate::core::escape_html;

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders extra attributes as ` key="value"` pairs in map order.
///
/// A `required` key collapses to the bare attribute when truthy and is dropped
/// when falsy or when `skip_required` is set. Null values are dropped, and
/// arrays or objects are emitted as escaped compact JSON.
pub(super) fn render_attributes(attributes: &Map<String, Value>, skip_required: bool) -> String {
    let mut out = String::new();
    for (key, value) in attributes {
        if key == "required" {
            if is_truthy(value) && !skip_required {
                out.push_str(" required");
            }
            continue;
        }
        let rendered = match value {
            Value::Null => continue,
            Value::String(text) => text.clone(),
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            Value::Array(_) | Value::Object(_) => escape_html(&value.to_string()),
        };
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&rendered);
        out.push('"');
    }
    out
}

/// Loose truthiness used for boolean-like attribute values.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !matches!(text.trim(), "" | "0" | "false"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
