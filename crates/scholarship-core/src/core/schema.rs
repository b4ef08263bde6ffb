// crates/scholarship-core/src/core/schema.rs
// ============================================================================
// Module: Form Schema
// Description: JSON form schema model, option lists, and schema validation.
// Purpose: Describe every form field once and reject inconsistent schemas.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`FormSchema`] is the static JSON document describing the general-info
//! fields and the file inputs of the form. Each entry is a [`FieldSpec`].
//! Keys the model does not recognize are kept, in document order, as extra HTML
//! attributes for the rendered control.
//!
//! Validation is fail-closed: field names must be unique SQL identifiers that
//! do not collide with the fixed record columns, layout widths must fit the
//! 12-column grid, select fields need options, and file inputs are limited to
//! the fixed number of attachment slots.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::core::identifiers::FieldName;
use crate::core::identifiers::MAX_FILE_SLOTS;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum schema document size in bytes.
pub const MAX_SCHEMA_BYTES: usize = 1024 * 1024;

/// Widest layout width in grid units.
pub const MAX_LAYOUT_WIDTH: u8 = 12;

/// Static option entry that suppresses the placeholder option.
pub const NO_DEFAULT_MARKER: &str = "no-default";

/// Column names owned by the submission record itself.
const RESERVED_NAMES: &[&str] = &["guid", "scholarships", "submitted", "submit"];

/// Column prefixes owned by the file slots.
const RESERVED_SLOT_PREFIXES: &[&str] = &["filename", "size", "filetype", "content"];

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Schema loading and validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Schema file could not be read.
    #[error("schema io error: {0}")]
    Io(String),
    /// Schema document exceeds the size limit.
    #[error("schema exceeds size limit ({actual} > {limit} bytes)")]
    TooLarge {
        /// Observed document size.
        actual: usize,
        /// Maximum allowed size.
        limit: usize,
    },
    /// Schema document is not valid JSON for the model.
    #[error("schema parse error: {0}")]
    Parse(String),
    /// Schema document violates a structural rule.
    #[error("invalid schema: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Field Kind
// ============================================================================

/// Control kind rendered for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Single-line text input.
    #[default]
    Text,
    /// Email input.
    Email,
    /// Numeric input.
    Number,
    /// Telephone input.
    Tel,
    /// Date input.
    Date,
    /// Drop-down select.
    Select,
    /// Multi-line text area.
    Textarea,
    /// File attachment input.
    File,
}

impl FieldKind {
    /// Returns the HTML `type` attribute for input-based kinds.
    #[must_use]
    pub const fn input_type(self) -> &'static str {
        match self {
            Self::Text | Self::Select | Self::Textarea => "text",
            Self::Email => "email",
            Self::Number => "number",
            Self::Tel => "tel",
            Self::Date => "date",
            Self::File => "file",
        }
    }

    /// Returns the lowercase schema name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Number => "number",
            Self::Tel => "tel",
            Self::Date => "date",
            Self::Select => "select",
            Self::Textarea => "textarea",
            Self::File => "file",
        }
    }
}

// ============================================================================
// SECTION: Options
// ============================================================================

/// Scalar JSON value usable as an option value.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    /// Text value.
    Text(String),
    /// Numeric value, rendered in JSON form.
    Number(serde_json::Number),
    /// Boolean value.
    Bool(bool),
}

impl ScalarValue {
    /// Converts a JSON value into a scalar, rejecting null and containers.
    fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Self::Text(text)),
            Value::Number(number) => Some(Self::Number(number)),
            Value::Bool(flag) => Some(Self::Bool(flag)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Returns the attribute-ready string form.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(number) => number.to_string(),
            Self::Bool(flag) => flag.to_string(),
        }
    }
}

/// One entry of a select field's option list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum OptionItem {
    /// Scalar entry used as both label and value.
    Scalar(ScalarValue),
    /// Explicit label mapped to a value.
    Labeled {
        /// Display label.
        label: String,
        /// Submitted value.
        value: ScalarValue,
    },
}

impl OptionItem {
    /// Builds a text entry used as both label and value.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Scalar(ScalarValue::Text(value.into()))
    }

    /// Builds an entry with an explicit label.
    #[must_use]
    pub fn labeled(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Labeled { label: label.into(), value: ScalarValue::Text(value.into()) }
    }

    /// Returns the submitted value.
    #[must_use]
    pub fn value(&self) -> String {
        match self {
            Self::Scalar(value) | Self::Labeled { value, .. } => value.render(),
        }
    }

    /// Returns the display label; text labels get an upper-case first letter.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Scalar(ScalarValue::Text(text)) | Self::Labeled { label: text, .. } => {
                upper_first(text)
            }
            Self::Scalar(other) => other.render(),
        }
    }

    /// Returns true for the placeholder-suppression marker entry.
    #[must_use]
    pub fn is_no_default(&self) -> bool {
        matches!(self, Self::Scalar(ScalarValue::Text(text)) if text == NO_DEFAULT_MARKER)
    }
}

impl TryFrom<Value> for OptionItem {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => {
                if map.len() != 1 {
                    return Err("option object must have exactly one key".to_string());
                }
                let Some((label, value)) = map.into_iter().next() else {
                    return Err("option object must have exactly one key".to_string());
                };
                let value = ScalarValue::from_json(value)
                    .ok_or_else(|| format!("option {label} must map to a scalar"))?;
                Ok(Self::Labeled { label, value })
            }
            other => ScalarValue::from_json(other)
                .map(Self::Scalar)
                .ok_or_else(|| "option entry must be a scalar or single-key object".to_string()),
        }
    }
}

/// Option source for a select field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OptionSource {
    /// Static list authored in the schema.
    Static(Vec<OptionItem>),
    /// Name of a registered option provider.
    Provider(String),
}

/// Option list ready for rendering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedOptions {
    /// Renderable entries in order, marker entries removed.
    pub items: Vec<OptionItem>,
    /// Whether the `-- Please Select --` placeholder is emitted.
    pub show_placeholder: bool,
}

impl ResolvedOptions {
    /// Resolves a raw entry list; a leading marker entry suppresses the
    /// placeholder and marker entries are never rendered.
    #[must_use]
    pub fn from_items(items: Vec<OptionItem>) -> Self {
        let show_placeholder = !items.first().is_some_and(OptionItem::is_no_default);
        let items = items.into_iter().filter(|item| !item.is_no_default()).collect();
        Self { items, show_placeholder }
    }
}

/// Upper-cases the first character of a label.
fn upper_first(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
}

// ============================================================================
// SECTION: Field Spec
// ============================================================================

/// Schema description of one form field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    /// Unique field name; also the table column name.
    pub name: FieldName,
    /// Control kind.
    #[serde(rename = "type", default)]
    pub kind: FieldKind,
    /// Display label.
    pub label: String,
    /// Whether a value must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Value used when the request carries none.
    #[serde(default)]
    pub default_value: Option<String>,
    /// Help text shown beneath the label.
    #[serde(default, alias = "formText")]
    pub help_text: Option<String>,
    /// Option source for select fields.
    #[serde(default)]
    pub options: Option<OptionSource>,
    /// Grid width in columns (1-12).
    #[serde(default = "default_layout_width", alias = "baseWidth")]
    pub layout_width: u8,
    /// File inputs only: accept multiple files.
    #[serde(default)]
    pub is_multi: bool,
    /// File inputs only: accepted MIME types or extensions.
    #[serde(default)]
    pub accept: Option<String>,
    /// Remaining keys, emitted as extra HTML attributes in document order.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Default layout width when the schema omits one.
const fn default_layout_width() -> u8 {
    MAX_LAYOUT_WIDTH
}

impl FieldSpec {
    /// Returns true when the rendered block needs its own row container.
    #[must_use]
    pub const fn is_wide(&self) -> bool {
        self.layout_width > MAX_LAYOUT_WIDTH / 2
    }

    /// Returns the column width used inside the grid.
    #[must_use]
    pub const fn column_width(&self) -> u8 {
        if self.is_wide() { self.layout_width / 2 } else { self.layout_width }
    }

    /// Checks per-field rules independent of the field's position.
    fn validate(&self) -> Result<(), SchemaError> {
        let name = self.name.as_str();
        if self.label.trim().is_empty() {
            return Err(invalid(format!("field {name} has an empty label")));
        }
        if self.layout_width == 0 || self.layout_width > MAX_LAYOUT_WIDTH {
            return Err(invalid(format!(
                "field {name} layout width {} outside 1..={MAX_LAYOUT_WIDTH}",
                self.layout_width
            )));
        }
        if is_reserved_name(name) {
            return Err(invalid(format!("field name {name} is reserved")));
        }
        match self.kind {
            FieldKind::Select => match &self.options {
                None => return Err(invalid(format!("select field {name} has no options"))),
                Some(OptionSource::Static(items))
                    if items.iter().all(OptionItem::is_no_default) =>
                {
                    return Err(invalid(format!("select field {name} has an empty option list")));
                }
                Some(OptionSource::Provider(provider)) if provider.trim().is_empty() => {
                    return Err(invalid(format!("select field {name} names an empty provider")));
                }
                Some(_) => {}
            },
            FieldKind::File => {
                if self.default_value.is_some() {
                    return Err(invalid(format!("file field {name} cannot have a default value")));
                }
                if self.options.is_some() {
                    return Err(invalid(format!("file field {name} cannot have options")));
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Returns true when `name` collides with a record-owned column.
fn is_reserved_name(name: &str) -> bool {
    let lowered = name.to_ascii_lowercase();
    if RESERVED_NAMES.contains(&lowered.as_str()) {
        return true;
    }
    RESERVED_SLOT_PREFIXES.iter().any(|prefix| {
        lowered
            .strip_prefix(prefix)
            .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
    })
}

/// Builds an [`SchemaError::Invalid`] value.
fn invalid(message: String) -> SchemaError {
    SchemaError::Invalid(message)
}

// ============================================================================
// SECTION: Form Schema
// ============================================================================

/// Wire form of the schema document before file-kind defaulting.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFormSchema {
    /// General-info field entries.
    #[serde(default)]
    general_info: Vec<FieldSpec>,
    /// File-input entries as raw JSON objects.
    #[serde(default)]
    file_inputs: Vec<Value>,
}

/// Static schema document: general-info fields and file inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSchema {
    /// General-info fields in render order.
    pub general_info: Vec<FieldSpec>,
    /// File inputs in slot order.
    pub file_inputs: Vec<FieldSpec>,
}

impl FormSchema {
    /// Loads and validates a schema file.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when the file is unreadable, oversized, not
    /// UTF-8 JSON, or fails validation.
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let bytes = fs::read(path).map_err(|err| SchemaError::Io(err.to_string()))?;
        if bytes.len() > MAX_SCHEMA_BYTES {
            return Err(SchemaError::TooLarge { actual: bytes.len(), limit: MAX_SCHEMA_BYTES });
        }
        let text = std::str::from_utf8(&bytes)
            .map_err(|_| SchemaError::Parse("schema must be utf-8".to_string()))?;
        Self::from_json(text)
    }

    /// Parses and validates a schema document.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when the document is malformed or invalid.
    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        let raw: RawFormSchema =
            serde_json::from_str(text).map_err(|err| SchemaError::Parse(err.to_string()))?;
        let mut file_inputs = Vec::with_capacity(raw.file_inputs.len());
        for mut entry in raw.file_inputs {
            if let Value::Object(map) = &mut entry {
                map.entry("type").or_insert_with(|| Value::String("file".to_string()));
            }
            let spec: FieldSpec =
                serde_json::from_value(entry).map_err(|err| SchemaError::Parse(err.to_string()))?;
            file_inputs.push(spec);
        }
        let schema = Self { general_info: raw.general_info, file_inputs };
        schema.validate()?;
        Ok(schema)
    }

    /// Validates cross-field schema invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Invalid`] describing the first violation.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.file_inputs.len() > MAX_FILE_SLOTS {
            return Err(invalid(format!(
                "schema declares {} file inputs; at most {MAX_FILE_SLOTS} are supported",
                self.file_inputs.len()
            )));
        }
        let mut seen = BTreeSet::new();
        for spec in self.fields() {
            if !seen.insert(spec.name.as_str().to_ascii_lowercase()) {
                return Err(invalid(format!("duplicate field name {}", spec.name)));
            }
            spec.validate()?;
        }
        if let Some(spec) = self.general_info.iter().find(|spec| spec.kind == FieldKind::File) {
            return Err(invalid(format!("general field {} cannot be a file input", spec.name)));
        }
        if let Some(spec) = self.file_inputs.iter().find(|spec| spec.kind != FieldKind::File) {
            return Err(invalid(format!("file input {} must have type file", spec.name)));
        }
        Ok(())
    }

    /// Iterates every field, general info first.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.general_info.iter().chain(self.file_inputs.iter())
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields().find(|spec| spec.name.as_str() == name)
    }

    /// Returns the general-info field names in schema order.
    #[must_use]
    pub fn general_field_names(&self) -> Vec<FieldName> {
        self.general_info.iter().map(|spec| spec.name.clone()).collect()
    }

    /// Returns the names of select fields backed by a provider.
    #[must_use]
    pub fn provider_references(&self) -> Vec<(&FieldName, &str)> {
        self.general_info
            .iter()
            .filter_map(|spec| match &spec.options {
                Some(OptionSource::Provider(name)) => Some((&spec.name, name.as_str())),
                _ => None,
            })
            .collect()
    }
}
