// crates/scholarship-core/src/render/controls.rs
// ============================================================================
// Module: Labelled Controls
// Description: Input, select, and textarea blocks.
// Purpose: Emit the column block for every non-file field kind.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;

use super::RenderDiagnostic;
use super::attrs::render_attributes;
use super::described_by;
use super::label_and_help;
use crate::core::FieldSpec;
use crate::core::OptionSource;
use crate::core::ResolvedOptions;
use crate::core::escape_html;
use crate::interfaces::OptionResolver;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default textarea height.
const TEXTAREA_ROWS: u32 = 5;

/// Default textarea width.
const TEXTAREA_COLS: u32 = 125;

/// Placeholder option emitted ahead of select options.
const SELECT_PLACEHOLDER: &str = "<option value=\"\">-- Please Select --</option>";

// ============================================================================
// SECTION: Controls
// ============================================================================

/// Renders a single-line input block.
pub(super) fn basic(spec: &FieldSpec, current: Option<&str>) -> String {
    let name = spec.name.as_str();
    let mut out = open_column(spec.column_width(), " pe-2");
    label_and_help(&mut out, spec);
    out.push_str(&format!(
        "    <input type=\"{}\" id=\"{name}\" name=\"{name}\" class=\"form-control\"",
        spec.kind.input_type()
    ));
    if let Some(value) = current {
        out.push_str(&format!(" value=\"{}\"", escape_html(value)));
    }
    out.push_str(&render_attributes(&spec.attributes, spec.required));
    out.push_str(&described_by(spec));
    if spec.required {
        out.push_str(" required");
    }
    out.push_str(">\n</div>\n");
    out
}

/// Renders a drop-down select block.
pub(super) fn select(
    spec: &FieldSpec,
    current: Option<&str>,
    resolver: &dyn OptionResolver,
    diagnostics: &mut Vec<RenderDiagnostic>,
) -> String {
    let name = spec.name.as_str();
    let options = resolve_options(spec, resolver, diagnostics);
    let mut out = open_column(spec.column_width(), " pe-2");
    label_and_help(&mut out, spec);
    out.push_str(&format!("    <select id=\"{name}\" name=\"{name}\" class=\"form-control\""));
    out.push_str(&render_attributes(&spec.attributes, spec.required));
    out.push_str(&described_by(spec));
    if spec.required {
        out.push_str(" required");
    }
    out.push_str(">\n");
    if options.show_placeholder {
        out.push_str(&format!("        {SELECT_PLACEHOLDER}\n"));
    }
    let mut selected_emitted = false;
    for item in &options.items {
        let value = item.value();
        let selected = !selected_emitted && current == Some(value.as_str());
        selected_emitted |= selected;
        out.push_str(&format!(
            "        <option value=\"{}\"{}>{}</option>\n",
            escape_html(&value),
            if selected { " selected" } else { "" },
            item.label()
        ));
    }
    out.push_str("    </select>\n</div>\n");
    out
}

/// Renders a multi-line textarea block.
pub(super) fn textarea(spec: &FieldSpec, current: Option<&str>) -> String {
    let name = spec.name.as_str();
    let mut attributes: Map<String, Value> = spec.attributes.clone();
    attributes.entry("rows".to_string()).or_insert_with(|| Value::from(TEXTAREA_ROWS));
    attributes.entry("cols".to_string()).or_insert_with(|| Value::from(TEXTAREA_COLS));
    let mut out = open_column(spec.layout_width, "");
    label_and_help(&mut out, spec);
    out.push_str(&format!("    <textarea id=\"{name}\" name=\"{name}\" class=\"form-control\""));
    out.push_str(&render_attributes(&attributes, spec.required));
    out.push_str(&described_by(spec));
    if spec.required {
        out.push_str(" required");
    }
    out.push('>');
    if let Some(value) = current {
        out.push_str(&escape_html(value));
    }
    out.push_str("</textarea>\n</div>\n");
    out
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Opens the grid column wrapper.
fn open_column(width: u8, extra_class: &str) -> String {
    format!("<div class=\"form-group col-md-{width} mb-3{extra_class}\">\n")
}

/// Resolves a select field's options, recording provider failures.
fn resolve_options(
    spec: &FieldSpec,
    resolver: &dyn OptionResolver,
    diagnostics: &mut Vec<RenderDiagnostic>,
) -> ResolvedOptions {
    match &spec.options {
        None => ResolvedOptions { items: Vec::new(), show_placeholder: true },
        Some(OptionSource::Static(items)) => ResolvedOptions::from_items(items.clone()),
        Some(OptionSource::Provider(provider)) => match resolver.resolve(provider) {
            Ok(items) => ResolvedOptions::from_items(items),
            Err(err) => {
                diagnostics.push(RenderDiagnostic {
                    field: spec.name.to_string(),
                    message: err.to_string(),
                });
                ResolvedOptions { items: Vec::new(), show_placeholder: true }
            }
        },
    }
}
