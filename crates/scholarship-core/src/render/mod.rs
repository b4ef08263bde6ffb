// crates/scholarship-core/src/render/mod.rs
// ============================================================================
// Module: Field Renderer
// Description: Schema-driven HTML rendering of individual form fields.
// Purpose: Turn a FieldSpec plus current value into a Bootstrap grid block.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! [`FieldRenderer`] dispatches on [`FieldKind`] and produces one
//! self-contained block: label, optional help text, and the control, wrapped
//! in a `col-md-*` column. Fields wider than half the grid get an extra
//! `<div class="row">` wrapper.
//!
//! Schema-authored strings (labels, help text, option labels, extra
//! attributes) are trusted configuration and emitted verbatim. Current values
//! come from the request and are always HTML-escaped.
//!
//! Rendering never fails: a select field whose provider cannot be resolved
//! renders with an empty list and records a [`RenderDiagnostic`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use crate::core::FieldKind;
use crate::core::FieldSpec;
use crate::interfaces::OptionResolver;

// ============================================================================
// SECTION: Modules
// ============================================================================

mod attrs;
mod controls;
mod file;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Non-fatal problem encountered while rendering one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderDiagnostic {
    /// Field name.
    pub field: String,
    /// Problem description.
    pub message: String,
}

/// Rendered HTML for one field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedControl {
    /// HTML fragment.
    pub html: String,
    /// Problems recorded while rendering.
    pub diagnostics: Vec<RenderDiagnostic>,
}

impl fmt::Display for RenderedControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}

// ============================================================================
// SECTION: Renderer
// ============================================================================

/// Renders fields, resolving provider-backed option lists through a resolver.
pub struct FieldRenderer<'a> {
    /// Provider lookup for select fields.
    resolver: &'a dyn OptionResolver,
}

impl<'a> FieldRenderer<'a> {
    /// Creates a renderer bound to an option resolver.
    #[must_use]
    pub fn new(resolver: &'a dyn OptionResolver) -> Self {
        Self { resolver }
    }

    /// Renders `spec` with the given current value. A missing or blank value
    /// falls back to the field's default value.
    #[must_use]
    pub fn render(&self, spec: &FieldSpec, current: Option<&str>) -> RenderedControl {
        let current = current
            .filter(|value| !value.is_empty())
            .or(spec.default_value.as_deref())
            .filter(|value| !value.is_empty());
        let mut control = RenderedControl::default();
        let block = match spec.kind {
            FieldKind::Text
            | FieldKind::Email
            | FieldKind::Number
            | FieldKind::Tel
            | FieldKind::Date => controls::basic(spec, current),
            FieldKind::Select => {
                controls::select(spec, current, self.resolver, &mut control.diagnostics)
            }
            FieldKind::Textarea => controls::textarea(spec, current),
            FieldKind::File => {
                control.html = file::file_input(spec);
                return control;
            }
        };
        control.html = if spec.is_wide() {
            format!("<div class=\"row\">\n{block}</div>\n")
        } else {
            block
        };
        control
    }

    /// Renders every field in order, concatenating the HTML and diagnostics.
    #[must_use]
    pub fn render_all<'s, I>(&self, specs: I, current: impl Fn(&str) -> Option<String>) -> RenderedControl
    where
        I: IntoIterator<Item = &'s FieldSpec>,
    {
        let mut out = RenderedControl::default();
        for spec in specs {
            let value = current(spec.name.as_str());
            let control = self.render(spec, value.as_deref());
            out.html.push_str(&control.html);
            out.diagnostics.extend(control.diagnostics);
        }
        out
    }
}

/// Writes the label and optional help text shared by labelled controls.
fn label_and_help(out: &mut String, spec: &FieldSpec) {
    let name = spec.name.as_str();
    out.push_str(&format!(
        "    <label for=\"{name}\" class=\"form-label\">{}</label>\n",
        spec.label
    ));
    if let Some(help) = &spec.help_text {
        out.push_str(&format!(
            "    <p class=\"form-text\" id=\"form-text-{name}\">{help}</p>\n"
        ));
    }
}

/// Returns the `aria-describedby` attribute when help text exists.
fn described_by(spec: &FieldSpec) -> String {
    if spec.help_text.is_some() {
        format!(" aria-describedby=\"form-text-{}\"", spec.name)
    } else {
        String::new()
    }
}
