// crates/scholarship-core/src/render/file.rs
// ============================================================================
// Module: File Inputs
// Description: Custom-file upload control block.
// Dependencies: crate::core
// ============================================================================

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::FieldSpec;

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders a file input. File inputs never carry a value.
///
/// Help text is rendered beneath the label paragraph and referenced through
/// `aria-describedby`, matching the other controls.
pub(super) fn file_input(spec: &FieldSpec) -> String {
    let name = spec.name.as_str();
    let wide = spec.is_wide();
    let indent = if wide { "    " } else { "" };
    let mut out = format!("<p class=\"form-text\">{}</p>\n", spec.label);
    if let Some(help) = &spec.help_text {
        out.push_str(&format!("<p class=\"form-text text-muted\" id=\"form-text-{name}\">{help}</p>\n"));
    }
    if wide {
        out.push_str("<div class=\"row mb-3\">\n");
    }
    out.push_str(&format!("{indent}<div class=\"col-md-{} form-group\">\n", spec.column_width()));
    out.push_str(&format!("{indent}    <label class=\"custom-file\">\n"));
    out.push_str(&format!(
        "{indent}        <input type=\"file\" id=\"{name}\" name=\"{name}\" class=\"custom-file-input\""
    ));
    if let Some(accept) = &spec.accept {
        out.push_str(&format!(" accept=\"{accept}\""));
    }
    if spec.is_multi {
        out.push_str(" multiple");
    }
    if spec.help_text.is_some() {
        out.push_str(&format!(" aria-describedby=\"form-text-{name}\""));
    }
    if spec.required {
        out.push_str(" required");
    }
    out.push_str(">\n");
    out.push_str(&format!(
        "{indent}        <span class=\"custom-file-control\" data-after=\"Choose file...\"></span>\n"
    ));
    out.push_str(&format!("{indent}    </label>\n{indent}</div>\n"));
    if wide {
        out.push_str("</div>\n");
    }
    out
}
