// crates/scholarship-core/src/core/escape.rs
// ============================================================================
// Module: HTML Escaping
// Description: HTML entity encoding and submitted-value scrubbing.
// Purpose: Neutralize request-derived strings before display or storage.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Request-derived text is untrusted. [`scrub`] trims and entity-encodes
//! submitted strings before they are stored; [`escape_html`] encodes values
//! that are echoed back into rendered markup. [`unescape_html`] recovers the
//! plain text of a scrubbed value for non-HTML sinks such as mail headers.
//! Database writes always bind parameters, so no SQL escaping happens here.

// ============================================================================
// SECTION: Escaping
// ============================================================================

/// Encodes the five HTML-significant characters as entities.
#[must_use]
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// Prepares a submitted string for storage: trimmed and HTML-entity encoded.
#[must_use]
pub fn scrub(value: &str) -> String {
    escape_html(value.trim())
}

/// Entities produced by [`escape_html`], paired with their characters.
const ENTITIES: [(&str, char); 5] =
    [("&amp;", '&'), ("&lt;", '<'), ("&gt;", '>'), ("&quot;", '"'), ("&#039;", '\'')];

/// Decodes the entities produced by [`escape_html`] in a single pass.
/// Other `&` sequences are kept verbatim.
#[must_use]
pub fn unescape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(index) = rest.find('&') {
        out.push_str(&rest[.. index]);
        rest = &rest[index ..];
        match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
            Some((entity, ch)) => {
                out.push(*ch);
                rest = &rest[entity.len() ..];
            }
            None => {
                out.push('&');
                rest = &rest[1 ..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Returns true when the value parses as a finite number.
#[must_use]
pub fn is_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().is_ok_and(f64::is_finite)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::escape_html;
    use super::is_numeric;
    use super::scrub;
    use super::unescape_html;

    #[test]
    fn escape_html_encodes_markup() {
        assert_eq!(escape_html(r#"<a href="x">O'Neil & co</a>"#), "&lt;a href=&quot;x&quot;&gt;O&#039;Neil &amp; co&lt;/a&gt;");
    }

    #[test]
    fn scrub_trims_before_encoding() {
        assert_eq!(scrub("  Ada <Lovelace>  "), "Ada &lt;Lovelace&gt;");
    }

    #[test]
    fn unescape_html_reverses_scrub_in_one_pass() {
        for raw in ["O'Neil", "a < b & \"c\"", "&amp; literal", "plain", "&#x27; &unknown"] {
            assert_eq!(unescape_html(&escape_html(raw)), raw);
        }
        assert_eq!(unescape_html("Tom &amp; Jerry &copy"), "Tom & Jerry &copy");
    }

    #[test]
    fn is_numeric_matches_plain_numbers_only() {
        assert!(is_numeric("3.85"));
        assert!(is_numeric(" 2027 "));
        assert!(!is_numeric(""));
        assert!(!is_numeric("inf"));
        assert!(!is_numeric("NaN"));
        assert!(!is_numeric("12 monkeys"));
    }
}
