// crates/scholarship-web/src/pages.rs
// ============================================================================
// Module: Pages
// Description: Full HTML documents for the form and for error responses.
// Purpose: Frame rendered controls with header, alerts, and footer.
// Dependencies: scholarship-config, scholarship-core, axum
// ============================================================================

//! ## Overview
//! Pages are assembled from trusted configuration (site name, contact
//! details), trusted schema markup produced by the field renderer, and feed
//! data, which is escaped. Alert markup is authored by the application.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;

use axum::http::StatusCode;
use scholarship_config::SiteConfig;
use scholarship_core::Scholarship;
use scholarship_core::StatusMessage;
use scholarship_core::escape_html;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Form section of the page.
#[derive(Debug, Clone, Copy)]
pub struct FormBody<'a> {
    /// Rendered general-information controls.
    pub general_html: &'a str,
    /// Rendered file inputs, one entry per input.
    pub file_controls: &'a [String],
    /// Scholarships open for application.
    pub scholarships: &'a [Scholarship],
    /// Scholarship names to pre-check.
    pub selected: &'a [String],
}

/// Inputs for the form page.
#[derive(Debug, Clone, Copy)]
pub struct FormPage<'a> {
    /// Site identity and contacts.
    pub site: &'a SiteConfig,
    /// Alerts shown above the form.
    pub messages: &'a [StatusMessage],
    /// The form, or `None` once a submission has been stored.
    pub form: Option<FormBody<'a>>,
}

// ============================================================================
// SECTION: Form Page
// ============================================================================

/// Renders the complete form page.
#[must_use]
pub fn render_form_page(page: &FormPage<'_>) -> String {
    let site = page.site;
    let mut out = String::new();
    push_head(&mut out, &format!("Scholarships Form | {}", site.program_name));
    push_header(&mut out, site, "Scholarship Submission Form");
    out.push_str("        <main class=\"container mt-5 mb-4\">\n");
    for message in page.messages {
        let _ = write!(
            out,
            "            <div class=\"alert {}\" role=\"alert\">\n                <p class=\"alert-text\">{}</p>\n            </div>\n",
            message.kind.css_class(),
            message.html
        );
    }
    if let Some(form) = page.form {
        push_form(&mut out, &form);
    }
    out.push_str("        </main>\n");
    push_footer(&mut out, site);
    out.push_str("    </body>\n</html>\n");
    out
}

/// Writes the form element.
fn push_form(out: &mut String, form: &FormBody<'_>) {
    out.push_str(
        "            <form id=\"scholarshipForm\" method=\"post\" enctype=\"multipart/form-data\">\n                <h2>General Information</h2>\n",
    );
    out.push_str(form.general_html);
    out.push_str(
        "                <h2 class=\"mt-4\">Scholarships</h2>\n                <p class=\"form-text\">Select one or more scholarships you wish to apply for. Please ensure you qualify for the scholarship(s) before submitting your application.</p>\n",
    );
    if form.scholarships.is_empty() {
        out.push_str(
            "                <p class=\"form-text text-muted\"><em>No scholarships are open for application at this time.</em></p>\n",
        );
    } else {
        out.push_str(
            "                <table class=\"table table-responsive\" style=\"border-collapse: collapse; border: none;\">\n",
        );
        for scholarship in form.scholarships {
            push_scholarship_row(out, scholarship, form.selected.contains(&scholarship.name));
        }
        out.push_str("                </table>\n");
    }
    out.push_str(
        "                <h2 class=\"mt-4\">Supporting Documents &amp; Attachments</h2>\n                <p class=\"form-text\">Please attach any necessary documentation for the scholarship(s) you have chosen.</p>\n                <ul class=\"list-unstyled mb-3\">\n",
    );
    for control in form.file_controls {
        let _ = write!(out, "                    <li class=\"container\">\n{control}                    </li>\n");
    }
    out.push_str(
        "                </ul>\n                <p class=\"form-text\">If all the information you've entered is correct, please press \"Submit,\" below.</p>\n                <button type=\"submit\" name=\"submit\" class=\"btn btn-primary btn-lg\">Submit</button>\n                <button type=\"reset\" class=\"btn btn-primary btn-lg\">Reset</button>\n            </form>\n",
    );
}

/// Writes one scholarship checkbox row.
fn push_scholarship_row(out: &mut String, scholarship: &Scholarship, checked: bool) {
    let name = escape_html(&scholarship.name);
    let checked = if checked { " checked" } else { "" };
    let _ = write!(
        out,
        "                    <tr>\n                        <td>\n                            <div class=\"form-check\">\n                                <label class=\"form-check-label\">\n                                    <input class=\"form-check-input\" type=\"checkbox\" name=\"scholarships[]\" value=\"{name}\"{checked}>\n                                    {name}\n                                </label>\n                            </div>\n                        </td>\n                        <td>(Deadline: {})</td>\n                        <td><a href=\"{}\" class=\"btn btn-primary btn-sm\" target=\"_blank\" rel=\"noopener\">View Requirements</a></td>\n                    </tr>\n",
        scholarship.deadline_display(),
        escape_html(&scholarship.permalink)
    );
}

// ============================================================================
// SECTION: Error Page
// ============================================================================

/// Renders the error page titled `"{code} {reason}"`.
#[must_use]
pub fn render_error_page(site: &SiteConfig, status: StatusCode, message: &str) -> String {
    let title = format!("{} {}", status.as_u16(), status.canonical_reason().unwrap_or("Error"));
    let mut out = String::new();
    push_head(&mut out, &title);
    push_header(&mut out, site, &title);
    let support = escape_html(&site.support_email);
    let _ = write!(
        out,
        "        <main class=\"container mt-5 mb-4\">\n            <p class=\"h4\">{}</p>\n            <p>If this problem persists, please contact <a href=\"mailto:{support}\">{support}</a>.</p>\n        </main>\n",
        escape_html(message)
    );
    push_footer(&mut out, site);
    out.push_str("    </body>\n</html>\n");
    out
}

// ============================================================================
// SECTION: Shared Chrome
// ============================================================================

/// Writes the doctype and head.
fn push_head(out: &mut String, title: &str) {
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n    <head>\n        <title>{}</title>\n        <meta name=\"viewport\" content=\"width=device-width, initial-scale=1, shrink-to-fit=no\" />\n    </head>\n    <body>\n",
        escape_html(title)
    );
}

/// Writes the navigation bar and page heading.
fn push_header(out: &mut String, site: &SiteConfig, heading: &str) {
    let _ = write!(
        out,
        "        <header>\n            <nav class=\"navbar navbar-default bg-default mb-4\" role=\"navigation\">\n                <div class=\"container\">\n                    <a class=\"navbar-brand\" href=\"{}\">{}</a>\n                </div>\n            </nav>\n            <div class=\"container\">\n                <h1>{}</h1>\n            </div>\n        </header>\n",
        escape_html(&site.program_url),
        escape_html(&site.program_name),
        escape_html(heading)
    );
}

/// Writes the footer with contact details.
fn push_footer(out: &mut String, site: &SiteConfig) {
    out.push_str(
        "        <footer>\n            <div class=\"bg-default py-5\">\n                <div class=\"container\">\n                    <div class=\"row\">\n",
    );
    let _ = write!(
        out,
        "                        <div class=\"col-md-6\">\n                            <a class=\"text-inverse text-decoration-none h5\" href=\"{}\">{}</a>\n                        </div>\n                        <div class=\"col-md-6\">\n                            <p class=\"h5 heading-underline\">Contact Us</p>\n                            <table>\n",
        escape_html(&site.program_url),
        escape_html(&site.program_name)
    );
    let email = site.contact_email.trim();
    if !email.is_empty() {
        let email = escape_html(email);
        let _ = write!(
            out,
            "                                <tr>\n                                    <th class=\"pr-3 px-2\">Email: </th>\n                                    <td><a class=\"text-inverse text-decoration-none\" href=\"mailto:{email}\">{email}</a></td>\n                                </tr>\n"
        );
    }
    let phone = site.contact_phone.trim();
    if !phone.is_empty() {
        let dial: String = phone.chars().filter(|ch| ch.is_ascii_digit() || *ch == '+').collect();
        let _ = write!(
            out,
            "                                <tr>\n                                    <th class=\"pr-3 px-2\">Phone: </th>\n                                    <td><a class=\"text-inverse text-decoration-none\" href=\"tel:{dial}\">{}</a></td>\n                                </tr>\n",
            escape_html(phone)
        );
    }
    out.push_str(
        "                            </table>\n                        </div>\n                    </div>\n                </div>\n            </div>\n        </footer>\n",
    );
}

// ============================================================================
// SECTION: Tests
// ============================================================================
