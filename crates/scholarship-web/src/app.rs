// crates/scholarship-web/src/app.rs
// ============================================================================
// Module: Form Application
// Description: Shared request-handling state and synchronous handlers.
// Purpose: Keep page, submission, and download logic independent of axum.
// Dependencies: scholarship-core, scholarship-config, scholarship-mail
// ============================================================================

//! ## Overview
//! [`FormApp`] is built once at startup and shared behind an `Arc`. All of
//! its methods block (store, feed, and mail I/O); the server runs them on the
//! blocking pool.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;
use scholarship_config::SiteConfig;
use scholarship_core::FieldRenderer;
use scholarship_core::FormSchema;
use scholarship_core::Notifier;
use scholarship_core::OptionResolver;
use scholarship_core::RawSubmission;
use scholarship_core::RenderDiagnostic;
use scholarship_core::ScholarshipFeed;
use scholarship_core::SubmissionStore;
use scholarship_mail::EmailComposer;

use crate::audit::ErrorLogger;
use crate::audit::LogKind;
use crate::download::DownloadRequest;
use crate::download::fetch;
use crate::download::file_response;
use crate::pages::FormBody;
use crate::pages::FormPage;
use crate::pages::render_error_page;
use crate::pages::render_form_page;
use crate::pipeline::SubmissionOutcome;
use crate::pipeline::SubmissionPipeline;

// ============================================================================
// SECTION: Construction
// ============================================================================

/// Components the application is assembled from.
pub struct FormAppParts {
    /// Validated form schema.
    pub schema: FormSchema,
    /// Option providers for select fields.
    pub options: Arc<dyn OptionResolver>,
    /// Source of open scholarships.
    pub feed: Arc<dyn ScholarshipFeed>,
    /// Submission store.
    pub store: Arc<dyn SubmissionStore>,
    /// Confirmation email delivery.
    pub notifier: Arc<dyn Notifier>,
    /// Confirmation email composition.
    pub composer: EmailComposer,
    /// Site identity and contacts.
    pub site: SiteConfig,
    /// Error log.
    pub log: ErrorLogger,
}

/// Request-handling state shared by every route.
pub struct FormApp {
    /// Form schema.
    schema: Arc<FormSchema>,
    /// Option providers.
    options: Arc<dyn OptionResolver>,
    /// Scholarship feed.
    feed: Arc<dyn ScholarshipFeed>,
    /// Submission store (also read by downloads).
    store: Arc<dyn SubmissionStore>,
    /// Submission handler.
    pipeline: SubmissionPipeline,
    /// Site identity and contacts.
    site: SiteConfig,
    /// Error log.
    log: ErrorLogger,
}

impl FormApp {
    /// Assembles the application.
    #[must_use]
    pub fn new(parts: FormAppParts) -> Self {
        let schema = Arc::new(parts.schema);
        let pipeline = SubmissionPipeline::new(
            Arc::clone(&schema),
            Arc::clone(&parts.store),
            parts.notifier,
            parts.composer,
            parts.log.clone(),
            parts.site.support_email.clone(),
        );
        Self {
            schema,
            options: parts.options,
            feed: parts.feed,
            store: parts.store,
            pipeline,
            site: parts.site,
            log: parts.log,
        }
    }

    /// Returns the form schema.
    #[must_use]
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Returns the error logger.
    #[must_use]
    pub const fn log(&self) -> &ErrorLogger {
        &self.log
    }

    /// Renders the form page, optionally after a submission attempt.
    #[must_use]
    pub fn form_page(&self, outcome: Option<&SubmissionOutcome>) -> String {
        let messages = outcome.map_or(&[][..], |outcome| outcome.messages.as_slice());
        if !outcome.is_none_or(SubmissionOutcome::show_form) {
            return render_form_page(&FormPage { site: &self.site, messages, form: None });
        }

        let scholarships = self.feed.open_scholarships().unwrap_or_else(|err| {
            self.log.emit("feed_unavailable", LogKind::Feed, None, err.to_string());
            Vec::new()
        });
        let renderer = FieldRenderer::new(self.options.as_ref());
        let general = renderer.render_all(&self.schema.general_info, |name| {
            outcome.and_then(|outcome| outcome.entered.get(name)).map(str::to_string)
        });
        self.log_diagnostics(&general.diagnostics);
        let file_controls: Vec<String> = self
            .schema
            .file_inputs
            .iter()
            .map(|spec| {
                let control = renderer.render(spec, None);
                self.log_diagnostics(&control.diagnostics);
                control.html
            })
            .collect();
        let selected = outcome.map_or(&[][..], |outcome| outcome.selected.as_slice());

        render_form_page(&FormPage {
            site: &self.site,
            messages,
            form: Some(FormBody {
                general_html: &general.html,
                file_controls: &file_controls,
                scholarships: &scholarships,
                selected,
            }),
        })
    }

    /// Handles a decoded submission and renders the resulting page.
    #[must_use]
    pub fn submit(&self, raw: &RawSubmission) -> (SubmissionOutcome, String) {
        let outcome = self.pipeline.submit(raw);
        let page = self.form_page(Some(&outcome));
        (outcome, page)
    }

    /// Serves an attachment download for the raw query string.
    #[must_use]
    pub fn download(&self, query: Option<&str>) -> Response {
        let request = match DownloadRequest::from_query(query) {
            Ok(request) => request,
            Err(err) => {
                self.log.emit("download_failed", LogKind::Download, None, err.to_string());
                return self.error_response(err.status(), err.public_message());
            }
        };
        match fetch(self.store.as_ref(), &request) {
            Ok(file) => file_response(file, &request.prefix),
            Err(err) => {
                self.log.emit("download_failed", LogKind::Download, Some(&request.id), err.to_string());
                self.error_response(err.status(), err.public_message())
            }
        }
    }

    /// Renders an error page response.
    #[must_use]
    pub fn error_response(&self, status: StatusCode, message: &str) -> Response {
        (status, Html(render_error_page(&self.site, status, message))).into_response()
    }

    /// Records renderer diagnostics.
    fn log_diagnostics(&self, diagnostics: &[RenderDiagnostic]) {
        for diagnostic in diagnostics {
            self.log.emit(
                "render_diagnostic",
                LogKind::Render,
                None,
                format!("{}: {}", diagnostic.field, diagnostic.message),
            );
        }
    }
}
