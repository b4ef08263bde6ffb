// crates/scholarship-web/src/server.rs
// ============================================================================
// Module: Form Server
// Description: Builds the application from configuration and serves HTTP.
// Purpose: Expose the form, submission, and download routes.
// Dependencies: axum, tokio, scholarship-config, scholarship-providers,
//               scholarship-store-sqlite, scholarship-mail
// ============================================================================

//! ## Overview
//! [`FormServer::from_config`] resolves every backend named by the
//! configuration (schema, option providers, feed, store, notifier, error
//! log) and fails before binding if any of them is unusable. Construction
//! performs blocking I/O and must run outside the async runtime's worker
//! threads. Handlers move each request onto the blocking pool.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::io::Write;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::extract::Multipart;
use axum::extract::RawQuery;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use scholarship_config::Environment;
use scholarship_config::MailTransport;
use scholarship_config::ScholarshipConfig;
use scholarship_core::FormSchema;
use scholarship_core::Notifier;
use scholarship_core::ScholarshipFeed;
use scholarship_core::StaticScholarshipFeed;
use scholarship_mail::ComposerConfig;
use scholarship_mail::EmailComposer;
use scholarship_mail::NoopNotifier;
use scholarship_mail::OutboxNotifier;
use scholarship_mail::SmtpConfig;
use scholarship_mail::SmtpNotifier;
use scholarship_mail::load_faculty;
use scholarship_providers::HttpFeedConfig;
use scholarship_providers::HttpScholarshipFeed;
use scholarship_providers::OptionProviderRegistry;
use scholarship_store_sqlite::SqliteSubmissionStore;

use crate::app::FormApp;
use crate::app::FormAppParts;
use crate::audit::ErrorLogSink;
use crate::audit::ErrorLogger;
use crate::audit::FileErrorLogSink;
use crate::audit::LogKind;
use crate::audit::StderrErrorLogSink;
use crate::multipart::read_submission;

// ============================================================================
// SECTION: Form Server
// ============================================================================

/// Scholarship form server instance.
pub struct FormServer {
    /// Server configuration.
    config: ScholarshipConfig,
    /// Shared application state.
    app: Arc<FormApp>,
}

impl FormServer {
    /// Builds a new server from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when configuration is invalid or a backend
    /// cannot be initialized.
    pub fn from_config(config: ScholarshipConfig) -> Result<Self, ServerError> {
        let schema = check_config(&config)?;
        let options = OptionProviderRegistry::with_builtin_providers();
        let store = SqliteSubmissionStore::new(&config.store, &schema.general_field_names())
            .map_err(|err| ServerError::Init(err.to_string()))?;
        let app = FormApp::new(FormAppParts {
            schema,
            options: Arc::new(options),
            feed: build_feed(&config)?,
            store: Arc::new(store),
            notifier: build_notifier(&config)?,
            composer: build_composer(&config)?,
            site: config.site.clone(),
            log: build_logger(&config)?,
        });
        emit_environment_warning(&config);
        Ok(Self { config, app: Arc::new(app) })
    }

    /// Returns the shared application.
    #[must_use]
    pub fn app(&self) -> Arc<FormApp> {
        Arc::clone(&self.app)
    }

    /// Builds the router.
    #[must_use]
    pub fn router(&self) -> Router {
        router(Arc::clone(&self.app), self.config.server.max_body_bytes)
    }

    /// Binds the configured address and serves until the listener fails.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let addr =
            self.config.server.bind_addr().map_err(|err| ServerError::Config(err.to_string()))?;
        let app = self.router();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|err| ServerError::Transport(format!("http bind failed: {err}")))?;
        axum::serve(listener, app)
            .await
            .map_err(|err| ServerError::Transport(format!("http server failed: {err}")))
    }
}

/// Validates configuration and the schema it names without opening any
/// backend. Returns the loaded schema.
///
/// # Errors
///
/// Returns [`ServerError::Config`] for invalid settings or schema, and
/// [`ServerError::Init`] when a select field names an unknown provider.
pub fn check_config(config: &ScholarshipConfig) -> Result<FormSchema, ServerError> {
    config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
    let schema = config.load_schema().map_err(|err| ServerError::Config(err.to_string()))?;
    OptionProviderRegistry::with_builtin_providers()
        .validate_schema(&schema)
        .map_err(|err| ServerError::Init(err.to_string()))?;
    config.log.display_offset().map_err(|err| ServerError::Config(err.to_string()))?;
    Ok(schema)
}

/// Builds the router for `app` with a request body limit.
#[must_use]
pub fn router(app: Arc<FormApp>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handle_form).post(handle_submit))
        .route("/download", get(handle_download))
        .route("/download/", get(handle_download))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(app)
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Serves the empty form.
async fn handle_form(State(app): State<Arc<FormApp>>) -> Response {
    let fallback = Arc::clone(&app);
    match tokio::task::spawn_blocking(move || app.form_page(None)).await {
        Ok(page) => Html(page).into_response(),
        Err(err) => internal_error(&fallback, &err),
    }
}

/// Accepts a submission.
async fn handle_submit(State(app): State<Arc<FormApp>>, multipart: Multipart) -> Response {
    let raw = match read_submission(multipart).await {
        Ok(raw) => raw,
        Err(err) => {
            let status = err.status();
            app.log().emit("submission_unreadable", LogKind::Validation, None, err.to_string());
            let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
                "The submission is too large. Please attach smaller files."
            } else {
                "The submission could not be read."
            };
            return app.error_response(status, message);
        }
    };
    let fallback = Arc::clone(&app);
    match tokio::task::spawn_blocking(move || app.submit(&raw).1).await {
        Ok(page) => Html(page).into_response(),
        Err(err) => internal_error(&fallback, &err),
    }
}

/// Serves an attachment.
async fn handle_download(State(app): State<Arc<FormApp>>, RawQuery(query): RawQuery) -> Response {
    let fallback = Arc::clone(&app);
    match tokio::task::spawn_blocking(move || app.download(query.as_deref())).await {
        Ok(response) => response,
        Err(err) => internal_error(&fallback, &err),
    }
}

/// Renders a 500 page after a blocking task failed to complete.
fn internal_error(app: &FormApp, err: &tokio::task::JoinError) -> Response {
    app.log().emit("handler_failed", LogKind::Persistence, None, err.to_string());
    app.error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "There was a problem processing your request.",
    )
}

// ============================================================================
// SECTION: Backends
// ============================================================================

/// Builds the scholarship feed.
fn build_feed(config: &ScholarshipConfig) -> Result<Arc<dyn ScholarshipFeed>, ServerError> {
    let Some(url) = &config.feed.url else {
        return Ok(Arc::new(StaticScholarshipFeed::from_wire(config.feed.static_entries.clone())));
    };
    let mut feed_config = HttpFeedConfig::new(url.trim());
    feed_config.allow_http = config.feed.allow_http;
    feed_config.timeout_ms = config.feed.timeout_ms;
    feed_config.max_response_bytes = config.feed.max_response_bytes;
    feed_config.allowed_hosts = config
        .feed
        .allowed_hosts
        .as_ref()
        .map(|hosts| hosts.iter().map(|host| host.trim().to_ascii_lowercase()).collect::<BTreeSet<_>>());
    let feed = HttpScholarshipFeed::new(feed_config).map_err(|err| ServerError::Init(err.to_string()))?;
    Ok(Arc::new(feed))
}

/// Builds the notifier for the configured transport.
fn build_notifier(config: &ScholarshipConfig) -> Result<Arc<dyn Notifier>, ServerError> {
    let mail = &config.mail;
    let notifier: Arc<dyn Notifier> = match mail.transport {
        MailTransport::Disabled => Arc::new(NoopNotifier),
        MailTransport::Outbox => {
            let path = mail
                .outbox_path
                .as_ref()
                .ok_or_else(|| ServerError::Config("mail.outbox_path required".to_string()))?;
            Arc::new(OutboxNotifier::open(path).map_err(|err| ServerError::Init(err.to_string()))?)
        }
        MailTransport::Smtp => {
            let host = mail
                .host
                .clone()
                .ok_or_else(|| ServerError::Config("mail.host required".to_string()))?;
            let credentials =
                mail.credentials().map_err(|err| ServerError::Config(err.to_string()))?;
            Arc::new(SmtpNotifier::new(&SmtpConfig {
                host,
                port: mail.port,
                credentials,
                timeout_ms: mail.timeout_ms,
            }))
        }
    };
    Ok(notifier)
}

/// Builds the email composer; reviewer lists are loaded only in production.
fn build_composer(config: &ScholarshipConfig) -> Result<EmailComposer, ServerError> {
    let offset = config.log.display_offset().map_err(|err| ServerError::Config(err.to_string()))?;
    let notify_staff = config.notify_staff();
    let faculty = match (&config.mail.faculty_path, notify_staff) {
        (Some(path), true) => load_faculty(path).map_err(|err| ServerError::Init(err.to_string()))?,
        _ => Vec::new(),
    };
    Ok(EmailComposer::new(ComposerConfig {
        sender: config.mail.sender(),
        staff: config.mail.staff_mailboxes(),
        faculty,
        notify_staff,
        base_url: config.site.base_url().to_string(),
        first_name_field: config.mail.first_name_field.clone(),
        last_name_field: config.mail.last_name_field.clone(),
        email_field: config.mail.email_field.clone(),
        display_offset: offset,
    }))
}

/// Builds the error logger.
fn build_logger(config: &ScholarshipConfig) -> Result<ErrorLogger, ServerError> {
    let offset = config.log.display_offset().map_err(|err| ServerError::Config(err.to_string()))?;
    let sink: Arc<dyn ErrorLogSink> = match &config.log.error_log_path {
        Some(path) => Arc::new(
            FileErrorLogSink::new(path)
                .map_err(|err| ServerError::Init(format!("error log: {err}")))?,
        ),
        None => Arc::new(StderrErrorLogSink),
    };
    Ok(ErrorLogger::new(sink, offset))
}

/// Warns on stderr when reviewer recipients are suppressed.
fn emit_environment_warning(config: &ScholarshipConfig) {
    if config.server.environment == Environment::Development {
        let _ = writeln!(
            std::io::stderr(),
            "scholarship-form: WARNING: running in development; confirmation emails go to \
             applicants only"
        );
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Form server errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}
