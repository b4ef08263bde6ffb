// crates/scholarship-config/src/config.rs
// ============================================================================
// Module: Scholarship Form Configuration
// Description: Configuration loading and validation for the form server.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: scholarship-core, scholarship-store-sqlite, serde, toml, time
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Every section has defaults so a small file is enough for development, but
//! anything present must validate; invalid configuration never starts a
//! server.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;

use scholarship_core::FormSchema;
use scholarship_core::Mailbox;
use scholarship_core::ScholarshipWire;
use scholarship_core::is_sql_identifier;
use scholarship_store_sqlite::DEFAULT_TABLE;
use scholarship_store_sqlite::SqliteStoreConfig;
use serde::Deserialize;
use thiserror::Error;
use time::UtcOffset;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "scholarship-form.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "SCHOLARSHIP_FORM_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default bind address for the HTTP server.
pub(crate) const DEFAULT_BIND: &str = "127.0.0.1:8080";
/// Default maximum request body size (uploads included).
pub(crate) const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024;
/// Maximum allowed request body size.
pub(crate) const MAX_MAX_BODY_BYTES: usize = 256 * 1024 * 1024;
/// Default feed timeout in milliseconds.
pub(crate) const DEFAULT_FEED_TIMEOUT_MS: u64 = 5_000;
/// Minimum feed timeout in milliseconds.
pub(crate) const MIN_FEED_TIMEOUT_MS: u64 = 100;
/// Maximum feed timeout in milliseconds.
pub(crate) const MAX_FEED_TIMEOUT_MS: u64 = 30_000;
/// Default maximum feed response size.
pub(crate) const DEFAULT_FEED_MAX_RESPONSE_BYTES: usize = 1024 * 1024;
/// Maximum allowed feed response size.
pub(crate) const MAX_FEED_MAX_RESPONSE_BYTES: usize = 16 * 1024 * 1024;
/// Default SMTP port.
pub(crate) const DEFAULT_SMTP_PORT: u16 = 25;
/// Default SMTP timeout in milliseconds.
pub(crate) const DEFAULT_SMTP_TIMEOUT_MS: u64 = 10_000;
/// Minimum SMTP timeout in milliseconds.
pub(crate) const MIN_SMTP_TIMEOUT_MS: u64 = 100;
/// Maximum SMTP timeout in milliseconds.
pub(crate) const MAX_SMTP_TIMEOUT_MS: u64 = 60_000;
/// Maximum number of staff recipients.
pub(crate) const MAX_STAFF_RECIPIENTS: usize = 64;
/// Maximum length of an email address.
pub(crate) const MAX_EMAIL_LENGTH: usize = 254;
/// Display offset format (`+HH:MM` / `-HH:MM`).
const OFFSET_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[offset_hour sign:mandatory]:[offset_minute]");

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Scholarship form server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ScholarshipConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Site identity and contact details.
    #[serde(default)]
    pub site: SiteConfig,
    /// Form schema location.
    #[serde(default)]
    pub schema: SchemaConfig,
    /// Scholarship feed configuration.
    #[serde(default)]
    pub feed: FeedConfig,
    /// Submission store configuration.
    #[serde(default = "default_store")]
    pub store: SqliteStoreConfig,
    /// Outbound email configuration.
    #[serde(default)]
    pub mail: MailConfig,
    /// Error log configuration.
    #[serde(default)]
    pub log: LogConfig,
    /// Optional config source metadata (not serialized).
    #[serde(skip)]
    pub source_modified_at: Option<SystemTime>,
}

impl ScholarshipConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.source_modified_at = fs::metadata(&resolved).and_then(|meta| meta.modified()).ok();
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.site.validate()?;
        self.schema.validate()?;
        self.feed.validate()?;
        validate_store(&self.store)?;
        self.mail.validate()?;
        self.log.validate()?;
        Ok(())
    }

    /// Loads the form schema named by `[schema] path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the schema cannot be loaded or
    /// does not carry the fields the mail section refers to.
    pub fn load_schema(&self) -> Result<FormSchema, ConfigError> {
        let schema = FormSchema::load(&self.schema.path)
            .map_err(|err| ConfigError::Invalid(format!("schema.path: {err}")))?;
        self.check_schema_fields(&schema)?;
        Ok(schema)
    }

    /// Checks that the applicant name and email fields exist in `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a referenced field is missing.
    pub fn check_schema_fields(&self, schema: &FormSchema) -> Result<(), ConfigError> {
        let fields = [
            ("mail.first_name_field", &self.mail.first_name_field),
            ("mail.last_name_field", &self.mail.last_name_field),
            ("mail.email_field", &self.mail.email_field),
        ];
        for (key, name) in fields {
            let known = schema.general_info.iter().any(|spec| spec.name.as_str() == name);
            if !known {
                return Err(ConfigError::Invalid(format!(
                    "{key} must name a general info field: {name}"
                )));
            }
        }
        Ok(())
    }

    /// Returns true when reviewer recipients receive confirmation emails.
    #[must_use]
    pub fn notify_staff(&self) -> bool {
        self.server.environment == Environment::Production
    }
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Development: reviewer recipients are suppressed.
    #[default]
    Development,
    /// Production: staff and faculty receive every confirmation.
    Production,
}

impl Environment {
    /// Returns the configuration label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (`host:port`).
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Maximum request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Deployment environment.
    #[serde(default)]
    pub environment: Environment,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
            environment: Environment::default(),
        }
    }
}

impl ServerConfig {
    /// Returns the parsed bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the address does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("invalid server.bind address: {}", self.bind)))
    }

    /// Validates server configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid(
                "server.max_body_bytes must be greater than zero".to_string(),
            ));
        }
        if self.max_body_bytes > MAX_MAX_BODY_BYTES {
            return Err(ConfigError::Invalid("server.max_body_bytes exceeds limit".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Site
// ============================================================================

/// Site identity and contact details shown on every page.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Public base URL of the form, used in download links.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Link target for the program name in the header.
    #[serde(default = "default_program_url")]
    pub program_url: String,
    /// Program display name.
    #[serde(default = "default_program_name")]
    pub program_name: String,
    /// Contact email shown in the footer.
    #[serde(default)]
    pub contact_email: String,
    /// Contact phone shown in the footer.
    #[serde(default)]
    pub contact_phone: String,
    /// Support address named in error messages.
    #[serde(default)]
    pub support_email: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            program_url: default_program_url(),
            program_name: default_program_name(),
            contact_email: String::new(),
            contact_phone: String::new(),
            support_email: String::new(),
        }
    }
}

impl SiteConfig {
    /// Validates site configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_http_url("site.base_url", &self.base_url, true)?;
        if self.program_name.trim().is_empty() {
            return Err(ConfigError::Invalid("site.program_name must be non-empty".to_string()));
        }
        validate_email("site.support_email", &self.support_email)?;
        if !self.contact_email.trim().is_empty() {
            validate_email("site.contact_email", &self.contact_email)?;
        }
        Ok(())
    }

    /// Returns the base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }
}

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Form schema location.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaConfig {
    /// Path to the schema JSON document.
    #[serde(default = "default_schema_path")]
    pub path: PathBuf,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self { path: default_schema_path() }
    }
}

impl SchemaConfig {
    /// Validates schema configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("schema.path", &self.path.to_string_lossy())
    }
}

// ============================================================================
// SECTION: Feed
// ============================================================================

/// Scholarship feed configuration.
///
/// Either `url` (remote JSON feed) or `static_entries` (fixed list) may be
/// set, not both. With neither, no scholarships are offered.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Remote feed URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Allow cleartext `http://` feed URLs.
    #[serde(default)]
    pub allow_http: bool,
    /// Request timeout in milliseconds.
    #[serde(default = "default_feed_timeout_ms")]
    pub timeout_ms: u64,
    /// Maximum response size in bytes.
    #[serde(default = "default_feed_max_response_bytes")]
    pub max_response_bytes: usize,
    /// Optional host allowlist.
    #[serde(default)]
    pub allowed_hosts: Option<Vec<String>>,
    /// Fixed entries used instead of a remote feed.
    #[serde(default)]
    pub static_entries: Vec<ScholarshipWire>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: None,
            allow_http: false,
            timeout_ms: default_feed_timeout_ms(),
            max_response_bytes: default_feed_max_response_bytes(),
            allowed_hosts: None,
            static_entries: Vec::new(),
        }
    }
}

impl FeedConfig {
    /// Validates feed configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_FEED_TIMEOUT_MS ..= MAX_FEED_TIMEOUT_MS).contains(&self.timeout_ms) {
            return Err(ConfigError::Invalid(format!(
                "feed.timeout_ms must be between {MIN_FEED_TIMEOUT_MS} and {MAX_FEED_TIMEOUT_MS}"
            )));
        }
        if self.max_response_bytes == 0 || self.max_response_bytes > MAX_FEED_MAX_RESPONSE_BYTES {
            return Err(ConfigError::Invalid("feed.max_response_bytes out of range".to_string()));
        }
        if let Some(url) = &self.url {
            if !self.static_entries.is_empty() {
                return Err(ConfigError::Invalid(
                    "feed.url and feed.static_entries are mutually exclusive".to_string(),
                ));
            }
            validate_http_url("feed.url", url, self.allow_http)?;
        }
        if let Some(hosts) = &self.allowed_hosts
            && hosts.iter().any(|host| host.trim().is_empty())
        {
            return Err(ConfigError::Invalid(
                "feed.allowed_hosts entries must be non-empty".to_string(),
            ));
        }
        for entry in &self.static_entries {
            if entry.name.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "feed.static_entries name must be non-empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Mail
// ============================================================================

/// Outbound mail transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MailTransport {
    /// SMTP relay.
    Smtp,
    /// JSON-lines outbox file.
    Outbox,
    /// Messages are discarded.
    #[default]
    Disabled,
}

/// A configured recipient.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecipientConfig {
    /// Optional display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Email address.
    pub address: String,
}

/// Outbound email configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    /// Delivery transport.
    #[serde(default)]
    pub transport: MailTransport,
    /// SMTP relay host.
    #[serde(default)]
    pub host: Option<String>,
    /// SMTP relay port.
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// SMTP username.
    #[serde(default)]
    pub username: Option<String>,
    /// Environment variable holding the SMTP password.
    #[serde(default)]
    pub password_env: Option<String>,
    /// SMTP timeout in milliseconds.
    #[serde(default = "default_smtp_timeout_ms")]
    pub timeout_ms: u64,
    /// Sender address.
    #[serde(default)]
    pub from_address: String,
    /// Sender display name.
    #[serde(default)]
    pub from_name: Option<String>,
    /// Staff recipients added in production.
    #[serde(default)]
    pub staff: Vec<RecipientConfig>,
    /// Faculty roster JSON added in production.
    #[serde(default)]
    pub faculty_path: Option<PathBuf>,
    /// Outbox file for the `outbox` transport.
    #[serde(default)]
    pub outbox_path: Option<PathBuf>,
    /// Field holding the applicant's first name.
    #[serde(default = "default_first_name_field")]
    pub first_name_field: String,
    /// Field holding the applicant's last name.
    #[serde(default = "default_last_name_field")]
    pub last_name_field: String,
    /// Field holding the applicant's email address.
    #[serde(default = "default_email_field")]
    pub email_field: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            transport: MailTransport::default(),
            host: None,
            port: default_smtp_port(),
            username: None,
            password_env: None,
            timeout_ms: default_smtp_timeout_ms(),
            from_address: String::new(),
            from_name: None,
            staff: Vec::new(),
            faculty_path: None,
            outbox_path: None,
            first_name_field: default_first_name_field(),
            last_name_field: default_last_name_field(),
            email_field: default_email_field(),
        }
    }
}

impl MailConfig {
    /// Validates mail configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        for (key, name) in [
            ("mail.first_name_field", &self.first_name_field),
            ("mail.last_name_field", &self.last_name_field),
            ("mail.email_field", &self.email_field),
        ] {
            if !is_sql_identifier(name) {
                return Err(ConfigError::Invalid(format!("{key} is not a valid field name")));
            }
        }
        if self.staff.len() > MAX_STAFF_RECIPIENTS {
            return Err(ConfigError::Invalid("mail.staff exceeds max entries".to_string()));
        }
        for recipient in &self.staff {
            validate_email("mail.staff address", &recipient.address)?;
        }
        if let Some(path) = &self.faculty_path {
            validate_path_string("mail.faculty_path", &path.to_string_lossy())?;
        }
        match self.transport {
            MailTransport::Disabled => return Ok(()),
            MailTransport::Outbox => match &self.outbox_path {
                Some(path) => validate_path_string("mail.outbox_path", &path.to_string_lossy())?,
                None => {
                    return Err(ConfigError::Invalid(
                        "outbox mail transport requires mail.outbox_path".to_string(),
                    ));
                }
            },
            MailTransport::Smtp => {
                if self.host.as_deref().is_none_or(|host| host.trim().is_empty()) {
                    return Err(ConfigError::Invalid(
                        "smtp mail transport requires mail.host".to_string(),
                    ));
                }
                if self.port == 0 {
                    return Err(ConfigError::Invalid("mail.port must be non-zero".to_string()));
                }
                if !(MIN_SMTP_TIMEOUT_MS ..= MAX_SMTP_TIMEOUT_MS).contains(&self.timeout_ms) {
                    return Err(ConfigError::Invalid(format!(
                        "mail.timeout_ms must be between {MIN_SMTP_TIMEOUT_MS} and {MAX_SMTP_TIMEOUT_MS}"
                    )));
                }
                if self.username.is_some() && self.password_env.is_none() {
                    return Err(ConfigError::Invalid(
                        "mail.username requires mail.password_env".to_string(),
                    ));
                }
            }
        }
        validate_email("mail.from_address", &self.from_address)
    }

    /// Returns the sender mailbox.
    #[must_use]
    pub fn sender(&self) -> Mailbox {
        Mailbox {
            name: self.from_name.clone().filter(|name| !name.trim().is_empty()),
            address: self.from_address.trim().to_string(),
        }
    }

    /// Returns the configured staff mailboxes.
    #[must_use]
    pub fn staff_mailboxes(&self) -> Vec<Mailbox> {
        self.staff
            .iter()
            .map(|recipient| Mailbox {
                name: recipient.name.clone(),
                address: recipient.address.trim().to_string(),
            })
            .collect()
    }

    /// Resolves SMTP credentials, reading the password from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the password variable is unset.
    pub fn credentials(&self) -> Result<Option<(String, String)>, ConfigError> {
        let Some(username) = &self.username else {
            return Ok(None);
        };
        let Some(var) = &self.password_env else {
            return Err(ConfigError::Invalid("mail.username requires mail.password_env".to_string()));
        };
        let password = env::var(var)
            .map_err(|_| ConfigError::Invalid(format!("mail password variable {var} is not set")))?;
        Ok(Some((username.clone(), password)))
    }
}

// ============================================================================
// SECTION: Log
// ============================================================================

/// Error log configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Append-only JSON lines error log; stderr when unset.
    #[serde(default)]
    pub error_log_path: Option<PathBuf>,
    /// Offset used for displayed and logged timestamps (`+HH:MM`).
    #[serde(default = "default_display_offset")]
    pub display_offset: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { error_log_path: None, display_offset: default_display_offset() }
    }
}

impl LogConfig {
    /// Returns the parsed display offset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the offset does not parse.
    pub fn display_offset(&self) -> Result<UtcOffset, ConfigError> {
        UtcOffset::parse(self.display_offset.trim(), OFFSET_FORMAT).map_err(|_| {
            ConfigError::Invalid(format!(
                "log.display_offset must look like +HH:MM: {}",
                self.display_offset
            ))
        })
    }

    /// Validates log configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.error_log_path {
            validate_path_string("log.error_log_path", &path.to_string_lossy())?;
        }
        self.display_offset()?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Returns the default bind address.
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

/// Returns the default max body size.
const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// Returns the default site base URL.
fn default_base_url() -> String {
    format!("http://{DEFAULT_BIND}")
}

/// Returns the default program link.
fn default_program_url() -> String {
    "/".to_string()
}

/// Returns the default program name.
fn default_program_name() -> String {
    "Scholarship Application".to_string()
}

/// Returns the default schema path.
fn default_schema_path() -> PathBuf {
    PathBuf::from("form-schema.json")
}

/// Returns the default feed timeout.
const fn default_feed_timeout_ms() -> u64 {
    DEFAULT_FEED_TIMEOUT_MS
}

/// Returns the default feed response limit.
const fn default_feed_max_response_bytes() -> usize {
    DEFAULT_FEED_MAX_RESPONSE_BYTES
}

/// Returns the default store configuration.
fn default_store() -> SqliteStoreConfig {
    SqliteStoreConfig::new("scholarships.db")
}

/// Returns the default SMTP port.
const fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}

/// Returns the default SMTP timeout.
const fn default_smtp_timeout_ms() -> u64 {
    DEFAULT_SMTP_TIMEOUT_MS
}

/// Returns the default first-name field.
fn default_first_name_field() -> String {
    "fname".to_string()
}

/// Returns the default last-name field.
fn default_last_name_field() -> String {
    "lname".to_string()
}

/// Returns the default email field.
fn default_email_field() -> String {
    "email".to_string()
}

/// Returns the default display offset.
fn default_display_offset() -> String {
    "+00:00".to_string()
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates the store table name and path.
fn validate_store(store: &SqliteStoreConfig) -> Result<(), ConfigError> {
    validate_path_string("store.path", &store.path.to_string_lossy())?;
    if !is_sql_identifier(&store.table) {
        return Err(ConfigError::Invalid(format!(
            "store.table must be a SQL identifier (default {DEFAULT_TABLE})"
        )));
    }
    Ok(())
}

/// Validates an absolute `http(s)` URL.
fn validate_http_url(field: &str, value: &str, allow_http: bool) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    let rest = if let Some(rest) = trimmed.strip_prefix("https://") {
        rest
    } else if let Some(rest) = trimmed.strip_prefix("http://") {
        if !allow_http {
            return Err(ConfigError::Invalid(format!("{field} must use https")));
        }
        rest
    } else {
        return Err(ConfigError::Invalid(format!("{field} must include http:// or https://")));
    };
    if rest.is_empty() || rest.starts_with('/') {
        return Err(ConfigError::Invalid(format!("{field} must include a host")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    Ok(())
}

/// Validates a plausible email address.
fn validate_email(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    let valid = trimmed.len() <= MAX_EMAIL_LENGTH
        && trimmed.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        })
        && !trimmed.chars().any(|ch| ch.is_whitespace() || ch.is_control());
    if valid {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{field} must be an email address")))
    }
}
