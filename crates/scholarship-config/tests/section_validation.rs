//! Section validation tests for scholarship-config.
// crates/scholarship-config/tests/section_validation.rs
// =============================================================================
// Module: Section Validation Tests
// Description: Validate per-section constraints of the config model.
// Purpose: Ensure each section rejects unsafe or inconsistent settings.
// =============================================================================

use std::path::PathBuf;

use scholarship_config::Environment;
use scholarship_config::MailTransport;
use scholarship_config::RecipientConfig;
use scholarship_core::FormSchema;
use scholarship_core::ScholarshipWire;

mod common;

type TestResult = Result<(), String>;

#[test]
fn minimal_config_is_valid_development() -> TestResult {
    let config = common::minimal_config().map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    if config.server.environment != Environment::Development || config.notify_staff() {
        return Err("default environment must be development".to_string());
    }
    if config.server.max_body_bytes != 25 * 1024 * 1024 {
        return Err("unexpected default body limit".to_string());
    }
    if config.store.table != "applications" {
        return Err("unexpected default table".to_string());
    }
    Ok(())
}

#[test]
fn empty_config_requires_support_email() -> TestResult {
    let config = common::config_from_toml("").map_err(|err| err.to_string())?;
    common::assert_invalid(config.validate(), "site.support_email must be an email address")
}

#[test]
fn server_rejects_bad_bind_and_zero_body_limit() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.server.bind = "localhost".to_string();
    common::assert_invalid(config.validate(), "invalid server.bind address")?;
    config.server.bind = "127.0.0.1:0".to_string();
    config.server.max_body_bytes = 0;
    common::assert_invalid(config.validate(), "max_body_bytes must be greater than zero")
}

#[test]
fn site_base_url_requires_scheme_and_host() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.site.base_url = "example.edu".to_string();
    common::assert_invalid(config.validate(), "site.base_url must include http:// or https://")?;
    config.site.base_url = "https:///apply".to_string();
    common::assert_invalid(config.validate(), "site.base_url must include a host")
}

#[test]
fn feed_timeout_bounds() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.feed.timeout_ms = 50;
    common::assert_invalid(config.validate(), "feed.timeout_ms must be between")?;
    config.feed.timeout_ms = 30_001;
    common::assert_invalid(config.validate(), "feed.timeout_ms must be between")
}

#[test]
fn feed_http_requires_opt_in() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.feed.url = Some("http://example.edu/feed".to_string());
    common::assert_invalid(config.validate(), "feed.url must use https")?;
    config.feed.allow_http = true;
    config.validate().map_err(|err| err.to_string())
}

#[test]
fn feed_url_and_static_entries_are_exclusive() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.feed.url = Some("https://example.edu/feed".to_string());
    config.feed.static_entries = vec![ScholarshipWire {
        name: "Dean's Award".to_string(),
        deadline: "2026-11-01".to_string(),
        permalink: "https://example.edu/deans-award".to_string(),
    }];
    common::assert_invalid(config.validate(), "mutually exclusive")
}

#[test]
fn store_table_must_be_identifier() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.store.table = "apps; DROP TABLE x".to_string();
    common::assert_invalid(config.validate(), "store.table must be a SQL identifier")
}

#[test]
fn smtp_transport_requires_host_and_sender() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.mail.transport = MailTransport::Smtp;
    common::assert_invalid(config.validate(), "smtp mail transport requires mail.host")?;
    config.mail.host = Some("smtp.example.edu".to_string());
    common::assert_invalid(config.validate(), "mail.from_address must be an email address")?;
    config.mail.from_address = "honors@example.edu".to_string();
    config.mail.username = Some("honors".to_string());
    common::assert_invalid(config.validate(), "mail.username requires mail.password_env")?;
    config.mail.password_env = Some("SMTP_PASSWORD".to_string());
    config.validate().map_err(|err| err.to_string())
}

#[test]
fn outbox_transport_requires_path() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.mail.transport = MailTransport::Outbox;
    config.mail.from_address = "honors@example.edu".to_string();
    common::assert_invalid(config.validate(), "outbox mail transport requires mail.outbox_path")?;
    config.mail.outbox_path = Some(PathBuf::from("outbox.jsonl"));
    config.validate().map_err(|err| err.to_string())
}

#[test]
fn staff_recipients_must_be_addresses() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.mail.staff = vec![RecipientConfig { name: None, address: "web team".to_string() }];
    common::assert_invalid(config.validate(), "mail.staff address must be an email address")
}

#[test]
fn display_offset_must_parse() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.log.display_offset = "EST".to_string();
    common::assert_invalid(config.validate(), "log.display_offset must look like +HH:MM")
}

#[test]
fn schema_fields_referenced_by_mail_must_exist() -> TestResult {
    let config = common::minimal_config().map_err(|err| err.to_string())?;
    let schema = FormSchema::from_json(
        r#"{"generalInfo": [
            {"name": "fname", "label": "first name"},
            {"name": "surname", "label": "last name"},
            {"name": "email", "type": "email", "label": "email"}
        ], "fileInputs": []}"#,
    )
    .map_err(|err| err.to_string())?;
    common::assert_invalid(
        config.check_schema_fields(&schema),
        "mail.last_name_field must name a general info field",
    )
}
