// crates/scholarship-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for scholarship-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use scholarship_config::ConfigError;
use scholarship_config::ScholarshipConfig;

/// Smallest config that validates.
pub const MINIMAL_TOML: &str = r#"
[site]
support_email = "help@example.edu"
"#;

/// Parses a TOML string into a `ScholarshipConfig` for tests.
pub fn config_from_toml(toml_str: &str) -> Result<ScholarshipConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns a minimal valid config with all other defaults applied.
pub fn minimal_config() -> Result<ScholarshipConfig, toml::de::Error> {
    config_from_toml(MINIMAL_TOML)
}

/// Checks that `result` failed with a message containing `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> Result<(), String> {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}
