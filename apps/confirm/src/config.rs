use std::time::Duration;

use anyhow::{Context, Result};

use crate::autoresize::TextareaMetrics;
use crate::validation::ValidationFailure;

pub const DEFAULT_WATCHDOG_MS: u64 = 5_000;
pub const DEFAULT_PROCESSING_LABEL: &str = "Processing... Please wait";
pub const DEFAULT_MISSING_NAME_MESSAGE: &str = "Please enter your name before proceeding.";
pub const DEFAULT_NO_SKILLS_MESSAGE: &str = "Please enter at least one skill before proceeding.";

/// Controller configuration.
///
/// `Default` carries the page's built-in constants; `from_env` lets a host
/// override them without recompiling.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    /// How long the submit button stays disabled without a completion signal.
    pub watchdog_delay: Duration,
    pub processing_label: String,
    /// Alert shown when the name field is blank.
    pub missing_name_message: String,
    /// Alert shown when every skill input is blank.
    pub no_skills_message: String,
    pub textarea: TextareaMetrics,
    pub rust_log: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            watchdog_delay: Duration::from_millis(DEFAULT_WATCHDOG_MS),
            processing_label: DEFAULT_PROCESSING_LABEL.to_string(),
            missing_name_message: DEFAULT_MISSING_NAME_MESSAGE.to_string(),
            no_skills_message: DEFAULT_NO_SKILLS_MESSAGE.to_string(),
            textarea: TextareaMetrics::default(),
            rust_log: "info".to_string(),
        }
    }
}

impl ControllerConfig {
    /// The alert text for a blocked submission.
    pub fn alert_text(&self, failure: ValidationFailure) -> &str {
        match failure {
            ValidationFailure::MissingName => &self.missing_name_message,
            ValidationFailure::NoSkills => &self.no_skills_message,
        }
    }

    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Unset keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let watchdog_delay = match lookup("CONFIRM_WATCHDOG_MS") {
            Some(raw) => Duration::from_millis(
                raw.trim()
                    .parse::<u64>()
                    .context("CONFIRM_WATCHDOG_MS must be a whole number of milliseconds")?,
            ),
            None => defaults.watchdog_delay,
        };

        Ok(ControllerConfig {
            watchdog_delay,
            processing_label: non_blank(lookup("CONFIRM_PROCESSING_LABEL"))
                .unwrap_or(defaults.processing_label),
            missing_name_message: non_blank(lookup("CONFIRM_MISSING_NAME_MESSAGE"))
                .unwrap_or(defaults.missing_name_message),
            no_skills_message: non_blank(lookup("CONFIRM_NO_SKILLS_MESSAGE"))
                .unwrap_or(defaults.no_skills_message),
            textarea: defaults.textarea,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_page_constants() {
        let config = ControllerConfig::default();
        assert_eq!(config.watchdog_delay, Duration::from_secs(5));
        assert_eq!(config.processing_label, "Processing... Please wait");
        assert_eq!(
            config.alert_text(ValidationFailure::MissingName),
            ValidationFailure::MissingName.to_string()
        );
        assert_eq!(
            config.alert_text(ValidationFailure::NoSkills),
            ValidationFailure::NoSkills.to_string()
        );
    }

    #[test]
    fn test_empty_lookup_keeps_defaults() {
        let config = ControllerConfig::from_lookup(|_| None).expect("valid config");
        assert_eq!(config, ControllerConfig::default());
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = ControllerConfig::from_lookup(lookup_from(&[
            ("CONFIRM_WATCHDOG_MS", "2500"),
            ("CONFIRM_PROCESSING_LABEL", "Sending..."),
            ("RUST_LOG", "debug"),
            ("CONFIRM_NO_SKILLS_MESSAGE", "Add a skill first."),
        ]))
        .expect("valid config");
        assert_eq!(config.alert_text(ValidationFailure::NoSkills), "Add a skill first.");
        assert_eq!(config.missing_name_message, DEFAULT_MISSING_NAME_MESSAGE);
        assert_eq!(config.watchdog_delay, Duration::from_millis(2500));
        assert_eq!(config.processing_label, "Sending...");
        assert_eq!(config.rust_log, "debug");
    }

    #[test]
    fn test_blank_processing_label_is_ignored() {
        let config =
            ControllerConfig::from_lookup(lookup_from(&[("CONFIRM_PROCESSING_LABEL", "  ")]))
                .expect("valid config");
        assert_eq!(config.processing_label, DEFAULT_PROCESSING_LABEL);
    }

    #[test]
    fn test_bad_watchdog_value_is_error() {
        let err = ControllerConfig::from_lookup(lookup_from(&[("CONFIRM_WATCHDOG_MS", "5s")]))
            .expect_err("should reject non-numeric delay");
        assert!(err.to_string().contains("CONFIRM_WATCHDOG_MS"));
    }
}
