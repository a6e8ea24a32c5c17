//! Registry configuration.

use serde::Deserialize;

use crate::validation::{DEFAULT_EMAIL_SUFFIXES, matches_suffixes};

/// Rules applied to user input
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationPolicy {
    /// An email must contain at least one of these
    pub email_suffixes: Vec<String>,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self { email_suffixes: DEFAULT_EMAIL_SUFFIXES.iter().map(|s| (*s).to_owned()).collect() }
    }
}

impl ValidationPolicy {
    /// Whether `email` passes this policy
    #[must_use]
    pub fn accepts(&self, email: &str) -> bool {
        matches_suffixes(email, self.email_suffixes.as_slice())
    }
}

/// Settings a [`Registry`](crate::Registry) is built with
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistryConfig {
    /// Email rules
    pub validation: ValidationPolicy,
    /// Attach a [`ConsoleNotifier`](crate::ConsoleNotifier) on construction
    pub notify_console: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { validation: ValidationPolicy::default(), notify_console: true }
    }
}

impl RegistryConfig {
    /// Parse a configuration from JSON; absent fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the input is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = RegistryConfig::from_json("{}").unwrap_or_default();
        assert_eq!(config, RegistryConfig::default());
        assert_eq!(config.validation.email_suffixes, [".com", ".edu", ".org"]);
        assert!(config.notify_console);
    }

    #[test]
    fn overrides_suffixes_and_notifier() {
        let json = r#"{"validation": {"emailSuffixes": [".io"]}, "notifyConsole": false}"#;
        let config = RegistryConfig::from_json(json).ok();
        let expected = RegistryConfig {
            validation: ValidationPolicy { email_suffixes: vec![".io".to_owned()] },
            notify_console: false,
        };
        assert_eq!(config, Some(expected));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(RegistryConfig::from_json("not json").is_err());
    }

    #[test]
    fn policy_uses_configured_suffixes() {
        let policy = ValidationPolicy { email_suffixes: vec![".io".to_owned()] };
        assert!(policy.accepts("dev@rust.io"));
        assert!(!policy.accepts("dev@rust.com"));
    }
}
