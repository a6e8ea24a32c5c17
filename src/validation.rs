//! Email format check.
//!
//! The check is deliberately loose: an address is accepted when it contains
//! an `@` and at least one of the known suffixes (`.com`, `.edu`, `.org` by
//! default). The decision is a pure function; [`validate_email`] layers the
//! error value on top of it. Reporting is left to the caller.

use crate::{config::ValidationPolicy, error::RegistryError};

/// Suffixes accepted by the default policy.
pub const DEFAULT_EMAIL_SUFFIXES: [&str; 3] = [".com", ".edu", ".org"];

/// Returns `true` if `email` passes the default format check.
///
/// # Examples
///
/// ```
/// use tome_rater::is_valid_email;
///
/// assert!(is_valid_email("alan@turing.com"));
/// assert!(is_valid_email("marie@curie.edu"));
/// assert!(!is_valid_email("not-an-email"));
/// assert!(!is_valid_email("ada@lovelace.net"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    matches_suffixes(email, DEFAULT_EMAIL_SUFFIXES.as_slice())
}

/// Returns `true` if `email` contains an `@` and any of `suffixes`.
///
/// Suffixes are matched as substrings anywhere in the address.
#[must_use]
pub fn matches_suffixes<S: AsRef<str>>(email: &str, suffixes: &[S]) -> bool {
    email.contains('@') && suffixes.iter().any(|suffix| email.contains(suffix.as_ref()))
}

/// Check `email` against `policy`, turning a rejection into an error value.
///
/// # Errors
///
/// Returns `RegistryError::InvalidEmail` when the check fails.
pub fn validate_email(email: &str, policy: &ValidationPolicy) -> Result<(), RegistryError> {
    if policy.accepts(email) {
        Ok(())
    } else {
        Err(RegistryError::InvalidEmail { email: email.to_owned() })
    }
}
