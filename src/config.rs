//! Grab policy for the checked layer.
//!
//! [`GrabPolicy`] decides whether [`take_grab`](crate::grab::take_grab) and
//! friends touch the device at all, and whether an interrupted ioctl is
//! retried. Both default to `true`, so an empty document is a valid policy.
//!
//! # Example
//! ```
//! use evgrab::GrabPolicy;
//!
//! let policy = GrabPolicy::from_toml_str("retry_on_interrupt = false").unwrap();
//! assert!(policy.grab);
//! assert!(!policy.retry_on_interrupt);
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the checked layer treats grab and release requests.
///
/// Missing keys take their [`Default`] value; unknown keys are rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GrabPolicy {
    /// Take exclusive access at all. When `false`, grab and release are skipped.
    pub grab: bool,
    /// Re-issue the request when it fails with `EINTR`.
    pub retry_on_interrupt: bool,
}

impl Default for GrabPolicy {
    fn default() -> Self {
        Self {
            grab: true,
            retry_on_interrupt: true,
        }
    }
}

impl GrabPolicy {
    /// A policy that never touches the device.
    pub const fn disabled() -> Self {
        Self {
            grab: false,
            retry_on_interrupt: true,
        }
    }

    /// Parse a policy from a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML policy file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(GrabPolicy::from_toml_str("").unwrap(), GrabPolicy::default());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let p = GrabPolicy::from_toml_str("grab = false\n").unwrap();
        assert!(!p.grab);
        assert!(p.retry_on_interrupt);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = GrabPolicy::from_toml_str("grabs = true").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(GrabPolicy::from_toml_str("grab = \"yes\"").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = GrabPolicy::load("/nonexistent/evgrab/policy.toml").unwrap_err();
        match err {
            ConfigError::Read { path, .. } => {
                assert!(path.ends_with("policy.toml"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
