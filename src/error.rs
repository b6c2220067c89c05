//! Error types for the checked grab layer and policy loading.
//!
//! The raw [`grab`](crate::grab::grab) / [`release`](crate::grab::release)
//! functions never produce these; they return the native result untouched.

use crate::backends::GrabAction;
use crate::device::DeviceHandle;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The OS refused a grab or release.
#[derive(Debug, Error)]
pub enum GrabError {
    #[error("{action} on fd {fd} failed: {source}")]
    Os {
        action: GrabAction,
        fd: DeviceHandle,
        #[source]
        source: io::Error,
    },
}

impl GrabError {
    /// The `errno` value behind the failure.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            GrabError::Os { source, .. } => source.raw_os_error(),
        }
    }

    /// Which request failed.
    pub fn action(&self) -> GrabAction {
        match self {
            GrabError::Os { action, .. } => *action,
        }
    }
}

/// A [`GrabPolicy`](crate::config::GrabPolicy) could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid grab policy: {0}")]
    Parse(#[from] toml::de::Error),
}
