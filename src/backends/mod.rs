//! Grab backends for `evgrab`.
//!
//! Each backend supplies one primitive, `grab_action(fd, action)`, returning the
//! native result of the exclusive-grab request.
//!
//! # Backends
//! - **`linux`**: Linux and Android, `ioctl(fd, EVIOCGRAB, flag)`.
//! - **`unsupported`**: every other target; always `0`, the descriptor is never touched.
//!
//! Exactly one is compiled in. [`CAN_GRAB`] says which.

use core::ffi::c_int;
use serde::{Deserialize, Serialize};

/// `true` when the target exposes the input-subsystem grab ioctl.
pub const CAN_GRAB: bool = cfg!(any(target_os = "linux", target_os = "android"));

#[cfg(any(target_os = "linux", target_os = "android"))]
#[cfg_attr(docsrs, doc(cfg(any(target_os = "linux", target_os = "android"))))]
pub mod linux;

#[cfg(any(test, not(any(target_os = "linux", target_os = "android"))))]
pub mod unsupported;

/// Direction of a grab request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrabAction {
    /// Take exclusive access (flag `1`).
    Grab,
    /// Give it back (flag `0`).
    Release,
}

impl GrabAction {
    /// The `EVIOCGRAB` argument for this action.
    #[inline]
    pub const fn flag(self) -> c_int {
        match self {
            GrabAction::Grab => 1,
            GrabAction::Release => 0,
        }
    }
}

impl std::fmt::Display for GrabAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            GrabAction::Grab => "grab",
            GrabAction::Release => "release",
        })
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
pub(crate) use linux::grab_action;

#[cfg(not(any(target_os = "linux", target_os = "android")))]
pub(crate) use unsupported::grab_action;
