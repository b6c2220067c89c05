#![cfg(any(test, not(any(target_os = "linux", target_os = "android"))))]

//! Fallback for targets without an input-subsystem grab.
//!
//! Every request succeeds and the descriptor is never looked at, so calling
//! code needs no platform conditionals of its own.

use super::GrabAction;
use crate::device::DeviceHandle;
use core::ffi::c_int;

/// Always `0`.
#[inline]
pub fn grab_action(_fd: DeviceHandle, _action: GrabAction) -> c_int {
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_descriptor_succeeds() {
        for fd in [-1, 0, 99_999, i32::MAX] {
            assert_eq!(grab_action(fd, GrabAction::Grab), 0);
            assert_eq!(grab_action(fd, GrabAction::Release), 0);
        }
    }

    #[test]
    fn release_of_never_opened_descriptor_succeeds() {
        assert_eq!(grab_action(99_999, GrabAction::Release), 0);
    }
}
