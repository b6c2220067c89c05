#![cfg(any(target_os = "linux", target_os = "android"))]

//! evdev grab backend.
//!
//! Issues `EVIOCGRAB` against a caller-owned descriptor and hands back the raw
//! `ioctl(2)` result. Errors stay in `errno`; nothing here retries or logs.

use super::GrabAction;
use crate::device::DeviceHandle;
use core::ffi::c_int;
use nix::sys::ioctl::ioctl_num_type;

/// `_IOW('E', 0x90, int)` from `<linux/input.h>`, encoded for this architecture.
pub const EVIOCGRAB: ioctl_num_type =
    nix::request_code_write!(b'E', 0x90, core::mem::size_of::<c_int>());

/// `ioctl(fd, EVIOCGRAB, action.flag())`.
///
/// Returns `0` on success or `-1` with `errno` set (`EBUSY` when someone else
/// holds the grab, `EINVAL` when releasing a grab we do not hold, `EBADF`...).
#[inline]
pub fn grab_action(fd: DeviceHandle, action: GrabAction) -> c_int {
    // SAFETY: EVIOCGRAB takes its argument by value, so no memory is shared
    // with the kernel. A bad descriptor is reported through errno.
    unsafe { libc::ioctl(fd, EVIOCGRAB, action.flag()) }
}
