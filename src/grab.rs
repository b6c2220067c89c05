//! Exclusive access ("grab") to an input device.
//!
//! Two layers:
//!
//! - [`grab`] / [`release`] are a transparent pass-through. On targets with the
//!   input subsystem they issue `EVIOCGRAB` and return the native result
//!   (`0`, or `-1` with `errno` set). Elsewhere they return `0` without
//!   touching the descriptor. No retries, no logging.
//! - [`take_grab`] / [`release_grab`] / [`GrabGuard`] turn that result into a
//!   [`GrabError`], honour a [`GrabPolicy`], and log at `debug`.
//!
//! Grab and release are not idempotent: grabbing twice yields `EBUSY` and
//! releasing a grab you do not hold yields `EINVAL`. Both layers report that
//! as-is. Serializing calls per descriptor is the caller's job.
//!
//! # Example
//! ```no_run
//! use evgrab::{GrabGuard, GrabPolicy};
//! use std::os::fd::AsRawFd;
//!
//! let file = std::fs::File::open("/dev/input/event3")?;
//! let guard = GrabGuard::acquire(file.as_raw_fd(), GrabPolicy::default())?;
//! // ... read events: nobody else sees them now ...
//! guard.release()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::backends::{self, GrabAction};
use crate::config::GrabPolicy;
use crate::device::DeviceHandle;
use crate::error::GrabError;
use core::ffi::c_int;
use std::io;
use tracing::{debug, warn};

/// Take exclusive access to `fd`. Returns the native result.
#[inline]
pub fn grab(fd: DeviceHandle) -> c_int {
    backends::grab_action(fd, GrabAction::Grab)
}

/// Give up exclusive access to `fd`. Returns the native result.
#[inline]
pub fn release(fd: DeviceHandle) -> c_int {
    backends::grab_action(fd, GrabAction::Release)
}

/// [`grab`], with the result checked against `policy`.
pub fn take_grab(fd: DeviceHandle, policy: &GrabPolicy) -> Result<(), GrabError> {
    checked(fd, GrabAction::Grab, policy, native)
}

/// [`release`], with the result checked against `policy`.
pub fn release_grab(fd: DeviceHandle, policy: &GrabPolicy) -> Result<(), GrabError> {
    checked(fd, GrabAction::Release, policy, native)
}

/// One grab request, with the outcome read back as an `io::Result`.
type Primitive = fn(DeviceHandle, GrabAction) -> io::Result<()>;

fn native(fd: DeviceHandle, action: GrabAction) -> io::Result<()> {
    match backends::grab_action(fd, action) {
        -1 => Err(io::Error::last_os_error()),
        _ => Ok(()),
    }
}

fn checked(
    fd: DeviceHandle,
    action: GrabAction,
    policy: &GrabPolicy,
    op: Primitive,
) -> Result<(), GrabError> {
    if !policy.grab {
        debug!("fd {fd}: {action} skipped by policy");
        return Ok(());
    }

    loop {
        match op(fd, action) {
            Ok(()) => {
                debug!("fd {fd}: {action} ok");
                return Ok(());
            }
            Err(e) if policy.retry_on_interrupt && e.kind() == io::ErrorKind::Interrupted => {
                debug!("fd {fd}: {action} interrupted, retrying");
            }
            Err(source) => return Err(GrabError::Os { action, fd, source }),
        }
    }
}

/// Holds a grab on a descriptor and releases it when dropped.
///
/// The guard owns the *grab*, not the descriptor: the caller must keep `fd`
/// open for as long as the guard lives. Closing the descriptor also drops the
/// kernel-side grab, after which the drop-time release fails and is logged.
#[must_use = "dropping the guard releases the grab immediately"]
#[derive(Debug)]
pub struct GrabGuard {
    fd: DeviceHandle,
    policy: GrabPolicy,
    op: Primitive,
    held: bool,
}

impl GrabGuard {
    /// Grab `fd` under `policy`.
    pub fn acquire(fd: DeviceHandle, policy: GrabPolicy) -> Result<Self, GrabError> {
        Self::acquire_with(fd, policy, native)
    }

    fn acquire_with(
        fd: DeviceHandle,
        policy: GrabPolicy,
        op: Primitive,
    ) -> Result<Self, GrabError> {
        checked(fd, GrabAction::Grab, &policy, op)?;
        Ok(Self {
            fd,
            policy,
            op,
            held: true,
        })
    }

    /// The guarded descriptor.
    #[inline]
    pub fn fd(&self) -> DeviceHandle {
        self.fd
    }

    /// The policy the grab was taken under.
    #[inline]
    pub fn policy(&self) -> &GrabPolicy {
        &self.policy
    }

    /// Release now and report the outcome instead of logging it.
    pub fn release(mut self) -> Result<(), GrabError> {
        self.held = false;
        checked(self.fd, GrabAction::Release, &self.policy, self.op)
    }
}

impl Drop for GrabGuard {
    fn drop(&mut self) {
        if !self.held {
            return;
        }
        if let Err(e) = checked(self.fd, GrabAction::Release, &self.policy, self.op) {
            warn!("{e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn disabled_policy_never_touches_fd() {
        let policy = GrabPolicy::disabled();
        assert!(take_grab(-1, &policy).is_ok());
        assert!(release_grab(-1, &policy).is_ok());

        let guard = GrabGuard::acquire(-1, policy).unwrap();
        assert_eq!(guard.fd(), -1);
        assert!(guard.release().is_ok());
    }

    fn interrupted() -> io::Error {
        io::Error::from(io::ErrorKind::Interrupted)
    }

    fn unsupported(fd: DeviceHandle, action: GrabAction) -> io::Result<()> {
        assert_eq!(backends::unsupported::grab_action(fd, action), 0);
        Ok(())
    }

    #[test]
    fn no_op_backend_satisfies_checked_layer() {
        for fd in [-1, 0, 99_999, i32::MAX] {
            assert!(checked(fd, GrabAction::Grab, &GrabPolicy::default(), unsupported).is_ok());
            assert!(checked(fd, GrabAction::Release, &GrabPolicy::default(), unsupported).is_ok());
        }
        let guard = GrabGuard::acquire_with(99_999, GrabPolicy::default(), unsupported).unwrap();
        assert!(guard.release().is_ok());
    }

    static RETRY_CALLS: AtomicUsize = AtomicUsize::new(0);

    fn interrupted_twice(_fd: DeviceHandle, _action: GrabAction) -> io::Result<()> {
        match RETRY_CALLS.fetch_add(1, Ordering::SeqCst) {
            0 | 1 => Err(interrupted()),
            _ => Ok(()),
        }
    }

    #[test]
    fn interrupted_request_is_retried_until_it_lands() {
        RETRY_CALLS.store(0, Ordering::SeqCst);
        checked(3, GrabAction::Grab, &GrabPolicy::default(), interrupted_twice).unwrap();
        assert_eq!(RETRY_CALLS.load(Ordering::SeqCst), 3);
    }

    static NO_RETRY_CALLS: AtomicUsize = AtomicUsize::new(0);

    fn interrupted_once(_fd: DeviceHandle, _action: GrabAction) -> io::Result<()> {
        match NO_RETRY_CALLS.fetch_add(1, Ordering::SeqCst) {
            0 => Err(interrupted()),
            _ => Ok(()),
        }
    }

    #[test]
    fn interrupted_request_surfaces_without_retry() {
        NO_RETRY_CALLS.store(0, Ordering::SeqCst);
        let policy = GrabPolicy {
            grab: true,
            retry_on_interrupt: false,
        };
        let err = checked(3, GrabAction::Release, &policy, interrupted_once).unwrap_err();
        assert_eq!(err.action(), GrabAction::Release);
        let GrabError::Os { source, .. } = err;
        assert_eq!(source.kind(), io::ErrorKind::Interrupted);
        assert_eq!(NO_RETRY_CALLS.load(Ordering::SeqCst), 1);
    }

    static DROP_RELEASES: AtomicUsize = AtomicUsize::new(0);

    fn release_fails(_fd: DeviceHandle, action: GrabAction) -> io::Result<()> {
        match action {
            GrabAction::Grab => Ok(()),
            GrabAction::Release => {
                DROP_RELEASES.fetch_add(1, Ordering::SeqCst);
                Err(io::Error::from(io::ErrorKind::InvalidInput))
            }
        }
    }

    #[test]
    fn drop_attempts_release_once_and_swallows_failure() {
        DROP_RELEASES.store(0, Ordering::SeqCst);
        let guard = GrabGuard::acquire_with(5, GrabPolicy::default(), release_fails).unwrap();
        drop(guard);
        assert_eq!(DROP_RELEASES.load(Ordering::SeqCst), 1);
    }

    static EXPLICIT_RELEASES: AtomicUsize = AtomicUsize::new(0);

    fn count_release(_fd: DeviceHandle, action: GrabAction) -> io::Result<()> {
        if action == GrabAction::Release {
            EXPLICIT_RELEASES.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    #[test]
    fn explicit_release_is_not_repeated_on_drop() {
        EXPLICIT_RELEASES.store(0, Ordering::SeqCst);
        let guard = GrabGuard::acquire_with(5, GrabPolicy::default(), count_release).unwrap();
        guard.release().unwrap();
        assert_eq!(EXPLICIT_RELEASES.load(Ordering::SeqCst), 1);
    }

    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    #[test]
    fn unsupported_target_always_succeeds() {
        for fd in [-1, 0, 99_999] {
            assert_eq!(grab(fd), 0);
            assert_eq!(release(fd), 0);
        }
        assert!(take_grab(-1, &GrabPolicy::default()).is_ok());
        assert!(GrabGuard::acquire(-1, GrabPolicy::default()).is_ok());
    }

    #[cfg(any(target_os = "linux", target_os = "android"))]
    #[test]
    fn bad_descriptor_passes_errno_through() {
        assert_eq!(grab(-1), -1);
        assert_eq!(io::Error::last_os_error().raw_os_error(), Some(libc::EBADF));
        assert_eq!(release(-1), -1);
        assert_eq!(io::Error::last_os_error().raw_os_error(), Some(libc::EBADF));
    }

    #[cfg(any(target_os = "linux", target_os = "android"))]
    #[test]
    fn checked_layer_wraps_os_error() {
        let err = take_grab(-1, &GrabPolicy::default()).unwrap_err();
        assert_eq!(err.action(), GrabAction::Grab);
        assert_eq!(err.raw_os_error(), Some(libc::EBADF));

        let err = GrabGuard::acquire(-1, GrabPolicy::default()).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::EBADF));
    }

    #[cfg(any(target_os = "linux", target_os = "android"))]
    #[test]
    fn non_evdev_descriptor_is_rejected() {
        // /dev/null has no EVIOCGRAB handler.
        let null = std::fs::File::open("/dev/null").unwrap();
        let fd = std::os::fd::AsRawFd::as_raw_fd(&null);
        assert_eq!(grab(fd), -1);
        let err = release_grab(fd, &GrabPolicy::default()).unwrap_err();
        assert_eq!(err.action(), GrabAction::Release);
        assert_eq!(err.raw_os_error(), Some(libc::ENOTTY));
    }
}
