//! Raw input event records and layout-independent timestamp access.
//!
//! The kernel hands out `struct input_event` records whose timestamp lives in
//! different places depending on the build:
//!
//! - **Native:** on Linux and Android the `libc` crate carries the kernel's
//!   own definition and it is used as-is ([`InputEvent`] aliases it).
//! - **Time of day:** elsewhere, a nested `time.tv_sec` / `time.tv_usec` pair
//!   ([`TimevalEvent`]).
//! - **Flat:** with the `time-bits64` feature on a 32-bit word, or with the
//!   `kernel-abi` feature, a pair of `unsigned long` fields
//!   `input_event_sec` / `input_event_usec` ([`FlatEvent`]). On sparc64 the
//!   microseconds field is an `unsigned int` followed by a padding word.
//!
//! Exactly one of these is [`InputEvent`] for a given build; the choice is made
//! by `cfg` and never at runtime. Callers go through [`EventTimestamp`] (or the
//! free functions [`get_seconds`] and friends) and never touch the fields.
//!
//! ## Value conventions
//! - Seconds and microseconds are exchanged as `i64`. Values outside what the
//!   active layout can store are truncated the way an `as` cast truncates.
//! - The microseconds component is not normalized; writing `1_500_000` stores
//!   `1_500_000`.
//! - `type_`, `code` and `value` are raw kernel codes and are not interpreted.

#[cfg(target_arch = "sparc64")]
use core::ffi::c_uint;
use core::ffi::{c_long, c_ulong};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// `true` when the target exposes the kernel's own `input_event` definition.
///
/// When it does, that definition always wins over the synthetic layouts.
pub const HAS_NATIVE_INPUT_HEADERS: bool = cfg!(any(target_os = "linux", target_os = "android"));

const MICROS_PER_SEC: i64 = 1_000_000;

/// Which physical layout backs a record's timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimestampLayout {
    /// The host's own `input_event` definition.
    Native,
    /// Nested `time.tv_sec` / `time.tv_usec`.
    TimeOfDay,
    /// Flat `input_event_sec` / `input_event_usec` unsigned fields.
    Flat,
}

impl std::fmt::Display for TimestampLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TimestampLayout::Native => "native",
            TimestampLayout::TimeOfDay => "time-of-day",
            TimestampLayout::Flat => "flat",
        })
    }
}

/// Layout-independent access to an event's timestamp.
///
/// Every record type implements the four accessors against its own fields.
/// Setting one component never changes the other.
pub trait EventTimestamp {
    /// The layout this record type uses.
    const LAYOUT: TimestampLayout;

    /// Seconds component.
    fn seconds(&self) -> i64;

    /// Microseconds component.
    fn microseconds(&self) -> i64;

    /// Overwrite the seconds component in place.
    fn set_seconds(&mut self, sec: i64);

    /// Overwrite the microseconds component in place.
    fn set_microseconds(&mut self, usec: i64);

    /// Wall-clock time of the event.
    ///
    /// Negative seconds are read as "before the epoch" with the microseconds
    /// counted forward from there, as `timeval` does. Negative microseconds
    /// count as zero. Out-of-range values saturate to [`UNIX_EPOCH`].
    fn timestamp(&self) -> SystemTime {
        let sec = self.seconds();
        let base = if sec >= 0 {
            UNIX_EPOCH.checked_add(Duration::from_secs(sec.unsigned_abs()))
        } else {
            UNIX_EPOCH.checked_sub(Duration::from_secs(sec.unsigned_abs()))
        };
        let usec = u64::try_from(self.microseconds()).unwrap_or(0);
        base.and_then(|t| t.checked_add(Duration::from_micros(usec)))
            .unwrap_or(UNIX_EPOCH)
    }

    /// Store a wall-clock time, truncated to whole microseconds.
    fn set_timestamp(&mut self, at: SystemTime) {
        let (sec, usec) = match at.duration_since(UNIX_EPOCH) {
            Ok(after) => (
                i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
                i64::from(after.subsec_micros()),
            ),
            Err(before) => {
                let before = before.duration();
                let sec = i64::try_from(before.as_secs()).map_or(i64::MIN, |s| -s);
                match i64::from(before.subsec_micros()) {
                    0 => (sec, 0),
                    usec => (sec.saturating_sub(1), MICROS_PER_SEC - usec),
                }
            }
        };
        self.set_seconds(sec);
        self.set_microseconds(usec);
    }
}

/// A complete event record: timestamp plus the raw `type`/`code`/`value`.
pub trait EventRecord: EventTimestamp + Copy {
    /// Build a record with a zero timestamp.
    fn from_parts(type_: u16, code: u16, value: i32) -> Self;

    /// Raw event type (`EV_*`).
    fn event_type(&self) -> u16;

    /// Raw event code within the type.
    fn code(&self) -> u16;

    /// Raw event value.
    fn value(&self) -> i32;
}

/// Kernel `__kernel_old_timeval`: a `long` seconds / `long` microseconds pair.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TimeOfDay {
    pub tv_sec: c_long,
    pub tv_usec: c_long,
}

/// Synthetic record with a nested time-of-day timestamp.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TimevalEvent {
    pub time: TimeOfDay,
    pub type_: u16,
    pub code: u16,
    pub value: i32,
}

impl EventTimestamp for TimevalEvent {
    const LAYOUT: TimestampLayout = TimestampLayout::TimeOfDay;

    #[inline]
    fn seconds(&self) -> i64 {
        i64::from(self.time.tv_sec)
    }
    #[inline]
    fn microseconds(&self) -> i64 {
        i64::from(self.time.tv_usec)
    }
    #[inline]
    fn set_seconds(&mut self, sec: i64) {
        self.time.tv_sec = sec as c_long;
    }
    #[inline]
    fn set_microseconds(&mut self, usec: i64) {
        self.time.tv_usec = usec as c_long;
    }
}

impl EventRecord for TimevalEvent {
    fn from_parts(type_: u16, code: u16, value: i32) -> Self {
        Self {
            time: TimeOfDay::default(),
            type_,
            code,
            value,
        }
    }
    fn event_type(&self) -> u16 {
        self.type_
    }
    fn code(&self) -> u16 {
        self.code
    }
    fn value(&self) -> i32 {
        self.value
    }
}

/// Synthetic record with flat unsigned timestamp fields (64-bit time ABI).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FlatEvent {
    pub input_event_sec: c_ulong,
    #[cfg(not(target_arch = "sparc64"))]
    pub input_event_usec: c_ulong,
    #[cfg(target_arch = "sparc64")]
    pub input_event_usec: c_uint,
    #[cfg(target_arch = "sparc64")]
    _pad: c_uint,
    pub type_: u16,
    pub code: u16,
    pub value: i32,
}

// Same size as the kernel record on every LP64 target, sparc64's pad included.
#[cfg(all(target_pointer_width = "64", not(windows)))]
const _: () = assert!(core::mem::size_of::<FlatEvent>() == 24);

impl EventTimestamp for FlatEvent {
    const LAYOUT: TimestampLayout = TimestampLayout::Flat;

    #[inline]
    fn seconds(&self) -> i64 {
        self.input_event_sec as i64
    }
    #[inline]
    fn microseconds(&self) -> i64 {
        self.input_event_usec as i64
    }
    #[inline]
    fn set_seconds(&mut self, sec: i64) {
        self.input_event_sec = sec as c_ulong;
    }
    #[inline]
    fn set_microseconds(&mut self, usec: i64) {
        self.input_event_usec = usec as _;
    }
}

impl EventRecord for FlatEvent {
    fn from_parts(type_: u16, code: u16, value: i32) -> Self {
        Self {
            type_,
            code,
            value,
            ..Self::default()
        }
    }
    fn event_type(&self) -> u16 {
        self.type_
    }
    fn code(&self) -> u16 {
        self.code
    }
    fn value(&self) -> i32 {
        self.value
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
impl EventTimestamp for libc::input_event {
    const LAYOUT: TimestampLayout = TimestampLayout::Native;

    #[inline]
    fn seconds(&self) -> i64 {
        i64::from(self.time.tv_sec)
    }
    #[inline]
    fn microseconds(&self) -> i64 {
        i64::from(self.time.tv_usec)
    }
    #[inline]
    fn set_seconds(&mut self, sec: i64) {
        self.time.tv_sec = sec as libc::time_t;
    }
    #[inline]
    fn set_microseconds(&mut self, usec: i64) {
        self.time.tv_usec = usec as libc::suseconds_t;
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
impl EventRecord for libc::input_event {
    fn from_parts(type_: u16, code: u16, value: i32) -> Self {
        libc::input_event {
            time: libc::timeval {
                tv_sec: 0,
                tv_usec: 0,
            },
            type_,
            code,
            value,
        }
    }
    fn event_type(&self) -> u16 {
        self.type_
    }
    fn code(&self) -> u16 {
        self.code
    }
    fn value(&self) -> i32 {
        self.value
    }
}

/// The event record for this build.
#[cfg(any(target_os = "linux", target_os = "android"))]
pub type InputEvent = libc::input_event;

/// The event record for this build.
#[cfg(all(
    not(any(target_os = "linux", target_os = "android")),
    not(any(
        all(target_pointer_width = "32", feature = "time-bits64"),
        feature = "kernel-abi"
    ))
))]
pub type InputEvent = TimevalEvent;

/// The event record for this build.
#[cfg(all(
    not(any(target_os = "linux", target_os = "android")),
    any(
        all(target_pointer_width = "32", feature = "time-bits64"),
        feature = "kernel-abi"
    )
))]
pub type InputEvent = FlatEvent;

/// Size in bytes of one [`InputEvent`], i.e. the read granularity of an evdev node.
pub const INPUT_EVENT_SIZE: usize = std::mem::size_of::<InputEvent>();

/// Seconds component of `event`.
#[inline]
pub fn get_seconds(event: &InputEvent) -> i64 {
    event.seconds()
}

/// Microseconds component of `event`.
#[inline]
pub fn get_microseconds(event: &InputEvent) -> i64 {
    event.microseconds()
}

/// Overwrite the seconds component of `event`.
#[inline]
pub fn set_seconds(event: &mut InputEvent, sec: i64) {
    event.set_seconds(sec);
}

/// Overwrite the microseconds component of `event`.
#[inline]
pub fn set_microseconds(event: &mut InputEvent, usec: i64) {
    event.set_microseconds(usec);
}
