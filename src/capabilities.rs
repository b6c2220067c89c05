//! Build capability snapshot.
//!
//! [`Capabilities`] records which event layout and grab backend this build
//! carries. It is meant for diagnostics and bug reports; nothing in the crate
//! branches on it at runtime.
//!
//! # Example
//! ```
//! use evgrab::Capabilities;
//!
//! let caps = Capabilities::current();
//! println!("{caps}");
//! println!("{}", caps.to_json().unwrap());
//! ```

use crate::backends::CAN_GRAB;
use crate::event::{
    EventTimestamp, InputEvent, TimestampLayout, HAS_NATIVE_INPUT_HEADERS, INPUT_EVENT_SIZE,
};
use serde::{Deserialize, Serialize};

/// Snapshot of what this build compiled in.
///
/// All fields are fixed at build time; [`Capabilities::current`] only reads them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// The kernel's own `input_event` definition is in use.
    pub has_native_input_headers: bool,
    /// `EVIOCGRAB` is issued; otherwise grab and release are no-ops.
    pub can_grab: bool,
    /// Where the timestamp lives inside [`InputEvent`].
    pub layout: TimestampLayout,
    /// `size_of::<InputEvent>()`.
    pub event_size: usize,
    /// `target_os` the crate was built for.
    pub target_os: String,
    /// `target_arch` the crate was built for.
    pub target_arch: String,
}

impl Capabilities {
    /// Capabilities of this build.
    pub fn current() -> Self {
        Self {
            has_native_input_headers: HAS_NATIVE_INPUT_HEADERS,
            can_grab: CAN_GRAB,
            layout: <InputEvent as EventTimestamp>::LAYOUT,
            event_size: INPUT_EVENT_SIZE,
            target_os: std::env::consts::OS.to_string(),
            target_arch: std::env::consts::ARCH.to_string(),
        }
    }

    /// Pretty-printed JSON form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl std::fmt::Display for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}: layout={} event_size={} native_headers={} can_grab={}",
            self.target_os,
            self.target_arch,
            self.layout,
            self.event_size,
            self.has_native_input_headers,
            self.can_grab
        )
    }
}
