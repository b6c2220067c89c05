//! evgrab — portable raw input events and exclusive device access.
//!
//! Two independent pieces:
//!
//! - [`event`]: the `input_event` record for this build and layout-independent
//!   access to its timestamp ([`get_seconds`], [`set_microseconds`], ...).
//! - [`grab`](mod@grab): `EVIOCGRAB` on Linux/Android, a harmless no-op elsewhere
//!   ([`grab()`], [`release()`], plus the checked [`GrabGuard`]).
//!
//! The crate never opens, reads, or closes devices. Hand it a descriptor you
//! already own and records you already read.

pub mod backends;
pub mod capabilities;
pub mod config;
pub mod device;
pub mod error;
pub mod event;
pub mod grab;

pub use backends::{GrabAction, CAN_GRAB};
pub use capabilities::Capabilities;
pub use config::GrabPolicy;
pub use device::DeviceHandle;
pub use error::{ConfigError, GrabError};
pub use event::{
    get_microseconds, get_seconds, set_microseconds, set_seconds, EventRecord, EventTimestamp,
    FlatEvent, InputEvent, TimestampLayout, TimevalEvent, HAS_NATIVE_INPUT_HEADERS,
    INPUT_EVENT_SIZE,
};
pub use grab::{grab, release, release_grab, take_grab, GrabGuard};
