/// An already-open input device node, as the raw OS descriptor.
///
/// The caller owns it: nothing in this crate opens, validates, or closes it.
pub type DeviceHandle = core::ffi::c_int;
