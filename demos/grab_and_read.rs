//! Grab an evdev node, print a few events, release it.
//!
//! ```text
//! RUST_LOG=debug cargo run --example grab_and_read -- /dev/input/event3 [count] [policy.toml]
//! ```
//!
//! Opening and reading the device is this program's job, not the library's.

#[cfg(unix)]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use evgrab::{
        EventRecord, EventTimestamp, GrabGuard, GrabPolicy, InputEvent, INPUT_EVENT_SIZE,
    };
    use std::io::Read;
    use std::os::fd::AsRawFd;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let path = args.next().ok_or("usage: grab_and_read <device> [count] [policy.toml]")?;
    let count: usize = match args.next() {
        Some(n) => n.parse()?,
        None => 16,
    };
    let policy = match args.next() {
        Some(p) => GrabPolicy::load(p)?,
        None => GrabPolicy::default(),
    };

    let mut file = std::fs::File::open(&path)?;
    let guard = GrabGuard::acquire(file.as_raw_fd(), policy)?;
    println!("{path}: grabbed={} (fd {})", policy.grab, guard.fd());

    let mut buf = [0u8; INPUT_EVENT_SIZE];
    for _ in 0..count {
        file.read_exact(&mut buf)?;
        // SAFETY: the buffer holds exactly one record as the kernel wrote it,
        // and every bit pattern is a valid `InputEvent`.
        let ev: InputEvent = unsafe { std::ptr::read_unaligned(buf.as_ptr().cast()) };
        println!(
            "{}.{:06} type={:#04x} code={:#05x} value={}",
            ev.seconds(),
            ev.microseconds(),
            ev.event_type(),
            ev.code(),
            ev.value()
        );
    }

    guard.release()?;
    Ok(())
}

#[cfg(not(unix))]
fn main() {
    eprintln!("grab_and_read needs a unix descriptor; see the capabilities demo instead");
}
