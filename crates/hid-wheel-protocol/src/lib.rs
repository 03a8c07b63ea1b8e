//! Raw-HID framing protocol for the smooth-scroll wheel peripheral.
//!
//! The peripheral exposes a QMK-style raw-HID interface and exchanges
//! fixed-length 32-byte reports with the host. Every report starts with a
//! magic byte and a type tag; the payload occupies bytes 2–3 and the rest of
//! the frame is reserved (zero-filled on encode, ignored on decode).
//!
//! ## Frame layout
//!
//! | Offset | Field | Notes |
//! |--------|-------|-------|
//! | 0 | magic | must equal [`MAGIC`] (`0xA5`) |
//! | 1 | type | [`MSG_SCROLL`] (device→host) or [`MSG_CONFIG`] (host→device) |
//! | 2–3 | payload | scroll: `i16` little-endian vertical delta; config: step pixels (`u8`), interval ms (`u8`) |
//! | 4–31 | reserved | zero on encode, ignored on decode |
//!
//! Decoding is deliberately tolerant: a buffer that is too short, carries the
//! wrong magic, or an unknown type tag yields no message rather than an
//! error. Unknown trailing bytes are ignored, which leaves room for new type
//! tags without breaking older hosts.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]
#![deny(static_mut_refs)]

pub mod input;
pub mod output;

pub use input::*;
pub use output::*;

/// Wheel peripheral USB vendor ID.
pub const VENDOR_ID: u16 = 0xCEEB;
/// Wheel peripheral USB product ID.
pub const PRODUCT_ID: u16 = 0x0002;

/// Raw-HID usage page exposed by the peripheral firmware.
pub const RAW_USAGE_PAGE: u16 = 0xFF60;
/// Raw-HID usage within [`RAW_USAGE_PAGE`].
pub const RAW_USAGE: u16 = 0x0061;

/// Fixed report length in bytes, both directions.
pub const REPORT_LEN: usize = 32;
/// Shortest buffer the decoder will look at.
pub const MIN_REPORT_LEN: usize = 8;

/// Sentinel byte at offset 0 of every valid frame.
pub const MAGIC: u8 = 0xA5;
/// Type tag: scroll delta report, device→host.
pub const MSG_SCROLL: u8 = 0x01;
/// Type tag: abbreviated config push, host→device.
pub const MSG_CONFIG: u8 = 0x81;
