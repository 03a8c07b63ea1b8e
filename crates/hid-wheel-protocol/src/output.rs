//! Outbound report encoding.

use super::{MAGIC, MSG_CONFIG, MSG_SCROLL, REPORT_LEN};

/// Encode an abbreviated config push for the peripheral.
///
/// Only the two device-relevant parameters travel over the wire; the rest of
/// the host configuration stays host-side. Bytes 4..32 are zero.
pub fn encode_config_push(step_pixels: u8, interval_ms: u8) -> [u8; REPORT_LEN] {
    let mut buf = [0u8; REPORT_LEN];
    buf[0] = MAGIC;
    buf[1] = MSG_CONFIG;
    buf[2] = step_pixels;
    buf[3] = interval_ms;
    buf
}

/// Encode a scroll delta frame as the peripheral firmware would.
///
/// The host never sends these; this is the device-side counterpart used by
/// emulated transports and tests.
pub fn encode_scroll_delta(vertical: i16) -> [u8; REPORT_LEN] {
    let mut buf = [0u8; REPORT_LEN];
    let payload = vertical.to_le_bytes();
    buf[0] = MAGIC;
    buf[1] = MSG_SCROLL;
    buf[2] = payload[0];
    buf[3] = payload[1];
    buf
}
