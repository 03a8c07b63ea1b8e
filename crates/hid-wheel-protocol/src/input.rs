//! Inbound report parsing.

use super::{MAGIC, MIN_REPORT_LEN, MSG_CONFIG, MSG_SCROLL};

/// A message decoded from a raw-HID report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelMessage {
    /// Signed raw wheel delta from the peripheral.
    ScrollDelta { vertical: i16 },
    /// Abbreviated smoothing parameters. Sent host→device at attach time;
    /// the peripheral may echo one back to retune the host engine at runtime.
    ConfigPush { step_pixels: u8, interval_ms: u8 },
}

/// Decode a raw report into a [`WheelMessage`].
///
/// Fails closed: returns `None` for buffers shorter than
/// [`MIN_REPORT_LEN`], a bad magic byte, or an unknown type tag. Bytes past
/// the payload are ignored, so padded or oversized transport buffers decode
/// the same as exact 32-byte frames.
pub fn decode(report: &[u8]) -> Option<WheelMessage> {
    if report.len() < MIN_REPORT_LEN {
        return None;
    }
    if *report.first()? != MAGIC {
        return None;
    }

    let lo = *report.get(2)?;
    let hi = *report.get(3)?;

    match *report.get(1)? {
        MSG_SCROLL => Some(WheelMessage::ScrollDelta {
            vertical: i16::from_le_bytes([lo, hi]),
        }),
        MSG_CONFIG => Some(WheelMessage::ConfigPush {
            step_pixels: lo,
            interval_ms: hi,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::REPORT_LEN;

    fn frame(tag: u8, b2: u8, b3: u8) -> [u8; REPORT_LEN] {
        let mut buf = [0u8; REPORT_LEN];
        buf[0] = MAGIC;
        buf[1] = tag;
        buf[2] = b2;
        buf[3] = b3;
        buf
    }

    #[test]
    fn test_decode_scroll_delta() {
        let buf = frame(MSG_SCROLL, 0x34, 0x12);
        assert_eq!(
            decode(&buf),
            Some(WheelMessage::ScrollDelta { vertical: 0x1234 })
        );
    }

    #[test]
    fn test_decode_negative_delta() {
        let buf = frame(MSG_SCROLL, 0xFE, 0xFF);
        assert_eq!(decode(&buf), Some(WheelMessage::ScrollDelta { vertical: -2 }));
    }

    #[test]
    fn test_decode_config_push() {
        let buf = frame(MSG_CONFIG, 4, 8);
        assert_eq!(
            decode(&buf),
            Some(WheelMessage::ConfigPush {
                step_pixels: 4,
                interval_ms: 8
            })
        );
    }

    #[test]
    fn test_decode_rejects_short_buffer() {
        assert_eq!(decode(&[]), None);
        assert_eq!(decode(&[MAGIC, MSG_SCROLL, 1, 0]), None);
        assert_eq!(decode(&[MAGIC, MSG_SCROLL, 1, 0, 0, 0, 0]), None);
    }

    #[test]
    fn test_decode_rejects_bad_magic() {
        let mut buf = frame(MSG_SCROLL, 1, 0);
        buf[0] = 0x5A;
        assert_eq!(decode(&buf), None);
        assert_eq!(decode(&[0u8; REPORT_LEN]), None);
    }

    #[test]
    fn test_decode_rejects_unknown_type() {
        assert_eq!(decode(&frame(0x00, 1, 0)), None);
        assert_eq!(decode(&frame(0x02, 1, 0)), None);
        assert_eq!(decode(&frame(0xFF, 1, 0)), None);
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let mut buf = frame(MSG_SCROLL, 5, 0);
        buf[4..].fill(0xEE);
        assert_eq!(decode(&buf), Some(WheelMessage::ScrollDelta { vertical: 5 }));

        // Oversized transport buffer decodes identically.
        let mut long = vec![0u8; 64];
        long[..REPORT_LEN].copy_from_slice(&frame(MSG_SCROLL, 5, 0));
        assert_eq!(decode(&long), Some(WheelMessage::ScrollDelta { vertical: 5 }));
    }

    #[test]
    fn test_decode_minimum_length_frame() {
        // Exactly MIN_REPORT_LEN bytes is accepted.
        let buf = [MAGIC, MSG_SCROLL, 0x0A, 0x00, 0, 0, 0, 0];
        assert_eq!(decode(&buf), Some(WheelMessage::ScrollDelta { vertical: 10 }));
    }
}
