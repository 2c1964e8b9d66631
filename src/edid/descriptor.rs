// 18-byte descriptor slots: detailed timing, display range limits, text, or opaque.

use crate::models::{Descriptor, DescriptorBlock, DetailedTiming, RangeLimits, TextKind};

const TAG_SERIAL_TEXT: u32 = 0xFF;
const TAG_UNSPECIFIED_TEXT: u32 = 0xFE;
const TAG_RANGE_LIMITS: u32 = 0xFD;
const TAG_MONITOR_NAME: u32 = 0xFC;

/// Classify a slot by the big-endian integer in its first four bytes.
///
/// A non-zero pixel clock (bytes 0-1) makes the tag exceed 0xFFFF and marks a
/// detailed timing descriptor; otherwise the display-descriptor tag sits in byte 3.
pub fn decode_block(raw: [u8; 18]) -> DescriptorBlock {
    let tag = u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]);
    let descriptor = match tag {
        t if t > 0xFFFF => Descriptor::DetailedTiming(detailed_timing(&raw)),
        TAG_RANGE_LIMITS => Descriptor::RangeLimits(range_limits(&raw)),
        TAG_MONITOR_NAME => text(&raw, TextKind::MonitorName),
        TAG_UNSPECIFIED_TEXT => text(&raw, TextKind::Unspecified),
        TAG_SERIAL_TEXT => text(&raw, TextKind::SerialNumber),
        _ => Descriptor::Unknown {
            hex: hex::encode_upper(raw),
        },
    };
    DescriptorBlock {
        tag,
        raw,
        descriptor,
    }
}

/// Active pixel counts are 12 bits: low byte plus the upper nibble of a shared byte.
/// Only the nibble is shifted; `(lo + hi & 0xF0) << 4` would shift the whole sum.
fn detailed_timing(raw: &[u8; 18]) -> DetailedTiming {
    let clock_10khz = u16::from_le_bytes([raw[0], raw[1]]);
    DetailedTiming {
        pixel_clock_mhz: clock_10khz / 100,
        horizontal_active: u16::from(raw[2]) | (u16::from(raw[4] & 0xF0) << 4),
        vertical_active: u16::from(raw[5]) | (u16::from(raw[7] & 0xF0) << 4),
    }
}

fn range_limits(raw: &[u8; 18]) -> RangeLimits {
    RangeLimits {
        min_vertical_hz: raw[5],
        max_vertical_hz: raw[6],
        min_horizontal_hz: raw[7],
        max_horizontal_hz: raw[8],
        max_pixel_clock_mhz: u16::from(raw[9]) * 10,
    }
}

fn text(raw: &[u8; 18], kind: TextKind) -> Descriptor {
    let text: String = raw[4..18]
        .iter()
        .map(|&b| if b.is_ascii() { char::from(b) } else { '?' })
        .collect();
    let text = text
        .trim_matches(|c: char| c.is_ascii_whitespace() || c.is_ascii_control())
        .to_string();
    Descriptor::Text { kind, text }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(prefix: &[u8]) -> [u8; 18] {
        let mut raw = [0u8; 18];
        raw[..prefix.len()].copy_from_slice(prefix);
        raw
    }

    #[test]
    fn detailed_timing_reconstructs_12_bit_active_pixels() {
        // 148.50 MHz, 1920x1080: 0x3A02 le, h=0x780 (0x80 + 0x7_ nibble), v=0x438
        let raw = block(&[0x02, 0x3A, 0x80, 0x18, 0x71, 0x38, 0x2D, 0x40]);
        let b = decode_block(raw);
        match b.descriptor {
            Descriptor::DetailedTiming(t) => {
                assert_eq!(t.pixel_clock_mhz, 148);
                assert_eq!(t.horizontal_active, 1920);
                assert_eq!(t.vertical_active, 1080);
                assert_eq!(t.to_string(), "Clock 148MHz, Active Pixels 1920x1080");
            }
            other => panic!("expected detailed timing, got {:?}", other),
        }
    }

    #[test]
    fn pixel_clock_above_i16_range_stays_unsigned() {
        // 0x9C40 = 40000 -> 400 MHz
        let b = decode_block(block(&[0x40, 0x9C]));
        match b.descriptor {
            Descriptor::DetailedTiming(t) => assert_eq!(t.pixel_clock_mhz, 400),
            other => panic!("expected detailed timing, got {:?}", other),
        }
    }

    #[test]
    fn range_limits_fields() {
        let b = decode_block(block(&[0, 0, 0, 0xFD, 0, 56, 76, 30, 83, 17]));
        assert_eq!(b.tag, 0xFD);
        match b.descriptor {
            Descriptor::RangeLimits(r) => {
                assert_eq!((r.min_vertical_hz, r.max_vertical_hz), (56, 76));
                assert_eq!((r.min_horizontal_hz, r.max_horizontal_hz), (30, 83));
                assert_eq!(r.max_pixel_clock_mhz, 170);
            }
            other => panic!("expected range limits, got {:?}", other),
        }
    }

    #[test]
    fn monitor_name_is_trimmed() {
        let mut raw = block(&[0, 0, 0, 0xFC, 0]);
        raw[4..18].copy_from_slice(b"DELL U2415\n   ");
        let b = decode_block(raw);
        assert_eq!(
            b.descriptor,
            Descriptor::Text {
                kind: TextKind::MonitorName,
                text: "DELL U2415".into()
            }
        );
    }

    #[test]
    fn non_ascii_text_bytes_become_question_marks() {
        let mut raw = block(&[0, 0, 0, 0xFE, 0]);
        raw[4..18].copy_from_slice(b"AB\xC3\xA9CD\n       ");
        assert_eq!(
            decode_block(raw).descriptor,
            Descriptor::Text {
                kind: TextKind::Unspecified,
                text: "AB??CD".into()
            }
        );
        raw[4..18].fill(0xC3);
        assert_eq!(
            decode_block(raw).descriptor,
            Descriptor::Text {
                kind: TextKind::Unspecified,
                text: "??????????????".into()
            }
        );
    }

    #[test]
    fn unrecognised_tag_falls_back_to_hex() {
        let raw = block(&[0, 0, 0, 0x10]);
        let b = decode_block(raw);
        assert_eq!(
            b.descriptor,
            Descriptor::Unknown {
                hex: "000000100000000000000000000000000000".into()
            }
        );
        assert_eq!(b.hex(), "000000100000000000000000000000000000");
    }
}
