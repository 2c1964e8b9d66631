// Display identification (EDID) models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Decoded base EDID block. Owns all of its values; nothing borrows the source buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayDescriptor {
    pub manufacturer_id: String,
    pub product_id: u16,
    pub serial_number: String,
    pub manufacture_week: u8,
    pub manufacture_year: i32,
    pub version: String,
    pub is_digital_input: bool,
    pub width_cm: u8,
    pub height_cm: u8,
    pub descriptors: [DescriptorBlock; 4],
}

impl DisplayDescriptor {
    /// Product code as lowercase hex, the form most tools print it in.
    pub fn product_id_hex(&self) -> String {
        format!("{:x}", self.product_id)
    }

    /// Text of the first monitor-name (0xFC) descriptor, if any.
    pub fn monitor_name(&self) -> Option<&str> {
        self.descriptors.iter().find_map(|d| match &d.descriptor {
            Descriptor::Text {
                kind: TextKind::MonitorName,
                text,
            } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// One 18-byte descriptor slot plus its interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptorBlock {
    /// First four bytes read as a big-endian integer.
    pub tag: u32,
    pub raw: [u8; 18],
    pub descriptor: Descriptor,
}

impl DescriptorBlock {
    pub fn hex(&self) -> String {
        hex::encode_upper(self.raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Descriptor {
    DetailedTiming(DetailedTiming),
    RangeLimits(RangeLimits),
    Text { kind: TextKind, text: String },
    Unknown { hex: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextKind {
    /// Tag 0xFC.
    MonitorName,
    /// Tag 0xFE.
    Unspecified,
    /// Tag 0xFF.
    SerialNumber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedTiming {
    /// Pixel clock in whole MHz (raw 10 kHz units / 100).
    pub pixel_clock_mhz: u16,
    pub horizontal_active: u16,
    pub vertical_active: u16,
}

impl fmt::Display for DetailedTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Clock {}MHz, Active Pixels {}x{}",
            self.pixel_clock_mhz, self.horizontal_active, self.vertical_active
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeLimits {
    pub min_vertical_hz: u8,
    pub max_vertical_hz: u8,
    pub min_horizontal_hz: u8,
    pub max_horizontal_hz: u8,
    pub max_pixel_clock_mhz: u16,
}

impl fmt::Display for RangeLimits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Field Rate {}-{} Hz vertical, {}-{} Hz horizontal, Max clock: {} MHz",
            self.min_vertical_hz,
            self.max_vertical_hz,
            self.min_horizontal_hz,
            self.max_horizontal_hz,
            self.max_pixel_clock_mhz
        )
    }
}
