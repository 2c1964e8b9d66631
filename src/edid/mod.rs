// EDID 1.x base block decoding. Pure functions; safe to call from any thread.

mod descriptor;

pub use descriptor::decode_block;

use crate::models::{DescriptorBlock, DisplayDescriptor};

/// Length of an EDID base block.
pub const EDID_BLOCK_LEN: usize = 128;
/// Offset of the first of the four 18-byte descriptor slots.
pub const DESCRIPTOR_OFFSET: usize = 54;
pub const DESCRIPTOR_LEN: usize = 18;
pub const DESCRIPTOR_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EdidError {
    #[error("EDID buffer too short: need 128 bytes, got {len}")]
    BufferTooShort { len: usize },
}

/// Decode the base block of `edid`. Extension blocks past byte 128 are ignored.
pub fn decode(edid: &[u8]) -> Result<DisplayDescriptor, EdidError> {
    let edid: &[u8; EDID_BLOCK_LEN] = edid
        .get(..EDID_BLOCK_LEN)
        .and_then(|b| b.try_into().ok())
        .ok_or(EdidError::BufferTooShort { len: edid.len() })?;

    Ok(DisplayDescriptor {
        manufacturer_id: manufacturer_id(edid),
        product_id: u16::from_le_bytes([edid[10], edid[11]]),
        serial_number: serial_number(edid),
        manufacture_week: edid[16],
        manufacture_year: i32::from(edid[17] as i8) + 1990,
        version: format!("{}.{}", edid[18], edid[19]),
        is_digital_input: edid[20] & 0x80 != 0,
        width_cm: edid[21],
        height_cm: edid[22],
        descriptors: descriptors(edid),
    })
}

/// Whole buffer as uppercase hex.
pub fn to_hex(edid: &[u8]) -> String {
    hex::encode_upper(edid)
}

/// Bytes 8-9: three 5-bit letters, big-endian, bit 15 reserved. 1 = 'A'; 0 is skipped.
fn manufacturer_id(edid: &[u8; EDID_BLOCK_LEN]) -> String {
    let packed = u16::from_be_bytes([edid[8], edid[9]]);
    tracing::debug!("EDID manufacturer bits: {:016b}", packed);
    [10u16, 5, 0]
        .iter()
        .map(|shift| ((packed >> shift) & 0x1F) as u8)
        .filter(|&v| v != 0)
        .map(|v| char::from(b'@' + v))
        .collect()
}

/// Bytes 12-15, last byte first. Alphanumerics as-is, everything else as two hex digits.
fn serial_number(edid: &[u8; EDID_BLOCK_LEN]) -> String {
    tracing::debug!(serial_bytes = ?&edid[12..16], "EDID serial number");
    edid[12..16]
        .iter()
        .rev()
        .map(|&b| {
            if b.is_ascii_alphanumeric() {
                char::from(b).to_string()
            } else {
                format!("{:02X}", b)
            }
        })
        .collect()
}

fn descriptors(edid: &[u8; EDID_BLOCK_LEN]) -> [DescriptorBlock; DESCRIPTOR_COUNT] {
    std::array::from_fn(|i| {
        let start = DESCRIPTOR_OFFSET + DESCRIPTOR_LEN * i;
        let mut raw = [0u8; DESCRIPTOR_LEN];
        raw.copy_from_slice(&edid[start..start + DESCRIPTOR_LEN]);
        decode_block(raw)
    })
}
