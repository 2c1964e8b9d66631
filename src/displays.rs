// Connected displays from DRM sysfs: every <drm>/<connector>/edid that decodes.

use crate::edid;
use crate::line_source::read_lines_quiet;
use crate::models::DisplayDescriptor;
use serde::Serialize;
use std::path::Path;
use tracing::instrument;

pub const DRM_PATH: &str = "/sys/class/drm";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedDisplay {
    /// Connector directory name, e.g. `card0-HDMI-A-1`.
    pub connector: String,
    pub descriptor: DisplayDescriptor,
}

/// Decode the EDID of every connector under `drm_path`, sorted by connector name.
/// Disconnected connectors expose an empty file and are skipped; unreadable or
/// truncated blobs are logged and skipped.
#[instrument(fields(repo = "displays", operation = "scan_displays"))]
pub fn scan_displays(drm_path: &Path) -> anyhow::Result<Vec<DetectedDisplay>> {
    let mut displays = Vec::new();
    for entry in std::fs::read_dir(drm_path)? {
        let entry = entry?;
        let edid_path = entry.path().join("edid");
        if !edid_path.is_file() {
            continue;
        }
        let connector = entry.file_name().to_string_lossy().into_owned();
        let bytes = match std::fs::read(&edid_path) {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(connector = %connector, error = %e, "Unable to read EDID");
                continue;
            }
        };
        if bytes.is_empty() {
            let status = read_lines_quiet(entry.path().join("status"))
                .into_iter()
                .next()
                .unwrap_or_default();
            tracing::debug!(
                connector = %connector,
                status = %status,
                "No EDID (connector not in use)"
            );
            continue;
        }
        match edid::decode(&bytes) {
            Ok(descriptor) => displays.push(DetectedDisplay {
                connector,
                descriptor,
            }),
            Err(e) => {
                tracing::warn!(connector = %connector, error = %e, "Skipping undecodable EDID");
            }
        }
    }
    displays.sort_by(|a, b| a.connector.cmp(&b.connector));
    Ok(displays)
}

/// Log one INFO line per display, full JSON at DEBUG.
pub fn report_displays(found: &[DetectedDisplay]) -> anyhow::Result<()> {
    if found.is_empty() {
        tracing::info!("No displays with EDID found");
        return Ok(());
    }
    for detected in found {
        let d = &detected.descriptor;
        let json = serde_json::to_string(detected)?;
        let size_cm = format!("{}x{}", d.width_cm, d.height_cm);
        tracing::info!(
            connector = %detected.connector,
            manufacturer = %d.manufacturer_id,
            product = %d.product_id_hex(),
            serial = %d.serial_number,
            name = d.monitor_name().unwrap_or(""),
            size_cm = %size_cm,
            "display"
        );
        tracing::debug!(connector = %detected.connector, json = %json, "display detail");
    }
    Ok(())
}
