use std::path::PathBuf;

use anyhow::Result;

/// Platform data directory for the engine's on-device files (draft cache
/// database, scratch file, settings).
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join("decorsync"))
        .ok_or_else(|| anyhow::anyhow!("no platform data directory available"))
}
