//! Writing a finished kit to disk.

use kit_core::{MarketingKit, Result, SourceAsset};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const MANIFEST_FILE: &str = "kit.json";

/// Write `kit.json` plus every asset decoded to `<category>-<n>.<ext>` under `dir`.
///
/// Returns the paths written, manifest first.
pub fn write_kit(kit: &MarketingKit, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let manifest = dir.join(MANIFEST_FILE);
    std::fs::write(&manifest, serde_json::to_vec_pretty(kit)?)?;
    let mut written = vec![manifest];

    for entry in kit.entries() {
        let asset = SourceAsset::from_data_url(entry.image)?;
        let name = format!("{}-{}.{}", entry.category, entry.index + 1, asset.extension());
        let path = dir.join(name);
        std::fs::write(&path, asset.bytes())?;
        debug!(path = %path.display(), title = entry.title.unwrap_or(""), "asset written");
        written.push(path);
    }
    Ok(written)
}
