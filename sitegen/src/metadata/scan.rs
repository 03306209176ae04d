use crate::metadata::extract::{extract_photo_metadata, PhotoMetadata};
use crate::workflow::config::SiteConfig;
use anyhow::bail;
use log::{info, warn};
use photomapcore::PhotoRecord;
use walkdir::WalkDir;

/// Extracts metadata from every supported image under `config.photos_dir`.
pub fn process_photo_directory(config: &SiteConfig) -> anyhow::Result<Vec<PhotoMetadata>> {
    let root = &config.photos_dir;
    if !root.is_dir() {
        bail!("photos directory {} does not exist", root.display());
    }

    let mut collected = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable entry: {}", err);
                continue;
            }
        };
        if !entry.file_type().is_file() || !config.accepts(entry.path()) {
            continue;
        }
        collected.push(extract_photo_metadata(entry.path()).relative_to(root));
    }

    if collected.is_empty() {
        warn!("no web-ready photos found in {}", root.display());
    }
    Ok(collected)
}

/// Keeps the rows that carry a usable GPS fix, in scan order.
pub fn geolocated(metadata: &[PhotoMetadata]) -> Vec<PhotoMetadata> {
    let kept: Vec<PhotoMetadata> = metadata
        .iter()
        .filter(|row| row.to_record().is_some())
        .cloned()
        .collect();
    info!(
        "Processed {} photos, {} have GPS coordinates",
        metadata.len(),
        kept.len()
    );
    kept
}

/// Converts geolocated rows into engine records.
pub fn to_records(metadata: &[PhotoMetadata]) -> Vec<PhotoRecord> {
    metadata.iter().filter_map(PhotoMetadata::to_record).collect()
}
