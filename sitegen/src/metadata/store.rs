use crate::metadata::extract::PhotoMetadata;
use anyhow::Context;
use log::info;
use std::fs;
use std::path::Path;

pub fn save_metadata_csv(rows: &[PhotoMetadata], path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating metadata directory {}", parent.display()))?;
    }
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating metadata csv {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("writing metadata for {}", row.filename))?;
    }
    writer
        .flush()
        .with_context(|| format!("flushing metadata csv {}", path.display()))?;
    info!("Metadata saved to {}", path.display());
    Ok(())
}

pub fn load_metadata_csv(path: &Path) -> anyhow::Result<Vec<PhotoMetadata>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening metadata csv {}", path.display()))?;
    let mut rows = Vec::new();
    for (line, row) in reader.deserialize().enumerate() {
        let row: PhotoMetadata =
            row.with_context(|| format!("parsing {} record {}", path.display(), line + 1))?;
        rows.push(row);
    }
    Ok(rows)
}
