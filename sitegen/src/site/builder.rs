use anyhow::Context;
use log::{info, warn};
use photomapcore::clustering::SnapshotStage;
use photomapcore::{ClusterInput, ClusterStage, PhotoRecord};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::metadata::PhotoMetadata;
use crate::site::render::{render_index_html, MAP_JS, STYLE_CSS};
use crate::workflow::config::SiteConfig;

pub const PHOTOS_SUBDIR: &str = "photos";

/// What a site build produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSummary {
    pub index_path: PathBuf,
    pub photo_count: usize,
    pub cluster_count: usize,
}

/// Copies each geolocated photo to `<output>/photos/<filename>` and returns
/// records pointing at the copies. Rows that fail to copy, repeat an earlier
/// filename, or name a path outside `photos/` are dropped with a warning.
pub fn prepare_photos_for_web(
    rows: &[PhotoMetadata],
    output_dir: &Path,
) -> anyhow::Result<Vec<PhotoRecord>> {
    let photos_dir = output_dir.join(PHOTOS_SUBDIR);
    fs::create_dir_all(&photos_dir)
        .with_context(|| format!("creating {}", photos_dir.display()))?;

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(record) = row.to_record() else {
            continue;
        };
        if !is_nested_name(&row.filename) {
            warn!("skipping {}: not a relative photo name", row.filename);
            continue;
        }
        if !seen.insert(row.filename.as_str()) {
            warn!(
                "skipping {}: another photo already uses that name",
                row.filepath.display()
            );
            continue;
        }

        let target = photos_dir.join(&row.filename);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        if let Err(err) = fs::copy(&row.filepath, &target) {
            warn!("could not copy {}: {}", row.filepath.display(), err);
            continue;
        }
        records.push(record.with_web_path(format!("{}/{}", PHOTOS_SUBDIR, row.filename)));
    }
    Ok(records)
}

fn is_nested_name(name: &str) -> bool {
    let path = Path::new(name);
    !name.is_empty()
        && path
            .components()
            .all(|part| matches!(part, Component::Normal(_)))
}

/// Writes `index.html`, `css/style.css`, `js/map.js` and the photo copies.
pub fn generate_static_site(
    config: &SiteConfig,
    rows: &[PhotoMetadata],
) -> anyhow::Result<SiteSummary> {
    let output_dir = &config.output_dir;
    for sub in ["css", "js"] {
        let dir = output_dir.join(sub);
        fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let records = prepare_photos_for_web(rows, output_dir)?;

    let mut stage = SnapshotStage::new();
    stage
        .initialize(&config.to_stage_config())
        .context("initializing snapshot stage")?;
    let clusters = stage
        .execute(ClusterInput::new(&records))
        .context("clustering photos for the site snapshot")?;
    stage.cleanup();

    let index_path = output_dir.join("index.html");
    let html = render_index_html(config, &clusters)?;
    fs::write(&index_path, html)
        .with_context(|| format!("writing {}", index_path.display()))?;

    let css_path = output_dir.join("css").join("style.css");
    fs::write(&css_path, STYLE_CSS).with_context(|| format!("writing {}", css_path.display()))?;
    let js_path = output_dir.join("js").join("map.js");
    fs::write(&js_path, MAP_JS).with_context(|| format!("writing {}", js_path.display()))?;

    info!(
        "Generated site at {} with {} photos in {} clusters",
        output_dir.display(),
        records.len(),
        clusters.len()
    );

    Ok(SiteSummary {
        index_path,
        photo_count: records.len(),
        cluster_count: clusters.len(),
    })
}
