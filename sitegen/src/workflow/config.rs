use anyhow::Context;
use photomapcore::geo::threshold::{DEFAULT_SNAPSHOT_THRESHOLD, DEFAULT_ZOOM};
use photomapcore::prelude::StageConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const METADATA_CSV: &str = "photo_metadata.csv";
pub const REPORT_LOG: &str = "cluster_report.log";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub photos_dir: PathBuf,
    pub output_dir: PathBuf,
    pub metadata_dir: PathBuf,
    pub snapshot_threshold: f64,
    pub title: String,
    pub subtitle: String,
    pub initial_zoom: i32,
    pub extensions: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            photos_dir: PathBuf::from("web_photos"),
            output_dir: PathBuf::from("output/site"),
            metadata_dir: PathBuf::from("output"),
            snapshot_threshold: DEFAULT_SNAPSHOT_THRESHOLD,
            title: "Tree Photos Explorer".to_string(),
            subtitle: "Click on map markers to explore tree photos by location".to_string(),
            initial_zoom: DEFAULT_ZOOM,
            extensions: ["jpg", "jpeg", "png", "tiff", "tif"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl SiteConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading site config {}", path_ref.display()))?;
        let config: SiteConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing site config {}", path_ref.display()))?;
        config
            .to_stage_config()
            .validate()
            .with_context(|| format!("validating site config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        photos_dir: PathBuf,
        output_dir: PathBuf,
        metadata_dir: PathBuf,
        snapshot_threshold: f64,
    ) -> Self {
        Self {
            photos_dir,
            output_dir,
            metadata_dir,
            snapshot_threshold,
            ..Default::default()
        }
    }

    pub fn to_stage_config(&self) -> StageConfig {
        StageConfig {
            snapshot_threshold: self.snapshot_threshold,
            ..Default::default()
        }
    }

    pub fn metadata_csv(&self) -> PathBuf {
        self.metadata_dir.join(METADATA_CSV)
    }

    pub fn report_log(&self) -> PathBuf {
        self.metadata_dir.join(REPORT_LOG)
    }

    /// Case-insensitive extension check against the configured list.
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}
