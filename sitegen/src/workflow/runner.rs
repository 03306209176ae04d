use crate::metadata::{
    geolocated, load_metadata_csv, process_photo_directory, save_metadata_csv, PhotoMetadata,
};
use crate::site::{generate_static_site, SiteSummary};
use crate::workflow::config::SiteConfig;
use anyhow::Context;
use photomapcore::clustering::{MarkerStyle, ZoomStage};
use photomapcore::filter::months::MONTH_ABBREVIATIONS;
use photomapcore::geo::threshold::MAX_ZOOM;
use photomapcore::telemetry::Metrics;
use photomapcore::{ClusterInput, ClusterStage, PhotoRecord, ViewEngine};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;

/// Cluster layout at one zoom level.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomRow {
    pub zoom: i32,
    pub threshold: f64,
    pub clusters: usize,
    pub largest: usize,
    pub largest_marker: MarkerStyle,
}

/// Per-zoom and per-month overview of a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterReport {
    pub photo_count: usize,
    pub zoom_rows: Vec<ZoomRow>,
    /// Photos visible with only that month selected, January first.
    pub month_counts: [usize; 12],
    pub metrics: Metrics,
}

impl fmt::Display for ClusterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "photos={}", self.photo_count)?;
        for row in &self.zoom_rows {
            writeln!(
                f,
                "zoom={:>2} threshold={:.5} clusters={} largest={} marker={}px font={}px",
                row.zoom,
                row.threshold,
                row.clusters,
                row.largest,
                row.largest_marker.size,
                row.largest_marker.font_size
            )?;
        }
        let months: Vec<String> = MONTH_ABBREVIATIONS
            .iter()
            .zip(self.month_counts.iter())
            .map(|(name, count)| format!("{}={}", name, count))
            .collect();
        writeln!(f, "months {}", months.join(" "))?;
        writeln!(
            f,
            "engine zoom_changes={} filter_changes={} reclusters={}",
            self.metrics.zoom_changes, self.metrics.filter_changes, self.metrics.reclusters
        )
    }
}

#[derive(Clone)]
pub struct Runner {
    config: SiteConfig,
}

impl Runner {
    pub fn new(config: SiteConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Scans the photos directory, keeps geolocated rows and writes the
    /// metadata CSV.
    pub fn collect_metadata(&self) -> anyhow::Result<Vec<PhotoMetadata>> {
        let scanned = process_photo_directory(&self.config).with_context(|| {
            format!("scanning photos in {}", self.config.photos_dir.display())
        })?;
        let rows = geolocated(&scanned);
        if !rows.is_empty() {
            let csv_path = self.config.metadata_csv();
            save_metadata_csv(&rows, &csv_path)
                .with_context(|| format!("saving metadata to {}", csv_path.display()))?;
        }
        Ok(rows)
    }

    /// Reads rows saved by an earlier [`Runner::collect_metadata`] run.
    pub fn load_metadata(&self) -> anyhow::Result<Vec<PhotoMetadata>> {
        let csv_path = self.config.metadata_csv();
        let rows = load_metadata_csv(&csv_path)
            .with_context(|| format!("loading metadata from {}", csv_path.display()))?;
        Ok(geolocated(&rows))
    }

    pub fn build_site(&self, rows: &[PhotoMetadata]) -> anyhow::Result<SiteSummary> {
        generate_static_site(&self.config, rows).with_context(|| {
            format!("generating site in {}", self.config.output_dir.display())
        })
    }

    /// Clusters the collection at every zoom level and replays the month
    /// filters through a view engine.
    pub fn report(&self, photos: &[PhotoRecord]) -> anyhow::Result<ClusterReport> {
        let (mut engine, frame) = ViewEngine::from_photos(photos.to_vec());

        let mut stage = ZoomStage::new();
        stage
            .initialize(&self.config.to_stage_config())
            .context("initializing zoom stage")?;
        let mut zoom_rows = Vec::new();
        for zoom in 1..=MAX_ZOOM {
            let clusters = stage
                .execute(ClusterInput::at_zoom(engine.photos(), zoom))
                .with_context(|| format!("clustering at zoom {}", zoom))?;
            let largest = clusters.iter().map(|c| c.photo_count()).max().unwrap_or(0);
            zoom_rows.push(ZoomRow {
                zoom,
                threshold: stage.threshold_for(zoom).context("computing zoom threshold")?,
                clusters: clusters.len(),
                largest,
                largest_marker: MarkerStyle::for_count(largest),
            });
        }
        stage.cleanup();

        let mut month_counts = [0usize; 12];
        let cleared = engine.clear_all_months(frame.state).state;
        for (month, count) in month_counts.iter_mut().enumerate() {
            *count = engine
                .toggle_month(cleared.clone(), month as u32)
                .state
                .active_count();
        }

        Ok(ClusterReport {
            photo_count: engine.photos().len(),
            zoom_rows,
            month_counts,
            metrics: engine.metrics(),
        })
    }

    /// Appends the report to `<metadata_dir>/cluster_report.log`.
    pub fn append_report(&self, report: &ClusterReport) -> anyhow::Result<()> {
        let report_path = self.config.report_log();
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&report_path)
            .with_context(|| format!("opening {}", report_path.display()))?;
        file.write_all(report.to_string().as_bytes())
            .with_context(|| format!("writing {}", report_path.display()))?;
        Ok(())
    }
}
