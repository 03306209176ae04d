use crate::clustering::greedy::{partition, AxisThreshold};
use crate::photo::Cluster;
use crate::prelude::{ClusterInput, ClusterStage, EngineError, EngineResult, StageConfig};
use crate::telemetry::log::LogManager;

/// Build-time clustering stage producing the snapshot embedded in the site.
///
/// Uses a per-axis threshold: a record joins the open cluster when both its
/// latitude and longitude differ from the seed by at most the threshold.
pub struct SnapshotStage {
    threshold: Option<f64>,
    logger: LogManager,
}

impl SnapshotStage {
    pub fn new() -> Self {
        Self {
            threshold: None,
            logger: LogManager::new(),
        }
    }
}

impl Default for SnapshotStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ClusterStage for SnapshotStage {
    fn initialize(&mut self, config: &StageConfig) -> EngineResult<()> {
        config.validate()?;
        self.threshold = Some(config.snapshot_threshold);
        Ok(())
    }

    fn execute(&mut self, input: ClusterInput<'_>) -> EngineResult<Vec<Cluster>> {
        let threshold = self
            .threshold
            .ok_or_else(|| EngineError::Internal("stage not initialized".into()))?;

        let valid = input.photos.iter().filter(|photo| photo.has_valid_fix());
        let clusters = partition(valid, &AxisThreshold(threshold));

        let skipped = input.photos.len() - clusters.iter().map(Cluster::photo_count).sum::<usize>();
        if skipped > 0 {
            self.logger
                .detail(&format!("SnapshotStage skipped {} records without a valid fix", skipped));
        }
        self.logger.record(&format!(
            "SnapshotStage grouped {} photos into {} clusters (threshold {})",
            input.photos.len() - skipped,
            clusters.len(),
            threshold
        ));

        Ok(clusters)
    }

    fn cleanup(&mut self) {
        self.threshold = None;
    }
}
