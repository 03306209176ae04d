use crate::clustering::greedy::{partition, RadialThreshold};
use crate::geo::threshold::{scaled_threshold, zoom_threshold};
use crate::photo::{Cluster, PhotoRecord};
use crate::prelude::{ClusterInput, ClusterStage, EngineError, EngineResult, StageConfig};
use crate::telemetry::log::LogManager;

/// Re-clusters `photos` for `zoom` with the default curve.
///
/// Unlike the snapshot this uses a single radial threshold, so the first
/// zoom pass can disagree with the embedded snapshot even at comparable
/// thresholds.
pub fn recluster<'a, I>(photos: I, zoom: i32) -> Vec<Cluster>
where
    I: IntoIterator<Item = &'a PhotoRecord>,
{
    partition(photos, &RadialThreshold(zoom_threshold(zoom)))
}

/// View-time clustering stage driven by the map zoom level.
pub struct ZoomStage {
    config: Option<StageConfig>,
    logger: LogManager,
}

impl ZoomStage {
    pub fn new() -> Self {
        Self {
            config: None,
            logger: LogManager::new(),
        }
    }

    pub fn threshold_for(&self, zoom: i32) -> EngineResult<f64> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| EngineError::Internal("stage not initialized".into()))?;
        Ok(scaled_threshold(
            zoom,
            config.base_threshold,
            config.minimum_distance,
        ))
    }
}

impl Default for ZoomStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ClusterStage for ZoomStage {
    fn initialize(&mut self, config: &StageConfig) -> EngineResult<()> {
        config.validate()?;
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, input: ClusterInput<'_>) -> EngineResult<Vec<Cluster>> {
        let zoom = input
            .zoom
            .ok_or_else(|| EngineError::InvalidInput("zoom level required".into()))?;
        let threshold = self.threshold_for(zoom)?;

        let clusters = partition(input.photos, &RadialThreshold(threshold));
        self.logger.detail(&format!(
            "ZoomStage zoom {} threshold {:.5} -> {} clusters",
            zoom,
            threshold,
            clusters.len()
        ));
        Ok(clusters)
    }

    fn cleanup(&mut self) {
        self.config = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spread() -> Vec<PhotoRecord> {
        (0..20)
            .map(|i| PhotoRecord::new(format!("s{}.jpg", i), 48.85 + i as f64 * 0.004, 2.35))
            .collect()
    }

    #[test]
    fn zoom_stage_matches_free_function() {
        let photos = spread();
        let mut stage = ZoomStage::new();
        stage.initialize(&StageConfig::default()).unwrap();
        for zoom in [3, 10, 12, 14, 18] {
            let staged = stage.execute(ClusterInput::at_zoom(&photos, zoom)).unwrap();
            assert_eq!(staged, recluster(&photos, zoom));
        }
        stage.cleanup();
    }

    #[test]
    fn zoom_stage_requires_zoom() {
        let mut stage = ZoomStage::new();
        stage.initialize(&StageConfig::default()).unwrap();
        assert!(matches!(
            stage.execute(ClusterInput::new(&[])),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn zooming_out_never_increases_cluster_count() {
        let photos = spread();
        let mut previous = usize::MAX;
        for zoom in (1..=18).rev() {
            let count = recluster(&photos, zoom).len();
            assert!(count <= previous, "zoom {} split clusters", zoom);
            previous = count;
        }
        assert_eq!(recluster(&photos, 1).len(), 1);
    }

    #[test]
    fn reclustering_is_idempotent() {
        let photos = spread();
        assert_eq!(recluster(&photos, 13), recluster(&photos, 13));
    }

    #[test]
    fn floor_keeps_nearby_photos_together_at_max_zoom() {
        let photos = vec![
            PhotoRecord::new("a.jpg", 40.0, -74.0),
            PhotoRecord::new("b.jpg", 40.0015, -74.0),
        ];
        assert_eq!(recluster(&photos, 18).len(), 1);
    }
}
