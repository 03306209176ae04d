use crate::geo::threshold::{BASE_THRESHOLD, DEFAULT_SNAPSHOT_THRESHOLD, MINIMUM_CLUSTER_DISTANCE};
use crate::photo::{Cluster, PhotoRecord};
use serde::{Deserialize, Serialize};

/// Shared configuration for each clustering stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Per-axis threshold, in degrees, used for the build-time snapshot.
    pub snapshot_threshold: f64,
    /// Zoom-scaled radial threshold before the exponential curve is applied.
    pub base_threshold: f64,
    /// Floor for the zoom-scaled threshold.
    pub minimum_distance: f64,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            snapshot_threshold: DEFAULT_SNAPSHOT_THRESHOLD,
            base_threshold: BASE_THRESHOLD,
            minimum_distance: MINIMUM_CLUSTER_DISTANCE,
        }
    }
}

impl StageConfig {
    pub fn validate(&self) -> EngineResult<()> {
        for (name, value) in [
            ("snapshot_threshold", self.snapshot_threshold),
            ("base_threshold", self.base_threshold),
            ("minimum_distance", self.minimum_distance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidThreshold(format!(
                    "{} must be a finite, non-negative number of degrees (got {})",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Input handed to a clustering stage.
#[derive(Debug, Clone, Copy)]
pub struct ClusterInput<'a> {
    pub photos: &'a [PhotoRecord],
    pub zoom: Option<i32>,
}

impl<'a> ClusterInput<'a> {
    pub fn new(photos: &'a [PhotoRecord]) -> Self {
        Self { photos, zoom: None }
    }

    pub fn at_zoom(photos: &'a [PhotoRecord], zoom: i32) -> Self {
        Self {
            photos,
            zoom: Some(zoom),
        }
    }
}

/// Common error type for the engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("invalid threshold: {0}")]
    InvalidThreshold(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Trait describing a clustering pass over a photo collection.
pub trait ClusterStage {
    fn initialize(&mut self, config: &StageConfig) -> EngineResult<()>;
    fn execute(&mut self, input: ClusterInput<'_>) -> EngineResult<Vec<Cluster>>;
    fn cleanup(&mut self);
}
