pub mod greedy;
pub mod marker;
pub mod snapshot;
pub mod zoom;

pub use greedy::{partition, AxisThreshold, ProximityRule, RadialThreshold};
pub use marker::MarkerStyle;
pub use snapshot::SnapshotStage;
pub use zoom::{recluster, ZoomStage};
