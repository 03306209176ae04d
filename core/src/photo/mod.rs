pub mod cluster;
pub mod record;

pub use cluster::{Cluster, ClusterBuilder};
pub use record::{sort_by_capture, PhotoRecord};
