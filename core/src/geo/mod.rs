pub mod distance;
pub mod stats;
pub mod threshold;

pub use distance::Coordinate;
pub use stats::StatsHelper;
pub use threshold::zoom_threshold;
