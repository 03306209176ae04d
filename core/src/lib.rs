//! Clustering and filtering core for the photo map generator.
//!
//! The modules cover the build-time snapshot that ships inside the generated
//! site and the view-time engine that re-clusters the collection whenever the
//! zoom level or the date filters change.

pub mod clustering;
pub mod filter;
pub mod geo;
pub mod photo;
pub mod prelude;
pub mod telemetry;
pub mod view;

pub use photo::{Cluster, PhotoRecord};
pub use prelude::{ClusterInput, ClusterStage, EngineError, EngineResult, StageConfig};
pub use view::{Frame, ViewEngine, ViewState};
