pub mod builder;
pub mod render;

pub use builder::{generate_static_site, SiteSummary};
