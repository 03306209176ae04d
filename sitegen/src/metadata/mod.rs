pub mod extract;
pub mod scan;
pub mod store;

pub use extract::PhotoMetadata;
pub use scan::{geolocated, process_photo_directory};
pub use store::{load_metadata_csv, save_metadata_csv};
