//! Clustering thresholds, in decimal degrees.

/// Per-axis threshold used for the build-time snapshot.
pub const DEFAULT_SNAPSHOT_THRESHOLD: f64 = 0.001;

/// Radial threshold before the zoom curve is applied.
pub const BASE_THRESHOLD: f64 = 0.03;

/// Floor for the zoom threshold, roughly 200-250 m or two city blocks.
pub const MINIMUM_CLUSTER_DISTANCE: f64 = 0.002;

/// Zoom the viewer starts at before the map is fitted to the markers.
pub const DEFAULT_ZOOM: i32 = 10;

/// Deepest zoom the curve distinguishes; anything past it uses factor 1.
pub const MAX_ZOOM: i32 = 18;

/// Threshold for `zoom` using the default curve constants.
pub fn zoom_threshold(zoom: i32) -> f64 {
    scaled_threshold(zoom, BASE_THRESHOLD, MINIMUM_CLUSTER_DISTANCE)
}

/// `max(base * 3^(max(1, 18 - zoom) - 7), minimum)`.
pub fn scaled_threshold(zoom: i32, base: f64, minimum: f64) -> f64 {
    let zoom_factor = MAX_ZOOM.saturating_sub(zoom).max(1);
    let threshold = base * 3f64.powi(zoom_factor - 7);
    threshold.max(minimum)
}
