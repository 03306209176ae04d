use anyhow::{bail, Context};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use photomapcore::PhotoRecord;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for generating a synthetic photo collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub count: usize,
    pub seed: u64,
    /// Number of locations the photos are scattered around.
    pub hotspots: usize,
    /// Maximum offset from a hotspot, in degrees.
    pub spread: f64,
    pub center_lat: f64,
    pub center_lon: f64,
    /// Hotspots are placed within this many degrees of the center.
    pub extent: f64,
    pub year: i32,
    /// Fraction of photos without a capture timestamp.
    pub undated_ratio: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: 200,
            seed: 0,
            hotspots: 8,
            spread: 0.0005,
            center_lat: 40.7128,
            center_lon: -74.0060,
            extent: 0.2,
            year: 2023,
            undated_ratio: 0.05,
        }
    }
}

impl GeneratorConfig {
    fn normalized_hotspots(&self) -> usize {
        self.hotspots.max(1)
    }
}

fn year_start(year: i32) -> anyhow::Result<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .with_context(|| format!("invalid generator year {}", year))
}

/// Scatters `count` photos around seeded hotspots. The same config always
/// yields the same collection.
pub fn build_synthetic_collection(config: &GeneratorConfig) -> anyhow::Result<Vec<PhotoRecord>> {
    if !(0.0..=1.0).contains(&config.undated_ratio) {
        bail!("undated_ratio must be within 0..=1, got {}", config.undated_ratio);
    }
    if !config.spread.is_finite() || config.spread < 0.0 {
        bail!("spread must be a non-negative number, got {}", config.spread);
    }
    if !config.extent.is_finite() || config.extent < 0.0 {
        bail!("extent must be a non-negative number, got {}", config.extent);
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let start = year_start(config.year)?;
    let seconds_in_year = (year_start(config.year + 1)? - start).num_seconds();

    let hotspots: Vec<(f64, f64)> = (0..config.normalized_hotspots())
        .map(|_| {
            (
                config.center_lat + rng.gen_range(-config.extent..=config.extent),
                config.center_lon + rng.gen_range(-config.extent..=config.extent),
            )
        })
        .collect();

    let mut photos = Vec::with_capacity(config.count);
    for index in 0..config.count {
        let (lat, lon) = hotspots[rng.gen_range(0..hotspots.len())];
        let latitude = (lat + rng.gen_range(-config.spread..=config.spread)).clamp(-90.0, 90.0);
        let longitude = (lon + rng.gen_range(-config.spread..=config.spread)).clamp(-180.0, 180.0);
        let mut photo = PhotoRecord::new(format!("synthetic_{:04}.jpg", index), latitude, longitude)
            .with_web_path(format!("photos/synthetic_{:04}.jpg", index));

        if !rng.gen_bool(config.undated_ratio) {
            let offset = rng.gen_range(0..seconds_in_year);
            photo = photo.with_timestamp(start + Duration::seconds(offset));
        }
        photos.push(photo);
    }

    Ok(photos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn generator_builds_requested_count_within_year() {
        let config = GeneratorConfig {
            count: 50,
            seed: 7,
            ..Default::default()
        };
        let photos = build_synthetic_collection(&config).unwrap();
        assert_eq!(photos.len(), 50);
        assert!(photos.iter().all(PhotoRecord::has_valid_fix));
        assert!(photos
            .iter()
            .filter_map(|photo| photo.datetime_taken)
            .all(|taken| taken.year() == 2023));
    }

    #[test]
    fn generator_is_deterministic_per_seed() {
        let config = GeneratorConfig {
            count: 20,
            seed: 13,
            ..Default::default()
        };
        let first = build_synthetic_collection(&config).unwrap();
        let second = build_synthetic_collection(&config).unwrap();
        assert_eq!(first, second);

        let other = build_synthetic_collection(&GeneratorConfig { seed: 14, ..config }).unwrap();
        assert_ne!(first, other);
    }

    #[test]
    fn generator_honors_undated_ratio_extremes() {
        let all_undated = GeneratorConfig {
            count: 10,
            undated_ratio: 1.0,
            ..Default::default()
        };
        let photos = build_synthetic_collection(&all_undated).unwrap();
        assert!(photos.iter().all(|photo| photo.datetime_taken.is_none()));

        let all_dated = GeneratorConfig {
            undated_ratio: 0.0,
            ..all_undated
        };
        let photos = build_synthetic_collection(&all_dated).unwrap();
        assert!(photos.iter().all(|photo| photo.datetime_taken.is_some()));
    }

    #[test]
    fn generator_rejects_bad_ratio() {
        let config = GeneratorConfig {
            undated_ratio: 1.5,
            ..Default::default()
        };
        assert!(build_synthetic_collection(&config).is_err());
    }

    #[test]
    fn generator_rejects_bad_extent() {
        for extent in [-0.5, f64::NAN, f64::INFINITY] {
            let config = GeneratorConfig {
                extent,
                ..Default::default()
            };
            assert!(build_synthetic_collection(&config).is_err());
        }
        let pinned = GeneratorConfig {
            count: 5,
            extent: 0.0,
            spread: 0.0,
            ..Default::default()
        };
        let photos = build_synthetic_collection(&pinned).unwrap();
        assert!(photos
            .iter()
            .all(|photo| photo.latitude == pinned.center_lat && photo.longitude == pinned.center_lon));
    }
}
