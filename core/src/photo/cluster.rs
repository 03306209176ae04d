use crate::geo::{Coordinate, StatsHelper};
use crate::photo::record::{sort_by_capture, PhotoRecord};
use serde::{Deserialize, Serialize};

/// A group of photos rendered as one map marker.
///
/// Clusters are only built through [`ClusterBuilder`], which keeps the
/// center derived from the members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    center_lat: f64,
    center_lon: f64,
    photo_count: usize,
    photos: Vec<PhotoRecord>,
}

impl Cluster {
    pub fn center_lat(&self) -> f64 {
        self.center_lat
    }

    pub fn center_lon(&self) -> f64 {
        self.center_lon
    }

    pub fn photo_count(&self) -> usize {
        self.photo_count
    }

    pub fn photos(&self) -> &[PhotoRecord] {
        &self.photos
    }

    pub fn into_photos(self) -> Vec<PhotoRecord> {
        self.photos
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.photos.iter().any(|photo| photo.filename == filename)
    }
}

/// Accumulates members around a seed photo.
pub struct ClusterBuilder {
    seed: Coordinate,
    members: Vec<PhotoRecord>,
}

impl ClusterBuilder {
    pub fn seeded(seed: PhotoRecord) -> Self {
        Self {
            seed: seed.coordinate(),
            members: vec![seed],
        }
    }

    pub fn seed(&self) -> Coordinate {
        self.seed
    }

    pub fn absorb(&mut self, photo: PhotoRecord) {
        self.members.push(photo);
    }

    /// Fixes the center and orders members by capture time.
    pub fn finish(self) -> Cluster {
        let Self { seed, mut members } = self;

        let center = if members.len() > 1 {
            let lats: Vec<f64> = members.iter().map(|p| p.latitude).collect();
            let lons: Vec<f64> = members.iter().map(|p| p.longitude).collect();
            Coordinate::new(StatsHelper::mean(&lats), StatsHelper::mean(&lons))
        } else {
            seed
        };

        sort_by_capture(&mut members);

        Cluster {
            center_lat: center.lat,
            center_lon: center.lon,
            photo_count: members.len(),
            photos: members,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn single_member_keeps_seed_coordinate_exactly() {
        let cluster = ClusterBuilder::seeded(PhotoRecord::new("a.jpg", 41.0, -75.0)).finish();
        assert_eq!(cluster.center_lat(), 41.0);
        assert_eq!(cluster.center_lon(), -75.0);
        assert_eq!(cluster.photo_count(), 1);
    }

    #[test]
    fn multi_member_center_is_mean() {
        let mut builder = ClusterBuilder::seeded(PhotoRecord::new("a.jpg", 10.0, 20.0));
        builder.absorb(PhotoRecord::new("b.jpg", 12.0, 22.0));
        builder.absorb(PhotoRecord::new("c.jpg", 14.0, 24.0));
        let cluster = builder.finish();
        assert!((cluster.center_lat() - 12.0).abs() < 1e-12);
        assert!((cluster.center_lon() - 22.0).abs() < 1e-12);
        assert_eq!(cluster.photo_count(), 3);
    }

    #[test]
    fn members_are_ordered_by_capture_time() {
        let taken = NaiveDate::from_ymd_opt(2023, 1, 15)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let mut builder = ClusterBuilder::seeded(
            PhotoRecord::new("dated.jpg", 40.0, -74.0).with_timestamp(taken),
        );
        builder.absorb(PhotoRecord::new("undated.jpg", 40.0, -74.0));
        let cluster = builder.finish();
        assert_eq!(cluster.photos()[0].filename, "undated.jpg");
        assert!(cluster.contains("dated.jpg"));
    }

    #[test]
    fn cluster_serializes_payload_fields() {
        let cluster = ClusterBuilder::seeded(PhotoRecord::new("a.jpg", 1.0, 2.0)).finish();
        let json = serde_json::to_value(&cluster).unwrap();
        assert_eq!(json["center_lat"], 1.0);
        assert_eq!(json["center_lon"], 2.0);
        assert_eq!(json["photo_count"], 1);
        assert_eq!(json["photos"][0]["filename"], "a.jpg");
    }
}
