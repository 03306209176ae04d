use crate::geo::Coordinate;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One photo with a GPS fix, as produced by metadata collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub filename: String,
    #[serde(default)]
    pub web_path: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub datetime_taken: Option<NaiveDateTime>,
    #[serde(default)]
    pub camera_make: Option<String>,
    #[serde(default)]
    pub camera_model: Option<String>,
    #[serde(default)]
    pub image_width: Option<u32>,
    #[serde(default)]
    pub image_height: Option<u32>,
}

impl PhotoRecord {
    pub fn new(filename: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            filename: filename.into(),
            web_path: None,
            latitude,
            longitude,
            datetime_taken: None,
            camera_make: None,
            camera_model: None,
            image_width: None,
            image_height: None,
        }
    }

    pub fn with_timestamp(mut self, taken: NaiveDateTime) -> Self {
        self.datetime_taken = Some(taken);
        self
    }

    pub fn with_web_path(mut self, web_path: impl Into<String>) -> Self {
        self.web_path = Some(web_path.into());
        self
    }

    pub fn with_camera(mut self, make: impl Into<String>, model: impl Into<String>) -> Self {
        self.camera_make = Some(make.into());
        self.camera_model = Some(model.into());
        self
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Records failing this check never reach the clustering passes.
    pub fn has_valid_fix(&self) -> bool {
        self.coordinate().is_valid()
    }

    /// "Make Model" when both are known.
    pub fn camera_label(&self) -> Option<String> {
        match (&self.camera_make, &self.camera_model) {
            (Some(make), Some(model)) => Some(format!("{} {}", make, model)),
            _ => None,
        }
    }
}

/// Stable sort by capture time, photos without a timestamp first.
pub fn sort_by_capture<T: std::borrow::Borrow<PhotoRecord>>(photos: &mut [T]) {
    photos.sort_by_key(|photo| photo.borrow().datetime_taken);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn missing_timestamps_sort_first_and_ties_keep_order() {
        let mut photos = vec![
            PhotoRecord::new("late.jpg", 0.0, 0.0).with_timestamp(at(2023, 6, 1)),
            PhotoRecord::new("undated-a.jpg", 0.0, 0.0),
            PhotoRecord::new("early.jpg", 0.0, 0.0).with_timestamp(at(2023, 1, 15)),
            PhotoRecord::new("undated-b.jpg", 0.0, 0.0),
        ];
        sort_by_capture(&mut photos);
        let names: Vec<_> = photos.iter().map(|p| p.filename.as_str()).collect();
        assert_eq!(
            names,
            vec!["undated-a.jpg", "undated-b.jpg", "early.jpg", "late.jpg"]
        );
    }

    #[test]
    fn record_serializes_iso_timestamp() {
        let photo = PhotoRecord::new("a.jpg", 40.0, -74.0).with_timestamp(at(2023, 1, 15));
        let json = serde_json::to_value(&photo).unwrap();
        assert_eq!(json["datetime_taken"], "2023-01-15T12:00:00");
        assert_eq!(json["web_path"], serde_json::Value::Null);
    }

    #[test]
    fn record_deserializes_with_only_required_fields() {
        let photo: PhotoRecord =
            serde_json::from_str(r#"{"filename":"a.jpg","latitude":1.5,"longitude":-2.5}"#)
                .unwrap();
        assert_eq!(photo.coordinate(), Coordinate::new(1.5, -2.5));
        assert!(photo.datetime_taken.is_none());
    }

    #[test]
    fn invalid_fix_is_detected() {
        assert!(!PhotoRecord::new("bad.jpg", 120.0, 0.0).has_valid_fix());
        assert!(PhotoRecord::new("ok.jpg", -33.9, 151.2).has_valid_fix());
    }

    #[test]
    fn camera_label_requires_both_parts() {
        let photo = PhotoRecord::new("a.jpg", 0.0, 0.0).with_camera("Apple", "iPhone 14");
        assert_eq!(photo.camera_label().as_deref(), Some("Apple iPhone 14"));
        let mut partial = photo.clone();
        partial.camera_model = None;
        assert!(partial.camera_label().is_none());
    }
}
