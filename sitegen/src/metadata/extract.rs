use anyhow::Context;
use chrono::NaiveDateTime;
use exif::{In, Reader, Tag, Value};
use log::warn;
use photomapcore::PhotoRecord;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Everything collected from one image file. Any field may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoMetadata {
    pub filename: String,
    pub filepath: PathBuf,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub datetime_taken: Option<NaiveDateTime>,
    pub camera_make: Option<String>,
    pub camera_model: Option<String>,
    pub image_width: Option<u32>,
    pub image_height: Option<u32>,
}

impl PhotoMetadata {
    pub fn empty(path: &Path) -> Self {
        Self {
            filename: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            filepath: path.to_path_buf(),
            latitude: None,
            longitude: None,
            datetime_taken: None,
            camera_make: None,
            camera_model: None,
            image_width: None,
            image_height: None,
        }
    }

    /// Names the row by its path under `root` with `/` separators, so equal
    /// basenames in different folders stay distinct. Paths outside `root`
    /// keep the bare file name.
    pub fn relative_to(mut self, root: &Path) -> Self {
        if let Ok(relative) = self.filepath.strip_prefix(root) {
            let name = relative
                .components()
                .map(|part| part.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            if !name.is_empty() {
                self.filename = name;
            }
        }
        self
    }

    /// `None` unless both coordinates are present and in range.
    pub fn to_record(&self) -> Option<PhotoRecord> {
        let record = PhotoRecord {
            filename: self.filename.clone(),
            web_path: None,
            latitude: self.latitude?,
            longitude: self.longitude?,
            datetime_taken: self.datetime_taken,
            camera_make: self.camera_make.clone(),
            camera_model: self.camera_model.clone(),
            image_width: self.image_width,
            image_height: self.image_height,
        };
        record.has_valid_fix().then_some(record)
    }
}

/// Reads EXIF and pixel dimensions. Failures are logged and leave the
/// affected fields empty.
pub fn extract_photo_metadata(path: &Path) -> PhotoMetadata {
    let mut metadata = PhotoMetadata::empty(path);

    match image::image_dimensions(path) {
        Ok((width, height)) => {
            metadata.image_width = Some(width);
            metadata.image_height = Some(height);
        }
        Err(err) => warn!("reading dimensions of {}: {}", path.display(), err),
    }

    match read_exif(path) {
        Ok(exif) => {
            metadata.datetime_taken = ascii_field(&exif, Tag::DateTime)
                .or_else(|| ascii_field(&exif, Tag::DateTimeOriginal))
                .and_then(|value| parse_exif_datetime(&value));
            metadata.camera_make = ascii_field(&exif, Tag::Make);
            metadata.camera_model = ascii_field(&exif, Tag::Model);
            metadata.latitude = gps_coordinate(&exif, Tag::GPSLatitude, Tag::GPSLatitudeRef);
            metadata.longitude = gps_coordinate(&exif, Tag::GPSLongitude, Tag::GPSLongitudeRef);
        }
        Err(err) => warn!("{:#}", err),
    }

    metadata
}

fn read_exif(path: &Path) -> anyhow::Result<exif::Exif> {
    let file =
        File::open(path).with_context(|| format!("opening {} for EXIF", path.display()))?;
    let mut reader = BufReader::new(file);
    Reader::new()
        .read_from_container(&mut reader)
        .with_context(|| format!("reading EXIF from {}", path.display()))
}

fn ascii_field(exif: &exif::Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match field.value {
        Value::Ascii(ref parts) => {
            let raw = parts.first()?;
            let text = String::from_utf8_lossy(raw)
                .trim_matches(|c: char| c == '\0' || c.is_whitespace())
                .to_string();
            (!text.is_empty()).then_some(text)
        }
        _ => None,
    }
}

fn gps_coordinate(exif: &exif::Exif, coord_tag: Tag, ref_tag: Tag) -> Option<f64> {
    let coord = exif.get_field(coord_tag, In::PRIMARY)?;
    let reference = ascii_field(exif, ref_tag)?;
    match coord.value {
        Value::Rational(ref parts) if parts.len() == 3 => Some(dms_to_decimal(
            parts[0].to_f64(),
            parts[1].to_f64(),
            parts[2].to_f64(),
            &reference,
        )),
        _ => None,
    }
}

/// Degrees/minutes/seconds to signed decimal degrees; `S` and `W` are negative.
pub fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64, reference: &str) -> f64 {
    let decimal = degrees + minutes / 60.0 + seconds / 3600.0;
    match reference.trim().chars().next() {
        Some('S') | Some('W') | Some('s') | Some('w') => -decimal,
        _ => decimal,
    }
}

pub fn parse_exif_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), EXIF_DATETIME_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn dms_conversion_respects_hemisphere() {
        let north = dms_to_decimal(40.0, 30.0, 0.0, "N");
        let west = dms_to_decimal(74.0, 0.0, 36.0, "W");
        assert!((north - 40.5).abs() < 1e-12);
        assert!((west + 74.01).abs() < 1e-12);
    }

    #[test]
    fn exif_datetime_parses_colon_separated_dates() {
        let parsed = parse_exif_datetime("2023:06:01 14:05:09").unwrap();
        let expected = NaiveDate::from_ymd_opt(2023, 6, 1)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap();
        assert_eq!(parsed, expected);
        assert!(parse_exif_datetime("yesterday").is_none());
    }

    #[test]
    fn unreadable_file_yields_empty_metadata() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"not really a jpeg").unwrap();
        let metadata = extract_photo_metadata(&path);
        assert_eq!(metadata.filename, "broken.jpg");
        assert!(metadata.latitude.is_none());
        assert!(metadata.to_record().is_none());
    }

    #[test]
    fn relative_name_keeps_subdirectories() {
        let root = Path::new("web_photos");
        let nested = PhotoMetadata::empty(Path::new("web_photos/street/IMG_0001.jpg"))
            .relative_to(root);
        assert_eq!(nested.filename, "street/IMG_0001.jpg");
        let top = PhotoMetadata::empty(Path::new("web_photos/oak.jpg")).relative_to(root);
        assert_eq!(top.filename, "oak.jpg");
        let outside = PhotoMetadata::empty(Path::new("elsewhere/elm.jpg")).relative_to(root);
        assert_eq!(outside.filename, "elm.jpg");
    }

    #[test]
    fn record_requires_both_coordinates_in_range() {
        let mut metadata = PhotoMetadata::empty(Path::new("photos/a.jpg"));
        metadata.latitude = Some(40.0);
        assert!(metadata.to_record().is_none());
        metadata.longitude = Some(-74.0);
        let record = metadata.to_record().unwrap();
        assert_eq!(record.filename, "a.jpg");
        metadata.latitude = Some(95.0);
        assert!(metadata.to_record().is_none());
    }
}
