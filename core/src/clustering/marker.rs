use serde::Serialize;

/// Pixel sizing for a cluster marker and its count label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkerStyle {
    pub size: u32,
    pub font_size: u32,
}

impl MarkerStyle {
    pub fn for_count(photo_count: usize) -> Self {
        let size = marker_size(photo_count);
        Self {
            size,
            font_size: marker_font_size(photo_count, size),
        }
    }
}

pub fn marker_size(photo_count: usize) -> u32 {
    match photo_count {
        0 | 1 => 20,
        2..=5 => 25,
        6..=10 => 30,
        11..=20 => 35,
        _ => 40,
    }
}

pub fn marker_font_size(photo_count: usize, marker_size: u32) -> u32 {
    let digits = photo_count.to_string().len();
    let mut font_size = (marker_size as f64 * 0.4).max(10.0);
    if digits > 2 {
        font_size *= 0.8;
    }
    font_size.floor().max(8.0) as u32
}
