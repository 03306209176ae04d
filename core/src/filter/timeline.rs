use crate::photo::PhotoRecord;
use chrono::{Duration, NaiveDateTime};

pub const SLIDER_MIN: u8 = 0;
pub const SLIDER_MAX: u8 = 100;

/// Positions of the two timeline handles, as percentages.
///
/// `start <= end` always holds: a handle dragged past the other is clamped
/// to it rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderRange {
    start: u8,
    end: u8,
}

impl Default for SliderRange {
    fn default() -> Self {
        Self::full()
    }
}

fn clamp_position(position: i64) -> u8 {
    position.clamp(SLIDER_MIN as i64, SLIDER_MAX as i64) as u8
}

impl SliderRange {
    pub fn full() -> Self {
        Self {
            start: SLIDER_MIN,
            end: SLIDER_MAX,
        }
    }

    pub fn start(&self) -> u8 {
        self.start
    }

    pub fn end(&self) -> u8 {
        self.end
    }

    pub fn is_full(&self) -> bool {
        self.start == SLIDER_MIN && self.end == SLIDER_MAX
    }

    /// Moves the start handle, never past the end handle.
    pub fn set_start(&mut self, position: i64) {
        self.start = clamp_position(position).min(self.end);
    }

    /// Moves the end handle, never before the start handle.
    pub fn set_end(&mut self, position: i64) {
        self.end = clamp_position(position).max(self.start);
    }

    /// Applies both positions at once. When they cross, whichever handle
    /// moved is clamped to the one that stayed; if both moved the start
    /// handle yields.
    pub fn update(&mut self, start: i64, end: i64) {
        let start = clamp_position(start);
        let end = clamp_position(end);
        if start <= end {
            self.start = start;
            self.end = end;
        } else if start == self.start {
            self.end = start;
        } else {
            self.start = end;
            self.end = end;
        }
    }
}

/// Earliest and latest capture time across the full collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    earliest: NaiveDateTime,
    latest: NaiveDateTime,
}

impl Timeline {
    /// `None` when no photo carries a timestamp.
    pub fn from_photos<'a, I>(photos: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a PhotoRecord>,
    {
        let mut bounds: Option<(NaiveDateTime, NaiveDateTime)> = None;
        for taken in photos.into_iter().filter_map(|photo| photo.datetime_taken) {
            bounds = Some(match bounds {
                Some((earliest, latest)) => (earliest.min(taken), latest.max(taken)),
                None => (taken, taken),
            });
        }
        bounds.map(|(earliest, latest)| Self { earliest, latest })
    }

    pub fn earliest(&self) -> NaiveDateTime {
        self.earliest
    }

    pub fn latest(&self) -> NaiveDateTime {
        self.latest
    }

    /// Linear interpolation between earliest (0) and latest (100).
    pub fn instant_at(&self, position: u8) -> NaiveDateTime {
        let position = position.min(SLIDER_MAX) as i64;
        if position == SLIDER_MAX as i64 {
            return self.latest;
        }
        let span_ms = (self.latest - self.earliest).num_milliseconds();
        self.earliest + Duration::milliseconds(span_ms * position / SLIDER_MAX as i64)
    }

    /// Inclusive window selected by `range`.
    pub fn window(&self, range: &SliderRange) -> (NaiveDateTime, NaiveDateTime) {
        (self.instant_at(range.start()), self.instant_at(range.end()))
    }
}
