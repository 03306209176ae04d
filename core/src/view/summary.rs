use crate::filter::{SliderRange, Timeline};
use chrono::NaiveDateTime;
use std::fmt;

/// Short form used on the timeline labels, e.g. "Jun 1, 2023".
pub fn format_date(date: &NaiveDateTime) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Line shown under the filters describing how much of the collection is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterSummary {
    AllShown,
    Partial {
        shown: usize,
        total: usize,
        percent: u32,
    },
}

impl FilterSummary {
    pub fn new(shown: usize, total: usize) -> Self {
        if shown == total {
            return Self::AllShown;
        }
        let percent = (shown as f64 / total as f64 * 100.0).round() as u32;
        Self::Partial {
            shown,
            total,
            percent,
        }
    }
}

impl fmt::Display for FilterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllShown => write!(f, "All photos shown (no filters active)"),
            Self::Partial {
                shown,
                total,
                percent,
            } => write!(f, "{} of {} photos shown ({}%)", shown, total, percent),
        }
    }
}

/// Caption describing the selected timeline window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineLabel {
    Everything,
    Through(NaiveDateTime),
    From(NaiveDateTime),
    Between(NaiveDateTime, NaiveDateTime),
}

impl TimelineLabel {
    pub fn new(range: &SliderRange, timeline: Option<&Timeline>) -> Self {
        let Some(timeline) = timeline else {
            return Self::Everything;
        };
        if range.is_full() {
            return Self::Everything;
        }
        let (start, end) = timeline.window(range);
        match (range.start(), range.end()) {
            (0, _) => Self::Through(end),
            (_, 100) => Self::From(start),
            _ => Self::Between(start, end),
        }
    }
}

impl fmt::Display for TimelineLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Everything => write!(f, "Showing all photos"),
            Self::Through(end) => write!(f, "Photos through: {}", format_date(end)),
            Self::From(start) => write!(f, "Photos from: {}", format_date(start)),
            Self::Between(start, end) => write!(
                f,
                "Photos from: {} to: {}",
                format_date(start),
                format_date(end)
            ),
        }
    }
}
