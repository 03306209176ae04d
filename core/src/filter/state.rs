use crate::filter::months::MonthSet;
use crate::filter::timeline::{SliderRange, Timeline};
use crate::photo::PhotoRecord;
use chrono::Datelike;

/// Timeline window plus month-of-year selection, combined with AND.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterState {
    pub range: SliderRange,
    pub months: MonthSet,
}

impl FilterState {
    pub fn new(range: SliderRange, months: MonthSet) -> Self {
        Self { range, months }
    }

    pub fn is_timeline_filtered(&self) -> bool {
        !self.range.is_full()
    }

    pub fn is_month_filtered(&self) -> bool {
        !self.months.is_all()
    }

    pub fn is_active(&self) -> bool {
        self.is_timeline_filtered() || self.is_month_filtered()
    }

    /// Whether `photo` survives the filters.
    ///
    /// With no filter active every photo passes, undated ones included.
    /// Once any filter is active an undated photo never passes.
    pub fn admits(&self, photo: &PhotoRecord, timeline: Option<&Timeline>) -> bool {
        if !self.is_active() {
            return true;
        }
        let Some(taken) = photo.datetime_taken else {
            return false;
        };
        if self.is_timeline_filtered() {
            let Some(timeline) = timeline else {
                return false;
            };
            let (start, end) = timeline.window(&self.range);
            if taken < start || taken > end {
                return false;
            }
        }
        self.months.contains(taken.month0())
    }

    /// Indices of admitted photos, in collection order.
    pub fn apply(&self, photos: &[PhotoRecord], timeline: Option<&Timeline>) -> Vec<usize> {
        photos
            .iter()
            .enumerate()
            .filter(|(_, photo)| self.admits(photo, timeline))
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::collections::BTreeSet;

    fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn year_of_photos() -> Vec<PhotoRecord> {
        let mut photos = vec![PhotoRecord::new("undated.jpg", 0.0, 0.0)];
        for month in 1..=12 {
            for d in [3, 17] {
                photos.push(
                    PhotoRecord::new(format!("{}-{}.jpg", month, d), 0.0, 0.0)
                        .with_timestamp(day(2022, month, d)),
                );
            }
        }
        photos
    }

    #[test]
    fn inactive_filter_admits_everything() {
        let photos = year_of_photos();
        let timeline = Timeline::from_photos(&photos);
        let active = FilterState::default().apply(&photos, timeline.as_ref());
        assert_eq!(active, (0..photos.len()).collect::<Vec<_>>());
    }

    #[test]
    fn active_filter_drops_undated_photos() {
        let photos = year_of_photos();
        let timeline = Timeline::from_photos(&photos);
        let mut months = MonthSet::all();
        months.remove(0);
        let filter = FilterState::new(SliderRange::full(), months);
        assert!(!filter.admits(&photos[0], timeline.as_ref()));
        assert_eq!(filter.apply(&photos, timeline.as_ref()).len(), 22);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let photos = year_of_photos();
        let timeline = Timeline::from_photos(&photos);
        let mut range = SliderRange::full();
        range.set_end(0);
        let filter = FilterState::new(range, MonthSet::all());
        let active = filter.apply(&photos, timeline.as_ref());
        // only the earliest photo sits exactly on the collapsed window
        assert_eq!(active, vec![1]);
    }

    #[test]
    fn combined_filter_is_intersection_of_parts() {
        let photos = year_of_photos();
        let timeline = Timeline::from_photos(&photos);
        let mut range = SliderRange::full();
        range.update(20, 75);
        let months = MonthSet::from_indices([1, 4, 5, 9, 11]);

        let timeline_only: BTreeSet<usize> = FilterState::new(range, MonthSet::all())
            .apply(&photos, timeline.as_ref())
            .into_iter()
            .collect();
        let months_only: BTreeSet<usize> = FilterState::new(SliderRange::full(), months)
            .apply(&photos, timeline.as_ref())
            .into_iter()
            .collect();
        let combined: BTreeSet<usize> = FilterState::new(range, months)
            .apply(&photos, timeline.as_ref())
            .into_iter()
            .collect();

        let expected: BTreeSet<usize> = timeline_only.intersection(&months_only).copied().collect();
        assert_eq!(combined, expected);
        assert!(!combined.is_empty());
    }

    #[test]
    fn empty_month_selection_admits_nothing() {
        let photos = year_of_photos();
        let timeline = Timeline::from_photos(&photos);
        let filter = FilterState::new(SliderRange::full(), MonthSet::empty());
        assert!(filter.apply(&photos, timeline.as_ref()).is_empty());
    }
}
