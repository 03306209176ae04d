use std::fmt;

const ALL_MONTHS: u16 = 0x0fff;

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Selected calendar months, zero-based (January = 0).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthSet(u16);

impl MonthSet {
    pub fn all() -> Self {
        Self(ALL_MONTHS)
    }

    pub fn empty() -> Self {
        Self(0)
    }

    /// Builds a set from raw indices; anything outside 0..=11 is ignored.
    pub fn from_indices<I>(indices: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        let mut set = Self::empty();
        for index in indices {
            if let Ok(month) = u32::try_from(index) {
                set.insert(month);
            }
        }
        set
    }

    pub fn contains(&self, month: u32) -> bool {
        month < 12 && self.0 & (1 << month) != 0
    }

    pub fn insert(&mut self, month: u32) {
        if month < 12 {
            self.0 |= 1 << month;
        }
    }

    pub fn remove(&mut self, month: u32) {
        if month < 12 {
            self.0 &= !(1 << month);
        }
    }

    pub fn toggle(&mut self, month: u32) {
        if self.contains(month) {
            self.remove(month);
        } else {
            self.insert(month);
        }
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn is_all(&self) -> bool {
        self.0 == ALL_MONTHS
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        (0..12).filter(move |&month| self.contains(month))
    }
}

impl Default for MonthSet {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Debug for MonthSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.iter().map(|month| MONTH_ABBREVIATIONS[month as usize]))
            .finish()
    }
}
