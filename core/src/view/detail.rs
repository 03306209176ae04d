use crate::photo::Cluster;
use std::collections::HashSet;

/// The cluster currently listed in the sidebar, plus the gallery cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    filenames: Vec<String>,
    cursor: usize,
    gallery_open: bool,
}

impl DetailView {
    pub fn from_cluster(cluster: &Cluster) -> Self {
        Self {
            filenames: cluster
                .photos()
                .iter()
                .map(|photo| photo.filename.clone())
                .collect(),
            cursor: 0,
            gallery_open: false,
        }
    }

    pub fn filenames(&self) -> &[String] {
        &self.filenames
    }

    pub fn len(&self) -> usize {
        self.filenames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filenames.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_gallery_open(&self) -> bool {
        self.gallery_open
    }

    pub fn current(&self) -> Option<&str> {
        self.filenames.get(self.cursor).map(String::as_str)
    }

    /// Opens the gallery at `index`; out-of-range indices are ignored.
    pub fn open_gallery(&mut self, index: usize) {
        if index < self.filenames.len() {
            self.cursor = index;
            self.gallery_open = true;
        }
    }

    pub fn close_gallery(&mut self) {
        self.gallery_open = false;
    }

    /// Steps the cursor by `direction`, stopping at either end.
    pub fn navigate(&mut self, direction: i32) {
        let target = self.cursor as i64 + direction as i64;
        if target >= 0 && (target as usize) < self.filenames.len() {
            self.cursor = target as usize;
        }
    }

    pub fn has_previous(&self) -> bool {
        self.cursor > 0
    }

    pub fn has_next(&self) -> bool {
        self.cursor + 1 < self.filenames.len()
    }

    /// Counter text shown above the gallery image, e.g. "2 of 5".
    pub fn counter(&self) -> String {
        format!("{} of {}", self.cursor + 1, self.filenames.len())
    }

    /// True while at least one listed photo is still visible.
    pub fn retains_any(&self, visible: &HashSet<&str>) -> bool {
        self.filenames
            .iter()
            .any(|filename| visible.contains(filename.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photo::{ClusterBuilder, PhotoRecord};

    fn three_photo_cluster() -> Cluster {
        let mut builder = ClusterBuilder::seeded(PhotoRecord::new("a.jpg", 0.0, 0.0));
        builder.absorb(PhotoRecord::new("b.jpg", 0.0, 0.0));
        builder.absorb(PhotoRecord::new("c.jpg", 0.0, 0.0));
        builder.finish()
    }

    #[test]
    fn navigation_stops_at_both_ends() {
        let mut detail = DetailView::from_cluster(&three_photo_cluster());
        detail.open_gallery(0);
        detail.navigate(-1);
        assert_eq!(detail.cursor(), 0);
        assert!(!detail.has_previous());
        detail.navigate(1);
        detail.navigate(1);
        detail.navigate(1);
        assert_eq!(detail.current(), Some("c.jpg"));
        assert!(!detail.has_next());
        assert_eq!(detail.counter(), "3 of 3");
    }

    #[test]
    fn opening_past_the_end_is_ignored() {
        let mut detail = DetailView::from_cluster(&three_photo_cluster());
        detail.open_gallery(7);
        assert!(!detail.is_gallery_open());
        detail.open_gallery(2);
        assert!(detail.is_gallery_open());
        detail.close_gallery();
        assert!(!detail.is_gallery_open());
        assert_eq!(detail.cursor(), 2);
    }

    #[test]
    fn retains_any_checks_visible_names() {
        let detail = DetailView::from_cluster(&three_photo_cluster());
        let visible: HashSet<&str> = ["z.jpg", "b.jpg"].into_iter().collect();
        assert!(detail.retains_any(&visible));
        assert!(!detail.retains_any(&HashSet::new()));
    }
}
