use crate::clustering::zoom::recluster;
use crate::filter::{MonthSet, Timeline};
use crate::photo::{sort_by_capture, Cluster, PhotoRecord};
use crate::telemetry::{LogManager, Metrics, MetricsRecorder};
use crate::view::detail::DetailView;
use crate::view::state::ViewState;
use crate::view::summary::{FilterSummary, TimelineLabel};
use std::collections::HashSet;

/// State plus the clusters to draw for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub state: ViewState,
    pub clusters: Vec<Cluster>,
}

/// View-time engine over a fixed photo collection.
///
/// Every handler recomputes the active subset and/or the clusters from
/// scratch; nothing from a previous frame is reused.
pub struct ViewEngine {
    photos: Vec<PhotoRecord>,
    timeline: Option<Timeline>,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl ViewEngine {
    /// Flattens the embedded snapshot and produces the first frame.
    pub fn initialize(snapshot: Vec<Cluster>) -> (Self, Frame) {
        let photos = snapshot.into_iter().flat_map(Cluster::into_photos).collect();
        Self::from_photos(photos)
    }

    pub fn from_photos(photos: Vec<PhotoRecord>) -> (Self, Frame) {
        let total = photos.len();
        let mut photos: Vec<PhotoRecord> = photos
            .into_iter()
            .filter(PhotoRecord::has_valid_fix)
            .collect();
        sort_by_capture(&mut photos);

        let logger = LogManager::new();
        if photos.len() < total {
            logger.detail(&format!(
                "ViewEngine ignored {} photos without a valid fix",
                total - photos.len()
            ));
        }

        let timeline = Timeline::from_photos(&photos);
        let mut engine = Self {
            photos,
            timeline,
            metrics: MetricsRecorder::new(),
            logger,
        };
        let state = ViewState::new(engine.photos.len());
        let frame = engine.render(state);
        engine.logger.record(&format!(
            "ViewEngine initialized with {} photos, {} clusters at zoom {}",
            engine.photos.len(),
            frame.clusters.len(),
            frame.state.zoom
        ));
        (engine, frame)
    }

    pub fn photos(&self) -> &[PhotoRecord] {
        &self.photos
    }

    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics.snapshot()
    }

    pub fn active_photos<'a>(
        &'a self,
        state: &'a ViewState,
    ) -> impl Iterator<Item = &'a PhotoRecord> + 'a {
        state
            .active
            .iter()
            .filter_map(move |&index| self.photos.get(index))
    }

    pub fn on_zoom_changed(&mut self, mut state: ViewState, zoom: i32) -> Frame {
        self.metrics.record_zoom_change();
        state.zoom = zoom;
        self.render(state)
    }

    /// Applies both handle positions and the month selection in one step.
    pub fn on_filter_changed(
        &mut self,
        mut state: ViewState,
        slider_start: i64,
        slider_end: i64,
        months: MonthSet,
    ) -> Frame {
        state.filters.range.update(slider_start, slider_end);
        state.filters.months = months;
        self.apply_filters(state)
    }

    pub fn set_timeline_start(&mut self, mut state: ViewState, position: i64) -> Frame {
        state.filters.range.set_start(position);
        self.apply_filters(state)
    }

    pub fn set_timeline_end(&mut self, mut state: ViewState, position: i64) -> Frame {
        state.filters.range.set_end(position);
        self.apply_filters(state)
    }

    pub fn toggle_month(&mut self, mut state: ViewState, month: u32) -> Frame {
        state.filters.months.toggle(month);
        self.apply_filters(state)
    }

    pub fn select_all_months(&mut self, mut state: ViewState) -> Frame {
        state.filters.months = MonthSet::all();
        self.apply_filters(state)
    }

    pub fn clear_all_months(&mut self, mut state: ViewState) -> Frame {
        state.filters.months = MonthSet::empty();
        self.apply_filters(state)
    }

    pub fn clear_all_filters(&mut self, mut state: ViewState) -> Frame {
        state.filters = Default::default();
        self.apply_filters(state)
    }

    pub fn show_cluster(&self, mut state: ViewState, cluster: &Cluster) -> ViewState {
        state.detail = Some(DetailView::from_cluster(cluster));
        state
    }

    pub fn open_gallery(&self, mut state: ViewState, index: usize) -> ViewState {
        if let Some(detail) = state.detail.as_mut() {
            detail.open_gallery(index);
        }
        state
    }

    pub fn navigate_gallery(&self, mut state: ViewState, direction: i32) -> ViewState {
        if let Some(detail) = state.detail.as_mut() {
            detail.navigate(direction);
        }
        state
    }

    pub fn close_gallery(&self, mut state: ViewState) -> ViewState {
        if let Some(detail) = state.detail.as_mut() {
            detail.close_gallery();
        }
        state
    }

    pub fn toggle_filters_collapsed(&self, mut state: ViewState) -> ViewState {
        state.filters_collapsed = !state.filters_collapsed;
        state
    }

    /// Photos listed in the detail view, in display order.
    pub fn detail_photos<'a>(&'a self, state: &'a ViewState) -> Vec<&'a PhotoRecord> {
        let Some(detail) = state.detail.as_ref() else {
            return Vec::new();
        };
        detail
            .filenames()
            .iter()
            .filter_map(|name| self.photos.iter().find(|photo| &photo.filename == name))
            .collect()
    }

    pub fn summary(&self, state: &ViewState) -> FilterSummary {
        FilterSummary::new(state.active_count(), self.photos.len())
    }

    pub fn timeline_label(&self, state: &ViewState) -> TimelineLabel {
        TimelineLabel::new(&state.filters.range, self.timeline.as_ref())
    }

    pub fn is_clear_enabled(&self, state: &ViewState) -> bool {
        state.filters.is_active()
    }

    fn apply_filters(&mut self, mut state: ViewState) -> Frame {
        self.metrics.record_filter_change();
        state.active = state.filters.apply(&self.photos, self.timeline.as_ref());

        let detail_visible = state.detail.as_ref().map(|detail| {
            let visible: HashSet<&str> = self
                .active_photos(&state)
                .map(|photo| photo.filename.as_str())
                .collect();
            detail.retains_any(&visible)
        });
        if detail_visible == Some(false) {
            self.logger
                .detail("ViewEngine cleared detail view with no visible photos");
            state.detail = None;
        }

        self.logger.detail(&format!(
            "ViewEngine filters {:?} -> {} of {} photos",
            state.filters,
            state.active_count(),
            self.photos.len()
        ));
        self.render(state)
    }

    fn render(&mut self, state: ViewState) -> Frame {
        self.metrics.record_recluster();
        let clusters = recluster(self.active_photos(&state), state.zoom);
        Frame { state, clusters }
    }
}
