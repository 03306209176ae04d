use crate::filter::FilterState;
use crate::geo::threshold::DEFAULT_ZOOM;
use crate::view::detail::DetailView;

/// Everything the viewer mutates between events.
///
/// Handlers on [`crate::view::ViewEngine`] take a state by value and hand
/// back the next one, so the engine itself holds no per-session data.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub zoom: i32,
    pub filters: FilterState,
    /// Indices into the engine's photo collection, in collection order.
    pub active: Vec<usize>,
    pub detail: Option<DetailView>,
    pub filters_collapsed: bool,
}

impl ViewState {
    pub fn new(photo_count: usize) -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            filters: FilterState::default(),
            active: (0..photo_count).collect(),
            detail: None,
            filters_collapsed: false,
        }
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}
