pub mod detail;
pub mod engine;
pub mod state;
pub mod summary;

pub use detail::DetailView;
pub use engine::{Frame, ViewEngine};
pub use state::ViewState;
pub use summary::{FilterSummary, TimelineLabel};
