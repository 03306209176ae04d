pub mod months;
pub mod state;
pub mod timeline;

pub use months::MonthSet;
pub use state::FilterState;
pub use timeline::{SliderRange, Timeline};
