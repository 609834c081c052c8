//! Concrete controls built on the widget trait.

pub mod bar_chart;
pub mod button;
pub mod edit_field;
pub mod frame;
pub mod label;
pub mod progress_bar;
mod scroll_bar;
pub mod text_view;

pub use bar_chart::{BarChart, BarData, BarDataCell};
pub use button::Button;
pub use edit_field::EditField;
pub use frame::Frame;
pub use label::Label;
pub use progress_bar::ProgressBar;
pub use text_view::TextView;

pub use crate::component_context::ComponentContext;
