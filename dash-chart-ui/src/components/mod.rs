//! Reusable Dioxus RSX components for the dashboard pages.

mod auth_form;
mod chart_container;
mod date_range_picker;
mod error_display;
mod filter_panel;
mod loading_spinner;
mod share_controls;

pub use auth_form::AuthForm;
pub use chart_container::ChartContainer;
pub use date_range_picker::DateRangePicker;
pub use error_display::ErrorDisplay;
pub use filter_panel::FilterPanel;
pub use loading_spinner::LoadingSpinner;
pub use share_controls::ShareControls;
