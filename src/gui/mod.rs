pub mod calibration_panel;
pub mod image_view;
pub mod plot_window;
pub mod table_panel;
pub mod theme;
pub mod toolbar;
