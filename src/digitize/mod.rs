/// Core digitizing engine — view transform, calibration, point capture, and
/// table projection. UI-independent: the GUI layer only feeds pointer events
/// in and renders the resulting state.

pub mod calibration;
pub mod controller;
pub mod export;
pub mod points;
pub mod table;
pub mod view;
