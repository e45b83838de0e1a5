/// Calibration panel — the four axis-value text fields plus capture-progress
/// feedback.

use crate::digitize::calibration::{Calibration, CalibrationError};
use crate::digitize::controller::{CaptureState, Session};
use crate::digitize::points::AxisRole;
use crate::gui::theme::ThemeColors;

pub fn show_calibration_panel(ui: &mut egui::Ui, session: &mut Session, colors: &ThemeColors) {
    ui.heading("Axis Calibration");
    ui.add_space(2.0);

    // Which roles are already picked on the image
    ui.horizontal(|ui| {
        ui.label("Axis points:");
        let picked = session.store.axis_points().len();
        for (i, role) in AxisRole::ORDER.iter().enumerate() {
            let color = if i < picked {
                colors.success
            } else {
                colors.text_muted
            };
            ui.colored_label(color, role.label());
        }
    });

    match session.capture_state() {
        CaptureState::AwaitingAxisPoints => {
            let next = AxisRole::from_index(session.store.axis_points().len())
                .map(|r| r.label())
                .unwrap_or("—");
            ui.colored_label(colors.warning, format!("🎯 Click axis point {}", next));
        }
        CaptureState::AwaitingDataPoints => {
            ui.colored_label(colors.success, "🎯 Click data points");
        }
    }

    ui.add_space(4.0);

    // Free-text value fields; parse failures just leave calibration
    // unavailable.
    egui::Grid::new("axis_values")
        .num_columns(4)
        .spacing([6.0, 4.0])
        .show(ui, |ui| {
            ui.label("X0:");
            ui.add(egui::TextEdit::singleline(&mut session.inputs.x0).desired_width(70.0));
            ui.label("X1:");
            ui.add(egui::TextEdit::singleline(&mut session.inputs.x1).desired_width(70.0));
            ui.end_row();
            ui.label("Y0:");
            ui.add(egui::TextEdit::singleline(&mut session.inputs.y0).desired_width(70.0));
            ui.label("Y1:");
            ui.add(egui::TextEdit::singleline(&mut session.inputs.y1).desired_width(70.0));
            ui.end_row();
        });

    // Degenerate geometry is the one state worth shouting about: the user
    // has picked 4 points and typed 4 values, yet calibration cannot work.
    match session.inputs.parsed() {
        Some(values) => match Calibration::solve(session.store.axis_points(), &values) {
            Ok(_) => {
                ui.colored_label(colors.success, "Calibration: available");
            }
            Err(
                err @ (CalibrationError::DegenerateXAxis | CalibrationError::DegenerateYAxis),
            ) => {
                ui.colored_label(colors.error, format!("Calibration: {}", err));
            }
            Err(CalibrationError::MissingAxisPoints { .. }) => {
                ui.colored_label(colors.text_muted, "Calibration: not set");
            }
        },
        None => {
            ui.colored_label(colors.text_muted, "Calibration: not set");
        }
    }
}
