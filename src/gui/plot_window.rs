/// Plot preview window — the digitized series as a line + marker plot

use egui_plot::{Line, Plot, PlotPoints, Points};

use crate::digitize::export::PlotSeries;
use crate::gui::theme::ThemeColors;

#[derive(Debug, Clone, Default)]
pub struct PlotWindowState {
    pub open: bool,
    pub series: Option<PlotSeries>,
}

impl PlotWindowState {
    pub fn show(&mut self, series: PlotSeries) {
        self.series = Some(series);
        self.open = true;
    }
}

pub fn show_plot_window(ctx: &egui::Context, state: &mut PlotWindowState, colors: &ThemeColors) {
    if !state.open {
        return;
    }
    let series = match &state.series {
        Some(s) => s.clone(),
        None => return,
    };

    let mut open = state.open;
    egui::Window::new("Digitized Chart Data")
        .open(&mut open)
        .default_size([560.0, 400.0])
        .show(ctx, |ui| {
            let (x_label, y_label) = if series.is_calibrated() {
                ("X", "Y")
            } else {
                ("Pixel X", "Pixel Y")
            };
            if !series.is_calibrated() {
                ui.colored_label(
                    colors.warning,
                    "Calibration unavailable — plotting raw pixel coordinates",
                );
            }
            Plot::new("digitized_series")
                .x_axis_label(x_label)
                .y_axis_label(y_label)
                .show_grid(true)
                .show(ui, |plot_ui| {
                    let line: PlotPoints = series.points().to_vec().into();
                    plot_ui.line(Line::new(line).color(colors.plot_line).width(1.5));
                    let markers: PlotPoints = series.points().to_vec().into();
                    plot_ui.points(
                        Points::new(markers)
                            .color(colors.data_marker)
                            .radius(3.0),
                    );
                });
        });
    state.open = open;
}
