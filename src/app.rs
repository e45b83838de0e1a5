/// Main application state and eframe::App implementation
///
/// Ties together the digitizing session, the GUI panels, and file IO.

use std::path::PathBuf;

use eframe::egui;

use crate::data::chart_image::ChartImage;
use crate::digitize::controller::Session;
use crate::digitize::{export, table};
use crate::gui::image_view::{self, CursorReadout};
use crate::gui::plot_window::{self, PlotWindowState};
use crate::gui::table_panel::{self, TableAction, TablePanelState};
use crate::gui::theme::{self, AppTheme, ThemeColors};
use crate::gui::toolbar::{self, ToolbarAction};
use crate::gui::calibration_panel;
use crate::digitize::table::format_sig;

const HELP_TEXT: &str = "\
1) Open Image
2) Click 4 axis points in order: X0, X1, Y0, Y1
3) Enter numeric axis values in the calibration panel
4) Click data points (after 4 axis points are set)
   — each selected data point is appended to the table on the right
5) Use the mouse wheel to zoom (pointer-centric)
6) Pan with middle-mouse drag or Shift+Left-drag
7) The status bar shows image pixel coords and calibrated coords (when available)
8) Use the table buttons to delete or clear points; Export CSV saves PixelX,PixelY,CalibX,CalibY
9) Reset clears selections; Quit exits the app";

/// The main application
pub struct DigitizerApp {
    /// Capture session: view transform, calibration inputs, point store
    session: Session,
    /// Uploaded chart texture, if an image is loaded
    texture: Option<egui::TextureHandle>,

    /// GUI sub-states
    table_state: TablePanelState,
    plot_state: PlotWindowState,

    /// Status messages
    status_message: String,
    show_help: bool,
    show_about: bool,

    /// Current theme
    current_theme: AppTheme,
    theme_colors: ThemeColors,

    /// Dropped files buffer
    dropped_files: Vec<PathBuf>,
}

impl DigitizerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let default_theme = AppTheme::Light;
        theme::apply_theme(&cc.egui_ctx, default_theme);
        let theme_colors = ThemeColors::from_theme(default_theme);

        // Typography: scale for monitor DPI
        let ppi = cc.egui_ctx.pixels_per_point();
        let base_size = if ppi > 1.5 { 14.0 } else { 13.0 };
        let mut style = (*cc.egui_ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::new(base_size, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            egui::FontId::new(base_size, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::new(base_size * 1.25, egui::FontFamily::Proportional),
        );
        style.spacing.item_spacing = egui::vec2(8.0, 5.0);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);
        cc.egui_ctx.set_style(style);

        Self {
            session: Session::new(),
            texture: None,
            table_state: TablePanelState::default(),
            plot_state: PlotWindowState::default(),
            status_message: "Ready — open a chart image to begin".to_string(),
            show_help: false,
            show_about: false,
            current_theme: default_theme,
            theme_colors,
            dropped_files: Vec::new(),
        }
    }

    fn load_image(&mut self, ctx: &egui::Context, path: &std::path::Path) {
        match ChartImage::load(path) {
            Ok(chart) => {
                self.texture = Some(ctx.load_texture(
                    "chart_image",
                    chart.color_image,
                    egui::TextureOptions::NEAREST,
                ));
                self.session.set_image(chart.size);
                self.table_state.selection.clear();
                self.status_message = format!(
                    "Loaded: {} ({}×{}) — click axis points X0, X1, Y0, Y1",
                    path.display(),
                    chart.size.width,
                    chart.size.height
                );
            }
            Err(e) => {
                self.status_message = format!("Error loading {}: {}", path.display(), e);
                log::error!("Load error: {}", e);
            }
        }
    }

    /// Export the current table projection as CSV.
    fn export_csv(&mut self) {
        let rows = match export::export_rows(&self.session.store, &self.session.inputs) {
            Ok(rows) => rows,
            Err(e) => {
                self.status_message = format!("Export: {}", e);
                log::warn!("Export refused: {}", e);
                return;
            }
        };
        let Some(path) = toolbar::save_csv_dialog() else {
            return;
        };
        match std::fs::write(&path, export::csv_string(&rows)) {
            Ok(()) => {
                self.status_message =
                    format!("Saved {} points to {}", rows.len(), path.display());
                log::info!("Exported {} rows to {}", rows.len(), path.display());
            }
            Err(e) => {
                self.status_message = format!("Save error: {}", e);
                log::error!("CSV write failed: {}", e);
            }
        }
    }

    /// Open the plot preview for the current table projection.
    fn show_plot(&mut self) {
        match export::export_rows(&self.session.store, &self.session.inputs) {
            Ok(rows) => {
                self.plot_state.show(export::plot_series(&rows));
            }
            Err(e) => {
                self.status_message = format!("Plot: {}", e);
            }
        }
    }

    fn handle_toolbar_action(&mut self, ctx: &egui::Context, action: ToolbarAction) {
        match action {
            ToolbarAction::None => {}
            ToolbarAction::OpenImage => {
                if let Some(path) = toolbar::open_image_dialog() {
                    self.load_image(ctx, &path);
                }
            }
            ToolbarAction::ExportCsv => self.export_csv(),
            ToolbarAction::ShowPlot => self.show_plot(),
            ToolbarAction::Reset => {
                self.session.reset();
                self.table_state.selection.clear();
                self.status_message = "Reset — selections cleared".to_string();
            }
            ToolbarAction::Quit => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            ToolbarAction::ThemeToggle => {
                self.current_theme = self.current_theme.next();
                theme::apply_theme(ctx, self.current_theme);
                self.theme_colors = ThemeColors::from_theme(self.current_theme);
            }
            ToolbarAction::ShowHelp => self.show_help = true,
            ToolbarAction::ShowAbout => self.show_about = true,
        }
    }

    fn handle_table_action(&mut self, action: TableAction) {
        match action {
            TableAction::None => {}
            TableAction::DeleteSelected(indices) => {
                let n = indices.len();
                self.session.store.remove_data_points(&indices);
                self.status_message = format!("Deleted {} point(s)", n);
            }
            TableAction::ClearTable => {
                self.session.store.clear_data_points();
                self.status_message = "Cleared all data points".to_string();
            }
            TableAction::ExportCsv => self.export_csv(),
        }
    }

    fn show_status_bar(&self, ctx: &egui::Context, readout: &CursorReadout) {
        let frame = egui::Frame::side_top_panel(&ctx.style()).fill(self.theme_colors.status_bar_bg);
        egui::TopBottomPanel::bottom("status_bar").frame(frame).show(ctx, |ui| {
            ui.horizontal(|ui| {
                let pixel_text = match readout.pixel {
                    Some((px, py)) => format!("Pixel: {}, {}", px, py),
                    None => "Pixel: -, -".to_string(),
                };
                ui.colored_label(self.theme_colors.status_text, pixel_text);
                ui.separator();
                let calib_text = match readout.calib {
                    Some((x, y)) => format!("Calib: {}, {}", format_sig(x), format_sig(y)),
                    None => "Calib: -, -".to_string(),
                };
                ui.colored_label(self.theme_colors.status_text, calib_text);
                ui.separator();
                ui.colored_label(self.theme_colors.text_muted, &self.status_message);
            });
        });
    }
}

impl eframe::App for DigitizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Dropped image files load like File → Open Image
        ctx.input(|i| {
            for file in &i.raw.dropped_files {
                if let Some(path) = &file.path {
                    self.dropped_files.push(path.clone());
                }
            }
        });
        if let Some(path) = self.dropped_files.pop() {
            self.dropped_files.clear();
            self.load_image(ctx, &path);
        }

        let action = toolbar::show_toolbar(ctx, self.current_theme.label());
        self.handle_toolbar_action(ctx, action);

        // Right panel: calibration inputs + derived point table
        let mut table_action = TableAction::None;
        egui::SidePanel::right("table_panel")
            .default_width(360.0)
            .show(ctx, |ui| {
                calibration_panel::show_calibration_panel(ui, &mut self.session, &self.theme_colors);
                ui.separator();
                // Re-derived every frame from the live store and inputs, so
                // the table can never show a stale calibration.
                let calibration = self.session.calibration();
                let rows = table::project(&self.session.store, calibration.as_ref());
                table_action =
                    table_panel::show_table_panel(ui, &rows, &mut self.table_state, &self.theme_colors);
            });
        self.handle_table_action(table_action);

        // Central canvas
        let mut readout = CursorReadout::default();
        egui::CentralPanel::default().show(ctx, |ui| {
            readout = image_view::show_image_view(
                ui,
                &mut self.session,
                self.texture.as_ref(),
                &self.theme_colors,
            );
        });

        self.show_status_bar(ctx, &readout);

        plot_window::show_plot_window(ctx, &mut self.plot_state, &self.theme_colors);

        if self.show_help {
            let mut open = self.show_help;
            egui::Window::new("Workflow Instructions")
                .open(&mut open)
                .default_size([460.0, 360.0])
                .show(ctx, |ui| {
                    ui.label(HELP_TEXT);
                });
            self.show_help = open;
        }

        if self.show_about {
            let mut open = self.show_about;
            egui::Window::new("About")
                .open(&mut open)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.heading(format!("pixelplotter v{}", env!("CARGO_PKG_VERSION")));
                    ui.label("Chart digitizer — recover data series from raster chart images.");
                    ui.label("Click 4 axis points, enter their values, then click data points.");
                });
            self.show_about = open;
        }
    }
}
