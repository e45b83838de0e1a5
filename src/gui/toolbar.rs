/// Toolbar — top menu bar with file operations and quick actions

use std::path::PathBuf;

/// Actions that can be triggered from the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    OpenImage,
    ExportCsv,
    ShowPlot,
    Reset,
    Quit,
    ThemeToggle,
    ShowHelp,
    ShowAbout,
}

/// Render the toolbar and return any triggered action
pub fn show_toolbar(ctx: &egui::Context, theme_label: &str) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            // File menu
            ui.menu_button("📁 File", |ui| {
                if ui.button("📂 Open Image…").clicked() {
                    action = ToolbarAction::OpenImage;
                    ui.close_menu();
                }
                if ui.button("💾 Export CSV…").clicked() {
                    action = ToolbarAction::ExportCsv;
                    ui.close_menu();
                }
                if ui.button("📈 Plot").clicked() {
                    action = ToolbarAction::ShowPlot;
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("🔄 Reset").clicked() {
                    action = ToolbarAction::Reset;
                    ui.close_menu();
                }
                if ui.button("🚪 Quit").clicked() {
                    action = ToolbarAction::Quit;
                    ui.close_menu();
                }
            });

            // View menu
            ui.menu_button("🔍 View", |ui| {
                if ui.button(format!("🎨 Theme: {}", theme_label)).clicked() {
                    action = ToolbarAction::ThemeToggle;
                    ui.close_menu();
                }
            });

            // Help menu
            ui.menu_button("❓ Help", |ui| {
                if ui.button("📖 Workflow Instructions").clicked() {
                    action = ToolbarAction::ShowHelp;
                    ui.close_menu();
                }
                if ui.button("ℹ About").clicked() {
                    action = ToolbarAction::ShowAbout;
                    ui.close_menu();
                }
            });

            // Quick-access buttons, mirroring the File menu
            ui.separator();
            if ui.button("Open Image").clicked() {
                action = ToolbarAction::OpenImage;
            }
            if ui.button("Export CSV").clicked() {
                action = ToolbarAction::ExportCsv;
            }
            if ui.button("Plot").clicked() {
                action = ToolbarAction::ShowPlot;
            }
            if ui.button("Reset").clicked() {
                action = ToolbarAction::Reset;
            }

            // Spacer + quick theme toggle
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add(
                        egui::Button::new(egui::RichText::new(theme_label).size(12.0))
                            .corner_radius(12.0),
                    )
                    .clicked()
                {
                    action = ToolbarAction::ThemeToggle;
                }
                ui.separator();
                ui.label(
                    egui::RichText::new("pixelplotter")
                        .color(egui::Color32::from_rgb(0x70, 0x75, 0x80))
                        .size(12.0),
                );
            });
        });
    });

    action
}

/// Show file-open dialog for chart images
pub fn open_image_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open Chart Image")
        .add_filter(
            "Image files",
            &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "gif", "webp"],
        )
        .add_filter("All Files", &["*"])
        .pick_file()
}

/// Show save dialog for the CSV export
pub fn save_csv_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Export Table CSV")
        .add_filter("CSV files", &["csv"])
        .set_file_name("digitized.csv")
        .save_file()
}
